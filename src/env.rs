use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::value::Value;

/// A type to represent the bindings held by a single environment frame.
pub type Ns = HashMap<String, Value>;

struct Frame {
    bindings: RefCell<Ns>,
    parent: Option<Env>,
    is_global: bool,
}

/// A lexical environment frame. Cheap to clone (an `Rc` bump) and shared by
/// every closure that captured it.
///
/// Frames form a tree rooted at a single, pinned global frame created by
/// [`Env::global`]. `Let`, callable invocation, and callable construction
/// each grow the tree by one frame; nothing ever removes a frame out from
/// under a live reference.
#[derive(Clone)]
pub struct Env(Rc<Frame>);

impl Env {
    /// Create the one-and-only global frame for an interpreter instance.
    pub fn global() -> Self {
        Env(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
            is_global: true,
        }))
    }

    /// A new, empty frame whose parent is `self`.
    pub fn extend(&self) -> Self {
        trace!("Creating a new environment frame.");
        Env(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
            is_global: false,
        }))
    }

    /// A new frame, pre-populated with `mapping`, whose parent is `self`.
    pub fn extend_with(&self, mapping: Ns) -> Self {
        Env(Rc::new(Frame {
            bindings: RefCell::new(mapping),
            parent: Some(self.clone()),
            is_global: false,
        }))
    }

    pub fn is_global(&self) -> bool {
        self.0.is_global
    }

    /// Walk the parent chain to the unique global frame. Every frame has a
    /// path to it, since only [`Env::global`] ever creates a frame with no
    /// parent.
    pub fn global_ancestor(&self) -> Self {
        let mut cur = self.clone();
        while !cur.is_global() {
            cur = cur
                .0
                .parent
                .clone()
                .expect("non-global frame always has a parent");
        }
        cur
    }

    /// Search `self`, then each parent in turn, for a binding of `sym`.
    pub fn lookup(&self, sym: &str) -> Option<Value> {
        let mut cur = Some(self.clone());
        while let Some(frame) = cur {
            if let Some(v) = frame.0.bindings.borrow().get(sym) {
                return Some(v.clone());
            }
            cur = frame.0.parent.clone();
        }
        None
    }

    /// Create or overwrite a binding in exactly this frame.
    pub fn define(&self, sym: &str, val: Value) {
        trace!("Binding {} in the current frame.", sym);
        self.0.bindings.borrow_mut().insert(sym.to_string(), val);
    }

    /// The number of bindings held directly by this frame (not counting
    /// parents). Used by the fexpr `eval` shortcut to detect a call that
    /// bound no user parameters.
    pub fn own_len(&self) -> usize {
        self.0.bindings.borrow().len()
    }

    /// The walk-and-write assignment rule.
    ///
    /// If `self` is the global frame, the write lands there unconditionally.
    /// Otherwise, each non-global ancestor (starting at `self`) is checked in
    /// turn; the first one already holding `sym` gets overwritten. If no
    /// non-global frame holds it, the binding is created fresh in `self`.
    ///
    /// This is what lets a `let`-bound local be rebound by an inner
    /// assignment (the counter-in-`let` idiom) while keeping a same-named
    /// global safe from accidental inner mutation.
    pub fn assign(&self, sym: &str, val: Value) {
        if self.is_global() {
            self.define(sym, val);
            return;
        }

        let mut cur = Some(self.clone());
        while let Some(frame) = cur {
            if !frame.is_global() && frame.0.bindings.borrow().contains_key(sym) {
                frame.0.bindings.borrow_mut().insert(sym.to_string(), val);
                return;
            }
            cur = frame.0.parent.clone();
        }

        self.define(sym, val);
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Env {{ global: {}, bindings: {} }}",
            self.is_global(),
            self.own_len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn global_is_unique_and_pinned() {
        let global = Env::global();
        let child = global.extend();
        assert!(global.global_ancestor() == global);
        assert!(child.global_ancestor() == global);
    }

    #[test]
    fn lookup_walks_parents() {
        let global = Env::global();
        global.define("x", Value::Num(1.0));
        let child = global.extend();
        assert_eq!(child.lookup("x"), Some(Value::Num(1.0)));
        assert_eq!(child.lookup("y"), None);
    }

    #[test]
    fn assign_rebinds_nearest_non_global_frame() {
        let global = Env::global();
        global.define("priv", Value::Num(99.0));
        let let_frame = global.extend();
        let_frame.define("priv", Value::Num(0.0));
        let call_frame = let_frame.extend();

        // simulates `priv = priv + 1` running inside a closure whose scope
        // extends `let_frame`
        call_frame.assign("priv", Value::Num(1.0));

        assert_eq!(let_frame.lookup("priv"), Some(Value::Num(1.0)));
        assert_eq!(global.lookup("priv"), Some(Value::Num(99.0)));
    }

    #[test]
    fn assign_creates_local_when_no_non_global_ancestor_has_it() {
        let global = Env::global();
        let frame = global.extend();
        frame.assign("fresh", Value::Bool(true));
        assert_eq!(frame.own_len(), 1);
        assert_eq!(global.own_len(), 0);
    }

    #[test]
    fn assign_in_global_frame_always_writes_there() {
        let global = Env::global();
        global.assign("x", Value::Num(5.0));
        assert_eq!(global.lookup("x"), Some(Value::Num(5.0)));
    }
}
