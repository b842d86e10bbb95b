//! Ties an environment, the call-tracing registry, the gensym counter, and
//! an output sink together into the one object the evaluator threads
//! through every call.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io::{self, Write};
use std::rc::Rc;

use log::trace;

use crate::env::Env;
use crate::error::Result;
use crate::value::Value;

/// Runs a program against a fresh global environment and collects whatever
/// it writes to stdout.
///
/// `Interpreter::new` wires output to the real `stdout`; tests use
/// [`Interpreter::capturing`] to redirect it into an in-memory buffer
/// instead.
pub struct Interpreter {
    pub global: Env,
    trace_registry: RefCell<HashSet<String>>,
    gensym_counter: Cell<u64>,
    output: RefCell<Box<dyn Write>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            global: Env::global(),
            trace_registry: RefCell::new(HashSet::new()),
            gensym_counter: Cell::new(0),
            output: RefCell::new(Box::new(io::stdout())),
        }
    }

    /// Build an interpreter whose `println` output lands in `buf` instead of
    /// stdout.
    pub fn capturing(buf: Rc<RefCell<Vec<u8>>>) -> Self {
        Interpreter {
            global: Env::global(),
            trace_registry: RefCell::new(HashSet::new()),
            gensym_counter: Cell::new(0),
            output: RefCell::new(Box::new(SharedBuf(buf))),
        }
    }

    /// Parse and evaluate a whole program, returning the value of its last
    /// top-level expression.
    pub fn run(&self, text: &str) -> Result<Value> {
        let program = crate::parse::parse(text)?;
        crate::eval::eval(&program, self.global.clone(), self)
    }

    pub fn write_out(&self, s: &str) {
        let mut out = self.output.borrow_mut();
        let _ = out.write_all(s.as_bytes());
        let _ = out.flush();
    }

    /// Mark `name` as traceable: future calls to a callable bound under this
    /// name get wrapped with entry/exit logging. See `crate::eval::call`.
    pub fn register_traceable(&self, name: &str) {
        trace!("Registering {} for call tracing.", name);
        self.trace_registry.borrow_mut().insert(name.to_string());
    }

    pub fn is_traced(&self, name: &str) -> bool {
        self.trace_registry.borrow().contains(name)
    }

    /// A symbol that has never been bound anywhere else in the program,
    /// used by macro hygiene to rename a macro body's locally-introduced
    /// symbols. Monotonic, so distinct expansions never collide.
    pub fn gensym(&self, base: &str) -> String {
        let n = self.gensym_counter.get();
        self.gensym_counter.set(n + 1);
        format!("##{}#{}", base, n)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A `Write` target backed by a shared, growable byte buffer.
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
