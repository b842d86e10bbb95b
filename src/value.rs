//! Runtime values: what `eval` produces, and what environment frames bind
//! symbols to.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;
use crate::env::Env;
use crate::error::Result;
use crate::interpreter::Interpreter;

mod display;

/// The shared shape of `Function`, `FExpr`, and `Macro`. Which call protocol
/// applies is decided entirely by which `Value` variant wraps a given
/// `Callable`, not by anything in this struct.
#[derive(Debug)]
pub struct Callable {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Rc<Expr>,
    /// The captured definition scope, an extension of the environment the
    /// callable was created in. Invocation never binds parameters directly
    /// into this frame; a fresh child is allocated per call instead, so this
    /// frame normally stays empty for the callable's whole lifetime.
    pub scope: Env,
}

/// The `eval` identifier visible inside a running fexpr body.
#[derive(Debug, Clone)]
pub struct CallScopedEval {
    pub def_env: Env,
    pub call_env: Env,
}

/// A host-provided operator surfaced through the primitive bridge
/// (`crate::primitives`). `Pure` variants don't need interpreter state;
/// `Ctx` variants do (I/O, tracing registration, anything that touches the
/// `Interpreter`).
#[derive(Clone)]
pub enum HostFn {
    Pure(Rc<dyn Fn(&[Value]) -> Result<Value>>),
    Ctx(Rc<dyn Fn(&[Value], &Interpreter) -> Result<Value>>),
}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("<host fn>")
    }
}

/// The discriminated union every evaluation produces.
#[derive(Debug, Clone)]
pub enum Value {
    Num(f64),
    Str(String),
    Bool(bool),
    /// A wrapped, unevaluated expression: the vehicle fexpr/macro
    /// parameters and gensym'd symbols travel in, and the type a fexpr that
    /// simply returns its argument hands back to the caller.
    QuoteVal(Rc<Expr>),
    Nil,
    Function(Rc<Callable>),
    FExpr(Rc<Callable>),
    Macro(Rc<Callable>),
    CallScopedEval(Rc<CallScopedEval>),
    HostCallable(String, HostFn),
    /// A first-class, mutable, growable sequence (the result of applying an
    /// unrecognized head, and the collection `push!`/`append!` mutate).
    List(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Every `Expr` leaf maps onto exactly one `Value` variant that carries
    /// no further computation, used by the evaluator's literal-atom arm.
    pub fn quoted(expr: Rc<Expr>) -> Self {
        Value::QuoteVal(expr)
    }

    /// Truthiness per the language's `And`/`OrOp`/`If` rules: everything is
    /// truthy except the literal boolean `false`.
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::QuoteVal(_) => "quoted expression",
            Value::Nil => "nil",
            Value::Function(_) => "function",
            Value::FExpr(_) => "fexpr",
            Value::Macro(_) => "macro",
            Value::CallScopedEval(_) => "function",
            Value::HostCallable(..) => "primitive",
            Value::List(_) => "list",
        }
    }

    /// The bound name of a callable, if any, used by the trace registry
    /// and by `register_traceable`.
    pub fn callable_name(&self) -> Option<&str> {
        match self {
            Value::Function(c) | Value::FExpr(c) | Value::Macro(c) => c.name.as_deref(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::QuoteVal(a), Value::QuoteVal(b)) => a == b,
            (Value::List(a), Value::List(b)) => *a.borrow() == *b.borrow(),
            // Callables and primitives are only equal to themselves; since
            // we have no stable identity comparison for trait objects, and
            // the language has no pointer-equality primitive, treat them as
            // never equal.
            _ => false,
        }
    }
}
