//! `chive` is a tree-walking interpreter for a small homoiconic expression
//! language: arithmetic, conditionals, lexical closures, first-class eager
//! functions, lazily-evaluated fexprs, and hygienic macros with
//! quasiquotation.
//!
//! # Example
//!
//! ```
//! use chive::prelude::*;
//!
//! let interp = Interpreter::new();
//! let result = interp.run("1 + 2 * 3").unwrap();
//! assert_eq!(result, Value::Num(7.0));
//! ```
//!
//! Closures capture their defining environment the way any lexically scoped
//! language's do:
//!
//! ```
//! use chive::prelude::*;
//!
//! let interp = Interpreter::new();
//! interp.run("make_adder(n) = (x) -> x + n").unwrap();
//! let forty_two = interp.run("add5 = make_adder(5) add5(37)").unwrap();
//! assert_eq!(forty_two, Value::Num(42.0));
//! ```

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod parse;
pub mod primitives;
pub mod value;

pub use error::{Error, Result};
pub use interpreter::Interpreter;
pub use value::Value;

/// The handful of names most programs embedding `chive` will want in scope.
pub mod prelude {
    pub use crate::ast::Expr;
    pub use crate::env::Env;
    pub use crate::error::{Error, Result};
    pub use crate::interpreter::Interpreter;
    pub use crate::value::Value;
}
