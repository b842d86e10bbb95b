//! The primitive bridge: host-provided operators consulted when a symbol is
//! unbound anywhere in the environment chain. Unlike user bindings, these
//! live outside any `Env` frame; `crate::eval::eval`'s `Sym` arm falls
//! through to [`lookup`] only after the whole frame chain comes up empty.

use crate::error::{Error, Result};
use crate::value::Value;

use utils::{ctx_host, pure_binary, pure_host, pure_unary};

#[cfg(test)]
mod tests;

/// Resolve a primitive by name, or `None` if `name` isn't one of the fixed
/// set this bridge recognizes.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "+" => Some(pure_host("+", plus)),
        "-" => Some(pure_host("-", minus)),
        "*" => Some(pure_host("*", times)),
        "/" => Some(pure_host("/", divide)),
        "==" => Some(pure_binary("==", |a, b| Ok(Value::Bool(a == b)))),
        "!=" => Some(pure_binary("!=", |a, b| Ok(Value::Bool(a != b)))),
        "<" => Some(pure_binary("<", |a, b| numeric_cmp(a, b, |x, y| x < y))),
        ">" => Some(pure_binary(">", |a, b| numeric_cmp(a, b, |x, y| x > y))),
        "<=" => Some(pure_binary("<=", |a, b| numeric_cmp(a, b, |x, y| x <= y))),
        ">=" => Some(pure_binary(">=", |a, b| numeric_cmp(a, b, |x, y| x >= y))),
        "!" => Some(pure_unary("!", |a| Ok(Value::Bool(a.is_false())))),
        "push!" => Some(pure_binary("push!", push)),
        "append!" => Some(pure_binary("append!", append)),
        "println" => Some(ctx_host("println", println_)),
        "register_traceable" => Some(ctx_host("register_traceable", register_traceable)),
        _ => None,
    }
}

fn as_num(v: &Value) -> Result<f64> {
    match v {
        Value::Num(n) => Ok(*n),
        other => Err(Error::Type {
            expected: "number",
            given: other.type_of().to_string(),
        }),
    }
}

fn numeric_cmp(a: &Value, b: &Value, f: impl Fn(f64, f64) -> bool) -> Result<Value> {
    Ok(Value::Bool(f(as_num(a)?, as_num(b)?)))
}

/// Variadic: sums numbers, or concatenates string representations if the
/// first argument is a string.
fn plus(args: &[Value]) -> Result<Value> {
    match args.first() {
        None => Ok(Value::Num(0.0)),
        Some(Value::Str(_)) => {
            let mut out = String::new();
            for a in args {
                match a {
                    Value::Str(s) => out.push_str(s),
                    other => out.push_str(&other.to_string()),
                }
            }
            Ok(Value::Str(out))
        }
        Some(_) => {
            let mut acc = 0.0;
            for a in args {
                acc += as_num(a)?;
            }
            Ok(Value::Num(acc))
        }
    }
}

/// Variadic, reserving the first argument as the initial accumulator.
fn minus(args: &[Value]) -> Result<Value> {
    let mut it = args.iter();
    let first = as_num(it.next().ok_or(Error::Arity {
        expected: 1,
        given: 0,
    })?)?;
    let mut acc = first;
    for v in it {
        acc -= as_num(v)?;
    }
    Ok(Value::Num(acc))
}

fn times(args: &[Value]) -> Result<Value> {
    let mut acc = 1.0;
    for v in args {
        acc *= as_num(v)?;
    }
    Ok(Value::Num(acc))
}

fn divide(args: &[Value]) -> Result<Value> {
    let mut it = args.iter();
    let first = as_num(it.next().ok_or(Error::Arity {
        expected: 1,
        given: 0,
    })?)?;
    let mut acc = first;
    for v in it {
        acc /= as_num(v)?;
    }
    Ok(Value::Num(acc))
}

/// `push!(list, value)` mutates the shared backing vector in place, so
/// every other clone of the same `Value::List` observes the new element
/// with no rebind needed, since the vector lives behind an `Rc<RefCell<_>>`.
fn push(list: &Value, value: &Value) -> Result<Value> {
    match list {
        Value::List(items) => {
            items.borrow_mut().push(value.clone());
            Ok(list.clone())
        }
        other => Err(Error::Type {
            expected: "list",
            given: other.type_of().to_string(),
        }),
    }
}

fn append(list: &Value, other_list: &Value) -> Result<Value> {
    match (list, other_list) {
        (Value::List(items), Value::List(other)) => {
            items.borrow_mut().extend(other.borrow().iter().cloned());
            Ok(list.clone())
        }
        (Value::List(_), other) => Err(Error::Type {
            expected: "list",
            given: other.type_of().to_string(),
        }),
        (other, _) => Err(Error::Type {
            expected: "list",
            given: other.type_of().to_string(),
        }),
    }
}

fn println_(args: &[Value], interp: &crate::interpreter::Interpreter) -> Result<Value> {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    interp.write_out(&line);
    interp.write_out("\n");
    Ok(Value::Nil)
}

fn register_traceable(args: &[Value], interp: &crate::interpreter::Interpreter) -> Result<Value> {
    let callable = args.first().ok_or(Error::Arity {
        expected: 1,
        given: 0,
    })?;

    let name = callable.callable_name().ok_or_else(|| Error::Type {
        expected: "named function, fexpr, or macro",
        given: callable.type_of().to_string(),
    })?;

    interp.register_traceable(name);
    Ok(callable.clone())
}

mod utils {
    use std::rc::Rc;

    use crate::error::Result;
    use crate::interpreter::Interpreter;
    use crate::value::{HostFn, Value};

    pub fn pure_host(name: &str, f: impl Fn(&[Value]) -> Result<Value> + 'static) -> Value {
        Value::HostCallable(name.to_string(), HostFn::Pure(Rc::new(f)))
    }

    pub fn ctx_host(
        name: &str,
        f: impl Fn(&[Value], &Interpreter) -> Result<Value> + 'static,
    ) -> Value {
        Value::HostCallable(name.to_string(), HostFn::Ctx(Rc::new(f)))
    }

    pub fn pure_unary(name: &str, f: impl Fn(&Value) -> Result<Value> + 'static) -> Value {
        pure_host(name, move |args| {
            let a = args.first().ok_or(crate::error::Error::Arity {
                expected: 1,
                given: 0,
            })?;
            f(a)
        })
    }

    pub fn pure_binary(name: &str, f: impl Fn(&Value, &Value) -> Result<Value> + 'static) -> Value {
        pure_host(name, move |args| {
            if args.len() != 2 {
                return Err(crate::error::Error::Arity {
                    expected: 2,
                    given: args.len(),
                });
            }
            f(&args[0], &args[1])
        })
    }
}
