//! The evaluator: dispatch on an `Expr`'s shape, recursing into the
//! environment and interpreter state threaded through every call.

use std::rc::Rc;

use log::trace;

use crate::ast::{Expr, Tag};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use crate::value::Value;

mod call;
mod macros;

pub use call::call;

/// Evaluate `expr` against `env`, threading `interp`'s shared trace/gensym/
/// output state through any nested calls.
pub fn eval(expr: &Expr, env: Env, interp: &Interpreter) -> Result<Value> {
    match expr {
        Expr::Num(n) => Ok(Value::Num(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::QuoteVal(v) => Ok((**v).clone()),
        Expr::Nil => Ok(Value::Nil),
        Expr::LineMarker => Ok(Value::Nil),

        Expr::Sym(s) => env
            .lookup(s)
            .or_else(|| crate::primitives::lookup(s))
            .ok_or_else(|| Error::UnboundSymbol { sym: s.clone() }),

        Expr::Node { head: Tag::Block, args } | Expr::Node { head: Tag::Toplevel, args } => {
            eval_sequence(args, env, interp)
        }

        Expr::Node { head: Tag::If, args } | Expr::Node { head: Tag::Elseif, args } => {
            eval_if(args, env, interp)
        }

        Expr::Node { head: Tag::And, args } => eval_and(args, env, interp),
        Expr::Node { head: Tag::Or, args } => eval_or(args, env, interp),

        Expr::Node { head: Tag::Let, args } => eval_let(args, env, interp),

        Expr::Node { head: Tag::Assign, args } => {
            let storing_env = env.clone();
            do_assign(args, env, storing_env, interp)
        }

        Expr::Node { head: Tag::FExprDef, args } => {
            let storing_env = env.clone();
            call::define_callable(args, env, storing_env, interp, Value::FExpr)
        }

        Expr::Node { head: Tag::MacroDef, args } => {
            let storing_env = env.clone();
            call::define_callable(args, env, storing_env, interp, Value::Macro)
        }

        Expr::Node { head: Tag::Global, args } => eval_global(args, env, interp),

        Expr::Node { head: Tag::Lambda, args } => call::define_lambda(args, env),

        Expr::Node { head: Tag::Quote, args } => {
            // Deliberately evaluates its contents rather than returning
            // them verbatim; kept this way for compatibility with programs
            // that rely on a quote block's last statement being its value.
            eval_sequence(args, env, interp)
        }

        Expr::Node { head: Tag::Interpolate, .. } => macros::interpolate(expr, &env),

        Expr::Node { head: Tag::Call, args } => call::call(args, env, interp),

        Expr::Node { head: Tag::Other(_), args } => {
            let items = args
                .iter()
                .map(|a| eval(a, env.clone(), interp))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::list(items))
        }
    }
}

fn eval_sequence(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let mut result = Value::Nil;
    for a in args {
        result = eval(a, env.clone(), interp)?;
    }
    Ok(result)
}

fn eval_if(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let cond = args
        .first()
        .ok_or_else(|| Error::MalformedAst {
            head: "if".to_string(),
            detail: "missing condition",
        })?;

    let cond_v = eval(cond, env.clone(), interp)?;

    if !cond_v.is_false() {
        let if_true = args.get(1).ok_or_else(|| Error::MalformedAst {
            head: "if".to_string(),
            detail: "missing consequent",
        })?;
        eval(if_true, env, interp)
    } else if let Some(if_false) = args.get(2) {
        eval(if_false, env, interp)
    } else {
        Ok(Value::Bool(false))
    }
}

fn eval_and(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let mut state = Value::Bool(true);
    for a in args {
        state = eval(a, env.clone(), interp)?;
        if state.is_false() {
            break;
        }
    }
    Ok(state)
}

fn eval_or(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    for a in args {
        let v = eval(a, env.clone(), interp)?;
        if !v.is_false() {
            return Ok(v);
        }
    }
    Ok(Value::Bool(false))
}

fn eval_let(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let bindings = args.first().ok_or_else(|| Error::MalformedAst {
        head: "let".to_string(),
        detail: "missing binding block",
    })?;
    let body = args.get(1).ok_or_else(|| Error::MalformedAst {
        head: "let".to_string(),
        detail: "missing body",
    })?;

    trace!("Entering a let frame.");
    let new_env = env.extend();
    eval(bindings, new_env.clone(), interp)?;
    eval(body, new_env, interp)
}

/// `lhs = rhs` or, when `lhs` is a `Call(name, params...)` signature, sugar
/// for defining an eager function named `name`.
fn do_assign(args: &[Expr], env: Env, storing_env: Env, interp: &Interpreter) -> Result<Value> {
    let lhs = args.first().ok_or_else(|| Error::MalformedAst {
        head: "=".to_string(),
        detail: "missing left-hand side",
    })?;
    let rhs = args.get(1).ok_or_else(|| Error::MalformedAst {
        head: "=".to_string(),
        detail: "missing right-hand side",
    })?;

    if let Some(sym) = lhs.as_sym() {
        let val = eval(rhs, env, interp)?;
        storing_env.assign(sym, val.clone());
        return Ok(val);
    }

    if lhs.head() == Some(&Tag::Call) {
        let (name, params) = lhs.as_signature(true)?;
        let name = name.ok_or_else(|| Error::MalformedAst {
            head: "=".to_string(),
            detail: "function definition requires a name",
        })?;
        let callable = Rc::new(crate::value::Callable {
            name: Some(name.clone()),
            params,
            body: Rc::new(rhs.clone()),
            scope: env.extend(),
        });
        let val = Value::Function(callable);
        storing_env.assign(&name, val.clone());
        return Ok(val);
    }

    Err(Error::Type {
        expected: "symbol or call signature",
        given: "other expression".to_string(),
    })
}

/// `global { a = 1 f(x) := x }`, routes each sub-assignment to bind in the
/// global frame regardless of the evaluating env.
fn eval_global(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let global = env.global_ancestor();
    let mut result = Value::Nil;

    for sub in args {
        result = match sub.head() {
            Some(Tag::Assign) => do_assign(sub.args(), env.clone(), global.clone(), interp)?,
            Some(Tag::FExprDef) => call::define_callable(
                sub.args(),
                env.clone(),
                global.clone(),
                interp,
                Value::FExpr,
            )?,
            _ => {
                return Err(Error::InvalidGlobal {
                    exp: sub.to_string(),
                })
            }
        };
    }

    Ok(result)
}
