//! The call protocol: resolving a callee, choosing eager/fexpr/macro
//! binding, per-call frame allocation, and the tracing wrapper.

use std::rc::Rc;

use log::trace;

use crate::ast::Expr;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use crate::value::{Callable, CallScopedEval, HostFn, Value};

use super::{eval, macros};

#[cfg(test)]
mod tests;

/// `Call(callee_expr, arg0, ..., argN-1)`.
pub fn call(args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    let callee_expr = args.first().ok_or_else(|| Error::MalformedAst {
        head: "call".to_string(),
        detail: "missing callee",
    })?;
    let raw_args = &args[1..];

    let callee = eval(callee_expr, env.clone(), interp)?;

    if let Value::CallScopedEval(c) = &callee {
        let arg0 = raw_args.first().ok_or(Error::Arity {
            expected: 1,
            given: 0,
        })?;
        return call_scoped_eval(c, arg0, interp);
    }

    if let Value::HostCallable(_, hostfn) = &callee {
        let evaluated = raw_args
            .iter()
            .map(|a| eval(a, env.clone(), interp))
            .collect::<Result<Vec<_>>>()?;
        return match hostfn {
            HostFn::Pure(f) => f(&evaluated),
            HostFn::Ctx(f) => f(&evaluated, interp),
        };
    }

    let traced_name = callee_expr
        .as_sym()
        .filter(|s| interp.is_traced(s))
        .map(str::to_string);

    match traced_name {
        Some(name) => call_traced(&name, &callee, raw_args, env, interp),
        None => invoke(&callee, raw_args, env, interp),
    }
}

/// The two-step resolve-then-evaluate rule for `eval` called from inside a
/// running fexpr body. See `crate::eval::macros` for the quasiquote side of
/// this same distinction.
fn call_scoped_eval(c: &CallScopedEval, arg0: &Expr, interp: &Interpreter) -> Result<Value> {
    if c.def_env.own_len() <= 1 {
        return eval(arg0, c.call_env.clone(), interp);
    }

    match eval(arg0, c.def_env.clone(), interp)? {
        Value::QuoteVal(inner) => eval(&inner, c.call_env.clone(), interp),
        other => Ok(other),
    }
}

fn invoke(callee: &Value, raw_args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    match callee {
        Value::Function(c) => invoke_function(c, raw_args, env, interp),
        Value::FExpr(c) => invoke_fexpr(c, raw_args, env, interp),
        Value::Macro(c) => invoke_macro(c, raw_args, env, interp),
        other => Err(Error::BadCallable {
            exp: other.to_string(),
        }),
    }
}

fn check_arity(expected: usize, given: usize) -> Result<()> {
    if given > expected {
        Err(Error::Arity { expected, given })
    } else {
        Ok(())
    }
}

/// Allocate a fresh child of `scope` for this invocation. Never binds
/// parameters directly into the callable's captured frame, so recursive
/// calls each get their own bindings instead of clobbering one shared frame.
fn invoke_function(c: &Rc<Callable>, raw_args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    check_arity(c.params.len(), raw_args.len())?;
    let frame = c.scope.extend();

    for (i, param) in c.params.iter().enumerate() {
        let val = match raw_args.get(i) {
            Some(a) => eval(a, env.clone(), interp)?,
            None => Value::Nil,
        };
        frame.assign(param, val);
    }

    eval(&c.body, frame, interp)
}

fn invoke_fexpr(c: &Rc<Callable>, raw_args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    check_arity(c.params.len(), raw_args.len())?;
    let frame = c.scope.extend();

    for (i, param) in c.params.iter().enumerate() {
        let val = match raw_args.get(i) {
            Some(a) => Value::QuoteVal(Rc::new(a.clone())),
            None => Value::Nil,
        };
        frame.assign(param, val);
    }

    frame.assign(
        "eval",
        Value::CallScopedEval(Rc::new(CallScopedEval {
            def_env: frame.clone(),
            call_env: env,
        })),
    );

    eval(&c.body, frame, interp)
}

fn invoke_macro(c: &Rc<Callable>, raw_args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    check_arity(c.params.len(), raw_args.len())?;
    let frame = c.scope.extend();

    for (i, param) in c.params.iter().enumerate() {
        let val = match raw_args.get(i) {
            Some(a) => Value::QuoteVal(Rc::new(a.clone())),
            None => Value::Nil,
        };
        frame.assign(param, val);
    }

    macros::gensym_pass(&c.body, &frame, interp);
    let expanded = macros::expand(&c.body, &frame)?;
    eval(&expanded, env, interp)
}

fn call_traced(name: &str, callee: &Value, raw_args: &[Expr], env: Env, interp: &Interpreter) -> Result<Value> {
    trace!("Entering traced call to {}.", name);
    interp.write_out(&format!(
        "Calling function: {} with arguments: {}\n",
        name,
        format_tuple(raw_args)
    ));

    let result = invoke(callee, raw_args, env, interp)?;

    interp.write_out(&format!("Function {} returned: {}\n", name, result));
    Ok(result)
}

fn format_tuple(items: &[Expr]) -> String {
    match items {
        [] => "()".to_string(),
        [one] => format!("({},)", one),
        many => {
            let joined = many
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", joined)
        }
    }
}

/// `FExprDef`/`MacroDef`/the global-scope variant of both: construct a
/// `Callable` of whatever shape `ctor` wraps and bind it by name in
/// `storing_env`.
pub fn define_callable(
    args: &[Expr],
    env: Env,
    storing_env: Env,
    _interp: &Interpreter,
    ctor: fn(Rc<Callable>) -> Value,
) -> Result<Value> {
    let signature = args.first().ok_or_else(|| Error::MalformedAst {
        head: ":=".to_string(),
        detail: "missing signature",
    })?;
    let body = args.get(1).ok_or_else(|| Error::MalformedAst {
        head: ":=".to_string(),
        detail: "missing body",
    })?;

    let (name, params) = signature.as_signature(true)?;
    let name = name.ok_or_else(|| Error::MalformedAst {
        head: ":=".to_string(),
        detail: "fexpr/macro definitions require a name",
    })?;

    trace!("Defining {} as a new callable.", name);
    let callable = Rc::new(Callable {
        name: Some(name.clone()),
        params,
        body: Rc::new(body.clone()),
        scope: env.extend(),
    });
    let val = ctor(callable);
    storing_env.assign(&name, val.clone());
    Ok(val)
}

/// An anonymous `Lambda(signature, body)`, always an eager `Function`.
pub fn define_lambda(args: &[Expr], env: Env) -> Result<Value> {
    let signature = args.first().ok_or_else(|| Error::MalformedAst {
        head: "->".to_string(),
        detail: "missing signature",
    })?;
    let body = args.get(1).ok_or_else(|| Error::MalformedAst {
        head: "->".to_string(),
        detail: "missing body",
    })?;

    let (_, params) = signature.as_signature(false)?;
    let callable = Rc::new(Callable {
        name: None,
        params,
        body: Rc::new(body.clone()),
        scope: env.extend(),
    });
    Ok(Value::Function(callable))
}
