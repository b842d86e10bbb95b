//! Quasiquote expansion, interpolation, and gensym-based hygiene for
//! `Macro` bodies.

use std::collections::HashSet;
use std::rc::Rc;

use crate::ast::{Expr, Tag};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use crate::value::Value;

#[cfg(test)]
mod tests;

/// Read the interpolation node's last argument as a symbol and return
/// whatever it is bound to, unevaluated. The binding stage (parameter
/// binding or gensym rewriting) already arranged for that symbol to name an
/// unevaluated expression.
pub(super) fn interpolate(expr: &Expr, env: &Env) -> Result<Value> {
    let sym = expr
        .args()
        .last()
        .and_then(Expr::as_sym)
        .ok_or_else(|| Error::MalformedAst {
            head: "$".to_string(),
            detail: "interpolation requires a trailing symbol",
        })?;

    env.lookup(sym)
        .ok_or_else(|| Error::UnboundSymbol { sym: sym.to_string() })
}

/// Structurally copy `expr`, expanding `Interpolate` nodes against `env` as
/// it goes. Every other atom or composite is returned unchanged except for
/// its expanded children.
pub(super) fn expand(expr: &Expr, env: &Env) -> Result<Expr> {
    match expr {
        Expr::Node {
            head: Tag::Interpolate,
            ..
        } => match interpolate(expr, env)? {
            Value::QuoteVal(inner) => Ok((*inner).clone()),
            other => Ok(Expr::quoted(other)),
        },
        Expr::Node { head, args } => {
            let expanded_args = args.iter().map(|a| expand(a, env)).collect::<Result<Vec<_>>>()?;
            Ok(Expr::node(head.clone(), expanded_args))
        }
        atom => Ok(atom.clone()),
    }
}

/// Collect every symbol referenced anywhere in `expr` (conservative: not
/// just assignment targets).
fn collect_symbols(expr: &Expr, out: &mut HashSet<String>) {
    match expr {
        Expr::Sym(s) => {
            out.insert(s.clone());
        }
        Expr::Node { args, .. } => {
            for a in args {
                collect_symbols(a, out);
            }
        }
        _ => {}
    }
}

/// Rebind every symbol in `body` that isn't already bound somewhere in
/// `env` to a freshly generated, globally unique replacement, so a macro's
/// internally-introduced names can never collide with a name the call site
/// happens to also be using.
pub(super) fn gensym_pass(body: &Expr, env: &Env, interp: &Interpreter) {
    let mut symbols = HashSet::new();
    collect_symbols(body, &mut symbols);

    for sym in symbols {
        if env.lookup(&sym).is_some() {
            continue;
        }

        let fresh = interp.gensym(&sym);
        env.define(&sym, Value::QuoteVal(Rc::new(Expr::sym(fresh))));
    }
}
