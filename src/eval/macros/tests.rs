#![cfg(test)]

use super::*;
use crate::env::Env;
use crate::interpreter::Interpreter;

#[test]
fn gensym_pass_skips_already_bound_parameters() {
    let interp = Interpreter::new();
    let frame = Env::global().extend();
    frame.define("body", Value::Nil);

    let template = Expr::node(Tag::Block, vec![Expr::sym("body"), Expr::sym("helper")]);
    gensym_pass(&template, &frame, &interp);

    // "body" was already bound (a real macro parameter) and is left alone.
    assert_eq!(frame.lookup("body"), Some(Value::Nil));

    // "helper" was free, so it gets a fresh, disambiguated binding.
    match frame.lookup("helper") {
        Some(Value::QuoteVal(e)) => assert!(e.as_sym().unwrap().starts_with("##helper#")),
        other => panic!("expected a gensym binding, got {:?}", other),
    }
}

#[test]
fn gensym_pass_is_stable_within_one_expansion() {
    let interp = Interpreter::new();
    let frame = Env::global().extend();

    // the same free symbol referenced twice in one template must resolve to
    // the same fresh name everywhere in that expansion.
    let template = Expr::node(Tag::Block, vec![Expr::sym("helper"), Expr::sym("helper")]);
    gensym_pass(&template, &frame, &interp);
    assert_eq!(frame.own_len(), 1);
}

#[test]
fn expand_only_rewrites_interpolate_nodes() {
    let frame = Env::global().extend();
    frame.define("x", Value::QuoteVal(Rc::new(Expr::Num(42.0))));

    // `$x` is rewritten; a bare `x` beside it is left exactly as written.
    let template = Expr::node(
        Tag::Block,
        vec![
            Expr::node(Tag::Interpolate, vec![Expr::sym("x")]),
            Expr::sym("x"),
        ],
    );
    let expanded = expand(&template, &frame).unwrap();
    assert_eq!(
        expanded,
        Expr::node(Tag::Block, vec![Expr::Num(42.0), Expr::sym("x")])
    );
}

#[test]
fn expand_splices_a_quoted_ast_fragment_verbatim() {
    let frame = Env::global().extend();
    let raw = Expr::call(vec![Expr::sym("+"), Expr::Num(1.0), Expr::Num(2.0)]);
    frame.define("body", Value::QuoteVal(Rc::new(raw.clone())));

    let template = Expr::node(Tag::Interpolate, vec![Expr::sym("body")]);
    assert_eq!(expand(&template, &frame).unwrap(), raw);
}

#[test]
fn interpolate_requires_a_trailing_symbol() {
    let frame = Env::global();
    let malformed = Expr::node(Tag::Interpolate, vec![]);
    assert!(interpolate(&malformed, &frame).is_err());
}

#[test]
fn interpolate_reports_an_unbound_name() {
    let frame = Env::global();
    let unbound = Expr::node(Tag::Interpolate, vec![Expr::sym("nope")]);
    assert!(matches!(
        interpolate(&unbound, &frame),
        Err(Error::UnboundSymbol { .. })
    ));
}
