#![cfg(test)]

use super::parse;
use crate::ast::{Expr, Tag};

fn toplevel(stmts: Vec<Expr>) -> Expr {
    Expr::node(Tag::Toplevel, stmts)
}

fn call(args: Vec<Expr>) -> Expr {
    Expr::call(args)
}

#[test]
fn atoms() {
    assert_eq!(parse("42").unwrap(), toplevel(vec![Expr::Num(42.0)]));
    assert_eq!(parse("3.5").unwrap(), toplevel(vec![Expr::Num(3.5)]));
    assert_eq!(
        parse(r#""hi there""#).unwrap(),
        toplevel(vec![Expr::str("hi there")])
    );
    assert_eq!(parse("nil").unwrap(), toplevel(vec![Expr::Nil]));
    assert_eq!(parse("x").unwrap(), toplevel(vec![Expr::sym("x")]));
}

#[test]
fn string_escapes() {
    assert_eq!(
        parse(r#""a\nb""#).unwrap(),
        toplevel(vec![Expr::str("a\nb")])
    );
}

#[test]
fn arithmetic_precedence() {
    // 1 + 2 * 3 groups as 1 + (2 * 3), not (1 + 2) * 3.
    let expected = call(vec![
        Expr::sym("+"),
        Expr::Num(1.0),
        call(vec![Expr::sym("*"), Expr::Num(2.0), Expr::Num(3.0)]),
    ]);
    assert_eq!(parse("1 + 2 * 3").unwrap(), toplevel(vec![expected]));
}

#[test]
fn comparison_and_unary() {
    let expected = call(vec![
        Expr::sym(">"),
        Expr::sym("n"),
        call(vec![Expr::sym("-"), Expr::Num(0.0), Expr::Num(1.0)]),
    ]);
    assert_eq!(parse("n > -1").unwrap(), toplevel(vec![expected]));

    let expected_bang = call(vec![Expr::sym("!"), Expr::sym("ok")]);
    assert_eq!(parse("!ok").unwrap(), toplevel(vec![expected_bang]));
}

#[test]
fn call_suffix_chains() {
    // curried-looking call: f(1)(2)
    let expected = call(vec![call(vec![Expr::sym("f"), Expr::Num(1.0)]), Expr::Num(2.0)]);
    assert_eq!(parse("f(1)(2)").unwrap(), toplevel(vec![expected]));
}

#[test]
fn assignment_and_function_sugar() {
    assert_eq!(
        parse("x = 1").unwrap(),
        toplevel(vec![Expr::node(Tag::Assign, vec![Expr::sym("x"), Expr::Num(1.0)])])
    );

    assert_eq!(
        parse("square(x) = x * x").unwrap(),
        toplevel(vec![Expr::node(
            Tag::Assign,
            vec![
                call(vec![Expr::sym("square"), Expr::sym("x")]),
                call(vec![Expr::sym("*"), Expr::sym("x"), Expr::sym("x")]),
            ]
        )])
    );
}

#[test]
fn fexpr_and_macro_def_tags() {
    assert_eq!(
        parse("identity(x) := x").unwrap(),
        toplevel(vec![Expr::node(
            Tag::FExprDef,
            vec![call(vec![Expr::sym("identity"), Expr::sym("x")]), Expr::sym("x")]
        )])
    );

    assert_eq!(
        parse("m(x) $= :($x)").unwrap(),
        toplevel(vec![Expr::node(
            Tag::MacroDef,
            vec![
                call(vec![Expr::sym("m"), Expr::sym("x")]),
                Expr::node(
                    Tag::Quote,
                    vec![Expr::node(Tag::Interpolate, vec![Expr::sym("x")])]
                ),
            ]
        )])
    );
}

#[test]
fn lambda_with_block_body() {
    let parsed = parse("() -> { x = x + 1 }").unwrap();
    let expected = toplevel(vec![Expr::node(
        Tag::Lambda,
        vec![
            call(vec![]),
            Expr::node(
                Tag::Block,
                vec![Expr::node(
                    Tag::Assign,
                    vec![
                        Expr::sym("x"),
                        call(vec![Expr::sym("+"), Expr::sym("x"), Expr::Num(1.0)]),
                    ],
                )],
            ),
        ],
    )]);
    assert_eq!(parsed, expected);
}

#[test]
fn let_and_if_else_chains() {
    let parsed = parse("let { a = 1 } { if (a > 0) { a } elseif (a < 0) { 0 } else { -1 } }").unwrap();
    match &parsed {
        Expr::Node { head: Tag::Toplevel, args } => match &args[0] {
            Expr::Node { head: Tag::Let, args } => {
                assert_eq!(args.len(), 2);
                match &args[1] {
                    Expr::Node { head: Tag::Block, args } => match &args[0] {
                        Expr::Node { head: Tag::If, args } => {
                            assert_eq!(args.len(), 3);
                            assert!(matches!(args[2], Expr::Node { head: Tag::Elseif, .. }));
                        }
                        other => panic!("expected If, got {:?}", other),
                    },
                    other => panic!("expected a block body, got {:?}", other),
                }
            }
            other => panic!("expected Let, got {:?}", other),
        },
        other => panic!("expected Toplevel, got {:?}", other),
    }
}

#[test]
fn global_block() {
    let parsed = parse("global { x = 1 }").unwrap();
    assert_eq!(
        parsed,
        toplevel(vec![Expr::node(
            Tag::Global,
            vec![Expr::node(Tag::Assign, vec![Expr::sym("x"), Expr::Num(1.0)])]
        )])
    );
}

#[test]
fn and_or_short_circuit_shape() {
    let parsed = parse("a and b or c").unwrap();
    // `and` binds tighter than `or`: (a and b) or c
    match parsed {
        Expr::Node { head: Tag::Toplevel, args } => match &args[0] {
            Expr::Node { head: Tag::Or, args } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(args[0], Expr::Node { head: Tag::And, .. }));
            }
            other => panic!("expected Or at the top, got {:?}", other),
        },
        other => panic!("expected Toplevel, got {:?}", other),
    }
}

#[test]
fn list_literal_is_unrecognized_head() {
    let parsed = parse("[1, 2, 3]").unwrap();
    assert_eq!(
        parsed,
        toplevel(vec![Expr::node(
            Tag::Other("list".to_string()),
            vec![Expr::Num(1.0), Expr::Num(2.0), Expr::Num(3.0)]
        )])
    );
}

#[test]
fn quasiquote_block_and_paren_forms() {
    let parsed = parse("quote { a a }").unwrap();
    assert_eq!(
        parsed,
        toplevel(vec![Expr::node(
            Tag::Quote,
            vec![Expr::sym("a"), Expr::sym("a")]
        )])
    );

    let parsed_paren = parse(":(a)").unwrap();
    assert_eq!(
        parsed_paren,
        toplevel(vec![Expr::node(Tag::Quote, vec![Expr::sym("a")])])
    );
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    assert!(parse(r#""unterminated"#).is_err());
}

#[test]
fn unexpected_token_is_a_syntax_error() {
    assert!(parse("@").is_err());
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        parse("1 ; this is a comment\n+ 2").unwrap(),
        toplevel(vec![call(vec![Expr::sym("+"), Expr::Num(1.0), Expr::Num(2.0)])])
    );
}
