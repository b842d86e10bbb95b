#![cfg(test)]

use super::*;
use crate::interpreter::Interpreter;

#[test]
fn format_tuple_matches_the_traced_output_shapes() {
    assert_eq!(format_tuple(&[]), "()");
    assert_eq!(format_tuple(&[Expr::Num(1.0)]), "(1,)");
    assert_eq!(format_tuple(&[Expr::Num(1.0), Expr::Num(2.0)]), "(1, 2)");
}

#[test]
fn check_arity_allows_missing_but_rejects_extra_arguments() {
    assert!(check_arity(2, 1).is_ok());
    assert!(check_arity(2, 2).is_ok());
    assert!(matches!(
        check_arity(2, 3),
        Err(Error::Arity { expected: 2, given: 3 })
    ));
}

// Each call gets its own frame so a recursive call doesn't stomp on its own
// parameter binding across invocations.
#[test]
fn recursive_calls_get_independent_frames() {
    let interp = Interpreter::new();
    interp
        .run("countdown(n) = if (n <= 0) { 0 } else { countdown(n - 1) }")
        .unwrap();
    assert_eq!(interp.run("countdown(5)").unwrap(), Value::Num(0.0));
}

#[test]
fn missing_arguments_default_to_nil() {
    let interp = Interpreter::new();
    interp.run("f(x) = x").unwrap();
    assert_eq!(interp.run("f()").unwrap(), Value::Nil);
}

#[test]
fn calling_a_non_callable_value_is_an_error() {
    let interp = Interpreter::new();
    interp.run("x = 1").unwrap();
    assert!(interp.run("x(1)").is_err());
}
