#![cfg(test)]

use super::*;

#[test]
fn plus_sums_numbers_and_concatenates_strings() {
    assert_eq!(plus(&[Value::Num(1.0), Value::Num(2.0)]).unwrap(), Value::Num(3.0));
    assert_eq!(plus(&[]).unwrap(), Value::Num(0.0));
    assert_eq!(
        plus(&[Value::Str("a".to_string()), Value::Num(1.0)]).unwrap(),
        Value::Str("a1".to_string())
    );
}

#[test]
fn minus_and_divide_reserve_the_first_argument_as_the_accumulator() {
    assert_eq!(
        minus(&[Value::Num(10.0), Value::Num(3.0), Value::Num(2.0)]).unwrap(),
        Value::Num(5.0)
    );
    assert_eq!(
        divide(&[Value::Num(100.0), Value::Num(5.0), Value::Num(2.0)]).unwrap(),
        Value::Num(10.0)
    );
    assert!(minus(&[]).is_err());
    assert!(divide(&[]).is_err());
}

#[test]
fn times_folds_with_one_as_the_empty_product() {
    assert_eq!(times(&[]).unwrap(), Value::Num(1.0));
    assert_eq!(
        times(&[Value::Num(2.0), Value::Num(3.0), Value::Num(4.0)]).unwrap(),
        Value::Num(24.0)
    );
}

#[test]
fn comparisons_reject_non_numbers() {
    assert!(matches!(
        numeric_cmp(&Value::Str("x".to_string()), &Value::Num(1.0), |a, b| a < b),
        Err(Error::Type { expected: "number", .. })
    ));
}

#[test]
fn push_mutates_the_shared_list_in_place() {
    let list = Value::list(vec![Value::Num(1.0)]);
    let other_handle = list.clone();
    push(&list, &Value::Num(2.0)).unwrap();

    match other_handle {
        Value::List(items) => {
            assert_eq!(*items.borrow(), vec![Value::Num(1.0), Value::Num(2.0)]);
        }
        other => panic!("expected a list, got {:?}", other),
    }
}

#[test]
fn append_extends_with_another_list_s_elements() {
    let a = Value::list(vec![Value::Num(1.0)]);
    let b = Value::list(vec![Value::Num(2.0), Value::Num(3.0)]);
    append(&a, &b).unwrap();

    match a {
        Value::List(items) => {
            assert_eq!(
                *items.borrow(),
                vec![Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]
            );
        }
        other => panic!("expected a list, got {:?}", other),
    }
}

#[test]
fn push_rejects_a_non_list_target() {
    assert!(push(&Value::Num(1.0), &Value::Num(2.0)).is_err());
}

#[test]
fn lookup_resolves_every_documented_primitive_name() {
    let names = [
        "+", "-", "*", "/", "==", "!=", "<", ">", "<=", ">=", "!", "push!", "append!", "println",
        "register_traceable",
    ];
    for name in names {
        assert!(lookup(name).is_some(), "expected a primitive named {}", name);
    }
    assert!(lookup("not_a_primitive").is_none());
}
