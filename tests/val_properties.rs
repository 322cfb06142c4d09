//! Property-based tests for val and aggregator invariants

use proptest::prelude::*;
use sluice::{Aggregator, Input, IntVal, IterableStringVal, TypedVal, Val};

fn scalar() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Null),
        any::<bool>().prop_map(Input::Bool),
        any::<i64>().prop_map(Input::Int),
        (-1.0e3f64..1.0e3).prop_map(Input::Float),
        "[a-z]{0,4}".prop_map(Input::Str),
    ]
}

#[derive(Debug, Clone, Copy)]
enum Check {
    Bool,
    Int,
    Float,
    Str,
    IterableInt,
}

fn check() -> impl Strategy<Value = Check> {
    prop_oneof![
        Just(Check::Bool),
        Just(Check::Int),
        Just(Check::Float),
        Just(Check::Str),
        Just(Check::IterableInt),
    ]
}

fn register(checks: &mut Aggregator, check: Check, input: Input) -> bool {
    match check {
        Check::Bool => checks.bool_val(input).success(),
        Check::Int => checks.int_val(input).success(),
        Check::Float => checks.float_val(input).success(),
        Check::Str => checks.string_val(input).success(),
        Check::IterableInt => checks.iterable_int_val(input).success(),
    }
}

proptest! {
    #[test]
    fn prop_success_is_idempotent(input in scalar()) {
        let val = IntVal::new(input);
        let first = val.success();
        let messages = val.pull_error_messages();

        prop_assert_eq!(val.success(), first);
        prop_assert_eq!(val.pull_error_messages(), messages.clone());
        prop_assert!(messages.len() <= 1);
    }

    #[test]
    fn prop_aggregate_is_logical_and(
        batch in prop::collection::vec((check(), scalar()), 0..12)
    ) {
        let mut checks = Aggregator::new();
        let mut expected = true;
        for (check, input) in batch {
            expected &= register(&mut checks, check, input);
        }
        prop_assert_eq!(checks.success(), expected);
    }

    #[test]
    fn prop_result_independent_of_order(
        batch in prop::collection::vec((check(), scalar()), 0..12)
    ) {
        let mut forward = Aggregator::new();
        for (check, input) in batch.iter().cloned() {
            register(&mut forward, check, input);
        }

        let mut backward = Aggregator::new();
        for (check, input) in batch.into_iter().rev() {
            register(&mut backward, check, input);
        }

        prop_assert_eq!(forward.success(), backward.success());

        let mut a = forward.error_messages().into_vec();
        let mut b = backward.error_messages().into_vec();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_messages_are_unique_and_stable(
        batch in prop::collection::vec((check(), scalar()), 0..12)
    ) {
        let mut checks = Aggregator::new();
        for (check, input) in batch {
            register(&mut checks, check, input);
        }

        checks.success();
        let first = checks.error_messages().into_vec();
        checks.success();
        let second = checks.error_messages().into_vec();

        let mut deduped = first.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), first.len());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_fresh_aggregator_always_succeeds(
        batch in prop::collection::vec((check(), scalar()), 0..8)
    ) {
        let mut checks = Aggregator::new();
        for (check, input) in batch {
            register(&mut checks, check, input);
        }
        checks.success();

        let fresh = checks.fresh();
        prop_assert!(fresh.success());
        prop_assert!(fresh.error_messages().is_empty());
    }

    #[test]
    fn prop_value_is_input_or_default(input in scalar(), default in any::<i64>()) {
        let val = IntVal::with_default(input.clone(), default);
        match input {
            Input::Int(i) => prop_assert_eq!(val.value(), Some(i)),
            _ => prop_assert_eq!(val.value(), Some(default)),
        }
    }

    #[test]
    fn prop_scalar_lists_are_string_iterables(
        items in prop::collection::vec(scalar().prop_filter("non-null", |i| !i.is_null()), 0..8)
    ) {
        let val = IterableStringVal::new(items.clone());
        prop_assert!(val.success());
        prop_assert_eq!(val.value(), Some(items));
    }
}
