//! Testing utilities for code that validates with sluice
//!
//! Assertion macros for vals and aggregators, and (behind the `proptest`
//! feature) strategies that generate arbitrary [`Input`](crate::Input)
//! values.
//!
//! # Examples
//!
//! ```rust
//! use sluice::{assert_val_errors, assert_val_failure, assert_val_success, BoolVal, IntVal};
//!
//! assert_val_success!(IntVal::new(3));
//! assert_val_failure!(BoolVal::new(3));
//! assert_val_errors!(BoolVal::new(3), ["expected a bool, got int"]);
//! ```

/// Assert that a val passes.
///
/// Panics with the val's messages if it fails.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_val_success, StringVal};
///
/// assert_val_success!(StringVal::new("ok"));
/// ```
#[macro_export]
macro_rules! assert_val_success {
    ($val:expr) => {{
        let val = &$val;
        if !$crate::Val::success(val) {
            panic!(
                "Expected Success, got Failure: {:?}",
                $crate::Val::pull_error_messages(val)
            );
        }
    }};
}

/// Assert that a val fails.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_val_failure, FloatVal};
///
/// assert_val_failure!(FloatVal::new("1.5"));
/// ```
#[macro_export]
macro_rules! assert_val_failure {
    ($val:expr) => {{
        let val = &$val;
        if $crate::Val::success(val) {
            panic!("Expected Failure, got Success");
        }
    }};
}

/// Assert that a val fails with exactly the given messages, in order.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_val_errors, IterableIntVal, Input};
///
/// assert_val_errors!(
///     IterableIntVal::new(vec![Input::from(1), Input::from("2")]),
///     ["element 1 must be an int, got string"]
/// );
/// ```
#[macro_export]
macro_rules! assert_val_errors {
    ($val:expr, $expected:expr) => {{
        let val = &$val;
        if $crate::Val::success(val) {
            panic!("Expected Failure with errors {:?}, got Success", $expected);
        }
        let expected: ::std::vec::Vec<::std::string::String> = $expected
            .into_iter()
            .map(::std::string::ToString::to_string)
            .collect();
        assert_eq!($crate::Val::pull_error_messages(val), expected);
    }};
}

#[cfg(feature = "proptest")]
pub use strategies::{any_input, any_scalar};

#[cfg(feature = "proptest")]
mod strategies {
    use proptest::prelude::*;

    use crate::Input;

    /// Strategy for null, bools, ints, finite floats and short strings.
    pub fn any_scalar() -> BoxedStrategy<Input> {
        prop_oneof![
            Just(Input::Null),
            any::<bool>().prop_map(Input::Bool),
            any::<i64>().prop_map(Input::Int),
            (-1.0e6f64..1.0e6).prop_map(Input::Float),
            "[a-z0-9 ]{0,8}".prop_map(Input::Str),
        ]
        .boxed()
    }

    /// Strategy for scalars and lists/maps of them, up to two levels deep.
    pub fn any_input() -> BoxedStrategy<Input> {
        any_scalar()
            .prop_recursive(2, 16, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Input::List),
                    prop::collection::btree_map("[a-c]", inner, 0..3).prop_map(Input::Map),
                ]
            })
            .boxed()
    }

    impl Arbitrary for Input {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            any_input()
        }
    }
}
