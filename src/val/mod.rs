//! Vals: one input, one rule, evaluated lazily
//!
//! A val binds a raw [`Input`] to a single check. Nothing runs at
//! construction; the first call to [`Val::success`] (or
//! [`TypedVal::value`]) evaluates the rule, stores the verdict and the
//! messages it produced, and every later call reads the stored verdict.
//!
//! Every built-in variant is a [`Checked<R>`] with a different [`Rule`]; the
//! variant names are type aliases:
//!
//! | Alias | Passes when | `value()` on success |
//! |-------|-------------|----------------------|
//! | [`BoolVal`] | input is a bool | `bool` |
//! | [`IntVal`] | input is an int | `i64` |
//! | [`FloatVal`] | input is a float | `f64` |
//! | [`StringVal`] | input is a string | `String` |
//! | [`StringableVal`] | string, or object with a text rendering | the text |
//! | [`InstanceOfVal`] | object is / implements a type | the input |
//! | [`InListVal`] | input is one of the candidates | the input |
//! | [`IterableVal`] | input is a list or map | the elements |
//! | [`IterableIntVal`] | iterable of ints | `Vec<i64>` |
//! | [`IterableStringVal`] | iterable of string-coercible scalars | the elements, unchanged |
//! | [`IterableStringableVal`] | iterable of stringables | the texts |
//!
//! # Examples
//!
//! ```
//! use sluice::{IntVal, TypedVal, Val};
//!
//! let ok = IntVal::new(5);
//! assert!(ok.success());
//! assert_eq!(ok.value(), Some(5));
//!
//! let bad = IntVal::with_default("five", 0);
//! assert!(!bad.success());
//! assert_eq!(bad.value(), Some(0));
//! assert_eq!(bad.pull_error_messages(), vec!["expected an int, got string"]);
//! ```
//!
//! Custom checks only need to implement [`Val`]:
//!
//! ```
//! use sluice::Val;
//!
//! struct Even(i64);
//!
//! impl Val for Even {
//!     fn success(&self) -> bool {
//!         self.0 % 2 == 0
//!     }
//!
//!     fn pull_error_messages(&self) -> Vec<String> {
//!         if self.success() {
//!             vec![]
//!         } else {
//!             vec![format!("{} is odd", self.0)]
//!         }
//!     }
//! }
//!
//! assert!(!Even(3).success());
//! ```

mod evaluation;
mod in_list;
mod instance_of;
mod iterable;
mod rules;

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::configuration::ValKind;
use crate::{Input, Validation};

pub use evaluation::{EvalState, Evaluation, Verdict};
pub use in_list::InListRule;
pub use instance_of::InstanceOfRule;
pub use iterable::{
    AnyElement, ElementRule, IntElement, IterableRule, StringElement, StringableElement,
};
pub use rules::{BoolRule, FloatRule, IntRule, StringRule, StringableRule};

/// The contract every val satisfies.
///
/// Both methods take `&self`: evaluation is memoized internally, so a val
/// can be shared between its creator and an [`Aggregator`](crate::Aggregator).
pub trait Val {
    /// Run the check once and report whether it passed.
    ///
    /// Repeated calls return the stored result without re-running the
    /// check or adding messages.
    fn success(&self) -> bool;

    /// Messages for every failed condition, in detection order.
    ///
    /// Empty on success. The val keeps its own copy.
    fn pull_error_messages(&self) -> Vec<String>;
}

/// A val that yields a typed value.
pub trait TypedVal: Val {
    /// Type produced on success
    type Output;

    /// The (coerced) input on success, otherwise the default, if any.
    fn value(&self) -> Option<Self::Output>;

    /// Collapse this val into a [`Validation`].
    ///
    /// Failure carries the messages; the default is not used.
    fn into_validation(self) -> Validation<Self::Output, Vec<String>>
    where
        Self: Sized,
    {
        if self.success() {
            if let Some(value) = self.value() {
                return Validation::success(value);
            }
        }
        Validation::failure(self.pull_error_messages())
    }
}

impl<V: Val + ?Sized> Val for &V {
    fn success(&self) -> bool {
        (**self).success()
    }

    fn pull_error_messages(&self) -> Vec<String> {
        (**self).pull_error_messages()
    }
}

impl<V: Val + ?Sized> Val for Box<V> {
    fn success(&self) -> bool {
        (**self).success()
    }

    fn pull_error_messages(&self) -> Vec<String> {
        (**self).pull_error_messages()
    }
}

impl<V: Val + ?Sized> Val for Rc<V> {
    fn success(&self) -> bool {
        (**self).success()
    }

    fn pull_error_messages(&self) -> Vec<String> {
        (**self).pull_error_messages()
    }
}

impl<V: Val + ?Sized> Val for Arc<V> {
    fn success(&self) -> bool {
        (**self).success()
    }

    fn pull_error_messages(&self) -> Vec<String> {
        (**self).pull_error_messages()
    }
}

impl<V: TypedVal + ?Sized> TypedVal for &V {
    type Output = V::Output;

    fn value(&self) -> Option<Self::Output> {
        (**self).value()
    }
}

impl<V: TypedVal + ?Sized> TypedVal for Box<V> {
    type Output = V::Output;

    fn value(&self) -> Option<Self::Output> {
        (**self).value()
    }
}

impl<V: TypedVal + ?Sized> TypedVal for Rc<V> {
    type Output = V::Output;

    fn value(&self) -> Option<Self::Output> {
        (**self).value()
    }
}

impl<V: TypedVal + ?Sized> TypedVal for Arc<V> {
    type Output = V::Output;

    fn value(&self) -> Option<Self::Output> {
        (**self).value()
    }
}

/// The check a [`Checked`] val applies.
///
/// A rule is a pure function of the input: `check` reports failures,
/// `coerce` converts an input into the rule's output type. `coerce` is also
/// used to turn a configured default into a typed one.
pub trait Rule {
    /// Kind used to look up defaults
    const KIND: ValKind;

    /// Typed value produced by the val
    type Output: Clone;

    /// Push one message per failed condition.
    fn check(&self, input: &Input, messages: &mut Vec<String>);

    /// Convert `input` to the output type, if it has the right shape.
    fn coerce(&self, input: &Input) -> Option<Self::Output>;

    /// Whether `input` passes the check.
    fn accepts(&self, input: &Input) -> bool {
        let mut messages = Vec::new();
        self.check(input, &mut messages);
        messages.is_empty()
    }
}

/// A val made of an input, a rule and an optional default.
///
/// Use the aliases ([`IntVal`], [`IterableStringVal`], ...) rather than
/// naming this type directly.
#[derive(Clone)]
pub struct Checked<R: Rule> {
    input: Input,
    default: Option<R::Output>,
    rule: R,
    evaluation: Evaluation,
}

impl<R: Rule> Checked<R> {
    /// Build a val from any rule.
    pub fn from_rule(input: impl Into<Input>, rule: R, default: Option<R::Output>) -> Self {
        Self {
            input: input.into(),
            default,
            rule,
            evaluation: Evaluation::new(),
        }
    }

    /// Build a val whose default comes from an untyped value.
    ///
    /// A null default, or one that does not coerce to the rule's output, is
    /// dropped.
    pub(crate) fn from_untyped_default(
        input: impl Into<Input>,
        rule: R,
        default: Option<&Input>,
    ) -> Self {
        let default = default
            .filter(|d| !d.is_null())
            .and_then(|d| rule.coerce(d));
        Self::from_rule(input, rule, default)
    }

    /// The raw input.
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// The fallback returned by `value()` on failure.
    pub fn default_value(&self) -> Option<&R::Output> {
        self.default.as_ref()
    }

    /// The rule this val applies.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Evaluation state, without forcing evaluation.
    pub fn state(&self) -> EvalState {
        self.evaluation.state()
    }

    /// Stored verdict, evaluating on first use.
    pub fn verdict(&self) -> &Verdict {
        self.evaluation.get_or_run(|messages| {
            self.rule.check(&self.input, messages);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                kind = %R::KIND,
                input = %self.input,
                failures = messages.len(),
                "val evaluated"
            );
        })
    }
}

impl<R: Rule> Val for Checked<R> {
    fn success(&self) -> bool {
        self.verdict().is_passed()
    }

    fn pull_error_messages(&self) -> Vec<String> {
        self.verdict().messages().to_vec()
    }
}

impl<R: Rule> TypedVal for Checked<R> {
    type Output = R::Output;

    fn value(&self) -> Option<R::Output> {
        if self.success() {
            self.rule.coerce(&self.input)
        } else {
            self.default.clone()
        }
    }
}

impl<R> fmt::Debug for Checked<R>
where
    R: Rule + fmt::Debug,
    R::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checked")
            .field("kind", &R::KIND)
            .field("input", &self.input)
            .field("default", &self.default)
            .field("rule", &self.rule)
            .field("state", &self.state())
            .finish()
    }
}

/// Passes when the input is a bool.
pub type BoolVal = Checked<BoolRule>;

/// Passes when the input is an int.
pub type IntVal = Checked<IntRule>;

/// Passes when the input is a float.
pub type FloatVal = Checked<FloatRule>;

/// Passes when the input is a string.
pub type StringVal = Checked<StringRule>;

/// Passes for strings and objects that render as text; yields the text.
pub type StringableVal = Checked<StringableRule>;

/// Passes when the input is an instance of a named type.
pub type InstanceOfVal = Checked<InstanceOfRule>;

/// Passes when the input is one of a set of candidates.
pub type InListVal = Checked<InListRule>;

/// Passes when the input is a list or map.
pub type IterableVal = Checked<IterableRule<AnyElement>>;

/// Passes for an iterable of ints.
pub type IterableIntVal = Checked<IterableRule<IntElement>>;

/// Passes for an iterable of scalars that coerce to strings.
pub type IterableStringVal = Checked<IterableRule<StringElement>>;

/// Passes for an iterable of stringables; yields their texts.
pub type IterableStringableVal = Checked<IterableRule<StringableElement>>;

// Constructors for the variants whose rule needs no arguments.
macro_rules! impl_plain_constructors {
    ($($rule:ty),+ $(,)?) => {
        $(
            impl Checked<$rule> {
                /// Create a val with no default.
                pub fn new(input: impl Into<Input>) -> Self {
                    Self::from_rule(input, <$rule>::default(), None)
                }

                /// Create a val that falls back to `default` on failure.
                pub fn with_default(
                    input: impl Into<Input>,
                    default: <$rule as Rule>::Output,
                ) -> Self {
                    Self::from_rule(input, <$rule>::default(), Some(default))
                }
            }
        )+
    };
}

impl_plain_constructors!(
    BoolRule,
    IntRule,
    FloatRule,
    StringRule,
    StringableRule,
    IterableRule<AnyElement>,
    IterableRule<IntElement>,
    IterableRule<StringElement>,
    IterableRule<StringableElement>,
);
