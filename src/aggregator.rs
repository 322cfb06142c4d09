//! Batches of vals evaluated together
//!
//! An [`Aggregator`] creates vals through typed factory methods, keeps every
//! one it created, and evaluates them all in one pass. Failures never stop
//! the pass: a single [`success`](Aggregator::success) call surfaces every
//! problem, merged into one de-duplicated message list.
//!
//! # Examples
//!
//! ```
//! use sluice::{Aggregator, TypedVal};
//!
//! let mut request = Aggregator::new();
//! let limit = request.int_val(5);
//! let verbose = request.bool_val("x");
//!
//! assert!(!request.success());
//! assert_eq!(request.error_messages().to_vec(), ["expected a bool, got string"]);
//!
//! // Each val can still be read on its own.
//! assert_eq!(limit.value(), Some(5));
//! assert_eq!(verbose.value(), None);
//! ```
//!
//! A configured aggregator works as a template:
//!
//! ```
//! use sluice::{Aggregator, Configuration, ValKind};
//!
//! let config = Configuration::builder()
//!     .default_for(ValKind::Int, 0)
//!     .build()
//!     .into_result()
//!     .unwrap();
//! let template = Aggregator::with_configuration(config);
//!
//! let mut first = template.fresh();
//! first.int_val("bad");
//! assert!(!first.success());
//!
//! let second = first.fresh();
//! assert!(second.success());
//! assert!(second.error_messages().is_empty());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::MisuseError;
use crate::val::{
    AnyElement, BoolRule, Checked, FloatRule, InListRule, InstanceOfRule, IntElement, IntRule,
    IterableRule, Rule, StringElement, StringRule, StringableElement, StringableRule,
};
use crate::{
    BoolVal, Configuration, ErrorMessages, FloatVal, InListVal, Input, InstanceOfVal, IntVal,
    IterableIntVal, IterableStringVal, IterableStringableVal, IterableVal, StringVal,
    StringableVal, Val, Validation,
};

/// A batch of vals sharing one configuration.
///
/// Factory methods return the created val as an `Rc` handle; the aggregator
/// keeps its own handle, so both sides observe the same memoized verdict.
pub struct Aggregator {
    vals: Vec<Rc<dyn Val>>,
    configuration: Arc<Configuration>,
    error_messages: RefCell<ErrorMessages>,
}

impl Aggregator {
    /// Aggregator with an empty configuration.
    pub fn new() -> Self {
        Self::with_configuration(Configuration::default())
    }

    /// Aggregator using `configuration` for every val it creates.
    ///
    /// Pass an `Arc<Configuration>` to share one configuration between
    /// several aggregators.
    pub fn with_configuration(configuration: impl Into<Arc<Configuration>>) -> Self {
        Self {
            vals: Vec::new(),
            configuration: configuration.into(),
            error_messages: RefCell::new(ErrorMessages::new()),
        }
    }

    /// A new aggregator with the same configuration and no vals or messages.
    pub fn fresh(&self) -> Self {
        Self::with_configuration(Arc::clone(&self.configuration))
    }

    /// The shared configuration.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Number of registered vals.
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    /// Whether no vals are registered.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Register any val and hand it back.
    ///
    /// This is the extension point for checks that are not built in,
    /// including other aggregators.
    pub fn add_val<V: Val + 'static>(&mut self, val: Rc<V>) -> Rc<V> {
        self.vals.push(Rc::clone(&val) as Rc<dyn Val>);
        val
    }

    fn register<R: Rule + 'static>(&mut self, input: impl Into<Input>, rule: R) -> Rc<Checked<R>> {
        let default = self.configuration.default_value(R::KIND);
        let val = Checked::from_untyped_default(input, rule, default);
        self.add_val(Rc::new(val))
    }

    /// Register a [`BoolVal`].
    pub fn bool_val(&mut self, input: impl Into<Input>) -> Rc<BoolVal> {
        self.register(input, BoolRule)
    }

    /// Register an [`IntVal`].
    pub fn int_val(&mut self, input: impl Into<Input>) -> Rc<IntVal> {
        self.register(input, IntRule)
    }

    /// Register a [`FloatVal`].
    pub fn float_val(&mut self, input: impl Into<Input>) -> Rc<FloatVal> {
        self.register(input, FloatRule)
    }

    /// Register a [`StringVal`].
    pub fn string_val(&mut self, input: impl Into<Input>) -> Rc<StringVal> {
        self.register(input, StringRule)
    }

    /// Register a [`StringableVal`].
    pub fn stringable_val(&mut self, input: impl Into<Input>) -> Rc<StringableVal> {
        self.register(input, StringableRule)
    }

    /// Register an [`InstanceOfVal`] targeting `type_name`.
    pub fn instance_of_val(
        &mut self,
        input: impl Into<Input>,
        type_name: impl Into<String>,
    ) -> Rc<InstanceOfVal> {
        self.register(input, InstanceOfRule::new(type_name))
    }

    /// Register an [`IterableVal`].
    pub fn iterable_val(&mut self, input: impl Into<Input>) -> Rc<IterableVal> {
        self.register(input, IterableRule::new(AnyElement))
    }

    /// Same as [`iterable_val`](Self::iterable_val).
    pub fn array_val(&mut self, input: impl Into<Input>) -> Rc<IterableVal> {
        self.iterable_val(input)
    }

    /// Register an [`IterableIntVal`].
    pub fn iterable_int_val(&mut self, input: impl Into<Input>) -> Rc<IterableIntVal> {
        self.register(input, IterableRule::new(IntElement))
    }

    /// Register an [`IterableStringVal`].
    pub fn iterable_string_val(&mut self, input: impl Into<Input>) -> Rc<IterableStringVal> {
        self.register(input, IterableRule::new(StringElement))
    }

    /// Register an [`IterableStringableVal`].
    pub fn iterable_stringable_val(
        &mut self,
        input: impl Into<Input>,
    ) -> Rc<IterableStringableVal> {
        self.register(input, IterableRule::new(StringableElement))
    }

    /// Register an [`InListVal`] over the elements of `list`.
    ///
    /// Strictness comes from [`Configuration::strict_lists`].
    ///
    /// # Errors
    ///
    /// Returns [`MisuseError::ListNotIterable`] when `list` is not a list or
    /// map. Nothing is registered in that case.
    pub fn in_list_val(
        &mut self,
        input: impl Into<Input>,
        list: impl Into<Input>,
    ) -> Result<Rc<InListVal>, MisuseError> {
        let rule = InListRule::new(list, self.configuration.strict_lists())?;
        Ok(self.register(input, rule))
    }

    /// Evaluate every val in registration order.
    ///
    /// Returns `true` only if every val passed (vacuously `true` when there
    /// are none). The message list is rebuilt from scratch on each call:
    /// failing vals' messages in registration order, each distinct message
    /// kept once at its first position.
    pub fn success(&self) -> bool {
        let outcome = Validation::all(self.vals.iter().map(|val| {
            if val.success() {
                Validation::success(())
            } else {
                let messages: ErrorMessages = val.pull_error_messages().into_iter().collect();
                Validation::failure(messages)
            }
        }));

        let (passed, messages) = match outcome {
            Validation::Success(_) => (true, ErrorMessages::new()),
            Validation::Failure(messages) => (false, messages),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            vals = self.vals.len(),
            passed,
            messages = messages.len(),
            "aggregator evaluated"
        );

        *self.error_messages.borrow_mut() = messages;
        passed
    }

    /// Evaluate, then return the aggregator itself.
    pub fn value(&self) -> &Self {
        self.success();
        self
    }

    /// Messages from the last evaluation; empty before the first one.
    pub fn error_messages(&self) -> ErrorMessages {
        self.error_messages.borrow().clone()
    }

    /// Evaluate and hand back the aggregator on success, or the messages.
    pub fn into_validation(self) -> Validation<Self, ErrorMessages> {
        if self.success() {
            Validation::success(self)
        } else {
            Validation::failure(self.error_messages.into_inner())
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Val for Aggregator {
    fn success(&self) -> bool {
        Aggregator::success(self)
    }

    fn pull_error_messages(&self) -> Vec<String> {
        self.error_messages.borrow().to_vec()
    }
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("vals", &self.vals.len())
            .field("configuration", &self.configuration)
            .field("error_messages", &self.error_messages.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvalState, TypedVal, ValKind};

    #[test]
    fn test_empty_aggregator_succeeds() {
        let checks = Aggregator::new();
        assert!(checks.success());
        assert!(checks.error_messages().is_empty());
    }

    #[test]
    fn test_messages_empty_before_first_evaluation() {
        let mut checks = Aggregator::new();
        checks.int_val("x");
        assert!(checks.error_messages().is_empty());
        assert!(checks.pull_error_messages().is_empty());
    }

    #[test]
    fn test_factories_are_lazy() {
        let mut checks = Aggregator::new();
        let val = checks.float_val(1.0);
        assert_eq!(val.state(), EvalState::Unevaluated);
        checks.success();
        assert_eq!(val.state(), EvalState::Passed);
    }

    #[test]
    fn test_int_then_bad_bool() {
        let mut checks = Aggregator::new();
        let count = checks.int_val(5);
        checks.bool_val("x");

        assert!(!checks.success());
        assert_eq!(
            checks.error_messages().into_vec(),
            vec!["expected a bool, got string"]
        );
        assert_eq!(count.value(), Some(5));
    }

    #[test]
    fn test_every_val_is_evaluated_after_a_failure() {
        let mut checks = Aggregator::new();
        checks.int_val("a");
        let last = checks.string_val("fine");
        checks.success();
        assert_eq!(last.state(), EvalState::Passed);
    }

    #[test]
    fn test_identical_messages_are_merged() {
        let mut checks = Aggregator::new();
        checks.int_val("a");
        checks.bool_val(3);
        checks.int_val("b");

        assert!(!checks.success());
        assert_eq!(
            checks.error_messages().into_vec(),
            vec!["expected an int, got string", "expected a bool, got int"]
        );
    }

    #[test]
    fn test_repeated_success_does_not_grow_messages() {
        let mut checks = Aggregator::new();
        checks.int_val("a");
        checks.bool_val(3);

        checks.success();
        let first = checks.error_messages();
        checks.success();
        checks.success();
        assert_eq!(checks.error_messages(), first);
    }

    #[test]
    fn test_vals_added_after_evaluation_are_included() {
        let mut checks = Aggregator::new();
        checks.int_val(1);
        assert!(checks.success());

        checks.string_val(2);
        assert!(!checks.success());
        assert_eq!(checks.error_messages().len(), 1);
    }

    #[test]
    fn test_configuration_defaults_flow_into_vals() {
        let config = Configuration::builder()
            .default_for(ValKind::Int, -1)
            .default_for(ValKind::Stringable, "n/a")
            .build()
            .into_result()
            .unwrap();
        let mut checks = Aggregator::with_configuration(config);

        assert_eq!(checks.int_val("x").value(), Some(-1));
        assert_eq!(checks.stringable_val(4).value().as_deref(), Some("n/a"));
        assert_eq!(checks.float_val("x").value(), None);
    }

    #[test]
    fn test_null_configured_default_leaves_vals_without_default() {
        let config = Configuration::builder()
            .default_for(ValKind::Int, Input::Null)
            .default_for(ValKind::InstanceOf, Input::Null)
            .default_for(ValKind::InList, Input::Null)
            .build()
            .into_result()
            .unwrap();
        let mut checks = Aggregator::with_configuration(config);

        let count = checks.int_val("x");
        let owner = checks.instance_of_val("x", "User");
        let order = checks.in_list_val("up", vec!["asc", "desc"]).unwrap();

        assert!(!checks.success());
        assert_eq!(count.value(), None);
        assert_eq!(owner.value(), None);
        assert_eq!(order.value(), None);
    }

    #[test]
    fn test_failing_val_without_messages_still_fails_batch() {
        struct Silent;

        impl Val for Silent {
            fn success(&self) -> bool {
                false
            }

            fn pull_error_messages(&self) -> Vec<String> {
                Vec::new()
            }
        }

        let mut checks = Aggregator::new();
        checks.int_val(1);
        checks.add_val(Rc::new(Silent));
        assert!(!checks.success());
        assert!(checks.error_messages().is_empty());
    }

    #[test]
    fn test_in_list_uses_configured_strictness() {
        let loose = Configuration::builder()
            .strict_lists(false)
            .build()
            .into_result()
            .unwrap();
        let mut checks = Aggregator::with_configuration(loose);
        assert!(checks.in_list_val("2", vec![1, 2]).unwrap().success());

        let mut strict = Aggregator::new();
        assert!(!strict.in_list_val("2", vec![1, 2]).unwrap().success());
    }

    #[test]
    fn test_in_list_misuse_registers_nothing() {
        let mut checks = Aggregator::new();
        assert!(checks.in_list_val("a", "abc").is_err());
        assert!(checks.is_empty());
    }

    #[test]
    fn test_array_val_is_iterable_val() {
        let mut checks = Aggregator::new();
        assert!(checks.array_val(vec![1, 2]).success());
        assert!(!checks.array_val(1).success());
        assert_eq!(checks.len(), 2);
    }

    #[test]
    fn test_fresh_shares_configuration() {
        let mut checks = Aggregator::new();
        checks.int_val("x");
        assert!(!checks.success());

        let fresh = checks.fresh();
        assert!(fresh.is_empty());
        assert!(fresh.success());
        assert!(fresh.error_messages().is_empty());
        assert!(Arc::ptr_eq(fresh.configuration(), checks.configuration()));
    }

    #[test]
    fn test_value_returns_self_after_evaluation() {
        let mut checks = Aggregator::new();
        checks.bool_val(1);
        let done = checks.value();
        assert_eq!(done.error_messages().len(), 1);
    }

    #[test]
    fn test_nested_aggregators() {
        let mut inner = Aggregator::new();
        inner.int_val("x");

        let mut outer = Aggregator::new();
        outer.bool_val(true);
        outer.add_val(Rc::new(inner));

        assert!(!outer.success());
        assert_eq!(
            outer.error_messages().into_vec(),
            vec!["expected an int, got string"]
        );
    }

    #[test]
    fn test_into_validation() {
        let mut checks = Aggregator::new();
        checks.int_val(1);
        assert!(checks.into_validation().is_success());

        let mut checks = Aggregator::new();
        checks.int_val(1.5);
        let messages = checks.into_validation().into_result().unwrap_err();
        assert_eq!(messages.into_vec(), vec!["expected an int, got float"]);
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[test]
        #[traced_test]
        fn test_evaluation_is_logged() {
            let mut checks = Aggregator::new();
            checks.int_val("x");
            checks.success();

            assert!(logs_contain("val evaluated"));
            assert!(logs_contain("aggregator evaluated"));
        }
    }
}
