//! Per-kind default values
//!
//! A [`Configuration`] maps each [`ValKind`] to the value a failed val of
//! that kind falls back to. One configuration is usually shared (through an
//! `Arc`) by every aggregator that validates the same kind of request, so a
//! default such as "ints fall back to `0`" is written once.
//!
//! # Examples
//!
//! ```
//! use sluice::{Aggregator, Configuration, TypedVal, ValKind};
//!
//! let config = Configuration::builder()
//!     .default_for(ValKind::Int, 0)
//!     .default_for(ValKind::String, "")
//!     .build()
//!     .into_result()
//!     .expect("defaults fit their kinds");
//!
//! let mut checks = Aggregator::with_configuration(config);
//! let page = checks.int_val("two");
//! assert_eq!(page.value(), Some(0));
//! ```
//!
//! Defaults that cannot be produced by their kind are all reported at once:
//!
//! ```
//! use sluice::{Configuration, ValKind};
//!
//! let errors = Configuration::builder()
//!     .default_for(ValKind::Int, "zero")
//!     .default_for(ValKind::Bool, 1)
//!     .build()
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;
use crate::val::{
    BoolRule, FloatRule, IntElement, IntRule, IterableRule, Rule, StringElement, StringRule,
    StringableElement, StringableRule,
};
use crate::{Input, Validation};

/// Identity of a val variant, used as the configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValKind {
    /// [`BoolVal`](crate::BoolVal)
    Bool,
    /// [`IntVal`](crate::IntVal)
    Int,
    /// [`FloatVal`](crate::FloatVal)
    Float,
    /// [`StringVal`](crate::StringVal)
    String,
    /// [`StringableVal`](crate::StringableVal)
    Stringable,
    /// [`InstanceOfVal`](crate::InstanceOfVal)
    InstanceOf,
    /// [`InListVal`](crate::InListVal)
    InList,
    /// [`IterableVal`](crate::IterableVal)
    Iterable,
    /// [`IterableIntVal`](crate::IterableIntVal)
    IterableInt,
    /// [`IterableStringVal`](crate::IterableStringVal)
    IterableString,
    /// [`IterableStringableVal`](crate::IterableStringableVal)
    IterableStringable,
}

impl ValKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValKind; 11] = [
        ValKind::Bool,
        ValKind::Int,
        ValKind::Float,
        ValKind::String,
        ValKind::Stringable,
        ValKind::InstanceOf,
        ValKind::InList,
        ValKind::Iterable,
        ValKind::IterableInt,
        ValKind::IterableString,
        ValKind::IterableStringable,
    ];

    /// Name of the val type this kind stands for.
    pub fn name(&self) -> &'static str {
        match self {
            ValKind::Bool => "BoolVal",
            ValKind::Int => "IntVal",
            ValKind::Float => "FloatVal",
            ValKind::String => "StringVal",
            ValKind::Stringable => "StringableVal",
            ValKind::InstanceOf => "InstanceOfVal",
            ValKind::InList => "InListVal",
            ValKind::Iterable => "IterableVal",
            ValKind::IterableInt => "IterableIntVal",
            ValKind::IterableString => "IterableStringVal",
            ValKind::IterableStringable => "IterableStringableVal",
        }
    }

    /// Description of the defaults this kind can use, for messages.
    pub fn expected_default(&self) -> &'static str {
        match self {
            ValKind::Bool => "a bool",
            ValKind::Int => "an int",
            ValKind::Float => "a float",
            ValKind::String => "a string",
            ValKind::Stringable => "a string or an object with a text representation",
            ValKind::InstanceOf | ValKind::InList => "any value",
            ValKind::Iterable => "an iterable",
            ValKind::IterableInt => "an iterable of ints",
            ValKind::IterableString => "an iterable of string-coercible scalars",
            ValKind::IterableStringable => "an iterable of stringables",
        }
    }

    /// Whether `default` can stand in for a value of this kind.
    pub fn accepts_default(&self, default: &Input) -> bool {
        match self {
            ValKind::Bool => BoolRule.accepts(default),
            ValKind::Int => IntRule.accepts(default),
            ValKind::Float => FloatRule.accepts(default),
            ValKind::String => StringRule.accepts(default),
            ValKind::Stringable => StringableRule.accepts(default),
            ValKind::InstanceOf | ValKind::InList => true,
            ValKind::Iterable => default.is_iterable(),
            ValKind::IterableInt => IterableRule::new(IntElement).accepts(default),
            ValKind::IterableString => IterableRule::new(StringElement).accepts(default),
            ValKind::IterableStringable => IterableRule::new(StringableElement).accepts(default),
        }
    }
}

impl fmt::Display for ValKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only source of default values.
///
/// A kind with no registered default yields `None`; lookup never fails.
#[derive(Debug, Clone)]
pub struct Configuration {
    defaults: HashMap<ValKind, Input>,
    strict_lists: bool,
}

impl Configuration {
    /// Configuration with no defaults and type-strict list membership.
    pub fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            strict_lists: true,
        }
    }

    /// Start building a configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// Default for `kind`, if one was registered.
    pub fn default_value(&self, kind: ValKind) -> Option<&Input> {
        self.defaults.get(&kind)
    }

    /// Whether in-list vals created from this configuration compare
    /// type-strictly.
    pub fn strict_lists(&self) -> bool {
        self.strict_lists
    }

    /// Number of registered defaults.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether no defaults are registered.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Configuration`].
///
/// Every default is checked against its kind in [`build`](Self::build), and
/// all misfits are reported together.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    defaults: Vec<(ValKind, Input)>,
    strict_lists: bool,
}

impl ConfigurationBuilder {
    /// Empty builder with type-strict list membership.
    pub fn new() -> Self {
        Self {
            defaults: Vec::new(),
            strict_lists: true,
        }
    }

    /// Register the default for `kind`. A later call for the same kind wins.
    ///
    /// [`Input::Null`] means "no default": it clears whatever an earlier
    /// call registered for `kind`.
    pub fn default_for(mut self, kind: ValKind, default: impl Into<Input>) -> Self {
        self.defaults.push((kind, default.into()));
        self
    }

    /// Choose type-strict (`true`) or loose (`false`) list membership.
    pub fn strict_lists(mut self, strict: bool) -> Self {
        self.strict_lists = strict;
        self
    }

    /// Check every default and build the configuration.
    pub fn build(self) -> Validation<Configuration, Vec<ConfigError>> {
        let checked = Validation::all(self.defaults.into_iter().map(|(kind, default)| {
            if default.is_null() || kind.accepts_default(&default) {
                Validation::success((kind, default))
            } else {
                Validation::failure(vec![ConfigError {
                    kind,
                    expected: kind.expected_default(),
                    found: default.kind_name(),
                }])
            }
        }));

        let entries = match checked {
            Validation::Success(entries) => entries,
            Validation::Failure(errors) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(rejected = errors.len(), "configuration defaults rejected");
                return Validation::failure(errors);
            }
        };

        let mut defaults = HashMap::new();
        for (kind, default) in entries {
            if default.is_null() {
                defaults.remove(&kind);
            } else {
                defaults.insert(kind, default);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            defaults = defaults.len(),
            strict_lists = self.strict_lists,
            "configuration built"
        );

        Validation::success(Configuration {
            defaults,
            strict_lists: self.strict_lists,
        })
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_kind_has_no_default() {
        let config = Configuration::new();
        for kind in ValKind::ALL {
            assert!(config.default_value(kind).is_none());
        }
    }

    #[test]
    fn test_registered_defaults_are_returned() {
        let config = Configuration::builder()
            .default_for(ValKind::Int, 0)
            .default_for(ValKind::IterableString, Vec::<String>::new())
            .build()
            .into_result()
            .unwrap();

        assert_eq!(config.default_value(ValKind::Int), Some(&Input::Int(0)));
        assert_eq!(
            config.default_value(ValKind::IterableString),
            Some(&Input::List(vec![]))
        );
        assert_eq!(config.default_value(ValKind::Float), None);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_later_default_wins() {
        let config = Configuration::builder()
            .default_for(ValKind::Bool, false)
            .default_for(ValKind::Bool, true)
            .build()
            .into_result()
            .unwrap();
        assert_eq!(config.default_value(ValKind::Bool), Some(&Input::Bool(true)));
    }

    #[test]
    fn test_misfit_defaults_accumulate() {
        let errors = Configuration::builder()
            .default_for(ValKind::Float, 1)
            .default_for(ValKind::Int, 1)
            .default_for(ValKind::IterableInt, vec!["a"])
            .build()
            .into_result()
            .unwrap_err();

        assert_eq!(
            errors,
            vec![
                ConfigError {
                    kind: ValKind::Float,
                    expected: "a float",
                    found: "int",
                },
                ConfigError {
                    kind: ValKind::IterableInt,
                    expected: "an iterable of ints",
                    found: "list",
                },
            ]
        );
    }

    #[test]
    fn test_null_default_means_none_for_every_kind() {
        let mut builder = Configuration::builder();
        for kind in ValKind::ALL {
            builder = builder.default_for(kind, Input::Null);
        }
        let config = builder.build().into_result().unwrap();

        assert!(config.is_empty());
        for kind in ValKind::ALL {
            assert_eq!(config.default_value(kind), None);
        }
    }

    #[test]
    fn test_null_default_clears_earlier_default() {
        let config = Configuration::builder()
            .default_for(ValKind::Int, 7)
            .default_for(ValKind::InstanceOf, "guest")
            .default_for(ValKind::Int, Input::Null)
            .default_for(ValKind::InstanceOf, Input::Null)
            .build()
            .into_result()
            .unwrap();
        assert_eq!(config.default_value(ValKind::Int), None);
        assert_eq!(config.default_value(ValKind::InstanceOf), None);

        let restored = Configuration::builder()
            .default_for(ValKind::Int, Input::Null)
            .default_for(ValKind::Int, 3)
            .build()
            .into_result()
            .unwrap();
        assert_eq!(restored.default_value(ValKind::Int), Some(&Input::Int(3)));
    }

    #[test]
    fn test_any_default_for_identity_kinds() {
        for default in [Input::Null, Input::from("x"), Input::from(vec![1])] {
            assert!(ValKind::InstanceOf.accepts_default(&default));
            assert!(ValKind::InList.accepts_default(&default));
        }
    }

    #[test]
    fn test_strict_lists_default_and_override() {
        assert!(Configuration::default().strict_lists());
        let loose = Configuration::builder()
            .strict_lists(false)
            .build()
            .into_result()
            .unwrap();
        assert!(!loose.strict_lists());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValKind::IterableStringable.to_string(), "IterableStringableVal");
    }
}
