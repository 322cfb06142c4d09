//! Membership rule

use super::{Checked, Rule};
use crate::configuration::ValKind;
use crate::error::MisuseError;
use crate::Input;

/// Input must equal one of the candidates.
///
/// With `strict` set, candidates compare with [`Input::strict_eq`];
/// otherwise with [`Input::loose_eq`].
#[derive(Debug, Clone, PartialEq)]
pub struct InListRule {
    candidates: Vec<Input>,
    strict: bool,
}

impl InListRule {
    /// Rule over the elements of `list`.
    ///
    /// # Errors
    ///
    /// Returns [`MisuseError::ListNotIterable`] when `list` is neither a
    /// list nor a map.
    pub fn new(list: impl Into<Input>, strict: bool) -> Result<Self, MisuseError> {
        let list = list.into();
        let candidates = list
            .elements()
            .ok_or(MisuseError::ListNotIterable {
                found: list.kind_name(),
            })?
            .cloned()
            .collect();
        Ok(Self { candidates, strict })
    }

    /// Allowed values.
    pub fn candidates(&self) -> &[Input] {
        &self.candidates
    }

    /// Whether comparison is type-strict.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn contains(&self, input: &Input) -> bool {
        if self.strict {
            self.candidates.iter().any(|c| c.strict_eq(input))
        } else {
            self.candidates.iter().any(|c| c.loose_eq(input))
        }
    }
}

impl Rule for InListRule {
    const KIND: ValKind = ValKind::InList;
    type Output = Input;

    fn check(&self, input: &Input, messages: &mut Vec<String>) {
        if !self.contains(input) {
            let allowed = self
                .candidates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            messages.push(format!("{} is not one of [{}]", input, allowed));
        }
    }

    fn coerce(&self, input: &Input) -> Option<Input> {
        Some(input.clone())
    }
}

impl Checked<InListRule> {
    /// Create a val with no default.
    ///
    /// # Errors
    ///
    /// Fails fast when `list` is not iterable.
    pub fn new(
        input: impl Into<Input>,
        list: impl Into<Input>,
        strict: bool,
    ) -> Result<Self, MisuseError> {
        Ok(Self::from_rule(input, InListRule::new(list, strict)?, None))
    }

    /// Create a val that falls back to `default` on failure. A null
    /// `default` means the val has none.
    ///
    /// # Errors
    ///
    /// Fails fast when `list` is not iterable.
    pub fn with_default(
        input: impl Into<Input>,
        list: impl Into<Input>,
        default: impl Into<Input>,
        strict: bool,
    ) -> Result<Self, MisuseError> {
        let default = Some(default.into()).filter(|d| !d.is_null());
        Ok(Self::from_rule(input, InListRule::new(list, strict)?, default))
    }
}
