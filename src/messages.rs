//! Ordered, de-duplicated error messages
//!
//! [`ErrorMessages`] is the message sequence an aggregator owns after
//! evaluation. Insertion order is preserved and a byte-identical message is
//! kept only at its first position, no matter how many vals report it.
//!
//! # Examples
//!
//! ```
//! use sluice::{ErrorMessages, Semigroup};
//!
//! let first: ErrorMessages = vec!["must be a bool", "must be an int"].into_iter().collect();
//! let second: ErrorMessages = vec!["must be an int", "must be a float"].into_iter().collect();
//!
//! let merged = first.combine(second);
//! assert_eq!(merged.into_vec(), ["must be a bool", "must be an int", "must be a float"]);
//! ```

use std::fmt;

use indexmap::IndexSet;

use crate::Semigroup;

/// Insertion-ordered set of messages.
#[derive(Debug, Clone, Default)]
pub struct ErrorMessages {
    set: IndexSet<String>,
}

impl ErrorMessages {
    /// Create an empty message set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` unless it is already present.
    ///
    /// Returns `true` if the message was added.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        self.set.insert(message.into())
    }

    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Whether `message` is present.
    pub fn contains(&self, message: &str) -> bool {
        self.set.contains(message)
    }

    /// Message at position `idx` in first-seen order.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.set.get_index(idx).map(String::as_str)
    }

    /// Iterate messages in first-seen order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, String> {
        self.set.iter()
    }

    /// Copy the messages out in first-seen order.
    pub fn to_vec(&self) -> Vec<String> {
        self.set.iter().cloned().collect()
    }

    /// Unwrap into the ordered message list.
    pub fn into_vec(self) -> Vec<String> {
        self.set.into_iter().collect()
    }
}

// Two message sets are equal only when they list the same messages in the
// same order.
impl PartialEq for ErrorMessages {
    fn eq(&self, other: &Self) -> bool {
        self.set.iter().eq(other.set.iter())
    }
}

impl Eq for ErrorMessages {}

impl Semigroup for ErrorMessages {
    fn combine(mut self, other: Self) -> Self {
        self.set.extend(other.set);
        self
    }
}

impl<S: Into<String>> Extend<S> for ErrorMessages {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.set.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for ErrorMessages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut messages = ErrorMessages::new();
        messages.extend(iter);
        messages
    }
}

impl IntoIterator for ErrorMessages {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMessages {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl From<ErrorMessages> for Vec<String> {
    fn from(messages: ErrorMessages) -> Self {
        messages.into_vec()
    }
}

impl fmt::Display for ErrorMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, message) in self.set.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {}", message)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorMessages {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.set, serializer)
    }
}
