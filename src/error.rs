//! Programmer-error types
//!
//! Bad *input* is never an error in this crate: it is a failed val with
//! messages. The types here cover bad *arguments*, which are rejected when a
//! val or a configuration is built.

use std::error::Error as StdError;
use std::fmt;

use crate::configuration::ValKind;

/// A val was constructed with arguments that can never be checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MisuseError {
    /// The candidate list given to an in-list val is not iterable.
    ListNotIterable {
        /// Shape of the value that was passed as the list
        found: &'static str,
    },
}

impl fmt::Display for MisuseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MisuseError::ListNotIterable { found } => {
                write!(f, "in-list candidates must be a list or map, got {}", found)
            }
        }
    }
}

impl StdError for MisuseError {}

/// A configured default does not fit the val kind it is registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The kind whose default was rejected
    pub kind: ValKind,
    /// What the kind expects
    pub expected: &'static str,
    /// Shape of the rejected default
    pub found: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "default for {} must be {}, got {}",
            self.kind, self.expected, self.found
        )
    }
}

impl StdError for ConfigError {}
