//! Validation type for accumulating errors
//!
//! A val's outcome can be taken out of the lazy, shared world of
//! [`Val`](crate::Val) and into a plain value with
//! [`TypedVal::into_validation`](crate::TypedVal::into_validation). The
//! result is a `Validation`: like `Result`, but combining two failures keeps
//! both error sets instead of stopping at the first.
//!
//! # Examples
//!
//! Aggregators and configuration builders fold their per-item outcomes with
//! [`Validation::all`].
//!
//! ```
//! use sluice::{StringVal, TypedVal, Validation};
//!
//! let fields = Validation::all(vec![
//!     StringVal::new("localhost").into_validation(),
//!     StringVal::new(7).into_validation(),
//! ]);
//! assert_eq!(fields, Validation::Failure(vec!["expected a string, got int".to_string()]));
//! ```
//!
//! ```
//! use sluice::{IntVal, TypedVal, Validation};
//!
//! let age = IntVal::new(42).into_validation();
//! assert_eq!(age, Validation::Success(42));
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Collect validations into one, accumulating every failure in order
    ///
    /// # Examples
    ///
    /// ```
    /// use sluice::Validation;
    ///
    /// let all = Validation::all(vec![
    ///     Validation::<_, Vec<&str>>::success(1),
    ///     Validation::failure(vec!["bad"]),
    ///     Validation::success(3),
    /// ]);
    /// assert_eq!(all, Validation::Failure(vec!["bad"]));
    /// ```
    pub fn all<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut values = Vec::new();
        let mut errors: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => values.push(value),
                Validation::Failure(error) => {
                    errors = Some(match errors {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match errors {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(values),
        }
    }
}
