//! Semigroup trait for associative combination
//!
//! Message lists are merged with [`Semigroup::combine`] whenever results from
//! several vals are brought together. The only law is associativity:
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use sluice::Semigroup;
//!
//! let v1 = vec!["must be an int".to_string()];
//! let v2 = vec!["must be a bool".to_string()];
//! assert_eq!(v1.combine(v2).len(), 2);
//! ```

/// A type that supports an associative binary operation
///
/// `combine` takes both sides by value; clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}
