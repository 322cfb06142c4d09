//! # Sluice
//!
//! > *Let the good water through*
//!
//! A Rust library for fluent validation of untyped input.
//!
//! ## Philosophy
//!
//! External input (request fields, config values) arrives untyped. Sluice
//! turns it into typed values, or into a complete list of reasons why it
//! could not:
//! - **Vals** check one input against one rule, lazily and exactly once
//! - **Aggregators** run a batch of vals and merge their messages
//! - **Configurations** supply per-kind fallbacks for failed vals
//!
//! Bad input is never an error. It is a failed val with messages.
//!
//! ## Quick Example
//!
//! ```rust
//! use sluice::{Aggregator, Configuration, Input, TypedVal, ValKind};
//!
//! let config = Configuration::builder()
//!     .default_for(ValKind::Int, 1)
//!     .build()
//!     .into_result()
//!     .unwrap();
//!
//! let mut request = Aggregator::with_configuration(config);
//! let page = request.int_val("first");
//! let tags = request.iterable_string_val(vec![Input::from("rust"), Input::from(2024)]);
//! let sort = request.in_list_val("name", vec!["name", "date"]).unwrap();
//!
//! if !request.success() {
//!     for message in &request.error_messages() {
//!         println!("invalid request: {}", message);
//!     }
//! }
//!
//! assert_eq!(page.value(), Some(1));
//! assert_eq!(tags.value().map(|t| t.len()), Some(2));
//! assert_eq!(sort.value(), Some(Input::from("name")));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when vals and aggregators evaluate
//! - `serde`: `Serialize`/`Deserialize` for [`Input`], `Serialize` for
//!   [`ErrorMessages`]
//! - `proptest`: `Arbitrary` for [`Input`] and input strategies in [`testing`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod aggregator;
pub mod configuration;
pub mod error;
pub mod input;
pub mod messages;
pub mod semigroup;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod testing;
pub mod val;
pub mod validation;

// Re-exports
pub use aggregator::Aggregator;
pub use configuration::{Configuration, ConfigurationBuilder, ValKind};
pub use error::{ConfigError, MisuseError};
pub use input::{Input, Object};
pub use messages::ErrorMessages;
pub use semigroup::Semigroup;
pub use val::{
    BoolVal, Checked, EvalState, FloatVal, InListVal, InstanceOfVal, IntVal, IterableIntVal,
    IterableStringVal, IterableStringableVal, IterableVal, Rule, StringVal, StringableVal,
    TypedVal, Val,
};
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::configuration::{Configuration, ValKind};
    pub use crate::input::{Input, Object};
    pub use crate::messages::ErrorMessages;
    pub use crate::val::{TypedVal, Val};
    pub use crate::validation::Validation;
}
