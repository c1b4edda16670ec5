//! Core validation types and traits
//!
//! This module contains the building blocks every other layer uses:
//!
//! - **Values**: [`Value`], [`Key`] and the lazy [`Sequence`]
//! - **Traits**: [`Validator`], [`SequenceValidator`], [`SequenceCheck`]
//! - **Errors**: [`ValidationError`], [`IncompatibleTypeError`],
//!   [`BindError`], [`ValidationErrors`], [`EnforceError`]
//!
//! # Capabilities
//!
//! A rule never inspects a value's concrete variant to decide whether it
//! applies. It asks for a capability (`size()`, `hash_key()`,
//! `as_sequence_validator()`) and reports an [`IncompatibleTypeError`]
//! naming the missing [`Capability`] when the answer is `None`:
//!
//! ```
//! use enforce::foundation::{Validator, ValidationTarget, Value};
//! use enforce::validators::NotEmpty;
//!
//! let target = ValidationTarget::new("f", "n");
//! let err = NotEmpty::new().validate(&Value::from(123), &target).unwrap_err();
//! assert!(err.is_incompatible());
//! ```

pub mod error;
pub mod sequence;
pub mod traits;
pub mod value;

pub use error::{
    BindError, Capability, EnforceError, IncompatibleTypeError, ValidationError, ValidationErrors,
};
pub use sequence::{Sequence, SequenceCheck, SequenceItem};
pub use traits::{SequenceValidator, ValidationTarget, Validator};
pub use value::{Key, Value};

/// A validation result using [`EnforceError`].
pub type EnforceResult<T> = Result<T, EnforceError>;
