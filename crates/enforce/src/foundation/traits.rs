//! Validator capability contracts
//!
//! Every rule implements [`Validator`]. Rules that can observe a lazy
//! sequence without materializing it additionally implement
//! [`SequenceValidator`] and advertise it through
//! [`Validator::as_sequence_validator`]; the pipeline treats a lazy value
//! handed to any other validator as a type incompatibility.

use super::error::EnforceError;
use super::sequence::Sequence;
use super::value::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// VALIDATION TARGET
// ============================================================================

/// The function and parameter a value is being validated for.
///
/// Cheap to clone; lazy wrappers keep one for errors raised after the
/// enforced call has returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationTarget {
    function: Arc<str>,
    parameter: Arc<str>,
}

impl ValidationTarget {
    pub fn new(function: impl Into<Arc<str>>, parameter: impl Into<Arc<str>>) -> Self {
        Self {
            function: function.into(),
            parameter: parameter.into(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub(crate) fn function_arc(&self) -> &Arc<str> {
        &self.function
    }

    pub(crate) fn parameter_arc(&self) -> &Arc<str> {
        &self.parameter
    }
}

impl fmt::Display for ValidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, self.parameter)
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// A single validation rule attached to a parameter.
///
/// Instances are immutable once declared and are shared read-only by every
/// call of the enforced function, hence the `Send + Sync` bound.
///
/// # Examples
///
/// ```
/// use enforce::foundation::{EnforceError, ValidationError, ValidationTarget, Validator, Value};
///
/// #[derive(Debug)]
/// struct Positive;
///
/// impl Validator for Positive {
///     fn name(&self) -> &str {
///         "Positive"
///     }
///
///     fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError> {
///         match value.as_int() {
///             Some(n) if n > 0 => Ok(()),
///             _ => Err(ValidationError::new("positive", "must be a positive integer", target).into()),
///         }
///     }
/// }
///
/// let target = ValidationTarget::new("f", "n");
/// assert!(Positive.validate(&Value::from(3), &target).is_ok());
/// assert!(Positive.validate(&Value::from(-3), &target).is_err());
/// ```
pub trait Validator: fmt::Debug + Send + Sync {
    /// Name used in error messages and signature rendering.
    fn name(&self) -> &str;

    /// Validates a concrete value.
    ///
    /// Returns [`EnforceError::Validation`] when the rule is violated and
    /// [`EnforceError::Incompatible`] when the value lacks a capability the
    /// rule needs.
    fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError>;

    /// Returns the lazy-sequence refinement, if this rule supports it.
    fn as_sequence_validator(&self) -> Option<&dyn SequenceValidator> {
        None
    }
}

/// A validator that can also check lazy sequences.
pub trait SequenceValidator: Validator {
    /// Whether lazy input should be drained into a list before validation.
    fn exhausts_sequences(&self) -> bool;

    /// Wraps a lazy sequence so the rule is checked as elements are pulled.
    ///
    /// The returned sequence yields an `Err` item as soon as a violation is
    /// known: mid-stream when a single element decides it, at the end when
    /// only the whole stream can.
    fn wrap_sequence(&self, sequence: Sequence, target: &ValidationTarget) -> Sequence;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError> {
        (**self).validate(value, target)
    }

    fn as_sequence_validator(&self) -> Option<&dyn SequenceValidator> {
        (**self).as_sequence_validator()
    }
}

// ============================================================================
// TESTS
// ============================================================================
