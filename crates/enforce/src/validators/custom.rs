//! Closure-backed validators

use crate::foundation::{EnforceError, ValidationTarget, Validator, Value};
use std::borrow::Cow;
use std::fmt;

/// A plain validator built from a closure.
///
/// It has no lazy-sequence support: attaching one to a lazy argument is a
/// type incompatibility unless an earlier eager validator has already
/// materialized the sequence.
#[derive(Clone)]
pub struct FnValidator<F> {
    name: Cow<'static, str>,
    check: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value, &ValidationTarget) -> Result<(), EnforceError> + Send + Sync,
{
    pub fn new(name: impl Into<Cow<'static, str>>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &ValidationTarget) -> Result<(), EnforceError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError> {
        (self.check)(value, target)
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Creates a validator from a closure.
///
/// # Examples
///
/// ```
/// use enforce::foundation::{ValidationError, ValidationTarget, Validator, Value};
/// use enforce::validators::from_fn;
///
/// let even = from_fn("Even", |value: &Value, target: &ValidationTarget| {
///     match value.as_int() {
///         Some(n) if n % 2 == 0 => Ok(()),
///         _ => Err(ValidationError::new("even", "must be even", target).into()),
///     }
/// });
///
/// let target = ValidationTarget::new("f", "n");
/// assert!(even.validate(&Value::from(4), &target).is_ok());
/// assert!(even.validate(&Value::from(3), &target).is_err());
/// ```
pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, check: F) -> FnValidator<F>
where
    F: Fn(&Value, &ValidationTarget) -> Result<(), EnforceError> + Send + Sync,
{
    FnValidator::new(name, check)
}
