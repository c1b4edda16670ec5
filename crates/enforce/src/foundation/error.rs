//! Error types crossing the enforcement boundary
//!
//! - [`ValidationError`]: a rule was violated by the value's content.
//! - [`IncompatibleTypeError`]: a rule was attached to a value lacking the
//!   capability it needs.
//! - [`BindError`]: the call does not fit the declared signature.
//!
//! All three are wrapped by [`EnforceError`], which is what an enforced call
//! returns. Codes and messages use `Cow<'static, str>` so the static case
//! does not allocate.

use super::traits::ValidationTarget;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A content-rule violation for one parameter of one function.
///
/// The message always names both the parameter and the function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error code for programmatic handling, e.g. `"not_empty"`.
    pub code: Cow<'static, str>,
    /// Human-readable message.
    pub message: Cow<'static, str>,
    /// Name of the function whose call was rejected.
    pub function: Arc<str>,
    /// Name of the offending parameter.
    pub parameter: Arc<str>,
}

impl ValidationError {
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        target: &ValidationTarget,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            function: Arc::clone(target.function_arc()),
            parameter: Arc::clone(target.parameter_arc()),
        }
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Content failures gathered across parameters in collect-all mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parameter(s) failed validation", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let separator = if i == 0 { ": " } else { "; " };
            write!(f, "{separator}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// INCOMPATIBLE TYPE ERROR
// ============================================================================

/// A capability a validator may require of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The value has a size (strings, lists, maps).
    Sized,
    /// Every element supports equality-based deduplication.
    Hashable,
    /// The value can be iterated.
    Iterable,
    /// The validator can observe a lazy sequence without materializing it.
    LazySequence,
}

impl Capability {
    /// Phrase describing the values that satisfy this capability.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Sized => "types that have a size (strings, lists, maps)",
            Self::Hashable => "collections whose elements are hashable",
            Self::Iterable => "types that are iterable and contain hashable elements",
            Self::LazySequence => "lazy sequences",
        }
    }
}

/// A validator was attached to a value whose runtime shape lacks the
/// capability the validator requires.
///
/// This is a declaration defect rather than bad input, so it is kept apart
/// from [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleTypeError {
    /// Name of the validator, e.g. `"Unique"`.
    pub validator: Cow<'static, str>,
    /// The capability that was missing.
    pub capability: Capability,
    /// Runtime type name of the offending value or element.
    pub found: Cow<'static, str>,
    pub function: Arc<str>,
    pub parameter: Arc<str>,
}

impl IncompatibleTypeError {
    pub fn new(
        validator: impl Into<Cow<'static, str>>,
        capability: Capability,
        found: impl Into<Cow<'static, str>>,
        target: &ValidationTarget,
    ) -> Self {
        Self {
            validator: validator.into(),
            capability,
            found: found.into(),
            function: Arc::clone(target.function_arc()),
            parameter: Arc::clone(target.parameter_arc()),
        }
    }

    /// A validator without lazy support was attached to a lazy sequence.
    pub fn lazy_unsupported(
        validator: impl Into<Cow<'static, str>>,
        target: &ValidationTarget,
    ) -> Self {
        Self::new(validator, Capability::LazySequence, "sequence", target)
    }
}

impl fmt::Display for IncompatibleTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.capability {
            Capability::LazySequence => write!(
                f,
                "Parameter '{}' for function '{}' is a lazy sequence, but validator '{}' \
                 does not support validation of lazy sequences",
                self.parameter, self.function, self.validator
            ),
            capability => write!(
                f,
                "Validator '{}' can only be used on {}, but function '{}' got type '{}' \
                 for parameter '{}'.",
                self.validator,
                capability.describe(),
                self.function,
                self.found,
                self.parameter
            ),
        }
    }
}

impl std::error::Error for IncompatibleTypeError {}

// ============================================================================
// BIND ERROR
// ============================================================================

/// The call's positional/keyword arguments do not fit the signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{function}() takes {expected} positional argument(s) but {given} were given")]
    TooManyPositional {
        function: Arc<str>,
        expected: usize,
        given: usize,
    },

    #[error("{function}() missing required argument: '{parameter}'")]
    MissingArgument {
        function: Arc<str>,
        parameter: Arc<str>,
    },

    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { function: Arc<str>, keyword: String },

    #[error("{function}() got multiple values for argument '{parameter}'")]
    MultipleValues {
        function: Arc<str>,
        parameter: Arc<str>,
    },

    #[error("{function}() got positional-only argument '{parameter}' passed as keyword")]
    PositionalOnlyByKeyword {
        function: Arc<str>,
        parameter: Arc<str>,
    },
}

impl BindError {
    /// Name of the function the call was aimed at.
    pub fn function(&self) -> &str {
        match self {
            Self::TooManyPositional { function, .. }
            | Self::MissingArgument { function, .. }
            | Self::UnexpectedKeyword { function, .. }
            | Self::MultipleValues { function, .. }
            | Self::PositionalOnlyByKeyword { function, .. } => function,
        }
    }
}

// ============================================================================
// ENFORCE ERROR
// ============================================================================

/// Everything an enforced call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforceError {
    /// A content rule was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A rule was attached to an incompatible value.
    #[error(transparent)]
    Incompatible(#[from] IncompatibleTypeError),

    /// The call did not fit the signature; passed through unchanged.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Several parameters failed (collect-all mode only).
    #[error(transparent)]
    Multiple(#[from] ValidationErrors),
}

impl EnforceError {
    /// True for content failures, single or collected.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Multiple(_))
    }

    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::Incompatible(_))
    }

    pub fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(_))
    }

    /// Parameter names involved in a content or capability failure.
    pub fn parameters(&self) -> Vec<&str> {
        match self {
            Self::Validation(e) => vec![&*e.parameter],
            Self::Incompatible(e) => vec![&*e.parameter],
            Self::Multiple(errors) => errors.iter().map(|e| &*e.parameter).collect(),
            Self::Bind(_) => Vec::new(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
