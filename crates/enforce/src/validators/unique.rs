//! Element uniqueness validator

use crate::foundation::{
    Capability, EnforceError, IncompatibleTypeError, Key, Sequence, SequenceCheck,
    SequenceValidator, ValidationError, ValidationTarget, Validator, Value,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// UNIQUE
// ============================================================================

/// Rejects collections in which two elements compare equal.
///
/// Lists are checked element by element through [`Value::hash_key`];
/// strings by character; maps always pass because their keys are unique by
/// construction. An element without a hash key is a type incompatibility.
///
/// On a lazy sequence the wrapped stream fails as soon as a duplicate is
/// pulled, without waiting for the end.
///
/// # Examples
///
/// ```
/// use enforce::foundation::{Validator, ValidationTarget, Value};
/// use enforce::validators::Unique;
///
/// let target = ValidationTarget::new("f", "items");
/// assert!(Unique::new().validate(&Value::from(vec![1, 2, 3]), &target).is_ok());
/// assert!(Unique::new().validate(&Value::from(vec![1, 2, 1]), &target).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Unique {
    exhaust_sequences: bool,
}

impl Unique {
    pub const fn new() -> Self {
        Self {
            exhaust_sequences: false,
        }
    }

    /// Drains lazy input into a list before checking it.
    pub const fn eager() -> Self {
        Self {
            exhaust_sequences: true,
        }
    }

    pub const fn with_exhaust_sequences(mut self, exhaust: bool) -> Self {
        self.exhaust_sequences = exhaust;
        self
    }
}

/// Creates a [`Unique`] validator that checks lazy input incrementally.
pub const fn unique() -> Unique {
    Unique::new()
}

fn duplicate_error(target: &ValidationTarget) -> ValidationError {
    ValidationError::new(
        "unique",
        format!(
            "Parameter '{}' must contain unique elements for function '{}'.",
            target.parameter(),
            target.function()
        ),
        target,
    )
}

fn element_key(element: &Value, target: &ValidationTarget) -> Result<Key, IncompatibleTypeError> {
    element.hash_key().ok_or_else(|| {
        IncompatibleTypeError::new("Unique", Capability::Hashable, element.type_name(), target)
    })
}

impl Validator for Unique {
    fn name(&self) -> &str {
        "Unique"
    }

    fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError> {
        match value {
            Value::Map(_) => Ok(()),
            Value::Str(s) => {
                let mut seen = HashSet::new();
                if s.chars().all(|c| seen.insert(c)) {
                    Ok(())
                } else {
                    Err(duplicate_error(target).into())
                }
            }
            Value::List(items) => {
                let mut seen = HashSet::with_capacity(items.len());
                for item in items {
                    if !seen.insert(element_key(item, target)?) {
                        return Err(duplicate_error(target).into());
                    }
                }
                Ok(())
            }
            other => Err(IncompatibleTypeError::new(
                "Unique",
                Capability::Iterable,
                other.type_name(),
                target,
            )
            .into()),
        }
    }

    fn as_sequence_validator(&self) -> Option<&dyn SequenceValidator> {
        Some(self)
    }
}

impl SequenceValidator for Unique {
    fn exhausts_sequences(&self) -> bool {
        self.exhaust_sequences
    }

    fn wrap_sequence(&self, sequence: Sequence, target: &ValidationTarget) -> Sequence {
        sequence.checked(UniqueCheck {
            target: target.clone(),
            seen: HashSet::new(),
        })
    }
}

struct UniqueCheck {
    target: ValidationTarget,
    seen: HashSet<Key>,
}

impl SequenceCheck for UniqueCheck {
    fn observe(&mut self, value: &Value) -> Result<(), EnforceError> {
        let key = element_key(value, &self.target)?;
        if self.seen.insert(key) {
            Ok(())
        } else {
            Err(duplicate_error(&self.target).into())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
