//! Non-emptiness validator

use crate::foundation::{
    Capability, EnforceError, IncompatibleTypeError, Sequence, SequenceCheck, SequenceValidator,
    ValidationError, ValidationTarget, Validator, Value,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// NOT EMPTY
// ============================================================================

/// Rejects empty strings, lists and maps.
///
/// Requires the "has size" capability; any other concrete value is a type
/// incompatibility. On a lazy sequence the verdict comes at end-of-stream,
/// because emptiness is only known once the source reports its end, unless
/// [`eager`](NotEmpty::eager) asks for the sequence to be drained first.
///
/// # Examples
///
/// ```
/// use enforce::foundation::{Validator, ValidationTarget, Value};
/// use enforce::validators::NotEmpty;
///
/// let target = ValidationTarget::new("greet", "name");
/// assert!(NotEmpty::new().validate(&Value::from("Alice"), &target).is_ok());
/// assert!(NotEmpty::new().validate(&Value::from(""), &target).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotEmpty {
    exhaust_sequences: bool,
}

impl NotEmpty {
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

/// Creates a [`NotEmpty`] validator that checks lazy input incrementally.
pub const fn not_empty() -> NotEmpty {
    NotEmpty::new()
}

fn empty_error(target: &ValidationTarget) -> ValidationError {
    ValidationError::new(
        "not_empty",
        format!(
            "Parameter '{}' cannot be empty for function '{}'.",
            target.parameter(),
            target.function()
        ),
        target,
    )
}

impl Validator for NotEmpty {
    fn name(&self) -> &str {
        "NotEmpty"
    }

    fn validate(&self, value: &Value, target: &ValidationTarget) -> Result<(), EnforceError> {
        let size = value.size().ok_or_else(|| {
            IncompatibleTypeError::new("NotEmpty", Capability::Sized, value.type_name(), target)
        })?;

        if size == 0 {
            return Err(empty_error(target).into());
        }
        Ok(())
    }

    fn as_sequence_validator(&self) -> Option<&dyn SequenceValidator> {
        Some(self)
    }
}

impl SequenceValidator for NotEmpty {
    fn exhausts_sequences(&self) -> bool {
        self.exhaust_sequences
    }

    fn wrap_sequence(&self, sequence: Sequence, target: &ValidationTarget) -> Sequence {
        sequence.checked(NonEmptyCheck {
            target: target.clone(),
            seen_any: false,
        })
    }
}

struct NonEmptyCheck {
    target: ValidationTarget,
    seen_any: bool,
}

impl SequenceCheck for NonEmptyCheck {
    fn observe(&mut self, _value: &Value) -> Result<(), EnforceError> {
        self.seen_any = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EnforceError> {
        if self.seen_any {
            Ok(())
        } else {
            Err(empty_error(&self.target).into())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
