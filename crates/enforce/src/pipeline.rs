//! Validation pipeline
//!
//! Runs each parameter's validators in declaration order against its bound
//! value. A lazy sequence is handled per validator:
//!
//! - a validator without lazy support is a type incompatibility;
//! - a validator that exhausts sequences drains the value into a list, which
//!   every later validator then sees as a concrete value;
//! - any other lazy-aware validator wraps the sequence, and wrappers stack,
//!   so every attached rule observes each pulled element.
//!
//! Concrete values are validated directly. The first failure for a
//! parameter stops that parameter's pipeline.

use crate::foundation::{
    EnforceError, IncompatibleTypeError, ValidationErrors, ValidationTarget, Value,
};
use crate::signature::{BoundArguments, ParameterDescriptor, Signature};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Validates one parameter's value, returning it in the form the function
/// body should receive.
///
/// A lazy value comes back wrapped (checks deferred to iteration) or, after
/// an exhausting validator, as a materialized list.
///
/// # Errors
///
/// The first [`EnforceError`] raised by a validator, by an incompatible
/// lazy value, or by a wrapped sequence while it is being drained.
pub fn validate_parameter(
    descriptor: &ParameterDescriptor,
    target: &ValidationTarget,
    mut value: Value,
) -> Result<Value, EnforceError> {
    for validator in descriptor.validators() {
        trace!(parameter = %target, validator = validator.name(), "running validator");

        value = match value {
            Value::Seq(sequence) => match validator.as_sequence_validator() {
                None => {
                    return Err(IncompatibleTypeError::lazy_unsupported(
                        validator.name().to_owned(),
                        target,
                    )
                    .into());
                }
                Some(lazy) if lazy.exhausts_sequences() => {
                    debug!(parameter = %target, validator = validator.name(), "draining lazy sequence");
                    let materialized = Value::List(sequence.drain()?);
                    validator.validate(&materialized, target)?;
                    materialized
                }
                Some(lazy) => {
                    debug!(parameter = %target, validator = validator.name(), "deferring to iteration");
                    Value::Seq(lazy.wrap_sequence(sequence, target))
                }
            },
            concrete => {
                validator.validate(&concrete, target)?;
                concrete
            }
        };
    }
    Ok(value)
}

/// Validates every bound argument against `signature`, replacing lazy
/// values in place.
///
/// In fail-fast mode the first failing parameter aborts the call. In
/// collect-all mode content failures are gathered across parameters, while
/// incompatibilities still abort immediately.
///
/// # Errors
///
/// [`EnforceError::Validation`] for a single content failure,
/// [`EnforceError::Multiple`] when several were collected, and
/// [`EnforceError::Incompatible`] for a declaration defect.
#[instrument(level = "debug", skip_all, fields(function = %signature.name()))]
pub fn validate_arguments(
    signature: &Signature,
    bound: &mut BoundArguments,
) -> Result<(), EnforceError> {
    let collect_all = signature.config().collects_all();
    let mut collected = ValidationErrors::new();

    for descriptor in signature.params() {
        if descriptor.validators().is_empty() {
            continue;
        }
        let Some(slot) = bound.get_mut(descriptor.name()) else {
            continue;
        };

        let target = ValidationTarget::new(
            Arc::clone(signature.name_arc()),
            Arc::clone(descriptor.name_arc()),
        );
        let value = std::mem::replace(slot, Value::Null);
        debug!(
            parameter = %target,
            validators = descriptor.validators().len(),
            lazy = value.is_lazy(),
            "validating argument"
        );

        match validate_parameter(descriptor, &target, value) {
            Ok(value) => *slot = value,
            Err(EnforceError::Validation(error)) if collect_all => {
                debug!(parameter = %target, code = %error.code, "collected validation failure");
                collected.add(error);
            }
            Err(error) => {
                debug!(parameter = %target, %error, "argument rejected");
                return Err(error);
            }
        }
    }

    if collected.len() > 1 {
        return Err(collected.into());
    }
    match collected.into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
