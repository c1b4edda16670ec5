//! Prelude module for convenient imports.
//!
//! `use enforce::prelude::*;` brings in everything needed to declare a
//! signature, wrap a function body and inspect its errors.

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    BindError, Capability, EnforceError, EnforceResult, IncompatibleTypeError, Sequence,
    SequenceCheck, SequenceValidator, ValidationError, ValidationErrors, ValidationTarget,
    Validator, Value,
};

// ============================================================================
// DECLARATION AND ENFORCEMENT
// ============================================================================

pub use crate::args;
pub use crate::config::{EnforceConfig, FailureMode};
pub use crate::enforce::{Enforced, enforce};
pub use crate::signature::{
    BoundArguments, CallArgs, Param, ParamKind, Signature, SignatureError, TypeHint,
};

// ============================================================================
// VALIDATORS
// ============================================================================

pub use crate::validators::{NotEmpty, Unique, from_fn, not_empty, unique};
