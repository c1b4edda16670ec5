//! Metadata extraction
//!
//! Turns a declared [`Param`] into the [`ParameterDescriptor`] the pipeline
//! consumes. Only [`Metadata::Rule`] entries survive, in declaration order;
//! notes and any other descriptive metadata are dropped here.

use super::{DefaultValue, Metadata, Param, ParamKind, TypeHint};
use crate::foundation::{Validator, Value};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Validators attached to one parameter. Two fit inline.
pub type ValidatorList = SmallVec<[Arc<dyn Validator>; 2]>;

/// A parameter as seen by the binder and the validation pipeline.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    name: Arc<str>,
    kind: ParamKind,
    declared: TypeHint,
    validators: ValidatorList,
    default: Option<DefaultValue>,
}

impl ParameterDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn declared_type(&self) -> &TypeHint {
        &self.declared
    }

    /// Validators in the order they must run.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh copy of the default, if one was declared.
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(DefaultValue::produce)
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParamKind::VarPositional => f.write_str("*")?,
            ParamKind::VarKeyword => f.write_str("**")?,
            _ => {}
        }
        f.write_str(&self.name)?;
        if self.declared != TypeHint::Any {
            write!(f, ": {}", self.declared)?;
        }
        if !self.validators.is_empty() {
            let names: Vec<&str> = self.validators.iter().map(|v| v.name()).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        if let Some(default) = self.default_value() {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// Extracts the validators attached to `param`.
///
/// A parameter with no rules yields an empty list and is passed through
/// untouched by the pipeline.
pub fn extract(param: Param) -> ParameterDescriptor {
    let validators = param
        .metadata
        .into_iter()
        .filter_map(|item| match item {
            Metadata::Rule(validator) => Some(validator),
            Metadata::Note(_) => None,
        })
        .collect();

    ParameterDescriptor {
        name: param.name.into(),
        kind: param.kind,
        declared: param.declared,
        validators,
        default: param.default,
    }
}
