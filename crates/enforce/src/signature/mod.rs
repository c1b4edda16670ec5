//! Declaration surface
//!
//! A function's parameters are declared once, up front, with a [`Param`]
//! per parameter: its name, binding kind, informational base type and an
//! ordered list of attached [`Metadata`]. [`SignatureBuilder::build`] checks
//! the declaration and runs the metadata extractor, producing an immutable
//! [`Signature`] that every call of the enforced function shares.
//!
//! ```
//! use enforce::signature::{Param, Signature, TypeHint};
//! use enforce::validators::{NotEmpty, Unique};
//!
//! let signature = Signature::builder("dedupe")
//!     .param(Param::new("items").typed(TypeHint::List).rule(NotEmpty::new()).rule(Unique::new()))
//!     .param(Param::new("limit").typed(TypeHint::Int).with_default(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(signature.to_string(), "dedupe(items: list [NotEmpty, Unique], limit: int = 10)");
//! ```

pub mod bind;
pub mod extract;

pub use bind::{BoundArguments, CallArgs, bind};
pub use extract::{ParameterDescriptor, extract};

use crate::config::EnforceConfig;
use crate::foundation::{Validator, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// TYPE HINTS
// ============================================================================

/// Declared base type of a parameter.
///
/// Purely descriptive: it is rendered in the signature but never checked
/// at call time. Capability checks belong to validators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TypeHint {
    #[default]
    Any,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Sequence,
    Named(Cow<'static, str>),
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Named(name) => name,
        })
    }
}

// ============================================================================
// PARAMETER KINDS
// ============================================================================

/// How a parameter may be supplied by a caller.
///
/// Declaration order must follow the order of the variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    /// Only by position.
    PositionalOnly,
    /// By position or by name.
    #[default]
    PositionalOrKeyword,
    /// Collects surplus positional arguments into a list.
    VarPositional,
    /// Only by name.
    KeywordOnly,
    /// Collects surplus keyword arguments into a map.
    VarKeyword,
}

impl ParamKind {
    /// Consumes a single positional argument.
    pub const fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }

    pub const fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PositionalOnly => "positional-only",
            Self::PositionalOrKeyword => "positional-or-keyword",
            Self::VarPositional => "variadic positional",
            Self::KeywordOnly => "keyword-only",
            Self::VarKeyword => "variadic keyword",
        })
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// An item attached to a parameter's declared type.
#[derive(Debug, Clone)]
pub enum Metadata {
    /// A validation rule; kept by the extractor in declaration order.
    Rule(Arc<dyn Validator>),
    /// Descriptive metadata; ignored by the extractor.
    Note(Cow<'static, str>),
}

/// Produces a fresh default value for every call that omits the argument.
#[derive(Clone)]
pub struct DefaultValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultValue {
    pub fn produce(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultValue").field(&self.produce()).finish()
    }
}

// ============================================================================
// PARAM
// ============================================================================

/// Declaration of one parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) kind: ParamKind,
    pub(crate) declared: TypeHint,
    pub(crate) metadata: Vec<Metadata>,
    pub(crate) default: Option<DefaultValue>,
}

impl Param {
    /// A positional-or-keyword parameter of type `any` with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::default(),
            declared: TypeHint::default(),
            metadata: Vec::new(),
            default: None,
        }
    }

    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name).kind(ParamKind::PositionalOnly)
    }

    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name).kind(ParamKind::KeywordOnly)
    }

    /// `*name`: receives surplus positional arguments as a list.
    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name).kind(ParamKind::VarPositional)
    }

    /// `**name`: receives surplus keyword arguments as a map.
    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name).kind(ParamKind::VarKeyword)
    }

    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn typed(mut self, hint: TypeHint) -> Self {
        self.declared = hint;
        self
    }

    /// Attaches a validation rule after the ones already attached.
    pub fn rule<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.metadata.push(Metadata::Rule(Arc::new(validator)));
        self
    }

    /// Attaches a rule instance shared with other parameters or functions.
    pub fn shared_rule(mut self, validator: Arc<dyn Validator>) -> Self {
        self.metadata.push(Metadata::Rule(validator));
        self
    }

    /// Attaches descriptive, non-validating metadata.
    pub fn note(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.metadata.push(Metadata::Note(text.into()));
        self
    }

    /// Uses a copy of `value` whenever the argument is omitted.
    pub fn with_default<T>(mut self, value: T) -> Self
    where
        T: Into<Value> + Clone + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue(Arc::new(move || value.clone().into())));
        self
    }

    /// Calls `produce` whenever the argument is omitted, e.g. for lazy defaults.
    pub fn with_default_fn<F>(mut self, produce: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue(Arc::new(produce)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// Declaration defects, reported when the signature is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("duplicate parameter '{parameter}' in signature of '{function}'")]
    DuplicateParameter { function: Arc<str>, parameter: String },

    #[error(
        "parameter '{parameter}' of '{function}' is out of order: {kind} parameter cannot follow {previous} parameter"
    )]
    OutOfOrder {
        function: Arc<str>,
        parameter: String,
        kind: ParamKind,
        previous: ParamKind,
    },

    #[error("'{function}' declares more than one {kind} parameter ('{parameter}')")]
    DuplicateVariadic {
        function: Arc<str>,
        parameter: String,
        kind: ParamKind,
    },

    #[error("parameter '{parameter}' of '{function}' has no default but follows a parameter with one")]
    RequiredAfterDefault { function: Arc<str>, parameter: String },

    #[error("variadic parameter '{parameter}' of '{function}' cannot have a default")]
    VariadicDefault { function: Arc<str>, parameter: String },
}

/// The checked, immutable declaration of an enforced function.
#[derive(Debug, Clone)]
pub struct Signature {
    name: Arc<str>,
    params: Vec<ParameterDescriptor>,
    config: EnforceConfig,
}

impl Signature {
    pub fn builder(name: impl Into<Arc<str>>) -> SignatureBuilder {
        SignatureBuilder {
            name: name.into(),
            params: Vec::new(),
            config: EnforceConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Parameter descriptors in declaration order.
    pub fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.params.iter().find(|p| p.name() == name)
    }

    pub fn config(&self) -> &EnforceConfig {
        &self.config
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(self.params.len() + 2);
        let mut star_emitted = false;

        for (i, param) in self.params.iter().enumerate() {
            match param.kind() {
                ParamKind::VarPositional => star_emitted = true,
                ParamKind::KeywordOnly if !star_emitted => {
                    parts.push("*".to_owned());
                    star_emitted = true;
                }
                _ => {}
            }
            parts.push(param.to_string());

            let next_is_positional_only = self
                .params
                .get(i + 1)
                .is_some_and(|next| next.kind() == ParamKind::PositionalOnly);
            if param.kind() == ParamKind::PositionalOnly && !next_is_positional_only {
                parts.push("/".to_owned());
            }
        }

        write!(f, "{}({})", self.name, parts.join(", "))
    }
}

/// Collects parameter declarations for a [`Signature`].
#[derive(Debug)]
#[must_use = "builders do nothing unless built"]
pub struct SignatureBuilder {
    name: Arc<str>,
    params: Vec<Param>,
    config: EnforceConfig,
}

impl SignatureBuilder {
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn config(mut self, config: EnforceConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks the declaration and extracts each parameter's validators.
    pub fn build(self) -> Result<Signature, SignatureError> {
        let function = self.name;
        let mut names = HashSet::with_capacity(self.params.len());
        let mut previous: Option<ParamKind> = None;
        let mut saw_default = false;
        let mut params = Vec::with_capacity(self.params.len());

        for param in self.params {
            if !names.insert(param.name.clone()) {
                return Err(SignatureError::DuplicateParameter {
                    function,
                    parameter: param.name,
                });
            }

            let kind = param.kind;
            if let Some(previous) = previous {
                if kind < previous {
                    return Err(SignatureError::OutOfOrder {
                        function,
                        parameter: param.name,
                        kind,
                        previous,
                    });
                }
                if kind == previous && kind.is_variadic() {
                    return Err(SignatureError::DuplicateVariadic {
                        function,
                        parameter: param.name,
                        kind,
                    });
                }
            }

            if kind.is_variadic() && param.default.is_some() {
                return Err(SignatureError::VariadicDefault {
                    function,
                    parameter: param.name,
                });
            }

            if kind.is_positional() {
                if param.default.is_some() {
                    saw_default = true;
                } else if saw_default {
                    return Err(SignatureError::RequiredAfterDefault {
                        function,
                        parameter: param.name,
                    });
                }
            }

            previous = Some(kind);
            params.push(extract(param));
        }

        Ok(Signature {
            name: function,
            params,
            config: self.config,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{NotEmpty, Unique};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_preserves_declaration_order() {
        let signature = Signature::builder("f")
            .param(Param::new("a"))
            .param(Param::new("b"))
            .param(Param::keyword_only("c"))
            .build()
            .unwrap();
        let names: Vec<_> = signature.params().iter().map(ParameterDescriptor::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(signature.param("b").map(ParameterDescriptor::name), Some("b"));
        assert!(signature.param("z").is_none());
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let err = Signature::builder("f")
            .param(Param::new("a"))
            .param(Param::new("a"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SignatureError::DuplicateParameter { .. }));
    }

    #[test]
    fn test_kind_order_enforced() {
        let err = Signature::builder("f")
            .param(Param::keyword_only("k"))
            .param(Param::new("p"))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'p' of 'f' is out of order: positional-or-keyword parameter cannot follow keyword-only parameter"
        );
    }

    #[test]
    fn test_single_variadic_of_each_kind() {
        let err = Signature::builder("f")
            .param(Param::var_positional("a"))
            .param(Param::var_positional("b"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SignatureError::DuplicateVariadic { .. }));
    }

    #[test]
    fn test_required_after_default_rejected() {
        let err = Signature::builder("f")
            .param(Param::new("a").with_default(1))
            .param(Param::new("b"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SignatureError::RequiredAfterDefault { .. }));

        // Keyword-only parameters may be required after defaults.
        assert!(
            Signature::builder("f")
                .param(Param::new("a").with_default(1))
                .param(Param::keyword_only("b"))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_variadic_default_rejected() {
        let err = Signature::builder("f")
            .param(Param::var_keyword("rest").with_default(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SignatureError::VariadicDefault { .. }));
    }

    #[test]
    fn test_display_marks_kinds() {
        let signature = Signature::builder("f")
            .param(Param::positional_only("a").typed(TypeHint::Int))
            .param(Param::new("b").rule(NotEmpty::new()).rule(Unique::new()))
            .param(Param::keyword_only("c").with_default("x"))
            .param(Param::var_keyword("extra"))
            .build()
            .unwrap();
        assert_eq!(
            signature.to_string(),
            r#"f(a: int, /, b [NotEmpty, Unique], *, c = "x", **extra)"#
        );
    }

    #[test]
    fn test_display_var_positional_replaces_star() {
        let signature = Signature::builder("g")
            .param(Param::var_positional("items").typed(TypeHint::List))
            .param(Param::keyword_only("sep"))
            .build()
            .unwrap();
        assert_eq!(signature.to_string(), "g(*items: list, sep)");
    }

    #[test]
    fn test_defaults_are_fresh_per_call() {
        let param = Param::new("items").with_default(vec![1, 2]);
        let default = param.default.clone().unwrap();
        assert_eq!(default.produce(), Value::from(vec![1, 2]));
        assert_eq!(default.produce(), Value::from(vec![1, 2]));
    }
}
