//! Argument binding
//!
//! Maps a call's positional and keyword arguments onto a [`Signature`],
//! filling omitted parameters from their defaults. The result is a
//! [`BoundArguments`] holding one value per declared parameter, in
//! declaration order.

use super::{ParamKind, Signature};
use crate::foundation::{BindError, Sequence, Value};
use indexmap::IndexMap;
use std::sync::Arc;

// ============================================================================
// CALL ARGUMENTS
// ============================================================================

/// The arguments of one call, before binding.
///
/// Usually built with the [`args!`](crate::args) macro.
#[derive(Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.push_arg(value);
        self
    }

    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_kwarg(name, value);
        self
    }

    pub fn push_arg(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Sets a keyword argument, replacing an earlier one of the same name.
    pub fn insert_kwarg(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.keyword.insert(name.into(), value.into());
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &IndexMap<String, Value> {
        &self.keyword
    }
}

// ============================================================================
// BOUND ARGUMENTS
// ============================================================================

/// Parameter name to value, one entry per declared parameter.
///
/// The pipeline replaces lazy values in place with their wrapped or
/// materialized forms; the function body then reads or takes them by name.
#[derive(Debug, Default)]
pub struct BoundArguments {
    values: IndexMap<Arc<str>, Value>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Removes a value, handing ownership to the caller.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    /// Swaps in a new value for an existing parameter and returns the old one.
    ///
    /// Does nothing and returns `None` for an unknown name.
    pub fn replace(&mut self, name: &str, value: Value) -> Option<Value> {
        self.values
            .get_mut(name)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Takes a list or lazy argument as a pull-based [`Sequence`].
    ///
    /// Returns `None`, leaving the argument in place, when the parameter is
    /// unknown or holds some other kind of value.
    pub fn sequence(&mut self, name: &str) -> Option<Sequence> {
        let slot = self.values.get_mut(name)?;
        match std::mem::replace(slot, Value::Null).into_sequence() {
            Ok(sequence) => {
                self.values.shift_remove(name);
                Some(sequence)
            }
            Err(original) => {
                *slot = original;
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (&**name, value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<Arc<str>, Value> {
        self.values
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// Binds a call's arguments to `signature`.
///
/// Follows the usual rules for positional, keyword and variadic parameters:
/// surplus positional arguments go to the `*args` parameter and unknown
/// keywords to the `**kwargs` parameter, or are rejected when there is none.
///
/// # Errors
///
/// Returns a [`BindError`] when the arguments do not fit the signature.
pub fn bind(signature: &Signature, args: CallArgs) -> Result<BoundArguments, BindError> {
    let function = signature.name_arc();
    let params = signature.params();
    let has_var_positional = params.iter().any(|p| p.kind() == ParamKind::VarPositional);
    let has_var_keyword = params.iter().any(|p| p.kind() == ParamKind::VarKeyword);

    let capacity = params.iter().filter(|p| p.kind().is_positional()).count();
    let given = args.positional.len();
    if !has_var_positional && given > capacity {
        return Err(BindError::TooManyPositional {
            function: Arc::clone(function),
            expected: capacity,
            given,
        });
    }

    let mut positional = args.positional.into_iter();
    let mut keyword = args.keyword;
    let mut values = IndexMap::with_capacity(params.len());

    for param in params {
        let name = param.name_arc();
        let missing = || BindError::MissingArgument {
            function: Arc::clone(function),
            parameter: Arc::clone(name),
        };

        let value = match param.kind() {
            kind @ (ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword) => {
                if let Some(value) = positional.next() {
                    if kind == ParamKind::PositionalOrKeyword && keyword.contains_key(&**name) {
                        return Err(BindError::MultipleValues {
                            function: Arc::clone(function),
                            parameter: Arc::clone(name),
                        });
                    }
                    value
                } else if kind == ParamKind::PositionalOrKeyword {
                    match keyword.shift_remove(&**name) {
                        Some(value) => value,
                        None => param.default_value().ok_or_else(missing)?,
                    }
                } else if keyword.contains_key(&**name) && !has_var_keyword {
                    return Err(BindError::PositionalOnlyByKeyword {
                        function: Arc::clone(function),
                        parameter: Arc::clone(name),
                    });
                } else {
                    param.default_value().ok_or_else(missing)?
                }
            }
            ParamKind::VarPositional => Value::List(positional.by_ref().collect()),
            ParamKind::KeywordOnly => match keyword.shift_remove(&**name) {
                Some(value) => value,
                None => param.default_value().ok_or_else(missing)?,
            },
            ParamKind::VarKeyword => Value::Map(std::mem::take(&mut keyword)),
        };
        values.insert(Arc::clone(name), value);
    }

    if let Some(leftover) = keyword.into_keys().next() {
        let positional_only = params
            .iter()
            .find(|p| p.kind() == ParamKind::PositionalOnly && p.name() == leftover);
        return Err(match positional_only {
            Some(param) => BindError::PositionalOnlyByKeyword {
                function: Arc::clone(function),
                parameter: Arc::clone(param.name_arc()),
            },
            None => BindError::UnexpectedKeyword {
                function: Arc::clone(function),
                keyword: leftover,
            },
        });
    }

    Ok(BoundArguments { values })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Param;
    use pretty_assertions::assert_eq;

    fn signature() -> Signature {
        Signature::builder("f")
            .param(Param::positional_only("a"))
            .param(Param::new("b").with_default(2))
            .param(Param::keyword_only("c").with_default("c"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_binds_positionally_with_defaults() {
        let bound = bind(&signature(), CallArgs::new().arg(1)).unwrap();
        let names: Vec<_> = bound.names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(bound.get("a"), Some(&Value::from(1)));
        assert_eq!(bound.get("b"), Some(&Value::from(2)));
        assert_eq!(bound.get("c"), Some(&Value::from("c")));
    }

    #[test]
    fn test_binds_keywords() {
        let args = CallArgs::new().arg(1).kwarg("c", "x").kwarg("b", 5);
        let bound = bind(&signature(), args).unwrap();
        assert_eq!(bound.get("b"), Some(&Value::from(5)));
        assert_eq!(bound.get("c"), Some(&Value::from("x")));
    }

    #[test]
    fn test_missing_argument() {
        let err = bind(&signature(), CallArgs::new()).unwrap_err();
        assert_eq!(err.to_string(), "f() missing required argument: 'a'");
    }

    #[test]
    fn test_too_many_positional() {
        let err = bind(&signature(), CallArgs::new().arg(1).arg(2).arg(3)).unwrap_err();
        assert_eq!(
            err,
            BindError::TooManyPositional {
                function: "f".into(),
                expected: 2,
                given: 3
            }
        );
    }

    #[test]
    fn test_multiple_values() {
        let err = bind(&signature(), CallArgs::new().arg(1).arg(2).kwarg("b", 3)).unwrap_err();
        assert!(matches!(err, BindError::MultipleValues { .. }));
    }

    #[test]
    fn test_positional_only_by_keyword() {
        let err = bind(&signature(), CallArgs::new().kwarg("a", 1)).unwrap_err();
        assert!(matches!(err, BindError::PositionalOnlyByKeyword { .. }));

        let err = bind(&signature(), CallArgs::new().arg(1).kwarg("a", 1)).unwrap_err();
        assert!(matches!(err, BindError::PositionalOnlyByKeyword { .. }));
    }

    #[test]
    fn test_unexpected_keyword() {
        let err = bind(&signature(), CallArgs::new().arg(1).kwarg("z", 0)).unwrap_err();
        assert_eq!(err.to_string(), "f() got an unexpected keyword argument 'z'");
    }

    #[test]
    fn test_variadics_collect_surplus() {
        let signature = Signature::builder("g")
            .param(Param::positional_only("a"))
            .param(Param::var_positional("rest"))
            .param(Param::var_keyword("extra"))
            .build()
            .unwrap();
        let args = CallArgs::new().arg(1).arg(2).arg(3).kwarg("a", 4).kwarg("z", 5);
        let bound = bind(&signature, args).unwrap();
        assert_eq!(bound.get("rest"), Some(&Value::from(vec![2, 3])));
        let extra = bound.get("extra").and_then(Value::as_map).unwrap();
        let keys: Vec<_> = extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "z"]);
    }

    #[test]
    fn test_empty_variadics() {
        let signature = Signature::builder("g")
            .param(Param::var_positional("rest"))
            .param(Param::var_keyword("extra"))
            .build()
            .unwrap();
        let bound = bind(&signature, CallArgs::new()).unwrap();
        assert_eq!(bound.get("rest"), Some(&Value::List(Vec::new())));
        assert_eq!(bound.get("extra"), Some(&Value::Map(IndexMap::new())));
    }

    #[test]
    fn test_sequence_accessor() {
        let signature = Signature::builder("h")
            .param(Param::new("items"))
            .param(Param::new("n"))
            .build()
            .unwrap();
        let args = CallArgs::new().arg(vec![1, 2, 3]).arg(7);
        let mut bound = bind(&signature, args).unwrap();

        assert!(bound.sequence("n").is_none());
        assert_eq!(bound.get("n"), Some(&Value::from(7)));

        let total: i64 = bound
            .sequence("items")
            .unwrap()
            .map(|item| item.unwrap().as_int().unwrap())
            .sum();
        assert_eq!(total, 6);
        assert!(bound.get("items").is_none());
    }

    #[test]
    fn test_replace_and_take() {
        let mut bound = bind(&signature(), CallArgs::new().arg(1)).unwrap();
        assert_eq!(bound.replace("a", Value::from(9)), Some(Value::from(1)));
        assert_eq!(bound.replace("zzz", Value::from(9)), None);
        assert_eq!(bound.take("a"), Some(Value::from(9)));
        assert_eq!(bound.len(), 2);
    }
}
