//! Dynamic argument values
//!
//! Arguments are bound by parameter name from a declaration rather than by
//! native Rust types, so they travel through binding and validation as a
//! [`Value`]. Validators never probe a value structurally; they ask for a
//! capability ([`Value::size`], [`Value::hash_key`]) and report an
//! incompatibility when it is absent.

use super::sequence::Sequence;
use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

// Integral floats inside this range share a hash key with the equal integer.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

// ============================================================================
// VALUE
// ============================================================================

/// A call-time argument value.
///
/// Everything except [`Value::Seq`] is concrete: already materialized,
/// re-iterable and cloneable through [`Value::try_clone`]. A `Seq` is a
/// pull-based, single-consumer [`Sequence`].
///
/// Numbers compare by numeric value, so `Int(1)`, `Float(1.0)` and
/// `Bool(true)` are equal. Lazy sequences are never equal to anything.
#[derive(Debug)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string; its size is counted in characters.
    Str(String),
    /// An ordered, materialized sequence.
    List(Vec<Value>),
    /// A mapping with insertion-ordered string keys.
    Map(IndexMap<String, Value>),
    /// A lazy, pull-based sequence.
    Seq(Sequence),
}

/// Hashable projection of a [`Value`], used for equality-based deduplication.
///
/// Booleans and integral floats project onto [`Key::Int`] so that equal
/// numbers share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// `null`.
    Null,
    /// Any number with an integral value, booleans included.
    Int(i64),
    /// Bit pattern of a non-integral float.
    Float(u64),
    /// A string.
    Str(String),
}

impl Value {
    /// Creates a lazy sequence value from any sendable iterator.
    pub fn seq<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Into<Value>,
    {
        Self::Seq(Sequence::new(iter))
    }

    /// Short name of the runtime shape, used in incompatibility reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Seq(_) => "sequence",
        }
    }

    /// Returns true for a lazy sequence.
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// The "has size" capability: `Some(len)` for strings, lists and maps.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            Self::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// The "supports equality-based deduplication" capability.
    ///
    /// Returns `None` for containers, lazy sequences and `NaN`, which never
    /// equals itself.
    pub fn hash_key(&self) -> Option<Key> {
        match self {
            Self::Null => Some(Key::Null),
            Self::Bool(b) => Some(Key::Int(i64::from(*b))),
            Self::Int(i) => Some(Key::Int(*i)),
            Self::Float(f) if f.is_nan() => None,
            Self::Float(f) if f.fract() == 0.0 && *f >= I64_LOWER && *f < I64_UPPER => {
                Some(Key::Int(*f as i64))
            }
            Self::Float(f) => Some(Key::Float(f.to_bits())),
            Self::Str(s) => Some(Key::Str(s.clone())),
            Self::List(_) | Self::Map(_) | Self::Seq(_) => None,
        }
    }

    /// Clones a concrete value. Lazy sequences, at any depth, cannot be cloned.
    pub fn try_clone(&self) -> Option<Self> {
        Some(match self {
            Self::Null => Self::Null,
            Self::Bool(b) => Self::Bool(*b),
            Self::Int(i) => Self::Int(*i),
            Self::Float(f) => Self::Float(*f),
            Self::Str(s) => Self::Str(s.clone()),
            Self::List(items) => Self::List(
                items
                    .iter()
                    .map(Value::try_clone)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Map(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| v.try_clone().map(|v| (k.clone(), v)))
                    .collect::<Option<IndexMap<_, _>>>()?,
            ),
            Self::Seq(_) => return None,
        })
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns floats as-is and widens integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Turns a list or a lazy sequence into a pull-based [`Sequence`], so a
    /// function body can consume either shape the same way.
    ///
    /// Any other value is handed back unchanged.
    pub fn into_sequence(self) -> Result<Sequence, Self> {
        match self {
            Self::Seq(sequence) => Ok(sequence),
            Self::List(items) => Ok(Sequence::new(items)),
            other => Err(other),
        }
    }

    const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_)
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (a, b) if a.is_scalar() && b.is_scalar() => match (a.hash_key(), b.hash_key()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Seq(_) => f.write_str("<sequence>"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Seq(_) => Err(S::Error::custom("lazy sequences cannot be serialized")),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    char => Str,
    Sequence => Seq,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
