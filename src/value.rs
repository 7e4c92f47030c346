//! Dynamically shaped values flowing through the coders
//!
//! [`Value`] is the language-native side of the codec: encode consumes a
//! `Value` tree whose shape matches the coder tree, and decode produces one.
//!
//! Sequence-like input comes in two explicitly distinct forms, so that no
//! coder ever has to guess from runtime shape which branch a value takes:
//!   * [`Value::Vector`] holds one `Value` per element
//!   * [`Value::Bytes`] holds pre-serialized raw bytes, accepted by vectors of
//!     the raw `byte` kind and by heap-bytes coders
//!
//! A decoded vector is always a [`Value::Vector`]; [`Value::to_byte_vec`]
//! recovers the raw bytes from either form.

use crate::fixed::{B256, B512};
use num_bigint::BigUint;

#[cfg(feature = "serde_impls")]
use serde::Serialize;

/// A value of some declared ABI type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_impls", derive(Serialize))]
pub enum Value {
    /// Zero-width value, the payload of payload-less variants
    Unit,
    Bool(bool),
    /// Raw unpadded byte
    Byte(u8),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Unsigned integer of at most 256 bits
    U256(BigUint),
    B256(B256),
    B512(B512),
    /// Text, for both fixed-width and heap strings
    String(String),
    /// Raw byte input for byte vectors and heap bytes
    Bytes(Vec<u8>),
    /// Fixed-count homogeneous array
    Array(Vec<Value>),
    /// Positional heterogeneous tuple
    Tuple(Vec<Value>),
    /// Named fields; order need not match the declaration when encoding
    Struct(Vec<(String, Value)>),
    /// Present or absent value of an option type
    Option(Option<Box<Value>>),
    /// Active variant of an enum type, identified by name
    Enum { variant: String, value: Box<Value> },
    /// Variable-count sequence of elements
    Vector(Vec<Value>),
}

impl Value {
    /// Constructs a present option value
    #[must_use]
    pub fn some(value: Value) -> Self {
        Value::Option(Some(Box::new(value)))
    }

    /// Constructs an absent option value
    #[must_use]
    pub const fn none() -> Self {
        Value::Option(None)
    }

    /// Constructs an enum value for the variant named `variant`
    #[must_use]
    pub fn variant(variant: impl Into<String>, value: Value) -> Self {
        Value::Enum {
            variant: variant.into(),
            value: Box::new(value),
        }
    }

    /// Constructs a struct value from `(name, value)` pairs
    #[must_use]
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Short name of this value's kind, used in error reports
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U256(_) => "u256",
            Value::B256(_) => "b256",
            Value::B512(_) => "b512",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
            Value::Option(_) => "option",
            Value::Enum { .. } => "enum",
            Value::Vector(_) => "vector",
        }
    }

    /// Returns the numeric magnitude of any unsigned-integer value
    #[must_use]
    pub fn to_biguint(&self) -> Option<BigUint> {
        match self {
            Value::U8(n) | Value::Byte(n) => Some(BigUint::from(*n)),
            Value::U16(n) => Some(BigUint::from(*n)),
            Value::U32(n) => Some(BigUint::from(*n)),
            Value::U64(n) => Some(BigUint::from(*n)),
            Value::U256(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// Looks up a struct field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Recovers raw bytes from either a [`Value::Bytes`] or a
    /// [`Value::Vector`] whose elements are all [`Value::Byte`].
    #[must_use]
    pub fn to_byte_vec(&self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(raw) => Some(raw.clone()),
            Value::Vector(items) => items
                .iter()
                .map(|item| match item {
                    Value::Byte(b) => Some(*b),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ( $( $src:ty => $variant:ident ),+ $(,)? ) => {
        $(
            impl From<$src> for Value {
                fn from(val: $src) -> Self {
                    Value::$variant(val.into())
                }
            }
        )+
    };
}

value_from! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    BigUint => U256,
    B256 => B256,
    B512 => B512,
    String => String,
    &str => String,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Self {
        Value::Option(val.map(|v| Box::new(v.into())))
    }
}
