//! The closed family of coders
//!
//! [`Coder`] is a tree mirroring a declared ABI type one-to-one. Each node
//! owns its children outright, and once built a tree is never mutated, so a
//! single tree can serve any number of concurrent encode and decode calls.
//!
//! Every operation is a `match` over the node kind that delegates to the
//! coder type for that kind, which in turn recurses into its children through
//! this same dispatch.

use std::fmt;

use crate::adt::{EnumCoder, OptionCoder, UnionLayout};
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeResult, EncodeResult};
use crate::prim::{Primitive, PrimitiveCoder};
use crate::schema::{BytesCoder, BytesKind, StrCoder, StructCoder, TupleCoder};
use crate::seq::{fix::ArrayCoder, vec::VecCoder};
use crate::value::Value;

/// A node in a coder tree
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Coder {
    Primitive(PrimitiveCoder),
    Array(ArrayCoder),
    Tuple(TupleCoder),
    Struct(StructCoder),
    Option(OptionCoder),
    Enum(EnumCoder),
    Vector(VecCoder),
    Str(StrCoder),
    Bytes(BytesCoder),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $e:expr) => {
        match $self {
            Coder::Primitive($c) => $e,
            Coder::Array($c) => $e,
            Coder::Tuple($c) => $e,
            Coder::Struct($c) => $e,
            Coder::Option($c) => $e,
            Coder::Enum($c) => $e,
            Coder::Vector($c) => $e,
            Coder::Str($c) => $e,
            Coder::Bytes($c) => $e,
        }
    };
}

macro_rules! primitive_ctors {
    ( $( $(#[$m:meta])* $fname:ident => $kind:ident ),+ $(,)? ) => {
        $(
            $(#[$m])*
            #[must_use]
            pub const fn $fname() -> Self {
                Coder::Primitive(PrimitiveCoder::new(Primitive::$kind))
            }
        )+
    };
}

impl Coder {
    primitive_ctors! {
        /// Zero-width `()`
        unit => Unit,
        bool => Bool,
        /// Single unpadded byte
        byte => Byte,
        u8 => U8,
        u16 => U16,
        u32 => U32,
        u64 => U64,
        u256 => U256,
        b256 => B256,
        b512 => B512,
    }

    #[must_use]
    pub fn array(element: Coder, count: usize) -> Self {
        ArrayCoder::new(element, count).into()
    }

    #[must_use]
    pub fn tuple(elements: Vec<Coder>) -> Self {
        TupleCoder::new(elements).into()
    }

    #[must_use]
    pub fn structure<N, F, I>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        F: Into<String>,
        I: IntoIterator<Item = (F, Coder)>,
    {
        StructCoder::new(name, fields).into()
    }

    /// Padded `Option<T>`
    #[must_use]
    pub fn option(inner: Coder) -> Self {
        OptionCoder::new(inner).into()
    }

    /// `Option<T>` writing no payload region for an absent value
    #[must_use]
    pub fn packed_option(inner: Coder) -> Self {
        OptionCoder::new(inner).with_layout(UnionLayout::Packed).into()
    }

    /// Padded enum
    #[must_use]
    pub fn enumeration<N, V, I>(name: N, variants: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, Coder)>,
    {
        EnumCoder::new(name, variants).into()
    }

    #[must_use]
    pub fn packed_enum<N, V, I>(name: N, variants: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, Coder)>,
    {
        EnumCoder::new(name, variants)
            .with_layout(UnionLayout::Packed)
            .into()
    }

    #[must_use]
    pub fn vector(element: Coder) -> Self {
        VecCoder::new(element).into()
    }

    /// Fixed-length `str[len]`
    #[must_use]
    pub const fn str(len: usize) -> Self {
        Coder::Str(StrCoder::new(len))
    }

    /// Heap `Bytes`
    #[must_use]
    pub const fn bytes() -> Self {
        Coder::Bytes(BytesCoder::new(BytesKind::Raw))
    }

    /// Heap `String`
    #[must_use]
    pub const fn string() -> Self {
        Coder::Bytes(BytesCoder::new(BytesKind::Utf8))
    }

    /// Returns `true` if this node is an option coder, of either layout
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Coder::Option(_))
    }
}

macro_rules! coder_from {
    ( $( $variant:ident($t:ty) ),+ $(,)? ) => {
        $(
            impl From<$t> for Coder {
                fn from(coder: $t) -> Self {
                    Coder::$variant(coder)
                }
            }
        )+
    };
}

coder_from! {
    Primitive(PrimitiveCoder),
    Array(ArrayCoder),
    Tuple(TupleCoder),
    Struct(StructCoder),
    Option(OptionCoder),
    Enum(EnumCoder),
    Vector(VecCoder),
    Str(StrCoder),
    Bytes(BytesCoder),
}

impl fmt::Display for Coder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coder::Primitive(p) => f.write_str(p.kind().name()),
            Coder::Array(a) => write!(f, "[{}; {}]", a.element(), a.count()),
            Coder::Tuple(t) => fmt::Display::fmt(t, f),
            Coder::Struct(s) => f.write_str(s.name()),
            Coder::Option(o) => f.write_str(o.name()),
            Coder::Enum(e) => f.write_str(e.name()),
            Coder::Vector(v) => write!(f, "Vec<{}>", v.element()),
            Coder::Str(s) => write!(f, "str[{}]", s.len()),
            Coder::Bytes(b) => match b.kind() {
                BytesKind::Raw => f.write_str("Bytes"),
                BytesKind::Utf8 => f.write_str("String"),
            },
        }
    }
}

impl Estimable for Coder {
    fn encoded_length(&self) -> usize {
        dispatch!(self, c => c.encoded_length())
    }

    fn known_length(&self) -> Option<usize> {
        dispatch!(self, c => c.known_length())
    }
}

impl Encode for Coder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        dispatch!(self, c => c.write_to(value, buf))
    }
}

impl Decode for Coder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        dispatch!(self, c => c.decode(data, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conv::EncodeLength;
    use crate::fixed::FixedBytes;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn coder_trees_are_shareable() {
        assert_send_sync::<Coder>();
        assert_send_sync::<Value>();
    }

    #[test]
    fn display_names() {
        let coder = Coder::tuple(vec![
            Coder::array(Coder::u8(), 4),
            Coder::vector(Coder::option(Coder::b256())),
            Coder::str(3),
            Coder::string(),
        ]);
        assert_eq!(
            coder.to_string(),
            "([u8; 4], Vec<Option<b256>>, str[3], String)"
        );
    }

    #[test]
    fn nested_call_arguments() {
        let coder = Coder::tuple(vec![
            Coder::structure(
                "Transfer",
                [
                    ("to", Coder::b256()),
                    ("amount", Coder::u64()),
                    ("memo", Coder::option(Coder::str(4))),
                ],
            ),
            Coder::vector(Coder::u16()),
            Coder::bool(),
        ]);
        let value = Value::Tuple(vec![
            Value::record([
                ("to", Value::B256(FixedBytes::from_array([0x11; 32]))),
                ("amount", Value::U64(1_000)),
                ("memo", Value::some(Value::from("gift"))),
            ]),
            Value::Vector(vec![Value::U16(1), Value::U16(2)]),
            Value::Bool(true),
        ]);
        let bytes = coder.encode(&value).unwrap();
        assert_eq!(bytes.len(), (32 + 8 + 16) + (8 + 16) + 8);
        assert_eq!(coder.enc_len(&value).unwrap(), bytes.len());
        assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, bytes.len()));
    }

    fn fixed_leaf() -> impl Strategy<Value = Coder> {
        prop_oneof![
            Just(Coder::unit()),
            Just(Coder::bool()),
            Just(Coder::byte()),
            Just(Coder::u8()),
            Just(Coder::u16()),
            Just(Coder::u32()),
            Just(Coder::u64()),
            Just(Coder::u256()),
            Just(Coder::b256()),
            Just(Coder::b512()),
            (0usize..12).prop_map(Coder::str),
        ]
    }

    fn named<I: IntoIterator<Item = Coder>>(prefix: &str, coders: I) -> Vec<(String, Coder)> {
        coders
            .into_iter()
            .enumerate()
            .map(|(ix, c)| (format!("{}{}", prefix, ix), c))
            .collect()
    }

    /// Coders whose every value has the same encoded length
    fn fixed_coder() -> impl Strategy<Value = Coder> {
        fixed_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                (inner.clone(), 0usize..4).prop_map(|(c, n)| Coder::array(c, n)),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Coder::tuple),
                prop::collection::vec(inner.clone(), 1..4)
                    .prop_map(|cs| Coder::structure("S", named("f", cs))),
                inner.clone().prop_map(Coder::option),
                prop::collection::vec(inner, 1..4)
                    .prop_map(|cs| Coder::enumeration("E", named("V", cs))),
            ]
        })
    }

    /// Vector elements: fixed-width coders, or packed options over them
    fn vector_element() -> impl Strategy<Value = Coder> {
        prop_oneof![
            3 => fixed_coder(),
            1 => fixed_coder().prop_map(Coder::packed_option),
        ]
    }

    fn any_coder() -> impl Strategy<Value = Coder> {
        let leaf = prop_oneof![
            4 => fixed_coder(),
            1 => Just(Coder::bytes()),
            1 => Just(Coder::string()),
            2 => vector_element().prop_map(Coder::vector),
        ];
        leaf.prop_recursive(2, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(Coder::tuple),
                (inner.clone(), 1usize..3).prop_map(|(c, n)| Coder::array(c, n)),
                inner.clone().prop_map(Coder::option),
                inner.clone().prop_map(Coder::packed_option),
                prop::collection::vec(inner, 1..4)
                    .prop_map(|cs| Coder::packed_enum("P", named("V", cs))),
            ]
        })
    }

    fn arb_value(coder: &Coder) -> BoxedStrategy<Value> {
        match coder {
            Coder::Primitive(p) => match p.kind() {
                Primitive::Unit => Just(Value::Unit).boxed(),
                Primitive::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
                Primitive::Byte => any::<u8>().prop_map(Value::Byte).boxed(),
                Primitive::U8 => any::<u8>().prop_map(Value::U8).boxed(),
                Primitive::U16 => any::<u16>().prop_map(Value::U16).boxed(),
                Primitive::U32 => any::<u32>().prop_map(Value::U32).boxed(),
                Primitive::U64 => any::<u64>().prop_map(Value::U64).boxed(),
                Primitive::U256 => any::<[u8; 32]>()
                    .prop_map(|b| Value::U256(BigUint::from_bytes_be(&b)))
                    .boxed(),
                Primitive::B256 => any::<[u8; 32]>()
                    .prop_map(|b| Value::B256(FixedBytes::from_array(b)))
                    .boxed(),
                Primitive::B512 => prop::collection::vec(any::<u8>(), 64)
                    .prop_map(|b| Value::B512(FixedBytes::try_from_slice(&b).unwrap()))
                    .boxed(),
            },
            Coder::Array(a) => prop::collection::vec(arb_value(a.element()), a.count())
                .prop_map(Value::Array)
                .boxed(),
            Coder::Tuple(t) => t
                .elements()
                .iter()
                .map(arb_value)
                .collect::<Vec<_>>()
                .prop_map(Value::Tuple)
                .boxed(),
            Coder::Struct(s) => {
                let names: Vec<String> = s.fields().iter().map(|(f, _)| f.clone()).collect();
                s.fields()
                    .iter()
                    .map(|(_, c)| arb_value(c))
                    .collect::<Vec<_>>()
                    .prop_map(move |vs| Value::record(names.clone().into_iter().zip(vs)))
                    .boxed()
            }
            Coder::Option(o) => prop_oneof![
                Just(Value::none()),
                arb_value(o.inner()).prop_map(Value::some),
            ]
            .boxed(),
            Coder::Enum(e) => {
                let variants = e.variants().to_vec();
                (0..variants.len())
                    .prop_flat_map(move |ix| {
                        let (name, coder) = variants[ix].clone();
                        arb_value(&coder).prop_map(move |v| Value::variant(name.clone(), v))
                    })
                    .boxed()
            }
            Coder::Vector(v) => prop::collection::vec(arb_value(v.element()), 0..5)
                .prop_map(Value::Vector)
                .boxed(),
            Coder::Str(s) => proptest::string::string_regex(&format!("[a-z]{{{}}}", s.len()))
                .unwrap()
                .prop_map(Value::String)
                .boxed(),
            Coder::Bytes(b) => match b.kind() {
                BytesKind::Raw => prop::collection::vec(any::<u8>(), 0..24)
                    .prop_map(Value::Bytes)
                    .boxed(),
                BytesKind::Utf8 => any::<String>().prop_map(Value::String).boxed(),
            },
        }
    }

    fn with_value<S: Strategy<Value = Coder>>(coders: S) -> impl Strategy<Value = (Coder, Value)> {
        coders.prop_flat_map(|coder| {
            let values = arb_value(&coder);
            (Just(coder), values)
        })
    }

    proptest! {
        #[test]
        fn round_trip((coder, value) in with_value(any_coder())) {
            let bytes = coder.encode(&value).unwrap();
            prop_assert_eq!(coder.enc_len(&value).unwrap(), bytes.len());
            prop_assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, bytes.len()));
        }

        #[test]
        fn fixed_length_determinism((coder, value) in with_value(fixed_coder())) {
            let bytes = coder.encode(&value).unwrap();
            prop_assert_eq!(coder.known_length(), Some(bytes.len()));
            prop_assert_eq!(coder.encoded_length(), bytes.len());
        }

        #[test]
        fn decode_threads_offset(
            (coder, value) in with_value(any_coder()),
            prefix in prop::collection::vec(any::<u8>(), 0..16),
        ) {
            let mut bytes = prefix.clone();
            bytes.extend(coder.encode(&value).unwrap());
            prop_assert_eq!(coder.decode(&bytes, prefix.len()).unwrap(), (value, bytes.len()));
        }
    }
}
