//! Tagged unions: enums and options
//!
//! An [`EnumCoder`] writes one discriminant word holding the index of the
//! active variant, followed by that variant's payload. How much room the
//! payload takes is governed by the coder's [`UnionLayout`]:
//!
//!   * [`UnionLayout::Padded`] reserves a region as wide as the widest variant
//!     and left-pads narrower payloads with zeros, so every value of the union
//!     has the same footprint
//!   * [`UnionLayout::Packed`] writes only the active payload
//!
//! [`OptionCoder`] is the two-variant special case, with discriminant `0` for
//! an absent value and `1` for a present one.

use crate::bignum::{read_u64, write_u64};
use crate::coder::Coder;
use crate::constants::WORD_SIZE;
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeResult, EncodeError, EncodeResult, TagError};
use crate::parse;
use crate::value::Value;

/// Payload sizing policy of a tagged union
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UnionLayout {
    /// Payload region sized for the widest variant
    #[default]
    Padded,
    /// Only the active variant is written
    Packed,
}

/// Coder for an N-variant tagged union
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumCoder {
    name: String,
    variants: Vec<(String, Coder)>,
    layout: UnionLayout,
    region: usize,
}

impl EnumCoder {
    /// Constructs a padded enum coder named `name` over `variants`, whose
    /// discriminants are their positions in declaration order.
    #[must_use]
    pub fn new<N, V, I>(name: N, variants: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, Coder)>,
    {
        let variants: Vec<(String, Coder)> = variants
            .into_iter()
            .map(|(v, coder)| (v.into(), coder))
            .collect();
        let region = variants
            .iter()
            .map(|(_, coder)| coder.encoded_length())
            .max()
            .unwrap_or(0);
        Self {
            name: name.into(),
            variants,
            layout: UnionLayout::default(),
            region,
        }
    }

    #[must_use]
    pub fn with_layout(self, layout: UnionLayout) -> Self {
        Self { layout, ..self }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn variants(&self) -> &[(String, Coder)] {
        &self.variants
    }

    #[must_use]
    pub const fn layout(&self) -> UnionLayout {
        self.layout
    }

    /// Returns the discriminant of the variant named `variant`, if any
    #[must_use]
    pub fn index_of(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|(v, _)| v == variant)
    }

    fn padding_for(&self, coder: &Coder) -> usize {
        match self.layout {
            UnionLayout::Padded => self.region.saturating_sub(coder.encoded_length()),
            UnionLayout::Packed => 0,
        }
    }

    /// Writes the discriminant `index` followed by `value` under the
    /// corresponding variant coder.
    pub(crate) fn write_variant<U: Target>(
        &self,
        index: usize,
        value: &Value,
        buf: &mut U,
    ) -> EncodeResult<usize> {
        let (_, coder) = &self.variants[index];
        let tag = write_u64(buf, index as u64);
        let pad = buf.push_zeros(self.padding_for(coder));
        Ok(tag + pad + coder.write_to(value, buf)?)
    }

    /// Reads a discriminant and the payload it selects, returning the
    /// variant index alongside the payload value.
    pub(crate) fn decode_variant(
        &self,
        data: &[u8],
        offset: usize,
    ) -> DecodeResult<(usize, Value, usize)> {
        let (tag, start) = read_u64(data, offset)?;
        let index = usize::try_from(tag)
            .ok()
            .filter(|&ix| ix < self.variants.len())
            .ok_or_else(|| TagError::new(tag, self.variants.len(), self.name.as_str()))?;
        let (_, coder) = &self.variants[index];
        let start = parse::skip_padding(data, start, self.padding_for(coder))?;
        let (value, end) = coder.decode(data, start)?;
        Ok((index, value, end))
    }
}

impl Estimable for EnumCoder {
    fn encoded_length(&self) -> usize {
        WORD_SIZE + self.region
    }

    fn known_length(&self) -> Option<usize> {
        let mut lens = self.variants.iter().map(|(_, coder)| coder.known_length());
        match self.layout {
            UnionLayout::Padded => lens
                .try_fold(0, |acc: usize, len| Some(acc.max(len?)))
                .map(|region| WORD_SIZE + region),
            UnionLayout::Packed => {
                let first = lens.next().unwrap_or(Some(0))?;
                lens.all(|len| len == Some(first))
                    .then_some(WORD_SIZE + first)
            }
        }
    }
}

impl Encode for EnumCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match value {
            Value::Enum { variant, value } => {
                let index = self
                    .index_of(variant)
                    .ok_or_else(|| EncodeError::UnknownVariant {
                        variant: variant.clone(),
                        for_type: self.name.clone(),
                    })?;
                self.write_variant(index, value, buf)
            }
            other => Err(EncodeError::TypeMismatch {
                expected: self.name.clone(),
                found: other.kind(),
            }),
        }
    }
}

impl Decode for EnumCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (index, value, end) = self.decode_variant(data, offset)?;
        Ok((Value::variant(self.variants[index].0.clone(), value), end))
    }
}

const NONE: usize = 0;
const SOME: usize = 1;

/// Coder for `Option<T>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionCoder {
    repr: EnumCoder,
}

impl OptionCoder {
    /// Constructs a padded option coder whose present variant holds `inner`.
    #[must_use]
    pub fn new(inner: Coder) -> Self {
        let name = format!("Option<{}>", inner);
        Self {
            repr: EnumCoder::new(name, [("None", Coder::unit()), ("Some", inner)]),
        }
    }

    #[must_use]
    pub fn with_layout(self, layout: UnionLayout) -> Self {
        Self {
            repr: self.repr.with_layout(layout),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &Coder {
        &self.repr.variants[SOME].1
    }

    #[must_use]
    pub const fn layout(&self) -> UnionLayout {
        self.repr.layout
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.repr.name()
    }
}

impl Estimable for OptionCoder {
    fn encoded_length(&self) -> usize {
        self.repr.encoded_length()
    }

    fn known_length(&self) -> Option<usize> {
        self.repr.known_length()
    }
}

impl Encode for OptionCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match value {
            Value::Option(None) => self.repr.write_variant(NONE, &Value::Unit, buf),
            Value::Option(Some(inner)) => self.repr.write_variant(SOME, inner, buf),
            other => Err(EncodeError::TypeMismatch {
                expected: self.repr.name.clone(),
                found: other.kind(),
            }),
        }
    }
}

impl Decode for OptionCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        match self.repr.decode_variant(data, offset)? {
            (NONE, _, end) => Ok((Value::none(), end)),
            (_, inner, end) => Ok((Value::some(inner), end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn shape() -> EnumCoder {
        EnumCoder::new(
            "Shape",
            [
                ("Empty", Coder::unit()),
                ("Dot", Coder::u8()),
                ("Hash", Coder::b256()),
            ],
        )
    }

    #[test]
    fn option_absent_and_present() {
        let coder = OptionCoder::new(Coder::u32());
        assert_eq!(coder.encoded_length(), 16);
        assert_eq!(coder.known_length(), Some(16));

        let none = coder.encode(&Value::none()).unwrap();
        assert_eq!(none, vec![0u8; 16]);
        assert_eq!(coder.decode(&none, 0).unwrap(), (Value::none(), 16));

        let some = coder.encode(&Value::some(Value::U32(7))).unwrap();
        assert_eq!(
            some,
            hex::decode("00000000000000010000000000000007").unwrap()
        );
        assert_eq!(coder.decode(&some, 0).unwrap(), (Value::some(Value::U32(7)), 16));
    }

    #[test]
    fn option_discriminant_out_of_range() {
        let coder = OptionCoder::new(Coder::u8());
        let bytes = hex::decode("00000000000000050000000000000000").unwrap();
        match coder.decode(&bytes, 0) {
            Err(DecodeError::InvalidDiscriminant(err)) => {
                assert_eq!(err.actual(), 5);
                assert_eq!(err.variants(), 2);
            }
            other => panic!("expected invalid discriminant, got {:?}", other),
        }
    }

    #[test]
    fn padded_enum_has_stable_length() {
        let coder = shape();
        assert_eq!(coder.encoded_length(), 8 + 32);
        assert_eq!(coder.known_length(), Some(40));
        for value in [
            Value::variant("Empty", Value::Unit),
            Value::variant("Dot", Value::U8(3)),
            Value::variant("Hash", Value::B256([9; 32].into())),
        ] {
            let bytes = coder.encode(&value).unwrap();
            assert_eq!(bytes.len(), 40);
            assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, 40));
        }
    }

    #[test]
    fn padding_precedes_payload() {
        let bytes = shape().encode(&Value::variant("Dot", Value::U8(0xab))).unwrap();
        assert_eq!(&bytes[..8], &1u64.to_be_bytes());
        assert!(bytes[8..32].iter().all(|&b| b == 0));
        assert_eq!(&bytes[32..], &0xabu64.to_be_bytes());
    }

    #[test]
    fn packed_enum_writes_active_variant_only() {
        let coder = shape().with_layout(UnionLayout::Packed);
        assert_eq!(coder.encoded_length(), 40);
        assert_eq!(coder.known_length(), None);
        let value = Value::variant("Dot", Value::U8(1));
        let bytes = coder.encode(&value).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, 16));

        let uniform = EnumCoder::new("Pair", [("A", Coder::u8()), ("B", Coder::u64())])
            .with_layout(UnionLayout::Packed);
        assert_eq!(uniform.known_length(), Some(16));
    }

    #[test]
    fn unknown_variant() {
        assert_eq!(
            shape().encode(&Value::variant("Circle", Value::Unit)),
            Err(EncodeError::UnknownVariant {
                variant: "Circle".into(),
                for_type: "Shape".into()
            })
        );
        assert!(matches!(
            shape().encode(&Value::none()),
            Err(EncodeError::TypeMismatch { found: "option", .. })
        ));
    }

    #[test]
    fn payload_errors_propagate() {
        let bytes = hex::decode(concat!(
            "0000000000000001",
            "000000000000000000000000000000000000000000000000",
            "0000000000000100",
        ))
        .unwrap();
        assert_eq!(
            shape().decode(&bytes, 0),
            Err(DecodeError::OutOfRange { kind: "u8", value: 256 })
        );
        assert!(matches!(
            shape().decode(&bytes[..20], 0),
            Err(DecodeError::BufferTooShort { .. })
        ));
    }

    #[cfg(feature = "check_padding")]
    #[test]
    fn dirty_padding_rejected() {
        let mut bytes = shape().encode(&Value::variant("Dot", Value::U8(1))).unwrap();
        bytes[10] = 0xff;
        assert_eq!(
            shape().decode(&bytes, 0),
            Err(DecodeError::NonNullPadding { offset: 8, len: 24 })
        );
    }
}
