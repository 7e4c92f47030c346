use crate::bignum::{BigNumberCoder, BigWidth};
use crate::constants::WORD_SIZE;
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::fixed::FixedBytes;
use crate::parse;
use crate::value::Value;

/// Leaf kinds of the type tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Zero-width `()`
    Unit,
    /// One word holding 0 or 1
    Bool,
    /// One raw byte, unpadded
    Byte,
    U8,
    U16,
    U32,
    U64,
    U256,
    B256,
    B512,
}

impl Primitive {
    /// ABI name of this kind
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Unit => "()",
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U256 => "u256",
            Primitive::B256 => "b256",
            Primitive::B512 => "b512",
        }
    }

    /// Bytes written on the wire, including left-padding to a word for the
    /// sub-word integer kinds and `bool`.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Primitive::Unit => 0,
            Primitive::Byte => 1,
            Primitive::Bool | Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 => {
                WORD_SIZE
            }
            Primitive::U256 | Primitive::B256 => 32,
            Primitive::B512 => 64,
        }
    }

    /// Largest value of a word-padded integer kind
    const fn word_max(self) -> Option<u64> {
        match self {
            Primitive::U8 => Some(u8::MAX as u64),
            Primitive::U16 => Some(u16::MAX as u64),
            Primitive::U32 => Some(u32::MAX as u64),
            _ => None,
        }
    }
}

/// Coder for a single [`Primitive`] kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveCoder {
    kind: Primitive,
}

impl PrimitiveCoder {
    #[must_use]
    pub const fn new(kind: Primitive) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(&self) -> Primitive {
        self.kind
    }

    fn mismatch(&self, value: &Value) -> EncodeError {
        EncodeError::TypeMismatch {
            expected: self.kind.name().to_owned(),
            found: value.kind(),
        }
    }

    /// Writes a `u8`/`u16`/`u32` value left-padded into a single word
    fn write_padded<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        let max = self.kind.word_max().unwrap_or(u64::MAX);
        let n: u64 = match *value {
            Value::U8(n) | Value::Byte(n) => n.into(),
            Value::U16(n) => n.into(),
            Value::U32(n) => n.into(),
            Value::U64(n) => n,
            Value::U256(ref n) => u64::try_from(n).map_err(|_| EncodeError::Overflow {
                kind: self.kind.name(),
                value: n.to_string(),
            })?,
            _ => return Err(self.mismatch(value)),
        };
        if n > max {
            return Err(EncodeError::Overflow {
                kind: self.kind.name(),
                value: n.to_string(),
            });
        }
        Ok(buf.push_many(n.to_be_bytes()))
    }
}

impl Estimable for PrimitiveCoder {
    fn encoded_length(&self) -> usize {
        self.kind.size()
    }

    fn known_length(&self) -> Option<usize> {
        Some(self.kind.size())
    }
}

impl Encode for PrimitiveCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match (self.kind, value) {
            (Primitive::Unit, Value::Unit) => Ok(0),
            (Primitive::Bool, Value::Bool(b)) => Ok(buf.push_many(u64::from(*b).to_be_bytes())),
            (Primitive::Byte, Value::Byte(b) | Value::U8(b)) => Ok(buf.push_one(*b)),
            (Primitive::U8 | Primitive::U16 | Primitive::U32, _) => self.write_padded(value, buf),
            (Primitive::U64, _) => BigNumberCoder::new(BigWidth::U64).write_to(value, buf),
            (Primitive::U256, _) => BigNumberCoder::new(BigWidth::U256).write_to(value, buf),
            (Primitive::B256, Value::B256(b)) => Ok(buf.push_all(b.bytes())),
            (Primitive::B512, Value::B512(b)) => Ok(buf.push_all(b.bytes())),
            _ => Err(self.mismatch(value)),
        }
    }
}

impl Decode for PrimitiveCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        match self.kind {
            Primitive::Unit => Ok((Value::Unit, offset)),
            Primitive::Bool => match parse::take_word(data, offset)? {
                (0, end) => Ok((Value::Bool(false), end)),
                (1, end) => Ok((Value::Bool(true), end)),
                (other, _) => Err(DecodeError::InvalidBoolean(other)),
            },
            Primitive::Byte => {
                let ([b], end) = parse::take_fixed::<1>(data, offset)?;
                Ok((Value::Byte(b), end))
            }
            Primitive::U8 | Primitive::U16 | Primitive::U32 => {
                let (n, end) = parse::take_word(data, offset)?;
                let out_of_range = || DecodeError::OutOfRange {
                    kind: self.kind.name(),
                    value: n,
                };
                let value = match self.kind {
                    Primitive::U8 => Value::U8(u8::try_from(n).map_err(|_| out_of_range())?),
                    Primitive::U16 => Value::U16(u16::try_from(n).map_err(|_| out_of_range())?),
                    _ => Value::U32(u32::try_from(n).map_err(|_| out_of_range())?),
                };
                Ok((value, end))
            }
            Primitive::U64 => BigNumberCoder::new(BigWidth::U64).decode(data, offset),
            Primitive::U256 => BigNumberCoder::new(BigWidth::U256).decode(data, offset),
            Primitive::B256 => {
                let (arr, end) = parse::take_fixed::<32>(data, offset)?;
                Ok((Value::B256(FixedBytes::from_array(arr)), end))
            }
            Primitive::B512 => {
                let (arr, end) = parse::take_fixed::<64>(data, offset)?;
                Ok((Value::B512(FixedBytes::from_array(arr)), end))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn check(kind: Primitive, value: Value, hex_enc: &str) {
        let coder = PrimitiveCoder::new(kind);
        let bytes = hex::decode(hex_enc).unwrap();
        assert_eq!(coder.encode(&value).unwrap(), bytes);
        assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, bytes.len()));
        assert_eq!(bytes.len(), coder.encoded_length());
    }

    #[test]
    fn word_padded_integers() {
        check(Primitive::U8, Value::U8(0x2a), "000000000000002a");
        check(Primitive::U16, Value::U16(0xbeef), "000000000000beef");
        check(Primitive::U32, Value::U32(0xdeadbeef), "00000000deadbeef");
        check(Primitive::U64, Value::U64(1), "0000000000000001");
    }

    #[test]
    fn booleans() {
        check(Primitive::Bool, Value::Bool(true), "0000000000000001");
        check(Primitive::Bool, Value::Bool(false), "0000000000000000");
        let coder = PrimitiveCoder::new(Primitive::Bool);
        assert_eq!(
            coder.decode(&hex::decode("0000000000000002").unwrap(), 0),
            Err(DecodeError::InvalidBoolean(2))
        );
    }

    #[test]
    fn raw_byte_unpadded() {
        check(Primitive::Byte, Value::Byte(0xff), "ff");
        check(Primitive::Unit, Value::Unit, "");
    }

    #[test]
    fn hashes() {
        let b256 = FixedBytes::from_array([0xab; 32]);
        check(Primitive::B256, Value::B256(b256), &"ab".repeat(32));
        let b512 = FixedBytes::from_array([0x01; 64]);
        check(Primitive::B512, Value::B512(b512), &"01".repeat(64));
    }

    #[test]
    fn padded_range_enforced() {
        let coder = PrimitiveCoder::new(Primitive::U8);
        assert_eq!(
            coder.decode(&hex::decode("0000000000000100").unwrap(), 0),
            Err(DecodeError::OutOfRange { kind: "u8", value: 256 })
        );
        assert!(matches!(
            coder.encode(&Value::U16(256)),
            Err(EncodeError::Overflow { kind: "u8", .. })
        ));
        assert_eq!(coder.encode(&Value::U16(255)).unwrap(), hex::decode("00000000000000ff").unwrap());
    }

    #[test]
    fn kind_mismatch() {
        let coder = PrimitiveCoder::new(Primitive::B256);
        assert_eq!(
            coder.encode(&Value::U64(0)),
            Err(EncodeError::TypeMismatch { expected: "b256".into(), found: "u64" })
        );
    }

    #[test]
    fn decode_at_offset() {
        let coder = PrimitiveCoder::new(Primitive::U16);
        let bytes = hex::decode("ff000000000000000007").unwrap();
        assert_eq!(coder.decode(&bytes, 2).unwrap(), (Value::U16(7), 10));
    }
}
