//! Full-word and multi-word unsigned integers
//!
//! [`BigNumberCoder`] handles the two integer kinds that occupy whole words
//! without padding: `u64` (one word) and `u256` (four words). It is also
//! the coder behind every length prefix and discriminant in the wire format,
//! via the helpers [`write_u64`] and [`read_u64`].
//!
//! 256-bit values are represented as [`BigUint`]. Any unsigned integer
//! [`Value`] may be encoded by either width, provided its magnitude fits.

use crate::constants::WORD_SIZE;
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeResult, EncodeError, EncodeResult};
use crate::parse;
use crate::value::Value;
use num_bigint::BigUint;

/// Byte-width of a `u256` value
pub const U256_SIZE: usize = 4 * WORD_SIZE;

/// Width selector for [`BigNumberCoder`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BigWidth {
    U64,
    U256,
}

impl BigWidth {
    /// Number of bytes written for this width
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            BigWidth::U64 => WORD_SIZE,
            BigWidth::U256 => U256_SIZE,
        }
    }

    /// ABI name of this width
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BigWidth::U64 => "u64",
            BigWidth::U256 => "u256",
        }
    }
}

/// Coder for one- and four-word unsigned integers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BigNumberCoder {
    width: BigWidth,
}

impl BigNumberCoder {
    #[must_use]
    pub const fn new(width: BigWidth) -> Self {
        Self { width }
    }

    #[must_use]
    pub const fn width(&self) -> BigWidth {
        self.width
    }
}

/// Appends `n` as one big-endian word.
#[inline]
pub fn write_u64<U: Target>(buf: &mut U, n: u64) -> usize {
    buf.push_many(n.to_be_bytes())
}

/// Reads one big-endian word as a `u64`.
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> DecodeResult<(u64, usize)> {
    parse::take_word(data, offset)
}

impl Estimable for BigNumberCoder {
    fn encoded_length(&self) -> usize {
        self.width.size()
    }

    fn known_length(&self) -> Option<usize> {
        Some(self.width.size())
    }
}

impl Encode for BigNumberCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match (self.width, value) {
            (BigWidth::U64, Value::U64(n)) => Ok(write_u64(buf, *n)),
            _ => {
                let n = value.to_biguint().ok_or_else(|| EncodeError::TypeMismatch {
                    expected: self.width.name().to_owned(),
                    found: value.kind(),
                })?;
                let bytes = n.to_bytes_be();
                let size = self.width.size();
                if n.bits() as usize > size * 8 {
                    return Err(EncodeError::Overflow {
                        kind: self.width.name(),
                        value: n.to_string(),
                    });
                }
                // `to_bytes_be` yields `[0]` for zero, which still fits
                Ok(buf.push_zeros(size - bytes.len()) + buf.push_all(&bytes))
            }
        }
    }
}

impl Decode for BigNumberCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        match self.width {
            BigWidth::U64 => read_u64(data, offset).map(|(n, end)| (Value::U64(n), end)),
            BigWidth::U256 => {
                let (bytes, end) = parse::take(data, offset, U256_SIZE)?;
                Ok((Value::U256(BigUint::from_bytes_be(bytes)), end))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    const U64: BigNumberCoder = BigNumberCoder::new(BigWidth::U64);
    const U256: BigNumberCoder = BigNumberCoder::new(BigWidth::U256);

    #[test]
    fn u64_word() {
        assert_eq!(U64.encode(&Value::U64(0x0102)).unwrap(), hex::decode("0000000000000102").unwrap());
        assert_eq!(U64.encode(&Value::U8(0xff)).unwrap(), hex::decode("00000000000000ff").unwrap());
        assert_eq!(
            U64.decode(&hex::decode("ffffffffffffffff").unwrap(), 0).unwrap(),
            (Value::U64(u64::MAX), 8)
        );
    }

    #[test]
    fn u256_four_words() {
        let n: BigUint = BigUint::from(1u8) << 255;
        let enc = U256.encode(&Value::U256(n.clone())).unwrap();
        assert_eq!(enc.len(), 32);
        assert_eq!(enc[0], 0x80);
        assert!(enc[1..].iter().all(|&b| b == 0));
        assert_eq!(U256.decode(&enc, 0).unwrap(), (Value::U256(n), 32));
        assert_eq!(U256.encode(&Value::U256(BigUint::from(0u8))).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn overflow_rejected() {
        let too_big = BigUint::from(1u8) << 256;
        assert!(matches!(
            U256.encode(&Value::U256(too_big)),
            Err(EncodeError::Overflow { kind: "u256", .. })
        ));
        let wide = Value::U256(BigUint::from(u64::MAX) + 1u8);
        assert!(matches!(U64.encode(&wide), Err(EncodeError::Overflow { kind: "u64", .. })));
    }

    #[test]
    fn non_numeric_rejected() {
        assert_eq!(
            U64.encode(&Value::Bool(true)),
            Err(EncodeError::TypeMismatch {
                expected: "u64".into(),
                found: "bool"
            })
        );
    }

    #[test]
    fn short_buffer() {
        assert!(matches!(U256.decode(&[0u8; 31], 0), Err(DecodeError::BufferTooShort { .. })));
    }
}
