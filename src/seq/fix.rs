//! Array coder with a fixed number of elements
//!
//! This module defines [`ArrayCoder`], which models arrays holding exactly
//! `count` elements of a single element type. No count is written: the
//! layout is determined by the type tree alone, and the encoded length is
//! `count × element length`.
//!
//! The element-count requirement is enforced on encode. On decode, exactly
//! `count` elements are read, whatever bytes follow them.

use crate::coder::Coder;
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeResult, EncodeError, EncodeResult, LengthError};
use crate::value::Value;

/// Coder for `[T; N]`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayCoder {
    element: Box<Coder>,
    count: usize,
}

impl ArrayCoder {
    #[must_use]
    pub fn new(element: Coder, count: usize) -> Self {
        Self {
            element: Box::new(element),
            count,
        }
    }

    #[must_use]
    pub fn element(&self) -> &Coder {
        &self.element
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl Estimable for ArrayCoder {
    fn encoded_length(&self) -> usize {
        self.count * self.element.encoded_length()
    }

    fn known_length(&self) -> Option<usize> {
        self.element.known_length().map(|len| len * self.count)
    }
}

impl Encode for ArrayCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: format!("[{}; {}]", self.element, self.count),
                    found: other.kind(),
                })
            }
        };
        if items.len() != self.count {
            return Err(LengthError::WrongLength {
                exact: self.count,
                actual: items.len(),
            }
            .into());
        }
        super::write_each(items.iter().map(|item| (&*self.element, item)), buf)
    }
}

impl Decode for ArrayCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (items, end) =
            super::decode_each(std::iter::repeat(&*self.element).take(self.count), data, offset)?;
        Ok((Value::Array(items), end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn array_of_u8() {
        let coder = ArrayCoder::new(Coder::u8(), 3);
        let value = Value::Array(vec![Value::U8(1), Value::U8(2), Value::U8(3)]);
        let bytes = hex::decode("000000000000000100000000000000020000000000000003").unwrap();
        assert_eq!(coder.encode(&value).unwrap(), bytes);
        assert_eq!(coder.decode(&bytes, 0).unwrap(), (value, 24));
        assert_eq!(coder.encoded_length(), 24);
        assert_eq!(coder.known_length(), Some(24));
    }

    #[test]
    fn wrong_count() {
        let coder = ArrayCoder::new(Coder::bool(), 2);
        assert_eq!(
            coder.encode(&Value::Array(vec![Value::Bool(true)])),
            Err(EncodeError::Length(LengthError::WrongLength { exact: 2, actual: 1 }))
        );
        assert!(matches!(
            coder.encode(&Value::Vector(vec![])),
            Err(EncodeError::TypeMismatch { found: "vector", .. })
        ));
    }

    #[test]
    fn short_buffer_mid_array() {
        let coder = ArrayCoder::new(Coder::u64(), 2);
        assert!(matches!(
            coder.decode(&[0u8; 12], 0),
            Err(DecodeError::BufferTooShort { offset: 8, requested: 8, len: 12 })
        ));
    }

    #[test]
    fn empty_array() {
        let coder = ArrayCoder::new(Coder::u256(), 0);
        assert_eq!(coder.encode(&Value::Array(vec![])).unwrap(), Vec::<u8>::new());
        assert_eq!(coder.decode(&[], 0).unwrap(), (Value::Array(vec![]), 0));
    }
}
