//! Variable-count vector coder
//!
//! [`VecCoder`] encodes a sequence of elements of a single element coder,
//! prefixed with the element count as one big-endian word:
//!
//! ```text
//! [ count: u64 ][ elem 0 ][ elem 1 ] ... [ elem count-1 ]
//! ```
//!
//! This is the one core coder whose decoded span cannot be predicted from the
//! type alone. Its nominal encoded length is that of an empty vector plus one
//! element (`element length + WORD_SIZE`), which serves as a lower-bound
//! sanity check only.
//!
//! # Decoding
//!
//! The count word is read first, giving the expected data length
//! `count × element length`. Elements are then decoded one after the other,
//! each from the offset returned by the previous element rather than at a
//! fixed stride, because an element's actual span may exceed its nominal
//! length when it is itself variable-width. Elements are decoded against the
//! whole buffer, so such children are never truncated.
//!
//! # Option elements
//!
//! The nominal length of an option coder is an upper bound: a packed absent
//! value is shorter than a present one. A vector of options therefore skips
//! the minimum-size pre-check and the exact data-span check, both of which are
//! computed from nominal lengths and would reject valid shorter data. No other
//! element kind gets this treatment.
//!
//! # Zero-width elements
//!
//! An element coder of encoded length zero (`()`, empty tuples and arrays,
//! `str[0]`) consumes no input, so the count alone determines how many values
//! are produced. Such counts are capped so that the decoded values fit within
//! the coder's `max_bytes`.

use crate::bignum::{read_u64, write_u64};
use crate::coder::Coder;
use crate::constants::{MAX_BYTES, WORD_SIZE};
use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::parse;
use crate::prim::Primitive;
use crate::value::Value;
use std::mem;

/// Coder for `Vec<T>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VecCoder {
    element: Box<Coder>,
    is_option_vec: bool,
    max_bytes: usize,
}

impl VecCoder {
    /// Constructs a vector coder over `element`, with the default payload
    /// limit of [`MAX_BYTES`].
    #[must_use]
    pub fn new(element: Coder) -> Self {
        Self {
            is_option_vec: element.is_option(),
            element: Box::new(element),
            max_bytes: MAX_BYTES,
        }
    }

    /// Replaces the maximum buffer size this coder will decode from.
    #[must_use]
    pub fn with_max_bytes(self, max_bytes: usize) -> Self {
        Self { max_bytes, ..self }
    }

    #[must_use]
    pub fn element(&self) -> &Coder {
        &self.element
    }

    /// Returns `true` if the element coder is an option coder
    #[must_use]
    pub const fn is_option_vec(&self) -> bool {
        self.is_option_vec
    }

    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn accepts_raw_bytes(&self) -> bool {
        matches!(&*self.element, Coder::Primitive(p) if p.kind() == Primitive::Byte)
    }
}

impl Estimable for VecCoder {
    fn encoded_length(&self) -> usize {
        self.element.encoded_length() + WORD_SIZE
    }

    fn known_length(&self) -> Option<usize> {
        None
    }
}

impl Encode for VecCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match value {
            Value::Vector(items) => {
                if let Some(len) = self.element.known_length() {
                    buf.anticipate(WORD_SIZE + items.len() * len);
                }
                let prefix = write_u64(buf, items.len() as u64);
                let body = super::write_each(items.iter().map(|item| (&*self.element, item)), buf)?;
                Ok(prefix + body)
            }
            Value::Bytes(raw) if self.accepts_raw_bytes() => {
                buf.anticipate(WORD_SIZE + raw.len());
                Ok(write_u64(buf, raw.len() as u64) + buf.push_all(raw))
            }
            Value::Bytes(_) => Err(EncodeError::RawBytesNotAllowed {
                element: self.element.to_string(),
            }),
            other => Err(EncodeError::TypeMismatch {
                expected: format!("Vec<{}>", self.element),
                found: other.kind(),
            }),
        }
    }
}

impl Decode for VecCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        if !self.is_option_vec && data.len() > self.max_bytes {
            return Err(DecodeError::ExceedsMaxBytes {
                limit: self.max_bytes,
                actual: data.len(),
            });
        }

        let (count, data_offset) = read_u64(data, offset)?;
        let element_len = self.element.encoded_length();
        let overflow = DecodeError::LengthOverflow {
            count,
            element: element_len,
        };
        let count = usize::try_from(count).map_err(|_| overflow.clone())?;
        if count > self.max_bytes {
            return Err(DecodeError::ExceedsMaxBytes {
                limit: self.max_bytes,
                actual: count,
            });
        }
        let data_length = count.checked_mul(element_len).ok_or(overflow)?;
        if element_len == 0 {
            // zero-width elements occupy no input; bound what they expand to
            let limit = self.max_bytes / mem::size_of::<Value>();
            if count > limit {
                return Err(DecodeError::TooManyElements { limit, count });
            }
        }

        if !self.is_option_vec {
            let available = parse::remainder(data, offset);
            if count > 0 && available < self.encoded_length() {
                return Err(DecodeError::BelowMinimum {
                    minimum: self.encoded_length(),
                    available,
                });
            }
            let sliced = parse::remainder(data, data_offset).min(data_length);
            if sliced != data_length {
                return Err(DecodeError::DataLengthMismatch {
                    expected: data_length,
                    actual: sliced,
                });
            }
        }

        let mut items = Vec::with_capacity(count.min(parse::remainder(data, data_offset)));
        let mut cursor = data_offset;
        for _ in 0..count {
            let (item, next) = self.element.decode(data, cursor)?;
            items.push(item);
            cursor = next;
        }
        Ok((Value::Vector(items), cursor))
    }
}
