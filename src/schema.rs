//! Record, string and heap-bytes coders
//!
//! # Tuples and structs
//!
//! [`TupleCoder`] and [`StructCoder`] hold an ordered list of independently
//! typed children and write them back to back, in declaration order, with no
//! prefix. A struct value may list its fields in any order; they are matched
//! to the declared fields by name.
//!
//! # `str[N]`
//!
//! [`StrCoder`] is a fixed-length UTF-8 string of exactly `N` bytes, followed
//! by zero padding up to the next word boundary.
//!
//! # `Bytes` and `String`
//!
//! [`BytesCoder`] models the heap-allocated byte types: one word holding the
//! byte count, then the bytes verbatim. Whether the payload is opaque or
//! required to be UTF-8 is selected by [`BytesKind`].

use crate::bignum::{read_u64, write_u64};
use crate::coder::Coder;
use crate::constants::{word_aligned, MAX_BYTES, WORD_SIZE};
use crate::conv::{len::sum_known, len::Estimable, target::Target, Decode, Encode};
use crate::error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult, LengthError, WidthError,
};
use crate::parse;
use crate::seq::{decode_each, write_each};
use crate::value::Value;
use std::fmt;

/// Coder for positional tuples `(T0, T1, ...)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleCoder {
    elements: Vec<Coder>,
}

impl TupleCoder {
    #[must_use]
    pub fn new(elements: Vec<Coder>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[Coder] {
        &self.elements
    }
}

impl fmt::Display for TupleCoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (ix, element) in self.elements.iter().enumerate() {
            if ix > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str(")")
    }
}

impl Estimable for TupleCoder {
    fn encoded_length(&self) -> usize {
        self.elements.iter().map(Estimable::encoded_length).sum()
    }

    fn known_length(&self) -> Option<usize> {
        sum_known(self.elements.iter().map(Estimable::known_length))
    }
}

impl Encode for TupleCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        let items = match value {
            Value::Tuple(items) => items,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: self.to_string(),
                    found: other.kind(),
                })
            }
        };
        if items.len() != self.elements.len() {
            return Err(LengthError::WrongLength {
                exact: self.elements.len(),
                actual: items.len(),
            }
            .into());
        }
        write_each(self.elements.iter().zip(items), buf)
    }
}

impl Decode for TupleCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (items, end) = decode_each(&self.elements, data, offset)?;
        Ok((Value::Tuple(items), end))
    }
}

/// Coder for named records
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructCoder {
    name: String,
    fields: Vec<(String, Coder)>,
}

impl StructCoder {
    /// Constructs a struct coder named `name` whose fields are laid out in
    /// the order given.
    #[must_use]
    pub fn new<N, F, I>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        F: Into<String>,
        I: IntoIterator<Item = (F, Coder)>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(|(f, c)| (f.into(), c)).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, Coder)] {
        &self.fields
    }
}

impl Estimable for StructCoder {
    fn encoded_length(&self) -> usize {
        self.fields.iter().map(|(_, c)| c.encoded_length()).sum()
    }

    fn known_length(&self) -> Option<usize> {
        sum_known(self.fields.iter().map(|(_, c)| c.known_length()))
    }
}

impl Encode for StructCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        let given = match value {
            Value::Struct(given) => given,
            other => {
                return Err(EncodeError::TypeMismatch {
                    expected: self.name.clone(),
                    found: other.kind(),
                })
            }
        };
        if given.len() != self.fields.len() {
            return Err(LengthError::WrongLength {
                exact: self.fields.len(),
                actual: given.len(),
            }
            .into());
        }
        let mut written = 0;
        for (field, coder) in &self.fields {
            let value = value.field(field).ok_or_else(|| EncodeError::MissingField {
                field: field.clone(),
                for_type: self.name.clone(),
            })?;
            written += coder.write_to(value, buf)?;
        }
        Ok(written)
    }
}

impl Decode for StructCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (values, end) = decode_each(self.fields.iter().map(|(_, c)| c), data, offset)?;
        let fields = self
            .fields
            .iter()
            .map(|(f, _)| f.clone())
            .zip(values)
            .collect();
        Ok((Value::Struct(fields), end))
    }
}

/// Coder for `str[N]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StrCoder {
    len: usize,
}

impl StrCoder {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    /// Number of string bytes, excluding padding
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn padding(&self) -> usize {
        word_aligned(self.len) - self.len
    }
}

impl Estimable for StrCoder {
    fn encoded_length(&self) -> usize {
        word_aligned(self.len)
    }

    fn known_length(&self) -> Option<usize> {
        Some(word_aligned(self.len))
    }
}

impl Encode for StrCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match value {
            Value::String(s) if s.len() == self.len => {
                Ok(buf.push_all(s.as_bytes()) + buf.push_zeros(self.padding()))
            }
            Value::String(s) => Err(WidthError::WrongWidth {
                exact: self.len,
                actual: s.len(),
            }
            .into()),
            other => Err(EncodeError::TypeMismatch {
                expected: format!("str[{}]", self.len),
                found: other.kind(),
            }),
        }
    }
}

impl Decode for StrCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (bytes, end) = parse::take(data, offset, self.len)?;
        let end = parse::skip_padding(data, end, self.padding())?;
        let s = String::from_utf8(bytes.to_vec())?;
        Ok((Value::String(s), end))
    }
}

/// Interpretation of a heap byte payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BytesKind {
    /// Opaque `Bytes`
    Raw,
    /// UTF-8 `String`
    Utf8,
}

/// Coder for the heap types `Bytes` and `String`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BytesCoder {
    kind: BytesKind,
    max_bytes: usize,
}

impl BytesCoder {
    #[must_use]
    pub const fn new(kind: BytesKind) -> Self {
        Self {
            kind,
            max_bytes: MAX_BYTES,
        }
    }

    /// Replaces the maximum payload size this coder will accept.
    #[must_use]
    pub const fn with_max_bytes(self, max_bytes: usize) -> Self {
        Self { max_bytes, ..self }
    }

    #[must_use]
    pub const fn kind(&self) -> BytesKind {
        self.kind
    }

    fn write_payload<U: Target>(&self, payload: &[u8], buf: &mut U) -> EncodeResult<usize> {
        if payload.len() > self.max_bytes {
            return Err(WidthError::TooWide {
                limit: self.max_bytes,
                actual: payload.len(),
            }
            .into());
        }
        buf.anticipate(WORD_SIZE + payload.len());
        Ok(write_u64(buf, payload.len() as u64) + buf.push_all(payload))
    }
}

impl Estimable for BytesCoder {
    fn encoded_length(&self) -> usize {
        WORD_SIZE
    }

    fn known_length(&self) -> Option<usize> {
        None
    }
}

impl Encode for BytesCoder {
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize> {
        match (self.kind, value) {
            (BytesKind::Raw, Value::Bytes(raw)) => self.write_payload(raw, buf),
            (BytesKind::Utf8, Value::String(s)) => self.write_payload(s.as_bytes(), buf),
            (BytesKind::Raw, other) => Err(EncodeError::TypeMismatch {
                expected: "Bytes".to_owned(),
                found: other.kind(),
            }),
            (BytesKind::Utf8, other) => Err(EncodeError::TypeMismatch {
                expected: "String".to_owned(),
                found: other.kind(),
            }),
        }
    }
}

impl Decode for BytesCoder {
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let (count, start) = read_u64(data, offset)?;
        let count = usize::try_from(count)
            .ok()
            .filter(|&n| n <= self.max_bytes)
            .ok_or(DecodeError::ExceedsMaxBytes {
                limit: self.max_bytes,
                actual: usize::try_from(count).unwrap_or(usize::MAX),
            })?;
        let (payload, end) = parse::take(data, start, count)?;
        let value = match self.kind {
            BytesKind::Raw => Value::Bytes(payload.to_vec()),
            BytesKind::Utf8 => Value::String(String::from_utf8(payload.to_vec())?),
        };
        Ok((value, end))
    }
}
