//! Error types for encoding and decoding
//!
//! The codec distinguishes exactly two failure classes: [`EncodeError`], raised
//! when a value does not have the shape its coder expects, and [`DecodeError`],
//! raised when a buffer cannot be interpreted under the coder tree. Both are
//! raised by the coder that first detects the problem and are propagated
//! unchanged through the recursive call chain.
//!
//! The auxiliary types [`LengthError`], [`WidthError`] and [`TagError`] carry
//! the details of element-count, byte-width and discriminant failures
//! respectively, and lift into the two top-level classes via `From`.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Enumerated error type for failures related to constructs that impose a
/// check on the byte-width of their prospective values.
///
/// Structurally similar to [`LengthError`], which relates to the number of
/// elements in a collection rather than the number of bytes.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    #[error("{actual}-byte value exceeded limit of {limit} bytes")]
    TooWide { limit: usize, actual: usize },
    /// Requirement of precise byte-width not satisfied
    #[error("{actual}-byte value violated requirement of {exact} bytes")]
    WrongWidth { exact: usize, actual: usize },
}

/// Enumerated error type for failures related to constructs that impose a
/// check on the element-count of their prospective values.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum LengthError {
    /// Restriction on maximum element-count exceeded
    #[error("{actual}-element value exceeded limit of {limit} elements")]
    TooLong { limit: usize, actual: usize },
    /// Requirement of precise element-count not satisfied
    #[error("{actual}-element value violated requirement of {exact} elements")]
    WrongLength { exact: usize, actual: usize },
}

/// Error representing a discriminant word outside the valid range of a
/// tagged union.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("unexpected discriminant {actual:#018x} for {for_type} ({variants} variants)")]
pub struct TagError {
    actual: u64,
    variants: usize,
    for_type: String,
}

impl TagError {
    /// Constructs a `TagError` for the raw discriminant `actual` read while
    /// decoding `for_type`, whose valid range is `[0, variants)`.
    pub fn new(actual: u64, variants: usize, for_type: impl Into<String>) -> Self {
        Self {
            actual,
            variants,
            for_type: for_type.into(),
        }
    }

    /// Returns the out-of-range discriminant that was read
    #[must_use]
    pub const fn actual(&self) -> u64 {
        self.actual
    }

    /// Returns the number of valid variants of the union being decoded
    #[must_use]
    pub const fn variants(&self) -> usize {
        self.variants
    }
}

/// Failure to serialize a value under a given coder.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum EncodeError {
    /// The value's kind does not match the kind the coder expects
    #[error("expected {expected} value, found {found}")]
    TypeMismatch { expected: String, found: &'static str },
    /// Element-count violation for arrays, tuples and structs
    #[error(transparent)]
    Length(#[from] LengthError),
    /// Byte-width violation for fixed-width strings
    #[error(transparent)]
    Width(#[from] WidthError),
    /// Numeric value does not fit into the target integer kind
    #[error("value {value} does not fit into {kind}")]
    Overflow { kind: &'static str, value: String },
    /// Raw byte input passed to a vector whose elements are not raw bytes
    #[error("raw byte input requires a vector of `byte`, found vector of `{element}`")]
    RawBytesNotAllowed { element: String },
    /// Variant name not declared by the enum coder
    #[error("unknown variant `{variant}` for {for_type}")]
    UnknownVariant { variant: String, for_type: String },
    /// Struct value lacks a field declared by the struct coder
    #[error("missing field `{field}` for {for_type}")]
    MissingField { field: String, for_type: String },
}

/// Failure to interpret a byte buffer under a given coder.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// A read would run past the end of the buffer
    #[error("cannot read {requested} bytes at offset {offset}: buffer holds {len} bytes")]
    BufferTooShort {
        offset: usize,
        requested: usize,
        len: usize,
    },
    /// The buffer, or a declared payload, is larger than the permitted maximum
    #[error("invalid data size: {actual} bytes exceeds limit of {limit} bytes")]
    ExceedsMaxBytes { limit: usize, actual: usize },
    /// Remaining buffer is smaller than the coder's minimum footprint
    #[error("invalid vec data size: {available} bytes available, at least {minimum} required")]
    BelowMinimum { minimum: usize, available: usize },
    /// Byte span following a length prefix is shorter than the prefix implies
    #[error("invalid vec byte data size: expected {expected} bytes, found {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },
    /// Length prefix cannot be represented, or multiplies out past `usize`
    #[error("length prefix {count} (element width {element}) overflows")]
    LengthOverflow { count: u64, element: usize },
    /// Element count of a zero-width vector beyond what may be materialized
    #[error("{count} zero-width elements exceed limit of {limit}")]
    TooManyElements { limit: usize, count: usize },
    /// Discriminant outside the variant range of a tagged union
    #[error(transparent)]
    InvalidDiscriminant(#[from] TagError),
    /// Boolean word holding something other than 0 or 1
    #[error("invalid boolean word {0:#018x}")]
    InvalidBoolean(u64),
    /// Word-padded integer exceeding the range of its declared kind
    #[error("decoded value {value} out of range for {kind}")]
    OutOfRange { kind: &'static str, value: u64 },
    /// String payload that is not valid UTF-8
    #[error("string data is not valid utf-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    /// Padding region holding a non-zero byte
    #[error("non-null byte found in {len}-byte padding at offset {offset}")]
    NonNullPadding { offset: usize, len: usize },
    /// Bytes left over after a complete top-level decode
    #[error("{residual} trailing bytes after decoded value")]
    TrailingBytes { residual: usize },
}

/// Type alias for `Result` with an error type of [`EncodeError`]
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Type alias for `Result` with an error type of [`DecodeError`]
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
