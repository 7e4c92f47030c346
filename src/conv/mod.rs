//! Core of the binary-conversion API
//!
//! This module contains the contract every coder satisfies, split across
//! the traits [`Encode`] and [`Decode`], together with the length oracle
//! [`Estimable`](len::Estimable) in the sub-module [`len`].
//!
//! Unlike a type-directed serialization framework, the coders here are
//! runtime values describing a declared type tree, and the data flowing
//! through them is the dynamically shaped [`Value`]. A coder therefore
//! checks the shape of each value it is given and reports mismatches as
//! [`EncodeError`](crate::error::EncodeError).
//!
//! The sub-module [`target`] offers an abstraction along the lines of
//! [`std::io::Write`], namely the [`Target`] trait, which acts as the generic
//! bound for serialization in [`Encode::write_to`].
//!
//! Decoding follows an explicit offset-threading protocol: a coder is handed
//! the whole input buffer and a starting offset, and returns the decoded
//! value together with the offset one past the last byte it consumed. A
//! parent passes that offset on to its next child, so no coder needs to know
//! anything about its siblings.

use crate::error::{DecodeResult, EncodeResult};
use crate::value::Value;

use self::len::Estimable;
use self::target::Target;

pub mod len;
pub mod target;

/// Trait for coders that can serialize a [`Value`] into the wire format
///
/// Implementing [`Encode`] only requires [`write_to`](Encode::write_to); the
/// remaining methods are derived from it.
pub trait Encode {
    /// Appends the serialized bytes of `value` to a generic buffer,
    /// returning the exact number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`](crate::error::EncodeError) if `value` does
    /// not have the shape this coder expects. The target may hold a partial
    /// encoding in that case.
    fn write_to<U: Target>(&self, value: &Value, buf: &mut U) -> EncodeResult<usize>;

    /// Creates a new buffer and fills it with the serialized bytes of `value`.
    fn encode(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::create();
        let _ = self.write_to(value, &mut buf)?;
        Ok(buf)
    }
}

/// Extension trait for `Encode` that makes use of serialization-length oracles
pub trait EncodeLength: Encode + Estimable {
    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `value`.
    ///
    /// Short-circuits to [`Estimable::known_length`] when the coder is
    /// fixed-width, and otherwise performs a counting pass over
    /// [`ByteCounter`](target::ByteCounter).
    fn enc_len(&self, value: &Value) -> EncodeResult<usize> {
        match self.known_length() {
            Some(len) => Ok(len),
            None => self.write_to(value, &mut std::io::sink()),
        }
    }

    /// Serializes `value` into a `Vec<u8>` allocated up front with exactly
    /// the capacity required.
    fn to_bytes_full(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.enc_len(value)?);
        let _ = self.write_to(value, &mut buf)?;
        Ok(buf)
    }
}

impl<T: Encode + Estimable + ?Sized> EncodeLength for T {}

/// Trait for coders that can interpret the wire format back into a [`Value`]
pub trait Decode {
    /// Decodes one value starting at `offset` within `data`.
    ///
    /// On success, returns the value together with the offset immediately
    /// following the last byte consumed. A decoder never reads before
    /// `offset`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`](crate::error::DecodeError) if the buffer is
    /// too short, too long, or holds bytes that are invalid for this coder.
    fn decode(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)>;

    /// Decodes a value from the start of `data`.
    ///
    /// If the feature-flag `check_complete_decode` is enabled, any bytes left
    /// over after the value are reported as
    /// [`DecodeError::TrailingBytes`](crate::error::DecodeError::TrailingBytes).
    fn try_decode(&self, data: &[u8]) -> DecodeResult<Value> {
        let (value, _end) = self.decode(data, 0)?;
        #[cfg(feature = "check_complete_decode")]
        {
            if _end != data.len() {
                return Err(crate::error::DecodeError::TrailingBytes {
                    residual: data.len() - _end,
                });
            }
        }
        Ok(value)
    }
}
