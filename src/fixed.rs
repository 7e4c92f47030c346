//! Fixed-length opaque byte values
//!
//! This module contains [`FixedBytes<N>`], the value type held by the
//! hash-like primitive kinds `b256` (`N = 32`) and `b512` (`N = 64`).

use crate::error::WidthError;
use std::convert::TryFrom;

#[cfg(feature = "serde_impls")]
use serde::Serialize;

/// Simple type for holding fixed-length binary sequences.
///
/// While [`FixedBytes<N>`] is naturally implemented around `[u8; N]`, it is
/// preferable to use this type instead, in order to signal to downstream
/// consumers that the data in question is specifically intended to be
/// interpreted as raw binary data, such as a hash, address or signature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedBytes<const N: usize>([u8; N]);

/// 256-bit hash value
pub type B256 = FixedBytes<32>;

/// 512-bit value, typically a signature
pub type B512 = FixedBytes<64>;

#[cfg(feature = "serde_impls")]
impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<const N: usize> FixedBytes<N> {
    /// Constructs a [`FixedBytes<N>`] from a byte-array of length `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use abicoder::fixed::FixedBytes;
    /// assert_eq!(FixedBytes::from_array([1, 2, 3u8]).bytes(), &[1, 2, 3u8]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [u8; N]) -> FixedBytes<N> {
        Self(arr)
    }

    /// Returns an immutable reference to the raw bytes of this [`FixedBytes<N>`].
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Attempts to construct a [`FixedBytes<N>`] by copying the bytes of a
    /// byte-slice whose length is presumptively equal to `N`.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::WrongWidth`] if `bytes.len() != N`.
    pub fn try_from_slice(bytes: &[u8]) -> Result<FixedBytes<N>, WidthError> {
        <[u8; N]>::try_from(bytes)
            .map(Self)
            .map_err(|_| WidthError::WrongWidth {
                exact: N,
                actual: bytes.len(),
            })
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}
