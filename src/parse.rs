//! Bounds-checked reads over an immutable buffer
//!
//! These helpers implement the low-level half of the offset-threading decode
//! protocol. Each one takes the full buffer and a starting offset, and on
//! success returns what it read together with the offset just past it. No
//! helper ever reads before `offset`, and a failed read consumes nothing.

use crate::constants::WORD_SIZE;
use crate::error::{DecodeError, DecodeResult};

/// Reads `nbytes` bytes starting at `offset`.
pub fn take(data: &[u8], offset: usize, nbytes: usize) -> DecodeResult<(&[u8], usize)> {
    let end = offset
        .checked_add(nbytes)
        .filter(|&end| end <= data.len())
        .ok_or(DecodeError::BufferTooShort {
            offset,
            requested: nbytes,
            len: data.len(),
        })?;
    Ok((&data[offset..end], end))
}

/// Reads `N` bytes starting at `offset` and returns them in array-form.
pub fn take_fixed<const N: usize>(data: &[u8], offset: usize) -> DecodeResult<([u8; N], usize)> {
    let (bytes, end) = take(data, offset, N)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(bytes);
    Ok((arr, end))
}

/// Reads one big-endian word starting at `offset`.
pub fn take_word(data: &[u8], offset: usize) -> DecodeResult<(u64, usize)> {
    take_fixed::<WORD_SIZE>(data, offset).map(|(arr, end)| (u64::from_be_bytes(arr), end))
}

/// Skips `nbytes` bytes of padding starting at `offset`.
///
/// Padding is expected, but not required, to be zero. When the feature
/// `check_padding` is enabled a non-zero padding byte is reported as
/// [`DecodeError::NonNullPadding`].
pub fn skip_padding(data: &[u8], offset: usize, nbytes: usize) -> DecodeResult<usize> {
    let (_padding, end) = take(data, offset, nbytes)?;
    cfg_if::cfg_if! {
        if #[cfg(feature = "check_padding")] {
            if _padding.iter().any(|&b| b != 0) {
                return Err(DecodeError::NonNullPadding { offset, len: nbytes });
            }
        }
    }
    Ok(end)
}

/// Number of bytes between `offset` and the end of `data`, or zero if
/// `offset` is already past the end.
#[inline]
#[must_use]
pub fn remainder(data: &[u8], offset: usize) -> usize {
    data.len().saturating_sub(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_advances_offset() {
        let data = [1, 2, 3, 4];
        assert_eq!(take(&data, 1, 2).unwrap(), (&[2u8, 3][..], 3));
        assert_eq!(take(&data, 4, 0).unwrap(), (&[][..], 4));
    }

    #[test]
    fn take_rejects_overrun() {
        let data = [1, 2, 3, 4];
        assert_eq!(
            take(&data, 3, 2),
            Err(DecodeError::BufferTooShort {
                offset: 3,
                requested: 2,
                len: 4
            })
        );
        assert!(take(&data, usize::MAX, 2).is_err());
    }

    #[test]
    fn word_is_big_endian() {
        let data = [0, 0, 0, 0, 0, 0, 0x01, 0x02, 0xff];
        assert_eq!(take_word(&data, 0).unwrap(), (0x0102, 8));
        assert!(take_word(&data, 2).is_err());
    }

    #[cfg(feature = "check_padding")]
    #[test]
    fn padding_checked() {
        assert_eq!(skip_padding(&[0, 0, 1], 0, 3), Err(DecodeError::NonNullPadding { offset: 0, len: 3 }));
    }

    #[test]
    fn padding_skipped() {
        assert_eq!(skip_padding(&[0, 0, 0, 7], 0, 3), Ok(3));
    }
}
