//! Layout constants shared by every coder

/// Width in bytes of one VM word, the unit of alignment for the wire format
pub const WORD_SIZE: usize = 8;

/// Upper bound on the byte-length of any buffer a single decode operation
/// will accept (`2^32 - 1`).
pub const MAX_BYTES: usize = u32::MAX as usize;

/// Rounds `len` up to the nearest whole number of words.
#[inline]
#[must_use]
pub fn word_aligned(len: usize) -> usize {
    ::num_integer::Integer::div_ceil(&len, &WORD_SIZE) * WORD_SIZE
}
