//! Oracle for the byte-length of the serialized form of a value
//!
//! Every coder declares a nominal *encoded length*. For coders whose layout
//! is fully determined by the type tree, this is the exact number of bytes
//! every value encodes to, and [`Estimable::known_length`] returns it. For
//! coders whose span depends on the value (vectors, heap bytes, packed unions)
//! the nominal length is only a bound, and `known_length` is `None`:
//!
//!   * vectors and heap bytes: the footprint of an empty value (lower bound)
//!   * packed unions: the footprint of the widest variant (upper bound)
//!
//! The exact length of one particular value is available through
//! [`EncodeLength::enc_len`](crate::conv::EncodeLength::enc_len).

/// Trait for coders that can report their nominal encoded length.
pub trait Estimable {
    /// Nominal byte-length of this coder's encoding, as defined per coder.
    fn encoded_length(&self) -> usize;

    /// Exact byte-length shared by every encodable value, when one exists.
    fn known_length(&self) -> Option<usize>;
}

/// Sums a sequence of optional exact lengths, yielding `None` as soon as any
/// component is not exactly known.
pub(crate) fn sum_known<I>(lens: I) -> Option<usize>
where
    I: IntoIterator<Item = Option<usize>>,
{
    lens.into_iter().try_fold(0usize, |acc, len| Some(acc + len?))
}
