//! Sequence coders
//!
//! This module serves as an entry-point for the coders over homogeneous
//! sequences of elements:
//!   * [`fix::ArrayCoder`] for arrays of exactly `N` elements, whose layout is
//!     fully static and carries no prefix
//!   * [`vec::VecCoder`] for variable-count vectors, prefixed with an 8-byte
//!     element count
//!
//! It also defines the two loops every composite coder is built from: writing
//! a run of values through their coders, and decoding a run of coders while
//! threading the offset from one child to the next.

use crate::coder::Coder;
use crate::conv::{target::Target, Decode, Encode};
use crate::error::{DecodeResult, EncodeResult};
use crate::value::Value;

pub mod fix;
pub mod vec;

/// Encodes each value through its paired coder, in order, returning the
/// total number of bytes written.
pub(crate) fn write_each<'a, I, U>(pairs: I, buf: &mut U) -> EncodeResult<usize>
where
    I: IntoIterator<Item = (&'a Coder, &'a Value)>,
    U: Target,
{
    pairs
        .into_iter()
        .try_fold(0, |acc, (coder, value)| Ok(acc + coder.write_to(value, buf)?))
}

/// Decodes one value per coder, each starting at the offset returned by
/// the previous one, and returns the values with the final offset.
pub(crate) fn decode_each<'a, I>(
    coders: I,
    data: &[u8],
    offset: usize,
) -> DecodeResult<(Vec<Value>, usize)>
where
    I: IntoIterator<Item = &'a Coder>,
{
    let coders = coders.into_iter();
    let mut values = Vec::with_capacity(coders.size_hint().0);
    let mut cursor = offset;
    for coder in coders {
        let (value, next) = coder.decode(data, cursor)?;
        values.push(value);
        cursor = next;
    }
    Ok((values, cursor))
}
