//! Word-aligned binary codec for virtual-machine ABI values
//!
//! # Overview
//!
//! Contract calls hand their arguments to the VM, and receive return values
//! back, in a fixed binary layout: big-endian words of eight bytes,
//! length-prefixed dynamic sequences, and discriminant-tagged sum types. A
//! single misplaced byte produces a rejected or misinterpreted call, so the
//! layout produced and consumed here must match the VM's exactly.
//!
//! This library models that layout as a tree of [`Coder`]s mirroring the
//! declared type of a payload. Building the tree from an ABI declaration is
//! the job of an external type-resolution step; once built, the tree encodes
//! [`Value`]s into bytes and decodes bytes back into `Value`s.
//!
//! # Coders
//!
//! The leaves of a tree are primitive coders ([`prim`]), covering the
//! unsigned integers, `bool`, the raw `byte`, and the 256- and 512-bit hash
//! types. Sub-word integers and `bool` are left-padded to one full word;
//! `u256` is four words with no internal padding.
//!
//! The inner nodes are
//!   * arrays, tuples and structs ([`seq::fix`], [`schema`]), written as the
//!     plain concatenation of their children
//!   * options and enums ([`adt`]), written as a discriminant word followed
//!     by the payload of the active variant
//!   * vectors ([`seq::vec`]), written as an element count followed by the
//!     elements
//!   * fixed strings and heap bytes ([`schema`])
//!
//! # Decoding protocol
//!
//! [`Decode::decode`] takes the whole input buffer and a starting offset, and
//! returns the decoded value along with the offset just past the bytes it
//! consumed. Composite coders pass that offset on to their next child, so a
//! whole tree is decoded in one left-to-right pass with no copying.
//!
//! # Entry point
//!
//! [`AbiCodec`] wraps a coder tree with payload-level limits, and is the
//! intended boundary for transport layers that produce and consume whole
//! payloads.
//!
//! # Features
//!
//!   * `check_padding`: reject decoded padding bytes that are not zero
//!   * `check_complete_decode`: make [`Decode::try_decode`] reject trailing
//!     bytes
//!   * `serde_impls`: derive `serde::Serialize` for [`Value`]

pub mod adt;
pub mod bignum;
pub mod codec;
pub mod coder;
pub mod constants;
pub mod conv;
pub mod error;
pub mod fixed;
pub mod parse;
pub mod prelude;
pub mod prim;
pub mod schema;
pub mod seq;
pub mod value;

pub use crate::adt::{EnumCoder, OptionCoder, UnionLayout};
pub use crate::bignum::{BigNumberCoder, BigWidth};
pub use crate::codec::{AbiCodec, CodecOptions};
pub use crate::coder::Coder;
pub use crate::constants::{MAX_BYTES, WORD_SIZE};
pub use crate::conv::{
    len::Estimable,
    target::{ByteCounter, Target},
    Decode, Encode, EncodeLength,
};
pub use crate::error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult, LengthError, TagError, WidthError,
};
pub use crate::fixed::{FixedBytes, B256, B512};
pub use crate::prim::{Primitive, PrimitiveCoder};
pub use crate::schema::{BytesCoder, BytesKind, StrCoder, StructCoder, TupleCoder};
pub use crate::seq::{fix::ArrayCoder, vec::VecCoder};
pub use crate::value::Value;
