//! Glob-importable set of the traits and types needed to build coder trees
//! and run values through them.

pub use crate::coder::Coder;
pub use crate::conv::{len::Estimable, Decode, Encode, EncodeLength};
pub use crate::error::{DecodeError, EncodeError};
pub use crate::value::Value;
