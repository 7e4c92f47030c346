//! Top-level entry point for call-argument and return-value payloads
//!
//! [`AbiCodec`] wraps a fully resolved [`Coder`] tree together with the
//! [`CodecOptions`] that apply to whole payloads, rather than to any one node
//! of the tree: the overall size limit and whether unread bytes may follow
//! the decoded value.

use tracing::{debug, trace_span};

use crate::coder::Coder;
use crate::constants::MAX_BYTES;
use crate::conv::{len::Estimable, Decode, EncodeLength};
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::value::Value;

/// Payload-level decoding policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodecOptions {
    /// Largest buffer accepted by [`AbiCodec::decode`]
    pub max_bytes: usize,
    /// Whether bytes may remain after the top-level value
    pub allow_trailing_bytes: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_bytes: MAX_BYTES,
            allow_trailing_bytes: false,
        }
    }
}

/// Encoder and decoder for whole payloads of one declared type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbiCodec {
    coder: Coder,
    options: CodecOptions,
}

impl AbiCodec {
    #[must_use]
    pub fn new(coder: Coder) -> Self {
        Self::with_options(coder, CodecOptions::default())
    }

    #[must_use]
    pub const fn with_options(coder: Coder, options: CodecOptions) -> Self {
        Self { coder, options }
    }

    #[must_use]
    pub fn coder(&self) -> &Coder {
        &self.coder
    }

    #[must_use]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Serializes `value` into a buffer sized exactly for it.
    pub fn encode(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        let span = trace_span!("abi_encode", coder = %self.coder);
        let _enter = span.enter();
        self.coder.to_bytes_full(value).map_err(|err| {
            debug!(error = %err, kind = value.kind(), "failed to encode value");
            err
        })
    }

    /// Decodes one value occupying the whole of `data`.
    ///
    /// Buffers longer than [`CodecOptions::max_bytes`] are rejected before
    /// any decoding takes place.
    pub fn decode(&self, data: &[u8]) -> DecodeResult<Value> {
        let span = trace_span!("abi_decode", coder = %self.coder, len = data.len());
        let _enter = span.enter();
        self.decode_whole(data).map_err(|err| {
            debug!(error = %err, "failed to decode payload");
            err
        })
    }

    fn decode_whole(&self, data: &[u8]) -> DecodeResult<Value> {
        if data.len() > self.options.max_bytes {
            return Err(DecodeError::ExceedsMaxBytes {
                limit: self.options.max_bytes,
                actual: data.len(),
            });
        }
        let (value, end) = self.coder.decode(data, 0)?;
        if end < data.len() && !self.options.allow_trailing_bytes {
            return Err(DecodeError::TrailingBytes {
                residual: data.len() - end,
            });
        }
        Ok(value)
    }

    /// Decodes one value starting at `offset`, for callers continuing
    /// through a buffer shared with other payloads.
    pub fn decode_at(&self, data: &[u8], offset: usize) -> DecodeResult<(Value, usize)> {
        let span = trace_span!("abi_decode_at", coder = %self.coder, offset);
        let _enter = span.enter();
        self.coder.decode(data, offset).map_err(|err| {
            debug!(error = %err, offset, "failed to decode payload");
            err
        })
    }

    /// Nominal encoded length of the wrapped coder
    #[must_use]
    pub fn encoded_length(&self) -> usize {
        self.coder.encoded_length()
    }
}
