/// Marker trait for byte-oriented buffers with incremental append operations
///
/// In most ways, it is convenient to think of `Target` as an analogous trait to
/// [`std::io::Write`]. The principal difference between the two is the fact
/// that the `push_XXX` methods on `Target` are infallible and total by design;
/// while they return a `usize` value representing the number of bytes written,
/// this is used only for summary book-keeping on the caller side, rather than
/// a feedback mechanism that may indicate partial success.
///
/// Every fallible step of encoding happens in the coder before bytes reach the
/// target, so a coder that returns `Err` may leave a partially written target
/// behind. Callers that need all-or-nothing output should write into a fresh
/// target and discard it on error, as [`Encode::encode`] does.
///
/// [`Encode::encode`]: crate::conv::Encode::encode
pub trait Target {
    /// Hints that at least `extra` more bytes are about to be appended.
    ///
    /// For many implementors this is a no-op. For `Vec<u8>` it reserves
    /// capacity to amortize reallocation.
    fn anticipate(&mut self, extra: usize);

    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Appends a single byte. The return value must be `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes in a known-length array. The return value must be `N`.
    ///
    /// ```ignore
    /// x.push_many(*b"VM") === x.push_one(b'V') + x.push_one(b'M')
    /// ```
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends the bytes in an arbitrary-length byte-slice, returning the
    /// total length of the slice.
    fn push_all(&mut self, buf: &[u8]) -> usize;

    /// Appends `n` zero bytes, returning `n`.
    fn push_zeros(&mut self, n: usize) -> usize {
        self.anticipate(n);
        for _ in 0..n {
            self.push_one(0);
        }
        n
    }
}

/// Useful alias for `std::io::Sink` that is used to count the number of
/// bytes required to serialize a value, without performing any memory
/// operations.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }

    #[inline(always)]
    fn push_zeros(&mut self, n: usize) -> usize {
        n
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    #[must_use]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend_from_slice(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }

    #[inline]
    fn push_zeros(&mut self, n: usize) -> usize {
        self.resize(self.len() + n, 0);
        n
    }
}
