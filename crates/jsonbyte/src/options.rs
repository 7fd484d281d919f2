/// Nesting depth allowed by [`DecoderOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for a decoding session.
///
/// # Examples
///
/// ```rust
/// use jsonbyte::{Decoder, DecoderOptions};
///
/// let decoder = Decoder::new(DecoderOptions {
///     max_depth: 16,
///     max_token_len: Some(4096),
///     ..Default::default()
/// });
/// assert!(!decoder.is_complete());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Maximum nesting depth of arrays and objects.
    ///
    /// Each nested container costs one level of recursion for every byte fed
    /// while it is open, so input from untrusted sources must be bounded.
    /// Opening a container at a deeper level fails with
    /// [`ErrorKind::DepthLimitExceeded`](crate::ErrorKind::DepthLimitExceeded).
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,

    /// Maximum length in bytes of a single string, key or number literal.
    ///
    /// The length is measured after escape decoding.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub max_token_len: Option<usize>,

    /// Treat every byte up to and including `0x20` as whitespace.
    ///
    /// By default only the four whitespace bytes defined by JSON are skipped:
    /// space, horizontal tab, line feed and carriage return. Lenient mode
    /// also skips other control bytes, including NUL, which is convenient
    /// when bytes come from a serial line or terminal.
    ///
    /// # Default
    ///
    /// `false`
    pub lenient_whitespace: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on decoding errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_token_len: None,
            lenient_whitespace: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

impl DecoderOptions {
    pub(crate) fn is_whitespace(&self, byte: u8) -> bool {
        if self.lenient_whitespace {
            byte <= 0x20
        } else {
            matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
        }
    }
}
