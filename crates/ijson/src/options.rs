//! Configuration shared by every public entry point (spec.md §6).
use crate::lexer::DEFAULT_BUF_SIZE;

/// Configuration for [`crate::basic_parse`], [`crate::parse`],
/// [`crate::items`], and [`crate::kvitems`].
///
/// # Examples
///
/// ```rust
/// use ijson::ParserOptions;
///
/// let options = ParserOptions {
///     multiple_values: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Bytes requested per underlying read (spec.md §4.1). Must accept
    /// small values, down to `1`, for boundary testing.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUF_SIZE`] (64 KiB).
    pub buf_size: usize,

    /// Whether a stream may contain several whitespace-separated top-level
    /// JSON values (spec.md §4.2, §6). When `false`, any non-whitespace
    /// input remaining after the first value fails with
    /// [`crate::ParserError::InvalidJson`] ("trailing data").
    ///
    /// # Default
    ///
    /// `false`
    pub multiple_values: bool,

    /// Whether to accept any Unicode whitespace between lexemes, not just
    /// the four ASCII whitespace characters RFC 8259 defines (space, tab,
    /// CR, LF).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            buf_size: DEFAULT_BUF_SIZE,
            multiple_values: false,
            allow_unicode_whitespace: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let opts = ParserOptions::default();
        assert_eq!(opts.buf_size, DEFAULT_BUF_SIZE);
        assert!(!opts.multiple_values);
        assert!(!opts.allow_unicode_whitespace);
    }
}
