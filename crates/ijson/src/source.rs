//! Abstraction over the byte or text stream the lexer reads from.
//!
//! spec.md §4.1/§6: "any source that yields bytes or text chunks suffices."
//! The lexer only ever needs a read-at-most-N operation that returns an
//! empty chunk at end of input, so [`ByteSource`] is the entire contract —
//! any `std::io::Read` implements it for free when the `std` feature (on by
//! default) is enabled.
use crate::error::ParserError;

/// A source of bytes for the lexer to read from.
///
/// Implementations must return `Ok(0)` exactly at end of input, matching the
/// `std::io::Read` convention, and must not block forever without eventually
/// returning (short reads are fine; the lexer will ask again).
pub trait ByteSource {
    /// Reads at most `buf.len()` bytes into `buf`, returning the number of
    /// bytes read, or `0` at end of input.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError>;
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for R {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError> {
        std::io::Read::read(self, buf)
            .map_err(|e| ParserError::invalid(0, alloc::format!("I/O error: {e}")))
    }
}

/// Wraps an in-memory text (`&str`/`String`) source so it can be fed through
/// the same byte-oriented lexer that a [`ByteSource`] drives.
///
/// Text sources are always valid UTF-8 by construction, so the lexer never
/// raises an encoding error for data that arrived this way. spec.md §4.1
/// notes that text sources are accepted but discouraged; [`TextSource::new`]
/// marks the one-time distinction so callers can tell which path was taken
/// (e.g. for a deprecation notice) without pulling in a logging dependency.
#[derive(Debug)]
pub struct TextSource<'a> {
    remaining: &'a [u8],
    warned: bool,
}

impl<'a> TextSource<'a> {
    /// Wraps `text` as a one-shot byte source.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            remaining: text.as_bytes(),
            warned: false,
        }
    }

    /// Returns `true` once this source has been read from at least once.
    ///
    /// Exposed so a caller that wants a deprecation notice for text streams
    /// (spec.md §4.1) can check it after the first read without this crate
    /// depending on a logging facade itself.
    #[must_use]
    pub fn has_warned(&self) -> bool {
        self.warned
    }
}

impl ByteSource for TextSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError> {
        self.warned = true;
        let n = buf.len().min(self.remaining.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_source_drains_then_ends() {
        let mut src = TextSource::new("ab");
        let mut buf = [0u8; 1];
        assert_eq!(src.read(&mut buf).unwrap(), 1);
        assert_eq!(&buf[..1], b"a");
        assert_eq!(src.read(&mut buf).unwrap(), 1);
        assert_eq!(&buf[..1], b"b");
        assert_eq!(src.read(&mut buf).unwrap(), 0);
        assert!(src.has_warned());
    }
}
