//! The buffered lexer: turns a byte/text stream into a lazy sequence of
//! `(position, Lexeme)` pairs (spec.md §4.1).
//!
//! The lexer keeps a sliding window of decoded-but-unconsumed characters
//! (adapted from the teacher's `buffer.rs` `VecDeque`-backed strategy) and
//! refills it by reading at most `buf_size` bytes at a time from the
//! underlying [`ByteSource`]. Multi-byte UTF-8 sequences that straddle a read
//! boundary are carried over to the next read rather than failing; only a
//! genuinely invalid byte sequence at a true character boundary raises
//! [`ParserError::InvalidJson`].
use alloc::{collections::VecDeque, format, string::String, vec, vec::Vec};

use crate::{error::ParserError, source::ByteSource};

/// Default read-buffer size: 64 KiB (spec.md §4.1).
pub const DEFAULT_BUF_SIZE: usize = 64 * 1024;

/// A minimal syntactic token read directly from the input text.
///
/// Strings and numbers are always emitted as a single lexeme regardless of
/// length; decoding escapes/digits into a value is the basic parser's job
/// (spec.md §3, §4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// One of `{ } [ ] : ,`.
    Punctuator(u8),
    /// The keyword `true`.
    True,
    /// The keyword `false`.
    False,
    /// The keyword `null`.
    Null,
    /// A fully-quoted string span, delimiters and escapes verbatim (the
    /// outer quotes are *not* included; see [`Lexeme::String`] doc).
    String(String),
    /// A number in JSON syntax, raw text.
    Number(String),
}

struct CharBuffer {
    data: VecDeque<char>,
}

impl CharBuffer {
    fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    fn push_str(&mut self, s: &str) {
        self.data.reserve(s.len());
        self.data.extend(s.chars());
    }

    fn peek(&self) -> Option<char> {
        self.data.front().copied()
    }

    fn peek_at(&self, i: usize) -> Option<char> {
        self.data.get(i).copied()
    }

    fn pop(&mut self) -> Option<char> {
        self.data.pop_front()
    }
}

/// Reads JSON lexemes from a [`ByteSource`], tolerating lexemes split across
/// arbitrary read boundaries.
pub struct Lexer<S> {
    source: S,
    buf_size: usize,
    chars: CharBuffer,
    /// Incomplete trailing UTF-8 bytes carried over from the previous read.
    carry: Vec<u8>,
    /// Byte offset of `chars.peek()` in the logical input.
    position: usize,
    source_exhausted: bool,
    /// Set once a clean end-of-input has been observed, so further calls
    /// return `None` instead of re-reading a spent source.
    finished: bool,
    allow_unicode_whitespace: bool,
}

impl<S: ByteSource> Lexer<S> {
    /// Creates a lexer reading from `source` with the default buffer size.
    pub fn new(source: S) -> Self {
        Self::with_buf_size(source, DEFAULT_BUF_SIZE)
    }

    /// Creates a lexer reading from `source`, requesting at most
    /// `buf_size` bytes per underlying read. `buf_size` may be as small as
    /// `1` (used by boundary tests to force a lexeme to split across many
    /// reads).
    pub fn with_buf_size(source: S, buf_size: usize) -> Self {
        Self {
            source,
            buf_size: buf_size.max(1),
            chars: CharBuffer::new(),
            carry: Vec::new(),
            position: 0,
            source_exhausted: false,
            finished: false,
            allow_unicode_whitespace: false,
        }
    }

    /// Also accept any Unicode whitespace between lexemes, not just the four
    /// ASCII whitespace characters defined by RFC 8259 (spec.md §4.1).
    #[must_use]
    pub fn with_unicode_whitespace(mut self, allow: bool) -> Self {
        self.allow_unicode_whitespace = allow;
        self
    }

    /// The byte offset of the next not-yet-consumed lexeme.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Pulls chars from the source until at least one more is buffered or
    /// the source is exhausted. Returns `false` at true end-of-input.
    fn ensure_one(&mut self) -> Result<bool, ParserError> {
        if self.chars.peek().is_some() {
            return Ok(true);
        }
        while self.chars.peek().is_none() && !self.source_exhausted {
            self.refill()?;
        }
        Ok(self.chars.peek().is_some())
    }

    /// Pulls chars until at least `n` are buffered or the source is
    /// exhausted.
    fn ensure_at_least(&mut self, n: usize) -> Result<(), ParserError> {
        while self.chars.peek_at(n.saturating_sub(1)).is_none() && !self.source_exhausted {
            self.refill()?;
        }
        Ok(())
    }

    fn refill(&mut self) -> Result<(), ParserError> {
        let mut read_buf = vec![0u8; self.buf_size];
        let n = self.source.read(&mut read_buf)?;
        if n == 0 {
            self.source_exhausted = true;
            if !self.carry.is_empty() {
                return Err(ParserError::invalid(
                    self.position,
                    "invalid encoding: truncated UTF-8 sequence at end of input",
                ));
            }
            return Ok(());
        }
        let mut combined = core::mem::take(&mut self.carry);
        combined.extend_from_slice(&read_buf[..n]);
        match core::str::from_utf8(&combined) {
            Ok(s) => {
                self.chars.push_str(s);
            }
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                // Safety: `valid_up_to` was validated by `from_utf8`.
                let s = core::str::from_utf8(&combined[..valid_up_to]).unwrap();
                self.chars.push_str(s);
                match e.error_len() {
                    // A multi-byte sequence was cut off by this read's end;
                    // never fail for this, carry the partial bytes forward.
                    None => {
                        self.carry = combined[valid_up_to..].to_vec();
                    }
                    // A byte sequence that can never become valid UTF-8
                    // regardless of what follows.
                    Some(_) => {
                        return Err(ParserError::invalid(
                            self.position + valid_up_to,
                            "invalid UTF-8 encoding",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.pop()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn is_whitespace(&self, c: char) -> bool {
        if self.allow_unicode_whitespace {
            c.is_whitespace()
        } else {
            matches!(c, ' ' | '\t' | '\r' | '\n')
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), ParserError> {
        loop {
            if !self.ensure_one()? {
                return Ok(());
            }
            match self.chars.peek() {
                Some(c) if self.is_whitespace(c) => {
                    self.advance();
                }
                _ => return Ok(()),
            }
        }
    }

    /// Returns the next `(position, lexeme)` pair, or `None` at a clean
    /// end of input, or an error.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::IncompleteInput`] if the stream ends mid-token,
    /// and [`ParserError::InvalidJson`] for any lexical violation.
    pub fn next_lexeme(&mut self) -> Result<Option<(usize, Lexeme)>, ParserError> {
        if self.finished {
            return Ok(None);
        }
        self.skip_whitespace()?;
        if !self.ensure_one()? {
            self.finished = true;
            return Ok(None);
        }
        let start = self.position;
        let c = self.chars.peek().expect("ensure_one guarantees a char");
        let lexeme = match c {
            '{' | '}' | '[' | ']' | ':' | ',' => {
                self.advance();
                Lexeme::Punctuator(c as u8)
            }
            't' => self.lex_keyword("true", Lexeme::True, start)?,
            'f' => self.lex_keyword("false", Lexeme::False, start)?,
            'n' => self.lex_keyword("null", Lexeme::Null, start)?,
            '"' => self.lex_string(start)?,
            '-' | '0'..='9' => self.lex_number(start)?,
            other => {
                return Err(ParserError::invalid(
                    start,
                    format!("unrecognized lexeme start {other:?}"),
                ));
            }
        };
        Ok(Some((start, lexeme)))
    }

    fn lex_keyword(
        &mut self,
        keyword: &str,
        value: Lexeme,
        start: usize,
    ) -> Result<Lexeme, ParserError> {
        for (i, expected) in keyword.chars().enumerate() {
            self.ensure_at_least(i + 1)?;
            match self.chars.peek_at(i) {
                Some(c) if c == expected => {}
                Some(other) => {
                    return Err(ParserError::invalid(
                        start,
                        format!("expected keyword {keyword:?}, found {other:?}"),
                    ));
                }
                None => {
                    return Err(ParserError::incomplete(
                        start,
                        format!("truncated keyword, expected {keyword:?}"),
                    ));
                }
            }
        }
        for _ in 0..keyword.chars().count() {
            self.advance();
        }
        Ok(value)
    }

    fn lex_string(&mut self, start: usize) -> Result<Lexeme, ParserError> {
        self.advance(); // opening quote
        let mut out = String::new();
        loop {
            if !self.ensure_one()? {
                return Err(ParserError::incomplete(start, "unterminated string"));
            }
            let c = self.advance().expect("ensure_one guarantees a char");
            match c {
                '"' => return Ok(Lexeme::String(out)),
                '\\' => {
                    out.push('\\');
                    if !self.ensure_one()? {
                        return Err(ParserError::incomplete(
                            start,
                            "unterminated escape sequence",
                        ));
                    }
                    let esc = self.advance().expect("ensure_one guarantees a char");
                    out.push(esc);
                    match esc {
                        '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {}
                        'u' => {
                            self.ensure_at_least(4)?;
                            for _ in 0..4 {
                                match self.advance() {
                                    Some(h) if h.is_ascii_hexdigit() => out.push(h),
                                    Some(h) => {
                                        return Err(ParserError::invalid(
                                            start,
                                            format!("invalid unicode escape digit {h:?}"),
                                        ));
                                    }
                                    None => {
                                        return Err(ParserError::incomplete(
                                            start,
                                            "truncated unicode escape",
                                        ));
                                    }
                                }
                            }
                        }
                        other => {
                            return Err(ParserError::invalid(
                                start,
                                format!("invalid escape sequence \\{other}"),
                            ));
                        }
                    }
                }
                c if (c as u32) < 0x20 => {
                    return Err(ParserError::invalid(
                        start,
                        "unescaped control character in string",
                    ));
                }
                c => out.push(c),
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Result<Lexeme, ParserError> {
        let mut out = String::new();
        if self.chars.peek() == Some('-') {
            out.push(self.advance().unwrap());
            if !self.ensure_one()? {
                return Err(ParserError::incomplete(start, "truncated number"));
            }
        }
        match self.chars.peek() {
            Some('0') => out.push(self.advance().unwrap()),
            Some(c) if c.is_ascii_digit() => {
                while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                    out.push(self.advance().unwrap());
                    if self.chars.peek().is_none() {
                        self.ensure_one()?;
                    }
                }
            }
            Some(other) => {
                return Err(ParserError::invalid(
                    start,
                    format!("invalid number, expected digit, found {other:?}"),
                ));
            }
            None => return Err(ParserError::incomplete(start, "truncated number")),
        }

        // Fractional part.
        if self.ensure_one()? && self.chars.peek() == Some('.') {
            out.push(self.advance().unwrap());
            if !self.ensure_one()? {
                return Err(ParserError::incomplete(start, "truncated decimal number"));
            }
            if !matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(ParserError::invalid(
                    start,
                    "expected digit after decimal point",
                ));
            }
            while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                out.push(self.advance().unwrap());
                if self.chars.peek().is_none() {
                    self.ensure_one()?;
                }
            }
        }

        // Exponent.
        if self.ensure_one()? && matches!(self.chars.peek(), Some('e' | 'E')) {
            out.push(self.advance().unwrap());
            if !self.ensure_one()? {
                return Err(ParserError::incomplete(start, "truncated exponent"));
            }
            if matches!(self.chars.peek(), Some('+' | '-')) {
                out.push(self.advance().unwrap());
                if !self.ensure_one()? {
                    return Err(ParserError::incomplete(start, "truncated exponent"));
                }
            }
            if !matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(ParserError::invalid(start, "expected digit in exponent"));
            }
            while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                out.push(self.advance().unwrap());
                if self.chars.peek().is_none() {
                    self.ensure_one()?;
                }
            }
        }

        Ok(Lexeme::Number(out))
    }
}
