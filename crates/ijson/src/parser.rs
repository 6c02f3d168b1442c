//! The basic event parser: a pushdown automaton over the lexeme stream
//! (spec.md §4.2).
//!
//! `Parser` owns a [`Lexer`] and yields one [`Event`] per call to
//! [`Parser::next_event`]. It never reads further ahead than the lexer needs
//! to classify the next lexeme, so constructing a parser and never driving it
//! performs no I/O (spec.md §4.2, "laziness contract").
use alloc::{format, string::String, vec::Vec};

use crate::{
    error::ParserError,
    event::Event,
    lexer::{Lexeme, Lexer},
    number::NumberValue,
    options::ParserOptions,
    source::ByteSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Map,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectValue,
    ExpectKey,
    ExpectColon,
    ExpectCommaOrEnd,
    Done,
}

/// Parses a lexeme stream into JSON events, validating grammar (spec.md
/// §4.2).
pub struct Parser<S> {
    lexer: Lexer<S>,
    stack: Vec<Container>,
    state: State,
    /// `true` for the single lexeme immediately following a `[`, permitting
    /// an immediate `]` to close an empty array (spec.md §4.2, "the first
    /// post-`[` decision").
    array_just_opened: bool,
    multiple_values: bool,
    any_value_completed: bool,
    poisoned: bool,
}

impl<S: ByteSource> Parser<S> {
    /// Creates a parser over `source` with the default lexer buffer size.
    pub fn new(source: S, multiple_values: bool) -> Self {
        Self::with_buf_size(source, crate::lexer::DEFAULT_BUF_SIZE, multiple_values)
    }

    /// Creates a parser over `source`, requesting at most `buf_size` bytes
    /// per underlying read (spec.md §4.1, testability of small buffer sizes).
    pub fn with_buf_size(source: S, buf_size: usize, multiple_values: bool) -> Self {
        Self {
            lexer: Lexer::with_buf_size(source, buf_size),
            stack: Vec::new(),
            state: State::ExpectValue,
            array_just_opened: false,
            multiple_values,
            any_value_completed: false,
            poisoned: false,
        }
    }

    /// Creates a parser over `source` configured by `options` (spec.md §6).
    pub fn with_options(source: S, options: ParserOptions) -> Self {
        let lexer = Lexer::with_buf_size(source, options.buf_size)
            .with_unicode_whitespace(options.allow_unicode_whitespace);
        Self {
            lexer,
            stack: Vec::new(),
            state: State::ExpectValue,
            array_just_opened: false,
            multiple_values: options.multiple_values,
            any_value_completed: false,
            poisoned: false,
        }
    }

    /// Returns the next event, or `None` at a clean end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::IncompleteInput`] for input that ends mid-token
    /// or mid-structure, and [`ParserError::InvalidJson`] for any grammar
    /// violation. Once an error is returned, every subsequent call returns
    /// `Ok(None)`.
    pub fn next_event(&mut self) -> Result<Option<Event>, ParserError> {
        if self.poisoned {
            return Ok(None);
        }
        let result = match self.step() {
            Ok(v) => Ok(v),
            Err(e) => {
                self.poisoned = true;
                Err(e)
            }
        };
        #[cfg(any(test, feature = "fuzzing"))]
        self.assert_invariants();
        result
    }

    /// Checks that `state` and `stack` agree on what kind of container (if
    /// any) is currently open (spec.md §3: "prefix stack depth equals event
    /// stack depth at every point"). Cheap enough to run on every event under
    /// `test`/`fuzzing` builds but skipped in ordinary release builds.
    #[cfg(any(test, feature = "fuzzing"))]
    fn assert_invariants(&self) {
        match self.state {
            State::Done => assert!(
                self.stack.is_empty(),
                "Internal error: Done state with a non-empty container stack"
            ),
            State::ExpectKey | State::ExpectColon => assert_eq!(
                self.stack.last(),
                Some(&Container::Map),
                "Internal error: {:?} state outside an open map",
                self.state
            ),
            State::ExpectValue | State::ExpectCommaOrEnd => {}
        }
        if self.array_just_opened {
            assert_eq!(
                self.stack.last(),
                Some(&Container::Array),
                "Internal error: array_just_opened set outside an open array"
            );
        }
    }

    fn value_completed(&mut self) -> State {
        self.any_value_completed = true;
        if self.stack.is_empty() {
            if self.multiple_values {
                State::ExpectValue
            } else {
                State::Done
            }
        } else {
            State::ExpectCommaOrEnd
        }
    }

    #[allow(clippy::too_many_lines)]
    fn step(&mut self) -> Result<Option<Event>, ParserError> {
        loop {
            let next = self.lexer.next_lexeme()?;
            let Some((pos, lexeme)) = next else {
                return if self.state == State::Done
                    || (self.state == State::ExpectValue
                        && self.stack.is_empty()
                        && self.any_value_completed
                        && self.multiple_values)
                {
                    Ok(None)
                } else {
                    Err(ParserError::incomplete(
                        self.lexer.position(),
                        "unexpected end of input",
                    ))
                };
            };

            match self.state {
                State::ExpectValue => {
                    let was_just_opened = self.array_just_opened;
                    self.array_just_opened = false;
                    if was_just_opened
                        && self.stack.last() == Some(&Container::Array)
                        && lexeme == Lexeme::Punctuator(b']')
                    {
                        self.stack.pop();
                        self.state = self.value_completed();
                        return Ok(Some(Event::EndArray));
                    }
                    match lexeme {
                        Lexeme::Punctuator(b'{') => {
                            self.stack.push(Container::Map);
                            self.state = State::ExpectKey;
                            return Ok(Some(Event::StartMap));
                        }
                        Lexeme::Punctuator(b'[') => {
                            self.stack.push(Container::Array);
                            self.array_just_opened = true;
                            self.state = State::ExpectValue;
                            return Ok(Some(Event::StartArray));
                        }
                        Lexeme::True => {
                            self.state = self.value_completed();
                            return Ok(Some(Event::Boolean(true)));
                        }
                        Lexeme::False => {
                            self.state = self.value_completed();
                            return Ok(Some(Event::Boolean(false)));
                        }
                        Lexeme::Null => {
                            self.state = self.value_completed();
                            return Ok(Some(Event::Null));
                        }
                        Lexeme::Number(text) => {
                            let n = NumberValue::parse(&text).ok_or_else(|| {
                                ParserError::invalid(pos, format!("malformed number {text:?}"))
                            })?;
                            self.state = self.value_completed();
                            return Ok(Some(Event::Number(n)));
                        }
                        Lexeme::String(raw) => {
                            let s = decode_string(&raw, pos)?;
                            self.state = self.value_completed();
                            return Ok(Some(Event::String(s)));
                        }
                        other => {
                            return Err(ParserError::invalid(
                                pos,
                                format!("expected a value, found {other:?}"),
                            ));
                        }
                    }
                }
                State::ExpectKey => match lexeme {
                    Lexeme::Punctuator(b'}') => {
                        self.stack.pop();
                        self.state = self.value_completed();
                        return Ok(Some(Event::EndMap));
                    }
                    Lexeme::String(raw) => {
                        let key = decode_string(&raw, pos)?;
                        self.state = State::ExpectColon;
                        return Ok(Some(Event::MapKey(key)));
                    }
                    other => {
                        return Err(ParserError::invalid(
                            pos,
                            format!("expected an object key or '}}', found {other:?}"),
                        ));
                    }
                },
                State::ExpectColon => match lexeme {
                    Lexeme::Punctuator(b':') => {
                        self.state = State::ExpectValue;
                    }
                    other => {
                        return Err(ParserError::invalid(
                            pos,
                            format!("expected ':', found {other:?}"),
                        ));
                    }
                },
                State::ExpectCommaOrEnd => match (self.stack.last(), &lexeme) {
                    (Some(Container::Map), Lexeme::Punctuator(b',')) => {
                        self.state = State::ExpectKey;
                    }
                    (Some(Container::Array), Lexeme::Punctuator(b',')) => {
                        self.state = State::ExpectValue;
                    }
                    (Some(Container::Map), Lexeme::Punctuator(b'}')) => {
                        self.stack.pop();
                        self.state = self.value_completed();
                        return Ok(Some(Event::EndMap));
                    }
                    (Some(Container::Array), Lexeme::Punctuator(b']')) => {
                        self.stack.pop();
                        self.state = self.value_completed();
                        return Ok(Some(Event::EndArray));
                    }
                    (_, other) => {
                        return Err(ParserError::invalid(
                            pos,
                            format!("expected ',' or a closing bracket, found {other:?}"),
                        ));
                    }
                },
                State::Done => {
                    return Err(ParserError::invalid(
                        pos,
                        format!("trailing data after top-level value: {lexeme:?}"),
                    ));
                }
            }
        }
    }
}

/// Decodes backslash escapes in a raw (still-escaped) string lexeme,
/// combining UTF-16 surrogate pairs into their code point (spec.md §4.2).
fn decode_string(raw: &str, lexeme_pos: usize) -> Result<String, ParserError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let esc = chars
            .next()
            .ok_or_else(|| ParserError::invalid(lexeme_pos, "dangling escape in string lexeme"))?;
        match esc {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let first = read_hex4(&mut chars, lexeme_pos)?;
                if (0xD800..=0xDBFF).contains(&first) {
                    // High surrogate: must be immediately followed by \uYYYY
                    // low surrogate (spec.md §9 Open Questions: unpaired
                    // surrogates fail strictly).
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(ParserError::invalid(
                            lexeme_pos,
                            "unpaired high surrogate in string",
                        ));
                    }
                    let second = read_hex4(&mut chars, lexeme_pos)?;
                    if !(0xDC00..=0xDFFF).contains(&second) {
                        return Err(ParserError::invalid(
                            lexeme_pos,
                            "high surrogate not followed by a low surrogate",
                        ));
                    }
                    let combined = 0x10000
                        + (u32::from(first) - 0xD800) * 0x400
                        + (u32::from(second) - 0xDC00);
                    let ch = char::from_u32(combined)
                        .ok_or_else(|| ParserError::invalid(lexeme_pos, "invalid surrogate pair"))?;
                    out.push(ch);
                } else if (0xDC00..=0xDFFF).contains(&first) {
                    return Err(ParserError::invalid(
                        lexeme_pos,
                        "unpaired low surrogate in string",
                    ));
                } else {
                    let ch = char::from_u32(u32::from(first))
                        .ok_or_else(|| ParserError::invalid(lexeme_pos, "invalid unicode escape"))?;
                    out.push(ch);
                }
            }
            other => {
                return Err(ParserError::invalid(
                    lexeme_pos,
                    format!("invalid escape sequence \\{other}"),
                ));
            }
        }
    }
    Ok(out)
}

fn read_hex4(
    chars: &mut core::iter::Peekable<core::str::Chars<'_>>,
    lexeme_pos: usize,
) -> Result<u16, ParserError> {
    let mut v: u16 = 0;
    for _ in 0..4 {
        let h = chars
            .next()
            .ok_or_else(|| ParserError::invalid(lexeme_pos, "truncated unicode escape"))?;
        let digit = h
            .to_digit(16)
            .ok_or_else(|| ParserError::invalid(lexeme_pos, "invalid unicode escape digit"))?;
        v = v * 16 + u16::try_from(digit).expect("hex digit fits in u16");
    }
    Ok(v)
}
