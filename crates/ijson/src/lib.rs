//! An incremental, event-driven JSON parser for streams larger than memory.
//!
//! The pipeline is four stages (spec.md §2): a buffered [`lexer`] tokenizes
//! a byte/text stream; the basic [`parser`] turns lexemes into a flat
//! [`Event`] sequence, validating JSON grammar; the [`prefix`] tagger
//! annotates each event with the dotted JSON-path of its container; and
//! [`materialize`]'s `Items`/`KvItems` fold the events under a matched path
//! back into [`Value`]s. Each stage is a pull-based iterator-like type: a
//! pipeline performs no I/O until the caller actually asks for the next
//! item.
//!
//! ```rust
//! use ijson::{items, ParserOptions};
//!
//! let input = br#"{"docs":[{"a":1},{"a":2}]}"#;
//! let mut it = items(input.as_slice(), "docs.item.a", ParserOptions::default());
//! let mut collected = Vec::new();
//! while let Some(v) = it.next_item().unwrap() {
//!     collected.push(v.to_string());
//! }
//! assert_eq!(collected, vec!["1", "2"]);
//! ```
#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod builder;
mod error;
mod event;
mod lexer;
mod materialize;
mod number;
mod options;
mod parser;
mod prefix;
mod source;
mod value;

use alloc::string::String;

pub use builder::ObjectBuilder;
pub use error::ParserError;
pub use event::Event;
pub use lexer::{Lexeme, DEFAULT_BUF_SIZE};
pub use materialize::{Items, KvItems};
pub use number::NumberValue;
pub use options::ParserOptions;
pub use parser::Parser;
pub use prefix::{EventSource, PrefixTagger, PrefixedEvent};
pub use source::{ByteSource, TextSource};
pub use value::{Array, Map, Value};

/// Tokenizes `source` into a flat [`Event`] sequence, validating JSON
/// grammar (spec.md §6).
///
/// Construction alone performs no I/O; events are only produced as the
/// caller drives [`Parser::next_event`].
pub fn basic_parse<S: ByteSource>(source: S, options: ParserOptions) -> Parser<S> {
    Parser::with_options(source, options)
}

/// Tags every event of `source` with the dotted JSON-path of its container
/// (spec.md §6), composing [`basic_parse`] internally.
pub fn parse<S: ByteSource>(source: S, options: ParserOptions) -> PrefixTagger<Parser<S>> {
    PrefixTagger::new(basic_parse(source, options))
}

/// Tags every event of a prebuilt event sequence with the dotted JSON-path
/// of its container (spec.md §6's "or a prebuilt event sequence").
pub fn parse_events<E: EventSource>(events: E) -> PrefixTagger<E> {
    PrefixTagger::new(events)
}

/// Yields one materialized [`Value`] per occurrence of `path` in `source`
/// (spec.md §6), composing [`basic_parse`] internally.
pub fn items<S: ByteSource>(
    source: S,
    path: impl Into<String>,
    options: ParserOptions,
) -> Items<Parser<S>> {
    Items::new(basic_parse(source, options), path)
}

/// Yields one materialized [`Value`] per occurrence of `path` in a prebuilt
/// event sequence.
pub fn items_from_events<E: EventSource>(events: E, path: impl Into<String>) -> Items<E> {
    Items::new(events, path)
}

/// Yields a `(key, value)` pair for each direct child of the map matched by
/// `path` in `source` (spec.md §6), composing [`basic_parse`] internally.
///
/// If the matched sub-tree is not a map, that occurrence yields nothing.
pub fn kvitems<S: ByteSource>(
    source: S,
    path: impl Into<String>,
    options: ParserOptions,
) -> KvItems<Parser<S>> {
    KvItems::new(basic_parse(source, options), path)
}

/// Yields a `(key, value)` pair for each direct child of the map matched by
/// `path` in a prebuilt event sequence.
pub fn kvitems_from_events<E: EventSource>(events: E, path: impl Into<String>) -> KvItems<E> {
    KvItems::new(events, path)
}
