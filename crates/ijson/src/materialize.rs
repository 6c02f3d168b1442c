//! `items`/`kvitems`: materializing sub-documents under a matched prefix
//! (spec.md §4.4).
//!
//! Both iterators drive a [`PrefixTagger`] and activate an [`ObjectBuilder`]
//! only while inside a sub-tree whose prefix equals the requested path, so a
//! document with no match at all uses constant memory regardless of its size
//! (spec.md §5, resource bounds).
use alloc::string::String;

use crate::{
    builder::ObjectBuilder,
    error::ParserError,
    event::Event,
    prefix::{EventSource, PrefixTagger},
    value::Value,
};

/// Feeds `first` and, if it opens a container, every event up to and
/// including its matching close, into a fresh [`ObjectBuilder`].
fn materialize_one<E: EventSource>(
    tagger: &mut PrefixTagger<E>,
    first: Event,
) -> Result<Value, ParserError> {
    let mut builder = ObjectBuilder::new();
    let is_container = first.is_container_start();
    builder.feed(first);
    if is_container {
        let mut depth = 1usize;
        while depth > 0 {
            let Some(inner) = tagger.next_prefixed()? else {
                return Err(ParserError::incomplete(
                    0,
                    "stream ended while materializing a matched sub-tree",
                ));
            };
            if inner.event.is_container_start() {
                depth += 1;
            } else if inner.event.is_container_end() {
                depth -= 1;
            }
            builder.feed(inner.event);
        }
    }
    Ok(builder
        .finish()
        .expect("a scalar or a balanced subtree always yields exactly one value"))
}

/// Yields one materialized [`Value`] per occurrence of a prefix in an event
/// stream (spec.md §4.4, `items`).
pub struct Items<E> {
    tagger: PrefixTagger<E>,
    path: String,
}

impl<E: EventSource> Items<E> {
    /// Creates an iterator yielding every value whose prefix equals `path`.
    pub fn new(inner: E, path: impl Into<String>) -> Self {
        Self {
            tagger: PrefixTagger::new(inner),
            path: path.into(),
        }
    }

    /// Returns the next matched value, or `None` once the stream ends.
    ///
    /// # Errors
    ///
    /// Propagates any lexing/parsing error, or [`ParserError::IncompleteInput`]
    /// if the stream ends partway through a matched sub-tree.
    pub fn next_item(&mut self) -> Result<Option<Value>, ParserError> {
        loop {
            let Some(pe) = self.tagger.next_prefixed()? else {
                return Ok(None);
            };
            if pe.prefix == self.path {
                return Ok(Some(materialize_one(&mut self.tagger, pe.event)?));
            }
        }
    }
}

/// Yields a `(key, value)` pair for each direct child of the map matched by
/// a prefix (spec.md §4.4, `kvitems`).
///
/// If the matched sub-tree is not a map, nothing is yielded for that
/// occurrence (an array or a scalar is consumed and discarded silently)
/// rather than failing.
pub struct KvItems<E> {
    tagger: PrefixTagger<E>,
    path: String,
    /// `true` while positioned just inside a matched map, reading its direct
    /// children.
    active: bool,
}

impl<E: EventSource> KvItems<E> {
    /// Creates an iterator yielding the direct key/value pairs of the map
    /// matched by `path`.
    pub fn new(inner: E, path: impl Into<String>) -> Self {
        Self {
            tagger: PrefixTagger::new(inner),
            path: path.into(),
            active: false,
        }
    }

    /// Returns the next `(key, value)` pair, or `None` once the stream ends.
    ///
    /// # Errors
    ///
    /// Propagates any lexing/parsing error, or [`ParserError::IncompleteInput`]
    /// if the stream ends partway through a matched map or its value.
    pub fn next_kv(&mut self) -> Result<Option<(String, Value)>, ParserError> {
        loop {
            if self.active {
                let Some(pe) = self.tagger.next_prefixed()? else {
                    return Ok(None);
                };
                match pe.event {
                    Event::MapKey(k) => {
                        let Some(value_pe) = self.tagger.next_prefixed()? else {
                            return Err(ParserError::incomplete(
                                0,
                                "stream ended after a map key with no value",
                            ));
                        };
                        let value = materialize_one(&mut self.tagger, value_pe.event)?;
                        return Ok(Some((k, value)));
                    }
                    Event::EndMap => {
                        self.active = false;
                    }
                    other => unreachable!(
                        "direct child of a matched map can only be map_key or end_map, got {other:?}"
                    ),
                }
            } else {
                let Some(pe) = self.tagger.next_prefixed()? else {
                    return Ok(None);
                };
                if pe.prefix == self.path {
                    match pe.event {
                        Event::StartMap => self.active = true,
                        other => {
                            // Not a map: consume and discard the whole
                            // sub-tree, yielding nothing for this occurrence.
                            materialize_one(&mut self.tagger, other)?;
                        }
                    }
                }
            }
        }
    }
}
