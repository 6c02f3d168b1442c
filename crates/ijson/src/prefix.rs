//! The prefix tagger: wraps an event stream with a dotted JSON-path prefix
//! for every event (spec.md §4.3).
//!
//! The tagger maintains a frame stack in lockstep with the event stream's
//! container nesting. Each frame caches its own fully-joined path so that
//! computing a child's prefix is a single string concatenation rather than a
//! walk of the whole stack (spec.md §9, "prefix strings -> path vectors").
use alloc::string::String;

use crate::{error::ParserError, event::Event, parser::Parser, source::ByteSource};

/// A source of [`Event`]s: either the basic parser directly, or a prebuilt
/// sequence of already-parsed events (spec.md §6, `parse` accepts either).
pub trait EventSource {
    /// Returns the next event, or `None` at a clean end of the sequence.
    ///
    /// # Errors
    ///
    /// Propagates whatever error the underlying sequence failed with.
    fn next_event(&mut self) -> Result<Option<Event>, ParserError>;
}

impl<S: ByteSource> EventSource for Parser<S> {
    fn next_event(&mut self) -> Result<Option<Event>, ParserError> {
        Parser::next_event(self)
    }
}

impl<I: Iterator<Item = Result<Event, ParserError>>> EventSource for I {
    fn next_event(&mut self) -> Result<Option<Event>, ParserError> {
        self.next().transpose()
    }
}

/// One event paired with the dotted JSON-path of its container (spec.md §3,
/// "Prefixed event").
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixedEvent {
    /// The dotted path to the event's container. Array elements contribute
    /// the literal segment `item`; the root prefix is the empty string.
    pub prefix: String,
    /// The underlying event.
    pub event: Event,
}

enum FrameKind {
    Map,
    Array,
}

struct Frame {
    kind: FrameKind,
    own_path: String,
}

fn join(current: &str, label: &str) -> String {
    if current.is_empty() {
        String::from(label)
    } else {
        let mut s = String::with_capacity(current.len() + 1 + label.len());
        s.push_str(current);
        s.push('.');
        s.push_str(label);
        s
    }
}

/// Tags every event from an [`EventSource`] with its container's dotted
/// path (spec.md §4.3).
pub struct PrefixTagger<E> {
    inner: E,
    frames: alloc::vec::Vec<Frame>,
    pending_key: Option<String>,
}

impl<E: EventSource> PrefixTagger<E> {
    /// Wraps `inner`, tagging every event it produces.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            frames: alloc::vec::Vec::new(),
            pending_key: None,
        }
    }

    fn container_prefix(&self) -> &str {
        self.frames.last().map_or("", |f| f.own_path.as_str())
    }

    /// Computes the prefix for a value nested directly inside the current
    /// top frame (the frame's own path joined with its key or `item`), or
    /// the empty root prefix if there is no open frame.
    fn child_prefix(&mut self) -> String {
        match self.frames.last() {
            None => String::new(),
            Some(f) => match f.kind {
                FrameKind::Array => join(&f.own_path, "item"),
                FrameKind::Map => {
                    let key = self
                        .pending_key
                        .take()
                        .expect("every map value is preceded by a map_key event");
                    join(&f.own_path, &key)
                }
            },
        }
    }

    /// Returns the next prefixed event, or `None` at a clean end of input.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying event source.
    pub fn next_prefixed(&mut self) -> Result<Option<PrefixedEvent>, ParserError> {
        let Some(event) = self.inner.next_event()? else {
            return Ok(None);
        };
        let prefixed = match event {
            Event::StartMap | Event::StartArray => {
                let prefix = self.child_prefix();
                let kind = if matches!(event, Event::StartMap) {
                    FrameKind::Map
                } else {
                    FrameKind::Array
                };
                self.frames.push(Frame {
                    kind,
                    own_path: prefix.clone(),
                });
                PrefixedEvent { prefix, event }
            }
            Event::MapKey(ref k) => {
                let prefix = self.container_prefix().to_string();
                self.pending_key = Some(k.clone());
                PrefixedEvent { prefix, event }
            }
            Event::EndMap | Event::EndArray => {
                let prefix = self.container_prefix().to_string();
                self.frames.pop();
                PrefixedEvent { prefix, event }
            }
            Event::Null | Event::Boolean(_) | Event::Number(_) | Event::String(_) => {
                let prefix = self.child_prefix();
                PrefixedEvent { prefix, event }
            }
        };
        Ok(Some(prefixed))
    }
}
