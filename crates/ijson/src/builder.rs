//! The object builder: folds a flat event sequence into a [`Value`]
//! (spec.md §4.4).
//!
//! The builder's stack of partially constructed containers is an explicit
//! `Vec`, not recursion over the document's structure (spec.md §9, "builder
//! recursion -> explicit stack"), so its depth is bounded only by available
//! memory rather than the host's call stack.
use alloc::vec::Vec;

use crate::{
    event::Event,
    value::{Map, Value},
};

enum Frame {
    Array(Vec<Value>),
    Map { map: Map, pending_key: Option<alloc::string::String> },
}

/// Accumulates events into a single [`Value`] (spec.md §4.4).
///
/// Feed it every event of exactly one complete value subtree (one scalar, or
/// a balanced `start_X` ... `end_X` pair and everything between); call
/// [`ObjectBuilder::finish`] once the subtree is closed.
#[derive(Default)]
pub struct ObjectBuilder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl ObjectBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// Feeds one event into the builder.
    ///
    /// # Panics
    ///
    /// Panics if fed an `end_map`/`end_array` with no matching open frame, or
    /// a value while the top frame is a map with no pending key — both are
    /// internal invariant violations, not something a well-formed event
    /// stream can produce (spec.md §3, invariants).
    pub fn feed(&mut self, event: Event) {
        match event {
            Event::StartMap => self.stack.push(Frame::Map {
                map: Map::new(),
                pending_key: None,
            }),
            Event::StartArray => self.stack.push(Frame::Array(Vec::new())),
            Event::MapKey(k) => match self.stack.last_mut() {
                Some(Frame::Map { pending_key, .. }) => *pending_key = Some(k),
                _ => panic!("map_key event with no open map frame"),
            },
            Event::EndMap => {
                let Some(Frame::Map { map, .. }) = self.stack.pop() else {
                    panic!("end_map event with no open map frame");
                };
                self.assign(Value::Object(map));
            }
            Event::EndArray => {
                let Some(Frame::Array(arr)) = self.stack.pop() else {
                    panic!("end_array event with no open array frame");
                };
                self.assign(Value::Array(arr));
            }
            Event::Null => self.assign(Value::Null),
            Event::Boolean(b) => self.assign(Value::Boolean(b)),
            Event::Number(n) => self.assign(Value::Number(n)),
            Event::String(s) => self.assign(Value::String(s)),
        }
    }

    fn assign(&mut self, val: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(val),
            Some(Frame::Array(arr)) => arr.push(val),
            Some(Frame::Map { map, pending_key }) => {
                let key = pending_key
                    .take()
                    .expect("map value event with no preceding map_key");
                map.insert(key, val);
            }
        }
    }

    /// Consumes the builder, returning the completed value.
    ///
    /// Returns `None` if no events were ever fed, or if the fed events never
    /// closed back down to a single completed root.
    #[must_use]
    pub fn finish(self) -> Option<Value> {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::NumberValue;

    #[test]
    fn builds_scalar() {
        let mut b = ObjectBuilder::new();
        b.feed(Event::Number(NumberValue::from(42i64)));
        assert_eq!(b.finish(), Some(Value::Number(NumberValue::from(42i64))));
    }

    #[test]
    fn builds_nested_object_and_array() {
        let mut b = ObjectBuilder::new();
        for event in [
            Event::StartMap,
            Event::MapKey("a".into()),
            Event::StartArray,
            Event::Number(NumberValue::from(1i64)),
            Event::Number(NumberValue::from(2i64)),
            Event::EndArray,
            Event::MapKey("b".into()),
            Event::Null,
            Event::EndMap,
        ] {
            b.feed(event);
        }
        let mut expected = Map::new();
        expected.insert(
            "a".into(),
            Value::Array(alloc::vec![
                Value::Number(NumberValue::from(1i64)),
                Value::Number(NumberValue::from(2i64)),
            ]),
        );
        expected.insert("b".into(), Value::Null);
        assert_eq!(b.finish(), Some(Value::Object(expected)));
    }

    #[test]
    fn empty_builder_finishes_to_none() {
        let b = ObjectBuilder::new();
        assert_eq!(b.finish(), None);
    }
}
