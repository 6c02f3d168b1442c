#![allow(missing_docs)]

//! Supplemented from `original_source/tests.py`'s `SingleReadFile`-based
//! tests (`test_lazy_file_reading`, `test_item_building_greediness`,
//! `test_basic_parse_threaded`): a source must never be read from past the
//! point where it has signalled end of input, and completed array elements
//! must be yielded as soon as they close, even when the rest of the
//! document is truncated or still arriving.

use ijson::{items, ByteSource, ParserError, ParserOptions, Value};

/// Mirrors `SingleReadFile`: hands back its entire payload on the first
/// call, then panics if `read` is ever called again after returning `0`.
struct SingleReadSource<'a> {
    remaining: &'a [u8],
    returned_empty: bool,
}

impl<'a> SingleReadSource<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { remaining: data, returned_empty: false }
    }
}

impl ByteSource for SingleReadSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError> {
        assert!(!self.returned_empty, "read() called again after returning 0");
        let n = buf.len().min(self.remaining.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        if n == 0 {
            self.returned_empty = true;
        }
        Ok(n)
    }
}

/// `PARTIAL_ARRAY_JSONS`: each document is a truncated top-level array whose
/// *complete* leading elements must still surface through `items(.., "item")`
/// before the parser ever reports the truncation as incomplete input.
fn partial_array_cases() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        ("[1,", vec![Value::Number(1i64.into())]),
        ("[1, 2 ", vec![Value::Number(1i64.into()), Value::Number(2i64.into())]),
        (
            r#"[1, "abc""#,
            vec![Value::Number(1i64.into()), Value::String("abc".into())],
        ),
        (
            r#"[{"abc": [0, 1]}"#,
            vec![{
                let mut m = ijson::Map::new();
                m.insert(
                    "abc".to_string(),
                    Value::Array(vec![Value::Number(0i64.into()), Value::Number(1i64.into())]),
                );
                Value::Object(m)
            }],
        ),
    ]
}

#[test]
fn items_yield_each_complete_element_before_truncation_is_reported() {
    for (doc, expected) in partial_array_cases() {
        let source = SingleReadSource::new(doc.as_bytes());
        let mut it = items(source, "item", ParserOptions::default());
        for expect in expected {
            let got = it.next_item().unwrap().expect("expected a complete element");
            assert_eq!(got, expect, "document: {doc:?}");
        }
    }
}

#[test]
fn basic_parse_never_reads_past_end_of_input() {
    let source = SingleReadSource::new(br#"{"a":1}"#);
    let mut parser = ijson::basic_parse(source, ParserOptions::default());
    while parser.next_event().unwrap().is_some() {}
    // A further call after `Ok(None)` must not touch the source again.
    assert_eq!(parser.next_event().unwrap(), None);
}

/// `test_basic_parse_threaded`: two independent pipelines over two
/// independent sources run concurrently without sharing any state.
#[test]
fn independent_pipelines_are_safe_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let doc = format!(r#"{{"n":{i}}}"#);
                let mut it = items(doc.as_bytes(), "", ParserOptions::default());
                let value = it.next_item().unwrap().unwrap();
                assert_eq!(it.next_item().unwrap(), None);
                value.to_string()
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result, format!(r#"{{"n":{i}}}"#));
    }
}
