#![allow(missing_docs)]

//! spec.md §8, testable property #3/#4: feeding a document through the
//! lexer in arbitrary byte-sized chunks must yield the same materialized
//! value as feeding it whole.

use ijson::{items, ByteSource, ParserError, ParserOptions};
use quickcheck::{Arbitrary, Gen, QuickCheck};

/// A JSON value restricted to a charset whose escaped form is itself, so
/// `Display`-ing a materialized [`ijson::Value`] reproduces this generator's
/// own textual rendering exactly (no escaping ambiguity to account for).
#[derive(Clone, Debug)]
enum GenValue {
    Null,
    Bool(bool),
    Int(i32),
    Str(String),
    Array(Vec<GenValue>),
    Object(Vec<(String, GenValue)>),
}

const KEY_ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', '0', '1', '2', '_',
];

fn gen_string(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 6;
    (0..len)
        .map(|_| *g.choose(KEY_ALPHABET).unwrap())
        .collect()
}

fn gen_value(g: &mut Gen, depth: u32) -> GenValue {
    let choice = if depth == 0 {
        u32::arbitrary(g) % 4
    } else {
        u32::arbitrary(g) % 6
    };
    match choice {
        0 => GenValue::Null,
        1 => GenValue::Bool(bool::arbitrary(g)),
        2 => GenValue::Int(i32::arbitrary(g) % 1_000_000),
        3 => GenValue::Str(gen_string(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            GenValue::Array((0..len).map(|_| gen_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            GenValue::Object(
                (0..len)
                    .map(|_| (gen_string(g), gen_value(g, depth - 1)))
                    .collect(),
            )
        }
    }
}

impl Arbitrary for GenValue {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_value(g, 3)
    }
}

impl core::fmt::Display for GenValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{k}\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

struct ChunkedBytes<'a> {
    remaining: &'a [u8],
    splits: std::vec::IntoIter<usize>,
}

impl ByteSource for ChunkedBytes<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError> {
        if self.remaining.is_empty() {
            return Ok(0);
        }
        let want = self.splits.next().unwrap_or(self.remaining.len()).max(1);
        let n = buf.len().min(want).min(self.remaining.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        Ok(n)
    }
}

#[test]
fn partition_roundtrip_quickcheck() {
    fn prop(value: GenValue, splits: Vec<usize>) -> bool {
        let src = value.to_string();
        if src.is_empty() {
            return true;
        }
        let splits = splits.into_iter().map(|s| 1 + s % 7).collect::<Vec<_>>();
        let source = ChunkedBytes {
            remaining: src.as_bytes(),
            splits: splits.into_iter(),
        };
        let mut it = items(source, "", ParserOptions::default());
        let Ok(Some(materialized)) = it.next_item() else {
            return false;
        };
        if it.next_item() != Ok(None) {
            return false;
        }
        materialized.to_string() == src
    }

    let tests = if cfg!(any(miri, feature = "test-fast")) { 20 } else { 500 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(GenValue, Vec<usize>) -> bool);
}
