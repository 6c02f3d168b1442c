//! Demonstrates reacting to content-moderation feedback as soon as it
//! arrives, while a tool-call response from an LLM is still streaming in.
//!
//! The assistant's response is a JSON object describing a generated code
//! snippet, with a `moderation` field placed first so a backend can decide
//! whether to keep reading before the (potentially large) `code` field even
//! arrives:
//!
//! ```text
//! {
//!   "moderation": { "decision": "allow" | "block", "reason": string | null },
//!   "filename":   string,
//!   "language":   string,
//!   "code":       string
//! }
//! ```
//!
//! The example below feeds the document to the parser in small, irregular
//! chunks to mirror how a chat-completions API delivers partial tokens, and
//! uses [`ijson::kvitems`] to pull `moderation`'s fields out the moment that
//! sub-object closes — well before the rest of the document has arrived.
//!
//! Run with
//!
//! ```bash
//! cargo run -p ijson --example llm_tool_call
//! ```
#![allow(clippy::needless_raw_string_hashes)]

use ijson::{kvitems, ByteSource, ParserError, ParserOptions, Value};

/// Feeds a fixed sequence of byte chunks to the parser one at a time,
/// simulating a socket that only ever has a little data available per read.
struct ChunkedSource {
    chunks: std::vec::IntoIter<&'static [u8]>,
}

impl ByteSource for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ParserError> {
        let Some(chunk) = self.chunks.next() else {
            return Ok(0);
        };
        buf[..chunk.len()].copy_from_slice(chunk);
        Ok(chunk.len())
    }
}

fn main() {
    // A *toy* assistant response, streamed in ten tiny chunks. In real life
    // this would arrive from the network one small read at a time.
    let simulated_stream: [&[u8]; 10] = [
        br#"{"moderation":{"decision":"al"#,
        br#"lo"#,
        br#"w","reason":null},"#,
        br#""filename":"example.rs","#,
        br#""language":"rust","#,
        br#""code":"fn main() {\n"#,
        br#"    println!(\""#,
        br#"Hello"#,
        br#", world!\");\n"#,
        br#"}\n"}"#,
    ];

    let source = ChunkedSource {
        chunks: simulated_stream.into_iter(),
    };
    let mut moderation = kvitems(source, "moderation", ParserOptions::default());

    loop {
        match moderation.next_kv() {
            Ok(Some((key, value))) => {
                if key == "decision" {
                    if value == Value::String("block".into()) {
                        eprintln!("moderation blocked the content, aborting before `code` arrives");
                        return;
                    }
                    println!("moderation decision: {value}");
                }
            }
            Ok(None) => break,
            Err(e) if e.is_incomplete() => {
                // The simulated stream ended; a real socket source would
                // instead wait for more bytes before retrying.
                break;
            }
            Err(e) => panic!("parse error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_moderation_before_code_arrives() {
        let source = ChunkedSource {
            chunks: vec![
                br#"{"moderation":{"decision":"allow","reason":null},"#.as_slice(),
                br#""code":"whatever""#.as_slice(),
                br#"}"#.as_slice(),
            ]
            .into_iter(),
        };
        let mut it = kvitems(source, "moderation", ParserOptions::default());
        let mut out = Vec::new();
        while let Some(kv) = it.next_kv().unwrap() {
            out.push(kv);
        }
        assert_eq!(
            out,
            vec![
                ("decision".to_string(), Value::String("allow".into())),
                ("reason".to_string(), Value::Null),
            ]
        );
    }
}
