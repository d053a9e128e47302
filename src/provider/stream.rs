//! Stream decoding shared by all providers.
//!
//! A [`StreamDecoder`] consumes the lines of one SSE response body, yields the
//! decoded JSON events, and accumulates the text the provider's
//! [`StreamDialect`] extracts from them.

use crate::provider::http::data_payload;
use serde_json::Value;

/// Vendor-specific rules for reading a streamed response.
pub trait StreamDialect: Send + Sync {
    /// Payload that marks normal end of stream, if the vendor sends one.
    fn sentinel(&self) -> Option<&'static str> {
        None
    }

    /// Incremental text carried by one decoded event.
    fn extract_text(&self, event: &Value) -> Option<String>;
}

/// What a single line contributed to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank line, non-data line, or a line after the sentinel.
    Ignored,
    /// Data line whose payload is not valid JSON.
    Skipped,
    /// Decoded event, handed back for display.
    Event(Value),
    /// End-of-stream sentinel.
    Done,
}

/// Summary of a finished decode session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Concatenation of every extracted fragment, in arrival order.
    pub text: String,
    /// Number of events decoded.
    pub events: usize,
    /// Number of data lines dropped as malformed.
    pub skipped: usize,
    /// Whether the stream ended with the sentinel rather than EOF.
    pub sentinel_seen: bool,
}

/// Decoder for one streamed response.
pub struct StreamDecoder<'a> {
    dialect: &'a dyn StreamDialect,
    fragments: Vec<String>,
    events: usize,
    skipped: usize,
    done: bool,
}

impl<'a> StreamDecoder<'a> {
    pub fn new(dialect: &'a dyn StreamDialect) -> Self {
        Self {
            dialect,
            fragments: Vec::new(),
            events: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Decode one line of the body.
    pub fn decode_line(&mut self, line: &str) -> LineOutcome {
        if self.done || line.is_empty() {
            return LineOutcome::Ignored;
        }
        let Some(payload) = data_payload(line) else {
            return LineOutcome::Ignored;
        };

        if self.dialect.sentinel() == Some(payload) {
            self.done = true;
            return LineOutcome::Done;
        }

        match serde_json::from_str::<Value>(payload) {
            Ok(event) => {
                self.events += 1;
                if let Some(text) = self.dialect.extract_text(&event)
                    && !text.is_empty()
                {
                    self.fragments.push(text);
                }
                LineOutcome::Event(event)
            }
            Err(e) => {
                self.skipped += 1;
                tracing::debug!("Skipping malformed stream line: {e}\nData: {payload}");
                LineOutcome::Skipped
            }
        }
    }

    /// True once the sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Text accumulated so far.
    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    pub fn finish(self) -> Outcome {
        Outcome {
            text: self.fragments.concat(),
            events: self.events,
            skipped: self.skipped,
            sentinel_seen: self.done,
        }
    }
}

/// Decode a complete, already-split stream.
pub fn decode_lines<'l>(
    dialect: &dyn StreamDialect,
    lines: impl IntoIterator<Item = &'l str>,
) -> Outcome {
    let mut decoder = StreamDecoder::new(dialect);
    for line in lines {
        if decoder.decode_line(line) == LineOutcome::Done {
            break;
        }
    }
    decoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads a top-level `text` field; ends on `END`.
    struct TestDialect;

    impl StreamDialect for TestDialect {
        fn sentinel(&self) -> Option<&'static str> {
            Some("END")
        }

        fn extract_text(&self, event: &Value) -> Option<String> {
            event.get("text")?.as_str().map(str::to_string)
        }
    }

    #[test]
    fn test_blank_and_non_data_lines_ignored() {
        let mut decoder = StreamDecoder::new(&TestDialect);
        assert_eq!(decoder.decode_line(""), LineOutcome::Ignored);
        assert_eq!(decoder.decode_line("event: delta"), LineOutcome::Ignored);
        assert_eq!(decoder.decode_line(": comment"), LineOutcome::Ignored);
        assert_eq!(decoder.finish(), Outcome::default());
    }

    #[test]
    fn test_event_returned_and_text_accumulated() {
        let mut decoder = StreamDecoder::new(&TestDialect);
        let outcome = decoder.decode_line(r#"data: {"text":"ab"}"#);
        assert_eq!(outcome, LineOutcome::Event(serde_json::json!({"text": "ab"})));
        decoder.decode_line(r#"data: {"text":"cd"}"#);
        assert_eq!(decoder.text(), "abcd");
    }

    #[test]
    fn test_malformed_line_skipped() {
        let outcome = decode_lines(
            &TestDialect,
            [
                r#"data: {"text":"a"}"#,
                r#"data: {"text":"#,
                "data: not json",
                r#"data: {"text":"b"}"#,
            ],
        );
        assert_eq!(outcome.text, "ab");
        assert_eq!(outcome.events, 2);
        assert_eq!(outcome.skipped, 2);
        assert!(!outcome.sentinel_seen);
    }

    #[test]
    fn test_sentinel_stops_decoding() {
        let mut decoder = StreamDecoder::new(&TestDialect);
        decoder.decode_line(r#"data: {"text":"a"}"#);
        assert_eq!(decoder.decode_line("data: END"), LineOutcome::Done);
        assert!(decoder.is_done());
        assert_eq!(
            decoder.decode_line(r#"data: {"text":"late"}"#),
            LineOutcome::Ignored
        );
        let outcome = decoder.finish();
        assert_eq!(outcome.text, "a");
        assert!(outcome.sentinel_seen);
    }

    #[test]
    fn test_event_without_text_still_counted() {
        let outcome = decode_lines(&TestDialect, [r#"data: {"other":1}"#, r#"data: {"text":""}"#]);
        assert_eq!(outcome.events, 2);
        assert!(outcome.text.is_empty());
    }
}
