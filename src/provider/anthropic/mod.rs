//! Anthropic Messages API dialect.

mod stream;

pub use stream::{ApiError, ContentDelta, StreamEvent};

use crate::provider::stream::StreamDialect;
use serde::Deserialize;
use serde_json::Value;

pub const BASE_URL: &str = "https://api.anthropic.com";
pub const MESSAGES_PATH: &str = "/v1/messages";
pub const API_VERSION: &str = "2023-06-01";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Reads `delta.text` from `content_block_delta` / `text_delta` events.
///
/// Anthropic streams end when the connection closes; there is no sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicDialect;

impl StreamDialect for AnthropicDialect {
    fn extract_text(&self, event: &Value) -> Option<String> {
        match StreamEvent::deserialize(event) {
            Ok(StreamEvent::ContentBlockDelta {
                delta: ContentDelta::Text { text },
            }) if !text.is_empty() => Some(text),
            Ok(StreamEvent::Error { error }) => {
                tracing::warn!(
                    error_type = %error.error_type,
                    "Anthropic stream error: {}",
                    error.message
                );
                None
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Unrecognised Anthropic event shape: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::stream::decode_lines;
    use serde_json::json;

    #[test]
    fn test_extract_text_delta() {
        let event = json!({"type": "content_block_delta", "delta": {"type": "text_delta", "text": "Hello"}});
        assert_eq!(AnthropicDialect.extract_text(&event).as_deref(), Some("Hello"));
    }

    #[test]
    fn test_extract_requires_both_types() {
        // Right delta type, wrong event type
        let event = json!({"type": "content_block_start", "delta": {"type": "text_delta", "text": "x"}});
        assert_eq!(AnthropicDialect.extract_text(&event), None);

        // Right event type, wrong delta type
        let event = json!({"type": "content_block_delta", "delta": {"type": "thinking_delta", "thinking": "x"}});
        assert_eq!(AnthropicDialect.extract_text(&event), None);

        // Missing delta, missing text
        assert_eq!(AnthropicDialect.extract_text(&json!({"type": "content_block_delta"})), None);
        let event = json!({"type": "content_block_delta", "delta": {"type": "text_delta"}});
        assert_eq!(AnthropicDialect.extract_text(&event), None);
    }

    #[test]
    fn test_no_sentinel() {
        assert_eq!(AnthropicDialect.sentinel(), None);
    }

    #[test]
    fn test_hello_then_close() {
        let outcome = decode_lines(
            &AnthropicDialect,
            [r#"data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"Hello"}}"#],
        );
        assert_eq!(outcome.text, "Hello");
        assert!(!outcome.sentinel_seen);
    }

    #[test]
    fn test_done_payload_is_just_malformed() {
        let outcome = decode_lines(
            &AnthropicDialect,
            [
                "data: [DONE]",
                r#"data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"after"}}"#,
            ],
        );
        assert_eq!(outcome.text, "after");
        assert_eq!(outcome.skipped, 1);
        assert!(!outcome.sentinel_seen);
    }

    #[test]
    fn test_realistic_stream() {
        let body = [
            "event: message_start",
            r#"data: {"type":"message_start","message":{"id":"msg_1","type":"message","role":"assistant","content":[],"model":"claude-sonnet-4-5-20250929","usage":{"input_tokens":12,"output_tokens":1}}}"#,
            "",
            "event: content_block_start",
            r#"data: {"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}"#,
            "",
            "event: ping",
            r#"data: {"type": "ping"}"#,
            "",
            "event: content_block_delta",
            r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Morning"}}"#,
            "",
            "event: content_block_delta",
            r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":" dew"}}"#,
            "",
            "event: content_block_delta",
            r#"data: {"type":"content_block_delta","index":1,"delta":{"type":"input_json_delta","partial_json":"{\"loc"}}"#,
            "",
            "event: content_block_stop",
            r#"data: {"type":"content_block_stop","index":0}"#,
            "",
            "event: message_delta",
            r#"data: {"type":"message_delta","delta":{"stop_reason":"end_turn","stop_sequence":null},"usage":{"output_tokens":15}}"#,
            "",
            "event: message_stop",
            r#"data: {"type":"message_stop"}"#,
            "",
        ];
        let outcome = decode_lines(&AnthropicDialect, body);
        assert_eq!(outcome.text, "Morning dew");
        assert_eq!(outcome.events, 9);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_error_event_yields_no_text() {
        let event = json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}});
        assert_eq!(AnthropicDialect.extract_text(&event), None);
        let event = json!({"type": "error", "error": {}});
        assert_eq!(AnthropicDialect.extract_text(&event), None);
    }

    #[test]
    fn test_error_event_mid_stream_does_not_abort() {
        let outcome = decode_lines(
            &AnthropicDialect,
            [
                r#"data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"Part"}}"#,
                r#"data: {"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
                r#"data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"ial"}}"#,
            ],
        );
        assert_eq!(outcome.text, "Partial");
        assert_eq!(outcome.events, 3);
        assert_eq!(outcome.skipped, 0);
    }
}
