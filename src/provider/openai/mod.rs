//! OpenAI Chat Completions dialect.

mod stream;

pub use stream::StreamDelta;

use crate::provider::stream::StreamDialect;
use serde_json::Value;

pub const BASE_URL: &str = "https://api.openai.com";
pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Payload that ends an OpenAI stream.
pub const DONE: &str = "[DONE]";

/// Reads `choices[0].delta.content` and stops on `[DONE]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiDialect;

impl StreamDialect for OpenAiDialect {
    fn sentinel(&self) -> Option<&'static str> {
        Some(DONE)
    }

    fn extract_text(&self, event: &Value) -> Option<String> {
        StreamDelta::first(event)?
            .content
            .filter(|text| !text.is_empty())
    }
}
