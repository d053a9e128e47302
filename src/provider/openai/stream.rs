//! OpenAI Chat Completions streaming delta type.
//!
//! Only `choices[0].delta` is read. The rest of a chunk (other choices,
//! `finish_reason`, `role`, tool calls) is never deserialized, so an odd shape
//! there cannot hide the text.

use serde::Deserialize;
use serde_json::Value;

/// Delta of the first choice in a streaming chunk.
#[derive(Debug, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl StreamDelta {
    /// The `choices[0].delta` object of a chunk, if it has one.
    pub fn first(chunk: &Value) -> Option<Self> {
        let delta = chunk.get("choices")?.get(0)?.get("delta")?;
        Self::deserialize(delta).ok()
    }
}
