//! Catalog of example chat requests.
//!
//! Each scenario exists once per provider, written in that vendor's message
//! format. Images are read from the asset directory only when a scenario
//! embeds one.

mod anthropic;
pub mod image;
mod openai;

pub use image::{Assets, ImageData, load_image};

use crate::error::Result;
use crate::provider::Provider;
use serde_json::Value;

/// An example request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// System prompt plus one user turn.
    SimpleChat,
    /// User turn with an attached image.
    ImageInput,
    /// Tool definitions offered; the model should call one.
    ToolCall,
    /// Completed tool call and its result fed back.
    ToolResponse,
    /// Tool result that carries an image.
    ImageInTool,
}

impl Scenario {
    pub const ALL: &'static [Scenario] = &[
        Scenario::SimpleChat,
        Scenario::ImageInput,
        Scenario::ToolCall,
        Scenario::ToolResponse,
        Scenario::ImageInTool,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Scenario::SimpleChat => "simple_chat",
            Scenario::ImageInput => "image_input",
            Scenario::ToolCall => "tool_call",
            Scenario::ToolResponse => "tool_response",
            Scenario::ImageInTool => "image_in_tool",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self, provider: Provider) -> &'static str {
        match (provider, self) {
            (Provider::Anthropic, Scenario::ImageInput) => anthropic::IMAGE_INPUT_MODEL,
            _ => provider.default_model(),
        }
    }

    /// Build the streaming request body for a provider.
    pub fn payload(&self, provider: Provider, assets: &Assets, model: Option<&str>) -> Result<Value> {
        let model = model.unwrap_or_else(|| self.default_model(provider));
        match provider {
            Provider::OpenAI => openai::payload(*self, assets, model),
            Provider::Anthropic => anthropic::payload(*self, assets, model),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn assets_with_images() -> (TempDir, Assets) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(image::TIRES_IMAGE), b"tires").unwrap();
        std::fs::write(dir.path().join(image::PLOT_IMAGE), b"plot").unwrap();
        let assets = Assets::new(dir.path());
        (dir, assets)
    }

    #[test]
    fn test_every_payload_streams_with_model() {
        let (_dir, assets) = assets_with_images();
        for &provider in Provider::ALL {
            for scenario in Scenario::ALL {
                let payload = scenario.payload(provider, &assets, None).unwrap();
                assert_eq!(payload["stream"], true, "{provider} {scenario}");
                assert_eq!(
                    payload["model"],
                    scenario.default_model(provider),
                    "{provider} {scenario}"
                );
            }
        }
    }

    #[test]
    fn test_model_override() {
        let payload = Scenario::ImageInput
            .payload(Provider::Anthropic, &assets_with_images().1, Some("claude-x"))
            .unwrap();
        assert_eq!(payload["model"], "claude-x");
    }

    #[test]
    fn test_default_models() {
        assert_eq!(Scenario::SimpleChat.default_model(Provider::OpenAI), "gpt-4o");
        assert_eq!(Scenario::ImageInput.default_model(Provider::OpenAI), "gpt-4o");
        assert_eq!(
            Scenario::SimpleChat.default_model(Provider::Anthropic),
            "claude-sonnet-4-5-20250929"
        );
        assert_eq!(
            Scenario::ImageInput.default_model(Provider::Anthropic),
            "claude-3-5-sonnet-20241022"
        );
    }

    #[test]
    fn test_text_scenarios_need_no_images() {
        let dir = TempDir::new().unwrap();
        let assets = Assets::new(dir.path());
        for &provider in Provider::ALL {
            for scenario in [Scenario::SimpleChat, Scenario::ToolCall, Scenario::ToolResponse] {
                assert!(scenario.payload(provider, &assets, None).is_ok());
            }
            assert!(Scenario::ImageInput.payload(provider, &assets, None).is_err());
            assert!(Scenario::ImageInTool.payload(provider, &assets, None).is_err());
        }
    }
}
