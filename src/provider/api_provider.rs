//! Supported vendor APIs and their wire conventions.

use super::anthropic::{self, AnthropicDialect};
use super::http::AuthConfig;
use super::openai::{self, OpenAiDialect};
use super::stream::StreamDialect;

/// Supported API providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI Chat Completions
    OpenAI,
    /// Anthropic Messages
    Anthropic,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[Provider::OpenAI, Provider::Anthropic];

    /// Lowercase ID for config storage and command-line values.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Display name for the provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    /// Environment variable holding the API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Environment variable overriding the base URL.
    pub fn base_url_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_BASE_URL",
            Provider::Anthropic => "ANTHROPIC_BASE_URL",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => openai::BASE_URL,
            Provider::Anthropic => anthropic::BASE_URL,
        }
    }

    /// Path of the streaming chat endpoint.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Provider::OpenAI => openai::CHAT_PATH,
            Provider::Anthropic => anthropic::MESSAGES_PATH,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => openai::DEFAULT_MODEL,
            Provider::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }

    /// How the API key is sent.
    pub fn auth(&self, api_key: impl Into<String>) -> AuthConfig {
        match self {
            Provider::OpenAI => AuthConfig::Bearer(api_key.into()),
            Provider::Anthropic => AuthConfig::ApiKey {
                header: anthropic::API_KEY_HEADER.to_string(),
                key: api_key.into(),
            },
        }
    }

    /// Fixed headers the vendor requires besides auth.
    pub fn extra_headers(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Provider::OpenAI => &[],
            Provider::Anthropic => &[("anthropic-version", anthropic::API_VERSION)],
        }
    }

    /// Stream decoding rules for this provider.
    pub fn dialect(&self) -> &'static dyn StreamDialect {
        match self {
            Provider::OpenAI => &OpenAiDialect,
            Provider::Anthropic => &AnthropicDialect,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
