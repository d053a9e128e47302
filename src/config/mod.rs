use crate::error::{Error, Result};
use crate::provider::{Error as ProviderError, Provider};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "CHATWIRE_CONFIG";

/// Resolved settings for one run.
///
/// Built once at startup: `.env` is loaded into the environment, the optional
/// TOML file is read, then provider environment variables override the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub anthropic_model: Option<String>,
    /// Directory holding `tires.jpeg` and `plot.png`. Defaults to the working directory.
    pub asset_dir: Option<PathBuf>,
}

/// Default config file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("chatwire").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".chatwire/config.toml"))
}

impl Config {
    /// Load `.env`, the config file, and environment overrides.
    pub fn load() -> Result<Self> {
        // A missing .env is normal
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        let path = match std::env::var_os(CONFIG_ENV) {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "{CONFIG_ENV} points to a missing file: {}",
                        path.display()
                    )));
                }
                path
            }
            None => config_path(),
        };
        let mut config = Self::from_file(&path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a TOML config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Override file values with non-empty environment variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        for &provider in Provider::ALL {
            if let Some(key) = get(provider.env_var()) {
                *self.api_key_slot(provider) = Some(key);
            }
            if let Some(url) = get(provider.base_url_env_var()) {
                *self.base_url_slot(provider) = Some(url);
            }
        }
    }

    fn api_key_slot(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::OpenAI => &mut self.openai_api_key,
            Provider::Anthropic => &mut self.anthropic_api_key,
        }
    }

    fn base_url_slot(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::OpenAI => &mut self.openai_base_url,
            Provider::Anthropic => &mut self.anthropic_base_url,
        }
    }

    /// API key for a provider, if one is set and non-empty.
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// API key for a provider, or the error naming the variable to set.
    pub fn require_api_key(&self, provider: Provider) -> std::result::Result<&str, ProviderError> {
        self.api_key(provider).ok_or(ProviderError::MissingApiKey {
            provider: provider.name(),
            env_var: provider.env_var(),
        })
    }

    pub fn base_url(&self, provider: Provider) -> &str {
        let url = match provider {
            Provider::OpenAI => self.openai_base_url.as_deref(),
            Provider::Anthropic => self.anthropic_base_url.as_deref(),
        };
        url.filter(|u| !u.is_empty())
            .unwrap_or_else(|| provider.default_base_url())
    }

    /// Configured model override; `None` means the scenario default.
    pub fn model(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAI => self.openai_model.as_deref(),
            Provider::Anthropic => self.anthropic_model.as_deref(),
        }
    }

    pub fn asset_dir(&self) -> &Path {
        self.asset_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}
