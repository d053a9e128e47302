//! Provider error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing {env_var} for {provider}")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Non-2xx status before streaming began. The body is kept verbatim.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header: {0}")]
    Header(String),
}

impl Error {
    /// Status code of an HTTP error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
