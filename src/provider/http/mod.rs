//! Shared HTTP utilities for LLM providers.

mod client;
mod sse;

pub use client::{AuthConfig, HttpClient};
pub use sse::{DATA_PREFIX, LineBuffer, data_payload};
