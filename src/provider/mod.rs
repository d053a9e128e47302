//! LLM provider wire handling.
//!
//! Sends a chat request to OpenAI or Anthropic and decodes the streamed
//! server-sent events into JSON events and accumulated text.
//!
//! # Example
//!
//! ```ignore
//! use chatwire::provider::{Client, Provider};
//!
//! let client = Client::new(Provider::OpenAI, api_key)?;
//! let mut events = Vec::new();
//! let outcome = client.stream(&payload, &mut events).await?;
//! println!("{}", outcome.text);
//! ```

pub mod anthropic;
mod api_provider;
mod client;
mod error;
pub mod http;
pub mod openai;
mod stream;

pub use api_provider::Provider;
pub use client::{Client, StreamObserver};
pub use error::Error;
pub use stream::{LineOutcome, Outcome, StreamDecoder, StreamDialect, decode_lines};
