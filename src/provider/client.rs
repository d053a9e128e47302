//! Streaming chat client: one request, one decode session.

use super::api_provider::Provider;
use super::error::Error;
use super::http::{HttpClient, LineBuffer};
use super::stream::{LineOutcome, Outcome, StreamDecoder};
use futures::StreamExt;
use serde::Serialize;
use serde_json::Value;

/// Receives decoded events as they arrive.
pub trait StreamObserver {
    /// Called for every decoded event, in arrival order.
    fn on_event(&mut self, _event: &Value) {}

    /// Called once if the stream ends with the provider's sentinel.
    fn on_done(&mut self) {}
}

/// Discards all events.
impl StreamObserver for () {}

/// Collects events in memory.
impl StreamObserver for Vec<Value> {
    fn on_event(&mut self, event: &Value) {
        self.push(event.clone());
    }
}

/// Client for a provider's streaming chat endpoint.
#[derive(Debug)]
pub struct Client {
    provider: Provider,
    http: HttpClient,
}

impl Client {
    /// Create a new client against the provider's public endpoint.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(provider, api_key, provider.default_base_url())
    }

    /// Create a client against a custom base URL (for proxies or local servers).
    pub fn with_base_url(
        provider: Provider,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut http = HttpClient::new(base_url, provider.auth(api_key));
        for &(name, value) in provider.extra_headers() {
            http = http.with_header(name, value)?;
        }
        Ok(Self { provider, http })
    }

    /// Get the provider type.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Send a streaming request and decode the response to completion.
    ///
    /// Ends at EOF or at the provider's sentinel. The connection is released
    /// when this returns, whatever the outcome.
    pub async fn stream<T: Serialize>(
        &self,
        payload: &T,
        observer: &mut dyn StreamObserver,
    ) -> Result<Outcome, Error> {
        tracing::debug!(
            provider = self.provider.id(),
            base_url = self.http.base_url(),
            "Stream request"
        );

        let body = self
            .http
            .post_stream(self.provider.endpoint_path(), payload)
            .await?;
        futures::pin_mut!(body);

        let mut lines = LineBuffer::new();
        let mut decoder = StreamDecoder::new(self.provider.dialect());

        'read: while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for line in lines.feed(&chunk) {
                if dispatch(&mut decoder, &line, observer) {
                    break 'read;
                }
            }
        }

        if decoder.is_done() {
            if lines.has_pending() {
                tracing::debug!("Ignoring partial line after sentinel");
            }
        } else if let Some(line) = lines.finish() {
            dispatch(&mut decoder, &line, observer);
        }

        let outcome = decoder.finish();
        tracing::debug!(
            events = outcome.events,
            skipped = outcome.skipped,
            sentinel = outcome.sentinel_seen,
            "Stream complete"
        );
        Ok(outcome)
    }
}

/// Feed one line to the decoder and notify the observer. Returns true on the
/// sentinel.
fn dispatch(decoder: &mut StreamDecoder<'_>, line: &str, observer: &mut dyn StreamObserver) -> bool {
    match decoder.decode_line(line) {
        LineOutcome::Event(event) => {
            observer.on_event(&event);
            false
        }
        LineOutcome::Done => {
            tracing::debug!(text_len = decoder.text().len(), "Sentinel received");
            observer.on_done();
            true
        }
        LineOutcome::Ignored | LineOutcome::Skipped => false,
    }
}
