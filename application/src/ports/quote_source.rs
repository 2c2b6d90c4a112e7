//! Quote source port
//!
//! Defines how the application layer obtains candidate quotes. Adapters live
//! in the infrastructure layer: a generative provider (one prompt per call)
//! and a built-in curated table.
//!
//! Both variants return a raw text payload in the same JSON wire shape, so
//! validation is a single pipeline regardless of where quotes come from. The
//! generative payload is not guaranteed to be pure JSON — the model may wrap
//! it in prose — which is exactly what the domain parser tolerates.

use async_trait::async_trait;
use botlines_domain::Personalization;
use thiserror::Error;

/// Errors that can occur while fetching from a quote source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication or quota failure: {0}")]
    Auth(String),

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider error: {0}")]
    Other(String),
}

/// A supplier of candidate quote payloads
///
/// `personalization` is descriptive context only — it flavors the generation
/// prompt or the table selection and never affects validation.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short identifier for logging ("builtin", "bedrock", ...)
    fn name(&self) -> &str;

    /// Fetch a payload expected to contain up to `count` candidate records
    async fn fetch_batch(
        &self,
        personalization: &Personalization,
        count: usize,
    ) -> Result<String, SourceError>;

    /// Fetch a payload expected to contain one candidate record
    async fn fetch_one(&self, personalization: &Personalization) -> Result<String, SourceError>;
}
