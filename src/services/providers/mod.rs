//! Text-generation provider abstraction.
//!
//! This module provides a trait-based seam between the HTTP handlers and
//! the upstream generative API, allowing the real Gemini backend to be
//! swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Gemini API error {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Unexpected response structure")]
    UnexpectedFormat,

    #[error("Network error: {0}")]
    Network(String),
}

/// Per-request generation options carried from the inbound request.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Augment generation with live search results.
    pub use_grounding: bool,

    /// System instruction prepended to the conversation. Empty strings are
    /// treated the same as absence.
    pub system_instruction: Option<String>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for the prompt. Exactly one upstream
    /// attempt is made; no retries at this layer.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError>;

    /// Check whether the provider is usable.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
