//! Chat-completion client used for code optimization.
//!
//! [`CompletionClient`] is the seam the HTTP layer depends on; the
//! production implementation is [`ChatCompletionsClient`], which speaks the
//! OpenAI-compatible `/chat/completions` protocol over [`reqwest`].

pub mod client;
pub mod config;

use async_trait::async_trait;

use asco_core::prompt::ChatMessage;

pub use client::ChatCompletionsClient;
pub use config::CompletionConfig;

/// A single completion call. The model id comes from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Errors from the completion layer.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key was configured, so no call was attempted.
    #[error("Completion API key is not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx but with an empty `choices` array.
    #[error("Completion response contained no choices")]
    NoChoices,
}

/// Something that can turn a prompt into completion text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the first choice's content.
    ///
    /// A missing `content` field comes back as an empty string; deciding
    /// whether that is acceptable is the caller's job.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Model id sent with every request.
    fn model(&self) -> &str;

    /// Whether the client has credentials to make calls at all.
    fn is_configured(&self) -> bool {
        true
    }
}
