/// Default provider base URL (OpenAI-compatible API).
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default model id.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Completion provider configuration.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer token for the provider. `None` leaves the service up but
    /// every optimization call fails.
    pub api_key: Option<String>,
    /// Provider base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model id sent with every request.
    pub model: String,
}

impl CompletionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `COMPLETION_API_KEY`  | *(unset)*                   |
    /// | `COMPLETION_BASE_URL` | `https://api.deepseek.com`  |
    /// | `COMPLETION_MODEL`    | `deepseek-chat`             |
    pub fn from_env() -> Self {
        let api_key = std::env::var("COMPLETION_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url =
            std::env::var("COMPLETION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let model = std::env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Self {
            api_key,
            base_url,
            model,
        }
    }
}

// The key must never reach logs.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}
