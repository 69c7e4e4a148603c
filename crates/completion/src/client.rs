//! OpenAI-compatible `/chat/completions` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use asco_core::prompt::ChatMessage;

use crate::config::CompletionConfig;
use crate::{CompletionClient, CompletionError, CompletionRequest};

/// HTTP client for a single chat-completion provider.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

impl ChatCompletionsClient {
    /// Create a client from configuration with a fresh [`reqwest::Client`].
    pub fn new(config: CompletionConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: CompletionConfig) -> Self {
        let api_url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        Self {
            client,
            api_key: config.api_key,
            api_url,
            model: config.model,
        }
    }

    /// Full endpoint URL requests are posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`CompletionError::Api`] carrying the status
    /// and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CompletionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatCompletionResponse = Self::ensure_success(response).await?.json().await?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                model = %self.model,
                total_tokens = ?usage.total_tokens,
                "Completion finished"
            );
        }

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::NoChoices)?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;

    fn config(base_url: &str) -> CompletionConfig {
        CompletionConfig {
            api_key: Some("test-key".into()),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    #[test]
    fn api_url_appends_endpoint() {
        let client = ChatCompletionsClient::new(config("https://api.deepseek.com"));
        assert_eq!(client.api_url(), "https://api.deepseek.com/chat/completions");
    }

    #[test]
    fn api_url_trims_trailing_slashes() {
        let client = ChatCompletionsClient::new(config("http://localhost:8080/v1//"));
        assert_eq!(client.api_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn configured_only_with_api_key() {
        let mut cfg = config("http://localhost");
        assert!(ChatCompletionsClient::new(cfg.clone()).is_configured());
        cfg.api_key = None;
        assert!(!ChatCompletionsClient::new(cfg).is_configured());
    }

    #[test]
    fn body_serializes_openai_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("usr")];
        let body = ChatCompletionBody {
            model: "deepseek-chat",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 2500,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["max_tokens"], 2500);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
    }
}
