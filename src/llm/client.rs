//! LLM client for intent extraction and code generation
//!
//! Model-agnostic HTTP client. Supports the Anthropic Messages API, the
//! Ollama chat API and OpenAI-compatible chat completions. Each call is a
//! single request/response; no conversation state is carried between calls.

use crate::core::config::LlmConfig;
use crate::core::error::{PilotError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

/// Synchronous inference seam consumed by the pipeline
pub trait Inference {
    /// Send a system prompt plus one user message, return the reply text
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    Ollama,
    OpenAI,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    max_tokens: u32,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            max_tokens: 4096,
            api_format,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let mut client = Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
        );
        client.max_tokens = config.max_tokens;
        if client.api_format != ApiFormat::Ollama && client.api_key.is_none() {
            return Err(PilotError::Config(format!(
                "LLM_API_KEY not set (required for {})",
                client.api_url
            )));
        }
        Ok(client)
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else if url.contains("/api/chat") || url.contains(":11434") {
            ApiFormat::Ollama
        } else {
            // OpenAI, DeepSeek, LM Studio and friends share one format
            ApiFormat::OpenAI
        }
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a completion request to the LLM
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        tracing::debug!(model = %self.model, format = ?self.api_format, "inference request");
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::Ollama => self.complete_ollama(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: system.into(),
            messages: vec![Message::user(user)],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", self.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PilotError::Inference(e.to_string()))?;

        let completion: AnthropicResponse = Self::decode(response).await?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| PilotError::Inference("Empty response".into()))
    }

    async fn complete_ollama(&self, system: &str, user: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![Message::system(system), Message::user(user)],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PilotError::Inference(e.to_string()))?;

        let completion: OllamaResponse = Self::decode(response).await?;
        let content = completion.message.content.trim().to_string();
        if content.is_empty() {
            return Err(PilotError::Inference("Empty response".into()));
        }
        Ok(content)
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::system(system), Message::user(user)],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.as_deref().unwrap_or_default()),
            )
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PilotError::Inference(e.to_string()))?;

        let completion: OpenAIResponse = Self::decode(response).await?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| PilotError::Inference("Empty response".into()))
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PilotError::Inference(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PilotError::Inference(e.to_string()))
    }
}

/// Blocking adapter: drives the async client on an owned runtime handle
///
/// Must not be called from inside an async context.
pub struct BlockingLlm {
    client: LlmClient,
    handle: Handle,
}

impl BlockingLlm {
    pub fn new(client: LlmClient, handle: Handle) -> Self {
        Self { client, handle }
    }
}

impl Inference for BlockingLlm {
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.handle.block_on(self.client.complete(system, user))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// Ollama chat format
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    stream: bool,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ChoiceMessage,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    fn system(content: &str) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LlmClient::new(
            Some("test-key".into()),
            "https://api.example.com/v1/chat/completions".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_key.as_deref(), Some("test-key"));
        assert_eq!(client.model(), "test-model");
        assert_eq!(client.api_format(), &ApiFormat::OpenAI);
    }

    #[test]
    fn test_detect_api_format() {
        assert_eq!(
            LlmClient::detect_api_format("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            LlmClient::detect_api_format("http://localhost:11434/api/chat"),
            ApiFormat::Ollama
        );
        assert_eq!(
            LlmClient::detect_api_format("https://api.deepseek.com/chat/completions"),
            ApiFormat::OpenAI
        );
    }

    #[test]
    fn test_from_config_ollama_needs_no_key() {
        let client = LlmClient::from_config(&LlmConfig::default()).unwrap();
        assert_eq!(client.api_format(), &ApiFormat::Ollama);
        assert_eq!(client.max_tokens, 4096);
    }

    #[test]
    fn test_from_config_hosted_requires_key() {
        let config = LlmConfig {
            api_url: "https://api.anthropic.com/v1/messages".into(),
            api_key: None,
            ..LlmConfig::default()
        };
        assert!(matches!(
            LlmClient::from_config(&config),
            Err(PilotError::Config(_))
        ));
    }

    #[test]
    fn test_ollama_request_disables_streaming() {
        let request = OllamaRequest {
            model: "llama3.2".into(),
            stream: false,
            messages: vec![Message::system("sys"), Message::user("hi")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
