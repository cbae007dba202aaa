//! LLM Client implementations
//!
//! Provides OpenAI-compatible and Ollama clients behind the
//! [`LlmClient`] trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wakanda_core::{LlmClient, LlmConfig, LlmProvider, Result, WakandaError};

const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| WakandaError::ConfigError(format!("Failed to build HTTP client: {e}")))
}

// ============================================================================
// OpenAI Client
// ============================================================================

/// OpenAI chat completions client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| WakandaError::ConfigError("OpenAI API key required".to_string()))?;

        let base_url = config
            .openai_base_url
            .clone()
            .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            api_key: api_key.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let request = OpenAiRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| WakandaError::LlmError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WakandaError::LlmError(format!(
                "OpenAI error ({status}): {error_text}"
            )));
        }

        let result: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| WakandaError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| WakandaError::LlmError("No response generated".to_string()))
    }
}

// ============================================================================
// Ollama Client
// ============================================================================

/// Ollama API client
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    /// Create from config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: &self.model,
            system,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| WakandaError::LlmError(format!("Ollama request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WakandaError::LlmError(format!(
                "Ollama error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(|e| {
            WakandaError::LlmError(format!("Failed to parse Ollama response: {e}"))
        })?;

        Ok(result.response)
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create an LLM client from config
pub fn create_llm_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider {
        LlmProvider::OpenAI => Ok(Box::new(OpenAiClient::from_config(config)?)),
        LlmProvider::Ollama => Ok(Box::new(OllamaClient::from_config(config)?)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn mock_chat_completions(Json(body): Json<Value>) -> Json<Value> {
        let system = body["messages"][0]["content"].as_str().unwrap_or_default();
        let user = body["messages"][1]["content"].as_str().unwrap_or_default();
        Json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": format!("{system}|{user}") } }
            ]
        }))
    }

    async fn mock_empty_choices() -> Json<Value> {
        Json(json!({ "choices": [] }))
    }

    async fn mock_ollama_generate(Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body["stream"], json!(false));
        let system = body["system"].as_str().unwrap_or_default();
        let prompt = body["prompt"].as_str().unwrap_or_default();
        Json(json!({ "response": format!("{system}|{prompt}"), "done": true }))
    }

    async fn mock_failure() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded")
    }

    async fn spawn_mock_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn openai_config(base_url: &str) -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::OpenAI,
            openai_api_key: Some("test-key".to_string()),
            openai_base_url: Some(format!("{base_url}/v1")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_openai_requires_api_key() {
        let config = LlmConfig::default();
        assert!(OpenAiClient::from_config(&config).is_err());
        assert!(create_llm_client(&config).is_err());
    }

    #[test]
    fn test_ollama_client_creation() {
        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            ollama_url: "http://localhost:11434/".to_string(),
            model: "llama3".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model, "llama3");
    }

    #[tokio::test]
    async fn test_openai_generate_sends_system_and_user_messages() {
        let app = Router::new().route("/v1/chat/completions", post(mock_chat_completions));
        let base_url = spawn_mock_server(app).await;

        let client = OpenAiClient::from_config(&openai_config(&base_url)).unwrap();
        let answer = client.generate("be brief", "hello").await.unwrap();

        assert_eq!(answer, "be brief|hello");
    }

    #[tokio::test]
    async fn test_openai_without_choices_is_error() {
        let app = Router::new().route("/v1/chat/completions", post(mock_empty_choices));
        let base_url = spawn_mock_server(app).await;

        let client = OpenAiClient::from_config(&openai_config(&base_url)).unwrap();
        let err = client.generate("sys", "hello").await.unwrap_err();

        assert!(matches!(err, WakandaError::LlmError(_)));
    }

    #[tokio::test]
    async fn test_openai_upstream_failure_is_error() {
        let app = Router::new().route("/v1/chat/completions", post(mock_failure));
        let base_url = spawn_mock_server(app).await;

        let client = OpenAiClient::from_config(&openai_config(&base_url)).unwrap();
        let err = client.generate("sys", "hello").await.unwrap_err();

        assert!(err.to_string().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_ollama_generate() {
        let app = Router::new().route("/api/generate", post(mock_ollama_generate));
        let base_url = spawn_mock_server(app).await;

        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            ollama_url: base_url,
            timeout_secs: 5,
            ..Default::default()
        };
        let client = create_llm_client(&config).unwrap();
        let answer = client.generate("persona", "question").await.unwrap();

        assert_eq!(answer, "persona|question");
    }

    #[tokio::test]
    async fn test_ollama_upstream_failure_is_error() {
        let app = Router::new().route("/api/generate", post(mock_failure));
        let base_url = spawn_mock_server(app).await;

        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            ollama_url: base_url,
            timeout_secs: 5,
            ..Default::default()
        };
        let client = OllamaClient::from_config(&config).unwrap();

        assert!(client.generate("persona", "question").await.is_err());
    }
}
