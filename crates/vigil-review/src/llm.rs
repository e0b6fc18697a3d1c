use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vigil_core::{LlmConfig, VigilError};

/// Default Bedrock runtime endpoint (us-east-1). Other regions are selected
/// by setting `base_url` in the configuration.
const DEFAULT_BASE_URL: &str = "https://bedrock-runtime.us-east-1.amazonaws.com";

/// Environment variable holding the Bedrock API key.
const API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// A text-generation backend for review prompts.
///
/// Implemented by [`LlmClient`] in production and by stubs in tests.
#[async_trait]
pub trait Inference {
    /// Generate text for `prompt`, returning the model output.
    async fn complete(&self, prompt: &str) -> Result<String, VigilError>;
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct InvokeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Client for the Amazon Bedrock runtime invoke API.
///
/// Sends a single-turn request with the prompt as the sole user message and
/// returns the text of the first content block of the response. No retry,
/// no backoff, no timeout override; failures propagate to the caller and
/// are handled at the per-PR boundary.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
/// use vigil_review::llm::LlmClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-token".into()),
///     ..LlmConfig::default()
/// };
/// let client = LlmClient::new(&config).unwrap();
/// assert!(client.model().starts_with("anthropic.claude"));
/// ```
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl LlmClient {
    /// Create a client from configuration.
    ///
    /// The API key is taken from the config, falling back to the
    /// `AWS_BEARER_TOKEN_BEDROCK` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] if no API key is available.
    pub fn new(config: &LlmConfig) -> Result<Self, VigilError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                VigilError::Config(format!(
                    "no API key: set {API_KEY_ENV} or api_key in .vigil.toml under [llm]"
                ))
            })?,
        };
        Ok(Self {
            client: reqwest::Client::new(),
            config: config.clone(),
            api_key,
        })
    }

    /// Return the model identifier from the configuration.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single-turn invoke request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] on network errors, non-success status
    /// codes, or a response without content blocks.
    pub async fn invoke(&self, prompt: &str, max_tokens: u32) -> Result<String, VigilError> {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!("{base_url}/model/{}/invoke", self.config.model);

        let body = InvokeRequest {
            anthropic_version: &self.config.anthropic_version,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| VigilError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::Llm(format!(
                "inference API error {status}: {body_text}"
            )));
        }

        let envelope: InvokeResponse = response
            .json()
            .await
            .map_err(|e| VigilError::Llm(format!("failed to parse response: {e}")))?;

        let first = envelope
            .content
            .into_iter()
            .next()
            .ok_or_else(|| VigilError::Llm("response contained no content blocks".into()))?;
        Ok(first.text)
    }
}

#[async_trait]
impl Inference for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, VigilError> {
        self.invoke(prompt, self.config.max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: Option<String>) -> LlmConfig {
        LlmConfig {
            api_key: Some("test-token".into()),
            base_url,
            ..LlmConfig::default()
        }
    }

    #[test]
    fn client_construction_with_config_key() {
        let client = LlmClient::new(&test_config(None));
        assert!(client.is_ok());
    }

    #[test]
    fn model_returns_config_model() {
        let config = LlmConfig {
            model: "anthropic.claude-3-5-haiku-20241022-v1:0".into(),
            api_key: Some("k".into()),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config).unwrap();
        assert_eq!(client.model(), "anthropic.claude-3-5-haiku-20241022-v1:0");
    }

    #[test]
    fn request_body_serializes_expected_shape() {
        let body = InvokeRequest {
            anthropic_version: "bedrock-2023-05-31",
            max_tokens: 4096,
            messages: vec![Message {
                role: "user",
                content: "review this",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "review this");
    }

    #[test]
    fn response_takes_first_content_block() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"}
            ],
            "stop_reason": "end_turn"
        }"#;
        let envelope: InvokeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.content[0].text, "first");
    }

    #[tokio::test]
    async fn invoke_returns_first_block_text() {
        let server = MockServer::start().await;
        let config = test_config(Some(server.uri()));

        Mock::given(method("POST"))
            .and(path(format!("/model/{}/invoke", config.model)))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "Looks good overall."}]
            })))
            .mount(&server)
            .await;

        let client = LlmClient::new(&config).unwrap();
        let text = client.invoke("review this", 4096).await.unwrap();
        assert_eq!(text, "Looks good overall.");
    }

    #[tokio::test]
    async fn invoke_error_status_propagates() {
        let server = MockServer::start().await;
        let config = test_config(Some(server.uri()));

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("throttled"))
            .mount(&server)
            .await;

        let client = LlmClient::new(&config).unwrap();
        let err = client.invoke("review this", 4096).await.unwrap_err();
        assert!(matches!(err, VigilError::Llm(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn invoke_empty_content_is_error() {
        let server = MockServer::start().await;
        let config = test_config(Some(server.uri()));

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": [] })),
            )
            .mount(&server)
            .await;

        let client = LlmClient::new(&config).unwrap();
        let err = client.invoke("review this", 4096).await.unwrap_err();
        assert!(err.to_string().contains("no content blocks"));
    }
}
