//! LLM Client — the single point of entry for all Claude API calls.
//!
//! No other module may call the Anthropic API directly.
//!
//! Model: claude-3-5-sonnet-20240620 (hardcoded so every generation uses the same model)

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all generation calls.
pub const MODEL: &str = "claude-3-5-sonnet-20240620";
const MAX_TOKENS: u32 = 1024;
const GENERIC_API_FAILURE: &str = "API request failed";
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LlmError {
    /// The message shown to API callers. Provider messages pass through untouched.
    pub fn client_message(&self) -> String {
        match self {
            LlmError::Api { message, .. } => message.clone(),
            LlmError::Http(e) => format!("Failed to reach the generation API: {e}"),
            LlmError::Parse(_) => "Malformed response from the generation API".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing)]
    pub usage: Option<Usage>,
}

/// One block of provider output. `type` is required, `text` only exists on text blocks.
/// Any other provider fields are kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API. One call per request, no retries,
/// transport-default timeouts.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Makes a single call to the Claude API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            "Request to generation API: {}",
            serde_json::to_string(&request_body).unwrap_or_default()
        );
        info!(
            "Calling {} with prompt {:?}...",
            MODEL,
            prompt.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Response from generation API ({}): {}", status, body);

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }
}

/// Pulls `error.message` out of a provider error body, falling back to a generic message.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<AnthropicError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| GENERIC_API_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubUpstream;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_provider_error_message_extracts_nested_message() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"rate limited"}}"#;
        assert_eq!(provider_error_message(body), "rate limited");
    }

    #[test]
    fn test_provider_error_message_falls_back_when_body_is_not_json() {
        assert_eq!(provider_error_message("<html>bad gateway</html>"), "API request failed");
        assert_eq!(provider_error_message(""), "API request failed");
    }

    #[test]
    fn test_text_returns_first_text_block() {
        let response: LlmResponse = serde_json::from_value(json!({
            "content": [
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("first"));
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_content_block_round_trips_unknown_fields() {
        let block = json!({
            "type": "text",
            "text": "hi",
            "citations": [{ "cited_text": "source", "start": 0 }]
        });
        let parsed: ContentBlock = serde_json::from_value(block.clone()).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("hi"));
        assert!(parsed.extra.contains_key("citations"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), block);

        let tool = json!({ "type": "tool_use", "id": "tu_1", "name": "f", "input": {} });
        let parsed: ContentBlock = serde_json::from_value(tool.clone()).unwrap();
        assert!(parsed.text.is_none());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), tool);
    }

    #[test]
    fn test_content_block_without_type_is_rejected() {
        let result: Result<LlmResponse, _> =
            serde_json::from_value(json!({ "content": [{ "text": "no type" }] }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_call_sends_headers_and_body() {
        let stub = StubUpstream::text_reply("hello").await;
        let client = LlmClient::new("test-key".to_string(), stub.url());

        let response = client.call("user prompt", "system prompt").await.unwrap();
        assert_eq!(response.text(), Some("hello"));

        let requests = stub.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.api_key.as_deref(), Some("test-key"));
        assert_eq!(request.version.as_deref(), Some(ANTHROPIC_VERSION));
        assert_eq!(request.body["model"], MODEL);
        assert_eq!(request.body["max_tokens"], MAX_TOKENS);
        assert_eq!(request.body["system"], "system prompt");
        assert_eq!(
            request.body["messages"],
            json!([{ "role": "user", "content": "user prompt" }])
        );
    }

    #[tokio::test]
    async fn test_call_surfaces_provider_error_without_retrying() {
        let stub = StubUpstream::new(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "rate limited" } }),
        )
        .await;
        let client = LlmClient::new("k".to_string(), stub.url());

        let err = client.call("p", "s").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(stub.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_call_uses_generic_message_when_error_body_has_no_message() {
        let stub = StubUpstream::new(StatusCode::BAD_GATEWAY, json!({ "detail": "nope" })).await;
        let client = LlmClient::new("k".to_string(), stub.url());

        let err = client.call("p", "s").await.unwrap_err();
        assert_eq!(err.client_message(), "API request failed");
    }

    #[tokio::test]
    async fn test_call_fails_fast_on_malformed_success_body() {
        let stub = StubUpstream::new(StatusCode::OK, json!({ "completion": "legacy shape" })).await;
        let client = LlmClient::new("k".to_string(), stub.url());

        let err = client.call("p", "s").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
        assert_eq!(err.client_message(), "Malformed response from the generation API");
    }
}
