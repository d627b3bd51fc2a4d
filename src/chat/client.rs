use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

use super::prompt::build_system_prompt;
use super::service::{CompletionService, UpstreamError};
use super::turn::{Message, Role};

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

// Borrowed fields avoid cloning the conversation just to serialize it
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Completion service for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct OpenAiCompletionService {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    requires_api_key: bool,
    system_prompt: String,
}

impl OpenAiCompletionService {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            requires_api_key: false,
            system_prompt: build_system_prompt("Sifeddine"),
        }
    }

    /// Fails requests with [`UpstreamError::NotConfigured`] when no key was resolved.
    #[must_use]
    pub const fn requiring_api_key(mut self, required: bool) -> Self {
        self.requires_api_key = required;
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(&self, messages: &[Message]) -> Result<String, UpstreamError> {
        if self.requires_api_key && self.api_key.is_none() {
            return Err(UpstreamError::NotConfigured);
        }

        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage {
            role: "system",
            content: Cow::Borrowed(&self.system_prompt),
        });
        wire.extend(messages.iter().map(|m| WireMessage {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: Cow::Borrowed(&m.content),
        }));

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: wire,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let url = self.url();
        let mut http_request = self.client.post(&url).json(&request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        debug!(%url, model = %self.model, messages = messages.len(), "posting chat completion");

        let response = http_request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Malformed("response contained no choices".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hello() -> Vec<Message> {
        vec![Message {
            role: Role::User,
            content: "hello".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "stream": false,
                "max_tokens": 500
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "hi"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(
            format!("{}/", server.uri()),
            "gpt-4o-mini".to_string(),
            Some("test-key".to_string()),
        );

        assert_eq!(service.complete(&hello()).await, Ok("hi".to_string()));
    }

    #[tokio::test]
    async fn test_complete_sends_system_prompt_first() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None)
            .with_system_prompt("be brief".to_string());

        assert_eq!(service.complete(&hello()).await, Ok("ok".to_string()));
    }

    #[tokio::test]
    async fn test_complete_missing_key_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None)
            .requiring_api_key(true);

        assert_eq!(
            service.complete(&hello()).await,
            Err(UpstreamError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None);

        assert_eq!(
            service.complete(&hello()).await,
            Err(UpstreamError::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None);

        assert!(matches!(
            service.complete(&hello()).await,
            Err(UpstreamError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_no_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None);

        assert!(matches!(
            service.complete(&hello()).await,
            Err(UpstreamError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_null_content_is_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": null}}]
            })))
            .mount(&server)
            .await;

        let service = OpenAiCompletionService::new(server.uri(), "m".to_string(), None);

        assert_eq!(service.complete(&hello()).await, Ok(String::new()));
    }

    #[tokio::test]
    async fn test_complete_unreachable_endpoint() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let service =
            OpenAiCompletionService::new("http://127.0.0.1:9".to_string(), "m".to_string(), None);

        assert!(matches!(
            service.complete(&hello()).await,
            Err(UpstreamError::Transport(_))
        ));
    }
}
