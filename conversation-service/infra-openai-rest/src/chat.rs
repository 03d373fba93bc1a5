use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use conversation_domain::{ChatCompletionPort, DomainError};

const SERVICE_NAME: &str = "openai-chat";

#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

pub struct OpenAiChatCompletionAdapter {
    client: reqwest::Client,
    config: OpenAiChatConfig,
}

impl OpenAiChatCompletionAdapter {
    pub fn new(client: reqwest::Client, config: OpenAiChatConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ChatCompletionPort for OpenAiChatCompletionAdapter {
    async fn reply(&self, system_prompt: &str, user_message: &str) -> Result<String, DomainError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE_NAME, &err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external_service_error(
                SERVICE_NAME,
                &format!("unexpected status {status}: {body}"),
            ));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE_NAME, &err.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                DomainError::external_service_error(SERVICE_NAME, "response carried no choices")
            })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter_for(server: &mockito::ServerGuard) -> OpenAiChatCompletionAdapter {
        OpenAiChatCompletionAdapter::new(
            reqwest::Client::new(),
            OpenAiChatConfig {
                api_key: "test-key".to_string(),
                base_url: server.url(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.8,
            },
        )
    }

    #[tokio::test]
    async fn extracts_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "네, 안녕하세요…"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let reply = adapter_for(&server)
            .reply("system prompt", "안녕하세요")
            .await
            .expect("reply succeeds");

        assert_eq!(reply, "네, 안녕하세요…");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_maps_to_external_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let error = adapter_for(&server)
            .reply("system prompt", "안녕하세요")
            .await
            .expect_err("must fail");

        match error {
            DomainError::ExternalService { service, message } => {
                assert_eq!(service, "openai-chat");
                assert!(message.contains("429"), "got: {message}");
                assert!(message.contains("rate limited"), "got: {message}");
            }
            other => panic!("expected external service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(json!({"choices": []}).to_string())
            .create_async()
            .await;

        let error = adapter_for(&server)
            .reply("system prompt", "안녕하세요")
            .await
            .expect_err("must fail");

        assert!(matches!(error, DomainError::ExternalService { .. }));
    }
}
