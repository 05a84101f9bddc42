use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::traits::Model;
use super::types::{ChatMessage, ModelConfig, ModelResponse, TokenUsage};
use crate::app::ModelSettings;
use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;

/// Chat-completion client for any OpenAI-compatible endpoint
pub struct OpenAiModel {
    client: Client,
    base_url: String,
    model_name: String,
    api_key: Option<String>,
}

impl OpenAiModel {
    /// Create a client from model settings; the API key is resolved once here
    pub fn new(settings: &ModelSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model_name: settings.name.clone(),
            api_key: settings.resolve_api_key(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl Model for OpenAiModel {
    async fn chat(&self, messages: &[ChatMessage], config: &ModelConfig) -> Result<ModelResponse> {
        let body = ChatCompletionRequest {
            model: &self.model_name,
            messages,
            max_tokens: config.max_tokens,
            n: config.candidates,
            stop: config.stop.as_deref(),
            temperature: config.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model_name, messages = messages.len(), "Sending chat completion");

        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("API returned {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Malformed chat completion response")?;

        let reply = extract_reply(completion, &self.model_name)?;
        if let Some(usage) = &reply.usage {
            debug!(
                model = %reply.model_name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion usage"
            );
        }
        Ok(reply)
    }

    async fn validate_connection(&self) -> Result<bool> {
        let health_client = Client::builder()
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .build()?;

        let url = format!("{}/v1/models", self.base_url);
        let request = self.authorize(health_client.get(&url));

        match request.send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

/// Take the first choice; extra candidates are ignored
fn extract_reply(completion: ChatCompletionResponse, model_name: &str) -> Result<ModelResponse> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .context("Response contained no choices")?;

    Ok(ModelResponse {
        content: choice.message.content.unwrap_or_default().trim().to_string(),
        usage: completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
        model_name: completion.model.unwrap_or_else(|| model_name.to_string()),
    })
}

// Request / response structures (OpenAI format)

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: usize,
    n: usize,
    stop: Option<&'a [String]>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let config = ModelConfig::default();
        let body = ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: config.max_tokens,
            n: config.candidates,
            stop: config.stop.as_deref(),
            temperature: config.temperature,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ],
                "max_tokens": 150,
                "n": 1,
                "stop": null,
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_extract_reply_trims_first_choice() {
        let completion: ChatCompletionResponse = serde_json::from_value(json!({
            "model": "gpt-3.5-turbo-0613",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "\n\nHello there.  "}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }))
        .unwrap();

        let reply = extract_reply(completion, "gpt-3.5-turbo").unwrap();
        assert_eq!(reply.content, "Hello there.");
        assert_eq!(reply.model_name, "gpt-3.5-turbo-0613");
        let usage = reply.usage.unwrap();
        assert_eq!(
            (usage.prompt_tokens, usage.completion_tokens, usage.total_tokens),
            (9, 3, 12)
        );
    }

    #[test]
    fn test_extract_reply_without_choices_fails() {
        let completion: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        let err = extract_reply(completion, "gpt-3.5-turbo").unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let settings = ModelSettings {
            base_url: "http://localhost:4000/".to_string(),
            ..ModelSettings::default()
        };
        let model = OpenAiModel::new(&settings).unwrap();
        assert_eq!(model.base_url, "http://localhost:4000");
        assert_eq!(model.model_name, "gpt-3.5-turbo");
    }
}
