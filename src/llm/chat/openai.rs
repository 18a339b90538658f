use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION}};
use serde::{Deserialize, Serialize};

use super::ChatClient;
use crate::llm::{LlmConfig, LlmError};
use crate::models::chat::ChatMessage;

const COMPLETIONS_ROUTE: &str = "/chat/completions";

/// Client for any provider speaking the OpenAI chat-completions format
/// (OpenRouter, OpenAI, DeepSeek, Groq, xAI).
pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
    ) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("Chat API key is required".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| LlmError::Config(format!("Invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            model,
            base_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(
            &config.api_key,
            config.resolved_model(),
            config.resolved_base_url()?,
        )
    }

    fn endpoint(&self) -> String {
        if self.base_url.ends_with(COMPLETIONS_ROUTE) {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), COMPLETIONS_ROUTE)
        }
    }
}

fn extract_content(body: &str) -> Result<String, LlmError> {
    let parsed: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("response is not a completion object: {}", e)))?;

    parsed.choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("response contains no choices".to_string()))?
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| LlmError::MalformedResponse("first choice has no message content".to_string()))
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        conversation: &[ChatMessage],
        model: Option<&str>
    ) -> Result<String, LlmError> {
        if conversation.is_empty() {
            return Err(LlmError::Config("Conversation must contain at least one message".to_string()));
        }

        let url = self.endpoint();
        let req = OpenAIChatRequest {
            model: model.unwrap_or(&self.model),
            messages: conversation,
        };
        debug!("POST {} (model={}, messages={})", url, req.model, conversation.len());

        let resp = self.http.post(&url)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // The status alone identifies the failure; an unreadable body is not fatal.
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Upstream { status: status.as_u16(), body });
        }

        let body = resp.text().await?;
        extract_content(&body)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}
