pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use thiserror::Error;

/// OpenAI-compatible chat-completion providers. They share one wire format and
/// differ only in their default endpoint and model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    OpenRouter,
    OpenAI,
    DeepSeek,
    Groq,
    XAI,
}

impl LlmType {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmType::OpenRouter => "https://openrouter.ai/api/v1",
            LlmType::OpenAI => "https://api.openai.com/v1",
            LlmType::DeepSeek => "https://api.deepseek.com/v1",
            LlmType::Groq => "https://api.groq.com/openai/v1",
            LlmType::XAI => "https://api.x.ai/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmType::OpenRouter => "deepseek/deepseek-chat",
            LlmType::OpenAI => "gpt-4o",
            LlmType::DeepSeek => "deepseek-chat",
            LlmType::Groq => "llama-3.1-8b-instant",
            LlmType::XAI => "grok-2-latest",
        }
    }
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LlmType::OpenRouter => "openrouter",
            LlmType::OpenAI => "openai",
            LlmType::DeepSeek => "deepseek",
            LlmType::Groq => "groq",
            LlmType::XAI => "xai",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseLlmTypeError {
    message: String,
}

impl fmt::Display for ParseLlmTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseLlmTypeError {}

impl FromStr for LlmType {
    type Err = ParseLlmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openrouter" => Ok(LlmType::OpenRouter),
            "openai" => Ok(LlmType::OpenAI),
            "deepseek" => Ok(LlmType::DeepSeek),
            "groq" => Ok(LlmType::Groq),
            "xai" => Ok(LlmType::XAI),
            _ =>
                Err(ParseLlmTypeError {
                    message: format!("Invalid LLM type: '{}'", s),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub llm_type: LlmType,
    pub api_key: String,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
}

impl LlmConfig {
    /// Endpoint root, either the configured override or the provider default.
    pub fn resolved_base_url(&self) -> Result<String, LlmError> {
        let raw = self.base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.llm_type.default_base_url());

        let parsed = url::Url
            ::parse(raw)
            .map_err(|e| LlmError::Config(format!("Invalid chat base URL '{}': {}", raw, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
            other => Err(LlmError::Config(format!("Unsupported URL scheme '{}' in '{}'", other, raw))),
        }
    }

    pub fn resolved_model(&self) -> String {
        self.completion_model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.llm_type.default_model().to_string())
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream {
        status: u16,
        body: String,
    },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Failed to reach completion API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM configuration error: {0}")]
    Config(String),
}
