use crate::config::AgentConfig;
use crate::config::prompt::PromptConfig;
use crate::llm::LlmError;
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::models::agent::AgentResponse;
use crate::models::intent::{ Intent, IntentResult };

use log::{ info, warn };
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentParseError {
    #[error("classifier output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classifier output is not a JSON object")]
    NotAnObject,
}

/// Removes a surrounding triple-backtick fence, with or without a `json`
/// language tag. Unfenced text is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let inner = trimmed.trim_matches('`').trim_start();
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

pub fn parse_intent(raw: &str) -> Result<IntentResult, IntentParseError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw))?;
    if !value.is_object() {
        return Err(IntentParseError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Classifies a message and dispatches it: known intents return a stub
/// reply, everything else gets a general completion.
#[derive(Clone)]
pub struct IntentAgent {
    chat_client: Arc<dyn ChatClient>,
    prompts: Arc<PromptConfig>,
    classifier_model: Option<String>,
}

impl IntentAgent {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        prompts: PromptConfig,
        classifier_model: Option<String>
    ) -> Self {
        Self {
            chat_client,
            prompts: Arc::new(prompts),
            classifier_model,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, LlmError> {
        let chat_client = new_chat_client(&config.llm)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={}",
            config.llm.llm_type,
            chat_client.get_model(),
            chat_client.get_base_url()
        );
        Ok(Self::new(chat_client, config.prompts.clone(), config.classifier_model.clone()))
    }

    /// Asks the model for the message's intent. An unparseable answer is
    /// logged and degrades to `{intent: none, url: null}`; only transport
    /// and upstream failures are returned as errors.
    pub async fn classify(&self, message: &str) -> Result<IntentResult, LlmError> {
        let conversation = self.prompts.intent_conversation(message);
        let raw = self.chat_client.complete(&conversation, self.classifier_model.as_deref()).await?;

        match parse_intent(&raw) {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!("Failed to parse LLM response ({}): {}", e, raw);
                Ok(IntentResult::fallback())
            }
        }
    }

    pub async fn route(&self, message: &str) -> Result<AgentResponse, LlmError> {
        let IntentResult { intent, url } = self.classify(message).await?;
        info!("Detected intent: {}", intent);

        match intent {
            Intent::Sound => Ok(AgentResponse::sound()),
            Intent::Music => Ok(AgentResponse::music(url)),
            Intent::Nasa => Ok(AgentResponse::nasa()),
            Intent::None | Intent::Unknown => {
                if intent == Intent::Unknown {
                    warn!("Classifier returned an unrecognized intent, using general reply");
                }
                let conversation = self.prompts.general_conversation(message);
                let reply = self.chat_client.complete(&conversation, None).await?;
                Ok(AgentResponse::general(reply))
            }
        }
    }
}
