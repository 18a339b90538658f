use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;

use crate::models::chat::{ ChatMessage, Conversation };

pub const DEFAULT_INTENT_CLASSIFICATION: &str = "\
You are an intent detection assistant. \
Your job is to extract the user's intent from a message. \
Possible intents: 'sound', 'music', 'nasa', 'none'. \
If the intent is 'music', extract the URL if one is present. \
Return your answer ONLY as a JSON object using this format:

{ \"intent\": \"intent_name\", \"url\": \"optional_url_or_null\" }

Examples:
User: 'show me a pic from space'
→ { \"intent\": \"nasa\", \"url\": null }
User: 'make it loud'
→ { \"intent\": \"sound\", \"url\": null }
User: 'play https://youtube.com/xyz song please'
→ { \"intent\": \"music\", \"url\": \"https://youtube.com/xyz\" }
User: 'how are you?'
→ { \"intent\": \"none\", \"url\": null }
Do NOT wrap your output in code blocks. Output only the text, raw and unformatted.";

pub const DEFAULT_GENERAL_REPLY: &str = "You are a helpful assistant agent";

#[derive(Debug)]
pub enum PromptError {
    EmptyTemplate(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::EmptyTemplate(key) => write!(f, "Prompt template '{}' is empty", key),
            PromptError::IoError(e) => write!(f, "Prompt file IO error: {}", e),
            PromptError::JsonError(e) => write!(f, "Prompt JSON parsing error: {}", e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(e) => Some(e),
            PromptError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err)
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        PromptError::JsonError(err)
    }
}

/// System prompts for the two completion calls. Keys missing from a prompts
/// file keep their built-in text.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    pub intent_classification: String,
    pub general_reply: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            intent_classification: DEFAULT_INTENT_CLASSIFICATION.to_string(),
            general_reply: DEFAULT_GENERAL_REPLY.to_string(),
        }
    }
}

impl PromptConfig {
    fn validate(&self) -> Result<(), PromptError> {
        if self.intent_classification.trim().is_empty() {
            return Err(PromptError::EmptyTemplate("intent_classification".to_string()));
        }
        if self.general_reply.trim().is_empty() {
            return Err(PromptError::EmptyTemplate("general_reply".to_string()));
        }
        Ok(())
    }

    pub fn intent_conversation(&self, message: &str) -> Conversation {
        vec![ChatMessage::system(&self.intent_classification), ChatMessage::user(message)]
    }

    pub fn general_conversation(&self, message: &str) -> Conversation {
        vec![ChatMessage::system(&self.general_reply), ChatMessage::user(message)]
    }
}

pub fn load_prompts_from_str(json: &str) -> Result<PromptConfig, PromptError> {
    let config: PromptConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn load_prompts(path: &str) -> Result<PromptConfig, PromptError> {
    let file_content = fs::read_to_string(path)?;
    load_prompts_from_str(&file_content)
}
