pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;
use super::{ LlmConfig, LlmError };
use self::openai::OpenAIChatClient;
use crate::models::chat::ChatMessage;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `conversation` to the completion API and returns the text of the
    /// first choice. `model` overrides the client's default model.
    async fn complete(
        &self,
        conversation: &[ChatMessage],
        model: Option<&str>
    ) -> Result<String, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client: Arc<dyn ChatClient> = Arc::new(OpenAIChatClient::from_config(config)?);
    Ok(client)
}
