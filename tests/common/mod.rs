#![allow(dead_code)]

use async_trait::async_trait;
use intent_agent::agent::IntentAgent;
use intent_agent::config::prompt::{ PromptConfig, DEFAULT_INTENT_CLASSIFICATION };
use intent_agent::llm::LlmError;
use intent_agent::llm::chat::ChatClient;
use intent_agent::models::chat::{ ChatMessage, Conversation };
use std::sync::{ Arc, Mutex };

/// Canned outcome for one kind of completion call.
#[derive(Clone, Debug)]
pub enum Reply {
    Text(&'static str),
    Upstream(u16, &'static str),
    Malformed,
}

impl Reply {
    fn produce(&self) -> Result<String, LlmError> {
        match self {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Upstream(status, body) =>
                Err(LlmError::Upstream { status: *status, body: body.to_string() }),
            Reply::Malformed => Err(LlmError::MalformedResponse("response contains no choices".into())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Call {
    pub conversation: Conversation,
    pub model: Option<String>,
}

/// Answers classification calls with one reply and every other call with
/// another, recording what was sent.
pub struct ScriptedChatClient {
    classifier: Reply,
    general: Reply,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedChatClient {
    pub fn new(classifier: Reply, general: Reply) -> Arc<Self> {
        Arc::new(Self { classifier, general, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(
        &self,
        conversation: &[ChatMessage],
        model: Option<&str>
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(Call {
            conversation: conversation.to_vec(),
            model: model.map(str::to_string),
        });
        let is_classification = conversation
            .first()
            .map(|m| m.content == DEFAULT_INTENT_CLASSIFICATION)
            .unwrap_or(false);
        if is_classification {
            self.classifier.produce()
        } else {
            self.general.produce()
        }
    }

    fn get_model(&self) -> String {
        "scripted".to_string()
    }

    fn get_base_url(&self) -> String {
        "http://scripted.invalid".to_string()
    }
}

pub fn agent_with(client: &Arc<ScriptedChatClient>) -> IntentAgent {
    IntentAgent::new(client.clone(), PromptConfig::default(), None)
}
