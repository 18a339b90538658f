mod common;

use common::{ agent_with, Reply, ScriptedChatClient };
use intent_agent::agent::IntentAgent;
use intent_agent::config::prompt::PromptConfig;
use intent_agent::llm::LlmError;
use intent_agent::models::agent::AgentResponse;
use intent_agent::models::chat::{ ChatMessage, Role };
use intent_agent::models::intent::{ Intent, IntentResult };

#[tokio::test]
async fn sound_is_a_stub_regardless_of_message() {
    let client = ScriptedChatClient::new(
        Reply::Text(r#"{"intent":"sound","url":null}"#),
        Reply::Text("should not be used"),
    );
    let agent = agent_with(&client);

    for message in ["make it loud", "", "play https://youtube.com/xyz", "how are you?"] {
        let resp = agent.route(message).await.unwrap();
        assert_eq!(resp, AgentResponse::sound());
    }
    // One classification call per message, never a general reply.
    assert_eq!(client.calls().len(), 4);
}

#[tokio::test]
async fn music_carries_the_classified_url() {
    let client = ScriptedChatClient::new(
        Reply::Text(r#"{"intent":"music","url":"https://youtube.com/xyz"}"#),
        Reply::Text("unused"),
    );
    let resp = agent_with(&client).route("play https://youtube.com/xyz song please").await.unwrap();
    assert_eq!(resp, AgentResponse::music(Some("https://youtube.com/xyz".to_string())));

    let client = ScriptedChatClient::new(Reply::Text(r#"{"intent":"music","url":null}"#), Reply::Text("unused"));
    let resp = agent_with(&client).route("play something").await.unwrap();
    assert_eq!(resp, AgentResponse::music(None));
    assert_eq!(
        serde_json::to_string(&resp).unwrap(),
        r#"{"intent":"music","response":null,"url":null}"#
    );
}

#[tokio::test]
async fn fenced_classifier_output_is_unwrapped() {
    let client = ScriptedChatClient::new(
        Reply::Text("```json\n{\"intent\":\"nasa\",\"url\":null}\n```"),
        Reply::Text("unused"),
    );
    let agent = agent_with(&client);

    assert_eq!(
        agent.classify("show me a pic from space").await.unwrap(),
        IntentResult { intent: Intent::Nasa, url: None }
    );
    assert_eq!(agent.route("show me a pic from space").await.unwrap(), AgentResponse::nasa());
}

#[tokio::test]
async fn unparseable_classification_falls_back_to_general_reply() {
    let client = ScriptedChatClient::new(Reply::Text("I'm not sure"), Reply::Text("Happy to help!"));
    let agent = agent_with(&client);

    assert_eq!(agent.classify("hmm").await.unwrap(), IntentResult::fallback());

    let resp = agent.route("hmm").await.unwrap();
    assert_eq!(resp, AgentResponse::general("Happy to help!".to_string()));

    let calls = client.calls();
    // classify() above, then classify + general reply from route().
    assert_eq!(calls.len(), 3);
    let general = &calls[2].conversation;
    assert_eq!(general.len(), 2);
    assert_eq!(general[0], ChatMessage::system("You are a helpful assistant agent"));
    assert_eq!(general[1], ChatMessage::user("hmm"));
}

#[tokio::test]
async fn unknown_intent_is_reported_as_none() {
    let client = ScriptedChatClient::new(
        Reply::Text(r#"{"intent":"weather","url":null}"#),
        Reply::Text("It looks sunny."),
    );
    let resp = agent_with(&client).route("what's the weather?").await.unwrap();
    assert_eq!(resp.intent, "none");
    assert_eq!(resp.response.as_deref(), Some("It looks sunny."));
    assert_eq!(resp.url, None);
}

#[tokio::test]
async fn object_valued_intent_gets_general_reply() {
    for classified in [r#"{"intent":{"music":null},"url":"x"}"#, r#"{"intent":{"sound":null}}"#] {
        let client = ScriptedChatClient::new(Reply::Text(classified), Reply::Text("Sure thing."));
        let resp = agent_with(&client).route("play x").await.unwrap();
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"intent":"none","response":"Sure thing."}"#
        );
        assert_eq!(client.calls().len(), 2);
    }
}

#[tokio::test]
async fn classification_prompt_is_system_then_user() {
    let client = ScriptedChatClient::new(Reply::Text(r#"{"intent":"nasa","url":null}"#), Reply::Text("unused"));
    agent_with(&client).route("show me a pic from space").await.unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    let conv = &calls[0].conversation;
    assert_eq!(conv[0].role, Role::System);
    assert!(conv[0].content.contains("intent detection assistant"));
    assert_eq!(conv[1], ChatMessage::user("show me a pic from space"));
    assert_eq!(calls[0].model, None);
}

#[tokio::test]
async fn classifier_model_only_applies_to_classification() {
    let client = ScriptedChatClient::new(Reply::Text(r#"{"intent":"none","url":null}"#), Reply::Text("hi"));
    let agent = IntentAgent::new(client.clone(), PromptConfig::default(), Some("openai/gpt-4o-mini".to_string()));

    agent.route("hello").await.unwrap();
    let calls = client.calls();
    assert_eq!(calls[0].model.as_deref(), Some("openai/gpt-4o-mini"));
    assert_eq!(calls[1].model, None);
}

#[tokio::test]
async fn repeated_routing_is_byte_identical() {
    let client = ScriptedChatClient::new(
        Reply::Text(r#"{"intent":"none","url":null}"#),
        Reply::Text("I'm doing well, thanks!"),
    );
    let agent = agent_with(&client);

    let first = serde_json::to_vec(&agent.route("how are you?").await.unwrap()).unwrap();
    let second = serde_json::to_vec(&agent.route("how are you?").await.unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn classifier_upstream_failure_propagates_without_second_call() {
    let client = ScriptedChatClient::new(Reply::Upstream(503, "overloaded"), Reply::Text("unused"));
    let err = agent_with(&client).route("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::Upstream { status: 503, .. }));
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn general_reply_failure_propagates() {
    let client = ScriptedChatClient::new(Reply::Text(r#"{"intent":"none","url":null}"#), Reply::Malformed);
    let err = agent_with(&client).route("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::MalformedResponse(_)));
}
