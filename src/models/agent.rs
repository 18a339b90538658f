use serde::{ Deserialize, Serialize, Serializer };

#[derive(Deserialize, Debug, Default)]
pub struct AgentRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply body of `POST /agent`.
///
/// `url` is only emitted for `music`; there it is present even when null.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub intent: String,
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "url_present_or_absent")]
    pub url: Option<Option<String>>,
}

impl AgentResponse {
    pub fn sound() -> Self {
        Self { intent: "sound".to_string(), response: None, url: None }
    }

    pub fn music(url: Option<String>) -> Self {
        Self { intent: "music".to_string(), response: None, url: Some(url) }
    }

    pub fn nasa() -> Self {
        Self { intent: "nasa".to_string(), response: None, url: None }
    }

    pub fn general(reply: String) -> Self {
        Self { intent: "none".to_string(), response: Some(reply), url: None }
    }
}

// Outer `None` drops the key (via skip_serializing_if); `Some(None)` writes `"url": null`.
fn url_present_or_absent<S: Serializer>(
    value: &Option<Option<String>>,
    serializer: S
) -> Result<S::Ok, S::Error> {
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}
