use serde::{ Deserialize, Deserializer };
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intent {
    Sound,
    Music,
    Nasa,
    #[default]
    None,
    /// Any label the classifier invents outside the four known ones.
    Unknown,
}

impl Intent {
    pub fn from_label(label: &str) -> Self {
        match label {
            "sound" => Intent::Sound,
            "music" => Intent::Music,
            "nasa" => Intent::Nasa,
            "none" => Intent::None,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Sound => "sound",
            Intent::Music => "music",
            Intent::Nasa => "nasa",
            Intent::None => "none",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Only a string (or null) names an intent; any other JSON type is a shape error.
fn intent_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Intent, D::Error> {
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().map(Intent::from_label).unwrap_or_default())
}

/// Classifier verdict. `url` is carried verbatim and only used for `music`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct IntentResult {
    #[serde(default, deserialize_with = "intent_label")]
    pub intent: Intent,
    #[serde(default)]
    pub url: Option<String>,
}

impl IntentResult {
    pub fn fallback() -> Self {
        Self { intent: Intent::None, url: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_map_to_unknown() {
        let parsed: IntentResult = serde_json
            ::from_str(r#"{"intent":"weather","url":null}"#)
            .unwrap();
        assert_eq!(parsed.intent, Intent::Unknown);
    }

    #[test]
    fn missing_fields_default_to_none() {
        let parsed: IntentResult = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, IntentResult::fallback());
    }

    #[test]
    fn intent_must_be_a_string_label() {
        for raw in [r#"{"intent":{"music":null}}"#, r#"{"intent":["sound"]}"#, r#"{"intent":3}"#] {
            assert!(serde_json::from_str::<IntentResult>(raw).is_err(), "{} should not parse", raw);
        }
        let null_intent: IntentResult = serde_json::from_str(r#"{"intent":null}"#).unwrap();
        assert_eq!(null_intent.intent, Intent::None);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let parsed: IntentResult = serde_json::from_str(r#"{"intent":"Music"}"#).unwrap();
        assert_eq!(parsed.intent, Intent::Unknown);
    }

    #[test]
    fn url_is_not_validated() {
        let parsed: IntentResult = serde_json
            ::from_str(r#"{"intent":"music","url":"that song from yesterday"}"#)
            .unwrap();
        assert_eq!(parsed.url.as_deref(), Some("that song from yesterday"));
    }
}
