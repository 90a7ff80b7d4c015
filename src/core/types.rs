//! Core type definitions used throughout the codebase

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Closed vocabulary of intents the dispatcher knows how to handle
///
/// Tags outside the vocabulary are kept verbatim in `Other` so the
/// dispatcher, not the extractor, decides they are unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntentKind {
    OpenApp,
    CloseApp,
    Screenshot,
    VolumeUp,
    VolumeDown,
    TypeText,
    RunCommand,
    WriteCode,
    Unknown,
    Other(String),
}

impl IntentKind {
    /// Map a wire tag to a kind. `type` is accepted for `type_text`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "open_app" => Self::OpenApp,
            "close_app" => Self::CloseApp,
            "screenshot" => Self::Screenshot,
            "volume_up" => Self::VolumeUp,
            "volume_down" => Self::VolumeDown,
            "type_text" | "type" => Self::TypeText,
            "run_command" => Self::RunCommand,
            "write_code" => Self::WriteCode,
            "unknown" | "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::OpenApp => "open_app",
            Self::CloseApp => "close_app",
            Self::Screenshot => "screenshot",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::TypeText => "type_text",
            Self::RunCommand => "run_command",
            Self::WriteCode => "write_code",
            Self::Unknown => "unknown",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for IntentKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

/// String-keyed, string-valued intent parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`, ignoring blank strings
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// First non-blank value among `keys`, in order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A resolved user command: one intent kind plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intent {
    #[serde(rename = "intent")]
    pub kind: IntentKind,
    pub params: Params,
}

impl Intent {
    pub fn new(kind: IntentKind, params: Params) -> Self {
        Self { kind, params }
    }

    /// `{intent: unknown, params: {}}`
    pub fn unknown() -> Self {
        Self::new(IntentKind::Unknown, Params::new())
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key, value);
        self
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_mapping_covers_vocabulary() {
        for tag in [
            "open_app",
            "close_app",
            "screenshot",
            "volume_up",
            "volume_down",
            "type_text",
            "run_command",
            "write_code",
            "unknown",
        ] {
            assert_eq!(IntentKind::from_tag(tag).as_tag(), tag);
        }
    }

    #[test]
    fn test_type_alias() {
        assert_eq!(IntentKind::from_tag("type"), IntentKind::TypeText);
    }

    #[test]
    fn test_unrecognized_tag_preserved() {
        let kind = IntentKind::from_tag("order_pizza");
        assert_eq!(kind, IntentKind::Other("order_pizza".into()));
        assert_eq!(kind.to_string(), "order_pizza");
    }

    #[test]
    fn test_params_ignore_blank_values() {
        let params: Params = [("app", "  "), ("name", "firefox")].into_iter().collect();
        assert_eq!(params.get("app"), None);
        assert_eq!(params.first_of(&["app", "name"]), Some("firefox"));
    }

    #[test]
    fn test_intent_serialization_shape() {
        let intent = Intent::new(IntentKind::OpenApp, Params::new()).with_param("app", "notepad");
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"intent":"open_app","params":{"app":"notepad"}}"#);
    }
}
