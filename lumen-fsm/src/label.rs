//! String label keys for states and events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A string-labelled state or event key.
///
/// The engine is generic over its key types; `Label` is the convenience key
/// for machines whose states and events are plain names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_str() {
        let label = Label::from("powered_off");
        assert_eq!(label.as_str(), "powered_off");
        assert_eq!(label, Label::new("powered_off"));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::new("blinking").to_string(), "blinking");
    }

    #[test]
    fn test_label_serializes_transparently() {
        let label = Label::new("steady");
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"steady\"");

        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
