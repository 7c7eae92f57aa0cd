use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single value inside a preference document.
///
/// Preference files only ever hold plist-compatible values. JSON `null` has no
/// plist equivalent and is rejected when a document is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlistValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Array(Vec<PlistValue>),
    Dict(PreferenceDocument),
}

impl PlistValue {
    /// Build an array of strings, e.g. `AppleLanguages`.
    pub fn string_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PlistValue::Array(items.into_iter().map(|s| PlistValue::String(s.into())).collect())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&PreferenceDocument> {
        match self {
            PlistValue::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Bool(value)
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<PreferenceDocument> for PlistValue {
    fn from(value: PreferenceDocument) -> Self {
        PlistValue::Dict(value)
    }
}

/// Structured contents of one preference file before binary serialization.
///
/// Keys are unique; inserting an existing key replaces its value. Insertion
/// order is kept so staging files are deterministic, but equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceDocument {
    entries: IndexMap<String, PlistValue>,
}

impl PreferenceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PlistValue>,
    ) -> Option<PlistValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PlistValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlistValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a document from JSON text. The root must be an object.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Render the document as JSON indented by two spaces, the form handed to
    /// the plist converter.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut doc = PreferenceDocument::new();
        doc.insert("AppleLocale", "en_US");
        let previous = doc.insert("AppleLocale", "fr_FR");

        assert_eq!(previous, Some(PlistValue::from("en_US")));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("AppleLocale").and_then(PlistValue::as_str), Some("fr_FR"));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = PreferenceDocument::new().with("a", true).with("b", "x");
        let b = PreferenceDocument::new().with("b", "x").with("a", true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_nested_json() {
        let doc = PreferenceDocument::from_json_str(
            r#"{"AppleLanguages": ["en", "fr"], "AppleKeyboardsExpanded": 1,
                "Nested": {"Flag": false}, "Scale": 2.5}"#,
        )
        .unwrap();

        assert_eq!(doc.get("AppleLanguages"), Some(&PlistValue::string_array(["en", "fr"])));
        assert_eq!(doc.get("AppleKeyboardsExpanded"), Some(&PlistValue::Integer(1)));
        assert_eq!(doc.get("Scale"), Some(&PlistValue::Real(2.5)));
        let nested = doc.get("Nested").and_then(PlistValue::as_dict).unwrap();
        assert_eq!(nested.get("Flag").and_then(PlistValue::as_bool), Some(false));
    }

    #[test]
    fn test_null_and_non_object_roots_rejected() {
        assert!(PreferenceDocument::from_json_str(r#"{"Key": null}"#).is_err());
        assert!(PreferenceDocument::from_json_str(r#"["not", "an", "object"]"#).is_err());
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let doc = PreferenceDocument::new().with("WarnAboutFraudulentWebsites", false);
        let json = doc.to_json_pretty().unwrap();
        assert_eq!(json, "{\n  \"WarnAboutFraudulentWebsites\": false\n}");
    }
}
