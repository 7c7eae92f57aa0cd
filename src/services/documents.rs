//! Preference documents for each settings domain the tool manages.
//!
//! Every builder returns a fresh document meant to become a whole preference
//! file; nothing here merges with what is already on disk.

use crate::models::{PlistValue, PreferenceDocument};
use crate::services::SettingsError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Global preferences template bundled with the binary.
pub const BUNDLED_GLOBAL_TEMPLATE: &str = include_str!("../../assets/globalPlist.json");

/// Source of the baseline global preferences.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateLoader {
    fn load(&self) -> Result<PreferenceDocument, SettingsError>;
}

/// The template compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTemplate;

impl TemplateLoader for BundledTemplate {
    fn load(&self) -> Result<PreferenceDocument, SettingsError> {
        parse_template("bundled template", BUNDLED_GLOBAL_TEMPLATE)
    }
}

/// A JSON template read from disk on every load.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: Utf8PathBuf,
}

impl FileTemplate {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TemplateLoader for FileTemplate {
    fn load(&self) -> Result<PreferenceDocument, SettingsError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| SettingsError::TemplateUnavailable {
                origin: self.path.to_string(),
                reason: e.to_string(),
            })?;
        parse_template(self.path.as_str(), &content)
    }
}

fn parse_template(origin: &str, content: &str) -> Result<PreferenceDocument, SettingsError> {
    PreferenceDocument::from_json_str(content).map_err(|e| SettingsError::TemplateUnavailable {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Global preferences: the template with `AppleLanguages` and `AppleLocale` replaced.
///
/// `locale` is a full locale such as `fr_FR`, `language` the bare language code (`fr`).
pub fn build_locale_document(
    template: &dyn TemplateLoader,
    locale: &str,
    language: &str,
) -> Result<PreferenceDocument, SettingsError> {
    let mut document = template.load()?;
    document.insert("AppleLanguages", PlistValue::string_array([language]));
    document.insert("AppleLocale", locale);
    Ok(document)
}

/// The default keyboard rewrites what automation types (capitalization,
/// corrections), so every assist is turned off.
pub fn build_keyboard_document() -> PreferenceDocument {
    PreferenceDocument::new()
        .with("KeyboardAutocapitalization", false)
        .with("KeyboardAutocorrection", false)
        .with("KeyboardCapsLock", false)
        .with("KeyboardCheckSpelling", false)
}

pub fn build_browser_warning_document() -> PreferenceDocument {
    PreferenceDocument::new().with("WarnAboutFraudulentWebsites", false)
}

/// Location permission for a single app. The result is the entire
/// `clients.plist`; grants for other bundles are not carried over.
pub fn build_location_document(bundle_id: &str, authorized: bool) -> PreferenceDocument {
    let client = PreferenceDocument::new()
        .with("Whitelisted", false)
        .with("BundleId", bundle_id)
        .with("Authorized", authorized);
    PreferenceDocument::new().with(bundle_id, client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_template_parses() {
        let template = BundledTemplate.load().unwrap();
        assert!(template.contains_key("AppleLocale"));
        assert!(template.contains_key("AppleKeyboards"));
    }

    #[test]
    fn test_locale_overrides_only_two_keys() {
        let template = BundledTemplate.load().unwrap();
        let document = build_locale_document(&BundledTemplate, "fr_FR", "fr").unwrap();

        assert_eq!(document.len(), template.len());
        assert_eq!(document.get("AppleLocale"), Some(&PlistValue::from("fr_FR")));
        assert_eq!(document.get("AppleLanguages"), Some(&PlistValue::string_array(["fr"])));
        for (key, value) in template.iter() {
            if key != "AppleLocale" && key != "AppleLanguages" {
                assert_eq!(document.get(key), Some(value), "template key {key} changed");
            }
        }
    }

    #[test]
    fn test_locale_adds_keys_missing_from_template() {
        let mut loader = MockTemplateLoader::new();
        loader
            .expect_load()
            .times(1)
            .returning(|| Ok(PreferenceDocument::new().with("Other", true)));

        let document = build_locale_document(&loader, "de_DE", "de").unwrap();
        let expected = PreferenceDocument::new()
            .with("Other", true)
            .with("AppleLanguages", PlistValue::string_array(["de"]))
            .with("AppleLocale", "de_DE");
        assert_eq!(document, expected);
    }

    #[test]
    fn test_missing_template_file() {
        let loader = FileTemplate::new("/nonexistent/globalPlist.json");
        let err = build_locale_document(&loader, "fr_FR", "fr").unwrap_err();
        assert!(matches!(err, SettingsError::TemplateUnavailable { .. }));
    }

    #[test]
    fn test_malformed_template_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("globalPlist.json")).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = FileTemplate::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::TemplateUnavailable { ref origin, .. } if origin == path.as_str()
        ));
    }

    #[test]
    fn test_keyboard_document() {
        let document = build_keyboard_document();
        assert_eq!(document.len(), 4);
        assert!(document.iter().all(|(_, v)| v.as_bool() == Some(false)));
        assert!(document.contains_key("KeyboardCheckSpelling"));
    }

    #[test]
    fn test_browser_warning_document() {
        let document = build_browser_warning_document();
        assert_eq!(document, PreferenceDocument::new().with("WarnAboutFraudulentWebsites", false));
    }

    #[test]
    fn test_location_document_shape() {
        let document = build_location_document("com.example.app", true);
        let json: serde_json::Value =
            serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "com.example.app": {
                    "Whitelisted": false,
                    "BundleId": "com.example.app",
                    "Authorized": true
                }
            })
        );
    }
}
