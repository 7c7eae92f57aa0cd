use crate::models::{DeviceClass, DeviceVariation};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while changing simulator settings
///
/// Every variant is fatal to the operation in progress. Nothing is partially
/// applied: when a write fails, the destination file does not exist.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{device} {variation} incompatible with SDK {target_version}")]
    IncompatibleConfiguration {
        device: DeviceClass,
        variation: DeviceVariation,
        target_version: String,
    },

    #[error("Global preferences template {origin} unavailable: {reason}")]
    TemplateUnavailable { origin: String, reason: String },

    #[error("{0} already exists. Cannot create it.")]
    DestinationAlreadyExists(Utf8PathBuf),

    #[error("Cannot access {0}")]
    ConverterUnavailable(Utf8PathBuf),

    #[error("Conversion to binary plist failed for {destination}. exitCode={exit_code}")]
    ConversionFailed {
        exit_code: i32,
        destination: Utf8PathBuf,
    },

    #[error("Failed to run {command}")]
    CommandExecutionFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Converter produced unreadable output for {path}: {reason}")]
    ConverterOutputInvalid { path: Utf8PathBuf, reason: String },

    #[error("Cannot determine the user's home directory")]
    HomeDirectoryUnavailable,

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        SettingsError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_incompatible_message() {
        let err = SettingsError::IncompatibleConfiguration {
            device: DeviceClass::IPad,
            variation: DeviceVariation::Retina35,
            target_version: "7.0".to_string(),
        };
        assert_eq!(err.to_string(), "iPad Retina35 incompatible with SDK 7.0");
    }

    #[test]
    fn test_command_failure_keeps_source() {
        let err = SettingsError::CommandExecutionFailed {
            command: "/usr/bin/plutil -convert binary1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/usr/bin/plutil"));
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }
}
