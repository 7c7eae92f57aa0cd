//! Writes the simulator application's own preferences through `defaults`,
//! the same settings its Hardware menu changes.

use crate::services::SettingsError;
use std::process::Command;

/// Sets one key in the simulator application's preference domain.
#[cfg_attr(test, mockall::automock)]
pub trait SimulatorDefaults {
    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// `defaults write <domain> <key> "<value>"`
///
/// The command is awaited but its exit code is only logged: `defaults` reports
/// success for nearly everything, and a failure here is not worth aborting a run.
#[derive(Debug, Clone)]
pub struct DefaultsCommand {
    program: String,
    domain: String,
}

impl DefaultsCommand {
    pub fn new(program: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            domain: domain.into(),
        }
    }

    pub fn arguments(&self, key: &str, value: &str) -> Vec<String> {
        vec![
            "write".to_string(),
            self.domain.clone(),
            key.to_string(),
            format!("\"{}\"", value),
        ]
    }
}

impl Default for DefaultsCommand {
    fn default() -> Self {
        Self::new("defaults", "com.apple.iphonesimulator")
    }
}

impl SimulatorDefaults for DefaultsCommand {
    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let args = self.arguments(key, value);
        let command_line = format!("{} {}", self.program, args.join(" "));
        tracing::debug!("Executing: {}", command_line);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| SettingsError::CommandExecutionFailed {
                command: command_line.clone(),
                source: e,
            })?;

        if !status.success() {
            tracing::warn!("{} exited with {:?}, ignoring", command_line, status.code());
        }

        Ok(())
    }
}
