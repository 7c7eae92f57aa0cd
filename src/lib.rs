// SimSettings - iOS Simulator content and settings preparation
//
// This is the library crate containing the settings pipeline and data structures.
// The binary crate (main.rs) is a small demo that prints each SDK's global preferences.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{DeviceClass, DeviceVariation, PlistValue, PreferenceDocument, ToolConfig};
pub use services::{ResetReport, SettingsError};
pub use settings::{EmulatorInstance, SimulatorSettings};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
