use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Tool configuration from SimSettings.yaml
///
/// Every field has a default, so an empty or missing file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub simulator: SimulatorConfig,
    pub logging: LoggingConfig,
}

/// Where the simulator keeps its state and which external tools touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Per-user directory holding one content folder per SDK, relative to the home directory.
    pub support_subpath: Utf8PathBuf,

    /// Binary plist converter.
    pub converter: Utf8PathBuf,

    /// Command used to write the simulator's own preferences.
    pub defaults_command: String,

    /// Preference domain of the simulator application.
    pub defaults_domain: String,

    /// JSON template for the global preferences. The bundled template is used when unset.
    pub template: Option<Utf8PathBuf>,

    /// SDK versions inspected by the demo binary.
    pub sdk_versions: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            support_subpath: Utf8PathBuf::from(DEFAULT_SUPPORT_SUBPATH),
            converter: Utf8PathBuf::from(DEFAULT_CONVERTER),
            defaults_command: "defaults".to_string(),
            defaults_domain: "com.apple.iphonesimulator".to_string(),
            template: None,
            sdk_versions: vec!["6.1".to_string(), "7.0".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: Utf8PathBuf,
    pub prefix: String,
    pub debug_mode: bool,
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: Utf8PathBuf::from("logs"),
            prefix: "simsettings".to_string(),
            debug_mode: false,
            console: true,
        }
    }
}

pub const DEFAULT_SUPPORT_SUBPATH: &str = "Library/Application Support/iPhone Simulator";
pub const DEFAULT_CONVERTER: &str = "/usr/bin/plutil";
