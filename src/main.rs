//! SimSettings - demo entry point.
//!
//! Prints the global preferences (`.GlobalPreferences.plist`) of every
//! simulator SDK listed in the configuration, or `not available` when an SDK
//! has no readable preferences yet or its settings cannot be opened.
//!
//! # Execution Flow
//!
//! 1. Load `SimSettings Data/SimSettings.yaml` (defaults if missing)
//! 2. Initialize logging → logs/simsettings.<date>
//! 3. For each configured SDK version, read and print its global preferences
//!
//! # Platform
//!
//! macOS with Xcode's iOS Simulator; `plutil` must be installed.

use anyhow::Result;
use simsettings::{
    APP_NAME, ConfigManager, EmulatorInstance, PreferenceDocument, SettingsError,
    SimulatorSettings, ToolConfig, VERSION,
};

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("SimSettings Data")?;
    let config = config_manager.load_config()?;

    let _guard = simsettings::logging::setup_logging(&config.logging)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    // load_config ran before any subscriber existed
    if !config_manager.config_path().exists() {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_manager.config_path()
        );
    }

    for sdk_version in &config.simulator.sdk_versions {
        let instance = EmulatorInstance::new(sdk_version.as_str());
        let global_preferences = match read_global_preferences(&instance, &config) {
            Ok(document) => document.to_json_pretty()?,
            Err(e) => {
                tracing::debug!("Global preferences for {} unavailable: {}", sdk_version, e);
                "not available".to_string()
            }
        };

        println!(
            "globalPreferences {} ({}): {}",
            instance.requested_version(),
            instance.exact_version(),
            global_preferences
        );
    }

    tracing::info!("Done");
    Ok(())
}

fn read_global_preferences(
    instance: &EmulatorInstance,
    config: &ToolConfig,
) -> Result<PreferenceDocument, SettingsError> {
    let settings = SimulatorSettings::from_config(instance.clone(), &config.simulator)?;
    settings.read_global_preferences()
}
