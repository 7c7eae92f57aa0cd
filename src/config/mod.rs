use crate::models::ToolConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "SimSettings.yaml";

/// Prefix of environment overrides, e.g. `SIMSETTINGS_SIMULATOR__CONVERTER=/opt/bin/plutil`.
pub const ENV_PREFIX: &str = "SIMSETTINGS";

/// Configuration manager for loading and saving `SimSettings.yaml`.
///
/// Values are layered: built-in defaults, then the YAML file if present,
/// then `SIMSETTINGS_<SECTION>__<KEY>` environment variables.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `SimSettings.yaml` (e.g., "SimSettings Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the configuration.
    ///
    /// # Returns
    /// The merged ToolConfig; defaults fill anything the file and environment leave out
    pub fn load_config(&self) -> Result<ToolConfig> {
        if !self.config_path.exists() {
            tracing::warn!("Config file not found at {}, using defaults", self.config_path);
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(self.config_path.as_std_path())
                    .format(::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: ToolConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the configuration file.
    ///
    /// # Arguments
    /// * `config` - The ToolConfig to save
    pub fn save_config(&self, config: &ToolConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager.load_config().unwrap();
        assert_eq!(config.simulator.defaults_command, "defaults");
        assert_eq!(config.logging.prefix, "simsettings");
    }

    #[test]
    fn test_creates_nested_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = Utf8PathBuf::try_from(temp_dir.path().join("a").join("b")).unwrap();
        let manager = ConfigManager::new(&nested).unwrap();
        assert!(manager.config_dir().is_dir());
        assert_eq!(manager.config_path(), nested.join(CONFIG_FILE_NAME).as_path());
    }
}
