//! Public entry point: one [`SimulatorSettings`] per simulator SDK.
//!
//! All mutating operations assume the simulator is not running. Each of them
//! creates exactly one file (or runs exactly one `defaults` command) and fails
//! cleanly, leaving nothing behind, if that is not possible.

use crate::models::{DeviceClass, DeviceVariation, PreferenceDocument, SimulatorConfig};
use crate::services::{
    AtomicPlistWriter, BundledTemplate, DefaultsCommand, FileTemplate, PlutilConverter, ResetReport,
    SettingsError, SimulatorDefaults, SimulatorPaths, TemplateLoader, documents, reset_directory,
    variation,
};
use camino::Utf8PathBuf;

/// Simulator preference changed by [`SimulatorSettings::set_variation`].
pub const SIMULATE_DEVICE_KEY: &str = "SimulateDevice";

/// Which SDK a settings instance talks about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorInstance {
    requested_version: String,
    exact_version: String,
}

impl EmulatorInstance {
    /// The exact version defaults to the requested one.
    pub fn new(requested_version: impl Into<String>) -> Self {
        let requested_version = requested_version.into();
        Self {
            exact_version: requested_version.clone(),
            requested_version,
        }
    }

    /// Pin the exact SDK (e.g. `7.0.3` for a request of `7.0`).
    pub fn with_exact_version(mut self, exact_version: impl Into<String>) -> Self {
        self.exact_version = exact_version.into();
        self
    }

    pub fn requested_version(&self) -> &str {
        &self.requested_version
    }

    pub fn exact_version(&self) -> &str {
        &self.exact_version
    }
}

/// Settings of one simulator SDK's content-and-settings directory.
pub struct SimulatorSettings {
    instance: EmulatorInstance,
    paths: SimulatorPaths,
    writer: AtomicPlistWriter,
    defaults: Box<dyn SimulatorDefaults>,
    template: Box<dyn TemplateLoader>,
}

impl SimulatorSettings {
    /// Settings for `sdk_version` under the current user's home directory.
    ///
    /// # Arguments
    /// * `sdk_version` - Requested SDK, also used as the exact version
    /// * `config` - Converter, `defaults` and template settings
    ///
    /// # Returns
    /// `HomeDirectoryUnavailable` if the home directory is unknown or not UTF-8
    pub fn new(sdk_version: &str, config: &SimulatorConfig) -> Result<Self, SettingsError> {
        Self::from_config(EmulatorInstance::new(sdk_version), config)
    }

    /// Like [`SimulatorSettings::new`] with an explicit [`EmulatorInstance`].
    pub fn from_config(
        instance: EmulatorInstance,
        config: &SimulatorConfig,
    ) -> Result<Self, SettingsError> {
        let home = dirs::home_dir()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .ok_or(SettingsError::HomeDirectoryUnavailable)?;
        let paths =
            SimulatorPaths::resolve(&home, &config.support_subpath, instance.exact_version());

        let writer = AtomicPlistWriter::new(PlutilConverter::new(&config.converter));
        let defaults = DefaultsCommand::new(&config.defaults_command, &config.defaults_domain);
        let template: Box<dyn TemplateLoader> = match &config.template {
            Some(path) => Box::new(FileTemplate::new(path)),
            None => Box::new(BundledTemplate),
        };

        tracing::debug!(
            "Simulator {} content directory: {}",
            instance.exact_version(),
            paths.content_dir()
        );

        Ok(Self {
            instance,
            paths,
            writer,
            defaults: Box::new(defaults),
            template,
        })
    }

    /// Assemble from explicit collaborators, e.g. a fake converter in tests.
    pub fn with_parts(
        instance: EmulatorInstance,
        paths: SimulatorPaths,
        writer: AtomicPlistWriter,
        defaults: impl SimulatorDefaults + 'static,
        template: impl TemplateLoader + 'static,
    ) -> Self {
        Self {
            instance,
            paths,
            writer,
            defaults: Box::new(defaults),
            template: Box::new(template),
        }
    }

    pub fn instance(&self) -> &EmulatorInstance {
        &self.instance
    }

    pub fn paths(&self) -> &SimulatorPaths {
        &self.paths
    }

    /// Grant or deny location access to `bundle_id`.
    ///
    /// This writes the whole `clients.plist`: only one app can hold a grant,
    /// and the file must not exist yet.
    ///
    /// # Arguments
    /// * `authorized` - Whether location services are allowed for the app
    /// * `bundle_id` - Bundle identifier of the app, e.g. `com.example.maps`
    ///
    /// # Returns
    /// `DestinationAlreadyExists` if a grant was already written since the last reset
    pub fn set_location_preference(
        &self,
        authorized: bool,
        bundle_id: &str,
    ) -> Result<(), SettingsError> {
        let document = documents::build_location_document(bundle_id, authorized);
        self.writer.write(&document, &self.paths.location_clients())
    }

    /// Turn off the keyboard's automatic corrections and caps lock.
    pub fn set_keyboard_options(&self) -> Result<(), SettingsError> {
        self.writer.write(
            &documents::build_keyboard_document(),
            &self.paths.keyboard_preferences(),
        )
    }

    /// Turn off Mobile Safari's fraudulent website warning.
    pub fn set_mobile_safari_options(&self) -> Result<(), SettingsError> {
        self.writer.write(
            &documents::build_browser_warning_document(),
            &self.paths.mobile_safari_preferences(),
        )
    }

    /// Start the simulator in `locale` (e.g. `fr_FR`) with `language` (e.g. `fr`).
    ///
    /// Requires a freshly reset content directory.
    ///
    /// # Arguments
    /// * `locale` - Value for `AppleLocale`
    /// * `language` - Sole entry of `AppleLanguages`
    ///
    /// # Returns
    /// `TemplateUnavailable` before anything is written if the template cannot be loaded
    pub fn set_locale(&self, locale: &str, language: &str) -> Result<(), SettingsError> {
        let document =
            documents::build_locale_document(self.template.as_ref(), locale, language)?;
        self.writer.write(&document, &self.paths.global_preferences())
    }

    /// Pick the simulated hardware, as the simulator's Hardware > Device menu does.
    ///
    /// # Arguments
    /// * `device` - iPhone or iPad
    /// * `variation` - Screen variant of `device`
    /// * `target_version` - SDK the simulator will run, e.g. `7.0`
    ///
    /// # Returns
    /// `IncompatibleConfiguration` without running anything if the pair does
    /// not exist on `target_version`
    pub fn set_variation(
        &self,
        device: DeviceClass,
        variation: DeviceVariation,
        target_version: &str,
    ) -> Result<(), SettingsError> {
        let value = variation::simulate_device_value(device, variation, target_version)?;
        tracing::info!("Simulating {} on SDK {}", value, target_version);
        self.defaults.write(SIMULATE_DEVICE_KEY, value)
    }

    /// Delete the content directory and recreate it empty, like the
    /// simulator's "Reset Content and Settings".
    ///
    /// # Returns
    /// A report of the entries that could not be deleted; never an error
    pub fn reset_content_and_settings(&self) -> ResetReport {
        tracing::info!("Resetting content and settings in {}", self.paths.content_dir());
        let report = reset_directory(self.paths.content_dir());
        if !report.is_clean() {
            tracing::warn!(
                "Reset of {} incomplete: {} entries left, recreated={}",
                self.paths.content_dir(),
                report.failures.len(),
                report.recreate_error.is_none()
            );
        }
        report
    }

    /// Read back `.GlobalPreferences.plist`.
    ///
    /// # Returns
    /// The preferences, or `ConversionFailed` if the file does not exist yet
    pub fn read_global_preferences(&self) -> Result<PreferenceDocument, SettingsError> {
        let converter = self.writer.converter();
        converter.check_available()?;
        converter.to_document(&self.paths.global_preferences())
    }
}
