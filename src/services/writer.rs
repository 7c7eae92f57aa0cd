use crate::models::PreferenceDocument;
use crate::services::SettingsError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Converts between JSON staging files and the simulator's binary plist format.
///
/// The production implementation is [`PlutilConverter`]. Tests substitute an
/// in-process fake so the writer's guarantees can be checked without `plutil`.
#[cfg_attr(test, mockall::automock)]
pub trait PlistConverter {
    /// Fail with [`SettingsError::ConverterUnavailable`] if the converter cannot run.
    fn check_available(&self) -> Result<(), SettingsError>;

    /// Write `source` (JSON) to `destination` as a binary plist.
    ///
    /// `destination` must only appear once conversion fully succeeded.
    fn to_binary(&self, source: &Utf8Path, destination: &Utf8Path) -> Result<(), SettingsError>;

    /// Read a plist in any format back into a document.
    fn to_document(&self, source: &Utf8Path) -> Result<PreferenceDocument, SettingsError>;
}

/// `plutil`, the macOS property list utility.
#[derive(Debug, Clone)]
pub struct PlutilConverter {
    program: Utf8PathBuf,
}

impl PlutilConverter {
    /// # Arguments
    /// * `program` - Path of the `plutil` executable (usually `/usr/bin/plutil`)
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }
}

impl Default for PlutilConverter {
    fn default() -> Self {
        Self::new(crate::models::config::DEFAULT_CONVERTER)
    }
}

impl PlistConverter for PlutilConverter {
    fn check_available(&self) -> Result<(), SettingsError> {
        let unavailable = || SettingsError::ConverterUnavailable(self.program.clone());

        let metadata = fs::metadata(&self.program).map_err(|_| unavailable())?;
        if !metadata.is_file() {
            return Err(unavailable());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(unavailable());
            }
        }

        Ok(())
    }

    fn to_binary(&self, source: &Utf8Path, destination: &Utf8Path) -> Result<(), SettingsError> {
        let args = ["-convert", "binary1", "-o", destination.as_str(), source.as_str()];
        tracing::debug!("Executing: {}", self.describe(&args));

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|e| SettingsError::CommandExecutionFailed {
                command: self.describe(&args),
                source: e,
            })?;

        if !status.success() {
            return Err(SettingsError::ConversionFailed {
                exit_code: status.code().unwrap_or(-1),
                destination: destination.to_path_buf(),
            });
        }

        Ok(())
    }

    fn to_document(&self, source: &Utf8Path) -> Result<PreferenceDocument, SettingsError> {
        let args = ["-convert", "json", "-o", "-", source.as_str()];
        tracing::debug!("Executing: {}", self.describe(&args));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| SettingsError::CommandExecutionFailed {
                command: self.describe(&args),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SettingsError::ConversionFailed {
                exit_code: output.status.code().unwrap_or(-1),
                destination: source.to_path_buf(),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout);
        PreferenceDocument::from_json_str(&json).map_err(|e| SettingsError::ConverterOutputInvalid {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Writes preference documents as binary plists without ever replacing an
/// existing file.
///
/// A write goes through these steps, stopping at the first failure:
/// 1. refuse if the destination exists
/// 2. create the destination's parent directories
/// 3. check the converter is available
/// 4. stage the document as indented JSON in a temporary file
/// 5. convert the staging file into the destination
///
/// The staging file is removed when the write returns, whatever the outcome.
pub struct AtomicPlistWriter {
    converter: Box<dyn PlistConverter>,
    staging_dir: Option<Utf8PathBuf>,
}

impl AtomicPlistWriter {
    /// Create a writer that stages in the system temp directory.
    ///
    /// # Arguments
    /// * `converter` - Turns the staged JSON into the binary destination file
    pub fn new(converter: impl PlistConverter + 'static) -> Self {
        Self {
            converter: Box::new(converter),
            staging_dir: None,
        }
    }

    /// Stage files in `dir` instead of the system temp directory.
    ///
    /// The directory must already exist; it is never created.
    pub fn with_staging_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// The converter used for writes, also usable for reading plists back.
    pub fn converter(&self) -> &dyn PlistConverter {
        self.converter.as_ref()
    }

    /// Write `document` to `destination` as a binary plist.
    ///
    /// # Arguments
    /// * `document` - Preferences to write
    /// * `destination` - Plist file to create; must not exist yet
    ///
    /// # Returns
    /// * `DestinationAlreadyExists` if anything (even a dangling link) is at `destination`
    /// * `Io` if the parent directories cannot be created
    /// * `ConverterUnavailable` if the converter cannot run
    /// * `CommandExecutionFailed` if the staging file cannot be written or the
    ///   converter cannot be spawned
    /// * `ConversionFailed` if the converter exits non-zero; `destination` is
    ///   then removed again
    pub fn write(
        &self,
        document: &PreferenceDocument,
        destination: &Utf8Path,
    ) -> Result<(), SettingsError> {
        // symlink_metadata so a dangling link also counts as existing
        if fs::symlink_metadata(destination).is_ok() {
            return Err(SettingsError::DestinationAlreadyExists(
                destination.to_path_buf(),
            ));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::io(format!("Failed to create directory: {}", parent), e)
            })?;
        }

        self.converter.check_available()?;

        let staging = self.stage(document)?;
        let staging_path = Utf8PathBuf::try_from(staging.path().to_path_buf()).map_err(|e| {
            SettingsError::CommandExecutionFailed {
                command: self.describe_staging(),
                source: e.into_io_error(),
            }
        })?;

        if let Err(e) = self.converter.to_binary(&staging_path, destination) {
            self.discard_partial(destination);
            return Err(e);
        }

        tracing::info!("Wrote {} ({} keys)", destination, document.len());
        Ok(())
    }

    fn describe_staging(&self) -> String {
        match &self.staging_dir {
            Some(dir) => format!("stage preference document in {}", dir),
            None => "stage preference document in the temp directory".to_string(),
        }
    }

    fn stage(&self, document: &PreferenceDocument) -> Result<NamedTempFile, SettingsError> {
        let staging_failed = |source: std::io::Error| SettingsError::CommandExecutionFailed {
            command: self.describe_staging(),
            source,
        };

        let json = document
            .to_json_pretty()
            .map_err(|e| staging_failed(e.into()))?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("simsettings-").suffix(".json");
        let created = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut file = created.map_err(staging_failed)?;

        file.write_all(json.as_bytes()).map_err(staging_failed)?;

        Ok(file)
    }

    /// The destination did not exist before this write, so anything there now
    /// is the converter's leftover.
    fn discard_partial(&self, destination: &Utf8Path) {
        if fs::symlink_metadata(destination).is_ok() {
            if let Err(e) = fs::remove_file(destination) {
                tracing::warn!("Failed to remove partial output {}: {}", destination, e);
            }
        }
    }
}
