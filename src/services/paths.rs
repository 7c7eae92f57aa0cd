//! Path arithmetic for a simulator's content-and-settings directory.
//!
//! Nothing here touches the filesystem.

use camino::{Utf8Path, Utf8PathBuf};

/// Resolved locations of the preference files of one simulator SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorPaths {
    content_dir: Utf8PathBuf,
}

impl SimulatorPaths {
    /// `<home>/<support_subpath>/<sdk_version>`
    pub fn resolve(home: &Utf8Path, support_subpath: &Utf8Path, sdk_version: &str) -> Self {
        Self {
            content_dir: home.join(support_subpath).join(sdk_version),
        }
    }

    /// Use an already known content directory.
    pub fn from_content_dir(content_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Utf8Path {
        &self.content_dir
    }

    pub fn preferences_dir(&self) -> Utf8PathBuf {
        self.content_dir.join("Library").join("Preferences")
    }

    pub fn global_preferences(&self) -> Utf8PathBuf {
        self.preferences_dir().join(".GlobalPreferences.plist")
    }

    pub fn keyboard_preferences(&self) -> Utf8PathBuf {
        self.preferences_dir().join("com.apple.Preferences.plist")
    }

    pub fn mobile_safari_preferences(&self) -> Utf8PathBuf {
        self.preferences_dir().join("com.apple.mobilesafari.plist")
    }

    pub fn location_clients(&self) -> Utf8PathBuf {
        self.content_dir
            .join("Library")
            .join("Caches")
            .join("locationd")
            .join("clients.plist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> SimulatorPaths {
        SimulatorPaths::resolve(
            Utf8Path::new("/Users/tester"),
            Utf8Path::new("Library/Application Support/iPhone Simulator"),
            "7.0",
        )
    }

    #[test]
    fn test_content_dir() {
        assert_eq!(
            paths().content_dir().as_str(),
            "/Users/tester/Library/Application Support/iPhone Simulator/7.0"
        );
    }

    #[test]
    fn test_preference_files() {
        let paths = paths();
        assert!(
            paths
                .global_preferences()
                .ends_with("7.0/Library/Preferences/.GlobalPreferences.plist")
        );
        assert!(
            paths
                .keyboard_preferences()
                .ends_with("Library/Preferences/com.apple.Preferences.plist")
        );
        assert!(
            paths
                .mobile_safari_preferences()
                .ends_with("Library/Preferences/com.apple.mobilesafari.plist")
        );
        assert!(
            paths
                .location_clients()
                .ends_with("7.0/Library/Caches/locationd/clients.plist")
        );
    }

    #[test]
    fn test_files_stay_inside_content_dir() {
        let paths = paths();
        for file in [
            paths.global_preferences(),
            paths.keyboard_preferences(),
            paths.mobile_safari_preferences(),
            paths.location_clients(),
        ] {
            assert!(file.starts_with(paths.content_dir()));
        }
    }
}
