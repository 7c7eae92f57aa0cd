//! Services module - the pieces that read and change simulator state on disk.
//!
//! Everything here is synchronous: each call blocks until its file I/O and at
//! most one external process have finished. Nothing coordinates with a running
//! simulator, so callers must make sure it is stopped before changing settings.
//!
//! # Components
//!
//! - [`SimulatorPaths`]: pure path arithmetic for one SDK's content-and-settings directory
//!   and the preference files inside it
//! - [`variation`]: the device/SDK compatibility check and the `SimulateDevice` identifiers
//! - [`documents`]: builds the preference document for each settings domain (locale from a
//!   [`TemplateLoader`], keyboard, Mobile Safari, location clients)
//! - [`AtomicPlistWriter`]: stages a document as JSON and has a [`PlistConverter`] turn it
//!   into a binary plist, refusing to replace a file that already exists
//! - [`SimulatorDefaults`]: writes the simulator application's own preferences via `defaults`
//! - [`reset`]: best-effort recursive delete and recreate of the content directory
//!
//! # External tools
//!
//! Two processes may be spawned:
//! 1. `/usr/bin/plutil -convert binary1 -o <destination> <staging.json>` for
//!    every file write
//! 2. `defaults write com.apple.iphonesimulator SimulateDevice "<identifier>"`
//!    for the hardware setting
//!
//! Both are behind traits so tests can run without macOS tooling.

pub mod defaults;
pub mod documents;
pub mod error;
pub mod paths;
pub mod reset;
pub mod variation;
pub mod writer;

pub use defaults::{DefaultsCommand, SimulatorDefaults};
pub use documents::{BundledTemplate, FileTemplate, TemplateLoader};
pub use error::SettingsError;
pub use paths::SimulatorPaths;
pub use reset::{DeletionFailure, ResetReport, reset_directory};
pub use writer::{AtomicPlistWriter, PlistConverter, PlutilConverter};
