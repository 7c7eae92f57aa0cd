//! Data models for SimSettings.
//!
//! - [`PreferenceDocument`] / [`PlistValue`]: the structured contents of one preference file
//!   before it is converted to the simulator's binary plist format
//! - [`DeviceClass`] / [`DeviceVariation`]: hardware the simulator can emulate, with the
//!   fixed [`DEVICE_REGISTRY`] of valid pairs
//! - [`ToolConfig`]: converter, command and directory settings loaded from `SimSettings.yaml`

pub mod config;
pub mod device;
pub mod document;

pub use config::{LoggingConfig, SimulatorConfig, ToolConfig};
pub use device::{
    DEVICE_REGISTRY, DeviceClass, DeviceEntry, DeviceVariation, ParseDeviceError, SdkRange,
};
pub use document::{PlistValue, PreferenceDocument};
