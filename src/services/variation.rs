//! Device/SDK compatibility rules for the simulator's hardware menu.

use crate::models::{DEVICE_REGISTRY, DeviceClass, DeviceEntry, DeviceVariation};
use crate::services::SettingsError;
use regex::Regex;
use std::sync::LazyLock;

static SDK_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)(?:\.(\d+))?(?:\.(\d+))?\s*$").expect("Invalid SDK version regex")
});

/// Parse `major[.minor[.patch]]` into (major, minor). Patch levels never
/// affect compatibility.
pub fn parse_sdk_version(version: &str) -> Option<(u32, u32)> {
    let caps = SDK_VERSION.captures(version)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

fn lookup(device: DeviceClass, variation: DeviceVariation) -> Option<&'static DeviceEntry> {
    DEVICE_REGISTRY
        .iter()
        .find(|entry| entry.device == device && entry.variation == variation)
}

/// Whether the simulator can emulate `device`/`variation` on `target_version`.
///
/// Unknown pairs and unparseable versions are simply incompatible.
pub fn is_compatible(
    device: DeviceClass,
    variation: DeviceVariation,
    target_version: &str,
) -> bool {
    match (lookup(device, variation), parse_sdk_version(target_version)) {
        (Some(entry), Some(version)) => entry.sdk.contains(version),
        _ => false,
    }
}

/// The `SimulateDevice` value for a known pair, e.g. `iPhone (Retina 4-inch)`.
pub fn canonical_identifier(
    device: DeviceClass,
    variation: DeviceVariation,
) -> Option<&'static str> {
    lookup(device, variation).map(|entry| entry.identifier)
}

/// Validate and resolve in one step.
pub fn simulate_device_value(
    device: DeviceClass,
    variation: DeviceVariation,
    target_version: &str,
) -> Result<&'static str, SettingsError> {
    let incompatible = || SettingsError::IncompatibleConfiguration {
        device,
        variation,
        target_version: target_version.to_string(),
    };

    if !is_compatible(device, variation, target_version) {
        return Err(incompatible());
    }
    canonical_identifier(device, variation).ok_or_else(incompatible)
}
