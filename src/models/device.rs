use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hardware family the simulator can emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    #[serde(rename = "iphone")]
    IPhone,
    #[serde(rename = "ipad")]
    IPad,
}

/// Screen size / density variant of a device.
///
/// Not every variant exists for every [`DeviceClass`]; the valid pairs are the
/// ones listed in [`DEVICE_REGISTRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceVariation {
    Regular,
    Retina,
    Retina35,
    Retina4,
    #[serde(rename = "Retina4_64bit")]
    Retina4_64Bit,
    #[serde(rename = "Retina_64bit")]
    Retina64Bit,
}

/// Lowest and highest SDK (major, minor) an entry runs on; `None` is unbounded.
/// The upper bound is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkRange {
    pub min: Option<(u32, u32)>,
    pub below: Option<(u32, u32)>,
}

impl SdkRange {
    pub const ANY: SdkRange = SdkRange {
        min: None,
        below: None,
    };

    pub const fn since(major: u32, minor: u32) -> Self {
        SdkRange {
            min: Some((major, minor)),
            below: None,
        }
    }

    pub const fn below(major: u32, minor: u32) -> Self {
        SdkRange {
            min: None,
            below: Some((major, minor)),
        }
    }

    pub fn contains(&self, version: (u32, u32)) -> bool {
        self.min.is_none_or(|min| version >= min)
            && self.below.is_none_or(|below| version < below)
    }
}

/// One known hardware configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEntry {
    pub device: DeviceClass,
    pub variation: DeviceVariation,
    /// Value the simulator's `SimulateDevice` preference expects.
    pub identifier: &'static str,
    pub sdk: SdkRange,
}

/// Every (device, variation) pair the simulator knows about.
pub const DEVICE_REGISTRY: &[DeviceEntry] = &[
    DeviceEntry {
        device: DeviceClass::IPhone,
        variation: DeviceVariation::Regular,
        identifier: "iPhone",
        // non-retina iPhones were dropped with iOS 7
        sdk: SdkRange::below(7, 0),
    },
    DeviceEntry {
        device: DeviceClass::IPhone,
        variation: DeviceVariation::Retina35,
        identifier: "iPhone (Retina 3.5-inch)",
        sdk: SdkRange::ANY,
    },
    DeviceEntry {
        device: DeviceClass::IPhone,
        variation: DeviceVariation::Retina4,
        identifier: "iPhone (Retina 4-inch)",
        sdk: SdkRange::since(6, 0),
    },
    DeviceEntry {
        device: DeviceClass::IPhone,
        variation: DeviceVariation::Retina4_64Bit,
        identifier: "iPhone (Retina 4-inch 64-bit)",
        sdk: SdkRange::since(7, 0),
    },
    DeviceEntry {
        device: DeviceClass::IPad,
        variation: DeviceVariation::Regular,
        identifier: "iPad",
        sdk: SdkRange::ANY,
    },
    DeviceEntry {
        device: DeviceClass::IPad,
        variation: DeviceVariation::Retina,
        identifier: "iPad (Retina)",
        sdk: SdkRange::ANY,
    },
    DeviceEntry {
        device: DeviceClass::IPad,
        variation: DeviceVariation::Retina64Bit,
        identifier: "iPad (Retina 64-bit)",
        sdk: SdkRange::since(7, 0),
    },
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseDeviceError {
    kind: &'static str,
    value: String,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 2] = [DeviceClass::IPhone, DeviceClass::IPad];
}

impl DeviceVariation {
    pub const ALL: [DeviceVariation; 6] = [
        DeviceVariation::Regular,
        DeviceVariation::Retina,
        DeviceVariation::Retina35,
        DeviceVariation::Retina4,
        DeviceVariation::Retina4_64Bit,
        DeviceVariation::Retina64Bit,
    ];
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::IPhone => f.write_str("iPhone"),
            DeviceClass::IPad => f.write_str("iPad"),
        }
    }
}

impl fmt::Display for DeviceVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceVariation::Regular => "Regular",
            DeviceVariation::Retina => "Retina",
            DeviceVariation::Retina35 => "Retina35",
            DeviceVariation::Retina4 => "Retina4",
            DeviceVariation::Retina4_64Bit => "Retina4_64bit",
            DeviceVariation::Retina64Bit => "Retina_64bit",
        };
        f.write_str(name)
    }
}

impl FromStr for DeviceClass {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iphone" => Ok(DeviceClass::IPhone),
            "ipad" => Ok(DeviceClass::IPad),
            _ => Err(ParseDeviceError {
                kind: "device",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DeviceVariation {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceVariation::ALL
            .into_iter()
            .find(|v| v.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDeviceError {
                kind: "variation",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_pairs_are_unique() {
        let pairs: HashSet<_> = DEVICE_REGISTRY
            .iter()
            .map(|e| (e.device, e.variation))
            .collect();
        assert_eq!(pairs.len(), DEVICE_REGISTRY.len());
    }

    #[test]
    fn test_sdk_range_bounds() {
        let range = SdkRange::below(7, 0);
        assert!(range.contains((6, 1)));
        assert!(!range.contains((7, 0)));

        let range = SdkRange::since(6, 0);
        assert!(!range.contains((5, 1)));
        assert!(range.contains((6, 0)));
        assert!(range.contains((7, 1)));

        assert!(SdkRange::ANY.contains((3, 2)));
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for variation in DeviceVariation::ALL {
            assert_eq!(variation.to_string().parse::<DeviceVariation>(), Ok(variation));
        }
        assert_eq!("IPHONE".parse::<DeviceClass>(), Ok(DeviceClass::IPhone));
        assert_eq!(
            "retina4_64BIT".parse::<DeviceVariation>(),
            Ok(DeviceVariation::Retina4_64Bit)
        );
    }

    #[test]
    fn test_parse_unknown_names() {
        let err = "ipod".parse::<DeviceClass>().unwrap_err();
        assert_eq!(err.to_string(), "unknown device: ipod");
        assert!("Retina5".parse::<DeviceVariation>().is_err());
    }
}
