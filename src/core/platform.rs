//! Apple platforms and deployment-target versions.
//!
//! Each platform carries the fixed tables the target synthesizer needs:
//! the ARC dispatch threshold, the resource-bundle device family, the SDK
//! root and the deployment-target build setting.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A platform a build unit can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS
    Ios,
    /// macOS (the desktop platform)
    #[serde(alias = "macos")]
    Osx,
    /// tvOS
    Tvos,
    /// watchOS
    Watchos,
}

impl Platform {
    /// Lowercase platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Osx => "osx",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }

    /// First version where dispatch objects are Objective-C objects.
    ///
    /// ARC code targeting anything older must compile with
    /// `OS_OBJECT_USE_OBJC=0` so `dispatch_release()` keeps working.
    pub fn arc_dispatch_threshold(&self) -> PlatformVersion {
        match self {
            Platform::Ios => PlatformVersion::new(6, 0, 0),
            Platform::Osx => PlatformVersion::new(10, 8, 0),
            Platform::Watchos => PlatformVersion::new(2, 0, 0),
            Platform::Tvos => PlatformVersion::new(9, 0, 0),
        }
    }

    /// `TARGETED_DEVICE_FAMILY` for resource bundles.
    ///
    /// watchOS uses "1,2" rather than its native "4" so the bundle is
    /// WatchKit compatible. The desktop has no device family.
    pub fn bundle_device_family(&self) -> Option<&'static str> {
        match self {
            Platform::Ios => Some("1,2"),
            Platform::Tvos => Some("3"),
            Platform::Watchos => Some("1,2"),
            Platform::Osx => None,
        }
    }

    /// Value of the `SDKROOT` build setting.
    pub fn sdk_root(&self) -> &'static str {
        match self {
            Platform::Ios => "iphoneos",
            Platform::Osx => "macosx",
            Platform::Tvos => "appletvos",
            Platform::Watchos => "watchos",
        }
    }

    /// Build setting holding the deployment target.
    pub fn deployment_target_setting(&self) -> &'static str {
        match self {
            Platform::Ios => "IPHONEOS_DEPLOYMENT_TARGET",
            Platform::Osx => "MACOSX_DEPLOYMENT_TARGET",
            Platform::Tvos => "TVOS_DEPLOYMENT_TARGET",
            Platform::Watchos => "WATCHOS_DEPLOYMENT_TARGET",
        }
    }

    /// Framework imported by generated prefix and umbrella headers.
    pub fn ui_framework(&self) -> &'static str {
        match self {
            Platform::Ios | Platform::Tvos => "UIKit",
            Platform::Osx => "Cocoa",
            Platform::Watchos => "Foundation",
        }
    }

    /// Whether this is the desktop platform.
    pub fn is_desktop(&self) -> bool {
        matches!(self, Platform::Osx)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = match self {
            Platform::Ios => "iOS",
            Platform::Osx => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
        };
        write!(f, "{}", pretty)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "osx" | "macos" => Ok(Platform::Osx),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            _ => Err(format!(
                "unknown platform `{}` (expected ios, osx, tvos or watchos)",
                s
            )),
        }
    }
}

/// A deployment-target version such as `6`, `10.8` or `9.0.1`.
///
/// Missing components read as zero, so `6` and `6.0` compare equal. The
/// original spelling is kept for display and for build settings.
#[derive(Debug, Clone)]
pub struct PlatformVersion {
    version: Version,
    raw: String,
}

impl PlatformVersion {
    /// Create a version from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let raw = if patch == 0 {
            format!("{}.{}", major, minor)
        } else {
            format!("{}.{}.{}", major, minor, patch)
        };
        PlatformVersion {
            version: Version::new(major, minor, patch),
            raw,
        }
    }

    /// Parse a lenient dotted version.
    pub fn parse(s: &str) -> Result<Self, String> {
        let version = parse_lenient(s)?;
        Ok(PlatformVersion {
            version,
            raw: s.trim().to_string(),
        })
    }

    /// The normalized semver form.
    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    /// The version as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Parse `major[.minor[.patch]]` into a semver version.
pub fn parse_lenient(s: &str) -> Result<Version, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('.').collect();
    if s.is_empty() || parts.len() > 3 {
        return Err(format!("invalid version `{}`", s));
    }

    let mut nums = [0u64; 3];
    for (i, part) in parts.iter().enumerate() {
        nums[i] = part
            .parse()
            .map_err(|_| format!("invalid version `{}`", s))?;
    }

    Ok(Version::new(nums[0], nums[1], nums[2]))
}

impl PartialEq for PlatformVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for PlatformVersion {}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PlatformVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformVersion::parse(s)
    }
}

impl Serialize for PlatformVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PlatformVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PlatformVersion::parse(&s).map_err(serde::de::Error::custom)
    }
}
