//! Info.plist for frameworks and resource bundles.

use std::collections::BTreeMap;

use semver::Version;
use serde::{Deserialize, Serialize};

use super::Generator;

/// `CFBundlePackageType` of the generated bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundlePackageType {
    Framework,
    Bundle,
}

impl BundlePackageType {
    pub fn code(&self) -> &'static str {
        match self {
            BundlePackageType::Framework => "FMWK",
            BundlePackageType::Bundle => "BNDL",
        }
    }
}

/// Property list describing a generated bundle.
#[derive(Debug, Clone)]
pub struct InfoPlist {
    package_type: BundlePackageType,
    version: Version,
    additional: BTreeMap<String, String>,
}

impl InfoPlist {
    pub fn new(package_type: BundlePackageType, version: Version) -> Self {
        InfoPlist {
            package_type,
            version,
            additional: BTreeMap::new(),
        }
    }

    /// Add or override a string entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// Every entry of the list, in key order.
    pub fn entries(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        let mut set = |k: &str, v: &str| {
            entries.insert(k.to_string(), v.to_string());
        };
        set("CFBundleDevelopmentRegion", "en");
        set("CFBundleIdentifier", "${PRODUCT_BUNDLE_IDENTIFIER}");
        set("CFBundleInfoDictionaryVersion", "6.0");
        set("CFBundleName", "${PRODUCT_NAME}");
        set("CFBundlePackageType", self.package_type.code());
        set("CFBundleSignature", "????");
        // Bundle versions carry no pre-release or build suffix.
        let short_version = format!(
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        );
        set("CFBundleShortVersionString", &short_version);
        match self.package_type {
            BundlePackageType::Framework => {
                set("CFBundleExecutable", "${EXECUTABLE_NAME}");
                set("CFBundleVersion", "${CURRENT_PROJECT_VERSION}");
                set("NSPrincipalClass", "");
            }
            BundlePackageType::Bundle => {
                set("CFBundleVersion", "1");
            }
        }
        entries.extend(self.additional.clone());
        entries
    }
}

impl Generator for InfoPlist {
    fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        output.push_str("<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n");
        output.push_str("<plist version=\"1.0\">\n");
        output.push_str("<dict>\n");
        for (key, value) in self.entries() {
            output.push_str(&format!("  <key>{}</key>\n", escape(&key)));
            output.push_str(&format!("  <string>{}</string>\n", escape(&value)));
        }
        output.push_str("</dict>\n");
        output.push_str("</plist>\n");
        output
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
