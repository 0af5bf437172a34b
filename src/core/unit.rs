//! Build units - the packages being synthesized into native targets.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::file_group::FileGroup;
use crate::core::platform::{Platform, PlatformVersion};
use crate::synth::errors::SynthError;

/// Kind of a build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationKind {
    Debug,
    Release,
}

impl fmt::Display for ConfigurationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationKind::Debug => write!(f, "debug"),
            ConfigurationKind::Release => write!(f, "release"),
        }
    }
}

/// Kind of tests a test specification declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Unit tests, hosted in a unit test bundle
    Unit,
    /// UI tests (recognized, but no product type is available for them)
    Ui,
}

impl TestType {
    /// Lowercase test type name, used in support file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Unit => "unit",
            TestType::Ui => "ui",
        }
    }

    /// Capitalized form used in target labels.
    pub fn label(&self) -> &'static str {
        match self {
            TestType::Unit => "Unit",
            TestType::Ui => "UI",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(TestType::Unit),
            "ui" => Ok(TestType::Ui),
            _ => Err(SynthError::UnknownTestType {
                test_type: s.to_string(),
            }),
        }
    }
}

/// The package being synthesized.
///
/// Constructed once per resolution pass and read-only during synthesis.
/// Generated secondary targets are reported through
/// [`SynthesizedTarget`](crate::synth::SynthesizedTarget) instead of being
/// recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildUnit {
    /// Unit name, also used as the target label
    pub name: String,

    /// Unit version
    pub version: Version,

    /// Target platform
    pub platform: Platform,

    /// Deployment target of the generated targets
    pub deployment_target: PlatformVersion,

    /// Whether the unit produces a binary
    pub should_build: bool,

    /// Whether the unit is packaged as a framework
    pub requires_frameworks: bool,

    /// Swift language version, if any
    pub swift_version: Option<String>,

    /// Whether compiler warnings are suppressed
    pub inhibit_warnings: bool,

    /// Test types declared by test specifications
    pub test_types: Vec<TestType>,

    /// User build configurations, name -> kind
    pub configurations: BTreeMap<String, ConfigurationKind>,

    /// Classified files, one group per consumer. The first group is the
    /// library's root group.
    pub file_groups: Vec<FileGroup>,
}

impl BuildUnit {
    /// Create a buildable static-library unit with default configurations.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        BuildUnit {
            name: name.into(),
            version: Version::new(1, 0, 0),
            platform,
            deployment_target: default_deployment_target(platform),
            should_build: true,
            requires_frameworks: false,
            swift_version: None,
            inhibit_warnings: false,
            test_types: Vec::new(),
            configurations: default_configurations(),
            file_groups: Vec::new(),
        }
    }

    /// Package the unit as a framework.
    pub fn with_frameworks(mut self, frameworks: bool) -> Self {
        self.requires_frameworks = frameworks;
        self
    }

    /// Mark the unit as resource-only (or not).
    pub fn with_should_build(mut self, should_build: bool) -> Self {
        self.should_build = should_build;
        self
    }

    /// Set the deployment target.
    pub fn with_deployment_target(mut self, version: PlatformVersion) -> Self {
        self.deployment_target = version;
        self
    }

    /// Set the Swift version.
    pub fn with_swift_version(mut self, version: impl Into<String>) -> Self {
        self.swift_version = Some(version.into());
        self
    }

    /// Suppress warnings for every source group.
    pub fn with_inhibit_warnings(mut self, inhibit: bool) -> Self {
        self.inhibit_warnings = inhibit;
        self
    }

    /// Add a file group. Test types are collected from test groups.
    pub fn with_group(mut self, group: FileGroup) -> Self {
        if let Some(test_type) = group.test_type {
            if !self.test_types.contains(&test_type) {
                self.test_types.push(test_type);
            }
        }
        self.file_groups.push(group);
        self
    }

    /// Target label.
    pub fn label(&self) -> &str {
        &self.name
    }

    /// Name of the Clang module, with non-identifier characters replaced.
    pub fn product_module_name(&self) -> String {
        let mut name: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }

    /// File name of the primary product.
    pub fn product_name(&self) -> String {
        if self.requires_frameworks {
            format!("{}.framework", self.product_module_name())
        } else {
            format!("lib{}.a", self.label())
        }
    }

    /// Whether any library source is Swift.
    pub fn uses_swift(&self) -> bool {
        self.library_groups().any(|g| {
            g.arc_sources
                .iter()
                .chain(&g.non_arc_sources)
                .any(|p| p.extension().is_some_and(|e| e == "swift"))
        })
    }

    /// Whether any group belongs to a test specification.
    pub fn contains_test_specifications(&self) -> bool {
        self.file_groups.iter().any(|g| g.is_test())
    }

    /// Groups that belong to the library itself.
    pub fn library_groups(&self) -> impl Iterator<Item = &FileGroup> {
        self.file_groups.iter().filter(|g| !g.is_test())
    }

    /// Distinct resource bundle names declared by any group.
    pub fn resource_bundle_names(&self) -> BTreeSet<&str> {
        self.file_groups
            .iter()
            .flat_map(|g| g.resource_bundles.keys().map(String::as_str))
            .collect()
    }

    /// Label of the test target for a test type.
    pub fn test_target_label(&self, test_type: TestType) -> String {
        format!("{}-{}-Tests", self.label(), test_type.label())
    }

    /// Label of the resource bundle target for a bundle.
    pub fn resource_bundle_target_label(&self, bundle_name: &str) -> String {
        format!("{}-{}", self.label(), bundle_name)
    }

    /// Build directory for products of this unit, below `dir`.
    pub fn configuration_build_dir(&self, dir: &str) -> String {
        format!("{}/{}", dir, self.label())
    }
}

/// Configurations used when a unit declares none.
pub fn default_configurations() -> BTreeMap<String, ConfigurationKind> {
    let mut configurations = BTreeMap::new();
    configurations.insert("Debug".to_string(), ConfigurationKind::Debug);
    configurations.insert("Release".to_string(), ConfigurationKind::Release);
    configurations
}

/// Oldest deployment target the generated project supports per platform.
pub fn default_deployment_target(platform: Platform) -> PlatformVersion {
    match platform {
        Platform::Ios => PlatformVersion::new(9, 0, 0),
        Platform::Osx => PlatformVersion::new(10, 10, 0),
        Platform::Tvos => PlatformVersion::new(9, 0, 0),
        Platform::Watchos => PlatformVersion::new(2, 0, 0),
    }
}
