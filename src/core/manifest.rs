//! Unit.toml manifest parsing and file classification.
//!
//! The manifest declares one build unit and its file groups with glob
//! patterns. Turning it into a [`BuildUnit`] expands the patterns against
//! the filesystem and sorts every match into the bucket the target
//! synthesizer expects.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::file_group::{is_header_file, is_source_file, FileGroup};
use crate::core::platform::{parse_lenient, Platform, PlatformVersion};
use crate::core::unit::{BuildUnit, ConfigurationKind, TestType};
use crate::util::diagnostic::{suggestions, ManifestParseError};
use crate::util::fs::glob_paths;

/// File name of a unit manifest.
pub const MANIFEST_NAME: &str = "Unit.toml";

fn default_true() -> bool {
    true
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// The parsed Unit.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// The `[unit]` table
    pub unit: UnitMetadata,

    /// Every `[[group]]` table, in declaration order
    pub groups: Vec<GroupSpec>,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

/// Unit metadata from the `[unit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnitMetadata {
    /// Unit name
    pub name: String,

    /// Unit version, `major[.minor[.patch]]`
    #[serde(default)]
    pub version: Option<String>,

    /// Target platform
    pub platform: Platform,

    /// Deployment target of the generated targets
    #[serde(default)]
    pub deployment_target: Option<PlatformVersion>,

    /// Package as a framework
    #[serde(default)]
    pub frameworks: bool,

    /// Whether the unit produces a binary
    #[serde(default = "default_true")]
    pub should_build: bool,

    #[serde(default)]
    pub swift_version: Option<String>,

    #[serde(default)]
    pub inhibit_warnings: bool,

    /// Build configurations, name -> kind
    #[serde(default)]
    pub configurations: BTreeMap<String, ConfigurationKind>,
}

/// One `[[group]]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupSpec {
    /// Group name; defaults to the unit name for the first group
    #[serde(default)]
    pub name: Option<String>,

    /// Directory the patterns are relative to, relative to the manifest
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Source patterns. Headers and non-compilable files matched here are
    /// classified as such.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Sources compiled without ARC
    #[serde(default)]
    pub non_arc: Vec<String>,

    /// `false` compiles every source without ARC
    #[serde(default = "default_true")]
    pub requires_arc: bool,

    /// Public header patterns. When omitted every header not declared
    /// private is public.
    #[serde(default)]
    pub public_headers: Option<Vec<String>>,

    #[serde(default)]
    pub private_headers: Vec<String>,

    #[serde(default)]
    pub resources: Vec<String>,

    /// Bundle name -> resource patterns
    #[serde(default)]
    pub resource_bundles: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub compiler_flags: Vec<String>,

    /// Deployment target the group's code was written for
    #[serde(default)]
    pub deployment_target: Option<PlatformVersion>,

    /// Directory whose layout public headers keep in a framework
    #[serde(default)]
    pub header_mappings_dir: Option<PathBuf>,

    /// Module map used instead of a generated one
    #[serde(default)]
    pub module_map: Option<PathBuf>,

    #[serde(default)]
    pub prefix_header_contents: Option<String>,

    #[serde(default)]
    pub prefix_header_file: Option<PathBuf>,

    /// Marks the group as a test specification
    #[serde(default)]
    pub test_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    unit: UnitMetadata,
    #[serde(default, rename = "group")]
    groups: Vec<GroupSpec>,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| {
            ManifestParseError::from_toml(&path.display().to_string(), content, &e)
        })?;

        if raw.unit.name.trim().is_empty() {
            bail!("manifest at {} has an empty unit name", path.display());
        }

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        Ok(Manifest {
            unit: raw.unit,
            groups: raw.groups,
            manifest_dir,
        })
    }

    /// Name of each group, defaulted the way [`to_build_unit`](Self::to_build_unit)
    /// names them.
    pub fn group_names(&self) -> Vec<String> {
        (0..self.groups.len()).map(|i| self.group_name(i)).collect()
    }

    fn group_name(&self, index: usize) -> String {
        match &self.groups[index].name {
            Some(name) => name.clone(),
            None if index == 0 => self.unit.name.clone(),
            None => format!("{}/{}", self.unit.name, index),
        }
    }

    /// Classify the files of every group and build the unit.
    pub fn to_build_unit(&self) -> Result<BuildUnit> {
        let meta = &self.unit;
        let mut unit = BuildUnit::new(meta.name.clone(), meta.platform)
            .with_frameworks(meta.frameworks)
            .with_should_build(meta.should_build)
            .with_inhibit_warnings(meta.inhibit_warnings);

        if let Some(version) = &meta.version {
            unit.version = parse_lenient(version)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid version for unit `{}`", meta.name))?;
        }
        if let Some(target) = &meta.deployment_target {
            unit = unit.with_deployment_target(target.clone());
        }
        if let Some(swift) = &meta.swift_version {
            unit = unit.with_swift_version(swift.clone());
        }
        if !meta.configurations.is_empty() {
            unit.configurations = meta.configurations.clone();
        }

        for index in 0..self.groups.len() {
            let group = self
                .classify(index)
                .with_context(|| format!("failed to classify group `{}`", self.group_name(index)))?;
            unit = unit.with_group(group);
        }

        if unit.file_groups.is_empty() {
            tracing::warn!("unit `{}` declares no groups; {}", meta.name, suggestions::NO_GROUPS);
        }
        Ok(unit)
    }

    fn classify(&self, index: usize) -> Result<FileGroup> {
        let spec = &self.groups[index];
        let root: PathBuf = self
            .manifest_dir
            .join(&spec.root)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        let mut group = FileGroup::new(self.group_name(index), root.clone());

        if let Some(test_type) = &spec.test_type {
            group.test_type = Some(test_type.parse::<TestType>()?);
        }
        group.compiler_flags = spec.compiler_flags.clone();
        group.deployment_target = spec.deployment_target.clone();

        let non_arc: BTreeSet<PathBuf> = glob_paths(&root, &spec.non_arc, false)?
            .into_iter()
            .collect();
        let mut sources: BTreeSet<PathBuf> =
            glob_paths(&root, &spec.sources, false)?.into_iter().collect();
        sources.extend(non_arc.iter().cloned());

        let private: BTreeSet<PathBuf> = glob_paths(&root, &spec.private_headers, false)?
            .into_iter()
            .collect();
        let declared_public: Option<BTreeSet<PathBuf>> = match &spec.public_headers {
            Some(patterns) => Some(glob_paths(&root, patterns, false)?.into_iter().collect()),
            None => None,
        };

        let mut headers: BTreeSet<PathBuf> = sources
            .iter()
            .filter(|p| is_header_file(p))
            .cloned()
            .collect();
        headers.extend(private.iter().cloned());
        if let Some(public) = &declared_public {
            headers.extend(public.iter().cloned());
        }

        let public: BTreeSet<PathBuf> = declared_public
            .unwrap_or_else(|| headers.clone())
            .difference(&private)
            .cloned()
            .collect();

        for path in sources {
            let is_arc = spec.requires_arc && !non_arc.contains(&path);
            if !is_source_file(&path) {
                group.other_sources.push(path.clone());
            }
            if is_arc {
                group.arc_sources.push(path);
            } else {
                group.non_arc_sources.push(path);
            }
        }
        group.headers = headers.into_iter().collect();
        group.public_headers = public;
        group.private_headers = private;

        group.resources = glob_paths(&root, &spec.resources, true)?;
        for (bundle, patterns) in &spec.resource_bundles {
            group
                .resource_bundles
                .insert(bundle.clone(), glob_paths(&root, patterns, true)?);
        }

        group.module_map = spec.module_map.as_ref().map(|p| root.join(p));
        group.header_mappings_dir = spec.header_mappings_dir.clone();
        group.prefix_header_contents = spec.prefix_header_contents.clone();
        group.prefix_header_file = spec.prefix_header_file.as_ref().map(|p| root.join(p));

        tracing::debug!(
            "classified group `{}`: {} arc, {} non-arc, {} headers, {} resources",
            group.name,
            group.arc_sources.len(),
            group.non_arc_sources.len(),
            group.headers.len(),
            group.resources.len()
        );
        Ok(group)
    }
}

/// Find `Unit.toml` starting at `start` and searching upward.
pub fn find_manifest(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            bail!(
                "could not find `{}` in `{}` or any parent directory\n{}",
                MANIFEST_NAME,
                start.display(),
                suggestions::NO_MANIFEST
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r##"
[unit]
name = "Banana"
version = "1.2"
platform = "ios"
deployment-target = "9.0"
frameworks = true
swift-version = "5.0"

[[group]]
sources = ["Classes/**/*.{h,m,txt}"]
non-arc = ["Classes/MRC/*.m"]
private-headers = ["Classes/Private/*.h"]
resources = ["Resources/*"]
compiler-flags = ["-DBANANA=1"]
header-mappings-dir = "Classes"
prefix-header-contents = "#import <Foundation/Foundation.h>"

[group.resource-bundles]
BananaAssets = ["Assets/*.png"]

[[group]]
name = "Banana/Tests"
test-type = "unit"
sources = ["Tests/*.m"]
"##;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn package() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join(MANIFEST_NAME), MANIFEST).unwrap();
        for rel in [
            "Classes/Banana.h",
            "Classes/Banana.m",
            "Classes/Peel/Peel.h",
            "Classes/Private/Internal.h",
            "Classes/MRC/Legacy.m",
            "Classes/notes.txt",
            "Resources/Logo.png",
            "Assets/icon.png",
            "Tests/BananaTests.m",
        ] {
            write(root, rel);
        }
        tmp
    }

    #[test]
    fn test_parse_metadata() {
        let tmp = package();
        let manifest = Manifest::load(&tmp.path().join(MANIFEST_NAME)).unwrap();
        assert_eq!(manifest.unit.name, "Banana");
        assert_eq!(manifest.unit.platform, Platform::Ios);
        assert!(manifest.unit.should_build);
        assert_eq!(manifest.group_names(), vec!["Banana", "Banana/Tests"]);
    }

    #[test]
    fn test_classification() {
        let tmp = package();
        let root = tmp.path();
        let unit = Manifest::load(&root.join(MANIFEST_NAME))
            .unwrap()
            .to_build_unit()
            .unwrap();

        assert_eq!(unit.version, semver::Version::new(1, 2, 0));
        assert!(unit.requires_frameworks);
        assert_eq!(unit.test_types, vec![TestType::Unit]);
        assert_eq!(unit.configurations.len(), 2);

        let group = &unit.file_groups[0];
        let p = |rel: &str| root.join(rel);
        assert!(group.non_arc_sources.contains(&p("Classes/MRC/Legacy.m")));
        assert!(group.arc_sources.contains(&p("Classes/Banana.m")));
        assert!(!group.arc_sources.contains(&p("Classes/MRC/Legacy.m")));
        assert_eq!(group.other_sources, vec![p("Classes/notes.txt")]);
        assert_eq!(group.headers.len(), 3);
        assert!(group.public_headers.contains(&p("Classes/Banana.h")));
        assert!(group.public_headers.contains(&p("Classes/Peel/Peel.h")));
        assert!(!group.public_headers.contains(&p("Classes/Private/Internal.h")));
        assert!(group.private_headers.contains(&p("Classes/Private/Internal.h")));
        assert_eq!(group.resources, vec![p("Resources/Logo.png")]);
        assert_eq!(group.resource_bundles["BananaAssets"], vec![p("Assets/icon.png")]);
        assert_eq!(group.header_mappings_root(), Some(p("Classes")));
        assert_eq!(
            group.prefix_header_contents.as_deref(),
            Some("#import <Foundation/Foundation.h>")
        );

        let tests = &unit.file_groups[1];
        assert_eq!(tests.test_type, Some(TestType::Unit));
        assert_eq!(tests.arc_sources, vec![p("Tests/BananaTests.m")]);
    }

    #[test]
    fn test_requires_arc_false() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Legacy.m");
        let manifest = Manifest::parse(
            "[unit]\nname = \"Old\"\nplatform = \"osx\"\n\n[[group]]\nsources = [\"*.m\"]\nrequires-arc = false\n",
            &tmp.path().join(MANIFEST_NAME),
        )
        .unwrap();
        let unit = manifest.to_build_unit().unwrap();
        assert!(unit.file_groups[0].arc_sources.is_empty());
        assert_eq!(unit.file_groups[0].non_arc_sources.len(), 1);
    }

    #[test]
    fn test_unknown_test_type_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let manifest = Manifest::parse(
            "[unit]\nname = \"Banana\"\nplatform = \"ios\"\n\n[[group]]\ntest-type = \"integration\"\n",
            &tmp.path().join(MANIFEST_NAME),
        )
        .unwrap();
        let err = manifest.to_build_unit().unwrap_err();
        assert!(format!("{:#}", err).contains("unknown test type `integration`"));
    }

    #[test]
    fn test_parse_error_carries_span() {
        let err = Manifest::parse("[unit]\nname = \n", Path::new("Unit.toml")).unwrap_err();
        let parse = err.downcast_ref::<ManifestParseError>().unwrap();
        assert!(parse.span.is_some());
    }

    #[test]
    fn test_find_manifest_searches_upward() {
        let tmp = package();
        let nested = tmp.path().join("Classes/Peel");
        assert_eq!(
            find_manifest(&nested).unwrap(),
            tmp.path().join(MANIFEST_NAME)
        );

        let empty = TempDir::new().unwrap();
        let err = find_manifest(empty.path()).unwrap_err();
        assert!(err.to_string().contains("Unit.toml"));
    }
}
