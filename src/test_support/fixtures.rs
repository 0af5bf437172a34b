//! Test fixtures for common test scenarios.
//!
//! Each fixture is a package directory holding a Unit.toml and the files
//! its patterns match.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Fixture for a complete package.
#[derive(Debug, Clone)]
pub struct UnitFixture {
    /// Unit name, also the package directory name.
    pub name: String,
    /// Unit.toml content.
    pub manifest: String,
    /// Files (path relative to the package root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl UnitFixture {
    /// Create a new empty fixture.
    pub fn new(name: impl Into<String>) -> Self {
        UnitFixture {
            name: name.into(),
            manifest: String::new(),
            files: BTreeMap::new(),
        }
    }

    /// An Objective-C static library with one public and one private header.
    pub fn static_library(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r#"[unit]
name = "{name}"
version = "1.0.0"
platform = "ios"
deployment-target = "8.0"

[[group]]
sources = ["Classes/**/*.{{h,m}}"]
private-headers = ["Classes/Private/*.h"]
resources = ["Resources/*"]
"#
        );

        UnitFixture::new(&name)
            .with_manifest(manifest)
            .with_file(format!("Classes/{name}.h"), manifests::header(&name))
            .with_file(format!("Classes/{name}.m"), manifests::implementation(&name))
            .with_file("Classes/Private/Internal.h", manifests::header("Internal"))
            .with_file("Resources/Logo.png", "")
    }

    /// A framework with a non-ARC source, a header mappings directory, a
    /// resource bundle and a unit test group.
    pub fn framework(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r##"[unit]
name = "{name}"
version = "1.2.3"
platform = "ios"
deployment-target = "9.0"
frameworks = true

[[group]]
sources = ["Classes/**/*.{{h,m}}"]
non-arc = ["Classes/MRC/*.m"]
private-headers = ["Classes/Private/*.h"]
resources = ["Resources/*"]
header-mappings-dir = "Classes"
prefix-header-contents = "#import <UIKit/UIKit.h>"

[group.resource-bundles]
{name}Assets = ["Assets/*.png"]

[[group]]
name = "{name}/Tests"
test-type = "unit"
sources = ["Tests/*.m"]
"##
        );

        UnitFixture::new(&name)
            .with_manifest(manifest)
            .with_file(format!("Classes/{name}.h"), manifests::header(&name))
            .with_file(format!("Classes/{name}.m"), manifests::implementation(&name))
            .with_file("Classes/Peel/Peel.h", manifests::header("Peel"))
            .with_file("Classes/Private/Internal.h", manifests::header("Internal"))
            .with_file("Classes/MRC/Legacy.m", manifests::implementation("Legacy"))
            .with_file("Resources/Logo.png", "")
            .with_file("Assets/icon.png", "")
            .with_file(format!("Tests/{name}Tests.m"), manifests::implementation("Tests"))
    }

    /// A unit that builds no binary and only ships a resource bundle.
    pub fn resources_only(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r#"[unit]
name = "{name}"
platform = "ios"
should-build = false

[[group]]
[group.resource-bundles]
{name}Resources = ["Assets/*"]
"#
        );

        UnitFixture::new(&name)
            .with_manifest(manifest)
            .with_file("Assets/icon.png", "")
    }

    /// Replace the manifest.
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write the package below `base`, returning the package directory.
    pub fn write_to(&self, base: &Path) -> io::Result<PathBuf> {
        let root = base.join(&self.name);
        std::fs::create_dir_all(&root)?;
        std::fs::write(root.join("Unit.toml"), &self.manifest)?;

        for (path, content) in &self.files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full, content)?;
        }

        Ok(root)
    }
}

/// Canned file contents.
pub mod manifests {
    /// Minimal manifest with a single source group.
    pub fn minimal(name: &str, platform: &str) -> String {
        format!(
            r#"[unit]
name = "{name}"
platform = "{platform}"

[[group]]
sources = ["Classes/*.{{h,m}}"]
"#
        )
    }

    /// An Objective-C header declaring one class.
    pub fn header(name: &str) -> String {
        format!("#import <Foundation/Foundation.h>\n\n@interface {name} : NSObject\n@end\n")
    }

    /// Implementation of the class declared by [`header`].
    pub fn implementation(name: &str) -> String {
        format!("#import \"{name}.h\"\n\n@implementation {name}\n@end\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_framework_fixture() {
        let tmp = TempDir::new().unwrap();
        let root = UnitFixture::framework("Banana").write_to(tmp.path()).unwrap();

        assert_eq!(root, tmp.path().join("Banana"));
        assert!(root.join("Unit.toml").exists());
        assert!(root.join("Classes/MRC/Legacy.m").exists());
        assert!(root.join("Tests/BananaTests.m").exists());
    }

    #[test]
    fn test_minimal_manifest() {
        let manifest = manifests::minimal("Banana", "osx");
        assert!(manifest.contains("name = \"Banana\""));
        assert!(manifest.contains("platform = \"osx\""));
        assert!(manifest.contains("Classes/*.{h,m}"));
    }
}
