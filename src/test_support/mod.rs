//! Test utilities for harbour-xcode unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use harbour_xcode::test_support::{synthesize, UnitFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let package = UnitFixture::framework("Banana").write_to(tmp.path()).unwrap();
//!     let run = synthesize(&package, &tmp.path().join("sandbox")).unwrap();
//!     assert!(run.synthesized.primary.is_some());
//! }
//! ```

pub mod fixtures;

use std::path::Path;

use anyhow::Result;

use crate::core::manifest::Manifest;
use crate::core::sandbox::Sandbox;
use crate::core::unit::BuildUnit;
use crate::project::Project;
use crate::synth::{install, install_file_references, InstallOptions, SynthesizedTarget};

pub use fixtures::*;

/// Everything a synthesis run over a fixture produced.
#[derive(Debug)]
pub struct SynthesisRun {
    pub unit: BuildUnit,
    pub sandbox: Sandbox,
    pub project: Project,
    pub synthesized: SynthesizedTarget,
}

/// Load the unit at `package` and synthesize it into a sandbox at `root`.
pub fn synthesize(package: &Path, root: &Path) -> Result<SynthesisRun> {
    let unit = Manifest::load(&package.join("Unit.toml"))?.to_build_unit()?;
    synthesize_unit(unit, root)
}

/// Synthesize an already classified unit into a sandbox at `root`.
pub fn synthesize_unit(unit: BuildUnit, root: &Path) -> Result<SynthesisRun> {
    let sandbox = Sandbox::new(root);
    let mut project = Project::new(sandbox.project_path());
    install_file_references(&mut project, &unit);
    let synthesized = install(&mut project, &sandbox, &unit, &InstallOptions::default())?;
    Ok(SynthesisRun {
        unit,
        sandbox,
        project,
        synthesized,
    })
}

/// Assertion helpers for testing.
pub mod assertions {
    use std::path::Path;

    /// Assert that an error message, with its context chain, contains a
    /// substring.
    pub fn assert_error_contains<T: std::fmt::Debug>(
        result: anyhow::Result<T>,
        substring: &str,
    ) {
        match result {
            Ok(v) => panic!("expected Err containing '{}', got Ok: {:?}", substring, v),
            Err(e) => {
                let msg = format!("{:#}", e);
                assert!(
                    msg.contains(substring),
                    "error '{}' does not contain '{}'",
                    msg,
                    substring
                );
            }
        }
    }

    /// Assert that a file contains specific content.
    pub fn assert_file_contains(path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let actual = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("file not found: {}", path.display()));
        assert!(
            actual.contains(content),
            "file {} does not contain '{}'\nactual content:\n{}",
            path.display(),
            content,
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_synthesize_static_library() {
        let tmp = TempDir::new().unwrap();
        let package = UnitFixture::static_library("Banana")
            .write_to(tmp.path())
            .unwrap();

        let run = synthesize(&package, &tmp.path().join("sandbox")).unwrap();
        assert!(run.synthesized.primary.is_some());
        assert!(run.synthesized.test_targets.is_empty());
    }

    #[test]
    fn test_assertions() {
        use assertions::*;

        let err: anyhow::Result<()> = Err(anyhow::anyhow!("inner").context("outer"));
        assert_error_contains(err, "outer: inner");
    }
}
