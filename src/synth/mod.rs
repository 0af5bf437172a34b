//! Target synthesis.
//!
//! Turns a classified [`BuildUnit`] into native targets of a [`Project`]:
//! the primary library or framework target, one test target per test type
//! and one bundle target per resource bundle, together with their build
//! phases, settings and generated support files.

pub mod bundles;
pub mod errors;
pub mod flags;
pub mod headers;
pub mod installer;
pub mod module_map;
pub mod references;
pub mod resources;
pub mod settings;

use std::path::PathBuf;

use serde::Serialize;

use crate::core::file_group::FileGroup;
use crate::core::unit::{BuildUnit, TestType};
use crate::project::{Project, TargetId};

pub use errors::SynthError;
pub use installer::{install, InstallOptions, TargetInstaller};
pub use references::install_file_references;

/// Targets receiving the files of each group.
#[derive(Debug, Clone, Default)]
pub struct ConsumerTargets {
    /// The library target, absent for units that build no binary.
    pub primary: Option<TargetId>,
    pub tests: Vec<(TestType, TargetId)>,
}

impl ConsumerTargets {
    /// Target for the files of `group`.
    ///
    /// Library groups go to the primary target. Test groups go to the test
    /// target whose product type builds their test type; `None` when there
    /// is no such target.
    pub fn for_group(
        &self,
        project: &Project,
        group: &FileGroup,
        label: &str,
    ) -> Result<Option<TargetId>, SynthError> {
        let Some(test_type) = group.test_type else {
            return Ok(self.primary);
        };
        let product_type = tests::product_type_for_test_type(test_type, label)?;
        Ok(self
            .tests
            .iter()
            .map(|(_, id)| *id)
            .find(|id| project.target(*id).product_type == product_type))
    }
}

/// What synthesis produced for one unit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SynthesizedTarget {
    pub label: String,
    pub primary: Option<TargetId>,
    pub test_targets: Vec<(TestType, TargetId)>,
    pub bundle_targets: Vec<(String, TargetId)>,
    /// Every file written, in generation order.
    pub artifacts: Vec<PathBuf>,
}

impl SynthesizedTarget {
    fn new(unit: &BuildUnit) -> Self {
        SynthesizedTarget {
            label: unit.label().to_string(),
            ..Default::default()
        }
    }

    /// Every target created, primary first.
    pub fn all_targets(&self) -> Vec<TargetId> {
        self.primary
            .iter()
            .copied()
            .chain(self.test_targets.iter().map(|(_, id)| *id))
            .chain(self.bundle_targets.iter().map(|(_, id)| *id))
            .collect()
    }
}
