//! Resource routing between the Resources and Sources phases.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::project::{Project, RefId};

/// Data-model directories are compiled into generated code, so they belong
/// in the Sources phase.
static DATA_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*\.xcdatamodeld").expect("valid data model pattern"));

/// Whether a path names a data-model directory.
pub fn is_data_model(path: &Path) -> bool {
    DATA_MODEL.is_match(&path.to_string_lossy())
}

/// Resource references partitioned by the phase they go to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBuckets {
    /// Copied as resources.
    pub resources: Vec<RefId>,
    /// Data models, added to the Sources phase.
    pub compile: Vec<RefId>,
}

impl ResourceBuckets {
    /// Both buckets, resources first.
    pub fn all(&self) -> Vec<RefId> {
        self.resources.iter().chain(&self.compile).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.compile.is_empty()
    }
}

/// Resolve resource paths to references and partition them.
///
/// Paths without a reference are implicit members of a directory resource
/// and are skipped. Localized files are replaced by their variant group,
/// which appears once.
pub fn filter_resource_references(project: &Project, paths: &[PathBuf]) -> ResourceBuckets {
    let mut refs: Vec<RefId> = Vec::new();
    for path in paths {
        let Some(reference) = project.reference_for_path(path) else {
            tracing::debug!("no reference for resource {}, skipping", path.display());
            continue;
        };
        let reference = project
            .parent_variant_group(reference)
            .unwrap_or(reference);
        if !refs.contains(&reference) {
            refs.push(reference);
        }
    }

    let (compile, resources) = refs
        .into_iter()
        .partition(|&r| is_data_model(&project.reference(r).path));
    ResourceBuckets { resources, compile }
}
