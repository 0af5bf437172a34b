//! Classified files of one build unit consumer.
//!
//! A FileGroup is what the file classification step hands to the target
//! synthesizer: every path is absolute and already sorted into the bucket
//! it belongs to.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformVersion;
use crate::core::unit::TestType;

/// Extensions of files the compiler understands, headers included.
pub const SOURCE_FILE_EXTENSIONS: &[&str] = &[
    "m", "mm", "i", "c", "cc", "cxx", "cpp", "c++", "swift", "h", "hh", "hpp", "ipp", "tpp",
    "hxx", "def", "inl", "inc",
];

/// Extensions routed to a Headers phase.
pub const HEADER_FILE_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "ipp", "tpp", "hxx", "def"];

/// Whether a path has a compilable (or header) extension.
pub fn is_source_file(path: &Path) -> bool {
    has_extension(path, SOURCE_FILE_EXTENSIONS)
}

/// Whether a path has a header extension.
pub fn is_header_file(path: &Path) -> bool {
    has_extension(path, HEADER_FILE_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Header visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderAcl {
    Public,
    Private,
    Project,
}

impl HeaderAcl {
    /// Attribute value as it appears on a build file.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderAcl::Public => "Public",
            HeaderAcl::Private => "Private",
            HeaderAcl::Project => "Project",
        }
    }
}

impl fmt::Display for HeaderAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorized file paths for one consumer of a build unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileGroup {
    /// Consumer name (e.g. `Banana` or `Banana/Tests`)
    pub name: String,

    /// Directory the group's relative paths were resolved against
    pub root: PathBuf,

    /// Present when the group belongs to a test specification
    #[serde(default)]
    pub test_type: Option<TestType>,

    /// Compiler flags declared by the manifest
    #[serde(default)]
    pub compiler_flags: Vec<String>,

    /// Deployment target declared by the group
    #[serde(default)]
    pub deployment_target: Option<PlatformVersion>,

    /// Sources compiled with ARC
    #[serde(default)]
    pub arc_sources: Vec<PathBuf>,

    /// Sources compiled without ARC
    #[serde(default)]
    pub non_arc_sources: Vec<PathBuf>,

    /// Every header of the group
    #[serde(default)]
    pub headers: Vec<PathBuf>,

    /// Public subset of `headers`
    #[serde(default)]
    pub public_headers: BTreeSet<PathBuf>,

    /// Private subset of `headers`
    #[serde(default)]
    pub private_headers: BTreeSet<PathBuf>,

    /// Sources the compiler does not understand
    #[serde(default)]
    pub other_sources: Vec<PathBuf>,

    /// Resources, possibly including localized files and data models
    #[serde(default)]
    pub resources: Vec<PathBuf>,

    /// Named resource bundles, bundle name -> paths
    #[serde(default)]
    pub resource_bundles: BTreeMap<String, Vec<PathBuf>>,

    /// Package-provided module map
    #[serde(default)]
    pub module_map: Option<PathBuf>,

    /// Directory header subdirectories are preserved relative to
    #[serde(default)]
    pub header_mappings_dir: Option<PathBuf>,

    /// Inline prefix header contents
    #[serde(default)]
    pub prefix_header_contents: Option<String>,

    /// Prefix header file whose contents are appended
    #[serde(default)]
    pub prefix_header_file: Option<PathBuf>,
}

impl FileGroup {
    /// Create an empty group rooted at `root`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        FileGroup {
            name: name.into(),
            root: root.into(),
            ..Default::default()
        }
    }

    /// Whether the group belongs to a test specification.
    pub fn is_test(&self) -> bool {
        self.test_type.is_some()
    }

    /// Resolve the visibility of a header by set membership.
    pub fn header_acl(&self, header: &Path) -> HeaderAcl {
        if self.public_headers.contains(header) {
            HeaderAcl::Public
        } else if self.private_headers.contains(header) {
            HeaderAcl::Private
        } else {
            HeaderAcl::Project
        }
    }

    /// Every path the group references, deduplicated.
    pub fn all_paths(&self) -> BTreeSet<&Path> {
        self.arc_sources
            .iter()
            .chain(&self.non_arc_sources)
            .chain(&self.headers)
            .chain(&self.other_sources)
            .chain(&self.resources)
            .chain(self.resource_bundles.values().flatten())
            .map(PathBuf::as_path)
            .collect()
    }

    /// Absolute header mapping directory, if declared.
    pub fn header_mappings_root(&self) -> Option<PathBuf> {
        self.header_mappings_dir.as_ref().map(|d| self.root.join(d))
    }

    pub fn with_test_type(mut self, test_type: TestType) -> Self {
        self.test_type = Some(test_type);
        self
    }

    pub fn with_compiler_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.compiler_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_deployment_target(mut self, version: PlatformVersion) -> Self {
        self.deployment_target = Some(version);
        self
    }

    pub fn with_arc_sources(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.arc_sources = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_non_arc_sources(
        mut self,
        paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.non_arc_sources = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set headers and their public/private subsets.
    pub fn with_headers(
        mut self,
        public: impl IntoIterator<Item = impl Into<PathBuf>>,
        private: impl IntoIterator<Item = impl Into<PathBuf>>,
        project: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.public_headers = public.into_iter().map(Into::into).collect();
        self.private_headers = private.into_iter().map(Into::into).collect();
        self.headers = self
            .public_headers
            .iter()
            .chain(&self.private_headers)
            .cloned()
            .chain(project.into_iter().map(Into::into))
            .collect();
        self
    }

    pub fn with_other_sources(
        mut self,
        paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.other_sources = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resources(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.resources = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resource_bundle(
        mut self,
        name: impl Into<String>,
        paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.resource_bundles
            .entry(name.into())
            .or_default()
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_module_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_map = Some(path.into());
        self
    }

    pub fn with_header_mappings_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.header_mappings_dir = Some(dir.into());
        self
    }

    pub fn with_prefix_header_contents(mut self, contents: impl Into<String>) -> Self {
        self.prefix_header_contents = Some(contents.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> FileGroup {
        FileGroup::new("Banana", "/pkg").with_headers(
            ["/pkg/include/Banana.h"],
            ["/pkg/src/Banana+Private.h"],
            ["/pkg/src/Internal.h"],
        )
    }

    #[test]
    fn test_header_acl_by_membership() {
        let group = group();
        assert_eq!(
            group.header_acl(Path::new("/pkg/include/Banana.h")),
            HeaderAcl::Public
        );
        assert_eq!(
            group.header_acl(Path::new("/pkg/src/Banana+Private.h")),
            HeaderAcl::Private
        );
        assert_eq!(
            group.header_acl(Path::new("/pkg/src/Internal.h")),
            HeaderAcl::Project
        );
        assert_eq!(
            group.header_acl(Path::new("/elsewhere/Unknown.h")),
            HeaderAcl::Project
        );
    }

    #[test]
    fn test_with_headers_lists_every_header() {
        assert_eq!(group().headers.len(), 3);
    }

    #[test]
    fn test_extension_checks() {
        assert!(is_source_file(Path::new("a/B.m")));
        assert!(is_source_file(Path::new("a/B.SWIFT")));
        assert!(!is_source_file(Path::new("a/B.metal")));
        assert!(is_header_file(Path::new("a/B.hpp")));
        assert!(!is_header_file(Path::new("a/B.mm")));
    }

    #[test]
    fn test_header_mappings_root() {
        let group = FileGroup::new("Banana", "/pkg").with_header_mappings_dir("include");
        assert_eq!(
            group.header_mappings_root(),
            Some(PathBuf::from("/pkg/include"))
        );
    }
}
