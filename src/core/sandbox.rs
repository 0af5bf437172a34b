//! Sandbox layout - where generated support files live.
//!
//! ```text
//! <root>/
//!   <project>.xcodeproj
//!   Target Support Files/
//!     <label>/
//!       <label>.xcconfig
//!       <label>.unit.xcconfig
//!       <label>-prefix.pch
//!       <label>-umbrella.h
//!       <label>.modulemap
//!       <label>-dummy.m
//!       Info.plist
//!       ResourceBundle-<bundle>-Info.plist
//! ```

use std::path::{Path, PathBuf};

use crate::util::fs::relative_path;

/// Default name of the generated project.
pub const DEFAULT_PROJECT_NAME: &str = "Packages";

/// Default name of the support files directory.
pub const DEFAULT_SUPPORT_FILES_DIR: &str = "Target Support Files";

/// Root directory of a synthesis run.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
    project_name: String,
    support_files_dir_name: String,
}

impl Sandbox {
    /// Create a sandbox at `root` with the default layout names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Sandbox {
            root: root.into(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            support_files_dir_name: DEFAULT_SUPPORT_FILES_DIR.to_string(),
        }
    }

    /// Use a different project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Use a different support files directory name.
    pub fn with_support_files_dir(mut self, name: impl Into<String>) -> Self {
        self.support_files_dir_name = name.into();
        self
    }

    /// Sandbox root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the generated project bundle.
    pub fn project_path(&self) -> PathBuf {
        self.root.join(format!("{}.xcodeproj", self.project_name))
    }

    /// Directory containing the project; project-relative settings are
    /// relative to it.
    pub fn project_dir(&self) -> &Path {
        &self.root
    }

    /// Name of the support files directory (also the navigator group name).
    pub fn support_files_dir_name(&self) -> &str {
        &self.support_files_dir_name
    }

    /// Support files for a target label.
    pub fn support_files(&self, label: &str) -> SupportFiles {
        SupportFiles {
            dir: self.root.join(&self.support_files_dir_name).join(label),
            label: label.to_string(),
        }
    }

    /// `path` relative to the sandbox root.
    pub fn relative(&self, path: &Path) -> PathBuf {
        relative_path(&self.root, path)
    }
}

/// Names of the support files generated for one target.
#[derive(Debug, Clone)]
pub struct SupportFiles {
    dir: PathBuf,
    label: String,
}

impl SupportFiles {
    /// Directory holding every support file of the target.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Settings file, optionally for a variant such as a test type.
    pub fn xcconfig_path(&self, variant: Option<&str>) -> PathBuf {
        match variant {
            Some(variant) => self.dir.join(format!("{}.{}.xcconfig", self.label, variant)),
            None => self.dir.join(format!("{}.xcconfig", self.label)),
        }
    }

    pub fn prefix_header_path(&self) -> PathBuf {
        self.dir.join(format!("{}-prefix.pch", self.label))
    }

    pub fn umbrella_header_path(&self) -> PathBuf {
        self.dir.join(format!("{}-umbrella.h", self.label))
    }

    pub fn module_map_path(&self) -> PathBuf {
        self.dir.join(format!("{}.modulemap", self.label))
    }

    pub fn dummy_source_path(&self) -> PathBuf {
        self.dir.join(format!("{}-dummy.m", self.label))
    }

    pub fn info_plist_path(&self) -> PathBuf {
        self.dir.join("Info.plist")
    }

    /// Info.plist of a resource bundle, next to the framework Info.plist.
    pub fn bundle_info_plist_path(&self, bundle_name: &str) -> PathBuf {
        self.dir
            .join(format!("ResourceBundle-{}-Info.plist", bundle_name))
    }
}
