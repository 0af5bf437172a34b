//! In-memory project object store.
//!
//! This is the narrow store the target synthesizer writes into: file
//! references (plain files, localized variant groups and products),
//! navigator groups, and native targets with their phases and
//! configurations. Objects are addressed by typed indices.
//!
//! The store can be dumped as JSON for inspection; it does not write the
//! build tool's own project format.

pub mod target;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::file_group::is_header_file;
use crate::core::platform::{Platform, PlatformVersion};

pub use target::{
    BuildConfiguration, BuildFile, BuildFileSettings, BuildPhase, CopyFilesPhase, DstSubfolder,
    Language, NativeTarget, ProductType, ShellScriptPhase,
};

/// Index of a file reference (files, variant groups, products).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RefId(pub(crate) usize);

/// Index of a navigator group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupId(pub(crate) usize);

/// Index of a native target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TargetId(pub(crate) usize);

/// What a file reference stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// A file or directory on disk
    File,
    /// Localized copies of one logical resource
    VariantGroup,
    /// The output of a target
    Product,
}

/// Container of a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Parent {
    Group(GroupId),
    VariantGroup(RefId),
}

/// A file-like object that build phases can reference.
#[derive(Debug, Clone, Serialize)]
pub struct FileReference {
    pub kind: RefKind,
    /// Display name
    pub name: String,
    /// Absolute path for files, logical path for variant groups, file name
    /// for products
    pub path: PathBuf,
    pub parent: Option<Parent>,
    /// Members of a variant group
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RefId>,
}

/// Member of a navigator group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GroupChild {
    Group(GroupId),
    Reference(RefId),
}

/// A navigator group.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub parent: Option<GroupId>,
    pub children: Vec<GroupChild>,
}

/// The project object store.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    path: PathBuf,
    references: Vec<FileReference>,
    groups: Vec<Group>,
    targets: Vec<NativeTarget>,
    #[serde(skip)]
    by_path: HashMap<PathBuf, RefId>,
    #[serde(skip)]
    main_group: GroupId,
    #[serde(skip)]
    products_group: GroupId,
}

impl Project {
    /// Create an empty project stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mut project = Project {
            path: path.into(),
            references: Vec::new(),
            groups: Vec::new(),
            targets: Vec::new(),
            by_path: HashMap::new(),
            main_group: GroupId(0),
            products_group: GroupId(0),
        };
        project.groups.push(Group {
            name: String::new(),
            path: None,
            parent: None,
            children: Vec::new(),
        });
        project.products_group = project.new_group(GroupId(0), "Products", None);
        project
    }

    /// Path of the project bundle.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the project bundle.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn main_group(&self) -> GroupId {
        self.main_group
    }

    pub fn products_group(&self) -> GroupId {
        self.products_group
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Create a group below `parent`.
    pub fn new_group(&mut self, parent: GroupId, name: &str, path: Option<PathBuf>) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name: name.to_string(),
            path,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.groups[parent.0].children.push(GroupChild::Group(id));
        id
    }

    /// Child group of `parent` with the given name, created when missing.
    pub fn group_named(&mut self, parent: GroupId, name: &str, path: Option<PathBuf>) -> GroupId {
        let existing = self.groups[parent.0].children.iter().find_map(|c| match c {
            GroupChild::Group(g) if self.groups[g.0].name == name => Some(*g),
            _ => None,
        });
        existing.unwrap_or_else(|| self.new_group(parent, name, path))
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// Navigator group holding generated files of a unit:
    /// `<support dir>/<unit>`.
    pub fn support_files_group(&mut self, support_dir: &str, unit: &str, dir: &Path) -> GroupId {
        let root = self.group_named(self.main_group, support_dir, None);
        self.group_named(root, unit, Some(dir.to_path_buf()))
    }

    // ------------------------------------------------------------------
    // File references
    // ------------------------------------------------------------------

    /// Register a file in `group`. Registering a path twice returns the
    /// existing reference.
    pub fn new_file(&mut self, group: GroupId, path: &Path) -> RefId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        let id = self.push_reference(FileReference {
            kind: RefKind::File,
            name: file_name(path),
            path: path.to_path_buf(),
            parent: Some(Parent::Group(group)),
            children: Vec::new(),
        });
        self.groups[group.0].children.push(GroupChild::Reference(id));
        self.by_path.insert(path.to_path_buf(), id);
        id
    }

    /// Create a variant group named `name` in `group`.
    ///
    /// `logical_path` is the localized file's path with the locale
    /// directory removed.
    pub fn new_variant_group(&mut self, group: GroupId, name: &str, logical_path: &Path) -> RefId {
        let id = self.push_reference(FileReference {
            kind: RefKind::VariantGroup,
            name: name.to_string(),
            path: logical_path.to_path_buf(),
            parent: Some(Parent::Group(group)),
            children: Vec::new(),
        });
        self.groups[group.0].children.push(GroupChild::Reference(id));
        id
    }

    /// Register a localized file as a member of a variant group.
    pub fn add_to_variant_group(&mut self, variant_group: RefId, path: &Path) -> RefId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        let id = self.push_reference(FileReference {
            kind: RefKind::File,
            name: file_name(path),
            path: path.to_path_buf(),
            parent: Some(Parent::VariantGroup(variant_group)),
            children: Vec::new(),
        });
        self.references[variant_group.0].children.push(id);
        self.by_path.insert(path.to_path_buf(), id);
        id
    }

    /// Variant group in `group` with the given logical path.
    pub fn variant_group_for(&self, group: GroupId, logical_path: &Path) -> Option<RefId> {
        self.groups[group.0].children.iter().find_map(|c| match c {
            GroupChild::Reference(r)
                if self.references[r.0].kind == RefKind::VariantGroup
                    && self.references[r.0].path == logical_path =>
            {
                Some(*r)
            }
            _ => None,
        })
    }

    /// Reference registered for a filesystem path.
    pub fn reference_for_path(&self, path: &Path) -> Option<RefId> {
        self.by_path.get(path).copied()
    }

    pub fn reference(&self, id: RefId) -> &FileReference {
        &self.references[id.0]
    }

    /// Variant group containing a reference, if any.
    pub fn parent_variant_group(&self, id: RefId) -> Option<RefId> {
        match self.references[id.0].parent {
            Some(Parent::VariantGroup(parent)) => Some(parent),
            _ => None,
        }
    }

    fn push_reference(&mut self, reference: FileReference) -> RefId {
        let id = RefId(self.references.len());
        self.references.push(reference);
        id
    }

    // ------------------------------------------------------------------
    // Targets
    // ------------------------------------------------------------------

    /// Create a native target and its product reference.
    pub fn new_target(
        &mut self,
        product_type: ProductType,
        name: &str,
        platform: Platform,
        deployment_target: Option<PlatformVersion>,
        language: Language,
        product_name: &str,
    ) -> TargetId {
        let products = self.products_group;
        let product_reference = self.push_reference(FileReference {
            kind: RefKind::Product,
            name: product_name.to_string(),
            path: PathBuf::from(product_name),
            parent: Some(Parent::Group(products)),
            children: Vec::new(),
        });
        self.groups[products.0]
            .children
            .push(GroupChild::Reference(product_reference));

        let id = TargetId(self.targets.len());
        self.targets.push(NativeTarget::new(
            name.to_string(),
            product_type,
            platform,
            deployment_target,
            language,
            product_name.to_string(),
            product_reference,
        ));
        id
    }

    /// Create a resource bundle target producing `<bundle>.bundle`.
    pub fn new_resources_bundle(
        &mut self,
        name: &str,
        platform: Platform,
        bundle_name: &str,
    ) -> TargetId {
        let product_name = format!("{}.bundle", bundle_name);
        self.new_target(
            ProductType::Bundle,
            name,
            platform,
            None,
            Language::Objc,
            &product_name,
        )
    }

    pub fn target(&self, id: TargetId) -> &NativeTarget {
        &self.targets[id.0]
    }

    pub fn target_mut(&mut self, id: TargetId) -> &mut NativeTarget {
        &mut self.targets[id.0]
    }

    pub fn targets(&self) -> &[NativeTarget] {
        &self.targets
    }

    /// Add references to a target: headers go to the Headers phase,
    /// everything else to the Sources phase with `flags` attached.
    ///
    /// An empty flag string attaches nothing.
    pub fn add_file_references(&mut self, target: TargetId, refs: &[RefId], flags: Option<&str>) {
        let flags = flags.filter(|f| !f.is_empty());
        for &file in refs {
            let is_header = is_header_file(&self.references[file.0].path);
            let native = &mut self.targets[target.0];
            if is_header {
                native.headers_phase.add_file_reference(file);
            } else {
                let build_file = native.sources_phase.add_file_reference(file);
                build_file.settings.compiler_flags = flags.map(str::to_string);
            }
        }
    }

    /// Path of a reference relative to the project directory.
    pub fn relative_path(&self, id: RefId) -> PathBuf {
        crate::util::fs::relative_path(self.dir(), &self.references[id.0].path)
    }

    /// Pretty JSON dump of the store.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize project")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
