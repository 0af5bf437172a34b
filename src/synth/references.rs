//! Registration of a unit's files in the project.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::core::unit::BuildUnit;
use crate::project::{GroupId, Project};

/// Register every path of every group of `unit` below a navigator group
/// named after the unit.
///
/// Files in `*.lproj` directories become members of one variant group per
/// containing directory and file name. Files inside a data-model directory
/// are not registered; the directory itself is. Registering twice is a
/// no-op.
pub fn install_file_references(project: &mut Project, unit: &BuildUnit) -> GroupId {
    let root = unit.file_groups.first().map(|g| g.root.clone());
    let main = project.main_group();
    let group = project.group_named(main, &unit.name, root);

    let mut count = 0usize;
    for file_group in &unit.file_groups {
        for path in file_group.all_paths() {
            if inside_data_model(path) {
                continue;
            }
            match localized_logical_path(path) {
                Some(logical) => {
                    let variant = match project.variant_group_for(group, &logical) {
                        Some(existing) => existing,
                        None => {
                            let name = logical
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default();
                            project.new_variant_group(group, &name, &logical)
                        }
                    };
                    project.add_to_variant_group(variant, path);
                }
                None => {
                    project.new_file(group, path);
                }
            }
            count += 1;
        }
    }

    tracing::debug!("registered {} file references for `{}`", count, unit.name);
    group
}

/// `<dir>/<name>` for a localized `<dir>/<locale>.lproj/<name>`.
fn localized_logical_path(path: &Path) -> Option<PathBuf> {
    let parent = path.parent()?;
    if parent.extension() != Some(OsStr::new("lproj")) {
        return None;
    }
    let container = parent.parent()?;
    Some(container.join(path.file_name()?))
}

fn inside_data_model(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .any(|a| a.extension().is_some_and(|e| e == "xcdatamodeld"))
}
