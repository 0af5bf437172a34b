//! Module map and umbrella header of framework targets.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::sandbox::Sandbox;
use crate::core::unit::BuildUnit;
use crate::generator::{Generator, ModuleMap, UmbrellaHeader};
use crate::project::{GroupId, Project, TargetId};
use crate::util::fs::{copy_file, relative_path};

/// How the module map of a framework is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ModuleMapStrategy {
    /// Generate a module map exporting a generated umbrella header.
    Synthesized,
    /// Copy the unit's own module map; no umbrella header is generated.
    CustomCopy(PathBuf),
}

impl ModuleMapStrategy {
    /// Decide from the unit's root group.
    pub fn for_unit(unit: &BuildUnit) -> Self {
        match unit.file_groups.first().and_then(|g| g.module_map.clone()) {
            Some(path) => ModuleMapStrategy::CustomCopy(path),
            None => ModuleMapStrategy::Synthesized,
        }
    }
}

/// Files written for the module of a framework.
#[derive(Debug, Clone, Default)]
pub struct ModuleArtifacts {
    pub module_map: PathBuf,
    pub umbrella_header: Option<PathBuf>,
}

/// Import paths of the umbrella header: every public header of the library,
/// relative to the header mapping directory when one is set, otherwise by
/// file name.
pub fn umbrella_imports(unit: &BuildUnit, header_mappings_dir: Option<&Path>) -> Vec<String> {
    let mut imports: Vec<String> = unit
        .library_groups()
        .flat_map(|g| g.public_headers.iter())
        .filter_map(|header| match header_mappings_dir {
            Some(dir) => Some(relative_path(dir, header).display().to_string()),
            None => header
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        })
        .collect();
    imports.sort();
    imports.dedup();
    imports
}

/// Write the module map (and umbrella header when synthesized), register
/// them in the support group and point `MODULEMAP_FILE` at the map.
pub fn create_module_files(
    project: &mut Project,
    target: TargetId,
    unit: &BuildUnit,
    sandbox: &Sandbox,
    support_group: GroupId,
    strategy: &ModuleMapStrategy,
    header_mappings_dir: Option<&Path>,
) -> Result<ModuleArtifacts> {
    let support_files = sandbox.support_files(unit.label());
    let module_map_path = support_files.module_map_path();
    let mut artifacts = ModuleArtifacts {
        module_map: module_map_path.clone(),
        umbrella_header: None,
    };

    match strategy {
        ModuleMapStrategy::CustomCopy(custom) => {
            tracing::debug!("copying module map {}", custom.display());
            copy_file(custom, &module_map_path)?;
        }
        ModuleMapStrategy::Synthesized => {
            let umbrella_path = support_files.umbrella_header_path();
            UmbrellaHeader::new(unit.platform, unit.product_module_name())
                .with_imports(umbrella_imports(unit, header_mappings_dir))
                .save_as(&umbrella_path)?;

            let umbrella_ref = project.new_file(support_group, &umbrella_path);
            project.add_file_references(target, &[umbrella_ref], None);
            let native = project.target_mut(target);
            if let Some(build_file) = native.headers_phase.build_file_mut(umbrella_ref) {
                build_file.settings.attributes = vec!["Public".to_string()];
            }

            let umbrella_name = umbrella_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ModuleMap::new(unit.product_module_name(), umbrella_name).save_as(&module_map_path)?;
            artifacts.umbrella_header = Some(umbrella_path);
        }
    }

    project.new_file(support_group, &module_map_path);
    project.target_mut(target).set_build_setting(
        "MODULEMAP_FILE",
        sandbox.relative(&module_map_path).display().to_string(),
    );
    Ok(artifacts)
}
