//! Resource bundle targets.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::sandbox::Sandbox;
use crate::core::unit::BuildUnit;
use crate::generator::{BundlePackageType, Generator, InfoPlist};
use crate::project::{GroupId, Project, TargetId};

use super::resources::filter_resource_references;
use super::ConsumerTargets;

/// Build directory of bundle products, before the unit label.
const BUNDLE_BUILD_DIR: &str = "$(BUILD_DIR)/$(CONFIGURATION)$(EFFECTIVE_PLATFORM_NAME)";

/// Bundle targets created for a unit.
#[derive(Debug, Clone, Default)]
pub struct BundleTargets {
    /// Bundle name and target, sorted by bundle name.
    pub targets: Vec<(String, TargetId)>,
    /// Generated Info.plist files.
    pub info_plists: Vec<PathBuf>,
}

/// A bundle as declared across every group of the unit.
struct DeclaredBundle<'a> {
    name: &'a str,
    paths: Vec<PathBuf>,
    consumers: Vec<usize>,
}

fn declared_bundles(unit: &BuildUnit) -> Vec<DeclaredBundle<'_>> {
    unit.resource_bundle_names()
        .into_iter()
        .map(|name| {
            let mut bundle = DeclaredBundle {
                name,
                paths: Vec::new(),
                consumers: Vec::new(),
            };
            for (index, group) in unit.file_groups.iter().enumerate() {
                if let Some(paths) = group.resource_bundles.get(name) {
                    bundle.paths.extend(paths.iter().cloned());
                    bundle.consumers.push(index);
                }
            }
            bundle
        })
        .collect()
}

/// Create one bundle target per distinct bundle name of `unit`.
///
/// Bundles have no compile phase, so data models are copied along with
/// every other resource. When the unit builds a binary, each consuming
/// target depends on the bundle, and framework targets also copy the
/// bundle product.
pub fn add_resources_bundle_targets(
    project: &mut Project,
    unit: &BuildUnit,
    sandbox: &Sandbox,
    support_group: GroupId,
    consumers: &ConsumerTargets,
) -> Result<BundleTargets> {
    let support_files = sandbox.support_files(unit.label());
    let mut output = BundleTargets::default();

    for bundle in declared_bundles(unit) {
        let label = unit.resource_bundle_target_label(bundle.name);
        let id = project.new_resources_bundle(&label, unit.platform, bundle.name);

        let buckets = filter_resource_references(project, &bundle.paths);
        let native = project.target_mut(id);
        native.add_resources(&buckets.all());
        for (config_name, kind) in &unit.configurations {
            native.add_build_configuration(config_name, *kind);
        }
        native.set_deployment_target(unit.deployment_target.clone());

        if unit.should_build {
            let product = project.target(id).product_reference;
            for &index in &bundle.consumers {
                let group = &unit.file_groups[index];
                let Some(consumer) = consumers.for_group(project, group, unit.label())? else {
                    continue;
                };
                let consumer = project.target_mut(consumer);
                consumer.add_dependency(id);
                if unit.requires_frameworks {
                    consumer.add_resources(&[product]);
                }
            }
        }

        let info_plist_path = support_files.bundle_info_plist_path(bundle.name);
        InfoPlist::new(BundlePackageType::Bundle, unit.version.clone()).save_as(&info_plist_path)?;
        project.new_file(support_group, &info_plist_path);

        let native = project.target_mut(id);
        native.set_build_setting("PRODUCT_NAME", bundle.name);
        native.set_build_setting(
            "INFOPLIST_FILE",
            sandbox.relative(&info_plist_path).display().to_string(),
        );
        native.set_build_setting(
            "CONFIGURATION_BUILD_DIR",
            unit.configuration_build_dir(BUNDLE_BUILD_DIR),
        );
        // Watch bundles use the WatchKit-compatible family, not the native one.
        if let Some(family) = unit.platform.bundle_device_family() {
            native.set_build_setting("TARGETED_DEVICE_FAMILY", family);
        }

        tracing::debug!(
            "created resource bundle target `{}` with {} resources",
            label,
            buckets.all().len()
        );
        output.targets.push((bundle.name.to_string(), id));
        output.info_plists.push(info_plist_path);
    }

    Ok(output)
}
