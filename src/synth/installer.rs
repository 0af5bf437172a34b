//! Synthesis of one build unit.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::sandbox::{Sandbox, SupportFiles};
use crate::core::unit::BuildUnit;
use crate::generator::{
    BundlePackageType, DummySource, Generator, InfoPlist, PrefixHeader,
};
use crate::project::target::{Language, ProductType};
use crate::project::{GroupId, Project, RefId, TargetId};
use crate::util::fs::{ensure_dir, read_to_string, relative_path};

use super::bundles::add_resources_bundle_targets;
use super::errors::SynthError;
use super::flags::compiler_flags;
use super::headers::{apply_route, route_header};
use super::module_map::{create_module_files, ModuleMapStrategy};
use super::resources::filter_resource_references;
use super::settings::{custom_build_settings, library_xcconfig, test_xcconfig};
use super::tests::add_test_targets;
use super::{ConsumerTargets, SynthesizedTarget};

/// Bundle identifier prefix used when none is configured.
pub const DEFAULT_BUNDLE_IDENTIFIER_PREFIX: &str = "org.harbour";

/// Script linking the versioned header folders of a desktop framework into
/// the bundle root.
pub const SYMLINK_HEADERS_PHASE: &str = "Create Symlinks to Header Folders";

const SYMLINK_HEADERS_SCRIPT: &str = r#"base="$CONFIGURATION_BUILD_DIR/$WRAPPER_NAME"
ln -fs "$base/${PUBLIC_HEADERS_FOLDER_PATH#$WRAPPER_NAME/}" "$base/${PUBLIC_HEADERS_FOLDER_PATH#$CONTENTS_FOLDER_PATH/}"
ln -fs "$base/${PRIVATE_HEADERS_FOLDER_PATH#$WRAPPER_NAME/}" "$base/${PRIVATE_HEADERS_FOLDER_PATH#$CONTENTS_FOLDER_PATH/}"
"#;

/// Options that apply to every unit of a run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Prefix of `PRODUCT_BUNDLE_IDENTIFIER`
    pub bundle_identifier_prefix: String,
    /// Suppress warnings of every unit, whatever the unit declares
    pub inhibit_all_warnings: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        InstallOptions {
            bundle_identifier_prefix: DEFAULT_BUNDLE_IDENTIFIER_PREFIX.to_string(),
            inhibit_all_warnings: false,
        }
    }
}

/// Values derived once per unit and shared by every step.
#[derive(Debug, Clone)]
struct InstallContext {
    header_mappings_dir: Option<PathBuf>,
    module_map: ModuleMapStrategy,
    inhibit_warnings: bool,
}

/// Installs one unit into a project.
///
/// File references must already be registered (see
/// [`install_file_references`](super::install_file_references)).
pub struct TargetInstaller<'a> {
    project: &'a mut Project,
    sandbox: &'a Sandbox,
    unit: &'a BuildUnit,
    options: &'a InstallOptions,
    context: InstallContext,
    support_files: SupportFiles,
    output: SynthesizedTarget,
}

/// Synthesize every target of `unit` into `project`.
pub fn install(
    project: &mut Project,
    sandbox: &Sandbox,
    unit: &BuildUnit,
    options: &InstallOptions,
) -> Result<SynthesizedTarget> {
    TargetInstaller::new(project, sandbox, unit, options).install()
}

impl<'a> TargetInstaller<'a> {
    pub fn new(
        project: &'a mut Project,
        sandbox: &'a Sandbox,
        unit: &'a BuildUnit,
        options: &'a InstallOptions,
    ) -> Self {
        let context = InstallContext {
            header_mappings_dir: unit.file_groups.first().and_then(|g| g.header_mappings_root()),
            module_map: ModuleMapStrategy::for_unit(unit),
            inhibit_warnings: unit.inhibit_warnings || options.inhibit_all_warnings,
        };
        TargetInstaller {
            project,
            sandbox,
            unit,
            options,
            context,
            support_files: sandbox.support_files(unit.label()),
            output: SynthesizedTarget::new(unit),
        }
    }

    /// Run every step. Any error invalidates the whole unit.
    pub fn install(mut self) -> Result<SynthesizedTarget> {
        if self.unit.file_groups.is_empty() {
            return Err(SynthError::MissingFileGroup {
                unit: self.unit.name.clone(),
            }
            .into());
        }

        if !self.unit.should_build {
            tracing::info!("Installing resource bundles of `{}`", self.unit.label());
            self.add_resources_bundle_targets(&ConsumerTargets::default())?;
            return Ok(self.output);
        }

        tracing::info!(
            "Installing target `{}` {}",
            self.unit.label(),
            self.unit.platform
        );

        let primary = self.add_target();
        let tests = if self.unit.contains_test_specifications() {
            add_test_targets(self.project, self.unit)?
        } else {
            Vec::new()
        };
        self.output.primary = Some(primary);
        self.output.test_targets = tests.clone();
        let consumers = ConsumerTargets {
            primary: Some(primary),
            tests,
        };

        ensure_dir(self.support_files.dir())?;
        self.add_resources_bundle_targets(&consumers)?;
        self.add_files_to_build_phases(&consumers)?;
        self.create_xcconfig_file(primary)?;
        if self.unit.contains_test_specifications() {
            self.create_test_xcconfig_files()?;
        }
        if self.unit.requires_frameworks {
            self.create_info_plist_file(primary)?;
            let support_group = self.support_group();
            let artifacts = create_module_files(
                self.project,
                primary,
                self.unit,
                self.sandbox,
                support_group,
                &self.context.module_map,
                self.context.header_mappings_dir.as_deref(),
            )?;
            self.output.artifacts.extend(artifacts.umbrella_header);
            self.output.artifacts.push(artifacts.module_map);
            self.create_build_phase_to_symlink_header_folders(primary);
        }
        self.create_prefix_header(primary)?;
        self.create_dummy_source(primary)?;

        Ok(self.output)
    }

    fn support_group(&mut self) -> GroupId {
        self.project.support_files_group(
            self.sandbox.support_files_dir_name(),
            self.unit.label(),
            self.support_files.dir(),
        )
    }

    fn add_file_to_support_group(&mut self, path: &Path) -> RefId {
        let group = self.support_group();
        self.output.artifacts.push(path.to_path_buf());
        self.project.new_file(group, path)
    }

    fn add_target(&mut self) -> TargetId {
        let unit = self.unit;
        let product_type = if unit.requires_frameworks {
            ProductType::Framework
        } else {
            ProductType::StaticLibrary
        };
        let language = if unit.uses_swift() {
            Language::Swift
        } else {
            Language::Objc
        };

        let id = self.project.new_target(
            product_type,
            unit.label(),
            unit.platform,
            Some(unit.deployment_target.clone()),
            language,
            &unit.product_name(),
        );
        let settings = custom_build_settings(unit);
        let native = self.project.target_mut(id);
        for (name, kind) in &unit.configurations {
            native.add_build_configuration(name, *kind);
        }
        native.merge_build_settings(&settings);

        tracing::debug!("created {} target `{}`", product_type, unit.label());
        id
    }

    fn add_resources_bundle_targets(&mut self, consumers: &ConsumerTargets) -> Result<()> {
        let group = self.support_group();
        let bundles =
            add_resources_bundle_targets(self.project, self.unit, self.sandbox, group, consumers)?;
        self.output.bundle_targets = bundles.targets;
        self.output.artifacts.extend(bundles.info_plists);
        Ok(())
    }

    fn add_files_to_build_phases(&mut self, consumers: &ConsumerTargets) -> Result<()> {
        let unit = self.unit;
        for group in &unit.file_groups {
            let Some(native) = consumers.for_group(self.project, group, unit.label())? else {
                tracing::debug!("no target for files of `{}`, skipping", group.name);
                continue;
            };

            for (arc, files) in [(true, &group.arc_sources), (false, &group.non_arc_sources)] {
                let files: Vec<PathBuf> = files
                    .iter()
                    .filter(|f| !group.headers.contains(*f) && !group.other_sources.contains(*f))
                    .cloned()
                    .collect();
                let flags =
                    compiler_flags(group, unit.platform, arc, self.context.inhibit_warnings);
                let refs = self.project_file_references(&files, "source", native)?;
                self.project.add_file_references(native, &refs, Some(&flags));
            }

            let header_refs = self.project_file_references(&group.headers, "header", native)?;
            self.project.add_file_references(native, &header_refs, None);
            for (header, file) in group.headers.iter().zip(&header_refs) {
                let route = route_header(
                    header,
                    group.header_acl(header),
                    unit.requires_frameworks,
                    self.context.header_mappings_dir.as_deref(),
                );
                apply_route(self.project.target_mut(native), *file, &route);
            }

            let other_refs: Vec<RefId> = group
                .other_sources
                .iter()
                .filter_map(|path| self.project.reference_for_path(path))
                .collect();
            self.project.add_file_references(native, &other_refs, None);

            if !unit.requires_frameworks {
                continue;
            }
            let buckets = filter_resource_references(self.project, &group.resources);
            self.project.add_file_references(native, &buckets.compile, None);
            self.project.target_mut(native).add_resources(&buckets.resources);
        }
        Ok(())
    }

    /// References of declared files. A missing reference is fatal.
    fn project_file_references(
        &self,
        files: &[PathBuf],
        kind: &'static str,
        target: TargetId,
    ) -> Result<Vec<RefId>, SynthError> {
        files
            .iter()
            .map(|path| {
                self.project
                    .reference_for_path(path)
                    .ok_or_else(|| SynthError::UnresolvedReference {
                        kind,
                        path: path.clone(),
                        target: self.project.target(target).name.clone(),
                    })
            })
            .collect()
    }

    fn create_xcconfig_file(&mut self, primary: TargetId) -> Result<()> {
        let path = self.support_files.xcconfig_path(None);
        library_xcconfig(
            self.unit,
            self.sandbox,
            &self.options.bundle_identifier_prefix,
        )
        .save_as(&path)?;
        let reference = self.add_file_to_support_group(&path);

        self.project
            .target_mut(primary)
            .set_base_configuration_reference(reference);
        // Bundles build with the library's settings.
        for (_, bundle) in &self.output.bundle_targets {
            self.project
                .target_mut(*bundle)
                .set_base_configuration_reference(reference);
        }
        Ok(())
    }

    fn create_test_xcconfig_files(&mut self) -> Result<()> {
        let test_targets = self.output.test_targets.clone();
        for (test_type, target) in test_targets {
            let path = self.support_files.xcconfig_path(Some(test_type.as_str()));
            test_xcconfig(
                self.unit,
                self.sandbox,
                &self.options.bundle_identifier_prefix,
                test_type,
            )
            .save_as(&path)?;
            let reference = self.add_file_to_support_group(&path);
            self.project
                .target_mut(target)
                .set_base_configuration_reference(reference);
        }
        Ok(())
    }

    fn create_info_plist_file(&mut self, primary: TargetId) -> Result<()> {
        let path = self.support_files.info_plist_path();
        InfoPlist::new(BundlePackageType::Framework, self.unit.version.clone()).save_as(&path)?;
        self.add_file_to_support_group(&path);
        let relative = self.sandbox.relative(&path).display().to_string();
        self.project
            .target_mut(primary)
            .set_build_setting("INFOPLIST_FILE", relative);
        Ok(())
    }

    fn create_build_phase_to_symlink_header_folders(&mut self, primary: TargetId) {
        if !self.unit.platform.is_desktop() || self.context.header_mappings_dir.is_none() {
            return;
        }
        tracing::debug!("adding header symlink phase to `{}`", self.unit.label());
        self.project
            .target_mut(primary)
            .new_shell_script_phase(SYMLINK_HEADERS_PHASE, SYMLINK_HEADERS_SCRIPT);
    }

    fn create_prefix_header(&mut self, primary: TargetId) -> Result<()> {
        let mut header = PrefixHeader::new(self.unit.platform);
        for group in &self.unit.file_groups {
            if let Some(contents) = &group.prefix_header_contents {
                header = header.with_contents(contents.clone());
            }
        }
        for group in &self.unit.file_groups {
            if let Some(file) = &group.prefix_header_file {
                header = header.with_contents(read_to_string(file)?);
            }
        }

        let path = self.support_files.prefix_header_path();
        header.save_as(&path)?;
        self.add_file_to_support_group(&path);
        let relative = relative_path(self.project.dir(), &path).display().to_string();
        self.project
            .target_mut(primary)
            .set_build_setting("GCC_PREFIX_HEADER", relative);
        Ok(())
    }

    fn create_dummy_source(&mut self, primary: TargetId) -> Result<()> {
        let path = self.support_files.dummy_source_path();
        DummySource::new(self.unit.label()).save_as(&path)?;
        let reference = self.add_file_to_support_group(&path);
        self.project
            .target_mut(primary)
            .sources_phase
            .add_file_reference_once(reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_group::FileGroup;
    use crate::core::platform::Platform;
    use crate::synth::flags::{NO_ARC_FLAG, OS_OBJECT_FLAG};
    use crate::test_support::assertions::assert_file_contains;
    use crate::test_support::{synthesize, synthesize_unit, SynthesisRun, UnitFixture};
    use std::fs;
    use tempfile::TempDir;

    fn run(fixture: UnitFixture) -> (TempDir, SynthesisRun) {
        let tmp = TempDir::new().unwrap();
        let package = fixture.write_to(tmp.path()).unwrap();
        let run = synthesize(&package, &tmp.path().join("sandbox")).unwrap();
        (tmp, run)
    }

    fn ios_framework_on(platform: &str) -> UnitFixture {
        let fixture = UnitFixture::framework("Banana");
        let manifest = fixture
            .manifest
            .replace("platform = \"ios\"", &format!("platform = \"{}\"", platform))
            .replace("deployment-target = \"9.0\"", "deployment-target = \"10.9\"");
        fixture.with_manifest(manifest)
    }

    #[test]
    fn test_static_library_target() {
        let (tmp, run) = run(UnitFixture::static_library("Banana"));
        let project = &run.project;
        let primary = run.synthesized.primary.unwrap();
        let target = project.target(primary);
        let package = tmp.path().join("Banana");

        assert_eq!(target.product_type, ProductType::StaticLibrary);
        assert_eq!(target.product_name, "libBanana.a");

        let source = project
            .reference_for_path(&package.join("Classes/Banana.m"))
            .unwrap();
        let build_file = target.sources_phase.build_file(source).unwrap();
        assert_eq!(
            build_file.settings.compiler_flags.as_deref(),
            Some(OS_OBJECT_FLAG)
        );

        let public = project
            .reference_for_path(&package.join("Classes/Banana.h"))
            .unwrap();
        let private = project
            .reference_for_path(&package.join("Classes/Private/Internal.h"))
            .unwrap();
        assert_eq!(
            target.headers_phase.build_file(public).unwrap().settings.attributes,
            vec!["Public"]
        );
        assert_eq!(
            target.headers_phase.build_file(private).unwrap().settings.attributes,
            vec!["Private"]
        );
        assert!(target.copy_files_phases.is_empty());

        // Resources of a static library ship in bundles only.
        assert!(target.resources_phase.is_empty());

        let config = target.build_configuration("Debug").unwrap();
        assert_eq!(config.build_settings["PRODUCT_NAME"], "Banana");
        assert!(config.base_configuration_reference.is_some());
        assert_eq!(
            config.build_settings["GCC_PREFIX_HEADER"],
            "Target Support Files/Banana/Banana-prefix.pch"
        );

        let files = run.sandbox.support_files("Banana");
        assert_file_contains(files.xcconfig_path(None), "SKIP_INSTALL = YES");
        assert_file_contains(files.dummy_source_path(), "HarbourDummy_Banana");
        assert!(!files.info_plist_path().exists());
        assert!(!files.module_map_path().exists());

        let dummy = project.reference_for_path(&files.dummy_source_path()).unwrap();
        assert!(target.sources_phase.contains(dummy));
    }

    #[test]
    fn test_framework_target() {
        let (tmp, run) = run(UnitFixture::framework("Banana"));
        let project = &run.project;
        let primary = run.synthesized.primary.unwrap();
        let target = project.target(primary);
        let package = tmp.path().join("Banana");

        assert_eq!(target.product_type, ProductType::Framework);
        assert_eq!(target.product_name, "Banana.framework");

        let legacy = project
            .reference_for_path(&package.join("Classes/MRC/Legacy.m"))
            .unwrap();
        assert_eq!(
            target.sources_phase.build_file(legacy).unwrap().settings.compiler_flags.as_deref(),
            Some(NO_ARC_FLAG)
        );

        let names: Vec<&str> = target.copy_files_phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Copy . Public Headers"));
        assert!(names.contains(&"Copy Peel Public Headers"));
        assert!(names.contains(&"Copy Private Private Headers"));
        let peel = target.copy_files_phase("Copy Peel Public Headers").unwrap();
        assert_eq!(peel.dst_path, "$(PUBLIC_HEADERS_FOLDER_PATH)/Peel");

        let logo = project
            .reference_for_path(&package.join("Resources/Logo.png"))
            .unwrap();
        assert!(target.resources_phase.contains(logo));

        let files = run.sandbox.support_files("Banana");
        assert_file_contains(files.info_plist_path(), "<string>FMWK</string>");
        assert_file_contains(files.info_plist_path(), "<string>1.2.3</string>");
        assert_file_contains(files.umbrella_header_path(), "#import \"Banana.h\"");
        assert_file_contains(files.umbrella_header_path(), "#import \"Peel/Peel.h\"");
        assert_file_contains(files.module_map_path(), "framework module Banana");
        assert_file_contains(files.prefix_header_path(), "#import <UIKit/UIKit.h>");

        let config = target.build_configuration("Release").unwrap();
        assert_eq!(
            config.build_settings["INFOPLIST_FILE"],
            "Target Support Files/Banana/Info.plist"
        );
        assert_eq!(
            config.build_settings["MODULEMAP_FILE"],
            "Target Support Files/Banana/Banana.modulemap"
        );

        // Not a desktop platform.
        assert!(target.shell_script_phases.is_empty());
    }

    #[test]
    fn test_framework_data_model_and_localized_resources() {
        let fixture = UnitFixture::framework("Banana");
        let manifest = fixture
            .manifest
            .replace("resources = [\"Resources/*\"]", "resources = [\"Resources/**/*\"]");
        let fixture = fixture
            .with_manifest(manifest)
            .with_file("Resources/Model.xcdatamodeld/Model.xcdatamodel/contents", "")
            .with_file("Resources/en.lproj/Localizable.strings", "\"hi\" = \"hi\";")
            .with_file("Resources/fr.lproj/Localizable.strings", "\"hi\" = \"salut\";");
        let (tmp, run) = run(fixture);
        let project = &run.project;
        let target = project.target(run.synthesized.primary.unwrap());
        let resources = tmp.path().join("Banana/Resources");

        let model = project
            .reference_for_path(&resources.join("Model.xcdatamodeld"))
            .unwrap();
        assert!(target.sources_phase.contains(model));
        assert!(!target.resources_phase.contains(model));
        assert!(project
            .reference_for_path(&resources.join("Model.xcdatamodeld/Model.xcdatamodel/contents"))
            .is_none());

        let en = project
            .reference_for_path(&resources.join("en.lproj/Localizable.strings"))
            .unwrap();
        let fr = project
            .reference_for_path(&resources.join("fr.lproj/Localizable.strings"))
            .unwrap();
        let variant = project.parent_variant_group(en).unwrap();
        assert_eq!(project.parent_variant_group(fr), Some(variant));
        assert!(!target.resources_phase.contains(en));
        assert!(!target.resources_phase.contains(fr));
        let variant_files = target
            .resources_phase
            .files()
            .iter()
            .filter(|bf| bf.file == variant)
            .count();
        assert_eq!(variant_files, 1);

        let logo = project
            .reference_for_path(&resources.join("Logo.png"))
            .unwrap();
        assert!(target.resources_phase.contains(logo));
    }

    #[test]
    fn test_framework_bundles_and_dependencies() {
        let (_tmp, run) = run(UnitFixture::framework("Banana"));
        let project = &run.project;
        let primary = run.synthesized.primary.unwrap();

        assert_eq!(run.synthesized.bundle_targets.len(), 1);
        let (name, bundle) = &run.synthesized.bundle_targets[0];
        assert_eq!(name, "BananaAssets");
        assert_eq!(project.target(*bundle).name, "Banana-BananaAssets");
        assert!(project.target(primary).dependencies.contains(bundle));

        let product = project.target(*bundle).product_reference;
        assert!(project.target(primary).resources_phase.contains(product));

        let xcconfig = project
            .reference_for_path(&run.sandbox.support_files("Banana").xcconfig_path(None))
            .unwrap();
        let config = project.target(*bundle).build_configuration("Debug").unwrap();
        assert_eq!(config.base_configuration_reference, Some(xcconfig));
    }

    #[test]
    fn test_symlink_phase_on_desktop_with_mappings_dir() {
        let (_tmp, run) = run(ios_framework_on("osx"));
        let target = run.project.target(run.synthesized.primary.unwrap());

        assert_eq!(target.shell_script_phases.len(), 1);
        let phase = &target.shell_script_phases[0];
        assert_eq!(phase.name, SYMLINK_HEADERS_PHASE);
        assert!(phase.shell_script.contains("PUBLIC_HEADERS_FOLDER_PATH"));
        assert!(phase.shell_script.contains("PRIVATE_HEADERS_FOLDER_PATH"));

        let files = run.sandbox.support_files("Banana");
        assert_file_contains(files.prefix_header_path(), "#import <Cocoa/Cocoa.h>");
    }

    #[test]
    fn test_test_target_wiring() {
        let (tmp, run) = run(UnitFixture::framework("Banana"));
        let project = &run.project;
        let package = tmp.path().join("Banana");

        assert_eq!(run.synthesized.test_targets.len(), 1);
        let (test_type, id) = run.synthesized.test_targets[0];
        assert_eq!(test_type, crate::core::unit::TestType::Unit);

        let target = project.target(id);
        assert_eq!(target.name, "Banana-Unit-Tests");
        assert_eq!(target.product_type, ProductType::UnitTestBundle);

        let test_source = project
            .reference_for_path(&package.join("Tests/BananaTests.m"))
            .unwrap();
        assert!(target.sources_phase.contains(test_source));
        let primary = project.target(run.synthesized.primary.unwrap());
        assert!(!primary.sources_phase.contains(test_source));

        let unit_xcconfig = run
            .sandbox
            .support_files("Banana")
            .xcconfig_path(Some("unit"));
        assert_file_contains(&unit_xcconfig, "-framework \"Banana\"");
        let reference = project.reference_for_path(&unit_xcconfig).unwrap();
        let config = target.build_configuration("Debug").unwrap();
        assert_eq!(config.base_configuration_reference, Some(reference));
        assert_eq!(config.build_settings["PRODUCT_NAME"], "Banana");
    }

    #[test]
    fn test_resources_only_unit() {
        let (_tmp, run) = run(UnitFixture::resources_only("Banana"));

        assert!(run.synthesized.primary.is_none());
        assert!(run.synthesized.test_targets.is_empty());
        assert_eq!(run.synthesized.bundle_targets.len(), 1);

        let files = run.sandbox.support_files("Banana");
        assert_file_contains(
            files.bundle_info_plist_path("BananaResources"),
            "<string>BNDL</string>",
        );
        assert!(!files.xcconfig_path(None).exists());
        assert!(!files.dummy_source_path().exists());
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let sandbox = Sandbox::new(tmp.path());
        let unit = BuildUnit::new("Banana", Platform::Ios).with_group(
            FileGroup::new("Banana", tmp.path()).with_arc_sources([tmp.path().join("Banana.m")]),
        );
        // File references were never registered.
        let mut project = Project::new(sandbox.project_path());

        let err = install(&mut project, &sandbox, &unit, &InstallOptions::default()).unwrap_err();
        match err.downcast_ref::<SynthError>() {
            Some(SynthError::UnresolvedReference { kind, target, .. }) => {
                assert_eq!(*kind, "source");
                assert_eq!(target, "Banana");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unit_without_groups() {
        let tmp = TempDir::new().unwrap();
        let err = synthesize_unit(BuildUnit::new("Empty", Platform::Ios), tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynthError>(),
            Some(SynthError::MissingFileGroup { .. })
        ));
    }

    #[test]
    fn test_inhibit_all_warnings_option() {
        let tmp = TempDir::new().unwrap();
        let package = UnitFixture::static_library("Banana")
            .write_to(tmp.path())
            .unwrap();
        let unit = crate::core::manifest::Manifest::load(&package.join("Unit.toml"))
            .unwrap()
            .to_build_unit()
            .unwrap();
        let sandbox = Sandbox::new(tmp.path().join("sandbox"));
        let mut project = Project::new(sandbox.project_path());
        crate::synth::install_file_references(&mut project, &unit);

        let options = InstallOptions {
            inhibit_all_warnings: true,
            ..Default::default()
        };
        let out = install(&mut project, &sandbox, &unit, &options).unwrap();

        let source = project
            .reference_for_path(&package.join("Classes/Banana.m"))
            .unwrap();
        let flags = project
            .target(out.primary.unwrap())
            .sources_phase
            .build_file(source)
            .unwrap()
            .settings
            .compiler_flags
            .clone()
            .unwrap();
        assert!(flags.ends_with("-w -Xanalyzer -analyzer-disable-all-checks"));
    }

    #[test]
    fn test_rerun_is_stable() {
        let tmp = TempDir::new().unwrap();
        let package = UnitFixture::framework("Banana").write_to(tmp.path()).unwrap();
        let root = tmp.path().join("sandbox");

        let first = synthesize(&package, &root).unwrap();
        let files = first.sandbox.support_files("Banana");
        let xcconfig = fs::read(files.xcconfig_path(None)).unwrap();
        let umbrella = fs::read(files.umbrella_header_path()).unwrap();

        let second = synthesize(&package, &root).unwrap();
        assert_eq!(fs::read(files.xcconfig_path(None)).unwrap(), xcconfig);
        assert_eq!(fs::read(files.umbrella_header_path()).unwrap(), umbrella);

        let phases = |run: &SynthesisRun| {
            run.project
                .target(run.synthesized.primary.unwrap())
                .copy_files_phases
                .len()
        };
        assert_eq!(phases(&first), phases(&second));
        assert_eq!(first.synthesized.artifacts, second.synthesized.artifacts);
    }
}
