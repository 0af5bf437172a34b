//! Native targets, build phases and build configurations.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::platform::{Platform, PlatformVersion};
use crate::core::unit::ConfigurationKind;
use crate::project::{RefId, TargetId};

/// Product produced by a native target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    StaticLibrary,
    Framework,
    UnitTestBundle,
    UiTestBundle,
    Bundle,
}

impl ProductType {
    /// Product type identifier used by the build tool.
    pub fn identifier(&self) -> &'static str {
        match self {
            ProductType::StaticLibrary => "com.apple.product-type.library.static",
            ProductType::Framework => "com.apple.product-type.framework",
            ProductType::UnitTestBundle => "com.apple.product-type.bundle.unit-test",
            ProductType::UiTestBundle => "com.apple.product-type.bundle.ui-testing",
            ProductType::Bundle => "com.apple.product-type.bundle",
        }
    }

    /// Whether the product is a bundle of any kind.
    pub fn is_bundle(&self) -> bool {
        matches!(
            self,
            ProductType::Bundle | ProductType::UnitTestBundle | ProductType::UiTestBundle
        )
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Primary language of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Objc,
    Swift,
}

/// Per-file settings of a build file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildFileSettings {
    /// `COMPILER_FLAGS`
    #[serde(rename = "COMPILER_FLAGS", skip_serializing_if = "Option::is_none")]
    pub compiler_flags: Option<String>,

    /// `ATTRIBUTES` (header visibility, code-sign-on-copy, ...)
    #[serde(rename = "ATTRIBUTES", skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl BuildFileSettings {
    pub fn is_empty(&self) -> bool {
        self.compiler_flags.is_none() && self.attributes.is_empty()
    }
}

/// A file reference as a member of a build phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFile {
    pub file: RefId,
    #[serde(skip_serializing_if = "BuildFileSettings::is_empty")]
    pub settings: BuildFileSettings,
}

/// Ordered list of build files.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BuildPhase {
    files: Vec<BuildFile>,
}

impl BuildPhase {
    /// Append a file and return its build file for customization.
    pub fn add_file_reference(&mut self, file: RefId) -> &mut BuildFile {
        self.files.push(BuildFile {
            file,
            settings: BuildFileSettings::default(),
        });
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    /// Append a file unless it is already present.
    pub fn add_file_reference_once(&mut self, file: RefId) {
        if !self.contains(file) {
            self.add_file_reference(file);
        }
    }

    pub fn contains(&self, file: RefId) -> bool {
        self.files.iter().any(|bf| bf.file == file)
    }

    /// Build file for a reference, if present.
    pub fn build_file(&self, file: RefId) -> Option<&BuildFile> {
        self.files.iter().find(|bf| bf.file == file)
    }

    pub fn build_file_mut(&mut self, file: RefId) -> Option<&mut BuildFile> {
        self.files.iter_mut().find(|bf| bf.file == file)
    }

    pub fn files(&self) -> &[BuildFile] {
        &self.files
    }

    /// References in phase order.
    pub fn file_refs(&self) -> Vec<RefId> {
        self.files.iter().map(|bf| bf.file).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Destination kind of a copy-files phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DstSubfolder {
    AbsolutePath,
    Wrapper,
    Resources,
    Frameworks,
    ProductsDirectory,
}

/// A named phase copying files to a destination.
#[derive(Debug, Clone, Serialize)]
pub struct CopyFilesPhase {
    pub name: String,
    pub dst_subfolder_spec: DstSubfolder,
    pub dst_path: String,
    /// Copy only when installing, not on every build
    pub run_only_for_deployment_postprocessing: bool,
    pub files: BuildPhase,
}

/// A phase running a literal shell script.
#[derive(Debug, Clone, Serialize)]
pub struct ShellScriptPhase {
    pub name: String,
    pub shell_path: String,
    pub shell_script: String,
}

/// A named build configuration of a target.
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfiguration {
    pub name: String,
    pub kind: ConfigurationKind,
    pub build_settings: BTreeMap<String, String>,
    /// Settings file the configuration is based on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_configuration_reference: Option<RefId>,
}

/// A target in the project.
#[derive(Debug, Clone, Serialize)]
pub struct NativeTarget {
    pub name: String,
    pub product_type: ProductType,
    pub platform: Platform,
    pub deployment_target: Option<PlatformVersion>,
    pub language: Language,
    pub product_name: String,
    pub product_reference: RefId,
    pub build_configurations: Vec<BuildConfiguration>,
    pub sources_phase: BuildPhase,
    pub headers_phase: BuildPhase,
    pub resources_phase: BuildPhase,
    pub copy_files_phases: Vec<CopyFilesPhase>,
    pub shell_script_phases: Vec<ShellScriptPhase>,
    pub dependencies: Vec<TargetId>,
}

impl NativeTarget {
    pub(crate) fn new(
        name: String,
        product_type: ProductType,
        platform: Platform,
        deployment_target: Option<PlatformVersion>,
        language: Language,
        product_name: String,
        product_reference: RefId,
    ) -> Self {
        NativeTarget {
            name,
            product_type,
            platform,
            deployment_target,
            language,
            product_name,
            product_reference,
            build_configurations: Vec::new(),
            sources_phase: BuildPhase::default(),
            headers_phase: BuildPhase::default(),
            resources_phase: BuildPhase::default(),
            copy_files_phases: Vec::new(),
            shell_script_phases: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Add a build configuration seeded with the target's common settings.
    ///
    /// Adding a configuration that already exists is a no-op.
    pub fn add_build_configuration(&mut self, name: &str, kind: ConfigurationKind) {
        if self.build_configuration(name).is_some() {
            return;
        }
        let build_settings = self.common_build_settings(kind);
        self.build_configurations.push(BuildConfiguration {
            name: name.to_string(),
            kind,
            build_settings,
            base_configuration_reference: None,
        });
    }

    fn common_build_settings(&self, kind: ConfigurationKind) -> BTreeMap<String, String> {
        let mut settings = BTreeMap::new();
        settings.insert("SDKROOT".to_string(), self.platform.sdk_root().to_string());
        settings.insert("PRODUCT_NAME".to_string(), "$(TARGET_NAME)".to_string());
        if let Some(version) = &self.deployment_target {
            settings.insert(
                self.platform.deployment_target_setting().to_string(),
                version.to_string(),
            );
        }
        let family = match self.platform {
            Platform::Ios => Some("1,2"),
            Platform::Tvos => Some("3"),
            Platform::Watchos => Some("4"),
            Platform::Osx => None,
        };
        if let Some(family) = family {
            settings.insert("TARGETED_DEVICE_FAMILY".to_string(), family.to_string());
        }
        let debug_format = match kind {
            ConfigurationKind::Debug => "dwarf",
            ConfigurationKind::Release => "dwarf-with-dsym",
        };
        settings.insert(
            "DEBUG_INFORMATION_FORMAT".to_string(),
            debug_format.to_string(),
        );
        if self.product_type == ProductType::Bundle {
            settings.insert("WRAPPER_EXTENSION".to_string(), "bundle".to_string());
            settings.insert("SKIP_INSTALL".to_string(), "YES".to_string());
        }
        settings
    }

    pub fn build_configuration(&self, name: &str) -> Option<&BuildConfiguration> {
        self.build_configurations.iter().find(|c| c.name == name)
    }

    /// Names of every build configuration, in creation order.
    pub fn configuration_names(&self) -> Vec<&str> {
        self.build_configurations
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Set a build setting in every configuration.
    pub fn set_build_setting(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for config in &mut self.build_configurations {
            config
                .build_settings
                .insert(key.to_string(), value.clone());
        }
    }

    /// Merge settings into every configuration, overriding existing keys.
    pub fn merge_build_settings(&mut self, settings: &BTreeMap<String, String>) {
        for config in &mut self.build_configurations {
            config
                .build_settings
                .extend(settings.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    /// Base every configuration on the given settings file.
    pub fn set_base_configuration_reference(&mut self, reference: RefId) {
        for config in &mut self.build_configurations {
            config.base_configuration_reference = Some(reference);
        }
    }

    /// Set the deployment target, updating existing configurations.
    pub fn set_deployment_target(&mut self, version: PlatformVersion) {
        let key = self.platform.deployment_target_setting();
        self.set_build_setting(key, version.to_string());
        self.deployment_target = Some(version);
    }

    /// Depend on another target. Duplicate dependencies are ignored.
    pub fn add_dependency(&mut self, target: TargetId) {
        if !self.dependencies.contains(&target) {
            self.dependencies.push(target);
        }
    }

    /// Add references to the Resources phase.
    pub fn add_resources(&mut self, refs: &[RefId]) {
        for &file in refs {
            self.resources_phase.add_file_reference_once(file);
        }
    }

    /// Copy-files phase with the given name, if present.
    pub fn copy_files_phase(&self, name: &str) -> Option<&CopyFilesPhase> {
        self.copy_files_phases.iter().find(|p| p.name == name)
    }

    /// Copy-files phase with the given name, created when missing.
    ///
    /// Phases are keyed by name: asking twice for the same name yields the
    /// same phase.
    pub fn copy_files_phase_named(&mut self, name: &str) -> &mut CopyFilesPhase {
        let index = match self.copy_files_phases.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.copy_files_phases.push(CopyFilesPhase {
                    name: name.to_string(),
                    dst_subfolder_spec: DstSubfolder::ProductsDirectory,
                    dst_path: String::new(),
                    run_only_for_deployment_postprocessing: false,
                    files: BuildPhase::default(),
                });
                self.copy_files_phases.len() - 1
            }
        };
        &mut self.copy_files_phases[index]
    }

    /// Append a shell script phase.
    pub fn new_shell_script_phase(&mut self, name: &str, script: impl Into<String>) {
        self.shell_script_phases.push(ShellScriptPhase {
            name: name.to_string(),
            shell_path: "/bin/sh".to_string(),
            shell_script: script.into(),
        });
    }
}
