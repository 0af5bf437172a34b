//! Build settings of generated targets and their settings files.

use std::collections::BTreeMap;

use crate::core::sandbox::Sandbox;
use crate::core::unit::{BuildUnit, TestType};
use crate::generator::Xcconfig;

/// Settings merged into every configuration of the primary and test
/// targets.
pub fn custom_build_settings(unit: &BuildUnit) -> BTreeMap<String, String> {
    let mut settings = BTreeMap::new();
    let mut set = |key: &str, value: String| {
        settings.insert(key.to_string(), value);
    };

    set("OTHER_LDFLAGS", String::new());
    set("SKIP_INSTALL", "YES".to_string());

    if unit.requires_frameworks {
        let version = &unit.version;
        let project_version = format!("{}.{}.{}", version.major, version.minor, version.patch);
        // A zero major version cannot express compatibility on its own.
        let compatibility = if version.major < 1 {
            project_version.clone()
        } else {
            version.major.to_string()
        };
        set("CURRENT_PROJECT_VERSION", project_version);
        set("DYLIB_COMPATIBILITY_VERSION", compatibility);
        set("DYLIB_CURRENT_VERSION", "$(CURRENT_PROJECT_VERSION)".to_string());
        set("PRODUCT_MODULE_NAME", unit.product_module_name());
        set("PRODUCT_NAME", unit.product_module_name());
    } else {
        set("OTHER_LIBTOOLFLAGS", String::new());
        set("PRODUCT_NAME", unit.label().to_string());
        set("PRIVATE_HEADERS_FOLDER_PATH", String::new());
        set("PUBLIC_HEADERS_FOLDER_PATH", String::new());
    }

    for sdk in ["appletvos", "iphoneos", "watchos"] {
        set(&format!("CODE_SIGN_IDENTITY[sdk={}*]", sdk), String::new());
    }
    set(
        "SWIFT_ACTIVE_COMPILATION_CONDITIONS",
        "$(inherited) ".to_string(),
    );
    if let Some(swift_version) = &unit.swift_version {
        set("SWIFT_VERSION", swift_version.clone());
    }

    settings
}

/// Settings of a test target: the custom settings without link flags,
/// which come from the test settings file instead.
pub fn test_target_settings(unit: &BuildUnit) -> BTreeMap<String, String> {
    let mut settings = custom_build_settings(unit);
    settings.remove("OTHER_LDFLAGS");
    settings
}

/// Settings file the primary target and its resource bundles are based on.
pub fn library_xcconfig(unit: &BuildUnit, sandbox: &Sandbox, bundle_id_prefix: &str) -> Xcconfig {
    let label = unit.label();
    let target_srcroot = match unit.file_groups.first() {
        Some(group) => format!("${{PACKAGES_ROOT}}/{}", sandbox.relative(&group.root).display()),
        None => "${PACKAGES_ROOT}".to_string(),
    };

    let mut config = Xcconfig::new()
        .with(
            "CONFIGURATION_BUILD_DIR",
            unit.configuration_build_dir("${PACKAGES_CONFIGURATION_BUILD_DIR}"),
        )
        .with("GCC_PREPROCESSOR_DEFINITIONS", "$(inherited) HARBOUR=1")
        .with(
            "HEADER_SEARCH_PATHS",
            format!(
                "$(inherited) \"${{PACKAGES_ROOT}}/Headers/Private\" \"${{PACKAGES_ROOT}}/Headers/Private/{}\" \"${{PACKAGES_ROOT}}/Headers/Public\"",
                label
            ),
        )
        .with("PACKAGES_BUILD_DIR", "${BUILD_DIR}")
        .with(
            "PACKAGES_CONFIGURATION_BUILD_DIR",
            "${PACKAGES_BUILD_DIR}/$(CONFIGURATION)$(EFFECTIVE_PLATFORM_NAME)",
        )
        .with("PACKAGES_ROOT", "${SRCROOT}")
        .with("PACKAGE_TARGET_SRCROOT", target_srcroot)
        .with(
            "PRODUCT_BUNDLE_IDENTIFIER",
            format!("{}.${{PRODUCT_NAME:rfc1034identifier}}", bundle_id_prefix),
        )
        .with("SKIP_INSTALL", "YES");

    if let Some(swift_version) = &unit.swift_version {
        config.set("SWIFT_VERSION", swift_version.clone());
    }
    config
}

/// Settings file of a test target: the library settings plus linking
/// against the library under test.
pub fn test_xcconfig(
    unit: &BuildUnit,
    sandbox: &Sandbox,
    bundle_id_prefix: &str,
    test_type: TestType,
) -> Xcconfig {
    let link = if unit.requires_frameworks {
        format!("-framework \"{}\"", unit.product_module_name())
    } else {
        format!("-l\"{}\"", unit.label())
    };
    library_xcconfig(unit, sandbox, bundle_id_prefix)
        .with("OTHER_LDFLAGS", format!("$(inherited) -ObjC {}", link))
        .with(
            "LD_RUNPATH_SEARCH_PATHS",
            "$(inherited) '@executable_path/Frameworks' '@loader_path/Frameworks'",
        )
        .with(
            "CONFIGURATION_BUILD_DIR",
            format!(
                "${{PACKAGES_CONFIGURATION_BUILD_DIR}}/{}",
                unit.test_target_label(test_type)
            ),
        )
}
