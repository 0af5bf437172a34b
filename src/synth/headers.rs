//! Header visibility routing.
//!
//! A header either carries its visibility as an attribute of its Headers
//! phase entry, or, for frameworks with a header mapping directory, is
//! copied by a per-subdirectory copy-files phase so the directory layout
//! survives inside the framework.

use std::path::Path;

use crate::core::file_group::HeaderAcl;
use crate::project::target::NativeTarget;
use crate::project::RefId;
use crate::util::fs::relative_path;

/// Where a header is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRoute {
    /// Attribute on the Headers phase entry.
    Inline(HeaderAcl),
    /// Named copy-files phase writing into a headers folder subdirectory.
    CopyPhase {
        acl: HeaderAcl,
        name: String,
        dst_path: String,
    },
}

/// Decide how a header with the given visibility is installed.
pub fn route_header(
    header: &Path,
    acl: HeaderAcl,
    requires_frameworks: bool,
    header_mappings_dir: Option<&Path>,
) -> HeaderRoute {
    let mappings_dir = match header_mappings_dir {
        Some(dir) if requires_frameworks && acl != HeaderAcl::Project => dir,
        _ => return HeaderRoute::Inline(acl),
    };

    let relative = relative_path(mappings_dir, header);
    let sub_dir = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    };

    HeaderRoute::CopyPhase {
        acl,
        name: format!("Copy {} {} Headers", sub_dir, acl),
        dst_path: format!(
            "$({}_HEADERS_FOLDER_PATH)/{}",
            acl.as_str().to_uppercase(),
            sub_dir
        ),
    }
}

/// Apply a route to a header already listed in the target's Headers phase.
pub fn apply_route(target: &mut NativeTarget, file: RefId, route: &HeaderRoute) {
    match route {
        HeaderRoute::Inline(acl) => {
            if let Some(build_file) = target.headers_phase.build_file_mut(file) {
                build_file.settings.attributes = vec![acl.to_string()];
            }
        }
        HeaderRoute::CopyPhase { name, dst_path, .. } => {
            let phase = target.copy_files_phase_named(name);
            phase.dst_path = dst_path.clone();
            phase.files.add_file_reference_once(file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::Platform;
    use crate::core::unit::ConfigurationKind;
    use crate::project::target::{Language, ProductType};
    use crate::project::Project;

    #[test]
    fn test_inline_without_mapping_dir() {
        let route = route_header(Path::new("/pkg/A.h"), HeaderAcl::Public, true, None);
        assert_eq!(route, HeaderRoute::Inline(HeaderAcl::Public));
    }

    #[test]
    fn test_inline_for_static_library() {
        let route = route_header(
            Path::new("/pkg/Classes/A.h"),
            HeaderAcl::Private,
            false,
            Some(Path::new("/pkg/Classes")),
        );
        assert_eq!(route, HeaderRoute::Inline(HeaderAcl::Private));
    }

    #[test]
    fn test_project_headers_stay_inline() {
        let route = route_header(
            Path::new("/pkg/Classes/Internal/A.h"),
            HeaderAcl::Project,
            true,
            Some(Path::new("/pkg/Classes")),
        );
        assert_eq!(route, HeaderRoute::Inline(HeaderAcl::Project));
    }

    #[test]
    fn test_copy_phase_keeps_subdirectory() {
        let route = route_header(
            Path::new("/pkg/Classes/Peel/Skin.h"),
            HeaderAcl::Public,
            true,
            Some(Path::new("/pkg/Classes")),
        );
        assert_eq!(
            route,
            HeaderRoute::CopyPhase {
                acl: HeaderAcl::Public,
                name: "Copy Peel Public Headers".to_string(),
                dst_path: "$(PUBLIC_HEADERS_FOLDER_PATH)/Peel".to_string(),
            }
        );
    }

    #[test]
    fn test_copy_phase_flat_header() {
        let route = route_header(
            Path::new("/pkg/Classes/Banana.h"),
            HeaderAcl::Private,
            true,
            Some(Path::new("/pkg/Classes")),
        );
        match route {
            HeaderRoute::CopyPhase { name, dst_path, .. } => {
                assert_eq!(name, "Copy . Private Headers");
                assert_eq!(dst_path, "$(PRIVATE_HEADERS_FOLDER_PATH)/.");
            }
            other => panic!("unexpected route {:?}", other),
        }
    }

    #[test]
    fn test_apply_route_reuses_phase_by_name() {
        let mut project = Project::new("/sandbox/Packages.xcodeproj");
        let group = project.main_group();
        let a = project.new_file(group, Path::new("/pkg/Classes/Peel/A.h"));
        let b = project.new_file(group, Path::new("/pkg/Classes/Peel/B.h"));
        let target = project.new_target(
            ProductType::Framework,
            "Banana",
            Platform::Ios,
            None,
            Language::Objc,
            "Banana.framework",
        );
        project
            .target_mut(target)
            .add_build_configuration("Debug", ConfigurationKind::Debug);
        project.add_file_references(target, &[a, b], None);

        let mappings = Path::new("/pkg/Classes");
        let native = project.target_mut(target);
        for (file, path) in [(a, "/pkg/Classes/Peel/A.h"), (b, "/pkg/Classes/Peel/B.h")] {
            let route = route_header(Path::new(path), HeaderAcl::Public, true, Some(mappings));
            apply_route(native, file, &route);
            apply_route(native, file, &route);
        }

        assert_eq!(native.copy_files_phases.len(), 1);
        let phase = &native.copy_files_phases[0];
        assert_eq!(phase.files.file_refs(), vec![a, b]);
        assert_eq!(phase.dst_path, "$(PUBLIC_HEADERS_FOLDER_PATH)/Peel");
        assert!(native.headers_phase.build_file(a).unwrap().settings.attributes.is_empty());
    }

    #[test]
    fn test_apply_inline_sets_attribute() {
        let mut project = Project::new("/sandbox/Packages.xcodeproj");
        let group = project.main_group();
        let a = project.new_file(group, Path::new("/pkg/A.h"));
        let target = project.new_target(
            ProductType::StaticLibrary,
            "Banana",
            Platform::Ios,
            None,
            Language::Objc,
            "libBanana.a",
        );
        project.add_file_references(target, &[a], None);

        let native = project.target_mut(target);
        apply_route(native, a, &HeaderRoute::Inline(HeaderAcl::Project));
        assert_eq!(
            native.headers_phase.build_file(a).unwrap().settings.attributes,
            vec!["Project".to_string()]
        );
    }
}
