//! Per-group compiler flags.

use serde::Serialize;

use crate::core::file_group::FileGroup;
use crate::core::platform::Platform;

/// Disables ARC for a file.
pub const NO_ARC_FLAG: &str = "-fno-objc-arc";

/// Keeps GCD and XPC objects out of ARC on deployment targets that predate
/// their Objective-C object support.
pub const OS_OBJECT_FLAG: &str = "-DOS_OBJECT_USE_OBJC=0";

/// Silences compiler and analyzer warnings.
pub const INHIBIT_WARNINGS_FLAGS: &str = "-w -Xanalyzer -analyzer-disable-all-checks";

/// Flags applied to every file of one source group.
///
/// The manifest's own flags come first, then the ARC flag, then the
/// warning suppression flags.
pub fn compiler_flags(
    group: &FileGroup,
    platform: Platform,
    arc: bool,
    inhibit_warnings: bool,
) -> String {
    let mut flags = group.compiler_flags.clone();

    if !arc {
        flags.push(NO_ARC_FLAG.to_string());
    } else {
        let below_threshold = match &group.deployment_target {
            Some(version) => *version < platform.arc_dispatch_threshold(),
            None => true,
        };
        if below_threshold {
            flags.push(OS_OBJECT_FLAG.to_string());
        }
    }

    if inhibit_warnings {
        flags.push(INHIBIT_WARNINGS_FLAGS.to_string());
    }

    flags.join(" ")
}

/// Derived flags of one group, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct GroupFlags {
    pub group: String,
    pub arc: String,
    pub non_arc: String,
}

impl GroupFlags {
    pub fn derive(group: &FileGroup, platform: Platform, inhibit_warnings: bool) -> Self {
        GroupFlags {
            group: group.name.clone(),
            arc: compiler_flags(group, platform, true, inhibit_warnings),
            non_arc: compiler_flags(group, platform, false, inhibit_warnings),
        }
    }
}
