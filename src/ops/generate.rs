//! Implementation of `harbour-xcode generate` and `harbour-xcode flags`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::manifest::Manifest;
use crate::core::unit::BuildUnit;
use crate::project::Project;
use crate::synth::flags::GroupFlags;
use crate::synth::{install, install_file_references, SynthesizedTarget};
use crate::util::config::Config;

/// Options for generating a project.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path of the unit manifest
    pub manifest_path: PathBuf,

    /// Directory receiving the project and support files
    pub sandbox_root: PathBuf,

    /// Merged configuration
    pub config: Config,
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
    pub unit: BuildUnit,
    pub project: Project,
    pub synthesized: SynthesizedTarget,
}

/// Load a unit manifest and synthesize its targets into a fresh project.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateResult> {
    let manifest = Manifest::load(&opts.manifest_path)?;
    let unit = manifest.to_build_unit()?;

    let sandbox = opts.config.sandbox(&opts.sandbox_root);
    let mut project = Project::new(sandbox.project_path());
    install_file_references(&mut project, &unit);

    let synthesized = install(
        &mut project,
        &sandbox,
        &unit,
        &opts.config.install_options(),
    )
    .with_context(|| format!("failed to synthesize targets for `{}`", unit.name))?;

    Ok(GenerateResult {
        unit,
        project,
        synthesized,
    })
}

/// Human-readable summary of a generation run.
pub fn format_summary(result: &GenerateResult) -> String {
    let mut output = String::new();
    let project = &result.project;

    output.push_str(&format!(
        "Generated {} for `{}` ({})\n",
        project.path().display(),
        result.unit.name,
        result.unit.platform
    ));

    for id in result.synthesized.all_targets() {
        let target = project.target(id);
        output.push_str(&format!(
            "  {} [{}] {} sources, {} headers, {} resources",
            target.name,
            target.product_type,
            target.sources_phase.len(),
            target.headers_phase.len(),
            target.resources_phase.len()
        ));
        if !target.copy_files_phases.is_empty() {
            output.push_str(&format!(", {} copy phases", target.copy_files_phases.len()));
        }
        output.push('\n');
    }

    if !result.synthesized.artifacts.is_empty() {
        output.push_str("\nSupport files:\n");
        for path in &result.synthesized.artifacts {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    output
}

/// Derived compiler flags of each group, optionally restricted to one.
pub fn flags_report(
    manifest_path: &Path,
    group: Option<&str>,
    config: &Config,
) -> Result<Vec<GroupFlags>> {
    let manifest = Manifest::load(manifest_path)?;
    let unit = manifest.to_build_unit()?;
    let inhibit = unit.inhibit_warnings || config.install_options().inhibit_all_warnings;

    let report: Vec<GroupFlags> = unit
        .file_groups
        .iter()
        .filter(|g| group.map_or(true, |name| g.name == name))
        .map(|g| GroupFlags::derive(g, unit.platform, inhibit))
        .collect();

    if let (Some(name), true) = (group, report.is_empty()) {
        bail!(
            "no group named `{}` in unit `{}` (groups: {})",
            name,
            unit.name,
            manifest.group_names().join(", ")
        );
    }
    Ok(report)
}
