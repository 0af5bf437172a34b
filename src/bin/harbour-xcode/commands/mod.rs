//! Command implementations

pub mod completions;
pub mod flags;
pub mod generate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use harbour_xcode::core::manifest::find_manifest;
use harbour_xcode::util::config::{global_config_path, load_config, project_config_path, Config};

/// Manifest given on the command line, or the nearest Unit.toml.
pub fn manifest_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            find_manifest(&cwd)
        }
    }
}

/// Directory containing a manifest.
pub fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Global config merged with the config of the unit's project.
pub fn config_for(manifest: &Path) -> Config {
    load_config(
        global_config_path().as_deref(),
        &project_config_path(&manifest_dir(manifest)),
    )
}
