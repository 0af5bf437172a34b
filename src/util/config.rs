//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.harbour/xcode.toml` - User-wide defaults
//! - Project: `.harbour/xcode.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::sandbox::{Sandbox, DEFAULT_PROJECT_NAME, DEFAULT_SUPPORT_FILES_DIR};
use crate::synth::installer::DEFAULT_BUNDLE_IDENTIFIER_PREFIX;
use crate::synth::InstallOptions;

/// Configuration file name inside a `.harbour` directory.
pub const CONFIG_FILE_NAME: &str = "xcode.toml";

/// harbour-xcode configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project generation settings
    pub xcode: XcodeConfig,
}

/// Project generation settings, the `[xcode]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct XcodeConfig {
    /// Name of the generated project (without `.xcodeproj`)
    pub project_name: Option<String>,

    /// Name of the support files directory inside the sandbox
    pub support_files_dir: Option<String>,

    /// Prefix of generated bundle identifiers
    pub bundle_identifier_prefix: Option<String>,

    /// Suppress warnings of every unit
    pub inhibit_all_warnings: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.xcode.project_name.is_some() {
            self.xcode.project_name = other.xcode.project_name;
        }
        if other.xcode.support_files_dir.is_some() {
            self.xcode.support_files_dir = other.xcode.support_files_dir;
        }
        if other.xcode.bundle_identifier_prefix.is_some() {
            self.xcode.bundle_identifier_prefix = other.xcode.bundle_identifier_prefix;
        }
        if other.xcode.inhibit_all_warnings.is_some() {
            self.xcode.inhibit_all_warnings = other.xcode.inhibit_all_warnings;
        }
    }

    /// Sandbox rooted at `root` with the configured layout names.
    pub fn sandbox(&self, root: impl Into<PathBuf>) -> Sandbox {
        Sandbox::new(root)
            .with_project_name(
                self.xcode
                    .project_name
                    .as_deref()
                    .unwrap_or(DEFAULT_PROJECT_NAME),
            )
            .with_support_files_dir(
                self.xcode
                    .support_files_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SUPPORT_FILES_DIR),
            )
    }

    /// Synthesis options for every unit of a run.
    pub fn install_options(&self) -> InstallOptions {
        InstallOptions {
            bundle_identifier_prefix: self
                .xcode
                .bundle_identifier_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_BUNDLE_IDENTIFIER_PREFIX.to_string()),
            inhibit_all_warnings: self.xcode.inhibit_all_warnings.unwrap_or(false),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.harbour/xcode.toml)
/// 2. Global config (~/.harbour/xcode.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path.filter(|p| p.exists()) {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global harbour config directory (~/.harbour).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".harbour"))
}

/// Get the global config path (~/.harbour/xcode.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the project config path (.harbour/xcode.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".harbour").join(CONFIG_FILE_NAME)
}
