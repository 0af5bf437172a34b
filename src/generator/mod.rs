//! Generated support files.
//!
//! Each generator renders one text artifact. Writing goes through
//! [`Generator::save_as`], which replaces the destination atomically.

pub mod dummy_source;
pub mod header;
pub mod info_plist;
pub mod module_map;
pub mod xcconfig;

use std::path::Path;

use anyhow::Result;

use crate::util::fs::write_string;

pub use dummy_source::DummySource;
pub use header::{PrefixHeader, UmbrellaHeader};
pub use info_plist::{BundlePackageType, InfoPlist};
pub use module_map::ModuleMap;
pub use xcconfig::Xcconfig;

/// A generated text file.
pub trait Generator {
    /// Render the file contents.
    fn generate(&self) -> String;

    /// Render and write to `path`, creating parent directories.
    fn save_as(&self, path: &Path) -> Result<()> {
        tracing::debug!("generating {}", path.display());
        write_string(path, &self.generate())
    }
}
