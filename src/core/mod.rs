//! Core data structures for harbour-xcode.
//!
//! This module contains the foundational types the synthesizer consumes:
//! - Platforms and deployment-target versions
//! - Build units and their classified file groups
//! - The Unit.toml manifest
//! - The sandbox layout of generated support files

pub mod file_group;
pub mod manifest;
pub mod platform;
pub mod sandbox;
pub mod unit;

pub use file_group::{FileGroup, HeaderAcl};
pub use manifest::{find_manifest, Manifest, MANIFEST_NAME};
pub use platform::{Platform, PlatformVersion};
pub use sandbox::{Sandbox, SupportFiles};
pub use unit::{BuildUnit, ConfigurationKind, TestType};
