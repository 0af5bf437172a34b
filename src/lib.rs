//! harbour-xcode - Xcode target synthesis for packaged build units
//!
//! This crate turns a build unit (a package with classified file groups)
//! into native targets of an in-memory project: the library or framework
//! target, its test and resource bundle targets, their build phases and
//! settings, and the support files they reference.

pub mod core;
pub mod generator;
pub mod ops;
pub mod project;
pub mod synth;
pub mod util;

/// Test utilities for harbour-xcode unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides package fixtures and a one-call synthesis
/// helper.
#[cfg(test)]
pub mod test_support;

pub use core::{
    file_group::FileGroup, manifest::Manifest, platform::Platform, sandbox::Sandbox,
    unit::BuildUnit,
};

pub use project::Project;
pub use synth::{install, InstallOptions, SynthError, SynthesizedTarget};
