//! High-level operations.
//!
//! This module contains the implementation of harbour-xcode commands.

pub mod generate;

pub use generate::{flags_report, format_summary, generate, GenerateOptions, GenerateResult};
