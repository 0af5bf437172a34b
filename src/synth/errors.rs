//! Synthesis error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal configuration error while synthesizing a unit.
///
/// Any of these invalidates the whole unit; there is no partial result.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("unable to find {kind} ref for `{}` for target `{target}`", path.display())]
    UnresolvedReference {
        kind: &'static str,
        path: PathBuf,
        target: String,
    },

    #[error("unknown test type `{test_type}`")]
    UnknownTestType { test_type: String },

    #[error("test type `{test_type}` is not supported for target `{target}`")]
    UnsupportedTestType { test_type: String, target: String },

    #[error("unit `{unit}` has no file groups")]
    MissingFileGroup { unit: String },
}

impl SynthError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SynthError::UnresolvedReference { kind, path, target } => {
                Diagnostic::error(format!("no project reference for {} `{}`", kind, path.display()))
                    .with_context(format!("while synthesizing target `{}`", target))
                    .with_location(path.clone())
                    .with_suggestion(suggestions::MISSING_REFERENCE)
            }

            SynthError::UnknownTestType { test_type } => {
                Diagnostic::error(format!("unknown test type `{}`", test_type))
                    .with_context("supported test types: unit")
                    .with_suggestion(suggestions::TEST_TYPE)
            }

            SynthError::UnsupportedTestType { test_type, target } => Diagnostic::error(format!(
                "no product type for `{}` tests of `{}`",
                test_type, target
            ))
            .with_suggestion(suggestions::TEST_TYPE),

            SynthError::MissingFileGroup { unit } => {
                Diagnostic::error(format!("unit `{}` declares no file groups", unit))
                    .with_suggestion(suggestions::NO_GROUPS)
            }
        }
    }
}
