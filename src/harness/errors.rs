//! Failures surfaced to the test author.

use thiserror::Error;

use crate::promote::PromoteError;

/// A failed expectation, scope teardown, or promotion.
///
/// Mismatches and unconsumed output are recoverable at the test level (the
/// test fails, the run continues); promotion failures are fatal for the
/// call that raised them.
#[derive(Debug, Error)]
pub enum ExpectError {
    /// Normalized output differed from the expected literal.
    #[error("expected content mismatch at {file}:{line}:{column}\n{diff}")]
    Mismatch {
        file: String,
        line: u32,
        column: u32,
        /// Rendered line diff, expected on the left.
        diff: String,
    },

    /// Output remained in the buffer when the scope ended.
    #[error("unhandled output remaining after expect scope: '{remaining}'")]
    UnconsumedOutput { remaining: String },

    /// The literal rewrite failed.
    #[error(transparent)]
    Promotion(#[from] PromoteError),
}
