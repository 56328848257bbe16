//! Scan failure reasons.
//!
//! Every reason means the literal region could not be located without
//! guessing; callers treat all of them as fatal and never retry. The
//! message strings are part of the contract and asserted by tests.

use thiserror::Error;

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Why the expected literal block could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("could not find call")]
    CallNotFound,

    #[error("found two call sequences on the same line")]
    AmbiguousCall,

    #[error("could not find opening delimiter")]
    OpeningNotFound,

    #[error("opening delimiter must be on the call line or the line immediately below")]
    OpeningTooFar,

    #[error("interpolation not allowed within expected content")]
    InterpolationInContent,

    #[error("could not find closing delimiter")]
    ClosingNotFound,

    #[error("closing delimiter must be on a different line than opening one")]
    ClosingOnOpeningLine,

    #[error("closing delimiter must be on a different line than content")]
    ClosingOnContentLine,
}

/// A scan failure with 1-based source coordinates. The file path is added
/// by the promotion layer, which owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}
