//! Promotion failure types.
//!
//! Both kinds are fatal for the promotion that raised them and are never
//! retried: a scan failure means the literal region is ambiguous, and there
//! is no safe partial-write recovery for an I/O failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scan::ScanError;

/// Result type for promotion operations.
pub type PromoteResult<T> = Result<T, PromoteError>;

/// Why a promotion could not be applied.
#[derive(Debug, Error)]
pub enum PromoteError {
    /// The literal block could not be located; carries the scan reason and
    /// its line:column inside the named file.
    #[error("could not locate expected literal block at {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    /// The source file could not be read.
    #[error("failed to read source file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rewritten source could not be written back.
    #[error("failed to write source file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanErrorKind;

    #[test]
    fn test_scan_error_display_names_file_and_position() {
        let err = PromoteError::Scan {
            path: PathBuf::from("tests/sample.rs"),
            source: ScanError::new(ScanErrorKind::OpeningNotFound, 7, 13),
        };
        let text = err.to_string();
        assert!(text.contains("tests/sample.rs"));
        assert!(text.contains("could not find opening delimiter"));
        assert!(text.contains("7:13"));
    }

    #[test]
    fn test_io_error_display_names_file() {
        let err = PromoteError::Read {
            path: PathBuf::from("tests/gone.rs"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let text = err.to_string();
        assert!(text.contains("failed to read"));
        assert!(text.contains("tests/gone.rs"));
    }
}
