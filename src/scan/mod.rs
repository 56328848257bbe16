//! Locating expected literal blocks in source text.
//!
//! A constrained single-pass character scan, not a parser: the raw-string
//! marker is ambiguous against ordinary text, so the scan starts from the
//! `expect` call token and validates every structural constraint along the
//! way, refusing to guess when the region is ambiguous.

mod errors;
mod region;
mod scanner;

pub use errors::{ScanError, ScanErrorKind, ScanResult};
pub use region::LiteralRegion;
pub use scanner::{locate_literal, CALL_TOKEN, CLOSING_MARKER, OPENING_MARKER, PROMOTE_LABEL};
