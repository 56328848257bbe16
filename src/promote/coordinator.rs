//! The promotion critical section: read, adjust, scan, rewrite, record.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use super::errors::{PromoteError, PromoteResult};
use super::CallSite;
use crate::observability::Logger;
use crate::offsets::LineOffsetLedger;
use crate::scan;

/// Serializes every source rewrite in the process.
///
/// The offset ledger and the files it describes must change together: a
/// thread reading a file while another is mid-write, or recording a delta
/// against content it did not see, corrupts one or the other. Promotions
/// therefore run one at a time, whichever file they touch, for the whole
/// read-adjust-scan-write-record sequence.
pub struct PromotionCoordinator {
    ledger: Mutex<LineOffsetLedger>,
}

impl PromotionCoordinator {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(LineOffsetLedger::new()),
        }
    }

    /// Rewrites the literal block at `site` so that it holds `actual`.
    ///
    /// `actual` is the already-normalized output, one content line per
    /// `\n`-separated segment; an empty string rewrites the block to zero
    /// content lines. The declared call line is first translated through
    /// the ledger, the block is located with the scanner, the file is
    /// rewritten, and the resulting line delta is recorded against the
    /// *declared* line so later call sites in the same file keep resolving.
    ///
    /// # Errors
    ///
    /// Fails if the block cannot be located or the file cannot be read or
    /// written. A failed promotion is never retried and touches nothing.
    pub fn promote(&self, site: &CallSite, actual: &str) -> PromoteResult<()> {
        let mut ledger = match self.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let content = fs::read_to_string(&site.path).map_err(|e| PromoteError::Read {
            path: site.path.clone(),
            source: e,
        })?;
        let lines: Vec<&str> = content.split('\n').collect();

        let adjusted = ledger.adjust(&site.path, site.line);
        let region = scan::locate_literal(&lines, adjusted.saturating_sub(1)).map_err(|e| {
            PromoteError::Scan {
                path: site.path.clone(),
                source: e,
            }
        })?;

        let actual_lines: Vec<&str> = if actual.is_empty() {
            Vec::new()
        } else {
            actual.split('\n').collect()
        };
        let replaced = region.replace_with(&actual_lines);
        let delta = region.line_delta(actual_lines.len());

        fs::write(&site.path, replaced).map_err(|e| PromoteError::Write {
            path: site.path.clone(),
            source: e,
        })?;
        ledger.record(&site.path, site.line, delta);

        let file = site.path.display().to_string();
        let line = site.line.to_string();
        let delta_text = delta.to_string();
        Logger::info(
            "PROMOTION_APPLIED",
            &[
                ("delta", delta_text.as_str()),
                ("file", file.as_str()),
                ("line", line.as_str()),
            ],
        );
        Ok(())
    }

    /// Current position of a line captured at `line` before any rewrites
    /// this coordinator performed on `file`.
    pub fn adjusted_line(&self, file: &Path, line: usize) -> usize {
        match self.ledger.lock() {
            Ok(guard) => guard.adjust(file, line),
            Err(poisoned) => poisoned.into_inner().adjust(file, line),
        }
    }
}

impl Default for PromotionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
