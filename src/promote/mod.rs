//! Rewriting expected literal blocks in place.
//!
//! Promotion is the maintenance mode of an expect test: instead of failing
//! on a mismatch, the engine rewrites the literal in the test's own source
//! so it holds the actual output. The coordinator keeps that safe when many
//! test threads promote at once.

mod coordinator;
mod errors;

pub use coordinator::PromotionCoordinator;
pub use errors::{PromoteError, PromoteResult};

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Source location of an `expect` call, with the file already resolved
/// against the harness source root. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub path: PathBuf,
    /// 1-based line the call was compiled at.
    pub line: usize,
    /// 1-based column of the call.
    pub column: usize,
}

impl CallSite {
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

/// Policy deciding whether an `expect` call rewrites its literal instead of
/// asserting. Evaluated once per call; a per-call `promoted(..)` wrapper
/// overrides whatever the policy says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromotionTrigger {
    /// Never rewrite, always assert. The default.
    #[default]
    Never,
    /// Rewrite every mismatching call.
    Always,
    /// Rewrite when the named environment variable is `"1"` or `"true"`.
    FromEnv(String),
}

impl PromotionTrigger {
    pub fn should_promote(&self) -> bool {
        match self {
            PromotionTrigger::Never => false,
            PromotionTrigger::Always => true,
            PromotionTrigger::FromEnv(name) => {
                matches!(env::var(name).as_deref(), Ok("1") | Ok("true"))
            }
        }
    }
}

/// The process-wide coordinator used when a harness does not inject its
/// own. Source files are process-global resources, so by default every
/// harness in the process funnels through the same critical section.
pub fn shared_coordinator() -> Arc<PromotionCoordinator> {
    static SHARED: OnceLock<Arc<PromotionCoordinator>> = OnceLock::new();
    SHARED
        .get_or_init(|| Arc::new(PromotionCoordinator::new()))
        .clone()
}
