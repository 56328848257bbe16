//! Test-facing surface: output buffering, assertion, and promotion wiring.
//!
//! An [`ExpectHarness`] carries the configuration shared by every scope it
//! opens: where source files live, whether mismatches promote, and which
//! coordinator applies the rewrites. Scopes themselves are cheap and owned
//! by exactly one test.

mod errors;
mod scope;

pub use errors::ExpectError;
pub use scope::{promoted, ExpectScope, Expected};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use crate::promote::{shared_coordinator, CallSite, PromotionCoordinator, PromotionTrigger};

/// Expect-test configuration.
///
/// Defaults: source root `"."` (call-site paths are joined onto it),
/// trigger [`PromotionTrigger::Never`], the process-wide shared
/// coordinator.
pub struct ExpectHarness {
    source_root: PathBuf,
    trigger: PromotionTrigger,
    coordinator: Arc<PromotionCoordinator>,
}

impl ExpectHarness {
    pub fn new() -> Self {
        Self {
            source_root: PathBuf::from("."),
            trigger: PromotionTrigger::Never,
            coordinator: shared_coordinator(),
        }
    }

    /// Directory that call-site file paths resolve against.
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Promotion policy for every scope this harness opens.
    pub fn with_trigger(mut self, trigger: PromotionTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Replaces the shared coordinator, giving this harness its own offset
    /// ledger and critical section.
    pub fn with_coordinator(mut self, coordinator: Arc<PromotionCoordinator>) -> Self {
        self.coordinator = coordinator;
        self
    }

    /// Runs `test` inside a fresh scope, then fails if any printed output
    /// was not consumed by an `expect` call.
    pub fn scope<F>(&self, test: F)
    where
        F: FnOnce(&mut ExpectScope<'_>),
    {
        let mut scope = ExpectScope::new(self);
        test(&mut scope);
        scope.end();
    }

    pub(crate) fn call_site(&self, location: &Location<'_>) -> CallSite {
        CallSite::new(
            self.source_root.join(location.file()),
            location.line() as usize,
            location.column() as usize,
        )
    }

    pub(crate) fn trigger(&self) -> &PromotionTrigger {
        &self.trigger
    }

    pub(crate) fn coordinator(&self) -> &PromotionCoordinator {
        &self.coordinator
    }
}

impl Default for ExpectHarness {
    fn default() -> Self {
        Self::new()
    }
}
