//! State that lives for one lint run, across files.

use rustc_hash::FxHashSet;

/// Run-scoped memory shared by every check.
///
/// Holds the keys of diagnostics that should only be reported once per run.
/// [`crate::Linter::begin_run`] clears it.
#[derive(Debug, Default)]
pub struct SessionState {
    reported: FxHashSet<(String, String)>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` for `rule`; true the first time it is seen this run.
    pub fn first_report(&mut self, rule: &str, key: &str) -> bool {
        self.reported.insert((rule.to_string(), key.to_string()))
    }

    pub fn was_reported(&self, rule: &str, key: &str) -> bool {
        self.reported.contains(&(rule.to_string(), key.to_string()))
    }

    pub fn reset(&mut self) {
        tracing::trace!(cleared = self.reported.len(), "resetting lint session");
        self.reported.clear();
    }
}
