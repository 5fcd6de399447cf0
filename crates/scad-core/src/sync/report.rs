//! Reconciliation outcomes

use std::fmt;

use serde::Serialize;

/// What reconciliation did, or would have done, for one library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileAction {
    /// No local copy: fetch one
    Clone,
    /// Version-controlled copy: merge the latest remote changes
    Pull,
    /// Plain directory: left untouched
    Skip,
}

impl fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Clone => "clone",
            Self::Pull => "pull",
            Self::Skip => "skip",
        };
        f.write_str(text)
    }
}

/// Result of reconciling one library.
///
/// Operational failures live in `result` as the tool's diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub name: String,
    pub action: ReconcileAction,
    pub result: Result<(), String>,
}

impl ReconcileOutcome {
    pub fn succeeded(name: impl Into<String>, action: ReconcileAction) -> Self {
        Self {
            name: name.into(),
            action,
            result: Ok(()),
        }
    }

    pub fn failed(
        name: impl Into<String>,
        action: ReconcileAction,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            action,
            result: Err(diagnostic.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.result.is_ok()
    }

    /// Diagnostic text of a failed outcome.
    pub fn diagnostic(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

/// Per-library outcomes of a batch run, in catalog order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ReconcileOutcome>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(ReconcileOutcome::success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReconcileOutcome> {
        self.outcomes.iter().filter(|o| !o.success())
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn outcome(&self, name: &str) -> Option<&ReconcileOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}
