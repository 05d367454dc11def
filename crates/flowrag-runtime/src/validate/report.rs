//! Validation report.

use serde::{Deserialize, Serialize};

/// Outcome of validating a workflow graph.
///
/// Problems are data, never errors: callers receive the full list of
/// errors and warnings in one pass so a UI can point at all of them
/// at once. Warnings never affect validity.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the graph may be persisted and executed.
    pub valid: bool,
    /// Fatal problems, in rule order then input order.
    pub errors: Vec<String>,
    /// Non-fatal configuration problems.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Builds a report; `valid` is derived from the error list.
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Builds a report for structural failures found at the decode
    /// boundary. Semantic rules never ran, so there are no warnings.
    pub(crate) fn structural(errors: Vec<String>) -> Self {
        Self::from_parts(errors, Vec::new())
    }
}
