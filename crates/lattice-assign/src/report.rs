//! Bulk operation reports
//!
//! The terminal report of a bulk assignment: one outcome per target
//! principal, serializable for operator review. A report with both
//! successes and failures is not itself an error; it is the expected
//! shape of partial success.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lattice_resolver::GrantDiff;

/// Terminal state of one principal's assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// The new grant set was persisted; `diff` is what changed.
    Succeeded {
        /// Delta between the principal's previous and new grant set.
        diff: GrantDiff,
    },
    /// Resolution or persistence failed for this principal only.
    Failed {
        /// Human-readable failure cause for operator review.
        reason: String,
    },
}

/// One principal's outcome within a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// The target principal.
    pub principal_id: String,
    /// Terminal status.
    pub status: AssignmentStatus,
}

impl AssignmentOutcome {
    /// Build a succeeded outcome.
    pub fn succeeded(principal_id: impl Into<String>, diff: GrantDiff) -> Self {
        Self {
            principal_id: principal_id.into(),
            status: AssignmentStatus::Succeeded { diff },
        }
    }

    /// Build a failed outcome.
    pub fn failed(principal_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            principal_id: principal_id.into(),
            status: AssignmentStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Check whether this outcome succeeded.
    pub fn is_succeeded(&self) -> bool {
        matches!(self.status, AssignmentStatus::Succeeded { .. })
    }
}

/// The report returned by every bulk operation.
///
/// Always usable: per-principal failures are collected here rather than
/// thrown, and one principal's failure says nothing about another's
/// outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkReport {
    /// Identifier tagging this bulk operation in logs and audits.
    pub operation_id: Uuid,
    /// When the fan-out was dispatched.
    pub started_at: DateTime<Utc>,
    /// When the last per-principal outcome was collected.
    pub finished_at: DateTime<Utc>,
    /// One outcome per target principal, in target order.
    pub outcomes: Vec<AssignmentOutcome>,
}

impl BulkReport {
    /// IDs of principals whose new grant set was persisted.
    pub fn succeeded(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_succeeded())
            .map(|outcome| outcome.principal_id.as_str())
            .collect()
    }

    /// `(principal_id, reason)` pairs for the principals that failed.
    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                AssignmentStatus::Failed { reason } => {
                    Some((outcome.principal_id.as_str(), reason.as_str()))
                }
                AssignmentStatus::Succeeded { .. } => None,
            })
            .collect()
    }

    /// Number of principals that succeeded.
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_succeeded()).count()
    }

    /// Number of principals that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    /// Check whether some principals succeeded while others failed.
    pub fn is_partial_failure(&self) -> bool {
        self.succeeded_count() > 0 && self.failed_count() > 0
    }

    /// Look up one principal's outcome.
    pub fn outcome_for(&self, principal_id: &str) -> Option<&AssignmentOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.principal_id == principal_id)
    }
}
