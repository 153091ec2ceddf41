// crates/pause-gate-core/src/core/redteam.rs
// ============================================================================
// Module: Pause Gate Red-Team Review
// Description: Bounded adversarial sub-review state for high-gate decisions.
// Purpose: Model the pending-to-terminal review lifecycle with a hard deadline.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Gates at orange or above require an adversarial sub-review before a
//! decision can conclude. The review is time-bounded: an outcome never
//! recorded before the deadline resolves to `Unresolved` by policy. Failure
//! to conclude is a terminal state, not an exception.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Review Outcome
// ============================================================================

/// Terminal outcome of a red-team sub-review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedTeamOutcome {
    /// The review found no additional issues.
    NoIssues,
    /// Issues were found and a mitigation was attached.
    Mitigated,
    /// The review found unmitigated issues or expired without concluding.
    Unresolved,
}

// ============================================================================
// SECTION: Review Record
// ============================================================================

/// One red-team sub-review attached to a decision.
///
/// # Invariants
/// - `outcome` of `None` means the review is still pending.
/// - A recorded outcome only counts if `concluded_at` precedes the deadline;
///   resolution past the deadline is `Unresolved` regardless of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedTeamReview {
    /// What the reviewer was asked to attack.
    pub context: String,
    /// Hard bound for concluding the review.
    pub deadline: Timestamp,
    /// Recorded outcome, if the review has concluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RedTeamOutcome>,
    /// Mitigation text attached by the reviewer, when the outcome is
    /// `Mitigated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
    /// When the recorded outcome was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concluded_at: Option<Timestamp>,
}

impl RedTeamReview {
    /// Creates a pending review with a deadline.
    #[must_use]
    pub fn pending(context: impl Into<String>, deadline: Timestamp) -> Self {
        Self {
            context: context.into(),
            deadline,
            outcome: None,
            mitigation: None,
            concluded_at: None,
        }
    }

    /// Records a concluded outcome on the review.
    #[must_use]
    pub fn concluded(
        mut self,
        outcome: RedTeamOutcome,
        concluded_at: Timestamp,
        mitigation: Option<String>,
    ) -> Self {
        self.outcome = Some(outcome);
        self.concluded_at = Some(concluded_at);
        self.mitigation = mitigation;
        self
    }
}
