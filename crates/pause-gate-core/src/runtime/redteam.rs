// crates/pause-gate-core/src/runtime/redteam.rs
// ============================================================================
// Module: Pause Gate Red-Team Resolution
// Description: Deadline-bounded resolution and verdict policy for sub-reviews.
// Purpose: Resolve pending reviews deterministically and apply block policy.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Resolution is a pure function of the review record and an observation
//! time. A review that concluded before its deadline keeps its recorded
//! outcome; one observed at or past the deadline without a timely conclusion
//! resolves to `Unresolved`. The verdict step turns `Unresolved` into a hard
//! refuse when the catalog holds an irreversible severe-or-worse harm.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::harm::HarmCatalog;
use crate::core::harm::Impact;
use crate::core::redteam::RedTeamOutcome;
use crate::core::redteam::RedTeamReview;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a review at an observation time.
///
/// Returns `None` while the review is pending and its deadline has not been
/// reached; callers must poll again or wait. A recorded outcome only counts
/// when its conclusion time precedes the deadline, otherwise the deadline
/// policy wins and the result is [`RedTeamOutcome::Unresolved`].
#[must_use]
pub fn run_red_team(review: &RedTeamReview, now: &Timestamp) -> Option<RedTeamOutcome> {
    match &review.outcome {
        Some(outcome) => {
            // An outcome without a timely conclusion time cannot prove it
            // beat the deadline and resolves as unresolved.
            let timely = review
                .concluded_at
                .as_ref()
                .is_some_and(|at| !at.has_reached(&review.deadline));
            if timely {
                Some(*outcome)
            } else {
                Some(RedTeamOutcome::Unresolved)
            }
        }
        None => now
            .has_reached(&review.deadline)
            .then_some(RedTeamOutcome::Unresolved),
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Constraint the resolved outcome places on the terminal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// The prior gate's outcome stands unchanged.
    Unchanged,
    /// Proceed or constrain is permitted only with mitigation text attached.
    RequiresMitigation,
    /// The terminal decision is forced to refuse.
    ForceRefuse,
}

/// Maps a resolved outcome and the harm catalog to a verdict.
///
/// `Unresolved` combined with any irreversible harm rated severe or worse is
/// a hard block; the caller's requested outcome is overridden.
#[must_use]
pub fn review_verdict(outcome: RedTeamOutcome, catalog: &HarmCatalog) -> ReviewVerdict {
    match outcome {
        RedTeamOutcome::NoIssues => ReviewVerdict::Unchanged,
        RedTeamOutcome::Mitigated => ReviewVerdict::RequiresMitigation,
        RedTeamOutcome::Unresolved => {
            let hard_block = catalog.harms().iter().any(|harm| {
                harm.irreversible && matches!(harm.impact, Impact::Severe | Impact::Catastrophic)
            });
            if hard_block {
                ReviewVerdict::ForceRefuse
            } else {
                ReviewVerdict::Unchanged
            }
        }
    }
}
