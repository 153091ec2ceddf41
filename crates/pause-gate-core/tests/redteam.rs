// crates/pause-gate-core/tests/redteam.rs
// ============================================================================
// Module: Red-Team Resolution Tests
// Description: Deadline-bounded resolution and verdict policy coverage.
// ============================================================================

//! ## Overview
//! Validates pending resolution, deadline expiry, late-conclusion policy, and
//! the hard-block verdict for unresolved reviews over irreversible harms.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use pause_gate_core::Harm;
use pause_gate_core::HarmCatalog;
use pause_gate_core::Impact;
use pause_gate_core::Likelihood;
use pause_gate_core::RedTeamOutcome;
use pause_gate_core::RedTeamReview;
use pause_gate_core::Timestamp;
use pause_gate_core::runtime::redteam::ReviewVerdict;
use pause_gate_core::runtime::redteam::review_verdict;
use pause_gate_core::runtime::redteam::run_red_team;

/// Builds a catalog with one harm at the given ratings.
fn catalog(impact: Impact, irreversible: bool) -> HarmCatalog {
    let mut catalog = HarmCatalog::new();
    catalog.push(Harm::new(
        "review subject",
        impact,
        Likelihood::Possible,
        irreversible,
        false,
    ));
    catalog
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Tests a pending review before its deadline stays unresolved-pending.
#[test]
fn test_pending_before_deadline_is_none() {
    let review = RedTeamReview::pending("attack the rollout plan", Timestamp::Logical(100));
    assert_eq!(run_red_team(&review, &Timestamp::Logical(50)), None);
}

/// Tests a pending review at its deadline resolves to unresolved.
#[test]
fn test_deadline_expiry_resolves_unresolved() {
    let review = RedTeamReview::pending("attack the rollout plan", Timestamp::Logical(100));
    assert_eq!(
        run_red_team(&review, &Timestamp::Logical(100)),
        Some(RedTeamOutcome::Unresolved)
    );
}

/// Tests a timely recorded outcome is kept.
#[test]
fn test_timely_outcome_is_kept() {
    let review = RedTeamReview::pending("attack the rollout plan", Timestamp::Logical(100))
        .concluded(RedTeamOutcome::NoIssues, Timestamp::Logical(80), None);
    assert_eq!(
        run_red_team(&review, &Timestamp::Logical(120)),
        Some(RedTeamOutcome::NoIssues)
    );
}

/// Tests an outcome concluded past the deadline resolves to unresolved.
#[test]
fn test_late_conclusion_resolves_unresolved() {
    let review = RedTeamReview::pending("attack the rollout plan", Timestamp::Logical(100))
        .concluded(RedTeamOutcome::NoIssues, Timestamp::Logical(150), None);
    assert_eq!(
        run_red_team(&review, &Timestamp::Logical(150)),
        Some(RedTeamOutcome::Unresolved)
    );
}

/// Tests an outcome without a conclusion time resolves to unresolved.
#[test]
fn test_outcome_without_conclusion_time_is_unresolved() {
    let mut review = RedTeamReview::pending("attack the rollout plan", Timestamp::Logical(100));
    review.outcome = Some(RedTeamOutcome::Mitigated);
    assert_eq!(
        run_red_team(&review, &Timestamp::Logical(50)),
        Some(RedTeamOutcome::Unresolved)
    );
}

/// Tests unix-millis deadlines behave the same as logical ones.
#[test]
fn test_unix_millis_deadline() {
    let review =
        RedTeamReview::pending("attack the rollout plan", Timestamp::UnixMillis(1_700_000_000_000));
    assert_eq!(
        run_red_team(&review, &Timestamp::UnixMillis(1_699_999_999_999)),
        None
    );
    assert_eq!(
        run_red_team(&review, &Timestamp::UnixMillis(1_700_000_000_001)),
        Some(RedTeamOutcome::Unresolved)
    );
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Tests no issues leaves the outcome unchanged.
#[test]
fn test_no_issues_verdict_is_unchanged() {
    let verdict = review_verdict(RedTeamOutcome::NoIssues, &catalog(Impact::Severe, true));
    assert_eq!(verdict, ReviewVerdict::Unchanged);
}

/// Tests mitigated requires mitigation text downstream.
#[test]
fn test_mitigated_verdict_requires_mitigation() {
    let verdict = review_verdict(RedTeamOutcome::Mitigated, &catalog(Impact::Severe, true));
    assert_eq!(verdict, ReviewVerdict::RequiresMitigation);
}

/// Tests unresolved over an irreversible severe harm hard-blocks.
#[test]
fn test_unresolved_irreversible_severe_forces_refuse() {
    let verdict = review_verdict(RedTeamOutcome::Unresolved, &catalog(Impact::Severe, true));
    assert_eq!(verdict, ReviewVerdict::ForceRefuse);
}

/// Tests unresolved over a reversible harm does not hard-block.
#[test]
fn test_unresolved_reversible_is_unchanged() {
    let verdict = review_verdict(RedTeamOutcome::Unresolved, &catalog(Impact::Severe, false));
    assert_eq!(verdict, ReviewVerdict::Unchanged);
}

/// Tests unresolved over a moderate irreversible harm does not hard-block.
#[test]
fn test_unresolved_moderate_is_unchanged() {
    let verdict = review_verdict(RedTeamOutcome::Unresolved, &catalog(Impact::Moderate, true));
    assert_eq!(verdict, ReviewVerdict::Unchanged);
}
