// crates/pause-gate-core/tests/pipeline.rs
// ============================================================================
// Module: Decision Pipeline Tests
// Description: End-to-end evaluation from harm catalog to stored receipt.
// ============================================================================

//! ## Overview
//! Validates the full pipeline order, drift escalation into red-team
//! territory, deadline-forced refusals, black-gate refusals, and idempotent
//! appends to the shared store.

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

use pause_gate_core::AppendOutcome;
use pause_gate_core::Decision;
use pause_gate_core::DecisionContext;
use pause_gate_core::DecisionId;
use pause_gate_core::DecisionPipeline;
use pause_gate_core::DriftTag;
use pause_gate_core::EpistemicTag;
use pause_gate_core::EscapeVector;
use pause_gate_core::Gate;
use pause_gate_core::Harm;
use pause_gate_core::HarmCatalog;
use pause_gate_core::Impact;
use pause_gate_core::InMemoryReceiptStore;
use pause_gate_core::Likelihood;
use pause_gate_core::PipelineError;
use pause_gate_core::ReceiptStore;
use pause_gate_core::RedTeamOutcome;
use pause_gate_core::RedTeamReview;
use pause_gate_core::Timestamp;
use pause_gate_core::runtime::receipt::ReceiptDraft;
use pause_gate_core::runtime::receipt::generate;

/// Builds a context with one harm at the given ratings and a concrete door.
fn context(id: &str, impact: Impact, likelihood: Likelihood, irreversible: bool) -> DecisionContext {
    let mut catalog = HarmCatalog::new();
    catalog.push(Harm::new(
        "primary identified harm",
        impact,
        likelihood,
        irreversible,
        false,
    ));
    DecisionContext {
        decision_id: DecisionId::new(id),
        now: Timestamp::Logical(50),
        named_action: "publish the incident report".to_string(),
        catalog,
        escape: EscapeVector::new(
            "disclosure deadline",
            "unredacted customer names",
            "redact customer names and verify with legal",
        ),
        declared_gate: None,
        requested_decision: Decision::Proceed,
        epistemic_tag: EpistemicTag::Inference,
        justification: "figures were audited and signed off".to_string(),
        red_team: None,
        parent_receipt_id: None,
    }
}

/// A concluded no-issues review well inside its deadline.
fn timely_review() -> RedTeamReview {
    RedTeamReview::pending("attack the publication plan", Timestamp::Logical(100)).concluded(
        RedTeamOutcome::NoIssues,
        Timestamp::Logical(40),
        None,
    )
}

// ============================================================================
// SECTION: Happy Paths
// ============================================================================

/// Tests a yellow decision evaluates and stores its receipt.
#[test]
fn test_yellow_decision_stores_receipt() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let outcome = pipeline
        .evaluate(context("dec-1", Impact::Moderate, Likelihood::Possible, false))
        .unwrap();
    assert_eq!(outcome.computed_gate, Gate::Yellow);
    assert_eq!(outcome.receipt.gate, Gate::Yellow);
    assert_eq!(outcome.append, AppendOutcome::Appended);
    assert_eq!(outcome.receipt.decision, Decision::Proceed);
    let stored = pipeline
        .store()
        .load(&DecisionId::new("dec-1"))
        .unwrap()
        .unwrap();
    assert_eq!(stored, outcome.receipt);
}

/// Tests an orange decision with a timely review concludes unchanged.
#[test]
fn test_orange_with_timely_review_proceeds() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-2", Impact::Severe, Likelihood::Possible, false);
    ctx.red_team = Some(timely_review());
    let outcome = pipeline.evaluate(ctx).unwrap();
    assert_eq!(outcome.receipt.gate, Gate::Orange);
    assert_eq!(outcome.receipt.decision, Decision::Proceed);
    assert_eq!(
        outcome.receipt.red_team.as_ref().unwrap().outcome,
        RedTeamOutcome::NoIssues
    );
}

/// Tests duplicate submission of the same decision is a no-op.
#[test]
fn test_duplicate_submission_is_noop() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let ctx = context("dec-3", Impact::Moderate, Likelihood::Possible, false);
    let first = pipeline.evaluate(ctx.clone()).unwrap();
    let second = pipeline.evaluate(ctx).unwrap();
    assert_eq!(first.append, AppendOutcome::Appended);
    assert_eq!(second.append, AppendOutcome::Duplicate);
    assert_eq!(pipeline.store().list().unwrap().len(), 1);
}

// ============================================================================
// SECTION: Drift Escalation
// ============================================================================

/// Tests a lowballed declared gate escalates into red-team territory.
#[test]
fn test_rating_manipulation_escalates() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-4", Impact::Severe, Likelihood::Possible, false);
    ctx.declared_gate = Some(Gate::Yellow);
    ctx.red_team = Some(timely_review());
    let outcome = pipeline.evaluate(ctx).unwrap();
    assert_eq!(outcome.computed_gate, Gate::Orange);
    assert_eq!(outcome.receipt.gate, Gate::Red);
    let findings = outcome.receipt.drift_alarms_triggered.as_ref().unwrap();
    assert!(
        findings
            .iter()
            .any(|finding| finding.tag == DriftTag::RatingManipulation)
    );
}

/// Tests rationalization phrases escalate a yellow decision to orange and
/// then demand a review.
#[test]
fn test_phrase_drift_demands_review() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-5", Impact::Moderate, Likelihood::Possible, false);
    ctx.justification = "it's temporary, we'll revisit after launch".to_string();
    let err = pipeline.evaluate(ctx).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingRedTeam { gate: Gate::Orange, .. }
    ));
}

/// Tests the forced-motion flag lands on the receipt.
#[test]
fn test_forced_motion_flag_recorded() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-6", Impact::Moderate, Likelihood::Possible, false);
    ctx.justification = "no time to wait for the next window".to_string();
    ctx.red_team = Some(timely_review());
    let outcome = pipeline.evaluate(ctx).unwrap();
    assert_eq!(outcome.receipt.forced_motion_detected, Some(true));
}

// ============================================================================
// SECTION: Red-Team Enforcement
// ============================================================================

/// Tests an orange decision without a review fails.
#[test]
fn test_orange_without_review_fails() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let ctx = context("dec-7", Impact::Severe, Likelihood::Possible, false);
    assert!(matches!(
        pipeline.evaluate(ctx),
        Err(PipelineError::MissingRedTeam { .. })
    ));
}

/// Tests a pending review before its deadline blocks evaluation.
#[test]
fn test_pending_review_blocks_evaluation() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-8", Impact::Severe, Likelihood::Possible, false);
    ctx.red_team = Some(RedTeamReview::pending(
        "attack the publication plan",
        Timestamp::Logical(100),
    ));
    assert!(matches!(
        pipeline.evaluate(ctx),
        Err(PipelineError::RedTeamPending { .. })
    ));
    assert!(pipeline.store().list().unwrap().is_empty());
}

/// Tests an expired review over an irreversible severe harm forces refuse,
/// overriding the requested outcome.
#[test]
fn test_expired_review_forces_refuse() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-9", Impact::Severe, Likelihood::Likely, true);
    ctx.now = Timestamp::Logical(150);
    ctx.red_team = Some(RedTeamReview::pending(
        "attack the publication plan",
        Timestamp::Logical(100),
    ));
    let outcome = pipeline.evaluate(ctx).unwrap();
    assert_eq!(outcome.receipt.gate, Gate::Red);
    assert_eq!(
        outcome.receipt.red_team.as_ref().unwrap().outcome,
        RedTeamOutcome::Unresolved
    );
    assert_eq!(outcome.receipt.decision, Decision::Refuse);
}

// ============================================================================
// SECTION: Black Gate
// ============================================================================

/// Tests a rejection category forces black and refuse.
#[test]
fn test_rejection_category_forces_black_refuse() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut ctx = context("dec-10", Impact::Trivial, Likelihood::Unlikely, false);
    ctx.catalog.set_rejection_category("systemic dehumanization of a group");
    ctx.red_team = Some(timely_review());
    let outcome = pipeline.evaluate(ctx).unwrap();
    assert_eq!(outcome.receipt.gate, Gate::Black);
    assert_eq!(outcome.receipt.decision, Decision::Refuse);
}

// ============================================================================
// SECTION: Challenge
// ============================================================================

/// Tests a stored receipt answers a challenge through the pipeline.
#[test]
fn test_challenge_through_pipeline() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    pipeline
        .evaluate(context("dec-11", Impact::Moderate, Likelihood::Possible, false))
        .unwrap();
    let response = pipeline.challenge(&DecisionId::new("dec-11")).unwrap();
    assert_eq!(response.trigger, "disclosure deadline");
    assert_eq!(
        response.release_door,
        "redact customer names and verify with legal"
    );
}

/// Tests a failed challenge records an audit-trail-gap correction receipt
/// linked to the original decision.
#[test]
fn test_failed_challenge_records_audit_gap() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    let mut harms = HarmCatalog::new();
    harms.push(Harm::new(
        "stale records linger",
        Impact::Trivial,
        Likelihood::Unlikely,
        false,
        false,
    ));
    let original = generate(ReceiptDraft {
        decision_id: DecisionId::new("dec-12"),
        timestamp: Timestamp::Logical(5),
        named_action: "archive stale records".to_string(),
        escape: EscapeVector::new("", "", ""),
        gate: Gate::Green,
        harms,
        epistemic_tag: EpistemicTag::Fact,
        decision: Decision::Proceed,
        justification: "routine cleanup".to_string(),
        parent_receipt_id: None,
        drift_findings: Some(Vec::new()),
        forced_motion_detected: Some(false),
        red_team: None,
        signature: None,
    })
    .unwrap();
    pipeline.store().append(&original).unwrap();

    let err = pipeline.challenge(&DecisionId::new("dec-12")).unwrap_err();
    assert!(matches!(err, PipelineError::Challenge(_)));

    let correction = pipeline
        .store()
        .load(&DecisionId::new("dec-12.audit-gap"))
        .unwrap()
        .unwrap();
    assert_eq!(correction.parent_receipt_id, Some(original.receipt_id.clone()));
    let findings = correction.drift_alarms_triggered.as_ref().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].tag, DriftTag::AuditTrailGap);
    assert!(findings[0].excerpt.contains("dec-12"));

    let _ = pipeline.challenge(&DecisionId::new("dec-12")).unwrap_err();
    assert_eq!(pipeline.store().list().unwrap().len(), 2);
}

/// Tests challenging an unknown decision fails.
#[test]
fn test_challenge_unknown_decision_fails() {
    let pipeline = DecisionPipeline::new(InMemoryReceiptStore::new());
    assert!(matches!(
        pipeline.challenge(&DecisionId::new("missing")),
        Err(PipelineError::UnknownDecision(_))
    ));
}
