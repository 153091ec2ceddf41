// crates/pause-gate-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Pause Gate Decision Pipeline
// Description: Sequential evaluation from harm catalog to stored receipt.
// Purpose: Thread one decision through every gate step in a fixed order.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! One pipeline evaluation runs classify, door validation, the drift scan,
//! red-team resolution when the post-drift gate demands it, receipt
//! generation, and the idempotent store append, in that order. Evaluations
//! share nothing but the store; independent decisions may run concurrently.
//! Aborting before receipt generation leaves no durable effect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::escape::EscapeVector;
use crate::core::gate::Gate;
use crate::core::harm::EmptyCatalogError;
use crate::core::harm::HarmCatalog;
use crate::core::identifiers::DecisionId;
use crate::core::identifiers::ReceiptId;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::hash_canonical_json;
use crate::core::receipt::Decision;
use crate::core::receipt::EpistemicTag;
use crate::core::receipt::RECEIPT_SCHEMA_VERSION;
use crate::core::receipt::Receipt;
use crate::core::receipt::RedTeamRecord;
use crate::core::redteam::RedTeamReview;
use crate::core::time::Timestamp;
use crate::interfaces::AppendOutcome;
use crate::interfaces::ReceiptStore;
use crate::interfaces::StoreError;
use crate::runtime::challenge;
use crate::runtime::challenge::ChallengeError;
use crate::runtime::challenge::ChallengeResponse;
use crate::runtime::classifier::classify;
use crate::runtime::door::DoorError;
use crate::runtime::door::DoorPolicy;
use crate::runtime::door::validate_door;
use crate::runtime::drift::DecisionInputs;
use crate::runtime::drift::DriftRules;
use crate::runtime::drift::effective_gate;
use crate::runtime::drift::forced_motion_detected;
use crate::runtime::drift::scan;
use crate::runtime::receipt::ReceiptDraft;
use crate::runtime::receipt::ReceiptError;
use crate::runtime::receipt::generate;
use crate::runtime::redteam::ReviewVerdict;
use crate::runtime::redteam::review_verdict;
use crate::runtime::redteam::run_red_team;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Rule configuration shared by every evaluation of one pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineRules {
    /// Door validation policy.
    pub door: DoorPolicy,
    /// Drift phrase catalog.
    pub drift: DriftRules,
}

// ============================================================================
// SECTION: Decision Context
// ============================================================================

/// Everything one evaluation needs, supplied explicitly by the caller.
///
/// # Invariants
/// - Carries no ambient state; two evaluations never share a context.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    /// Identifier for this decision.
    pub decision_id: DecisionId,
    /// Caller-observed time for this evaluation.
    pub now: Timestamp,
    /// The action as named by the caller.
    pub named_action: String,
    /// Harm catalog for this decision.
    pub catalog: HarmCatalog,
    /// Wall/Gap/Door triad.
    pub escape: EscapeVector,
    /// Gate the caller believes applies, when one was declared.
    pub declared_gate: Option<Gate>,
    /// Outcome the caller requests, subject to override.
    pub requested_decision: Decision,
    /// Caller-attached epistemic confidence.
    pub epistemic_tag: EpistemicTag,
    /// The caller's justification text.
    pub justification: String,
    /// Red-team sub-review record, required at orange and above.
    pub red_team: Option<RedTeamReview>,
    /// Receipt this decision corrects, when it is a correction.
    pub parent_receipt_id: Option<ReceiptId>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while evaluating a decision pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Classification failed on an empty catalog.
    #[error(transparent)]
    Classify(#[from] EmptyCatalogError),
    /// The escape vector failed door validation.
    #[error(transparent)]
    Door(#[from] DoorError),
    /// The post-drift gate requires a red-team review and none was supplied.
    #[error("gate {gate} requires a red-team review for decision {decision_id}")]
    MissingRedTeam {
        /// Decision missing its review.
        decision_id: DecisionId,
        /// Gate that demanded the review.
        gate: Gate,
    },
    /// The red-team review is still pending and its deadline has not passed.
    #[error("red-team review still pending for decision {decision_id}")]
    RedTeamPending {
        /// Decision whose review is pending.
        decision_id: DecisionId,
    },
    /// Receipt generation or validation failed.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
    /// The receipt store rejected the append.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No receipt is stored for the challenged decision.
    #[error("no receipt stored for decision {0}")]
    UnknownDecision(DecisionId),
    /// A stored receipt could not answer a challenge.
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
}

// ============================================================================
// SECTION: Evaluation Outcome
// ============================================================================

/// Result of one completed pipeline evaluation.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The sealed, stored receipt.
    pub receipt: Receipt,
    /// Whether the store wrote a new record or saw a duplicate.
    pub append: AppendOutcome,
    /// Gate computed by classification, before drift escalation.
    pub computed_gate: Gate,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Sequential decision evaluator over a receipt store.
#[derive(Debug)]
pub struct DecisionPipeline<S: ReceiptStore> {
    /// Shared receipt log.
    store: S,
    /// Rule configuration for every evaluation.
    rules: PipelineRules,
}

impl<S: ReceiptStore> DecisionPipeline<S> {
    /// Creates a pipeline with default rules.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_rules(store, PipelineRules::default())
    }

    /// Creates a pipeline with explicit rules.
    #[must_use]
    pub fn with_rules(store: S, rules: PipelineRules) -> Self {
        Self { store, rules }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluates one decision end to end and appends its receipt.
    ///
    /// A post-drift gate of black forces the terminal decision to refuse, as
    /// does an unresolved review over an irreversible severe-or-worse harm.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when any step fails. No receipt is stored on
    /// failure; the evaluation has no durable effect until the final append.
    pub fn evaluate(&self, context: DecisionContext) -> Result<PipelineOutcome, PipelineError> {
        let computed = classify(&context.catalog)?;
        validate_door(&context.escape, computed, &self.rules.door)?;

        let inputs = DecisionInputs {
            named_action: context.named_action.clone(),
            justification: context.justification.clone(),
        };
        let findings = scan(&inputs, computed, context.declared_gate, &self.rules.drift);
        let gate = effective_gate(computed, &findings);
        let forced_motion = forced_motion_detected(&findings);

        let mut decision = context.requested_decision;
        let red_team = if gate.requires_red_team() {
            let review = context
                .red_team
                .as_ref()
                .ok_or_else(|| PipelineError::MissingRedTeam {
                    decision_id: context.decision_id.clone(),
                    gate,
                })?;
            let outcome = run_red_team(review, &context.now).ok_or_else(|| {
                PipelineError::RedTeamPending {
                    decision_id: context.decision_id.clone(),
                }
            })?;
            if review_verdict(outcome, &context.catalog) == ReviewVerdict::ForceRefuse {
                decision = Decision::Refuse;
            }
            Some(RedTeamRecord {
                outcome,
                mitigation: review.mitigation.clone(),
            })
        } else {
            None
        };
        if gate == Gate::Black {
            decision = Decision::Refuse;
        }

        let receipt = generate(ReceiptDraft {
            decision_id: context.decision_id,
            timestamp: context.now,
            named_action: context.named_action,
            escape: context.escape,
            gate,
            harms: context.catalog,
            epistemic_tag: context.epistemic_tag,
            decision,
            justification: context.justification,
            parent_receipt_id: context.parent_receipt_id,
            drift_findings: Some(findings),
            forced_motion_detected: Some(forced_motion),
            red_team,
            signature: None,
        })?;
        let append = self.store.append(&receipt)?;
        Ok(PipelineOutcome {
            receipt,
            append,
            computed_gate: computed,
        })
    }

    /// Answers a false-positive challenge for a stored decision.
    ///
    /// A receipt that cannot answer is a protocol violation in its own right:
    /// before the error is returned, the audit-trail-gap finding is appended
    /// to the store as a correction receipt linked to the original through
    /// `parent_receipt_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] when the store fails,
    /// [`PipelineError::UnknownDecision`] when no receipt exists, and
    /// [`PipelineError::Challenge`] when the receipt cannot answer.
    pub fn challenge(
        &self,
        decision_id: &DecisionId,
    ) -> Result<ChallengeResponse, PipelineError> {
        let receipt = self
            .store
            .load(decision_id)?
            .ok_or_else(|| PipelineError::UnknownDecision(decision_id.clone()))?;
        match challenge::challenge(&receipt) {
            Ok(response) => Ok(response),
            Err(error) => {
                self.record_audit_gap(&receipt, &error)?;
                Err(PipelineError::Challenge(error))
            }
        }
    }

    /// Appends a correction receipt carrying an audit-trail-gap finding.
    ///
    /// The correction reuses the original receipt's timestamp and ratings so
    /// repeated failed challenges produce an identical record and stay
    /// idempotent at the store. It documents a defective record, so the
    /// per-gate required-field policy does not apply to it.
    fn record_audit_gap(
        &self,
        original: &Receipt,
        error: &ChallengeError,
    ) -> Result<(), PipelineError> {
        let finding = error.to_drift_finding();
        let correction_id = DecisionId::new(format!("{}.audit-gap", original.decision_id));
        let mut correction = Receipt {
            schema_version: RECEIPT_SCHEMA_VERSION.to_string(),
            receipt_id: ReceiptId::from_decision(&correction_id),
            decision_id: correction_id,
            timestamp: original.timestamp,
            named_action: format!(
                "record audit trail gap for decision {}",
                original.decision_id
            ),
            wall: original.wall.clone(),
            gap: original.gap.clone(),
            door: original.door.clone(),
            gate: original.gate,
            impact: original.impact,
            likelihood: original.likelihood,
            irreversible: original.irreversible,
            power_asymmetry: original.power_asymmetry,
            epistemic_tag: EpistemicTag::Fact,
            decision: original.decision,
            justification: finding.excerpt.clone(),
            receipt_hash: None,
            signature: None,
            parent_receipt_id: Some(original.receipt_id.clone()),
            drift_alarms_triggered: Some(vec![finding]),
            forced_motion_detected: None,
            harms: original.harms.clone(),
            red_team: None,
        };
        let digest = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &correction.hashable())
            .map_err(ReceiptError::from)?;
        correction.receipt_hash = Some(digest);
        self.store.append(&correction)?;
        Ok(())
    }
}
