// crates/pause-gate-core/src/runtime/receipt.rs
// ============================================================================
// Module: Pause Gate Receipt Generation
// Description: Receipt drafting, required-field validation, and hash sealing.
// Purpose: Produce the immutable audit record after all upstream steps finish.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! A [`ReceiptDraft`] gathers everything the pipeline produced; `generate`
//! derives the dominant-harm ratings, validates the required-field-by-gate
//! policy, and seals the record with its canonical content hash. `validate`
//! applies the same policy to any receipt, including ones loaded from a
//! store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::drift::DriftFinding;
use crate::core::escape::EscapeVector;
use crate::core::gate::Gate;
use crate::core::harm::Harm;
use crate::core::harm::HarmCatalog;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::DecisionId;
use crate::core::identifiers::ReceiptId;
use crate::core::receipt::Decision;
use crate::core::receipt::EpistemicTag;
use crate::core::receipt::RECEIPT_SCHEMA_VERSION;
use crate::core::receipt::Receipt;
use crate::core::receipt::RedTeamRecord;
use crate::core::redteam::RedTeamOutcome;
use crate::core::time::Timestamp;
use crate::runtime::classifier::classify_harm;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while generating or validating receipts.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Required fields are missing for the receipt's gate.
    #[error("incomplete receipt for decision {decision_id}: missing {missing:?}")]
    IncompleteReceipt {
        /// Decision whose receipt is incomplete.
        decision_id: DecisionId,
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },
    /// The receipt carries an unsupported schema version.
    #[error("unsupported receipt schema version: {0}")]
    UnsupportedSchemaVersion(String),
    /// Canonical hashing failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ============================================================================
// SECTION: Draft
// ============================================================================

/// Everything the pipeline produced for one decision, pre-sealing.
#[derive(Debug, Clone)]
pub struct ReceiptDraft {
    /// Decision this receipt records.
    pub decision_id: DecisionId,
    /// When the decision concluded.
    pub timestamp: Timestamp,
    /// The action as named by the caller.
    pub named_action: String,
    /// Wall/Gap/Door triad.
    pub escape: EscapeVector,
    /// Final gate after every escalation step.
    pub gate: Gate,
    /// Harm catalog at decision time.
    pub harms: HarmCatalog,
    /// Caller-attached epistemic confidence.
    pub epistemic_tag: EpistemicTag,
    /// Terminal decision outcome.
    pub decision: Decision,
    /// Why the decision concluded the way it did.
    pub justification: String,
    /// Receipt this record corrects, when it is a correction.
    pub parent_receipt_id: Option<ReceiptId>,
    /// Drift findings from the scan, when a scan ran.
    pub drift_findings: Option<Vec<DriftFinding>>,
    /// Forced-motion flag from the scan, when a scan ran.
    pub forced_motion_detected: Option<bool>,
    /// Red-team sub-review result, when one ran.
    pub red_team: Option<RedTeamRecord>,
    /// Detached signature slot.
    pub signature: Option<String>,
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generates a sealed receipt from a draft.
///
/// The dominant harm is the first catalog entry that reaches the catalog's
/// most severe per-harm rating; its four core ratings become the receipt's
/// scalar rating fields.
///
/// # Errors
///
/// Returns [`ReceiptError::IncompleteReceipt`] when the draft violates the
/// required-field-by-gate policy, or [`ReceiptError::Hash`] when canonical
/// hashing fails.
pub fn generate(draft: ReceiptDraft) -> Result<Receipt, ReceiptError> {
    let dominant = dominant_harm(&draft.harms).ok_or_else(|| ReceiptError::IncompleteReceipt {
        decision_id: draft.decision_id.clone(),
        missing: vec!["harms"],
    })?;
    let mut receipt = Receipt {
        schema_version: RECEIPT_SCHEMA_VERSION.to_string(),
        receipt_id: ReceiptId::from_decision(&draft.decision_id),
        decision_id: draft.decision_id,
        timestamp: draft.timestamp,
        named_action: draft.named_action,
        wall: draft.escape.wall,
        gap: draft.escape.gap,
        door: draft.escape.door,
        gate: draft.gate,
        impact: dominant.impact,
        likelihood: dominant.likelihood,
        irreversible: dominant.irreversible,
        power_asymmetry: dominant.power_asymmetry,
        epistemic_tag: draft.epistemic_tag,
        decision: draft.decision,
        justification: draft.justification,
        receipt_hash: None,
        signature: draft.signature,
        parent_receipt_id: draft.parent_receipt_id,
        drift_alarms_triggered: draft.drift_findings,
        forced_motion_detected: draft.forced_motion_detected,
        harms: Some(draft.harms),
        red_team: draft.red_team,
    };
    validate(&receipt)?;
    let digest = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &receipt.hashable())?;
    receipt.receipt_hash = Some(digest);
    Ok(receipt)
}

/// Returns the first harm that reaches the catalog's most severe rating.
fn dominant_harm(catalog: &HarmCatalog) -> Option<&Harm> {
    let max = catalog.harms().iter().map(classify_harm).max()?;
    catalog
        .harms()
        .iter()
        .find(|harm| classify_harm(harm) == max)
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a receipt against the required-field-by-gate policy.
///
/// Green receipts may omit harm detail. Yellow receipts must carry at least
/// one harm and a full escape vector (wall, gap, and door). Orange and above
/// must additionally carry a red-team outcome and drift-scan results. A mitigated review permits proceed or
/// constrain only with mitigation text attached.
///
/// # Errors
///
/// Returns [`ReceiptError::UnsupportedSchemaVersion`] for a foreign schema
/// version, or [`ReceiptError::IncompleteReceipt`] naming every missing
/// field.
pub fn validate(receipt: &Receipt) -> Result<(), ReceiptError> {
    if receipt.schema_version != RECEIPT_SCHEMA_VERSION {
        return Err(ReceiptError::UnsupportedSchemaVersion(
            receipt.schema_version.clone(),
        ));
    }
    let mut missing = Vec::new();
    if receipt.named_action.trim().is_empty() {
        missing.push("named_action");
    }
    if receipt.justification.trim().is_empty() {
        missing.push("justification");
    }
    if receipt.gate >= Gate::Yellow {
        if receipt.wall.trim().is_empty() {
            missing.push("wall");
        }
        if receipt.gap.trim().is_empty() {
            missing.push("gap");
        }
        if receipt.door.trim().is_empty() {
            missing.push("door");
        }
        if !receipt.harms.as_ref().is_some_and(|harms| !harms.is_empty()) {
            missing.push("harms");
        }
    }
    if receipt.gate >= Gate::Orange {
        if receipt.red_team.is_none() {
            missing.push("red_team");
        }
        if receipt.drift_alarms_triggered.is_none() {
            missing.push("drift_alarms_triggered");
        }
    }
    if let Some(record) = &receipt.red_team
        && record.outcome == RedTeamOutcome::Mitigated
        && matches!(receipt.decision, Decision::Proceed | Decision::Constrain)
        && !record
            .mitigation
            .as_ref()
            .is_some_and(|text| !text.trim().is_empty())
    {
        missing.push("red_team.mitigation");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReceiptError::IncompleteReceipt {
            decision_id: receipt.decision_id.clone(),
            missing,
        })
    }
}

/// Verifies a receipt's stored content hash against its canonical form.
///
/// Receipts without a hash pass; sealing is optional for hosts that archive
/// plain-text receipts only.
///
/// # Errors
///
/// Returns [`ReceiptError::Hash`] when canonicalization fails.
pub fn verify_hash(receipt: &Receipt) -> Result<bool, ReceiptError> {
    match &receipt.receipt_hash {
        None => Ok(true),
        Some(stored) => {
            let computed = hash_canonical_json(stored.algorithm, &receipt.hashable())?;
            Ok(computed == *stored)
        }
    }
}
