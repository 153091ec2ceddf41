// crates/pause-gate-core/src/runtime/challenge.rs
// ============================================================================
// Module: Pause Gate Challenge Handler
// Description: False-positive challenge reconstruction from stored receipts.
// Purpose: Answer "was this pause justified?" strictly from the audit record.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! A challenge never consults live state: every answer field must be
//! reconstructable from the receipt alone. A receipt that cannot answer is
//! itself a protocol violation, surfaced as an audit-trail-gap drift finding
//! attributed to the original decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::drift::DriftField;
use crate::core::drift::DriftFinding;
use crate::core::drift::DriftTag;
use crate::core::identifiers::DecisionId;
use crate::core::receipt::Receipt;

// ============================================================================
// SECTION: Challenge Response
// ============================================================================

/// Reconstruction of why a pause happened and what would release it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// The constraint that tripped the pause.
    pub trigger: String,
    /// The harm risk the pause protected against.
    pub risk_identified: String,
    /// The concrete alternative that permits safe continuation.
    pub release_door: String,
    /// Evidence that would close the harm leak and release the pause.
    pub release_evidence: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when a receipt cannot answer a challenge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChallengeError {
    /// One or more answer fields cannot be derived from the receipt.
    #[error("insufficient audit trail for decision {decision_id}: missing {missing:?}")]
    InsufficientAuditTrail {
        /// Decision whose receipt failed the challenge.
        decision_id: DecisionId,
        /// Names of the underivable fields.
        missing: Vec<&'static str>,
    },
}

impl ChallengeError {
    /// Converts the failure into a drift finding against the original
    /// decision.
    #[must_use]
    pub fn to_drift_finding(&self) -> DriftFinding {
        let Self::InsufficientAuditTrail {
            decision_id,
            missing,
        } = self;
        DriftFinding {
            tag: DriftTag::AuditTrailGap,
            field: DriftField::Justification,
            excerpt: format!(
                "receipt for decision {decision_id} could not answer challenge: missing {missing:?}"
            ),
        }
    }
}

// ============================================================================
// SECTION: Challenge
// ============================================================================

/// Answers a false-positive challenge from a stored receipt.
///
/// The trigger comes from the wall, the identified risk from the first
/// recorded harm's description, the release door from the door, and the
/// release evidence from the gap. All four must be present on the receipt.
///
/// # Errors
///
/// Returns [`ChallengeError::InsufficientAuditTrail`] naming every field
/// that cannot be derived.
pub fn challenge(receipt: &Receipt) -> Result<ChallengeResponse, ChallengeError> {
    let mut missing = Vec::new();
    if receipt.wall.trim().is_empty() {
        missing.push("trigger");
    }
    let risk = receipt
        .harms
        .as_ref()
        .and_then(|harms| harms.harms().first())
        .map(|harm| harm.description.clone())
        .filter(|description| !description.trim().is_empty());
    if risk.is_none() {
        missing.push("risk_identified");
    }
    if receipt.door.trim().is_empty() {
        missing.push("release_door");
    }
    if receipt.gap.trim().is_empty() {
        missing.push("release_evidence");
    }
    if !missing.is_empty() {
        return Err(ChallengeError::InsufficientAuditTrail {
            decision_id: receipt.decision_id.clone(),
            missing,
        });
    }
    Ok(ChallengeResponse {
        trigger: receipt.wall.clone(),
        risk_identified: risk.unwrap_or_default(),
        release_door: receipt.door.clone(),
        release_evidence: receipt.gap.clone(),
    })
}
