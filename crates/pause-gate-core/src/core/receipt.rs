// crates/pause-gate-core/src/core/receipt.rs
// ============================================================================
// Module: Pause Gate Receipt
// Description: Immutable, versioned audit record of one gated decision.
// Purpose: Define the receipt schema, plain-text rendering, and support types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The receipt is the single long-lived artifact of a decision. It is created
//! once, after every upstream step finishes, and never mutated; corrections
//! are new receipts linked to the prior record through `parent_receipt_id`.
//! Generation and validation live in the runtime; this module owns the schema
//! and the fixed-order plain-text rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::drift::DriftFinding;
use crate::core::gate::Gate;
use crate::core::harm::HarmCatalog;
use crate::core::harm::Impact;
use crate::core::harm::Likelihood;
use crate::core::hashing::HashDigest;
use crate::core::identifiers::DecisionId;
use crate::core::identifiers::ReceiptId;
use crate::core::redteam::RedTeamOutcome;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Schema Version
// ============================================================================

/// Receipt schema version emitted and accepted by this crate.
pub const RECEIPT_SCHEMA_VERSION: &str = "PBHP_RECEIPT_v1.1";

// ============================================================================
// SECTION: Support Types
// ============================================================================

/// Epistemic confidence the caller attaches to the decision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EpistemicTag {
    /// Directly observed or verified.
    Fact,
    /// Derived from observed facts.
    Inference,
    /// Plausible but unverified.
    Guess,
    /// Confidence cannot be stated.
    Unknown,
}

impl EpistemicTag {
    /// Returns the uppercase label used by the plain-text receipt block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fact => "FACT",
            Self::Inference => "INFERENCE",
            Self::Guess => "GUESS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Terminal outcome of a gated decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Proceed with the action as named.
    Proceed,
    /// Proceed under stated constraints.
    Constrain,
    /// Proceed with the action modified.
    Modify,
    /// Do not proceed.
    Refuse,
}

impl Decision {
    /// Returns the lowercase label used by the plain-text receipt block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proceed => "proceed",
            Self::Constrain => "constrain",
            Self::Modify => "modify",
            Self::Refuse => "refuse",
        }
    }
}

/// Red-team review result embedded in a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedTeamRecord {
    /// Terminal outcome of the sub-review.
    pub outcome: RedTeamOutcome,
    /// Mitigation text, when the outcome is `Mitigated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

// ============================================================================
// SECTION: Receipt
// ============================================================================

/// Immutable audit record of one gated decision.
///
/// # Invariants
/// - Created once per decision, after all upstream steps finish.
/// - Never mutated; corrections are new receipts with `parent_receipt_id`.
/// - `receipt_hash` covers the canonical JSON of the receipt with the hash
///   and signature slots cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Schema version string.
    pub schema_version: String,
    /// Decision this receipt records.
    pub decision_id: DecisionId,
    /// Receipt identifier, used for parent-linking corrections.
    pub receipt_id: ReceiptId,
    /// When the decision concluded.
    pub timestamp: Timestamp,
    /// The action as named by the caller.
    pub named_action: String,
    /// Constraint the action pushes against.
    pub wall: String,
    /// Where harm leaks through.
    pub gap: String,
    /// Concrete safer alternative.
    pub door: String,
    /// Final gate after every escalation step.
    pub gate: Gate,
    /// Impact rating of the dominant harm.
    pub impact: Impact,
    /// Likelihood rating of the dominant harm.
    pub likelihood: Likelihood,
    /// Irreversibility flag of the dominant harm.
    pub irreversible: bool,
    /// Power-asymmetry flag of the dominant harm.
    pub power_asymmetry: bool,
    /// Caller-attached epistemic confidence.
    pub epistemic_tag: EpistemicTag,
    /// Terminal decision outcome.
    pub decision: Decision,
    /// Why the decision concluded the way it did.
    pub justification: String,
    /// Canonical content hash; cleared while the hash itself is computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_hash: Option<HashDigest>,
    /// Detached signature slot for hosts that sign receipts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Receipt this record corrects, when it is a correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_receipt_id: Option<ReceiptId>,
    /// Drift findings from the scan. `Some(vec![])` records that the scan ran
    /// and found nothing; `None` records that no scan ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_alarms_triggered: Option<Vec<DriftFinding>>,
    /// True when the scan found forced-motion pressure in the inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_motion_detected: Option<bool>,
    /// Snapshot of the harm catalog at decision time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harms: Option<HarmCatalog>,
    /// Red-team sub-review result, when one ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_team: Option<RedTeamRecord>,
}

impl Receipt {
    /// Returns a copy with the hash and signature slots cleared.
    ///
    /// This is the exact value the canonical receipt hash is computed over.
    #[must_use]
    pub fn hashable(&self) -> Self {
        let mut view = self.clone();
        view.receipt_hash = None;
        view.signature = None;
        view
    }

    /// Renders the receipt as the fixed-order plain-text block.
    ///
    /// Field order is stable across releases so that text receipts can be
    /// diffed and archived outside structured stores.
    #[must_use]
    pub fn render_plain_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.schema_version);
        let _ = writeln!(out, "decision_id: {}", self.decision_id);
        let _ = writeln!(out, "receipt_id: {}", self.receipt_id);
        let _ = writeln!(out, "timestamp: {}", self.timestamp.render());
        let _ = writeln!(out, "named_action: {}", self.named_action);
        let _ = writeln!(out, "wall: {}", self.wall);
        let _ = writeln!(out, "gap: {}", self.gap);
        let _ = writeln!(out, "door: {}", self.door);
        let _ = writeln!(out, "gate: {}", self.gate.label());
        let _ = writeln!(out, "impact: {}", self.impact.label());
        let _ = writeln!(out, "likelihood: {}", self.likelihood.label());
        let _ = writeln!(out, "irreversible: {}", self.irreversible);
        let _ = writeln!(out, "power_asymmetry: {}", self.power_asymmetry);
        let _ = writeln!(out, "epistemic_tag: {}", self.epistemic_tag.label());
        let _ = writeln!(out, "decision: {}", self.decision.label());
        let _ = writeln!(out, "justification: {}", self.justification);
        if let Some(parent) = &self.parent_receipt_id {
            let _ = writeln!(out, "parent_receipt_id: {parent}");
        }
        if let Some(findings) = &self.drift_alarms_triggered {
            let _ = writeln!(out, "drift_alarms_triggered: {}", findings.len());
        }
        if let Some(forced) = self.forced_motion_detected {
            let _ = writeln!(out, "forced_motion_detected: {forced}");
        }
        if let Some(record) = &self.red_team {
            let outcome = match record.outcome {
                RedTeamOutcome::NoIssues => "no_issues",
                RedTeamOutcome::Mitigated => "mitigated",
                RedTeamOutcome::Unresolved => "unresolved",
            };
            let _ = writeln!(out, "red_team_outcome: {outcome}");
        }
        if let Some(hash) = &self.receipt_hash {
            let _ = writeln!(out, "receipt_hash: {}", hash.value);
        }
        out
    }
}
