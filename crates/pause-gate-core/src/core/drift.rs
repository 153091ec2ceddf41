// crates/pause-gate-core/src/core/drift.rs
// ============================================================================
// Module: Pause Gate Drift Findings
// Description: Records of detected rationalization and rating manipulation.
// Purpose: Carry drift evidence from the scan into the receipt unchanged.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A drift finding marks one detected sign that ratings or wording were chosen
//! to reach a preferred outcome rather than derived honestly. Findings are
//! computed fresh on each scan and are never persisted as mutable state; they
//! only travel inside receipts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Drift Findings
// ============================================================================

/// Classification of a single drift finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DriftTag {
    /// A rationalization phrase matched in free text. The value is the
    /// catalog tag for the matched phrase family.
    Phrase(String),
    /// A declared gate was lower severity than the computed gate.
    RatingManipulation,
    /// A stored receipt could not answer a challenge from its own fields.
    AuditTrailGap,
}

/// Which decision field triggered a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftField {
    /// The named action text.
    NamedAction,
    /// The justification text.
    Justification,
    /// The caller-declared gate.
    DeclaredGate,
}

/// One detected sign of drift or gaming.
///
/// # Invariants
/// - Findings are values computed fresh per scan; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftFinding {
    /// What kind of drift was detected.
    pub tag: DriftTag,
    /// Which field triggered the finding.
    pub field: DriftField,
    /// The matched or offending text, verbatim from the input.
    pub excerpt: String,
}
