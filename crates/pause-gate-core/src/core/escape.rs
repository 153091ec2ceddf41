// crates/pause-gate-core/src/core/escape.rs
// ============================================================================
// Module: Pause Gate Escape Vector
// Description: Wall/Gap/Door triad attached to every non-trivial decision.
// Purpose: Carry the constraint, the harm leak, and the concrete alternative.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The escape vector records how a decision could avoid its harms: the Wall is
//! the constraint being pushed against, the Gap is where harm leaks through,
//! and the Door is a concrete safer alternative. The Door carries the
//! protocol's universal rule that nothing proceeds without an alternative;
//! door validation lives in the runtime, not on this type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Escape Vector
// ============================================================================

/// Wall/Gap/Door triad for one decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeVector {
    /// The constraint or boundary the action pushes against.
    pub wall: String,
    /// Where harm leaks through if the action proceeds as named.
    pub gap: String,
    /// A concrete, action-typed safer alternative.
    pub door: String,
}

impl EscapeVector {
    /// Creates an escape vector from its three parts.
    #[must_use]
    pub fn new(
        wall: impl Into<String>,
        gap: impl Into<String>,
        door: impl Into<String>,
    ) -> Self {
        Self {
            wall: wall.into(),
            gap: gap.into(),
            door: door.into(),
        }
    }
}
