// crates/pause-gate-core/src/core/gate.rs
// ============================================================================
// Module: Pause Gate Risk Gates
// Description: Five-level risk classification gates with a total severity order.
// Purpose: Provide the gate lattice used by classification and escalation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Gates form a total order from `Green` (proceed freely) to `Black`
//! (non-negotiable stop). A gate value is only ever produced by the risk
//! classifier or by an explicit escalation step; callers never assign gates
//! directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Risk classification gate.
///
/// # Invariants
/// - Variant order defines severity: `Green < Yellow < Orange < Red < Black`.
/// - Variants are stable for serialization and contract matching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// No significant risk; ordinary care applies.
    #[default]
    Green,
    /// Low risk; harms and the escape vector must be recorded.
    Yellow,
    /// Elevated risk; red-team sub-review is mandatory.
    Orange,
    /// High risk; safer alternatives must be exhausted before proceeding.
    Red,
    /// Non-negotiable stop.
    Black,
}

impl Gate {
    /// Returns the next more severe gate, saturating at [`Gate::Black`].
    #[must_use]
    pub const fn escalate(self) -> Self {
        match self {
            Self::Green => Self::Yellow,
            Self::Yellow => Self::Orange,
            Self::Orange => Self::Red,
            Self::Red | Self::Black => Self::Black,
        }
    }

    /// Returns the numeric severity rank (0 for `Green` through 4 for `Black`).
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Green => 0,
            Self::Yellow => 1,
            Self::Orange => 2,
            Self::Red => 3,
            Self::Black => 4,
        }
    }

    /// Returns the uppercase label used by the plain-text receipt block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Orange => "ORANGE",
            Self::Red => "RED",
            Self::Black => "BLACK",
        }
    }

    /// Returns true when this gate requires a red-team sub-review.
    #[must_use]
    pub const fn requires_red_team(self) -> bool {
        self.severity() >= Self::Orange.severity()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
