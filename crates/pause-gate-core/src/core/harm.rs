// crates/pause-gate-core/src/core/harm.rs
// ============================================================================
// Module: Pause Gate Harm Model
// Description: Typed harm records and the append-only per-decision harm catalog.
// Purpose: Carry caller-supplied harm ratings into classification unchanged.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Harm`] describes one plausible negative outcome with caller-supplied
//! ratings. The engine never infers or estimates ratings itself; ambiguous
//! ratings must be rounded up by the caller before submission. Harms collect
//! into a [`HarmCatalog`], an append log for a single decision instance.
//! Corrections append a new harm; history is never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Ratings
// ============================================================================

/// Severity of a harm's impact if it occurs.
///
/// # Invariants
/// - Variant order defines severity: `Trivial < Moderate < Severe < Catastrophic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Minor inconvenience; fully recoverable.
    Trivial,
    /// Real but bounded damage.
    Moderate,
    /// Serious damage to people, systems, or trust.
    Severe,
    /// Ruinous or life-altering damage.
    Catastrophic,
}

impl Impact {
    /// Returns the lowercase label used by the plain-text receipt block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Catastrophic => "catastrophic",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability band for a harm occurring.
///
/// # Invariants
/// - Variant order defines severity: `Unlikely < Possible < Likely < Imminent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    /// Would require unusual circumstances.
    Unlikely,
    /// Could plausibly happen.
    Possible,
    /// Expected on the current path.
    Likely,
    /// Already in motion or effectively certain.
    Imminent,
}

impl Likelihood {
    /// Returns true for the `Likely` and `Imminent` bands.
    #[must_use]
    pub const fn is_probable(self) -> bool {
        matches!(self, Self::Likely | Self::Imminent)
    }

    /// Returns the lowercase label used by the plain-text receipt block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unlikely => "unlikely",
            Self::Possible => "possible",
            Self::Likely => "likely",
            Self::Imminent => "imminent",
        }
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Harm
// ============================================================================

/// One plausible negative outcome with caller-supplied ratings.
///
/// # Invariants
/// - Immutable once added to a catalog; corrections append a new harm.
/// - Ratings are inputs, never derived by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harm {
    /// What could go wrong, in the caller's words.
    pub description: String,
    /// Severity rating if the harm occurs.
    pub impact: Impact,
    /// Probability band for the harm occurring.
    pub likelihood: Likelihood,
    /// True when the harm cannot be undone once realized.
    pub irreversible: bool,
    /// True when the harm lands on a party with materially less ability to
    /// consent, exit, or appeal.
    pub power_asymmetry: bool,
    /// The least powerful affected party, when identified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub least_powerful_party: Option<String>,
    /// Parties affected if the harm occurs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_parties: Vec<String>,
    /// Free-text caller notes attached to the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// True when the harm reaches an audience that raises exposure beyond the
    /// direct parties. Elevates the per-harm candidate gate by one step.
    #[serde(default)]
    pub audience_risk_elevated: bool,
}

impl Harm {
    /// Creates a harm with the four core ratings and no optional detail.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        impact: Impact,
        likelihood: Likelihood,
        irreversible: bool,
        power_asymmetry: bool,
    ) -> Self {
        Self {
            description: description.into(),
            impact,
            likelihood,
            irreversible,
            power_asymmetry,
            least_powerful_party: None,
            affected_parties: Vec::new(),
            notes: None,
            audience_risk_elevated: false,
        }
    }
}

// ============================================================================
// SECTION: Harm Catalog
// ============================================================================

/// Append-only set of harms for one decision instance.
///
/// # Invariants
/// - Harms are never removed; the catalog is an append log.
/// - An attached rejection category marks the decision as violating a
///   non-negotiable category and forces the most severe gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmCatalog {
    /// Harms in submission order.
    harms: Vec<Harm>,
    /// Non-negotiable category the decision violates, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejection_category: Option<String>,
}

impl HarmCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            harms: Vec::new(),
            rejection_category: None,
        }
    }

    /// Appends a harm to the catalog.
    pub fn push(&mut self, harm: Harm) {
        self.harms.push(harm);
    }

    /// Marks the catalog as violating a non-negotiable category.
    pub fn set_rejection_category(&mut self, category: impl Into<String>) {
        self.rejection_category = Some(category.into());
    }

    /// Returns the harms in submission order.
    #[must_use]
    pub fn harms(&self) -> &[Harm] {
        &self.harms
    }

    /// Returns the attached rejection category, if any.
    #[must_use]
    pub fn rejection_category(&self) -> Option<&str> {
        self.rejection_category.as_deref()
    }

    /// Returns true when no harms have been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.harms.is_empty()
    }

    /// Returns the number of submitted harms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.harms.len()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when classification is requested for an empty catalog.
///
/// A low-risk decision still requires at least one deliberately rated harm;
/// an empty catalog never classifies as anything by omission.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("harm catalog is empty: classification requires at least one rated harm")]
pub struct EmptyCatalogError;
