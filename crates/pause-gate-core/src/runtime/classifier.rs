// crates/pause-gate-core/src/runtime/classifier.rs
// ============================================================================
// Module: Pause Gate Risk Classifier
// Description: Deterministic lookup-table mapping from harm catalogs to gates.
// Purpose: Compute the candidate gate for a decision from caller-supplied ratings.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Classification is a pure function of the harm catalog. Each harm is rated
//! through a fixed priority table; the catalog gate is the most severe
//! per-harm candidate. Adding a harm can never lower the result. An attached
//! absolute-rejection category bypasses the table entirely and forces the
//! most severe gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::gate::Gate;
use crate::core::harm::EmptyCatalogError;
use crate::core::harm::Harm;
use crate::core::harm::HarmCatalog;
use crate::core::harm::Impact;
use crate::core::harm::Likelihood;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a harm catalog into a gate.
///
/// # Invariants
/// - Monotonic under harm addition: appending a harm never lowers the gate.
/// - A rejection category forces [`Gate::Black`] regardless of ratings.
///
/// # Errors
///
/// Returns [`EmptyCatalogError`] when the catalog holds no harms and no
/// rejection category. A deliberately low-risk decision must still submit at
/// least one rated harm.
pub fn classify(catalog: &HarmCatalog) -> Result<Gate, EmptyCatalogError> {
    if catalog.rejection_category().is_some() {
        return Ok(Gate::Black);
    }
    if catalog.is_empty() {
        return Err(EmptyCatalogError);
    }
    let gate = catalog
        .harms()
        .iter()
        .map(classify_harm)
        .max()
        .unwrap_or(Gate::Green);
    Ok(gate)
}

/// Rates a single harm through the priority table.
///
/// Rules are evaluated in severity order; the first match wins. The
/// audience-risk flag elevates the table result by one step afterwards.
#[must_use]
pub fn classify_harm(harm: &Harm) -> Gate {
    let base = rate_harm(harm);
    if harm.audience_risk_elevated {
        base.escalate()
    } else {
        base
    }
}

/// Applies the lookup table to a harm's four core ratings.
const fn rate_harm(harm: &Harm) -> Gate {
    let severe_or_worse = matches!(harm.impact, Impact::Severe | Impact::Catastrophic);
    if matches!(harm.impact, Impact::Catastrophic) && harm.irreversible && harm.likelihood.is_probable() {
        return Gate::Black;
    }
    if (matches!(harm.impact, Impact::Catastrophic) && harm.irreversible)
        || (matches!(harm.impact, Impact::Severe)
            && harm.irreversible
            && harm.likelihood.is_probable())
        || (harm.power_asymmetry && harm.irreversible && severe_or_worse)
    {
        return Gate::Red;
    }
    if (matches!(harm.impact, Impact::Severe) && matches!(harm.likelihood, Likelihood::Possible))
        || (matches!(harm.impact, Impact::Moderate) && harm.likelihood.is_probable())
        || (harm.power_asymmetry && harm.irreversible)
    {
        return Gate::Orange;
    }
    if (matches!(harm.impact, Impact::Moderate) && matches!(harm.likelihood, Likelihood::Possible))
        || (matches!(harm.impact, Impact::Trivial) && harm.likelihood.is_probable())
    {
        return Gate::Yellow;
    }
    Gate::Green
}
