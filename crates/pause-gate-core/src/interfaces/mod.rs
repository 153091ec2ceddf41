// crates/pause-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Pause Gate Interfaces
// Description: Trait boundaries between the decision engine and host backends.
// Purpose: Define the receipt store seam so hosts choose their own persistence.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The engine owns evaluation; hosts own persistence. The [`ReceiptStore`]
//! trait is the only shared resource across concurrently evaluated decisions,
//! and its append contract is idempotent by decision identifier so duplicate
//! submissions never create duplicate records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::DecisionId;
use crate::core::receipt::Receipt;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Errors surfaced by receipt store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("store io error: {0}")]
    Io(String),
    /// Stored payload failed integrity verification.
    #[error("store corruption detected: {0}")]
    Corrupt(String),
    /// Store schema version does not match this crate.
    #[error("store version mismatch: found {found}, expected {expected}")]
    VersionMismatch {
        /// Version recorded in the store.
        found: i64,
        /// Version this crate requires.
        expected: i64,
    },
    /// A conflicting receipt already exists for the decision identifier.
    #[error("conflicting receipt already stored for decision {0}")]
    Invalid(DecisionId),
    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Append Outcome
// ============================================================================

/// Result of an idempotent receipt append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendOutcome {
    /// The receipt was written for the first time.
    Appended,
    /// An identical receipt was already stored; no write occurred.
    Duplicate,
}

// ============================================================================
// SECTION: Receipt Store
// ============================================================================

/// Append-only receipt log keyed by decision identifier.
///
/// # Invariants
/// - Appends are idempotent: re-submitting the same receipt is a no-op.
/// - Re-submitting a different receipt under an existing identifier fails
///   with [`StoreError::Invalid`]; stored receipts are never replaced.
pub trait ReceiptStore: Send + Sync {
    /// Appends a receipt, idempotently by `decision_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or identifier conflict.
    fn append(&self, receipt: &Receipt) -> Result<AppendOutcome, StoreError>;

    /// Loads the receipt for a decision, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or integrity mismatch.
    fn load(&self, decision_id: &DecisionId) -> Result<Option<Receipt>, StoreError>;

    /// Lists all stored decision identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn list(&self) -> Result<Vec<DecisionId>, StoreError>;

    /// Reports whether the store is ready to serve requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot serve requests.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
