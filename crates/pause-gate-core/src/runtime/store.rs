// crates/pause-gate-core/src/runtime/store.rs
// ============================================================================
// Module: Pause Gate In-Memory Store
// Description: Simple in-memory receipt store for tests and embedding.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`ReceiptStore`]
//! for tests and embedded hosts. It honors the idempotent-append contract but
//! offers no durability.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::identifiers::DecisionId;
use crate::core::receipt::Receipt;
use crate::interfaces::AppendOutcome;
use crate::interfaces::ReceiptStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory receipt store for tests and embedded hosts.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReceiptStore {
    /// Receipt map protected by a mutex, keyed by decision identifier.
    receipts: Arc<Mutex<BTreeMap<DecisionId, Receipt>>>,
}

impl InMemoryReceiptStore {
    /// Creates a new in-memory receipt store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            receipts: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn append(&self, receipt: &Receipt) -> Result<AppendOutcome, StoreError> {
        let mut guard = self
            .receipts
            .lock()
            .map_err(|_| StoreError::Store("receipt store mutex poisoned".to_string()))?;
        match guard.get(&receipt.decision_id) {
            Some(existing) if existing == receipt => Ok(AppendOutcome::Duplicate),
            Some(_) => Err(StoreError::Invalid(receipt.decision_id.clone())),
            None => {
                guard.insert(receipt.decision_id.clone(), receipt.clone());
                Ok(AppendOutcome::Appended)
            }
        }
    }

    fn load(&self, decision_id: &DecisionId) -> Result<Option<Receipt>, StoreError> {
        let guard = self
            .receipts
            .lock()
            .map_err(|_| StoreError::Store("receipt store mutex poisoned".to_string()))?;
        Ok(guard.get(decision_id).cloned())
    }

    fn list(&self) -> Result<Vec<DecisionId>, StoreError> {
        let guard = self
            .receipts
            .lock()
            .map_err(|_| StoreError::Store("receipt store mutex poisoned".to_string()))?;
        Ok(guard.keys().cloned().collect())
    }
}
