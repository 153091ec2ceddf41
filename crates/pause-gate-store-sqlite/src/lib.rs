// crates/pause-gate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Pause Gate SQLite Store Library
// Description: Durable receipt log backed by SQLite.
// Purpose: Expose the SQLite-backed ReceiptStore implementation.
// Dependencies: pause-gate-core, rusqlite
// ============================================================================

//! ## Overview
//! `pause-gate-store-sqlite` persists sealed receipts in an append-only
//! `SQLite` table keyed by decision identifier. Appends are idempotent and
//! loads verify stored content hashes, failing closed on corruption.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteJournalMode;
pub use store::SqliteReceiptStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteSyncMode;
