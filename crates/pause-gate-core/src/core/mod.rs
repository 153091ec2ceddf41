// crates/pause-gate-core/src/core/mod.rs
// ============================================================================
// Module: Pause Gate Core Types
// Description: Canonical Pause Gate schema and decision record structures.
// Purpose: Provide stable, serializable types for harms, gates, and receipts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Pause Gate core types define the harm model, the gate lattice, the escape
//! vector, drift findings, red-team reviews, and the receipt schema. These
//! types are the canonical source of truth for any derived surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod drift;
pub mod escape;
pub mod gate;
pub mod harm;
pub mod hashing;
pub mod identifiers;
pub mod receipt;
pub mod redteam;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use drift::DriftField;
pub use drift::DriftFinding;
pub use drift::DriftTag;
pub use escape::EscapeVector;
pub use gate::Gate;
pub use harm::EmptyCatalogError;
pub use harm::Harm;
pub use harm::HarmCatalog;
pub use harm::Impact;
pub use harm::Likelihood;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::hash_bytes;
pub use hashing::hash_canonical_json;
pub use identifiers::DecisionId;
pub use identifiers::ReceiptId;
pub use receipt::Decision;
pub use receipt::EpistemicTag;
pub use receipt::RECEIPT_SCHEMA_VERSION;
pub use receipt::Receipt;
pub use receipt::RedTeamRecord;
pub use redteam::RedTeamOutcome;
pub use redteam::RedTeamReview;
pub use time::Timestamp;
