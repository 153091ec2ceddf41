// crates/pause-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Pause Gate Runtime
// Description: Deterministic evaluation steps and the decision pipeline.
// Purpose: Execute classification, validation, scanning, and receipt sealing.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement every evaluation step as a pure function and
//! compose them in the decision pipeline. Any derived surface must call into
//! the same step functions to preserve determinism.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod challenge;
pub mod classifier;
pub mod door;
pub mod drift;
pub mod pipeline;
pub mod receipt;
pub mod redteam;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use challenge::ChallengeError;
pub use challenge::ChallengeResponse;
pub use challenge::challenge;
pub use classifier::classify;
pub use classifier::classify_harm;
pub use door::DoorError;
pub use door::DoorPolicy;
pub use door::validate_door;
pub use drift::DecisionInputs;
pub use drift::DriftPhrase;
pub use drift::DriftRules;
pub use drift::effective_gate;
pub use drift::forced_motion_detected;
pub use drift::normalize;
pub use drift::scan;
pub use pipeline::DecisionContext;
pub use pipeline::DecisionPipeline;
pub use pipeline::PipelineError;
pub use pipeline::PipelineOutcome;
pub use pipeline::PipelineRules;
pub use receipt::ReceiptDraft;
pub use receipt::ReceiptError;
pub use receipt::generate;
pub use receipt::validate;
pub use receipt::verify_hash;
pub use redteam::ReviewVerdict;
pub use redteam::review_verdict;
pub use redteam::run_red_team;
pub use store::InMemoryReceiptStore;
