// crates/pause-gate-core/src/lib.rs
// ============================================================================
// Module: Pause Gate Core Library
// Description: Public API surface for the Pause Gate decision engine.
// Purpose: Expose core types, interfaces, and runtime evaluation helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Pause Gate is a deterministic decision-gating engine: given a named action
//! and a catalog of identified harms, it computes a risk gate, enforces the
//! escape-vector contract, detects rating drift, runs a bounded red-team
//! sub-review at high gates, and seals an immutable audit receipt. It is a
//! pure rules evaluator; harm identification and severity judgment are caller
//! inputs, never inferred here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AppendOutcome;
pub use interfaces::ReceiptStore;
pub use interfaces::StoreError;
pub use runtime::ChallengeError;
pub use runtime::ChallengeResponse;
pub use runtime::DecisionContext;
pub use runtime::DecisionInputs;
pub use runtime::DecisionPipeline;
pub use runtime::DoorError;
pub use runtime::DoorPolicy;
pub use runtime::DriftPhrase;
pub use runtime::DriftRules;
pub use runtime::InMemoryReceiptStore;
pub use runtime::PipelineError;
pub use runtime::PipelineOutcome;
pub use runtime::PipelineRules;
pub use runtime::ReceiptDraft;
pub use runtime::ReceiptError;
pub use runtime::ReviewVerdict;
