// crates/pause-gate-config/src/lib.rs
// ============================================================================
// Module: Pause Gate Config Library
// Description: Canonical rule configuration model and validation.
// Purpose: Single source of truth for pause-gate.toml semantics.
// Dependencies: pause-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `pause-gate-config` defines the rule catalogs the engine evaluates with:
//! the door blocklist and action vocabulary, the drift phrase catalog,
//! red-team deadline defaults, and the absolute-rejection categories.
//! Validation is strict and fail-closed; an invalid catalog never degrades
//! into a permissive one.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
