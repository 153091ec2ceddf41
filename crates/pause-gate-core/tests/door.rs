// crates/pause-gate-core/tests/door.rs
// ============================================================================
// Module: Door Validator Tests
// Description: Escape-vector door enforcement across gates and policies.
// ============================================================================

//! ## Overview
//! Validates the green exemption, the missing-door rule, the bare-reassurance
//! blocklist, and action-verb detection.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use pause_gate_core::EscapeVector;
use pause_gate_core::Gate;
use pause_gate_core::runtime::door::DoorError;
use pause_gate_core::runtime::door::DoorPolicy;
use pause_gate_core::runtime::door::validate_door;

/// Builds an escape vector with the given door.
fn vector(door: &str) -> EscapeVector {
    EscapeVector::new("stated deadline", "customer data exposure", door)
}

// ============================================================================
// SECTION: Green Exemption
// ============================================================================

/// Tests green passes even with an empty door.
#[test]
fn test_green_accepts_empty_door() {
    let policy = DoorPolicy::default();
    assert!(validate_door(&vector(""), Gate::Green, &policy).is_ok());
}

/// Tests green passes with a blocklisted door.
#[test]
fn test_green_accepts_blocklisted_door() {
    let policy = DoorPolicy::default();
    assert!(validate_door(&vector("be careful"), Gate::Green, &policy).is_ok());
}

// ============================================================================
// SECTION: Door Requirement
// ============================================================================

/// Tests an empty door fails at every gate above green.
#[test]
fn test_empty_door_fails_above_green() {
    let policy = DoorPolicy::default();
    for gate in [Gate::Yellow, Gate::Orange, Gate::Red, Gate::Black] {
        let result = validate_door(&vector("   "), gate, &policy);
        assert_eq!(result, Err(DoorError::MissingDoor { gate }));
    }
}

/// Tests a blocklisted reassurance is rejected as non-actionable.
#[test]
fn test_blocklisted_door_is_non_actionable() {
    let policy = DoorPolicy::default();
    let result = validate_door(&vector("trust the process"), Gate::Yellow, &policy);
    assert!(matches!(
        result,
        Err(DoorError::NonActionableDoor { gate: Gate::Yellow, .. })
    ));
}

/// Tests blocklist matching survives casing and extra whitespace.
#[test]
fn test_blocklist_matches_after_normalization() {
    let policy = DoorPolicy::default();
    let result = validate_door(&vector("  Trust   The Process "), Gate::Orange, &policy);
    assert!(matches!(result, Err(DoorError::NonActionableDoor { .. })));
}

/// Tests a one-word door is too short to be a concrete action.
#[test]
fn test_single_word_door_is_non_actionable() {
    let policy = DoorPolicy::default();
    let result = validate_door(&vector("pause"), Gate::Yellow, &policy);
    assert!(matches!(result, Err(DoorError::NonActionableDoor { .. })));
}

/// Tests a door without an action verb is rejected.
#[test]
fn test_door_without_action_verb_is_non_actionable() {
    let policy = DoorPolicy::default();
    let result = validate_door(&vector("more optimism about outcomes"), Gate::Yellow, &policy);
    assert!(matches!(result, Err(DoorError::NonActionableDoor { .. })));
}

/// Tests a concrete action-typed door passes at high gates.
#[test]
fn test_action_typed_door_passes() {
    let policy = DoorPolicy::default();
    let door = vector("delay the rollout and verify consent records first");
    for gate in [Gate::Yellow, Gate::Orange, Gate::Red, Gate::Black] {
        assert!(validate_door(&door, gate, &policy).is_ok());
    }
}

// ============================================================================
// SECTION: Policy Overrides
// ============================================================================

/// Tests a custom verb vocabulary is honored.
#[test]
fn test_custom_action_vocabulary() {
    let policy = DoorPolicy {
        action_verbs: vec!["quarantine".to_string()],
        ..DoorPolicy::default()
    };
    assert!(validate_door(&vector("quarantine the affected batch"), Gate::Red, &policy).is_ok());
    assert!(validate_door(&vector("verify consent records"), Gate::Red, &policy).is_err());
}

/// Tests the minimum word count is configurable.
#[test]
fn test_min_door_words_is_configurable() {
    let policy = DoorPolicy {
        min_door_words: 5,
        ..DoorPolicy::default()
    };
    let result = validate_door(&vector("verify consent records"), Gate::Yellow, &policy);
    assert!(matches!(result, Err(DoorError::NonActionableDoor { .. })));
}
