// crates/pause-gate-core/src/runtime/door.rs
// ============================================================================
// Module: Pause Gate Door Validator
// Description: Escape-vector enforcement for non-trivial gates.
// Purpose: Require a concrete, action-typed alternative before proceeding.
// Dependencies: crate::core, crate::runtime::drift, serde, thiserror
// ============================================================================

//! ## Overview
//! This validator is the single place that enforces the rule that nothing
//! proceeds without a concrete alternative. At any gate above green the door
//! must be present, must not be a bare reassurance from the blocklist, and
//! must contain a verb from the action vocabulary. Green decisions are exempt.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::escape::EscapeVector;
use crate::core::gate::Gate;
use crate::runtime::drift::normalize;

// ============================================================================
// SECTION: Door Policy
// ============================================================================

/// Configuration for door validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorPolicy {
    /// Non-actionable phrases rejected as doors, in normalized form.
    pub blocklist: Vec<String>,
    /// Verbs that mark a door as action-typed, in normalized form.
    pub action_verbs: Vec<String>,
    /// Minimum word count for a door to count as a concrete action.
    pub min_door_words: usize,
}

impl Default for DoorPolicy {
    fn default() -> Self {
        Self {
            blocklist: default_blocklist(),
            action_verbs: default_action_verbs(),
            min_door_words: 2,
        }
    }
}

/// Built-in bare-reassurance blocklist.
fn default_blocklist() -> Vec<String> {
    [
        "be careful",
        "be more careful",
        "be cautious",
        "be mindful",
        "be aware",
        "be thoughtful",
        "try harder",
        "try better",
        "try more",
        "do better",
        "do more",
        "think about it",
        "think it over",
        "hope for the best",
        "just be good",
        "just be nice",
        "just be careful",
        "pay attention",
        "pay more attention",
        "keep an eye on it",
        "watch out",
        "watch carefully",
        "stay alert",
        "stay vigilant",
        "stay aware",
        "use good judgment",
        "use judgment",
        "trust the process",
        "it'll be fine",
        "it will be fine",
        "it'll be ok",
        "it'll be okay",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Built-in action vocabulary.
fn default_action_verbs() -> Vec<String> {
    [
        "delay", "verify", "narrow", "refuse", "escalate", "disclose", "defer", "consult",
        "postpone", "restrict", "redact", "pause", "wait", "limit", "review", "check", "ask",
        "confirm", "document", "notify", "split", "test", "audit", "stop", "reduce", "stage",
        "revert", "exclude",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when an escape vector fails door validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DoorError {
    /// The door is empty at a gate that requires one.
    #[error("no door provided at gate {gate}")]
    MissingDoor {
        /// Gate that required the door.
        gate: Gate,
    },
    /// The door is a bare reassurance or carries no identifiable action.
    #[error("door is not action-typed at gate {gate}: {door}")]
    NonActionableDoor {
        /// Gate that required the door.
        gate: Gate,
        /// The rejected door text.
        door: String,
    },
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the door of an escape vector against a computed gate.
///
/// Green decisions pass unconditionally, even with an empty door.
///
/// # Errors
///
/// Returns [`DoorError::MissingDoor`] when the door is empty, or
/// [`DoorError::NonActionableDoor`] when it is blocklisted, too short, or
/// carries no verb from the action vocabulary.
pub fn validate_door(
    vector: &EscapeVector,
    gate: Gate,
    policy: &DoorPolicy,
) -> Result<(), DoorError> {
    if gate == Gate::Green {
        return Ok(());
    }
    let normalized = normalize(&vector.door);
    if normalized.is_empty() {
        return Err(DoorError::MissingDoor { gate });
    }
    let non_actionable = policy.blocklist.iter().any(|phrase| phrase == &normalized)
        || normalized.split_whitespace().count() < policy.min_door_words
        || !contains_action_verb(&normalized, &policy.action_verbs);
    if non_actionable {
        return Err(DoorError::NonActionableDoor {
            gate,
            door: vector.door.clone(),
        });
    }
    Ok(())
}

/// Returns true when any word of the normalized door is an action verb.
fn contains_action_verb(normalized_door: &str, verbs: &[String]) -> bool {
    normalized_door
        .split_whitespace()
        .any(|word| verbs.iter().any(|verb| verb == word))
}
