// crates/pause-gate-core/tests/drift.rs
// ============================================================================
// Module: Drift Scanner Tests
// Description: Phrase matching, normalization, and rating-manipulation checks.
// ============================================================================

//! ## Overview
//! Validates phrase-catalog matching over normalized text, declared-gate
//! manipulation detection, one-step escalation, and scan idempotence.

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

use pause_gate_core::DriftField;
use pause_gate_core::DriftTag;
use pause_gate_core::Gate;
use pause_gate_core::runtime::drift::DecisionInputs;
use pause_gate_core::runtime::drift::DriftRules;
use pause_gate_core::runtime::drift::effective_gate;
use pause_gate_core::runtime::drift::forced_motion_detected;
use pause_gate_core::runtime::drift::normalize;
use pause_gate_core::runtime::drift::scan;

/// Builds scan inputs from two text fields.
fn inputs(named_action: &str, justification: &str) -> DecisionInputs {
    DecisionInputs {
        named_action: named_action.to_string(),
        justification: justification.to_string(),
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Tests lowercase and whitespace collapse.
#[test]
fn test_normalize_collapses_whitespace() {
    assert_eq!(normalize("  We   Have\tTo  "), "we have to");
}

/// Tests common character-substitution obfuscations are mapped back.
#[test]
fn test_normalize_maps_obfuscated_characters() {
    assert_eq!(normalize("cl0se en0ugh"), "close enough");
    assert_eq!(normalize("w3 h4ve to"), "we have to");
}

/// Tests smart quotes become straight apostrophes.
#[test]
fn test_normalize_straightens_smart_quotes() {
    assert_eq!(normalize("it\u{2019}s obvious"), "it's obvious");
}

/// Tests separator runs act as word breaks while singles survive.
#[test]
fn test_normalize_separator_runs_break_words() {
    assert_eq!(normalize("close__enough"), "close enough");
    assert_eq!(normalize("close...enough"), "close enough");
    assert_eq!(normalize("v1.2"), "vi.2");
}

/// Tests zero-width characters are stripped.
#[test]
fn test_normalize_strips_zero_width() {
    assert_eq!(normalize("we\u{200b} have to"), "we have to");
}

// ============================================================================
// SECTION: Phrase Matching
// ============================================================================

/// Tests a rationalization phrase in the justification is found.
#[test]
fn test_phrase_match_in_justification() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("ship the release", "it's temporary, we'll revisit later"),
        Gate::Yellow,
        None,
        &rules,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].tag, DriftTag::Phrase("temporary-excuse".to_string()));
    assert_eq!(findings[0].field, DriftField::Justification);
}

/// Tests obfuscated phrases still match after normalization.
#[test]
fn test_obfuscated_phrase_still_matches() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("ship the release", "n0 need t0 check with legal"),
        Gate::Yellow,
        None,
        &rules,
    );
    assert!(
        findings
            .iter()
            .any(|finding| finding.tag == DriftTag::Phrase("verification-skip".to_string()))
    );
}

/// Tests named-action findings come before justification findings.
#[test]
fn test_findings_order_action_before_justification() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("we have to ship today", "for the greater good"),
        Gate::Yellow,
        None,
        &rules,
    );
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].field, DriftField::NamedAction);
    assert_eq!(findings[1].field, DriftField::Justification);
}

/// Tests clean inputs yield no findings.
#[test]
fn test_clean_inputs_yield_no_findings() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("publish the quarterly report", "figures were audited and signed off"),
        Gate::Yellow,
        None,
        &rules,
    );
    assert!(findings.is_empty());
}

// ============================================================================
// SECTION: Rating Manipulation
// ============================================================================

/// Tests a declared gate below the computed gate is a finding and the
/// effective gate escalates one step.
#[test]
fn test_declared_below_computed_is_manipulation() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("publish the report", "figures were audited"),
        Gate::Orange,
        Some(Gate::Yellow),
        &rules,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].tag, DriftTag::RatingManipulation);
    assert_eq!(findings[0].field, DriftField::DeclaredGate);
    assert_eq!(effective_gate(Gate::Orange, &findings), Gate::Red);
}

/// Tests a declared gate equal to the computed gate is not a finding.
#[test]
fn test_declared_equal_is_not_manipulation() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("publish the report", "figures were audited"),
        Gate::Orange,
        Some(Gate::Orange),
        &rules,
    );
    assert!(findings.is_empty());
}

/// Tests a declared gate above the computed gate is not a finding.
#[test]
fn test_declared_above_is_not_manipulation() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("publish the report", "figures were audited"),
        Gate::Yellow,
        Some(Gate::Red),
        &rules,
    );
    assert!(findings.is_empty());
}

// ============================================================================
// SECTION: Escalation and Idempotence
// ============================================================================

/// Tests escalation is exactly one step and caps at black.
#[test]
fn test_escalation_is_one_step_capped() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("we have to act", "deadline pressure"),
        Gate::Black,
        None,
        &rules,
    );
    assert!(!findings.is_empty());
    assert_eq!(effective_gate(Gate::Black, &findings), Gate::Black);
    assert_eq!(effective_gate(Gate::Green, &findings), Gate::Yellow);
}

/// Tests no findings leave the computed gate unchanged.
#[test]
fn test_no_findings_no_escalation() {
    assert_eq!(effective_gate(Gate::Orange, &[]), Gate::Orange);
}

/// Tests the scan is idempotent and order-preserving.
#[test]
fn test_scan_is_idempotent() {
    let rules = DriftRules::default();
    let input = inputs(
        "we have to migrate tonight",
        "there's no choice, everyone knows the old system is failing",
    );
    let first = scan(&input, Gate::Orange, Some(Gate::Green), &rules);
    let second = scan(&input, Gate::Orange, Some(Gate::Green), &rules);
    assert_eq!(first, second);
    assert!(first.len() >= 3);
}

// ============================================================================
// SECTION: Forced Motion
// ============================================================================

/// Tests forced-motion phrase families set the flag.
#[test]
fn test_forced_motion_detected() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("we have to ship", "no time to think"),
        Gate::Yellow,
        None,
        &rules,
    );
    assert!(forced_motion_detected(&findings));
}

/// Tests non-pressure findings do not set the forced-motion flag.
#[test]
fn test_non_pressure_findings_are_not_forced_motion() {
    let rules = DriftRules::default();
    let findings = scan(
        &inputs("ship the release", "close enough for the demo"),
        Gate::Yellow,
        Some(Gate::Green),
        &rules,
    );
    assert!(!findings.is_empty());
    assert!(!forced_motion_detected(&findings));
}
