// crates/pause-gate-core/src/runtime/drift.rs
// ============================================================================
// Module: Pause Gate Drift Scanner
// Description: Phrase-match and rating-manipulation detection over decision text.
// Purpose: Detect rationalization language and gamed gate declarations.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! The scan is a pure function of its inputs: free text is normalized
//! (lowercased, de-obfuscated, whitespace-collapsed) and matched against a
//! tagged phrase catalog, and a caller-declared gate below the computed gate
//! yields a rating-manipulation finding. Any finding escalates the effective
//! gate by exactly one step, capped at the most severe gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::drift::DriftField;
use crate::core::drift::DriftFinding;
use crate::core::drift::DriftTag;
use crate::core::gate::Gate;

// ============================================================================
// SECTION: Scan Inputs
// ============================================================================

/// Free-text decision fields subject to the drift scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionInputs {
    /// The action as named by the caller.
    pub named_action: String,
    /// The caller's justification text.
    pub justification: String,
}

// ============================================================================
// SECTION: Phrase Catalog
// ============================================================================

/// One tagged rationalization phrase.
///
/// Patterns are matched as substrings of normalized text, so they must
/// themselves be in normalized form: lowercase, single-spaced, straight
/// apostrophes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftPhrase {
    /// Normalized substring to match.
    pub pattern: String,
    /// Catalog tag for the phrase family.
    pub tag: String,
}

impl DriftPhrase {
    /// Creates a phrase entry.
    #[must_use]
    pub fn new(pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tag: tag.into(),
        }
    }
}

/// Phrase families whose presence marks forced-motion pressure.
const FORCED_MOTION_TAGS: [&str; 3] = ["forced-motion", "no-choice-claim", "urgency-pressure"];

/// Drift phrase catalog applied to decision text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftRules {
    /// Tagged phrases in match-priority order.
    pub phrases: Vec<DriftPhrase>,
}

impl Default for DriftRules {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
        }
    }
}

/// Built-in rationalization phrase catalog.
fn default_phrases() -> Vec<DriftPhrase> {
    [
        ("it's temporary", "temporary-excuse"),
        ("just temporary", "temporary-excuse"),
        ("it's targeted", "targeted-excuse"),
        ("only affects bad people", "deserving-victim"),
        ("they deserve it", "deserving-victim"),
        ("we have to", "forced-motion"),
        ("we need to", "forced-motion"),
        ("we must", "forced-motion"),
        ("there's no choice", "no-choice-claim"),
        ("no other choice", "no-choice-claim"),
        ("just following orders", "just-following-orders"),
        ("just following policy", "just-following-orders"),
        ("just following procedure", "just-following-orders"),
        ("it's legal so it's fine", "legality-as-morality"),
        ("we're not responsible", "responsibility-dodge"),
        ("just advice", "responsibility-dodge"),
        ("for the greater good", "greater-good"),
        ("we can fix it later", "reversibility-assumption"),
        ("roll it back later", "reversibility-assumption"),
        ("it's obvious", "false-clarity"),
        ("everyone knows", "false-consensus"),
        ("everybody knows", "false-consensus"),
        ("no need to check", "verification-skip"),
        ("no need to verify", "verification-skip"),
        ("no need to cite", "verification-skip"),
        ("close enough", "precision-dodge"),
        ("only one interpretation", "premature-collapse"),
        ("must act now", "urgency-pressure"),
        ("have to act now", "urgency-pressure"),
        ("no time to think", "urgency-pressure"),
        ("no time to wait", "urgency-pressure"),
        ("for your own good", "paternalism"),
        ("for their own good", "paternalism"),
    ]
    .into_iter()
    .map(|(pattern, tag)| DriftPhrase::new(pattern, tag))
    .collect()
}

// ============================================================================
// SECTION: Text Normalization
// ============================================================================

/// Normalizes text for phrase matching.
///
/// Lowercases, maps common character-substitution obfuscations back to
/// letters, converts smart quotes to straight apostrophes, strips zero-width
/// characters, treats runs of separator punctuation as spaces, and collapses
/// whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        match ch {
            '0' => mapped.push('o'),
            '1' => mapped.push('i'),
            '3' => mapped.push('e'),
            '4' => mapped.push('a'),
            '5' => mapped.push('s'),
            '7' => mapped.push('t'),
            '@' => mapped.push('a'),
            '$' => mapped.push('s'),
            '!' => mapped.push('i'),
            '\u{2018}' | '\u{2019}' => mapped.push('\''),
            '\u{201c}' | '\u{201d}' => mapped.push('"'),
            '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}' => {}
            '.' | '-' | '_' => mapped.push(ch),
            c if c.is_whitespace() => mapped.push(' '),
            c => mapped.push(c),
        }
    }
    // Runs of two or more separator characters act as word breaks; singles
    // pass through unchanged.
    let mut spaced = String::with_capacity(mapped.len());
    let mut sep_run = String::new();
    for ch in mapped.chars() {
        if matches!(ch, '.' | '-' | '_') {
            sep_run.push(ch);
            continue;
        }
        if sep_run.len() >= 2 {
            spaced.push(' ');
        } else {
            spaced.push_str(&sep_run);
        }
        sep_run.clear();
        spaced.push(ch);
    }
    if sep_run.len() < 2 {
        spaced.push_str(&sep_run);
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// SECTION: Scan
// ============================================================================

/// Scans decision inputs for drift findings.
///
/// Pure and order-preserving: identical inputs always yield the identical
/// finding sequence. Named-action phrase matches come first, then
/// justification matches, then the rating-manipulation finding when the
/// declared gate is lower severity than the computed gate.
#[must_use]
pub fn scan(
    inputs: &DecisionInputs,
    computed: Gate,
    declared: Option<Gate>,
    rules: &DriftRules,
) -> Vec<DriftFinding> {
    let mut findings = Vec::new();
    scan_field(
        &inputs.named_action,
        DriftField::NamedAction,
        rules,
        &mut findings,
    );
    scan_field(
        &inputs.justification,
        DriftField::Justification,
        rules,
        &mut findings,
    );
    if let Some(declared_gate) = declared
        && declared_gate < computed
    {
        findings.push(DriftFinding {
            tag: DriftTag::RatingManipulation,
            field: DriftField::DeclaredGate,
            excerpt: format!(
                "declared {} below computed {}",
                declared_gate.label(),
                computed.label()
            ),
        });
    }
    findings
}

/// Matches one free-text field against the phrase catalog.
fn scan_field(
    text: &str,
    field: DriftField,
    rules: &DriftRules,
    findings: &mut Vec<DriftFinding>,
) {
    let normalized = normalize(text);
    for phrase in &rules.phrases {
        if normalized.contains(phrase.pattern.as_str()) {
            findings.push(DriftFinding {
                tag: DriftTag::Phrase(phrase.tag.clone()),
                field,
                excerpt: phrase.pattern.clone(),
            });
        }
    }
}

/// Applies drift escalation to the computed gate.
///
/// Any finding escalates by exactly one step, capped at [`Gate::Black`].
#[must_use]
pub fn effective_gate(computed: Gate, findings: &[DriftFinding]) -> Gate {
    if findings.is_empty() {
        computed
    } else {
        computed.escalate()
    }
}

/// Returns true when any finding belongs to a forced-motion phrase family.
#[must_use]
pub fn forced_motion_detected(findings: &[DriftFinding]) -> bool {
    findings.iter().any(|finding| match &finding.tag {
        DriftTag::Phrase(tag) => FORCED_MOTION_TAGS.contains(&tag.as_str()),
        DriftTag::RatingManipulation | DriftTag::AuditTrailGap => false,
    })
}
