// crates/pause-gate-config/src/config.rs
// ============================================================================
// Module: Pause Gate Rule Configuration
// Description: Rule catalog loading and validation for Pause Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: pause-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Rule catalogs are loaded from a TOML file with strict size and value
//! limits. Every list is bounded, every entry length-capped, and the
//! red-team deadline is range-checked. Missing sections fall back to the
//! built-in catalogs; invalid sections fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use pause_gate_core::runtime::door::DoorPolicy;
use pause_gate_core::runtime::drift::DriftPhrase;
use pause_gate_core::runtime::drift::DriftRules;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "pause-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "PAUSE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum number of drift phrases.
pub(crate) const MAX_DRIFT_PHRASES: usize = 512;
/// Maximum length of a drift phrase pattern.
pub(crate) const MAX_PHRASE_LENGTH: usize = 128;
/// Maximum length of a drift phrase tag.
pub(crate) const MAX_TAG_LENGTH: usize = 64;
/// Maximum number of door blocklist entries.
pub(crate) const MAX_BLOCKLIST_ENTRIES: usize = 256;
/// Maximum length of a door blocklist entry.
pub(crate) const MAX_BLOCKLIST_ENTRY_LENGTH: usize = 128;
/// Maximum number of action verbs.
pub(crate) const MAX_ACTION_VERBS: usize = 256;
/// Maximum length of an action verb.
pub(crate) const MAX_ACTION_VERB_LENGTH: usize = 32;
/// Maximum minimum-door-word requirement.
pub(crate) const MAX_MIN_DOOR_WORDS: usize = 16;
/// Maximum number of rejection categories.
pub(crate) const MAX_REJECTION_CATEGORIES: usize = 64;
/// Maximum length of a rejection category.
pub(crate) const MAX_REJECTION_CATEGORY_LENGTH: usize = 128;
/// Default red-team review deadline in milliseconds.
pub(crate) const DEFAULT_REVIEW_DEADLINE_MS: u64 = 24 * 60 * 60 * 1_000;
/// Minimum allowed red-team review deadline in milliseconds.
pub(crate) const MIN_REVIEW_DEADLINE_MS: u64 = 60_000;
/// Maximum allowed red-team review deadline in milliseconds.
pub(crate) const MAX_REVIEW_DEADLINE_MS: u64 = 30 * 24 * 60 * 60 * 1_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating rule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Door validation catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Non-actionable phrases rejected as doors.
    #[serde(default = "default_blocklist")]
    pub blocklist: Vec<String>,
    /// Verbs that mark a door as action-typed.
    #[serde(default = "default_action_verbs")]
    pub action_verbs: Vec<String>,
    /// Minimum word count for a concrete door.
    #[serde(default = "default_min_door_words")]
    pub min_door_words: usize,
}

impl Default for DoorConfig {
    fn default() -> Self {
        let policy = DoorPolicy::default();
        Self {
            blocklist: policy.blocklist,
            action_verbs: policy.action_verbs,
            min_door_words: policy.min_door_words,
        }
    }
}

/// Built-in door blocklist.
fn default_blocklist() -> Vec<String> {
    DoorPolicy::default().blocklist
}

/// Built-in action vocabulary.
fn default_action_verbs() -> Vec<String> {
    DoorPolicy::default().action_verbs
}

/// Built-in minimum door word count.
const fn default_min_door_words() -> usize {
    2
}

/// One drift phrase entry in configuration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftPhraseConfig {
    /// Normalized substring to match.
    pub pattern: String,
    /// Catalog tag for the phrase family.
    pub tag: String,
}

/// Drift phrase catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Tagged phrases in match-priority order.
    #[serde(default = "default_drift_phrases")]
    pub phrases: Vec<DriftPhraseConfig>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            phrases: default_drift_phrases(),
        }
    }
}

/// Built-in drift phrase catalog.
fn default_drift_phrases() -> Vec<DriftPhraseConfig> {
    DriftRules::default()
        .phrases
        .into_iter()
        .map(|phrase| DriftPhraseConfig {
            pattern: phrase.pattern,
            tag: phrase.tag,
        })
        .collect()
}

/// Red-team review configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedTeamConfig {
    /// Default review deadline in milliseconds past submission.
    #[serde(default = "default_review_deadline_ms")]
    pub default_deadline_ms: u64,
}

impl Default for RedTeamConfig {
    fn default() -> Self {
        Self {
            default_deadline_ms: DEFAULT_REVIEW_DEADLINE_MS,
        }
    }
}

/// Built-in review deadline.
const fn default_review_deadline_ms() -> u64 {
    DEFAULT_REVIEW_DEADLINE_MS
}

/// Complete rule catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Door validation catalogs.
    #[serde(default)]
    pub door: DoorConfig,
    /// Drift phrase catalog.
    #[serde(default)]
    pub drift: DriftConfig,
    /// Red-team review settings.
    #[serde(default)]
    pub red_team: RedTeamConfig,
    /// Non-negotiable categories that force the most severe gate.
    #[serde(default = "default_rejection_categories")]
    pub rejection_categories: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            door: DoorConfig::default(),
            drift: DriftConfig::default(),
            red_team: RedTeamConfig::default(),
            rejection_categories: default_rejection_categories(),
        }
    }
}

/// Built-in absolute-rejection categories.
fn default_rejection_categories() -> Vec<String> {
    [
        "fascism",
        "genocide",
        "slavery",
        "non-consensual authoritarian control",
        "systemic dehumanization of a group",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl RuleConfig {
    /// Loads rule configuration from a path, the environment override, or
    /// the default filename.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = match path {
            Some(explicit) => explicit.to_path_buf(),
            None => env::var(CONFIG_ENV_VAR)
                .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from),
        };
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid(
                "config file exceeds size limit".to_string(),
            ));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::load_from_str(content)
    }

    /// Parses and validates rule configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::Invalid`] when any catalog violates its limits.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid(
                "config content exceeds size limit".to_string(),
            ));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every catalog against its limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_list(
            &self.door.blocklist,
            "door.blocklist",
            MAX_BLOCKLIST_ENTRIES,
            MAX_BLOCKLIST_ENTRY_LENGTH,
        )?;
        validate_list(
            &self.door.action_verbs,
            "door.action_verbs",
            MAX_ACTION_VERBS,
            MAX_ACTION_VERB_LENGTH,
        )?;
        if self.door.action_verbs.is_empty() {
            return Err(ConfigError::Invalid(
                "door.action_verbs must not be empty".to_string(),
            ));
        }
        if self.door.min_door_words == 0 || self.door.min_door_words > MAX_MIN_DOOR_WORDS {
            return Err(ConfigError::Invalid(format!(
                "door.min_door_words must be between 1 and {MAX_MIN_DOOR_WORDS}"
            )));
        }
        if self.drift.phrases.len() > MAX_DRIFT_PHRASES {
            return Err(ConfigError::Invalid("too many drift phrases".to_string()));
        }
        for phrase in &self.drift.phrases {
            if phrase.pattern.trim().is_empty() || phrase.pattern.len() > MAX_PHRASE_LENGTH {
                return Err(ConfigError::Invalid(
                    "drift phrase pattern is empty or too long".to_string(),
                ));
            }
            if phrase.tag.trim().is_empty() || phrase.tag.len() > MAX_TAG_LENGTH {
                return Err(ConfigError::Invalid(
                    "drift phrase tag is empty or too long".to_string(),
                ));
            }
        }
        if self.red_team.default_deadline_ms < MIN_REVIEW_DEADLINE_MS
            || self.red_team.default_deadline_ms > MAX_REVIEW_DEADLINE_MS
        {
            return Err(ConfigError::Invalid(format!(
                "red_team.default_deadline_ms must be between {MIN_REVIEW_DEADLINE_MS} and {MAX_REVIEW_DEADLINE_MS}"
            )));
        }
        validate_list(
            &self.rejection_categories,
            "rejection_categories",
            MAX_REJECTION_CATEGORIES,
            MAX_REJECTION_CATEGORY_LENGTH,
        )?;
        Ok(())
    }

    /// Builds the core door policy from this configuration.
    #[must_use]
    pub fn door_policy(&self) -> DoorPolicy {
        DoorPolicy {
            blocklist: self.door.blocklist.clone(),
            action_verbs: self.door.action_verbs.clone(),
            min_door_words: self.door.min_door_words,
        }
    }

    /// Builds the core drift rules from this configuration.
    #[must_use]
    pub fn drift_rules(&self) -> DriftRules {
        DriftRules {
            phrases: self
                .drift
                .phrases
                .iter()
                .map(|phrase| DriftPhrase::new(phrase.pattern.clone(), phrase.tag.clone()))
                .collect(),
        }
    }

    /// Returns true when a category string is absolutely rejected.
    #[must_use]
    pub fn is_rejection_category(&self, category: &str) -> bool {
        let needle = category.trim().to_lowercase();
        self.rejection_categories
            .iter()
            .any(|entry| entry.to_lowercase() == needle)
    }
}

/// Checks a string list against count and length limits.
fn validate_list(
    entries: &[String],
    name: &str,
    max_entries: usize,
    max_length: usize,
) -> Result<(), ConfigError> {
    if entries.len() > max_entries {
        return Err(ConfigError::Invalid(format!("too many entries in {name}")));
    }
    for entry in entries {
        if entry.trim().is_empty() || entry.len() > max_length {
            return Err(ConfigError::Invalid(format!(
                "entry in {name} is empty or too long"
            )));
        }
    }
    Ok(())
}
