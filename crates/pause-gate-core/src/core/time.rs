// crates/pause-gate-core/src/core/time.rs
// ============================================================================
// Module: Pause Gate Time Model
// Description: Canonical timestamp representations for decisions and reviews.
// Purpose: Provide deterministic, replayable time values across Pause Gate records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Pause Gate uses explicit time values embedded in decision contexts and
//! receipts to keep evaluation deterministic. The core engine never reads
//! wall-clock time directly; hosts must supply timestamps when they submit a
//! decision or poll a red-team review.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in Pause Gate receipts and review deadlines.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - Ordering across the two variants is undefined; a deadline and the time it
///   is compared against must use the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }

    /// Returns true when `self` is at or past `deadline`.
    ///
    /// Mismatched variants return false: a deadline expressed in a different
    /// time base than the observation can never be observed as expired.
    #[must_use]
    pub const fn has_reached(&self, deadline: &Self) -> bool {
        match (self, deadline) {
            (Self::UnixMillis(now), Self::UnixMillis(at)) => *now >= *at,
            (Self::Logical(now), Self::Logical(at)) => *now >= *at,
            _ => false,
        }
    }

    /// Renders the timestamp for the plain-text receipt block.
    ///
    /// Unix timestamps render as RFC 3339 when representable; logical values
    /// and out-of-range unix values render as their raw integer form.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::UnixMillis(millis) => {
                let nanos = i128::from(*millis).saturating_mul(1_000_000);
                OffsetDateTime::from_unix_timestamp_nanos(nanos)
                    .ok()
                    .and_then(|datetime| datetime.format(&Rfc3339).ok())
                    .unwrap_or_else(|| format!("unix_millis:{millis}"))
            }
            Self::Logical(value) => format!("logical:{value}"),
        }
    }
}
