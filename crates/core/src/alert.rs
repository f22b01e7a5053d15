//! Alert severity levels and the resolution timestamp rule.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// How urgent an alert is. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution state of an alert before a write.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionState {
    pub is_resolved: bool,
    pub resolved_at: Option<Timestamp>,
}

/// Compute the `resolved_at` value to persist.
///
/// - An explicitly supplied timestamp always wins.
/// - The first `false -> true` transition with no stored timestamp stamps `now`.
/// - Otherwise the stored value is kept; it is never cleared automatically.
///
/// New alerts pass `ResolutionState::default()` as `previous`.
pub fn resolved_at_for(
    previous: ResolutionState,
    is_resolved: bool,
    supplied: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    if supplied.is_some() {
        return supplied;
    }
    if is_resolved && !previous.is_resolved && previous.resolved_at.is_none() {
        return Some(now);
    }
    previous.resolved_at
}
