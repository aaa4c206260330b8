//! Throttle policy and admission decisions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-session notification limits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottlePolicy {
    /// Maximum notifications per calendar day
    pub max_per_day: u32,
    /// Minimum gap between two sends (milliseconds)
    pub min_interval_millis: u64,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            max_per_day: 5,
            min_interval_millis: 2 * 60 * 60 * 1000,
        }
    }
}

impl ThrottlePolicy {
    /// Create a policy with an explicit cap and minimum interval
    pub fn new(max_per_day: u32, min_interval: Duration) -> Self {
        Self {
            max_per_day,
            min_interval_millis: min_interval.as_millis() as u64,
        }
    }
}

/// Outcome of an admission check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrottleDecision {
    /// Sending is allowed
    Allowed,
    /// Daily cap reached; blocked until the next seeded day
    DeniedDailyCap {
        /// Notifications already counted today
        count: u32,
        /// The cap in force
        max_per_day: u32,
    },
    /// Minimum interval since the last send has not elapsed
    DeniedInterval {
        /// Time since the last send (milliseconds)
        elapsed_millis: u64,
        /// Remaining wait before the interval gate opens (milliseconds)
        retry_after_millis: u64,
    },
}

impl ThrottleDecision {
    /// Check if sending was allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Remaining wait for interval denials, `None` otherwise
    pub fn retry_after_millis(&self) -> Option<u64> {
        match self {
            Self::DeniedInterval {
                retry_after_millis, ..
            } => Some(*retry_after_millis),
            _ => None,
        }
    }

    /// Short tag for logging
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::DeniedDailyCap { .. } => "daily_cap",
            Self::DeniedInterval { .. } => "min_interval",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ThrottlePolicy::default();

        assert_eq!(policy.max_per_day, 5);
        assert_eq!(policy.min_interval_millis, 7_200_000);
    }

    #[test]
    fn test_decision_predicates() {
        assert!(ThrottleDecision::Allowed.is_allowed());
        assert_eq!(ThrottleDecision::Allowed.retry_after_millis(), None);

        let denied = ThrottleDecision::DeniedInterval {
            elapsed_millis: 1_000,
            retry_after_millis: 7_199_000,
        };
        assert!(!denied.is_allowed());
        assert_eq!(denied.retry_after_millis(), Some(7_199_000));
        assert_eq!(denied.reason(), "min_interval");
    }
}
