//! Throttle statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-session throttle counters
pub struct ThrottleStats {
    pub decisions: AtomicU64,
    pub allowed: AtomicU64,
    pub denied_daily_cap: AtomicU64,
    pub denied_interval: AtomicU64,
    pub sends_recorded: AtomicU64,
    pub seed_failures: AtomicU64,
}

impl ThrottleStats {
    pub fn new() -> Self {
        Self {
            decisions: AtomicU64::new(0),
            allowed: AtomicU64::new(0),
            denied_daily_cap: AtomicU64::new(0),
            denied_interval: AtomicU64::new(0),
            sends_recorded: AtomicU64::new(0),
            seed_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ThrottleStatsSnapshot {
        ThrottleStatsSnapshot {
            decisions: self.decisions.load(Ordering::Relaxed),
            allowed: self.allowed.load(Ordering::Relaxed),
            denied_daily_cap: self.denied_daily_cap.load(Ordering::Relaxed),
            denied_interval: self.denied_interval.load(Ordering::Relaxed),
            sends_recorded: self.sends_recorded.load(Ordering::Relaxed),
            seed_failures: self.seed_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for ThrottleStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct ThrottleStatsSnapshot {
    pub decisions: u64,
    pub allowed: u64,
    pub denied_daily_cap: u64,
    pub denied_interval: u64,
    pub sends_recorded: u64,
    pub seed_failures: u64,
}
