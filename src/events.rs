//! Session-scoped throttle events

use serde::{Deserialize, Serialize};

/// Events recorded against a throttle during one session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ThrottleEvent {
    /// Daily count seeded from the backend
    Seeded {
        /// Count returned by the store
        count: u64,
        /// Local-midnight boundary the count was taken against
        day_start_millis: u64,
    },
    /// Seeding failed; count defaulted to zero
    SeedFailed {
        /// Store error description
        reason: Box<str>,
    },
    /// An admission check allowed sending
    Allowed,
    /// An admission check hit the daily cap
    DeniedDailyCap {
        /// Notifications already counted today
        count: u32,
    },
    /// An admission check hit the minimum-interval gate
    DeniedInterval {
        /// Time since the last send (milliseconds)
        elapsed_millis: u64,
    },
    /// A delivery was recorded
    Sent {
        /// Count after the send
        count: u32,
    },
}

impl ThrottleEvent {
    /// Short tag for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Seeded { .. } => "seeded",
            Self::SeedFailed { .. } => "seed_failed",
            Self::Allowed => "allowed",
            Self::DeniedDailyCap { .. } => "denied_daily_cap",
            Self::DeniedInterval { .. } => "denied_interval",
            Self::Sent { .. } => "sent",
        }
    }
}

/// Timestamped entry in the session history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionEvent {
    /// When the event was recorded (millis since UNIX epoch)
    pub recorded_at_millis: u64,
    /// The event itself
    pub event: ThrottleEvent,
}
