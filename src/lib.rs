//! Notification Admission Control for Marketplace Sessions
//!
//! A session-scoped throttle deciding whether a client may send another
//! notification to a user: a daily cap plus a minimum gap between sends.
//! The daily count is seeded once from the backend via an injected
//! [`NotificationCountStore`] and mirrored in memory; the throttle never
//! delivers anything itself and never fails the host feature.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! // 1. Seed a throttle when the session mounts
//! let day_start = clock::local_day_start_millis();
//! let mut throttle =
//!     NotificationThrottle::seeded(user, ThrottlePolicy::default(), &store, day_start).await;
//!
//! // 2. Gate every outbound notification through it
//! match send_with_throttle(&mut throttle, clock::now_millis(), || push.deliver(&payload))? {
//!     DispatchOutcome::Sent => {}
//!     DispatchOutcome::Throttled(decision) => {
//!         tracing::debug!(reason = %decision.reason(), "Notification suppressed");
//!     }
//! }
//! ```

#![warn(missing_docs)]

// === Core Types ===
mod policy;
mod throttle;
mod user;

// === Storage ===
mod store;

// === Time ===
pub mod clock;

// === Observability ===
mod events;
mod observer;
mod stats;

// === Helpers ===
mod dispatch;

// === Re-exports ===

// Types
pub use policy::{ThrottleDecision, ThrottlePolicy};
pub use user::UserId;

// Throttle
pub use throttle::NotificationThrottle;

// Storage
pub use store::{CountStoreError, InMemoryCountStore, NotificationCountStore};

// Events
pub use events::{SessionEvent, ThrottleEvent};

// Observability
pub use observer::{NoOpObserver, ThrottleObserver, TracingObserver};
pub use stats::{ThrottleStats, ThrottleStatsSnapshot};

// Helpers
pub use dispatch::{send_with_throttle, DispatchOutcome};
