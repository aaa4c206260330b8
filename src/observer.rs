//! Throttle observer trait

use crate::{ThrottleDecision, UserId};

/// Observer trait for external observability
pub trait ThrottleObserver: Send + Sync + 'static {
    fn on_seeded(&self, user: &UserId, count: u64);
    fn on_seed_failed(&self, user: &UserId, error: &str);
    fn on_allowed(&self, user: &UserId);
    fn on_denied(&self, user: &UserId, decision: &ThrottleDecision);
    fn on_sent(&self, user: &UserId, count: u32);
}

/// No-op observer
pub struct NoOpObserver;

impl ThrottleObserver for NoOpObserver {
    fn on_seeded(&self, _user: &UserId, _count: u64) {}
    fn on_seed_failed(&self, _user: &UserId, _error: &str) {}
    fn on_allowed(&self, _user: &UserId) {}
    fn on_denied(&self, _user: &UserId, _decision: &ThrottleDecision) {}
    fn on_sent(&self, _user: &UserId, _count: u32) {}
}

/// Tracing-based observer
pub struct TracingObserver;

impl ThrottleObserver for TracingObserver {
    fn on_seeded(&self, user: &UserId, count: u64) {
        tracing::info!(user = %user, count = count, "Throttle seeded");
    }

    fn on_seed_failed(&self, user: &UserId, error: &str) {
        tracing::warn!(user = %user, error = %error, "Throttle seed failed");
    }

    fn on_allowed(&self, user: &UserId) {
        tracing::debug!(user = %user, "Notification allowed");
    }

    fn on_denied(&self, user: &UserId, decision: &ThrottleDecision) {
        tracing::debug!(user = %user, reason = %decision.reason(), "Notification denied");
    }

    fn on_sent(&self, user: &UserId, count: u32) {
        tracing::info!(user = %user, count = count, "Notification recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_observer_covers_every_hook() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let observer = TracingObserver;
        let user = UserId::from("user-1");

        observer.on_seeded(&user, 3);
        observer.on_seed_failed(&user, "connection refused");
        observer.on_allowed(&user);
        observer.on_denied(
            &user,
            &ThrottleDecision::DeniedDailyCap {
                count: 5,
                max_per_day: 5,
            },
        );
        observer.on_sent(&user, 4);
    }
}
