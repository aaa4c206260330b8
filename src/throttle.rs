//! Session-scoped notification admission control

use crate::{
    clock, NoOpObserver, NotificationCountStore, SessionEvent, ThrottleDecision, ThrottleEvent,
    ThrottleObserver, ThrottlePolicy, ThrottleStats, UserId,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Client-side admission control for outbound notifications to one user.
///
/// One instance lives per active user session. The daily count is seeded
/// once from the backend at construction and mirrored in memory afterwards;
/// nothing is written back, the sending side records its own deliveries.
/// Two independent gates apply: a daily cap and a minimum interval since
/// the last send of this session. Either gate blocks on its own.
///
/// This is advisory admission control, not a safety mechanism: it never
/// errors, and actors writing to the backend directly are not prevented.
pub struct NotificationThrottle {
    user: UserId,
    policy: ThrottlePolicy,
    count: u32,
    last_sent_at_millis: Option<u64>,
    events: Vec<SessionEvent>,
    stats: Arc<ThrottleStats>,
    observer: Arc<dyn ThrottleObserver>,
}

impl NotificationThrottle {
    /// Unseeded throttle; the session counter starts at zero
    pub fn new(user: UserId, policy: ThrottlePolicy) -> Self {
        Self {
            user,
            policy,
            count: 0,
            last_sent_at_millis: None,
            events: Vec::new(),
            stats: Arc::new(ThrottleStats::new()),
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Throttle with its daily count seeded from the backend.
    ///
    /// `day_start_millis` is the local midnight captured at construction
    /// (see [`clock::local_day_start_millis`]); it is not re-evaluated if
    /// the session crosses midnight. Store errors are logged and treated as
    /// zero already sent today - seeding never fails the host feature.
    pub async fn seeded(
        user: UserId,
        policy: ThrottlePolicy,
        store: &dyn NotificationCountStore,
        day_start_millis: u64,
    ) -> Self {
        Self::seeded_with_observer(user, policy, store, day_start_millis, Arc::new(NoOpObserver))
            .await
    }

    /// Same as [`seeded`](Self::seeded) with the observer attached before
    /// seeding, so the seed outcome reaches it
    pub async fn seeded_with_observer(
        user: UserId,
        policy: ThrottlePolicy,
        store: &dyn NotificationCountStore,
        day_start_millis: u64,
        observer: Arc<dyn ThrottleObserver>,
    ) -> Self {
        let mut throttle = Self::new(user, policy).with_observer(observer);
        let now = clock::now_millis();

        match store.count_since(&throttle.user, day_start_millis).await {
            Ok(count) => {
                throttle.count = count.min(u32::MAX as u64) as u32;
                tracing::debug!(
                    user = %throttle.user,
                    count = count,
                    day_start_millis = day_start_millis,
                    "Throttle seeded from store"
                );
                throttle.push_event(
                    ThrottleEvent::Seeded {
                        count,
                        day_start_millis,
                    },
                    now,
                );
                throttle.observer.on_seeded(&throttle.user, count);
            }
            Err(error) => {
                throttle.stats.seed_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    user = %throttle.user,
                    error = %error,
                    "Count seed failed, assuming zero sent today"
                );
                throttle.push_event(
                    ThrottleEvent::SeedFailed {
                        reason: error.to_string().into(),
                    },
                    now,
                );
                throttle
                    .observer
                    .on_seed_failed(&throttle.user, &error.to_string());
            }
        }

        throttle
    }

    /// Replace the observer
    pub fn with_observer(mut self, observer: Arc<dyn ThrottleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Check whether a notification may be sent at `now_millis`.
    ///
    /// Pure with respect to throttle state; only counters, the observer and
    /// diagnostic logging are touched.
    pub fn decide(&self, now_millis: u64) -> ThrottleDecision {
        self.stats.decisions.fetch_add(1, Ordering::Relaxed);

        if self.count >= self.policy.max_per_day {
            self.stats.denied_daily_cap.fetch_add(1, Ordering::Relaxed);
            let decision = ThrottleDecision::DeniedDailyCap {
                count: self.count,
                max_per_day: self.policy.max_per_day,
            };
            tracing::debug!(
                user = %self.user,
                count = self.count,
                "Daily notification cap reached"
            );
            self.observer.on_denied(&self.user, &decision);
            return decision;
        }

        if let Some(last) = self.last_sent_at_millis {
            let elapsed = now_millis.saturating_sub(last);
            // Inclusive boundary: exactly the minimum interval still blocks
            if elapsed <= self.policy.min_interval_millis {
                self.stats.denied_interval.fetch_add(1, Ordering::Relaxed);
                let decision = ThrottleDecision::DeniedInterval {
                    elapsed_millis: elapsed,
                    retry_after_millis: self.policy.min_interval_millis.saturating_sub(elapsed),
                };
                tracing::debug!(
                    user = %self.user,
                    elapsed_millis = elapsed,
                    "Minimum interval since last notification not elapsed"
                );
                self.observer.on_denied(&self.user, &decision);
                return decision;
            }
        }

        self.stats.allowed.fetch_add(1, Ordering::Relaxed);
        self.observer.on_allowed(&self.user);
        ThrottleDecision::Allowed
    }

    /// Convenience over [`decide`](Self::decide)
    pub fn can_send(&self, now_millis: u64) -> bool {
        self.decide(now_millis).is_allowed()
    }

    /// Record a successfully delivered notification.
    ///
    /// The caller dispatches the notification itself and calls this exactly
    /// once per delivery, after it succeeded.
    pub fn record_sent(&mut self, now_millis: u64) {
        self.last_sent_at_millis = Some(now_millis);
        self.count = self.count.saturating_add(1);
        self.stats.sends_recorded.fetch_add(1, Ordering::Relaxed);
        tracing::info!(user = %self.user, count = self.count, "Notification send recorded");
        self.push_event(ThrottleEvent::Sent { count: self.count }, now_millis);
        self.observer.on_sent(&self.user, self.count);
    }

    /// The user this throttle belongs to
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Notifications counted against today
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Timestamp of the last send this session, if any
    pub fn last_sent_at_millis(&self) -> Option<u64> {
        self.last_sent_at_millis
    }

    /// The policy in force
    pub fn policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    /// Session event history
    pub fn history(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Shared counters for this throttle
    pub fn stats(&self) -> &Arc<ThrottleStats> {
        &self.stats
    }

    pub(crate) fn note_decision(&mut self, decision: &ThrottleDecision, now_millis: u64) {
        let event = match decision {
            ThrottleDecision::Allowed => ThrottleEvent::Allowed,
            ThrottleDecision::DeniedDailyCap { count, .. } => {
                ThrottleEvent::DeniedDailyCap { count: *count }
            }
            ThrottleDecision::DeniedInterval { elapsed_millis, .. } => {
                ThrottleEvent::DeniedInterval {
                    elapsed_millis: *elapsed_millis,
                }
            }
        };
        self.push_event(event, now_millis);
    }

    fn push_event(&mut self, event: ThrottleEvent, recorded_at_millis: u64) {
        self.events.push(SessionEvent {
            recorded_at_millis,
            event,
        });
    }
}
