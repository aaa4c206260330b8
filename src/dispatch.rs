//! Dispatch helper tying admission to delivery

use crate::{NotificationThrottle, ThrottleDecision};

/// Outcome of a throttled dispatch attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Delivered and recorded against the throttle
    Sent,
    /// Admission denied; nothing was delivered
    Throttled(ThrottleDecision),
}

impl DispatchOutcome {
    /// Check if the notification went out
    pub fn was_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Run one admission-checked delivery.
///
/// Checks the throttle, invokes `deliver` only when allowed, and records the
/// send only after delivery succeeded. Delivery errors propagate unchanged
/// and leave the throttle state untouched, so the caller may retry later.
///
/// ```rust,ignore
/// match send_with_throttle(&mut throttle, clock::now_millis(), || push.deliver(&payload))? {
///     DispatchOutcome::Sent => {}
///     DispatchOutcome::Throttled(decision) => {
///         tracing::debug!(reason = %decision.reason(), "Notification suppressed");
///     }
/// }
/// ```
pub fn send_with_throttle<E>(
    throttle: &mut NotificationThrottle,
    now_millis: u64,
    deliver: impl FnOnce() -> Result<(), E>,
) -> Result<DispatchOutcome, E> {
    let decision = throttle.decide(now_millis);
    throttle.note_decision(&decision, now_millis);

    if !decision.is_allowed() {
        return Ok(DispatchOutcome::Throttled(decision));
    }

    deliver()?;
    throttle.record_sent(now_millis);
    Ok(DispatchOutcome::Sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ThrottlePolicy, UserId};

    const HOUR: u64 = 60 * 60 * 1000;

    fn throttle() -> NotificationThrottle {
        NotificationThrottle::new(UserId::from("user-1"), ThrottlePolicy::default())
    }

    #[test]
    fn test_sent_and_recorded() {
        let mut throttle = throttle();

        let outcome: Result<_, ()> = send_with_throttle(&mut throttle, 0, || Ok(()));
        assert_eq!(outcome.unwrap(), DispatchOutcome::Sent);
        assert_eq!(throttle.count(), 1);
        assert_eq!(throttle.last_sent_at_millis(), Some(0));
    }

    #[test]
    fn test_delivery_error_leaves_state_untouched() {
        let mut throttle = throttle();

        let outcome = send_with_throttle(&mut throttle, 0, || Err("push gateway down"));
        assert_eq!(outcome.unwrap_err(), "push gateway down");
        assert_eq!(throttle.count(), 0);
        assert!(throttle.last_sent_at_millis().is_none());
    }

    #[test]
    fn test_throttled_skips_delivery() {
        let mut throttle = throttle();
        throttle.record_sent(0);

        let mut delivered = false;
        let outcome: Result<_, ()> = send_with_throttle(&mut throttle, HOUR, || {
            delivered = true;
            Ok(())
        });

        assert!(!outcome.unwrap().was_sent());
        assert!(!delivered);
        assert_eq!(throttle.count(), 1);
    }

    #[test]
    fn test_decisions_land_in_history() {
        let mut throttle = throttle();

        let _: Result<_, ()> = send_with_throttle(&mut throttle, 0, || Ok(()));
        let _: Result<_, ()> = send_with_throttle(&mut throttle, HOUR, || Ok(()));

        let types: Vec<_> = throttle
            .history()
            .iter()
            .map(|e| e.event.event_type())
            .collect();
        assert_eq!(types, vec!["allowed", "sent", "denied_interval"]);
    }
}
