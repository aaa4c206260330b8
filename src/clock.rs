//! Wall-clock helpers
//!
//! All throttle state is kept as milliseconds since the UNIX epoch. The day
//! boundary is the *local* midnight of the client clock, captured once when a
//! seeded throttle is constructed and never re-evaluated during the session.

use chrono::{DateTime, Local, TimeZone};

/// Current time in milliseconds since UNIX epoch
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Milliseconds since epoch of the most recent local midnight
pub fn local_day_start_millis() -> u64 {
    day_start_millis(Local::now())
}

/// Local midnight of the calendar day containing `at`
pub fn day_start_millis(at: DateTime<Local>) -> u64 {
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| at.timezone().from_local_datetime(&midnight).earliest())
        .map(|dt| dt.timestamp_millis().max(0) as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_day_start_at_or_before_now() {
        let now = Local::now();
        let start = day_start_millis(now);
        let now_ms = now.timestamp_millis().max(0) as u64;

        assert!(start <= now_ms);
        // A local day is at most 25h around DST transitions
        assert!(now_ms - start < 25 * 60 * 60 * 1000);
    }

    #[test]
    fn test_day_start_is_midnight() {
        let start = local_day_start_millis();
        let resolved = Local
            .timestamp_millis_opt(start as i64)
            .single()
            .expect("seeded day start resolves to a local instant");

        assert_eq!(resolved.hour(), 0);
        assert_eq!(resolved.minute(), 0);
        assert_eq!(resolved.second(), 0);
    }
}
