//! Time source and timestamp formatting.
use chrono::{DateTime, Local, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::constants::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Long-form date, e.g. `Monday, January 1, 2024 at 03:04 PM`.
#[must_use]
pub fn format_timestamp_in<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default();
    utc.with_timezone(tz)
        .format("%A, %B %-d, %Y at %I:%M %p")
        .to_string()
}

/// [`format_timestamp_in`] using the host's local time zone.
#[must_use]
pub fn format_timestamp_local(epoch_ms: i64) -> String {
    format_timestamp_in(epoch_ms, &Local)
}

/// Short time of day, e.g. `15:04:05`, used in debug logs.
#[must_use]
pub fn format_time_of_day(epoch_ms: i64) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default();
    utc.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Duration as `{h}h {m}m {s}s`.
#[must_use]
pub fn format_duration(ms: i64) -> String {
    let hours = ms.div_euclid(MS_PER_HOUR);
    let minutes = ms.rem_euclid(MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = ms.rem_euclid(MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let clock = FixedClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 1_500);
        clock.set(42);
        assert_eq!(clock.now_ms(), 42);
    }

    #[test]
    fn long_form_date_matches_chat_layout() {
        // 2024-01-01T15:04:00Z
        let formatted = format_timestamp_in(1_704_121_440_000, &Utc);
        assert_eq!(formatted, "Monday, January 1, 2024 at 03:04 PM");
    }

    #[test]
    fn duration_formats_hours_minutes_seconds() {
        assert_eq!(format_duration(10_800_000), "3h 0m 0s");
        assert_eq!(format_duration(3_723_000), "1h 2m 3s");
        assert_eq!(format_duration(0), "0h 0m 0s");
    }
}
