//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Round a percentage to the nearest whole number within `0..=100`.
#[must_use]
pub fn percent_from_f64(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    cast::<f64, u8>(value.clamp(0.0, 100.0).round()).unwrap_or(0)
}

/// Interval minutes expressed in milliseconds, saturating instead of overflowing.
#[must_use]
pub fn minutes_to_ms(minutes: u32) -> i64 {
    i64::from(minutes).saturating_mul(crate::constants::MS_PER_MINUTE)
}
