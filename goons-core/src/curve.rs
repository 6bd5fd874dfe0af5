//! Rotation chance curve.
//!
//! The chance rises slowly while most of the interval remains and accelerates
//! towards the scheduled update time, reaching 100% once it has passed.

use crate::constants::{MAX_ROTATION_CHANCE, ROTATION_CURVE_EXPONENT};
use crate::numbers::{i64_to_f64, minutes_to_ms};

/// Rotation chance in percent for the given time until the scheduled update.
///
/// `remaining_ms <= 0` means the update is due (or overdue) and always yields
/// 100. Otherwise the chance is `100 * (1 - (remaining / interval)^0.3)`,
/// clamped to `[0, 100]`: a remaining time longer than the full interval (a
/// record written under a longer interval) reads as 0 rather than negative.
#[must_use]
pub fn rotation_chance(remaining_ms: i64, interval_minutes: u32) -> f64 {
    if remaining_ms <= 0 {
        return MAX_ROTATION_CHANCE;
    }

    let max_ms = minutes_to_ms(interval_minutes);
    if max_ms <= 0 {
        return MAX_ROTATION_CHANCE;
    }

    let factor = i64_to_f64(remaining_ms) / i64_to_f64(max_ms);
    let steep = factor.powf(ROTATION_CURVE_EXPONENT);
    let chance = MAX_ROTATION_CHANCE * (1.0 - steep);
    chance.clamp(0.0, MAX_ROTATION_CHANCE)
}
