//! The single persisted rotation record.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ROTATION_INTERVAL_MINUTES, DEFAULT_SELECTED_LOCATION};
use crate::numbers::minutes_to_ms;

/// Where the Goons are and when they last moved.
///
/// Timestamps are epoch milliseconds. The legacy key names written by earlier
/// releases of the mod are accepted on read; writes always use the current
/// names in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationRecord {
    #[serde(alias = "selectedMap")]
    pub selected_location: String,
    #[serde(alias = "nextUpdateTime")]
    pub next_update_at: i64,
    #[serde(alias = "lastUpdateTime")]
    pub last_update_at: i64,
    #[serde(alias = "lastRotationInterval")]
    pub last_interval_minutes: u32,
}

impl Default for RotationRecord {
    fn default() -> Self {
        Self {
            selected_location: DEFAULT_SELECTED_LOCATION.to_string(),
            next_update_at: 0,
            last_update_at: 0,
            last_interval_minutes: DEFAULT_ROTATION_INTERVAL_MINUTES,
        }
    }
}

impl RotationRecord {
    /// Record describing a move to `location` at `now` under `interval_minutes`.
    #[must_use]
    pub fn rotated(location: impl Into<String>, now: i64, interval_minutes: u32) -> Self {
        Self {
            selected_location: location.into(),
            next_update_at: now.saturating_add(minutes_to_ms(interval_minutes)),
            last_update_at: now,
            last_interval_minutes: interval_minutes,
        }
    }

    /// Milliseconds until the scheduled update; negative once overdue.
    #[must_use]
    pub const fn remaining_ms(&self, now: i64) -> i64 {
        self.next_update_at.saturating_sub(now)
    }

    /// Parse a record from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a structurally valid record.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_first_run_record() {
        let record = RotationRecord::default();
        assert_eq!(record.selected_location, "bigmap");
        assert_eq!(record.next_update_at, 0);
        assert_eq!(record.last_update_at, 0);
        assert_eq!(record.last_interval_minutes, 180);
    }

    #[test]
    fn rotated_schedules_next_update_one_interval_out() {
        let record = RotationRecord::rotated("woods", 1_000, 60);
        assert_eq!(record.last_update_at, 1_000);
        assert_eq!(record.next_update_at, 1_000 + 3_600_000);
        assert!(record.next_update_at >= record.last_update_at);
        assert_eq!(record.remaining_ms(1_000), 3_600_000);
    }

    #[test]
    fn pretty_json_uses_four_space_indent_and_stable_keys() {
        let json = RotationRecord::rotated("shoreline", 5, 1)
            .to_pretty_json()
            .unwrap();
        assert_eq!(
            json,
            "{\n    \"selectedLocation\": \"shoreline\",\n    \"nextUpdateAt\": 60005,\n    \"lastUpdateAt\": 5,\n    \"lastIntervalMinutes\": 1\n}"
        );
    }

    #[test]
    fn legacy_key_names_are_accepted() {
        let json = r#"{
            "nextUpdateTime": 1733000000000,
            "selectedMap": "lighthouse",
            "lastRotationInterval": 120,
            "lastUpdateTime": 1732992800000
        }"#;
        let record = RotationRecord::from_json(json).unwrap();
        assert_eq!(record.selected_location, "lighthouse");
        assert_eq!(record.next_update_at, 1_733_000_000_000);
        assert_eq!(record.last_update_at, 1_732_992_800_000);
        assert_eq!(record.last_interval_minutes, 120);
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let json = r#"{
            "selectedLocation": "woods",
            "nextUpdateAt": 0,
            "lastUpdateAt": "yesterday",
            "lastIntervalMinutes": 180
        }"#;
        assert!(RotationRecord::from_json(json).is_err());
    }
}
