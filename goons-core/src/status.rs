//! Read-only location status for the chat query path.
use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::RecordStorage;
use crate::clock::format_timestamp_in;
use crate::constants::MS_PER_MINUTE;
use crate::curve::rotation_chance;
use crate::error::QueryDataError;
use crate::locations::display_name;
use crate::store::RotationStateStore;

/// What the tracker bot reports about the Goons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStatus {
    /// Internal id of the current map.
    pub location_id: String,
    /// Display name, `None` for ids outside the known table.
    pub location: Option<&'static str>,
    pub minutes_since_last_seen: i64,
    pub rotation_chance_percent: f64,
    pub last_seen_display: String,
}

impl LocationStatus {
    /// Display name, or the raw id when the id is unknown.
    #[must_use]
    pub fn location_label(&self) -> &str {
        self.location.unwrap_or(self.location_id.as_str())
    }
}

/// Projects the persisted record into a [`LocationStatus`] without mutating it.
#[derive(Debug, Clone)]
pub struct LocationQueryService<S> {
    store: RotationStateStore<S>,
    interval_minutes: u32,
}

impl<S> LocationQueryService<S>
where
    S: RecordStorage,
{
    pub const fn new(store: RotationStateStore<S>, interval_minutes: u32) -> Self {
        Self {
            store,
            interval_minutes,
        }
    }

    /// Status at `now`, with the last-seen date in the host's local time zone.
    ///
    /// # Errors
    ///
    /// Returns [`QueryDataError::NoData`] when no record exists and
    /// [`QueryDataError::InvalidRecord`] when the record cannot be parsed.
    pub fn status(&self, now: i64) -> Result<LocationStatus, QueryDataError> {
        self.status_in(now, &Local)
    }

    /// [`Self::status`] with an explicit time zone for the last-seen date.
    ///
    /// # Errors
    ///
    /// See [`Self::status`].
    pub fn status_in<Tz>(&self, now: i64, tz: &Tz) -> Result<LocationStatus, QueryDataError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let record = self.store.try_read()?;
        let minutes_since_last_seen = now
            .saturating_sub(record.last_update_at)
            .div_euclid(MS_PER_MINUTE)
            .max(0);
        let rotation_chance_percent =
            rotation_chance(record.remaining_ms(now), self.interval_minutes);

        Ok(LocationStatus {
            location: display_name(&record.selected_location),
            location_id: record.selected_location,
            minutes_since_last_seen,
            rotation_chance_percent,
            last_seen_display: format_timestamp_in(record.last_update_at, tz),
        })
    }
}
