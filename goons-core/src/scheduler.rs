//! Rotation decisions driven by host trigger events.
//!
//! Every evaluation reads the persisted record, draws one roll and decides
//! whether the Goons move. Two triggers can force a move: the configured
//! interval differing from the one the record was written under, and the roll
//! landing at or below the current rotation chance. Either way at most one new
//! map is chosen and at most one write happens per evaluation.
use log::{error, info};
use serde::Serialize;

use crate::clock::{Clock, format_duration, format_time_of_day, format_timestamp_local};
use crate::config::ModConfig;
use crate::constants::LOG_PREFIX;
use crate::curve::rotation_chance;
use crate::record::RotationRecord;
use crate::rng::RotationRandom;
use crate::selector::MapSelector;
use crate::store::RotationStateStore;
use crate::{MapConfigSource, RecordStorage};

/// Why a rotation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RotationTrigger {
    /// The configured interval no longer matches the one on record.
    IntervalChanged { previous: u32, configured: u32 },
    /// The roll landed at or below the rotation chance.
    ChanceRoll,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RotationOutcome {
    Stayed,
    Rotated {
        from: String,
        to: String,
        trigger: RotationTrigger,
        /// `false` when the new record could not be written; the move is lost.
        persisted: bool,
    },
}

/// Everything an evaluation computed, for logging and callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub now: i64,
    pub remaining_ms: i64,
    pub chance: f64,
    pub roll: f64,
    pub outcome: RotationOutcome,
    /// The record in effect after this evaluation.
    pub record: RotationRecord,
}

impl Evaluation {
    #[must_use]
    pub const fn rotated(&self) -> bool {
        matches!(self.outcome, RotationOutcome::Rotated { .. })
    }
}

/// Decides and performs rotations of the tracked group.
#[derive(Debug)]
pub struct RotationScheduler<S, M, C, R> {
    config: ModConfig,
    store: RotationStateStore<S>,
    selector: MapSelector<M>,
    clock: C,
    random: R,
}

impl<S, M, C, R> RotationScheduler<S, M, C, R>
where
    S: RecordStorage,
    M: MapConfigSource,
    C: Clock,
    R: RotationRandom,
{
    pub const fn new(
        config: ModConfig,
        store: RotationStateStore<S>,
        selector: MapSelector<M>,
        clock: C,
        random: R,
    ) -> Self {
        Self {
            config,
            store,
            selector,
            clock,
            random,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ModConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &RotationStateStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn selector(&self) -> &MapSelector<M> {
        &self.selector
    }

    /// The randomness source, for draw instrumentation.
    #[must_use]
    pub const fn random(&self) -> &R {
        &self.random
    }

    /// Evaluate at the clock's current time.
    pub fn evaluate(&mut self) -> Evaluation {
        let now = self.clock.now_ms();
        self.evaluate_at(now)
    }

    /// Evaluate at an explicit time in epoch milliseconds.
    pub fn evaluate_at(&mut self, now: i64) -> Evaluation {
        let interval = self.config.rotation_interval_minutes;
        let record = self.store.read();
        let remaining_ms = record.remaining_ms(now);
        let chance = rotation_chance(remaining_ms, interval);
        let roll = self.random.roll_percent();

        if self.config.debug_logging {
            info!("{LOG_PREFIX} Remaining time: {remaining_ms}ms, Rotation chance: {chance}%");
        }

        let trigger = if record.last_interval_minutes != interval {
            Some(RotationTrigger::IntervalChanged {
                previous: record.last_interval_minutes,
                configured: interval,
            })
        } else if roll <= chance {
            Some(RotationTrigger::ChanceRoll)
        } else {
            None
        };

        let Some(trigger) = trigger else {
            return Evaluation {
                now,
                remaining_ms,
                chance,
                roll,
                outcome: RotationOutcome::Stayed,
                record,
            };
        };

        if self.config.debug_logging {
            match trigger {
                RotationTrigger::IntervalChanged { .. } => {
                    info!("{LOG_PREFIX} Rotation interval changed. Rotating now.");
                }
                RotationTrigger::ChanceRoll => {
                    info!("{LOG_PREFIX} Rotation triggered. Rotating now.");
                }
            }
        }

        let (outcome, record) = self.rotate(record, trigger, now);
        Evaluation {
            now,
            remaining_ms,
            chance,
            roll,
            outcome,
            record,
        }
    }

    fn rotate(
        &mut self,
        current: RotationRecord,
        trigger: RotationTrigger,
        now: i64,
    ) -> (RotationOutcome, RotationRecord) {
        let interval = self.config.rotation_interval_minutes;
        let to = self
            .selector
            .choose(Some(current.selected_location.as_str()), &mut self.random);
        let next = RotationRecord::rotated(to.clone(), now, interval);

        if self.config.debug_logging {
            info!(
                "{LOG_PREFIX} Selected Map: {to}, Update Scheduled in: {}, Remaining Time: {}, Last Rotation: {}",
                format_time_of_day(next.next_update_at),
                format_duration(next.remaining_ms(now)),
                format_timestamp_local(next.last_update_at),
            );
        }

        let persisted = match self.store.write(&next) {
            Ok(()) => {
                if self.config.debug_logging {
                    info!("{LOG_PREFIX} Rotation data saved successfully.");
                }
                true
            }
            Err(err) => {
                error!("{LOG_PREFIX} Error saving rotation data: {err}");
                false
            }
        };

        let outcome = RotationOutcome::Rotated {
            from: current.selected_location.clone(),
            to,
            trigger,
            persisted,
        };
        let record = if persisted { next } else { current };
        (outcome, record)
    }
}
