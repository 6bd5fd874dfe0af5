//! Dynamic Goons rotation core
//!
//! Platform-agnostic logic for moving the Goons between maps: the rotation
//! chance curve, the persisted rotation record, map selection, the scheduler
//! that ties them together, and the read-only status behind the tracker bot.
//! Host specifics (files, routes, the clock) are reached through the traits below.

pub mod clock;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod locations;
pub mod numbers;
pub mod record;
pub mod rng;
pub mod scheduler;
pub mod selector;
pub mod spawns;
pub mod status;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{MapConfig, ModConfig, ZonesConfig};
pub use curve::rotation_chance;
pub use error::{ConfigReadError, QueryDataError, StateError};
pub use locations::display_name;
pub use record::RotationRecord;
pub use rng::{RngStreams, RotationRandom, ScriptedRandom};
pub use scheduler::{Evaluation, RotationOutcome, RotationScheduler, RotationTrigger};
pub use selector::MapSelector;
pub use spawns::{BossSpawn, LocationTables, add_boss_to_maps, apply_selected_location};
pub use status::{LocationQueryService, LocationStatus};
pub use store::{MemoryStorage, RotationStateStore};
pub use tracker::{ChatBotInfo, ChatCommand, GoonsTracker};

/// Trait for abstracting persistence of the rotation record.
/// Platform-specific implementations should provide this
pub trait RecordStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the raw record text, `None` if nothing has been saved yet
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_record(&self) -> Result<Option<String>, Self::Error>;

    /// Replace the stored record text
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_record(&self, contents: &str) -> Result<(), Self::Error>;
}

/// Trait for abstracting where the enabled-map configuration comes from.
pub trait MapConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the current map configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_map_config(&self) -> Result<MapConfig, Self::Error>;
}

impl MapConfigSource for MapConfig {
    type Error = std::convert::Infallible;

    fn load_map_config(&self) -> Result<MapConfig, Self::Error> {
        Ok(self.clone())
    }
}

/// Build the store, selector and scheduler for one mod instance.
pub fn build_scheduler<S, M, C, R>(
    config: ModConfig,
    storage: S,
    maps: M,
    clock: C,
    random: R,
) -> RotationScheduler<S, M, C, R>
where
    S: RecordStorage,
    M: MapConfigSource,
    C: Clock,
    R: RotationRandom,
{
    RotationScheduler::new(
        config,
        RotationStateStore::new(storage),
        MapSelector::new(maps),
        clock,
        random,
    )
}
