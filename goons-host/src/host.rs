//! Binds the rotation core to the host's routes and chat bot.
//!
//! Every entry point takes the same async mutex, so a host that fires the
//! location and match-end callbacks concurrently still sees one
//! read-modify-write of the rotation record at a time.
use std::sync::Arc;

use goons_core::constants::LOG_PREFIX;
use goons_core::locations::known_locations;
use goons_core::{
    ChatBotInfo, Clock, Evaluation, GoonsTracker, LocationQueryService, LocationStatus,
    LocationTables, ModConfig, QueryDataError, RngStreams, RotationScheduler, RotationStateStore,
    add_boss_to_maps, apply_selected_location, build_scheduler,
};
use log::{debug, info};
use tokio::sync::Mutex;

use crate::bundles::{MovementSettings, config_response};
use crate::storage::{JsonFileStorage, MapConfigFile, ModPaths, load_mod_config, load_zones};

pub const LOCATIONS_ROUTE: &str = "/client/locations";
pub const MATCH_END_ROUTE: &str = "/client/match/local/end";
pub const MOVEMENT_CONFIG_ROUTE: &str = "/OldTarkovMovement/GetConfig";

type HostScheduler = RotationScheduler<JsonFileStorage, MapConfigFile, Arc<dyn Clock>, RngStreams>;

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no handler registered for {0}")]
    UnknownRoute(String),
    #[error("movement settings unavailable: {0}")]
    MovementSettings(#[from] crate::bundles::BundleError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

struct HostState {
    scheduler: HostScheduler,
    tables: LocationTables,
}

/// The two mods as the server sees them.
pub struct ModHost {
    paths: ModPaths,
    config: ModConfig,
    clock: Arc<dyn Clock>,
    tracker: GoonsTracker<JsonFileStorage>,
    state: Mutex<HostState>,
}

impl ModHost {
    /// Load configuration from `paths` and wire up the components.
    pub fn new(paths: ModPaths, clock: Arc<dyn Clock>, random: RngStreams) -> Self {
        let config = load_mod_config(&paths.config());
        let storage = JsonFileStorage::new(paths.rotation_data());
        let tracker = GoonsTracker::new(LocationQueryService::new(
            RotationStateStore::new(storage.clone()),
            config.rotation_interval_minutes,
        ));
        let scheduler = build_scheduler(
            config.clone(),
            storage,
            MapConfigFile::new(paths.map_config()),
            Arc::clone(&clock),
            random,
        );
        Self {
            paths,
            config,
            clock,
            tracker,
            state: Mutex::new(HostState {
                scheduler,
                tables: LocationTables::with_locations(known_locations()),
            }),
        }
    }

    pub const fn config(&self) -> &ModConfig {
        &self.config
    }

    pub fn bot_info(&self) -> &ChatBotInfo {
        self.tracker.info()
    }

    pub fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Seed the Goons into the spawn tables, then run the startup evaluation.
    pub async fn post_db_load(&self) -> Evaluation {
        let zones = load_zones(&self.paths.zones());
        let mut state = self.state.lock().await;
        let seeded = add_boss_to_maps(&mut state.tables, &zones, self.config.debug_logging);
        info!("{LOG_PREFIX} Seeded spawn entries on {seeded} maps");
        let now = self.clock.now_ms();
        state.scheduler.evaluate_at(now)
    }

    /// Location data is about to be served: maybe rotate, then project the spawn chances.
    pub async fn on_location_data_requested(&self, now: i64) -> Evaluation {
        let mut state = self.state.lock().await;
        let eval = state.scheduler.evaluate_at(now);
        apply_selected_location(
            &mut state.tables,
            &eval.record.selected_location,
            self.config.spawn_chance_percent,
            self.config.debug_logging,
        );
        eval
    }

    /// A raid ended: maybe rotate.
    pub async fn on_match_ended(&self, now: i64) -> Evaluation {
        let mut state = self.state.lock().await;
        state.scheduler.evaluate_at(now)
    }

    /// Reply from the tracker bot.
    pub async fn on_chat_command(&self, text: &str) -> String {
        let _guard = self.state.lock().await;
        self.tracker.handle_message(text, self.clock.now_ms())
    }

    /// Structured status, as shown by the tracker bot.
    ///
    /// # Errors
    ///
    /// Returns an error when there is no readable rotation record.
    pub async fn status(&self) -> Result<LocationStatus, QueryDataError> {
        let _guard = self.state.lock().await;
        let query = LocationQueryService::new(
            RotationStateStore::new(JsonFileStorage::new(self.paths.rotation_data())),
            self.config.rotation_interval_minutes,
        );
        query.status(self.clock.now_ms())
    }

    /// Draws taken so far from the roll and map streams.
    pub async fn rng_draws(&self) -> (u64, u64) {
        let state = self.state.lock().await;
        let random = state.scheduler.random();
        (random.roll_draws(), random.map_draws())
    }

    /// Current spawn tables.
    pub async fn tables(&self) -> LocationTables {
        self.state.lock().await.tables.clone()
    }

    /// Dispatch a static route, returning the response body.
    ///
    /// # Errors
    ///
    /// Returns an error for unregistered routes or unserializable responses.
    pub async fn handle_route(&self, url: &str) -> Result<String, RouteError> {
        let now = self.clock.now_ms();
        debug!("{LOG_PREFIX} Handling route {url} at {now}");
        match url {
            LOCATIONS_ROUTE => {
                self.on_location_data_requested(now).await;
                let tables = self.tables().await;
                Ok(serde_json::to_string(&tables)?)
            }
            MATCH_END_ROUTE => {
                let eval = self.on_match_ended(now).await;
                Ok(serde_json::to_string(&eval)?)
            }
            MOVEMENT_CONFIG_ROUTE => {
                let settings = MovementSettings::load(&self.paths.movement_settings())?;
                Ok(config_response(&settings)?)
            }
            other => Err(RouteError::UnknownRoute(other.to_string())),
        }
    }
}
