//! Boss spawn entries for the Goons on the host's location tables.
//!
//! At startup one entry is appended to every map listed in the zones file.
//! Whenever location data is served, the entry's chance is set on the map the
//! Goons currently occupy and zeroed everywhere else.
use log::{info, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::config::ZonesConfig;
use crate::constants::{
    DEFAULT_SPAWN_CHANCE_PERCENT, GOONS_BOSS_NAME, GOONS_DIFFICULTY, GOONS_ESCORT_TYPE,
    GOONS_SPAWN_MODES, GOONS_SUPPORT_TYPES, LOG_PREFIX,
};

/// Escort group spawned alongside a boss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BossSupport {
    pub boss_escort_amount: String,
    pub boss_escort_difficult: Vec<String>,
    pub boss_escort_type: String,
}

/// One entry of a map's boss spawn list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BossSpawn {
    pub boss_name: String,
    pub boss_chance: u8,
    pub boss_difficult: String,
    pub boss_escort_amount: String,
    pub boss_escort_difficult: String,
    pub boss_escort_type: String,
    pub boss_zone: String,
    pub boss_player: bool,
    #[serde(default)]
    pub delay: i32,
    #[serde(default)]
    pub depend_karma: bool,
    #[serde(default, rename = "DependKarmaPVE")]
    pub depend_karma_pve: bool,
    pub force_spawn: bool,
    pub ignore_max_bots: bool,
    pub random_time_spawn: bool,
    pub spawn_mode: Vec<String>,
    pub supports: SmallVec<[BossSupport; 2]>,
    pub time: i32,
    #[serde(default)]
    pub trigger_id: String,
    #[serde(default)]
    pub trigger_name: String,
}

impl BossSpawn {
    /// The Goons' spawn entry restricted to `zones`.
    #[must_use]
    pub fn goons(zones: &[String]) -> Self {
        let supports = GOONS_SUPPORT_TYPES
            .iter()
            .map(|escort| BossSupport {
                boss_escort_amount: "1".to_string(),
                boss_escort_difficult: vec![GOONS_DIFFICULTY.to_string()],
                boss_escort_type: (*escort).to_string(),
            })
            .collect();
        Self {
            boss_name: GOONS_BOSS_NAME.to_string(),
            boss_chance: DEFAULT_SPAWN_CHANCE_PERCENT,
            boss_difficult: GOONS_DIFFICULTY.to_string(),
            boss_escort_amount: "0".to_string(),
            boss_escort_difficult: GOONS_DIFFICULTY.to_string(),
            boss_escort_type: GOONS_ESCORT_TYPE.to_string(),
            boss_zone: zones.join(","),
            boss_player: false,
            delay: 0,
            depend_karma: false,
            depend_karma_pve: false,
            force_spawn: false,
            ignore_max_bots: true,
            random_time_spawn: true,
            spawn_mode: GOONS_SPAWN_MODES.iter().map(ToString::to_string).collect(),
            supports,
            time: -1,
            trigger_id: String::new(),
            trigger_name: String::new(),
        }
    }

    #[must_use]
    pub fn is_goons(&self) -> bool {
        self.boss_name == GOONS_BOSS_NAME
    }
}

/// Boss spawn lists keyed by location id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct LocationTables {
    pub locations: BTreeMap<String, Vec<BossSpawn>>,
}

impl LocationTables {
    /// Tables for the given maps, each with an empty spawn list.
    #[must_use]
    pub fn with_locations<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            locations: ids.into_iter().map(|id| (id.into(), Vec::new())).collect(),
        }
    }

    /// Spawn chance of the Goons entries on `location`, if it has any.
    #[must_use]
    pub fn goons_chance(&self, location: &str) -> Option<u8> {
        self.locations
            .get(location)?
            .iter()
            .find(|spawn| spawn.is_goons())
            .map(|spawn| spawn.boss_chance)
    }
}

/// Append a Goons entry to each map named in `zones`. Returns how many maps were seeded.
///
/// Maps that are not present in `tables` are skipped.
pub fn add_boss_to_maps(tables: &mut LocationTables, zones: &ZonesConfig, debug: bool) -> usize {
    let mut seeded = 0;
    for (map, map_zones) in &zones.zones {
        let Some(spawns) = tables.locations.get_mut(map) else {
            warn!("{LOG_PREFIX} Skipping map '{map}' as it is not present in the location list.");
            continue;
        };
        let spawn = BossSpawn::goons(map_zones);
        if debug {
            info!(
                "{LOG_PREFIX} Added boss '{}' to map '{map}' with zones '{}'.",
                spawn.boss_name, spawn.boss_zone
            );
        }
        spawns.push(spawn);
        seeded += 1;
    }
    seeded
}

/// Give the Goons `spawn_chance` on `selected` and 0 on every other map.
pub fn apply_selected_location(
    tables: &mut LocationTables,
    selected: &str,
    spawn_chance: u8,
    debug: bool,
) {
    for (map, spawns) in &mut tables.locations {
        for spawn in spawns.iter_mut().filter(|spawn| spawn.is_goons()) {
            let before = spawn.boss_chance;
            spawn.boss_chance = if map == selected { spawn_chance } else { 0 };
            if debug {
                info!(
                    "{LOG_PREFIX} {map}: Before Chance: {before}, After Chance: {}",
                    spawn.boss_chance
                );
            }
        }
    }
}
