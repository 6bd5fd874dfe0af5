//! Mod configuration and enabled-map configuration.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_ROTATION_INTERVAL_MINUTES, DEFAULT_SPAWN_CHANCE_PERCENT, FALLBACK_LOCATIONS,
};
use crate::error::ConfigReadError;
use crate::numbers::percent_from_f64;

const fn default_rotation_interval() -> u32 {
    DEFAULT_ROTATION_INTERVAL_MINUTES
}

const fn default_spawn_chance() -> u8 {
    DEFAULT_SPAWN_CHANCE_PERCENT
}

/// Immutable mod settings handed to every component at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModConfig {
    #[serde(default = "default_rotation_interval", alias = "rotationInterval")]
    pub rotation_interval_minutes: u32,
    #[serde(default, alias = "debugLogs")]
    pub debug_logging: bool,
    /// Any JSON number is accepted and clamped to `0..=100`.
    #[serde(
        default = "default_spawn_chance",
        alias = "goonsSpawnChance",
        deserialize_with = "clamped_percent"
    )]
    pub spawn_chance_percent: u8,
}

fn clamped_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(percent_from_f64(raw))
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            rotation_interval_minutes: default_rotation_interval(),
            debug_logging: false,
            spawn_chance_percent: default_spawn_chance(),
        }
    }
}

impl ModConfig {
    /// Parse and validate configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the interval is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigReadError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the scheduler relies on.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigReadError> {
        if self.rotation_interval_minutes == 0 {
            return Err(ConfigReadError::Invalid {
                field: "rotationIntervalMinutes",
                reason: "must be at least 1 minute".to_string(),
            });
        }
        Ok(())
    }
}

/// Which maps the Goons may rotate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub enabled_maps: BTreeMap<String, bool>,
}

impl MapConfig {
    /// Parse map configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or lacks `enabledMaps`.
    pub fn from_json(json: &str) -> Result<Self, ConfigReadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Identifiers flagged enabled, in key order.
    #[must_use]
    pub fn enabled(&self) -> Vec<String> {
        self.enabled_maps
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(map, _)| map.clone())
            .collect()
    }
}

/// The set used when the enabled maps cannot be read or none are enabled.
#[must_use]
pub fn fallback_locations() -> Vec<String> {
    FALLBACK_LOCATIONS.iter().map(ToString::to_string).collect()
}

/// Spawn zones per map, as shipped in the mod's zones file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ZonesConfig {
    pub zones: BTreeMap<String, Vec<String>>,
}

impl ZonesConfig {
    /// Parse zones configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a map of zone lists.
    pub fn from_json(json: &str) -> Result<Self, ConfigReadError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = ModConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ModConfig::default());
        assert_eq!(cfg.rotation_interval_minutes, 180);
        assert_eq!(cfg.spawn_chance_percent, 30);
    }

    #[test]
    fn legacy_keys_are_accepted() {
        let cfg = ModConfig::from_json(
            r#"{ "rotationInterval": 90, "debugLogs": true, "goonsSpawnChance": 55 }"#,
        )
        .unwrap();
        assert_eq!(cfg.rotation_interval_minutes, 90);
        assert!(cfg.debug_logging);
        assert_eq!(cfg.spawn_chance_percent, 55);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = ModConfig::from_json(r#"{ "rotationIntervalMinutes": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigReadError::Invalid {
                field: "rotationIntervalMinutes",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_spawn_chance_is_clamped_and_keeps_interval() {
        let cfg =
            ModConfig::from_json(r#"{ "rotationIntervalMinutes": 60, "spawnChancePercent": 150 }"#)
                .unwrap();
        assert_eq!(cfg.rotation_interval_minutes, 60);
        assert_eq!(cfg.spawn_chance_percent, 100);

        let negative = ModConfig::from_json(r#"{ "goonsSpawnChance": -5 }"#).unwrap();
        assert_eq!(negative.spawn_chance_percent, 0);
    }

    #[test]
    fn fractional_spawn_chance_is_rounded() {
        let cfg =
            ModConfig::from_json(r#"{ "rotationIntervalMinutes": 45, "spawnChancePercent": 30.5 }"#)
                .unwrap();
        assert_eq!(cfg.rotation_interval_minutes, 45);
        assert_eq!(cfg.spawn_chance_percent, 31);
    }

    #[test]
    fn enabled_filters_disabled_maps() {
        let cfg = MapConfig::from_json(
            r#"{ "enabledMaps": { "woods": false, "bigmap": true, "shoreline": true } }"#,
        )
        .unwrap();
        assert_eq!(cfg.enabled(), vec!["bigmap", "shoreline"]);
    }

    #[test]
    fn map_config_without_enabled_maps_is_an_error() {
        assert!(MapConfig::from_json(r#"{ "maps": [] }"#).is_err());
    }

    #[test]
    fn zones_parse_as_plain_object() {
        let zones = ZonesConfig::from_json(r#"{ "woods": ["ZoneWoodCutter", "ZoneRedHouse"] }"#)
            .unwrap();
        assert_eq!(zones.zones["woods"].len(), 2);
    }
}
