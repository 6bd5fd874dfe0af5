//! File-backed implementations of the core's storage and config traits.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use goons_core::config::fallback_locations;
use goons_core::constants::LOG_PREFIX;
use goons_core::{ConfigReadError, MapConfig, MapConfigSource, ModConfig, RecordStorage, ZonesConfig};
use log::error;

/// Where each of the mod's files lives inside its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModPaths {
    pub root: PathBuf,
}

impl ModPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config(&self) -> PathBuf {
        self.root.join("config").join("config.json")
    }

    pub fn map_config(&self) -> PathBuf {
        self.root.join("config").join("mapConfig.json")
    }

    pub fn movement_settings(&self) -> PathBuf {
        self.root.join("config").join("settings.json")
    }

    pub fn zones(&self) -> PathBuf {
        self.root.join("db").join("mapZones.json")
    }

    pub fn rotation_data(&self) -> PathBuf {
        self.root.join("db").join("rotationData.json")
    }

    pub fn bundles(&self) -> PathBuf {
        self.root.join("bundles.json")
    }

    pub fn true_bundles(&self) -> PathBuf {
        self.root.join("true_bundles.json")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rotation record kept as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> FileStorageError {
        FileStorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStorage for JsonFileStorage {
    type Error = FileStorageError;

    fn load_record(&self) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save_record(&self, contents: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        // Write beside the target and rename so readers never see a partial file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))
    }
}

/// Enabled-map configuration re-read from disk on every load.
#[derive(Debug, Clone)]
pub struct MapConfigFile {
    path: PathBuf,
}

impl MapConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MapConfigSource for MapConfigFile {
    type Error = ConfigReadError;

    fn load_map_config(&self) -> Result<MapConfig, Self::Error> {
        let json = read_source(&self.path)?;
        MapConfig::from_json(&json)
    }
}

fn read_source(path: &Path) -> Result<String, ConfigReadError> {
    fs::read_to_string(path)
        .map_err(|err| ConfigReadError::Source(format!("{}: {err}", path.display())))
}

/// Mod configuration, or defaults when the file is missing or invalid.
pub fn load_mod_config(path: &Path) -> ModConfig {
    match read_source(path).and_then(|json| ModConfig::from_json(&json)) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{LOG_PREFIX} Error loading config, using defaults: {err}");
            ModConfig::default()
        }
    }
}

/// Spawn zones, or none when the file is missing or invalid.
pub fn load_zones(path: &Path) -> ZonesConfig {
    match read_source(path).and_then(|json| ZonesConfig::from_json(&json)) {
        Ok(zones) => zones,
        Err(err) => {
            error!("{LOG_PREFIX} Error loading zones config: {err}");
            ZonesConfig::default()
        }
    }
}

/// Default contents for a fresh map config: the fallback maps enabled.
pub fn default_map_config() -> MapConfig {
    MapConfig {
        enabled_maps: fallback_locations().into_iter().map(|id| (id, true)).collect(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_dir;
    use super::*;
    use goons_core::{RotationRecord, RotationStateStore};

    #[test]
    fn missing_file_reads_as_none() {
        let storage = JsonFileStorage::new(temp_dir("missing").join("db/rotationData.json"));
        assert!(storage.load_record().unwrap().is_none());
    }

    #[test]
    fn record_roundtrips_through_file() {
        let path = temp_dir("roundtrip").join("db/rotationData.json");
        let store = RotationStateStore::new(JsonFileStorage::new(&path));
        let record = RotationRecord::rotated("interchange", 1_000, 90);
        store.write(&record).unwrap();
        assert_eq!(store.try_read().unwrap(), record);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"selectedLocation\": \"interchange\""));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn map_config_file_reads_enabled_maps() {
        let dir = temp_dir("maps");
        let path = dir.join("mapConfig.json");
        fs::write(&path, r#"{ "enabledMaps": { "bigmap": true, "woods": false } }"#).unwrap();
        let cfg = MapConfigFile::new(&path).load_map_config().unwrap();
        assert_eq!(cfg.enabled(), vec!["bigmap"]);
        assert!(MapConfigFile::new(dir.join("absent.json")).load_map_config().is_err());
    }

    #[test]
    fn invalid_mod_config_falls_back_to_defaults() {
        let dir = temp_dir("cfg");
        let path = dir.join("config.json");
        fs::write(&path, r#"{ "rotationIntervalMinutes": 0 }"#).unwrap();
        assert_eq!(load_mod_config(&path), ModConfig::default());
        assert_eq!(load_mod_config(&dir.join("absent.json")), ModConfig::default());
    }

    #[test]
    fn oversized_spawn_chance_keeps_configured_interval() {
        let dir = temp_dir("cfg-clamp");
        let path = dir.join("config.json");
        fs::write(
            &path,
            r#"{ "rotationIntervalMinutes": 60, "spawnChancePercent": 150 }"#,
        )
        .unwrap();
        let cfg = load_mod_config(&path);
        assert_eq!(cfg.rotation_interval_minutes, 60);
        assert_eq!(cfg.spawn_chance_percent, 100);
    }

    #[test]
    fn paths_follow_mod_layout() {
        let paths = ModPaths::new("/mods/dynamic-goons");
        assert!(paths.rotation_data().ends_with("db/rotationData.json"));
        assert!(paths.map_config().ends_with("config/mapConfig.json"));
        assert!(paths.zones().ends_with("db/mapZones.json"));
    }
}
