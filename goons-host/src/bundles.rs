//! Old Tarkov Movement: swaps the animation bundle manifest from a settings flag.
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const LOG_PREFIX: &str = "[Old Tarkov Movement]";

/// Movement mod settings. Keys other than `NostalgiaMode` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MovementSettings {
    #[serde(rename = "NostalgiaMode", default)]
    pub nostalgia_mode: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovementSettings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let json = fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which animation set is active after [`apply_bundles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimationSet {
    Modern,
    Nostalgia,
}

/// Rewrite `bundles` for the selected animation set.
///
/// Modern animations ship no bundles, so the manifest is emptied; nostalgia
/// mode copies the full manifest from `true_bundles`.
///
/// # Errors
///
/// Returns an error if a manifest cannot be read or written.
pub fn apply_bundles(
    settings: &MovementSettings,
    bundles: &Path,
    true_bundles: &Path,
) -> Result<AnimationSet, BundleError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| BundleError::Io { path, source }
    };

    if settings.nostalgia_mode {
        warn!(
            "{LOG_PREFIX} Using old animations (You may encounter issues with BTR and notice differences in sprinting)"
        );
        let manifest = fs::read_to_string(true_bundles).map_err(io_err(true_bundles))?;
        fs::write(bundles, manifest).map_err(io_err(bundles))?;
        Ok(AnimationSet::Nostalgia)
    } else {
        info!("{LOG_PREFIX} Using modern animations");
        let empty = serde_json::json!({ "manifest": [] });
        let json = serde_json::to_string(&empty)?;
        fs::write(bundles, json).map_err(io_err(bundles))?;
        Ok(AnimationSet::Modern)
    }
}

/// Body for the movement mod's config route.
///
/// # Errors
///
/// Returns an error if the settings cannot be serialized.
pub fn config_response(settings: &MovementSettings) -> Result<String, BundleError> {
    Ok(serde_json::to_string(settings)?)
}
