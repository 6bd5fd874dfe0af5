//! Random choice of the next map among the enabled set.
use log::{debug, error, warn};

use crate::MapConfigSource;
use crate::config::fallback_locations;
use crate::constants::{DEFAULT_SELECTED_LOCATION, LOG_PREFIX};
use crate::rng::RotationRandom;

/// Picks the Goons' next location from freshly loaded map configuration.
#[derive(Debug, Clone)]
pub struct MapSelector<M> {
    source: M,
}

impl<M> MapSelector<M>
where
    M: MapConfigSource,
{
    pub const fn new(source: M) -> Self {
        Self { source }
    }

    /// Enabled locations, or the fallback set when none can be determined.
    ///
    /// The configuration is re-read on every call.
    #[must_use]
    pub fn enabled_locations(&self) -> Vec<String> {
        match self.source.load_map_config() {
            Ok(cfg) => {
                let enabled = cfg.enabled();
                if enabled.is_empty() {
                    warn!("{LOG_PREFIX} No maps enabled, using default maps");
                    fallback_locations()
                } else {
                    enabled
                }
            }
            Err(err) => {
                error!("{LOG_PREFIX} Error reading enabled maps file: {err}");
                fallback_locations()
            }
        }
    }

    /// Choose uniformly among enabled locations other than `excluding`.
    ///
    /// When `excluding` is the only candidate it stays eligible.
    pub fn choose<R>(&self, excluding: Option<&str>, random: &mut R) -> String
    where
        R: RotationRandom + ?Sized,
    {
        let enabled = self.enabled_locations();
        let mut candidates: Vec<&String> = enabled
            .iter()
            .filter(|map| Some(map.as_str()) != excluding)
            .collect();
        if candidates.is_empty() {
            candidates = enabled.iter().collect();
        }
        debug!("{LOG_PREFIX} Rotation candidates: {candidates:?}");
        let last = candidates.len().saturating_sub(1);
        let idx = random.pick_index(candidates.len()).min(last);
        candidates.get(idx).map_or_else(
            || DEFAULT_SELECTED_LOCATION.to_string(),
            |map| (*map).clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::error::ConfigReadError;
    use crate::rng::{RngStreams, ScriptedRandom};

    struct BrokenSource;

    struct OverreachingRandom;

    impl RotationRandom for OverreachingRandom {
        fn roll_percent(&mut self) -> f64 {
            0.0
        }

        fn pick_index(&mut self, _len: usize) -> usize {
            usize::MAX
        }
    }

    impl MapConfigSource for BrokenSource {
        type Error = ConfigReadError;

        fn load_map_config(&self) -> Result<MapConfig, Self::Error> {
            Err(ConfigReadError::Source("file not found".to_string()))
        }
    }

    fn maps(entries: &[(&str, bool)]) -> MapConfig {
        MapConfig {
            enabled_maps: entries
                .iter()
                .map(|(id, on)| ((*id).to_string(), *on))
                .collect(),
        }
    }

    #[test]
    fn single_enabled_map_is_always_chosen() {
        let selector = MapSelector::new(maps(&[("bigmap", true), ("woods", false)]));
        let mut rng = RngStreams::from_seed(3);
        for _ in 0..50 {
            assert_eq!(selector.choose(None, &mut rng), "bigmap");
        }
    }

    #[test]
    fn excluded_map_is_never_returned_when_alternatives_exist() {
        let selector = MapSelector::new(maps(&[
            ("bigmap", true),
            ("shoreline", true),
            ("woods", true),
        ]));
        let mut rng = RngStreams::from_seed(11);
        for _ in 0..200 {
            assert_ne!(selector.choose(Some("woods"), &mut rng), "woods");
        }
    }

    #[test]
    fn sole_candidate_stays_eligible_when_excluded() {
        let selector = MapSelector::new(maps(&[("lighthouse", true)]));
        let mut rng = ScriptedRandom::rolling(0.0);
        assert_eq!(selector.choose(Some("lighthouse"), &mut rng), "lighthouse");
    }

    #[test]
    fn unreadable_config_uses_fallback_set() {
        let selector = MapSelector::new(BrokenSource);
        assert_eq!(
            selector.enabled_locations(),
            vec!["bigmap", "shoreline", "lighthouse", "woods"]
        );
        let mut rng = ScriptedRandom::new(vec![0.0], vec![2]);
        assert_eq!(selector.choose(Some("bigmap"), &mut rng), "woods");
    }

    #[test]
    fn nothing_enabled_uses_fallback_set() {
        let selector = MapSelector::new(maps(&[("bigmap", false)]));
        assert_eq!(selector.enabled_locations().len(), 4);
    }

    #[test]
    fn out_of_range_pick_lands_on_last_candidate() {
        let selector = MapSelector::new(maps(&[("bigmap", true), ("woods", true)]));
        assert_eq!(selector.choose(None, &mut OverreachingRandom), "woods");
    }

    #[test]
    fn scripted_pick_selects_by_sorted_key_order() {
        let selector = MapSelector::new(maps(&[
            ("woods", true),
            ("bigmap", true),
            ("interchange", true),
        ]));
        let mut rng = ScriptedRandom::new(vec![0.0], vec![1]);
        assert_eq!(selector.choose(None, &mut rng), "interchange");
    }
}
