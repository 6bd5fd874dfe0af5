//! Seedable randomness for rotation rolls and map picks.
//!
//! Each concern draws from its own stream so that, for a fixed seed, the map
//! chosen does not depend on how many rolls happened before it.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;

use crate::constants::ROLL_CEILING;

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Source of the per-evaluation roll and the map pick.
pub trait RotationRandom: Send {
    /// Uniform roll in `[0, 100)`.
    fn roll_percent(&mut self) -> f64;

    /// Uniform index in `0..len`; `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Independent roll and map streams derived from one seed.
#[derive(Debug, Clone)]
pub struct RngStreams {
    roll: CountingRng<SmallRng>,
    map: CountingRng<SmallRng>,
}

impl RngStreams {
    /// Construct the streams from a user-visible seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            roll: CountingRng::new(derive_stream_seed(seed, b"roll")),
            map: CountingRng::new(derive_stream_seed(seed, b"map")),
        }
    }

    /// Seed from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Draws performed against the roll stream.
    #[must_use]
    pub const fn roll_draws(&self) -> u64 {
        self.roll.draws()
    }

    /// Draws performed against the map stream.
    #[must_use]
    pub const fn map_draws(&self) -> u64 {
        self.map.draws()
    }
}

impl RotationRandom for RngStreams {
    fn roll_percent(&mut self) -> f64 {
        self.roll.gen_range(0.0..ROLL_CEILING)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.map.gen_range(0..len.max(1))
    }
}

/// Replays a fixed list of rolls and picks; the last value repeats.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    rolls: Vec<f64>,
    picks: Vec<usize>,
    roll_cursor: usize,
    pick_cursor: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(rolls: Vec<f64>, picks: Vec<usize>) -> Self {
        Self {
            rolls,
            picks,
            roll_cursor: 0,
            pick_cursor: 0,
        }
    }

    /// Always roll `roll` and always pick the first candidate.
    #[must_use]
    pub fn rolling(roll: f64) -> Self {
        Self::new(vec![roll], vec![0])
    }
}

impl RotationRandom for ScriptedRandom {
    fn roll_percent(&mut self) -> f64 {
        let idx = self.roll_cursor.min(self.rolls.len().saturating_sub(1));
        self.roll_cursor = self.roll_cursor.saturating_add(1);
        self.rolls.get(idx).copied().unwrap_or(0.0)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let idx = self.pick_cursor.min(self.picks.len().saturating_sub(1));
        self.pick_cursor = self.pick_cursor.saturating_add(1);
        self.picks.get(idx).copied().unwrap_or(0) % len.max(1)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so this cannot fail for an 8-byte key.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
