//! Centralized tuning constants for the Dynamic Goons rotation core.
//!
//! The curve exponent and the fallback values below define the observable
//! rotation behaviour. Keeping them together means the behaviour can only be
//! adjusted via code changes reviewed in version control, rather than through
//! the mod's JSON configuration.

// Logging ------------------------------------------------------------------
pub const LOG_PREFIX: &str = "[Dynamic Goons]";

// Time ---------------------------------------------------------------------
pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

// Rotation curve -----------------------------------------------------------
/// Chance returned once the scheduled update time has been reached.
pub const MAX_ROTATION_CHANCE: f64 = 100.0;
/// Smaller exponent, slower initial rise of the rotation chance.
pub const ROTATION_CURVE_EXPONENT: f64 = 0.3;
/// Upper bound (exclusive) of the per-evaluation roll.
pub const ROLL_CEILING: f64 = 100.0;

// Defaults -----------------------------------------------------------------
pub const DEFAULT_ROTATION_INTERVAL_MINUTES: u32 = 180;
pub const DEFAULT_SPAWN_CHANCE_PERCENT: u8 = 30;
pub const DEFAULT_SELECTED_LOCATION: &str = "bigmap";
/// Locations used whenever the enabled set cannot be read or is empty.
pub const FALLBACK_LOCATIONS: [&str; 4] = ["bigmap", "shoreline", "lighthouse", "woods"];

// Spawn tables -------------------------------------------------------------
pub const GOONS_BOSS_NAME: &str = "bossKnight";
pub(crate) const GOONS_ESCORT_TYPE: &str = "exUsec";
pub(crate) const GOONS_DIFFICULTY: &str = "normal";
pub(crate) const GOONS_SUPPORT_TYPES: [&str; 2] = ["followerBigPipe", "followerBirdEye"];
pub(crate) const GOONS_SPAWN_MODES: [&str; 2] = ["pve", "regular"];
