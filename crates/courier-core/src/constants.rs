//! Mission constants and tuning defaults.

/// Frame tick rate used by the driver loop (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Fixed (physics) tick rate (Hz).
pub const FIXED_TICK_RATE: u32 = 50;

/// Seconds per fixed tick.
pub const FIXED_DT: f64 = 1.0 / FIXED_TICK_RATE as f64;

// --- Mission clock ---

/// Wait between session start and gameplay (seconds).
pub const START_DELAY_SECS: f64 = 3.0;

/// Wait between mission resolution and reset (seconds).
pub const END_DELAY_SECS: f64 = 3.0;

/// Packages needed to complete a mission.
pub const TARGET_PACKAGES: u32 = 10;

/// Mission time limit (seconds). Five minutes.
pub const MISSION_TIME_LIMIT_SECS: f64 = 300.0;

// --- Spawning ---

/// Seconds between spawns.
pub const SPAWN_INTERVAL_SECS: f64 = 10.0;

/// Maximum simultaneously active pickups.
pub const MAX_ACTIVE_PICKUPS: usize = 3;

/// Pickup height above the ground plane.
pub const SPAWN_HEIGHT: f32 = 1.09;

/// Radius of the spawn disk.
pub const SPAWN_RADIUS: f32 = 5.0;

/// Minimum planar distance between pickups.
pub const MIN_PICKUP_SEPARATION: f32 = 2.0;

/// Sampling attempts before accepting an overlapping position.
pub const MAX_SPAWN_ATTEMPTS: u32 = 10;

/// Pause after a collection before the spawn timer resumes (seconds).
pub const COLLECTION_COOLDOWN_SECS: f64 = 2.0;

// --- Pickups ---

/// Delay between collection and despawn, reserved for effects (seconds).
pub const PICKUP_GRACE_DELAY_SECS: f64 = 1.0;

/// Idle spin of an uncollected pickup (degrees per second).
pub const PICKUP_SPIN_DEG_PER_SEC: f32 = 50.0;

/// Planar distance at which the agent touches a pickup.
pub const PICKUP_TRIGGER_RADIUS: f32 = 0.75;

// --- HUD ---

/// Above this many seconds remaining the readout is normal.
pub const TIME_LOW_THRESHOLD_SECS: f64 = 60.0;

/// At or below this many seconds remaining the readout is critical.
pub const TIME_CRITICAL_THRESHOLD_SECS: f64 = 30.0;

/// Critical readout flash rate (toggles per second).
pub const CRITICAL_FLASH_RATE: f64 = 2.0;

// --- Agent ---

/// Forward speed of the courier agent (units per second).
pub const AGENT_SPEED: f32 = 12.0;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;
