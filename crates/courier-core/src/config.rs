//! Mission configuration. All values are fixed at startup; a JSON file may
//! override any subset of the defaults.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{PickupKind, ResetPolicy};
use crate::error::ConfigError;

/// Full mission configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    /// Intro wait before gameplay (seconds).
    #[serde(default = "default_start_delay")]
    pub start_delay_secs: f64,
    /// Wait after resolution before the session resets (seconds).
    #[serde(default = "default_end_delay")]
    pub end_delay_secs: f64,
    /// Deliveries needed to complete the mission.
    #[serde(default = "default_target_packages")]
    pub target_packages: u32,
    /// Mission time limit (seconds).
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: f64,
    /// Loop into a new session or stop after the first one.
    #[serde(default)]
    pub reset_policy: ResetPolicy,
    /// RNG seed. Same seed = same pickup layout.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Pickup spawner tuning.
    #[serde(default)]
    pub spawn: SpawnConfig,
    /// Delay between collection and despawn (seconds).
    #[serde(default = "default_grace_delay")]
    pub grace_delay_secs: f64,
    /// Idle spin speed of uncollected pickups (degrees per second).
    #[serde(default = "default_spin")]
    pub pickup_spin_deg_per_sec: f32,
    /// Planar contact distance between agent and pickup.
    #[serde(default = "default_trigger_radius")]
    pub pickup_trigger_radius: f32,
}

/// Spawner tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Center of the spawn disk. Only x and z are used.
    pub center: Vec3,
    /// Fixed height of spawned pickups.
    pub height: f32,
    pub radius: f32,
    pub min_separation: f32,
    pub max_attempts: u32,
    pub interval_secs: f64,
    pub max_active: usize,
    /// Pause after a collection before the spawn timer resumes.
    pub cooldown_secs: f64,
    /// Spawn one pickup as soon as gameplay starts.
    pub spawn_on_start: bool,
    /// Kinds to choose from, uniformly. Empty disables spawning.
    pub kinds: Vec<PickupKind>,
}

fn default_start_delay() -> f64 {
    START_DELAY_SECS
}
fn default_end_delay() -> f64 {
    END_DELAY_SECS
}
fn default_target_packages() -> u32 {
    TARGET_PACKAGES
}
fn default_time_limit() -> f64 {
    MISSION_TIME_LIMIT_SECS
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_grace_delay() -> f64 {
    PICKUP_GRACE_DELAY_SECS
}
fn default_spin() -> f32 {
    PICKUP_SPIN_DEG_PER_SEC
}
fn default_trigger_radius() -> f32 {
    PICKUP_TRIGGER_RADIUS
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            start_delay_secs: default_start_delay(),
            end_delay_secs: default_end_delay(),
            target_packages: default_target_packages(),
            time_limit_secs: default_time_limit(),
            reset_policy: ResetPolicy::default(),
            seed: default_seed(),
            spawn: SpawnConfig::default(),
            grace_delay_secs: default_grace_delay(),
            pickup_spin_deg_per_sec: default_spin(),
            pickup_trigger_radius: default_trigger_radius(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            height: SPAWN_HEIGHT,
            radius: SPAWN_RADIUS,
            min_separation: MIN_PICKUP_SEPARATION,
            max_attempts: MAX_SPAWN_ATTEMPTS,
            interval_secs: SPAWN_INTERVAL_SECS,
            max_active: MAX_ACTIVE_PICKUPS,
            cooldown_secs: COLLECTION_COOLDOWN_SECS,
            spawn_on_start: true,
            kinds: PickupKind::ALL.to_vec(),
        }
    }
}

impl MissionConfig {
    /// Load and validate a config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: MissionConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the mission cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("start_delay_secs", self.start_delay_secs)?;
        non_negative("end_delay_secs", self.end_delay_secs)?;
        non_negative("time_limit_secs", self.time_limit_secs)?;
        non_negative("grace_delay_secs", self.grace_delay_secs)?;
        non_negative("pickup_spin_deg_per_sec", self.pickup_spin_deg_per_sec as f64)?;
        non_negative("pickup_trigger_radius", self.pickup_trigger_radius as f64)?;
        self.spawn.validate()
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.center.is_finite() {
            return Err(ConfigError::Invalid {
                field: "spawn.center",
                reason: format!("must be finite, got {}", self.center),
            });
        }
        if !self.height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "spawn.height",
                reason: format!("must be finite, got {}", self.height),
            });
        }
        non_negative("spawn.radius", self.radius as f64)?;
        non_negative("spawn.min_separation", self.min_separation as f64)?;
        non_negative("spawn.interval_secs", self.interval_secs)?;
        non_negative("spawn.cooldown_secs", self.cooldown_secs)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "spawn.max_attempts",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite, non-negative number, got {value}"),
        })
    }
}
