//! Commands sent from gameplay and the driver to the mission engine.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::PickupId;

/// All inputs the engine accepts from outside the simulation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionCommand {
    // --- Gameplay ---
    /// The agent touched a pickup (reported by the external collision layer).
    CollectPickup { pickup_id: PickupId },
    /// Latest agent position, used by the built-in contact check.
    MoveAgent { position: Vec3 },

    // --- Spawner control ---
    /// Resume spawner ticking.
    StartSpawning,
    /// Freeze spawner ticking. Existing pickups stay.
    StopSpawning,
    /// Despawn every pickup immediately.
    ClearAllPackages,

    // --- Mission control ---
    /// Abort the current session.
    Cancel,
}
