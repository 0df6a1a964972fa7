//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::PickupKind;
use crate::types::PickupId;

/// A collectible package. Position is stored as a separate `glam::Vec3` component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub id: PickupId,
    pub kind: PickupKind,
    /// Set once the agent has touched it; further contacts are ignored.
    pub collected: bool,
}

/// Idle rotation about the vertical axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spin {
    /// Current angle in degrees, kept in [0, 360).
    pub angle_deg: f32,
    pub deg_per_sec: f32,
}

/// A collected pickup waiting out its effect window before despawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingRemoval {
    pub remaining_secs: f64,
}
