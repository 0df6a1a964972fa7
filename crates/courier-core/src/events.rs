//! Events emitted by the engine for the HUD, effects, and logging.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::PickupId;

/// Everything observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionEvent {
    /// The mission clock changed phase.
    PhaseChanged {
        session: u32,
        from: MissionPhase,
        to: MissionPhase,
    },
    /// The mission left Active.
    MissionResolved {
        session: u32,
        outcome: MissionOutcome,
        delivered: u32,
        elapsed_secs: f64,
    },
    /// A pickup appeared. `overlapping` is set when sampling gave up.
    PickupSpawned {
        pickup_id: PickupId,
        kind: PickupKind,
        position: Vec3,
        overlapping: bool,
    },
    /// The agent collected a pickup; its effect window has started.
    PickupCollected { pickup_id: PickupId, kind: PickupKind },
    /// A pickup entity was destroyed.
    PickupRemoved { pickup_id: PickupId },
    /// Delivered count changed.
    DeliveryRegistered { delivered: u32, target: u32 },
    /// The reset collaborator was invoked.
    SessionReset { session: u32 },
}

/// Diagnostic surfaced to the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
