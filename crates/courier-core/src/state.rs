//! Mission snapshot: the complete visible state handed to the HUD each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, MissionEvent};
use crate::types::{PickupId, SimTime};

/// Complete mission state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub time: SimTime,
    pub session: u32,
    pub phase: MissionPhase,
    pub outcome: Option<MissionOutcome>,
    pub mission: MissionView,
    pub hud: HudView,
    pub spawner: SpawnerView,
    pub pickups: Vec<PickupView>,
    pub agent: Option<Vec3>,
    pub events: Vec<MissionEvent>,
    pub alerts: Vec<Alert>,
}

/// Mission counters, as read by the HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MissionView {
    pub delivered: u32,
    pub target: u32,
    pub elapsed_secs: f64,
    pub time_limit_secs: f64,
    pub time_remaining_secs: f64,
}

/// Pre-formatted HUD readouts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    /// e.g. "5/10 Packages"
    pub progress_text: String,
    /// Time remaining as "MM:SS".
    pub time_text: String,
    pub time_band: TimeBand,
}

/// Spawner status for display and debugging.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnerView {
    pub spawning: bool,
    pub active: usize,
    pub max_active: usize,
    pub spawn_timer_secs: f64,
    pub cooldown_remaining_secs: f64,
}

/// A pickup on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub pickup_id: PickupId,
    pub kind: PickupKind,
    pub position: Vec3,
    /// Current idle rotation; frozen once collected.
    pub spin_deg: f32,
    pub collected: bool,
}

impl HudView {
    pub fn from_mission(mission: &MissionView) -> Self {
        Self {
            progress_text: format_progress(mission.delivered, mission.target),
            time_text: format_clock(mission.time_remaining_secs),
            time_band: TimeBand::from_remaining(mission.time_remaining_secs),
        }
    }
}

/// "{delivered}/{target} Packages"
pub fn format_progress(delivered: u32, target: u32) -> String {
    format!("{delivered}/{target} Packages")
}

/// Format seconds as MM:SS, flooring both fields. Negative input reads 00:00.
pub fn format_clock(secs: f64) -> String {
    let secs = secs.max(0.0);
    let mins = (secs / 60.0).floor() as u32;
    let rem = (secs % 60.0).floor() as u32;
    format!("{:02}:{:02}", mins, rem)
}
