//! Enumeration types used throughout the mission.

use serde::{Deserialize, Serialize};

use crate::constants::{TIME_CRITICAL_THRESHOLD_SECS, TIME_LOW_THRESHOLD_SECS};

/// Mission lifecycle phase. Within a session phases only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionPhase {
    /// Intro wait before gameplay starts.
    #[default]
    Starting,
    /// Gameplay: clock running, pickups spawning.
    Active,
    /// Resolution wait after the mission was won or lost.
    Ending,
    /// Session finished; reset has been requested.
    Complete,
    /// Aborted from outside. Terminal.
    Cancelled,
}

impl MissionPhase {
    /// Phases the clock never leaves on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionPhase::Complete | MissionPhase::Cancelled)
    }
}

/// How a mission left the Active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    /// Delivered count reached the target.
    Delivered,
    /// Time limit ran out first.
    TimedOut,
    /// Cancelled before resolution.
    Cancelled,
}

/// Pickup rarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    #[default]
    Standard,
    Rare,
    Unique,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Standard, PickupKind::Rare, PickupKind::Unique];

    pub fn name(self) -> &'static str {
        match self {
            PickupKind::Standard => "Standard",
            PickupKind::Rare => "Rare",
            PickupKind::Unique => "Unique",
        }
    }
}

/// What happens once a session has finished its Ending phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Start a fresh session immediately.
    #[default]
    Loop,
    /// Stay in Complete.
    Terminate,
}

/// Urgency band for the time-remaining readout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBand {
    /// More than a minute left.
    #[default]
    Normal,
    /// Between 30 and 60 seconds left.
    Low,
    /// 30 seconds or less.
    Critical,
}

impl TimeBand {
    pub fn from_remaining(remaining_secs: f64) -> Self {
        if remaining_secs > TIME_LOW_THRESHOLD_SECS {
            TimeBand::Normal
        } else if remaining_secs > TIME_CRITICAL_THRESHOLD_SECS {
            TimeBand::Low
        } else {
            TimeBand::Critical
        }
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
