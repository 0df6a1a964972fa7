//! Authoritative mission counters and the win/lose predicates.

use courier_core::config::MissionConfig;
use courier_core::state::MissionView;

use crate::collaborators::Hud;

/// Delivered count and mission time. Mutated only through
/// [`MissionState::register_delivery`], [`MissionState::advance`] and
/// [`MissionState::reset`]. The HUD hears about every change to the count,
/// including the drop back to zero on reset.
pub struct MissionState {
    delivered: u32,
    target: u32,
    elapsed_secs: f64,
    time_limit_secs: f64,
    hud: Option<Box<dyn Hud>>,
}

impl MissionState {
    pub fn new(target: u32, time_limit_secs: f64) -> Self {
        Self {
            delivered: 0,
            target,
            elapsed_secs: 0.0,
            time_limit_secs,
            hud: None,
        }
    }

    pub fn from_config(config: &MissionConfig) -> Self {
        Self::new(config.target_packages, config.time_limit_secs)
    }

    /// Attach the HUD that receives progress updates.
    pub fn with_hud(mut self, hud: Option<Box<dyn Hud>>) -> Self {
        self.hud = hud;
        self
    }

    /// Count one delivery and push the new progress to the HUD.
    /// No upper bound: deliveries past the target are still counted.
    pub fn register_delivery(&mut self) -> u32 {
        self.delivered = self.delivered.saturating_add(1);
        match self.hud.as_mut() {
            Some(hud) => hud.set_package_progress(self.delivered, self.target),
            None => log::warn!(
                "No HUD wired; delivery {}/{} not displayed",
                self.delivered,
                self.target
            ),
        }
        self.delivered
    }

    pub fn delivery_count(&self) -> u32 {
        self.delivered
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn time_limit_secs(&self) -> f64 {
        self.time_limit_secs
    }

    /// Seconds left on the clock, never negative.
    pub fn time_remaining_secs(&self) -> f64 {
        (self.time_limit_secs - self.elapsed_secs).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.delivered >= self.target
    }

    pub fn is_failed(&self) -> bool {
        self.elapsed_secs >= self.time_limit_secs
    }

    /// Add one tick of mission time.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed_secs += dt;
    }

    /// Zero the counters for a new session. Target and limit are kept.
    pub fn reset(&mut self) {
        self.delivered = 0;
        self.elapsed_secs = 0.0;
        if let Some(hud) = self.hud.as_mut() {
            hud.set_package_progress(0, self.target);
        }
    }

    pub fn view(&self) -> MissionView {
        MissionView {
            delivered: self.delivered,
            target: self.target,
            elapsed_secs: self.elapsed_secs,
            time_limit_secs: self.time_limit_secs,
            time_remaining_secs: self.time_remaining_secs(),
        }
    }
}
