//! The courier agent: its package inventory and the autopilot that walks it
//! to the nearest pickup.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use courier_core::enums::MissionPhase;
use courier_core::state::{MissionSnapshot, PickupView};
use courier_core::types::planar;
use courier_mission::Inventory;

/// Inventory collaborator. Clones share the same package count.
#[derive(Debug, Clone, Default)]
pub struct Courier {
    stored: Rc<Cell<u32>>,
}

impl Courier {
    pub fn packages_stored(&self) -> u32 {
        self.stored.get()
    }

    /// Drop everything carried (scene reload).
    pub fn unload(&self) {
        self.stored.set(0);
    }
}

impl Inventory for Courier {
    fn on_package_collected(&mut self) {
        self.stored.set(self.stored.get() + 1);
        log::debug!(
            "Courier picked up a package ({} carried); playing pickup animation",
            self.stored.get()
        );
    }
}

/// Steers the agent across the ground plane toward the closest uncollected
/// pickup. Controls are only live while the mission is Active.
#[derive(Debug, Clone)]
pub struct Autopilot {
    home: Vec3,
    position: Vec3,
    speed: f32,
}

impl Autopilot {
    pub fn new(home: Vec3, speed: f32) -> Self {
        Self {
            home,
            position: home,
            speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Back to the starting point.
    pub fn return_home(&mut self) {
        self.position = self.home;
    }

    /// Move for `dt` seconds using the given view of the field. Returns the new position.
    pub fn steer(&mut self, snapshot: &MissionSnapshot, dt: f64) -> Vec3 {
        if snapshot.phase != MissionPhase::Active {
            return self.position;
        }
        let Some(target) = nearest_pickup(&snapshot.pickups, self.position) else {
            return self.position;
        };

        let step = self.speed * dt as f32;
        let delta = (planar(target) - planar(self.position)).clamp_length_max(step);
        self.position += Vec3::new(delta.x, 0.0, delta.y);
        self.position
    }
}

fn nearest_pickup(pickups: &[PickupView], from: Vec3) -> Option<Vec3> {
    let here = planar(from);
    pickups
        .iter()
        .filter(|p| !p.collected)
        .map(|p| p.position)
        .min_by(|a, b| {
            planar(*a)
                .distance_squared(here)
                .total_cmp(&planar(*b).distance_squared(here))
        })
}
