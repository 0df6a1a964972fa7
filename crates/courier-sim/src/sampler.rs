//! Uniform-disk spawn sampling with overlap rejection.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use courier_core::config::SpawnConfig;
use courier_core::types::planar_distance;

/// Disk to sample from and the spacing to keep between pickups.
#[derive(Debug, Clone, Copy)]
pub struct SpatialSampler {
    /// Disk center; only x and z are used.
    pub center: Vec3,
    pub radius: f32,
    /// Height assigned to every sampled point.
    pub height: f32,
    pub min_separation: f32,
    pub max_attempts: u32,
}

/// Result of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Vec3,
    /// Draws made, including the accepted one.
    pub attempts: u32,
    /// False when every draw overlapped and `position` is the last one drawn.
    pub accepted: bool,
}

impl SpatialSampler {
    pub fn from_config(config: &SpawnConfig) -> Self {
        Self {
            center: config.center,
            radius: config.radius,
            height: config.height,
            min_separation: config.min_separation,
            max_attempts: config.max_attempts,
        }
    }

    /// Draw up to `max_attempts` points (at least one) until one clears
    /// every occupied position. Never fails: on exhaustion the last draw is
    /// returned with `accepted = false`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, occupied: &[Vec3]) -> Sample {
        let radius = if self.radius.is_finite() {
            self.radius.max(0.0)
        } else {
            0.0
        };
        let max_attempts = self.max_attempts.max(1);

        let mut position = Vec3::new(self.center.x, self.height, self.center.z);
        for attempt in 1..=max_attempts {
            let angle: f32 = rng.gen_range(0.0..TAU);
            let distance: f32 = rng.gen_range(0.0..=radius);
            position = Vec3::new(
                self.center.x + distance * angle.cos(),
                self.height,
                self.center.z + distance * angle.sin(),
            );
            if is_position_valid(position, occupied, self.min_separation) {
                return Sample {
                    position,
                    attempts: attempt,
                    accepted: true,
                };
            }
        }

        log::warn!(
            "Could not find valid spawn position after {} attempts. Using last attempted position.",
            max_attempts
        );
        Sample {
            position,
            attempts: max_attempts,
            accepted: false,
        }
    }
}

/// True when `candidate` is at least `min_separation` from every occupied
/// position on the ground plane. The boundary is inclusive.
pub fn is_position_valid(candidate: Vec3, occupied: &[Vec3], min_separation: f32) -> bool {
    occupied
        .iter()
        .all(|&other| planar_distance(candidate, other) >= min_separation)
}
