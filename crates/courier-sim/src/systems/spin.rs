//! Idle spin of uncollected pickups.

use hecs::World;

use courier_core::components::Spin;

/// Rotate every spinning pickup. Collection zeroes the speed, freezing the angle.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, spin) in world.query_mut::<&mut Spin>() {
        spin.angle_deg = (spin.angle_deg + spin.deg_per_sec * dt as f32).rem_euclid(360.0);
    }
}
