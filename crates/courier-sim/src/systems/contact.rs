//! Contact detection between the agent and pickups (fixed tick).

use glam::Vec3;
use hecs::World;

use courier_core::components::Pickup;
use courier_core::types::{planar_distance, PickupId};

/// Collect ids of uncollected pickups within `trigger_radius` of the agent,
/// in id order.
pub fn run(world: &World, agent: Vec3, trigger_radius: f32, contacts: &mut Vec<PickupId>) {
    contacts.clear();
    for (_entity, (pickup, position)) in world.query::<(&Pickup, &Vec3)>().iter() {
        if !pickup.collected && planar_distance(*position, agent) <= trigger_radius {
            contacts.push(pickup.id);
        }
    }
    contacts.sort_unstable();
}
