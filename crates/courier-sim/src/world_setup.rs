//! Entity spawn factories for the mission world.

use glam::Vec3;
use hecs::{Entity, World};

use courier_core::components::{Pickup, Spin};
use courier_core::enums::PickupKind;
use courier_core::types::PickupId;

/// Spawn an uncollected, spinning pickup.
pub fn spawn_pickup(
    world: &mut World,
    id: PickupId,
    kind: PickupKind,
    position: Vec3,
    spin_deg_per_sec: f32,
) -> Entity {
    world.spawn((
        Pickup {
            id,
            kind,
            collected: false,
        },
        position,
        Spin {
            angle_deg: 0.0,
            deg_per_sec: spin_deg_per_sec,
        },
    ))
}

/// Find the entity carrying a pickup id, collected or not.
pub fn find_pickup(world: &World, id: PickupId) -> Option<Entity> {
    world
        .query::<&Pickup>()
        .iter()
        .find(|(_, pickup)| pickup.id == id)
        .map(|(entity, _)| entity)
}
