//! Cleanup system: despawns collected pickups once their grace window ends.

use hecs::{Entity, World};

use courier_core::components::{PendingRemoval, Pickup};
use courier_core::events::MissionEvent;
use courier_core::types::PickupId;

use crate::bus::EventBus;

/// Count down grace windows and despawn the pickups whose window is over.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    dt: f64,
    despawn_buffer: &mut Vec<(Entity, PickupId)>,
    bus: &mut EventBus,
) {
    despawn_buffer.clear();

    for (entity, (pickup, pending)) in world.query_mut::<(&Pickup, &mut PendingRemoval)>() {
        pending.remaining_secs -= dt;
        if pending.remaining_secs <= 0.0 {
            despawn_buffer.push((entity, pickup.id));
        }
    }

    despawn(world, despawn_buffer, bus);
}

/// Despawn every collected pickup still in its grace window.
pub fn clear_pending(
    world: &mut World,
    despawn_buffer: &mut Vec<(Entity, PickupId)>,
    bus: &mut EventBus,
) {
    despawn_buffer.clear();
    for (entity, (pickup, _pending)) in world.query_mut::<(&Pickup, &PendingRemoval)>() {
        despawn_buffer.push((entity, pickup.id));
    }
    despawn(world, despawn_buffer, bus);
}

fn despawn(world: &mut World, despawn_buffer: &mut Vec<(Entity, PickupId)>, bus: &mut EventBus) {
    for (entity, pickup_id) in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            log::debug!("Removed pickup {}", pickup_id);
            bus.publish(MissionEvent::PickupRemoved { pickup_id });
        }
    }
}
