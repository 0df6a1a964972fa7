//! Collection path: what happens when the agent touches a pickup.
//!
//! Inventory first, then the spawner's cooldown, then the delivery count,
//! then the pickup enters its grace window (spin stopped, further contacts
//! ignored) before the cleanup system despawns it.

use hecs::World;

use courier_core::components::{PendingRemoval, Pickup, Spin};
use courier_core::enums::AlertLevel;
use courier_core::events::MissionEvent;
use courier_core::types::PickupId;
use courier_mission::{Inventory, MissionState};

use crate::bus::EventBus;
use crate::scheduler::SpawnScheduler;
use crate::world_setup;

/// Everything a collection touches.
pub struct CollectionContext<'a> {
    pub world: &'a mut World,
    pub scheduler: &'a mut SpawnScheduler,
    pub state: &'a mut MissionState,
    pub inventory: &'a mut Option<Box<dyn Inventory>>,
    pub bus: &'a mut EventBus,
    pub grace_delay_secs: f64,
}

/// Collect a pickup. Returns false when the contact was ignored (unknown,
/// already collected, or destroyed).
pub fn collect(ctx: CollectionContext<'_>, pickup_id: PickupId) -> bool {
    let Some(entity) = world_setup::find_pickup(ctx.world, pickup_id) else {
        log::debug!("Ignoring contact with unknown pickup {}", pickup_id);
        return false;
    };

    let kind = {
        let Ok(mut pickup) = ctx.world.get::<&mut Pickup>(entity) else {
            return false;
        };
        if pickup.collected {
            log::debug!("Ignoring repeat contact with pickup {}", pickup_id);
            return false;
        }
        pickup.collected = true;
        pickup.kind
    };

    match ctx.inventory.as_mut() {
        Some(inventory) => inventory.on_package_collected(),
        None => {
            log::warn!("No inventory wired; pickup {} not stored", pickup_id);
            ctx.bus
                .alert(AlertLevel::Warning, "No inventory wired for collection");
        }
    }

    ctx.scheduler.on_collected(pickup_id);

    let delivered = ctx.state.register_delivery();
    ctx.bus.publish(MissionEvent::DeliveryRegistered {
        delivered,
        target: ctx.state.target(),
    });

    if let Ok(mut spin) = ctx.world.get::<&mut Spin>(entity) {
        spin.deg_per_sec = 0.0;
    }
    let _ = ctx.world.insert_one(
        entity,
        PendingRemoval {
            remaining_secs: ctx.grace_delay_secs,
        },
    );

    log::info!(
        "Collected {} package {} ({}/{})",
        kind.name(),
        pickup_id,
        delivered,
        ctx.state.target()
    );
    ctx.bus.publish(MissionEvent::PickupCollected { pickup_id, kind });
    true
}
