//! Snapshot system: queries the world and builds a complete MissionSnapshot.
//!
//! This system is read-only. It never modifies the world.

use glam::Vec3;
use hecs::World;

use courier_core::components::{Pickup, Spin};
use courier_core::events::{Alert, MissionEvent};
use courier_core::state::*;
use courier_core::types::SimTime;
use courier_mission::{MissionClock, MissionState};

use crate::scheduler::SpawnScheduler;

/// Everything the snapshot reads besides the world.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub clock: &'a MissionClock,
    pub state: &'a MissionState,
    pub scheduler: &'a SpawnScheduler,
    pub agent: Option<Vec3>,
}

/// Build a complete MissionSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    inputs: SnapshotInputs<'_>,
    events: Vec<MissionEvent>,
    alerts: Vec<Alert>,
) -> MissionSnapshot {
    let mission = inputs.state.view();

    MissionSnapshot {
        time: inputs.time,
        session: inputs.clock.session(),
        phase: inputs.clock.phase(),
        outcome: inputs.clock.outcome(),
        hud: HudView::from_mission(&mission),
        mission,
        spawner: inputs.scheduler.view(),
        pickups: build_pickups(world),
        agent: inputs.agent,
        events,
        alerts,
    }
}

/// Build PickupView list from all pickup entities, in id order.
fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Vec3, Option<&Spin>)>()
        .iter()
        .map(|(_entity, (pickup, position, spin))| PickupView {
            pickup_id: pickup.id,
            kind: pickup.kind,
            position: *position,
            spin_deg: spin.map(|s| s.angle_deg).unwrap_or_default(),
            collected: pickup.collected,
        })
        .collect();
    pickups.sort_by_key(|p| p.pickup_id);
    pickups
}
