//! Pickup spawn scheduler: decides when and where new pickups appear.
//!
//! The scheduler owns the set of live, uncollected pickups. Collection moves
//! a pickup out of the set (into its grace window) and starts a cooldown
//! during which the spawn timer does not accrue.

use std::collections::BTreeMap;

use glam::Vec3;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use courier_core::config::SpawnConfig;
use courier_core::enums::AlertLevel;
use courier_core::events::MissionEvent;
use courier_core::state::SpawnerView;
use courier_core::types::PickupId;

use crate::bus::EventBus;
use crate::sampler::SpatialSampler;
use crate::world_setup;

pub struct SpawnScheduler {
    config: SpawnConfig,
    sampler: SpatialSampler,
    spin_deg_per_sec: f32,
    active: BTreeMap<PickupId, Entity>,
    spawn_timer: f64,
    cooldown_timer: f64,
    spawning: bool,
    next_id: u32,
}

impl SpawnScheduler {
    pub fn new(config: SpawnConfig, spin_deg_per_sec: f32) -> Self {
        Self {
            sampler: SpatialSampler::from_config(&config),
            config,
            spin_deg_per_sec,
            active: BTreeMap::new(),
            spawn_timer: 0.0,
            cooldown_timer: 0.0,
            spawning: true,
            next_id: 0,
        }
    }

    /// Advance timers by `dt` and spawn when due. Returns the new pickup, if any.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        world: &mut World,
        rng: &mut R,
        bus: &mut EventBus,
    ) -> Option<PickupId> {
        if !self.spawning {
            return None;
        }

        self.prune(world);

        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
            return None;
        }

        self.spawn_timer += dt;
        if self.spawn_timer >= self.config.interval_secs && self.active.len() < self.config.max_active
        {
            let spawned = self.spawn(world, rng, bus);
            self.spawn_timer = 0.0;
            return spawned;
        }
        None
    }

    /// Place one pickup of a random configured kind. Does not check capacity.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        bus: &mut EventBus,
    ) -> Option<PickupId> {
        let Some(&kind) = self.config.kinds.choose(rng) else {
            log::warn!("Cannot spawn package - no pickup kinds configured");
            bus.alert(AlertLevel::Warning, "No pickup kinds configured");
            return None;
        };

        let occupied = self.active_positions(world);
        let sample = self.sampler.sample(rng, &occupied);
        if !sample.accepted {
            bus.alert(
                AlertLevel::Warning,
                format!(
                    "Pickup placed overlapping after {} attempts",
                    sample.attempts
                ),
            );
        }

        let id = PickupId(self.next_id);
        self.next_id += 1;
        let entity =
            world_setup::spawn_pickup(world, id, kind, sample.position, self.spin_deg_per_sec);
        self.active.insert(id, entity);

        log::info!(
            "Spawned {} package {} at ({:.2}, {:.2}). Active: {}/{}",
            kind.name(),
            id,
            sample.position.x,
            sample.position.z,
            self.active.len(),
            self.config.max_active
        );
        bus.publish(MissionEvent::PickupSpawned {
            pickup_id: id,
            kind,
            position: sample.position,
            overlapping: !sample.accepted,
        });
        Some(id)
    }

    /// A pickup was collected: drop it from the active set and start the cooldown.
    /// Returns false if the id was not active.
    pub fn on_collected(&mut self, id: PickupId) -> bool {
        let was_active = self.active.remove(&id).is_some();
        self.cooldown_timer = self.config.cooldown_secs;
        self.spawn_timer = 0.0;
        was_active
    }

    pub fn start_spawning(&mut self) {
        self.spawning = true;
    }

    pub fn stop_spawning(&mut self) {
        self.spawning = false;
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Despawn every active pickup and announce each removal.
    pub fn clear_all(&mut self, world: &mut World, bus: &mut EventBus) {
        for (id, entity) in std::mem::take(&mut self.active) {
            if world.despawn(entity).is_ok() {
                bus.publish(MissionEvent::PickupRemoved { pickup_id: id });
            }
        }
    }

    /// Zero both timers (new mission).
    pub fn reset_timers(&mut self) {
        self.spawn_timer = 0.0;
        self.cooldown_timer = 0.0;
    }

    /// Live pickup count after dropping externally destroyed entities.
    pub fn active_count(&mut self, world: &World) -> usize {
        self.prune(world);
        self.active.len()
    }

    pub fn can_spawn_more(&self) -> bool {
        self.active.len() < self.config.max_active
    }

    /// Entity of an active pickup.
    pub fn entity(&self, id: PickupId) -> Option<Entity> {
        self.active.get(&id).copied()
    }

    pub fn active_ids(&self) -> impl Iterator<Item = PickupId> + '_ {
        self.active.keys().copied()
    }

    pub fn spawn_timer_secs(&self) -> f64 {
        self.spawn_timer
    }

    pub fn cooldown_remaining_secs(&self) -> f64 {
        self.cooldown_timer.max(0.0)
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn view(&self) -> SpawnerView {
        SpawnerView {
            spawning: self.spawning,
            active: self.active.len(),
            max_active: self.config.max_active,
            spawn_timer_secs: self.spawn_timer,
            cooldown_remaining_secs: self.cooldown_remaining_secs(),
        }
    }

    fn prune(&mut self, world: &World) {
        self.active.retain(|_, entity| world.contains(*entity));
    }

    fn active_positions(&self, world: &World) -> Vec<Vec3> {
        self.active
            .values()
            .filter_map(|&entity| world.get::<&Vec3>(entity).ok().map(|pos| *pos))
            .collect()
    }
}
