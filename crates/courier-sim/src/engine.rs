//! Mission engine, the core of the game.
//!
//! `MissionEngine` owns the hecs world of pickups, the mission clock and
//! counters, and the spawn scheduler. It processes queued commands, runs all
//! systems, and produces `MissionSnapshot`s. Completely headless, driven by
//! an external loop through `init`, `tick` and `fixed_tick`.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use courier_core::commands::MissionCommand;
use courier_core::config::MissionConfig;
use courier_core::enums::{AlertLevel, MissionOutcome, MissionPhase};
use courier_core::events::MissionEvent;
use courier_core::state::MissionSnapshot;
use courier_core::types::{PickupId, SimTime};
use courier_mission::{Hud, Inventory, MissionClock, MissionState, PhaseTransition, SessionReset};

use crate::bus::EventBus;
use crate::collection::{self, CollectionContext};
use crate::scheduler::SpawnScheduler;
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;

/// External systems the engine notifies. Any of them may be left out.
#[derive(Default)]
pub struct Collaborators {
    pub inventory: Option<Box<dyn Inventory>>,
    pub hud: Option<Box<dyn Hud>>,
    pub session_reset: Option<Box<dyn SessionReset>>,
}

impl Collaborators {
    pub fn with_inventory(mut self, inventory: impl Inventory + 'static) -> Self {
        self.inventory = Some(Box::new(inventory));
        self
    }

    pub fn with_hud(mut self, hud: impl Hud + 'static) -> Self {
        self.hud = Some(Box::new(hud));
        self
    }

    pub fn with_session_reset(mut self, reset: impl SessionReset + 'static) -> Self {
        self.session_reset = Some(Box::new(reset));
        self
    }
}

/// The mission engine. Owns the world and all mission state.
pub struct MissionEngine {
    config: MissionConfig,
    world: World,
    time: SimTime,
    fixed_time: SimTime,
    rng: ChaCha8Rng,
    clock: MissionClock,
    state: MissionState,
    scheduler: SpawnScheduler,
    bus: EventBus,
    inventory: Option<Box<dyn Inventory>>,
    session_reset: Option<Box<dyn SessionReset>>,
    agent: Option<Vec3>,
    command_queue: VecDeque<MissionCommand>,
    contact_buffer: Vec<PickupId>,
    despawn_buffer: Vec<(Entity, PickupId)>,
}

impl MissionEngine {
    /// Create an engine. Nothing runs until [`MissionEngine::init`].
    pub fn new(config: MissionConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            inventory,
            hud,
            session_reset,
        } = collaborators;

        let mut scheduler =
            SpawnScheduler::new(config.spawn.clone(), config.pickup_spin_deg_per_sec);
        scheduler.stop_spawning();

        Self {
            world: World::new(),
            time: SimTime::default(),
            fixed_time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clock: MissionClock::from_config(&config),
            state: MissionState::from_config(&config).with_hud(hud),
            scheduler,
            bus: EventBus::new(),
            inventory,
            session_reset,
            agent: None,
            command_queue: VecDeque::new(),
            contact_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            config,
        }
    }

    /// Open the first session (Starting phase).
    pub fn init(&mut self) {
        let transition = self.clock.begin(&mut self.state);
        self.handle_transition(transition);
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MissionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MissionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register a callback for every mission event as it is published.
    pub fn subscribe(&mut self, listener: impl FnMut(&MissionEvent) + 'static) {
        self.bus.subscribe(listener);
    }

    /// Advance the mission by one frame of `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> MissionSnapshot {
        if !self.clock.is_started() {
            log::warn!("Engine ticked before init; opening the first session");
            self.init();
        }
        self.bus.set_tick(self.time.tick);

        self.process_commands();

        let mut entered_active = false;
        for transition in self.clock.tick(dt, &mut self.state) {
            entered_active |= transition.to == MissionPhase::Active;
            self.handle_transition(transition);
        }

        self.run_systems(dt, entered_active);
        self.time.advance(dt);

        self.snapshot()
    }

    /// Physics-rate step: agent/pickup contact detection.
    pub fn fixed_tick(&mut self, dt: f64) {
        self.fixed_time.advance(dt);

        let Some(agent) = self.agent else {
            return;
        };
        if self.clock.phase() != MissionPhase::Active {
            return;
        }

        let mut contacts = std::mem::take(&mut self.contact_buffer);
        systems::contact::run(
            &self.world,
            agent,
            self.config.pickup_trigger_radius,
            &mut contacts,
        );
        for &pickup_id in &contacts {
            self.collect(pickup_id);
        }
        self.contact_buffer = contacts;
    }

    /// Get the current mission phase.
    pub fn phase(&self) -> MissionPhase {
        self.clock.phase()
    }

    /// Get the current session number.
    pub fn session(&self) -> u32 {
        self.clock.session()
    }

    /// How the current session's mission ended, if it has.
    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.clock.outcome()
    }

    /// Get the current frame time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the accumulated fixed-step time.
    pub fn fixed_time(&self) -> SimTime {
        self.fixed_time
    }

    /// Read-only mission counters (HUD polling).
    pub fn state(&self) -> &MissionState {
        &self.state
    }

    /// Read-only mission clock (HUD polling).
    pub fn clock(&self) -> &MissionClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Last reported agent position.
    pub fn agent(&self) -> Option<Vec3> {
        self.agent
    }

    /// Destroy a pickup entity from outside the engine, as a scene teardown would.
    #[cfg(test)]
    pub fn destroy_pickup_externally(&mut self, pickup_id: PickupId) -> bool {
        crate::world_setup::find_pickup(&self.world, pickup_id)
            .map(|entity| self.world.despawn(entity).is_ok())
            .unwrap_or(false)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: MissionCommand) {
        match command {
            MissionCommand::CollectPickup { pickup_id } => {
                if self.clock.phase() == MissionPhase::Active {
                    self.collect(pickup_id);
                } else {
                    log::debug!(
                        "Ignoring collection of pickup {} during {:?}",
                        pickup_id,
                        self.clock.phase()
                    );
                }
            }
            MissionCommand::MoveAgent { position } => {
                self.agent = Some(position);
            }
            MissionCommand::StartSpawning => {
                if self.clock.phase() == MissionPhase::Active {
                    self.scheduler.start_spawning();
                } else {
                    log::debug!("Ignoring StartSpawning during {:?}", self.clock.phase());
                }
            }
            MissionCommand::StopSpawning => self.scheduler.stop_spawning(),
            MissionCommand::ClearAllPackages => self.clear_all_packages(),
            MissionCommand::Cancel => {
                if let Some(transition) = self.clock.cancel() {
                    self.handle_transition(transition);
                }
            }
        }
    }

    fn collect(&mut self, pickup_id: PickupId) -> bool {
        collection::collect(
            CollectionContext {
                world: &mut self.world,
                scheduler: &mut self.scheduler,
                state: &mut self.state,
                inventory: &mut self.inventory,
                bus: &mut self.bus,
                grace_delay_secs: self.config.grace_delay_secs,
            },
            pickup_id,
        )
    }

    /// Apply the side effects of a phase change.
    fn handle_transition(&mut self, transition: PhaseTransition) {
        self.bus.publish(MissionEvent::PhaseChanged {
            session: transition.session,
            from: transition.from,
            to: transition.to,
        });

        match transition.to {
            MissionPhase::Starting => {
                self.scheduler.stop_spawning();
                self.clear_all_packages();
                self.scheduler.reset_timers();
            }
            MissionPhase::Active => {
                self.scheduler.reset_timers();
                self.scheduler.start_spawning();
                if self.config.spawn.spawn_on_start && self.scheduler.can_spawn_more() {
                    self.scheduler
                        .spawn(&mut self.world, &mut self.rng, &mut self.bus);
                }
            }
            MissionPhase::Ending => {
                self.scheduler.stop_spawning();
                self.publish_resolution(transition.session);
            }
            MissionPhase::Complete => {
                self.scheduler.stop_spawning();
                self.clear_all_packages();
                match self.session_reset.as_mut() {
                    Some(reset) => reset.reset_session(),
                    None => {
                        log::warn!("No session reset wired; skipping scene reload");
                        self.bus
                            .alert(AlertLevel::Warning, "No session reset collaborator");
                    }
                }
                self.bus.publish(MissionEvent::SessionReset {
                    session: transition.session,
                });
            }
            MissionPhase::Cancelled => {
                self.scheduler.stop_spawning();
                self.clear_all_packages();
                if transition.from != MissionPhase::Ending {
                    self.publish_resolution(transition.session);
                }
            }
        }
    }

    fn publish_resolution(&mut self, session: u32) {
        if let Some(outcome) = self.clock.outcome() {
            self.bus.publish(MissionEvent::MissionResolved {
                session,
                outcome,
                delivered: self.state.delivery_count(),
                elapsed_secs: self.state.elapsed_secs(),
            });
        }
    }

    /// Remove every pickup, live or in its grace window.
    fn clear_all_packages(&mut self) {
        self.scheduler.clear_all(&mut self.world, &mut self.bus);
        systems::cleanup::clear_pending(&mut self.world, &mut self.despawn_buffer, &mut self.bus);
    }

    /// Run all per-frame systems in order.
    ///
    /// The spawn timer starts on the frame after gameplay begins, matching
    /// the mission clock, which does not count the entering frame either.
    fn run_systems(&mut self, dt: f64, entered_active: bool) {
        // 1. Spawning
        if !entered_active {
            self.scheduler
                .tick(dt, &mut self.world, &mut self.rng, &mut self.bus);
        }
        // 2. Idle spin
        systems::spin::run(&mut self.world, dt);
        // 3. Grace-window cleanup
        systems::cleanup::run(&mut self.world, dt, &mut self.despawn_buffer, &mut self.bus);
    }

    fn snapshot(&mut self) -> MissionSnapshot {
        let events = self.bus.drain_events();
        let alerts = self.bus.drain_alerts();
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                clock: &self.clock,
                state: &self.state,
                scheduler: &self.scheduler,
                agent: self.agent,
            },
            events,
            alerts,
        )
    }
}
