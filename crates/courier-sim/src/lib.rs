//! Mission engine for COURIER.
//!
//! Owns the hecs world of pickup entities, runs the mission clock, the
//! pickup spawner and the per-tick systems, and produces `MissionSnapshot`s
//! for the HUD.

pub mod bus;
pub mod collection;
pub mod engine;
pub mod sampler;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use courier_core as core;
pub use engine::{Collaborators, MissionEngine};
