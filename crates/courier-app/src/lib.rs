//! COURIER headless runner.
//!
//! This crate wires the mission engine to its collaborators (the courier
//! agent, a console HUD and a scene reload hook) and drives it from a
//! dedicated game loop thread.

pub mod agent;
pub mod frame_clock;
pub mod game_loop;
pub mod hud;
pub mod scene;
pub mod state;

pub use courier_core as core;
