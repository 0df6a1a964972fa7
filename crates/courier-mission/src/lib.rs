//! Mission logic for COURIER.
//!
//! The phased mission clock, the authoritative delivery counters, and the
//! collaborator interfaces they notify. No ECS dependency; operates on
//! plain data and is driven one tick at a time.

pub mod clock;
pub mod collaborators;
pub mod state;

pub use clock::{MissionClock, PhaseTransition};
pub use collaborators::{Hud, Inventory, SessionReset};
pub use courier_core as core;
pub use state::MissionState;
