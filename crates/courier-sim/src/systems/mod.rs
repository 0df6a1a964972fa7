//! ECS systems that operate on the mission world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod contact;
pub mod snapshot;
pub mod spin;
