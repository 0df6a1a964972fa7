//! Interfaces to the systems around the mission core.
//!
//! Implementations are injected at construction. Each one is optional; when
//! it is missing the dependent side effect is skipped and logged.

/// The agent's package store (and whatever animation it triggers).
pub trait Inventory {
    /// Called once per collected pickup. Fire-and-forget.
    fn on_package_collected(&mut self);
}

/// Heads-up display.
pub trait Hud {
    /// Called whenever the delivered count changes. `delivered` may exceed `target`.
    fn set_package_progress(&mut self, delivered: u32, target: u32);
}

/// Scene/session reloader, invoked when a session finishes its Ending phase.
pub trait SessionReset {
    /// Not awaited; the clock moves on in the same tick.
    fn reset_session(&mut self);
}
