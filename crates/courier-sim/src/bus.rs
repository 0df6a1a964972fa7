//! Event bus: collects what happened during a tick and fans it out to
//! subscribers as it happens.

use courier_core::enums::AlertLevel;
use courier_core::events::{Alert, MissionEvent};

/// Callback invoked synchronously for every published event.
pub type Listener = Box<dyn FnMut(&MissionEvent)>;

#[derive(Default)]
pub struct EventBus {
    events: Vec<MissionEvent>,
    alerts: Vec<Alert>,
    listeners: Vec<Listener>,
    tick: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for all future events.
    pub fn subscribe(&mut self, listener: impl FnMut(&MissionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Notify listeners and queue the event for the next snapshot.
    pub fn publish(&mut self, event: MissionEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.events.push(event);
    }

    /// Queue a diagnostic for the UI alert list.
    pub fn alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.alerts.push(Alert {
            level,
            message: message.into(),
            tick: self.tick,
        });
    }

    /// Stamp subsequent alerts with this frame tick.
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn drain_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }
}
