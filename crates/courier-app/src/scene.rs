//! Scene reload hook invoked when a session finishes.

use std::cell::Cell;
use std::rc::Rc;

use courier_mission::SessionReset;

use crate::agent::Courier;

/// Session reset collaborator. Reloading the scene empties the courier's
/// inventory; the game loop puts the agent back at its start position.
#[derive(Debug, Clone)]
pub struct SceneReload {
    courier: Courier,
    reloads: Rc<Cell<u32>>,
}

impl SceneReload {
    pub fn new(courier: Courier) -> Self {
        Self {
            courier,
            reloads: Rc::new(Cell::new(0)),
        }
    }

    pub fn reloads(&self) -> u32 {
        self.reloads.get()
    }
}

impl SessionReset for SceneReload {
    fn reset_session(&mut self) {
        self.reloads.set(self.reloads.get() + 1);
        log::info!(
            "Reloading delivery scene (reload #{}, courier dropped {} packages)",
            self.reloads.get(),
            self.courier.packages_stored()
        );
        self.courier.unload();
    }
}
