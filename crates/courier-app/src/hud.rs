//! Console HUD: package progress pushed by the mission, time remaining
//! polled from each snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use courier_core::enums::TimeBand;
use courier_core::state::{format_progress, HudView};
use courier_mission::Hud;

/// Progress collaborator. Clones share the displayed text.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHud {
    progress: Rc<RefCell<String>>,
}

impl ConsoleHud {
    pub fn progress_text(&self) -> String {
        self.progress.borrow().clone()
    }
}

impl Hud for ConsoleHud {
    fn set_package_progress(&mut self, delivered: u32, target: u32) {
        let text = format_progress(delivered, target);
        log::info!("[HUD] {}", text);
        *self.progress.borrow_mut() = text;
    }
}

/// What the time readout shows this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeReadout {
    pub text: String,
    /// Band whose color is shown. A flashing critical readout alternates
    /// between `Critical` and `Normal`.
    pub shown_band: TimeBand,
}

/// Time readout presenter with the critical-band flash.
#[derive(Debug, Clone)]
pub struct TimeDisplay {
    flash_rate: f64,
    flash_timer: f64,
    flash_visible: bool,
}

impl TimeDisplay {
    /// `flash_rate` is in toggles per second; zero disables flashing.
    pub fn new(flash_rate: f64) -> Self {
        Self {
            flash_rate,
            flash_timer: 0.0,
            flash_visible: true,
        }
    }

    pub fn update(&mut self, hud: &HudView, dt: f64) -> TimeReadout {
        let shown_band = match hud.time_band {
            TimeBand::Critical if self.flash_rate > 0.0 => {
                self.flash_timer += dt * self.flash_rate;
                if self.flash_timer >= 1.0 {
                    self.flash_timer = 0.0;
                    self.flash_visible = !self.flash_visible;
                }
                if self.flash_visible {
                    TimeBand::Critical
                } else {
                    TimeBand::Normal
                }
            }
            band => band,
        };
        TimeReadout {
            text: hud.time_text.clone(),
            shown_band,
        }
    }
}
