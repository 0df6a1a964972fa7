//! Mission clock finite state machine.
//!
//! Starting → Active → Ending → Complete, with an optional loop back to
//! Starting for the next session. Waits are accumulated phase time; nothing
//! here blocks, so the caller keeps ticking every other system while a
//! phase delay runs out.

use courier_core::config::MissionConfig;
use courier_core::enums::{MissionOutcome, MissionPhase, ResetPolicy};

use crate::state::MissionState;

/// A single phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Session the `to` phase belongs to.
    pub session: u32,
    pub from: MissionPhase,
    pub to: MissionPhase,
}

/// Drives the mission through its phases.
#[derive(Debug, Clone)]
pub struct MissionClock {
    phase: MissionPhase,
    phase_elapsed_secs: f64,
    session: u32,
    outcome: Option<MissionOutcome>,
    start_delay_secs: f64,
    end_delay_secs: f64,
    reset_policy: ResetPolicy,
    started: bool,
}

impl MissionClock {
    pub fn new(start_delay_secs: f64, end_delay_secs: f64, reset_policy: ResetPolicy) -> Self {
        Self {
            phase: MissionPhase::Starting,
            phase_elapsed_secs: 0.0,
            session: 0,
            outcome: None,
            start_delay_secs,
            end_delay_secs,
            reset_policy,
            started: false,
        }
    }

    pub fn from_config(config: &MissionConfig) -> Self {
        Self::new(
            config.start_delay_secs,
            config.end_delay_secs,
            config.reset_policy,
        )
    }

    /// Open the first session. Calling it again restarts from a fresh session.
    pub fn begin(&mut self, state: &mut MissionState) -> PhaseTransition {
        let from = self.phase;
        self.started = true;
        self.start_session(state);
        PhaseTransition {
            session: self.session,
            from,
            to: MissionPhase::Starting,
        }
    }

    /// Advance by `dt` seconds. Returns every transition that fired, in order.
    pub fn tick(&mut self, dt: f64, state: &mut MissionState) -> Vec<PhaseTransition> {
        let mut transitions = Vec::new();
        if !self.started {
            return transitions;
        }

        match self.phase {
            MissionPhase::Starting => {
                self.phase_elapsed_secs += dt;
                if self.phase_elapsed_secs >= self.start_delay_secs {
                    transitions.push(self.enter(MissionPhase::Active));
                    log::info!("Mission active (session {})", self.session);
                }
            }
            MissionPhase::Active => {
                state.advance(dt);
                // Completion wins a same-tick tie with the time limit.
                let outcome = if state.is_complete() {
                    Some(MissionOutcome::Delivered)
                } else if state.is_failed() {
                    Some(MissionOutcome::TimedOut)
                } else {
                    None
                };
                if let Some(outcome) = outcome {
                    self.outcome = Some(outcome);
                    transitions.push(self.enter(MissionPhase::Ending));
                    log::info!(
                        "Ending mission (session {}): {:?} with {}/{} delivered at {:.1}s",
                        self.session,
                        outcome,
                        state.delivery_count(),
                        state.target(),
                        state.elapsed_secs()
                    );
                }
            }
            MissionPhase::Ending => {
                self.phase_elapsed_secs += dt;
                if self.phase_elapsed_secs >= self.end_delay_secs {
                    transitions.push(self.enter(MissionPhase::Complete));
                    if self.reset_policy == ResetPolicy::Loop {
                        let from = self.phase;
                        self.start_session(state);
                        transitions.push(PhaseTransition {
                            session: self.session,
                            from,
                            to: MissionPhase::Starting,
                        });
                    }
                }
            }
            MissionPhase::Complete | MissionPhase::Cancelled => {}
        }

        transitions
    }

    /// Abort the session. Only non-terminal phases can be cancelled.
    pub fn cancel(&mut self) -> Option<PhaseTransition> {
        if !self.started || self.phase.is_terminal() {
            return None;
        }
        // A mission already resolved keeps its result.
        self.outcome.get_or_insert(MissionOutcome::Cancelled);
        log::info!("Mission cancelled (session {})", self.session);
        Some(self.enter(MissionPhase::Cancelled))
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// Current session number, starting at 1 after [`MissionClock::begin`].
    pub fn session(&self) -> u32 {
        self.session
    }

    /// How the current session's mission ended, once it has.
    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.outcome
    }

    /// Time spent in the current Starting or Ending wait.
    pub fn phase_elapsed_secs(&self) -> f64 {
        self.phase_elapsed_secs
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn start_session(&mut self, state: &mut MissionState) {
        self.session += 1;
        self.phase = MissionPhase::Starting;
        self.phase_elapsed_secs = 0.0;
        self.outcome = None;
        state.reset();
        log::info!("Starting mission (session {})", self.session);
    }

    fn enter(&mut self, to: MissionPhase) -> PhaseTransition {
        let from = self.phase;
        self.phase = to;
        self.phase_elapsed_secs = 0.0;
        PhaseTransition {
            session: self.session,
            from,
            to,
        }
    }
}
