//! Game loop thread: runs the mission engine at the frame rate and stores snapshots.
//!
//! The engine is created inside this thread because its collaborators are
//! not `Send`. Commands arrive via `mpsc` channel. The latest snapshot is
//! stored in shared state for polling. Each frame runs one engine tick and
//! as many fixed ticks as the accumulated frame time allows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glam::Vec3;

use courier_core::commands::MissionCommand;
use courier_core::config::MissionConfig;
use courier_core::constants::{AGENT_SPEED, CRITICAL_FLASH_RATE, DT, FIXED_DT, TICK_RATE};
use courier_core::enums::{MissionOutcome, MissionPhase};
use courier_core::events::MissionEvent;
use courier_core::state::MissionSnapshot;
use courier_sim::{Collaborators, MissionEngine};

use crate::agent::{Autopilot, Courier};
use crate::frame_clock::FrameClock;
use crate::hud::{ConsoleHud, TimeDisplay};
use crate::scene::SceneReload;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame at 1x speed.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How long and how fast the loop runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    /// Stop after this many sessions have been reset.
    pub sessions: u32,
    /// Pacing multiplier. Only used with `realtime`.
    pub time_scale: f64,
    /// Sleep between frames to match wall-clock time.
    pub realtime: bool,
    /// Hard stop, in frames.
    pub max_frames: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            sessions: 1,
            time_scale: 1.0,
            realtime: false,
            // One hour of simulated time.
            max_frames: 60 * 60 * TICK_RATE as u64,
        }
    }
}

/// Result of one resolved mission.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub session: u32,
    pub outcome: MissionOutcome,
    pub delivered: u32,
    pub elapsed_secs: f64,
}

/// What the loop did before it stopped.
#[derive(Debug, Clone, Default)]
pub struct LoopSummary {
    pub frames: u64,
    pub sessions: Vec<SessionReport>,
    pub resets: u32,
    pub final_phase: MissionPhase,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop summary.
pub fn spawn_game_loop(
    config: MissionConfig,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<MissionSnapshot>>>,
    running: Arc<AtomicBool>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("courier-game-loop".into())
        .spawn(move || {
            running.store(true, Ordering::Release);
            let summary = run_game_loop(config, settings, cmd_rx, &latest_snapshot);
            running.store(false, Ordering::Release);
            summary
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the requested sessions are done, the mission
/// reaches a terminal phase, a Shutdown command, or channel disconnect.
pub fn run_game_loop(
    config: MissionConfig,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MissionSnapshot>>,
) -> LoopSummary {
    let home = Vec3::new(config.spawn.center.x, 0.0, config.spawn.center.z);
    let courier = Courier::default();
    let collaborators = Collaborators::default()
        .with_inventory(courier.clone())
        .with_hud(ConsoleHud::default())
        .with_session_reset(SceneReload::new(courier));

    let mut engine = MissionEngine::new(config, collaborators);
    engine.init();

    let mut autopilot = Autopilot::new(home, AGENT_SPEED);
    let mut frame_clock = FrameClock::new(FIXED_DT);
    let mut time_display = TimeDisplay::new(CRITICAL_FLASH_RATE);
    let mut summary = LoopSummary::default();
    let mut last_time_text = String::new();
    let mut next_frame_time = Instant::now();

    'frames: while summary.frames < settings.max_frames {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Mission(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => break 'frames,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'frames,
            }
        }

        // 2. Steer the courier from last frame's view of the field
        if let Some(position) = latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.as_ref().map(|snap| autopilot.steer(snap, DT)))
        {
            engine.queue_command(MissionCommand::MoveAgent { position });
        }

        // 3. Frame tick, then the fixed ticks this frame owes
        let snapshot = engine.tick(DT);
        frame_clock.update(DT);
        while frame_clock.should_fixed_update() {
            engine.fixed_tick(frame_clock.fixed_dt());
        }
        summary.frames = frame_clock.frame_count();

        // 4. Report
        for event in &snapshot.events {
            match *event {
                MissionEvent::MissionResolved {
                    session,
                    outcome,
                    delivered,
                    elapsed_secs,
                } => {
                    log::info!(
                        "Session {} resolved: {:?}, {} delivered in {:.1}s",
                        session,
                        outcome,
                        delivered,
                        elapsed_secs
                    );
                    summary.sessions.push(SessionReport {
                        session,
                        outcome,
                        delivered,
                        elapsed_secs,
                    });
                }
                MissionEvent::SessionReset { .. } => {
                    summary.resets += 1;
                    autopilot.return_home();
                }
                _ => {}
            }
        }
        if snapshot.phase == MissionPhase::Active {
            let readout = time_display.update(&snapshot.hud, DT);
            if readout.text != last_time_text {
                log::debug!("[HUD] {} ({:?})", readout.text, readout.shown_band);
                last_time_text = readout.text;
            }
        }

        let phase = snapshot.phase;
        summary.final_phase = phase;

        // 5. Store latest snapshot for polling and steering
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if phase.is_terminal() || summary.resets >= settings.sessions {
            break;
        }

        // 6. Sleep until next frame, adjusting for time_scale
        if settings.realtime {
            let frame_duration = if settings.time_scale > 0.001 {
                FRAME_DURATION.div_f64(settings.time_scale)
            } else {
                FRAME_DURATION
            };

            next_frame_time += frame_duration;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > frame_duration * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_frame_time = now;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::config::SpawnConfig;
    use courier_core::enums::ResetPolicy;

    fn quick_config() -> MissionConfig {
        MissionConfig {
            start_delay_secs: 0.0,
            end_delay_secs: 0.5,
            target_packages: 1,
            time_limit_secs: 60.0,
            spawn: SpawnConfig {
                interval_secs: 1.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn run(
        config: MissionConfig,
        settings: LoopSettings,
        commands: Vec<GameLoopCommand>,
    ) -> (LoopSummary, Option<MissionSnapshot>) {
        let (tx, rx) = mpsc::channel();
        for cmd in commands {
            tx.send(cmd).unwrap();
        }
        let latest = Mutex::new(None);
        let summary = run_game_loop(config, settings, rx, &latest);
        drop(tx);
        (summary, latest.into_inner().unwrap())
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Mission(MissionCommand::StopSpawning))
            .unwrap();
        tx.send(GameLoopCommand::Mission(MissionCommand::Cancel))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Mission(MissionCommand::StopSpawning)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Mission(MissionCommand::Cancel)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_autopilot_completes_a_session() {
        let (summary, latest) = run(quick_config(), LoopSettings::default(), Vec::new());

        assert_eq!(summary.resets, 1);
        assert_eq!(summary.sessions.len(), 1);
        let report = &summary.sessions[0];
        assert_eq!(report.session, 1);
        assert_eq!(report.outcome, MissionOutcome::Delivered);
        assert_eq!(report.delivered, 1);
        assert!(report.elapsed_secs < 5.0, "Courier took {:.1}s", report.elapsed_secs);

        let latest = latest.unwrap();
        assert_eq!(latest.session, 2);
        assert_eq!(latest.mission.delivered, 0);
    }

    #[test]
    fn test_runs_requested_number_of_sessions() {
        let settings = LoopSettings {
            sessions: 3,
            ..Default::default()
        };
        let (summary, _) = run(quick_config(), settings, Vec::new());
        assert_eq!(summary.resets, 3);
        let sessions: Vec<u32> = summary.sessions.iter().map(|r| r.session).collect();
        assert_eq!(sessions, vec![1, 2, 3]);
    }

    #[test]
    fn test_terminate_policy_stops_loop() {
        let config = MissionConfig {
            reset_policy: ResetPolicy::Terminate,
            ..quick_config()
        };
        let settings = LoopSettings {
            sessions: 5,
            ..Default::default()
        };
        let (summary, _) = run(config, settings, Vec::new());
        assert_eq!(summary.final_phase, MissionPhase::Complete);
        assert_eq!(summary.resets, 1);
        assert_eq!(summary.sessions.len(), 1);
    }

    #[test]
    fn test_cancel_command_ends_loop() {
        let (summary, latest) = run(
            MissionConfig::default(),
            LoopSettings::default(),
            vec![GameLoopCommand::Mission(MissionCommand::Cancel)],
        );
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.final_phase, MissionPhase::Cancelled);
        assert_eq!(summary.sessions[0].outcome, MissionOutcome::Cancelled);
        assert_eq!(latest.unwrap().phase, MissionPhase::Cancelled);
    }

    #[test]
    fn test_shutdown_before_first_frame() {
        let (summary, latest) = run(
            MissionConfig::default(),
            LoopSettings::default(),
            vec![GameLoopCommand::Shutdown],
        );
        assert_eq!(summary.frames, 0);
        assert!(latest.is_none());
    }

    #[test]
    fn test_max_frames_bounds_the_run() {
        let config = MissionConfig {
            time_limit_secs: 1000.0,
            ..MissionConfig::default()
        };
        let settings = LoopSettings {
            max_frames: 120,
            ..Default::default()
        };
        let (summary, latest) = run(config, settings, Vec::new());
        assert_eq!(summary.frames, 120);
        assert_eq!(latest.unwrap().time.tick, 120);
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(false));
        let (tx, handle) = spawn_game_loop(
            quick_config(),
            LoopSettings::default(),
            Arc::clone(&latest),
            Arc::clone(&running),
        )
        .unwrap();

        let summary = handle.join().unwrap();
        drop(tx);
        assert_eq!(summary.resets, 1);
        assert!(!running.load(Ordering::Acquire));
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = MissionEngine::new(quick_config(), Collaborators::default());
        engine.init();

        for _ in 0..300 {
            engine.tick(DT);
        }

        let snapshot = engine.tick(DT);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.667ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
