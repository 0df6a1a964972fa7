use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;

use courier_app::game_loop::{spawn_game_loop, LoopSettings};
use courier_app::state::AppState;
use courier_core::config::MissionConfig;
use courier_core::state::format_clock;

#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(about = "Headless delivery mission runner with an autopilot courier")]
struct Cli {
    /// Mission config JSON; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many sessions have been reset
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Pacing multiplier for --realtime
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// Pace frames to wall-clock time instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Hard stop, in frames
    #[arg(long, default_value_t = LoopSettings::default().max_frames)]
    max_frames: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MissionConfig::load(path)
            .with_context(|| format!("loading mission config {}", path.display()))?,
        None => MissionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    ensure!(cli.sessions > 0, "--sessions must be at least 1");
    ensure!(
        cli.time_scale.is_finite() && cli.time_scale > 0.0,
        "--time-scale must be positive, got {}",
        cli.time_scale
    );

    log::info!(
        "Mission: deliver {} packages in {} (seed {})",
        config.target_packages,
        format_clock(config.time_limit_secs),
        config.seed
    );

    let settings = LoopSettings {
        sessions: cli.sessions,
        time_scale: cli.time_scale,
        realtime: cli.realtime,
        max_frames: cli.max_frames,
    };

    let app = AppState::new();
    let (command_tx, handle) = spawn_game_loop(
        config,
        settings,
        app.latest_snapshot.clone(),
        app.running.clone(),
    )
    .context("spawning game loop thread")?;
    *app
        .command_tx
        .lock()
        .map_err(|_| anyhow!("command channel lock poisoned"))? = Some(command_tx);

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    for report in &summary.sessions {
        log::info!(
            "Session {}: {:?}, {} delivered in {}",
            report.session,
            report.outcome,
            report.delivered,
            format_clock(report.elapsed_secs)
        );
    }
    if let Some(snapshot) = app.snapshot() {
        log::info!(
            "Stopped after {} frames in {:?} (session {}, {})",
            summary.frames,
            summary.final_phase,
            snapshot.session,
            snapshot.hud.progress_text
        );
    }

    Ok(())
}
