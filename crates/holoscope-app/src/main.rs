//! Headless Holoscope runner.
//!
//! Loads the config, optionally feeds satellite and planet fixes from JSON
//! files, runs
//! the session for a number of fixed steps and logs where the robot would
//! point.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;
use holoscope_app::{FIXED_DT, FixedStepLoop, FrameInput, Session};
use holoscope_config::{CliArgs, Config};
use holoscope_feed::{
    FeedError, FeedPublisher, PlanetFix, PollGate, SatelliteFix, latest_value_channel,
};
use holoscope_input::InputMap;
use holoscope_pointing::AstralTarget;

#[derive(Parser, Debug)]
#[command(name = "holoscope", about = "Holographic globe and pointing terminal")]
struct AppArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Number of fixed steps to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Satellite API response to feed in, re-read at the poll interval.
    #[arg(long)]
    satellite: Option<PathBuf>,

    /// Planet position record to feed in, re-read at the poll interval.
    #[arg(long)]
    planet: Option<PathBuf>,

    /// Target to point at (ISS, Mercury, ... Pluto).
    #[arg(long, default_value = "ISS")]
    target: String,
}

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

fn main() -> Result<(), Box<dyn Error>> {
    let args = AppArgs::parse();

    let config_dir = match &args.cli.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args.cli);

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .or_else(|| dirs::data_local_dir().map(|d| d.join("holoscope").join("logs")));
    holoscope_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    // Unknown action or key names in the overrides are reported here.
    let input_map = InputMap::with_overrides(&config.input.keybindings);
    tracing::debug!(actions = input_map.bindings.len(), "input bindings loaded");

    let target: AstralTarget = args.target.parse()?;
    tracing::info!(
        config = %config_dir.display(),
        astral = %target,
        frames = args.frames,
        "holoscope starting"
    );

    let (satellite_tx, satellite_rx) = latest_value_channel();
    let (planet_tx, planet_rx) = latest_value_channel();
    if let Some(path) = args.satellite.clone() {
        let interval = Duration::from_secs_f32(config.feed.satellite_interval_s.max(0.0));
        std::thread::Builder::new()
            .name("satellite-feed".into())
            .spawn(move || {
                run_file_feed(&path, interval, satellite_tx, SatelliteFix::from_json);
            })?;
    }
    if let Some(path) = args.planet.clone() {
        let interval = Duration::from_secs_f32(config.feed.planet_interval_s.max(0.0));
        std::thread::Builder::new()
            .name("planet-feed".into())
            .spawn(move || {
                run_file_feed(&path, interval, planet_tx, PlanetFix::from_json);
            })?;
    }

    let mut session = Session::new(&config, satellite_rx, planet_rx);
    session.set_target(target);

    let mut frame_loop = FixedStepLoop::new();
    while frame_loop.step_count() < u64::from(args.frames) {
        frame_loop.advance(
            FIXED_DT,
            |dt, _| {
                let output = session.frame(&FrameInput::idle(VIEWPORT), dt as f32);
                for step in &output.motor_steps {
                    tracing::info!(
                        motor = step.command.motor.wire_name(),
                        angle = step.command.angle_deg,
                        steps = step.steps,
                        "motor command"
                    );
                }
            },
            |_| {},
        );
        // Let the feeder threads get a fix in before the run ends.
        std::thread::sleep(Duration::from_millis(1));
    }

    match session.solution() {
        Some(solution) => tracing::info!(
            yaw = solution.robot_yaw,
            pitch = solution.robot_pitch,
            source = ?solution.source,
            "final pointing solution"
        ),
        None => tracing::warn!(astral = %target, "no position data received, robot not aimed"),
    }
    Ok(())
}

/// Re-read `path` once per interval until the session goes away.
fn run_file_feed<T>(
    path: &Path,
    interval: Duration,
    publisher: FeedPublisher<T>,
    decode: fn(&str) -> Result<T, FeedError>,
) {
    let mut gate = PollGate::new(interval);
    loop {
        if gate.should_poll(Instant::now()) {
            let fix = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|body| decode(&body).map_err(|e| e.to_string()));
            gate.complete();
            match fix {
                Ok(fix) => {
                    if publisher.publish(fix).is_err() {
                        return;
                    }
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "feed record rejected"),
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
