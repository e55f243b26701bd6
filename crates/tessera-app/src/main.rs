//! Headless tessera host: flies a camera over the terrain for a fixed number of
//! frames and logs what the terrain system publishes.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use glam::DVec3;
use tessera_app::flight::CameraFlight;
use tessera_app::game_loop::{FIXED_DT, GameLoop};
use tessera_app::platform::PlatformDirs;
use tessera_config::{CliArgs, Config};
use tessera_world::TerrainSystem;
use tracing::{info, warn};

/// Simulation seconds between checks of `config.ron` for edits.
const RELOAD_INTERVAL_SECS: f64 = 2.0;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        return ExitCode::FAILURE;
    }

    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config.debug.log_to_file.then_some(dirs.log_dir.as_path());
    tessera_log::init_logging(log_dir, cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "tessera starting");

    run(file_config, config, &args, &dirs);
    ExitCode::SUCCESS
}

/// Drive the terrain system for `config.app.frames` frames.
///
/// `file_config` is what `config.ron` held at startup; reloads compare against
/// it and re-apply the CLI overrides on top of any edit.
fn run(mut file_config: Config, mut config: Config, args: &CliArgs, dirs: &PlatformDirs) {
    let mut system = TerrainSystem::new(config.terrain.clone());
    let ready = system.subscribe_ready();
    let flight = CameraFlight::over_world(
        config.terrain.effective_world_size(),
        config.app.camera_speed,
        config.app.camera_altitude,
    );

    let mut game_loop = GameLoop::new();
    let mut previous = flight.position_at(0.0, |x, z| system.height_at(x, z));
    let mut current = previous;
    let mut next_reload = RELOAD_INTERVAL_SECS;
    let mut rebuilt_total = 0usize;
    let mut changed_frames = 0u32;
    let mut visible = 0usize;
    let mut last_frame = Instant::now();

    for _ in 0..config.app.frames {
        // Headless frames never wait for vsync, so each covers at least one step.
        let frame_time = last_frame.elapsed().as_secs_f64().max(FIXED_DT);
        last_frame = Instant::now();

        let alpha = game_loop.advance(frame_time, |dt, sim_time| {
            previous = current;
            current = flight.position_at(sim_time + dt, |x, z| system.height_at(x, z));
        });
        let camera: DVec3 = previous.lerp(current, alpha);
        let time = game_loop.total_sim_time();

        if time >= next_reload {
            next_reload += RELOAD_INTERVAL_SECS;
            match file_config.reload(&dirs.config_dir) {
                Ok(Some(reloaded)) => {
                    config = reloaded.clone();
                    config.apply_cli_overrides(args);
                    file_config = reloaded;
                }
                Ok(None) => {}
                Err(e) => warn!(%e, "config reload failed, keeping current settings"),
            }
        }

        let output = system.update(camera, &config.terrain, time);
        if ready.try_recv().is_ok() {
            info!(frame = game_loop.frame_count(), "height data ready");
        }
        if output.changed {
            changed_frames += 1;
            rebuilt_total += output.rebuilt;
            visible = output.chunks.len();
            info!(
                frame = game_loop.frame_count(),
                visible,
                rebuilt = output.rebuilt,
                x = camera.x,
                z = camera.z,
                "terrain updated"
            );
        }
    }

    if !system.is_ready() {
        warn!("height data never became ready during the run");
    }
    let stats = system.cache_stats();
    info!(
        frames = game_loop.frame_count(),
        steps = game_loop.update_count(),
        changed_frames,
        rebuilt_total,
        visible,
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        collision_resolution = system.collision().map_or(0, |c| c.resolution),
        "run complete"
    );
}
