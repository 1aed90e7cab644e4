//! Tether Engine Runtime
//!
//! Headless host: loads settings, builds the scene, then ticks scripts and
//! physics for the configured number of steps.
//!
//! Usage: `tether [settings.json]`

mod sandbox;

use anyhow::{Context, Result};
use tether_core::ecs::{Tag, Transform, World};
use tether_core::physics;
use tether_core::time::{SimulationTime, Timestep};
use tether_metrics::FrameTimer;
use tether_script::ScriptEngine;
use tether_services::input::InputState;
use tether_services::settings::{LoggingSettings, Settings};
use tracing_subscriber::EnvFilter;

const DEFAULT_SETTINGS_PATH: &str = "tether.json";

fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => {
            Settings::load(&path).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::load_or_default(DEFAULT_SETTINGS_PATH),
    };
    init_logging(&settings.logging);

    tracing::info!("Tether Engine v{}", tether_core::VERSION);

    let mut world = World::new();
    let spawned = sandbox::build_scene(&mut world, &settings.scene);
    tracing::info!(entities = spawned.len(), "scene loaded");

    let mut input = InputState::new();
    for key in &settings.input.held {
        input.press(*key);
    }

    let mut engine = ScriptEngine::with_settings(&settings.scripting);
    sandbox::register_scripts(&mut engine)?;
    engine.on_runtime_start(&mut world, &input)?;

    let ts = Timestep::from_seconds(settings.simulation.delta_seconds);
    let mut time = SimulationTime::new();
    let mut frame_timer = FrameTimer::new(120);
    for _ in 0..settings.simulation.tick_count {
        frame_timer.begin();
        engine.on_update(&mut world, &input, ts);
        physics::integrate(&mut world, ts);
        time.advance_tick(ts);
        frame_timer.end();
    }

    engine.on_runtime_stop(&mut world, &input);
    report(&world, &engine, &time, &frame_timer);
    Ok(())
}

/// `RUST_LOG` wins over the settings file.
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn report(world: &World, engine: &ScriptEngine, time: &SimulationTime, frame_timer: &FrameTimer) {
    tracing::info!(
        ticks = time.tick_count(),
        simulated = ?time.total_time(),
        "simulation finished"
    );

    for id in world.entities() {
        let Some(transform) = world.get_component::<Transform>(id) else {
            continue;
        };
        let name = world
            .get_component::<Tag>(id)
            .map_or("<unnamed>", |tag| tag.name.as_str());
        tracing::info!(
            entity = name,
            translation = ?transform.translation,
            rotation = ?transform.rotation,
            "final transform"
        );
    }

    if tether_metrics::ENABLED {
        let (min_ms, max_ms) = frame_timer.frame_time_range_ms();
        tracing::info!(
            avg_ms = frame_timer.frame_time_ms(),
            min_ms,
            max_ms,
            ticks_per_second = frame_timer.fps(),
            "tick time"
        );
        tracing::info!(total = engine.call_stats().total(), "boundary calls");
        for (call, count) in engine.call_stats().iter() {
            tracing::info!(call, count, "boundary calls");
        }
        for (class, timing) in engine.profiler().report() {
            tracing::info!(class, calls = timing.calls, total = ?timing.total, "script time");
        }
    }
}
