//! Headless terrain streaming walker
//!
//! Moves an observer along a straight line and streams chunks around it,
//! logging what every tick did.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use terrastream::utils::settings::{DEFAULT_SETTINGS_FILE, load_settings, save_settings};
use terrastream::{EvictionPolicy, SceneSurface, StreamSettings, TickReport, WorldStreamer};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Reject,
    Lru,
}

impl From<Policy> for EvictionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Reject => EvictionPolicy::Reject,
            Policy::Lru => EvictionPolicy::LeastRecentlyUsed,
        }
    }
}

/// Voxel terrain streaming demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Noise seed (random in 0..100 when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    steps: u32,

    /// Observer movement along x per tick
    #[arg(long, default_value_t = 1.5)]
    step_x: f32,

    /// Observer movement along z per tick
    #[arg(long, default_value_t = 0.0)]
    step_z: f32,

    #[arg(long, default_value_t = 0.0)]
    start_x: f32,

    #[arg(long, default_value_t = 0.0)]
    start_z: f32,

    /// Override the resident chunk cap
    #[arg(long)]
    max_chunks: Option<usize>,

    /// Override the eviction policy
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Load settings from this file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to this file (defaults to stream_settings.bin when given without a value)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_SETTINGS_FILE)]
    save_settings: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => match load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to load settings from {}: {}", path.display(), e);
                tracing::warn!("Using default settings.");
                StreamSettings::default()
            }
        },
        None => StreamSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(max_chunks) = args.max_chunks {
        settings.max_chunks = max_chunks;
    }
    if let Some(policy) = args.policy {
        settings.eviction = policy.into();
    }

    if let Some(path) = &args.save_settings {
        match save_settings(path, &settings) {
            Ok(()) => tracing::info!("Settings written to {}", path.display()),
            Err(e) => tracing::error!("Failed to save settings: {}", e),
        }
    }

    let seed = settings.resolve_seed();
    let mut surface = SceneSurface::new();
    let mut position = Vec3::new(args.start_x, 5.0, args.start_z);
    let mut streamer = WorldStreamer::from_settings(&settings, seed, position, &mut surface);
    tracing::info!(
        "Streaming with seed {}, cap {} chunks, radius {}, {:?}",
        seed,
        streamer.store().capacity(),
        streamer.view_radius(),
        streamer.store().policy()
    );
    let step = Vec3::new(args.step_x, 0.0, args.step_z);
    let mut totals = TickReport::default();

    for tick in 0..args.steps {
        let report = streamer.on_tick(position, &mut surface);
        if let Some(eye) = streamer.snap_to_ground(position) {
            position.y = eye;
        }
        if !report.is_idle() {
            tracing::info!(
                "tick {} at {} (y {:.1}): {:?}",
                tick,
                streamer.current_chunk(),
                position.y,
                report
            );
        }
        totals.accumulate(&report);
        position += step;
    }

    let resident_bytes: usize = streamer
        .store()
        .active_objects()
        .map(|chunk| chunk.mesh.byte_size())
        .sum();
    tracing::info!(
        "Done: {:?}, {} resident ({} KiB), {} attached",
        totals,
        streamer.store().count(),
        resident_bytes / 1024,
        surface.len()
    );
}
