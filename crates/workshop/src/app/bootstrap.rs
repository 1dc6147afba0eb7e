use std::path::PathBuf;

use engine::{resolve_app_paths, LoopConfig, Scene, Viewport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay;
use super::tuning::{load_or_default, tuning_path, TuningError, TUNING_ENV_VAR};

const SEED_ENV_VAR: &str = "WORKSHOP_SEED";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, TuningError> {
    init_tracing();
    info!("=== Elf Workshop Startup ===");

    let assets_dir = match resolve_app_paths() {
        Ok(paths) => {
            info!(root = %paths.root.display(), "app_paths_resolved");
            Some(paths.assets_dir)
        }
        Err(err) => {
            warn!(error = %err, "app_paths_unresolved_using_defaults");
            None
        }
    };

    let mut tuning = match tuning_file(assets_dir) {
        Some(path) => load_or_default(&path)?,
        None => Default::default(),
    };
    if let Some(seed) = seed_from_env() {
        tuning.seed = Some(seed);
    }
    info!(
        seed = ?tuning.seed,
        interaction_distance = tuning.interaction_distance,
        elf_speed = tuning.elf.speed,
        "tuning_ready"
    );

    let config = LoopConfig::default();
    let viewport = Viewport {
        width: config.window_width,
        height: config.window_height,
    };
    let scene = gameplay::build_scene(tuning, viewport);
    Ok(AppWiring { config, scene })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn tuning_file(assets_dir: Option<PathBuf>) -> Option<PathBuf> {
    tuning_path(assets_dir.as_deref(), std::env::var(TUNING_ENV_VAR).ok())
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(err) => {
            warn!(value = %raw, error = %err, "seed_env_ignored");
            None
        }
    }
}
