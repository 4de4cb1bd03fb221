//! Floor showcase
//!
//! Renders eight material samples over a reflective checkerboard floor with
//! a projected shadow and accumulated depth of field, orbiting the camera
//! and writing PNG captures.
//!
//! Usage: `floor_showcase [config.toml|config.ron] [output_dir] [frames]`

mod app;

use std::path::PathBuf;

use compositor_engine::config::Config;
use compositor_engine::core::CompositorConfig;
use compositor_engine::foundation::logging;

use app::{AppError, SessionPlan, ShowcaseApp};

const DEFAULT_OUTPUT_DIR: &str = "captures";

fn load_config(path: Option<&String>) -> Result<CompositorConfig, AppError> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            Ok(CompositorConfig::load_from_file(path)?)
        }
        None => {
            log::info!("No configuration given, using defaults");
            Ok(CompositorConfig::default())
        }
    }
}

fn parse_plan(arg: Option<&String>) -> Result<SessionPlan, AppError> {
    let mut plan = SessionPlan::default();
    if let Some(arg) = arg {
        plan.frames = arg
            .parse()
            .map_err(|_| AppError::Usage(format!("frame count must be a non-negative integer, got '{arg}'")))?;
    }
    Ok(plan)
}

fn run(args: &[String]) -> Result<(), AppError> {
    let config = load_config(args.get(1))?;
    let output_dir = args.get(2).map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);
    let plan = parse_plan(args.get(3))?;

    let mut app = ShowcaseApp::new(&config, output_dir)?;
    app.run_script(&plan)?;
    log::info!("Captures written to {}", app.output_dir().display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info}");
        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    logging::init(log::LevelFilter::Info);

    log::info!("Starting floor showcase");

    let args: Vec<String> = std::env::args().collect();
    let result = std::panic::catch_unwind(|| run(&args));

    match result {
        Ok(Ok(())) => {
            log::info!("Showcase finished");
            Ok(())
        }
        Ok(Err(e)) => {
            log::error!("Showcase failed: {e}");
            Err(e.into())
        }
        Err(panic) => {
            log::error!("Showcase panicked: {panic:?}");
            Err("Showcase panicked during execution".into())
        }
    }
}
