//! Aviator headless runner
//!
//! Flies a scripted pointer through the simulation and logs what happens.
//! Rendering and input capture belong to the embedding frontend.
//!
//! Usage: `aviator [config.json] [full|streamlined|minimal]`

use std::process::ExitCode;

use aviator::sim::{GameEvent, GameStatus, TickInput, World};
use aviator::{FrameDriver, GameConfig, RulesPreset};
use glam::Vec2;

/// Simulated session length in frames (60 Hz)
const FRAMES: u32 = 60 * 120;
const FRAME_MS: f64 = 1000.0 / 60.0;

fn load_config() -> Result<GameConfig, aviator::ConfigError> {
    let mut config = GameConfig::default();
    let mut preset = None;
    for arg in std::env::args().skip(1) {
        match RulesPreset::from_str(&arg) {
            Some(p) => preset = Some(p),
            None => config = GameConfig::load(&arg)?,
        }
    }
    if let Some(preset) = preset {
        config.rules = preset.rules();
        log::info!("Using {} rules", preset.as_str());
    }
    Ok(config)
}

/// Lazy figure-eight sweep standing in for the mouse
fn scripted_pointer(frame: u32) -> Vec2 {
    let t = frame as f32 / 60.0;
    Vec2::new((t * 0.7).sin() * 0.6, (t * 1.3).sin() * 0.8)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Aviator (headless) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut world = World::new(config, 2024);
    let mut driver = FrameDriver::for_world(&world);
    let mut input = TickInput::default();
    let mut runs = 1;
    let mut best = 0;

    for frame in 0..FRAMES {
        input.pointer = scripted_pointer(frame);
        // Tap to replay as soon as the prompt shows
        input.release = world.state.status == GameStatus::WaitingReplay;
        driver.frame(&mut world, &input, frame as f64 * FRAME_MS);

        for event in world.drain_events() {
            match event {
                GameEvent::GameOver { distance } => {
                    best = best.max(distance);
                    log::info!("Run {runs} ended at {distance}");
                }
                GameEvent::HideReplay => runs += 1,
                GameEvent::LevelUp { level } => log::info!("Level {level}"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    best = best.max(world.state.distance_units());
    let snapshot = world.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize snapshot: {e}"),
    }
    println!("runs: {runs}, best distance: {best}");
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The frontend drives the simulation through the library on wasm
}
