//! Aviator - an endless arcade flight simulation core
//!
//! Core modules:
//! - `sim`: Deterministic world state (plane, orbiting entities, sea, game status)
//! - `config`: Tunable constants and rule-set variants
//! - `driver`: Turns display frames into simulation ticks
//!
//! All rates are expressed per millisecond of simulated time.

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, EnergyModel, GameConfig, Rules, RulesPreset, TimestepMode};
pub use driver::FrameDriver;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step in milliseconds (60 Hz)
    pub const FIXED_STEP_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Default cap on a single frame delta (backgrounded tabs, debugger pauses)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Energy bounds
    pub const MAX_ENERGY: f32 = 100.0;
    /// Below this the plane runs out of fuel
    pub const ENERGY_DEPLETED: f32 = 1.0;
    /// HUD thresholds
    pub const ENERGY_LOW: f32 = 50.0;
    pub const ENERGY_CRITICAL: f32 = 30.0;

    /// Ambient light resting intensity and enemy-hit flash
    pub const AMBIENT_REST_INTENSITY: f32 = 0.5;
    pub const AMBIENT_FLASH_INTENSITY: f32 = 2.0;
    pub const AMBIENT_EASING: f32 = 0.005;

    /// Sea lattice resolution
    pub const SEA_RADIAL_SEGMENTS: usize = 40;
    pub const SEA_LENGTH_SEGMENTS: usize = 10;
}

/// Clamp `v` into `[vmin, vmax]` and remap it linearly onto `[tmin, tmax]`.
///
/// A degenerate source range (`vmin == vmax`) maps everything to `tmin`.
#[inline]
pub fn normalize(v: f32, vmin: f32, vmax: f32, tmin: f32, tmax: f32) -> f32 {
    let dv = vmax - vmin;
    if dv == 0.0 {
        return tmin;
    }
    let nv = v.min(vmax).max(vmin);
    let pc = (nv - vmin) / dv;
    tmin + pc * (tmax - tmin)
}

/// Wrap an orbit angle below 2π.
///
/// Negative angles are left alone: freshly spawned entities queue up behind
/// the spawn point and only become visible once they advance past zero.
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    while angle >= TAU {
        angle -= TAU;
    }
    angle
}

/// Point on an orbit around the sea axis, which sits `sea_radius` below the origin
#[inline]
pub fn orbit_point(angle: f32, distance: f32, sea_radius: f32) -> Vec2 {
    Vec2::new(angle.cos() * distance, -sea_radius + angle.sin() * distance)
}
