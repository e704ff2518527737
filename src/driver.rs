//! Frame driver: turns display refreshes into simulation ticks
//!
//! Wall-clock mode runs exactly one tick per frame with the clamped frame
//! delta. Fixed mode drains an accumulator in `FIXED_STEP_MS` steps, capped at
//! `MAX_SUBSTEPS` per frame.
//!
//! Every frame starts with an empty event buffer, so [`World::events`] and the
//! snapshot only ever hold what the last frame emitted.

use crate::config::TimestepMode;
use crate::consts::{FIXED_STEP_MS, MAX_SUBSTEPS};
use crate::sim::{TickInput, World, tick};

#[derive(Debug, Clone)]
pub struct FrameDriver {
    mode: TimestepMode,
    max_frame_delta_ms: f32,
    accumulator: f32,
    last_time_ms: Option<f64>,
    /// Release seen but not yet consumed by a tick
    pending_release: bool,
}

impl FrameDriver {
    pub fn new(mode: TimestepMode, max_frame_delta_ms: f32) -> Self {
        Self {
            mode,
            max_frame_delta_ms,
            accumulator: 0.0,
            last_time_ms: None,
            pending_release: false,
        }
    }

    /// Driver configured from the world's rules
    pub fn for_world(world: &World) -> Self {
        Self::new(world.config.rules.timestep, world.config.max_frame_delta_ms)
    }

    pub fn mode(&self) -> TimestepMode {
        self.mode
    }

    /// Run the ticks for a frame presented at `now_ms`; returns how many ran
    pub fn frame(&mut self, world: &mut World, input: &TickInput, now_ms: f64) -> u32 {
        let delta = match self.last_time_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(world, input, delta)
    }

    /// Run the ticks for a frame that took `delta_ms`; returns how many ran
    pub fn advance(&mut self, world: &mut World, input: &TickInput, delta_ms: f32) -> u32 {
        let delta = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, self.max_frame_delta_ms)
        } else {
            0.0
        };
        self.pending_release |= input.release;
        world.begin_frame();

        match self.mode {
            TimestepMode::WallClock => {
                self.step(world, input, delta);
                1
            }
            TimestepMode::Fixed => {
                self.accumulator += delta;
                let mut substeps = 0;
                while self.accumulator >= FIXED_STEP_MS && substeps < MAX_SUBSTEPS {
                    self.step(world, input, FIXED_STEP_MS);
                    self.accumulator -= FIXED_STEP_MS;
                    substeps += 1;
                }
                if substeps == MAX_SUBSTEPS && self.accumulator >= FIXED_STEP_MS {
                    log::warn!("Dropping {:.1} ms of backlog", self.accumulator);
                    self.accumulator = 0.0;
                }
                substeps
            }
        }
    }

    fn step(&mut self, world: &mut World, input: &TickInput, dt: f32) {
        let input = TickInput {
            release: std::mem::take(&mut self.pending_release),
            ..*input
        };
        tick(world, &input, dt);
    }
}
