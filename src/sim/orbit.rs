//! Orbital motion around the sea axis
//!
//! Enemies and coins ride a circle centred on the sea axis. A single angle
//! parametrises the whole path, so advancing is O(1) and "has it flown past the
//! camera" is just `angle > π`.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{orbit_point, wrap_angle};

/// Position along a circular orbit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orbit {
    /// Radians along the orbit; 0 is level with the sea axis, π/2 straight above it
    pub angle: f32,
    /// Radius from the sea axis
    pub distance: f32,
}

impl Orbit {
    pub fn new(angle: f32, distance: f32) -> Self {
        let mut orbit = Self::default();
        orbit.place(angle, distance);
        orbit
    }

    /// Move to new orbital parameters, keeping the previous ones if they are not finite
    pub fn place(&mut self, angle: f32, distance: f32) {
        debug_assert!(
            angle.is_finite() && distance.is_finite(),
            "non-finite orbit parameters: angle={angle}, distance={distance}"
        );
        if angle.is_finite() && distance.is_finite() {
            self.angle = angle;
            self.distance = distance;
        } else {
            log::warn!(
                "Rejected orbit parameters angle={angle} distance={distance}, keeping angle={} distance={}",
                self.angle,
                self.distance
            );
        }
    }

    /// Advance along the orbit by `step` radians
    pub fn advance(&mut self, step: f32) {
        debug_assert!(step.is_finite(), "non-finite orbit step {step}");
        if step.is_finite() {
            self.angle = wrap_angle(self.angle + step);
        } else {
            log::warn!("Rejected orbit step {step}");
        }
    }

    /// Past the top of the orbit and out of the play envelope
    #[inline]
    pub fn has_passed(&self) -> bool {
        self.angle > PI
    }

    /// World position for a sea of the given radius
    pub fn position(&self, sea_radius: f32) -> Vec3 {
        orbit_point(self.angle, self.distance, sea_radius).extend(0.0)
    }
}
