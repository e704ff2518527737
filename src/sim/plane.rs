//! Player plane: pointer-driven steering, collision knockback and the game over fall

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::{normalize, wrap_angle};

/// Pointer Y range mapped onto the full altitude band
const POINTER_Y_RANGE: f32 = 0.75;
/// Horizontal target sits between these fractions of `plane_amp_width` (negative x)
const TARGET_X_NEAR: f32 = 0.7;
const TARGET_X_FAR: f32 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub position: Vec3,
    /// x is the pitch proxy, z the roll proxy
    pub rotation: Vec3,
    pub propeller_rotation: f32,
    /// Knockback offset added to the steering target
    pub collision_displacement: Vec2,
    /// Per-tick growth of the knockback offset
    pub collision_speed: Vec2,
}

impl Plane {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.plane_default_height, 0.0),
            rotation: Vec3::ZERO,
            propeller_rotation: 0.0,
            collision_displacement: Vec2::ZERO,
            collision_speed: Vec2::ZERO,
        }
    }

    /// Steering target for a pointer in [-1, 1]², before knockback
    pub fn target_for(pointer: Vec2, config: &GameConfig) -> Vec2 {
        let h = config.plane_default_height;
        let a = config.plane_amp_height;
        let w = config.plane_amp_width;
        Vec2::new(
            normalize(pointer.x, -1.0, 1.0, -w * TARGET_X_NEAR, -w * TARGET_X_FAR),
            normalize(pointer.y, -POINTER_Y_RANGE, POINTER_Y_RANGE, h - a, h + a),
        )
    }

    /// Ease toward the pointer target and bank into the motion
    pub fn steer(&mut self, pointer: Vec2, config: &GameConfig, dt: f32) {
        self.collision_displacement += self.collision_speed;
        let target = Self::target_for(pointer, config) + self.collision_displacement;

        let k = (dt * config.plane_move_sensitivity).min(1.0);
        self.position.x += (target.x - self.position.x) * k;
        self.position.y += (target.y - self.position.y) * k;

        self.rotation.z = (target.y - self.position.y) * dt * config.plane_rot_x_sensitivity;
        self.rotation.x = (self.position.y - target.y) * dt * config.plane_rot_z_sensitivity;

        let ks = (dt * config.collision_speed_damping).min(1.0);
        let kd = (dt * config.collision_displacement_damping).min(1.0);
        self.collision_speed -= self.collision_speed * ks;
        self.collision_displacement -= self.collision_displacement * kd;
    }

    /// Shove the plane away from an entity; `offset` points from the entity to the plane
    pub fn knock_back(&mut self, offset: Vec3, impulse: f32) {
        let d = offset.length();
        if d > f32::EPSILON {
            self.collision_speed = Vec2::new(offset.x, offset.y) * (impulse / d);
        }
    }

    /// Game over: roll toward nose-down and drop
    pub fn fall(&mut self, fall_speed: f32, config: &GameConfig, dt: f32) {
        self.rotation.z += (-FRAC_PI_2 - self.rotation.z) * (config.game_over_roll_easing * dt).min(1.0);
        self.rotation.x = wrap_angle(self.rotation.x + config.game_over_pitch_rate * dt);
        self.position.y -= fall_speed * dt;
    }

    pub fn spin_propeller(&mut self, plane_speed: f32, dt: f32) {
        self.propeller_rotation = wrap_angle(self.propeller_rotation + 0.2 + plane_speed * dt * 0.005);
    }

    /// Drop any knockback left over from the last run
    pub fn clear_impulse(&mut self) {
        self.collision_displacement = Vec2::ZERO;
        self.collision_speed = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_mapping() {
        let config = GameConfig::default();
        let top_left = Plane::target_for(Vec2::new(-1.0, 1.0), &config);
        assert!((top_left.x + 52.5).abs() < 1e-3);
        assert!((top_left.y - 180.0).abs() < 1e-3);

        let bottom_right = Plane::target_for(Vec2::new(1.0, -1.0), &config);
        assert!((bottom_right.x + 75.0).abs() < 1e-3);
        assert!((bottom_right.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_steer_converges_on_target() {
        let config = GameConfig::default();
        let mut plane = Plane::new(&config);
        let pointer = Vec2::new(0.0, 0.5);
        let target = Plane::target_for(pointer, &config);
        for _ in 0..400 {
            plane.steer(pointer, &config, 16.0);
        }
        assert!((plane.position.truncate() - target).length() < 0.1);
        assert!(plane.rotation.z.abs() < 1e-3);
    }

    #[test]
    fn test_banking_sign_follows_climb() {
        let config = GameConfig::default();
        let mut plane = Plane::new(&config);
        plane.steer(Vec2::new(0.0, 0.75), &config, 16.0);
        assert!(plane.rotation.z > 0.0);
        assert!(plane.rotation.x < 0.0);
    }

    #[test]
    fn test_knockback_decays() {
        let config = GameConfig::default();
        let mut plane = Plane::new(&config);
        plane.knock_back(Vec3::new(3.0, 4.0, 0.0), 100.0);
        assert!((plane.collision_speed - Vec2::new(60.0, 80.0)).length() < 1e-3);

        plane.steer(Vec2::ZERO, &config, 16.0);
        assert!(plane.collision_displacement.length() > 0.0);
        for _ in 0..600 {
            plane.steer(Vec2::ZERO, &config, 16.0);
        }
        assert!(plane.collision_speed.length() < 1e-3);
        assert!(plane.collision_displacement.length() < 1e-2);
    }

    #[test]
    fn test_long_frame_does_not_overshoot() {
        let config = GameConfig::default();
        let mut plane = Plane::new(&config);
        let pointer = Vec2::new(0.0, 0.75);
        plane.steer(pointer, &config, 10_000.0);
        assert!((plane.position.y - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_fall_descends_and_rolls() {
        let config = GameConfig::default();
        let mut plane = Plane::new(&config);
        let y0 = plane.position.y;
        plane.fall(0.5, &config, 16.0);
        assert!((plane.position.y - (y0 - 8.0)).abs() < 1e-4);
        assert!(plane.rotation.z < 0.0);
        assert!(plane.rotation.x > 0.0);
    }
}
