//! Decorative sky: a ring of tumbling clouds and the ambient light level
//!
//! Nothing here feeds back into gameplay.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{AMBIENT_EASING, AMBIENT_FLASH_INTENSITY, AMBIENT_REST_INTENSITY};
use crate::wrap_angle;

/// One cube of a cloud
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CloudBlock {
    /// Offset inside the cloud
    pub offset: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub position: Vec3,
    pub rotation_z: f32,
    pub scale: f32,
    pub blocks: Vec<CloudBlock>,
}

impl Cloud {
    fn new<R: Rng>(rng: &mut R) -> Self {
        let n_blocks = 3 + (rng.random::<f32>() * 3.0) as usize;
        let blocks = (0..n_blocks)
            .map(|i| {
                let offset = Vec3::new(
                    i as f32 * 15.0,
                    rng.random::<f32>() * 10.0,
                    rng.random::<f32>() * 10.0,
                );
                let rotation = Vec3::new(0.0, rng.random::<f32>() * TAU, rng.random::<f32>() * TAU);
                let scale = 0.1 + rng.random::<f32>() * 0.9;
                CloudBlock {
                    offset,
                    rotation,
                    scale,
                }
            })
            .collect();
        Self {
            position: Vec3::ZERO,
            rotation_z: 0.0,
            scale: 1.0,
            blocks,
        }
    }

    /// Tumble the blocks; later blocks spin faster
    fn tumble<R: Rng>(&mut self, rng: &mut R) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            let k = (i + 1) as f32;
            block.rotation.z = wrap_angle(block.rotation.z + rng.random::<f32>() * 0.005 * k);
            block.rotation.y = wrap_angle(block.rotation.y + rng.random::<f32>() * 0.002 * k);
        }
    }
}

/// Ring of clouds circling the sea axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sky {
    /// Rotation of the whole ring about the sea axis
    pub rotation_z: f32,
    pub clouds: Vec<Cloud>,
}

impl Sky {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let n = config.cloud_count;
        let step = TAU / n.max(1) as f32;
        let clouds = (0..n)
            .map(|i| {
                let mut cloud = Cloud::new(rng);
                let a = step * i as f32;
                let h = config.sea_radius + 150.0 + rng.random::<f32>() * 200.0;
                cloud.position = Vec3::new(a.cos() * h, a.sin() * h, -300.0 - rng.random::<f32>() * 500.0);
                cloud.rotation_z = a + FRAC_PI_2;
                cloud.scale = 1.0 + rng.random::<f32>() * 2.0;
                cloud
            })
            .collect();
        Self {
            rotation_z: 0.0,
            clouds,
        }
    }

    pub fn move_clouds<R: Rng>(&mut self, speed: f32, dt: f32, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.tumble(rng);
        }
        self.rotation_z = wrap_angle(self.rotation_z + speed * dt);
    }
}

/// Ambient light intensity, eased back to rest after a flash
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub intensity: f32,
    pub target: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            intensity: AMBIENT_REST_INTENSITY,
            target: AMBIENT_REST_INTENSITY,
        }
    }
}

impl AmbientLight {
    pub fn flash(&mut self) {
        self.intensity = AMBIENT_FLASH_INTENSITY;
    }

    pub fn ease(&mut self, dt: f32) {
        let k = (dt * AMBIENT_EASING).min(1.0);
        self.intensity += (self.target - self.intensity) * k;
    }
}
