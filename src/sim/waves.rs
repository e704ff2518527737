//! Animated sea surface
//!
//! Every lattice vertex is an independent oscillator: a random phase, amplitude
//! and angular speed picked once at construction. There is no coupling between
//! neighbours, the surface just looks choppy.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{SEA_LENGTH_SEGMENTS, SEA_RADIAL_SEGMENTS};
use crate::wrap_angle;

/// Oscillator parameters for one sea vertex
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveVertex {
    /// Rest position
    pub base: Vec3,
    /// Current phase (radians)
    pub angle: f32,
    amplitude: f32,
    /// Radians per millisecond
    speed: f32,
}

impl WaveVertex {
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Displaced position for the current phase
    #[inline]
    pub fn displaced(&self) -> Vec3 {
        Vec3::new(
            self.base.x + self.angle.cos() * self.amplitude,
            self.base.y + self.angle.sin() * self.amplitude,
            self.base.z,
        )
    }
}

/// Vertex rings of an open cylinder lying along the z axis.
///
/// `radial` vertices per ring (the seam is shared), `length_segments + 1` rings
/// spread over `length` and centred on z = 0.
pub fn cylinder_lattice(radius: f32, length: f32, radial: usize, length_segments: usize) -> Vec<Vec3> {
    let radial = radial.max(3);
    let mut vertices = Vec::with_capacity(radial * (length_segments + 1));
    for ring in 0..=length_segments {
        let t = ring as f32 / length_segments.max(1) as f32;
        let z = length / 2.0 - t * length;
        for seg in 0..radial {
            let theta = seg as f32 / radial as f32 * TAU;
            vertices.push(Vec3::new(radius * theta.sin(), radius * theta.cos(), z));
        }
    }
    vertices
}

/// The rotating sea cylinder
#[derive(Debug, Clone)]
pub struct Sea {
    /// Rotation about the sea axis (radians, wrapped below 2π)
    pub rotation_z: f32,
    waves: Vec<WaveVertex>,
    vertices: Vec<Vec3>,
}

impl Sea {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let base = cylinder_lattice(
            config.sea_radius,
            config.sea_length,
            SEA_RADIAL_SEGMENTS,
            SEA_LENGTH_SEGMENTS,
        );
        Self::from_vertices(&base, config, rng)
    }

    /// Attach oscillators to an arbitrary set of rest vertices
    pub fn from_vertices<R: Rng>(base: &[Vec3], config: &GameConfig, rng: &mut R) -> Self {
        let waves: Vec<WaveVertex> = base
            .iter()
            .map(|&v| WaveVertex {
                base: v,
                angle: rng.random::<f32>() * TAU,
                amplitude: config.waves_min_amp
                    + rng.random::<f32>() * (config.waves_max_amp - config.waves_min_amp),
                speed: config.waves_min_speed
                    + rng.random::<f32>() * (config.waves_max_speed - config.waves_min_speed),
            })
            .collect();
        let vertices = waves.iter().map(WaveVertex::displaced).collect();
        Self {
            rotation_z: 0.0,
            waves,
            vertices,
        }
    }

    pub fn waves(&self) -> &[WaveVertex] {
        &self.waves
    }

    /// Current displaced vertex positions, index-aligned with the rest lattice
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Displace every vertex for its current phase, then advance the phases
    pub fn move_waves(&mut self, dt: f32) {
        for (wave, vertex) in self.waves.iter_mut().zip(self.vertices.iter_mut()) {
            *vertex = wave.displaced();
            wave.angle = wrap_angle(wave.angle + wave.speed * dt);
        }
    }

    /// Spin the sea with the world
    pub fn rotate(&mut self, speed: f32, dt: f32) {
        self.rotation_z = wrap_angle(self.rotation_z + speed * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_lattice_shape() {
        let v = cylinder_lattice(600.0, 800.0, 40, 10);
        assert_eq!(v.len(), 40 * 11);
        for p in &v {
            assert!((p.truncate().length() - 600.0).abs() < 1e-2);
            assert!(p.z.abs() <= 400.0 + 1e-3);
        }
    }

    #[test]
    fn test_parameters_within_ranges() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let sea = Sea::new(&config, &mut rng);
        for w in sea.waves() {
            assert!(w.amplitude() >= config.waves_min_amp && w.amplitude() <= config.waves_max_amp);
            assert!(w.speed() >= config.waves_min_speed && w.speed() <= config.waves_max_speed);
            assert!(w.angle >= 0.0 && w.angle < TAU);
        }
    }

    #[test]
    fn test_vertices_stay_within_amplitude() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut sea = Sea::new(&config, &mut rng);
        let before: Vec<f32> = sea.waves().iter().map(|w| w.amplitude()).collect();
        for _ in 0..500 {
            sea.move_waves(16.0);
        }
        for ((w, v), amp) in sea.waves().iter().zip(sea.vertices()).zip(before) {
            // Amplitude never changes, displacement never exceeds it
            assert_eq!(w.amplitude(), amp);
            assert!((*v - w.base).length() <= amp + 1e-3);
            assert_eq!(v.z, w.base.z);
        }
    }

    #[test]
    fn test_phase_advances_by_speed() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let base = [Vec3::new(0.0, 600.0, 0.0)];
        let mut sea = Sea::from_vertices(&base, &config, &mut rng);
        let start = sea.waves()[0].angle;
        let speed = sea.waves()[0].speed();
        sea.move_waves(10.0);
        assert!((wrap_angle(start + speed * 10.0) - sea.waves()[0].angle).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_wraps() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut sea = Sea::new(&config, &mut rng);
        sea.rotate(0.01, 1000.0);
        assert!(sea.rotation_z >= 0.0 && sea.rotation_z < TAU);
    }
}
