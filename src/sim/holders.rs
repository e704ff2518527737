//! Enemies and coins: pooled entities riding orbits around the sea axis

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::orbit::Orbit;
use super::pool::{EntityPool, Pooled};
use crate::config::GameConfig;
use crate::wrap_angle;

/// Orbit gap between consecutive enemies of one wave
const ENEMY_SPACING: f32 = 0.1;
/// Orbit gap between consecutive coins of one row
const COIN_SPACING: f32 = 0.02;
/// Most coins in a single row
const MAX_COINS_PER_ROW: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy,
    Coin,
}

/// Render-facing record for an entity; the renderer maps it onto its own node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub active: bool,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            active: false,
        }
    }
}

/// An enemy or coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub orbit: Orbit,
    pub node: SceneNode,
}

impl OrbitingEntity {
    pub fn new(id: u32, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            orbit: Orbit::default(),
            node: SceneNode::default(),
        }
    }

    /// Place on an orbit and snap the node to it
    pub fn place(&mut self, angle: f32, distance: f32, sea_radius: f32) {
        self.orbit.place(angle, distance);
        self.node.position = self.orbit.position(sea_radius);
    }

    /// Advance along the orbit, with a random cosmetic spin
    pub fn advance<R: Rng>(&mut self, step: f32, sea_radius: f32, rng: &mut R) {
        self.orbit.advance(step);
        self.node.position = self.orbit.position(sea_radius);
        self.node.rotation.z = wrap_angle(self.node.rotation.z + rng.random::<f32>() * 0.1);
        self.node.rotation.y = wrap_angle(self.node.rotation.y + rng.random::<f32>() * 0.1);
    }
}

impl Pooled for OrbitingEntity {
    fn pool_id(&self) -> u32 {
        self.id
    }

    fn on_acquire(&mut self) {
        self.node.active = true;
    }

    fn on_release(&mut self) {
        self.node.active = false;
    }
}

/// Random orbit radius around the plane's cruising altitude
fn flight_band_distance<R: Rng>(config: &GameConfig, rng: &mut R) -> f32 {
    config.sea_radius
        + config.plane_default_height
        + (-1.0 + rng.random::<f32>() * 2.0) * (config.plane_amp_height - 20.0)
}

fn advance_all<R: Rng>(pool: &mut EntityPool<OrbitingEntity>, step: f32, sea_radius: f32, rng: &mut R) {
    for entity in pool.in_use_mut() {
        entity.advance(step, sea_radius, rng);
    }
}

/// Pool of enemies
#[derive(Debug, Clone)]
pub struct EnemiesHolder {
    pub pool: EntityPool<OrbitingEntity>,
}

impl EnemiesHolder {
    pub fn new(preallocated: usize) -> Self {
        Self {
            pool: EntityPool::with_preallocated(preallocated, |id| {
                OrbitingEntity::new(id, EntityKind::Enemy)
            }),
        }
    }

    /// Spawn a single enemy at explicit orbit parameters
    pub fn spawn_at(&mut self, angle: f32, distance: f32, sea_radius: f32) -> u32 {
        let enemy = self
            .pool
            .acquire(|id| OrbitingEntity::new(id, EntityKind::Enemy));
        enemy.place(angle, distance, sea_radius);
        enemy.id
    }

    /// Spawn one enemy per level, queued behind the spawn point at a shared altitude
    pub fn spawn_wave<R: Rng>(&mut self, level: u32, config: &GameConfig, rng: &mut R) -> u32 {
        let distance = flight_band_distance(config, rng);
        for i in 0..level {
            self.spawn_at(-(i as f32 * ENEMY_SPACING), distance, config.sea_radius);
        }
        log::debug!("Spawned {level} enemies at distance {distance:.1}");
        level
    }

    pub fn advance<R: Rng>(&mut self, speed: f32, dt: f32, config: &GameConfig, rng: &mut R) {
        advance_all(&mut self.pool, speed * dt * config.enemies_speed, config.sea_radius, rng);
    }
}

/// Pool of coins
#[derive(Debug, Clone)]
pub struct CoinsHolder {
    pub pool: EntityPool<OrbitingEntity>,
}

impl CoinsHolder {
    pub fn new(preallocated: usize) -> Self {
        Self {
            pool: EntityPool::with_preallocated(preallocated, |id| {
                OrbitingEntity::new(id, EntityKind::Coin)
            }),
        }
    }

    /// Spawn a single coin at explicit orbit parameters
    pub fn spawn_at(&mut self, angle: f32, distance: f32, sea_radius: f32) -> u32 {
        let coin = self
            .pool
            .acquire(|id| OrbitingEntity::new(id, EntityKind::Coin));
        coin.place(angle, distance, sea_radius);
        coin.id
    }

    /// Spawn a row of coins undulating around a random altitude
    pub fn spawn_wave<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> u32 {
        let count = 1 + (rng.random::<f32>() * MAX_COINS_PER_ROW) as u32;
        let d = flight_band_distance(config, rng);
        let amplitude = 10.0 + (rng.random::<f32>() * 10.0).round();
        for i in 0..count {
            let i = i as f32;
            self.spawn_at(-(i * COIN_SPACING), d + (i * 0.5).cos() * amplitude, config.sea_radius);
        }
        log::debug!("Spawned {count} coins around distance {d:.1}");
        count
    }

    pub fn advance<R: Rng>(&mut self, speed: f32, dt: f32, config: &GameConfig, rng: &mut R) {
        advance_all(&mut self.pool, speed * dt * config.coins_speed, config.sea_radius, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_wave_matches_level() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemies = EnemiesHolder::new(config.initial_enemy_pool);
        enemies.spawn_wave(3, &config, &mut rng);

        let active = enemies.pool.in_use();
        assert_eq!(active.len(), 3);
        // Drawn from the preallocated pool, no growth
        assert_eq!(enemies.pool.total(), 10);
        let d = active[0].orbit.distance;
        for e in active {
            assert_eq!(e.orbit.distance, d);
            assert!(e.orbit.angle <= 0.0);
            assert!(e.node.active);
            assert_eq!(e.kind, EntityKind::Enemy);
        }
        assert!(d >= 640.0 && d <= 760.0);
    }

    #[test]
    fn test_coin_row_shape() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut coins = CoinsHolder::new(config.initial_coin_pool);
        let n = coins.spawn_wave(&config, &mut rng);
        assert!((1..=10).contains(&n));
        assert_eq!(coins.pool.active_len(), n as usize);
        for coin in coins.pool.in_use() {
            assert!(coin.orbit.angle <= 0.0 && coin.orbit.angle > -0.2);
            assert!(coin.orbit.distance >= 620.0 && coin.orbit.distance <= 780.0);
        }
    }

    #[test]
    fn test_advance_moves_nodes_along_orbit() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut coins = CoinsHolder::new(0);
        coins.spawn_at(0.8, 650.0, config.sea_radius);
        coins.advance(0.001, 100.0, &config, &mut rng);

        let coin = &coins.pool.in_use()[0];
        assert!((coin.orbit.angle - 0.85).abs() < 1e-5);
        assert_eq!(coin.node.position, coin.orbit.position(config.sea_radius));
    }
}
