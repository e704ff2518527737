//! Game state and the owned world context
//!
//! [`GameState`] holds the run scalars and is rebuilt wholesale on replay.
//! [`World`] owns everything a tick touches: state, plane, entity holders, sea,
//! sky and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Resolution;
use super::events::GameEvent;
use super::holders::{CoinsHolder, EnemiesHolder};
use super::plane::Plane;
use super::sky::{AmbientLight, Sky};
use super::waves::Sea;
use crate::config::GameConfig;
use crate::consts::{ENERGY_DEPLETED, MAX_ENERGY};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Flying
    #[default]
    Playing,
    /// Crashed, plane is falling
    GameOver,
    /// Plane has hit the floor, replay prompt is up
    WaitingReplay,
}

/// Run scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    /// World speed (radians per millisecond at the sea surface)
    pub speed: f32,
    pub base_speed: f32,
    pub target_base_speed: f32,
    /// Pointer-driven throttle multiplier
    pub plane_speed: f32,
    pub distance: f32,
    /// 0-100, only meaningful with the depleting energy model
    pub energy: f32,
    pub level: u32,
    pub speed_last_update: u64,
    pub level_last_update: u64,
    pub coin_last_spawn: u64,
    pub enemy_last_spawn: u64,
    /// Game over descent rate, grows every tick
    pub fall_speed: f32,
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            status: GameStatus::Playing,
            speed: 0.0,
            base_speed: config.init_speed,
            target_base_speed: config.init_speed,
            plane_speed: 0.0,
            distance: 0.0,
            energy: MAX_ENERGY,
            level: 1,
            speed_last_update: 0,
            level_last_update: 0,
            coin_last_spawn: 0,
            enemy_last_spawn: 0,
            fall_speed: config.plane_fall_speed,
            time_ticks: 0,
        }
    }

    /// Whole units travelled, as shown on the HUD
    pub fn distance_units(&self) -> u64 {
        self.distance.max(0.0).floor() as u64
    }

    pub fn add_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(MAX_ENERGY);
    }

    pub fn remove_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn is_depleted(&self) -> bool {
        self.energy < ENERGY_DEPLETED
    }

    /// Fraction of the way to the next level
    pub fn level_progress(&self, config: &GameConfig) -> f32 {
        let every = config.distance_for_level_update.max(1) as f32;
        (self.distance % every) / every
    }
}

/// Fires once when `floor` has crossed a multiple of `every` since the last
/// firing, even if a long tick jumped past the multiple itself.
pub fn cadence_reached(floor: u64, every: u64, last: &mut u64) -> bool {
    if every == 0 || floor / every <= *last / every {
        return false;
    }
    *last = floor;
    true
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub seed: u64,
    pub state: GameState,
    pub plane: Plane,
    pub enemies: EnemiesHolder,
    pub coins: CoinsHolder,
    pub sea: Sea,
    pub sky: Sky,
    pub ambient: AmbientLight,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Reused every tick to avoid per-frame allocation
    pub(crate) resolutions: Vec<Resolution>,
}

impl World {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let sea = Sea::new(&config, &mut rng);
        let sky = Sky::new(&config, &mut rng);
        log::info!(
            "World created (seed {seed}, rules {:?}, {} sea vertices)",
            config.rules,
            sea.vertices().len()
        );
        Self {
            state: GameState::new(&config),
            plane: Plane::new(&config),
            enemies: EnemiesHolder::new(config.initial_enemy_pool),
            coins: CoinsHolder::new(config.initial_coin_pool),
            sea,
            sky,
            ambient: AmbientLight::default(),
            rng,
            events: Vec::new(),
            resolutions: Vec::new(),
            seed,
            config,
        }
    }

    /// Start a fresh run: new scalars, every entity back in its pool
    pub fn reset_game(&mut self) {
        self.state = GameState::new(&self.config);
        self.enemies.pool.release_all();
        self.coins.pool.release_all();
        self.plane.clear_impulse();
        log::info!("Game reset");
    }

    /// Take the events emitted since the last drain or frame start
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted during the current frame
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Forget the previous frame's events; the buffer keeps its capacity
    pub(crate) fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Energy as reported to the UI, `None` when the rules don't track it
    pub fn reported_energy(&self) -> Option<f32> {
        self.config
            .rules
            .tracks_energy()
            .then_some(self.state.energy)
    }

    pub(crate) fn enter_game_over(&mut self) {
        if self.state.status != GameStatus::Playing {
            return;
        }
        self.state.status = GameStatus::GameOver;
        let distance = self.state.distance_units();
        log::info!("Game over at distance {distance} (level {})", self.state.level);
        self.events.push(GameEvent::GameOver { distance });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_fires_once_per_multiple() {
        let mut last = 0;
        assert!(!cadence_reached(0, 10, &mut last));
        assert!(!cadence_reached(9, 10, &mut last));
        assert!(cadence_reached(10, 10, &mut last));
        assert!(!cadence_reached(10, 10, &mut last));
        assert!(!cadence_reached(11, 10, &mut last));
        assert!(cadence_reached(20, 10, &mut last));
        assert_eq!(last, 20);
    }

    #[test]
    fn test_cadence_fires_when_tick_skips_multiple() {
        let mut last = 9;
        assert!(cadence_reached(12, 10, &mut last));
        assert_eq!(last, 12);
        assert!(!cadence_reached(19, 10, &mut last));
        // Jumping two multiples at once still fires a single time
        assert!(cadence_reached(41, 10, &mut last));
        assert!(!cadence_reached(41, 10, &mut last));
    }

    #[test]
    fn test_events_cleared_at_frame_start() {
        let mut world = World::new(GameConfig::default(), 42);
        world.events.push(GameEvent::ShowReplay);
        world.begin_frame();
        assert!(world.events().is_empty());
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_energy_is_bounded() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.add_energy(50.0);
        assert_eq!(state.energy, 100.0);
        state.remove_energy(250.0);
        assert_eq!(state.energy, 0.0);
        assert!(state.is_depleted());
    }

    #[test]
    fn test_level_progress() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.distance = 1250.0;
        assert!((state.level_progress(&config) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_reset_returns_entities_to_pools() {
        let mut world = World::new(GameConfig::default(), 42);
        world.enemies.spawn_at(0.1, 700.0, 600.0);
        world.coins.spawn_at(0.2, 700.0, 600.0);
        world.state.distance = 512.0;
        world.reset_game();
        assert!(world.enemies.pool.is_empty());
        assert!(world.coins.pool.is_empty());
        assert_eq!(world.coins.pool.free_len(), 20);
        assert_eq!(world.state, GameState::new(&world.config));
    }
}
