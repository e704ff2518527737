//! Per-tick world update
//!
//! Order within a tick is fixed: replay handling, run bookkeeping (spawn
//! cadence, speed, plane, distance, energy), entity motion and collisions,
//! then purely decorative updates. Collisions read the plane position that was
//! updated earlier in the same tick.

use glam::{Vec2, Vec3};

use super::collision::{Resolution, resolve};
use super::events::GameEvent;
use super::holders::EntityKind;
use super::state::{GameStatus, World, cadence_reached};
use crate::normalize;

/// Pointer X range mapped onto the throttle range
const THROTTLE_POINTER_RANGE: f32 = 0.5;

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer position, normalized to [-1, 1] on both axes (y up)
    pub pointer: Vec2,
    /// Pointer/touch released since the last tick
    pub release: bool,
}

/// Advance the world by `dt` milliseconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    debug_assert!(dt.is_finite() && dt >= 0.0, "invalid timestep {dt}");
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    world.state.time_ticks += 1;

    if input.release && world.state.status == GameStatus::WaitingReplay {
        world.reset_game();
        world.events.push(GameEvent::HideReplay);
    }

    match world.state.status {
        GameStatus::Playing => update_run(world, input.pointer, dt),
        GameStatus::GameOver => update_fall(world, dt),
        GameStatus::WaitingReplay => {}
    }

    world.plane.spin_propeller(world.state.plane_speed, dt);
    world.sea.rotate(world.state.speed, dt);
    world.ambient.ease(dt);

    update_entities(world, dt);

    let speed = world.state.speed;
    world.sky.move_clouds(speed, dt, &mut world.rng);
    world.sea.move_waves(dt);
}

/// Spawn cadence, speed ramp, steering, distance and energy while flying
fn update_run(world: &mut World, pointer: Vec2, dt: f32) {
    let World {
        config,
        state,
        plane,
        enemies,
        coins,
        rng,
        events,
        ..
    } = world;
    let rules = config.rules;
    let floor = state.distance_units();

    if rules.coins_enabled
        && cadence_reached(floor, config.distance_for_coins_spawn, &mut state.coin_last_spawn)
    {
        let count = coins.spawn_wave(config, rng);
        events.push(GameEvent::CoinsSpawned { count });
    }

    if cadence_reached(floor, config.distance_for_speed_update, &mut state.speed_last_update)
        && rules.speed_ramp
    {
        state.target_base_speed += config.increment_speed_by_time * dt;
        events.push(GameEvent::SpeedUp {
            target_base_speed: state.target_base_speed,
        });
    }

    if cadence_reached(floor, config.distance_for_enemies_spawn, &mut state.enemy_last_spawn) {
        let count = enemies.spawn_wave(state.level, config, rng);
        events.push(GameEvent::EnemiesSpawned { count });
    }

    if rules.speed_ramp
        && cadence_reached(floor, config.distance_for_level_update, &mut state.level_last_update)
    {
        state.level += 1;
        state.target_base_speed = config.init_speed + config.increment_speed_by_level * state.level as f32;
        log::info!("Level {} at distance {floor}", state.level);
        events.push(GameEvent::LevelUp { level: state.level });
    }

    if rules.speed_ramp {
        let k = (dt * config.base_speed_easing).min(1.0);
        state.base_speed += (state.target_base_speed - state.base_speed) * k;
    }

    state.plane_speed = normalize(
        pointer.x,
        -THROTTLE_POINTER_RANGE,
        THROTTLE_POINTER_RANGE,
        config.plane_min_speed,
        config.plane_max_speed,
    );
    plane.steer(pointer, config, dt);

    state.distance += state.speed * dt * config.ratio_speed_distance;

    let mut depleted = false;
    if rules.tracks_energy() {
        state.remove_energy(state.speed * dt * config.ratio_speed_energy);
        depleted = state.is_depleted();
    }

    state.speed = state.base_speed * state.plane_speed;

    if depleted {
        world.enter_game_over();
    }
}

/// Crash sequence: world slows, plane tumbles and falls until it passes the floor
fn update_fall(world: &mut World, dt: f32) {
    let config = &world.config;
    let state = &mut world.state;
    state.speed *= config.game_over_speed_decay;
    state.fall_speed *= config.fall_acceleration;
    world.plane.fall(state.fall_speed, config, dt);

    if world.plane.position.y < config.game_over_floor {
        state.status = GameStatus::WaitingReplay;
        log::info!("Plane down, waiting for replay");
        world.events.push(GameEvent::ShowReplay);
    }
}

/// Move coins and enemies, then resolve hits and expiries against the plane
fn update_entities(world: &mut World, dt: f32) {
    let speed = world.state.speed;
    let vehicle = world.plane.position;
    let mut resolutions = std::mem::take(&mut world.resolutions);
    resolutions.clear();

    world.coins.advance(speed, dt, &world.config, &mut world.rng);
    resolve(
        &mut world.coins.pool,
        vehicle,
        world.config.coin_distance_tolerance,
        &mut resolutions,
    );

    world.enemies.advance(speed, dt, &world.config, &mut world.rng);
    resolve(
        &mut world.enemies.pool,
        vehicle,
        world.config.enemy_distance_tolerance,
        &mut resolutions,
    );

    for resolution in &resolutions {
        if let Resolution::Hit { id, kind, offset } = *resolution {
            if world.state.status != GameStatus::Playing {
                continue;
            }
            match kind {
                EntityKind::Coin => collect_coin(world, id),
                EntityKind::Enemy => strike_enemy(world, id, offset),
            }
        }
    }

    world.resolutions = resolutions;
}

fn collect_coin(world: &mut World, id: u32) {
    if world.config.rules.tracks_energy() {
        world.state.add_energy(world.config.coin_value);
    }
    let energy = world.reported_energy();
    world.events.push(GameEvent::CoinCollected { id, energy });
}

fn strike_enemy(world: &mut World, id: u32, offset: Vec3) {
    world.ambient.flash();
    world.plane.knock_back(offset, world.config.collision_impulse);

    let fatal = if world.config.rules.tracks_energy() {
        world.state.remove_energy(world.config.enemy_value);
        world.state.is_depleted()
    } else {
        true
    };
    let energy = world.reported_energy();
    world.events.push(GameEvent::EnemyHit { id, energy });
    log::debug!("Enemy {id} hit, energy {energy:?}");

    if fatal {
        world.enter_game_over();
    }
}
