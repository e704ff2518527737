//! Per-frame view of the world for the rendering and UI layers.
//!
//! Sea vertices are not copied here; renderers read `World::sea.vertices()`
//! directly.

use glam::Vec3;
use serde::Serialize;

use super::events::GameEvent;
use super::holders::OrbitingEntity;
use super::state::{GameStatus, World};
use crate::consts::{ENERGY_CRITICAL, ENERGY_LOW};

/// HUD energy bar state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyAlert {
    Normal,
    /// Bar turns red
    Low,
    /// Bar blinks
    Critical,
}

impl EnergyAlert {
    pub fn for_energy(energy: f32) -> Self {
        if energy < ENERGY_CRITICAL {
            EnergyAlert::Critical
        } else if energy < ENERGY_LOW {
            EnergyAlert::Low
        } else {
            EnergyAlert::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanePose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub propeller_rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl From<&OrbitingEntity> for EntityView {
    fn from(entity: &OrbitingEntity) -> Self {
        Self {
            id: entity.id,
            position: entity.node.position,
            rotation: entity.node.rotation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub status: GameStatus,
    pub distance: u64,
    pub level: u32,
    /// 0-1 progress toward the next level
    pub level_progress: f32,
    pub energy: Option<f32>,
    pub energy_alert: Option<EnergyAlert>,
    pub speed: f32,
    pub plane: PlanePose,
    pub sea_rotation: f32,
    pub sky_rotation: f32,
    pub ambient_intensity: f32,
    pub ambient_target: f32,
    pub coins: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
    /// Emitted during the last frame
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn snapshot(&self) -> FrameSnapshot {
        let energy = self.reported_energy();
        FrameSnapshot {
            status: self.state.status,
            distance: self.state.distance_units(),
            level: self.state.level,
            level_progress: self.state.level_progress(&self.config),
            energy,
            energy_alert: energy.map(EnergyAlert::for_energy),
            speed: self.state.speed,
            plane: PlanePose {
                position: self.plane.position,
                rotation: self.plane.rotation,
                propeller_rotation: self.plane.propeller_rotation,
            },
            sea_rotation: self.sea.rotation_z,
            sky_rotation: self.sky.rotation_z,
            ambient_intensity: self.ambient.intensity,
            ambient_target: self.ambient.target,
            coins: self.coins.pool.in_use().iter().map(EntityView::from).collect(),
            enemies: self.enemies.pool.in_use().iter().map(EntityView::from).collect(),
            events: self.events.clone(),
        }
    }
}
