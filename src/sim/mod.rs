//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through the `dt` passed to `tick`
//! - Seeded RNG only
//! - No rendering, DOM or input-device dependencies

pub mod collision;
pub mod events;
pub mod holders;
pub mod orbit;
pub mod plane;
pub mod pool;
pub mod sky;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod waves;

pub use collision::{Resolution, resolve};
pub use events::GameEvent;
pub use holders::{CoinsHolder, EnemiesHolder, EntityKind, OrbitingEntity, SceneNode};
pub use orbit::Orbit;
pub use plane::Plane;
pub use pool::{EntityPool, Pooled};
pub use sky::{AmbientLight, Cloud, Sky};
pub use snapshot::{EnergyAlert, EntityView, FrameSnapshot, PlanePose};
pub use state::{GameState, GameStatus, World};
pub use tick::{TickInput, tick};
pub use waves::{Sea, WaveVertex, cylinder_lattice};
