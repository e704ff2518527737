//! Discrete events emitted by the simulation for rendering, UI and audio feedback.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A row of coins entered the orbit
    CoinsSpawned { count: u32 },
    /// A wave of enemies entered the orbit
    EnemiesSpawned { count: u32 },
    /// Plane picked up a coin; `energy` is the new level (if tracked)
    CoinCollected { id: u32, energy: Option<f32> },
    /// Plane struck an enemy
    EnemyHit { id: u32, energy: Option<f32> },
    /// Speed target raised by the distance ramp
    SpeedUp { target_base_speed: f32 },
    LevelUp { level: u32 },
    GameOver { distance: u64 },
    /// The plane has crashed; show the replay prompt
    ShowReplay,
    /// Replay accepted, a new run starts
    HideReplay,
}
