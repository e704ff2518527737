//! Proximity collisions and lifecycle for orbiting entities
//!
//! Each active entity leaves play one of two ways per tick, checked in order:
//! a hit (within tolerance of the plane) or an expiry (flown past the top of
//! its orbit). Hits win when both apply.

use glam::Vec3;

use super::holders::{EntityKind, OrbitingEntity};
use super::pool::EntityPool;

/// Why an entity left play this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Touched the plane; `offset` points from the entity to the plane
    Hit { id: u32, kind: EntityKind, offset: Vec3 },
    /// Passed out of the play envelope untouched
    Expired { id: u32, kind: EntityKind },
}

impl Resolution {
    pub fn is_hit(&self) -> bool {
        matches!(self, Resolution::Hit { .. })
    }
}

/// Resolve every in-use entity against the plane, recycling those that leave play.
///
/// Resolutions are appended to `out` in the order they happen.
pub fn resolve(
    pool: &mut EntityPool<OrbitingEntity>,
    vehicle: Vec3,
    tolerance: f32,
    out: &mut Vec<Resolution>,
) {
    let mut i = 0;
    while i < pool.active_len() {
        let entity = &pool.in_use()[i];
        let offset = vehicle - entity.node.position;
        let resolution = if offset.length() < tolerance {
            Resolution::Hit {
                id: entity.id,
                kind: entity.kind,
                offset,
            }
        } else if entity.orbit.has_passed() {
            Resolution::Expired {
                id: entity.id,
                kind: entity.kind,
            }
        } else {
            i += 1;
            continue;
        };
        // Release swaps another entity into slot `i`, so don't advance
        pool.release(i);
        out.push(resolution);
    }
}
