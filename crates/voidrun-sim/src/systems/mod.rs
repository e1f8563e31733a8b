//! Per-tick simulation passes. Each system is a free function over the
//! world plus whatever engine state it touches; the engine fixes the
//! order they run in.

pub mod black_hole;
pub mod bonus;
pub mod enemy_ai;
pub mod enemy_motion;
pub mod formation_advance;
pub mod laser;
pub mod ship;
pub mod snapshot;

use glam::DVec3;
use hecs::{Entity, World};

use voidrun_core::components::Ship;
use voidrun_core::types::{Position, Velocity};

/// The ship's entity, position and velocity, if one exists.
pub(crate) fn ship_state(world: &World) -> Option<(Entity, DVec3, DVec3)> {
    let mut query = world.query::<(&Ship, &Position, &Velocity)>();
    query
        .iter()
        .next()
        .map(|(entity, (_, position, velocity))| (entity, position.0, velocity.0))
}
