//! The wandering black hole: a field hazard that drains resource at
//! close range and destroys the ship outright at its centre.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use voidrun_core::components::ShipSystems;
use voidrun_core::constants::{
    BLACK_HOLE_DRIFT_PER_TICK, BLACK_HOLE_OFFSET_Y, BLACK_HOLE_RADIUS_KILL,
    BLACK_HOLE_RADIUS_RESOURCE, FIELD_HEIGHT, FIELD_MAX_X, FIELD_MIN_X, LASER_HIT_PENALTY_MIN,
};
use voidrun_core::events::GameEvent;
use voidrun_core::types::SimTime;

use crate::session::ScoreState;
use crate::systems::ship_state;

#[derive(Debug, Clone)]
pub struct BlackHole {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl BlackHole {
    /// Places the hole a full field height ahead of the ship at a
    /// random lateral offset.
    pub fn regenerate(rng: &mut ChaCha8Rng, ship_y: f64) -> Self {
        Self {
            position: DVec3::new(
                rng.gen_range(FIELD_MIN_X..=FIELD_MAX_X),
                ship_y + FIELD_HEIGHT,
                0.0,
            ),
            velocity: DVec3::new(BLACK_HOLE_DRIFT_PER_TICK, BLACK_HOLE_DRIFT_PER_TICK, 0.0),
        }
    }

    /// Distance from the ship to the hole's gameplay centre, which
    /// sits behind the visual anchor.
    pub fn distance_to(&self, ship_position: DVec3) -> f64 {
        let dx = ship_position.x - self.position.x;
        let dy = ship_position.y - self.position.y - BLACK_HOLE_OFFSET_Y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Returns true when the hole swallowed the ship this tick.
pub fn run(
    black_hole: &mut BlackHole,
    world: &mut World,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
) -> bool {
    let Some((ship_entity, ship_position, _)) = ship_state(world) else {
        return false;
    };

    // Slow per-tick drift, bouncing off the lateral field edges.
    black_hole.position += black_hole.velocity;
    let predicted_x = black_hole.position.x + black_hole.velocity.x;
    if !(FIELD_MIN_X..=FIELD_MAX_X).contains(&predicted_x) {
        black_hole.velocity.x = -black_hole.velocity.x;
    }

    let distance = black_hole.distance_to(ship_position);
    if let Ok(mut systems) = world.get::<&mut ShipSystems>(ship_entity) {
        systems.distance_to_black_hole = distance;
    }

    if distance < BLACK_HOLE_RADIUS_KILL {
        return true;
    }

    if distance < BLACK_HOLE_RADIUS_RESOURCE {
        let before = score.resource;
        score.resource -= score.resource * time.dt() * BLACK_HOLE_RADIUS_RESOURCE / distance;
        if before >= LASER_HIT_PENALTY_MIN && score.resource < LASER_HIT_PENALTY_MIN {
            events.push(GameEvent::ResourceAlarm);
        }
    }

    // Fell a full field height behind: respawn ahead of the ship.
    if black_hole.position.y - ship_position.y < -FIELD_HEIGHT {
        *black_hole = BlackHole::regenerate(rng, ship_position.y);
    }

    false
}
