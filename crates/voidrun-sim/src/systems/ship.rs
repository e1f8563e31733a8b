//! Ship advancement.

use hecs::World;

use voidrun_core::components::Ship;
use voidrun_core::constants::{FIELD_MAX_X, FIELD_MIN_X, SHIP_SIZE};
use voidrun_core::types::{Position, SimTime, Velocity};

use crate::session::ScoreState;

pub fn run(world: &mut World, score: &mut ScoreState, time: &SimTime) {
    let dt = time.dt();
    for (_, (_, position, velocity)) in world.query_mut::<(&Ship, &mut Position, &Velocity)>() {
        position.0 += velocity.0 * dt;
        position.0.x = position
            .0
            .x
            .clamp(FIELD_MIN_X + SHIP_SIZE, FIELD_MAX_X - SHIP_SIZE);
    }
    if score.resource > score.best_resource {
        score.best_resource = score.resource;
    }
}
