//! Bonus bubble drift and collection.
//!
//! Bubbles hang where their enemy died; the ship scoops them up by
//! flying through. A bubble the player leaves behind wraps ahead of the
//! ship for another chance.

use glam::DVec3;
use hecs::{Entity, World};

use voidrun_core::collision::detect_collision;
use voidrun_core::components::{BonusBubble, ShipSystems};
use voidrun_core::constants::{
    BONUS_BUBBLE_MAX_RADIUS, BONUS_BUBBLE_MIN_RADIUS, FIELD_HEIGHT, MOTHERSHIP_SCORE, SHIP_SIZE,
};
use voidrun_core::enums::{Tier, WeaponSlot};
use voidrun_core::events::GameEvent;
use voidrun_core::types::{Position, SimTime};

use crate::session::{Census, ScoreState};
use crate::systems::ship_state;

pub fn run(
    world: &mut World,
    census: &mut Census,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    time: &SimTime,
) {
    let Some((ship_entity, ship_position, ship_velocity)) = ship_state(world) else {
        return;
    };
    let dt = time.dt();

    let mut collected: Vec<(Entity, Tier, f64)> = Vec::new();
    for (entity, (bubble, position)) in world.query_mut::<(&BonusBubble, &mut Position)>() {
        let threshold = bubble_radius(bubble.resource) + SHIP_SIZE;
        if detect_collision(
            dt,
            position.0,
            DVec3::ZERO,
            ship_position,
            ship_velocity,
            threshold,
        ) {
            collected.push((entity, bubble.tier, bubble.resource));
        } else if position.0.y - ship_position.y < -FIELD_HEIGHT / 8.0 {
            position.0.y = ship_position.y + FIELD_HEIGHT / 2.0;
        }
    }

    for (entity, tier, resource) in collected {
        if world.despawn(entity).is_ok() {
            census.bubbles = census.bubbles.saturating_sub(1);
        }
        score.resource += resource;
        events.push(GameEvent::BonusCollected { tier, resource });

        if let Some(slot) = WeaponSlot::unlocked_by(tier) {
            if let Ok(mut systems) = world.get::<&mut ShipSystems>(ship_entity) {
                if !systems.weapons[slot.index()] {
                    systems.weapons[slot.index()] = true;
                    events.push(GameEvent::WeaponUnlocked { slot });
                }
            }
        }
    }
}

/// Visual and pickup radius of a bubble, growing with the square root
/// of its resource value up to the mothership drop.
pub fn bubble_radius(resource: f64) -> f64 {
    let size_factor = ((resource * MOTHERSHIP_SCORE).sqrt() / MOTHERSHIP_SCORE).min(1.0);
    BONUS_BUBBLE_MIN_RADIUS + (BONUS_BUBBLE_MAX_RADIUS - BONUS_BUBBLE_MIN_RADIUS) * size_factor
}
