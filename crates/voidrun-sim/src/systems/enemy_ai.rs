//! Enemy decision pass: course reversal at the field boundaries and
//! fire control.
//!
//! Decisions are collected under an immutable query and applied
//! afterwards. Formation members judge the boundary by their
//! formation's velocity and request a formation turn; the turn itself
//! is applied once per formation per tick, so the requests of several
//! members on the same side cannot flip the velocity back and forth.

use glam::DVec3;
use hecs::{Entity, World};

use voidrun_core::components::{AiState, Combatant, Enemy};
use voidrun_core::enums::{BeamOwner, MotionMode};
use voidrun_core::events::GameEvent;
use voidrun_core::types::{Position, SimTime, Velocity};
use voidrun_formation::gunnery::{evaluate_fire, should_reverse, FireContext, FireOrder};

use crate::formation::Formation;
use crate::session::{Census, ScoreState};
use crate::spawn;
use crate::systems::ship_state;

pub fn run(
    world: &mut World,
    formations: &mut [Formation],
    census: &mut Census,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    time: &SimTime,
) {
    let Some((_, ship_position, _)) = ship_state(world) else {
        return;
    };
    let now = time.game_secs;
    let dt = time.dt();

    let mut formation_turns = vec![false; formations.len()];
    let mut free_reversals: Vec<Entity> = Vec::new();
    let mut fire_orders: Vec<(Entity, DVec3, FireOrder)> = Vec::new();

    {
        let mut query = world.query::<(&Enemy, &Position, &Velocity, &Combatant, &AiState)>();
        for (entity, (enemy, position, velocity, combatant, ai)) in query.iter() {
            let effective_velocity = match (ai.mode, ai.formation) {
                (MotionMode::FormationSlaved | MotionMode::RankTransit, Some(formation_id)) => {
                    formations[formation_id].velocity
                }
                _ => velocity.0,
            };

            if should_reverse(position.0.x, effective_velocity.x, dt) {
                match (ai.mode, ai.formation) {
                    (
                        MotionMode::FormationSlaved | MotionMode::RankTransit,
                        Some(formation_id),
                    ) => formation_turns[formation_id] = true,
                    _ => free_reversals.push(entity),
                }
            }

            let context = FireContext {
                now,
                next_shot_at: combatant.next_shot_at,
                position: position.0,
                ship_position,
                tier: enemy.tier,
                aggressiveness: combatant.aggressiveness,
                hit_points: combatant.hit_points,
            };
            if let Some(order) = evaluate_fire(&context) {
                fire_orders.push((entity, position.0, order));
            }
        }
    }

    for (formation_id, flagged) in formation_turns.into_iter().enumerate() {
        if flagged {
            formations[formation_id].turn_around();
        }
    }
    for entity in free_reversals {
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            velocity.0.x = -velocity.0.x;
        }
    }
    for (entity, position, order) in fire_orders {
        if let Ok(mut combatant) = world.get::<&mut Combatant>(entity) {
            combatant.next_shot_at = order.next_shot_at;
        }
        spawn::add_laser_beam(
            world,
            census,
            score,
            events,
            BeamOwner::Enemy,
            position,
            order.beam_velocity,
            1.0,
            Some(entity),
            0.0,
        );
    }
}
