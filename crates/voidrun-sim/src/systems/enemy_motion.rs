//! Enemy position advancement and the ship ramming check.
//!
//! Position update dispatches on the motion mode: free flight
//! integrates the enemy's own velocity, formation-slaved reprojects
//! from the formation frame, rank transit interpolates between the two
//! rank offsets and snaps into the target once the transit time is up.
//! The remaining declared modes have no behaviour yet; reaching one is
//! an internal-consistency bug and fails loudly.

use hecs::{Entity, World};

use voidrun_core::collision::detect_collision;
use voidrun_core::components::{AiState, Combatant, Enemy};
use voidrun_core::constants::{RANK_TRANSIT_SECS, SHIP_SIZE};
use voidrun_core::enums::MotionMode;
use voidrun_core::events::GameEvent;
use voidrun_core::types::{Position, SimTime, Velocity};
use voidrun_formation::profiles::collision_radius;

use crate::field::normalize_position_y;
use crate::formation::Formation;
use crate::session::Census;
use crate::spawn::{add_explosion, remove_enemy};
use crate::systems::ship_state;

/// Returns true when an enemy rammed the ship this tick.
pub fn run(
    world: &mut World,
    formations: &mut [Formation],
    census: &mut Census,
    events: &mut Vec<GameEvent>,
    time: &SimTime,
    level: u32,
) -> bool {
    let Some((_, ship_position, ship_velocity)) = ship_state(world) else {
        return false;
    };
    let now = time.game_secs;
    let dt = time.dt();

    let mut rammed: Vec<Entity> = Vec::new();
    for (entity, (_, position, velocity, combatant, ai)) in
        world.query_mut::<(&Enemy, &mut Position, &Velocity, &Combatant, &mut AiState)>()
    {
        match ai.mode {
            MotionMode::FreeFlight => {
                position.0 += velocity.0 * dt;
            }
            MotionMode::FormationSlaved => {
                let (Some(formation_id), Some(rank)) = (ai.formation, ai.current_rank) else {
                    panic!("formation-slaved enemy without a formation attachment");
                };
                let formation = &formations[formation_id];
                let mut offset = formation.ranks[rank].local_position;
                offset.z = position.0.z;
                position.0 = formation.position + offset + formation.velocity * dt;
            }
            MotionMode::RankTransit => {
                let (Some(formation_id), Some(current), Some(target)) =
                    (ai.formation, ai.current_rank, ai.target_rank)
                else {
                    panic!("rank transit without both endpoints");
                };
                let formation = &formations[formation_id];
                let progress = (now - ai.transit_started_at) / RANK_TRANSIT_SECS;
                let mut offset = if progress < 1.0 {
                    let from = formation.ranks[current].local_position;
                    let path = formation.ranks[target].local_position - from;
                    from + path * progress
                } else {
                    ai.current_rank = Some(target);
                    ai.target_rank = None;
                    ai.mode = MotionMode::FormationSlaved;
                    formation.ranks[target].local_position
                };
                offset.z = position.0.z;
                position.0 = formation.position + offset + formation.velocity * dt;
            }
            mode @ (MotionMode::Follow | MotionMode::CrashInto | MotionMode::Orbit) => {
                panic!("enemy motion mode {mode:?} is declared but not implemented");
            }
        }

        normalize_position_y(ship_position.y, level, &mut position.0);

        let threshold = collision_radius(combatant.hit_points) + SHIP_SIZE;
        if detect_collision(
            dt,
            position.0,
            velocity.0,
            ship_position,
            ship_velocity,
            threshold,
        ) {
            rammed.push(entity);
        }
    }

    if rammed.is_empty() {
        return false;
    }

    for entity in rammed {
        let impact = world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .unwrap_or(ship_position);
        remove_enemy(world, census, formations, entity);
        add_explosion(world, census, events, now, impact);
    }
    add_explosion(world, census, events, now, ship_position);
    true
}
