//! Laser beam advancement and hit resolution.
//!
//! Beams integrate first, then each beam is resolved against decay,
//! the ship and the enemies, in that order. Enemy beams fly slower on
//! early levels; a beam never collides with its own shooter.

use glam::DVec3;
use hecs::{Entity, World};

use voidrun_core::collision::detect_collision;
use voidrun_core::components::{Combatant, Enemy, LaserBeam, ShipSystems};
use voidrun_core::constants::{
    FIELD_HEIGHT, FIELD_MAX_X, FIELD_MIN_X, HIT_FLASH_SECS, LASER_HIT_PENALTY_MIN, NR_WEAPONS,
    SHIP_SIZE,
};
use voidrun_core::enums::BeamOwner;
use voidrun_core::events::GameEvent;
use voidrun_core::types::{Position, SimTime, Velocity};
use voidrun_formation::profiles::collision_radius;

use crate::formation::Formation;
use crate::session::{Census, RespawnPolicy, ScoreState};
use crate::spawn::{enemy_takes_hit, ShotBy};
use crate::systems::ship_state;

struct BeamState {
    entity: Entity,
    owner: BeamOwner,
    position: DVec3,
    velocity: DVec3,
    decay_beyond_y: f64,
    shooter: Option<Entity>,
}

enum Outcome {
    Fly,
    Decay,
    HitShip,
    HitEnemy(Entity),
}

/// Returns true when an enemy beam destroyed the ship this tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    census: &mut Census,
    formations: &mut [Formation],
    score: &mut ScoreState,
    respawn: &mut RespawnPolicy,
    events: &mut Vec<GameEvent>,
    time: &SimTime,
    level: u32,
) -> bool {
    let Some((ship_entity, ship_position, ship_velocity)) = ship_state(world) else {
        return false;
    };
    let now = time.game_secs;
    let dt = time.dt();
    // Enemy fire is toned down early on and reaches full speed by
    // level six.
    let enemy_speed_scale = (0.4 + f64::from(level) / 10.0).min(1.0);

    let mut beams: Vec<BeamState> = Vec::new();
    for (entity, (beam, position, velocity, shot_by)) in
        world.query_mut::<(&LaserBeam, &mut Position, &Velocity, Option<&ShotBy>)>()
    {
        let scale = if beam.owner.is_player() {
            1.0
        } else {
            enemy_speed_scale
        };
        let step = DVec3::new(velocity.0.x, velocity.0.y * scale, velocity.0.z);
        position.0 += step * dt;
        beams.push(BeamState {
            entity,
            owner: beam.owner,
            position: position.0,
            velocity: step,
            decay_beyond_y: beam.decay_beyond_y,
            shooter: shot_by.map(|s| s.0),
        });
    }

    let mut targets: Vec<(Entity, DVec3, DVec3, f64)> = Vec::new();
    {
        let mut query = world.query::<(&Enemy, &Position, &Velocity, &Combatant)>();
        for (entity, (_, position, velocity, combatant)) in query.iter() {
            targets.push((
                entity,
                position.0,
                velocity.0,
                collision_radius(combatant.hit_points),
            ));
        }
    }

    let mut ship_destroyed = false;
    for beam in beams {
        let outcome = resolve(&beam, ship_position, ship_velocity, &targets, dt);
        match outcome {
            Outcome::Fly => continue,
            Outcome::Decay => {
                if beam.owner.is_player() {
                    score.shots_missed += 1;
                    score.shots_en_route = score.shots_en_route.saturating_sub(1);
                }
            }
            Outcome::HitShip => {
                ship_destroyed |= player_takes_hit(world, ship_entity, score, events, now);
            }
            Outcome::HitEnemy(target) => {
                if beam.owner.is_player() {
                    score.shots_en_route = score.shots_en_route.saturating_sub(1);
                }
                enemy_takes_hit(
                    world,
                    census,
                    formations,
                    score,
                    respawn,
                    events,
                    now,
                    ship_position.y,
                    target,
                    beam.owner,
                );
            }
        }
        if world.despawn(beam.entity).is_ok() {
            census.beams = census.beams.saturating_sub(1);
        }
    }
    ship_destroyed
}

fn resolve(
    beam: &BeamState,
    ship_position: DVec3,
    ship_velocity: DVec3,
    targets: &[(Entity, DVec3, DVec3, f64)],
    dt: f64,
) -> Outcome {
    if beam.position.y > beam.decay_beyond_y
        || (beam.position.y - ship_position.y).abs() > FIELD_HEIGHT / 2.0
        || !(FIELD_MIN_X..=FIELD_MAX_X).contains(&beam.position.x)
    {
        return Outcome::Decay;
    }

    if beam.owner == BeamOwner::Enemy
        && detect_collision(
            dt,
            beam.position,
            beam.velocity,
            ship_position,
            ship_velocity,
            SHIP_SIZE,
        )
    {
        return Outcome::HitShip;
    }

    for (entity, position, velocity, radius) in targets {
        if beam.shooter == Some(*entity) {
            continue;
        }
        if detect_collision(dt, beam.position, beam.velocity, *position, *velocity, *radius) {
            return Outcome::HitEnemy(*entity);
        }
    }

    Outcome::Fly
}

/// Applies a beam hit to the ship. With enough resource the hit burns
/// half the reserve (at least the minimum penalty) and may cost the
/// best unlocked weapon; with less than the minimum left, the hit is
/// lethal and the caller ends the run.
pub(crate) fn player_takes_hit(
    world: &mut World,
    ship_entity: Entity,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    now: f64,
) -> bool {
    if score.resource < LASER_HIT_PENALTY_MIN {
        return true;
    }

    let penalty = (score.resource / 2.0).max(LASER_HIT_PENALTY_MIN);
    score.resource -= penalty;
    if let Ok(mut systems) = world.get::<&mut ShipSystems>(ship_entity) {
        systems.hit_flash_until = now + HIT_FLASH_SECS;
        if calculate_hit_points(score.resource) < NR_WEAPONS as i32 {
            disable_best_weapon(&mut systems);
        }
    }
    events.push(GameEvent::PlayerHit);
    if score.resource < LASER_HIT_PENALTY_MIN {
        events.push(GameEvent::ResourceAlarm);
    }
    false
}

/// Hit points the HUD derives from the resource reserve: one per
/// surviving the minimum penalty, plus a slow logarithmic tail.
pub fn calculate_hit_points(resource: f64) -> i32 {
    if resource <= 0.0 {
        return 0;
    }
    let factor = ((1.0 + resource - LASER_HIT_PENALTY_MIN) / LASER_HIT_PENALTY_MIN).ceil();
    if factor >= 1.0 {
        2 + factor.log2() as i32
    } else {
        1
    }
}

fn disable_best_weapon(systems: &mut ShipSystems) {
    for index in (1..NR_WEAPONS).rev() {
        if systems.weapons[index] {
            systems.weapons[index] = false;
            return;
        }
    }
}
