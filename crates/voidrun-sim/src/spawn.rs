//! Entity creation and removal, with the bookkeeping both imply: pool
//! caps, census counters, rank claims and rank releases.

use glam::DVec3;
use hecs::{Entity, World};

use voidrun_core::components::{
    AiState, BonusBubble, Combatant, Enemy, Explosion, LaserBeam,
};
use voidrun_core::constants::{
    BONUS_FACTOR_SCORE, FIELD_HEIGHT, HIT_FLASH_SECS, MAX_BONUS_BUBBLES, MAX_ENEMIES,
    MAX_EXPLOSIONS, MAX_LASER_BEAMS,
};
use voidrun_core::enums::{BeamOwner, MotionMode, Tier};
use voidrun_core::events::GameEvent;
use voidrun_core::types::{FormationId, Position, Velocity};
use voidrun_formation::profiles::tier_profile;

use crate::formation::Formation;
use crate::session::{Census, RespawnPolicy, ScoreState};

/// Back-pointer from a beam to the enemy that fired it, so a beam can
/// never collide with its own shooter.
#[derive(Debug, Clone, Copy)]
pub struct ShotBy(pub Entity);

/// Spawns one enemy. Stats come from the tier profile; `direction`
/// fixes the free-flight velocity (normalized and scaled by the tier's
/// base speed, or zero when no direction is given).
///
/// When a formation is passed the enemy claims its next free rank and
/// spawns formation-slaved; with no free rank left it falls back to
/// free flight. Returns `None` without spawning when the enemy pool is
/// at capacity.
pub fn add_enemy(
    world: &mut World,
    census: &mut Census,
    tier: Tier,
    position: DVec3,
    direction: DVec3,
    formation: Option<(FormationId, &mut Formation)>,
) -> Option<Entity> {
    if census.enemies_total >= MAX_ENEMIES {
        log::warn!("enemy pool exhausted ({MAX_ENEMIES}); spawn request dropped");
        return None;
    }

    let profile = tier_profile(tier);
    let velocity = if direction.length_squared() > 0.0 {
        direction.normalize() * profile.base_speed
    } else {
        DVec3::ZERO
    };

    let mut ai = AiState::default();
    let mut claimed_rank = None;
    if let Some((formation_id, formation)) = formation {
        match formation.next_free_rank() {
            Some(rank) => {
                ai.mode = MotionMode::FormationSlaved;
                ai.formation = Some(formation_id);
                ai.current_rank = Some(rank);
                claimed_rank = Some(&mut formation.ranks[rank]);
            }
            None => {
                log::debug!("formation {formation_id} has no free rank; enemy enters free flight");
            }
        }
    }

    let entity = world.spawn((
        Enemy { tier },
        Position(position),
        Velocity(velocity),
        Combatant {
            aggressiveness: profile.aggressiveness,
            score_value: profile.score_value,
            hit_points: profile.hit_points,
            next_shot_at: 0.0,
            hit_flash_until: 0.0,
        },
        ai,
    ));
    if let Some(rank) = claimed_rank {
        rank.occupant = Some(entity);
    }

    census.enemies_total += 1;
    census.enemies_by_tier[tier.index()] += 1;
    Some(entity)
}

/// Despawns an enemy and releases whatever rank still points at it: the
/// target rank while in transit, the current rank otherwise.
pub fn remove_enemy(
    world: &mut World,
    census: &mut Census,
    formations: &mut [Formation],
    entity: Entity,
) {
    let Ok(enemy) = world.get::<&Enemy>(entity).map(|e| *e) else {
        return;
    };
    let ai = world.get::<&AiState>(entity).map(|a| AiState::clone(&a)).ok();

    if let Some(ai) = ai {
        if let Some(formation_id) = ai.formation {
            let formation = &mut formations[formation_id];
            let held = if ai.mode == MotionMode::RankTransit {
                ai.target_rank
            } else {
                ai.current_rank
            };
            if let Some(rank) = held {
                if formation.ranks[rank].occupant == Some(entity) {
                    formation.ranks[rank].occupant = None;
                }
            }
        }
    }

    if world.despawn(entity).is_ok() {
        census.enemies_total = census.enemies_total.saturating_sub(1);
        census.enemies_by_tier[enemy.tier.index()] =
            census.enemies_by_tier[enemy.tier.index()].saturating_sub(1);
    }
}

/// Applies a beam hit to an enemy. Enemy-owned beams are absorbed
/// without damage; player beams cost one hit point. A survivor flashes
/// briefly, a kill awards score, drops a bonus bubble, spawns an
/// explosion and re-arms the warp respawn trackers.
#[allow(clippy::too_many_arguments)]
pub fn enemy_takes_hit(
    world: &mut World,
    census: &mut Census,
    formations: &mut [Formation],
    score: &mut ScoreState,
    respawn: &mut RespawnPolicy,
    events: &mut Vec<GameEvent>,
    now: f64,
    ship_y: f64,
    entity: Entity,
    owner: BeamOwner,
) {
    if !owner.is_player() {
        return;
    }

    let Ok(enemy) = world.get::<&Enemy>(entity).map(|e| *e) else {
        return;
    };
    let hit_points_left = {
        let Ok(mut combatant) = world.get::<&mut Combatant>(entity) else {
            return;
        };
        combatant.hit_points -= 1;
        if combatant.hit_points > 0 {
            combatant.hit_flash_until = now + HIT_FLASH_SECS;
        }
        combatant.hit_points
    };

    if hit_points_left > 0 {
        events.push(GameEvent::EnemyHit { tier: enemy.tier });
        return;
    }

    let position = world.get::<&Position>(entity).map(|p| p.0).unwrap_or_default();
    let score_value = world
        .get::<&Combatant>(entity)
        .map(|c| c.score_value)
        .unwrap_or_default();

    score.score += score_value * BONUS_FACTOR_SCORE;
    score.enemies_killed += 1;
    remove_enemy(world, census, formations, entity);
    add_explosion(world, census, events, now, position);
    add_bonus_bubble(world, census, now, position, enemy.tier, score_value);
    if owner == BeamOwner::Player {
        respawn.reset(ship_y);
    }
    events.push(GameEvent::EnemyDestroyed {
        tier: enemy.tier,
        score: score_value * BONUS_FACTOR_SCORE,
    });
}

/// Spawns a laser beam. Player beams inherit the ship's forward speed
/// and count toward the shot statistics; any beam self-destructs half a
/// field height past its spawn point.
#[allow(clippy::too_many_arguments)]
pub fn add_laser_beam(
    world: &mut World,
    census: &mut Census,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    owner: BeamOwner,
    position: DVec3,
    mut velocity: DVec3,
    speed_bonus: f64,
    shooter: Option<Entity>,
    ship_velocity_y: f64,
) {
    if census.beams >= MAX_LASER_BEAMS {
        log::warn!("beam pool exhausted ({MAX_LASER_BEAMS}); shot dropped");
        return;
    }

    if owner.is_player() {
        velocity.y += ship_velocity_y;
        score.shots_fired += 1;
        score.shots_en_route += 1;
    }

    let beam = LaserBeam {
        owner,
        decay_beyond_y: position.y + FIELD_HEIGHT / 2.0,
        speed_bonus,
    };
    match shooter {
        Some(shooter) => {
            world.spawn((beam, Position(position), Velocity(velocity), ShotBy(shooter)));
        }
        None => {
            world.spawn((beam, Position(position), Velocity(velocity)));
        }
    }
    census.beams += 1;
    events.push(GameEvent::ShotFired { owner });
}

pub fn add_explosion(
    world: &mut World,
    census: &mut Census,
    events: &mut Vec<GameEvent>,
    now: f64,
    position: DVec3,
) {
    if census.explosions >= MAX_EXPLOSIONS {
        log::warn!("explosion pool exhausted ({MAX_EXPLOSIONS}); effect dropped");
        return;
    }
    world.spawn((Explosion { started_at: now }, Position(position)));
    census.explosions += 1;
    events.push(GameEvent::ExplosionSpawned {
        position: Position(position),
    });
}

pub fn add_bonus_bubble(
    world: &mut World,
    census: &mut Census,
    now: f64,
    position: DVec3,
    tier: Tier,
    resource: f64,
) {
    if census.bubbles >= MAX_BONUS_BUBBLES {
        log::warn!("bubble pool exhausted ({MAX_BONUS_BUBBLES}); drop lost");
        return;
    }
    world.spawn((
        BonusBubble {
            tier,
            resource,
            spawned_at: now,
        },
        Position(position),
    ));
    census.bubbles += 1;
}
