//! Per-enemy fire gating and course-reversal decisions.
//!
//! Pure functions: the sim's AI pass feeds them the enemy's situation
//! and applies the returned orders to the world.

use glam::DVec3;

use voidrun_core::constants::*;
use voidrun_core::enums::Tier;

use crate::profiles::tier_profile;

/// Situation of one enemy at the moment of the fire decision.
#[derive(Debug, Clone, Copy)]
pub struct FireContext {
    pub now: f64,
    /// The enemy's current fire-cooldown deadline.
    pub next_shot_at: f64,
    pub position: DVec3,
    pub ship_position: DVec3,
    pub tier: Tier,
    pub aggressiveness: f64,
    pub hit_points: i32,
}

/// A shot to be taken, plus the recomputed cooldown deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub beam_velocity: DVec3,
    pub next_shot_at: f64,
}

/// Decides whether the enemy opens fire this tick.
///
/// Gating: the cooldown must have elapsed, the player must not already
/// be more than `AI_SHOOT_BEHIND_DISTANCE` past the enemy, and the
/// forward distance to the player must lie within the shooting band.
///
/// Motherships take aim at a slightly offset predicted ship position;
/// all other tiers fire straight down at the standard beam speed. The
/// cooldown shortens with aggressiveness and tier, and with lost hit
/// points: wounded enemies fire faster.
pub fn evaluate_fire(ctx: &FireContext) -> Option<FireOrder> {
    if ctx.now < ctx.next_shot_at {
        return None;
    }
    if ctx.position.y <= ctx.ship_position.y - AI_SHOOT_BEHIND_DISTANCE {
        return None;
    }
    let forward_distance = ctx.position.y - ctx.ship_position.y;
    if !(AI_MIN_SHOOT_DISTANCE..=AI_MAX_SHOOT_DISTANCE).contains(&forward_distance) {
        return None;
    }

    let (beam_velocity, tier_shoot_factor) = match ctx.tier {
        Tier::Mothership => {
            let dx = ctx.ship_position.x - ctx.position.x;
            let dy = ctx.ship_position.y + MOTHERSHIP_PRE_AIM_OFFSET - ctx.position.y;
            let distance = (dx * dx + dy * dy).sqrt();
            let velocity = DVec3::new(
                dx / distance * LASER_SPEED_MOTHERSHIP,
                dy / distance * LASER_SPEED_MOTHERSHIP,
                0.0,
            );
            (velocity, MOTHERSHIP_SHOOT_FACTOR)
        }
        _ => (
            DVec3::new(0.0, -LASER_SPEED_ENEMY, 0.0),
            ENEMY_TIER_SHOOT_FACTOR,
        ),
    };

    // Wound factor: the interval shrinks with the fraction of hit
    // points left, so a nearly-dead enemy shoots at its fastest.
    let max_hit_points = f64::from(tier_profile(ctx.tier).hit_points);
    let next_shot_at = ctx.now
        + ENEMY_BASE_SHOOT_INTERVAL_SECS / (ctx.aggressiveness * tier_shoot_factor).sqrt()
            * f64::from(ctx.hit_points)
            / max_hit_points;

    Some(FireOrder {
        beam_velocity,
        next_shot_at,
    })
}

/// Course-reversal check against the lateral field boundaries.
///
/// True when the next integration step would leave the field *and* the
/// position magnitude is still increasing; an enemy already on its way
/// back in is left alone.
pub fn should_reverse(position_x: f64, effective_velocity_x: f64, dt: f64) -> bool {
    let predicted = position_x + effective_velocity_x * dt;
    if (FIELD_MIN_X..=FIELD_MAX_X).contains(&predicted) {
        return false;
    }
    // One-second lookahead for the direction test.
    (position_x + effective_velocity_x).abs() > position_x.abs()
}
