//! Tier-keyed stat profiles.
//!
//! Every enemy's tier maps deterministically to its stats and render
//! colour via this fixed lookup; nothing here is mutated after creation.

use voidrun_core::constants::{ENEMY_SIZE_FACTOR, MOTHERSHIP_AGGRESSIVENESS, MOTHERSHIP_SCORE};
use voidrun_core::enums::Tier;
use voidrun_core::types::Color;

/// Stats derived from an enemy's tier at creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    /// How often this enemy shoots.
    pub aggressiveness: f64,
    /// Base for calculating the free-flight velocity.
    pub base_speed: f64,
    /// Resource gained upon kill.
    pub score_value: f64,
    pub hit_points: i32,
    pub color: Color,
}

/// The fixed tier table: three fighter tiers plus the mothership.
pub fn tier_profile(tier: Tier) -> TierProfile {
    match tier {
        Tier::Fighter1 => TierProfile {
            aggressiveness: 1.0,
            base_speed: 1.0,
            score_value: 10.0,
            hit_points: 1,
            color: Color::new(0.1, 0.1, 1.0),
        },
        Tier::Fighter2 => TierProfile {
            aggressiveness: 3.0,
            base_speed: 1.5,
            score_value: 30.0,
            hit_points: 3,
            color: Color::new(0.1, 1.0, 0.1),
        },
        Tier::Fighter3 => TierProfile {
            aggressiveness: 6.0,
            base_speed: 3.0,
            score_value: 50.0,
            hit_points: 6,
            color: Color::new(1.0, 0.1, 0.1),
        },
        Tier::Mothership => TierProfile {
            aggressiveness: MOTHERSHIP_AGGRESSIVENESS,
            base_speed: 2.0,
            score_value: MOTHERSHIP_SCORE,
            hit_points: MOTHERSHIP_AGGRESSIVENESS as i32,
            color: Color::new(1.0, 1.0, 0.1),
        },
    }
}

/// Collision radius of an enemy. Bigger (healthier) enemies are easier
/// to hit.
pub fn collision_radius(hit_points: i32) -> f64 {
    ENEMY_SIZE_FACTOR + ENEMY_SIZE_FACTOR * f64::from(hit_points - 1) / 4.0
}
