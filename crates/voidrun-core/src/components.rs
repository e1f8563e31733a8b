//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in the sim crate's systems.

use serde::{Deserialize, Serialize};

use crate::enums::{BeamOwner, MotionMode, Tier};
use crate::types::{FormationId, RankIndex};

/// Marks an entity as the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// Hit feedback and weapon unlock state of the ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipSystems {
    /// Flash the hull until this timestamp after a non-lethal hit.
    pub hit_flash_until: f64,
    /// Enabled weapon slots, indexed by `WeaponSlot::index`.
    pub weapons: [bool; crate::constants::NR_WEAPONS],
    /// Distance to the black hole's gameplay centre, updated each tick.
    pub distance_to_black_hole: f64,
}

impl Default for ShipSystems {
    fn default() -> Self {
        let mut weapons = [false; crate::constants::NR_WEAPONS];
        weapons[0] = true; // primary laser always available
        Self {
            hit_flash_until: 0.0,
            weapons,
            distance_to_black_hole: f64::INFINITY,
        }
    }
}

/// Marks an entity as a hostile unit and fixes its tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub tier: Tier,
}

/// Combat state of an enemy: tier-derived stats plus mutable
/// hit points and firing/feedback deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    /// How often this enemy shoots (tier-derived, immutable).
    pub aggressiveness: f64,
    /// Resource value awarded on a kill (tier-derived, immutable).
    pub score_value: f64,
    pub hit_points: i32,
    /// Hold fire until this timestamp.
    pub next_shot_at: f64,
    /// Flash until this timestamp after a non-lethal hit.
    pub hit_flash_until: f64,
}

/// Motion control state of an enemy: current mode plus its formation
/// attachment. Ranks are referenced by index; the formation owns the
/// rank array and the `occupant` back-pointers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiState {
    pub mode: MotionMode,
    /// Absent while in free flight.
    pub formation: Option<FormationId>,
    /// Where the enemy "parks".
    pub current_rank: Option<RankIndex>,
    /// Set only during rank transit.
    pub target_rank: Option<RankIndex>,
    /// Timestamp of entering rank transit; drives interpolation.
    pub transit_started_at: f64,
}

/// A laser beam en route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaserBeam {
    pub owner: BeamOwner,
    /// Built-in self destruct ("firing range").
    pub decay_beyond_y: f64,
    /// Fired at slow speed reduces resource gain.
    pub speed_bonus: f64,
}

/// A collectable resource pickup dropped by a destroyed enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BonusBubble {
    /// Which weapon this bubble may unlock.
    pub tier: Tier,
    /// How much resource the player may gather.
    pub resource: f64,
    pub spawned_at: f64,
}

/// Visual explosion marker, cleaned up after `EXPLOSION_SECS`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub started_at: f64,
}
