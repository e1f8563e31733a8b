//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy strength class. Fixes colour, hit points, score, base speed
/// and aggressiveness via `voidrun_formation::profiles`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Fighter1,
    Fighter2,
    Fighter3,
    Mothership,
}

impl Tier {
    pub const ALL: [Tier; crate::constants::NR_TIERS] = [
        Tier::Fighter1,
        Tier::Fighter2,
        Tier::Fighter3,
        Tier::Mothership,
    ];

    /// Stable index for per-tier counter arrays.
    pub const fn index(self) -> usize {
        match self {
            Tier::Fighter1 => 0,
            Tier::Fighter2 => 1,
            Tier::Fighter3 => 2,
            Tier::Mothership => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Tier> {
        match index {
            0 => Some(Tier::Fighter1),
            1 => Some(Tier::Fighter2),
            2 => Some(Tier::Fighter3),
            3 => Some(Tier::Mothership),
            _ => None,
        }
    }

    /// Step down `rows` tiers, saturating at the lowest fighter.
    /// Used to weaken the back rows of a formation.
    pub fn step_down(self, rows: u32) -> Tier {
        let idx = self.index().saturating_sub(rows as usize);
        Tier::from_index(idx).unwrap_or(Tier::Fighter1)
    }
}

/// How an enemy's position is advanced each tick.
///
/// `Follow`, `CrashInto` and `Orbit` are declared for future behaviours
/// but unreachable: dispatching them is an internal-consistency error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionMode {
    /// Integrates its own velocity.
    #[default]
    FreeFlight,
    /// Position reprojected from formation frame + rank offset.
    FormationSlaved,
    /// Interpolating between two ranks of the same formation.
    RankTransit,
    Follow,
    CrashInto,
    Orbit,
}

/// Who fired a laser beam. Only player-owned beams damage enemies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamOwner {
    #[default]
    Player,
    /// Player beam that must not reset the warp respawn trackers.
    PlayerNoRespawn,
    Enemy,
}

impl BeamOwner {
    pub const fn is_player(self) -> bool {
        matches!(self, BeamOwner::Player | BeamOwner::PlayerNoRespawn)
    }
}

/// Top-level run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    #[default]
    MainMenu,
    Running,
    Paused,
    /// Player died; simulation keeps stepping briefly so explosions
    /// play out, then falls back to the main menu.
    AfterLife,
}

/// Unlockable ship weapon slots, keyed to bonus bubble tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSlot {
    Laser1,
    Laser2,
    RoundShot,
    AutoFire,
}

impl WeaponSlot {
    pub const fn index(self) -> usize {
        match self {
            WeaponSlot::Laser1 => 0,
            WeaponSlot::Laser2 => 1,
            WeaponSlot::RoundShot => 2,
            WeaponSlot::AutoFire => 3,
        }
    }

    /// Which weapon a bonus bubble of the given tier unlocks.
    pub const fn unlocked_by(tier: Tier) -> Option<WeaponSlot> {
        match tier {
            Tier::Fighter1 => Some(WeaponSlot::AutoFire),
            Tier::Fighter2 => Some(WeaponSlot::Laser2),
            Tier::Fighter3 => Some(WeaponSlot::RoundShot),
            Tier::Mothership => None,
        }
    }
}
