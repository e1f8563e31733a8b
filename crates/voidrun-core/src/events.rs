//! Events emitted by the simulation for audio and UI feedback.
//!
//! The sound and HUD subsystems decide what to do with these; the core
//! only reports that they happened.

use serde::{Deserialize, Serialize};

use crate::enums::{BeamOwner, Tier, WeaponSlot};
use crate::types::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A beam was fired.
    ShotFired { owner: BeamOwner },
    /// An enemy absorbed a non-lethal hit.
    EnemyHit { tier: Tier },
    /// An enemy was destroyed by a player beam.
    EnemyDestroyed { tier: Tier, score: f64 },
    /// An explosion was spawned (enemy or ship).
    ExplosionSpawned { position: Position },
    /// The ship absorbed a non-lethal hit.
    PlayerHit,
    /// The run ended.
    PlayerDied,
    /// A bonus bubble was collected.
    BonusCollected { tier: Tier, resource: f64 },
    /// A collected bubble enabled a new weapon slot.
    WeaponUnlocked { slot: WeaponSlot },
    /// Resource dropped below the single-hit threshold.
    ResourceAlarm,
    /// All enemies cleared; the level counter advanced. The external
    /// wave population drives the next spawn.
    LevelCleared { next_level: u32 },
}
