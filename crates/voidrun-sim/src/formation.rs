//! Runtime formation state: the rank table with its occupant
//! back-pointers, plus formation creation and placement.
//!
//! The static geometry comes from `voidrun_formation::layout`; this
//! module adds the mutable part (who sits where) and the wave placement
//! formulas that decide where a new formation enters the field.

use glam::DVec3;

use voidrun_core::constants::{FIELD_HEIGHT, FIELD_WIDTH, NR_FILLFROM_RANKS, SPEED_X, SPEED_Y};
use voidrun_core::enums::Tier;
use voidrun_core::types::{Coordinate, RankIndex};
use voidrun_formation::layout::{layout_formation, RankLayout};

/// One rank of a live formation: static layout data plus the entity
/// currently holding (or claiming) the rank.
#[derive(Debug, Clone)]
pub struct Rank {
    pub coordinate: Coordinate,
    pub local_position: DVec3,
    /// Rank indices consulted in order when this rank is vacant.
    pub fill_from: [Option<RankIndex>; NR_FILLFROM_RANKS],
    /// The enemy parked here, or in transit toward here. A rank under
    /// claim counts as occupied so no second enemy targets it.
    pub occupant: Option<hecs::Entity>,
}

impl From<RankLayout> for Rank {
    fn from(layout: RankLayout) -> Self {
        Self {
            coordinate: layout.coordinate,
            local_position: layout.local_position,
            fill_from: layout.fill_from,
            occupant: None,
        }
    }
}

/// A drifting formation. Lives in the engine's formation table; an
/// entry with no ranks is inert and free for reuse.
#[derive(Debug, Clone, Default)]
pub struct Formation {
    pub position: DVec3,
    pub velocity: DVec3,
    pub ranks: Vec<Rank>,
}

impl Formation {
    /// An unused table entry.
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn is_inert(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Lowest-indexed rank with no occupant. Ranks are laid out front
    /// first, so sequential claims fill the formation front to back.
    pub fn next_free_rank(&self) -> Option<RankIndex> {
        self.ranks.iter().position(|rank| rank.occupant.is_none())
    }

    /// Reverses the lateral drift. Called at most once per tick even
    /// when several members report the boundary, so opposing reversal
    /// requests cannot cancel out.
    pub fn turn_around(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    /// World-space position of a rank.
    pub fn rank_position(&self, rank: RankIndex) -> DVec3 {
        self.position + self.ranks[rank].local_position
    }

    /// Returns the entry to the inert state.
    pub fn clear(&mut self) {
        self.ranks.clear();
        self.position = DVec3::ZERO;
        self.velocity = DVec3::ZERO;
    }
}

/// Creates a formation for a wave.
///
/// Lateral entry points rotate across the field with the formation
/// index; the forward offset staggers the formations of one wave so
/// they arrive one after another. Higher top tiers drift faster
/// sideways and approach the player more quickly, as do later levels.
pub fn create_formation(
    top_tier: Tier,
    formation_width: usize,
    formation_index: usize,
    nr_units: usize,
    offset_y: f64,
    ship_y: f64,
    level: u32,
) -> Formation {
    let ranks = layout_formation(formation_width)
        .into_iter()
        .map(Rank::from)
        .collect();

    let tier = top_tier.index() as f64;
    let lateral = ((formation_index as f64 * FIELD_WIDTH / 3.0) as i64 % FIELD_WIDTH as i64)
        as f64
        - FIELD_WIDTH / 2.0
        + FIELD_WIDTH / 6.0;
    let position = DVec3::new(
        lateral,
        ship_y
            + 0.4 * FIELD_HEIGHT
            + 0.6 * FIELD_HEIGHT * formation_index as f64 / nr_units.max(1) as f64
            + FIELD_HEIGHT * offset_y,
        0.0,
    );
    let velocity = DVec3::new(
        SPEED_X * (0.25 + 0.25 * tier),
        SPEED_Y * 0.5 - SPEED_Y * (tier / 2.0 + f64::from(level) / 6.0) / 2.0,
        0.0,
    );

    Formation {
        position,
        velocity,
        ranks,
    }
}
