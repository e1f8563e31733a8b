//! Formation layout engine: triangular symmetric stacking and the
//! refill ("fillfrom") adjacency between ranks.
//!
//! Enemies may detach from the formation or be killed. The resulting
//! gap is refilled by enemies further back. To keep the front line
//! occupied as long as possible, the positions ("ranks") are placed
//! symmetrically, every row filling from its centre outward:
//!
//! ```text
//! row  at width == 5
//!  9                    24
//!  8               23        22
//!  7          21        19        20
//!  6     18        16        15        17
//!  5  14      12        10        11        13
//!  4      9         7         6         8
//!  3           5         3         4
//!  2                2         1
//!  1                     0            <- FRONT (nearest player)
//! ```
//!
//! Rows grow by one rank per row up to the requested width, then shrink
//! back to a single rank. A formation of width `w` therefore has `w²`
//! ranks, which for the maximum width exactly fills the structural
//! rank array.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use voidrun_core::constants::{
    FORMATION_SPACING, MAX_FORMATION_RANKS, MAX_FORMATION_WIDTH, NR_FILLFROM_RANKS,
};
use voidrun_core::types::Coordinate;

/// Static geometry of one rank: its logical address, its offset from
/// the formation's reference frame, and the neighbour precedence used
/// to refill it when it becomes vacant. Immutable after layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankLayout {
    pub coordinate: Coordinate,
    pub local_position: DVec3,
    /// Rank indices consulted in order when this rank is vacant.
    /// `None` entries are expected at formation edges.
    pub fill_from: [Option<usize>; NR_FILLFROM_RANKS],
}

/// Finds the rank whose logical coordinate equals `wanted`.
pub fn find_rank(ranks: &[RankLayout], wanted: Coordinate) -> Option<usize> {
    ranks.iter().position(|r| r.coordinate == wanted)
}

/// Computes the full set of rank coordinates, local positions and
/// refill adjacency for a formation of the requested width.
///
/// Pure function of `formation_width`: laying out twice yields
/// identical results. If the stacking would produce more ranks than
/// the structural maximum, the layout is truncated there.
///
/// # Panics
///
/// Panics if `formation_width` is outside `[1, MAX_FORMATION_WIDTH]`.
/// Widths are design-time constants, never user input; an out-of-range
/// value is a configuration bug, not a runtime condition.
pub fn layout_formation(formation_width: usize) -> Vec<RankLayout> {
    assert!(
        (1..=MAX_FORMATION_WIDTH).contains(&formation_width),
        "layout_formation: formation_width ({formation_width}) out of bounds"
    );

    let mut ranks = stack_rank_positions(formation_width);
    link_fill_from(&mut ranks);
    ranks
}

/// Row-by-row triangular stacking of rank coordinates and positions.
fn stack_rank_positions(formation_width: usize) -> Vec<RankLayout> {
    let mut ranks = Vec::new();

    let mut row: i32 = 0;
    let mut row_growth: i32 = 0;
    let mut new_row_rank: usize = 0; // index of the next row's first rank
    let mut first_row_rank: usize = 0; // index of this row's first rank

    for i in 0..MAX_FORMATION_RANKS {
        // Row change. new_row_rank starts at 0, so this also primes
        // the bookkeeping for the first row.
        if i == new_row_rank {
            row += 1;

            if row as usize <= formation_width {
                row_growth = row; // grow towards the middle
            } else {
                row_growth -= 1; // shrink past the middle
                if row_growth == 0 {
                    return ranks; // the zero row is never created
                }
            }

            new_row_rank += row_growth as usize;
            first_row_rank = i;
        }

        let row_index = (i - first_row_rank) as i32;
        let row_odd = row & 1;

        // Position within the row, alternating outward from the centre.
        // Stretch by 2 so even rows can sit half a position offset.
        let mut x = 1 - row_odd;
        x += (row_index + row_odd) / 2;
        x *= 2;
        x -= 1 - row_odd;

        // Mirror every second rank to the other side of the centre
        // line: ranks 1, 3, 5, ... in odd rows, 2, 4, 6, ... in even.
        if (row_index & 1) == row_odd {
            x = -x;
        }

        ranks.push(RankLayout {
            coordinate: Coordinate::new(x, row),
            local_position: DVec3::new(
                FORMATION_SPACING * f64::from(x),
                FORMATION_SPACING * f64::from(row - 1),
                0.0,
            ),
            fill_from: [None; NR_FILLFROM_RANKS],
        });
    }

    ranks // structural maximum reached
}

/// Computes each rank's refill precedence from its own coordinate.
///
/// A vacant rank is refilled from, in order: the rank directly behind
/// it, the diagonal-behind rank toward the centre, the rank two steps
/// toward the centre (only if the path would not cross the centre
/// line), and finally the diagonal-behind rank away from the centre.
/// Outer regions refill first so the front line stays populated as
/// long as possible without paths crossing the middle of the formation.
fn link_fill_from(ranks: &mut [RankLayout]) {
    let coordinates: Vec<Coordinate> = ranks.iter().map(|r| r.coordinate).collect();
    let lookup = |c: Coordinate| coordinates.iter().position(|&t| t == c);

    for rank in ranks.iter_mut() {
        let Coordinate { x, y } = rank.coordinate;
        // For a centred rank (x == 0) "toward the centre" is arbitrary;
        // it resolves to the left like the outward step resolves right.
        let inward = if x == 0 { -1 } else { -x.signum() };
        let outward = if x == 0 { 1 } else { x.signum() };

        let mut entries = rank.fill_from.iter_mut();
        let mut push = |c: Coordinate| {
            if let Some(slot) = entries.next() {
                *slot = lookup(c);
            }
        };

        push(Coordinate::new(x, y + 2)); // directly behind
        push(Coordinate::new(x + inward, y + 1)); // diagonal behind, inward
        if x.abs() > 1 {
            push(Coordinate::new(x - 2 * x.signum(), y)); // two inward
        }
        push(Coordinate::new(x + outward, y + 1)); // diagonal behind, outward
    }
}
