//! Tests for the layout engine, tier profiles and gunnery decisions.

use std::collections::HashSet;

use glam::DVec3;

use voidrun_core::constants::*;
use voidrun_core::enums::Tier;
use voidrun_core::types::Coordinate;

use crate::gunnery::{evaluate_fire, should_reverse, FireContext};
use crate::layout::{find_rank, layout_formation};
use crate::profiles::{collision_radius, tier_profile};

// ---- Layout ----

#[test]
fn test_layout_rank_count_is_width_squared() {
    for width in 1..=MAX_FORMATION_WIDTH {
        let ranks = layout_formation(width);
        assert_eq!(
            ranks.len(),
            width * width,
            "triangular stack of width {width} should hold width² ranks"
        );
        assert!(ranks.len() <= MAX_FORMATION_RANKS);
    }
}

#[test]
fn test_layout_coordinates_unique() {
    for width in 1..=MAX_FORMATION_WIDTH {
        let ranks = layout_formation(width);
        let unique: HashSet<Coordinate> = ranks.iter().map(|r| r.coordinate).collect();
        assert_eq!(unique.len(), ranks.len(), "duplicate coordinate at width {width}");
    }
}

#[test]
fn test_layout_is_idempotent() {
    for width in [1, 3, MAX_FORMATION_WIDTH] {
        assert_eq!(layout_formation(width), layout_formation(width));
    }
}

#[test]
fn test_layout_width_two_exact_coordinates() {
    // Diamond of four: front, a mirrored pair, and the reserved tip.
    let ranks = layout_formation(2);
    let coords: Vec<Coordinate> = ranks.iter().map(|r| r.coordinate).collect();
    assert_eq!(
        coords,
        vec![
            Coordinate::new(0, 1),
            Coordinate::new(-1, 2),
            Coordinate::new(1, 2),
            Coordinate::new(0, 3),
        ]
    );
}

#[test]
fn test_layout_width_one_single_front_rank() {
    let ranks = layout_formation(1);
    assert_eq!(ranks.len(), 1);
    assert_eq!(ranks[0].coordinate, Coordinate::new(0, 1));
    assert!(ranks[0].fill_from.iter().all(Option::is_none));
}

#[test]
fn test_layout_rows_fill_centre_outward() {
    // Earliest-indexed ranks in each row sit nearest the centre line.
    let ranks = layout_formation(5);
    for row in 1..=5 {
        let in_row: Vec<i32> = ranks
            .iter()
            .filter(|r| r.coordinate.y == row)
            .map(|r| r.coordinate.x.abs())
            .collect();
        for pair in in_row.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "row {row} not ordered centre-outward: {in_row:?}"
            );
        }
    }
}

#[test]
fn test_layout_local_positions_scale_with_spacing() {
    let ranks = layout_formation(3);
    for rank in &ranks {
        let c = rank.coordinate;
        assert_eq!(
            rank.local_position,
            DVec3::new(
                FORMATION_SPACING * f64::from(c.x),
                FORMATION_SPACING * f64::from(c.y - 1),
                0.0
            )
        );
    }
}

#[test]
fn test_layout_max_width_fills_structural_maximum() {
    let ranks = layout_formation(MAX_FORMATION_WIDTH);
    assert_eq!(ranks.len(), MAX_FORMATION_RANKS);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_layout_width_zero_is_fatal() {
    let _ = layout_formation(0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_layout_width_over_max_is_fatal() {
    let _ = layout_formation(MAX_FORMATION_WIDTH + 1);
}

// ---- Refill adjacency ----

#[test]
fn test_fill_from_entries_are_defined_neighbours() {
    // Every entry points behind (y+2), diagonally behind (±1, y+1) or
    // two steps sideways at the same row, and nothing else.
    for width in 2..=MAX_FORMATION_WIDTH {
        let ranks = layout_formation(width);
        for rank in &ranks {
            for from in rank.fill_from.iter().flatten() {
                let c = rank.coordinate;
                let n = ranks[*from].coordinate;
                let delta = (n.x - c.x, n.y - c.y);
                let valid = matches!(delta, (0, 2) | (-1, 1) | (1, 1) | (-2, 0) | (2, 0));
                assert!(valid, "rank {c:?} lists non-neighbour {n:?}");
            }
        }
    }
}

#[test]
fn test_fill_from_front_rank_priority_order() {
    // Front rank of a width-3 formation: directly behind first, then
    // the two diagonals; no two-inward entry since it sits centred.
    let ranks = layout_formation(3);
    let front = &ranks[0];
    assert_eq!(front.coordinate, Coordinate::new(0, 1));

    assert_eq!(front.fill_from[0], find_rank(&ranks, Coordinate::new(0, 3)));
    assert_eq!(front.fill_from[1], find_rank(&ranks, Coordinate::new(-1, 2)));
    assert_eq!(front.fill_from[2], find_rank(&ranks, Coordinate::new(1, 2)));
    assert!(front.fill_from[0].is_some());
    assert!(front.fill_from[1].is_some());
    assert!(front.fill_from[2].is_some());
    assert_eq!(front.fill_from[3], None);
}

#[test]
fn test_fill_from_outer_rank_never_crosses_centre() {
    // An outer rank's inward step goes at most two columns toward zero;
    // no entry may sit on the far side of the centre line.
    let ranks = layout_formation(5);
    for rank in &ranks {
        let x = rank.coordinate.x;
        if x.abs() > 1 {
            for from in rank.fill_from.iter().flatten() {
                let n = ranks[*from].coordinate;
                assert!(
                    n.x.signum() * x.signum() >= 0,
                    "refill path of {:?} crosses the centre via {n:?}",
                    rank.coordinate
                );
            }
        }
    }
}

#[test]
fn test_edge_ranks_tolerate_missing_neighbours() {
    // The topmost rank has nothing behind it; its list is all None.
    let ranks = layout_formation(2);
    let tip = ranks
        .iter()
        .find(|r| r.coordinate == Coordinate::new(0, 3))
        .unwrap();
    assert!(tip.fill_from.iter().all(Option::is_none));
}

#[test]
fn test_find_rank_miss_returns_none() {
    let ranks = layout_formation(2);
    assert_eq!(find_rank(&ranks, Coordinate::new(7, 7)), None);
}

// ---- Profiles ----

#[test]
fn test_tier_profiles_escalate() {
    let p1 = tier_profile(Tier::Fighter1);
    let p2 = tier_profile(Tier::Fighter2);
    let p3 = tier_profile(Tier::Fighter3);
    let m = tier_profile(Tier::Mothership);

    assert!(p1.hit_points < p2.hit_points && p2.hit_points < p3.hit_points);
    assert!(p1.score_value < p2.score_value && p2.score_value < p3.score_value);
    assert_eq!(m.score_value, MOTHERSHIP_SCORE);
    assert_eq!(m.aggressiveness, MOTHERSHIP_AGGRESSIVENESS);
    assert_eq!(f64::from(m.hit_points), MOTHERSHIP_AGGRESSIVENESS);
}

#[test]
fn test_collision_radius_grows_with_hit_points() {
    assert_eq!(collision_radius(1), ENEMY_SIZE_FACTOR);
    assert!(collision_radius(9) > collision_radius(3));
}

// ---- Gunnery ----

fn fire_context(tier: Tier, hit_points: i32) -> FireContext {
    FireContext {
        now: 10.0,
        next_shot_at: 0.0,
        position: DVec3::new(0.0, 100.0, 0.0),
        ship_position: DVec3::ZERO,
        tier,
        aggressiveness: tier_profile(tier).aggressiveness,
        hit_points,
    }
}

#[test]
fn test_fire_respects_cooldown() {
    let mut ctx = fire_context(Tier::Fighter1, 1);
    ctx.next_shot_at = ctx.now + 1.0;
    assert!(evaluate_fire(&ctx).is_none());
}

#[test]
fn test_fire_band_gating() {
    let mut ctx = fire_context(Tier::Fighter1, 1);

    // Too close.
    ctx.position.y = AI_MIN_SHOOT_DISTANCE / 2.0;
    assert!(evaluate_fire(&ctx).is_none());

    // Too far.
    ctx.position.y = AI_MAX_SHOOT_DISTANCE + 1.0;
    assert!(evaluate_fire(&ctx).is_none());

    // Already passed the player.
    ctx.position.y = -AI_SHOOT_BEHIND_DISTANCE - 1.0;
    assert!(evaluate_fire(&ctx).is_none());

    // In the band.
    ctx.position.y = 100.0;
    assert!(evaluate_fire(&ctx).is_some());
}

#[test]
fn test_fighters_fire_straight_down() {
    let order = evaluate_fire(&fire_context(Tier::Fighter2, 3)).unwrap();
    assert_eq!(order.beam_velocity, DVec3::new(0.0, -LASER_SPEED_ENEMY, 0.0));
}

#[test]
fn test_mothership_aims_at_offset_ship_position() {
    let mut ctx = fire_context(Tier::Mothership, 9);
    ctx.position = DVec3::new(50.0, 100.0, 0.0);
    let order = evaluate_fire(&ctx).unwrap();

    assert!((order.beam_velocity.length() - LASER_SPEED_MOTHERSHIP).abs() < 1e-9);
    assert!(order.beam_velocity.x < 0.0, "should aim back toward the ship");
    assert!(order.beam_velocity.y < 0.0);
}

#[test]
fn test_wounded_enemies_fire_faster() {
    // At 1 hp a mothership's cooldown is max_hp times shorter than at
    // full health.
    let healthy = evaluate_fire(&fire_context(Tier::Mothership, 9)).unwrap();
    let wounded = evaluate_fire(&fire_context(Tier::Mothership, 1)).unwrap();

    let healthy_delay = healthy.next_shot_at - 10.0;
    let wounded_delay = wounded.next_shot_at - 10.0;
    assert!((healthy_delay / wounded_delay - 9.0).abs() < 1e-9);
}

// ---- Course reversal ----

#[test]
fn test_reverse_at_boundary_moving_out() {
    assert!(should_reverse(FIELD_MAX_X - 0.1, 75.0, 1.0 / 30.0));
    assert!(should_reverse(FIELD_MIN_X + 0.1, -75.0, 1.0 / 30.0));
}

#[test]
fn test_no_reverse_when_already_returning() {
    // Outside the field but heading back in.
    assert!(!should_reverse(FIELD_MAX_X + 2.0, -75.0, 1.0 / 30.0));
}

#[test]
fn test_no_reverse_inside_field() {
    assert!(!should_reverse(0.0, 75.0, 1.0 / 30.0));
}
