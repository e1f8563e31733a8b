//! Proximity-based collision test shared by the enemy and projectile
//! systems.

use glam::DVec3;

/// Checks whether two moving points came nearer than `threshold` during
/// the last tick. Must be called *after* both objects have moved.
///
/// Fast path: straight-line post-move distance, correct at high tick
/// rates. If that misses, the time of closest approach within the tick
/// is solved analytically in the x/y plane, catching fast-relative-speed
/// pairs that tunnel past each other between two discrete steps.
pub fn detect_collision(
    dt: f64,
    position1: DVec3,
    velocity1: DVec3,
    position2: DVec3,
    velocity2: DVec3,
    threshold: f64,
) -> bool {
    if position1.distance(position2) <= threshold {
        return true;
    }

    // Rewind both points to the start of the tick; |dp + dv*t| =
    // threshold is then a quadratic in t, and a root with the closest
    // approach inside [0, dt] means the pair came at least as near as
    // the threshold while moving. This catches pairs that crossed
    // mid-tick and are already receding by the time we are called.
    let dp = (position2 - velocity2 * dt) - (position1 - velocity1 * dt);
    let dv = velocity2 - velocity1;

    let a = dv.x * dv.x + dv.y * dv.y;
    let b = 2.0 * (dp.x * dv.x + dp.y * dv.y);
    let c = dp.x * dp.x + dp.y * dp.y - threshold * threshold;

    if a == 0.0 || b * b < 4.0 * a * c {
        return false;
    }
    let t_nearest = -b / (2.0 * a);
    (0.0..=dt).contains(&t_nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_fast_path_overlap() {
        let p1 = DVec3::new(0.0, 0.0, 0.0);
        let p2 = DVec3::new(1.0, 0.0, 0.0);
        assert!(detect_collision(DT, p1, DVec3::ZERO, p2, DVec3::ZERO, 2.0));
    }

    #[test]
    fn test_separated_and_static_misses() {
        let p1 = DVec3::new(0.0, 0.0, 0.0);
        let p2 = DVec3::new(10.0, 0.0, 0.0);
        assert!(!detect_collision(DT, p1, DVec3::ZERO, p2, DVec3::ZERO, 2.0));
    }

    #[test]
    fn test_tunnelling_pair_still_registers() {
        // Two points that passed within 0.0 of each other mid-tick but
        // ended up far apart after moving: post-move distance check
        // alone would miss this.
        let v1 = DVec3::new(0.0, 600.0, 0.0);
        let v2 = DVec3::new(0.0, -600.0, 0.0);
        // Post-move positions (they crossed at y = 0 mid-tick).
        let p1 = DVec3::new(0.0, 5.0, 0.0);
        let p2 = DVec3::new(0.5, -5.0, 0.0);
        assert!(p1.distance(p2) > 2.0, "fast path must not apply");
        assert!(detect_collision(DT, p1, v1, p2, v2, 2.0));
    }

    #[test]
    fn test_receding_pair_does_not_collide() {
        // Separated at the start of the tick and moving apart the whole
        // way: closest approach was before the tick began.
        let p1 = DVec3::new(0.0, 5.0, 0.0);
        let p2 = DVec3::new(0.0, -5.0, 0.0);
        let v1 = DVec3::new(0.0, 60.0, 0.0);
        let v2 = DVec3::new(0.0, -60.0, 0.0);
        assert!(!detect_collision(DT, p1, v1, p2, v2, 2.0));
    }

    #[test]
    fn test_closest_approach_beyond_tick_is_ignored() {
        // Approaching, but too slowly to meet within one tick.
        let p1 = DVec3::new(0.0, 0.0, 0.0);
        let p2 = DVec3::new(0.0, 100.0, 0.0);
        let v2 = DVec3::new(0.0, -1.0, 0.0);
        assert!(!detect_collision(DT, p1, DVec3::ZERO, p2, v2, 2.0));
    }
}
