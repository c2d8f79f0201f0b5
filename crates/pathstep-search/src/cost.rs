//! Cost model: path length, heuristic distance and combined priority.
//!
//! All functions are pure and total over grid coordinates.

use pathstep_core::Point;

/// Default weight applied to the heuristic in [`priority`].
pub const DEFAULT_HEURISTIC_WEIGHT: i64 = 2;

/// Largest weight a [`SearchConfig`](crate::SearchConfig) will hand to
/// [`priority`].
pub const MAX_HEURISTIC_WEIGHT: i64 = 1 << 20;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Squared Euclidean distance from `p` to `goal`.
///
/// Deliberately not square-rooted: the inflated estimate pulls best-first
/// search toward the goal faster at the cost of optimality. Never negative,
/// zero iff `p == goal`.
#[inline]
pub fn heuristic_distance(goal: Point, p: Point) -> i64 {
    let dx = i64::from(p.x - goal.x);
    let dy = i64::from(p.y - goal.y);
    dx * dx + dy * dy
}

/// Combined ordering cost: `path_length + weight * heuristic`.
///
/// Saturates at `i64::MAX`; equal priorities then fall back to discovery
/// order.
#[inline]
pub fn priority(path_length: u32, heuristic: i64, weight: i64) -> i64 {
    weight
        .saturating_mul(heuristic)
        .saturating_add(i64::from(path_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_squared_euclidean() {
        let goal = Point::new(4, 4);
        assert_eq!(heuristic_distance(goal, Point::new(0, 0)), 32);
        assert_eq!(heuristic_distance(goal, Point::new(4, 1)), 9);
        assert_eq!(heuristic_distance(goal, goal), 0);
    }

    #[test]
    fn heuristic_is_symmetric_and_non_negative() {
        let a = Point::new(-3, 7);
        let b = Point::new(5, -2);
        assert_eq!(heuristic_distance(a, b), heuristic_distance(b, a));
        assert!(heuristic_distance(a, b) > 0);
    }

    #[test]
    fn priority_weights_heuristic() {
        assert_eq!(priority(0, 32, 2), 64);
        assert_eq!(priority(3, 5, 2), 13);
        assert_eq!(priority(7, 0, DEFAULT_HEURISTIC_WEIGHT), 7);
    }

    #[test]
    fn priority_saturates_instead_of_overflowing() {
        assert_eq!(priority(3, i64::MAX / 2, 4), i64::MAX);
        assert_eq!(priority(u32::MAX, i64::MAX, 1), i64::MAX);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(4, 4)), 8);
        assert_eq!(manhattan(Point::new(2, 1), Point::new(1, 3)), 3);
    }
}
