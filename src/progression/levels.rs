//! Points and leveling
//!
//! Level thresholds, the inverse helpers, and in-level progress.

/// Point thresholds at which levels 2 through 6 would begin on the table.
/// Past the last entry the square-root formula takes over.
const LEVEL_TABLE: [u32; 5] = [500, 1500, 3000, 5000, 8000];

/// Highest level covered by the threshold table
pub const TABLE_MAX_LEVEL: u32 = 5;

/// Level for a cumulative point total.
///
/// The table covers levels 1-5. From 8000 points on the level is
/// `floor(sqrt(points / 100)) + 1`, which jumps straight from 5 to 9.
pub fn compute_level(total_points: u32) -> u32 {
    if let Some(index) = LEVEL_TABLE.iter().position(|&threshold| total_points < threshold) {
        return index as u32 + 1;
    }
    // Integer square root keeps the floor exact for large totals
    integer_sqrt(total_points / 100) + 1
}

/// Minimum points for a given level.
///
/// For levels past the table this is `(level - 1)^2 * 100`, which is lower
/// than 8000 for levels 6-9.
pub fn points_for_level(level: u32) -> u32 {
    match level {
        0 | 1 => 0,
        2 => 500,
        3 => 1500,
        4 => 3000,
        5 => 5000,
        _ => (level - 1).saturating_mul(level - 1).saturating_mul(100),
    }
}

/// Points at which the holder of `level` reaches the next level
pub fn next_level_points(level: u32) -> u32 {
    if level == 0 {
        return LEVEL_TABLE[0];
    }
    if level <= TABLE_MAX_LEVEL {
        LEVEL_TABLE[(level - 1) as usize]
    } else {
        level.saturating_mul(level).saturating_mul(100)
    }
}

/// Points still needed to reach the next level
pub fn points_to_next_level(total_points: u32) -> u32 {
    next_level_points(compute_level(total_points)).saturating_sub(total_points)
}

/// Fraction (0.0 - 1.0) of the way through the current level
pub fn level_progress(total_points: u32) -> f64 {
    let level = compute_level(total_points);
    let floor = points_for_level(level);
    let ceiling = next_level_points(level);
    if ceiling <= floor {
        return 1.0;
    }
    let fraction = (total_points.saturating_sub(floor)) as f64 / (ceiling - floor) as f64;
    fraction.clamp(0.0, 1.0)
}

fn integer_sqrt(value: u32) -> u32 {
    let mut root = (value as f64).sqrt() as u32;
    // Correct any float rounding at perfect squares
    while root.saturating_mul(root) > value {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= value {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_table() {
        assert_eq!(compute_level(0), 1);
        assert_eq!(compute_level(499), 1);
        assert_eq!(compute_level(500), 2);
        assert_eq!(compute_level(1499), 2);
        assert_eq!(compute_level(1500), 3);
        assert_eq!(compute_level(3000), 4);
        assert_eq!(compute_level(5000), 5);
        assert_eq!(compute_level(7999), 5);
    }

    #[test]
    fn test_formula_jump_at_8000() {
        // floor(sqrt(80)) + 1 = 9
        assert_eq!(compute_level(8000), 9);
        assert_eq!(compute_level(8099), 9);
        assert_eq!(compute_level(8100), 10);
        assert_eq!(compute_level(10_000), 11);
    }

    #[test]
    fn test_points_for_level() {
        assert_eq!(points_for_level(0), 0);
        assert_eq!(points_for_level(1), 0);
        assert_eq!(points_for_level(2), 500);
        assert_eq!(points_for_level(5), 5000);
        assert_eq!(points_for_level(6), 2500);
        assert_eq!(points_for_level(10), 8100);
    }

    #[test]
    fn test_points_to_next_level() {
        assert_eq!(points_to_next_level(0), 500);
        assert_eq!(points_to_next_level(175), 325);
        assert_eq!(points_to_next_level(5000), 3000);
        assert_eq!(points_to_next_level(8000), 100);
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(level_progress(0), 0.0);
        assert!((level_progress(250) - 0.5).abs() < 1e-9);
        assert!((level_progress(1000) - 0.5).abs() < 1e-9);
        // Level 5 runs from 5000 to 8000
        assert!((level_progress(6500) - 0.5).abs() < 1e-9);
        let at_nine = level_progress(8000);
        assert!((0.0..=1.0).contains(&at_nine));
    }

    proptest! {
        #[test]
        fn prop_level_monotonic(a in 0u32..2_000_000, b in 0u32..2_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(compute_level(low) <= compute_level(high));
        }

        #[test]
        fn prop_formula_matches_float(points in 8000u32..5_000_000) {
            let expected = ((points / 100) as f64).sqrt().floor() as u32 + 1;
            prop_assert_eq!(compute_level(points), expected);
        }
    }
}
