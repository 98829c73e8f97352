//! Case scoring
//!
//! Turns the outcome of a single case attempt into a point award.

use crate::save::CaseResult;

/// Base award for a correct diagnosis
pub const CORRECT_BASE_POINTS: i64 = 100;
/// Base award for an attempt with a wrong diagnosis
pub const INCORRECT_BASE_POINTS: i64 = 20;
/// Points deducted per hint used
pub const HINT_PENALTY: i64 = 10;
/// No attempt ever earns less than this
pub const MIN_CASE_POINTS: u32 = 10;

/// Bonus for the single highest score tier reached
pub fn score_bonus(score: u8) -> i64 {
    match score {
        90..=u8::MAX => 50,
        80..=89 => 30,
        70..=79 => 15,
        _ => 0,
    }
}

/// Bonus for solving in the 5-15 minute sweet spot, smaller bonus up to 25
pub fn time_bonus(minutes: u32) -> i64 {
    if (5..=15).contains(&minutes) {
        25
    } else if minutes <= 25 {
        10
    } else {
        0
    }
}

/// Points awarded for a case attempt.
///
/// Inputs are not validated here; callers that need range checks use
/// [`CaseResult::validate`] first.
pub fn compute_case_points(result: &CaseResult) -> u32 {
    let base = if result.is_correct {
        CORRECT_BASE_POINTS
    } else {
        INCORRECT_BASE_POINTS
    };
    let penalty = HINT_PENALTY * result.hints_used as i64;
    let total = base + score_bonus(result.score) - penalty + time_bonus(result.time_spent);

    log::debug!(
        "Case {} scored: base {}, score bonus {}, hint penalty {}, time bonus {}",
        result.case_id,
        base,
        score_bonus(result.score),
        penalty,
        time_bonus(result.time_spent),
    );

    total.max(MIN_CASE_POINTS as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(score: u8, minutes: u32, hints: u32, correct: bool) -> CaseResult {
        CaseResult {
            case_id: "case-1".to_string(),
            score,
            time_spent: minutes,
            hints_used: hints,
            completed: true,
            diagnosis: "Akut miyokard enfarktüsü".to_string(),
            is_correct: correct,
        }
    }

    #[test]
    fn test_perfect_case() {
        // 100 base + 50 score + 25 time
        assert_eq!(compute_case_points(&result(100, 10, 0, true)), 175);
    }

    #[test]
    fn test_score_tiers_not_cumulative() {
        assert_eq!(compute_case_points(&result(95, 30, 0, true)), 150);
        assert_eq!(compute_case_points(&result(85, 30, 0, true)), 130);
        assert_eq!(compute_case_points(&result(75, 30, 0, true)), 115);
        assert_eq!(compute_case_points(&result(69, 30, 0, true)), 100);
    }

    #[test]
    fn test_time_bonus_bands() {
        assert_eq!(time_bonus(4), 10); // Too fast still counts as under 25
        assert_eq!(time_bonus(5), 25);
        assert_eq!(time_bonus(15), 25);
        assert_eq!(time_bonus(16), 10);
        assert_eq!(time_bonus(25), 10);
        assert_eq!(time_bonus(26), 0);
    }

    #[test]
    fn test_hint_penalty_floor() {
        // 20 base - 100 penalty would go negative
        assert_eq!(compute_case_points(&result(10, 60, 10, false)), MIN_CASE_POINTS);
        assert_eq!(compute_case_points(&result(0, 60, u32::MAX, false)), MIN_CASE_POINTS);
    }

    #[test]
    fn test_incorrect_with_good_score() {
        // 20 base + 30 score + 10 time - 10 hint
        assert_eq!(compute_case_points(&result(82, 20, 1, false)), 50);
    }

    proptest! {
        #[test]
        fn prop_points_never_below_floor(
            score in 0u8..=100,
            minutes in 0u32..200,
            hints in 0u32..50,
            correct in any::<bool>(),
        ) {
            prop_assert!(compute_case_points(&result(score, minutes, hints, correct)) >= MIN_CASE_POINTS);
        }

        #[test]
        fn prop_points_monotonic_in_score(
            low in 0u8..=100,
            delta in 0u8..=100,
            minutes in 0u32..60,
            hints in 0u32..5,
            correct in any::<bool>(),
        ) {
            let high = low.saturating_add(delta).min(100);
            prop_assert!(
                compute_case_points(&result(high, minutes, hints, correct))
                    >= compute_case_points(&result(low, minutes, hints, correct))
            );
        }
    }
}
