//! Per-department case availability
//!
//! Derives the counts shown on a department card from the department's
//! tuning values and the user's progress. Read-only: nothing here touches
//! storage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{Department, DepartmentTables};
use crate::save::UserProgress;

/// Pool share for departments outside the user's faculty
pub const OTHER_FACULTY_MULTIPLIER: f64 = 0.7;
/// Cap on the level-driven pool growth
pub const MAX_LEVEL_MULTIPLIER: f64 = 1.5;
/// Share of the pool unlocked at level 1
pub const BASE_AVAILABILITY: f64 = 0.6;

/// Case counts split by difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub beginner: u32,
    pub intermediate: u32,
    pub advanced: u32,
}

impl DifficultyBreakdown {
    /// 40% beginner, 45% intermediate, 15% advanced, each rounded down
    pub fn for_total(total: u32) -> Self {
        let total = total as f64;
        Self {
            beginner: (total * 0.4).floor() as u32,
            intermediate: (total * 0.45).floor() as u32,
            advanced: (total * 0.15).floor() as u32,
        }
    }

    pub fn sum(&self) -> u32 {
        self.beginner + self.intermediate + self.advanced
    }
}

/// Display statistics for one department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStats {
    pub total: u32,
    pub available: u32,
    pub completed: u32,
    pub locked: u32,
    pub new_this_week: u32,
    pub difficulty: DifficultyBreakdown,
}

/// Level-driven growth of the case pool
pub fn level_multiplier(level: u32) -> f64 {
    (1.0 + level.saturating_sub(1) as f64 * 0.1).min(MAX_LEVEL_MULTIPLIER)
}

/// Fraction of the pool a user at `level` can open
pub fn availability_ratio(level: u32) -> f64 {
    (BASE_AVAILABILITY + level.saturating_sub(1) as f64 * 0.04).min(1.0)
}

/// Computes [`CaseStats`] against a set of tuning tables
#[derive(Debug, Clone, Default)]
pub struct CaseStatsCalculator {
    tables: DepartmentTables,
}

impl CaseStatsCalculator {
    pub fn new(tables: DepartmentTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &DepartmentTables {
        &self.tables
    }

    /// Statistics for `department` as seen by the owner of `progress`.
    ///
    /// `rng` only drives the "new this week" count.
    pub fn compute<R: Rng>(
        &self,
        department: &Department,
        progress: &UserProgress,
        rng: &mut R,
    ) -> CaseStats {
        let base_count = self.tables.base_count(&department.id) as f64;
        let faculty_multiplier = if department.target_faculty.includes(progress.faculty) {
            1.0
        } else {
            OTHER_FACULTY_MULTIPLIER
        };

        let total = (base_count * faculty_multiplier * level_multiplier(progress.level)).floor() as u32;
        let available = (total as f64 * availability_ratio(progress.level)).floor() as u32;
        let completed = ((progress.completed_cases as f64
            * self.tables.completion_ratio(&department.id))
        .floor() as u32)
            .min(available);

        CaseStats {
            total,
            available,
            completed,
            locked: total - available,
            new_this_week: rng.gen_range(1..=3),
            difficulty: DifficultyBreakdown::for_total(total),
        }
    }
}

/// Statistics with the built-in tables and the thread RNG
pub fn calculate_case_stats(department: &Department, progress: &UserProgress) -> CaseStats {
    CaseStatsCalculator::default().compute(department, progress, &mut rand::thread_rng())
}

/// Short label for a department card
pub fn format_case_count(stats: &CaseStats) -> String {
    if stats.new_this_week > 0 {
        format!("{} vaka (+{} yeni)", stats.available, stats.new_this_week)
    } else if stats.completed > 0 {
        format!("{} vaka ({} tamamlandı)", stats.available, stats.completed)
    } else {
        format!("{} vaka", stats.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{all_departments, find_department, Faculty, TargetFaculty};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn progress(faculty: Faculty, level: u32, completed: u32) -> UserProgress {
        UserProgress {
            level,
            completed_cases: completed,
            faculty,
            ..UserProgress::default()
        }
    }

    fn department(id: &str) -> Department {
        find_department(id).unwrap()
    }

    #[test]
    fn test_fresh_medicine_student_cardiology() {
        let mut rng = StdRng::seed_from_u64(7);
        let stats = CaseStatsCalculator::default().compute(
            &department("cardiology"),
            &progress(Faculty::MedicineFaculty, 1, 0),
            &mut rng,
        );
        assert_eq!(stats.total, 35);
        assert_eq!(stats.available, 21);
        assert_eq!(stats.locked, 14);
        assert_eq!(stats.completed, 0);
        assert_eq!(
            stats.difficulty,
            DifficultyBreakdown { beginner: 14, intermediate: 15, advanced: 5 }
        );
    }

    #[test]
    fn test_level_three_with_history() {
        let mut rng = StdRng::seed_from_u64(7);
        let stats = CaseStatsCalculator::default().compute(
            &department("cardiology"),
            &progress(Faculty::MedicineFaculty, 3, 47),
            &mut rng,
        );
        assert_eq!(stats.total, 42);
        assert_eq!(stats.available, 28);
        assert_eq!(stats.completed, 7);
        assert_eq!(stats.locked, 14);
    }

    #[test]
    fn test_other_faculty_sees_fewer_cases() {
        let mut rng = StdRng::seed_from_u64(7);
        let stats = CaseStatsCalculator::default().compute(
            &department("clinical-pharmacy"),
            &progress(Faculty::MedicineFaculty, 1, 20),
            &mut rng,
        );
        assert_eq!(stats.total, 26);
        assert_eq!(stats.available, 15);
        assert_eq!(stats.completed, 3);
    }

    #[test]
    fn test_high_level_caps() {
        let mut rng = StdRng::seed_from_u64(7);
        let stats = CaseStatsCalculator::default().compute(
            &department("emergency"),
            &progress(Faculty::MedicineFaculty, 11, 1000),
            &mut rng,
        );
        assert_eq!(stats.total, 67);
        assert_eq!(stats.available, 67);
        assert_eq!(stats.locked, 0);
        // Completed is capped by what is available
        assert_eq!(stats.completed, 67);
    }

    #[test]
    fn test_unlisted_department_uses_defaults() {
        let unlisted = Department {
            id: "dermatology".to_string(),
            name: "Dermatoloji".to_string(),
            description: String::new(),
            target_faculty: TargetFaculty::Both,
            case_count: 0,
            ai_features: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(7);
        let stats = CaseStatsCalculator::default().compute(
            &unlisted,
            &progress(Faculty::PharmacyFaculty, 2, 5),
            &mut rng,
        );
        assert_eq!(stats.total, 22);
        assert_eq!(stats.available, 14);
        assert_eq!(stats.completed, 0);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let calculator = CaseStatsCalculator::default();
        let dept = department("neurology");
        let user = progress(Faculty::MedicineFaculty, 4, 12);
        let a = calculator.compute(&dept, &user, &mut StdRng::seed_from_u64(42));
        let b = calculator.compute(&dept, &user, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_this_week_range() {
        let dept = department("pediatrics");
        let user = progress(Faculty::MedicineFaculty, 1, 0);
        for _ in 0..100 {
            let stats = calculate_case_stats(&dept, &user);
            assert!((1..=3).contains(&stats.new_this_week));
        }
    }

    #[test]
    fn test_format_case_count() {
        let mut stats = CaseStats {
            total: 35,
            available: 21,
            completed: 4,
            locked: 14,
            new_this_week: 2,
            difficulty: DifficultyBreakdown::for_total(35),
        };
        // New cases take precedence over completed ones
        assert_eq!(format_case_count(&stats), "21 vaka (+2 yeni)");
        stats.new_this_week = 0;
        assert_eq!(format_case_count(&stats), "21 vaka (4 tamamlandı)");
        stats.completed = 0;
        assert_eq!(format_case_count(&stats), "21 vaka");
    }

    proptest! {
        #[test]
        fn prop_stats_invariants(
            index in 0usize..10,
            level in 0u32..40,
            completed in 0u32..100_000,
            pharmacy in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let departments = all_departments();
            let faculty = if pharmacy { Faculty::PharmacyFaculty } else { Faculty::MedicineFaculty };
            let stats = CaseStatsCalculator::default().compute(
                &departments[index],
                &progress(faculty, level, completed),
                &mut StdRng::seed_from_u64(seed),
            );
            prop_assert_eq!(stats.available + stats.locked, stats.total);
            prop_assert!(stats.completed <= stats.available);
            prop_assert!((1..=3).contains(&stats.new_this_week));
            prop_assert!(stats.difficulty.sum() <= stats.total);
            prop_assert!(stats.total - stats.difficulty.sum() <= 2);
        }
    }
}
