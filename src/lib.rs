//! VakaGöz - progress engine for diagnostic case practice
//!
//! Scores case attempts, tracks levels, streaks and achievements, and
//! derives per-department case availability for medicine and pharmacy
//! students.

pub mod progression;
pub mod cases;
pub mod data;
pub mod save;

// Re-export commonly used types
pub use cases::{calculate_case_stats, format_case_count, CaseStats, CaseStatsCalculator};
pub use data::{Department, Faculty, TargetFaculty};
pub use progression::{compute_case_points, compute_level, Achievement, AchievementId, ProgressAnalytics};
pub use save::{
    CaseResult, FileStore, KeyValueStore, MemoryStore, ProgressError, ProgressStore,
    ProgressUpdate, StoreError, UserProgress,
};
