//! Progression systems
//!
//! Scoring, leveling, achievements, and the analytics derived from them.

pub mod scoring;
pub mod levels;
pub mod achievements;
pub mod analytics;

pub use scoring::compute_case_points;
pub use levels::{compute_level, level_progress, next_level_points, points_for_level, points_to_next_level};
pub use achievements::{evaluate, Achievement, AchievementDef, AchievementId, ProgressEvent, ALL_ACHIEVEMENTS};
pub use analytics::ProgressAnalytics;
