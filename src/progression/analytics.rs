//! Dashboard numbers derived from a progress record

use serde::{Deserialize, Serialize};

use super::levels::{level_progress, points_to_next_level};
use crate::save::UserProgress;

/// Estimated minutes a completed case takes
pub const MINUTES_PER_CASE: u32 = 10;

/// Derived progress figures shown on the statistics screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalytics {
    pub points_to_next_level: u32,
    /// Percent (0-100) through the current level
    pub level_progress: f64,
    pub weekly_progress_percentage: f64,
    /// Mean points per completed case, rounded
    pub average_score: u32,
    /// Estimated total play time in minutes
    pub total_play_time: u32,
}

impl ProgressAnalytics {
    pub fn from_progress(progress: &UserProgress) -> Self {
        let weekly_progress_percentage = if progress.weekly_goal == 0 {
            0.0
        } else {
            progress.weekly_progress as f64 / progress.weekly_goal as f64 * 100.0
        };
        let average_score = if progress.completed_cases > 0 {
            (progress.total_points as f64 / progress.completed_cases as f64).round() as u32
        } else {
            0
        };

        Self {
            points_to_next_level: points_to_next_level(progress.total_points),
            level_progress: level_progress(progress.total_points) * 100.0,
            weekly_progress_percentage,
            average_score,
            total_play_time: progress.completed_cases.saturating_mul(MINUTES_PER_CASE),
        }
    }
}
