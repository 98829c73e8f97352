//! Persistent user progress and the case history log
//!
//! The JSON shape (camelCase keys, faculty display names) matches what the
//! mobile client already stores.

use serde::{Deserialize, Serialize};

use crate::data::Faculty;
use crate::progression::{compute_level, Achievement, AchievementId};

/// Weekly case goal for a new user
pub const DEFAULT_WEEKLY_GOAL: u32 = 5;

/// One user's progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Cached view of `compute_level(total_points)`
    pub level: u32,
    pub total_points: u32,
    pub completed_cases: u32,
    /// Consecutive correct diagnoses
    pub current_streak: u32,
    pub faculty: Faculty,
    /// Unlocked achievements, in unlock order
    pub achievements: Vec<Achievement>,
    pub weekly_goal: u32,
    /// Cases towards this week's goal, never above `weekly_goal`
    pub weekly_progress: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            total_points: 0,
            completed_cases: 0,
            current_streak: 0,
            faculty: Faculty::default(),
            achievements: Vec::new(),
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            weekly_progress: 0,
        }
    }
}

impl UserProgress {
    /// Fresh record for a newly onboarded student
    pub fn new(faculty: Faculty, weekly_goal: u32) -> Self {
        Self {
            faculty,
            weekly_goal: weekly_goal.max(1),
            ..Self::default()
        }
    }

    /// Check if an achievement is unlocked
    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Add points and refresh the cached level
    pub fn add_points(&mut self, points: u32) {
        self.total_points = self.total_points.saturating_add(points);
        self.level = compute_level(self.total_points);
    }

    /// Count one case towards the weekly goal
    pub fn record_weekly_case(&mut self) {
        self.weekly_progress = self.weekly_progress.saturating_add(1).min(self.weekly_goal);
    }

    /// Append newly unlocked achievements, skipping any id already held
    pub fn push_achievements(&mut self, unlocked: impl IntoIterator<Item = Achievement>) {
        for achievement in unlocked {
            if !self.has_achievement(achievement.id) {
                self.achievements.push(achievement);
            }
        }
    }

    /// Restore derived fields and bounds on a record read from storage
    pub fn normalized(mut self) -> Self {
        self.weekly_goal = self.weekly_goal.max(1);
        self.weekly_progress = self.weekly_progress.min(self.weekly_goal);
        self.level = compute_level(self.total_points);
        let mut seen = Vec::with_capacity(self.achievements.len());
        self.achievements.retain(|a| {
            if seen.contains(&a.id) {
                false
            } else {
                seen.push(a.id);
                true
            }
        });
        self
    }
}

/// Outcome of a single case attempt. Appended to history, never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub case_id: String,
    /// 0-100
    pub score: u8,
    /// Minutes spent on the case
    pub time_spent: u32,
    pub hints_used: u32,
    pub completed: bool,
    pub diagnosis: String,
    pub is_correct: bool,
}

/// Highest valid case score
pub const MAX_SCORE: u8 = 100;

impl CaseResult {
    /// Ok if the result is within the ranges the engine accepts
    pub fn validate(&self) -> Result<(), u8> {
        if self.score > MAX_SCORE {
            return Err(self.score);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_progress() {
        let progress = UserProgress::default();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.total_points, 0);
        assert_eq!(progress.faculty, Faculty::MedicineFaculty);
        assert_eq!(progress.weekly_goal, 5);
        assert!(progress.achievements.is_empty());
    }

    #[test]
    fn test_json_shape_matches_client() {
        let progress = UserProgress::new(Faculty::PharmacyFaculty, 3);
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["totalPoints"], 0);
        assert_eq!(json["weeklyGoal"], 3);
        assert_eq!(json["faculty"], "Eczacılık Fakültesi");

        let client = r#"{"caseId":"c1","score":88,"timeSpent":12,"hintsUsed":1,
            "completed":true,"diagnosis":"Pnömoni","isCorrect":true}"#;
        let result: CaseResult = serde_json::from_str(client).unwrap();
        assert_eq!(result.time_spent, 12);
        assert!(result.is_correct);
    }

    #[test]
    fn test_weekly_progress_clamped() {
        let mut progress = UserProgress::new(Faculty::MedicineFaculty, 2);
        for _ in 0..5 {
            progress.record_weekly_case();
        }
        assert_eq!(progress.weekly_progress, 2);
    }

    #[test]
    fn test_weekly_progress_saturates() {
        let mut progress = UserProgress::new(Faculty::MedicineFaculty, u32::MAX);
        progress.weekly_progress = u32::MAX;
        progress.record_weekly_case();
        assert_eq!(progress.weekly_progress, u32::MAX);
    }

    #[test]
    fn test_zero_weekly_goal_raised_to_one() {
        assert_eq!(UserProgress::new(Faculty::MedicineFaculty, 0).weekly_goal, 1);
    }

    #[test]
    fn test_normalized_repairs_stored_record() {
        let mut stored = UserProgress::default();
        stored.total_points = 1600;
        stored.level = 1;
        stored.weekly_progress = 9;
        let unlocked = AchievementId::FirstCase.def().unlock(Utc::now());
        stored.achievements = vec![unlocked.clone(), unlocked];

        let fixed = stored.normalized();
        assert_eq!(fixed.level, 3);
        assert_eq!(fixed.weekly_progress, 5);
        assert_eq!(fixed.achievements.len(), 1);
    }

    #[test]
    fn test_validate_score() {
        let mut result = CaseResult {
            case_id: "c".to_string(),
            score: 100,
            time_spent: 0,
            hints_used: 0,
            completed: false,
            diagnosis: String::new(),
            is_correct: false,
        };
        assert!(result.validate().is_ok());
        result.score = 101;
        assert_eq!(result.validate(), Err(101));
    }
}
