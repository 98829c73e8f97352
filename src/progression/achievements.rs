//! Achievement catalog and unlock evaluation
//!
//! The catalog is closed: every [`AchievementId`] has exactly one
//! definition, so looking up a template cannot fail at runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::save::{CaseResult, UserProgress};

/// Identifier of an achievement in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_case")]
    FirstCase,
    #[serde(rename = "perfect_score")]
    PerfectScore,
    #[serde(rename = "streak_5")]
    Streak5,
    #[serde(rename = "pharmacy_collab")]
    PharmacyCollab,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "weekly_goal")]
    WeeklyGoal,
}

impl AchievementId {
    /// All ids in evaluation order.
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstCase,
        AchievementId::PerfectScore,
        AchievementId::Streak5,
        AchievementId::PharmacyCollab,
        AchievementId::Level5,
        AchievementId::WeeklyGoal,
    ];

    /// Stable string key, as stored in saved progress.
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstCase => "first_case",
            AchievementId::PerfectScore => "perfect_score",
            AchievementId::Streak5 => "streak_5",
            AchievementId::PharmacyCollab => "pharmacy_collab",
            AchievementId::Level5 => "level_5",
            AchievementId::WeeklyGoal => "weekly_goal",
        }
    }

    /// Catalog template for this id
    pub fn def(&self) -> &'static AchievementDef {
        match self {
            AchievementId::FirstCase => &ALL_ACHIEVEMENTS[0],
            AchievementId::PerfectScore => &ALL_ACHIEVEMENTS[1],
            AchievementId::Streak5 => &ALL_ACHIEVEMENTS[2],
            AchievementId::PharmacyCollab => &ALL_ACHIEVEMENTS[3],
            AchievementId::Level5 => &ALL_ACHIEVEMENTS[4],
            AchievementId::WeeklyGoal => &ALL_ACHIEVEMENTS[5],
        }
    }
}

/// Static achievement definition
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: u32,
}

impl AchievementDef {
    /// Instantiate an unlocked achievement from this template
    pub fn unlock(&self, unlocked_at: DateTime<Utc>) -> Achievement {
        Achievement {
            id: self.id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            points: self.points,
            unlocked_at,
        }
    }
}

/// All achievement definitions, in evaluation order
pub static ALL_ACHIEVEMENTS: [AchievementDef; 6] = [
    AchievementDef {
        id: AchievementId::FirstCase,
        title: "İlk Adım",
        description: "İlk vakayı tamamladın!",
        icon: "medical-bag",
        points: 50,
    },
    AchievementDef {
        id: AchievementId::PerfectScore,
        title: "Mükemmel Tanı",
        description: "100 puan ile bir vaka çözdün!",
        icon: "trophy",
        points: 100,
    },
    AchievementDef {
        id: AchievementId::Streak5,
        title: "Tutarlılık",
        description: "5 vaka üst üste doğru çözdün!",
        icon: "fire",
        points: 150,
    },
    AchievementDef {
        id: AchievementId::PharmacyCollab,
        title: "İşbirlikçi",
        description: "Eczacılık konsültasyonu yaptın!",
        icon: "account-group",
        points: 75,
    },
    AchievementDef {
        id: AchievementId::Level5,
        title: "Uzman Adayı",
        description: "5. seviyeye ulaştın!",
        icon: "school",
        points: 200,
    },
    AchievementDef {
        id: AchievementId::WeeklyGoal,
        title: "Hedefi Vurdu",
        description: "Haftalık hedefini tamamladın!",
        icon: "target",
        points: 100,
    },
];

/// An unlocked achievement. Never modified once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub points: u32,
    pub unlocked_at: DateTime<Utc>,
}

/// Activity that can unlock achievements
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    /// A case attempt was submitted
    CaseCompleted(&'a CaseResult),
    /// The user held a pharmacy consultation
    PharmacyConsultation,
}

/// Whether the unlock condition for `id` holds for this transition
fn condition_met(id: AchievementId, after: &UserProgress, event: ProgressEvent<'_>) -> bool {
    match (id, event) {
        (AchievementId::FirstCase, ProgressEvent::CaseCompleted(_)) => after.completed_cases == 1,
        (AchievementId::PerfectScore, ProgressEvent::CaseCompleted(result)) => result.score == 100,
        (AchievementId::Streak5, ProgressEvent::CaseCompleted(_)) => after.current_streak == 5,
        (AchievementId::PharmacyCollab, ProgressEvent::PharmacyConsultation) => true,
        (AchievementId::Level5, ProgressEvent::CaseCompleted(_)) => after.level == 5,
        (AchievementId::WeeklyGoal, ProgressEvent::CaseCompleted(_)) => {
            after.weekly_progress >= after.weekly_goal
        }
        _ => false,
    }
}

/// Achievements newly unlocked by the transition `before` -> `after`.
///
/// `after` is the record with points, level, counters, and weekly progress
/// already updated. Ids already held in `before` are skipped.
pub fn evaluate(
    before: &UserProgress,
    after: &UserProgress,
    event: ProgressEvent<'_>,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    AchievementId::ALL
        .iter()
        .filter(|&&id| !before.has_achievement(id))
        .filter(|&&id| condition_met(id, after, event))
        .map(|id| {
            log::info!("Achievement unlocked: {}", id.key());
            id.def().unlock(now)
        })
        .collect()
}
