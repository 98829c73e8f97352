//! The progress store: the only code that changes a user's progress
//!
//! Every mutation is a read-modify-write against the injected
//! [`KeyValueStore`], held under one lock so concurrent submissions are
//! applied one after another instead of overwriting each other.
//!
//! Each operation comes in two forms. The `try_*` methods report failures
//! as [`ProgressError`]; the plain methods log and fall back to the stored
//! (or default) record so a screen never has to handle an error.

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use super::profile::{CaseResult, UserProgress};
use super::store::{KeyValueStore, StoreError};
use crate::data::Faculty;
use crate::progression::{
    compute_case_points, evaluate, Achievement, ProgressAnalytics, ProgressEvent,
};

/// Key of the serialized [`UserProgress`]
pub const PROGRESS_KEY: &str = "user_progress";
/// Key of the serialized case history
pub const CASE_RESULTS_KEY: &str = "case_results";
/// Raw copy of a case history that could no longer be parsed
pub const CORRUPT_CASE_RESULTS_KEY: &str = "case_results_corrupt";
/// Key used by older clients for a separate achievement list; cleared on reset
pub const LEGACY_ACHIEVEMENTS_KEY: &str = "achievements";
/// Award for a pharmacy consultation
pub const CONSULTATION_POINTS: u32 = 75;

/// Failure while applying a progress event
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Case score {score} is above the maximum of 100")]
    InvalidResult { score: u8 },
}

/// Result of a successful progress event
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// The record as persisted
    pub progress: UserProgress,
    pub earned_points: u32,
    /// Achievements unlocked by this event, in unlock order
    pub new_achievements: Vec<Achievement>,
}

/// Owner of the persisted progress record and case history
#[derive(Debug)]
pub struct ProgressStore<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the progress store, returning the key-value store
    pub fn into_inner(self) -> S {
        self.store
    }

    // ========================================================================
    // Reads
    // ========================================================================

    fn read_progress(&self) -> Result<Option<UserProgress>, StoreError> {
        match self.store.get(PROGRESS_KEY)? {
            Some(json) => {
                let progress: UserProgress = serde_json::from_str(&json)?;
                Ok(Some(progress.normalized()))
            }
            None => Ok(None),
        }
    }

    /// Stored progress, or a fresh default record if none exists
    pub fn try_load(&self) -> Result<UserProgress, StoreError> {
        Ok(self.read_progress()?.unwrap_or_default())
    }

    /// Stored progress. Read failures are logged and yield the default record.
    pub fn load(&self) -> UserProgress {
        match self.try_load() {
            Ok(progress) => progress,
            Err(e) => {
                log::warn!("Failed to load user progress: {}, using default", e);
                UserProgress::default()
            }
        }
    }

    /// Every recorded case attempt, oldest first
    pub fn try_case_results(&self) -> Result<Vec<CaseResult>, StoreError> {
        match self.store.get(CASE_RESULTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Case history. Read failures are logged and yield an empty history.
    pub fn case_results(&self) -> Vec<CaseResult> {
        match self.try_case_results() {
            Ok(results) => results,
            Err(e) => {
                log::warn!("Failed to load case results: {}", e);
                Vec::new()
            }
        }
    }

    /// History to append to, read from the raw stored value.
    ///
    /// An unparseable history is moved to [`CORRUPT_CASE_RESULTS_KEY`] and a
    /// fresh log is started, so a bad entry never blocks new submissions.
    fn history_for_append(&self, raw: Option<&str>) -> Result<Vec<CaseResult>, StoreError> {
        let Some(json) = raw else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(json) {
            Ok(history) => Ok(history),
            Err(e) => {
                log::warn!("Case history is unreadable ({}), starting a new one", e);
                self.store.set(CORRUPT_CASE_RESULTS_KEY, json)?;
                Ok(Vec::new())
            }
        }
    }

    /// Dashboard figures for the stored progress
    pub fn analytics(&self) -> ProgressAnalytics {
        ProgressAnalytics::from_progress(&self.load())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Persist `progress`
    pub fn try_save(&self, progress: &UserProgress) -> Result<(), StoreError> {
        let json = serde_json::to_string(progress)?;
        self.store.set(PROGRESS_KEY, &json)?;
        log::info!(
            "Progress saved: level {}, {} points",
            progress.level,
            progress.total_points
        );
        Ok(())
    }

    /// Persist `progress`, logging instead of returning failures
    pub fn save(&self, progress: &UserProgress) {
        let _guard = self.write_lock.lock();
        if let Err(e) = self.try_save(progress) {
            log::error!("Failed to save user progress: {}", e);
        }
    }

    /// Create the first record for a newly onboarded student.
    ///
    /// If a record already exists it is returned unchanged; the faculty is
    /// fixed once chosen.
    pub fn try_onboard(&self, faculty: Faculty, weekly_goal: u32) -> Result<UserProgress, StoreError> {
        let _guard = self.write_lock.lock();
        if let Some(existing) = self.read_progress()? {
            log::info!("Progress already exists for {}, keeping it", existing.faculty.name());
            return Ok(existing);
        }
        let progress = UserProgress::new(faculty, weekly_goal);
        self.try_save(&progress)?;
        Ok(progress)
    }

    /// Infallible form of [`ProgressStore::try_onboard`]
    pub fn onboard(&self, faculty: Faculty, weekly_goal: u32) -> UserProgress {
        match self.try_onboard(faculty, weekly_goal) {
            Ok(progress) => progress,
            Err(e) => {
                log::error!("Failed to onboard user: {}", e);
                self.load()
            }
        }
    }

    /// Apply a submitted case: award points, update counters and streak,
    /// unlock achievements, persist, and append the result to history.
    pub fn try_apply_case_result(&self, result: &CaseResult) -> Result<ProgressUpdate, ProgressError> {
        result
            .validate()
            .map_err(|score| ProgressError::InvalidResult { score })?;

        let _guard = self.write_lock.lock();
        let before = self.try_load()?;
        let previous_history = self.store.get(CASE_RESULTS_KEY)?;
        let mut history = self.history_for_append(previous_history.as_deref())?;

        let earned_points = compute_case_points(result);
        let mut after = before.clone();
        after.add_points(earned_points);
        if result.completed {
            after.completed_cases = after.completed_cases.saturating_add(1);
        }
        after.current_streak = if result.is_correct {
            after.current_streak.saturating_add(1)
        } else {
            0
        };
        after.record_weekly_case();

        let new_achievements = evaluate(
            &before,
            &after,
            ProgressEvent::CaseCompleted(result),
            Utc::now(),
        );
        after.push_achievements(new_achievements.iter().cloned());

        // History goes first; progress is only committed once it is written
        history.push(result.clone());
        let history_json = serde_json::to_string(&history).map_err(StoreError::from)?;
        self.store.set(CASE_RESULTS_KEY, &history_json)?;
        if let Err(e) = self.try_save(&after) {
            self.restore_history(previous_history.as_deref());
            return Err(e.into());
        }

        log::info!(
            "Case {} recorded: +{} points, streak {}",
            result.case_id,
            earned_points,
            after.current_streak
        );
        Ok(ProgressUpdate {
            progress: after,
            earned_points,
            new_achievements,
        })
    }

    /// Put back the history as it was before a failed submission
    fn restore_history(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(json) => self.store.set(CASE_RESULTS_KEY, json),
            None => self.store.remove(CASE_RESULTS_KEY),
        };
        if let Err(e) = restored {
            log::error!("Failed to roll back case history: {}", e);
        }
    }

    /// Infallible form of [`ProgressStore::try_apply_case_result`].
    ///
    /// On failure the stored record is returned as it is.
    pub fn apply_case_result(&self, result: &CaseResult) -> UserProgress {
        match self.try_apply_case_result(result) {
            Ok(update) => update.progress,
            Err(e) => {
                log::warn!("Failed to save case result {}: {}", result.case_id, e);
                self.load()
            }
        }
    }

    /// Apply a pharmacy consultation: a fixed award plus the collaboration
    /// achievement.
    pub fn try_apply_pharmacy_consultation(&self) -> Result<ProgressUpdate, ProgressError> {
        let _guard = self.write_lock.lock();
        let before = self.try_load()?;

        let mut after = before.clone();
        after.add_points(CONSULTATION_POINTS);
        let new_achievements = evaluate(
            &before,
            &after,
            ProgressEvent::PharmacyConsultation,
            Utc::now(),
        );
        after.push_achievements(new_achievements.iter().cloned());

        self.try_save(&after)?;
        Ok(ProgressUpdate {
            progress: after,
            earned_points: CONSULTATION_POINTS,
            new_achievements,
        })
    }

    /// Infallible form of [`ProgressStore::try_apply_pharmacy_consultation`]
    pub fn apply_pharmacy_consultation(&self) -> UserProgress {
        match self.try_apply_pharmacy_consultation() {
            Ok(update) => update.progress,
            Err(e) => {
                log::warn!("Failed to record pharmacy consultation: {}", e);
                self.load()
            }
        }
    }

    /// Remove all stored progress and history
    pub fn try_reset(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        for key in [
            PROGRESS_KEY,
            CASE_RESULTS_KEY,
            CORRUPT_CASE_RESULTS_KEY,
            LEGACY_ACHIEVEMENTS_KEY,
        ] {
            self.store.remove(key)?;
        }
        log::info!("User progress reset");
        Ok(())
    }

    /// Infallible form of [`ProgressStore::try_reset`]
    pub fn reset(&self) {
        if let Err(e) = self.try_reset() {
            log::error!("Failed to reset progress: {}", e);
        }
    }
}
