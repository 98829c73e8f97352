//! Save/load system
//!
//! Handles the persisted progress record, the case history, and the
//! key-value backends they are stored in.

pub mod profile;
pub mod store;
pub mod progress_store;

pub use profile::{CaseResult, UserProgress, DEFAULT_WEEKLY_GOAL, MAX_SCORE};
pub use store::{data_directory, FileStore, KeyValueStore, MemoryStore, StoreError};
pub use progress_store::{
    ProgressError, ProgressStore, ProgressUpdate,
    CASE_RESULTS_KEY, CONSULTATION_POINTS, CORRUPT_CASE_RESULTS_KEY, LEGACY_ACHIEVEMENTS_KEY,
    PROGRESS_KEY,
};
