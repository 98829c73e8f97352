//! Case availability statistics

pub mod stats;

pub use stats::{
    availability_ratio, calculate_case_stats, format_case_count, level_multiplier, CaseStats,
    CaseStatsCalculator, DifficultyBreakdown,
};
