// src/progress/mod.rs — Progress tracking: analytics, caching, achievements, validation, export

pub mod achievements;
pub mod analytics;
pub mod cache;
pub mod export;
pub mod store;
pub mod types;
pub mod validation;

pub use achievements::{check_achievement_eligibility, unlock_eligible, AchievementEligibility};
pub use analytics::{calculate_metrics, calculate_state_metrics, format_time_spent};
pub use cache::{create_cache, ProgressCache};
pub use export::{export_progress_data, ExportFormat, ExportOptions};
pub use store::{load_progress_state, save_progress_state, JsonFileStore, MemoryStore, ProgressStore};
pub use types::{Achievement, LearningPath, Milestone, MilestoneType, ProgressMetrics, ProgressState};
