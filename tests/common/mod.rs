mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from release_planner for tests
pub use release_planner::core::{
    AppState, Backup, BudgetItem, FeedbackUpdate, ImportError, IncomeItem, LocalStore,
    NewProject, PerformanceSummary, Project, ProjectUpdate, StateError, Step, SubStep,
    SubStepFeedback, backup, default_steps, metrics, progress,
};
