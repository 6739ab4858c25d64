pub mod backup;
pub mod catalog;
pub mod metrics;
mod model;
pub mod progress;
mod state;
mod store;
mod template;

pub use backup::{Backup, ExportOptions, ImportError};
pub use catalog::{ResourceCategory, ResourceEntry, ResourceFilter, ResourceKind};
pub use metrics::{Comparison, Countdown, ProjectSummary, ProjectTotals};
pub use model::{
    ActivityEntry, BudgetItem, FeedbackUpdate, IncomeItem, NewProject, PerformanceSummary,
    Project, ProjectUpdate, Step, SubStep, SubStepFeedback, format_date, parse_date,
};
pub use progress::Progress;
pub use state::{AppState, StateError, now_millis};
pub use store::LocalStore;
pub use template::default_steps;
