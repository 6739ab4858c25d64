use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::core::model::{PerformanceSummary, Project};
use crate::core::progress::{self, Progress};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetTotals {
    pub budgeted: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IncomeTotals {
    pub projected: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotals {
    pub budget: BudgetTotals,
    pub income: IncomeTotals,
    pub net_actual: f64,
}

/// Sum the budget and income line items of a project.
pub fn totals(project: &Project) -> ProjectTotals {
    let budget = project
        .budget
        .iter()
        .fold(BudgetTotals::default(), |acc, item| BudgetTotals {
            budgeted: acc.budgeted + item.budgeted,
            actual: acc.actual + item.actual,
        });
    let income = project
        .income
        .iter()
        .fold(IncomeTotals::default(), |acc, item| IncomeTotals {
            projected: acc.projected + item.projected,
            actual: acc.actual + item.actual,
        });
    ProjectTotals {
        budget,
        income,
        net_actual: income.actual - budget.actual,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub label: String,
    pub days: i64,
    pub is_past: bool,
    pub is_today: bool,
}

/// Days-until-release label relative to `today`. `None` when no date is set.
pub fn countdown(release_date: Option<Date>, today: Date) -> Option<Countdown> {
    let release_date = release_date?;
    // Both sides are calendar dates, so the difference is already whole days.
    let days = (release_date - today).whole_days();
    let label = match days {
        d if d < 0 => "Released".to_string(),
        0 => "Today!".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("in {d} days"),
    };
    Some(Countdown {
        label,
        days,
        is_past: days < 0,
        is_today: days == 0,
    })
}

/// The current calendar date in the local time zone, or UTC when the local
/// offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub progress: Progress,
    pub progress_percent: f64,
    pub is_complete: bool,
    pub totals: ProjectTotals,
    pub countdown: Option<Countdown>,
    pub performance_summary: Option<PerformanceSummary>,
}

pub fn summarize(project: &Project, today: Date) -> ProjectSummary {
    let progress = progress::progress(project);
    ProjectSummary {
        id: project.id.clone(),
        name: project.name.clone(),
        progress,
        progress_percent: progress.percent(),
        is_complete: progress.is_complete(),
        totals: totals(project),
        countdown: countdown(project.release_date, today),
        performance_summary: project.performance_summary,
    }
}

/// Differences are always `right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDelta {
    pub budget_actual: f64,
    pub income_actual: f64,
    pub net_actual: f64,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub left: ProjectSummary,
    pub right: ProjectSummary,
    pub delta: ComparisonDelta,
}

pub fn compare(left: &Project, right: &Project, today: Date) -> Comparison {
    let left = summarize(left, today);
    let right = summarize(right, today);
    let delta = ComparisonDelta {
        budget_actual: right.totals.budget.actual - left.totals.budget.actual,
        income_actual: right.totals.income.actual - left.totals.income.actual,
        net_actual: right.totals.net_actual - left.totals.net_actual,
        progress_percent: right.progress_percent - left.progress_percent,
    };
    tracing::debug!(left = %left.id, right = %right.id, ?delta, "compared projects");
    Comparison { left, right, delta }
}
