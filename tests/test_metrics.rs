//! Integration tests for derived metrics.
//!
//! Tests cover:
//! - Budget/income totals and net actual
//! - Countdown labels around a fixed "today"
//! - Two-project comparison view

mod common;

use common::*;
use time::macros::date;

#[test]
fn test_empty_line_items_total_zero() {
    let project = make_project("p-1", "Empty");
    let totals = metrics::totals(&project);

    assert_eq!(totals.budget.budgeted, 0.0);
    assert_eq!(totals.budget.actual, 0.0);
    assert_eq!(totals.income.projected, 0.0);
    assert_eq!(totals.income.actual, 0.0);
    assert_eq!(totals.net_actual, 0.0);
}

#[test]
fn test_totals_sum_each_field() {
    let project = make_full_project("p-1");
    let totals = metrics::totals(&project);

    assert_eq!(totals.budget.budgeted, 750.0);
    assert_eq!(totals.budget.actual, 720.5);
    assert_eq!(totals.income.projected, 1000.0);
    assert_eq!(totals.income.actual, 640.25);
    assert_eq!(totals.net_actual, 640.25 - 720.5);
}

#[test]
fn test_countdown_labels() {
    let cases = [
        (date!(2024 - 06 - 11), "Tomorrow", 1),
        (date!(2024 - 06 - 10), "Today!", 0),
        (date!(2024 - 06 - 08), "Released", -2),
        (date!(2024 - 06 - 15), "in 5 days", 5),
    ];
    for (release_date, label, days) in cases {
        let countdown = metrics::countdown(Some(release_date), TODAY).expect("countdown expected");
        assert_eq!(countdown.label, label, "release date {release_date}");
        assert_eq!(countdown.days, days);
    }
}

#[test]
fn test_countdown_flags() {
    let today = metrics::countdown(Some(TODAY), TODAY).unwrap();
    assert!(today.is_today);
    assert!(!today.is_past);

    let past = metrics::countdown(Some(date!(2024 - 06 - 08)), TODAY).unwrap();
    assert!(past.is_past);
    assert!(!past.is_today);

    let yesterday = metrics::countdown(Some(date!(2024 - 06 - 09)), TODAY).unwrap();
    assert_eq!(yesterday.label, "Released");
}

#[test]
fn test_countdown_across_month_boundary() {
    let countdown = metrics::countdown(Some(date!(2024 - 07 - 01)), TODAY).unwrap();
    assert_eq!(countdown.label, "in 21 days");
}

#[test]
fn test_no_release_date_has_no_countdown() {
    assert!(metrics::countdown(None, TODAY).is_none());

    let summary = metrics::summarize(&make_project("p-1", "Undated"), TODAY);
    assert!(summary.countdown.is_none());
}

#[test]
fn test_comparison_deltas_match_totals() {
    let left = make_full_project("p-1");
    let mut right = make_project("p-2", "Other");
    right.budget.push(BudgetItem { budgeted: 100.0, actual: 50.0 });
    right.income.push(IncomeItem { projected: 80.0, actual: 200.0 });

    let comparison = metrics::compare(&left, &right, TODAY);
    let left_totals = metrics::totals(&left);
    let right_totals = metrics::totals(&right);

    assert_eq!(comparison.left.id, "p-1");
    assert_eq!(comparison.right.id, "p-2");
    assert_eq!(
        comparison.delta.budget_actual,
        right_totals.budget.actual - left_totals.budget.actual
    );
    assert_eq!(
        comparison.delta.income_actual,
        right_totals.income.actual - left_totals.income.actual
    );
    assert_eq!(
        comparison.delta.net_actual,
        right_totals.net_actual - left_totals.net_actual
    );
    assert_eq!(
        comparison.delta.progress_percent,
        comparison.right.progress_percent - comparison.left.progress_percent
    );
    assert_eq!(comparison.left.countdown.as_ref().unwrap().label, "in 21 days");
    assert!(comparison.right.countdown.is_none());
}

#[test]
fn test_comparison_reflects_latest_edits() {
    let left = make_project("p-1", "Left");
    let mut right = make_project("p-2", "Right");

    let before = metrics::compare(&left, &right, TODAY);
    assert_eq!(before.delta.budget_actual, 0.0);

    right.budget.push(BudgetItem { budgeted: 10.0, actual: 25.0 });
    let after = metrics::compare(&left, &right, TODAY);
    assert_eq!(after.delta.budget_actual, 25.0);
    assert_eq!(after.delta.net_actual, -25.0);
}
