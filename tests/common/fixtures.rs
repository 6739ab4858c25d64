#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use release_planner::core::{
    AppState, Backup, BudgetItem, IncomeItem, LocalStore, NewProject, Project, Step, SubStep,
    SubStepFeedback, default_steps,
};
use time::{Date, macros::date};

/// The reference "today" used by countdown tests.
pub const TODAY: Date = date!(2024 - 06 - 10);

/// Creates a project with the default steps and no feedback.
pub fn make_project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        icon: None,
        release_date: None,
        created_at: 1_700_000_000_000,
        is_priority: false,
        steps: default_steps(),
        budget: Vec::new(),
        income: Vec::new(),
        activity_log: Vec::new(),
        sub_step_feedback: BTreeMap::new(),
        performance_summary: None,
    }
}

/// Creates a project with a single step containing `count` substeps
/// named `s0`, `s1`, ...
pub fn make_project_with_sub_steps(id: &str, count: usize) -> Project {
    let mut project = make_project(id, "Small release");
    project.steps = vec![Step {
        id: "only".to_string(),
        title: "Only step".to_string(),
        sub_steps: (0..count)
            .map(|i| SubStep {
                id: format!("s{i}"),
                title: format!("Substep {i}"),
                description: None,
            })
            .collect(),
    }];
    project
}

pub fn complete(project: &mut Project, sub_step_id: &str) {
    project
        .sub_step_feedback
        .insert(sub_step_id.to_string(), SubStepFeedback::completed());
}

/// A project exercising every optional field.
pub fn make_full_project(id: &str) -> Project {
    let mut project = make_project(id, "Midnight Drive");
    project.icon = Some("vinyl".to_string());
    project.release_date = Some(date!(2024 - 07 - 01));
    project.is_priority = true;
    project.budget = vec![
        BudgetItem { budgeted: 500.0, actual: 420.5 },
        BudgetItem { budgeted: 250.0, actual: 300.0 },
    ];
    project.income = vec![IncomeItem { projected: 1000.0, actual: 640.25 }];
    complete(&mut project, "finish-mix");
    let mut noted = SubStepFeedback::default();
    noted.set_notes("waiting on the mastering engineer");
    project
        .sub_step_feedback
        .insert("master-track".to_string(), noted);
    project
}

pub fn make_backup() -> Backup {
    Backup {
        projects: vec![make_full_project("p-1"), make_project("p-2", "Second Single")],
        theme: "dark".to_string(),
        favorites: BTreeSet::from(["split-sheet".to_string(), "epk-template".to_string()]),
    }
}

pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        icon: None,
        release_date: None,
    }
}

/// Creates a state holding two projects and returns it with their ids.
pub fn make_state() -> (AppState, String, String) {
    let mut state = AppState::default();
    let first = state
        .add_project_at(new_project("First EP"), 1_000)
        .expect("Failed to add project");
    let second = state
        .add_project_at(new_project("Second Single"), 2_000)
        .expect("Failed to add project");
    (state, first, second)
}

/// Creates a LocalStore inside a temporary directory.
/// Returns both the store and the temp directory (which must be kept alive).
pub fn create_test_store() -> (LocalStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(dir.path().join("store.json"));
    (store, dir)
}
