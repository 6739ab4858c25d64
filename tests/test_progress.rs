//! Integration tests for progress calculation.

mod common;

use common::*;
use proptest::prelude::*;

#[test]
fn test_no_sub_steps_means_zero_progress() {
    let mut project = make_project_with_sub_steps("p-1", 0);
    complete(&mut project, "s0");
    complete(&mut project, "anything");

    assert_eq!(progress::progress_percent(&project), 0.0);
    assert!(!progress::is_complete(&project));

    project.steps.clear();
    assert_eq!(progress::progress_percent(&project), 0.0);
}

#[test]
fn test_partial_progress() {
    let mut project = make_project_with_sub_steps("p-1", 4);
    complete(&mut project, "s0");

    let progress = progress::progress(&project);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.total, 4);
    assert_eq!(progress.percent(), 25.0);
    assert!(!progress.is_complete());
}

#[test]
fn test_uncompleted_feedback_does_not_count() {
    let mut project = make_project_with_sub_steps("p-1", 2);
    project
        .sub_step_feedback
        .insert("s0".to_string(), SubStepFeedback::default());

    assert_eq!(progress::progress_percent(&project), 0.0);
}

#[test]
fn test_orphaned_feedback_is_ignored() {
    let mut project = make_project_with_sub_steps("p-1", 2);
    complete(&mut project, "s0");
    complete(&mut project, "removed-substep");

    assert_eq!(progress::progress_percent(&project), 50.0);
    assert_eq!(project.orphaned_feedback(), vec!["removed-substep"]);
}

#[test]
fn test_orphaned_feedback_never_pushes_past_total() {
    let mut project = make_project_with_sub_steps("p-1", 2);
    for id in ["s0", "s1", "old-a", "old-b"] {
        complete(&mut project, id);
    }
    let counted = progress::progress(&project);

    assert_eq!(project.sub_step_feedback.len(), 4);
    assert_eq!(counted.completed, 2);
    assert_eq!(counted.total, 2);
    assert_eq!(progress::progress_percent(&project), 100.0);
}

#[test]
fn test_all_completed_is_complete() {
    let mut project = make_project_with_sub_steps("p-1", 3);
    for id in ["s0", "s1", "s2"] {
        complete(&mut project, id);
    }

    assert_eq!(progress::progress_percent(&project), 100.0);
    assert!(progress::is_complete(&project));
}

#[test]
fn test_step_completion_is_derived() {
    let mut project = make_project("p-1", "Full template");
    let planning = project.steps[0].clone();
    assert!(!progress::step_is_complete(&project, &planning));

    for sub_step in &planning.sub_steps {
        complete(&mut project, &sub_step.id);
    }
    assert!(progress::step_is_complete(&project, &planning));
    assert!(!progress::step_is_complete(&project, &project.steps[1]));

    let empty = Step {
        id: "empty".to_string(),
        title: "Empty".to_string(),
        sub_steps: Vec::new(),
    };
    assert!(!progress::step_is_complete(&project, &empty));
}

proptest! {
    #[test]
    fn progress_never_decreases_as_sub_steps_complete(
        total in 1usize..40,
        order in proptest::collection::vec(any::<prop::sample::Index>(), 0..60),
    ) {
        let mut project = make_project_with_sub_steps("p-1", total);
        let mut last = progress::progress_percent(&project);
        for index in order {
            complete(&mut project, &format!("s{}", index.index(total)));
            let current = progress::progress_percent(&project);
            prop_assert!(current >= last);
            prop_assert!(current <= 100.0);
            last = current;
        }
    }
}
