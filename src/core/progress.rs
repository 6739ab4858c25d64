use serde::Serialize;

use crate::core::model::{Project, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.completed as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.percent() >= 100.0
    }
}

/// Count completed substeps of `project`.
///
/// Only substeps present in `project.steps` are counted. A completed feedback
/// entry whose key names no substep (for example one left over from an older
/// template) is not included, so `completed` can be lower than the number of
/// completed entries in `sub_step_feedback` and never exceeds `total`.
pub fn progress(project: &Project) -> Progress {
    let total = project.total_sub_steps();
    let completed = project
        .sub_steps()
        .filter(|sub_step| project.is_sub_step_completed(&sub_step.id))
        .count();
    tracing::trace!(project = %project.id, completed, total, "computed progress");
    Progress { completed, total }
}

pub fn progress_percent(project: &Project) -> f64 {
    progress(project).percent()
}

pub fn is_complete(project: &Project) -> bool {
    progress(project).is_complete()
}

/// A step with no substeps is never complete.
pub fn step_is_complete(project: &Project, step: &Step) -> bool {
    !step.sub_steps.is_empty()
        && step
            .sub_steps
            .iter()
            .all(|sub_step| project.is_sub_step_completed(&sub_step.id))
}
