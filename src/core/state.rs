use std::collections::BTreeSet;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::backup::{self, Backup};
use crate::core::catalog::{self, DEFAULT_THEME};
use crate::core::model::{
    BudgetItem, FeedbackUpdate, IncomeItem, NewProject, PerformanceSummary, Project,
    ProjectUpdate, format_date,
};
use crate::core::template::default_steps;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("`{0}` matches more than one project")]
    AmbiguousProjectId(String),

    #[error("substep `{sub_step}` does not exist in project {project}")]
    SubStepNotFound { project: String, sub_step: String },

    #[error("project name must not be empty")]
    EmptyName,

    #[error("amount must be a finite number, got {0}")]
    InvalidAmount(f64),

    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

/// The whole application state. Owned by one place and replaced as a unit
/// on import.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    projects: Vec<Project>,
    theme: String,
    favorites: BTreeSet<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            theme: DEFAULT_THEME.to_string(),
            favorites: BTreeSet::new(),
        }
    }
}

impl From<Backup> for AppState {
    fn from(backup: Backup) -> Self {
        Self {
            projects: backup.projects,
            theme: backup.theme,
            favorites: backup.favorites,
        }
    }
}

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

fn ensure_finite(amounts: &[f64]) -> Result<(), StateError> {
    match amounts.iter().find(|amount| !amount.is_finite()) {
        Some(amount) => Err(StateError::InvalidAmount(*amount)),
        None => Ok(()),
    }
}

impl AppState {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn project(&self, id: &str) -> Result<&Project, StateError> {
        self.projects
            .iter()
            .find(|project| project.id == id)
            .ok_or_else(|| StateError::ProjectNotFound(id.to_string()))
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut Project, StateError> {
        self.projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(|| StateError::ProjectNotFound(id.to_string()))
    }

    /// Resolve an exact id or a unique id prefix to the full project id.
    pub fn resolve_id(&self, key: &str) -> Result<String, StateError> {
        if let Ok(project) = self.project(key) {
            return Ok(project.id.clone());
        }
        let mut matches = self
            .projects
            .iter()
            .filter(|project| !key.is_empty() && project.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(project), None) => Ok(project.id.clone()),
            (Some(_), Some(_)) => Err(StateError::AmbiguousProjectId(key.to_string())),
            _ => Err(StateError::ProjectNotFound(key.to_string())),
        }
    }

    /// Priority projects first, then newest first.
    pub fn sorted_projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.iter().collect();
        projects.sort_by(|a, b| {
            b.is_priority
                .cmp(&a.is_priority)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });
        projects
    }

    pub fn add_project(&mut self, new: NewProject) -> Result<String, StateError> {
        self.add_project_at(new, now_millis())
    }

    pub fn add_project_at(
        &mut self,
        new: NewProject,
        created_at: i64,
    ) -> Result<String, StateError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(StateError::EmptyName);
        }
        let mut project = Project {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: new.icon,
            release_date: new.release_date,
            created_at,
            is_priority: false,
            steps: default_steps(),
            budget: Vec::new(),
            income: Vec::new(),
            activity_log: Vec::new(),
            sub_step_feedback: Default::default(),
            performance_summary: None,
        };
        project.record(created_at, "Project created");
        let id = project.id.clone();
        tracing::info!(project = %id, name = %project.name, "added project");
        self.projects.push(project);
        Ok(id)
    }

    pub fn delete_project(&mut self, id: &str) -> Result<Project, StateError> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| StateError::ProjectNotFound(id.to_string()))?;
        tracing::info!(project = %id, "deleted project");
        Ok(self.projects.remove(index))
    }

    /// Returns the new priority flag.
    pub fn toggle_priority(&mut self, id: &str) -> Result<bool, StateError> {
        let project = self.project_mut(id)?;
        project.is_priority = !project.is_priority;
        let is_priority = project.is_priority;
        project.record(
            now_millis(),
            if is_priority {
                "Marked as priority"
            } else {
                "Removed priority"
            },
        );
        Ok(is_priority)
    }

    pub fn update_project(
        &mut self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<&Project, StateError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(StateError::EmptyName);
            }
        }
        let now = now_millis();
        let project = self.project_mut(id)?;
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            project.record(now, format!("Renamed to \"{name}\""));
            project.name = name;
        }
        if let Some(icon) = update.icon {
            project.icon = icon;
            project.record(now, "Changed icon");
        }
        if let Some(release_date) = update.release_date {
            project.release_date = release_date;
            let message = match release_date {
                Some(date) => format!(
                    "Release date set to {}",
                    format_date(date).unwrap_or_else(|_| date.to_string())
                ),
                None => "Release date cleared".to_string(),
            };
            project.record(now, message);
        }
        Ok(project)
    }

    pub fn update_feedback(
        &mut self,
        id: &str,
        sub_step_id: &str,
        update: FeedbackUpdate,
    ) -> Result<(), StateError> {
        let project = self.project_mut(id)?;
        if !project.has_sub_step(sub_step_id) {
            return Err(StateError::SubStepNotFound {
                project: id.to_string(),
                sub_step: sub_step_id.to_string(),
            });
        }
        let feedback = project
            .sub_step_feedback
            .entry(sub_step_id.to_string())
            .or_default();
        if let Some(completed) = update.completed {
            feedback.completed = completed;
        }
        if let Some(notes) = update.notes {
            feedback.set_notes(notes);
        }
        let message = match update.completed {
            Some(true) => format!("Completed `{sub_step_id}`"),
            Some(false) => format!("Reopened `{sub_step_id}`"),
            None => format!("Updated notes for `{sub_step_id}`"),
        };
        project.record(now_millis(), message);
        tracing::debug!(project = %id, sub_step = %sub_step_id, "updated feedback");
        Ok(())
    }

    pub fn add_budget_item(&mut self, id: &str, item: BudgetItem) -> Result<(), StateError> {
        ensure_finite(&[item.budgeted, item.actual])?;
        let project = self.project_mut(id)?;
        project.budget.push(item);
        project.record(now_millis(), "Added budget item");
        Ok(())
    }

    pub fn add_income_item(&mut self, id: &str, item: IncomeItem) -> Result<(), StateError> {
        ensure_finite(&[item.projected, item.actual])?;
        let project = self.project_mut(id)?;
        project.income.push(item);
        project.record(now_millis(), "Added income item");
        Ok(())
    }

    pub fn set_performance_summary(
        &mut self,
        id: &str,
        summary: PerformanceSummary,
    ) -> Result<(), StateError> {
        ensure_finite(&[
            summary.spotify_streams,
            summary.tiktok_views,
            summary.instagram_followers_gained,
            summary.presave_cost,
        ])?;
        let project = self.project_mut(id)?;
        project.performance_summary = Some(summary);
        project.record(now_millis(), "Updated performance summary");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    /// Returns whether the resource is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, resource_id: &str) -> Result<bool, StateError> {
        if catalog::find_resource(resource_id).is_none() {
            return Err(StateError::UnknownResource(resource_id.to_string()));
        }
        if self.favorites.remove(resource_id) {
            Ok(false)
        } else {
            self.favorites.insert(resource_id.to_string());
            Ok(true)
        }
    }

    pub fn snapshot(&self) -> Backup {
        Backup {
            projects: self.projects.clone(),
            theme: self.theme.clone(),
            favorites: self.favorites.clone(),
        }
    }

    pub fn export_json(&self) -> anyhow::Result<String> {
        backup::export_json(&self.projects, &self.theme, &self.favorites)
    }

    /// Swap in a complete new state in one step.
    pub fn replace(&mut self, backup: Backup) {
        tracing::info!(projects = backup.projects.len(), "replacing application state");
        *self = AppState::from(backup);
    }
}
