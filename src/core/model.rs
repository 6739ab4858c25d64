use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Free-form feedback field holding the user's notes for a substep.
pub const NOTES_FIELD: &str = "notes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "release_date"
    )]
    pub release_date: Option<Date>,
    /// Milliseconds since the Unix epoch. Only used for ordering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_priority: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: Vec<BudgetItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub income: Vec<IncomeItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_log: Vec<ActivityEntry>,
    #[serde(default, with = "feedback_pairs")]
    pub sub_step_feedback: BTreeMap<String, SubStepFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_summary: Option<PerformanceSummary>,
}

impl Project {
    pub fn sub_steps(&self) -> impl Iterator<Item = &SubStep> {
        self.steps.iter().flat_map(|step| step.sub_steps.iter())
    }

    pub fn total_sub_steps(&self) -> usize {
        self.steps.iter().map(|step| step.sub_steps.len()).sum()
    }

    pub fn has_sub_step(&self, sub_step_id: &str) -> bool {
        self.sub_steps().any(|sub_step| sub_step.id == sub_step_id)
    }

    /// Feedback keys that do not name any substep of this project.
    pub fn orphaned_feedback(&self) -> Vec<&str> {
        self.sub_step_feedback
            .keys()
            .filter(|key| !self.has_sub_step(key))
            .map(String::as_str)
            .collect()
    }

    pub fn is_sub_step_completed(&self, sub_step_id: &str) -> bool {
        self.sub_step_feedback
            .get(sub_step_id)
            .is_some_and(|feedback| feedback.completed)
    }

    pub(crate) fn record(&mut self, timestamp: i64, message: impl Into<String>) {
        self.activity_log.push(ActivityEntry {
            timestamp,
            message: message.into(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_steps: Vec<SubStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStep {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetItem {
    #[serde(default)]
    pub budgeted: f64,
    #[serde(default)]
    pub actual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeItem {
    #[serde(default)]
    pub projected: f64,
    #[serde(default)]
    pub actual: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: i64,
    pub message: String,
}

/// Completion flag plus whatever free-form fields the user attached.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubStepFeedback {
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SubStepFeedback {
    pub fn completed() -> Self {
        Self {
            completed: true,
            fields: Map::new(),
        }
    }

    pub fn notes(&self) -> Option<&str> {
        self.fields.get(NOTES_FIELD).and_then(Value::as_str)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.fields
            .insert(NOTES_FIELD.to_string(), Value::String(notes.into()));
    }
}

/// Simulated post-release numbers shown alongside a project.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    #[serde(default)]
    pub spotify_streams: f64,
    #[serde(default)]
    pub tiktok_views: f64,
    #[serde(default)]
    pub instagram_followers_gained: f64,
    #[serde(default)]
    pub presave_cost: f64,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub icon: Option<String>,
    pub release_date: Option<Date>,
}

/// Partial edit of a project. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub icon: Option<Option<String>>,
    pub release_date: Option<Option<Date>>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackUpdate {
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

// Older backups write `null` where a field has no value yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod release_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::Date;

    pub fn serialize<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => {
                let formatted = super::format_date(*date).map_err(S::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    // Older backups store an unset date as `null` or "".
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) if !value.trim().is_empty() => super::parse_date(value.trim())
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid release date {value:?}: {e}"))),
            _ => Ok(None),
        }
    }
}

/// The feedback map travels as a list of `[key, value]` pairs.
mod feedback_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::SubStepFeedback;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Pairs(Vec<(String, SubStepFeedback)>),
        // Written by builds that stringified the map directly.
        Object(BTreeMap<String, SubStepFeedback>),
    }

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, SubStepFeedback>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, SubStepFeedback>, D::Error> {
        Ok(match Option::<Encoded>::deserialize(deserializer)? {
            Some(Encoded::Pairs(pairs)) => pairs.into_iter().collect(),
            Some(Encoded::Object(map)) => map,
            None => BTreeMap::new(),
        })
    }
}
