//! Upstream record shapes and their normalization.
//!
//! Active tasks and completed items arrive with different layouts for the
//! same due/priority/duration concepts. Both are mapped into the internal
//! model here so sorting and formatting never touch upstream schemas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::warn;

use crate::core::models::{CompletedTask, Due, DurationUnit, Task, TaskDuration};

/// Active task record from `GET /tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTask {
    pub id: String,
    pub content: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub due: Option<ApiDue>,
    #[serde(default)]
    pub duration: Option<ApiDuration>,
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_priority() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDue {
    pub date: String,
    #[serde(default)]
    pub datetime: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDuration {
    pub amount: u32,
    pub unit: String,
}

/// Project record from `GET /projects`; used only to resolve a name to an id.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Completed item from the sync-style `completed/get_all` endpoint. Content
/// lives at the top level; the original task, when the upstream includes it,
/// is embedded under `item_object`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedItem {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub content: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub item_object: Option<ApiTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletedResponse {
    #[serde(default)]
    pub items: Vec<CompletedItem>,
}

/// Map an active task record into the internal model. An unparseable due
/// timestamp degrades to date-only rather than failing the request.
pub fn normalize_task(api: ApiTask, tz: Tz) -> Task {
    Task {
        due: api.due.as_ref().and_then(|d| normalize_due(d, tz)),
        duration: api.duration.as_ref().and_then(normalize_duration),
        id: api.id,
        content: api.content,
        priority: api.priority,
        labels: api.labels,
    }
}

pub fn normalize_completed(item: CompletedItem, tz: Tz) -> CompletedTask {
    CompletedTask {
        meta: item.item_object.map(|t| normalize_task(t, tz)),
        id: item.id,
        content: item.content,
        completed_at: item.completed_at,
    }
}

fn normalize_due(due: &ApiDue, tz: Tz) -> Option<Due> {
    let date = match NaiveDate::parse_from_str(&due.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            warn!(date = %due.date, "Unparseable due date from upstream, dropping");
            return None;
        }
    };
    let datetime = due.datetime.as_deref().and_then(|raw| {
        let parsed = parse_due_datetime(raw, tz);
        if parsed.is_none() {
            warn!(datetime = %raw, "Unparseable due datetime, treating as date-only");
        }
        parsed
    });
    Some(Due { date, datetime })
}

/// Due datetimes arrive either as naive local stamps ("2024-05-01T15:00:00")
/// or as RFC 3339 with an offset or Z suffix. Offset-bearing stamps are
/// converted to wall-clock time in the configured timezone.
fn parse_due_datetime(raw: &str, tz: Tz) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

fn normalize_duration(d: &ApiDuration) -> Option<TaskDuration> {
    let unit = match d.unit.as_str() {
        "minute" => DurationUnit::Minute,
        "day" => DurationUnit::Day,
        other => {
            warn!(unit = %other, "Unknown duration unit from upstream, dropping");
            return None;
        }
    };
    Some(TaskDuration {
        amount: d.amount,
        unit,
    })
}
