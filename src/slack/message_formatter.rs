//! Builds the Block Kit message for the today view.
//!
//! Ordering is deterministic: time-scheduled tasks sort ascending by due
//! timestamp and render first; date-only and undated tasks follow in
//! upstream order, behind a divider when both groups are present. Completed
//! tasks, when fetched, render last.

use chrono::Utc;
use chrono_tz::Tz;
use serde_json::{Value, json};

use crate::core::models::{CompletedTask, DurationUnit, Task, TaskDuration};

/// Fixed response for the zero-task case; never an empty blocks list.
pub const CELEBRATION_TEXT: &str = "🎉 Nothing due today. Enjoy the free time!";

/// Outbound message shape: a plain-text fallback plus Block Kit blocks.
#[derive(Debug, Clone)]
pub struct FormattedMessage {
    pub text: String,
    pub blocks: Vec<Value>,
}

pub fn format_today_message(
    tasks: &[Task],
    completed: &[CompletedTask],
    tz: Tz,
) -> FormattedMessage {
    if tasks.is_empty() && completed.is_empty() {
        return FormattedMessage {
            text: CELEBRATION_TEXT.to_string(),
            blocks: vec![section(CELEBRATION_TEXT)],
        };
    }

    // Stable sort: unscheduled tasks share the sentinel key and keep
    // upstream order.
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.sort_key());

    let (scheduled, unscheduled): (Vec<&Task>, Vec<&Task>) =
        sorted.into_iter().partition(|t| t.has_time());

    let today = Utc::now().with_timezone(&tz).date_naive();
    let mut blocks = vec![json!({
        "type": "header",
        "text": {
            "type": "plain_text",
            "text": format!("Today · {}", today.format("%a %-d %b")),
            "emoji": true
        }
    })];
    let mut summary_lines: Vec<String> = Vec::new();

    if !scheduled.is_empty() {
        let rendered: Vec<String> = scheduled.iter().map(|t| render_task_line(t)).collect();
        blocks.push(section(&rendered.join("\n")));
        summary_lines.extend(scheduled.iter().map(|t| render_task_summary(t)));
    }

    if !scheduled.is_empty() && !unscheduled.is_empty() {
        blocks.push(json!({ "type": "divider" }));
    }

    if !unscheduled.is_empty() {
        let rendered: Vec<String> = unscheduled.iter().map(|t| render_task_line(t)).collect();
        blocks.push(section(&rendered.join("\n")));
        summary_lines.extend(unscheduled.iter().map(|t| render_task_summary(t)));
    }

    if !completed.is_empty() {
        if !tasks.is_empty() {
            blocks.push(json!({ "type": "divider" }));
        }
        let rendered: Vec<String> = completed
            .iter()
            .map(|c| format!("✅ ~{}~", c.content))
            .collect();
        blocks.push(section(&rendered.join("\n")));
        summary_lines.extend(completed.iter().map(|c| format!("✓ {}", c.content)));
    }

    blocks.push(json!({
        "type": "context",
        "elements": [{
            "type": "mrkdwn",
            "text": format!("{} due · {} done", tasks.len(), completed.len())
        }]
    }));

    FormattedMessage {
        text: summary_lines.join("\n"),
        blocks,
    }
}

/// One-line mrkdwn rendering: time, content, priority label, duration,
/// labels.
pub fn render_task_line(task: &Task) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(dt) = task.due.as_ref().and_then(|d| d.datetime) {
        parts.push(format!("*{}*", dt.format("%H:%M")));
    }
    parts.push(task.content.clone());
    if let Some(label) = priority_label(task.priority) {
        parts.push(format!("`{label}`"));
    }
    // Upstream zero-fill: a zero amount is no duration, not "(0m)".
    if let Some(duration) = task.duration.filter(|d| d.amount > 0) {
        parts.push(format!("({})", render_duration(&duration)));
    }
    if !task.labels.is_empty() {
        parts.push(
            task.labels
                .iter()
                .map(|l| format!("@{l}"))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    format!("• {}", parts.join(" "))
}

/// Plain one-line rendering for clients that cannot display blocks.
pub fn render_task_summary(task: &Task) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(dt) = task.due.as_ref().and_then(|d| d.datetime) {
        parts.push(dt.format("%H:%M").to_string());
    }
    parts.push(task.content.clone());
    if let Some(label) = priority_label(task.priority) {
        parts.push(format!("[{label}]"));
    }
    if let Some(duration) = task.duration.filter(|d| d.amount > 0) {
        parts.push(format!("({})", render_duration(&duration)));
    }

    parts.join(" ")
}

/// Fixed lookup from the upstream ordinal (4 = most urgent). Ordinal 1 and
/// anything outside the table render no label.
#[must_use]
pub fn priority_label(priority: u8) -> Option<&'static str> {
    match priority {
        4 => Some("P1"),
        3 => Some("P2"),
        2 => Some("P3"),
        _ => None,
    }
}

/// `2d` for day durations; minutes collapse to `1h`, `45m`, `1h30m` with
/// zero components omitted.
#[must_use]
pub fn render_duration(duration: &TaskDuration) -> String {
    match duration.unit {
        DurationUnit::Day => format!("{}d", duration.amount),
        DurationUnit::Minute => {
            let hours = duration.amount / 60;
            let minutes = duration.amount % 60;
            match (hours, minutes) {
                (0, m) => format!("{m}m"),
                (h, 0) => format!("{h}h"),
                (h, m) => format!("{h}h{m}m"),
            }
        }
    }
}

fn section(text: &str) -> Value {
    json!({
        "type": "section",
        "text": { "type": "mrkdwn", "text": text }
    })
}
