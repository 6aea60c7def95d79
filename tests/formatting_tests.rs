use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use today::core::models::{CompletedTask, Due, DurationUnit, Task, TaskDuration};
use today::slack::message_formatter::{
    CELEBRATION_TEXT, format_today_message, priority_label, render_duration, render_task_line,
};

/// Tests for the formatter and sorter: ordering, priority labels, duration
/// rendering, and the zero-task branch.

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn timed_task(id: &str, content: &str, hour: u32, minute: u32) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        priority: 1,
        due: Some(Due {
            date: date(),
            datetime: Some(date().and_hms_opt(hour, minute, 0).unwrap()),
        }),
        duration: None,
        labels: vec![],
    }
}

fn dated_task(id: &str, content: &str) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        priority: 1,
        due: Some(Due {
            date: date(),
            datetime: None,
        }),
        duration: None,
        labels: vec![],
    }
}

fn section_text(block: &serde_json::Value) -> &str {
    block["text"]["text"].as_str().unwrap()
}

#[test]
fn test_priority_label_table() {
    assert_eq!(priority_label(4), Some("P1"));
    assert_eq!(priority_label(3), Some("P2"));
    assert_eq!(priority_label(2), Some("P3"));
    assert_eq!(priority_label(1), None);
    assert_eq!(priority_label(0), None);
    assert_eq!(priority_label(5), None);
}

#[test]
fn test_duration_rendering() {
    let minutes = |amount| TaskDuration {
        amount,
        unit: DurationUnit::Minute,
    };

    assert_eq!(render_duration(&minutes(90)), "1h30m");
    assert_eq!(render_duration(&minutes(60)), "1h");
    assert_eq!(render_duration(&minutes(45)), "45m");
    assert_eq!(
        render_duration(&TaskDuration {
            amount: 2,
            unit: DurationUnit::Day,
        }),
        "2d"
    );
}

#[test]
fn test_scheduled_tasks_sorted_ascending() {
    let tasks = vec![
        timed_task("1", "Late meeting", 17, 0),
        timed_task("2", "Standup", 9, 30),
        timed_task("3", "Lunch", 12, 0),
    ];

    let message = format_today_message(&tasks, &[], Tz::UTC);

    // blocks[0] is the header; blocks[1] holds the scheduled section
    let text = section_text(&message.blocks[1]);
    let standup = text.find("Standup").unwrap();
    let lunch = text.find("Lunch").unwrap();
    let late = text.find("Late meeting").unwrap();
    assert!(
        standup < lunch && lunch < late,
        "Scheduled tasks should render in ascending time order: {text}"
    );
}

#[test]
fn test_unscheduled_tasks_render_after_scheduled_with_divider() {
    let tasks = vec![
        dated_task("1", "Water plants"),
        timed_task("2", "Standup", 9, 30),
    ];

    let message = format_today_message(&tasks, &[], Tz::UTC);

    assert_eq!(message.blocks[0]["type"], "header");
    assert!(
        section_text(&message.blocks[1]).contains("Standup"),
        "Scheduled section should come first"
    );
    assert_eq!(
        message.blocks[2]["type"], "divider",
        "Divider expected between scheduled and unscheduled groups"
    );
    assert!(section_text(&message.blocks[3]).contains("Water plants"));

    // The plain-text summary lists scheduled before unscheduled too
    let standup = message.text.find("Standup").unwrap();
    let plants = message.text.find("Water plants").unwrap();
    assert!(standup < plants);
}

#[test]
fn test_no_divider_with_single_group() {
    let tasks = vec![dated_task("1", "Water plants"), dated_task("2", "Read")];

    let message = format_today_message(&tasks, &[], Tz::UTC);

    assert!(
        message.blocks.iter().all(|b| b["type"] != "divider"),
        "No divider when only one group is present"
    );
}

#[test]
fn test_unscheduled_order_is_stable() {
    let tasks = vec![
        dated_task("1", "First"),
        dated_task("2", "Second"),
        dated_task("3", "Third"),
    ];

    let message = format_today_message(&tasks, &[], Tz::UTC);

    let text = section_text(&message.blocks[1]);
    let first = text.find("First").unwrap();
    let second = text.find("Second").unwrap();
    let third = text.find("Third").unwrap();
    assert!(
        first < second && second < third,
        "Unscheduled tasks must keep upstream order: {text}"
    );
}

#[test]
fn test_zero_tasks_yields_celebration() {
    let message = format_today_message(&[], &[], Tz::UTC);

    assert_eq!(message.text, CELEBRATION_TEXT);
    assert!(
        !message.blocks.is_empty(),
        "Celebration must render a block, never an empty list"
    );
    assert!(section_text(&message.blocks[0]).contains("🎉"));
}

#[test]
fn test_single_line_renders_time_content_priority_and_duration() {
    let mut task = timed_task("1", "Review release notes", 15, 0);
    task.priority = 4;
    task.duration = Some(TaskDuration {
        amount: 90,
        unit: DurationUnit::Minute,
    });

    let line = render_task_line(&task);

    assert!(line.contains("15:00"), "line should carry the time: {line}");
    assert!(line.contains("Review release notes"));
    assert!(line.contains("P1"), "priority 4 renders as P1: {line}");
    assert!(line.contains("1h30m"), "90 minutes renders as 1h30m: {line}");
    assert_eq!(line.lines().count(), 1, "task renders on a single line");
}

#[test]
fn test_zero_amount_duration_renders_nothing() {
    let mut task = timed_task("1", "Ping the vendor", 9, 0);
    task.duration = Some(TaskDuration {
        amount: 0,
        unit: DurationUnit::Minute,
    });

    let line = render_task_line(&task);

    assert!(
        !line.contains("(0m)") && !line.contains('('),
        "zero-fill durations must not render a suffix: {line}"
    );
}

#[test]
fn test_summary_text_contains_every_task() {
    let tasks = vec![
        timed_task("1", "Standup", 9, 30),
        dated_task("2", "Water plants"),
    ];

    let message = format_today_message(&tasks, &[], Tz::UTC);

    assert!(message.text.contains("Standup"));
    assert!(message.text.contains("Water plants"));
}

#[test]
fn test_completed_tasks_render_after_active() {
    let completed_at: DateTime<Utc> = "2026-08-30T10:15:00Z".parse().unwrap();
    let completed = vec![CompletedTask {
        id: "c1".to_string(),
        content: "Morning review".to_string(),
        completed_at,
        meta: None,
    }];
    let tasks = vec![timed_task("1", "Standup", 9, 30)];

    let message = format_today_message(&tasks, &completed, Tz::UTC);

    let joined = serde_json::to_string(&message.blocks).unwrap();
    assert!(joined.contains("Morning review"));
    let standup = joined.find("Standup").unwrap();
    let review = joined.find("Morning review").unwrap();
    assert!(standup < review, "Completed tasks render last");
    assert!(
        joined.contains("1 due · 1 done"),
        "Context footnote carries the counts: {joined}"
    );
}

#[test]
fn test_completed_only_still_renders_list_not_celebration() {
    let completed_at: DateTime<Utc> = "2026-08-30T10:15:00Z".parse().unwrap();
    let completed = vec![CompletedTask {
        id: "c1".to_string(),
        content: "Morning review".to_string(),
        completed_at,
        meta: None,
    }];

    let message = format_today_message(&[], &completed, Tz::UTC);

    assert_ne!(message.text, CELEBRATION_TEXT);
    assert!(message.text.contains("Morning review"));
}
