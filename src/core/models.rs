use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Unit for a task's planned duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDuration {
    pub amount: u32,
    pub unit: DurationUnit,
}

/// Due information, distinguishing date-only scheduling from a specific
/// time of day. `datetime` is wall-clock time in the configured timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due {
    pub date: NaiveDate,
    pub datetime: Option<NaiveDateTime>,
}

/// A task normalized from either upstream shape (active record or the
/// metadata embedded in a completed record), so the formatter never sees
/// upstream schema quirks.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// Ordinal priority, 1..=4; higher is more urgent.
    pub priority: u8,
    pub due: Option<Due>,
    pub duration: Option<TaskDuration>,
    pub labels: Vec<String>,
}

impl Task {
    /// Ordering key: the due timestamp for time-scheduled tasks, a sentinel
    /// past any real timestamp otherwise so unscheduled tasks sort last.
    #[must_use]
    pub fn sort_key(&self) -> i64 {
        self.due
            .as_ref()
            .and_then(|d| d.datetime)
            .map_or(i64::MAX, |dt| dt.and_utc().timestamp())
    }

    #[must_use]
    pub fn has_time(&self) -> bool {
        self.due.as_ref().is_some_and(|d| d.datetime.is_some())
    }
}

/// A task completed today. The upstream returns a different shape for these
/// than for active tasks, and the original-task metadata may be absent.
#[derive(Debug, Clone)]
pub struct CompletedTask {
    pub id: String,
    pub content: String,
    pub completed_at: DateTime<Utc>,
    pub meta: Option<Task>,
}
