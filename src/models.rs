use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    Language,
    History,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::Science,
        Subject::Language,
        Subject::History,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

/// Unique identifier of a study task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Fresh random identifier for a newly created task
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a day column. Its string form is the lowercase English
/// weekday name ("monday" .. "sunday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayId(pub Weekday);

impl DayId {
    pub const WEEK: [DayId; 7] = [
        DayId(Weekday::Mon),
        DayId(Weekday::Tue),
        DayId(Weekday::Wed),
        DayId(Weekday::Thu),
        DayId(Weekday::Fri),
        DayId(Weekday::Sat),
        DayId(Weekday::Sun),
    ];

    pub fn weekday(&self) -> Weekday {
        self.0
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.0, Weekday::Sat | Weekday::Sun)
    }

    pub fn as_str(&self) -> &'static str {
        match self.0 {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        }
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayId::WEEK
            .iter()
            .copied()
            .find(|d| d.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown day: {}", s))
    }
}

impl TryFrom<String> for DayId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DayId> for String {
    fn from(day: DayId) -> Self {
        day.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub subject: Subject,
    pub duration: u32, // minutes
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, subject: Subject, duration: u32) -> Self {
        Self {
            id,
            title: title.into(),
            subject,
            duration,
            completed: false,
            priority: Priority::Medium,
            description: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Overwrite every editable field with the draft's values. The id is kept.
    pub fn apply(&mut self, draft: &TaskDraft) {
        self.title = draft.title.clone();
        self.subject = draft.subject;
        self.duration = draft.duration;
        self.priority = draft.priority;
        self.description = draft.description.clone();
        self.completed = draft.completed;
    }
}

/// Task data produced by the editor dialog on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: TaskId,
    pub title: String,
    pub subject: Subject,
    pub duration: u32,
    pub priority: Priority,
    pub description: Option<String>,
    pub completed: bool,
}

impl TaskDraft {
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            subject: self.subject,
            duration: self.duration,
            completed: self.completed,
            priority: self.priority,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: DayId,
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl Day {
    pub fn new(id: DayId, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            tasks: Vec::new(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn total_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.duration).sum()
    }

    /// Completion percentage of this day's tasks, 0 when empty
    pub fn progress_percent(&self) -> f64 {
        percent(self.completed_count(), self.tasks.len())
    }

    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == task_id)
    }
}

/// `part / total * 100`, or 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Which subset of days the board renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Weekdays,
    Weekend,
}

impl ViewMode {
    pub fn includes(&self, day: DayId) -> bool {
        match self {
            ViewMode::Weekdays => !day.is_weekend(),
            ViewMode::Weekend => day.is_weekend(),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Weekdays => ViewMode::Weekend,
            ViewMode::Weekend => ViewMode::Weekdays,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Weekdays => "weekdays",
            ViewMode::Weekend => "weekend",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekdays" => Ok(ViewMode::Weekdays),
            "weekend" => Ok(ViewMode::Weekend),
            other => Err(format!("Unknown view mode: {}", other)),
        }
    }
}
