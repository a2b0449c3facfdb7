use thiserror::Error;

use crate::models::{DayId, Priority, Subject, Task, TaskDraft, TaskId};
use crate::tui::widgets::editor::Editor;

pub const DURATION_MIN: u32 = 5;
pub const DURATION_MAX: u32 = 300;
pub const DURATION_STEP: u32 = 5;
pub const DEFAULT_DURATION: u32 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Duration must be a number of minutes, got '{0}'")]
    InvalidDuration(String),
    #[error("Duration must be between 5 and 300 minutes, got {0}")]
    DurationOutOfRange(u32),
    #[error("Duration must be a multiple of 5 minutes, got {0}")]
    DurationStep(u32),
}

/// What the dialog was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create { day: DayId },
    Edit { task_id: TaskId, completed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Title,
    Subject,
    Duration,
    Priority,
    Description,
}

impl DialogField {
    const ORDER: [DialogField; 5] = [
        DialogField::Title,
        DialogField::Subject,
        DialogField::Duration,
        DialogField::Priority,
        DialogField::Description,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            DialogField::Title | DialogField::Duration | DialogField::Description
        )
    }
}

/// A validated dialog submission, ready to hand to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: DialogMode,
    pub draft: TaskDraft,
}

/// Form state for creating or editing one task.
///
/// A fresh dialog is built every time it opens, so stale input from a
/// previous target never leaks into the next one.
#[derive(Debug, Clone)]
pub struct TaskDialog {
    pub mode: DialogMode,
    pub current_field: DialogField,
    pub title: Editor,
    pub subject: Subject,
    pub duration: Editor,
    pub priority: Priority,
    pub description: Editor,
}

impl TaskDialog {
    pub fn open_create(day: DayId) -> Self {
        Self {
            mode: DialogMode::Create { day },
            current_field: DialogField::Title,
            title: Editor::new(),
            subject: Subject::Math,
            duration: Editor::from_string(&DEFAULT_DURATION.to_string(), false),
            priority: Priority::Medium,
            description: Editor::multi_line(),
        }
    }

    pub fn open_edit(task: &Task) -> Self {
        Self {
            mode: DialogMode::Edit {
                task_id: task.id.clone(),
                completed: task.completed,
            },
            current_field: DialogField::Title,
            title: Editor::from_string(&task.title, false),
            subject: task.subject,
            duration: Editor::from_string(&task.duration.to_string(), false),
            priority: task.priority,
            description: Editor::from_string(task.description.as_deref().unwrap_or(""), true),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DialogMode::Edit { .. })
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
    }

    /// Editor behind the focused field, if it is a text field
    pub fn current_editor_mut(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            DialogField::Title => Some(&mut self.title),
            DialogField::Duration => Some(&mut self.duration),
            DialogField::Description => Some(&mut self.description),
            DialogField::Subject | DialogField::Priority => None,
        }
    }

    pub fn current_editor(&self) -> Option<&Editor> {
        match self.current_field {
            DialogField::Title => Some(&self.title),
            DialogField::Duration => Some(&self.duration),
            DialogField::Description => Some(&self.description),
            DialogField::Subject | DialogField::Priority => None,
        }
    }

    /// Type into the focused field. The duration field only takes digits.
    pub fn insert_char(&mut self, ch: char) {
        if self.current_field == DialogField::Duration && !ch.is_ascii_digit() {
            return;
        }
        if let Some(editor) = self.current_editor_mut() {
            editor.insert_char(ch);
        }
    }

    pub fn cycle_subject(&mut self, forward: bool) {
        self.subject = cycle(&Subject::ALL, self.subject, forward);
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        self.priority = cycle(&Priority::ALL, self.priority, forward);
    }

    /// Step the duration by 5 minutes, snapping to the grid and clamping to 5..=300.
    /// An unparseable value restarts from the default.
    pub fn step_duration(&mut self, up: bool) {
        let current = self.duration.text().trim().parse::<u32>().ok();
        let next = match current {
            None => DEFAULT_DURATION,
            Some(value) => {
                let snapped = value - value % DURATION_STEP;
                if up {
                    snapped.saturating_add(DURATION_STEP)
                } else if snapped == value {
                    snapped.saturating_sub(DURATION_STEP)
                } else {
                    snapped
                }
            }
        };
        let next = next.clamp(DURATION_MIN, DURATION_MAX);
        self.duration.set_text(&next.to_string());
    }

    /// Adjust a select or number field. Returns false for text fields.
    pub fn adjust(&mut self, forward: bool) -> bool {
        match self.current_field {
            DialogField::Subject => self.cycle_subject(forward),
            DialogField::Priority => self.cycle_priority(forward),
            DialogField::Duration => self.step_duration(forward),
            DialogField::Title | DialogField::Description => return false,
        }
        true
    }

    pub fn parse_duration(&self) -> Result<u32, FormError> {
        let raw = self.duration.text();
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidDuration(raw.trim().to_string()))?;
        if !(DURATION_MIN..=DURATION_MAX).contains(&value) {
            return Err(FormError::DurationOutOfRange(value));
        }
        if value % DURATION_STEP != 0 {
            return Err(FormError::DurationStep(value));
        }
        Ok(value)
    }

    /// Validate the form and build the draft. Nothing is mutated on error.
    pub fn submit(&self) -> Result<Submission, FormError> {
        let title = self.title.text().trim().to_string();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let duration = self.parse_duration()?;

        let description = self.description.text().trim().to_string();
        let description = if description.is_empty() {
            None
        } else {
            Some(description)
        };

        let (id, completed) = match &self.mode {
            DialogMode::Create { .. } => (TaskId::generate(), false),
            DialogMode::Edit { task_id, completed } => (task_id.clone(), *completed),
        };

        Ok(Submission {
            mode: self.mode.clone(),
            draft: TaskDraft {
                id,
                title,
                subject: self.subject,
                duration,
                priority: self.priority,
                description,
                completed,
            },
        })
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn type_text(dialog: &mut TaskDialog, text: &str) {
        for c in text.chars() {
            dialog.insert_char(c);
        }
    }

    #[test]
    fn create_defaults() {
        let dialog = TaskDialog::open_create(DayId(Weekday::Thu));
        assert_eq!(dialog.title.text(), "");
        assert_eq!(dialog.subject, Subject::Math);
        assert_eq!(dialog.duration.text(), "30");
        assert_eq!(dialog.priority, Priority::Medium);
        assert!(dialog.description.is_blank());
        assert!(!dialog.is_edit());
    }

    #[test]
    fn create_submission_has_fresh_id_and_is_incomplete() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Thu));
        type_text(&mut dialog, "  Ler capítulo 5 ");
        dialog.subject = Subject::Language;
        dialog.duration.set_text("20");
        dialog.priority = Priority::Low;

        let submission = dialog.submit().unwrap();
        assert_eq!(submission.mode, DialogMode::Create { day: DayId(Weekday::Thu) });
        assert_eq!(submission.draft.title, "Ler capítulo 5");
        assert_eq!(submission.draft.duration, 20);
        assert!(!submission.draft.completed);
        assert!(submission.draft.description.is_none());
        assert!(!submission.draft.id.as_str().is_empty());
    }

    #[test]
    fn edit_mirrors_task_and_keeps_completion() {
        let task = Task::new(TaskId::from("2"), "Células", Subject::Science, 30)
            .with_completed(true)
            .with_description("Fotossíntese");
        let mut dialog = TaskDialog::open_edit(&task);
        assert_eq!(dialog.title.text(), "Células");
        assert_eq!(dialog.description.text(), "Fotossíntese");
        dialog.cycle_priority(true);

        let submission = dialog.submit().unwrap();
        assert_eq!(submission.draft.id, TaskId::from("2"));
        assert!(submission.draft.completed);
        assert_eq!(submission.draft.priority, Priority::High);
    }

    #[test]
    fn rejects_blank_title() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Mon));
        type_text(&mut dialog, "   ");
        assert_eq!(dialog.submit(), Err(FormError::EmptyTitle));
    }

    #[test]
    fn validates_duration() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Mon));
        type_text(&mut dialog, "x");
        dialog.duration.set_text("");
        assert_eq!(dialog.submit(), Err(FormError::InvalidDuration(String::new())));
        dialog.duration.set_text("0");
        assert_eq!(dialog.submit(), Err(FormError::DurationOutOfRange(0)));
        dialog.duration.set_text("305");
        assert_eq!(dialog.submit(), Err(FormError::DurationOutOfRange(305)));
        dialog.duration.set_text("22");
        assert_eq!(dialog.submit(), Err(FormError::DurationStep(22)));
    }

    #[test]
    fn duration_field_only_accepts_digits() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Mon));
        dialog.current_field = DialogField::Duration;
        dialog.insert_char('a');
        dialog.insert_char('5');
        assert_eq!(dialog.duration.text(), "305");
    }

    #[test]
    fn step_duration_snaps_and_clamps() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Mon));
        dialog.step_duration(true);
        assert_eq!(dialog.duration.text(), "35");
        dialog.duration.set_text("22");
        dialog.step_duration(false);
        assert_eq!(dialog.duration.text(), "20");
        dialog.duration.set_text("300");
        dialog.step_duration(true);
        assert_eq!(dialog.duration.text(), "300");
        dialog.duration.set_text("5");
        dialog.step_duration(false);
        assert_eq!(dialog.duration.text(), "5");
        dialog.duration.set_text("abc");
        dialog.step_duration(true);
        assert_eq!(dialog.duration.text(), "30");
    }

    #[test]
    fn fields_cycle_in_both_directions() {
        let mut dialog = TaskDialog::open_create(DayId(Weekday::Mon));
        dialog.previous_field();
        assert_eq!(dialog.current_field, DialogField::Description);
        dialog.next_field();
        dialog.next_field();
        assert_eq!(dialog.current_field, DialogField::Subject);
        assert!(dialog.current_editor().is_none());
        assert!(dialog.adjust(false));
        assert_eq!(dialog.subject, Subject::History);
    }
}
