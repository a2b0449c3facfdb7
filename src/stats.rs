use chrono::NaiveDate;
use serde::Serialize;

use crate::board::Board;
use crate::i18n::{Locale, Text};
use crate::models::{Day, Subject, percent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub tasks: usize,
    pub completed: usize,
    pub minutes: u32,
}

impl DayStats {
    fn of(day: &Day) -> Self {
        Self {
            tasks: day.tasks.len(),
            completed: day.completed_count(),
            minutes: day.total_minutes(),
        }
    }

    pub fn percent(&self) -> f64 {
        percent(self.completed, self.tasks)
    }
}

/// Derived, read-only statistics over the whole board.
///
/// Computed over every day regardless of which view is on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_minutes: u32,
    /// Stats for the day whose date is today; zeroes when the week does not contain today
    pub today: DayStats,
    pub today_subjects: Vec<(Subject, usize)>,
    pub weekly_subjects: Vec<(Subject, usize)>,
}

impl BoardStats {
    pub fn compute(board: &Board, today: NaiveDate) -> Self {
        let days = board.days();
        let current_day = days.iter().find(|d| d.date == today);

        Self {
            total_tasks: days.iter().map(|d| d.tasks.len()).sum(),
            completed_tasks: days.iter().map(Day::completed_count).sum(),
            total_minutes: days.iter().map(Day::total_minutes).sum(),
            today: current_day.map(DayStats::of).unwrap_or_default(),
            today_subjects: current_day
                .map(|d| subject_counts(std::slice::from_ref(d)))
                .unwrap_or_default(),
            weekly_subjects: subject_counts(days),
        }
    }

    pub fn today_percent(&self) -> f64 {
        self.today.percent()
    }

    pub fn weekly_percent(&self) -> f64 {
        percent(self.completed_tasks, self.total_tasks)
    }
}

/// Count tasks per subject, in order of first appearance
fn subject_counts(days: &[Day]) -> Vec<(Subject, usize)> {
    let mut counts: Vec<(Subject, usize)> = Vec::new();
    for task in days.iter().flat_map(|d| d.tasks.iter()) {
        match counts.iter_mut().find(|(s, _)| *s == task.subject) {
            Some((_, n)) => *n += 1,
            None => counts.push((task.subject, 1)),
        }
    }
    counts
}

/// One line per subject, e.g. `"02 - Math"`. Returns the localized
/// "no tasks" label for an empty breakdown.
pub fn format_subject_counts(counts: &[(Subject, usize)], locale: Locale) -> Vec<String> {
    if counts.is_empty() {
        return vec![locale.text(Text::NoTasks).to_string()];
    }
    counts
        .iter()
        .map(|(subject, n)| format!("{:02} - {}", n, locale.subject(*subject)))
        .collect()
}

/// Whole-number percentage for display. Halves round up (`12.5` -> `13`),
/// so every output shows the same figure.
pub fn display_percent(percent: f64) -> u32 {
    percent.round().clamp(0.0, 100.0) as u32
}

/// `95` -> `"1h 35m"`
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
