//! Drag-and-drop lifecycle for task cards.
//!
//! A drag moves through `Idle -> Dragging -> Idle`. While dragging, hovering a
//! task in another day relocates the dragged task immediately; dropping
//! resolves same-day reorders and column-level drops. Cross-day transfers
//! onto a task are settled during hover only, so a drop never moves a task
//! twice.

use tracing::{debug, trace};

use crate::board::Board;
use crate::models::{DayId, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { task_id: TaskId },
}

/// What the pointer is currently over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Day(DayId),
    Task(TaskId),
}

/// Result of releasing a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Appended to the end of another (or the same) day column
    MovedToDay(DayId),
    /// Reordered inside its own day
    Reordered,
    /// Nothing changed on release
    None,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_id(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Dragging { task_id } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// The task under drag, for the floating preview. `None` when idle or when
    /// the dragged id does not resolve to a task.
    pub fn active_task<'a>(&self, board: &'a Board) -> Option<&'a Task> {
        self.active_id().and_then(|id| board.find_task(id))
    }

    pub fn start(&mut self, board: &Board, task_id: TaskId) {
        if board.find_task(&task_id).is_none() {
            debug!(task = %task_id, "drag started on an unknown id, no preview");
        } else {
            debug!(task = %task_id, "drag started");
        }
        self.state = DragState::Dragging { task_id };
    }

    /// Hover update. Relocates the dragged task when it hovers a task that
    /// belongs to a different day. Returns true when the board changed.
    pub fn over(&mut self, board: &mut Board, target: Option<&DropTarget>) -> bool {
        let (Some(active), Some(DropTarget::Task(over_id))) = (self.active_id(), target) else {
            return false;
        };
        if active == over_id {
            return false;
        }
        let (Some(active_day), Some(over_day)) = (board.day_of(active), board.day_of(over_id))
        else {
            return false;
        };
        if active_day == over_day {
            return false;
        }
        trace!(task = %active, over = %over_id, "drag over task in another day");
        board.relocate_before(active, over_id)
    }

    /// Release. Always returns to `Idle`.
    pub fn end(&mut self, board: &mut Board, target: Option<&DropTarget>) -> DropOutcome {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { task_id } = state else {
            return DropOutcome::None;
        };
        let Some(target) = target else {
            debug!(task = %task_id, "dropped outside any target");
            return DropOutcome::None;
        };

        match target {
            DropTarget::Day(day_id) => {
                if board.move_to_day_end(&task_id, *day_id) {
                    DropOutcome::MovedToDay(*day_id)
                } else {
                    DropOutcome::None
                }
            }
            DropTarget::Task(over_id) => {
                let same_day = match (board.day_of(&task_id), board.day_of(over_id)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                };
                if same_day && &task_id != over_id && board.reorder_within_day(&task_id, over_id) {
                    DropOutcome::Reordered
                } else {
                    DropOutcome::None
                }
            }
        }
    }

    /// Abandon the drag without touching the board
    pub fn cancel(&mut self) {
        if let DragState::Dragging { task_id } = std::mem::take(&mut self.state) {
            debug!(task = %task_id, "drag cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Subject};
    use chrono::{NaiveDate, Weekday};

    fn board(columns: &[(Weekday, &[&str])]) -> Board {
        let date = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        Board::new(
            columns.iter()
                .map(|(weekday, ids)| {
                    let mut day = Day::new(DayId(*weekday), date);
                    day.tasks = ids
                        .iter()
                        .map(|id| Task::new(TaskId::from(*id), *id, Subject::Math, 30))
                        .collect();
                    day
                })
                .collect(),
        )
    }

    fn ids(board: &Board, day: Weekday) -> Vec<String> {
        board
            .day(DayId(day))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    fn task(id: &str) -> DropTarget {
        DropTarget::Task(TaskId::from(id))
    }

    #[test]
    fn start_then_end_returns_to_idle() {
        let mut b = board(&[(Weekday::Mon, &["a"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));
        assert!(drag.is_dragging());
        assert_eq!(drag.active_task(&b).unwrap().title, "a");
        assert_eq!(drag.end(&mut b, None), DropOutcome::None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn unknown_id_drags_without_preview() {
        let mut b = board(&[(Weekday::Mon, &["a"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("ghost"));
        assert!(drag.is_dragging());
        assert!(drag.active_task(&b).is_none());
        let before = b.clone();
        assert_eq!(drag.end(&mut b, Some(&DropTarget::Day(DayId(Weekday::Mon)))), DropOutcome::None);
        assert_eq!(b, before);
    }

    #[test]
    fn column_drop_appends_to_target_day() {
        let mut b = board(&[(Weekday::Tue, &["3"]), (Weekday::Wed, &["4"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("3"));
        let outcome = drag.end(&mut b, Some(&DropTarget::Day(DayId(Weekday::Wed))));
        assert_eq!(outcome, DropOutcome::MovedToDay(DayId(Weekday::Wed)));
        assert!(ids(&b, Weekday::Tue).is_empty());
        assert_eq!(ids(&b, Weekday::Wed), vec!["4", "3"]);
    }

    #[test]
    fn hover_across_days_relocates_and_drop_does_not_move_again() {
        let mut b = board(&[(Weekday::Mon, &["a", "b"]), (Weekday::Tue, &["c", "d"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));

        assert!(drag.over(&mut b, Some(&task("d"))));
        assert_eq!(ids(&b, Weekday::Mon), vec!["b"]);
        assert_eq!(ids(&b, Weekday::Tue), vec!["c", "a", "d"]);

        // Hovering again over the same task, now in the same day, changes nothing
        assert!(!drag.over(&mut b, Some(&task("d"))));
        assert_eq!(b.task_count(), 4);
    }

    #[test]
    fn drop_on_task_in_other_day_is_noop() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Tue, &["c"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));
        let before = b.clone();
        assert_eq!(drag.end(&mut b, Some(&task("c"))), DropOutcome::None);
        assert_eq!(b, before);
    }

    #[test]
    fn drop_on_task_in_same_day_reorders() {
        let mut b = board(&[(Weekday::Mon, &["a", "b", "c"]), (Weekday::Tue, &["x"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("c"));
        assert!(!drag.over(&mut b, Some(&task("a"))));
        assert_eq!(drag.end(&mut b, Some(&task("a"))), DropOutcome::Reordered);
        assert_eq!(ids(&b, Weekday::Mon), vec!["c", "a", "b"]);
        assert_eq!(ids(&b, Weekday::Tue), vec!["x"]);
    }

    #[test]
    fn drop_on_itself_changes_nothing() {
        let mut b = board(&[(Weekday::Mon, &["a", "b"])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));
        assert_eq!(drag.end(&mut b, Some(&task("a"))), DropOutcome::None);
        assert_eq!(ids(&b, Weekday::Mon), vec!["a", "b"]);
    }

    #[test]
    fn hover_over_column_is_ignored_until_drop() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Tue, &[])]);
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));
        assert!(!drag.over(&mut b, Some(&DropTarget::Day(DayId(Weekday::Tue)))));
        assert_eq!(ids(&b, Weekday::Mon), vec!["a"]);
    }

    #[test]
    fn over_while_idle_does_nothing() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Tue, &["b"])]);
        let mut drag = DragController::new();
        assert!(!drag.over(&mut b, Some(&task("b"))));
        assert_eq!(drag.end(&mut b, Some(&task("b"))), DropOutcome::None);
    }

    #[test]
    fn cancel_keeps_board_untouched() {
        let b = board(&[(Weekday::Mon, &["a"])]);
        let before = b.clone();
        let mut drag = DragController::new();
        drag.start(&b, TaskId::from("a"));
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
        assert_eq!(b, before);
    }
}
