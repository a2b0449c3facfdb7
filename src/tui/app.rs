use chrono::NaiveDate;
use ratatui::layout::Position;
use std::iter;
use std::time::Instant;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::Config;
use crate::drag::{DragController, DropOutcome, DropTarget};
use crate::i18n::{Locale, Notice, NoticeKind};
use crate::models::{Day, DayId, Task, TaskId, ViewMode};
use crate::stats::BoardStats;
use crate::tui::dialog::{DialogMode, TaskDialog};
use crate::tui::pointer::{HitMap, PointerSensor, SensorEvent, closest_corners};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Board,
    Dialog,
    Help,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub view: ViewMode,
    /// Index into the currently visible days
    pub focused_column: usize,
    pub selected: Option<TaskId>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub notice: Option<Notice>,
    pub notice_time: Option<Instant>,
}

/// Hover bookkeeping for an in-flight drag
#[derive(Debug, Clone, Default)]
pub struct DragUi {
    pub hover: Option<DropTarget>,
    /// Started with the pick-up key rather than the mouse
    pub keyboard: bool,
}

pub struct App {
    pub config: Config,
    pub board: Board,
    pub today: NaiveDate,
    pub locale: Locale,

    pub drag: DragController,
    pub drag_ui: DragUi,
    pub pointer: PointerSensor,
    pub dialog: Option<TaskDialog>,
    /// Interactive rects of the last rendered frame
    pub hit_map: HitMap,

    pub ui: UiState,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, board: Board, today: NaiveDate) -> Self {
        let pointer = PointerSensor::new(config.drag.activation_distance);
        let mut app = Self {
            today,
            locale: config.locale,
            ui: UiState {
                mode: Mode::Board,
                view: config.default_view,
                focused_column: 0,
                selected: None,
            },
            config,
            board,
            drag: DragController::new(),
            drag_ui: DragUi::default(),
            pointer,
            dialog: None,
            hit_map: HitMap::default(),
            status: StatusState::default(),
        };
        app.focus_today();
        app.ensure_selection();
        app
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats::compute(&self.board, self.today)
    }

    pub fn visible_days(&self) -> Vec<&Day> {
        self.board.visible_days(self.ui.view).collect()
    }

    pub fn focused_day(&self) -> Option<&Day> {
        self.board
            .visible_days(self.ui.view)
            .nth(self.ui.focused_column)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.ui
            .selected
            .as_ref()
            .and_then(|id| self.board.find_task(id))
    }

    pub fn hover(&self) -> Option<&DropTarget> {
        self.drag_ui.hover.as_ref()
    }

    fn visible_count(&self) -> usize {
        self.board.visible_days(self.ui.view).count()
    }

    fn column_of_day(&self, day: DayId) -> Option<usize> {
        self.board
            .visible_days(self.ui.view)
            .position(|d| d.id == day)
    }

    fn focus_today(&mut self) {
        let today = self.today;
        if let Some(col) = self
            .board
            .visible_days(self.ui.view)
            .position(|d| d.date == today)
        {
            self.ui.focused_column = col;
        }
    }

    /// Keep the selection on a task inside the focused column
    pub fn ensure_selection(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.ui.focused_column = 0;
            self.ui.selected = None;
            return;
        }
        self.ui.focused_column = self.ui.focused_column.min(count - 1);

        let focused = self.focused_day().map(|d| d.id);
        let selected_day = self
            .ui
            .selected
            .as_ref()
            .and_then(|id| self.board.day_of(id));
        if selected_day.is_some() && selected_day == focused {
            return;
        }
        self.ui.selected = self
            .focused_day()
            .and_then(|d| d.tasks.first())
            .map(|t| t.id.clone());
    }

    pub fn move_selection(&mut self, delta: isize) {
        let Some(day) = self.focused_day() else {
            return;
        };
        if day.tasks.is_empty() {
            self.ui.selected = None;
            return;
        }
        let last = day.tasks.len() as isize - 1;
        let next = match self.ui.selected.as_ref().and_then(|id| day.position(id)) {
            Some(i) => (i as isize + delta).clamp(0, last) as usize,
            None => 0,
        };
        let id = day.tasks[next].id.clone();
        self.ui.selected = Some(id);
    }

    pub fn move_focus(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let next = (self.ui.focused_column as isize + delta).clamp(0, count as isize - 1) as usize;
        if next != self.ui.focused_column {
            self.ui.focused_column = next;
            self.ui.selected = None;
            self.ensure_selection();
        }
    }

    pub fn focus_day(&mut self, day: DayId) {
        if let Some(col) = self.column_of_day(day) {
            if col != self.ui.focused_column {
                self.ui.focused_column = col;
                self.ui.selected = None;
                self.ensure_selection();
            }
        }
    }

    /// Select a task and focus its column. Ignored when the task is not visible.
    pub fn select_task(&mut self, task_id: &TaskId) {
        let Some(col) = self
            .board
            .day_of(task_id)
            .and_then(|day| self.column_of_day(day))
        else {
            return;
        };
        self.ui.focused_column = col;
        self.ui.selected = Some(task_id.clone());
    }

    pub fn toggle_view(&mut self) {
        if self.drag.is_dragging() {
            return;
        }
        self.ui.view = self.ui.view.toggled();
        self.ui.focused_column = 0;
        self.ui.selected = None;
        self.focus_today();
        self.ensure_selection();
        debug!(view = self.ui.view.as_str(), "switched view");
    }

    pub fn toggle_task(&mut self, task_id: &TaskId) -> bool {
        if self.board.toggle_complete(task_id) {
            self.set_notice(self.locale.notice(NoticeKind::StatusUpdated));
            true
        } else {
            false
        }
    }

    pub fn toggle_selected(&mut self) -> bool {
        match self.ui.selected.clone() {
            Some(id) => self.toggle_task(&id),
            None => false,
        }
    }

    pub fn open_create(&mut self, day: DayId) {
        self.dialog = Some(TaskDialog::open_create(day));
        self.ui.mode = Mode::Dialog;
    }

    pub fn open_create_in_focused(&mut self) {
        if let Some(day) = self.focused_day().map(|d| d.id) {
            self.open_create(day);
        }
    }

    pub fn open_edit(&mut self, task_id: &TaskId) -> bool {
        match self.board.find_task(task_id) {
            Some(task) => {
                self.dialog = Some(TaskDialog::open_edit(task));
                self.ui.mode = Mode::Dialog;
                true
            }
            None => false,
        }
    }

    pub fn open_edit_selected(&mut self) -> bool {
        match self.ui.selected.clone() {
            Some(id) => self.open_edit(&id),
            None => false,
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.ui.mode = Mode::Board;
    }

    /// Validate and apply the open dialog. On a validation error the dialog
    /// stays open and the error goes to the status bar.
    pub fn save_dialog(&mut self) -> bool {
        let Some(dialog) = self.dialog.as_ref() else {
            return false;
        };
        let submission = match dialog.submit() {
            Ok(submission) => submission,
            Err(err) => {
                debug!(error = %err, "task dialog rejected");
                self.set_notice(Notice::error(err.to_string()));
                return false;
            }
        };

        let task_id = submission.draft.id.clone();
        let applied = match submission.mode {
            DialogMode::Create { day } => {
                let created = self.board.create_task(day, submission.draft);
                if created {
                    self.set_notice(self.locale.notice(NoticeKind::TaskCreated));
                }
                created
            }
            DialogMode::Edit { task_id: ref id, .. } => {
                let updated = self.board.update_task(id, &submission.draft);
                if updated {
                    self.set_notice(self.locale.notice(NoticeKind::TaskUpdated));
                }
                updated
            }
        };

        self.close_dialog();
        if applied {
            self.select_task(&task_id);
        }
        applied
    }

    pub fn toggle_help(&mut self) {
        self.ui.mode = match self.ui.mode {
            Mode::Help => Mode::Board,
            _ => Mode::Help,
        };
    }

    /// Switch to the next theme by name, wrapping around
    pub fn cycle_theme(&mut self) {
        let themes = self.config.get_available_themes();
        let next = themes
            .iter()
            .position(|t| *t == self.config.current_theme)
            .map(|i| (i + 1) % themes.len())
            .unwrap_or(0);
        let Some(name) = themes.get(next) else {
            return;
        };
        match self.config.set_theme(name) {
            Ok(()) => self.set_notice(Notice::new("Theme:", name.clone())),
            Err(err) => self.set_notice(Notice::error(err.to_string())),
        }
    }

    pub fn set_notice(&mut self, notice: Notice) {
        info!(notice = %notice.text(), "status notice");
        self.status.notice = Some(notice);
        self.status.notice_time = Some(Instant::now());
    }

    pub fn clear_notice(&mut self) {
        self.status.notice = None;
        self.status.notice_time = None;
    }

    /// Check if the notice should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.notice_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_notice();
            }
        }
    }

    // Keyboard drag

    /// Pick up the selected card
    pub fn pick_up(&mut self) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(id) = self.ui.selected.clone() else {
            return false;
        };
        self.drag.start(&self.board, id.clone());
        self.drag_ui = DragUi {
            hover: Some(DropTarget::Task(id)),
            keyboard: true,
        };
        true
    }

    /// Hover targets of a visible column: its cards in order, then the column itself
    fn column_targets(&self, col: usize) -> Vec<DropTarget> {
        self.board
            .visible_days(self.ui.view)
            .nth(col)
            .map(|day| {
                day.tasks
                    .iter()
                    .map(|t| DropTarget::Task(t.id.clone()))
                    .chain(iter::once(DropTarget::Day(day.id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn hover_position(&self) -> Option<(usize, usize)> {
        let hover = self.drag_ui.hover.as_ref()?;
        (0..self.visible_count()).find_map(|col| {
            self.column_targets(col)
                .iter()
                .position(|t| t == hover)
                .map(|idx| (col, idx))
        })
    }

    /// Move the keyboard hover cursor by columns (`dx`) or rows (`dy`)
    pub fn move_hover(&mut self, dx: isize, dy: isize) {
        if !self.drag.is_dragging() {
            return;
        }
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let (col, idx) = self
            .hover_position()
            .unwrap_or((self.ui.focused_column, 0));
        let new_col = (col as isize + dx).clamp(0, count as isize - 1) as usize;
        let targets = self.column_targets(new_col);
        let last = targets.len().saturating_sub(1);
        let new_idx = if new_col == col {
            (idx as isize + dy).clamp(0, last as isize) as usize
        } else {
            idx.min(last)
        };
        let Some(target) = targets.get(new_idx).cloned() else {
            return;
        };
        self.set_hover(Some(target));
        if let Some((col, _)) = self.hover_position() {
            self.ui.focused_column = col;
        }
    }

    fn set_hover(&mut self, target: Option<DropTarget>) {
        if self.drag_ui.hover == target {
            return;
        }
        self.drag.over(&mut self.board, target.as_ref());
        self.drag_ui.hover = target;
    }

    /// Release the drag onto the current hover target
    pub fn drop_dragged(&mut self) -> DropOutcome {
        let active = self.drag.active_id().cloned();
        let target = self.drag_ui.hover.take();
        let outcome = self.drag.end(&mut self.board, target.as_ref());
        if let DropOutcome::MovedToDay(day) = outcome {
            debug!(day = %day, "task dropped on column");
            self.set_notice(self.locale.notice(NoticeKind::TaskMoved));
        }
        self.finish_drag(active);
        outcome
    }

    pub fn cancel_drag(&mut self) {
        let active = self.drag.active_id().cloned();
        self.drag.cancel();
        self.finish_drag(active);
    }

    fn finish_drag(&mut self, active: Option<TaskId>) {
        self.drag_ui = DragUi::default();
        self.pointer.cancel();
        // selection follows the card, wherever hovering left it
        if let Some(id) = active {
            self.select_task(&id);
        }
        self.ensure_selection();
    }

    // Mouse

    pub fn mouse_down(&mut self, pos: Position) {
        if self.ui.mode != Mode::Board || self.drag.is_dragging() {
            return;
        }
        if let Some(id) = self.hit_map.toggle_at(pos).cloned() {
            self.select_task(&id);
            self.toggle_task(&id);
            return;
        }
        if let Some(day) = self.hit_map.add_button_at(pos) {
            self.focus_day(day);
            self.open_create(day);
            return;
        }
        if let Some((id, rect)) = self.hit_map.card_at(pos).map(|(id, r)| (id.clone(), r)) {
            self.select_task(&id);
            self.pointer.press(id, pos, rect);
            return;
        }
        if let Some(day) = self.hit_map.column_at(pos) {
            self.focus_day(day);
        }
    }

    pub fn mouse_drag(&mut self, pos: Position) {
        if self.drag_ui.keyboard {
            return;
        }
        match self.pointer.drag_to(pos) {
            SensorEvent::Activated(id) => {
                self.drag.start(&self.board, id);
                self.update_pointer_hover();
            }
            SensorEvent::Moved => self.update_pointer_hover(),
            SensorEvent::Idle => {}
        }
    }

    pub fn mouse_up(&mut self, pos: Position) {
        if self.drag_ui.keyboard {
            return;
        }
        if self.pointer.active().is_some() && self.drag.is_dragging() {
            self.pointer.drag_to(pos);
            self.update_pointer_hover();
            self.drop_dragged();
        } else {
            // a click; the card was already selected on press
            self.pointer.release();
        }
    }

    fn update_pointer_hover(&mut self) {
        let Some(rect) = self.pointer.active().map(|a| a.rect()) else {
            return;
        };
        let target = closest_corners(rect, &self.hit_map.drop_candidates());
        self.set_hover(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_board;
    use crate::tui::dialog::DialogField;
    use chrono::Weekday;
    use ratatui::layout::Rect;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn app() -> App {
        App::new(Config::default(), sample_board(monday()), monday())
    }

    fn day_ids(app: &App, weekday: Weekday) -> Vec<String> {
        app.board
            .day(DayId(weekday))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn starts_focused_on_today_with_first_card_selected() {
        let app = app();
        assert_eq!(app.ui.mode, Mode::Board);
        assert_eq!(app.focused_day().unwrap().id, DayId(Weekday::Mon));
        assert_eq!(app.ui.selected, Some(TaskId::from("1")));
    }

    #[test]
    fn toggling_the_last_open_task_completes_today() {
        let mut app = app();
        assert!(app.toggle_selected());
        assert_eq!(app.stats().today_percent(), 100.0);
        assert_eq!(
            app.status.notice,
            Some(Locale::En.notice(NoticeKind::StatusUpdated))
        );
    }

    #[test]
    fn navigation_clamps_and_follows_columns() {
        let mut app = app();
        app.move_selection(5);
        assert_eq!(app.ui.selected, Some(TaskId::from("2")));
        app.move_focus(1);
        assert_eq!(app.ui.selected, Some(TaskId::from("3")));
        app.move_focus(10);
        assert_eq!(app.focused_day().unwrap().id, DayId(Weekday::Fri));
        assert_eq!(app.ui.selected, None);
    }

    #[test]
    fn view_toggle_does_not_change_stats() {
        let mut app = app();
        let before = app.stats();
        app.toggle_view();
        assert_eq!(app.ui.view, ViewMode::Weekend);
        assert_eq!(app.visible_days().len(), 2);
        assert_eq!(app.ui.selected, Some(TaskId::from("5")));
        assert_eq!(app.stats(), before);
    }

    #[test]
    fn create_through_dialog_appends_to_thursday() {
        let mut app = app();
        app.open_create(DayId(Weekday::Thu));
        assert_eq!(app.ui.mode, Mode::Dialog);
        let dialog = app.dialog.as_mut().unwrap();
        for c in "Ler capítulo 5".chars() {
            dialog.insert_char(c);
        }
        dialog.subject = crate::models::Subject::Language;
        dialog.duration.set_text("20");
        dialog.priority = crate::models::Priority::Low;

        assert!(app.save_dialog());
        assert_eq!(app.ui.mode, Mode::Board);
        let thursday = app.board.day(DayId(Weekday::Thu)).unwrap();
        assert_eq!(thursday.tasks.len(), 1);
        let task = &thursday.tasks[0];
        assert_eq!(task.title, "Ler capítulo 5");
        assert_eq!(task.subject, crate::models::Subject::Language);
        assert_eq!(task.priority, crate::models::Priority::Low);
        assert_eq!(task.duration, 20);
        assert!(!task.completed);
        assert_eq!(app.ui.selected, Some(task.id.clone()));
        assert_eq!(app.status.notice, Some(Locale::En.notice(NoticeKind::TaskCreated)));
    }

    #[test]
    fn empty_title_keeps_dialog_open_and_board_unchanged() {
        let mut app = app();
        let before = app.board.clone();
        app.open_create(DayId(Weekday::Mon));
        assert!(!app.save_dialog());
        assert_eq!(app.ui.mode, Mode::Dialog);
        assert!(app.dialog.is_some());
        assert_eq!(app.board, before);
        assert_eq!(app.status.notice.unwrap().description, "Title is required");
    }

    #[test]
    fn edit_preserves_completion() {
        let mut app = app();
        assert!(app.open_edit(&TaskId::from("2")));
        let dialog = app.dialog.as_mut().unwrap();
        dialog.current_field = DialogField::Title;
        dialog.insert_char('!');
        assert!(app.save_dialog());
        let task = app.board.find_task(&TaskId::from("2")).unwrap();
        assert_eq!(task.title, "Estudar células vegetais!");
        assert!(task.completed);
    }

    #[test]
    fn keyboard_drag_to_wednesday_column_appends() {
        let mut app = app();
        app.move_focus(1);
        assert_eq!(app.ui.selected, Some(TaskId::from("3")));
        assert!(app.pick_up());

        // over task 4: relocates before it, live
        app.move_hover(1, 0);
        assert_eq!(day_ids(&app, Weekday::Wed), vec!["3", "4"]);
        assert!(day_ids(&app, Weekday::Tue).is_empty());

        // down past task 4 onto the column itself; extra steps clamp
        app.move_hover(0, 1);
        app.move_hover(0, 1);
        assert_eq!(day_ids(&app, Weekday::Wed), vec!["3", "4"]);
        assert_eq!(app.hover(), Some(&DropTarget::Day(DayId(Weekday::Wed))));
        assert_eq!(app.drop_dragged(), DropOutcome::MovedToDay(DayId(Weekday::Wed)));
        assert_eq!(day_ids(&app, Weekday::Wed), vec!["4", "3"]);
        assert_eq!(app.ui.selected, Some(TaskId::from("3")));
        assert_eq!(app.status.notice, Some(Locale::En.notice(NoticeKind::TaskMoved)));
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn cancel_keeps_board_when_nothing_was_hovered() {
        let mut app = app();
        let before = app.board.clone();
        assert!(app.pick_up());
        app.cancel_drag();
        assert_eq!(app.board, before);
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn mouse_drag_onto_column_moves_task() {
        let mut app = app();
        app.hit_map.columns = vec![
            (DayId(Weekday::Tue), Rect::new(0, 0, 20, 30)),
            (DayId(Weekday::Wed), Rect::new(20, 0, 20, 30)),
        ];
        app.hit_map.cards = vec![(TaskId::from("3"), Rect::new(1, 2, 18, 6))];

        app.mouse_down(Position::new(5, 4));
        assert_eq!(app.ui.selected, Some(TaskId::from("3")));
        app.mouse_drag(Position::new(25, 14));
        assert!(app.drag.is_dragging());
        assert_eq!(app.hover(), Some(&DropTarget::Day(DayId(Weekday::Wed))));
        app.mouse_up(Position::new(25, 14));

        assert_eq!(day_ids(&app, Weekday::Wed), vec!["4", "3"]);
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn cycle_theme_walks_sorted_names() {
        let mut app = app();
        assert_eq!(app.config.current_theme, "default");
        app.cycle_theme();
        assert_eq!(app.config.current_theme, "light");
        app.cycle_theme();
        app.cycle_theme();
        assert_eq!(app.config.current_theme, "dark");
    }

    #[test]
    fn mouse_click_on_toggle_glyph_toggles() {
        let mut app = app();
        app.hit_map.toggles = vec![(TaskId::from("4"), Rect::new(3, 3, 3, 1))];
        app.mouse_down(Position::new(4, 3));
        app.mouse_up(Position::new(4, 3));
        assert!(app.board.find_task(&TaskId::from("4")).unwrap().completed);
        assert_eq!(app.ui.selected, Some(TaskId::from("4")));
    }
}
