use tracing::debug;

use crate::models::{Day, DayId, Task, TaskDraft, TaskId, ViewMode};

/// The week board: one `Day` per weekday, each holding an ordered task list.
///
/// The board is the single owner of all tasks. A task id lives in at most one
/// day at a time and no operation removes a task from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    days: Vec<Day>,
}

impl Board {
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.days.iter().find(|d| d.id == id)
    }

    pub fn visible_days(&self, view: ViewMode) -> impl Iterator<Item = &Day> {
        self.days.iter().filter(move |d| view.includes(d.id))
    }

    /// Index of the day holding the task and the task's index inside it
    pub fn locate(&self, task_id: &TaskId) -> Option<(usize, usize)> {
        self.days.iter().enumerate().find_map(|(day_idx, day)| {
            day.position(task_id).map(|task_idx| (day_idx, task_idx))
        })
    }

    pub fn find_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.locate(task_id)
            .map(|(day_idx, task_idx)| &self.days[day_idx].tasks[task_idx])
    }

    pub fn day_of(&self, task_id: &TaskId) -> Option<DayId> {
        self.locate(task_id).map(|(day_idx, _)| self.days[day_idx].id)
    }

    pub fn task_count(&self) -> usize {
        self.days.iter().map(|d| d.tasks.len()).sum()
    }

    pub fn all_task_ids(&self) -> Vec<TaskId> {
        self.days
            .iter()
            .flat_map(|d| d.tasks.iter().map(|t| t.id.clone()))
            .collect()
    }

    fn day_index(&self, id: DayId) -> Option<usize> {
        self.days.iter().position(|d| d.id == id)
    }

    /// Flip the completion flag. Returns false when the id is unknown.
    pub fn toggle_complete(&mut self, task_id: &TaskId) -> bool {
        match self.locate(task_id) {
            Some((day_idx, task_idx)) => {
                let task = &mut self.days[day_idx].tasks[task_idx];
                task.completed = !task.completed;
                debug!(task = %task_id, completed = task.completed, "toggled task");
                true
            }
            None => false,
        }
    }

    /// Append a new task built from the draft to the end of `day_id`
    pub fn create_task(&mut self, day_id: DayId, draft: TaskDraft) -> bool {
        if self.locate(&draft.id).is_some() {
            debug!(task = %draft.id, "refusing to create a task with a duplicate id");
            return false;
        }
        match self.day_index(day_id) {
            Some(day_idx) => {
                debug!(task = %draft.id, day = %day_id, "created task");
                self.days[day_idx].tasks.push(draft.into_task());
                true
            }
            None => false,
        }
    }

    /// Merge the draft into the task with the given id, wherever it currently lives
    pub fn update_task(&mut self, task_id: &TaskId, draft: &TaskDraft) -> bool {
        match self.locate(task_id) {
            Some((day_idx, task_idx)) => {
                self.days[day_idx].tasks[task_idx].apply(draft);
                debug!(task = %task_id, "updated task");
                true
            }
            None => false,
        }
    }

    /// Remove the task from its day and append it to the end of `target`
    pub fn move_to_day_end(&mut self, task_id: &TaskId, target: DayId) -> bool {
        let Some(target_idx) = self.day_index(target) else {
            return false;
        };
        let Some((source_idx, task_idx)) = self.locate(task_id) else {
            return false;
        };
        let task = self.days[source_idx].tasks.remove(task_idx);
        self.days[target_idx].tasks.push(task);
        debug!(task = %task_id, from = %self.days[source_idx].id, to = %target, "moved task to end of day");
        true
    }

    /// Move `active` into the day of `over`, at `over`'s current index.
    ///
    /// Only applies across days; returns false (and changes nothing) when both
    /// tasks already share a day or either id is unknown.
    pub fn relocate_before(&mut self, active: &TaskId, over: &TaskId) -> bool {
        let (Some((source_idx, active_idx)), Some((target_idx, _))) =
            (self.locate(active), self.locate(over))
        else {
            return false;
        };
        if source_idx == target_idx {
            return false;
        }
        let task = self.days[source_idx].tasks.remove(active_idx);
        // `over` is in a different day, so its index is unaffected by the removal
        let insert_at = self.days[target_idx].position(over).unwrap_or(0);
        self.days[target_idx].tasks.insert(insert_at, task);
        debug!(
            task = %active,
            from = %self.days[source_idx].id,
            to = %self.days[target_idx].id,
            index = insert_at,
            "relocated task across days"
        );
        true
    }

    /// Reorder within a single day: move `active` from its index to `over`'s index.
    ///
    /// Elements between the two positions shift by one. Returns false when the
    /// tasks are in different days or either id is unknown.
    pub fn reorder_within_day(&mut self, active: &TaskId, over: &TaskId) -> bool {
        let (Some((day_idx, old_index)), Some((over_day_idx, new_index))) =
            (self.locate(active), self.locate(over))
        else {
            return false;
        };
        if day_idx != over_day_idx {
            return false;
        }
        array_move(&mut self.days[day_idx].tasks, old_index, new_index);
        debug!(task = %active, from = old_index, to = new_index, "reordered task within day");
        true
    }
}

/// Move the element at `from` to `to`, shifting the elements in between.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Subject};
    use chrono::{NaiveDate, Weekday};

    fn task(id: &str) -> Task {
        Task::new(TaskId::from(id), format!("Task {}", id), Subject::Math, 30)
    }

    fn board(columns: &[(Weekday, &[&str])]) -> Board {
        let start = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let days = columns
            .iter()
            .enumerate()
            .map(|(i, (weekday, ids))| {
                let mut day = Day::new(DayId(*weekday), start + chrono::Days::new(i as u64));
                day.tasks = ids.iter().map(|id| task(id)).collect();
                day
            })
            .collect();
        Board::new(days)
    }

    fn ids(board: &Board, day: Weekday) -> Vec<&str> {
        board
            .day(DayId(day))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect()
    }

    fn draft(id: &str, title: &str) -> TaskDraft {
        TaskDraft {
            id: TaskId::from(id),
            title: title.to_string(),
            subject: Subject::Language,
            duration: 20,
            priority: Priority::Low,
            description: None,
            completed: false,
        }
    }

    #[test]
    fn toggle_flips_and_unknown_id_is_noop() {
        let mut b = board(&[(Weekday::Mon, &["a", "b"])]);
        assert!(b.toggle_complete(&TaskId::from("a")));
        assert!(b.find_task(&TaskId::from("a")).unwrap().completed);
        assert!(b.toggle_complete(&TaskId::from("a")));
        assert!(!b.find_task(&TaskId::from("a")).unwrap().completed);

        let before = b.clone();
        assert!(!b.toggle_complete(&TaskId::from("missing")));
        assert_eq!(b, before);
    }

    #[test]
    fn create_appends_to_target_day() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Thu, &["b"])]);
        assert!(b.create_task(DayId(Weekday::Thu), draft("new", "Ler")));
        assert_eq!(ids(&b, Weekday::Thu), vec!["b", "new"]);
        assert_eq!(b.task_count(), 3);
    }

    #[test]
    fn create_rejects_unknown_day_and_duplicate_id() {
        let mut b = board(&[(Weekday::Mon, &["a"])]);
        assert!(!b.create_task(DayId(Weekday::Sun), draft("x", "X")));
        assert!(!b.create_task(DayId(Weekday::Mon), draft("a", "dup")));
        assert_eq!(b.task_count(), 1);
    }

    #[test]
    fn update_merges_wherever_task_lives() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Tue, &["b"])]);
        b.move_to_day_end(&TaskId::from("a"), DayId(Weekday::Tue));
        assert!(b.update_task(&TaskId::from("a"), &draft("a", "Renamed")));
        let t = b.find_task(&TaskId::from("a")).unwrap();
        assert_eq!(t.title, "Renamed");
        assert_eq!(b.day_of(&t.id), Some(DayId(Weekday::Tue)));
        assert!(!b.update_task(&TaskId::from("zzz"), &draft("zzz", "None")));
    }

    #[test]
    fn move_to_day_end_appends() {
        let mut b = board(&[
            (Weekday::Tue, &["3"]),
            (Weekday::Wed, &["4", "5"]),
        ]);
        assert!(b.move_to_day_end(&TaskId::from("3"), DayId(Weekday::Wed)));
        assert!(ids(&b, Weekday::Tue).is_empty());
        assert_eq!(ids(&b, Weekday::Wed), vec!["4", "5", "3"]);
    }

    #[test]
    fn move_to_own_day_sends_task_to_the_end() {
        let mut b = board(&[(Weekday::Mon, &["a", "b", "c"])]);
        assert!(b.move_to_day_end(&TaskId::from("a"), DayId(Weekday::Mon)));
        assert_eq!(ids(&b, Weekday::Mon), vec!["b", "c", "a"]);
    }

    #[test]
    fn relocate_inserts_at_hovered_index() {
        let mut b = board(&[
            (Weekday::Mon, &["a", "b"]),
            (Weekday::Tue, &["c", "d", "e"]),
        ]);
        assert!(b.relocate_before(&TaskId::from("a"), &TaskId::from("d")));
        assert_eq!(ids(&b, Weekday::Mon), vec!["b"]);
        assert_eq!(ids(&b, Weekday::Tue), vec!["c", "a", "d", "e"]);
    }

    #[test]
    fn relocate_within_same_day_is_noop() {
        let mut b = board(&[(Weekday::Mon, &["a", "b"])]);
        let before = b.clone();
        assert!(!b.relocate_before(&TaskId::from("a"), &TaskId::from("b")));
        assert_eq!(b, before);
    }

    #[test]
    fn reorder_shifts_elements_between_indices() {
        let mut b = board(&[(Weekday::Mon, &["a", "b", "c", "d"]), (Weekday::Tue, &["x"])]);
        assert!(b.reorder_within_day(&TaskId::from("a"), &TaskId::from("c")));
        assert_eq!(ids(&b, Weekday::Mon), vec!["b", "c", "a", "d"]);
        assert!(b.reorder_within_day(&TaskId::from("d"), &TaskId::from("b")));
        assert_eq!(ids(&b, Weekday::Mon), vec!["d", "b", "c", "a"]);
        assert_eq!(ids(&b, Weekday::Tue), vec!["x"]);
    }

    #[test]
    fn reorder_across_days_is_noop() {
        let mut b = board(&[(Weekday::Mon, &["a"]), (Weekday::Tue, &["b"])]);
        let before = b.clone();
        assert!(!b.reorder_within_day(&TaskId::from("a"), &TaskId::from("b")));
        assert_eq!(b, before);
    }

    #[test]
    fn array_move_ignores_out_of_range() {
        let mut v = vec![1, 2, 3];
        array_move(&mut v, 0, 5);
        assert_eq!(v, vec![1, 2, 3]);
        array_move(&mut v, 2, 0);
        assert_eq!(v, vec![3, 1, 2]);
    }
}
