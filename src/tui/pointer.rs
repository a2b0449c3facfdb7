//! Mouse hit-testing and drag activation.
//!
//! The renderer records every interactive rect into a [`HitMap`] each frame;
//! mouse events are resolved against the map from the previous frame.

use ratatui::layout::{Position, Rect};

use crate::drag::DropTarget;
use crate::models::{DayId, TaskId};

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub columns: Vec<(DayId, Rect)>,
    pub cards: Vec<(TaskId, Rect)>,
    pub toggles: Vec<(TaskId, Rect)>,
    pub add_buttons: Vec<(DayId, Rect)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.columns.clear();
        self.cards.clear();
        self.toggles.clear();
        self.add_buttons.clear();
    }

    pub fn card_at(&self, pos: Position) -> Option<(&TaskId, Rect)> {
        self.cards
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(id, r)| (id, *r))
    }

    pub fn toggle_at(&self, pos: Position) -> Option<&TaskId> {
        self.toggles
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(id, _)| id)
    }

    pub fn add_button_at(&self, pos: Position) -> Option<DayId> {
        self.add_buttons
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(day, _)| *day)
    }

    pub fn column_at(&self, pos: Position) -> Option<DayId> {
        self.columns
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(day, _)| *day)
    }

    /// Every droppable on screen: columns and cards
    pub fn drop_candidates(&self) -> Vec<(DropTarget, Rect)> {
        self.columns
            .iter()
            .map(|(day, r)| (DropTarget::Day(*day), *r))
            .chain(
                self.cards
                    .iter()
                    .map(|(id, r)| (DropTarget::Task(id.clone()), *r)),
            )
            .collect()
    }
}

fn corners(r: Rect) -> [(f64, f64); 4] {
    let (x0, y0) = (r.x as f64, r.y as f64);
    let (x1, y1) = (x0 + r.width as f64, y0 + r.height as f64);
    [(x0, y0), (x1, y0), (x0, y1), (x1, y1)]
}

/// Pick the candidate whose corners are closest to the dragged rect's corners
/// (summed euclidean distance, corner to matching corner). Ties go to the
/// earlier candidate.
pub fn closest_corners(dragged: Rect, candidates: &[(DropTarget, Rect)]) -> Option<DropTarget> {
    let dragged = corners(dragged);
    let mut best: Option<(f64, &DropTarget)> = None;
    for (target, rect) in candidates {
        let distance: f64 = corners(*rect)
            .iter()
            .zip(dragged.iter())
            .map(|((ax, ay), (bx, by))| ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt())
            .sum();
        match best {
            Some((d, _)) if d <= distance => {}
            _ => best = Some((distance, target)),
        }
    }
    best.map(|(_, target)| target.clone())
}

/// A press on a card that has not travelled far enough to count as a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPress {
    pub task_id: TaskId,
    pub origin: Position,
    pub card: Rect,
}

/// Floating card following the pointer during a mouse drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePointer {
    pub position: Position,
    pub grab_offset: (u16, u16),
    pub size: (u16, u16),
}

impl ActivePointer {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x.saturating_sub(self.grab_offset.0),
            self.position.y.saturating_sub(self.grab_offset.1),
            self.size.0,
            self.size.1,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorEvent {
    /// Nothing to do
    Idle,
    /// The pending press crossed the activation distance; start dragging this task
    Activated(TaskId),
    /// An active drag moved
    Moved,
}

/// Turns raw mouse down/drag/up into click or drag gestures.
///
/// A drag starts only after the pointer moves at least `activation_distance`
/// cells (Chebyshev) from the press, so a plain click never starts one.
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: u16,
    pending: Option<PendingPress>,
    active: Option<ActivePointer>,
}

impl PointerSensor {
    pub fn new(activation_distance: u16) -> Self {
        Self {
            activation_distance,
            pending: None,
            active: None,
        }
    }

    pub fn press(&mut self, task_id: TaskId, at: Position, card: Rect) {
        self.active = None;
        self.pending = Some(PendingPress {
            task_id,
            origin: at,
            card,
        });
    }

    pub fn drag_to(&mut self, at: Position) -> SensorEvent {
        if let Some(active) = self.active.as_mut() {
            active.position = at;
            return SensorEvent::Moved;
        }
        let Some(pending) = self.pending.as_ref() else {
            return SensorEvent::Idle;
        };
        let distance = at
            .x
            .abs_diff(pending.origin.x)
            .max(at.y.abs_diff(pending.origin.y));
        if distance < self.activation_distance {
            return SensorEvent::Idle;
        }
        let grab_offset = (
            pending.origin.x.saturating_sub(pending.card.x),
            pending.origin.y.saturating_sub(pending.card.y),
        );
        self.active = Some(ActivePointer {
            position: at,
            grab_offset,
            size: (pending.card.width, pending.card.height),
        });
        self.pending
            .take()
            .map(|p| SensorEvent::Activated(p.task_id))
            .unwrap_or(SensorEvent::Idle)
    }

    /// Button released. Returns the press when it never became a drag (a click).
    pub fn release(&mut self) -> Option<PendingPress> {
        self.active = None;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.pending = None;
    }

    pub fn active(&self) -> Option<&ActivePointer> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn closest_corners_prefers_overlapping_card() {
        let candidates = vec![
            (DropTarget::Day(DayId(Weekday::Mon)), Rect::new(0, 0, 20, 30)),
            (DropTarget::Task(TaskId::from("a")), Rect::new(1, 2, 18, 6)),
            (DropTarget::Task(TaskId::from("b")), Rect::new(1, 8, 18, 6)),
        ];
        let dragged = Rect::new(2, 9, 18, 6);
        assert_eq!(
            closest_corners(dragged, &candidates),
            Some(DropTarget::Task(TaskId::from("b")))
        );
        assert_eq!(closest_corners(dragged, &[]), None);
    }

    #[test]
    fn closest_corners_falls_back_to_empty_column() {
        let candidates = vec![
            (DropTarget::Day(DayId(Weekday::Mon)), Rect::new(0, 0, 20, 30)),
            (DropTarget::Task(TaskId::from("a")), Rect::new(1, 2, 18, 6)),
            (DropTarget::Day(DayId(Weekday::Tue)), Rect::new(20, 0, 20, 30)),
        ];
        let dragged = Rect::new(21, 12, 18, 6);
        assert_eq!(
            closest_corners(dragged, &candidates),
            Some(DropTarget::Day(DayId(Weekday::Tue)))
        );
    }

    #[test]
    fn press_without_movement_is_a_click() {
        let mut sensor = PointerSensor::new(1);
        sensor.press(TaskId::from("a"), Position::new(5, 5), Rect::new(1, 2, 18, 6));
        assert_eq!(sensor.drag_to(Position::new(5, 5)), SensorEvent::Idle);
        let click = sensor.release().unwrap();
        assert_eq!(click.task_id, TaskId::from("a"));
        assert!(sensor.active().is_none());
    }

    #[test]
    fn drag_activates_after_threshold() {
        let mut sensor = PointerSensor::new(2);
        sensor.press(TaskId::from("a"), Position::new(5, 5), Rect::new(1, 2, 18, 6));
        assert_eq!(sensor.drag_to(Position::new(6, 5)), SensorEvent::Idle);
        assert_eq!(
            sensor.drag_to(Position::new(7, 6)),
            SensorEvent::Activated(TaskId::from("a"))
        );
        assert_eq!(sensor.drag_to(Position::new(10, 8)), SensorEvent::Moved);
        let active = sensor.active().unwrap();
        assert_eq!(active.rect(), Rect::new(6, 5, 18, 6));
        assert!(sensor.release().is_none());
    }

    #[test]
    fn cancel_drops_pending_and_active_drag() {
        let mut sensor = PointerSensor::new(1);
        sensor.press(TaskId::from("a"), Position::new(5, 5), Rect::new(1, 2, 18, 6));
        sensor.drag_to(Position::new(8, 5));
        assert!(sensor.active().is_some());
        sensor.cancel();
        assert!(sensor.active().is_none());
        assert!(sensor.release().is_none());
        assert_eq!(sensor.drag_to(Position::new(9, 9)), SensorEvent::Idle);
    }

    #[test]
    fn hit_map_resolves_positions() {
        let mut map = HitMap::default();
        map.columns.push((DayId(Weekday::Wed), Rect::new(0, 0, 10, 10)));
        map.cards.push((TaskId::from("x"), Rect::new(1, 1, 8, 4)));
        map.toggles.push((TaskId::from("x"), Rect::new(2, 2, 3, 1)));
        map.add_buttons.push((DayId(Weekday::Wed), Rect::new(1, 8, 8, 1)));

        assert_eq!(map.toggle_at(Position::new(3, 2)), Some(&TaskId::from("x")));
        assert_eq!(map.card_at(Position::new(7, 3)).map(|(id, _)| id.clone()), Some(TaskId::from("x")));
        assert_eq!(map.add_button_at(Position::new(4, 8)), Some(DayId(Weekday::Wed)));
        assert_eq!(map.column_at(Position::new(0, 9)), Some(DayId(Weekday::Wed)));
        assert!(map.card_at(Position::new(0, 9)).is_none());
        assert_eq!(map.drop_candidates().len(), 2);
        map.clear();
        assert!(map.drop_candidates().is_empty());
    }
}
