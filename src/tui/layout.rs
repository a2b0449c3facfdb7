use ratatui::layout::{Constraint, Direction, Flex, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub stats_area: Rect,
    pub tabs_area: Rect,
    pub board_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application.
    /// Width fits five 14-column day columns; height fits the stat panels,
    /// the tabs, one card and the status bar.
    pub const MIN_WIDTH: u16 = 70;
    pub const MIN_HEIGHT: u16 = 20;

    /// Height of the stat panel row (borders included)
    pub const STATS_HEIGHT: u16 = 6;

    pub fn calculate(size: Rect) -> Self {
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::STATS_HEIGHT), // Stat panels
                Constraint::Length(1),                  // View tabs
                Constraint::Min(1),                     // Day columns
                Constraint::Length(1),                  // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            stats_area: vertical[0],
            tabs_area: vertical[1],
            board_area: vertical[2],
            status_area: vertical[3],
        }
    }

    /// Split the board area into `count` equal-width day columns
    pub fn columns(&self, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(self.board_area)
            .to_vec()
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = RatLayout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = RatLayout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
