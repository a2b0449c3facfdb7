use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;

use crate::config::Theme;
use crate::i18n::{Locale, Text};
use crate::models::ViewMode;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_view_tabs(f: &mut Frame, area: Rect, view: ViewMode, locale: Locale, theme: &Theme) {
    let highlight_bg = parse_color(&theme.highlight_bg);
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let tab_bg = parse_color(&theme.tab_bg);
    let tab_fg = get_contrast_text_color(tab_bg);

    // padded labels on tab_bg read as boxes
    let titles: Vec<Line> = [Text::Weekdays, Text::Weekend]
        .into_iter()
        .map(|label| {
            Line::from(vec![
                Span::styled("  ", Style::default().bg(tab_bg)),
                Span::styled(locale.text(label), Style::default().fg(tab_fg).bg(tab_bg)),
                Span::styled("  ", Style::default().bg(tab_bg)),
            ])
        })
        .collect();

    let tab_index = match view {
        ViewMode::Weekdays => 0,
        ViewMode::Weekend => 1,
    };

    let highlight_fg = get_contrast_text_color(highlight_bg);
    let tabs = Tabs::new(titles)
        .select(tab_index)
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider("  ")
        .padding("", "");

    f.render_widget(tabs, area);
}
