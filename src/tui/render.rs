use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::i18n::Text;
use crate::tui::app::{App, Mode};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    color::parse_color,
    day_column::{ColumnView, render_day_column},
    form::render_task_dialog,
    help::render_help,
    stats_panel::render_stats_panels,
    status_bar::render_status_bar,
    tabs::render_view_tabs,
    task_card::{CardState, render_task_card},
};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let locale = app.locale;

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(locale.text(Text::AppTitle))
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    let stats = app.stats();
    render_stats_panels(f, layout.stats_area, &stats, locale, &active_theme);
    render_view_tabs(f, layout.tabs_area, app.ui.view, locale, &active_theme);

    // the hit map is rebuilt from scratch every frame
    app.hit_map.clear();
    let days: Vec<_> = app.board.visible_days(app.ui.view).collect();
    let columns = layout.columns(days.len());
    for (idx, (day, rect)) in days.iter().copied().zip(columns.iter()).enumerate() {
        let view = ColumnView {
            day,
            focused: idx == app.ui.focused_column,
            is_today: day.date == app.today,
            selected: app.ui.selected.as_ref(),
            dragging: app.drag.active_id(),
            hover: app.drag_ui.hover.as_ref(),
            locale,
            theme: &active_theme,
        };
        render_day_column(f, *rect, &view, &mut app.hit_map);
    }

    // floating copy of the dragged card under the pointer
    if let (Some(pointer), Some(task)) = (app.pointer.active(), app.drag.active_task(&app.board)) {
        let rect = pointer.rect().intersection(layout.inner_area);
        if !rect.is_empty() {
            let state = CardState {
                overlay: true,
                ..CardState::default()
            };
            render_task_card(f, rect, task, locale, &active_theme, state);
        }
    }

    if app.ui.mode == Mode::Dialog {
        if let Some(dialog) = app.dialog.as_ref() {
            render_task_dialog(f, f.area(), dialog, locale, &app.config);
        }
    }

    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.notice.as_ref(),
        &key_hints,
        &active_theme,
    );
}

pub fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&kb.help))],
        Mode::Dialog => vec![
            "Tab: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            "←/→: Change option".to_string(),
            format!("{}: Save", key(&kb.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::Board if app.drag.is_dragging() => vec![
            format!("{}: {}", app.locale.text(Text::Dragging), drag_label(app)),
            "Arrows: Move".to_string(),
            format!("{}: Drop", key(&kb.select)),
            "Esc: Cancel".to_string(),
        ],
        Mode::Board => vec![
            format!("{}: Quit", key(&kb.quit)),
            format!("{}: New", key(&kb.new)),
            format!("{}: Edit", key(&kb.edit)),
            format!("{}: Done", key(&kb.toggle_complete)),
            format!("{}: Move", key(&kb.pick_up)),
            format!("{}: Weekdays/Weekend", key(&kb.toggle_view)),
            format!("{}: Theme", key(&kb.cycle_theme)),
            format!("{}: Help", key(&kb.help)),
        ],
    }
}

fn drag_label(app: &App) -> String {
    app.drag
        .active_task(&app.board)
        .map(|t| t.title.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::sample::sample_board;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_board_and_fills_hit_map() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let mut app = App::new(Config::default(), sample_board(monday), monday);
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|f| {
                let layout = Layout::calculate(Rect::new(0, 0, 140, 40));
                render(f, &mut app, &layout);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Study Schedule"));
        assert!(text.contains("Monday"));
        assert!(text.contains("Friday"));
        assert!(!text.contains("Saturday"));
        assert_eq!(app.hit_map.columns.len(), 5);
        assert_eq!(app.hit_map.cards.len(), 4);
        assert_eq!(app.hit_map.add_buttons.len(), 5);
    }

    #[test]
    fn hints_follow_mode() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let mut app = App::new(Config::default(), sample_board(monday), monday);
        assert!(get_key_hints(&app).contains(&"m: Move".to_string()));
        app.pick_up();
        assert!(get_key_hints(&app)[0].starts_with("Dragging: Resolver"));
        app.cancel_drag();
        app.toggle_help();
        assert_eq!(get_key_hints(&app), vec!["Esc or F1: Exit help".to_string()]);
    }
}
