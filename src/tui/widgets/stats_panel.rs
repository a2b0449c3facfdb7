use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::config::Theme;
use crate::i18n::{Locale, Text};
use crate::stats::{BoardStats, display_percent, format_minutes, format_subject_counts};
use crate::tui::widgets::color::parse_color;

/// Progress, total time and subject breakdown, side by side
pub fn render_stats_panels(
    f: &mut Frame,
    area: Rect,
    stats: &BoardStats,
    locale: Locale,
    theme: &Theme,
) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let base = Style::default().fg(fg_color).bg(bg_color);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(26),
            Constraint::Percentage(40),
        ])
        .split(area);

    render_progress(f, panels[0], stats, locale, theme);

    let time_block = panel_block(locale.text(Text::TotalTime), base);
    let time_lines = vec![
        Line::from(vec![
            Span::raw(format!("{}: ", locale.text(Text::Today))),
            Span::styled(
                format_minutes(stats.today.minutes),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("{}: ", locale.text(Text::WholeWeek))),
            Span::styled(
                format_minutes(stats.total_minutes),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(time_lines).block(time_block).style(base), panels[1]);

    let subjects_block = panel_block(locale.text(Text::Subjects), base);
    let inner = subjects_block.inner(panels[2]);
    f.render_widget(subjects_block, panels[2]);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    for (rect, label, counts) in [
        (halves[0], Text::Today, &stats.today_subjects),
        (halves[1], Text::WholeWeek, &stats.weekly_subjects),
    ] {
        let mut lines = vec![Line::from(Span::styled(
            locale.text(label),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))];
        lines.extend(format_subject_counts(counts, locale).into_iter().map(Line::from));
        f.render_widget(Paragraph::new(lines).style(base), rect);
    }
}

fn panel_block(title: &str, style: Style) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(style)
}

fn render_progress(f: &mut Frame, area: Rect, stats: &BoardStats, locale: Locale, theme: &Theme) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let progress_color = parse_color(&theme.progress);
    let base = Style::default().fg(fg_color).bg(bg_color);

    let block = panel_block(locale.text(Text::Progress), base);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    let entries = [
        (
            Text::Today,
            stats.today.completed,
            stats.today.tasks,
            stats.today_percent(),
        ),
        (
            Text::Week,
            stats.completed_tasks,
            stats.total_tasks,
            stats.weekly_percent(),
        ),
    ];
    for (i, (label, done, total, percent)) in entries.into_iter().enumerate() {
        let label_line = Paragraph::new(format!("{}: {}/{}", locale.text(label), done, total)).style(base);
        f.render_widget(label_line, rows[i * 2]);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(progress_color).bg(bg_color))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{}%", display_percent(percent)))
            .use_unicode(true);
        f.render_widget(gauge, rows[i * 2 + 1]);
    }
}
