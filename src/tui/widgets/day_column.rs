use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::config::Theme;
use crate::drag::DropTarget;
use crate::i18n::{Locale, Text};
use crate::models::{Day, TaskId};
use crate::stats::display_percent;
use crate::tui::pointer::HitMap;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::task_card::{CardState, card_height, render_task_card};
use crate::utils::truncate_with_ellipsis;

/// Everything a column needs to know about the surrounding UI state
pub struct ColumnView<'a> {
    pub day: &'a Day,
    pub focused: bool,
    pub is_today: bool,
    pub selected: Option<&'a TaskId>,
    pub dragging: Option<&'a TaskId>,
    pub hover: Option<&'a DropTarget>,
    pub locale: Locale,
    pub theme: &'a Theme,
}

/// First card index to draw so the selected card fits in `available` rows
fn first_visible(view: &ColumnView, available: u16) -> usize {
    let Some(selected) = view.selected.and_then(|id| view.day.position(id)) else {
        return 0;
    };
    let mut start = 0;
    loop {
        let used: u16 = view.day.tasks[start..=selected]
            .iter()
            .map(card_height)
            .sum();
        if used <= available || start == selected {
            return start;
        }
        start += 1;
    }
}

pub fn render_day_column(f: &mut Frame, area: Rect, view: &ColumnView, hit_map: &mut HitMap) {
    let fg_color = parse_color(&view.theme.fg);
    let bg_color = parse_color(&view.theme.bg);
    let highlight_bg = parse_color(&view.theme.highlight_bg);
    let progress_color = parse_color(&view.theme.progress);
    let day = view.day;

    hit_map.columns.push((day.id, area));

    let column_hovered = view.hover == Some(&DropTarget::Day(day.id));
    let (border_style, border_type) = if column_hovered {
        (Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD), BorderType::Double)
    } else if view.focused {
        (Style::default().fg(highlight_bg), BorderType::Thick)
    } else {
        (Style::default().fg(fg_color), BorderType::Plain)
    };

    let mut title_style = Style::default().fg(fg_color).add_modifier(Modifier::BOLD);
    if view.is_today {
        title_style = title_style.add_modifier(Modifier::UNDERLINED);
    }
    let title = format!(
        " {} · {} ",
        view.locale.day_name(day.id),
        view.locale.short_date(day.date)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(
            truncate_with_ellipsis(&title, area.width.saturating_sub(2) as usize),
            title_style,
        ))
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 3 || inner.width < 4 {
        return;
    }

    // header: "1/2 done" and a progress gauge
    let completed = day.completed_count();
    let total = day.tasks.len();
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}/{} {}", completed, total, view.locale.text(Text::Done)),
            Style::default().fg(fg_color),
        ),
    ]));
    f.render_widget(summary, Rect::new(inner.x, inner.y, inner.width, 1));

    let percent = day.progress_percent();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(progress_color).bg(bg_color))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", display_percent(percent)))
        .use_unicode(true);
    f.render_widget(gauge, Rect::new(inner.x, inner.y + 1, inner.width, 1));

    // cards, then the add-task row on the last line
    let add_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let cards_top = inner.y + 2;
    let cards_bottom = add_row.y;
    let available = cards_bottom.saturating_sub(cards_top);

    if day.tasks.is_empty() {
        let empty = Paragraph::new(Span::styled(
            view.locale.text(Text::NoTasks),
            Style::default().fg(fg_color).add_modifier(Modifier::DIM | Modifier::ITALIC),
        ));
        if available > 0 {
            f.render_widget(empty, Rect::new(inner.x, cards_top, inner.width, 1));
        }
    }

    let mut y = cards_top;
    for task in day.tasks.iter().skip(first_visible(view, available)) {
        let height = card_height(task);
        if y + height > cards_bottom {
            break;
        }
        let rect = Rect::new(inner.x, y, inner.width, height);
        let state = CardState {
            selected: view.selected == Some(&task.id),
            hovered: view.dragging.is_some()
                && view.dragging != Some(&task.id)
                && view.hover == Some(&DropTarget::Task(task.id.clone())),
            placeholder: view.dragging == Some(&task.id),
            overlay: false,
        };
        let glyph = render_task_card(f, rect, task, view.locale, view.theme, state);
        hit_map.cards.push((task.id.clone(), rect));
        hit_map.toggles.push((task.id.clone(), glyph));
        y += height;
    }

    let add_style = if view.focused {
        Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg_color).add_modifier(Modifier::DIM)
    };
    f.render_widget(
        Paragraph::new(Span::styled(view.locale.text(Text::AddTask), add_style)),
        add_row,
    );
    hit_map.add_buttons.push((day.id, add_row));
}
