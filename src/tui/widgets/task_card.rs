use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::config::Theme;
use crate::i18n::Locale;
use crate::models::Task;
use crate::tui::widgets::color::{parse_color, priority_color, subject_color};
use crate::utils::truncate_with_ellipsis;

/// Width of the completion glyph, "[x]"
pub const GLYPH_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub selected: bool,
    /// Hovered as a drop target
    pub hovered: bool,
    /// Original slot of the card being dragged; drawn dimmed
    pub placeholder: bool,
    /// Floating copy under the pointer
    pub overlay: bool,
}

/// Rows a card occupies, borders included
pub fn card_height(task: &Task) -> u16 {
    let description = if task.description.is_some() { 1 } else { 0 };
    // glyph+subject, title, meta, bar
    2 + 4 + description
}

/// Draw one task card. Returns the rect of the completion glyph.
pub fn render_task_card(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    locale: Locale,
    theme: &Theme,
    state: CardState,
) -> Rect {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let accent = subject_color(task.subject);

    let (border_style, border_type) = if state.overlay {
        (Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD), BorderType::Double)
    } else if state.hovered {
        (Style::default().fg(highlight_bg), BorderType::Double)
    } else if state.selected {
        (Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD), BorderType::Thick)
    } else {
        (Style::default().fg(accent), BorderType::Rounded)
    };

    let mut base = Style::default().fg(fg_color).bg(bg_color);
    if state.placeholder {
        base = base.add_modifier(Modifier::DIM);
    }

    if state.overlay {
        f.render_widget(Clear, area);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(if state.placeholder { border_style.add_modifier(Modifier::DIM) } else { border_style })
        .style(base);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let glyph = if task.completed { "[x]" } else { "[ ]" };
    let glyph_style = if task.completed {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg_color)
    };

    let mut title_style = Style::default().fg(fg_color).add_modifier(Modifier::BOLD);
    if task.completed {
        title_style = title_style
            .remove_modifier(Modifier::BOLD)
            .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(glyph, glyph_style),
            Span::raw(" "),
            Span::styled(
                truncate_with_ellipsis(locale.subject(task.subject), width.saturating_sub(4)),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(truncate_with_ellipsis(&task.title, width), title_style)),
    ];
    if let Some(description) = task.description.as_deref() {
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(description, width),
            Style::default().fg(fg_color).add_modifier(Modifier::ITALIC | Modifier::DIM),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{}min", task.duration), Style::default().fg(fg_color)),
        Span::raw("  "),
        Span::styled(
            format!("● {}", locale.priority(task.priority)),
            Style::default().fg(priority_color(task.priority)),
        ),
    ]));
    // thin completion bar along the bottom
    let bar_color = if task.completed { Color::Green } else { Color::DarkGray };
    lines.push(Line::from(Span::styled(
        "━".repeat(width),
        Style::default().fg(bar_color),
    )));

    f.render_widget(Paragraph::new(lines).style(base), inner);

    Rect::new(inner.x, inner.y, GLYPH_WIDTH.min(inner.width), inner.height.min(1))
}
