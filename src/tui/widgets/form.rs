use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::i18n::{Locale, Text};
use crate::tui::dialog::{DialogField, DialogMode, TaskDialog};
use crate::tui::layout::popup_area;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color, priority_color, subject_color};
use crate::tui::widgets::editor::Editor;

/// Wrap a line at word boundaries. Returns each wrapped piece with the
/// character offset where it starts in the original line.
fn wrap_line_with_offsets(line: &str, width: usize) -> Vec<(usize, String)> {
    let chars: Vec<char> = line.chars().collect();
    if width == 0 || chars.len() <= width {
        return vec![(0, line.to_string())];
    }

    let mut wrapped = Vec::new();
    let mut offset = 0;
    while offset < chars.len() {
        if chars.len() - offset <= width {
            wrapped.push((offset, chars[offset..].iter().collect()));
            break;
        }
        // break after the last space inside the window, or hard-break
        let window = &chars[offset..offset + width];
        let take = window
            .iter()
            .rposition(|c| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(width);
        wrapped.push((offset, chars[offset..offset + take].iter().collect()));
        offset += take;
    }
    wrapped
}

/// Wrapped rows of a multi-line editor plus the cursor's (row, column)
fn wrap_editor(editor: &Editor, width: usize) -> (Vec<String>, (usize, usize)) {
    let mut rows = Vec::new();
    let mut cursor = (0, 0);
    for (line_idx, line) in editor.lines.iter().enumerate() {
        let pieces = wrap_line_with_offsets(line, width);
        let count = pieces.len();
        for (piece_idx, (offset, piece)) in pieces.into_iter().enumerate() {
            let piece_len = piece.chars().count();
            let is_last = piece_idx + 1 == count;
            if line_idx == editor.cursor_line
                && editor.cursor_col >= offset
                && (editor.cursor_col < offset + piece_len || is_last)
            {
                cursor = (rows.len(), editor.cursor_col - offset);
            }
            rows.push(piece);
        }
    }
    (rows, cursor)
}

/// Visible slice of a single-line editor and the cursor column inside it
fn scroll_single_line(editor: &Editor, width: usize) -> (String, usize) {
    let line = editor.lines.first().map(String::as_str).unwrap_or("");
    let col = editor.cursor_col;
    let scroll = if width == 0 || col < width { 0 } else { col + 1 - width };
    let visible: String = line.chars().skip(scroll).take(width).collect();
    (visible, col - scroll)
}

pub fn render_task_dialog(f: &mut Frame, area: Rect, dialog: &TaskDialog, locale: Locale, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };
    let highlight_style = Style::default().bg(highlight_bg).fg(highlight_fg);
    let inactive_field_style = Style::default().fg(fg_color).add_modifier(Modifier::DIM);
    let base = Style::default().fg(fg_color).bg(bg_color);

    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);

    let title = match &dialog.mode {
        DialogMode::Create { day } => {
            format!(" {} · {} ", locale.text(Text::NewTask), locale.day_name(*day))
        }
        DialogMode::Edit { .. } => format!(" {} ", locale.text(Text::EditTask)),
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(base);
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    if inner.width < 4 || inner.height < 5 {
        return;
    }

    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Subject
            Constraint::Length(3), // Duration
            Constraint::Length(3), // Priority
            Constraint::Min(3),    // Description
        ])
        .split(inner);

    let style_for = |field: DialogField| {
        if dialog.current_field == field {
            highlight_style
        } else {
            inactive_field_style
        }
    };
    let field_block = |label: &'static str| Block::default().borders(Borders::ALL).title(label);

    // single-line text fields
    for (field, editor, label, rect) in [
        (DialogField::Title, &dialog.title, Text::Title, field_areas[0]),
        (DialogField::Duration, &dialog.duration, Text::Duration, field_areas[2]),
    ] {
        let width = rect.width.saturating_sub(2) as usize;
        let (visible, cursor_col) = scroll_single_line(editor, width);
        f.render_widget(
            Paragraph::new(visible)
                .style(style_for(field))
                .block(field_block(locale.text(label))),
            rect,
        );
        if dialog.current_field == field {
            f.set_cursor_position(Position::new(rect.x + 1 + cursor_col as u16, rect.y + 1));
        }
    }

    // select fields render as "< value >" in the option's color
    let select_line = |value: &str, color| {
        Line::from(vec![
            Span::raw("< "),
            Span::styled(value.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(" >"),
        ])
    };
    f.render_widget(
        Paragraph::new(select_line(locale.subject(dialog.subject), subject_color(dialog.subject)))
            .style(style_for(DialogField::Subject))
            .block(field_block(locale.text(Text::Subject))),
        field_areas[1],
    );
    f.render_widget(
        Paragraph::new(select_line(locale.priority(dialog.priority), priority_color(dialog.priority)))
            .style(style_for(DialogField::Priority))
            .block(field_block(locale.text(Text::Priority))),
        field_areas[3],
    );

    // description: wrapped, scrolled to keep the cursor row visible
    let desc_area = field_areas[4];
    let content_width = desc_area.width.saturating_sub(2) as usize;
    let content_height = desc_area.height.saturating_sub(2) as usize;
    let (rows, (cursor_row, cursor_col)) = wrap_editor(&dialog.description, content_width);
    let scroll = if content_height == 0 || cursor_row < content_height {
        0
    } else {
        cursor_row + 1 - content_height
    };
    let lines: Vec<Line> = rows
        .into_iter()
        .skip(scroll)
        .take(content_height)
        .map(Line::from)
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .style(style_for(DialogField::Description))
            .block(field_block(locale.text(Text::Description))),
        desc_area,
    );
    if dialog.current_field == DialogField::Description && content_height > 0 {
        f.set_cursor_position(Position::new(
            desc_area.x + 1 + cursor_col.min(content_width) as u16,
            desc_area.y + 1 + (cursor_row - scroll) as u16,
        ));
    }
}
