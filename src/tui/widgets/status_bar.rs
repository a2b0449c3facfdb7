use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::i18n::Notice;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils::truncate_with_ellipsis;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`, ending with "..." when some are dropped
pub fn fit_key_hints(key_hints: &[String], max_width: usize) -> String {
    let separator_len = SEPARATOR.chars().count();
    let mut hints_text = String::new();

    for (i, hint) in key_hints.iter().enumerate() {
        let current_len = hints_text.chars().count();
        let would_be_len = if i == 0 {
            hint.chars().count()
        } else {
            current_len + separator_len + hint.chars().count()
        };

        if would_be_len > max_width {
            if i == 0 {
                return truncate_with_ellipsis(hint, max_width);
            }
            if current_len + ELLIPSIS.len() <= max_width {
                hints_text.push_str(ELLIPSIS);
            } else {
                hints_text = truncate_with_ellipsis(&hints_text, max_width);
            }
            break;
        }

        if i > 0 {
            hints_text.push_str(SEPARATOR);
        }
        hints_text.push_str(hint);
    }
    hints_text
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    notice: Option<&Notice>,
    key_hints: &[String],
    theme: &Theme,
) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let max_width = area.width as usize;

    let (content, style) = match notice {
        // notices get the highlight background
        Some(notice) => (
            truncate_with_ellipsis(&notice.text(), max_width),
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            fit_key_hints(key_hints, max_width),
            Style::default().fg(fg_color).bg(bg_color),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["q: Quit".to_string(), "n: New".to_string(), "e: Edit".to_string()]
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_key_hints(&hints(), 80), "q: Quit • n: New • e: Edit");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        assert_eq!(fit_key_hints(&hints(), 20), "q: Quit • n: New...");
        assert_eq!(fit_key_hints(&hints(), 5), "q:...");
    }
}
