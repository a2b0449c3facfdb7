use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::layout::popup_area;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Board:\n");
    text.push_str(&format!(
        "  {} / {} or ←/→: Focus previous/next day\n",
        key(&kb.column_left),
        key(&kb.column_right)
    ));
    text.push_str(&format!(
        "  {} / {} or ↑/↓: Select card\n",
        key(&kb.list_up),
        key(&kb.list_down)
    ));
    text.push_str(&format!("  {}: Toggle complete\n", key(&kb.toggle_complete)));
    text.push_str(&format!("  {}: New task in focused day\n", key(&kb.new)));
    text.push_str(&format!(
        "  {} / {}: Edit selected task\n",
        key(&kb.edit),
        key(&kb.select)
    ));
    text.push_str(&format!("  {}: Switch weekdays/weekend\n", key(&kb.toggle_view)));
    text.push_str(&format!("  {}: Next theme\n", key(&kb.cycle_theme)));
    text.push('\n');

    text.push_str("Moving cards:\n");
    text.push_str(&format!("  {}: Pick up selected card\n", key(&kb.pick_up)));
    text.push_str("  Arrows: Move over cards and days\n");
    text.push_str(&format!("  {}: Drop\n", key(&kb.select)));
    text.push_str("  Esc: Cancel\n");
    text.push_str("  Mouse: drag a card onto another card or day\n");
    text.push('\n');

    text.push_str("Task dialog:\n");
    text.push_str("  Tab / Shift+Tab: Next/previous field\n");
    text.push_str("  ←/→ or ↑/↓: Change subject, priority, duration\n");
    text.push_str(&format!("  {}: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));

    text
}
