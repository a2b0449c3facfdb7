use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::tui::App;
use crate::tui::app::Mode;
use crate::tui::dialog::DialogField;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{matches_key_event, parse_key_binding};

/// Restores the terminal when dropped, including on panic
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // errors are ignored here, we are already cleaning up
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // checked before entering the alternate screen so the message stays visible
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    info!(width, height, "board opened");

    loop {
        app.check_status_message_timeout();

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Press only, Windows also reports releases
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut app, key_event)? {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(&mut app, mouse_event),
                // the next draw picks up the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    info!("board closed");
    guard.restore()?;

    Ok(())
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let pos = Position::new(mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(pos),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(pos),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(pos),
        _ => {}
    }
}

/// Returns true when the user asked to quit
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match app.ui.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Dialog => handle_dialog_mode(app, key_event),
        Mode::Board if app.drag.is_dragging() => handle_drag_mode(app, key_event),
        Mode::Board => handle_board_mode(app, key_event),
    }
}

fn binding_pressed(binding: &str, key_event: KeyEvent) -> Result<bool, TuiError> {
    let parsed = parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    Ok(matches_key_event(key_event, &parsed))
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || binding_pressed(&app.config.key_bindings.help, key_event)? {
        app.toggle_help();
    }
    Ok(false)
}

fn handle_dialog_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if binding_pressed(&app.config.key_bindings.save, key_event)? {
        app.save_dialog();
        return Ok(false);
    }

    let Some(dialog) = app.dialog.as_mut() else {
        app.close_dialog();
        return Ok(false);
    };
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let in_description = dialog.current_field == DialogField::Description;

    match key_event.code {
        KeyCode::Esc => {
            debug!("task dialog cancelled");
            app.close_dialog();
        }
        KeyCode::Tab if key_event.modifiers.contains(KeyModifiers::SHIFT) => dialog.previous_field(),
        KeyCode::Tab => dialog.next_field(),
        KeyCode::BackTab => dialog.previous_field(),
        KeyCode::Left | KeyCode::Right => {
            let forward = key_event.code == KeyCode::Right;
            if !dialog.adjust(forward) {
                if let Some(editor) = dialog.current_editor_mut() {
                    match (forward, ctrl) {
                        (true, true) => editor.move_cursor_word_right(),
                        (true, false) => editor.move_cursor_right(),
                        (false, true) => editor.move_cursor_word_left(),
                        (false, false) => editor.move_cursor_left(),
                    }
                }
            }
        }
        KeyCode::Up | KeyCode::Down => {
            let up = key_event.code == KeyCode::Up;
            if in_description {
                if up {
                    dialog.description.move_cursor_up();
                } else {
                    dialog.description.move_cursor_down();
                }
            } else {
                dialog.adjust(up);
            }
        }
        KeyCode::Enter if in_description => dialog.description.insert_newline(),
        KeyCode::Enter => dialog.next_field(),
        KeyCode::Backspace => {
            if let Some(editor) = dialog.current_editor_mut() {
                editor.delete_char();
            }
        }
        KeyCode::Delete => {
            if let Some(editor) = dialog.current_editor_mut() {
                editor.delete_forward();
            }
        }
        KeyCode::Home => {
            if let Some(editor) = dialog.current_editor_mut() {
                editor.move_cursor_home();
            }
        }
        KeyCode::End => {
            if let Some(editor) = dialog.current_editor_mut() {
                editor.move_cursor_end();
            }
        }
        KeyCode::Char(c) if !ctrl => dialog.insert_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_drag_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();
    if key_event.code == KeyCode::Esc {
        app.cancel_drag();
    } else if binding_pressed(&kb.select, key_event)? {
        app.drop_dragged();
    } else if key_event.code == KeyCode::Left || binding_pressed(&kb.column_left, key_event)? {
        app.move_hover(-1, 0);
    } else if key_event.code == KeyCode::Right || binding_pressed(&kb.column_right, key_event)? {
        app.move_hover(1, 0);
    } else if key_event.code == KeyCode::Up || binding_pressed(&kb.list_up, key_event)? {
        app.move_hover(0, -1);
    } else if key_event.code == KeyCode::Down || binding_pressed(&kb.list_down, key_event)? {
        app.move_hover(0, 1);
    }
    Ok(false)
}

fn handle_board_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if binding_pressed(&kb.quit, key_event)? {
        return Ok(true);
    }
    if key_event.code == KeyCode::Esc {
        app.clear_notice();
    } else if binding_pressed(&kb.help, key_event)? {
        app.toggle_help();
    } else if binding_pressed(&kb.new, key_event)? {
        app.open_create_in_focused();
    } else if binding_pressed(&kb.edit, key_event)? || binding_pressed(&kb.select, key_event)? {
        app.open_edit_selected();
    } else if binding_pressed(&kb.toggle_complete, key_event)? {
        app.toggle_selected();
    } else if binding_pressed(&kb.pick_up, key_event)? {
        app.pick_up();
    } else if binding_pressed(&kb.toggle_view, key_event)? {
        app.toggle_view();
    } else if binding_pressed(&kb.cycle_theme, key_event)? {
        app.cycle_theme();
    } else if key_event.code == KeyCode::Up || binding_pressed(&kb.list_up, key_event)? {
        app.move_selection(-1);
    } else if key_event.code == KeyCode::Down || binding_pressed(&kb.list_down, key_event)? {
        app.move_selection(1);
    } else if key_event.code == KeyCode::Left || binding_pressed(&kb.column_left, key_event)? {
        app.move_focus(-1);
    } else if key_event.code == KeyCode::Right || binding_pressed(&kb.column_right, key_event)? {
        app.move_focus(1);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::models::{DayId, TaskId};
    use crate::sample::sample_board;
    use chrono::{NaiveDate, Weekday};

    fn app() -> App {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        App::new(Config::default(), sample_board(monday), monday)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, key(code)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn day_ids(app: &App, day: Weekday) -> Vec<String> {
        app.board
            .day(DayId(day))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.0.clone())
            .collect()
    }

    #[test]
    fn quit_key_ends_loop() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn space_toggles_selected_card() {
        let mut app = app();
        let before = app.selected_task().unwrap().completed;
        assert!(!press(&mut app, KeyCode::Char(' ')));
        assert_eq!(app.selected_task().unwrap().completed, !before);
    }

    #[test]
    fn create_task_through_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.ui.mode, Mode::Dialog);
        type_text(&mut app, "Flashcards");
        // typing into the dialog does not trigger board bindings
        assert_eq!(app.ui.mode, Mode::Dialog);
        handle_key_event(&mut app, ctrl('s')).unwrap();
        assert_eq!(app.ui.mode, Mode::Board);
        let monday = app.board.day(DayId(Weekday::Mon)).unwrap();
        assert!(monday.tasks.iter().any(|t| t.title == "Flashcards"));
    }

    #[test]
    fn dialog_arrows_cycle_subject() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        let before = app.dialog.as_ref().unwrap().subject;
        press(&mut app, KeyCode::Right);
        assert_ne!(app.dialog.as_ref().unwrap().subject, before);
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn keyboard_drag_moves_card_to_next_day() {
        let mut app = app();
        app.select_task(&TaskId("3".to_string()));
        press(&mut app, KeyCode::Char('m'));
        assert!(app.drag.is_dragging());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(!app.drag.is_dragging());
        assert!(day_ids(&app, Weekday::Wed).contains(&"3".to_string()));
        assert!(!day_ids(&app, Weekday::Tue).contains(&"3".to_string()));
    }

    #[test]
    fn help_toggles_with_f1_and_esc() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.ui.mode, Mode::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.mode, Mode::Board);
    }

    #[test]
    fn bad_binding_is_reported() {
        let mut app = app();
        app.config.key_bindings.quit = "Hyper+q".to_string();
        assert!(matches!(
            handle_key_event(&mut app, key(KeyCode::Char('q'))),
            Err(TuiError::KeyBindingError(_))
        ));
    }

    #[test]
    fn mouse_down_on_add_button_opens_dialog() {
        let mut app = app();
        app.hit_map
            .add_buttons
            .push((DayId(Weekday::Fri), Rect::new(10, 10, 20, 1)));
        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 12,
                row: 10,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.ui.mode, Mode::Dialog);
    }
}
