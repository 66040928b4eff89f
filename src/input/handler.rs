use crate::app::AppState;
use crate::domain::UiMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingItem | UiMode::EditingItem => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            false
        }

        // Toggle done
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected();
            false
        }

        // Add item
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_item();
            false
        }

        // Edit title
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_item();
            false
        }

        // Delete item
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            false
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,

        _ => false,
    }
}

/// Handle keys in input form mode (adding or editing)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.cancel_input_form(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}
