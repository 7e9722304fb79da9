mod common;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use edit::{handle_edit, insert_text};
use navigate::handle_navigate;

pub use common::{cursor_line_col, offset_for_line_col};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}

/// Handle a bracketed paste event. Only active in Edit mode.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Edit || text.is_empty() {
        return;
    }
    let clean = text.replace("\r\n", "\n").replace('\r', "\n");
    insert_text(app, &clean);
}
