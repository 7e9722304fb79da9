use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::line_edit::{self, StructuralKey};
use crate::ops::reduce::Event;
use crate::tui::app::{App, Field, Mode};
use crate::util::unicode;

use super::common::vertical_move;

/// Longest text a time field accepts (`HH:MM:SS`)
const MAX_TIME_LEN: usize = 8;

/// Enter edit mode on the focused field, cursor at the end
pub(super) fn begin_edit(app: &mut App) {
    app.edit_buffer = app.field_text(app.focused()).to_string();
    app.edit_cursor = app.edit_buffer.len();
    app.mode = Mode::Edit;
}

/// Leave edit mode. Time fields are committed here, once, so a half-typed
/// value never runs through the gap rule.
fn finish_edit(app: &mut App) {
    if app.focused().is_time() {
        commit(app);
    }
    app.mode = Mode::Navigate;
    app.edit_buffer.clear();
    app.edit_cursor = 0;
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let field = app.focused();
    let word = key.modifiers.contains(KeyModifiers::ALT)
        || key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => finish_edit(app),
        KeyCode::Enter if field.is_time() => finish_edit(app),
        KeyCode::Enter => insert_text(app, "\n"),

        KeyCode::Tab | KeyCode::BackTab => {
            if field.is_time() {
                finish_edit(app);
                return;
            }
            let shift = key.code == KeyCode::BackTab || key.modifiers.contains(KeyModifiers::SHIFT);
            let edit =
                line_edit::on_structural_key(&app.edit_buffer, app.edit_cursor, StructuralKey::Tab, shift);
            app.edit_buffer = edit.text;
            app.edit_cursor = edit.cursor;
            commit(app);
        }

        KeyCode::Backspace => {
            let from = if word {
                unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor)
            } else {
                match unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                    Some(p) => p,
                    None => return,
                }
            };
            app.edit_buffer.replace_range(from..app.edit_cursor, "");
            app.edit_cursor = from;
            commit_live(app);
        }
        KeyCode::Delete => {
            if let Some(to) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.replace_range(app.edit_cursor..to, "");
                commit_live(app);
            }
        }

        KeyCode::Left if word => {
            app.edit_cursor = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Right if word => {
            app.edit_cursor = unicode::word_boundary_right(&app.edit_buffer, app.edit_cursor);
        }
        KeyCode::Left => {
            if let Some(p) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = p;
            }
        }
        KeyCode::Right => {
            if let Some(p) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = p;
            }
        }
        KeyCode::Home => {
            app.edit_cursor = line_edit::line_bounds(&app.edit_buffer, app.edit_cursor).0;
        }
        KeyCode::End => {
            app.edit_cursor = line_edit::line_bounds(&app.edit_buffer, app.edit_cursor).1;
        }
        KeyCode::Up => app.edit_cursor = vertical_move(&app.edit_buffer, app.edit_cursor, -1),
        KeyCode::Down => app.edit_cursor = vertical_move(&app.edit_buffer, app.edit_cursor, 1),

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut buf = [0u8; 4];
            insert_text(app, c.encode_utf8(&mut buf));
        }
        _ => {}
    }
}

/// Insert text at the cursor. Time fields keep only digits and colons.
pub(super) fn insert_text(app: &mut App, text: &str) {
    let text: String = if app.focused().is_time() {
        let room = MAX_TIME_LEN.saturating_sub(app.edit_buffer.len());
        text.chars()
            .filter(|c| c.is_ascii_digit() || *c == ':')
            .take(room)
            .collect()
    } else {
        text.to_string()
    };
    if text.is_empty() {
        return;
    }
    app.edit_buffer.insert_str(app.edit_cursor, &text);
    app.edit_cursor += text.len();
    commit_live(app);
}

/// Task fields follow every keystroke; time fields wait for `finish_edit`
fn commit_live(app: &mut App) {
    if !app.focused().is_time() {
        commit(app);
    }
}

/// Push the edit buffer into the session
fn commit(app: &mut App) {
    let text = app.edit_buffer.clone();
    let event = match app.focused() {
        Field::Start => Event::StartEdited(text),
        Field::End => Event::EndEdited(text),
        Field::Task(role) => Event::TaskEdited { role, text },
    };
    app.dispatch(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::Role;
    use crate::tui::app::test_support::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            handle_edit(app, key(code));
        }
    }

    fn editing(field_index: usize) -> App {
        let mut app = app();
        app.focus = field_index;
        begin_edit(&mut app);
        app
    }

    #[test]
    fn typing_updates_session_live() {
        let mut app = editing(4);
        type_str(&mut app, "write\nreview");
        assert_eq!(app.session.tasks.get(Role::Next), "write\nreview");
        assert_eq!(app.edit_cursor, app.edit_buffer.len());
    }

    #[test]
    fn tab_indents_current_line() {
        let mut app = editing(2);
        type_str(&mut app, "- a\n- item");
        handle_edit(&mut app, key(KeyCode::Tab));
        assert_eq!(app.session.tasks.must, "- a\n  - item");
        assert_eq!(app.edit_cursor, "- a\n  - ".len());

        handle_edit(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.session.tasks.must, "- a\n- item");
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn tab_adds_marker_to_plain_line() {
        let mut app = editing(3);
        type_str(&mut app, "item");
        handle_edit(&mut app, key(KeyCode::Tab));
        assert_eq!(app.session.tasks.have_to, "  - item");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut app = editing(4);
        type_str(&mut app, "日本");
        handle_edit(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.session.tasks.next, "日");
        handle_edit(&mut app, key(KeyCode::Left));
        assert_eq!(app.edit_cursor, 0);
        handle_edit(&mut app, key(KeyCode::Delete));
        assert_eq!(app.session.tasks.next, "");
    }

    #[test]
    fn home_and_end_stay_on_current_line() {
        let mut app = editing(4);
        type_str(&mut app, "ab\ncd");
        handle_edit(&mut app, key(KeyCode::Home));
        assert_eq!(app.edit_cursor, 3);
        handle_edit(&mut app, key(KeyCode::Up));
        assert_eq!(app.edit_cursor, 0);
        handle_edit(&mut app, key(KeyCode::End));
        assert_eq!(app.edit_cursor, 2);
    }

    #[test]
    fn time_field_filters_input() {
        let mut app = editing(0);
        // clear "09:00"
        for _ in 0..5 {
            handle_edit(&mut app, key(KeyCode::Backspace));
        }
        assert_eq!(app.edit_buffer, "");
        type_str(&mut app, "1a0:3x0");
        assert_eq!(app.edit_buffer, "10:30");
        // nothing reaches the session until the field is left
        assert_eq!(app.session.start, "09:00");

        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.session.start, "10:30");
        // end was 10:00, so it moves to 30 minutes after the new start
        assert_eq!(app.session.end, "11:00");
    }

    #[test]
    fn partial_time_is_kept_without_correction() {
        let mut app = editing(1);
        handle_edit(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.edit_buffer, "10:0");
        assert_eq!(app.session.end, "10:00");

        handle_edit(&mut app, key(KeyCode::Esc));
        assert_eq!(app.session.end, "10:0");
        assert_eq!(app.session.start, "09:00");
    }

    #[test]
    fn intermediate_time_that_parses_is_not_corrected() {
        let mut app = app();
        app.session.end = "10:30".into();
        app.focus = 1;
        begin_edit(&mut app);
        app.edit_cursor = 1;

        // "0:30" parses and is before 09:00, but the user is still typing
        handle_edit(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.edit_buffer, "0:30");
        assert_eq!(app.edit_cursor, 0);
        assert_eq!(app.session.end, "10:30");

        type_str(&mut app, "1");
        handle_edit(&mut app, key(KeyCode::Tab));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.session.end, "10:30");
        assert_eq!(app.session.start, "09:00");
    }

    #[test]
    fn leaving_time_field_applies_gap_rule() {
        let mut app = editing(1);
        for _ in 0..5 {
            handle_edit(&mut app, key(KeyCode::Backspace));
        }
        type_str(&mut app, "08:00");
        assert_eq!(app.session.end, "10:00");
        handle_edit(&mut app, key(KeyCode::Esc));
        assert_eq!(app.session.end, "09:30");
    }

    #[test]
    fn escape_leaves_edit_mode_and_keeps_text() {
        let mut app = editing(4);
        type_str(&mut app, "x");
        handle_edit(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.session.tasks.next, "x");
    }
}
