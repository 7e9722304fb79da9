use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::compose::CopyTarget;
use crate::ops::reduce::Event;
use crate::tui::app::{App, Field};

use super::edit::begin_edit;

/// Index into `time.adjust_steps` for each pair of adjustment keys
fn adjust_key(c: char) -> Option<(usize, i32)> {
    match c {
        '+' | '=' => Some((0, 1)),
        '-' => Some((0, -1)),
        ']' => Some((1, 1)),
        '[' => Some((1, -1)),
        '}' => Some((2, 1)),
        '{' => Some((2, -1)),
        _ => None,
    }
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let count = app.fields.len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => app.focus = (app.focus + 1).min(count - 1),
        KeyCode::Char('k') | KeyCode::Up => app.focus = app.focus.saturating_sub(1),
        KeyCode::Tab => app.focus = (app.focus + 1) % count,
        KeyCode::BackTab => app.focus = (app.focus + count - 1) % count,
        KeyCode::Char('g') | KeyCode::Home => app.focus = 0,
        KeyCode::Char('G') | KeyCode::End => app.focus = count - 1,

        KeyCode::Enter | KeyCode::Char('i') => begin_edit(app),

        KeyCode::Char('y') => app.copy(CopyTarget::Message),
        KeyCode::Char('t') => app.copy(CopyTarget::Todo),

        KeyCode::Char('s') => {
            let now = app.now();
            app.dispatch(Event::StartSetToNow(now));
        }
        KeyCode::Char('e') => {
            let now = app.now();
            app.dispatch(Event::EndSetToNow(now));
        }

        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as u8 - b'1') as usize;
            if let Some(&minutes) = app.config.time.sorted_presets().get(index) {
                let now = app.now();
                app.dispatch(Event::PresetApplied { now, minutes });
            }
        }

        KeyCode::Char(c) => {
            if let Some((step_index, sign)) = adjust_key(c)
                && let Some(&step) = app.config.time.adjust_steps.get(step_index)
            {
                adjust_focused(app, sign * step as i32);
            }
        }
        _ => {}
    }
}

/// Shift the focused endpoint; task fields shift the start
fn adjust_focused(app: &mut App, delta: i32) {
    let event = match app.focused() {
        Field::End => Event::EndAdjusted(delta),
        Field::Start | Field::Task(_) => Event::StartAdjusted(delta),
    };
    app.dispatch(event);
}
