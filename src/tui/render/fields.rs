use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Field, Mode};
use crate::tui::input::cursor_line_col;
use crate::util::unicode;

/// Width of the "start"/"end" label column
const TIME_LABEL_WIDTH: usize = 7;

/// Render the time block and one block per task role
pub fn render_fields(frame: &mut Frame, app: &App, area: Rect) {
    let task_fields: Vec<Field> = app
        .fields
        .iter()
        .copied()
        .filter(|f| !f.is_time())
        .collect();

    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(task_fields.iter().map(|_| Constraint::Min(3)));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_times(frame, app, chunks[0]);
    for (field, chunk) in task_fields.iter().zip(chunks.iter().skip(1)) {
        render_task_field(frame, app, *field, *chunk);
    }
}

fn field_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    let title_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(app.theme.background))
        .title(Span::styled(format!(" {} ", title), title_style))
        .style(Style::default().bg(app.theme.background))
}

fn render_times(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused();
    let block = field_block(app, "time", focused.is_time());
    let inner = block.inner(area);

    let lines: Vec<Line> = [Field::Start, Field::End]
        .iter()
        .map(|&field| {
            let label = format!("{:<width$}", app.field_label(field), width = TIME_LABEL_WIDTH);
            // an edited time field is only committed when the edit ends
            let value = if app.mode == Mode::Edit && field == focused {
                app.edit_buffer.as_str()
            } else {
                app.field_text(field)
            };
            let value_style = if field == focused {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
            } else {
                Style::default().fg(app.theme.text)
            };
            let value = if value.is_empty() && !(app.mode == Mode::Edit && field == focused) {
                Span::styled("--:--", Style::default().fg(app.theme.dim))
            } else {
                Span::styled(value.to_string(), value_style)
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(app.theme.dim)),
                value,
            ])
        })
        .collect();

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);

    if app.mode == Mode::Edit && focused.is_time() {
        let row = if focused == Field::Start { 0 } else { 1 };
        let col = unicode::byte_offset_to_display_col(&app.edit_buffer, app.edit_cursor);
        set_cursor(frame, inner, TIME_LABEL_WIDTH + col, row);
    }
}

fn render_task_field(frame: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focused() == field;
    let editing = focused && app.mode == Mode::Edit;
    let block = field_block(app, app.field_label(field), focused);
    let inner = block.inner(area);

    let text = app.field_text(field);
    let text_style = Style::default().fg(if focused {
        app.theme.text_bright
    } else {
        app.theme.text
    });
    let lines: Vec<Line> = if text.is_empty() && !editing {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(app.theme.dim),
        ))]
    } else {
        text.split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    };

    // Keep the cursor line visible
    let (cursor_line, cursor_col) = if editing {
        cursor_line_col(&app.edit_buffer, app.edit_cursor)
    } else {
        (0, 0)
    };
    let height = inner.height as usize;
    let scroll = if height > 0 && cursor_line >= height {
        cursor_line + 1 - height
    } else {
        0
    };

    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll as u16, 0)),
        inner,
    );

    if editing {
        set_cursor(frame, inner, cursor_col, cursor_line - scroll);
    }
}

fn set_cursor(frame: &mut Frame, inner: Rect, col: usize, row: usize) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let x = inner.x + (col as u16).min(inner.width - 1);
    let y = inner.y + (row as u16).min(inner.height - 1);
    frame.set_cursor_position(Position { x, y });
}
