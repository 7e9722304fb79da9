use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::App;

/// Live previews of the chat message and, when the variant has one, the
/// to-do block
pub fn render_previews(frame: &mut Frame, app: &App, area: Rect) {
    let composed = app.composed();

    match &composed.todo_block {
        Some(todo) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            render_preview(frame, app, "message [y]", &composed.chat_message, chunks[0]);
            render_preview(frame, app, "todo [t]", todo, chunks[1]);
        }
        None => render_preview(frame, app, "message [y]", &composed.chat_message, area),
    }
}

fn render_preview(frame: &mut Frame, app: &App, title: &str, text: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(app.theme.background))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(app.theme.text),
        ))
        .style(Style::default().bg(app.theme.background));

    let lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(app.theme.text))))
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use crate::model::session::Variant;
    use crate::tui::app::test_support::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn clear_variant_shows_both_documents() {
        let mut app = app();
        app.session.tasks.next = "write report".into();
        app.session.tasks.have_to = "call back".into();
        let out = render_to_string(50, 24, |frame, area| render_previews(frame, &app, area));
        assert!(out.contains(" message [y] "));
        assert!(out.contains("- write report"));
        assert!(out.contains(" todo [t] "));
        assert!(out.contains("- have to"));
        assert!(out.contains("  - call back"));
    }

    #[test]
    fn rotate_variant_has_only_message() {
        let config = AppConfig {
            variant: Variant::Rotate,
            ..Default::default()
        };
        let mut app = app_with(config, SharedClipboard::default());
        app.session.tasks.completed = "fixed bug".into();
        let out = render_to_string(50, 24, |frame, area| render_previews(frame, &app, area));
        assert!(out.contains("- fixed bug"));
        assert!(!out.contains("todo [t]"));
    }
}
