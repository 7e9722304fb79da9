pub mod fields;
pub mod previews;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    // Content: fields on the left, live previews on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    fields::render_fields(frame, app, columns[0]);
    previews::render_previews(frame, app, columns[1]);

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let range = app.range_display();
    let range = if range.is_empty() {
        Span::styled(" no time range", Style::default().fg(app.theme.dim).bg(bg))
    } else {
        Span::styled(
            format!(" {}", range),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    };
    let variant = Span::styled(
        format!("  [{}]", app.config.variant),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![range, variant])).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::tui::app::test_support::*;

    #[test]
    fn header_shows_range_and_variant() {
        let app = app();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        let first = out.lines().next().unwrap();
        assert!(first.contains("2025/10/17 09:00"));
        assert!(first.contains("10:00"));
        assert!(first.contains("[clear]"));
    }

    #[test]
    fn header_without_range() {
        let mut app = app();
        app.session.end.clear();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(out.lines().next().unwrap().contains("no time range"));
    }
}
