use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::state::last_saved_display;
use crate::ops::emit::Severity;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

const NAVIGATE_HINT: &str = "Enter edit  y copy  t todo  s/e now  +/- adjust  1-9 preset  q quit";
const EDIT_HINT: &str = "Tab indent  S-Tab outdent  Esc done";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(toast) = &app.toast {
        let color = match toast.notice.severity {
            Severity::Info => app.theme.green,
            Severity::Error => app.theme.red,
        };
        spans.push(Span::styled(
            format!(" {}", toast.notice.title),
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("  {}", toast.notice.description),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    } else if app.mode == Mode::Edit {
        spans.push(Span::styled(
            " -- EDIT --",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    // Right side: key hints, then the last save time
    let mut right = String::new();
    if app.config.ui.show_key_hints && app.toast.is_none() {
        right.push_str(match app.mode {
            Mode::Navigate => NAVIGATE_HINT,
            Mode::Edit => EDIT_HINT,
        });
    }
    if let Some(saved) = last_saved_display(&app.session) {
        if !right.is_empty() {
            right.push_str("  ");
        }
        right.push_str(&format!("saved {}", saved));
    }

    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let right_width = unicode::display_width(&right);
    if !right.is_empty() && content_width + right_width + 1 < width {
        let padding = width - content_width - right_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
