use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::clipboard::SystemClipboard;
use crate::io::config_io;
use crate::io::logging::{self, LogTarget};
use crate::io::state;
use crate::model::clock::TimeOfDay;
use crate::model::config::AppConfig;
use crate::model::session::{Role, SessionState};
use crate::ops::compose::{ComposeContext, Composed, CopyTarget, compose};
use crate::ops::emit::{self, ClipboardSink, Notice, NotificationSink};
use crate::ops::line_edit;
use crate::ops::reduce::{Event as SessionEvent, reduce};
use crate::ops::time_ops;

use super::input;
use super::render;
use super::theme::Theme;

/// How long a toast stays in the status row
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// A focusable field on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
    Task(Role),
}

impl Field {
    pub fn is_time(self) -> bool {
        matches!(self, Field::Start | Field::End)
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Edit,
}

/// A notice shown in the status row until it expires
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Collects notices from the copy workflow for display
#[derive(Default)]
struct ToastSink {
    last: Option<Notice>,
}

impl NotificationSink for ToastSink {
    fn notify(&mut self, notice: Notice) {
        self.last = Some(notice);
    }
}

/// Main application state
pub struct App {
    pub session: SessionState,
    pub config: AppConfig,
    /// None disables persistence (tests)
    pub state_dir: Option<PathBuf>,
    /// Focusable fields in screen order
    pub fields: Vec<Field>,
    /// Index into `fields`
    pub focus: usize,
    pub mode: Mode,
    /// Text of the focused field while editing
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`
    pub edit_cursor: usize,
    pub theme: Theme,
    pub toast: Option<Toast>,
    pub today: NaiveDate,
    pub clipboard: Box<dyn ClipboardSink>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        session: SessionState,
        config: AppConfig,
        state_dir: Option<PathBuf>,
        clipboard: Box<dyn ClipboardSink>,
        today: NaiveDate,
    ) -> Self {
        let mut fields = vec![Field::Start, Field::End];
        fields.extend(config.variant.roles().iter().map(|&role| Field::Task(role)));
        let theme = Theme::from_config(&config.ui);

        App {
            session,
            config,
            state_dir,
            fields,
            focus: 0,
            mode: Mode::Navigate,
            edit_buffer: String::new(),
            edit_cursor: 0,
            theme,
            toast: None,
            today,
            clipboard,
            should_quit: false,
        }
    }

    pub fn focused(&self) -> Field {
        self.fields[self.focus.min(self.fields.len() - 1)]
    }

    /// Current text of a field
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Start => &self.session.start,
            Field::End => &self.session.end,
            Field::Task(role) => self.session.tasks.get(role),
        }
    }

    pub fn field_label(&self, field: Field) -> &str {
        match field {
            Field::Start => "start",
            Field::End => "end",
            Field::Task(role) => self.config.labels.for_role(role),
        }
    }

    /// Both output documents for the current session
    pub fn composed(&self) -> Composed {
        compose(
            &ComposeContext::new(&self.session, &self.config, self.today),
            &self.session.tasks,
        )
    }

    /// Header line: date plus range, blank while an endpoint is empty
    pub fn range_display(&self) -> String {
        let date = time_ops::format_date(self.today, &self.config.time.date_format);
        time_ops::format_range(&date, &self.session.start, &self.session.end)
    }

    /// Apply an event, persist, and keep the edit buffer in sync with any
    /// correction the reducer made to the focused field.
    pub fn dispatch(&mut self, event: SessionEvent) {
        let next = reduce(&self.session, event, self.config.variant);
        if next == self.session {
            return;
        }
        self.session = next;
        self.persist();

        if self.mode == Mode::Edit {
            let current = self.field_text(self.focused()).to_string();
            if current != self.edit_buffer {
                self.edit_buffer = current;
                self.edit_cursor = line_edit::floor_char_boundary(&self.edit_buffer, self.edit_cursor);
            }
        }
    }

    fn persist(&mut self) {
        if let Some(dir) = &self.state_dir {
            self.session = state::save_session(dir, &self.session, Utc::now());
        }
    }

    /// Copy a document and show the outcome as a toast
    pub fn copy(&mut self, target: CopyTarget) {
        let mut sink = ToastSink::default();
        let (next, _result) = emit::copy_and_advance(
            &self.session,
            target,
            &self.config,
            self.today,
            self.clipboard.as_mut(),
            &mut sink,
        );
        if next != self.session {
            self.session = next;
            self.persist();
        }
        if let Some(notice) = sink.last {
            self.show_toast(notice);
        }
    }

    pub fn show_toast(&mut self, notice: Notice) {
        self.toast = Some(Toast {
            notice,
            shown_at: Instant::now(),
        });
    }

    /// Drop the toast once it has been visible long enough
    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Follow the calendar date while the UI stays open past midnight
    pub fn refresh_today(&mut self, today: NaiveDate) {
        if today != self.today {
            log::info!("event=date_rollover from={} to={}", self.today, today);
            self.today = today;
        }
    }

    pub fn now(&self) -> TimeOfDay {
        time_ops::to_time_of_day(&Local::now())
    }
}

/// Run the TUI application
pub fn run(
    config_path: Option<&str>,
    state_dir_flag: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(config_io::default_config_path);
    let config = config_io::read_config(&config_path)?;
    let state_dir = config_io::resolve_state_dir(state_dir_flag, &config);

    // The terminal belongs to the UI, so logs go to files
    if let Err(e) = logging::init(
        LogTarget::Files(logging::log_dir(&state_dir)),
        logging::TUI_LOG_LEVEL,
    ) {
        eprintln!("warning: {}", e);
    }

    let now = Local::now();
    let session = state::load_session(
        &state_dir,
        time_ops::to_time_of_day(&now),
        config.time.default_duration,
    );
    let clipboard = Box::new(SystemClipboard::new(config.clipboard.command.as_deref()));
    let mut app = App::new(session, config, Some(state_dir), clipboard, now.date_naive());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    log::info!("event=app_exit status=ok");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.expire_toast(Instant::now());
        app.refresh_today(Local::now().date_naive());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::model::session::Variant;
    use crate::ops::emit::Severity;

    #[test]
    fn fields_follow_variant() {
        let app = app();
        assert_eq!(
            app.fields,
            vec![
                Field::Start,
                Field::End,
                Field::Task(Role::Must),
                Field::Task(Role::HaveTo),
                Field::Task(Role::Next),
            ]
        );

        let config = AppConfig {
            variant: Variant::Rotate,
            ..Default::default()
        };
        let app = app_with(config, SharedClipboard::default());
        assert_eq!(app.fields.len(), 4);
        assert_eq!(app.fields[2], Field::Task(Role::Completed));
    }

    #[test]
    fn copy_success_advances_and_toasts() {
        let clipboard = SharedClipboard::default();
        let mut app = app_with(AppConfig::default(), clipboard.clone());
        app.session.tasks.next = "B".into();
        app.copy(CopyTarget::Message);
        assert_eq!(app.session.tasks.next, "");
        assert_eq!(clipboard.written.borrow().len(), 1);
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.notice.severity, Severity::Info);
    }

    #[test]
    fn copy_failure_keeps_session() {
        let clipboard = SharedClipboard {
            fail: true,
            ..Default::default()
        };
        let mut app = app_with(AppConfig::default(), clipboard);
        app.session.tasks.next = "B".into();
        app.copy(CopyTarget::Message);
        assert_eq!(app.session.tasks.next, "B");
        assert_eq!(app.toast.as_ref().unwrap().notice.severity, Severity::Error);
    }

    #[test]
    fn toast_expires() {
        let mut app = app();
        app.show_toast(Notice::info("Copied", "x"));
        let shown = app.toast.as_ref().unwrap().shown_at;
        app.expire_toast(shown + Duration::from_secs(1));
        assert!(app.toast.is_some());
        app.expire_toast(shown + TOAST_DURATION);
        assert!(app.toast.is_none());
    }

    #[test]
    fn dispatch_syncs_corrected_edit_buffer() {
        let mut app = app();
        app.focus = 1;
        app.mode = Mode::Edit;
        app.edit_buffer = "08:30".into();
        app.edit_cursor = 5;
        app.dispatch(SessionEvent::EndEdited("08:30".into()));
        assert_eq!(app.session.end, "09:30");
        assert_eq!(app.edit_buffer, "09:30");
    }

    #[test]
    fn range_display_uses_date_format() {
        let app = app();
        assert_eq!(app.range_display(), "2025/10/17 09:00\u{301C}10:00");
    }

    #[test]
    fn date_follows_midnight_rollover() {
        let mut app = app();
        app.session.tasks.must = "m".into();
        let next_day = today().succ_opt().unwrap();
        app.refresh_today(next_day);
        assert_eq!(app.range_display(), "2025/10/18 09:00\u{301C}10:00");
        let todo = app.composed().todo_block.unwrap();
        assert!(todo.starts_with("📅 2025/10/18"));
    }
}
