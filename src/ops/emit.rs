//! The copy workflow: compose a document, hand it to the clipboard, and
//! advance the session only once the clipboard accepted it.

use chrono::NaiveDate;

use crate::model::config::AppConfig;
use crate::model::session::SessionState;
use crate::ops::compose::{ComposeContext, CopyTarget, compose};
use crate::ops::reduce::{Event, reduce};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Short feedback for the user (shown as a toast or printed to stderr)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Why a clipboard write did not happen
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no clipboard program available ({0})")]
    Unavailable(String),
    #[error("clipboard program '{program}' could not run: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("clipboard program '{program}' exited with {status}")]
    Failed { program: String, status: String },
    #[error("nothing to copy: {0}")]
    NothingToCopy(String),
}

/// Destination for a composed document
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Receives user feedback; the return value is never consumed
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Compose `target`, copy it, and return the next session.
///
/// On success a confirmation notice is sent and the post-copy transition is
/// applied. On failure an error notice is sent and the session comes back
/// unchanged.
pub fn copy_and_advance(
    state: &SessionState,
    target: CopyTarget,
    config: &AppConfig,
    today: NaiveDate,
    clipboard: &mut dyn ClipboardSink,
    notifier: &mut dyn NotificationSink,
) -> (SessionState, Result<(), ClipboardError>) {
    let composed = compose(&ComposeContext::new(state, config, today), &state.tasks);

    let result = match composed.document(target) {
        Some(text) => clipboard.write_text(text),
        None => Err(ClipboardError::NothingToCopy(format!(
            "the {} variant has no to-do block",
            config.variant
        ))),
    };

    match result {
        Ok(()) => {
            log::info!("event=copy status=ok target={:?}", target);
            notifier.notify(Notice::info("Copied", success_description(target)));
            let next = reduce(state, Event::CopySucceeded(target), config.variant);
            (next, Ok(()))
        }
        Err(e) => {
            log::error!("event=copy status=failed target={:?} error={}", target, e);
            notifier.notify(Notice::error("Error", "Copy failed."));
            (state.clone(), Err(e))
        }
    }
}

fn success_description(target: CopyTarget) -> &'static str {
    match target {
        CopyTarget::Message => "Message copied to the clipboard. Tasks updated.",
        CopyTarget::Todo => "To-do list copied to the clipboard.",
    }
}
