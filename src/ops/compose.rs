//! Builds the two output documents from a session.
//!
//! The chat message is a time header followed by one labelled section per
//! message role. The to-do block is a date header followed by one nested
//! list per to-do role. Both are plain functions of their inputs: the date is
//! supplied by the caller, never read from the clock here.

use chrono::NaiveDate;

use crate::model::config::{AppConfig, LabelConfig};
use crate::model::session::{Role, SessionState, TaskSet, Variant};
use crate::ops::time_ops;
use crate::parse::normalize;

/// Which document a copy action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Message,
    Todo,
}

/// Inputs to [`compose`] besides the task texts
#[derive(Debug, Clone)]
pub struct ComposeContext<'a> {
    /// Raw start field, rendered as typed
    pub start: &'a str,
    /// Raw end field, rendered as typed
    pub end: &'a str,
    pub date: NaiveDate,
    pub date_format: &'a str,
    pub variant: Variant,
    pub labels: &'a LabelConfig,
}

impl<'a> ComposeContext<'a> {
    pub fn new(state: &'a SessionState, config: &'a AppConfig, date: NaiveDate) -> Self {
        ComposeContext {
            start: &state.start,
            end: &state.end,
            date,
            date_format: &config.time.date_format,
            variant: config.variant,
            labels: &config.labels,
        }
    }
}

/// The generated documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub chat_message: String,
    /// Present only for variants with to-do roles
    pub todo_block: Option<String>,
}

impl Composed {
    pub fn document(&self, target: CopyTarget) -> Option<&str> {
        match target {
            CopyTarget::Message => Some(&self.chat_message),
            CopyTarget::Todo => self.todo_block.as_deref(),
        }
    }
}

pub fn compose(ctx: &ComposeContext<'_>, tasks: &TaskSet) -> Composed {
    let todo_block = if ctx.variant.has_todo() {
        Some(compose_todo(ctx, tasks))
    } else {
        None
    };
    Composed {
        chat_message: compose_message(ctx, tasks),
        todo_block,
    }
}

/// Chat message: `⏰ start〜end`, then `【label】` sections.
///
/// Blank roles are left out, except "next", which is always present so the
/// message never ends at its header.
pub fn compose_message(ctx: &ComposeContext<'_>, tasks: &TaskSet) -> String {
    let mut message = format!("\u{23F0} {}\u{301C}{}", ctx.start, ctx.end);

    for &role in ctx.variant.message_roles() {
        if role != Role::Next && tasks.is_blank(role) {
            continue;
        }
        message.push_str(&format!(
            "\n\n\u{3010}{}\u{3011}\n{}",
            ctx.labels.for_role(role),
            normalize(tasks.get(role))
        ));
    }
    message
}

/// To-do block: `📅 date`, a `todo` line, then one `- label` group per
/// non-blank role with its items nested two spaces deeper.
pub fn compose_todo(ctx: &ComposeContext<'_>, tasks: &TaskSet) -> String {
    let today = time_ops::format_date(ctx.date, ctx.date_format);
    let mut todo = format!("\u{1F4C5} {}\n\ntodo", today);

    for &role in ctx.variant.todo_roles() {
        if tasks.is_blank(role) {
            continue;
        }
        todo.push_str(&format!("\n- {}", ctx.labels.for_role(role)));
        for line in normalize(tasks.get(role)).split('\n') {
            todo.push_str("\n  ");
            todo.push_str(line);
        }
    }
    todo
}
