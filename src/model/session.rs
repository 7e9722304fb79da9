use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::TimeOfDay;
use crate::ops::time_ops;

/// A named task category, each backed by its own free-form text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Completed,
    Next,
    Must,
    HaveTo,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Completed, Role::Next, Role::Must, Role::HaveTo];

    /// Identifier used on the command line and in config keys
    pub fn key(self) -> &'static str {
        match self {
            Role::Completed => "completed",
            Role::Next => "next",
            Role::Must => "must",
            Role::HaveTo => "have_to",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "completed" | "done" => Ok(Role::Completed),
            "next" => Ok(Role::Next),
            "must" => Ok(Role::Must),
            "have_to" | "haveto" => Ok(Role::HaveTo),
            other => Err(format!(
                "unknown role '{}' (expected completed, next, must, have-to)",
                other
            )),
        }
    }
}

/// Page layout: which roles exist and what a successful copy does to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Next-steps message plus a must/have-to to-do block; copying clears "next"
    #[default]
    Clear,
    /// Completed + next message; copying moves "next" into "completed"
    Rotate,
}

impl Variant {
    /// Roles shown for this variant, in on-screen order
    pub fn roles(self) -> &'static [Role] {
        match self {
            Variant::Clear => &[Role::Must, Role::HaveTo, Role::Next],
            Variant::Rotate => &[Role::Completed, Role::Next],
        }
    }

    /// Roles that make up the chat message, in output order
    pub fn message_roles(self) -> &'static [Role] {
        match self {
            Variant::Clear => &[Role::Next],
            Variant::Rotate => &[Role::Completed, Role::Next],
        }
    }

    /// Roles that make up the to-do block, in output order (empty = no to-do block)
    pub fn todo_roles(self) -> &'static [Role] {
        match self {
            Variant::Clear => &[Role::Must, Role::HaveTo],
            Variant::Rotate => &[],
        }
    }

    pub fn has_todo(self) -> bool {
        !self.todo_roles().is_empty()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Clear => "clear",
            Variant::Rotate => "rotate",
        })
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(Variant::Clear),
            "rotate" => Ok(Variant::Rotate),
            other => Err(format!("unknown variant '{}' (expected clear or rotate)", other)),
        }
    }
}

/// Free-form task text for every role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub must: String,
    #[serde(default)]
    pub have_to: String,
}

impl TaskSet {
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Completed => &self.completed,
            Role::Next => &self.next,
            Role::Must => &self.must,
            Role::HaveTo => &self.have_to,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut String {
        match role {
            Role::Completed => &mut self.completed,
            Role::Next => &mut self.next,
            Role::Must => &mut self.must,
            Role::HaveTo => &mut self.have_to,
        }
    }

    pub fn set(&mut self, role: Role, text: impl Into<String>) {
        *self.get_mut(role) = text.into();
    }

    /// True when the role holds nothing but whitespace
    pub fn is_blank(&self, role: Role) -> bool {
        self.get(role).trim().is_empty()
    }
}

/// Everything the user has entered, as one immutable value.
///
/// Endpoints are kept as the raw text of the time fields so a half-typed
/// value survives; use [`SessionState::interval`] for the parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub start: String,
    pub end: String,
    pub tasks: TaskSet,
    pub last_saved: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Fresh session: `now → now + duration`, no tasks
    pub fn starting_at(now: TimeOfDay, default_duration: u32) -> Self {
        let interval = time_ops::preset_interval(now, default_duration);
        SessionState {
            start: interval.start.to_string(),
            end: time_ops::enforce_minimum_gap(interval.start, interval.end).to_string(),
            tasks: TaskSet::default(),
            last_saved: None,
        }
    }

    /// Parsed endpoints, or None while either field is incomplete
    pub fn interval(&self) -> Option<super::clock::TimeInterval> {
        super::clock::TimeInterval::parse(&self.start, &self.end)
    }

    /// Both endpoints hold some text (the condition for persisting)
    pub fn has_endpoints(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}
