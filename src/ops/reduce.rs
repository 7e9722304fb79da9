use crate::model::clock::TimeOfDay;
use crate::model::session::{Role, SessionState, Variant};
use crate::ops::compose::CopyTarget;
use crate::ops::time_ops;

/// Everything that can change a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A task field was edited
    TaskEdited { role: Role, text: String },
    /// The start field now holds this text
    StartEdited(String),
    /// The end field now holds this text
    EndEdited(String),
    StartSetToNow(TimeOfDay),
    EndSetToNow(TimeOfDay),
    /// Shift the start by signed minutes (no-op while the field doesn't parse)
    StartAdjusted(i32),
    /// Shift the end by signed minutes (no-op while the field doesn't parse)
    EndAdjusted(i32),
    /// Start now, end `minutes` later
    PresetApplied { now: TimeOfDay, minutes: u32 },
    /// The document reached its destination
    CopySucceeded(CopyTarget),
}

/// Apply one event and return the resulting session.
///
/// Derived values are recomputed afterwards in a single pass, so a gap
/// correction never feeds back into another event.
pub fn reduce(state: &SessionState, event: Event, variant: Variant) -> SessionState {
    let mut next = state.clone();

    match event {
        Event::TaskEdited { role, text } => next.tasks.set(role, text),
        Event::StartEdited(text) => next.start = text,
        Event::EndEdited(text) => next.end = text,
        Event::StartSetToNow(now) => next.start = now.to_string(),
        Event::EndSetToNow(now) => next.end = now.to_string(),
        Event::StartAdjusted(delta) => {
            if let Some(adjusted) = time_ops::adjust_raw(&next.start, delta) {
                next.start = adjusted;
            }
        }
        Event::EndAdjusted(delta) => {
            if let Some(adjusted) = time_ops::adjust_raw(&next.end, delta) {
                next.end = adjusted;
            }
        }
        Event::PresetApplied { now, minutes } => {
            let interval = time_ops::preset_interval(now, minutes);
            next.start = interval.start.to_string();
            next.end = interval.end.to_string();
        }
        Event::CopySucceeded(target) => apply_post_emit(&mut next, target, variant),
    }

    settle_interval(&mut next);
    next
}

/// State change after a document is delivered. Only the chat message
/// advances the session; copying the to-do block changes nothing.
fn apply_post_emit(state: &mut SessionState, target: CopyTarget, variant: Variant) {
    if target != CopyTarget::Message {
        return;
    }
    match variant {
        Variant::Clear => state.tasks.next.clear(),
        Variant::Rotate => {
            // overwrites whatever "completed" held before
            state.tasks.completed = std::mem::take(&mut state.tasks.next);
        }
    }
}

/// Derived-value pass: push the end past the start when both fields parse.
pub fn settle_interval(state: &mut SessionState) {
    if let Some(end) = time_ops::settle_end(&state.start, &state.end) {
        state.end = end;
    }
}
