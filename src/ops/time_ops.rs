use std::fmt::Write;

use chrono::{NaiveDate, Timelike};

use crate::model::clock::{MINIMUM_SLOT_MINUTES, MINUTES_PER_DAY, TimeInterval, TimeOfDay};

/// Truncate an instant to hours:minutes
pub fn to_time_of_day<T: Timelike>(instant: &T) -> TimeOfDay {
    TimeOfDay::from_minutes_wrapping((instant.hour() * 60 + instant.minute()) as i32)
}

/// Add signed minutes, wrapping around midnight (no date rollover is tracked)
pub fn apply_offset(time: TimeOfDay, delta_minutes: i32) -> TimeOfDay {
    // reduce first so huge deltas can't overflow the add
    TimeOfDay::from_minutes_wrapping(
        time.minutes_since_midnight() + delta_minutes.rem_euclid(MINUTES_PER_DAY),
    )
}

/// If `end` is not after `start` (compared on the same day), return
/// `start + 30min`; otherwise return `end` unchanged.
pub fn enforce_minimum_gap(start: TimeOfDay, end: TimeOfDay) -> TimeOfDay {
    if end <= start {
        apply_offset(start, MINIMUM_SLOT_MINUTES)
    } else {
        end
    }
}

/// `now → now + minutes`. The gap rule is applied separately by the caller.
pub fn preset_interval(now: TimeOfDay, minutes: u32) -> TimeInterval {
    TimeInterval {
        start: now,
        end: apply_offset(now, (minutes % MINUTES_PER_DAY as u32) as i32),
    }
}

/// Shift a raw time field by `delta_minutes`. None when the field doesn't parse.
pub fn adjust_raw(raw: &str, delta_minutes: i32) -> Option<String> {
    let time = TimeOfDay::parse(raw)?;
    Some(apply_offset(time, delta_minutes).to_string())
}

/// Derived end value for a pair of raw fields.
///
/// Returns `Some(new_end)` only when both fields parse and the gap rule
/// changes the end; incomplete input is left alone.
pub fn settle_end(start: &str, end: &str) -> Option<String> {
    let start = TimeOfDay::parse(start)?;
    let parsed_end = TimeOfDay::parse(end)?;
    let settled = enforce_minimum_gap(start, parsed_end);
    if settled != parsed_end {
        Some(settled.to_string())
    } else {
        None
    }
}

/// Render a calendar date with a strftime pattern, falling back to ISO
/// format when the pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// `"{date} {start}〜{end}"` for the header, or empty while either field is blank
pub fn format_range(date_display: &str, start: &str, end: &str) -> String {
    if start.is_empty() || end.is_empty() {
        return String::new();
    }
    format!("{} {}\u{301C}{}", date_display, start, end)
}
