use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minutes in a 24-hour clock.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Shortest interval the end time is pushed to when it would not be after the start.
pub const MINIMUM_SLOT_MINUTES: i32 = 30;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::\d{2})?$").unwrap());

/// A wall-clock time with minute precision and no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    /// Minutes since midnight, always in `0..1440`
    minutes: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

    /// Build from hour and minute, rejecting out-of-range values
    pub fn from_hm(hour: u32, minute: u32) -> Option<TimeOfDay> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    /// Build from any minute count, wrapping into a single day
    pub fn from_minutes_wrapping(minutes: i32) -> TimeOfDay {
        TimeOfDay {
            minutes: minutes.rem_euclid(MINUTES_PER_DAY) as u16,
        }
    }

    /// Parse `H:MM` or `HH:MM` (a trailing `:SS` is accepted and ignored).
    /// Returns None for anything else, including partially typed input.
    pub fn parse(s: &str) -> Option<TimeOfDay> {
        let caps = TIME_RE.captures(s.trim())?;
        let hour = caps[1].parse().ok()?;
        let minute = caps[2].parse().ok()?;
        TimeOfDay::from_hm(hour, minute)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.minutes / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minutes % 60)
    }

    pub fn minutes_since_midnight(self) -> i32 {
        i32::from(self.minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&value).ok_or_else(|| format!("invalid time of day: {:?}", value))
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A start/end pair whose end is kept after its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeInterval {
    /// Build an interval, pushing `end` to `start + 30min` if it is not after `start`
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        TimeInterval {
            start,
            end: crate::ops::time_ops::enforce_minimum_gap(start, end),
        }
    }

    /// Parse both endpoints. None when either is missing or malformed.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(TimeInterval::new(
            TimeOfDay::parse(start)?,
            TimeOfDay::parse(end)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_clock_formats() {
        assert_eq!(TimeOfDay::parse("09:05"), TimeOfDay::from_hm(9, 5));
        assert_eq!(TimeOfDay::parse("9:05"), TimeOfDay::from_hm(9, 5));
        assert_eq!(TimeOfDay::parse(" 23:59 "), TimeOfDay::from_hm(23, 59));
        assert_eq!(TimeOfDay::parse("07:30:12"), TimeOfDay::from_hm(7, 30));
    }

    #[test]
    fn parse_rejects_partial_and_out_of_range() {
        for input in ["", "9", "09:", "09:5", "24:00", "12:60", "ab:cd", "123:00"] {
            assert_eq!(TimeOfDay::parse(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn display_is_zero_padded() {
        let t = TimeOfDay::from_hm(7, 3).unwrap();
        assert_eq!(t.to_string(), "07:03");
        assert_eq!(TimeOfDay::MIDNIGHT.to_string(), "00:00");
    }

    #[test]
    fn wrapping_constructor_stays_within_a_day() {
        assert_eq!(TimeOfDay::from_minutes_wrapping(-30).to_string(), "23:30");
        assert_eq!(TimeOfDay::from_minutes_wrapping(1440 + 61).to_string(), "01:01");
    }

    #[test]
    fn interval_enforces_gap_on_construction() {
        let interval = TimeInterval::parse("09:00", "09:00").unwrap();
        assert_eq!(interval.end.to_string(), "09:30");
        let interval = TimeInterval::parse("09:00", "10:15").unwrap();
        assert_eq!(interval.end.to_string(), "10:15");
        assert!(TimeInterval::parse("09:00", "").is_none());
    }

    #[test]
    fn serde_uses_clock_strings() {
        let t = TimeOfDay::from_hm(18, 45).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"18:45\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
