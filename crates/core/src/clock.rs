//! Wall-clock access for message timestamps.

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};
use std::fmt::Write;

/// `9:24 AM`
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p";

/// Source of the local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Current time rendered with a strftime-style format.
    fn timestamp(&self, format: &str) -> String {
        format_time(self.now(), format)
    }
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render `at` with `format`, falling back to [`DEFAULT_TIME_FORMAT`] when
/// the format string is malformed.
pub fn format_time(at: NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(DEFAULT_TIME_FORMAT));
    }
    out
}

/// Whether every specifier in `format` is understood by chrono.
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
