use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// `[level date time zone ` at the start of an entry; group 1 holds the three stamp tokens.
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\w+ ((?:[^ ]* ){3})").expect("header pattern is a valid regex")
});

/// Inclusive window of accepted timestamps, in nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub stop: i64,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: 0,
            stop: i64::MAX,
        }
    }
}

impl TimeRange {
    pub fn new(start: i64, stop: i64) -> Self {
        Self { start, stop }
    }

    /// Build a range from optional bounds and a duration relative to whichever bound is given.
    ///
    /// With only `start`, the range ends `duration` later; with only `stop`, it begins
    /// `duration` earlier. A missing duration leaves the open side unbounded.
    pub fn from_bounds(start: Option<i64>, stop: Option<i64>, duration: Option<Duration>) -> Self {
        let span = duration.map_or(i64::MAX, |d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX));
        let default = Self::default();

        match (start, stop) {
            (Some(start), Some(stop)) => Self::new(start, stop),
            (Some(start), None) => Self::new(start, start.saturating_add(span)),
            (None, Some(stop)) if duration.is_some() => Self::new(stop.saturating_sub(span), stop),
            (None, Some(stop)) => Self::new(default.start, stop),
            (None, None) => default,
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.stop
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }
}

/// Read-only rules every parser applies, built once and shared by all sources.
#[derive(Debug, Clone)]
pub struct EntryFilters {
    header: Regex,
    pub range: TimeRange,
    pub grep: Option<Regex>,
    pub highlight: Option<Regex>,
}

impl EntryFilters {
    pub fn new(range: TimeRange, grep: Option<Regex>, highlight: Option<Regex>) -> Self {
        Self {
            header: HEADER.clone(),
            range,
            grep,
            highlight,
        }
    }

    /// The raw stamp text of a header line, or `None` if the line is not a header.
    pub fn header_stamp<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.header
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for EntryFilters {
    fn default() -> Self {
        Self::new(TimeRange::default(), None, None)
    }
}
