use crate::chunk::DEFAULT_MAX_ENTRY_SIZE;
use crate::entry::TimeRange;
use regex::Regex;
use std::time::Duration;

/// Records accepted between two flush attempts.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Channel slots reserved per source.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// What to do when a flush is due but some source has sent nothing since the last one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Hold output back until every active source has spoken.
    #[default]
    Wait,

    /// After this long without a message, flush up to what the other sources have shown.
    ForceFlush(Duration),
}

#[derive(Debug, Clone)]
pub struct MergeSettings {
    pub range: TimeRange,
    pub grep: Option<Regex>,
    pub highlight: Option<Regex>,
    pub batch_size: usize,
    pub channel_capacity: usize,
    pub max_entry_size: usize,
    pub stale: StalePolicy,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            range: TimeRange::default(),
            grep: None,
            highlight: None,
            batch_size: DEFAULT_BATCH_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
            stale: StalePolicy::Wait,
        }
    }
}
