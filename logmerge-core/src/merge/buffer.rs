use crate::merge::record::Record;
use std::collections::{VecDeque, vec_deque};

/// Records waiting for a safe flush, always sorted by timestamp then arrival.
#[derive(Debug, Default)]
pub struct MergeBuffer {
    records: VecDeque<Record>,

    // Position of the last insertion; new records usually land right after it.
    cursor: Option<usize>,
}

impl MergeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: Record) {
        let len = self.records.len();
        let mut at = self.cursor.map_or(len, |cursor| (cursor + 1).min(len));

        while at > 0 && record.timestamp < self.records[at - 1].timestamp {
            at -= 1;
        }
        while at < self.records.len() && record.timestamp >= self.records[at].timestamp {
            at += 1;
        }

        self.records.insert(at, record);
        self.cursor = Some(at);
    }

    /// Remove every record older than `threshold`, oldest first.
    pub fn flush_before(&mut self, threshold: i64) -> vec_deque::Drain<'_, Record> {
        let count = self
            .records
            .partition_point(|record| record.timestamp < threshold);

        self.cursor = self.cursor.and_then(|cursor| cursor.checked_sub(count));
        self.records.drain(..count)
    }

    pub fn drain_all(&mut self) -> vec_deque::Drain<'_, Record> {
        self.cursor = None;
        self.records.drain(..)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Record> {
        self.records.iter()
    }
}
