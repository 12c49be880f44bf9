use crate::color::Palette;
use crate::entry::{Entry, Line};
use std::sync::Arc;

/// An entry tagged with everything needed to render it after merging.
#[derive(Debug, Clone)]
pub struct Record {
    /// Display alias, `*` suffixed for rolled sources.
    pub alias: Arc<str>,
    pub timestamp: i64,
    pub lines: Vec<Line>,
    pub palette: Arc<Palette>,

    /// Index of the producing source, in `add_source` order.
    pub source: usize,
}

impl Record {
    pub fn new(alias: Arc<str>, source: usize, palette: Arc<Palette>, entry: Entry) -> Self {
        Self {
            alias,
            timestamp: entry.timestamp,
            lines: entry.lines,
            palette,
            source,
        }
    }
}
