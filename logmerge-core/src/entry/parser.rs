use crate::color::Palette;
use crate::entry::error::ParseError;
use crate::entry::filters::EntryFilters;
use crate::entry::types::{Entry, Line, MarkKind, Span};
use crate::timestamp::parse_stamp;
use regex::Regex;
use smallvec::smallvec;
use std::sync::Arc;
use tracing::{trace, warn};

/// Turns raw entry chunks of one source into entries.
pub struct EntryParser {
    filters: Arc<EntryFilters>,
    palette: Arc<Palette>,

    // Set once a header-shaped chunk was seen; from then on every chunk must be one.
    established: bool,
}

impl EntryParser {
    pub fn new(filters: Arc<EntryFilters>, palette: Arc<Palette>) -> Self {
        Self {
            filters,
            palette,
            established: false,
        }
    }

    /// Parse one chunk. `Ok(None)` means the chunk was skipped or filtered out.
    pub fn parse(&mut self, chunk: &[u8]) -> Result<Option<Entry>, ParseError> {
        if chunk.is_empty() {
            return Ok(None);
        }

        let text = String::from_utf8_lossy(chunk);
        let first_line = text.split('\n').next().unwrap_or_default();

        let Some(stamp) = self.filters.header_stamp(first_line) else {
            if !self.established {
                trace!(bytes = chunk.len(), "skipping text before the first header");
                return Ok(None);
            }
            return Err(ParseError::Desync {
                line: first_line.trim_end_matches('\r').to_string(),
            });
        };
        self.established = true;

        let timestamp = match parse_stamp(stamp) {
            Ok(timestamp) => timestamp,
            Err(error) => {
                warn!(%error, "dropping entry with unparseable timestamp");
                return Ok(None);
            }
        };

        if !self.filters.range.contains(timestamp) {
            return Ok(None);
        }

        let mut grep_hit = false;
        let mut lines: Vec<Line> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| {
                let spans = self.grep_line(line);
                grep_hit |= spans.len() > 1;
                spans
            })
            .collect();

        // Grep keeps or drops whole entries so context lines travel with the match.
        if self.filters.grep.is_some() && !grep_hit {
            return Ok(None);
        }

        if let Some(highlight) = &self.filters.highlight {
            for line in &mut lines {
                *line = self.highlight_line(highlight, std::mem::take(line));
            }
        }

        Ok(Some(Entry { timestamp, lines }))
    }

    /// Mark the first grep match of a line, or keep the line as one plain span.
    fn grep_line(&self, line: &str) -> Line {
        let found = self.filters.grep.as_ref().and_then(|grep| grep.find(line));

        match found {
            Some(m) => smallvec![
                Span::Plain(line[..m.start()].to_string()),
                self.mark(m.as_str(), MarkKind::Grep),
                Span::Plain(line[m.end()..].to_string()),
            ],
            None => smallvec![Span::Plain(line.to_string())],
        }
    }

    /// Mark every highlight match inside plain spans; marked spans are left alone.
    fn highlight_line(&self, pattern: &Regex, line: Line) -> Line {
        let mut out = Line::new();

        for span in line {
            let Span::Plain(text) = span else {
                out.push(span);
                continue;
            };

            let mut last = 0;
            for m in pattern.find_iter(&text).filter(|m| !m.is_empty()) {
                out.push(Span::Plain(text[last..m.start()].to_string()));
                out.push(self.mark(m.as_str(), MarkKind::Highlight));
                last = m.end();
            }

            if last == 0 {
                out.push(Span::Plain(text));
            } else {
                out.push(Span::Plain(text[last..].to_string()));
            }
        }

        out
    }

    fn mark(&self, text: &str, kind: MarkKind) -> Span {
        let paint = match kind {
            MarkKind::Grep => &self.palette.grep,
            MarkKind::Highlight => &self.palette.highlight,
        };

        Span::Marked {
            text: text.to_string(),
            kind,
            rendered: paint(text),
        }
    }
}
