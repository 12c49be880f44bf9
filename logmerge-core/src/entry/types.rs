use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Grep,
    Highlight,
}

/// A fragment of one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Rendered later with the owning source's normal color.
    Plain(String),

    /// Matched text, already rendered with the grep or highlight color.
    Marked {
        text: String,
        kind: MarkKind,
        rendered: String,
    },
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) => text,
            Span::Marked { text, .. } => text,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Span::Marked { .. })
    }
}

/// One line of an entry; a grep or highlight hit splits it into prefix, match and suffix.
pub type Line = SmallVec<[Span; 3]>;

/// A parsed, timestamped, possibly multi-line log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    pub lines: Vec<Line>,
}

impl Entry {
    /// The entry's text with all markup removed, one string per line.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(Span::text).collect())
            .collect()
    }
}
