use std::fmt;
use tokio::io::AsyncRead;

/// One stream to merge, as handed to [`crate::Merger::add_source`].
pub struct SourceInput {
    pub alias: String,
    pub rolled: bool,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,

    /// Overrides the merge-wide entry size limit for this source.
    pub max_entry_size: Option<usize>,
}

impl SourceInput {
    pub fn new(
        alias: impl Into<String>,
        rolled: bool,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            alias: alias.into(),
            rolled,
            reader: Box::new(reader),
            max_entry_size: None,
        }
    }

    pub fn with_max_entry_size(mut self, max_entry_size: usize) -> Self {
        self.max_entry_size = Some(max_entry_size);
        self
    }
}

impl fmt::Debug for SourceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceInput")
            .field("alias", &self.alias)
            .field("rolled", &self.rolled)
            .field("max_entry_size", &self.max_entry_size)
            .finish_non_exhaustive()
    }
}
