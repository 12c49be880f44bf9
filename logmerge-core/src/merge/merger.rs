use crate::color::Palette;
use crate::entry::EntryFilters;
use crate::merge::aggregator::Aggregator;
use crate::merge::error::MergeError;
use crate::merge::settings::MergeSettings;
use crate::render::Renderer;
use crate::source::SourceInput;
use crate::worker::SourceWorker;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span};

const ROLLED_MARKER: &str = "*";

struct PendingSource {
    alias: Arc<str>,
    palette: Arc<Palette>,
    reader: Box<dyn AsyncRead + Send + Unpin>,
    max_entry_size: usize,
}

/// One merge session: register sources, then run them to completion into a writer.
pub struct Merger {
    settings: MergeSettings,
    filters: Arc<EntryFilters>,
    palettes: Vec<Arc<Palette>>,

    // Same alias, same colors, even when a rolled file shows up twice.
    alias_colors: HashMap<String, usize>,
    next_color: usize,

    sources: Vec<PendingSource>,
    alias_width: usize,
}

impl Merger {
    pub fn new(settings: MergeSettings, palettes: Vec<Palette>) -> Self {
        let mut palettes: Vec<Arc<Palette>> = palettes.into_iter().map(Arc::new).collect();
        if palettes.is_empty() {
            palettes.push(Arc::new(Palette::plain()));
        }

        let filters = Arc::new(EntryFilters::new(
            settings.range,
            settings.grep.clone(),
            settings.highlight.clone(),
        ));

        Self {
            settings,
            filters,
            palettes,
            alias_colors: HashMap::new(),
            next_color: 0,
            sources: Vec::new(),
            alias_width: 0,
        }
    }

    /// Register a source and return its index.
    pub fn add_source(&mut self, input: SourceInput) -> usize {
        let color = *self
            .alias_colors
            .entry(input.alias.clone())
            .or_insert_with(|| {
                let color = self.next_color;
                self.next_color = (color + 1) % self.palettes.len();
                color
            });

        let alias = if input.rolled {
            format!("{}{ROLLED_MARKER}", input.alias)
        } else {
            input.alias
        };
        self.alias_width = self.alias_width.max(alias.chars().count());

        self.sources.push(PendingSource {
            alias: Arc::from(alias),
            palette: Arc::clone(&self.palettes[color]),
            reader: input.reader,
            max_entry_size: input.max_entry_size.unwrap_or(self.settings.max_entry_size),
        });
        self.sources.len() - 1
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Width, in chars, that aliases are right-justified to.
    pub fn alias_width(&self) -> usize {
        self.alias_width
    }

    /// Merge every registered source into `writer` and return it once all input is consumed.
    ///
    /// The first source failure cancels the other sources and is returned. Cancelling `cancel`
    /// stops the run without the final flush.
    pub async fn run<W: Write>(self, writer: W, cancel: CancellationToken) -> Result<W, MergeError> {
        if self.sources.is_empty() {
            debug!("no sources to merge");
            return Ok(writer);
        }

        let cancel = cancel.child_token();
        let capacity = self
            .settings
            .channel_capacity
            .max(1)
            .saturating_mul(self.sources.len());
        let (tx, rx) = mpsc::channel(capacity);

        let aliases = self.sources.iter().map(|s| Arc::clone(&s.alias)).collect();
        let mut workers = JoinSet::new();

        for (index, source) in self.sources.into_iter().enumerate() {
            let span = debug_span!("source", alias = %source.alias);
            let worker = SourceWorker::new(
                index,
                source.alias,
                source.palette,
                source.reader,
                Arc::clone(&self.filters),
                source.max_entry_size,
            );
            workers.spawn(worker.run(tx.clone(), cancel.clone()).instrument(span));
        }
        drop(tx);

        debug!(sources = workers.len(), capacity, "merge started");

        let aggregator = Aggregator::new(
            aliases,
            Renderer::new(writer, self.alias_width),
            self.settings.batch_size,
            self.settings.stale,
        );

        let (merged, supervised) = tokio::join!(
            async {
                let merged = aggregator.run(rx, cancel.clone()).await;
                if merged.is_err() {
                    cancel.cancel();
                }
                merged
            },
            supervise(workers, cancel.clone()),
        );

        supervised?;
        merged
    }
}

/// Wait for every worker; the first failure cancels the rest.
async fn supervise(
    mut workers: JoinSet<Result<(), MergeError>>,
    cancel: CancellationToken,
) -> Result<(), MergeError> {
    let mut first_error = None;

    while let Some(joined) = workers.join_next().await {
        let result = joined.unwrap_or_else(|e| {
            Err(MergeError::WorkerPanicked {
                message: e.to_string(),
            })
        });

        match result {
            Err(error) if first_error.is_none() => {
                debug!(%error, "source failed, cancelling merge");
                cancel.cancel();
                first_error = Some(error);
            }
            _ => {}
        }
    }

    first_error.map_or(Ok(()), Err)
}
