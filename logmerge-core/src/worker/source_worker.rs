use crate::chunk::EntryChunker;
use crate::color::Palette;
use crate::entry::{EntryFilters, EntryParser};
use crate::merge::{MergeError, Record};
use crate::worker::message::SourceMessage;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub(crate) struct SourceWorker<R> {
    index: usize,
    alias: Arc<str>,
    palette: Arc<Palette>,
    chunker: EntryChunker<R>,
    parser: EntryParser,
}

impl<R: AsyncRead + Unpin> SourceWorker<R> {
    pub(crate) fn new(
        index: usize,
        alias: Arc<str>,
        palette: Arc<Palette>,
        reader: R,
        filters: Arc<EntryFilters>,
        max_entry_size: usize,
    ) -> Self {
        Self {
            index,
            parser: EntryParser::new(filters, Arc::clone(&palette)),
            chunker: EntryChunker::with_max_entry_size(reader, max_entry_size),
            alias,
            palette,
        }
    }

    /// Read the source to the end, sending one record per kept entry and a final `Closed`.
    pub(crate) async fn run(
        mut self,
        tx: mpsc::Sender<SourceMessage>,
        cancel: CancellationToken,
    ) -> Result<(), MergeError> {
        let mut sent = 0usize;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(sent, "source worker cancelled");
                    return Ok(());
                }
                next = self.chunker.next_chunk() => next,
            };

            let Some(chunk) = next.map_err(|e| MergeError::from_chunk(&self.alias, e))? else {
                break;
            };

            let entry = match self.parser.parse(&chunk) {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(e) => return Err(MergeError::from_parse(&self.alias, e)),
            };

            let record = Record::new(
                Arc::clone(&self.alias),
                self.index,
                Arc::clone(&self.palette),
                entry,
            );
            if !emit(&tx, &cancel, SourceMessage::Record(record)).await {
                debug!(sent, "aggregator gone, stopping source");
                return Ok(());
            }
            sent += 1;
        }

        debug!(sent, "source exhausted");
        emit(&tx, &cancel, SourceMessage::Closed(self.index)).await;
        Ok(())
    }
}

/// Send under backpressure; `false` when cancelled or the receiver is gone.
async fn emit(
    tx: &mpsc::Sender<SourceMessage>,
    cancel: &CancellationToken,
    message: SourceMessage,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        sent = tx.send(message) => sent.is_ok(),
    }
}
