use crate::merge::buffer::MergeBuffer;
use crate::merge::error::MergeError;
use crate::merge::settings::StalePolicy;
use crate::render::Renderer;
use crate::timestamp::format_stamp;
use crate::worker::SourceMessage;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// What the aggregator knows about one source.
#[derive(Debug)]
struct SourceState {
    alias: Arc<str>,
    last_seen: i64,

    // Sent a record since the last flush.
    contributed: bool,
    completed: bool,
}

enum Received {
    Message(SourceMessage),
    Stale,
    Closed,
}

/// Single consumer of every source's records; decides when output is safe to write.
pub(crate) struct Aggregator<W: Write> {
    buffer: MergeBuffer,
    sources: Vec<SourceState>,
    renderer: Renderer<W>,
    batch_size: usize,
    stale: StalePolicy,
    since_flush: usize,

    // When the pending flush was first deferred; cleared by every flush.
    deferred_since: Option<Instant>,
}

impl<W: Write> Aggregator<W> {
    pub(crate) fn new(
        aliases: Vec<Arc<str>>,
        renderer: Renderer<W>,
        batch_size: usize,
        stale: StalePolicy,
    ) -> Self {
        let sources = aliases
            .into_iter()
            .map(|alias| SourceState {
                alias,
                last_seen: i64::MIN,
                contributed: false,
                completed: false,
            })
            .collect();

        Self {
            buffer: MergeBuffer::new(),
            sources,
            renderer,
            batch_size,
            stale,
            since_flush: 0,
            deferred_since: None,
        }
    }

    /// Consume messages until every sender is gone, then write out what is left.
    ///
    /// The final flush only happens when every source reported `Closed`; a channel that closes
    /// early means a source failed and nothing more is written.
    pub(crate) async fn run(
        mut self,
        mut rx: mpsc::Receiver<SourceMessage>,
        cancel: CancellationToken,
    ) -> Result<W, MergeError> {
        loop {
            let received = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(buffered = self.buffer.len(), "aggregator cancelled");
                    return Err(MergeError::Cancelled);
                }
                _ = stale_timer(self.stale_deadline()) => Received::Stale,
                message = rx.recv() => message.map_or(Received::Closed, Received::Message),
            };

            match received {
                Received::Message(message) => {
                    self.accept(message);
                    self.maybe_flush()?;
                }
                Received::Stale => self.force_flush()?,
                Received::Closed if self.active().next().is_none() => return self.finish(),
                Received::Closed => {
                    let unfinished = self.active().count();
                    debug!(
                        unfinished,
                        buffered = self.buffer.len(),
                        "channel closed before every source completed, skipping final flush"
                    );
                    return Err(MergeError::Cancelled);
                }
            }
        }
    }

    pub(crate) fn accept(&mut self, message: SourceMessage) {
        match message {
            SourceMessage::Record(record) => {
                if let Some(state) = self.sources.get_mut(record.source) {
                    state.last_seen = record.timestamp;
                    state.contributed = true;
                }
                self.buffer.insert(record);
                self.since_flush += 1;
            }
            SourceMessage::Closed(index) => {
                if let Some(state) = self.sources.get_mut(index) {
                    debug!(alias = %state.alias, "source completed");
                    state.completed = true;
                }
            }
        }
    }

    pub(crate) fn maybe_flush(&mut self) -> Result<(), MergeError> {
        if !self.flush_due() {
            return Ok(());
        }

        match self.safe_threshold() {
            Some(threshold) => self.flush_before(threshold),
            None => {
                trace!(buffered = self.buffer.len(), "flush deferred, a source is silent");
                self.deferred_since.get_or_insert_with(Instant::now);
                Ok(())
            }
        }
    }

    /// Flush without the silent sources; used once a flush has been deferred for the stale timeout.
    pub(crate) fn force_flush(&mut self) -> Result<(), MergeError> {
        let silent = self
            .active()
            .filter(|state| !state.contributed)
            .map(|state| state.alias.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        let threshold = self
            .active()
            .filter(|state| state.contributed)
            .map(|state| state.last_seen)
            .min()
            .unwrap_or(i64::MAX);

        warn!(
            %silent,
            threshold = %format_stamp(threshold),
            "sources silent past the stale timeout, flushing without them"
        );
        self.flush_before(threshold)
    }

    #[cfg(test)]
    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Write out everything still buffered and return the sink.
    pub(crate) fn finish(mut self) -> Result<W, MergeError> {
        let remaining = self.buffer.len();
        for record in self.buffer.drain_all() {
            self.renderer.write_record(&record)?;
        }

        debug!(remaining, "final flush");
        Ok(self.renderer.finish()?)
    }

    fn flush_due(&self) -> bool {
        self.since_flush > self.batch_size
    }

    /// Deadline for the deferred flush, counted from the first deferral so a busy peer can't
    /// push it back.
    fn stale_deadline(&self) -> Option<Instant> {
        match self.stale {
            StalePolicy::ForceFlush(timeout) => self.deferred_since.map(|since| since + timeout),
            StalePolicy::Wait => None,
        }
    }

    fn active(&self) -> impl Iterator<Item = &SourceState> {
        self.sources.iter().filter(|state| !state.completed)
    }

    /// Lowest timestamp any active source could still undercut, if every one has spoken.
    fn safe_threshold(&self) -> Option<i64> {
        let mut threshold = i64::MAX;
        for state in self.active() {
            if !state.contributed {
                return None;
            }
            threshold = threshold.min(state.last_seen);
        }
        Some(threshold)
    }

    fn flush_before(&mut self, threshold: i64) -> Result<(), MergeError> {
        let mut flushed = 0usize;
        for record in self.buffer.flush_before(threshold) {
            self.renderer.write_record(&record)?;
            flushed += 1;
        }

        self.since_flush = 0;
        self.deferred_since = None;
        for state in &mut self.sources {
            state.contributed = false;
        }

        debug!(
            threshold = %format_stamp(threshold),
            flushed,
            buffered = self.buffer.len(),
            "flushed"
        );
        Ok(())
    }
}

async fn stale_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
