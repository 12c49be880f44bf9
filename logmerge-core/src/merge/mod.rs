//! Merging records from every source into one time-ordered stream.
//!
//! Each source runs as its own task and pushes records into a single bounded channel.
//! The aggregator keeps them in a sorted buffer and writes out only the records that no
//! active source can still undercut:
//!
//! source tasks
//! mpsc channel (backpressure)
//! Aggregator
//! MergeBuffer
//! Renderer

#[cfg(test)]
mod tests;

mod aggregator;
mod buffer;
mod error;
mod merger;
mod record;
mod settings;

pub use buffer::MergeBuffer;
pub use error::MergeError;
pub use merger::Merger;
pub use record::Record;
pub use settings::{DEFAULT_BATCH_SIZE, DEFAULT_CHANNEL_CAPACITY, MergeSettings, StalePolicy};

#[cfg(test)]
pub(crate) use aggregator::Aggregator;
