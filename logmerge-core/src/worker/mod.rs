//! One task per source: chunk, parse, and forward records to the aggregator.

mod message;
mod source_worker;

pub(crate) use message::SourceMessage;
pub(crate) use source_worker::SourceWorker;
