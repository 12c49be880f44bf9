pub mod chunk;
pub mod cli;
pub mod color;
pub mod conf;
pub mod entry;
pub mod logging;
pub mod merge;
pub mod render;
pub mod source;
pub mod timestamp;
mod worker;

pub use merge::{MergeError, MergeSettings, Merger, StalePolicy};
pub use source::{SourceInput, SourceName};
