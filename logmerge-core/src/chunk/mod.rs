//! Splitting a byte stream into raw entry chunks.
//!
//! A new entry starts at a line beginning with `[` and a word character. Everything up to the
//! next such line, stack traces and other continuation lines included, belongs to one chunk.


mod chunker;
mod error;

pub use chunker::{DEFAULT_MAX_ENTRY_SIZE, EntryChunker};
pub use error::ChunkError;
