use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry exceeds {limit} bytes without a following entry header")]
    EntryTooLarge { limit: usize },
}
