use crate::chunk::ChunkError;
use crate::entry::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to read {alias}: {source}")]
    Read {
        alias: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{alias}: entry larger than {limit} bytes (raise --max-buffer)")]
    EntryTooLarge { alias: String, limit: usize },

    #[error("{alias}: expected an entry header, found {line:?}")]
    Desync { alias: String, line: String },

    #[error("failed to write merged output: {0}")]
    Output(#[from] std::io::Error),

    #[error("merge cancelled")]
    Cancelled,

    #[error("source worker panicked: {message}")]
    WorkerPanicked { message: String },
}

impl MergeError {
    pub(crate) fn from_chunk(alias: &str, error: ChunkError) -> Self {
        match error {
            ChunkError::Io(source) => Self::Read {
                alias: alias.to_string(),
                source,
            },
            ChunkError::EntryTooLarge { limit } => Self::EntryTooLarge {
                alias: alias.to_string(),
                limit,
            },
        }
    }

    pub(crate) fn from_parse(alias: &str, error: ParseError) -> Self {
        match error {
            ParseError::Desync { line } => Self::Desync {
                alias: alias.to_string(),
                line,
            },
        }
    }
}
