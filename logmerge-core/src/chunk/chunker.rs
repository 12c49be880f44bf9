use crate::chunk::error::ChunkError;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Largest pending entry before the source is declared broken.
pub const DEFAULT_MAX_ENTRY_SIZE: usize = 64 * 1024;

const INITIAL_CAPACITY: usize = 4 * 1024;
const READ_SIZE: usize = 8 * 1024;

/// Lazily cuts an async byte stream into one chunk per log entry.
pub struct EntryChunker<R> {
    reader: R,
    buffer: BytesMut,

    // Offset up to which the buffer is known to hold no boundary.
    scanned: usize,
    max_entry_size: usize,
    eof: bool,
}

impl<R: AsyncRead + Unpin> EntryChunker<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_entry_size(reader, DEFAULT_MAX_ENTRY_SIZE)
    }

    pub fn with_max_entry_size(reader: R, max_entry_size: usize) -> Self {
        Self {
            reader,
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY.min(max_entry_size.max(1))),
            scanned: 0,
            max_entry_size,
            eof: false,
        }
    }

    /// The next complete chunk, or `None` once the stream is exhausted.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, ChunkError> {
        loop {
            if let Some(newline) = self.find_boundary() {
                let mut chunk = self.buffer.split_to(newline + 1);
                chunk.truncate(trimmed_len(&chunk[..newline], b"\r"));
                self.scanned = 0;
                return Ok(Some(chunk.freeze()));
            }

            if self.eof {
                let mut chunk = self.buffer.split();
                chunk.truncate(trimmed_len(&chunk, b"\r\n"));
                self.scanned = 0;
                return Ok((!chunk.is_empty()).then(|| chunk.freeze()));
            }

            if self.buffer.len() >= self.max_entry_size {
                return Err(ChunkError::EntryTooLarge {
                    limit: self.max_entry_size,
                });
            }

            // The last two bytes may be the start of a boundary still missing its tail.
            self.scanned = self.buffer.len().saturating_sub(2);
            self.buffer.reserve(READ_SIZE);
            if self.reader.read_buf(&mut self.buffer).await? == 0 {
                self.eof = true;
            }
        }
    }

    /// Index of the `\n` that precedes the next `[` + word character.
    fn find_boundary(&self) -> Option<usize> {
        let buf = &self.buffer[..];
        if buf.len() < 3 {
            return None;
        }

        (self.scanned..buf.len() - 2).find(|&at| {
            buf[at] == b'\n' && buf[at + 1] == b'[' && is_word_byte(buf[at + 2])
        })
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn trimmed_len(bytes: &[u8], strip: &[u8]) -> usize {
    bytes
        .iter()
        .rposition(|b| !strip.contains(b))
        .map_or(0, |last| last + 1)
}
