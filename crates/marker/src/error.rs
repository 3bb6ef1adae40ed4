// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

use wsmark_buffer::BufferError;

use crate::span::LineNumber;

/// Errors surfaced by the whitespace marker.
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    /// `get` was called for a line the cache holds no span for.
    #[error("no trailing whitespace recorded for line {line}")]
    KeyNotFound { line: LineNumber },

    /// The buffer refused the edit transaction. Nothing was removed.
    #[error("edit rejected: {0}")]
    EditRejected(#[source] BufferError),

    #[error("invalid marker options: {0}")]
    Config(#[from] serde_json::Error),
}
