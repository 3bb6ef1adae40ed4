// Chunk: docs/chunks/edit_transactions - Atomic edits and offset translation

use crate::types::{TextRange, Version};

/// Errors raised by buffer edits and offset translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("buffer is read-only")]
    ReadOnly,

    #[error("offset {offset} is outside the buffer (length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("overlapping edits: {first} overlaps {second}")]
    OverlappingEdits { first: TextRange, second: TextRange },

    #[error("cannot translate from {requested}: history covers {oldest} through {current}")]
    VersionUnavailable {
        requested: Version,
        oldest: Version,
        current: Version,
    },
}
