// Chunk: docs/chunks/edit_transactions - Atomic edits and offset translation

use crate::error::BufferError;
use crate::text_buffer::TextBuffer;
use crate::types::{TextRange, TrackingMode, Version};

/// A stable anchor for a range of text.
///
/// Remembers the range together with the version it was taken from, and
/// re-locates it on any later version the buffer still has history for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingSpan {
    range: TextRange,
    version: Version,
    mode: TrackingMode,
}

impl TrackingSpan {
    pub fn new(range: TextRange, version: Version, mode: TrackingMode) -> Self {
        Self {
            range,
            version,
            mode,
        }
    }

    /// The range as it was when the anchor was created.
    pub fn origin(&self) -> TextRange {
        self.range
    }

    pub fn origin_version(&self) -> Version {
        self.version
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Returns where the anchored text sits in the buffer's current version.
    pub fn resolve(&self, buffer: &TextBuffer) -> Result<TextRange, BufferError> {
        buffer.translate(self.range, self.version, self.mode)
    }
}
