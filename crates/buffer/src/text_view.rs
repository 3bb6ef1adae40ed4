// Chunk: docs/chunks/text_view_trait - Read-only view shared by buffers and snapshots

//! The `TextView` trait: read access to one version of a document.
//!
//! Both the live [`TextBuffer`](crate::TextBuffer) and an immutable
//! [`Snapshot`](crate::Snapshot) implement it, so scanning code can run
//! against either without caring whether the text may still change.

use crate::types::{LineExtent, TextRange, Version};

/// Read-only access to the characters and lines of one buffer version.
///
/// Offsets are character offsets; line numbers are 0-indexed.
pub trait TextView {
    /// Returns the version this view reflects.
    fn version(&self) -> Version;

    /// Returns the total number of characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the character at `offset`, or `None` past the end.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Returns the number of lines. Always at least 1.
    fn line_count(&self) -> usize;

    /// Returns the bounds of `line`, or `None` if it does not exist.
    fn line_extent(&self, line: usize) -> Option<LineExtent>;

    /// Returns the line containing `offset`.
    ///
    /// Offsets past the end resolve to the last line.
    fn line_number_at(&self, offset: usize) -> usize;

    /// Returns the text covered by `range`, clamped to the view.
    fn slice(&self, range: TextRange) -> String {
        (range.start..range.end.min(self.len()))
            .filter_map(|offset| self.char_at(offset))
            .collect()
    }

    /// Returns the content of `line` without its terminator.
    ///
    /// Returns an empty string if the line does not exist.
    fn line_content(&self, line: usize) -> String {
        self.line_extent(line)
            .map(|extent| self.slice(extent.content()))
            .unwrap_or_default()
    }
}
