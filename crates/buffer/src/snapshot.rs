// Chunk: docs/chunks/text_view_trait - Read-only view shared by buffers and snapshots

use std::sync::Arc;

use crate::line_index::LineIndex;
use crate::text_view::TextView;
use crate::types::{LineExtent, TextRange, Version};

/// An immutable view of buffer content at one version.
///
/// Cloning is cheap: the characters and line index are shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: Version,
    chars: Arc<[char]>,
    lines: Arc<LineIndex>,
}

impl Snapshot {
    pub(crate) fn new(version: Version, chars: Arc<[char]>, lines: Arc<LineIndex>) -> Self {
        Self {
            version,
            chars,
            lines,
        }
    }

    /// Returns the whole snapshot content as a String.
    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }
}

impl TextView for Snapshot {
    fn version(&self) -> Version {
        self.version
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_extent(&self, line: usize) -> Option<LineExtent> {
        self.lines.line_extent(line, self.chars.len())
    }

    fn line_number_at(&self, offset: usize) -> usize {
        self.lines.line_at_offset(offset)
    }

    fn slice(&self, range: TextRange) -> String {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }
}
