// Chunk: docs/chunks/text_buffer - Versioned text buffer with gap buffer backing

//! TextBuffer is the main public API for document content.
//!
//! It combines a gap buffer (for character storage) with a line index (for
//! line access) and stamps every applied edit with a new [`Version`]. A
//! bounded history of those edits lets offsets taken from an older version
//! be translated onto the current one.
//!
//! Each applied edit reports `DirtyLines`, and the buffer also accumulates
//! them until an observer drains them with [`TextBuffer::take_dirty`].

use std::sync::Arc;

use crate::edit::{EditOutcome, PendingChange, TextEdit};
use crate::error::BufferError;
use crate::gap_buffer::GapBuffer;
use crate::history::{ChangeHistory, TextChange};
use crate::line_index::LineIndex;
use crate::snapshot::Snapshot;
use crate::text_view::TextView;
use crate::tracking::TrackingSpan;
use crate::types::{DirtyLines, LineExtent, TextRange, TrackingMode, Version};

/// Number of versions retained for offset translation by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// A versioned text buffer with change tracking.
#[derive(Debug)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    version: Version,
    history: ChangeHistory,
    /// Lines touched since the last `take_dirty`.
    dirty: DirtyLines,
    read_only: bool,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning `Result`,
    /// but parsing a string into a TextBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());

        Self {
            buffer: GapBuffer::from_str(content),
            line_index,
            version: Version::default(),
            history: ChangeHistory::new(DEFAULT_HISTORY_LIMIT),
            dirty: DirtyLines::None,
            read_only: false,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Sets how many past versions stay translatable.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.set_history_limit(limit);
        self
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    // ==================== Accessors ====================

    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the total character count in the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the entire buffer content as a String.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Marks the buffer read-only. Opening an edit then fails.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Captures the current content as an immutable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.version,
            self.buffer.chars().collect(),
            Arc::new(self.line_index.clone()),
        )
    }

    /// Drains the lines touched since the previous call.
    pub fn take_dirty(&mut self) -> DirtyLines {
        std::mem::replace(&mut self.dirty, DirtyLines::None)
    }

    // ==================== Translation ====================

    /// Returns the oldest version offsets can still be translated from.
    pub fn oldest_version(&self) -> Version {
        self.history.oldest(self.version)
    }

    /// Carries `range`, taken from version `from`, onto the current version.
    pub fn translate(
        &self,
        range: TextRange,
        from: Version,
        mode: TrackingMode,
    ) -> Result<TextRange, BufferError> {
        self.history.translate(range, from, self.version, mode)
    }

    /// Anchors `range` of the current version so it can be re-located later.
    pub fn create_tracking_span(&self, range: TextRange, mode: TrackingMode) -> TrackingSpan {
        TrackingSpan::new(range, self.version, mode)
    }

    // ==================== Mutations ====================

    /// Opens an edit transaction against the current version.
    pub fn create_edit(&mut self) -> Result<TextEdit<'_>, BufferError> {
        if self.read_only {
            return Err(BufferError::ReadOnly);
        }
        Ok(TextEdit::new(self))
    }

    /// Inserts `text` at `offset` as a single-change edit.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<EditOutcome, BufferError> {
        let mut edit = self.create_edit()?;
        edit.insert(offset, text)?;
        edit.apply()
    }

    /// Removes `range` as a single-change edit.
    pub fn delete(&mut self, range: TextRange) -> Result<EditOutcome, BufferError> {
        let mut edit = self.create_edit()?;
        edit.delete(range)?;
        edit.apply()
    }

    /// Replaces `range` with `text` as a single-change edit.
    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<EditOutcome, BufferError> {
        let mut edit = self.create_edit()?;
        edit.replace(range, text)?;
        edit.apply()
    }

    /// Writes validated, sorted, non-overlapping changes as one new version.
    pub(crate) fn commit(&mut self, changes: Vec<PendingChange>) -> EditOutcome {
        let Some(first_start) = changes.first().map(|change| change.range.start) else {
            return EditOutcome {
                version: self.version,
                dirty: DirtyLines::None,
                changes: 0,
            };
        };

        let old_line_count = self.line_index.line_count();
        // A lone '\r' right before the edit may pair with an inserted '\n',
        // so the line above the first change is rescanned as well.
        let rebuild_line = self
            .line_index
            .line_at_offset(first_start)
            .saturating_sub(1);

        let mut structural = false;
        let recorded: Vec<TextChange> = changes
            .iter()
            .map(|change| {
                let removed = self.buffer.slice(change.range.start, change.range.end);
                structural |= has_line_break(&removed) || has_line_break(&change.text);
                TextChange {
                    start: change.range.start,
                    old_len: change.range.len(),
                    new_len: change.text.chars().count(),
                }
            })
            .collect();

        // Back to front, so earlier offsets stay valid while later ones change.
        for change in changes.iter().rev() {
            self.buffer.delete_range(change.range.start, change.range.end);
            self.buffer.insert_str_at(change.range.start, &change.text);
        }

        let rebuild_start = self.line_index.line_start(rebuild_line).unwrap_or(0);
        self.line_index
            .rebuild_from(rebuild_line, self.buffer.chars_from(rebuild_start));

        let dirty = if structural || self.line_index.line_count() != old_line_count {
            DirtyLines::FromLineToEnd(self.line_index.line_at_offset(first_start))
        } else {
            let mut dirty = DirtyLines::None;
            let (mut added, mut removed) = (0, 0);
            for change in &recorded {
                let new_start = change.start + added - removed;
                dirty.merge(DirtyLines::Single(self.line_index.line_at_offset(new_start)));
                added += change.new_len;
                removed += change.old_len;
            }
            dirty
        };

        let count = recorded.len();
        self.version = self.version.next();
        self.history.record(self.version, recorded);
        self.dirty.merge(dirty.clone());
        self.assert_line_index_consistent();

        tracing::trace!(
            version = %self.version,
            changes = count,
            ?dirty,
            "applied buffer edit"
        );

        EditOutcome {
            version: self.version,
            dirty,
            changes: count,
        }
    }

    // ==================== Validation ====================

    /// Debug assertion: verifies that the incrementally rebuilt line index
    /// matches a fresh rebuild from the buffer content.
    ///
    /// Only every 64th mutation is checked, keeping the O(n) rebuild out of
    /// tight editing loops.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.chars());
        assert_eq!(
            self.line_index,
            expected,
            "line_index drift detected after {} mutations!\n  buffer len: {}\n  actual line_starts:   {:?}\n  expected line_starts: {:?}",
            self.debug_mutation_count,
            self.buffer.len(),
            self.line_index.line_starts(),
            expected.line_starts(),
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextView for TextBuffer {
    fn version(&self) -> Version {
        self.version
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    fn line_extent(&self, line: usize) -> Option<LineExtent> {
        self.line_index.line_extent(line, self.buffer.len())
    }

    fn line_number_at(&self, offset: usize) -> usize {
        self.line_index.line_at_offset(offset)
    }

    fn slice(&self, range: TextRange) -> String {
        self.buffer.slice(range.start, range.end)
    }
}
