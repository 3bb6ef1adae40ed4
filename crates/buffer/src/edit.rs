// Chunk: docs/chunks/edit_transactions - Atomic edits and offset translation

//! Edit transactions.
//!
//! A [`TextEdit`] mutably borrows its buffer, so a second transaction on the
//! same buffer cannot be opened while one is alive. Changes are expressed in
//! the coordinates of the version the edit was opened on and are validated
//! before anything is written: `apply` either commits every change as one new
//! version or leaves the buffer untouched. Dropping an edit without applying
//! it discards the pending changes.

use crate::error::BufferError;
use crate::text_buffer::TextBuffer;
use crate::types::{DirtyLines, TextRange, Version};

/// A change queued on an open edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingChange {
    pub range: TextRange,
    pub text: String,
}

/// Result of applying an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The buffer version after the edit. Unchanged for an empty edit.
    pub version: Version,
    /// Lines that were created or reformatted, in the new version's numbering.
    pub dirty: DirtyLines,
    /// Number of changes committed.
    pub changes: usize,
}

/// An open edit transaction on a [`TextBuffer`].
#[derive(Debug)]
#[must_use = "an edit does nothing until it is applied"]
pub struct TextEdit<'a> {
    buffer: &'a mut TextBuffer,
    base: Version,
    changes: Vec<PendingChange>,
}

impl<'a> TextEdit<'a> {
    pub(crate) fn new(buffer: &'a mut TextBuffer) -> Self {
        let base = buffer.version();
        Self {
            buffer,
            base,
            changes: Vec::new(),
        }
    }

    /// The version every queued offset refers to.
    pub fn base_version(&self) -> Version {
        self.base
    }

    /// Returns true if at least one non-empty change is queued.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Queues removal of `range`.
    pub fn delete(&mut self, range: TextRange) -> Result<(), BufferError> {
        self.push(range, String::new())
    }

    /// Queues insertion of `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        self.push(TextRange::empty(offset), text.to_owned())
    }

    /// Queues replacement of `range` with `text`.
    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<(), BufferError> {
        self.push(range, text.to_owned())
    }

    fn push(&mut self, range: TextRange, text: String) -> Result<(), BufferError> {
        if range.start > range.end {
            return Err(BufferError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        let len = self.buffer.len();
        if range.end > len {
            return Err(BufferError::OutOfBounds {
                offset: range.end,
                len,
            });
        }
        // Deleting nothing and inserting nothing leaves no trace.
        if range.is_empty() && text.is_empty() {
            return Ok(());
        }
        self.changes.push(PendingChange { range, text });
        Ok(())
    }

    /// Commits every queued change as a single new buffer version.
    ///
    /// Fails with [`BufferError::OverlappingEdits`] (and changes nothing) if
    /// two queued changes touch the same characters.
    pub fn apply(self) -> Result<EditOutcome, BufferError> {
        let TextEdit {
            buffer,
            mut changes,
            ..
        } = self;

        // Stable sort keeps queue order for insertions sharing one offset.
        changes.sort_by_key(|change| (change.range.start, change.range.end));
        for pair in changes.windows(2) {
            if pair[1].range.start < pair[0].range.end {
                return Err(BufferError::OverlappingEdits {
                    first: pair[0].range,
                    second: pair[1].range,
                });
            }
        }

        Ok(buffer.commit(changes))
    }

    /// Discards the queued changes.
    pub fn cancel(self) {}
}
