// Chunk: docs/chunks/edit_transactions - Atomic edits and offset translation

//! Bounded record of applied edits, used to carry offsets forward from an
//! older snapshot to the current one.
//!
//! Each applied edit stores its changes in the coordinates of the version it
//! was applied to, sorted by start offset and non-overlapping. Translating an
//! offset replays those changes in order.

use std::collections::VecDeque;

use crate::error::BufferError;
use crate::types::{TextRange, TrackingMode, Version};

/// One replaced region of an applied edit, in pre-edit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextChange {
    pub start: usize,
    pub old_len: usize,
    pub new_len: usize,
}

impl TextChange {
    fn old_end(&self) -> usize {
        self.start + self.old_len
    }
}

/// Which way an offset moves when text is inserted exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gravity {
    /// Stay in front of the inserted text.
    Backward,
    /// Move past the inserted text.
    Forward,
}

#[derive(Debug, Clone)]
struct VersionDelta {
    /// The version these changes produced.
    version: Version,
    changes: Vec<TextChange>,
}

#[derive(Debug, Clone)]
pub(crate) struct ChangeHistory {
    deltas: VecDeque<VersionDelta>,
    limit: usize,
}

impl ChangeHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            deltas: VecDeque::new(),
            limit,
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.prune();
    }

    /// Records the changes that produced `version`.
    pub fn record(&mut self, version: Version, changes: Vec<TextChange>) {
        self.deltas.push_back(VersionDelta { version, changes });
        self.prune();
    }

    fn prune(&mut self) {
        while self.deltas.len() > self.limit {
            self.deltas.pop_front();
        }
    }

    /// Returns the oldest version offsets can still be translated from.
    pub fn oldest(&self, current: Version) -> Version {
        self.deltas
            .front()
            .map(|delta| Version::new(delta.version.get() - 1))
            .unwrap_or(current)
    }

    /// Carries `range`, taken from version `from`, forward to `current`.
    pub fn translate(
        &self,
        range: TextRange,
        from: Version,
        current: Version,
        mode: TrackingMode,
    ) -> Result<TextRange, BufferError> {
        let oldest = self.oldest(current);
        if from > current || from < oldest {
            return Err(BufferError::VersionUnavailable {
                requested: from,
                oldest,
                current,
            });
        }

        let (start_gravity, end_gravity) = match mode {
            TrackingMode::EdgeInclusive => (Gravity::Backward, Gravity::Forward),
            TrackingMode::EdgeExclusive => (Gravity::Forward, Gravity::Backward),
        };

        let mut start = range.start;
        let mut end = range.end;
        for delta in self.deltas.iter().filter(|delta| delta.version > from) {
            start = map_offset(&delta.changes, start, start_gravity);
            end = map_offset(&delta.changes, end, end_gravity).max(start);
        }
        Ok(TextRange::new(start, end))
    }
}

/// Maps one offset across a sorted list of changes.
///
/// An offset inside replaced text collapses onto the replacement: to its
/// front with backward gravity, past it with forward gravity.
fn map_offset(changes: &[TextChange], offset: usize, gravity: Gravity) -> usize {
    let mut added = 0;
    let mut removed = 0;
    for change in changes {
        if offset < change.start {
            break;
        }
        let after_change =
            offset > change.old_end() || (offset == change.old_end() && change.old_len > 0);
        if after_change {
            added += change.new_len;
            removed += change.old_len;
            continue;
        }

        let front = change.start + added - removed;
        match gravity {
            Gravity::Backward => return front,
            // Several insertions may share one offset; keep walking past them.
            Gravity::Forward if change.old_len == 0 => added += change.new_len,
            Gravity::Forward => return front + change.new_len,
        }
    }
    offset + added - removed
}
