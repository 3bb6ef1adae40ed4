// Chunk: docs/chunks/text_buffer - Versioned text buffer with gap buffer backing

use std::fmt;
use std::ops::Range;

/// Monotonic identifier of one buffer snapshot.
///
/// Every applied edit produces the next version. Offsets are only meaningful
/// together with the version they were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the version that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A half-open character range `[start, end)` within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    /// An empty range sitting at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if the two ranges share at least one character.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Character offsets that bound one line of a snapshot.
///
/// `end` is the content boundary (the offset of the terminator, or the
/// buffer length on the last line). `end_including_break` additionally
/// covers the `\n`, `\r\n` or `\r` terminator when one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineExtent {
    pub start: usize,
    pub end: usize,
    pub end_including_break: usize,
}

impl LineExtent {
    /// Returns true if the line has no content (it may still have a terminator).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn break_len(&self) -> usize {
        self.end_including_break - self.end
    }

    pub fn content(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    pub fn content_with_break(&self) -> TextRange {
        TextRange::new(self.start, self.end_including_break)
    }
}

/// How a tracked range reacts to edits that touch its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Insertions at either edge become part of the range.
    #[default]
    EdgeInclusive,
    /// Insertions at either edge stay outside the range.
    EdgeExclusive,
}

/// Information about which lines were dirtied by a mutation.
///
/// Line numbers are expressed in the snapshot produced by the mutation.
/// This is the change feed consumed by whitespace reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyLines {
    /// No lines changed (e.g., an empty edit).
    None,
    /// A single line changed (most insertions, deletions within a line).
    Single(usize),
    /// A range of lines changed [from, to).
    Range { from: usize, to: usize },
    /// Everything from a line to the end of the buffer changed.
    /// Used when an edit adds or removes line terminators, which shifts
    /// the numbering of every subsequent line.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the starting line of the dirty region, if any.
    pub fn start_line(&self) -> Option<usize> {
        match self {
            DirtyLines::None => None,
            DirtyLines::Single(line) => Some(*line),
            DirtyLines::Range { from, .. } => Some(*from),
            DirtyLines::FromLineToEnd(line) => Some(*line),
        }
    }

    /// Resolves the dirty region to concrete line numbers, given the line
    /// count of the snapshot it refers to.
    ///
    /// The result never reaches past `line_count`.
    pub fn line_range(&self, line_count: usize) -> Range<usize> {
        let (from, to) = match self {
            DirtyLines::None => (0, 0),
            DirtyLines::Single(line) => (*line, *line + 1),
            DirtyLines::Range { from, to } => (*from, *to),
            DirtyLines::FromLineToEnd(line) => (*line, line_count),
        };
        let to = to.min(line_count);
        from.min(to)..to
    }

    /// Merges another dirty region into this one, producing the smallest
    /// region that covers both.
    ///
    /// Several edits may land between two reconciliation passes; they are
    /// merged so the observer rescans once, covering everything that changed.
    pub fn merge(&mut self, other: DirtyLines) {
        *self = match (&*self, &other) {
            // None is the identity element
            (DirtyLines::None, _) => other,
            (_, DirtyLines::None) => return,

            (DirtyLines::FromLineToEnd(a), DirtyLines::FromLineToEnd(b)) => {
                DirtyLines::FromLineToEnd((*a).min(*b))
            }
            (DirtyLines::FromLineToEnd(a), other) | (other, DirtyLines::FromLineToEnd(a)) => {
                let b = other.start_line().unwrap_or(*a);
                DirtyLines::FromLineToEnd((*a).min(b))
            }

            (DirtyLines::Single(a), DirtyLines::Single(b)) => {
                if a == b {
                    DirtyLines::Single(*a)
                } else {
                    DirtyLines::Range {
                        from: (*a).min(*b),
                        to: (*a).max(*b) + 1,
                    }
                }
            }

            (DirtyLines::Single(a), DirtyLines::Range { from, to })
            | (DirtyLines::Range { from, to }, DirtyLines::Single(a)) => DirtyLines::Range {
                from: (*from).min(*a),
                to: (*to).max(*a + 1),
            },

            (DirtyLines::Range { from: a, to: b }, DirtyLines::Range { from: c, to: d }) => {
                DirtyLines::Range {
                    from: (*a).min(*c),
                    to: (*b).max(*d),
                }
            }
        };
    }
}
