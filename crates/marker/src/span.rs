// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

use wsmark_buffer::{TextRange, TrackingSpan, Version};

use crate::keyed::Keyed;

/// A zero-based line number in the current snapshot.
///
/// Not stable across edits that add or remove lines above it.
pub type LineNumber = usize;

/// The trailing whitespace run of one line.
///
/// `range` is expressed in the coordinates of `version`. Its end is the
/// line's content end and it is never empty. Spans are only created by
/// reconciliation, so an empty one cannot reach the cache:
///
/// ```compile_fail
/// use wsmark::WhitespaceSpan;
/// use wsmark_buffer::{TextRange, Version};
///
/// let _ = WhitespaceSpan::new(0, TextRange::empty(3), Version::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitespaceSpan {
    line: LineNumber,
    range: TextRange,
    version: Version,
    anchor: Option<TrackingSpan>,
}

impl WhitespaceSpan {
    pub(crate) fn new(line: LineNumber, range: TextRange, version: Version) -> Self {
        debug_assert!(!range.is_empty(), "whitespace span must not be empty");
        Self {
            line,
            range,
            version,
            anchor: None,
        }
    }

    /// Attaches a tracking anchor used to re-locate the span after edits.
    pub fn with_anchor(mut self, anchor: TrackingSpan) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn line(&self) -> LineNumber {
        self.line
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    /// The version `range` is expressed in.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn anchor(&self) -> Option<&TrackingSpan> {
        self.anchor.as_ref()
    }

    /// Moves the span onto `version`, re-anchoring it there. The line
    /// number is kept.
    pub(crate) fn reproject(&mut self, range: TextRange, version: Version) {
        debug_assert!(!range.is_empty());
        self.range = range;
        self.version = version;
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = TrackingSpan::new(range, version, anchor.mode());
        }
    }
}

impl Keyed for WhitespaceSpan {
    type Key = LineNumber;

    fn key(&self) -> LineNumber {
        self.line
    }
}

/// A change to the set of marked lines, reported by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanChange {
    /// The line has trailing whitespace. Carries the current span.
    Marked(WhitespaceSpan),
    /// The line's previous mark was dropped. Carries the span as it was.
    Cleared(WhitespaceSpan),
}

impl SpanChange {
    pub fn span(&self) -> &WhitespaceSpan {
        match self {
            SpanChange::Marked(span) | SpanChange::Cleared(span) => span,
        }
    }

    pub fn line(&self) -> LineNumber {
        self.span().line()
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, SpanChange::Marked(_))
    }
}
