// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

//! Keeping the cache in agreement with the buffer.
//!
//! Two passes run after every change. Re-projection moves each cached span
//! onto the current version through the buffer's offset translation, so
//! spans on untouched lines still point at the right text. Reconciliation
//! then rescans only the lines the change feed reported.

use std::ops::Range;

use tracing::{debug, trace};
use wsmark_buffer::{
    BufferError, DirtyLines, TextBuffer, TextRange, TextView, TrackingMode, TrackingSpan, Version,
};

use crate::cache::LineSpanCache;
use crate::locator::locate_line;
use crate::options::MarkerOptions;
use crate::span::{LineNumber, SpanChange, WhitespaceSpan};

/// Brings a [`LineSpanCache`] back into agreement with a buffer.
#[derive(Debug, Clone, Copy)]
pub struct CacheSynchronizer {
    track_anchors: bool,
}

impl CacheSynchronizer {
    pub fn new(track_anchors: bool) -> Self {
        Self { track_anchors }
    }

    pub fn from_options(options: &MarkerOptions) -> Self {
        Self::new(options.track_anchors)
    }

    /// Rescans `changed_lines` and updates the cache to match.
    ///
    /// Every line that has trailing whitespace is (re)marked, whether or not
    /// it was cached before. Every line that is now clean and had a cached
    /// span is cleared. Lines past the end of `view` count as clean.
    pub fn reconcile<V: TextView + ?Sized>(
        &self,
        cache: &mut LineSpanCache,
        view: &V,
        changed_lines: impl IntoIterator<Item = LineNumber>,
    ) -> Vec<SpanChange> {
        let version = view.version();
        let mut changes = Vec::new();
        let mut scanned = 0usize;

        for line in changed_lines {
            scanned += 1;
            match locate_line(view, line) {
                Some(range) => {
                    let span = self.make_span(line, range, version);
                    let previous = cache.upsert(span);
                    trace!(line, %range, replaced = previous.is_some(), "marked trailing whitespace");
                    changes.push(SpanChange::Marked(span));
                }
                None => {
                    if let Some(previous) = cache.remove(line) {
                        trace!(line, "cleared trailing whitespace");
                        changes.push(SpanChange::Cleared(previous));
                    }
                }
            }
        }

        debug!(
            %version,
            scanned,
            affected = changes.len(),
            cached = cache.len(),
            "reconciled whitespace cache"
        );
        changes
    }

    /// Moves every cached span onto the buffer's current version.
    ///
    /// A span whose range can no longer be translated, or whose text was
    /// deleted entirely, is evicted and reported as cleared; the next
    /// reconciliation of that line will find it again if needed.
    pub fn reproject(&self, cache: &mut LineSpanCache, buffer: &TextBuffer) -> Vec<SpanChange> {
        let current = buffer.version();
        let mut evicted = Vec::new();

        cache.retain(|span| {
            if span.version() == current {
                return true;
            }
            match translate_span(span, buffer) {
                Ok(range) if !range.is_empty() => {
                    span.reproject(range, current);
                    true
                }
                Ok(_) => {
                    trace!(line = span.line(), "evicting span whose text was deleted");
                    evicted.push(SpanChange::Cleared(*span));
                    false
                }
                Err(err) => {
                    debug!(line = span.line(), %err, "evicting span that no longer translates");
                    evicted.push(SpanChange::Cleared(*span));
                    false
                }
            }
        });

        evicted
    }

    /// Drops every cached span keyed at or beyond `line_count`.
    pub fn evict_deleted_lines(&self, cache: &mut LineSpanCache, line_count: usize) -> Vec<SpanChange> {
        let evicted = cache.evict_from(line_count);
        if !evicted.is_empty() {
            debug!(line_count, evicted = evicted.len(), "evicted spans of deleted lines");
        }
        evicted.into_iter().map(SpanChange::Cleared).collect()
    }

    fn make_span(&self, line: LineNumber, range: TextRange, version: Version) -> WhitespaceSpan {
        let span = WhitespaceSpan::new(line, range, version);
        if self.track_anchors {
            span.with_anchor(TrackingSpan::new(range, version, TrackingMode::EdgeInclusive))
        } else {
            span
        }
    }
}

impl Default for CacheSynchronizer {
    fn default() -> Self {
        Self::from_options(&MarkerOptions::default())
    }
}

/// Translates a span onto the buffer's current version, through its anchor
/// when it has one.
pub(crate) fn translate_span(span: &WhitespaceSpan, buffer: &TextBuffer) -> Result<TextRange, BufferError> {
    match span.anchor() {
        Some(anchor) => anchor.resolve(buffer),
        None => buffer.translate(span.range(), span.version(), TrackingMode::EdgeInclusive),
    }
}

/// Expands a drained change feed into the line numbers to rescan.
pub fn lines_to_rescan(dirty: &DirtyLines, line_count: usize) -> Range<LineNumber> {
    dirty.line_range(line_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines_of(changes: &[SpanChange]) -> Vec<(bool, LineNumber)> {
        changes.iter().map(|c| (c.is_marked(), c.line())).collect()
    }

    fn full_pass(sync: &CacheSynchronizer, cache: &mut LineSpanCache, buffer: &TextBuffer) -> Vec<SpanChange> {
        sync.reconcile(cache, buffer, 0..buffer.line_count())
    }

    // ==================== reconcile ====================

    #[test]
    fn test_reconcile_marks_lines_with_trailing_whitespace() {
        let buffer = TextBuffer::from_str("a  \nb\n\t\n");
        let mut cache = LineSpanCache::new();
        let changes = full_pass(&CacheSynchronizer::default(), &mut cache, &buffer);

        assert_eq!(lines_of(&changes), vec![(true, 0), (true, 2)]);
        assert_eq!(cache.get(0).unwrap().range(), TextRange::new(1, 3));
        assert_eq!(cache.get(2).unwrap().range(), TextRange::new(6, 7));
        assert!(!cache.contains(1));
        assert!(!cache.contains(3));
    }

    #[test]
    fn test_reconcile_clears_lines_that_became_clean() {
        let mut buffer = TextBuffer::from_str("a  \nb  ");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.delete(TextRange::new(1, 3)).unwrap();
        let mut changes = sync.reproject(&mut cache, &buffer);
        changes.extend(sync.reconcile(&mut cache, &buffer, [0]));

        assert_eq!(lines_of(&changes), vec![(false, 0)]);
        assert!(!cache.contains(0));
        assert_eq!(cache.get(1).unwrap().range(), TextRange::new(3, 5));
    }

    #[test]
    fn test_reconcile_reports_updates_of_already_marked_lines() {
        let mut buffer = TextBuffer::from_str("a \n");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.insert(2, "\t").unwrap();
        sync.reproject(&mut cache, &buffer);
        let changes = sync.reconcile(&mut cache, &buffer, [0]);

        assert_eq!(changes, vec![SpanChange::Marked(*cache.get(0).unwrap())]);
        assert_eq!(cache.get(0).unwrap().range(), TextRange::new(1, 3));
    }

    #[test]
    fn test_reconcile_is_a_fixed_point() {
        let buffer = TextBuffer::from_str(" x \n\n  \ny\t\r\nz");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);
        let once: Vec<_> = cache.all().copied().collect();
        full_pass(&sync, &mut cache, &buffer);
        let twice: Vec<_> = cache.all().copied().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_line_without_entry_reports_nothing() {
        let buffer = TextBuffer::from_str("abc");
        let mut cache = LineSpanCache::new();
        let changes = CacheSynchronizer::default().reconcile(&mut cache, &buffer, [0, 5]);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_anchors_follow_the_option() {
        let buffer = TextBuffer::from_str("a ");
        let mut cache = LineSpanCache::new();
        CacheSynchronizer::new(false).reconcile(&mut cache, &buffer, [0]);
        assert!(cache.get(0).unwrap().anchor().is_none());

        CacheSynchronizer::new(true).reconcile(&mut cache, &buffer, [0]);
        let anchor = cache.get(0).unwrap().anchor().copied().unwrap();
        assert_eq!(anchor.origin(), TextRange::new(1, 2));
        assert_eq!(anchor.mode(), TrackingMode::EdgeInclusive);
    }

    // ==================== reproject ====================

    #[test]
    fn test_reproject_shifts_spans_below_an_insertion() {
        let mut buffer = TextBuffer::from_str("top\nmid  \nend\t");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.insert(1, "0123").unwrap();
        let evicted = sync.reproject(&mut cache, &buffer);

        assert!(evicted.is_empty());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1).unwrap().range(), TextRange::new(11, 13));
        assert_eq!(cache.get(2).unwrap().range(), TextRange::new(17, 18));
        assert_eq!(cache.get(1).unwrap().version(), buffer.version());
    }

    #[test]
    fn test_reproject_without_anchors_uses_the_stored_range() {
        let mut buffer = TextBuffer::from_str("a\nb  ");
        let sync = CacheSynchronizer::new(false);
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.insert(0, "xx").unwrap();
        buffer.insert(0, "y").unwrap();
        sync.reproject(&mut cache, &buffer);
        assert_eq!(cache.get(1).unwrap().range(), TextRange::new(6, 8));
    }

    #[test]
    fn test_reproject_evicts_spans_whose_text_was_deleted() {
        let mut buffer = TextBuffer::from_str("a   \nb");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.delete(TextRange::new(1, 4)).unwrap();
        let evicted = sync.reproject(&mut cache, &buffer);
        assert_eq!(lines_of(&evicted), vec![(false, 0)]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reproject_evicts_spans_older_than_the_history() {
        let mut buffer = TextBuffer::from_str("a \n").with_history_limit(2);
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        for _ in 0..3 {
            buffer.insert(3, "z").unwrap();
        }
        let evicted = sync.reproject(&mut cache, &buffer);
        assert_eq!(evicted.len(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reproject_keeps_untouched_spans_past_the_history_limit() {
        let mut buffer = TextBuffer::from_str("a  \nb").with_history_limit(2);
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        for _ in 0..6 {
            let end = buffer.len();
            buffer.insert(end, "x").unwrap();
            assert!(sync.reproject(&mut cache, &buffer).is_empty());
        }

        let span = cache.get(0).unwrap();
        assert_eq!(span.range(), TextRange::new(1, 3));
        assert_eq!(span.version(), buffer.version());
        assert_eq!(span.anchor().map(|a| a.origin_version()), Some(buffer.version()));
    }

    #[test]
    fn test_reproject_leaves_current_spans_alone() {
        let buffer = TextBuffer::from_str("a \n");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);
        assert!(sync.reproject(&mut cache, &buffer).is_empty());
        assert_eq!(cache.len(), 1);
    }

    // ==================== deleted lines ====================

    #[test]
    fn test_evict_deleted_lines_clears_the_tail() {
        let mut buffer = TextBuffer::from_str("a \nb \nc ");
        let sync = CacheSynchronizer::default();
        let mut cache = LineSpanCache::new();
        full_pass(&sync, &mut cache, &buffer);

        buffer.delete(TextRange::new(2, 8)).unwrap();
        assert_eq!(buffer.line_count(), 1);
        let evicted = sync.evict_deleted_lines(&mut cache, buffer.line_count());
        assert_eq!(lines_of(&evicted), vec![(false, 1), (false, 2)]);
        assert_eq!(cache.lines().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_lines_to_rescan_follows_the_change_feed() {
        assert_eq!(lines_to_rescan(&DirtyLines::None, 5), 0..0);
        assert_eq!(lines_to_rescan(&DirtyLines::Single(2), 5), 2..3);
        assert_eq!(lines_to_rescan(&DirtyLines::FromLineToEnd(3), 5), 3..5);
    }
}
