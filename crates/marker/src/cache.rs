// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

//! The per-document store of lines known to end in whitespace.
//!
//! A line number is present exactly when the line's content ends in
//! whitespace, as of the last reconciliation. Spans are kept in line order.

use crate::error::MarkerError;
use crate::keyed::KeyedMap;
use crate::span::{LineNumber, WhitespaceSpan};

#[derive(Debug, Clone, Default)]
pub struct LineSpanCache {
    spans: KeyedMap<WhitespaceSpan>,
}

impl LineSpanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Stores `span` under its line, returning the span it replaced.
    pub fn upsert(&mut self, span: WhitespaceSpan) -> Option<WhitespaceSpan> {
        self.spans.upsert(span)
    }

    pub fn remove(&mut self, line: LineNumber) -> Option<WhitespaceSpan> {
        self.spans.remove(line)
    }

    pub fn contains(&self, line: LineNumber) -> bool {
        self.spans.contains(line)
    }

    /// Returns the span recorded for `line`.
    ///
    /// Fails with [`MarkerError::KeyNotFound`] when the line is not marked;
    /// use [`contains`](Self::contains) or [`find`](Self::find) to probe.
    pub fn get(&self, line: LineNumber) -> Result<&WhitespaceSpan, MarkerError> {
        self.spans.get(line).ok_or(MarkerError::KeyNotFound { line })
    }

    pub fn find(&self, line: LineNumber) -> Option<&WhitespaceSpan> {
        self.spans.get(line)
    }

    /// Iterates over every cached span in line order.
    pub fn all(&self) -> impl Iterator<Item = &WhitespaceSpan> + '_ {
        self.spans.iter()
    }

    pub fn lines(&self) -> impl Iterator<Item = LineNumber> + '_ {
        self.spans.keys()
    }

    pub fn last_line(&self) -> Option<LineNumber> {
        self.spans.last_key()
    }

    /// Removes every span at `line` or below it.
    pub fn evict_from(&mut self, line: LineNumber) -> Vec<WhitespaceSpan> {
        self.spans.split_off(line)
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&mut WhitespaceSpan) -> bool) {
        self.spans.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wsmark_buffer::{TextRange, Version};

    fn span(line: LineNumber, start: usize, end: usize) -> WhitespaceSpan {
        WhitespaceSpan::new(line, TextRange::new(start, end), Version::default())
    }

    #[test]
    fn test_upsert_overwrites_and_returns_previous() {
        let mut cache = LineSpanCache::new();
        assert_eq!(cache.upsert(span(2, 10, 12)), None);
        assert_eq!(cache.upsert(span(2, 11, 12)), Some(span(2, 10, 12)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(2).unwrap().range(), TextRange::new(11, 12));
    }

    #[test]
    fn test_get_missing_line_is_key_not_found() {
        let cache = LineSpanCache::new();
        assert!(matches!(cache.get(4), Err(MarkerError::KeyNotFound { line: 4 })));
        assert!(cache.find(4).is_none());
    }

    #[test]
    fn test_remove_reports_what_was_there() {
        let mut cache = LineSpanCache::new();
        cache.upsert(span(0, 1, 2));
        assert_eq!(cache.remove(0), Some(span(0, 1, 2)));
        assert_eq!(cache.remove(0), None);
        assert!(!cache.contains(0));
    }

    #[test]
    fn test_all_is_line_ordered() {
        let mut cache = LineSpanCache::new();
        cache.upsert(span(9, 50, 51));
        cache.upsert(span(1, 3, 4));
        cache.upsert(span(4, 20, 22));
        assert_eq!(cache.lines().collect::<Vec<_>>(), vec![1, 4, 9]);
        assert_eq!(cache.last_line(), Some(9));
    }

    #[test]
    fn test_evict_from_drops_the_tail_only() {
        let mut cache = LineSpanCache::new();
        for line in 0..4 {
            cache.upsert(span(line, line * 10, line * 10 + 1));
        }
        let evicted = cache.evict_from(2);
        assert_eq!(evicted.iter().map(|s| s.line()).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(cache.lines().collect::<Vec<_>>(), vec![0, 1]);
    }
}
