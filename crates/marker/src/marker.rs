// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

//! The per-document whitespace observer.
//!
//! A [`WhitespaceMarker`] is created when a document is opened and dropped
//! when it closes. The host calls [`WhitespaceMarker::on_buffer_changed`]
//! after edits and before rendering; rendering then asks
//! [`contains`](WhitespaceMarker::contains), [`get`](WhitespaceMarker::get)
//! or [`tags_in`](WhitespaceMarker::tags_in).

use wsmark_buffer::{DirtyLines, TextBuffer, TextView};

use crate::actions::{self, Removal};
use crate::cache::LineSpanCache;
use crate::error::MarkerError;
use crate::options::MarkerOptions;
use crate::span::{LineNumber, SpanChange, WhitespaceSpan};
use crate::sync::{lines_to_rescan, CacheSynchronizer};

#[derive(Debug, Clone)]
pub struct WhitespaceMarker {
    cache: LineSpanCache,
    sync: CacheSynchronizer,
    options: MarkerOptions,
}

impl WhitespaceMarker {
    /// Creates a marker with an empty cache. See [`attach`](Self::attach).
    pub fn new(options: MarkerOptions) -> Self {
        Self {
            cache: LineSpanCache::new(),
            sync: CacheSynchronizer::from_options(&options),
            options,
        }
    }

    /// Starts observing `buffer`.
    ///
    /// Applies the history limit from `options`, discards changes the
    /// buffer accumulated before the marker existed and scans every line.
    pub fn attach(buffer: &mut TextBuffer, options: MarkerOptions) -> Self {
        buffer.set_history_limit(options.history_limit);
        buffer.take_dirty();
        let mut marker = Self::new(options);
        marker.rescan(buffer);
        marker
    }

    /// Reconciles every line of `view` and drops spans past its end.
    pub fn rescan<V: TextView + ?Sized>(&mut self, view: &V) -> Vec<SpanChange> {
        let line_count = view.line_count();
        let mut changes = self.sync.reconcile(&mut self.cache, view, 0..line_count);
        changes.extend(self.sync.evict_deleted_lines(&mut self.cache, line_count));
        changes
    }

    /// Drains the buffer's change feed and brings the cache up to date.
    pub fn on_buffer_changed(&mut self, buffer: &mut TextBuffer) -> Vec<SpanChange> {
        let dirty = buffer.take_dirty();
        self.apply_changes(buffer, &dirty)
    }

    /// Brings the cache up to date with `buffer`, given the lines `dirty`
    /// reports as new or reformatted.
    ///
    /// Cached spans are moved onto the current version first, then the
    /// dirty lines are rescanned, then spans of deleted lines are evicted.
    /// A span that could not be moved is dropped and its line rescanned.
    pub fn apply_changes(&mut self, buffer: &TextBuffer, dirty: &DirtyLines) -> Vec<SpanChange> {
        let line_count = buffer.line_count();
        let mut changes = self.sync.reproject(&mut self.cache, buffer);

        let rescan = lines_to_rescan(dirty, line_count);
        let orphaned: Vec<LineNumber> = changes
            .iter()
            .map(SpanChange::line)
            .filter(|line| !rescan.contains(line))
            .collect();
        changes.extend(
            self.sync
                .reconcile(&mut self.cache, buffer, rescan.chain(orphaned)),
        );
        changes.extend(self.sync.evict_deleted_lines(&mut self.cache, line_count));
        changes
    }

    /// Moves cached spans onto the buffer's current version without
    /// rescanning any line.
    pub fn refresh_offsets(&mut self, buffer: &TextBuffer) -> Vec<SpanChange> {
        self.sync.reproject(&mut self.cache, buffer)
    }

    pub fn contains(&self, line: LineNumber) -> bool {
        self.cache.contains(line)
    }

    pub fn get(&self, line: LineNumber) -> Result<&WhitespaceSpan, MarkerError> {
        self.cache.get(line)
    }

    /// Every marked span, in line order.
    pub fn spans(&self) -> impl Iterator<Item = &WhitespaceSpan> + '_ {
        self.cache.all()
    }

    /// Returns the spans to render for the requested lines.
    ///
    /// Lines without a span are skipped, so the result may be shorter than
    /// the request.
    pub fn tags_in(&self, lines: impl IntoIterator<Item = LineNumber>) -> Vec<WhitespaceSpan> {
        lines
            .into_iter()
            .filter_map(|line| self.cache.find(line).copied())
            .collect()
    }

    pub fn cache(&self) -> &LineSpanCache {
        &self.cache
    }

    pub fn options(&self) -> &MarkerOptions {
        &self.options
    }

    // ==================== Actions ====================

    /// Removes the trailing whitespace of `line`.
    ///
    /// Fails with [`MarkerError::KeyNotFound`] when the line is not marked.
    /// The cache catches up on the next [`on_buffer_changed`](Self::on_buffer_changed).
    pub fn remove_one(&self, buffer: &mut TextBuffer, line: LineNumber) -> Result<Option<Removal>, MarkerError> {
        let span = *self.cache.get(line)?;
        actions::remove_one(buffer, &span)
    }

    /// Removes trailing whitespace from the whole document in one edit.
    pub fn remove_all(&self, buffer: &mut TextBuffer) -> Result<Removal, MarkerError> {
        actions::remove_all(buffer, &self.options)
    }
}

impl Default for WhitespaceMarker {
    fn default() -> Self {
        Self::new(MarkerOptions::default())
    }
}
