// Chunk: docs/chunks/whitespace_actions - Remove-one and remove-all actions

//! Buffer mutations that trim trailing whitespace.
//!
//! Both actions write through a single [`TextEdit`](wsmark_buffer::TextEdit),
//! so a rejected transaction removes nothing. Neither touches the cache: the
//! edit lands in the buffer's change feed and the next reconciliation pass
//! brings the cache up to date.

use tracing::{debug, warn};
use wsmark_buffer::{BufferError, DirtyLines, TextBuffer, TextRange, TextView, Version};

use crate::error::MarkerError;
use crate::locator::{is_line_break, locate};
use crate::options::MarkerOptions;
use crate::span::WhitespaceSpan;
use crate::sync::translate_span;

/// What a remove action wrote to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Deleted ranges, in the coordinates of the version before the edit,
    /// ordered from the bottom of the document to the top.
    pub ranges: Vec<TextRange>,
    /// The buffer version after the edit.
    pub version: Version,
    pub dirty: DirtyLines,
}

impl Removal {
    /// Total number of characters deleted.
    pub fn removed_chars(&self) -> usize {
        self.ranges.iter().map(TextRange::len).sum()
    }
}

/// Deletes the trailing whitespace recorded by `span`.
///
/// The span is first re-resolved against the current version and clamped
/// to the line its start now sits on. Only whitespace that still ends that
/// line is deleted, so text typed into the run since it was recorded
/// survives and a line break typed into it never moves the deletion onto
/// the next line. Returns `Ok(None)` when the span can no longer be resolved
/// or no longer ends in whitespace.
pub fn remove_one(buffer: &mut TextBuffer, span: &WhitespaceSpan) -> Result<Option<Removal>, MarkerError> {
    let target = match translate_span(span, buffer) {
        Ok(resolved) => trailing_run_on_line(&*buffer, resolved),
        Err(err) => {
            debug!(line = span.line(), %err, "span no longer resolves, nothing to remove");
            None
        }
    };

    let mut edit = buffer.create_edit().map_err(rejected)?;
    let Some(target) = target else {
        edit.cancel();
        return Ok(None);
    };
    edit.delete(target).map_err(rejected)?;
    let outcome = edit.apply().map_err(rejected)?;

    debug!(line = span.line(), range = %target, version = %outcome.version, "removed trailing whitespace");
    Ok(Some(Removal {
        ranges: vec![target],
        version: outcome.version,
        dirty: outcome.dirty,
    }))
}

/// Deletes the trailing whitespace of every line in one atomic edit.
///
/// With `collapse_trailing_blank_lines` set, blank and whitespace-only lines
/// that run through to the end of the document are removed entirely.
pub fn remove_all(buffer: &mut TextBuffer, options: &MarkerOptions) -> Result<Removal, MarkerError> {
    let ranges = trailing_whitespace_deletions(&*buffer, options.collapse_trailing_blank_lines);

    let mut edit = buffer.create_edit().map_err(rejected)?;
    for range in &ranges {
        edit.delete(*range).map_err(rejected)?;
    }
    let base = edit.base_version();
    let outcome = edit.apply().map_err(rejected)?;

    debug!(
        ranges = ranges.len(),
        %base,
        version = %outcome.version,
        "removed trailing whitespace from document"
    );
    Ok(Removal {
        ranges,
        version: outcome.version,
        dirty: outcome.dirty,
    })
}

/// Computes the ranges remove-all deletes, bottom line first.
///
/// Walking upward, every line is blank-tail until the first line with
/// non-whitespace content. Blank-tail lines lose their terminator as well
/// as their whitespace when `collapse_tail` is set.
pub fn trailing_whitespace_deletions<V: TextView + ?Sized>(view: &V, collapse_tail: bool) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    let mut in_blank_tail = collapse_tail;

    for line in (0..view.line_count()).rev() {
        let Some(extent) = view.line_extent(line) else {
            continue;
        };

        let range = if extent.is_empty() {
            in_blank_tail.then(|| extent.content_with_break())
        } else {
            match locate(view, extent.start, extent.end) {
                Some(run) if in_blank_tail && run.start == extent.start => {
                    Some(TextRange::new(run.start, extent.end_including_break))
                }
                Some(run) => {
                    in_blank_tail = false;
                    Some(run)
                }
                None => {
                    in_blank_tail = false;
                    None
                }
            }
        };

        if let Some(range) = range.filter(|range| !range.is_empty()) {
            ranges.push(range);
        }
    }

    ranges
}

/// Returns the trailing whitespace of the line `resolved` starts on, as long
/// as `resolved` still reaches that line's content end.
fn trailing_run_on_line<V: TextView + ?Sized>(view: &V, resolved: TextRange) -> Option<TextRange> {
    let extent = view.line_extent(view.line_number_at(resolved.start))?;
    if resolved.start > extent.end || resolved.end < extent.end {
        return None;
    }
    trailing_run_within(view, TextRange::new(resolved.start.max(extent.start), extent.end))
}

/// Returns the whitespace at the end of `range`, not crossing line breaks.
fn trailing_run_within<V: TextView + ?Sized>(view: &V, range: TextRange) -> Option<TextRange> {
    let mut start = range.end;
    while start > range.start {
        match view.char_at(start - 1) {
            Some(ch) if ch.is_whitespace() && !is_line_break(ch) => start -= 1,
            _ => break,
        }
    }
    (start < range.end).then(|| TextRange::new(start, range.end))
}

fn rejected(err: BufferError) -> MarkerError {
    warn!(%err, "whitespace edit rejected");
    MarkerError::EditRejected(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wsmark_buffer::{TrackingMode, TrackingSpan};

    fn span_at(buffer: &TextBuffer, line: usize, start: usize, end: usize) -> WhitespaceSpan {
        let range = TextRange::new(start, end);
        WhitespaceSpan::new(line, range, buffer.version())
            .with_anchor(TrackingSpan::new(range, buffer.version(), TrackingMode::EdgeInclusive))
    }

    // ==================== remove_one ====================

    #[test]
    fn test_remove_one_deletes_the_span() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        let removal = remove_one(&mut buffer, &span).unwrap().unwrap();
        assert_eq!(buffer.content(), "ab\ncd");
        assert_eq!(removal.ranges, vec![TextRange::new(2, 4)]);
        assert_eq!(removal.removed_chars(), 2);
    }

    #[test]
    fn test_remove_one_follows_edits_above() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        buffer.insert(0, "new\n").unwrap();
        remove_one(&mut buffer, &span).unwrap();
        assert_eq!(buffer.content(), "new\nab\ncd");
    }

    #[test]
    fn test_remove_one_after_the_whitespace_is_gone_is_a_noop() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        buffer.delete(TextRange::new(2, 4)).unwrap();
        let version = buffer.version();

        assert_eq!(remove_one(&mut buffer, &span).unwrap(), None);
        assert_eq!(buffer.version(), version);
        assert_eq!(buffer.content(), "ab\ncd");
    }

    #[test]
    fn test_remove_one_keeps_text_typed_into_the_run() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        // Typing at the end of the run grows the anchored range.
        buffer.insert(4, "x").unwrap();
        assert_eq!(remove_one(&mut buffer, &span).unwrap(), None);
        assert_eq!(buffer.content(), "ab  x\ncd");
    }

    #[test]
    fn test_remove_one_stays_on_its_line_when_a_break_is_typed_into_the_run() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        buffer.insert(3, "\n ").unwrap();
        assert_eq!(buffer.content(), "ab \n  \ncd");

        let removal = remove_one(&mut buffer, &span).unwrap().unwrap();
        assert_eq!(removal.ranges, vec![TextRange::new(2, 3)]);
        assert_eq!(buffer.content(), "ab\n  \ncd");
    }

    #[test]
    fn test_remove_one_is_a_noop_when_the_run_moved_off_the_line_end() {
        let mut buffer = TextBuffer::from_str("ab  \ncd");
        let span = span_at(&buffer, 0, 2, 4);
        // A break typed before the run leaves the anchor starting on line 0
        // with nothing trailing there.
        buffer.insert(2, "\nx").unwrap();
        assert_eq!(buffer.content(), "ab\nx  \ncd");
        let version = buffer.version();

        let removal = remove_one(&mut buffer, &span).unwrap();
        assert_eq!(removal, None);
        assert_eq!(buffer.version(), version);
    }

    #[test]
    fn test_remove_one_on_read_only_buffer_is_rejected() {
        let mut buffer = TextBuffer::from_str("ab  ");
        let span = span_at(&buffer, 0, 2, 4);
        buffer.set_read_only(true);
        let err = remove_one(&mut buffer, &span).unwrap_err();
        assert!(matches!(err, MarkerError::EditRejected(BufferError::ReadOnly)));
        assert_eq!(buffer.content(), "ab  ");
    }

    // ==================== remove_all ====================

    #[test]
    fn test_remove_all_collapses_the_blank_tail() {
        let mut buffer = TextBuffer::from_str("a \nb\t\n\n   \n");
        let removal = remove_all(&mut buffer, &MarkerOptions::default()).unwrap();
        assert_eq!(buffer.content(), "a\nb\n");
        assert_eq!(removal.removed_chars(), 7);
    }

    #[test]
    fn test_remove_all_keeps_interior_blank_lines() {
        let mut buffer = TextBuffer::from_str("a  \n\n  \nb \n");
        remove_all(&mut buffer, &MarkerOptions::default()).unwrap();
        assert_eq!(buffer.content(), "a\n\n\nb\n");
    }

    #[test]
    fn test_remove_all_without_collapse_keeps_every_terminator() {
        let mut buffer = TextBuffer::from_str("a \n\n   \n");
        let options = MarkerOptions {
            collapse_trailing_blank_lines: false,
            ..MarkerOptions::default()
        };
        remove_all(&mut buffer, &options).unwrap();
        assert_eq!(buffer.content(), "a\n\n\n");
    }

    #[test]
    fn test_remove_all_handles_crlf_and_whitespace_only_documents() {
        let mut buffer = TextBuffer::from_str("x \r\n \t\r\n");
        remove_all(&mut buffer, &MarkerOptions::default()).unwrap();
        assert_eq!(buffer.content(), "x\r\n");

        let mut blank = TextBuffer::from_str("   \n\n");
        remove_all(&mut blank, &MarkerOptions::default()).unwrap();
        assert_eq!(blank.content(), "");
    }

    #[test]
    fn test_remove_all_on_clean_document_keeps_the_version() {
        let mut buffer = TextBuffer::from_str("clean\ntext\n");
        let version = buffer.version();
        let removal = remove_all(&mut buffer, &MarkerOptions::default()).unwrap();
        assert!(removal.ranges.is_empty());
        assert_eq!(buffer.version(), version);
    }

    #[test]
    fn test_remove_all_on_read_only_buffer_removes_nothing() {
        let mut buffer = TextBuffer::from_str("a \nb \n");
        buffer.set_read_only(true);
        let err = remove_all(&mut buffer, &MarkerOptions::default()).unwrap_err();
        assert!(matches!(err, MarkerError::EditRejected(BufferError::ReadOnly)));
        assert_eq!(buffer.content(), "a \nb \n");
    }

    #[test]
    fn test_deletions_are_listed_bottom_up() {
        let buffer = TextBuffer::from_str("a \nb \nc");
        let ranges = trailing_whitespace_deletions(&buffer, true);
        assert_eq!(ranges, vec![TextRange::new(4, 5), TextRange::new(1, 2)]);
    }
}
