// Chunk: docs/chunks/whitespace_locator - Trailing whitespace detection per line

//! Locating the trailing whitespace run of a line.
//!
//! Detection is purely by character class: anything `char::is_whitespace`
//! accepts counts, so spaces, tabs, form feeds and the Unicode space
//! separators are all trimmed alike. The functions here are stateless and
//! work on any [`TextView`], so they can scan a live buffer or a snapshot.

use wsmark_buffer::{TextRange, TextView};

use crate::span::LineNumber;

/// Returns true for the characters that terminate a line.
pub(crate) fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Finds the whitespace run that ends exactly at `line_end`.
///
/// `line_end` must be a content boundary: the buffer length, or the offset
/// of a `\r` or `\n`. Any other offset yields `None`, as does a line whose
/// last character before `line_end` is not whitespace. The returned range
/// is never empty.
pub fn locate<V: TextView + ?Sized>(view: &V, line_start: usize, line_end: usize) -> Option<TextRange> {
    let at_boundary = line_end == view.len() || view.char_at(line_end).is_some_and(is_line_break);
    if !at_boundary {
        return None;
    }

    let mut start = line_end;
    while start > line_start {
        match view.char_at(start - 1) {
            Some(ch) if ch.is_whitespace() => start -= 1,
            _ => break,
        }
    }

    if start == line_end {
        None
    } else {
        Some(TextRange::new(start, line_end))
    }
}

/// Finds the trailing whitespace of `line`.
///
/// Lines with no content and lines past the end of the view have none.
pub fn locate_line<V: TextView + ?Sized>(view: &V, line: LineNumber) -> Option<TextRange> {
    let extent = view.line_extent(line)?;
    if extent.is_empty() {
        return None;
    }
    locate(view, extent.start, extent.end)
}

/// Yields every line that has trailing whitespace, in document order.
pub fn whitespace_spans<V: TextView + ?Sized>(view: &V) -> impl Iterator<Item = (LineNumber, TextRange)> + '_ {
    (0..view.line_count()).filter_map(move |line| locate_line(view, line).map(|range| (line, range)))
}
