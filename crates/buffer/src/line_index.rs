// Chunk: docs/chunks/text_buffer - Versioned text buffer with gap buffer backing

//! Line index for tracking line boundaries in the text buffer.
//!
//! Recognises `\n`, `\r\n` and a lone `\r` as terminators. After an edit
//! the index is rebuilt from the line before the first change; every line
//! start ahead of that point is unaffected.

use crate::types::LineExtent;

/// Tracks line starts and terminator lengths.
///
/// `line_starts[0] == 0` always, and `break_lens` has one entry per line
/// (the last line's terminator length is always 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    break_lens: Vec<u8>,
}

impl LineIndex {
    /// Creates a new line index with a single empty line.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
            break_lens: vec![0],
        }
    }

    /// Rebuilds the whole index from the given content.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.rebuild_from(0, content);
    }

    /// Rebuilds the index starting at `line`.
    ///
    /// `content` must yield the buffer's characters starting at that line's
    /// (unchanged) start offset.
    pub fn rebuild_from<I>(&mut self, line: usize, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        let line = line.min(self.line_count() - 1);
        self.line_starts.truncate(line + 1);
        self.break_lens.truncate(line);

        let mut offset = self.line_starts[line];
        let mut chars = content.into_iter().peekable();
        while let Some(ch) = chars.next() {
            offset += 1;
            match ch {
                '\n' => self.push_line(offset, 1),
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    offset += 1;
                    self.push_line(offset, 2);
                }
                '\r' => self.push_line(offset, 1),
                _ => {}
            }
        }
        self.break_lens.push(0);
    }

    /// Closes the current line with a terminator of `break_len` characters
    /// and opens the next one at `next_start`.
    fn push_line(&mut self, next_start: usize, break_len: u8) {
        self.break_lens.push(break_len);
        self.line_starts.push(next_start);
    }

    /// Returns the number of lines in the buffer.
    ///
    /// A buffer always has at least one line (even if empty).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the character offset where the given line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the bounds of the given line.
    ///
    /// `total_len` is the total number of characters in the buffer.
    pub fn line_extent(&self, line: usize, total_len: usize) -> Option<LineExtent> {
        let start = self.line_start(line)?;
        let extent = match self.line_starts.get(line + 1) {
            Some(&next) => {
                let break_len = usize::from(self.break_lens[line]);
                LineExtent {
                    start,
                    end: next - break_len,
                    end_including_break: next,
                }
            }
            None => LineExtent {
                start,
                end: total_len,
                end_including_break: total_len,
            },
        };
        Some(extent)
    }

    /// Returns the line number containing the given character offset.
    ///
    /// Offsets inside a terminator belong to the line the terminator ends.
    /// Uses binary search for O(log n) lookup.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Returns the raw line_starts array (for debug validation).
    #[cfg(any(debug_assertions, test))]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
