// Chunk: docs/chunks/text_buffer - Versioned text buffer with gap buffer backing

//! Gap buffer storage for buffer content.
//!
//! The gap is moved to wherever an edit lands, so an edit transaction that
//! applies its changes back-to-front only pays for the distance between
//! neighbouring changes. Positions are character offsets.

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// A gap buffer holding the characters of the current snapshot.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// The underlying storage. Contains [pre-gap content | gap | post-gap content].
    data: Vec<char>,
    /// Index where the gap starts (first unused position).
    gap_start: usize,
    /// Index where the gap ends (first used position after gap).
    gap_end: usize,
}

impl GapBuffer {
    /// Creates a new empty gap buffer.
    pub fn new() -> Self {
        Self {
            data: vec!['\0'; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    /// Creates a gap buffer initialized with the given text.
    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        data.resize(len + INITIAL_GAP_SIZE, '\0');
        let capacity = data.len();

        Self {
            data,
            gap_start: len,
            gap_end: capacity,
        }
    }

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Moves the gap to the specified logical position.
    ///
    /// This is O(distance) between the current gap and the target.
    fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data.copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows the gap in place so that it holds at least `min_size` slots.
    ///
    /// The gap position is preserved; `insert_str_at` relies on it.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }

        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_gap_end = self.gap_end;
        let old_len = self.data.len();
        let post_gap_len = old_len - old_gap_end;

        let new_size = old_len + growth;
        self.data.resize(new_size, '\0');
        if post_gap_len > 0 {
            self.data
                .copy_within(old_gap_end..old_len, new_size - post_gap_len);
        }
        self.gap_end = new_size - post_gap_len;
    }

    /// Inserts `text` so that its first character lands at `pos`.
    ///
    /// Returns the number of characters inserted.
    pub fn insert_str_at(&mut self, pos: usize, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let count = text.chars().count();
        self.move_gap_to(pos);
        self.ensure_gap(count);
        for ch in text.chars() {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }
        count
    }

    /// Removes the characters in `[start, end)`, clamped to the buffer.
    ///
    /// Returns the number of characters removed.
    pub fn delete_range(&mut self, start: usize, end: usize) -> usize {
        let end = end.min(self.len());
        if start >= end {
            return 0;
        }
        self.move_gap_to(start);
        let count = end - start;
        self.gap_end += count;
        count
    }

    /// Returns the character at the given logical position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        self.data.get(physical).copied()
    }

    /// Returns an iterator over all characters in the buffer.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Returns an iterator over the characters from `start` to the end.
    pub fn chars_from(&self, start: usize) -> impl Iterator<Item = char> + '_ {
        let start = start.min(self.len());
        let (pre_gap, post_gap) = if start < self.gap_start {
            (&self.data[start..self.gap_start], &self.data[self.gap_end..])
        } else {
            let skip = start - self.gap_start;
            (&self.data[..0], &self.data[self.gap_end + skip..])
        };
        pre_gap.iter().chain(post_gap.iter()).copied()
    }

    /// Returns the content of `[start, end)` as a String, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.chars_from(start).take(end - start).collect()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
