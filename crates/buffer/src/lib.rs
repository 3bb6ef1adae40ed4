// Chunk: docs/chunks/text_buffer - Versioned text buffer with gap buffer backing
// Chunk: docs/chunks/edit_transactions - Atomic edits and offset translation
// Chunk: docs/chunks/text_view_trait - Read-only view shared by buffers and snapshots

//! wsmark-buffer: the document model the whitespace marker observes.
//!
//! This crate provides a gap buffer-backed text buffer with versioned
//! snapshots, atomic edit transactions, offset translation between versions,
//! and dirty line reporting.
//!
//! # Overview
//!
//! The main type is [`TextBuffer`], which provides:
//! - Line-based access through the [`TextView`] trait
//! - Edit transactions ([`TextEdit`]) that apply several changes atomically
//! - Immutable [`Snapshot`]s of any version
//! - Translation of ranges from an older version onto the current one, and
//!   [`TrackingSpan`] anchors built on top of it
//!
//! # Example
//!
//! ```
//! use wsmark_buffer::{DirtyLines, TextBuffer, TextRange, TextView, TrackingMode};
//!
//! let mut buffer = TextBuffer::from_str("let x = 1;  \nlet y = 2;");
//! let anchor = buffer.create_tracking_span(TextRange::new(10, 12), TrackingMode::EdgeInclusive);
//!
//! // Insert a line above the anchored whitespace.
//! let outcome = buffer.insert(0, "// config\n").unwrap();
//! assert_eq!(outcome.dirty, DirtyLines::FromLineToEnd(0));
//! assert_eq!(buffer.line_count(), 3);
//!
//! let moved = anchor.resolve(&buffer).unwrap();
//! assert_eq!(moved, TextRange::new(20, 22));
//! assert_eq!(buffer.slice(moved), "  ");
//! ```
//!
//! # Dirty Line Tracking
//!
//! Each applied edit returns a [`DirtyLines`] value indicating which lines
//! were affected, and the buffer accumulates them for observers:
//!
//! - `DirtyLines::None` - Nothing changed (an empty edit)
//! - `DirtyLines::Single(line)` - Only one line changed
//! - `DirtyLines::Range { from, to }` - Several lines changed in place
//! - `DirtyLines::FromLineToEnd(line)` - All lines from `line` to the end changed
//!   (used when terminators were added or removed)

mod edit;
mod error;
mod gap_buffer;
mod history;
mod line_index;
mod snapshot;
mod text_buffer;
mod text_view;
mod tracking;
mod types;

pub use edit::{EditOutcome, TextEdit};
pub use error::BufferError;
pub use snapshot::Snapshot;
pub use text_buffer::{TextBuffer, DEFAULT_HISTORY_LIMIT};
pub use text_view::TextView;
pub use tracking::TrackingSpan;
pub use types::{DirtyLines, LineExtent, TextRange, TrackingMode, Version};
