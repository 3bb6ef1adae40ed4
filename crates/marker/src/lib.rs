// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache
// Chunk: docs/chunks/whitespace_actions - Remove-one and remove-all actions

//! wsmark: trailing whitespace tracking for live text buffers.
//!
//! The crate keeps a per-document cache of the lines that end in
//! whitespace and keeps it correct as the buffer is edited, without
//! rescanning the whole document after every keystroke.
//!
//! # Overview
//!
//! - [`locator`] finds the trailing whitespace run of a line.
//! - [`LineSpanCache`] remembers one [`WhitespaceSpan`] per marked line.
//! - [`CacheSynchronizer`] moves cached spans onto new buffer versions and
//!   rescans the lines an edit reported as dirty.
//! - [`actions`] trims one line or the whole document in a single edit.
//! - [`WhitespaceMarker`] ties these together for one open document.
//!
//! # Example
//!
//! ```
//! use wsmark::{MarkerOptions, WhitespaceMarker};
//! use wsmark_buffer::TextBuffer;
//!
//! let mut buffer = TextBuffer::from_str("fn main() {  \n    body();\n}\n");
//! let mut marker = WhitespaceMarker::attach(&mut buffer, MarkerOptions::default());
//! assert!(marker.contains(0));
//!
//! buffer.insert(25, "\t").unwrap();
//! marker.on_buffer_changed(&mut buffer);
//! assert!(marker.contains(1));
//!
//! marker.remove_all(&mut buffer).unwrap();
//! marker.on_buffer_changed(&mut buffer);
//! assert_eq!(buffer.content(), "fn main() {\n    body();\n}\n");
//! assert_eq!(marker.spans().count(), 0);
//! ```

pub mod actions;
mod cache;
mod error;
mod keyed;
pub mod locator;
mod marker;
mod options;
mod span;
mod sync;

pub use actions::Removal;
pub use cache::LineSpanCache;
pub use error::MarkerError;
pub use keyed::{Keyed, KeyedMap};
pub use locator::{locate, locate_line, whitespace_spans};
pub use marker::WhitespaceMarker;
pub use options::MarkerOptions;
pub use span::{LineNumber, SpanChange, WhitespaceSpan};
pub use sync::{lines_to_rescan, CacheSynchronizer};
