//! # lectern
//!
//! Document model, TOC reconstruction, and text search for accessible
//! document readers.
//!
//! Format parsers flatten a document into a single text buffer plus an
//! ordered stream of structural markers (headings, links, breaks). From that
//! flat stream, lectern rebuilds a navigable table-of-contents tree and
//! answers find-next/find-previous queries over the buffer.
//!
//! ## Features
//!
//! - Single-pass TOC reconstruction from leveled headings or depth-tagged
//!   flat TOC entries, tolerant of skipped levels and malformed events
//! - Cleanup pass that collapses parser-introduced duplicate heading layers
//! - Literal and regex text search with case, whole-word, and
//!   forward/backward modes (backward regex included)
//! - Pluggable parser registry with built-in plain-text and Markdown
//!   producers
//!
//! ## Quick Start
//!
//! ```
//! use lectern::{SearchOptions, find_text};
//!
//! // Case-insensitive forward search.
//! let hit = find_text("Hello World", "world", 0, SearchOptions::forward());
//! assert_eq!(hit, Some(6));
//!
//! // Find-previous with whole-word matching.
//! let opts = SearchOptions::backward().with_whole_word(true);
//! let hit = find_text("cat catalog cat", "cat", 15, opts);
//! assert_eq!(hit, Some(12));
//! ```
//!
//! ## Building a TOC
//!
//! ```
//! use lectern::{FlatTocEntry, build_from_flat_toc, cleanup_toc};
//!
//! let entries = vec![
//!     FlatTocEntry::new("Part I", 0, 0),
//!     FlatTocEntry::new("Chapter 1", 120, 1),
//!     FlatTocEntry::new("Chapter 2", 480, 1),
//! ];
//! let mut toc = build_from_flat_toc(&entries);
//! cleanup_toc(&mut toc);
//! assert_eq!(toc[0].children.len(), 2);
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod search;
pub mod util;

pub use error::{Error, Result};
pub use model::{
    Document, DocumentBuffer, DocumentStats, FlatTocEntry, MAX_HEADING_LEVEL, MAX_TOC_DEPTH,
    Marker, MarkerType, TocNode, build_from_flat_toc, build_from_headings, cleanup_toc,
};
pub use parser::{Parser, ParserContext, ParserFlags, ParserInfo, ParserRegistry, load_document};
pub use search::{SearchOptions, find_text};
