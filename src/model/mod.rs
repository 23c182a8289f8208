//! Core data model for document navigation.
//!
//! This module contains:
//! - The flattened text buffer and its ordered structural markers
//! - The document handle with metadata, TOC, and anchor positions
//! - TOC node types and the hierarchy builder/cleanup passes

mod buffer;
mod document;
pub mod toc;

pub use buffer::{DocumentBuffer, Marker, MarkerType};
pub use document::{Document, DocumentStats};
pub use toc::{
    FlatTocEntry, MAX_HEADING_LEVEL, MAX_TOC_DEPTH, TocNode, build_from_flat_toc,
    build_from_headings, cleanup_toc,
};
