//! The loaded-document handle handed to the reader shell.

use std::collections::HashMap;

use super::buffer::DocumentBuffer;
use super::toc::TocNode;

/// Word/line/character counts over the buffer text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub word_count: usize,
    pub line_count: usize,
    pub char_count: usize,
}

impl DocumentStats {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            line_count: text.lines().count(),
            char_count: text.chars().count(),
        }
    }
}

/// A fully loaded document: metadata, flattened buffer, navigation tree,
/// and anchor positions.
///
/// Produced once per load and immutable afterwards; discarded when the
/// document is closed. In a multi-threaded host the caller serializes
/// access (single writer at load, many readers after).
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub buffer: DocumentBuffer,
    pub toc: Vec<TocNode>,
    /// Anchor id -> byte offset, for resolving internal references.
    pub id_positions: HashMap<String, usize>,
    pub stats: DocumentStats,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn set_buffer(&mut self, buffer: DocumentBuffer) {
        self.buffer = buffer;
    }

    /// Buffer offset for an anchor reference, consulting the id map first
    /// and ignoring any leading `#`.
    #[must_use]
    pub fn resolve_reference(&self, reference: &str) -> Option<usize> {
        let id = reference.strip_prefix('#').unwrap_or(reference);
        self.id_positions.get(id).copied()
    }

    pub fn compute_stats(&mut self) {
        self.stats = DocumentStats::from_text(&self.buffer.content);
    }
}
