//! TOC reconstruction from flat structural events.
//!
//! Parsers emit structure as a flat, order-preserving stream: leveled
//! heading markers (level 1-6) or depth-tagged TOC entries (depth 0-32,
//! from formats that carry a native TOC). One generic single-pass algorithm
//! turns either shape into an ownership tree; a cleanup pass then collapses
//! redundant duplicate heading layers some producers introduce.

use super::buffer::DocumentBuffer;

/// Deepest heading level recognized when building from heading markers.
pub const MAX_HEADING_LEVEL: i32 = 6;

/// Deepest nesting depth recognized when building from flat TOC entries.
pub const MAX_TOC_DEPTH: i32 = 32;

// ============================================================================
// Public Types
// ============================================================================

/// A table-of-contents entry: display name, optional anchor reference,
/// buffer offset, and ordered children.
///
/// Each node exclusively owns its children; sibling order is document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub name: String,
    pub reference: Option<String>,
    /// Byte offset into the buffer content.
    pub offset: usize,
    pub children: Vec<TocNode>,
}

impl TocNode {
    #[must_use]
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            reference: None,
            offset,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }
}

/// A flat, depth-tagged TOC entry as emitted by parsers that read a native
/// TOC (EPUB nav/NCX, DOCX outline, FB2 sections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTocEntry {
    pub name: String,
    pub reference: Option<String>,
    /// Byte offset into the buffer content.
    pub offset: usize,
    pub depth: i32,
}

impl FlatTocEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, offset: usize, depth: i32) -> Self {
        Self {
            name: name.into(),
            reference: None,
            offset,
            depth,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

// ============================================================================
// Hierarchy builder
// ============================================================================

/// One structural event fed to the generic builder. Both public entry
/// points normalize their input to this shape; only the valid level range
/// differs between them.
struct TocEvent {
    name: String,
    reference: Option<String>,
    offset: usize,
    level: i32,
}

/// Build a TOC tree from the buffer's heading markers (levels 1-6).
///
/// Markers with a level outside the valid range are dropped; skipped levels
/// are tolerated (an h3 directly under an h1 nests under the h1).
#[must_use]
pub fn build_from_headings(buffer: &DocumentBuffer) -> Vec<TocNode> {
    let events = buffer.heading_markers().map(|m| TocEvent {
        name: m.text.clone(),
        reference: m.reference.clone(),
        offset: m.position,
        level: m.level,
    });
    build_nested(events, 1, MAX_HEADING_LEVEL)
}

/// Build a TOC tree from flat depth-tagged entries (depths 0-32).
///
/// Depth 0 entries attach directly to the root; anchor references are
/// carried onto the resulting nodes.
#[must_use]
pub fn build_from_flat_toc(entries: &[FlatTocEntry]) -> Vec<TocNode> {
    let events = entries.iter().map(|e| TocEvent {
        name: e.name.clone(),
        reference: e.reference.clone(),
        offset: e.offset,
        level: e.depth,
    });
    build_nested(events, 0, MAX_TOC_DEPTH)
}

/// Single forward pass over the event stream: O(n) time, O(depth) space.
///
/// The currently open container at each level always lies on the rightmost
/// spine of the forest, so the open set is a stack of levels and a node's
/// parent list is reached by walking last children. An event closes every
/// open container at its own level or deeper, attaches under the nearest
/// remaining open container (the root if none), and becomes open itself.
fn build_nested<I>(events: I, min_level: i32, max_level: i32) -> Vec<TocNode>
where
    I: IntoIterator<Item = TocEvent>,
{
    let mut forest: Vec<TocNode> = Vec::new();
    let mut open: Vec<i32> = Vec::new();

    for event in events {
        if event.level < min_level || event.level > max_level {
            // Malformed event: dropped, never an error.
            continue;
        }

        while open.last().is_some_and(|&level| level >= event.level) {
            open.pop();
        }

        let mut siblings = &mut forest;
        for _ in 0..open.len() {
            let last = siblings.len() - 1;
            siblings = &mut siblings[last].children;
        }

        let mut node = TocNode::new(event.name, event.offset);
        node.reference = event.reference;
        siblings.push(node);
        open.push(event.level);
    }

    forest
}

// ============================================================================
// Cleanup pass
// ============================================================================

/// Collapse redundant duplicate heading layers, in place.
///
/// Some producers wrap a section in a heading node that merely repeats its
/// first subsection's title (the source document states the title twice). A
/// node whose first child has the same name (case-insensitive) and a
/// compatible reference absorbs that child: the grandchildren are spliced
/// in at the front, and a parent without a reference adopts the child's
/// reference and offset.
///
/// Each node is checked against its first child once, before recursing, so
/// a duplicate chain nested more than one level deep is only partially
/// collapsed per pass. This is long-standing behavior that navigation
/// consumers rely on; keep it.
pub fn cleanup_toc(nodes: &mut Vec<TocNode>) {
    for node in nodes.iter_mut() {
        if let Some(first) = node.children.first() {
            let same_name = node.name.to_lowercase() == first.name.to_lowercase();
            let compatible_ref = node.reference == first.reference || node.reference.is_none();
            if same_name && compatible_ref {
                let mut first = node.children.remove(0);
                if node.reference.is_none() && first.reference.is_some() {
                    // The duplicate parent adopts the more specific anchor.
                    node.reference = first.reference.take();
                    node.offset = first.offset;
                }
                let mut merged = std::mem::take(&mut first.children);
                merged.append(&mut node.children);
                node.children = merged;
            }
        }
        cleanup_toc(&mut node.children);
    }
}

// ============================================================================
// Tests
// ============================================================================
