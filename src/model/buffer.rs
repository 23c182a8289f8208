//! The flattened document text and its structural markers.
//!
//! Parsers emit markers in document order while appending text to the
//! buffer; once a document is loaded the buffer is read-only. All positions
//! are byte offsets into `content`.

/// The kind of structural feature a marker records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerType {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    PageBreak,
    SectionBreak,
    TocItem,
    Link,
    List,
    ListItem,
}

impl MarkerType {
    /// The marker type for a heading of the given level, if it is one the
    /// model can represent (1 through 6).
    #[must_use]
    pub const fn heading(level: i32) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }

    /// Heading level for heading markers, `None` otherwise.
    #[must_use]
    pub const fn heading_level(self) -> Option<i32> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

/// A single structural event at a position in the buffer.
///
/// `level` carries the nesting indicator for heading markers. It is stored
/// as emitted by the parser; consumers that build hierarchy drop values
/// outside their valid range rather than failing.
#[derive(Debug, Clone)]
pub struct Marker {
    pub kind: MarkerType,
    /// Byte offset into the buffer content.
    pub position: usize,
    pub text: String,
    /// Anchor/id target, for links and TOC items.
    pub reference: Option<String>,
    pub level: i32,
}

impl Marker {
    #[must_use]
    pub const fn new(kind: MarkerType, position: usize) -> Self {
        Self {
            kind,
            position,
            text: String::new(),
            reference: None,
            level: 0,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub const fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }
}

/// The full document text plus its ordered marker stream.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuffer {
    pub content: String,
    pub markers: Vec<Marker>,
}

impl DocumentBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_content(content: String) -> Self {
        Self {
            content,
            markers: Vec::new(),
        }
    }

    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Byte offset at which the next appended text will land. Parsers record
    /// this as the position of markers they are about to emit.
    #[must_use]
    pub const fn current_position(&self) -> usize {
        self.content.len()
    }

    /// Heading markers in document order.
    pub fn heading_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.kind.is_heading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_track_appended_text() {
        let mut buffer = DocumentBuffer::new();
        buffer.append("Title\n\n");
        let pos = buffer.current_position();
        buffer.add_marker(
            Marker::new(MarkerType::Heading1, pos)
                .with_text("Chapter")
                .with_level(1),
        );
        buffer.append("Chapter\n\n");
        assert_eq!(buffer.markers[0].position, 7);
        assert_eq!(&buffer.content[7..14], "Chapter");
    }

    #[test]
    fn heading_markers_filters_other_kinds() {
        let mut buffer = DocumentBuffer::new();
        buffer.add_marker(Marker::new(MarkerType::Heading2, 0).with_level(2));
        buffer.add_marker(Marker::new(MarkerType::Link, 4).with_reference("#a"));
        buffer.add_marker(Marker::new(MarkerType::Heading3, 9).with_level(3));
        let levels: Vec<_> = buffer.heading_markers().map(|m| m.level).collect();
        assert_eq!(levels, vec![2, 3]);
    }

    #[test]
    fn heading_level_round_trip() {
        for level in 1..=6 {
            let kind = MarkerType::heading(level).unwrap();
            assert_eq!(kind.heading_level(), Some(level));
        }
        assert_eq!(MarkerType::heading(0), None);
        assert_eq!(MarkerType::heading(7), None);
        assert_eq!(MarkerType::Link.heading_level(), None);
    }
}
