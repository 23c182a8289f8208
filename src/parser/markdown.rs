//! Markdown files.
//!
//! Walks the pulldown-cmark event stream once, flowing block content into
//! the buffer with blank-line separation while recording heading and link
//! markers at the positions their text lands.

use std::collections::HashMap;
use std::fs;

use pulldown_cmark::{Event, HeadingLevel, Options, Tag, TagEnd};

use crate::error::{Error, Result};
use crate::model::{Document, DocumentBuffer, Marker, MarkerType};
use crate::parser::{Parser, ParserContext, ParserFlags};
use crate::util::decode_text;

pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "Markdown Files"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn supported_flags(&self) -> ParserFlags {
        ParserFlags::SUPPORTS_TOC
    }

    fn parse(&self, context: &ParserContext) -> Result<Document> {
        let bytes = fs::read(&context.file_path)?;
        if bytes.is_empty() {
            return Err(Error::EmptyDocument(context.file_path.display().to_string()));
        }
        let markdown = decode_text(&bytes, None);
        let (buffer, id_positions) = flatten_markdown(&markdown);
        let title = context
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();
        let mut doc = Document::new().with_title(title);
        doc.set_buffer(buffer);
        doc.id_positions = id_positions;
        Ok(doc)
    }
}

const fn heading_level(level: HeadingLevel) -> i32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

struct Flattener {
    buffer: DocumentBuffer,
    id_positions: HashMap<String, usize>,
    /// Open heading: level plus the text collected so far. Heading text is
    /// held back and appended at the end tag, so the marker lands on it.
    heading: Option<(i32, String)>,
    /// Open link: target URL plus collected link text.
    link: Option<(String, String)>,
}

impl Flattener {
    fn new() -> Self {
        Self {
            buffer: DocumentBuffer::new(),
            id_positions: HashMap::new(),
            heading: None,
            link: None,
        }
    }

    /// Ensure block content starts after a blank line.
    fn break_block(&mut self) {
        if self.buffer.content.is_empty() || self.buffer.content.ends_with("\n\n") {
            return;
        }
        if !self.buffer.content.ends_with('\n') {
            self.buffer.append("\n");
        }
    }

    /// Close a block: single newline, then a blank separator line.
    fn end_block(&mut self) {
        if !self.buffer.content.ends_with('\n') {
            self.buffer.append("\n");
        }
        self.buffer.append("\n");
    }

    /// An open heading swallows all inline text, links included.
    fn text(&mut self, content: &str) {
        if let Some((_, heading_text)) = &mut self.heading {
            heading_text.push_str(content);
        } else if let Some((_, link_text)) = &mut self.link {
            link_text.push_str(content);
        } else {
            self.buffer.append(content);
        }
    }

    fn line_break(&mut self) {
        if let Some((_, heading_text)) = &mut self.heading {
            heading_text.push(' ');
        } else if let Some((_, link_text)) = &mut self.link {
            link_text.push(' ');
        } else {
            self.buffer.append("\n");
        }
    }

    fn end_heading(&mut self) {
        let Some((level, collected)) = self.heading.take() else {
            return;
        };
        let text = collected.trim().to_string();
        if text.is_empty() {
            return;
        }
        let position = self.buffer.current_position();
        // Heading level is always 1-6 here, so the marker type exists.
        if let Some(kind) = MarkerType::heading(level) {
            self.buffer
                .add_marker(Marker::new(kind, position).with_text(&text).with_level(level));
        }
        self.buffer.append(&text);
        self.buffer.append("\n\n");
    }

    fn end_link(&mut self) {
        let Some((url, text)) = self.link.take() else {
            return;
        };
        let position = self.buffer.current_position();
        self.buffer
            .add_marker(Marker::new(MarkerType::Link, position).with_text(&text).with_reference(url));
        if self.heading.is_none() {
            self.buffer.append(&text);
        }
    }
}

/// Flatten a Markdown source into buffer text, markers, and heading-id
/// positions.
fn flatten_markdown(markdown: &str) -> (DocumentBuffer, HashMap<String, usize>) {
    let mut flat = Flattener::new();

    // Heading attributes give us `{#anchor}` ids for the position map.
    for event in pulldown_cmark::Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                flat.break_block();
                if let Some(id) = id {
                    flat.id_positions
                        .insert(id.to_string(), flat.buffer.current_position());
                }
                flat.heading = Some((heading_level(level), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => flat.end_heading(),

            Event::Start(Tag::Link { dest_url, .. }) => {
                flat.link = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Link) => flat.end_link(),

            Event::Text(t) => flat.text(&t),
            Event::Code(code) => flat.text(&code),

            Event::SoftBreak | Event::HardBreak => flat.line_break(),

            Event::Start(Tag::Paragraph)
            | Event::Start(Tag::List(_))
            | Event::Start(Tag::CodeBlock(_))
            | Event::Start(Tag::BlockQuote(_)) => flat.break_block(),

            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::BlockQuote(_))
            | Event::End(TagEnd::List(_)) => flat.end_block(),

            Event::End(TagEnd::Item) => {
                if !flat.buffer.content.ends_with('\n') {
                    flat.buffer.append("\n");
                }
            }

            _ => {}
        }
    }

    (flat.buffer, flat.id_positions)
}
