//! Plain text files.

use std::fs;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentBuffer};
use crate::parser::{Parser, ParserContext, ParserFlags};
use crate::util::{decode_text, remove_soft_hyphens};

pub struct TextParser;

impl Parser for TextParser {
    fn name(&self) -> &str {
        "Text Files"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "log"]
    }

    fn supported_flags(&self) -> ParserFlags {
        ParserFlags::NONE
    }

    fn parse(&self, context: &ParserContext) -> Result<Document> {
        let bytes = fs::read(&context.file_path)?;
        if bytes.is_empty() {
            return Err(Error::EmptyDocument(context.file_path.display().to_string()));
        }
        let content = decode_text(&bytes, None);
        let content = remove_soft_hyphens(&content);
        let title = context
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();
        let mut doc = Document::new().with_title(title);
        doc.set_buffer(DocumentBuffer::with_content(content));
        Ok(doc)
    }
}
