//! The parser interface and registry.
//!
//! A parser flattens one document format into a [`Document`]: buffer text,
//! structural markers, optionally a flat TOC. [`load_document`] picks a
//! parser by file extension, runs it, then builds and cleans the navigation
//! tree. Heavyweight format parsers (EPUB, DOCX, ODT, FB2, HTML) live
//! outside this crate and feed the same interface; plain text and Markdown
//! ship built in.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::model::{Document, build_from_headings, cleanup_toc};

pub mod markdown;
pub mod text;

bitflags! {
    /// Structural features a parser can produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParserFlags: u32 {
        const NONE = 0;
        const SUPPORTS_SECTIONS = 1 << 0;
        const SUPPORTS_TOC = 1 << 1;
        const SUPPORTS_PAGES = 1 << 2;
        const SUPPORTS_LISTS = 1 << 3;
    }
}

/// What a parser needs to load a document.
#[derive(Debug, Clone)]
pub struct ParserContext {
    pub file_path: PathBuf,
    /// For encrypted formats; ignored by parsers that have no use for it.
    pub password: Option<String>,
}

impl ParserContext {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            password: None,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

pub trait Parser: Send + Sync {
    fn name(&self) -> &str;
    fn extensions(&self) -> &[&str];
    fn supported_flags(&self) -> ParserFlags;
    fn parse(&self, context: &ParserContext) -> Result<Document>;
}

/// Descriptive snapshot of a registered parser, for format pickers.
#[derive(Debug, Clone)]
pub struct ParserInfo {
    pub name: String,
    pub extensions: Vec<String>,
    pub flags: ParserFlags,
}

/// Parsers keyed by name, looked up by file extension.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn Parser>>,
}

impl ParserRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P: Parser + 'static>(&mut self, parser: P) {
        self.parsers.insert(parser.name().to_string(), Box::new(parser));
    }

    #[must_use]
    pub fn parser(&self, name: &str) -> Option<&dyn Parser> {
        self.parsers.get(name).map(|p| &**p)
    }

    #[must_use]
    pub fn parser_for_extension(&self, extension: &str) -> Option<&dyn Parser> {
        self.parsers
            .values()
            .find(|p| p.extensions().iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .map(|p| &**p)
    }

    #[must_use]
    pub fn all_parsers(&self) -> Vec<ParserInfo> {
        self.parsers
            .values()
            .map(|p| ParserInfo {
                name: p.name().to_string(),
                extensions: p.extensions().iter().map(|s| s.to_string()).collect(),
                flags: p.supported_flags(),
            })
            .collect()
    }

    /// The process-wide registry with the built-in parsers.
    pub fn global() -> &'static ParserRegistry {
        static REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let mut registry = ParserRegistry::new();
            registry.register(text::TextParser);
            registry.register(markdown::MarkdownParser);
            registry
        })
    }
}

/// Load a document: pick a parser by extension, parse, then build the
/// navigation tree.
///
/// Parsers that read a native TOC populate `doc.toc` themselves; for the
/// rest the tree is reconstructed from heading markers. Either way the
/// cleanup pass runs before the document reaches navigation.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
    let parser = ParserRegistry::global()
        .parser_for_extension(extension)
        .ok_or_else(|| Error::UnsupportedFormat(format!(".{extension}")))?;

    let context = ParserContext::new(path);
    let mut doc = parser.parse(&context)?;
    if doc.toc.is_empty() {
        doc.toc = build_from_headings(&doc.buffer);
    }
    cleanup_toc(&mut doc.toc);
    doc.compute_stats();
    Ok(doc)
}
