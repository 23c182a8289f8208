//! End-to-end document loading through the parser registry.

use std::fs;

use lectern::{Error, MarkerType, load_document};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_plain_text() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", "Just some plain text.\nSecond line.\n");
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.title, "notes");
    assert!(doc.toc.is_empty());
    assert_eq!(doc.stats.line_count, 2);
    assert_eq!(doc.stats.word_count, 6);
}

#[test]
fn test_load_markdown_builds_toc() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "guide.md",
        "# Guide\n\nIntro paragraph.\n\n## Install\n\nSteps here.\n\n## Usage\n\nMore text.\n",
    );
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.title, "guide");
    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].name, "Guide");
    let children: Vec<_> = doc.toc[0].children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(children, vec!["Install", "Usage"]);

    // TOC offsets land on the heading text in the buffer.
    let install = &doc.toc[0].children[0];
    assert_eq!(&doc.buffer.content[install.offset..install.offset + 7], "Install");
}

#[test]
fn test_duplicate_heading_layer_is_collapsed_on_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "dup.md",
        "# My Book\n\n## My Book\n\n### Chapter 1\n\nText.\n",
    );
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].name, "My Book");
    // The duplicate level-2 wrapper is gone; Chapter 1 is a direct child.
    assert_eq!(doc.toc[0].children.len(), 1);
    assert_eq!(doc.toc[0].children[0].name, "Chapter 1");
}

#[test]
fn test_markdown_links_become_markers() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "links.md", "Read [the docs](https://docs.rs) first.\n");
    let doc = load_document(&path).unwrap();
    let link = doc
        .buffer
        .markers
        .iter()
        .find(|m| m.kind == MarkerType::Link)
        .unwrap();
    assert_eq!(link.reference.as_deref(), Some("https://docs.rs"));
}

#[test]
fn test_empty_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.txt", "");
    assert!(matches!(load_document(&path), Err(Error::EmptyDocument(_))));
}

#[test]
fn test_extension_routing() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "readme.markdown", "# Title\n\nBody.\n");
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.toc.len(), 1);
}
