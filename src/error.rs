//! Error types for lectern operations.

use thiserror::Error;

/// Errors that can occur while loading a document.
///
/// TOC building and text search never fail: malformed structural events are
/// dropped and invalid search patterns collapse to not-found.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty document: {0}")]
    EmptyDocument(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
