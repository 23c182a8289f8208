//! Text utilities shared by parsers and the reader shell.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Decode bytes to a string, handling various encodings.
///
/// Tries UTF-8 first (BOM handled by encoding_rs), then the hint encoding
/// (from an XML declaration or document metadata), then falls back to
/// Windows-1252, which is common in older documents.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Remove soft hyphens (U+00AD), which exist for line breaking and would
/// otherwise be spoken or matched by search.
#[must_use]
pub fn remove_soft_hyphens(input: &str) -> String {
    input.replace('\u{00AD}', "")
}

/// Percent-decode a URL or anchor fragment.
#[must_use]
pub fn url_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Collapse runs of whitespace (including NBSP) into single spaces.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_was_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() || ch == '\u{00A0}' {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}

/// Trim whitespace and non-breaking spaces from both ends.
#[must_use]
pub fn trim_text(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{00A0}')
}

// ============================================================================
// Tests
// ============================================================================
