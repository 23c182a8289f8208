//! Text search over a document buffer.
//!
//! [`find_text`] is a pure function of (haystack, needle, start, options);
//! no state persists between calls. The find-next/find-previous commands of
//! a reader shell call it with `forward` set accordingly and carry the last
//! match position themselves.
//!
//! All offsets are byte offsets into the haystack. Not-found is `None`;
//! search has exactly two outcomes, and a pattern the user typed can never
//! surface an error (an uncompilable regex is simply not found).

use std::borrow::Cow;

use memchr::memmem;
use regex::RegexBuilder;

/// Options controlling a [`find_text`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Search forward from `start` (find-next) rather than backward over
    /// `[0, start)` (find-previous).
    pub forward: bool,
    /// Match case exactly instead of case-insensitively.
    pub match_case: bool,
    /// Accept only matches whose adjacent characters are not alphanumeric.
    pub whole_word: bool,
    /// Treat the needle as a regular expression instead of a literal.
    pub use_regex: bool,
}

impl SearchOptions {
    /// Case-insensitive literal forward search.
    #[must_use]
    pub const fn forward() -> Self {
        Self {
            forward: true,
            match_case: false,
            whole_word: false,
            use_regex: false,
        }
    }

    /// Case-insensitive literal backward search.
    #[must_use]
    pub const fn backward() -> Self {
        Self {
            forward: false,
            ..Self::forward()
        }
    }

    #[must_use]
    pub const fn with_match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    #[must_use]
    pub const fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    #[must_use]
    pub const fn with_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::forward()
    }
}

/// Find an occurrence of `needle` in `haystack`.
///
/// Forward searches scan `[start, end)` and return the first match;
/// backward searches scan `[0, start)` and return the rightmost match. The
/// returned offset is absolute. An empty needle never matches, and neither
/// does a regex that fails to compile.
#[must_use]
pub fn find_text(haystack: &str, needle: &str, start: usize, options: SearchOptions) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let start = clamp_to_char_boundary(haystack, start);
    if options.use_regex {
        find_regex(haystack, needle, start, options)
    } else {
        find_literal(haystack, needle, start, options)
    }
}

// ============================================================================
// Regex strategy
// ============================================================================

fn find_regex(haystack: &str, needle: &str, start: usize, options: SearchOptions) -> Option<usize> {
    // The user's string is the pattern verbatim; whole-word just wraps it
    // in word boundaries.
    let pattern = if options.whole_word {
        format!(r"\b{needle}\b")
    } else {
        needle.to_string()
    };
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!options.match_case)
        .build()
        .ok()?;

    if options.forward {
        return regex.find(&haystack[start..]).map(|m| start + m.start());
    }

    // There is no backward-regex primitive. Emulate it with repeated
    // forward searches confined to the shrinking [cursor, start) window,
    // keeping the rightmost match start seen. Costs one forward scan per
    // match before `start`.
    let window = &haystack[..start];
    let mut last_match = None;
    let mut cursor = 0;
    while cursor <= window.len() {
        match regex.find(&window[cursor..]) {
            Some(m) => {
                let found = cursor + m.start();
                last_match = Some(found);
                if found >= window.len() {
                    // Empty-width match at the window end; nothing further
                    // right can exist.
                    break;
                }
                cursor = next_char_boundary(window, found);
            }
            None => break,
        }
    }
    last_match
}

// ============================================================================
// Literal strategy
// ============================================================================

fn find_literal(haystack: &str, needle: &str, start: usize, options: SearchOptions) -> Option<usize> {
    let (hay, ned) = if options.match_case {
        (Cow::Borrowed(haystack), Cow::Borrowed(needle))
    } else {
        (Cow::Owned(fold_case(haystack)), Cow::Owned(fold_case(needle)))
    };

    if !options.whole_word {
        return if options.forward {
            memmem::find(hay[start..].as_bytes(), ned.as_bytes()).map(|p| start + p)
        } else {
            memmem::rfind(hay[..start].as_bytes(), ned.as_bytes())
        };
    }

    // Whole word: step over rejected candidates until one sits on word
    // boundaries or the scan runs off the end of the buffer.
    let mut pos = start;
    loop {
        let candidate = if options.forward {
            memmem::find(hay[pos..].as_bytes(), ned.as_bytes()).map(|p| pos + p)
        } else {
            memmem::rfind(hay[..pos].as_bytes(), ned.as_bytes())
        };
        let at = candidate?;
        if is_word_match(haystack, at, ned.len()) {
            return Some(at);
        }
        if options.forward {
            pos = next_char_boundary(hay.as_ref(), at);
            if pos >= hay.len() {
                return None;
            }
        } else {
            if at == 0 {
                return None;
            }
            // Shrink the window to end one character before the rejected
            // candidate's start.
            pos = prev_char_boundary(hay.as_ref(), at);
        }
    }
}

/// Whole-word check: the characters immediately adjacent to the match (if
/// any) must not be alphanumeric. Reads the unfolded haystack, since case
/// folding never changes alphanumeric classification here.
fn is_word_match(haystack: &str, at: usize, len: usize) -> bool {
    let word_start = haystack[..at]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric());
    let word_end = haystack[at + len..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric());
    word_start && word_end
}

// ============================================================================
// Case folding and boundary helpers
// ============================================================================

/// Lowercase `s` for case-insensitive comparison while keeping every
/// character's UTF-8 length unchanged, so byte offsets into the folded text
/// remain valid in the original. The rare characters whose lowercase form
/// changes length (e.g. 'İ') are left unfolded on both sides.
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}

/// Clamp `pos` to the string and floor it to a char boundary, so a caller
/// carrying a stale cursor can never make search panic.
fn clamp_to_char_boundary(s: &str, pos: usize) -> usize {
    let mut pos = pos.min(s.len());
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// First char boundary strictly after `pos` (or the string's end).
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut next = (pos + 1).min(s.len());
    while !s.is_char_boundary(next) {
        next += 1;
    }
    next
}

/// Last char boundary strictly before `pos`. `pos` must be non-zero.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut prev = pos - 1;
    while !s.is_char_boundary(prev) {
        prev -= 1;
    }
    prev
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_never_matches() {
        assert_eq!(find_text("text", "", 0, SearchOptions::forward()), None);
        let regex = SearchOptions::backward().with_regex(true);
        assert_eq!(find_text("text", "", 4, regex), None);
    }

    #[test]
    fn forward_literal_is_case_insensitive_by_default() {
        assert_eq!(
            find_text("Hello World", "world", 0, SearchOptions::forward()),
            Some(6)
        );
    }

    #[test]
    fn forward_literal_respects_start() {
        let opts = SearchOptions::forward().with_match_case(true);
        assert_eq!(find_text("Hello World", "World", 7, opts), None);
        assert_eq!(find_text("Hello World", "World", 6, opts), Some(6));
    }

    #[test]
    fn backward_literal_finds_rightmost_before_start() {
        let opts = SearchOptions::backward();
        assert_eq!(find_text("abc abc abc", "abc", 11, opts), Some(8));
        assert_eq!(find_text("abc abc abc", "abc", 8, opts), Some(4));
        // A match would have to end at or before start.
        assert_eq!(find_text("abc", "abc", 2, opts), None);
    }

    #[test]
    fn whole_word_rejects_partial_matches() {
        let opts = SearchOptions::backward()
            .with_whole_word(true)
            .with_match_case(true);
        // "cat" inside "catalog" fails the trailing boundary check.
        assert_eq!(find_text("cat catalog cat", "cat", 15, opts), Some(12));

        let forward = SearchOptions::forward().with_whole_word(true);
        assert_eq!(find_text("catalog cat", "cat", 0, forward), Some(8));
        assert_eq!(find_text("catalog concatenate", "cat", 0, forward), None);
    }

    #[test]
    fn whole_word_accepts_buffer_edges() {
        let opts = SearchOptions::forward().with_whole_word(true);
        assert_eq!(find_text("cat", "cat", 0, opts), Some(0));
        assert_eq!(find_text("a cat", "cat", 0, opts), Some(2));
    }

    #[test]
    fn regex_forward_matches_pattern() {
        let opts = SearchOptions::forward().with_regex(true);
        assert_eq!(find_text("Cat dog cot", "c.t", 0, opts), Some(0));
        assert_eq!(find_text("Cat dog cot", "c.t", 1, opts), Some(8));
    }

    #[test]
    fn regex_case_sensitivity() {
        let sensitive = SearchOptions::forward().with_regex(true).with_match_case(true);
        assert_eq!(find_text("Cat dog cot", "c.t", 0, sensitive), Some(8));
    }

    #[test]
    fn regex_whole_word_wraps_pattern() {
        let opts = SearchOptions::forward().with_regex(true).with_whole_word(true);
        assert_eq!(find_text("catalog cat", "c.t", 0, opts), Some(8));
    }

    #[test]
    fn invalid_regex_is_not_found() {
        let opts = SearchOptions::forward().with_regex(true);
        assert_eq!(find_text("anything (here)", "(", 0, opts), None);
        let backward = SearchOptions::backward().with_regex(true);
        assert_eq!(find_text("anything (here)", "(", 15, backward), None);
    }

    #[test]
    fn backward_regex_finds_rightmost_before_start() {
        let opts = SearchOptions::backward().with_regex(true);
        assert_eq!(find_text("abc abc abc", "a.c", 11, opts), Some(8));
        assert_eq!(find_text("abc abc abc", "a.c", 9, opts), Some(4));
        assert_eq!(find_text("abc", "a.c", 0, opts), None);
    }

    #[test]
    fn backward_regex_window_excludes_start() {
        let opts = SearchOptions::backward().with_regex(true);
        // The only match begins before start but ends past it; the window
        // is [0, start), so it is not found.
        assert_eq!(find_text("foo bar", "bar", 4, opts), None);
        assert_eq!(find_text("foo bar", "bar", 7, opts), Some(4));
    }

    #[test]
    fn start_past_end_is_clamped() {
        assert_eq!(find_text("abc", "abc", 100, SearchOptions::forward()), None);
        assert_eq!(find_text("abc abc", "abc", 100, SearchOptions::backward()), Some(4));
    }

    #[test]
    fn start_inside_multibyte_char_is_floored() {
        let text = "héllo héllo";
        // Byte 2 is inside 'é'; flooring must not panic and keeps forward
        // search well-defined.
        assert!(find_text(text, "héllo", 2, SearchOptions::forward()).is_some());
    }

    #[test]
    fn case_folding_handles_non_ascii() {
        let opts = SearchOptions::forward();
        assert_eq!(find_text("CAFÉ", "café", 0, opts), Some(0));
        assert_eq!(find_text("café", "CAFÉ", 0, opts), Some(0));
    }

    #[test]
    fn fold_case_preserves_byte_length() {
        for text in ["MiXeD", "ÉÀÇ", "ΣΙΓΜΑ", "Straße", "İstanbul"] {
            assert_eq!(fold_case(text).len(), text.len());
        }
    }

    #[test]
    fn whole_word_boundary_is_unicode_aware() {
        let opts = SearchOptions::forward().with_whole_word(true);
        // 'é' is alphanumeric, so "cat" inside "caté" is rejected.
        assert_eq!(find_text("caté cat", "cat", 0, opts), Some(6));
    }

    #[test]
    fn whole_word_backward_terminates_at_buffer_start() {
        let opts = SearchOptions::backward().with_whole_word(true);
        assert_eq!(find_text("catalog", "cat", 7, opts), None);
    }
}
