//! # In-Place Highlighter
//!
//! ## Purpose
//! Wraps every occurrence of a query inside an already-rendered document
//! fragment, idempotently: a pass always begins by unwrapping any highlight
//! spans a previous pass left behind, so repeated or changed queries never
//! nest or stack marks.
//!
//! ## Input/Output Specification
//! - **Input**: Rendered HTML fragment plus the raw query string
//! - **Output**: The fragment with highlight spans applied, the offset of the
//!   first span, and the total span count
//! - **Invariants**: only text outside markup tags is matched; unwrap then
//!   rewrap of the same query reproduces the fragment byte for byte
//!
//! The highlighter matches the HTML-escaped form of the query against the
//! fragment's text runs, so a query containing `&` or `<` still lines up
//! with the escaped text the renderer produced.

use html_escape::encode_text;

/// Highlight span markup. Distinct from the plain `<mark>` used in search
/// snippets so clearing highlights never touches snippet markup.
pub const MARK_OPEN: &str = r#"<mark class="search-highlight">"#;
pub const MARK_CLOSE: &str = "</mark>";

/// Queries shorter than this (trimmed, in characters) only clear existing
/// highlights. Mirrors the query engine's execution threshold.
const MIN_QUERY_CHARS: usize = 2;

/// Result of one highlight pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// Fragment with highlight spans applied
    pub html: String,
    /// Byte offset of the first highlight span in `html`, for scrolling
    pub first_match: Option<usize>,
    /// Number of spans applied
    pub matches: usize,
}

/// Clear any previous highlight spans, then wrap every occurrence of the
/// trimmed query. An empty or too-short query clears and applies nothing.
pub fn highlight(html: &str, query: &str) -> Highlighted {
    let cleared = clear_marks(html);
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Highlighted {
            html: cleared,
            first_match: None,
            matches: 0,
        };
    }

    let needle = encode_text(query).into_owned();
    let mut matches = 0;
    let mut out = String::with_capacity(cleared.len());
    let mut i = 0;
    while i < cleared.len() {
        if cleared.as_bytes()[i] == b'<' {
            // Copy the tag through untouched
            let end = cleared[i..]
                .find('>')
                .map(|p| i + p + 1)
                .unwrap_or(cleared.len());
            out.push_str(&cleared[i..end]);
            i = end;
        } else {
            let end = cleared[i..].find('<').map(|p| i + p).unwrap_or(cleared.len());
            wrap_run(&cleared[i..end], &needle, &mut out, &mut matches);
            i = end;
        }
    }

    let first_match = out.find(MARK_OPEN);
    Highlighted {
        html: out,
        first_match,
        matches,
    }
}

/// Remove every highlight span, keeping its contents. Leaves any other
/// markup, including snippet `<mark>` tags, untouched.
pub fn clear_marks(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find(MARK_OPEN) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + MARK_OPEN.len()..];
        match after.find(MARK_CLOSE) {
            Some(close) => {
                out.push_str(&after[..close]);
                rest = &after[close + MARK_CLOSE.len()..];
            }
            None => {
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Wrap every occurrence of `needle` in one text run, ASCII-case-insensitively,
/// preserving the original casing of the matched text.
fn wrap_run(run: &str, needle: &str, out: &mut String, matches: &mut usize) {
    let mut rest = run;
    while let Some(pos) = crate::search::find_ascii_ci(rest, needle) {
        out.push_str(&rest[..pos]);
        out.push_str(MARK_OPEN);
        out.push_str(&rest[pos..pos + needle.len()]);
        out.push_str(MARK_CLOSE);
        *matches += 1;
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAGMENT: &str = r#"<h2 class="section-header" id="preamble">PREAMBLE</h2>
<p>The parties agree to arbitration. Arbitration is final.</p>"#;

    #[test]
    fn every_occurrence_is_wrapped_case_insensitively() {
        let result = highlight(FRAGMENT, "arbitration");
        assert_eq!(result.matches, 2);
        assert!(result
            .html
            .contains(&format!("{MARK_OPEN}arbitration{MARK_CLOSE}")));
        assert!(result
            .html
            .contains(&format!("{MARK_OPEN}Arbitration{MARK_CLOSE}")));
    }

    #[test]
    fn text_inside_tags_is_never_matched() {
        let result = highlight(FRAGMENT, "section");
        assert_eq!(result.matches, 0);
        assert_eq!(result.html, FRAGMENT);
    }

    #[test]
    fn repeated_passes_are_idempotent() {
        let once = highlight(FRAGMENT, "arbitration");
        let twice = highlight(&once.html, "arbitration");
        assert_eq!(once.html, twice.html);
        assert_eq!(once.matches, twice.matches);
    }

    #[test]
    fn changing_the_query_replaces_old_spans() {
        let first = highlight(FRAGMENT, "arbitration");
        let second = highlight(&first.html, "parties");
        assert_eq!(second.matches, 1);
        assert!(!second.html.contains(&format!("{MARK_OPEN}arbitration")));
        assert!(second.html.contains(&format!("{MARK_OPEN}parties{MARK_CLOSE}")));
    }

    #[test]
    fn clearing_restores_the_original_fragment() {
        let highlighted = highlight(FRAGMENT, "arbitration");
        assert_eq!(clear_marks(&highlighted.html), FRAGMENT);
    }

    #[test]
    fn short_queries_only_clear() {
        let highlighted = highlight(FRAGMENT, "arbitration");
        let cleared = highlight(&highlighted.html, "");
        assert_eq!(cleared.matches, 0);
        assert_eq!(cleared.html, FRAGMENT);
        let cleared = highlight(&highlighted.html, " a ");
        assert_eq!(cleared.html, FRAGMENT);
    }

    #[test]
    fn first_match_offset_points_at_a_span() {
        let result = highlight(FRAGMENT, "arbitration");
        let offset = result.first_match.unwrap();
        assert!(result.html[offset..].starts_with(MARK_OPEN));
    }

    #[test]
    fn queries_with_markup_characters_match_escaped_text() {
        let fragment = "<p>claims &amp; annexes</p>";
        let result = highlight(fragment, "claims &");
        assert_eq!(result.matches, 1);
        assert!(result
            .html
            .contains(&format!("{MARK_OPEN}claims &amp;{MARK_CLOSE}")));
    }

    #[test]
    fn snippet_marks_survive_clearing() {
        let fragment = "<p>a <mark>plain</mark> snippet mark</p>";
        assert_eq!(clear_marks(fragment), fragment);
    }
}
