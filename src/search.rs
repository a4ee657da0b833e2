//! # Search Index & Query Engine
//!
//! ## Purpose
//! Builds the flat full-text search index over the structured corpus and
//! executes substring queries against it. The index is a plain array of
//! records in corpus order; queries scan it linearly and return at most one
//! result per document, so result order always mirrors corpus order.
//!
//! ## Input/Output Specification
//! - **Input**: Structured documents (index build), a raw query string (query)
//! - **Output**: Serializable index records; an explicit three-way outcome
//!   (not executed / no matches / ordered results with snippets)
//! - **Key limits**: queries under the minimum length are not executed,
//!   per-record text is capped at build time, and results are capped per query
//!
//! Matching is a case-insensitive substring scan. Case folding is ASCII-only:
//! folding never changes byte offsets, so snippet windows and highlight spans
//! line up with the original text without an offset map. Accented queries
//! still match exactly.

use crate::config::SearchConfig;
use crate::Document;
use html_escape::encode_text;
use serde::{Deserialize, Serialize};

/// One indexed document: identity plus capped plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// The corpus search index, records in corpus (navigation) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub records: Vec<IndexRecord>,
}

impl SearchIndex {
    /// Build the index from structured documents. Documents with empty text
    /// are omitted entirely; record content is truncated to the configured
    /// character cap on a character boundary.
    pub fn build(documents: &[Document], config: &SearchConfig) -> Self {
        let records = documents
            .iter()
            .filter(|doc| !doc.text.is_empty())
            .map(|doc| IndexRecord {
                id: doc.id.clone(),
                title: doc.title.clone(),
                content: truncate_chars(&doc.text, config.max_indexed_chars),
            })
            .collect();
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One query hit: a document plus a markup snippet around its first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: String,
    pub title: String,
    /// Escaped snippet with the matched span wrapped in `<mark>`, clipped
    /// edges marked with ellipses
    pub snippet: String,
}

/// Explicit query outcome. Too-short queries are distinguished from queries
/// that ran and found nothing so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was empty or below the minimum length after trimming
    NotExecuted,
    /// Query ran against the whole index and matched no document
    NoMatches,
    /// At least one document matched; capped, in corpus order
    Matches(Vec<SearchResult>),
}

/// Execute a query with the default limits.
pub fn search(query: &str, index: &SearchIndex) -> SearchOutcome {
    search_with(query, index, &SearchConfig::default())
}

/// Execute a query: trim it, enforce the minimum length, scan records in
/// index order taking the first match per record, and stop at the result cap.
pub fn search_with(query: &str, index: &SearchIndex, config: &SearchConfig) -> SearchOutcome {
    let query = query.trim();
    if query.chars().count() < config.min_query_chars {
        return SearchOutcome::NotExecuted;
    }

    let mut results = Vec::new();
    for record in &index.records {
        if results.len() >= config.max_results {
            break;
        }
        if let Some(offset) = find_ascii_ci(&record.content, query) {
            results.push(SearchResult {
                document_id: record.id.clone(),
                title: record.title.clone(),
                snippet: snippet_around(&record.content, offset, query.len(), config),
            });
        }
    }

    if results.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(results)
    }
}

/// First occurrence of `needle` in `haystack`, ASCII-case-insensitively.
/// Byte offsets are exact because ASCII folding is length-preserving.
pub(crate) fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || n.len() > h.len() {
        return None;
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}

/// Build the escaped snippet around a match: a character-counted context
/// window on either side, the match wrapped in `<mark>`, ellipses where the
/// window clipped the text.
fn snippet_around(content: &str, offset: usize, match_len: usize, config: &SearchConfig) -> String {
    let match_end = offset + match_len;
    let start = back_chars(content, offset, config.snippet_before);
    let end = forward_chars(content, match_end, config.snippet_after);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&encode_text(&content[start..offset]));
    snippet.push_str("<mark>");
    snippet.push_str(&encode_text(&content[offset..match_end]));
    snippet.push_str("</mark>");
    snippet.push_str(&encode_text(&content[match_end..end]));
    if end < content.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Byte index at most `n` characters before `from`, on a char boundary.
fn back_chars(s: &str, from: usize, n: usize) -> usize {
    s[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(from)
}

/// Byte index at most `n` characters past `from`, on a char boundary.
fn forward_chars(s: &str, from: usize, n: usize) -> usize {
    s[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(s.len())
}

/// Truncate to at most `max_chars` characters, on a character boundary.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => s[..i].to_string(),
        None => s.to_string(),
    }
}
