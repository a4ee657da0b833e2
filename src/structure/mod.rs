//! # Document Structuring Module
//!
//! ## Purpose
//! Turns one document's flat plain text into an ordered sequence of typed
//! blocks. Structuring is a two-stage pass: the variant-specific ordered rule
//! table classifies each line (`classifier`, tables in `variants`), and the
//! assembler merges continuation lines and assigns deterministic anchor ids
//! (`assembler`).
//!
//! ## Input/Output Specification
//! - **Input**: Catalogue entry plus the document's full plain text
//! - **Output**: An immutable `Document` carrying its block sequence and the
//!   retained source text
//! - **Invariants**: classification totality (every non-blank line lands in
//!   exactly one block), verbatim text retention for indexing, byte-identical
//!   output on identical input

pub mod assembler;
pub mod classifier;
pub mod variants;

pub use assembler::BlockAssembler;
pub use classifier::RuleSet;

use crate::config::DocumentConfig;
use crate::Document;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Ligature glyphs that survive PDF text extraction, mapped to their ASCII
/// expansions before classification so rule patterns see plain letters.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB00}', "ff"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Structure one document: normalize its text against the variant's
/// boilerplate catalogue, classify and assemble blocks, and retain the
/// original text verbatim for the search index.
pub fn structure_document(config: &DocumentConfig, text: &str) -> Document {
    let rules = variants::rule_set(config.variant, &config.extra_headings);
    let normalized = normalize_text(text, &rules.boilerplate);
    let blocks = BlockAssembler::new(&rules, &config.id).assemble(&normalized);
    Document {
        id: config.id.clone(),
        title: config.title.clone(),
        category: config.category.clone(),
        order: config.order,
        variant: config.variant,
        blocks,
        text: text.to_string(),
    }
}

/// Prepare raw extracted text for classification: NFC normalization,
/// ligature expansion, boilerplate removal, and newline-run collapsing.
/// Line content is otherwise preserved; the retained `Document::text` is
/// the unnormalized input.
pub fn normalize_text(text: &str, boilerplate: &[Regex]) -> String {
    let mut normalized: String = text.nfc().collect();
    for (glyph, expansion) in LIGATURES {
        if normalized.contains(*glyph) {
            normalized = normalized.replace(*glyph, expansion);
        }
    }
    for pattern in boilerplate {
        normalized = pattern.replace_all(&normalized, "").into_owned();
    }
    collapse_blank_runs(&normalized)
}

/// Collapse runs of three or more newlines to a single blank line so that
/// boilerplate removal does not fabricate paragraph breaks.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}
