//! # Block Assembler
//!
//! ## Purpose
//! Consumes a document's line stream and the variant rule table, merges
//! continuation lines, and emits the ordered block sequence. A PDF wraps a
//! logical paragraph across many short physical lines; the assembler
//! reassembles them by consuming lines until the next structural marker,
//! a blank line, or end of input.
//!
//! ## Input/Output Specification
//! - **Input**: Variant rule table, normalized line sequence, document id
//! - **Output**: Ordered `Vec<Block>` with unique deterministic anchor ids
//! - **Invariants**: single pass, linear amortized (each continuation loop
//!   owns the lines it consumes); 100% of non-blank input text is retained
//!   across block bodies; blank lines terminate blocks and never produce one
//!
//! The continuation loop is a small explicit automaton: after a rule match
//! the assembler is "inside block X, watching for any structural marker",
//! and leaves that state on blank, marker, or end of input. The footnote
//! section flag is document-scoped state owned by one assembler invocation,
//! reset for every document.

use super::classifier::{AnchorStyle, Classification, RuleSet};
use crate::{Block, BlockKind};
use std::collections::HashSet;

/// Assembles one document's blocks. Create a fresh assembler per document;
/// it carries only document-scoped state.
pub struct BlockAssembler<'a> {
    rules: &'a RuleSet,
    doc_id: &'a str,
    /// Set once a literal FOOTNOTES section header was emitted
    footnotes_seen: bool,
    counter: usize,
    used_anchors: HashSet<String>,
}

impl<'a> BlockAssembler<'a> {
    pub fn new(rules: &'a RuleSet, doc_id: &'a str) -> Self {
        Self {
            rules,
            doc_id,
            footnotes_seen: false,
            counter: 0,
            used_anchors: HashSet::new(),
        }
    }

    /// Run the single assembly pass over the normalized text.
    pub fn assemble(mut self, text: &str) -> Vec<Block> {
        let lines: Vec<&str> = text.lines().collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }

            let classification = self.rules.classify(line, self.footnotes_seen);
            let mut body = classification.body.clone();
            i += 1;

            if classification.merge {
                // Inside the block, watching for any structural marker.
                while i < lines.len() {
                    let next = lines[i].trim();
                    if next.is_empty() || self.rules.is_structural(next, self.footnotes_seen) {
                        break;
                    }
                    append_continuation(&mut body, next);
                    i += 1;
                }
            }

            let anchor_id = self.anchor_for(&classification, &body);
            if classification.kind == BlockKind::SectionHeader && body == "FOOTNOTES" {
                self.footnotes_seen = true;
            }
            blocks.push(Block {
                kind: classification.kind,
                label: classification.label,
                text: body,
                anchor_id,
            });
        }

        blocks
    }

    /// Derive the deterministic anchor id for a block, made unique within the
    /// document by a numeric suffix on collision.
    fn anchor_for(&mut self, classification: &Classification, body: &str) -> String {
        let label = classification.label.as_deref().unwrap_or("");
        let base = match classification.anchor {
            AnchorStyle::Article => format!("article-{}", sanitize_label(label)),
            AnchorStyle::DocLabel => format!("{}-{}", self.doc_id, label.replace('.', "-")),
            AnchorStyle::AnnexPara => format!("annex-para-{label}"),
            AnchorStyle::Para => format!("para-{label}"),
            AnchorStyle::DocPara => format!("para-{}-{}", self.doc_id, label),
            AnchorStyle::Section => {
                let slug = slugify(body);
                if slug.is_empty() {
                    self.next_counter()
                } else {
                    slug
                }
            }
            AnchorStyle::Counter => self.next_counter(),
        };

        let mut anchor = base.clone();
        let mut suffix = 2;
        while !self.used_anchors.insert(anchor.clone()) {
            anchor = format!("{base}-{suffix}");
            suffix += 1;
        }
        anchor
    }

    fn next_counter(&mut self) -> String {
        self.counter += 1;
        format!("block-{}", self.counter)
    }
}

/// Append a continuation line, repairing end-of-line hyphenation: a body
/// ending in `-` joins the next line without a space, dropping the hyphen.
fn append_continuation(body: &mut String, line: &str) {
    if body.ends_with('-') {
        body.pop();
        body.push_str(line);
    } else {
        body.push(' ');
        body.push_str(line);
    }
}

/// Anchor-safe form of a label: dots and whitespace become dashes, other
/// non-alphanumeric characters are dropped; case is preserved ("9A").
fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if c == '.' || c.is_whitespace() || c == '-' {
            if !out.ends_with('-') {
                out.push('-');
            }
        }
    }
    out.trim_matches('-').to_string()
}

/// Lowercased slug of a heading line, parentheses and punctuation dropped.
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            if !out.ends_with('-') {
                out.push('-');
            }
        }
    }
    out.trim_matches('-').to_string()
}
