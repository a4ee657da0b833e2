//! # Variant Rule Tables
//!
//! ## Purpose
//! Declarative, ordered rule tables for each family of legal-document
//! conventions, plus the per-variant boilerplate catalogues stripped before
//! classification. The variants form a closed set dispatched by a document's
//! declared type; extending to a new document family means adding a table
//! here, including an explicit decision on the footnote/numbered-paragraph
//! ambiguity for that family.

use super::classifier::{AnchorStyle, Pattern, Rule, RuleSet};
use crate::config::VariantKind;
use crate::BlockKind;
use regex::Regex;

/// Repository artifacts and page furniture common to all variants. These are
/// the only lines the engine is allowed to drop.
const COMMON_BOILERPLATE: &[&str] = &[
    r"View the document on jusmundi\.com",
    r"(?mi)^page \d+ \(original document\)$",
    r"(?m)^--- Page \d+ ---$",
    r"(?m)^PAGE \d+$",
    r"(?m)^< BACK TO CONTENTS$",
    r"(?m)^\*\*\*$",
    r"(?m)^\d+\s*$",
];

/// Navigation noise found in consolidated legislation prints.
const LEGISLATION_BOILERPLATE: &[&str] = &[
    r"(?mi)^Status:[^\n]*",
    r"(?mi)^Changes to legislation:[^\n]*",
    r"Extent Information\s*E\d+",
    r"Modifications etc\. \(not altering text\)\s*C\d+",
    r"\(See end of Document for details\)",
];

fn regexes(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid boilerplate pattern {p:?}: {e}")))
        .collect()
}

fn labeled(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule pattern {pattern:?}: {e}"))
}

fn exact(lines: &[&str], kind: BlockKind, anchor: AnchorStyle) -> Rule {
    let lines = lines.iter().map(|l| l.to_string()).collect();
    Rule::new(Pattern::Exact(lines), kind, false, anchor)
}

fn prefix(prefixes: &[&str], kind: BlockKind, merge: bool, anchor: AnchorStyle) -> Rule {
    let prefixes = prefixes.iter().map(|p| p.to_string()).collect();
    Rule::new(Pattern::Prefix(prefixes), kind, merge, anchor)
}

/// Build the ordered rule table for a variant. `extra_headings` contributes
/// additional literal section-heading lines (narrative documents name their
/// own title as a heading).
pub fn rule_set(variant: VariantKind, extra_headings: &[String]) -> RuleSet {
    match variant {
        VariantKind::Rules => rules_style(),
        VariantKind::Treaty => treaty_style(),
        VariantKind::Narrative => narrative_style(extra_headings),
        VariantKind::Generic => generic_style(),
    }
}

/// Arbitration-rules documents: PREAMBLE/INDEX/ANNEX sections, lettered
/// article numbers, decimal paragraph numbering, index entries.
fn rules_style() -> RuleSet {
    let rules = vec![
        exact(
            &["LCIA ARBITRATION RULES"],
            BlockKind::Title,
            AnchorStyle::Counter,
        ),
        prefix(
            &["Effective "],
            BlockKind::Subtitle,
            false,
            AnchorStyle::Counter,
        ),
        exact(
            &[
                "PREAMBLE",
                "INDEX (in alphabetical order)",
                "ANNEX TO THE LCIA RULES",
            ],
            BlockKind::SectionHeader,
            AnchorStyle::Section,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"(?i)^ARTICLE\s+(\d+[A-C]?)\s*[-–—]\s*(.+)$")),
            BlockKind::ArticleHeader,
            false,
            AnchorStyle::Article,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^(\d+\.\d+)\s+(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::DocLabel,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"(?i)^\(([ivx]+|[a-z]|\d{1,2})\)\s+(.*)$")),
            BlockKind::SubItem,
            true,
            AnchorStyle::Counter,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^Paragraph\s+(\d+):\s*(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::AnnexPara,
        ),
        Rule::new(
            Pattern::IndexRef,
            BlockKind::IndexEntry,
            false,
            AnchorStyle::Counter,
        ),
    ];
    RuleSet {
        variant: VariantKind::Rules,
        rules,
        boilerplate: regexes(COMMON_BOILERPLATE),
    }
}

/// Treaties and agreements: centered title conventions, plenipotentiary and
/// signature lines, footnotes gated by a prior FOOTNOTES header.
fn treaty_style() -> RuleSet {
    let rules = vec![
        exact(
            &["SUPPLEMENTARY AGREEMENT"],
            BlockKind::Title,
            AnchorStyle::Counter,
        ),
        prefix(
            &[
                "Germany and United States",
                "Agreement supplementary",
                "No. ",
            ],
            BlockKind::Subtitle,
            false,
            AnchorStyle::Counter,
        ),
        prefix(
            &["AGREEMENT BETWEEN"],
            BlockKind::SectionHeader,
            true,
            AnchorStyle::Section,
        ),
        prefix(
            &["German and English"],
            BlockKind::Subtitle,
            false,
            AnchorStyle::Counter,
        ),
        exact(
            &["PREAMBLE", "SIGNATURES", "FOOTNOTES"],
            BlockKind::SectionHeader,
            AnchorStyle::Section,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"(?i)^ARTICLE\s+(\d+)\s*[-–—]\s*(.+)$")),
            BlockKind::ArticleHeader,
            false,
            AnchorStyle::Article,
        ),
        // Official titles and signature names must not merge into paragraphs
        prefix(
            &["The PRESIDENT"],
            BlockKind::PlainParagraph,
            false,
            AnchorStyle::Counter,
        ),
        prefix(
            &["Dr. ", "ALANSON", "Alanson"],
            BlockKind::PlainParagraph,
            false,
            AnchorStyle::Counter,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^\((\d+)\)\s+(.*)$")),
            BlockKind::SubItem,
            true,
            AnchorStyle::Counter,
        ),
        // Same surface pattern as a numbered paragraph; only the document
        // scoped FOOTNOTES flag makes it a footnote
        Rule::new(
            Pattern::Labeled(labeled(r"^(\d+)\.\s+(.*)$")),
            BlockKind::Footnote,
            true,
            AnchorStyle::Counter,
        )
        .gated(),
        Rule::new(
            Pattern::UppercaseHeading,
            BlockKind::SectionHeader,
            false,
            AnchorStyle::Section,
        ),
    ];
    RuleSet {
        variant: VariantKind::Treaty,
        rules,
        boilerplate: regexes(COMMON_BOILERPLATE),
    }
}

/// Narrative case studies: fixed heading vocabulary, bare integer paragraph
/// numbers, bracketed tribunal-decision paragraph markers, copyright lines
/// dropped unconditionally.
fn narrative_style(extra_headings: &[String]) -> RuleSet {
    let mut headings = vec![
        "Introduction".to_string(),
        "The Facts".to_string(),
        "The Dispute".to_string(),
        "Signatures:".to_string(),
    ];
    headings.extend(extra_headings.iter().cloned());

    let rules = vec![
        Rule::new(
            Pattern::Exact(headings),
            BlockKind::SectionHeader,
            false,
            AnchorStyle::Section,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^(\d+)\.\s+(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::Para,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^\[(\d+)\]\s+(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::Para,
        ),
    ];

    let mut boilerplate = regexes(COMMON_BOILERPLATE);
    boilerplate.extend(regexes(&[r"(?m)^©[^\n]*"]));
    RuleSet {
        variant: VariantKind::Narrative,
        rules,
        boilerplate,
    }
}

/// Fallback for any other document: uppercase heading heuristic, generic
/// header keywords, bare integer paragraphs, parenthesized sub-items.
fn generic_style() -> RuleSet {
    let rules = vec![
        Rule::new(
            Pattern::UppercaseHeading,
            BlockKind::SectionHeader,
            false,
            AnchorStyle::Section,
        ),
        Rule::new(
            Pattern::Labeled(labeled(
                r"(?i)^((?:Article|Section|Rule|Chapter|Part)\s+(?:\d+|[IVXLC]+))\.?\s*(.*)$",
            )),
            BlockKind::ArticleHeader,
            false,
            AnchorStyle::Article,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^(\d+)\.\s+(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::DocPara,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"^\[(\d+)\]\s+(.*)$")),
            BlockKind::NumberedParagraph,
            true,
            AnchorStyle::DocPara,
        ),
        Rule::new(
            Pattern::Labeled(labeled(r"(?i)^\(([a-z0-9]{1,4})\)\s+(.*)$")),
            BlockKind::SubItem,
            true,
            AnchorStyle::Counter,
        ),
    ];

    let mut boilerplate = regexes(COMMON_BOILERPLATE);
    boilerplate.extend(regexes(LEGISLATION_BOILERPLATE));
    RuleSet {
        variant: VariantKind::Generic,
        rules,
        boilerplate,
    }
}
