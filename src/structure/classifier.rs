//! # Line Classifier
//!
//! ## Purpose
//! Classifies one trimmed line of legal text into exactly one block kind.
//! Classification is ordered and exclusive: each variant defines an ordered
//! rule list and the first rule whose pattern matches wins. Several legal-text
//! conventions are textually ambiguous (a decimal paragraph number "1.1" vs. a
//! footnote number "1.", an all-caps section header vs. a signature block), so
//! the total ordering of the rule list is the authoritative tie-break.
//!
//! ## Input/Output Specification
//! - **Input**: One trimmed, non-blank line plus the per-document footnote flag
//! - **Output**: Exactly one `Classification`; the mandatory fallback rule
//!   guarantees totality, the classifier never returns "no match"
//!
//! Footnote markers reuse the `<n>.` pattern of generic numbered paragraphs
//! and are recognized only after an explicit FOOTNOTES section header; the
//! flag is document-scoped state owned by the assembler, not by this module.

use crate::config::VariantKind;
use crate::BlockKind;
use regex::Regex;

/// Heading vocabulary for the uppercase short-line heuristic: a match makes
/// the line a major heading, otherwise it is a minor one.
const HEADING_KEYWORDS: &[&str] = &[
    "ARTICLE",
    "CHAPTER",
    "PART",
    "SECTION",
    "TITLE",
    "DECISION",
    "AWARD",
    "TREATY",
    "AGREEMENT",
    "RULE",
    "DECREE",
];

/// How the assembler derives a block's anchor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnchorStyle {
    /// `article-<label>`
    Article,
    /// `<document-id>-<label with dots replaced by dashes>`
    DocLabel,
    /// `annex-para-<label>`
    AnnexPara,
    /// `para-<label>`
    Para,
    /// `para-<document-id>-<label>`
    DocPara,
    /// Slug of the block text
    Section,
    /// Document-scoped running counter
    Counter,
}

/// Pattern half of a rule.
pub(crate) enum Pattern {
    /// The whole trimmed line equals one of these strings
    Exact(Vec<String>),
    /// The trimmed line starts with one of these strings
    Prefix(Vec<String>),
    /// Regex with capture 1 = label and, when present, capture 2 = body
    Labeled(Regex),
    /// `Term: see Article N` index entries
    IndexRef,
    /// Short fully-uppercase line heuristic (strictly 3 < chars < 80)
    UppercaseHeading,
}

/// One ordered classification rule.
pub(crate) struct Rule {
    pub(crate) pattern: Pattern,
    pub(crate) kind: BlockKind,
    /// Whether a match starts a continuation-line consumption loop
    pub(crate) merge: bool,
    pub(crate) anchor: AnchorStyle,
    /// Rule only matches once the per-document FOOTNOTES header was seen
    pub(crate) footnote_gated: bool,
}

impl Rule {
    pub(crate) fn new(pattern: Pattern, kind: BlockKind, merge: bool, anchor: AnchorStyle) -> Self {
        Self {
            pattern,
            kind,
            merge,
            anchor,
            footnote_gated: false,
        }
    }

    pub(crate) fn gated(mut self) -> Self {
        self.footnote_gated = true;
        self
    }
}

/// Result of classifying one line.
pub(crate) struct Classification {
    pub(crate) kind: BlockKind,
    pub(crate) label: Option<String>,
    pub(crate) body: String,
    pub(crate) merge: bool,
    pub(crate) anchor: AnchorStyle,
}

/// An ordered, variant-specific rule table plus its boilerplate catalogue.
pub struct RuleSet {
    pub(crate) variant: VariantKind,
    pub(crate) rules: Vec<Rule>,
    /// Applied to the raw text before classification; see `structure::normalize`
    pub(crate) boilerplate: Vec<Regex>,
}

impl RuleSet {
    /// Classify one trimmed, non-blank line. Total: always returns exactly one
    /// classification, falling back to a merged `PlainParagraph`.
    pub(crate) fn classify(&self, line: &str, footnotes_seen: bool) -> Classification {
        for rule in &self.rules {
            if rule.footnote_gated && !footnotes_seen {
                continue;
            }
            if let Some(classification) = match_rule(rule, line) {
                return classification;
            }
        }
        Classification {
            kind: BlockKind::PlainParagraph,
            label: None,
            body: line.to_string(),
            merge: true,
            anchor: AnchorStyle::Counter,
        }
    }

    /// Whether a line looks like the start of any structural (non-fallback)
    /// pattern of this variant. Continuation loops stop at such lines even
    /// mid-sentence: false negatives in merging are preferred to structural
    /// corruption.
    pub(crate) fn is_structural(&self, line: &str, footnotes_seen: bool) -> bool {
        self.rules
            .iter()
            .filter(|rule| !rule.footnote_gated || footnotes_seen)
            .any(|rule| match_rule(rule, line).is_some())
    }
}

fn match_rule(rule: &Rule, line: &str) -> Option<Classification> {
    match &rule.pattern {
        Pattern::Exact(lines) => lines.iter().any(|l| l == line).then(|| Classification {
            kind: rule.kind,
            label: None,
            body: line.to_string(),
            merge: rule.merge,
            anchor: rule.anchor,
        }),
        Pattern::Prefix(prefixes) => {
            prefixes
                .iter()
                .any(|p| line.starts_with(p.as_str()))
                .then(|| Classification {
                    kind: rule.kind,
                    label: None,
                    body: line.to_string(),
                    merge: rule.merge,
                    anchor: rule.anchor,
                })
        }
        Pattern::Labeled(regex) => regex.captures(line).map(|caps| {
            let label = caps.get(1).map(|m| m.as_str().to_string());
            let body = caps
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Classification {
                kind: rule.kind,
                label,
                body,
                merge: rule.merge,
                anchor: rule.anchor,
            }
        }),
        Pattern::IndexRef => {
            if line.contains(':') && line.contains("see Article") {
                let (term, reference) = line.split_once(':').unwrap_or((line, ""));
                Some(Classification {
                    kind: rule.kind,
                    label: Some(term.trim().to_string()),
                    body: reference.trim().to_string(),
                    merge: rule.merge,
                    anchor: rule.anchor,
                })
            } else {
                None
            }
        }
        Pattern::UppercaseHeading => {
            if !is_uppercase_heading(line) {
                return None;
            }
            let major = HEADING_KEYWORDS.iter().any(|kw| line.contains(kw));
            Some(Classification {
                kind: if major {
                    BlockKind::SectionHeader
                } else {
                    BlockKind::Subtitle
                },
                label: None,
                body: line.to_string(),
                merge: false,
                anchor: if major {
                    AnchorStyle::Section
                } else {
                    AnchorStyle::Counter
                },
            })
        }
    }
}

/// Short fully-uppercase line: contains letters, none of them lowercase, and
/// the character count is strictly between 3 and 80.
fn is_uppercase_heading(line: &str) -> bool {
    let len = line.chars().count();
    if len <= 3 || len >= 80 {
        return false;
    }
    line.chars().any(|c| c.is_alphabetic()) && !line.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::variants;

    #[test]
    fn first_matching_rule_wins() {
        let rules = variants::rule_set(VariantKind::Rules, &[]);
        // "1.1" is a decimal paragraph, not a footnote or sub-item
        let c = rules.classify("1.1 The parties agree.", false);
        assert_eq!(c.kind, BlockKind::NumberedParagraph);
        assert_eq!(c.label.as_deref(), Some("1.1"));
        assert_eq!(c.body, "The parties agree.");
        assert!(c.merge);
    }

    #[test]
    fn classifier_is_total() {
        for variant in [
            VariantKind::Rules,
            VariantKind::Treaty,
            VariantKind::Narrative,
            VariantKind::Generic,
        ] {
            let rules = variants::rule_set(variant, &[]);
            for line in [
                "completely unremarkable prose",
                "¶ odd glyphs ¶",
                "(unclosed paren",
                "12",
                "a",
            ] {
                let c = rules.classify(line, false);
                // Fallback covers everything; no text may be dropped
                assert!(!c.body.is_empty() || c.label.is_some(), "line: {line:?}");
                let _ = c.kind;
            }
        }
    }

    #[test]
    fn uppercase_heuristic_bounds_are_strict() {
        assert!(!is_uppercase_heading("ABC")); // len 3 excluded
        assert!(is_uppercase_heading("ABCD"));
        assert!(!is_uppercase_heading(&"A".repeat(80)));
        assert!(!is_uppercase_heading("1234")); // no letters
        assert!(!is_uppercase_heading("Mixed Case Line"));
    }

    #[test]
    fn uppercase_keyword_promotes_to_section_header() {
        let rules = variants::rule_set(VariantKind::Generic, &[]);
        let major = rules.classify("DECISION ON PETITIONS FOR REHEARING", false);
        assert_eq!(major.kind, BlockKind::SectionHeader);
        let minor = rules.classify("MIXED CLAIMS COMMISSION", false);
        assert_eq!(minor.kind, BlockKind::Subtitle);
    }

    #[test]
    fn footnote_pattern_requires_footnotes_header() {
        let rules = variants::rule_set(VariantKind::Treaty, &[]);
        let before = rules.classify("1. Treaty series no. 12.", false);
        assert_ne!(before.kind, BlockKind::Footnote);
        let after = rules.classify("1. Treaty series no. 12.", true);
        assert_eq!(after.kind, BlockKind::Footnote);
        assert_eq!(after.label.as_deref(), Some("1"));
    }

    #[test]
    fn index_entries_only_in_rules_variant() {
        let line = "Arbitration Agreement: see Article 23";
        let rules = variants::rule_set(VariantKind::Rules, &[]);
        assert_eq!(rules.classify(line, false).kind, BlockKind::IndexEntry);
        let generic = variants::rule_set(VariantKind::Generic, &[]);
        assert_ne!(generic.classify(line, false).kind, BlockKind::IndexEntry);
    }
}
