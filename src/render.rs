//! # Markup Renderer
//!
//! ## Purpose
//! Renders a structured document into an HTML fragment, one element per
//! block, in block order. Rendering is a pure function of the block sequence:
//! anchor ids were fixed by the assembler, body text is escaped here, and
//! labels are emitted verbatim inside their wrapper spans.
//!
//! ## Input/Output Specification
//! - **Input**: One `Document` (its ordered blocks)
//! - **Output**: An HTML fragment string, one line per block
//! - **Determinism**: Byte-identical output for identical block sequences

use crate::config::VariantKind;
use crate::{Block, BlockKind, Document};
use html_escape::encode_text;

/// Render a whole document as an HTML fragment, blocks joined by newlines.
pub fn render_document(doc: &Document) -> String {
    let fragments: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| render_block(block, doc.variant))
        .collect();
    fragments.join("\n")
}

/// Render one block. Rules- and treaty-style article headers display as
/// "Article <n>"; generic article headers carry the keyword in their label
/// ("Section IV") and are displayed verbatim.
pub fn render_block(block: &Block, variant: VariantKind) -> String {
    let text = encode_text(&block.text);
    let label = block.label.as_deref().unwrap_or("");
    let label = encode_text(label);
    let id = &block.anchor_id;
    match block.kind {
        BlockKind::Title => format!(r#"<h1 class="doc-title">{text}</h1>"#),
        BlockKind::Subtitle => format!(r#"<p class="doc-subtitle"><em>{text}</em></p>"#),
        BlockKind::SectionHeader => {
            format!(r#"<h2 class="section-header" id="{id}">{text}</h2>"#)
        }
        BlockKind::ArticleHeader => {
            let display = match variant {
                VariantKind::Rules | VariantKind::Treaty => format!("Article {label}"),
                VariantKind::Narrative | VariantKind::Generic => label.to_string(),
            };
            format!(
                r#"<h3 class="article-header" id="{id}"><span class="article-num">{display}</span> <span class="article-title">{text}</span></h3>"#
            )
        }
        BlockKind::NumberedParagraph => format!(
            r#"<div class="para-block" id="{id}"><span class="para-num">{label}</span><p>{text}</p></div>"#
        ),
        BlockKind::SubItem => format!(
            r#"<div class="sub-para"><span class="sub-num">({label})</span><p>{text}</p></div>"#
        ),
        BlockKind::Footnote => {
            format!(r#"<div class="footnote"><sup>{label}</sup> {text}</div>"#)
        }
        BlockKind::IndexEntry => {
            format!(r#"<div class="index-entry"><strong>{label}:</strong> {text}</div>"#)
        }
        BlockKind::PlainParagraph => format!("<p>{text}</p>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(kind: BlockKind, label: Option<&str>, text: &str, anchor: &str) -> Block {
        Block {
            kind,
            label: label.map(str::to_string),
            text: text.to_string(),
            anchor_id: anchor.to_string(),
        }
    }

    #[test]
    fn numbered_paragraph_carries_anchor_and_label() {
        let b = block(
            BlockKind::NumberedParagraph,
            Some("9.16"),
            "The award shall be final.",
            "lcia_rules-9-16",
        );
        assert_eq!(
            render_block(&b, VariantKind::Rules),
            r#"<div class="para-block" id="lcia_rules-9-16"><span class="para-num">9.16</span><p>The award shall be final.</p></div>"#
        );
    }

    #[test]
    fn article_display_varies_by_variant() {
        let b = block(BlockKind::ArticleHeader, Some("5"), "Formation", "article-5");
        let rules = render_block(&b, VariantKind::Rules);
        assert!(rules.contains(r#"<span class="article-num">Article 5</span>"#));

        let g = block(
            BlockKind::ArticleHeader,
            Some("Section IV"),
            "Jurisdiction",
            "article-Section-IV",
        );
        let generic = render_block(&g, VariantKind::Generic);
        assert!(generic.contains(r#"<span class="article-num">Section IV</span>"#));
        assert!(!generic.contains("Article Section"));
    }

    #[test]
    fn body_text_is_escaped() {
        let b = block(
            BlockKind::PlainParagraph,
            None,
            "claims < 1921 & \"reparations\"",
            "block-1",
        );
        let html = render_block(&b, VariantKind::Generic);
        assert!(html.contains("&lt; 1921 &amp;"));
        assert!(!html.contains("< 1921"));
    }

    #[test]
    fn fragments_join_in_block_order() {
        let doc = Document {
            id: "d".to_string(),
            title: "D".to_string(),
            category: "misc".to_string(),
            order: 1,
            variant: VariantKind::Treaty,
            blocks: vec![
                block(BlockKind::SectionHeader, None, "PREAMBLE", "preamble"),
                block(BlockKind::PlainParagraph, None, "Considering that", "block-1"),
            ],
            text: String::new(),
        };
        let html = render_document(&doc);
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("<h2"));
        assert!(lines[1].starts_with("<p>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let b = block(BlockKind::Footnote, Some("1"), "Treaty series no. 12.", "block-1");
        assert_eq!(
            render_block(&b, VariantKind::Treaty),
            render_block(&b, VariantKind::Treaty)
        );
    }
}
