//! # Corpus Pipeline
//!
//! ## Purpose
//! Batch orchestration over a configured corpus: acquires each document's
//! text, structures it, renders its fragment, and builds the search index,
//! in catalogue order. One document failing to produce text degrades to an
//! empty document and the run continues; only configuration and output
//! errors abort a run.
//!
//! ## Input/Output Specification
//! - **Input**: Validated configuration plus a `TextSource`
//! - **Output**: `BuiltCorpus` with structured documents, rendered fragments,
//!   the search index, and run statistics
//! - **Determinism**: identical configuration and source text yield
//!   byte-identical documents, fragments, and index records

use crate::config::Config;
use crate::render::render_document;
use crate::search::SearchIndex;
use crate::source::TextSource;
use crate::structure::structure_document;
use crate::{Document, Result};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Everything one corpus run produces.
#[derive(Debug, Clone)]
pub struct BuiltCorpus {
    /// Structured documents in navigation order
    pub documents: Vec<Document>,
    /// Rendered HTML fragment per document id
    pub rendered: BTreeMap<String, String>,
    /// Full-text search index over the non-empty documents
    pub index: SearchIndex,
    pub stats: BuildStats,
}

/// Run statistics, logged at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Documents in the catalogue
    pub total: usize,
    /// Documents that produced at least one block
    pub structured: usize,
    /// Documents degraded to empty content
    pub empty: usize,
    /// Blocks across the whole corpus
    pub blocks: usize,
}

/// Drives one corpus build from a validated configuration.
pub struct CorpusPipeline {
    config: Config,
}

impl CorpusPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the whole corpus. Documents are processed in (order, id) order
    /// so navigation, fragments, and index records come out deterministic
    /// regardless of catalogue file ordering.
    pub fn run(&self, source: &dyn TextSource) -> Result<BuiltCorpus> {
        let mut catalogue = self.config.corpus.documents.clone();
        catalogue.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

        let mut documents = Vec::with_capacity(catalogue.len());
        let mut rendered = BTreeMap::new();
        let mut stats = BuildStats {
            total: catalogue.len(),
            ..BuildStats::default()
        };

        for doc_config in &catalogue {
            let document = match source.full_text(doc_config) {
                Ok(text) => structure_document(doc_config, &text),
                Err(e) if e.is_degradable() => {
                    warn!(document = %doc_config.id, error = %e, "degrading to empty document");
                    Document::empty(doc_config)
                }
                Err(e) => return Err(e),
            };

            if document.blocks.is_empty() {
                stats.empty += 1;
            } else {
                stats.structured += 1;
            }
            stats.blocks += document.blocks.len();
            info!(
                document = %document.id,
                variant = ?document.variant,
                blocks = document.blocks.len(),
                "structured document"
            );

            rendered.insert(document.id.clone(), render_document(&document));
            documents.push(document);
        }

        let index = SearchIndex::build(&documents, &self.config.search);
        info!(
            documents = stats.total,
            structured = stats.structured,
            empty = stats.empty,
            blocks = stats.blocks,
            indexed = index.len(),
            "corpus build complete"
        );

        Ok(BuiltCorpus {
            documents,
            rendered,
            index,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorpusConfig, DocumentConfig, VariantKind};
    use crate::source::StaticSource;
    use pretty_assertions::assert_eq;

    fn doc_config(id: &str, order: u32, variant: VariantKind) -> DocumentConfig {
        DocumentConfig {
            id: id.to_string(),
            title: format!("Title of {id}"),
            category: "misc".to_string(),
            order,
            variant,
            file: None,
            text_file: None,
            extra_headings: Vec::new(),
        }
    }

    fn config(documents: Vec<DocumentConfig>) -> Config {
        Config {
            corpus: CorpusConfig {
                documents,
                ..CorpusConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn documents_come_out_in_order_then_id() {
        let config = config(vec![
            doc_config("zeta", 1, VariantKind::Generic),
            doc_config("alpha", 2, VariantKind::Generic),
            doc_config("beta", 1, VariantKind::Generic),
        ]);
        let mut source = StaticSource::new();
        for id in ["zeta", "alpha", "beta"] {
            source.insert(id, "some text");
        }

        let built = CorpusPipeline::new(config).run(&source).unwrap();
        let ids: Vec<&str> = built.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["beta", "zeta", "alpha"]);
    }

    #[test]
    fn extraction_failure_degrades_without_aborting() {
        let config = config(vec![
            doc_config("present", 1, VariantKind::Generic),
            doc_config("scan_only", 2, VariantKind::Generic),
        ]);
        let mut source = StaticSource::new();
        source.insert("present", "1. A numbered clause.");

        let built = CorpusPipeline::new(config).run(&source).unwrap();
        assert_eq!(built.stats.total, 2);
        assert_eq!(built.stats.structured, 1);
        assert_eq!(built.stats.empty, 1);

        // The empty document keeps its catalogue slot but is not indexed
        assert_eq!(built.documents.len(), 2);
        assert_eq!(built.index.len(), 1);
        assert_eq!(built.rendered.get("scan_only").map(String::as_str), Some(""));
    }

    #[test]
    fn rebuilding_from_identical_input_is_byte_identical() {
        let config = config(vec![
            doc_config("rules", 1, VariantKind::Rules),
            doc_config("treaty", 2, VariantKind::Treaty),
        ]);
        let mut source = StaticSource::new();
        source.insert("rules", "PREAMBLE\n\n1.1 The parties\nagree to arbitrate.\n");
        source.insert("treaty", "PREAMBLE\n\nARTICLE 1 – Scope\nThis agreement applies.\n");

        let pipeline = CorpusPipeline::new(config);
        let a = pipeline.run(&source).unwrap();
        let b = pipeline.run(&source).unwrap();
        assert_eq!(a.documents, b.documents);
        assert_eq!(a.rendered, b.rendered);
        assert_eq!(a.index, b.index);
    }

    #[test]
    fn fragments_and_index_cover_the_same_documents() {
        let config = config(vec![doc_config("only", 1, VariantKind::Narrative)]);
        let mut source = StaticSource::new();
        source.insert("only", "Introduction\n\n1. The case arose in 1922.\n");

        let built = CorpusPipeline::new(config).run(&source).unwrap();
        assert!(built.rendered["only"].contains(r#"class="section-header""#));
        assert_eq!(built.index.records[0].id, "only");
        assert!(built.index.records[0].content.contains("1922"));
    }
}
