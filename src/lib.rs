//! # Legal Corpus Structuring & Search Engine
//!
//! ## Overview
//! This library converts plain-text transcriptions of legal source documents
//! (treaties, arbitration rules, tribunal decisions, statutes) into a
//! structured, hierarchical representation and provides deterministic
//! full-text retrieval over the structured corpus.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `structure`: Line classification and block assembly for each document variant
//! - `render`: Markup generation with deterministic anchor ids
//! - `search`: Index construction and query-time snippet extraction
//! - `highlight`: In-place highlighting of rendered documents
//! - `pipeline`: Batch orchestration over a configured corpus
//! - `source`: Text acquisition seam (extraction collaborator / text overrides)
//! - `config`: Corpus configuration and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Per-document plain text (possibly empty), corpus configuration
//! - **Output**: Typed block sequences, rendered markup fragments, a search
//!   index, and ordered snippet results
//! - **Determinism**: Re-running the pipeline on identical input yields
//!   byte-identical blocks, anchors, and index records
//!
//! ## Usage
//! ```rust,no_run
//! use legal_corpus_search::{Config, pipeline::CorpusPipeline, source::FileSource};
//! use legal_corpus_search::search::{search, SearchOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let source = FileSource::new(&config.corpus.base_dir);
//!     let built = CorpusPipeline::new(config).run(&source)?;
//!     if let SearchOutcome::Matches(results) = search("arbitration", &built.index) {
//!         println!("Found {} results", results.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod highlight;
pub mod pipeline;
pub mod render;
pub mod search;
pub mod source;
pub mod structure;

// Re-exports for convenience
pub use config::{Config, DocumentConfig, VariantKind};
pub use errors::{EngineError, Result};
pub use search::{IndexRecord, SearchIndex, SearchResult};

use serde::{Deserialize, Serialize};

/// The structural unit of a classified document.
///
/// Blocks preserve source order; a block's `label`, once assigned, is
/// immutable, and `anchor_id` is unique among all blocks of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Structural classification of the block
    pub kind: BlockKind,
    /// Optional identifier such as an article or paragraph number.
    /// Kept as a string to preserve formats like "9.16" or "iv".
    pub label: Option<String>,
    /// Fully merged body text, continuation lines joined by single spaces
    pub text: String,
    /// Deterministic identifier, unique within the owning document
    pub anchor_id: String,
}

/// Block classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Subtitle,
    SectionHeader,
    ArticleHeader,
    NumberedParagraph,
    SubItem,
    Footnote,
    IndexEntry,
    PlainParagraph,
}

/// One structured legal document, immutable after the structuring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Globally unique document identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Category tag for navigation grouping
    pub category: String,
    /// Ordering key for navigation; ties broken by id
    pub order: u32,
    /// Rule-table variant the document was structured with
    pub variant: VariantKind,
    /// Ordered block sequence
    pub blocks: Vec<Block>,
    /// Original flattened plain text, retained verbatim for indexing
    pub text: String,
}

impl Document {
    /// A document whose provider yielded no text: no blocks, empty retained
    /// text. It is skipped by the index builder but keeps its place in the
    /// corpus so the remaining documents still build.
    pub fn empty(config: &DocumentConfig) -> Self {
        Self {
            id: config.id.clone(),
            title: config.title.clone(),
            category: config.category.clone(),
            order: config.order,
            variant: config.variant,
            blocks: Vec::new(),
            text: String::new(),
        }
    }
}
