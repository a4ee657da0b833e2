//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the corpus engine: the document catalogue
//! (which documents to structure, with which variant), category registry,
//! search tuning, logging, and output settings, loaded from TOML with
//! validation and type-safe access.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML)
//! - **Output**: Validated configuration structs with defaults
//! - **Validation**: Unique document ids, non-empty titles, sane search limits
//!
//! ## Usage
//! ```rust,no_run
//! use legal_corpus_search::config::Config;
//!
//! let config = Config::from_file("config.toml").unwrap();
//! println!("{} documents configured", config.corpus.documents.len());
//! ```

use crate::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Corpus catalogue: documents and categories
    pub corpus: CorpusConfig,
    /// Search engine behavior
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Corpus catalogue configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory that source files and text overrides are resolved against
    #[serde(default)]
    pub base_dir: PathBuf,
    /// Documents to structure, in any order; the pipeline sorts by (order, id)
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    /// Category registry for navigation grouping
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// One document's catalogue entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Globally unique document id
    pub id: String,
    /// Display title
    pub title: String,
    /// Category tag
    pub category: String,
    /// Navigation ordering key; ties broken by id
    #[serde(default)]
    pub order: u32,
    /// Structuring variant
    #[serde(default)]
    pub variant: VariantKind,
    /// Source file handed to the extraction collaborator
    #[serde(default)]
    pub file: Option<String>,
    /// Pre-transcribed text override; used instead of extraction when present
    #[serde(default)]
    pub text_file: Option<String>,
    /// Additional literal section-heading lines for this document
    /// (narrative-case documents name their own title as a heading)
    #[serde(default)]
    pub extra_headings: Vec<String>,
}

/// Category registry entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category tag referenced by documents
    pub tag: String,
    /// Display name
    pub name: String,
}

/// Rule-table variant for one family of legal-document conventions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Arbitration-rules documents: PREAMBLE/INDEX/ANNEX sections,
    /// `ARTICLE <n><letter?> – <title>`, decimal paragraph numbering
    Rules,
    /// Treaties and agreements: centered title conventions, signature blocks,
    /// footnotes gated by a FOOTNOTES header
    Treaty,
    /// Narrative case studies: fixed heading vocabulary, bare integer
    /// paragraph numbers, copyright lines dropped
    Narrative,
    /// Fallback for any other document
    #[default]
    Generic,
}

/// Search engine behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (trimmed, in characters) are not executed
    pub min_query_chars: usize,
    /// Maximum number of matching documents returned per query
    pub max_results: usize,
    /// Snippet context before the match, in characters
    pub snippet_before: usize,
    /// Snippet context after the match, in characters
    pub snippet_after: usize,
    /// Index records are truncated to this many characters
    pub max_indexed_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            max_results: 10,
            snippet_before: 50,
            snippet_after: 100,
            max_indexed_chars: 50_000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Output settings for the builder binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the rendered fragments and search index are written to
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("site"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_str(&raw)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for doc in &self.corpus.documents {
            if doc.id.trim().is_empty() {
                return Err(EngineError::Validation {
                    field: "corpus.documents.id".to_string(),
                    reason: "document id must not be empty".to_string(),
                });
            }
            if !seen.insert(doc.id.as_str()) {
                return Err(EngineError::Validation {
                    field: "corpus.documents.id".to_string(),
                    reason: format!("duplicate document id '{}'", doc.id),
                });
            }
            if doc.title.trim().is_empty() {
                return Err(EngineError::Validation {
                    field: "corpus.documents.title".to_string(),
                    reason: format!("document '{}' has an empty title", doc.id),
                });
            }
        }
        if self.search.min_query_chars == 0 {
            return Err(EngineError::Validation {
                field: "search.min_query_chars".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.search.max_results == 0 {
            return Err(EngineError::Validation {
                field: "search.max_results".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Display name for a category tag, falling back to the tag itself
    pub fn category_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.corpus
            .categories
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.name.as_str())
            .unwrap_or(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [corpus]
        base_dir = "documents"

        [[corpus.categories]]
        tag = "rules"
        name = "Arbitration Rules"

        [[corpus.documents]]
        id = "lcia_rules"
        title = "LCIA Arbitration Rules (2020)"
        category = "rules"
        order = 14
        variant = "rules"
        text_file = "lcia_rules_text.txt"

        [[corpus.documents]]
        id = "treaty_berlin"
        title = "Treaty of Berlin (1921)"
        category = "treaties"
        order = 2
        variant = "treaty"
        file = "Treaty-of-Berlin.pdf"
    "#;

    #[test]
    fn parses_corpus_catalogue() {
        let config = Config::from_str(SAMPLE).unwrap();
        assert_eq!(config.corpus.documents.len(), 2);
        assert_eq!(config.corpus.documents[0].variant, VariantKind::Rules);
        assert_eq!(config.corpus.documents[1].text_file, None);
        assert_eq!(config.category_name("rules"), "Arbitration Rules");
        assert_eq!(config.category_name("treaties"), "treaties");
    }

    #[test]
    fn search_defaults_match_engine_limits() {
        let config = Config::from_str(SAMPLE).unwrap();
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.snippet_before, 50);
        assert_eq!(config.search.snippet_after, 100);
        assert_eq!(config.search.max_indexed_chars, 50_000);
    }

    #[test]
    fn rejects_duplicate_document_ids() {
        let raw = r#"
            [corpus]
            [[corpus.documents]]
            id = "a"
            title = "A"
            category = "misc"
            [[corpus.documents]]
            id = "a"
            title = "A again"
            category = "misc"
        "#;
        let err = Config::from_str(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate document id"));
    }

    #[test]
    fn unknown_variant_defaults_to_generic() {
        let raw = r#"
            [corpus]
            [[corpus.documents]]
            id = "letter"
            title = "Letter"
            category = "correspondence"
        "#;
        let config = Config::from_str(raw).unwrap();
        assert_eq!(config.corpus.documents[0].variant, VariantKind::Generic);
    }
}
