//! # Text Source Module
//!
//! ## Purpose
//! The seam between the corpus pipeline and whatever produces a document's
//! plain text. Scanned sources with no embedded text layer legitimately yield
//! nothing; the contract treats that as an extraction error the pipeline
//! degrades on, never as a fatal condition.

use crate::config::DocumentConfig;
use crate::errors::{EngineError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Produces the full plain text for one catalogued document.
pub trait TextSource {
    fn full_text(&self, doc: &DocumentConfig) -> Result<String>;
}

/// Filesystem-backed source: reads a document's pre-transcribed text override
/// from the corpus base directory. Documents without an override fail with an
/// extraction error and degrade to empty.
pub struct FileSource {
    base_dir: PathBuf,
}

impl FileSource {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for FileSource {
    fn full_text(&self, doc: &DocumentConfig) -> Result<String> {
        let Some(text_file) = &doc.text_file else {
            return Err(EngineError::Extraction {
                document: doc.id.clone(),
                details: "no text transcription available".to_string(),
            });
        };
        let path = self.base_dir.join(text_file);
        std::fs::read_to_string(&path).map_err(|e| EngineError::Extraction {
            document: doc.id.clone(),
            details: format!("cannot read {}: {}", path.display(), e),
        })
    }
}

/// In-memory source keyed by document id.
#[derive(Debug, Default)]
pub struct StaticSource {
    texts: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(id.into(), text.into());
    }
}

impl TextSource for StaticSource {
    fn full_text(&self, doc: &DocumentConfig) -> Result<String> {
        self.texts
            .get(&doc.id)
            .cloned()
            .ok_or_else(|| EngineError::Extraction {
                document: doc.id.clone(),
                details: "no text registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VariantKind;
    use std::io::Write;

    fn doc_config(id: &str, text_file: Option<&str>) -> DocumentConfig {
        DocumentConfig {
            id: id.to_string(),
            title: id.to_string(),
            category: "misc".to_string(),
            order: 0,
            variant: VariantKind::Generic,
            file: None,
            text_file: text_file.map(str::to_string),
            extra_headings: Vec::new(),
        }
    }

    #[test]
    fn reads_text_override_from_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("treaty.txt")).unwrap();
        writeln!(file, "ARTICLE 1 – Scope").unwrap();

        let source = FileSource::new(dir.path());
        let text = source
            .full_text(&doc_config("treaty", Some("treaty.txt")))
            .unwrap();
        assert!(text.contains("ARTICLE 1"));
    }

    #[test]
    fn missing_override_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());

        let err = source.full_text(&doc_config("scan_only", None)).unwrap_err();
        assert!(err.is_degradable());

        let err = source
            .full_text(&doc_config("gone", Some("missing.txt")))
            .unwrap_err();
        assert!(err.is_degradable());
    }

    #[test]
    fn static_source_serves_registered_text() {
        let mut source = StaticSource::new();
        source.insert("letter", "Dear Sir,");
        assert_eq!(
            source.full_text(&doc_config("letter", None)).unwrap(),
            "Dear Sir,"
        );
        assert!(source.full_text(&doc_config("other", None)).is_err());
    }
}
