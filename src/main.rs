//! # Corpus Builder Main Driver
//!
//! ## Purpose
//! Command-line entry point for the corpus builder. Loads the corpus
//! configuration, runs the structuring pipeline over every catalogued
//! document, and writes the rendered fragments and the search index to the
//! output directory.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, command line arguments
//! - **Output**: One HTML fragment per document plus `search_index.json`
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Run the corpus pipeline against the filesystem text source
//! 4. Write fragments and the search index
//! 5. Optionally execute an ad-hoc query against the fresh index

use anyhow::Context;
use clap::{Arg, Command};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use legal_corpus_search::{
    config::Config,
    errors::EngineError,
    pipeline::CorpusPipeline,
    search::{search_with, SearchOutcome},
    source::FileSource,
};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("legal-corpus-builder")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Legal Search Team")
        .about("Structures a legal document corpus and builds its search index")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Override the configured output directory"),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Run a query against the freshly built index and print the results"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");
    let mut config =
        Config::from_file(config_path).with_context(|| format!("loading {config_path}"))?;
    if let Some(output) = matches.get_one::<String>("output") {
        config.output.dir = output.into();
    }

    init_logging(&config)?;
    info!("configuration loaded from {config_path}");

    let source = FileSource::new(&config.corpus.base_dir);
    let pipeline = CorpusPipeline::new(config.clone());
    let built = pipeline.run(&source).context("corpus build failed")?;

    let out_dir = &config.output.dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    for (id, fragment) in &built.rendered {
        let path = out_dir.join(format!("doc-{id}.html"));
        std::fs::write(&path, fragment).with_context(|| format!("writing {}", path.display()))?;
    }
    let index_path = out_dir.join("search_index.json");
    let index_json = serde_json::to_string_pretty(&built.index)?;
    std::fs::write(&index_path, index_json)
        .with_context(|| format!("writing {}", index_path.display()))?;
    info!(
        fragments = built.rendered.len(),
        indexed = built.index.len(),
        "corpus written to {}",
        out_dir.display()
    );

    if let Some(query) = matches.get_one::<String>("query") {
        match search_with(query, &built.index, &config.search) {
            SearchOutcome::NotExecuted => println!("query too short, not executed"),
            SearchOutcome::NoMatches => println!("no matches"),
            SearchOutcome::Matches(results) => {
                for result in results {
                    println!("{} — {}", result.document_id, result.title);
                    println!("    {}", result.snippet);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging and tracing from the configured level
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let log_level: tracing::Level =
        config
            .logging
            .level
            .parse()
            .map_err(|_| EngineError::Config {
                message: format!("invalid log level: {}", config.logging.level),
            })?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(
                    log_level,
                )),
        )
        .init();

    Ok(())
}
