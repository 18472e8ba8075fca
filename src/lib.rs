//! # filtergen - Python filter class generator
//!
//! Reads JSON filter definitions (target model, ordering, typed fields with
//! comparison operators) and renders one Python filter class per definition.
//!
//! ## Modules
//!
//! - **loader**: decode `.json` sources into [`FilterEntity`] lists
//! - **filter**: preprocess, project, render and write filters
//! - **generator**: drive a batch of entities through the filter pipeline
//! - **report**: the `[GEN]` / `[WARNING]` / `[ERROR]` console protocol
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filtergen::{generate_filters, GeneratorConfig, Reporter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = GeneratorConfig {
//!     destination_dir: Some("filters".into()),
//!     ..GeneratorConfig::default()
//! };
//! let mut reporter = Reporter::stdout();
//! let summary = generate_filters("users.json, posts.json", &config, &mut reporter)?;
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::Path;

pub mod error;
pub mod filter;
pub mod generator;
pub mod loader;
pub mod report;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Error, LoadError, RenderError, Result, SourceFault, WriteError};
pub use filter::{preprocess_entities, FilterRenderer, FilterWriter};
pub use generator::{FilterGenerator, GenerationStats};
pub use loader::load_source;
pub use report::{Level, Reporter};
pub use types::{CompareOp, FieldDescriptor, FieldOp, FieldType, FilterEntity, GeneratorConfig};

static SOURCE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*|\s+").unwrap());

/// Split a comma and/or whitespace separated list of source paths
pub fn split_sources(sources: &str) -> Vec<&str> {
    SOURCE_SEPARATOR
        .split(sources.trim())
        .filter(|source| !source.is_empty())
        .collect()
}

/// Outcome of a whole run over all source files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Sources that do not exist
    pub missing_sources: usize,
    /// Sources that exist but failed to load
    pub failed_sources: usize,
    pub stats: GenerationStats,
}

impl RunSummary {
    /// Every listed source was found and loaded
    pub fn is_success(&self) -> bool {
        self.missing_sources == 0 && self.failed_sources == 0
    }
}

/// Main entry point: generate filters for every source in the list
///
/// Sources are processed in order. A missing or unloadable source is reported
/// and skipped; the remaining sources are still generated.
pub fn generate_filters<W: Write>(
    sources: &str,
    config: &GeneratorConfig,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary> {
    let mut generator = FilterGenerator::new(config.clone())?;
    let mut summary = RunSummary::default();

    for source in split_sources(sources) {
        let path = Path::new(source);
        if !path.is_file() {
            reporter.error(format!("File `{}` does not exists", source));
            summary.missing_sources += 1;
            continue;
        }

        let mut entities = match load_source(path, config) {
            Ok(entities) => entities,
            Err(err) => {
                reporter.error(err);
                summary.failed_sources += 1;
                continue;
            }
        };
        preprocess_entities(&mut entities);
        reporter.gen(format!("Source file `{}` has been loaded.", source));

        let stats = generator.generate(&entities, reporter);
        summary.stats.merge(stats);
    }

    Ok(summary)
}
