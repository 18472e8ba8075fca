use crate::error::WriteError;
use crate::report::Reporter;
use crate::types::GeneratorConfig;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes rendered filters, one file per target model
pub struct FilterWriter {
    destination_dir: Option<PathBuf>,
    fallback_dir: PathBuf,
    written: HashSet<PathBuf>,
}

impl FilterWriter {
    pub fn new(config: &GeneratorConfig) -> Self {
        FilterWriter {
            destination_dir: config.destination_dir.clone(),
            fallback_dir: config.fallback_dir.clone(),
            written: HashSet::new(),
        }
    }

    /// Resolve the output path for a file name
    ///
    /// Falls back to the generator's own directory when no usable destination
    /// directory was configured.
    pub fn destination<W: Write>(&self, file_name: &str, reporter: &mut Reporter<W>) -> PathBuf {
        match &self.destination_dir {
            Some(dir) if dir.is_dir() => dir.join(file_name),
            _ => {
                reporter.info(format!(
                    "New file will be saved to `{}`.",
                    self.fallback_dir.display()
                ));
                self.fallback_dir.join(file_name)
            }
        }
    }

    /// Write a rendered filter, replacing any existing file
    ///
    /// Returns the absolute path written to.
    pub fn write<W: Write>(
        &mut self,
        path: &Path,
        contents: &str,
        reporter: &mut Reporter<W>,
    ) -> Result<PathBuf, WriteError> {
        std::fs::write(path, contents).map_err(|source| WriteError {
            path: path.to_path_buf(),
            source,
        })?;

        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.written.insert(absolute.clone()) {
            reporter.warning(format!(
                "File `{}` was already generated in this run and has been overwritten.",
                absolute.display()
            ));
        }
        tracing::debug!(path = %absolute.display(), bytes = contents.len(), "wrote filter");
        Ok(absolute)
    }
}
