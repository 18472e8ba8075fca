//! Error types for loading, rendering and writing filters

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a JSON document could not be turned into filter entities
#[derive(Error, Debug)]
pub enum SourceFault {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("expected a filter object or a list of filter objects, found {found}")]
    Shape { found: &'static str },
}

/// Failure to load a source file; fatal for that file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Wrong source file format `{}`. It must be `.json`", path.display())]
    InvalidSourceFormat { path: PathBuf },

    #[error("Loading source file `{}` failed: {source}", path.display())]
    SourceLoad { path: PathBuf, source: SourceFault },

    #[error("Loading local source file `{}` failed: {source}", path.display())]
    LocalSourceLoad { path: PathBuf, source: SourceFault },
}

/// Failure to render one filter; skips that entity only
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("filter is missing required attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("invalid order-by entry `{entry}` in `{order_by}`")]
    InvalidOrderBy { order_by: String, entry: String },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Failure to persist a rendered filter; the batch continues
#[derive(Error, Debug)]
#[error("Writing filter to `{}` failed: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
