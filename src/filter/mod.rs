//! Filter generation - turn loaded filter entities into Python filter classes
//!
//! The pipeline runs per entity:
//!
//! 1. [`preprocess`] folds each field's operator into its name and expands
//!    range fields into `_from` / `_to` pairs
//! 2. [`project`] maps the preprocessed fields onto template variables
//! 3. [`render`] binds those variables to the filter class template
//! 4. [`writer`] persists the rendered text, one file per target model

pub mod preprocess;
pub mod project;
pub mod render;
pub mod writer;

pub use preprocess::{preprocess_entities, preprocess_fields};
pub use project::{parse_order_by, project_field, project_filter, ProjectedField, ProjectedFilter};
pub use render::FilterRenderer;
pub use writer::FilterWriter;
