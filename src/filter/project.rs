//! Projection of preprocessed filters into template variables

use crate::error::RenderError;
use crate::types::{FieldDescriptor, FilterEntity, GeneratorConfig, COMPARE_OPERATORS, DEFAULT_DATATYPE};
use serde::Serialize;

/// Suffix appended to descending order-by entries
const DESCENDING_SUFFIX: &str = " desc";

/// Template variables for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedField {
    /// PascalCase identifier, e.g. `FirstSeenAtGt`
    pub field_name: String,
    /// Name with the first character capitalized, e.g. `First_seen_at_gt`
    pub filter_field_name: String,
    pub in_field_name: String,
    pub in_field_datatype: &'static str,
    pub in_field_op: Option<String>,
    pub in_field_field_names: Option<Vec<String>>,
}

/// Template variables for one filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedFilter {
    pub db_schema_location: String,
    pub compare_operators: Vec<&'static str>,
    pub filter_name: String,
    pub in_filter_name: String,
    pub in_filter_model: String,
    pub in_filter_order_by: Vec<String>,
    pub filter_fields: Vec<ProjectedField>,
}

/// Project one field descriptor
pub fn project_field(field: &FieldDescriptor) -> ProjectedField {
    ProjectedField {
        field_name: pascal_case(&field.name),
        filter_field_name: capitalize(&field.name),
        in_field_name: field.name.clone(),
        in_field_datatype: field
            .field_type
            .as_ref()
            .map(|t| t.python_type())
            .unwrap_or(DEFAULT_DATATYPE),
        in_field_op: field.op.as_ref().map(|op| op.as_str().to_string()),
        in_field_field_names: field.field_names.clone(),
    }
}

/// Project a whole filter entity together with the generator constants
pub fn project_filter(entity: &FilterEntity, config: &GeneratorConfig) -> Result<ProjectedFilter, RenderError> {
    let name = entity
        .name
        .as_deref()
        .ok_or(RenderError::MissingAttribute("name"))?;
    let model = entity
        .target
        .as_deref()
        .ok_or(RenderError::MissingAttribute("for"))?;
    let order_by = entity
        .order_by
        .as_deref()
        .ok_or(RenderError::MissingAttribute("orderBy"))?;

    Ok(ProjectedFilter {
        db_schema_location: config.db_schema_location.clone(),
        compare_operators: COMPARE_OPERATORS.to_vec(),
        filter_name: name.to_string(),
        in_filter_name: name.to_string(),
        in_filter_model: model.to_string(),
        in_filter_order_by: parse_order_by(order_by)?,
        filter_fields: entity.fields.iter().map(project_field).collect(),
    })
}

/// Parse `-created_at;name` into `["created_at desc", "name"]`
pub fn parse_order_by(order_by: &str) -> Result<Vec<String>, RenderError> {
    let mut entries = Vec::new();

    for raw in order_by.split(';') {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }

        match entry.strip_prefix('-') {
            Some(field) if field.trim().is_empty() => {
                return Err(RenderError::InvalidOrderBy {
                    order_by: order_by.to_string(),
                    entry: entry.to_string(),
                });
            }
            Some(field) => entries.push(format!("{}{}", field.trim(), DESCENDING_SUFFIX)),
            None => entries.push(entry.to_string()),
        }
    }

    Ok(entries)
}

/// `first_seen_at` -> `FirstSeenAt`
pub fn pascal_case(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
