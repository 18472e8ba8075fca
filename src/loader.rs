use crate::error::{LoadError, SourceFault};
use crate::types::{FieldDescriptor, FilterEntity, GeneratorConfig};
use serde_json::Value;
use std::path::Path;

/// Required extension of source files
const SOURCE_EXTENSION: &str = ".json";

/// Load the filter entities described by a source file
///
/// A single filter object is normalized into a one-element list. When
/// `config.load_local` is set, the local fields fragment (resolved against the
/// working directory) is appended to the first entity's fields.
pub fn load_source(path: &Path, config: &GeneratorConfig) -> Result<Vec<FilterEntity>, LoadError> {
    if !path.to_string_lossy().ends_with(SOURCE_EXTENSION) {
        return Err(LoadError::InvalidSourceFormat {
            path: path.to_path_buf(),
        });
    }

    let mut entities = read_entities(path).map_err(|source| LoadError::SourceLoad {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entities = entities.len(), "decoded source file");

    if config.load_local {
        let local_path = std::env::current_dir()
            .map(|cwd| cwd.join(&config.local_source_file))
            .unwrap_or_else(|_| config.local_source_file.clone());
        let local = read_local_field(&local_path).map_err(|source| LoadError::LocalSourceLoad {
            path: local_path.clone(),
            source,
        })?;

        match entities.first_mut() {
            Some(first) => first.fields.push(local),
            None => tracing::debug!(
                path = %local_path.display(),
                "source has no entities, local fields dropped"
            ),
        }
    }

    Ok(entities)
}

/// Decode a JSON document into filter entities
fn read_entities(path: &Path) -> Result<Vec<FilterEntity>, SourceFault> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    parse_entities(value)
}

/// Normalize a decoded document into a list of filter entities
pub fn parse_entities(value: Value) -> Result<Vec<FilterEntity>, SourceFault> {
    match value {
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        Value::Array(items) => {
            if let Some(bad) = items.iter().find(|item| !item.is_object()) {
                return Err(SourceFault::Shape {
                    found: kind_of(bad),
                });
            }
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(SourceFault::from))
                .collect()
        }
        other => Err(SourceFault::Shape {
            found: kind_of(&other),
        }),
    }
}

fn read_local_field(path: &Path) -> Result<FieldDescriptor, SourceFault> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(SourceFault::Shape {
            found: kind_of(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object_is_normalized() {
        let entities = parse_entities(json!({
            "name": "UserFilter",
            "for": "User",
            "orderBy": "name",
            "fields": [{"name": "age", "type": "Number"}]
        }))
        .unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].fields[0].name, "age");
    }

    #[test]
    fn test_list_keeps_order() {
        let entities = parse_entities(json!([
            {"name": "A", "for": "Alpha", "fields": []},
            {"name": "B", "for": "Beta", "fields": []}
        ]))
        .unwrap();

        let targets: Vec<_> = entities.iter().map(|e| e.target.as_deref().unwrap()).collect();
        assert_eq!(targets, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_rejects_scalars_and_mixed_lists() {
        assert!(matches!(
            parse_entities(json!("User")),
            Err(SourceFault::Shape { found: "a string" })
        ));
        assert!(matches!(
            parse_entities(json!([{"name": "A", "fields": []}, 3])),
            Err(SourceFault::Shape { found: "a number" })
        ));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let err = load_source(Path::new("schema.yaml"), &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSourceFormat { .. }));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_source(
            Path::new("definitely/not/here.json"),
            &GeneratorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::SourceLoad {
                source: SourceFault::Io(_),
                ..
            }
        ));
    }
}
