//! Operator preprocessing for field descriptors
//!
//! Folds each field's operator into its name so the template only has to deal
//! with plain identifiers:
//!
//! - `..` becomes a `<name>_from` / `<name>_to` pair; the `_to` halves are
//!   appended after every original field, in the order they were produced
//! - `T` renames the field to `T`
//! - compare operators rename the field to `<name>_<op>`
//! - anything else keeps its name

use crate::types::{FieldDescriptor, FieldOp, FieldType, FilterEntity};

/// Preprocess every entity of a loaded schema in place
pub fn preprocess_entities(entities: &mut [FilterEntity]) {
    for entity in entities.iter_mut() {
        let fields = std::mem::take(&mut entity.fields);
        entity.fields = preprocess_fields(fields);
    }
}

/// Rewrite a field list, expanding range operators
///
/// Fields that were already preprocessed pass through unchanged, so running
/// this twice over the same list is a no-op.
pub fn preprocess_fields(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut upper_bounds = Vec::new();
    let mut output: Vec<FieldDescriptor> = fields
        .into_iter()
        .map(|field| rewrite_field(field, &mut upper_bounds))
        .collect();

    if !upper_bounds.is_empty() {
        tracing::debug!(count = upper_bounds.len(), "appending range upper bounds");
    }
    output.extend(upper_bounds);
    output
}

fn rewrite_field(mut field: FieldDescriptor, upper_bounds: &mut Vec<FieldDescriptor>) -> FieldDescriptor {
    if field.preprocessed {
        return field;
    }

    match &field.op {
        Some(FieldOp::Range) => {
            let base = std::mem::take(&mut field.name);
            field.name = format!("{}_from", base);
            field.op = Some(FieldOp::From);

            let mut upper = FieldDescriptor::new(format!("{}_to", base)).with_type(FieldType::Date);
            upper.op = Some(FieldOp::To);
            upper.preprocessed = true;
            upper_bounds.push(upper);
        }
        Some(FieldOp::Whole) => {
            field.name = String::from("T");
        }
        Some(FieldOp::Compare(op)) => {
            field.name = format!("{}_{}", field.name, op.as_str());
        }
        _ => {}
    }

    field.preprocessed = true;
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Vec<FieldDescriptor> {
        serde_json::from_value(value).unwrap()
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_range_expansion() {
        let out = preprocess_fields(fields(json!([
            {"name": "signup", "type": "Number", "op": ".."}
        ])));

        assert_eq!(names(&out), vec!["signup_from", "signup_to"]);
        assert_eq!(out[0].op, Some(FieldOp::From));
        // the lower bound keeps its declared type
        assert_eq!(out[0].field_type, Some(FieldType::Number));
        assert_eq!(out[1].op, Some(FieldOp::To));
        assert_eq!(out[1].field_type, Some(FieldType::Date));
        assert!(out.iter().all(|f| f.op != Some(FieldOp::Range)));
    }

    #[test]
    fn test_upper_bounds_follow_original_fields() {
        let out = preprocess_fields(fields(json!([
            {"name": "created", "type": "Date", "op": ".."},
            {"name": "age", "type": "Number", "op": "gt"},
            {"name": "updated", "type": "Date", "op": ".."},
            {"name": "email"}
        ])));

        assert_eq!(
            names(&out),
            vec!["created_from", "age_gt", "updated_from", "email", "created_to", "updated_to"]
        );
    }

    #[test]
    fn test_compare_operators_rename() {
        for op in crate::types::COMPARE_OPERATORS {
            let out = preprocess_fields(fields(json!([{"name": "first_seen_at", "op": op}])));
            assert_eq!(out[0].name, format!("first_seen_at_{}", op));
        }
    }

    #[test]
    fn test_whole_object_marker() {
        let out = preprocess_fields(fields(json!([{"name": "anything", "op": "T"}])));
        assert_eq!(names(&out), vec!["T"]);
    }

    #[test]
    fn test_other_ops_untouched() {
        let out = preprocess_fields(fields(json!([
            {"name": "email", "op": "eq"},
            {"name": "status"}
        ])));
        assert_eq!(names(&out), vec!["email", "status"]);
        assert_eq!(out[0].op, Some(FieldOp::Other("eq".to_string())));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let once = preprocess_fields(fields(json!([
            {"name": "age", "op": "gt"},
            {"name": "signup", "type": "Date", "op": ".."},
            {"name": "obj", "op": "T"},
            {"name": "email"}
        ])));
        let twice = preprocess_fields(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preprocess_entities() {
        let mut entities: Vec<FilterEntity> = serde_json::from_value(json!([
            {"name": "A", "for": "User", "fields": [{"name": "age", "op": "lt"}]},
            {"name": "B", "for": "Post", "fields": [{"name": "day", "op": ".."}]}
        ]))
        .unwrap();

        preprocess_entities(&mut entities);

        assert_eq!(names(&entities[0].fields), vec!["age_lt"]);
        assert_eq!(names(&entities[1].fields), vec!["day_from", "day_to"]);
    }
}
