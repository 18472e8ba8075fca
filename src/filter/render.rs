use crate::error::RenderError;
use crate::filter::project::{project_filter, ProjectedFilter};
use crate::types::{FilterEntity, GeneratorConfig};
use minijinja::{Environment, UndefinedBehavior};

/// Name the filter template is registered under
const FILTER_TEMPLATE: &str = "filter_class.py";

/// Source of the filter class template
const FILTER_TEMPLATE_SOURCE: &str = include_str!("../../templates/filter_class.py.jinja");

/// Renders filter entities into Python filter classes
pub struct FilterRenderer {
    env: Environment<'static>,
}

impl FilterRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template(FILTER_TEMPLATE_SOURCE)
    }

    /// Build a renderer around a custom template source
    pub fn with_template(source: &'static str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(FILTER_TEMPLATE, source)?;
        Ok(FilterRenderer { env })
    }

    /// Render one preprocessed entity
    pub fn render(&self, entity: &FilterEntity, config: &GeneratorConfig) -> Result<String, RenderError> {
        let projected = project_filter(entity, config)?;
        self.render_projected(&projected)
    }

    pub fn render_projected(&self, projected: &ProjectedFilter) -> Result<String, RenderError> {
        let template = self.env.get_template(FILTER_TEMPLATE)?;
        let output = template.render(projected)?;
        tracing::debug!(
            filter = %projected.filter_name,
            fields = projected.filter_fields.len(),
            bytes = output.len(),
            "rendered filter"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::preprocess::preprocess_entities;
    use serde_json::json;

    fn user_filter() -> FilterEntity {
        let mut entities: Vec<FilterEntity> = vec![serde_json::from_value(json!({
            "name": "UserFilter",
            "for": "User",
            "orderBy": "-age",
            "fields": [
                {"name": "age", "type": "Number", "op": "gt"},
                {"name": "signup", "type": "Date", "op": ".."},
                {"name": "full_name", "type": "String", "fieldNames": ["first_name", "last_name"]}
            ]
        }))
        .unwrap()];
        preprocess_entities(&mut entities);
        entities.remove(0)
    }

    #[test]
    fn test_render_user_filter() {
        let renderer = FilterRenderer::new().unwrap();
        let output = renderer
            .render(&user_filter(), &GeneratorConfig::default())
            .unwrap();

        assert!(output.contains("from db.schema import User"));
        assert!(output.contains("class UserFilter(object):"));
        assert!(output.contains("model = User"));
        assert!(output.contains("'age desc',"));
        assert!(output.contains("class AgeGtField(object):"));
        assert!(output.contains("name = 'age_gt'"));
        assert!(output.contains("datatype = int"));
        assert!(output.contains("name = 'signup_from'"));
        assert!(output.contains("name = 'signup_to'"));
        assert!(output.contains("op = 'to'"));
        assert!(output.contains("Age_gt = AgeGtField"));
        assert!(output.contains("field_names = ['first_name', 'last_name']"));
        assert!(output.contains("field_names = None"));
        assert!(output.contains("op = None"));
        assert!(output.contains("COMPARE_OPERATORS = ('gt', 'lt', 'ge', 'le', 'like', 'in', )"));
    }

    #[test]
    fn test_field_order_follows_preprocessed_list() {
        let renderer = FilterRenderer::new().unwrap();
        let output = renderer
            .render(&user_filter(), &GeneratorConfig::default())
            .unwrap();

        let age = output.find("class AgeGtField").unwrap();
        let from = output.find("class SignupFromField").unwrap();
        let full_name = output.find("class FullNameField").unwrap();
        let to = output.find("class SignupToField").unwrap();
        assert!(age < from && from < full_name && full_name < to);
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = FilterRenderer::new().unwrap();
        let config = GeneratorConfig::default();
        let entity = user_filter();
        assert_eq!(
            renderer.render(&entity, &config).unwrap(),
            renderer.render(&entity, &config).unwrap()
        );
    }

    #[test]
    fn test_schema_location_from_config() {
        let renderer = FilterRenderer::new().unwrap();
        let config = GeneratorConfig {
            db_schema_location: "app.models".to_string(),
            ..GeneratorConfig::default()
        };
        let output = renderer.render(&user_filter(), &config).unwrap();
        assert!(output.contains("from app.models import User"));
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let renderer = FilterRenderer::with_template("{{ no_such_variable }}").unwrap();
        let err = renderer
            .render(&user_filter(), &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_missing_target_is_error() {
        let mut entity = user_filter();
        entity.target = None;
        let renderer = FilterRenderer::new().unwrap();
        let err = renderer
            .render(&entity, &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingAttribute("for")));
    }
}
