use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use jsonschema::{Validator, error::ValidationErrorKind, validator_for};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Settings, parse_form_schema};

use super::{error::FormError, state::FormState};

/// What the form hands back when the user submits: the data as edited and
/// every problem found with it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub form_data: Settings,
    pub errors: Vec<FormError>,
}

impl FormSubmission {
    pub fn new(form_data: Settings, errors: Vec<FormError>) -> Self {
        Self { form_data, errors }
    }

    pub fn valid(form_data: Settings) -> Self {
        Self::new(form_data, Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Schema-driven settings form: editable field state plus the compiled
/// validator for the widget's settings schema.
pub struct SettingsForm {
    state: FormState,
    validator: Validator,
    global_errors: Vec<String>,
}

impl std::fmt::Debug for SettingsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsForm")
            .field("state", &self.state)
            .field("global_errors", &self.global_errors)
            .finish_non_exhaustive()
    }
}

impl SettingsForm {
    /// Build a form for `schema`, pre-populated with `initial`.
    pub fn new(schema: &Value, initial: Option<&Settings>) -> Result<Self> {
        let validator = validator_for(schema).context("failed to compile settings schema")?;
        let mut form_schema = parse_form_schema(schema)?;
        if let Some(initial) = initial {
            form_schema.extend_with_data(initial);
        }
        let mut state = FormState::from_schema(&form_schema);
        if let Some(initial) = initial {
            state.seed_from_value(&Value::Object(initial.clone()));
        }
        debug!(fields = state.fields.len(), "settings form ready");
        Ok(Self {
            state,
            validator,
            global_errors: Vec::new(),
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Errors that could not be attached to a single field.
    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    /// Route an editing key to the focused field.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.state
            .focused_field_mut()
            .is_some_and(|field| field.handle_key(key))
    }

    /// Coerce and validate the current values.
    ///
    /// Errors are attached inline to their fields; the returned submission
    /// carries the same errors for the caller to act on.
    pub fn submit(&mut self) -> FormSubmission {
        self.state.clear_errors();
        self.global_errors.clear();

        let (value, coercion_errors) = self.state.collect_value();
        let mut errors: Vec<FormError> = coercion_errors.into_iter().map(FormError::from).collect();

        for error in self.validator.iter_errors(&value) {
            let pointer = match &error.kind {
                ValidationErrorKind::Required { property } => {
                    let parent = error.instance_path.to_string();
                    match property.as_str() {
                        Some(name) => format!("{parent}/{}", escape_segment(name)),
                        None => parent,
                    }
                }
                _ => error.instance_path.to_string(),
            };
            if errors.iter().any(|known| known.pointer == pointer) {
                continue;
            }
            errors.push(FormError::new(pointer, error.to_string()));
        }

        for error in &errors {
            if !self.state.set_error(&error.pointer, error.message.clone()) {
                self.global_errors.push(error.to_string());
            }
        }

        let form_data = match value {
            Value::Object(map) => map,
            _ => Settings::new(),
        };
        debug!(errors = errors.len(), "settings form submitted");
        FormSubmission::new(form_data, errors)
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;

    fn settings(value: Value) -> Settings {
        value.as_object().cloned().unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn untouched_form_returns_initial_settings() {
        let schema = json!({
            "type": "object",
            "properties": {"color": {"type": "string"}}
        });
        let initial = settings(json!({"color": "red"}));
        let mut form = SettingsForm::new(&schema, Some(&initial)).unwrap();
        let submission = form.submit();
        assert!(submission.is_valid());
        assert_eq!(submission.form_data, initial);
    }

    #[test]
    fn untouched_form_round_trips_every_kind() {
        let schema = json!({
            "type": "object",
            "required": ["title"],
            "properties": {
                "title": {"type": "string"},
                "limit": {"type": "integer"},
                "opacity": {"type": "number"},
                "compact": {"type": "boolean"},
                "mode": {"type": "string", "enum": ["list", "grid"]},
                "level": {"type": "integer", "enum": [1, 2, 3]},
                "tags": {"type": "array", "items": {"type": "string"}},
                "layout": {"type": "object"},
                "display": {
                    "type": "object",
                    "properties": {"size": {"type": "integer"}}
                }
            }
        });
        let initial = settings(json!({
            "title": "",
            "limit": 3,
            "opacity": 1,
            "compact": true,
            "mode": "grid",
            "level": 2,
            "tags": ["a", "b"],
            "layout": {"columns": [1, 2]},
            "display": {"size": 1, "theme": "dark"},
            "pinned": "yes"
        }));
        let mut form = SettingsForm::new(&schema, Some(&initial)).unwrap();
        let submission = form.submit();
        assert!(submission.is_valid(), "{:?}", submission.errors);
        assert_eq!(submission.form_data, initial);
    }

    #[test]
    fn unset_fields_without_defaults_stay_absent() {
        let schema = json!({
            "type": "object",
            "properties": {
                "compact": {"type": "boolean"},
                "mode": {"type": "string", "enum": ["a", "b"]},
                "limit": {"type": "integer", "default": 10}
            }
        });
        let mut form = SettingsForm::new(&schema, Some(&Settings::new())).unwrap();
        let submission = form.submit();
        assert!(submission.is_valid());
        assert_eq!(submission.form_data, settings(json!({"limit": 10})));
    }

    #[test]
    fn integer_enum_settings_can_be_saved_and_changed() {
        let schema = json!({
            "type": "object",
            "properties": {"level": {"type": "integer", "enum": [1, 2, 3]}}
        });
        let initial = settings(json!({"level": 2}));
        let mut form = SettingsForm::new(&schema, Some(&initial)).unwrap();
        form.handle_key(&key(KeyCode::Right));
        let submission = form.submit();
        assert!(submission.is_valid(), "{:?}", submission.errors);
        assert_eq!(submission.form_data, settings(json!({"level": 3})));
    }

    #[test]
    fn editing_one_field_keeps_nested_extras() {
        let schema = json!({
            "type": "object",
            "properties": {
                "display": {
                    "type": "object",
                    "properties": {"size": {"type": "integer"}}
                }
            }
        });
        let initial = settings(json!({"display": {"size": 1, "theme": "dark"}}));
        let mut form = SettingsForm::new(&schema, Some(&initial)).unwrap();
        form.handle_key(&key(KeyCode::Right));
        let submission = form.submit();
        assert_eq!(
            submission.form_data,
            settings(json!({"display": {"size": 2, "theme": "dark"}}))
        );
    }

    #[test]
    fn schema_without_properties_still_edits_initial_keys() {
        let initial = settings(json!({"color": "red"}));
        let mut form = SettingsForm::new(&json!({"type": "object"}), Some(&initial)).unwrap();
        assert_eq!(form.state().fields[0].display_value(), "red");
        for _ in 0..3 {
            form.handle_key(&key(KeyCode::Backspace));
        }
        for ch in "blue".chars() {
            form.handle_key(&key(KeyCode::Char(ch)));
        }
        let submission = form.submit();
        assert_eq!(submission.form_data, settings(json!({"color": "blue"})));
    }

    #[test]
    fn validator_errors_attach_to_fields() {
        let schema = json!({
            "type": "object",
            "properties": {"refresh": {"type": "integer", "minimum": 10}}
        });
        let initial = settings(json!({"refresh": 2}));
        let mut form = SettingsForm::new(&schema, Some(&initial)).unwrap();
        let submission = form.submit();
        assert_eq!(submission.errors.len(), 1);
        assert_eq!(submission.errors[0].pointer, "/refresh");
        assert!(form.state().fields[0].error.is_some());
        assert!(form.global_errors().is_empty());
    }

    #[test]
    fn missing_required_values_point_at_the_field() {
        let schema = json!({
            "type": "object",
            "required": ["url"],
            "properties": {"url": {"type": "string"}}
        });
        let mut form = SettingsForm::new(&schema, None).unwrap();
        let submission = form.submit();
        assert_eq!(submission.errors.len(), 1);
        assert_eq!(submission.errors[0].pointer, "/url");
        assert_eq!(form.state().error_count(), 1);
    }

    #[test]
    fn unmatched_errors_become_global() {
        let schema = json!({
            "type": "object",
            "minProperties": 1
        });
        let mut form = SettingsForm::new(&schema, None).unwrap();
        let submission = form.submit();
        assert!(!submission.is_valid());
        assert_eq!(form.global_errors().len(), 1);
        assert!(form.global_errors()[0].starts_with("<root>"));
    }

    #[test]
    fn invalid_schema_fails_to_build() {
        let schema = json!({"type": "object", "properties": {"a": {"type": 12}}});
        assert!(SettingsForm::new(&schema, None).is_err());
    }
}
