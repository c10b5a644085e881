use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::domain::{FieldKind, FieldSchema};

use super::error::FieldCoercionError;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Enum {
        options: Vec<Value>,
        selected: Option<usize>,
    },
    Array(String),
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub schema: FieldSchema,
    pub value: FieldValue,
    /// Value the field started from: the initial settings or the schema default.
    pub original: Option<Value>,
    pub dirty: bool,
    pub error: Option<String>,
}

impl FieldState {
    pub fn from_schema(schema: FieldSchema) -> Self {
        let original = schema.default.clone();
        let value = editor_value(&schema.kind, original.as_ref());
        FieldState {
            schema,
            value,
            original,
            dirty: false,
            error: None,
        }
    }

    /// Replace the current value with `value` without marking the field dirty.
    pub fn seed_value(&mut self, value: &Value) {
        self.value = editor_value(&self.schema.kind, Some(value));
        self.original = Some(value.clone());
        self.dirty = false;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let changed = match &mut self.value {
            FieldValue::Text(buffer) => match key.code {
                KeyCode::Left => adjust_numeric_value(buffer, &self.schema.kind, -1),
                KeyCode::Right => adjust_numeric_value(buffer, &self.schema.kind, 1),
                _ => edit_buffer(buffer, key.code),
            },
            FieldValue::Array(buffer) => edit_buffer(buffer, key.code),
            FieldValue::Bool(value) => match key.code {
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    *value = !*value;
                    true
                }
                _ => false,
            },
            FieldValue::Enum { options, selected } => {
                if options.is_empty() {
                    return false;
                }
                let last = options.len() - 1;
                match key.code {
                    KeyCode::Left => {
                        *selected = Some(match *selected {
                            Some(0) | None => last,
                            Some(index) => index - 1,
                        });
                        true
                    }
                    KeyCode::Right | KeyCode::Char(' ') => {
                        *selected = Some(match *selected {
                            Some(index) if index < last => index + 1,
                            _ => 0,
                        });
                        true
                    }
                    _ => false,
                }
            }
        };
        if changed {
            self.after_edit();
        }
        changed
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Enum { options, selected } => selected
                .and_then(|index| options.get(index))
                .map(option_label)
                .unwrap_or_else(|| "<none>".to_string()),
            FieldValue::Array(buffer) => format!("[{}]", buffer.trim()),
        }
    }

    /// Value to submit. Untouched fields hand back exactly what they were
    /// seeded with; `Ok(None)` means the field is left unset.
    pub fn current_value(&self) -> Result<Option<Value>, FieldCoercionError> {
        let value = if self.dirty {
            self.coerce_edited()?
        } else {
            self.original.clone()
        };
        if value.is_none() && self.schema.required {
            return Err(self.coercion_error("is a required property"));
        }
        Ok(value)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn coerce_edited(&self) -> Result<Option<Value>, FieldCoercionError> {
        let value = match (&self.schema.kind, &self.value) {
            (FieldKind::String, FieldValue::Text(text)) => {
                non_empty(text).map(|text| Value::String(text.to_string()))
            }
            (FieldKind::Integer, FieldValue::Text(text)) => non_empty(text.trim())
                .map(|text| {
                    text.parse::<i64>()
                        .map(Value::from)
                        .map_err(|_| self.coercion_error("expected integer"))
                })
                .transpose()?,
            (FieldKind::Number, FieldValue::Text(text)) => non_empty(text.trim())
                .map(|text| {
                    parse_number(text).ok_or_else(|| self.coercion_error("expected number"))
                })
                .transpose()?,
            (FieldKind::Json, FieldValue::Text(text)) => non_empty(text.trim())
                .map(|text| {
                    serde_json::from_str::<Value>(text)
                        .map_err(|err| self.coercion_error(format!("invalid JSON: {err}")))
                })
                .transpose()?,
            (FieldKind::Boolean, FieldValue::Bool(value)) => Some(Value::Bool(*value)),
            (FieldKind::Enum(_), FieldValue::Enum { options, selected }) => {
                selected.and_then(|index| options.get(index)).cloned()
            }
            (FieldKind::Array(inner), FieldValue::Array(buffer)) => {
                self.array_value(buffer, inner)?
            }
            _ => None,
        };
        Ok(value)
    }

    fn array_value(
        &self,
        contents: &str,
        inner: &FieldKind,
    ) -> Result<Option<Value>, FieldCoercionError> {
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let mut values = Vec::new();
        for raw in contents.split(',') {
            let item = raw.trim();
            if item.is_empty() {
                continue;
            }
            let value = match inner {
                FieldKind::Integer => item
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| self.coercion_error(format!("'{item}' is not a valid integer")))?,
                FieldKind::Number => parse_number(item)
                    .ok_or_else(|| self.coercion_error(format!("'{item}' is not a valid number")))?,
                FieldKind::Boolean => match item.to_ascii_lowercase().as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => {
                        return Err(
                            self.coercion_error(format!("'{item}' is not a valid boolean"))
                        );
                    }
                },
                FieldKind::Enum(options) => options
                    .iter()
                    .find(|option| option_label(option) == item)
                    .cloned()
                    .ok_or_else(|| {
                        let labels: Vec<String> = options.iter().map(option_label).collect();
                        self.coercion_error(format!(
                            "value '{item}' is not one of: {}",
                            labels.join(", ")
                        ))
                    })?,
                FieldKind::String | FieldKind::Json | FieldKind::Array(_) => {
                    Value::String(item.to_string())
                }
            };
            values.push(value);
        }

        Ok(Some(Value::Array(values)))
    }

    fn coercion_error(&self, message: impl Into<String>) -> FieldCoercionError {
        FieldCoercionError {
            pointer: self.schema.pointer.clone(),
            message: message.into(),
        }
    }

    fn after_edit(&mut self) {
        self.dirty = true;
        self.error = None;
    }
}

fn edit_buffer(buffer: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            let changed = !buffer.is_empty();
            buffer.clear();
            changed
        }
        _ => false,
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() { None } else { Some(text) }
}

/// Editor contents for `kind`, loaded from `value` when there is one.
fn editor_value(kind: &FieldKind, value: Option<&Value>) -> FieldValue {
    match kind {
        FieldKind::String | FieldKind::Integer | FieldKind::Number => {
            FieldValue::Text(value.map(value_to_text).unwrap_or_default())
        }
        FieldKind::Json => FieldValue::Text(value.map(Value::to_string).unwrap_or_default()),
        FieldKind::Boolean => FieldValue::Bool(value.and_then(Value::as_bool).unwrap_or(false)),
        FieldKind::Enum(options) => FieldValue::Enum {
            options: options.clone(),
            selected: value.and_then(|value| options.iter().position(|option| option == value)),
        },
        FieldKind::Array(_) => FieldValue::Array(match value {
            Some(Value::Array(items)) => array_to_text(items),
            Some(other) => value_to_text(other),
            None => String::new(),
        }),
    }
}

fn option_label(option: &Value) -> String {
    match option {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Integers stay integers so `1` is not rewritten as `1.0`.
fn parse_number(text: &str) -> Option<Value> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Value::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => array_to_text(items),
        other => other.to_string(),
    }
}

fn array_to_text(items: &[Value]) -> String {
    items
        .iter()
        .map(value_to_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn adjust_numeric_value(buffer: &mut String, kind: &FieldKind, delta: i64) -> bool {
    match kind {
        FieldKind::Integer => {
            let current = buffer.trim().parse::<i64>().unwrap_or(0);
            *buffer = current.saturating_add(delta).to_string();
            true
        }
        FieldKind::Number => {
            let current = buffer.trim().parse::<f64>().unwrap_or(0.0);
            *buffer = (current + delta as f64).to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(kind: FieldKind, required: bool, default: Option<Value>) -> FieldState {
        FieldState::from_schema(FieldSchema {
            name: "opt".into(),
            path: vec!["opt".into()],
            pointer: "/opt".into(),
            title: "Opt".into(),
            description: None,
            kind,
            required,
            default,
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_marks_dirty_and_clears_error() {
        let mut state = field(FieldKind::String, false, None);
        state.set_error("boom".into());
        assert!(state.handle_key(&key(KeyCode::Char('a'))));
        assert!(state.dirty);
        assert!(state.error.is_none());
        assert_eq!(state.current_value().unwrap(), Some(json!("a")));
    }

    #[test]
    fn empty_optional_text_is_unset() {
        let state = field(FieldKind::String, false, None);
        assert_eq!(state.current_value().unwrap(), None);
    }

    #[test]
    fn empty_required_text_reports_error() {
        let state = field(FieldKind::Integer, true, None);
        let err = state.current_value().unwrap_err();
        assert_eq!(err.pointer, "/opt");
        assert_eq!(err.message, "is a required property");
    }

    #[test]
    fn integer_coercion_rejects_garbage() {
        let mut state = field(FieldKind::Integer, false, None);
        state.seed_value(&json!("te"));
        state.handle_key(&key(KeyCode::Char('n')));
        assert_eq!(state.current_value().unwrap_err().message, "expected integer");
    }

    #[test]
    fn untouched_fields_return_the_seeded_value() {
        let mut number = field(FieldKind::Number, false, None);
        number.seed_value(&json!(1));
        assert_eq!(number.current_value().unwrap(), Some(json!(1)));

        let mut text = field(FieldKind::String, true, None);
        text.seed_value(&json!(""));
        assert_eq!(text.current_value().unwrap(), Some(json!("")));
    }

    #[test]
    fn unseeded_choices_stay_unset() {
        let flag = field(FieldKind::Boolean, false, None);
        assert_eq!(flag.current_value().unwrap(), None);

        let mut choice = field(FieldKind::Enum(vec![json!("a"), json!("b")]), false, None);
        assert_eq!(choice.display_value(), "<none>");
        assert_eq!(choice.current_value().unwrap(), None);
        choice.handle_key(&key(KeyCode::Left));
        assert_eq!(choice.current_value().unwrap(), Some(json!("b")));
    }

    #[test]
    fn edited_numbers_keep_integer_form() {
        let mut state = field(FieldKind::Number, false, Some(json!(0.5)));
        state.handle_key(&key(KeyCode::Delete));
        state.handle_key(&key(KeyCode::Char('2')));
        assert_eq!(state.current_value().unwrap(), Some(json!(2)));
        state.handle_key(&key(KeyCode::Char('.')));
        state.handle_key(&key(KeyCode::Char('5')));
        assert_eq!(state.current_value().unwrap(), Some(json!(2.5)));
    }

    #[test]
    fn integer_enums_submit_numbers() {
        let mut state = field(
            FieldKind::Enum(vec![json!(1), json!(2), json!(3)]),
            false,
            None,
        );
        state.seed_value(&json!(2));
        assert_eq!(state.display_value(), "2");
        state.handle_key(&key(KeyCode::Right));
        assert_eq!(state.current_value().unwrap(), Some(json!(3)));
    }

    #[test]
    fn array_of_integer_enum_maps_labels_back_to_values() {
        let mut state = field(
            FieldKind::Array(Box::new(FieldKind::Enum(vec![json!(1), json!(2)]))),
            false,
            None,
        );
        for ch in "2, 1".chars() {
            state.handle_key(&key(KeyCode::Char(ch)));
        }
        assert_eq!(state.current_value().unwrap(), Some(json!([2, 1])));
    }

    #[test]
    fn arrows_step_numbers() {
        let mut state = field(FieldKind::Integer, false, Some(json!(4)));
        state.handle_key(&key(KeyCode::Right));
        state.handle_key(&key(KeyCode::Right));
        state.handle_key(&key(KeyCode::Left));
        assert_eq!(state.current_value().unwrap(), Some(json!(5)));
    }

    #[test]
    fn enum_wraps_and_seeds() {
        let mut state = field(
            FieldKind::Enum(vec![json!("a"), json!("b")]),
            false,
            Some(json!("b")),
        );
        assert_eq!(state.display_value(), "b");
        state.handle_key(&key(KeyCode::Right));
        assert_eq!(state.display_value(), "a");
        state.handle_key(&key(KeyCode::Left));
        assert_eq!(state.display_value(), "b");
        state.seed_value(&json!("a"));
        assert_eq!(state.current_value().unwrap(), Some(json!("a")));
    }

    #[test]
    fn space_toggles_bool() {
        let mut state = field(FieldKind::Boolean, false, None);
        state.handle_key(&key(KeyCode::Char(' ')));
        assert_eq!(state.current_value().unwrap(), Some(json!(true)));
    }

    #[test]
    fn array_text_is_split_and_typed() {
        let mut state = field(
            FieldKind::Array(Box::new(FieldKind::Integer)),
            false,
            None,
        );
        state.seed_value(&json!([1, 2]));
        assert_eq!(state.display_value(), "[1, 2]");
        state.handle_key(&key(KeyCode::Char(',')));
        state.handle_key(&key(KeyCode::Char('x')));
        let err = state.current_value().unwrap_err();
        assert!(err.message.contains("'x' is not a valid integer"));
    }

    #[test]
    fn json_fields_round_trip_structured_values() {
        let mut state = field(FieldKind::Json, false, None);
        state.seed_value(&json!({"a": [1]}));
        assert_eq!(state.current_value().unwrap(), Some(json!({"a": [1]})));
        state.handle_key(&key(KeyCode::Char('}')));
        assert!(state.current_value().unwrap_err().message.starts_with("invalid JSON"));
    }

    #[test]
    fn control_chords_are_not_edits() {
        let mut state = field(FieldKind::String, false, None);
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!state.handle_key(&chord));
        assert!(!state.dirty);
    }
}
