use serde_json::{Map, Value};

use crate::domain::FormSchema;

use super::{error::FieldCoercionError, field::FieldState};

#[derive(Debug, Clone)]
pub struct FormState {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldState>,
    pub field_index: usize,
    pub scroll_offset: usize,
    /// Data the form was seeded with; keys no field covers pass through untouched.
    base: Map<String, Value>,
}

impl FormState {
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            title: schema.title.clone(),
            description: schema.description.clone(),
            fields: schema
                .fields
                .iter()
                .cloned()
                .map(FieldState::from_schema)
                .collect(),
            field_index: 0,
            scroll_offset: 0,
            base: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focused_field(&self) -> Option<&FieldState> {
        self.fields.get(self.field_index)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FieldState> {
        self.fields.get_mut(self.field_index)
    }

    pub fn focus_next_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.field_index = (self.field_index + 1) % self.fields.len();
    }

    pub fn focus_prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.field_index = self
            .field_index
            .checked_sub(1)
            .unwrap_or(self.fields.len() - 1);
    }

    /// Seed every field found in `value`; fields absent from it keep their defaults.
    pub fn seed_from_value(&mut self, value: &Value) {
        if let Some(map) = value.as_object() {
            self.base = map.clone();
        }
        for field in &mut self.fields {
            if let Some(subvalue) = value_at_path(value, &field.schema.path) {
                field.seed_value(subvalue);
            }
        }
    }

    /// Build the data object from the seeded data overlaid with every field,
    /// gathering all coercion errors.
    ///
    /// Unset fields and fields that fail coercion are removed from the result.
    pub fn collect_value(&self) -> (Value, Vec<FieldCoercionError>) {
        let mut root = Value::Object(self.base.clone());
        let mut errors = Vec::new();
        for field in &self.fields {
            match field.current_value() {
                Ok(Some(value)) => insert_path(&mut root, &field.schema.path, value),
                Ok(None) => remove_path(&mut root, &field.schema.path),
                Err(err) => {
                    remove_path(&mut root, &field.schema.path);
                    errors.push(err);
                }
            }
        }
        (root, errors)
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    /// Attach `message` to the field at `pointer`. Returns `false` when no
    /// field lives there.
    pub fn set_error(&mut self, pointer: &str, message: String) -> bool {
        match self.field_mut_by_pointer(pointer) {
            Some(field) => {
                field.set_error(message);
                true
            }
            None => false,
        }
    }

    pub fn field_mut_by_pointer(&mut self, pointer: &str) -> Option<&mut FieldState> {
        self.fields
            .iter_mut()
            .find(|field| field.schema.pointer == pointer)
    }

    pub fn error_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.error.is_some())
            .count()
    }

    /// Keep the focused field inside a window of `visible` rows.
    pub fn ensure_focus_visible(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.field_index < self.scroll_offset {
            self.scroll_offset = self.field_index;
        } else if self.field_index >= self.scroll_offset + visible {
            self.scroll_offset = self.field_index + 1 - visible;
        }
    }
}

fn insert_path(root: &mut Value, path: &[String], value: Value) {
    if path.is_empty() {
        *root = value;
        return;
    }

    if !root.is_object() {
        *root = Value::Object(Map::new());
    }

    if let Value::Object(obj) = root {
        if path.len() == 1 {
            obj.insert(path[0].clone(), value);
            return;
        }

        let entry = obj
            .entry(path[0].clone())
            .or_insert_with(|| Value::Object(Map::new()));
        insert_path(entry, &path[1..], value);
    }
}

fn remove_path(root: &mut Value, path: &[String]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        match current.get_mut(segment.as_str()) {
            Some(next) => current = next,
            None => return,
        }
    }
    if let Some(obj) = current.as_object_mut() {
        obj.remove(last);
    }
}

fn value_at_path<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_form_schema;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    fn state() -> FormState {
        let schema = json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "default": "News"},
                "feed": {
                    "type": "object",
                    "properties": {
                        "limit": {"type": "integer"},
                        "compact": {"type": "boolean"}
                    }
                }
            }
        });
        FormState::from_schema(&parse_form_schema(&schema).unwrap())
    }

    #[test]
    fn seeded_values_override_defaults() {
        let mut form = state();
        form.seed_from_value(&json!({"feed": {"limit": 3}}));
        let (value, errors) = form.collect_value();
        assert!(errors.is_empty());
        assert_eq!(value, json!({"title": "News", "feed": {"limit": 3}}));
        assert!(form.fields.iter().all(|field| !field.dirty));
    }

    #[test]
    fn uncovered_nested_keys_pass_through() {
        let mut form = state();
        form.seed_from_value(&json!({
            "feed": {"limit": 3, "source": "rss"},
            "pinned": true
        }));
        let (value, _) = form.collect_value();
        assert_eq!(
            value,
            json!({"title": "News", "feed": {"limit": 3, "source": "rss"}, "pinned": true})
        );
    }

    #[test]
    fn cleared_fields_are_removed_from_seeded_data() {
        let mut form = state();
        form.seed_from_value(&json!({"title": "Daily", "feed": {"limit": 3}}));
        form.fields[0].handle_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE));
        let (value, _) = form.collect_value();
        assert_eq!(value, json!({"feed": {"limit": 3}}));
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = state();
        form.focus_prev_field();
        assert_eq!(form.field_index, 2);
        form.focus_next_field();
        assert_eq!(form.field_index, 0);
    }

    #[test]
    fn collect_value_reports_every_coercion_error() {
        let mut form = state();
        form.seed_from_value(&json!({"feed": {"limit": "man", "compact": true}}));
        form.fields[1].handle_key(&KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE));
        let (value, errors) = form.collect_value();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer, "/feed/limit");
        assert_eq!(value, json!({"title": "News", "feed": {"compact": true}}));
    }

    #[test]
    fn errors_attach_by_pointer() {
        let mut form = state();
        assert!(form.set_error("/feed/limit", "too big".into()));
        assert!(!form.set_error("/missing", "nope".into()));
        assert_eq!(form.error_count(), 1);
        form.clear_errors();
        assert_eq!(form.error_count(), 0);
    }

    #[test]
    fn scroll_follows_focus() {
        let mut form = state();
        form.field_index = 2;
        form.ensure_focus_visible(2);
        assert_eq!(form.scroll_offset, 1);
        form.field_index = 0;
        form.ensure_focus_visible(2);
        assert_eq!(form.scroll_offset, 0);
    }
}
