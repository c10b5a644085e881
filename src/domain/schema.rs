use serde_json::Value;

use super::widget::Settings;

#[derive(Debug, Clone)]
pub struct FormSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
    /// Whether keys outside `properties` are accepted at the root.
    pub additional_properties: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Allowed values exactly as the schema lists them.
    Enum(Vec<Value>),
    Array(Box<FieldKind>),
    Json,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub path: Vec<String>,
    pub pointer: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSchema {
    pub fn display_label(&self) -> String {
        if self.title.eq_ignore_ascii_case(&self.name) {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.name)
        }
    }

    pub fn type_label(&self) -> String {
        kind_label(&self.kind)
    }
}

impl FormSchema {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add free-form fields for top-level keys of `data` that no property covers.
    ///
    /// Only applies when the schema accepts additional properties; the field
    /// kind is inferred from the current value.
    pub fn extend_with_data(&mut self, data: &Settings) {
        if !self.additional_properties {
            return;
        }
        for (name, value) in data {
            let covered = self
                .fields
                .iter()
                .any(|field| field.path.first().is_some_and(|head| head == name));
            if covered {
                continue;
            }
            let path = vec![name.clone()];
            self.fields.push(FieldSchema {
                name: name.clone(),
                pointer: super::parser::to_pointer(&path),
                path,
                title: name.clone(),
                description: None,
                kind: infer_kind(value),
                required: false,
                default: None,
            });
        }
    }
}

fn infer_kind(value: &Value) -> FieldKind {
    match value {
        Value::String(_) => FieldKind::String,
        Value::Bool(_) => FieldKind::Boolean,
        Value::Number(num) if num.is_i64() || num.is_u64() => FieldKind::Integer,
        Value::Number(_) => FieldKind::Number,
        Value::Null | Value::Array(_) | Value::Object(_) => FieldKind::Json,
    }
}

fn kind_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::String => "string".to_string(),
        FieldKind::Integer => "integer".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Enum(_) => "enum".to_string(),
        FieldKind::Array(inner) => format!("{}[]", kind_label(inner)),
        FieldKind::Json => "json".to_string(),
    }
}
