use std::collections::HashSet;

use anyhow::{Result, bail};
use serde_json::Value;

use super::schema::{FieldKind, FieldSchema, FormSchema};

const MAX_REF_DEPTH: usize = 16;

/// Parse a widget settings schema into the flat `FormSchema` the dialog edits.
///
/// Nested object properties are flattened into dotted paths; local `$ref`s
/// (`#/definitions/..`, `#/$defs/..`) are followed.
pub fn parse_form_schema(schema: &Value) -> Result<FormSchema> {
    ensure_object(schema)?;
    let schema_type = read_type(schema).unwrap_or_else(|| "object".to_string());
    if schema_type != "object" {
        bail!("settings schema must describe an object, found {schema_type}");
    }

    let mut fields = Vec::new();
    parse_object_fields(schema, schema, Vec::new(), &mut fields, 0)?;

    Ok(FormSchema {
        title: read_str(schema, "title"),
        description: read_str(schema, "description"),
        fields,
        additional_properties: !matches!(
            schema.get("additionalProperties"),
            Some(Value::Bool(false))
        ),
    })
}

fn parse_object_fields(
    root: &Value,
    schema: &Value,
    path_prefix: Vec<String>,
    fields: &mut Vec<FieldSchema>,
    depth: usize,
) -> Result<()> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };
    let required = required_set(schema);

    for (name, raw) in properties {
        let value = resolve_ref(root, raw)?;
        let mut next_path = path_prefix.clone();
        next_path.push(name.clone());
        if is_object(value) && value.get("properties").is_some() {
            if depth >= MAX_REF_DEPTH {
                bail!("settings schema nests deeper than {MAX_REF_DEPTH} levels");
            }
            parse_object_fields(root, value, next_path, fields, depth + 1)?;
            continue;
        }

        fields.push(build_field_schema(
            root,
            value,
            name,
            next_path,
            required.contains(name),
        )?);
    }

    Ok(())
}

fn build_field_schema(
    root: &Value,
    value: &Value,
    name: &str,
    path: Vec<String>,
    required: bool,
) -> Result<FieldSchema> {
    let title = read_str(value, "title").unwrap_or_else(|| prettify_label(name));
    Ok(FieldSchema {
        name: name.to_string(),
        pointer: to_pointer(&path),
        path,
        title,
        description: read_str(value, "description"),
        kind: detect_kind(root, value)?,
        required,
        default: value.get("default").cloned(),
    })
}

fn detect_kind(root: &Value, value: &Value) -> Result<FieldKind> {
    if let Some(options) = value.get("enum").and_then(Value::as_array) {
        return Ok(FieldKind::Enum(options.clone()));
    }

    let kind = match read_type(value).as_deref() {
        Some("string") => FieldKind::String,
        Some("integer") => FieldKind::Integer,
        Some("number") => FieldKind::Number,
        Some("boolean") => FieldKind::Boolean,
        Some("array") => match value.get("items") {
            Some(items) => match detect_kind(root, resolve_ref(root, items)?)? {
                inner @ (FieldKind::String
                | FieldKind::Integer
                | FieldKind::Number
                | FieldKind::Boolean
                | FieldKind::Enum(_)) => FieldKind::Array(Box::new(inner)),
                FieldKind::Array(_) | FieldKind::Json => FieldKind::Json,
            },
            None => FieldKind::Json,
        },
        _ => FieldKind::Json,
    };
    Ok(kind)
}

fn resolve_ref<'a>(root: &'a Value, value: &'a Value) -> Result<&'a Value> {
    let mut current = value;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            return Ok(current);
        };
        let Some(pointer) = reference.strip_prefix('#') else {
            bail!("only local references are supported, found {reference}");
        };
        match root.pointer(pointer) {
            Some(target) => current = target,
            None => bail!("unresolved reference {reference}"),
        }
    }
    bail!("reference chain exceeds {MAX_REF_DEPTH} hops")
}

fn read_type(value: &Value) -> Option<String> {
    match value.get("type")? {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_lowercase())
            .find(|s| s != "null"),
        _ => None,
    }
}

fn read_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn required_set(schema: &Value) -> HashSet<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(super) fn to_pointer(path: &[String]) -> String {
    path.iter()
        .map(|segment| segment.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut acc, segment| {
            acc.push('/');
            acc.push_str(&segment);
            acc
        })
}

fn prettify_label(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut capitalize = true;
    for ch in raw.chars() {
        if ch == '_' || ch == '-' {
            result.push(' ');
            capitalize = true;
            continue;
        }
        if capitalize {
            result.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            result.push(ch);
        }
    }
    result.trim().to_string()
}

fn is_object(value: &Value) -> bool {
    match read_type(value) {
        Some(ty) => ty == "object",
        None => value.get("properties").is_some(),
    }
}

fn ensure_object(value: &Value) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        bail!("settings schema must be a JSON object")
    }
}
