use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Settings, Widget, WidgetId};

use super::DocumentFormat;

/// One widget as stored in a dashboard layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDocument {
    pub id: WidgetId,
    #[serde(default)]
    pub widget: Widget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Read a document from disk, picking the format from its extension.
pub fn load_document(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document_str(&contents, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_widget_document(contents: &str, format: DocumentFormat) -> Result<WidgetDocument> {
    let value = parse_document_str(contents, format)?;
    serde_json::from_value(value).context("document is not a widget description")
}

pub fn load_widget_document(path: &Path) -> Result<WidgetDocument> {
    let value = load_document(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("{} is not a widget description", path.display()))
}

/// Interpret `value` as a settings object.
pub fn settings_from_value(value: Value) -> Result<Settings> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Settings::new()),
        other => bail!("settings must be an object, found {}", type_name(&other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
