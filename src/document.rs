use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::mapping::Mapping;

/// Text formats a mapping can be read from or rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension, falling back to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => write!(f, "yaml"),
            DocumentFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(DocumentError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors raised while converting documents to and from mappings
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Expected a mapping at the document root, found {0}")]
    NotAMapping(&'static str),

    #[error("Mapping key is not a string: {0}")]
    NonStringKey(String),

    #[error("Unknown document format: {0}")]
    UnknownFormat(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a YAML value into a string-keyed mapping.
///
/// A null document is treated as an absent mapping and converts to an empty
/// one.
pub fn from_yaml(value: &Value) -> Result<Mapping<Value>, DocumentError> {
    let map = match value {
        Value::Null => return Ok(Mapping::new()),
        Value::Mapping(map) => map,
        other => return Err(DocumentError::NotAMapping(yaml_kind(other))),
    };

    let mut output = Mapping::with_capacity(map.len());
    for (key, value) in map {
        let key = key
            .as_str()
            .ok_or_else(|| DocumentError::NonStringKey(format!("{:?}", key)))?;
        output.insert(key.to_string(), value.clone());
    }
    Ok(output)
}

/// Build a YAML mapping with entries in sorted key order.
pub fn to_yaml(mapping: &Mapping<Value>) -> Value {
    let mut keys: Vec<&String> = mapping.keys().collect();
    keys.sort();

    let mut output = serde_yaml::Mapping::with_capacity(keys.len());
    for key in keys {
        output.insert(Value::String(key.clone()), mapping[key].clone());
    }
    Value::Mapping(output)
}

/// Convert a JSON object into a string-keyed mapping. `null` converts to an
/// empty mapping.
pub fn from_json(value: &serde_json::Value) -> Result<Mapping<serde_json::Value>, DocumentError> {
    match value {
        serde_json::Value::Null => Ok(Mapping::new()),
        serde_json::Value::Object(object) => Ok(object
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()),
        other => Err(DocumentError::NotAMapping(json_kind(other))),
    }
}

/// Build a JSON object from a mapping.
pub fn to_json(mapping: &Mapping<serde_json::Value>) -> serde_json::Value {
    let object: serde_json::Map<String, serde_json::Value> = mapping
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    serde_json::Value::Object(object)
}

/// Parse `text` in the given format into a mapping of YAML values.
///
/// JSON input is read into YAML values as well so both formats share one
/// value type downstream.
pub fn parse_document(
    text: &str,
    format: DocumentFormat,
) -> Result<Mapping<Value>, DocumentError> {
    let value: Value = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        DocumentFormat::Json => serde_json::from_str(text)?,
    };
    from_yaml(&value)
}

/// Render a mapping with sorted keys.
pub fn render_document(
    mapping: &Mapping<Value>,
    format: DocumentFormat,
) -> Result<String, DocumentError> {
    render(&to_yaml(mapping), format)
}

/// Render any serializable value in the given format.
pub fn render<T>(value: &T, format: DocumentFormat) -> Result<String, DocumentError>
where
    T: Serialize + ?Sized,
{
    let rendered = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        DocumentFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            text
        }
    };
    Ok(rendered)
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
