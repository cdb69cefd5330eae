//! Turns the model's free-form reply into an `AnimalAnalysis`.
//!
//! The reply is expected to hold one JSON object, possibly wrapped in Markdown fences.
//! Missing or non-string fields degrade to empty strings rather than failing; only a reply
//! that is not a JSON object at all is malformed.

use fauna_core::models::AnimalAnalysis;
use serde_json::{Map, Value};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// The reply could not be decoded into an analysis
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Reply is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Reply is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Classification of a decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// At least one field carries real content
    Valid(AnimalAnalysis),
    /// Every field is a placeholder; the image is not a recognizable animal
    Rejected(AnimalAnalysis),
}

/// Remove every Markdown fence marker and trim.
pub fn strip_fences(raw: &str) -> String {
    raw.replace(JSON_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
        _ => String::new(),
    }
}

/// Decode a reply into an analysis without classifying it.
pub fn decode(raw: &str) -> Result<AnimalAnalysis, NormalizeError> {
    let cleaned = strip_fences(raw);
    let value: Value =
        serde_json::from_str(&cleaned).map_err(|e| NormalizeError::InvalidJson(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        other => return Err(NormalizeError::NotAnObject(json_kind(&other))),
    };

    Ok(AnimalAnalysis {
        species: field_text(&object, "species"),
        breed: field_text(&object, "breed"),
        country: field_text(&object, "country"),
        habitat: field_text(&object, "habitat"),
        specifications: field_text(&object, "specifications"),
        common_problems: field_text(&object, "common_problems"),
        fun_facts: field_text(&object, "fun_facts"),
    })
}

/// Decode and classify a reply.
pub fn normalize(raw: &str) -> Result<Normalized, NormalizeError> {
    let analysis = decode(raw)?;
    if analysis.is_valid() {
        Ok(Normalized::Valid(analysis))
    } else {
        Ok(Normalized::Rejected(analysis))
    }
}
