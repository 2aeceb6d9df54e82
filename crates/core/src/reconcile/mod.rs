//! Response reconciliation: untrusted model text in, bounded typed result out.
//!
//! The pipeline is `extract_json_candidate` → `parse_strict` → `coerce_to_schema`
//! → typed deserialisation. Only two outcomes are failures, and both are
//! recoverable by the caller substituting its deterministic fallback:
//!
//! - [`ReconcileError::Parse`]: the candidate text is not valid JSON.
//! - [`ReconcileError::Schema`]: the JSON is valid but its top level is not an object.

mod extract;
mod schema;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use extract::extract_json_candidate;
pub use schema::{FieldKind, FieldSpec, Schema};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("model output is not valid JSON: {0}")]
    Parse(String),
    #[error("model output does not fit the result schema: {0}")]
    Schema(String),
}

impl ReconcileError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Schema(_) => "schema",
        }
    }
}

pub fn parse_strict(candidate: &str) -> Result<Value, ReconcileError> {
    serde_json::from_str(candidate).map_err(|error| ReconcileError::Parse(error.to_string()))
}

pub fn coerce_to_schema(value: &Value, schema: &Schema) -> Result<Value, ReconcileError> {
    match value {
        Value::Object(object) => Ok(Value::Object(schema.coerce_object(object))),
        other => Err(ReconcileError::Schema(format!(
            "expected a JSON object at the top level, found {}",
            json_type(other)
        ))),
    }
}

/// Runs the whole pipeline and deserialises into `T`, whose serde shape must
/// mirror `schema`.
pub fn reconcile<T>(raw: &str, schema: &Schema) -> Result<T, ReconcileError>
where
    T: DeserializeOwned,
{
    let candidate = extract_json_candidate(raw);
    let parsed = parse_strict(&candidate)?;
    let coerced = coerce_to_schema(&parsed, schema)?;
    serde_json::from_value(coerced).map_err(|error| ReconcileError::Schema(error.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::{coerce_to_schema, parse_strict, reconcile, ReconcileError, Schema};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        label: String,
        score: u32,
        notes: Vec<String>,
    }

    fn verdict_schema() -> Schema {
        Schema::new().text_or("label", "unknown").integer("score", 0, 10, 5).text_list("notes", Some(2))
    }

    #[test]
    fn prose_wrapped_object_is_reconciled() {
        let verdict: Verdict = reconcile(
            "Here you go:\n{\"label\": \"good\", \"score\": 12, \"notes\": [\"a\", \"b\", \"c\"]}",
            &verdict_schema(),
        )
        .expect("reconcile should succeed");

        assert_eq!(
            verdict,
            Verdict { label: "good".to_string(), score: 10, notes: vec!["a".into(), "b".into()] }
        );
    }

    #[test]
    fn non_json_text_is_a_parse_error() {
        let result = reconcile::<Verdict>("I cannot help with that.", &verdict_schema());

        assert!(matches!(result, Err(ReconcileError::Parse(_))));
    }

    #[test]
    fn top_level_array_is_a_schema_error() {
        let parsed = parse_strict("[1, 2, 3]").expect("valid json");
        let result = coerce_to_schema(&parsed, &verdict_schema());

        assert!(matches!(result, Err(ReconcileError::Schema(ref message)) if message.contains("array")));
    }

    #[test]
    fn truncated_json_is_a_parse_error_not_a_partial_result() {
        let result = reconcile::<Verdict>("{\"label\": \"good\", \"score\": ", &verdict_schema());

        assert_eq!(result.as_ref().map_err(ReconcileError::kind), Err("parse"));
    }

    #[test]
    fn empty_object_yields_all_defaults() {
        let verdict: Verdict = reconcile("{}", &verdict_schema()).expect("reconcile should succeed");

        assert_eq!(verdict, Verdict { label: "unknown".to_string(), score: 5, notes: Vec::new() });
    }

    #[test]
    fn coerced_value_matches_schema_exactly() {
        let value = json!({ "label": "fine", "score": 3, "notes": ["x"] });

        assert_eq!(coerce_to_schema(&value, &verdict_schema()), Ok(value));
    }
}
