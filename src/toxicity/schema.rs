// Output schema and response validation.
//
// The same JSON Schema is sent to the model as its structured-output
// constraint and used here to check what comes back. Schema validation
// catches shape errors; the typed conversion afterwards re-checks the
// numeric range so the invariants hold even if the schema drifts.

use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::models::{Severity, ToxicityBreakdownItem, ToxicityCategory, ToxicityResult};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Why a model response was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("output schema failed to compile: {0}")]
    SchemaCompilation(String),
    #[error("model output does not match schema: {}", .0.join("; "))]
    Schema(Vec<String>),
    #[error("model output could not be decoded: {0}")]
    Malformed(String),
    #[error("score {0} is outside 0-100")]
    ScoreOutOfRange(f64),
    #[error("breakdown is empty")]
    EmptyBreakdown,
}

/// The JSON Schema describing a ToxicityResult.
pub fn output_schema() -> Value {
    let categories: Vec<&str> = ToxicityCategory::ALL.iter().map(|c| c.as_str()).collect();
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "score": {
                "type": "number",
                "minimum": MIN_SCORE,
                "maximum": MAX_SCORE,
                "description": "Overall toxicity from 0 (healthy) to 100 (extremely toxic)"
            },
            "breakdown": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "enum": categories },
                        "detected": { "type": "boolean" },
                        "severity": { "type": "string", "enum": severities }
                    },
                    "required": ["type", "detected", "severity"]
                }
            }
        },
        "required": ["score", "breakdown"]
    })
}

static VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn compiled_validator() -> Result<&'static jsonschema::Validator, ValidationError> {
    VALIDATOR
        .get_or_init(|| jsonschema::validator_for(&output_schema()).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| ValidationError::SchemaCompilation(e.clone()))
}

/// Wire shape before the score is narrowed to an integer.
#[derive(Deserialize)]
struct RawResult {
    score: f64,
    breakdown: Vec<ToxicityBreakdownItem>,
}

/// Validate raw model output and convert it into a typed result.
///
/// Fractional scores are rounded to the nearest integer. Extra fields are
/// ignored.
pub fn validate_result(raw: &Value) -> Result<ToxicityResult, ValidationError> {
    let validator = compiled_validator()?;

    let errors: Vec<String> = validator
        .iter_errors(raw)
        .map(|err| format!("{} at {}", err, err.instance_path))
        .collect();
    if !errors.is_empty() {
        return Err(ValidationError::Schema(errors));
    }

    let parsed: RawResult = serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;

    if !parsed.score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&parsed.score) {
        return Err(ValidationError::ScoreOutOfRange(parsed.score));
    }
    if parsed.breakdown.is_empty() {
        return Err(ValidationError::EmptyBreakdown);
    }

    Ok(ToxicityResult {
        score: parsed.score.round() as u8,
        breakdown: parsed.breakdown,
    })
}
