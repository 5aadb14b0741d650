use crate::ValidateError;
use serde_json::Value;
use toolreg_model::Tool;

/// Structural check of a single raw record, in isolation. No taxonomy
/// lookups here; those belong to governance. Returns every structural
/// defect found rather than stopping at the first.
#[must_use]
pub fn check_tool_shape(record: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(map) = record.as_object() else {
        problems.push("record must be a JSON object".to_string());
        return problems;
    };

    for field in ["id", "name", "category"] {
        match map.get(field) {
            None => problems.push(format!("missing required field: {field}")),
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(_) => problems.push(format!("{field} must be a non-empty string")),
        }
    }

    match map.get("capabilities") {
        None => problems.push("missing required field: capabilities".to_string()),
        Some(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                if !item.is_string() {
                    problems.push(format!("capabilities[{idx}] must be a string"));
                }
            }
        }
        Some(_) => problems.push("capabilities must be a list of strings".to_string()),
    }

    match map.get("pricing") {
        None => problems.push("missing required field: pricing".to_string()),
        Some(Value::Object(pricing)) => {
            match pricing.get("model") {
                None => problems.push("missing required field: pricing.model".to_string()),
                Some(Value::String(_)) => {}
                Some(_) => problems.push("pricing.model must be a string".to_string()),
            }
            for bound in ["minMonthlyUSD", "maxMonthlyUSD"] {
                if let Some(value) = pricing.get(bound) {
                    if !value.is_number() {
                        problems.push(format!("pricing.{bound} must be numeric"));
                    }
                }
            }
        }
        Some(_) => problems.push("pricing must be an object".to_string()),
    }

    if let Some(compliance) = map.get("compliance") {
        if !compliance.is_object() {
            problems.push("compliance must be an object".to_string());
        }
    }

    problems
}

/// Typed decode of a record that already passed [`check_tool_shape`].
pub fn decode_tool(record: &Value) -> Result<Tool, ValidateError> {
    serde_json::from_value(record.clone())
        .map_err(|e| ValidateError(format!("tool record decode failed: {e}")))
}
