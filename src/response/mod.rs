//! Response handler: turns a parsed body into a displayable outcome.

use serde_json::Value;
use tracing::debug;

pub const INVALID_RESPONSE_MESSAGE: &str = "Prediction response is invalid. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Truthy `output`, rendered for display.
    Prediction(String),
    InvalidResponse,
}

impl Response {
    pub fn message(&self) -> &str {
        match self {
            Response::Prediction(text) => text,
            Response::InvalidResponse => INVALID_RESPONSE_MESSAGE,
        }
    }
}

pub fn interpret(body: &Value) -> Response {
    match body.get("output") {
        Some(output) if is_truthy(output) => Response::Prediction(display(output)),
        _ => {
            if let Some(detail) = body.get("detail") {
                debug!(detail = %detail, "response carried detail but no output");
            }
            Response::InvalidResponse
        }
    }
}

/// `null`, `false`, zero and the empty string are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whole-valued floats drop their fraction (`1.0` shows as `1`).
fn display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
