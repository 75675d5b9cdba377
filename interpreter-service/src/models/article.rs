//! Inbound article payload and the success body sent back to the caller.

use crate::error::InterpretError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A validated article: both fields present and non-falsy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article identifier as it will appear in the prompt.
    pub numero: String,
    pub texto: String,
}

impl Article {
    /// Parse and validate a raw request body.
    ///
    /// Bodies that are not JSON, or are JSON `null`, fail with a server-side
    /// message. Valid JSON that lacks either field, or carries a falsy value
    /// for it, is [`InterpretError::InvalidInput`].
    pub fn from_body(body: &[u8]) -> Result<Self, InterpretError> {
        let value: Value = serde_json::from_slice(body)?;

        if value.is_null() {
            return Err(InterpretError::Unknown(
                "request body must be a JSON object, found null".to_string(),
            ));
        }

        let Some(fields) = value.as_object() else {
            return Err(InterpretError::InvalidInput);
        };

        let numero = fields.get("numero").and_then(truthy_text);
        let texto = fields.get("texto").and_then(truthy_text);

        match (numero, texto) {
            (Some(numero), Some(texto)) => Ok(Self { numero, texto }),
            _ => Err(InterpretError::InvalidInput),
        }
    }
}

/// Render a JSON scalar as prompt text, or `None` if it is falsy.
///
/// Empty strings, zero, `false` and `null` are falsy. Arrays and objects are
/// rejected as well: they have no meaningful rendering in the prompt.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => number_text(n),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Non-zero numbers as a reader writes them: integral values drop the
/// fractional part, so `1.0` and `1e2` become `1` and `100`.
fn number_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return (u != 0).then(|| u.to_string());
    }

    let f = n.as_f64()?;
    if f == 0.0 || !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 1e21 {
        Some(format!("{:.0}", f))
    } else {
        Some(f.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterpretResponse {
    pub interpretation: String,
}
