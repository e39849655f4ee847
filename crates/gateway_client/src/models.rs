//! Gateway response normalization
//!
//! The gateway body is parsed into a loosely-typed value first, then
//! mapped to [`RouteData`] through an ordered list of key-name fallbacks
//! per field, with string/number coercion done in one place.

use serde_json::Value;

use crate::error::GatewayError;

/// Key-name fallback pairs: the English name the gateway documents today,
/// and the localized name older deployments used for the same field.
const DISTANCE_KEYS: [&str; 2] = ["distance", "distancia"];
const DURATION_KEYS: [&str; 2] = ["duration", "duracao"];
const SAFETY_KEYS: [&str; 2] = ["safetyScore", "pontuacaoSeguranca"];

/// Canonical, normalized route preview from the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct RouteData {
    /// Encoded polyline for the route path
    pub polyline: String,
    /// Display distance as the gateway formatted it
    pub distance_text: Option<String>,
    /// Display duration as the gateway formatted it
    pub duration_text: Option<String>,
    /// Numeric distance extracted from the display text (no unit assumed)
    pub distance_value: Option<f64>,
    /// Numeric duration extracted from the display text (no unit assumed)
    pub duration_value: Option<f64>,
    /// Optional safety annotation, opaque pass-through
    pub safety_score: Option<f64>,
}

impl RouteData {
    /// Normalize a raw gateway response body
    ///
    /// # Errors
    ///
    /// `ParseError` only when the polyline itself is missing; every other
    /// field is optional under both key conventions.
    pub fn from_response(body: &Value) -> Result<Self, GatewayError> {
        let polyline = body
            .get("polyline")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::ParseError("response has no polyline".to_string()))?
            .to_string();

        let distance = first_present(body, &DISTANCE_KEYS);
        let duration = first_present(body, &DURATION_KEYS);
        let safety = first_present(body, &SAFETY_KEYS);

        Ok(Self {
            polyline,
            distance_text: distance.map(display_text),
            duration_text: duration.map(display_text),
            distance_value: distance.and_then(numeric_value),
            duration_value: duration.and_then(numeric_value),
            safety_score: safety.and_then(numeric_value),
        })
    }
}

/// The first value present under any of the candidate key names
fn first_present<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| body.get(*key))
        .filter(|v| !v.is_null())
}

/// Render a field for display, whatever its JSON type
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a string or number field to its numeric meaning
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_numeric(s),
        _ => None,
    }
}

/// Extract a number from text that mixes units and digits
///
/// Strips everything but digits, comma, and period, normalizes the comma
/// decimal separator to a period, then parses. Text with no digits yields
/// `None`, distinguishable from zero.
#[must_use]
pub fn extract_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = cleaned.replace(',', ".");
    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    normalized.parse().ok()
}
