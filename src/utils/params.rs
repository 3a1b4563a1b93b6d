// Integer parameter parsing shared by query strings and JSON bodies.
//
// Clients send ids either as JSON numbers or as strings, and the web client
// historically relied on prefix parsing ("12px" -> 12). Anything without a
// leading run of digits is rejected before reaching the store.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

use super::service_error::ServiceError;

/// Parses the leading integer of `raw`: skips leading whitespace, accepts one
/// optional sign, then consumes decimal digits up to the first non-digit.
/// Returns `None` when no digit is found. Values beyond the `i32` range
/// saturate, so an oversized id is still a number and simply matches nothing.
pub fn parse_int_prefix(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // only digits remain, so the parse can fail on overflow alone
    let magnitude: i64 = rest[..digits_len].parse().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    Some(saturate_i32(value))
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parameter state after reading an optional raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntParam {
    Missing,
    Invalid,
    Value(i32),
}

impl IntParam {
    /// Absent and empty values both count as missing.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            None => IntParam::Missing,
            Some(s) if s.is_empty() => IntParam::Missing,
            Some(s) => parse_int_prefix(s).map_or(IntParam::Invalid, IntParam::Value),
        }
    }

    /// Value of an optional filter: missing or unparsable means "no filter".
    pub fn as_filter(self) -> Option<i32> {
        match self {
            IntParam::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Integer that may arrive as a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleInt {
    Number(serde_json::Number),
    Text(String),
}

impl FlexibleInt {
    pub fn parse(&self) -> IntParam {
        match self {
            FlexibleInt::Number(n) => match n.as_i64() {
                Some(v) => IntParam::Value(saturate_i32(v)),
                // floats truncate like the string form does
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .and_then(|f| parse_int_prefix(&format!("{}", f.trunc())))
                    .map_or(IntParam::Invalid, IntParam::Value),
            },
            FlexibleInt::Text(s) => IntParam::from_query(Some(s)),
        }
    }
}

/// Decoded query pairs keyed by name. A repeated key keeps its first value.
pub fn first_query_values(query: &str) -> Map<String, Value> {
    let mut values = Map::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| Value::String(value.into_owned()));
    }
    values
}

/// Query extractor over [`first_query_values`]: `?code=a&code=b` reads as
/// `code=a` instead of failing the whole request. Rejections render as the
/// usual JSON `{error}` body.
#[derive(Debug, Clone)]
pub struct FirstValueQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for FirstValueQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values = first_query_values(parts.uri.query().unwrap_or_default());
        serde_json::from_value(Value::Object(values))
            .map(FirstValueQuery)
            .map_err(|e| {
                tracing::debug!("Rejected query string: {}", e);
                ServiceError::validation("Paramètres de requête invalides")
            })
    }
}

/// Reads an optional body field into an [`IntParam`].
pub fn body_int(field: Option<&FlexibleInt>) -> IntParam {
    field.map_or(IntParam::Missing, FlexibleInt::parse)
}
