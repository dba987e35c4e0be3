//! Issuer records as served by the Casablanca API, and normalization of their `change` field.
//!
//! The upstream payload is loosely typed: `change` may be a JSON number, a string such as
//! `"-2,50%"`, or missing altogether. Records are parsed into [`IssuerRecord`] at the API
//! boundary so the classifier never touches raw JSON.

use serde_json::{Map, Value};

pub const DEFAULT_NAME: &str = "Inconnu";
pub const DEFAULT_SYMBOL: &str = "N/A";

/// Raw `change` value before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeValue {
    Number(f64),
    Text(String),
    /// Present but neither a number nor a string (null, bool, array, object).
    Unreadable,
}

/// Result of normalizing one record's change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    Value(f64),
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuerRecord {
    /// Defaults to `"Inconnu"`.
    pub name: String,
    /// Defaults to `"N/A"`.
    pub symbol: String,
    /// A missing key reads as `Number(0.0)`.
    pub change: ChangeValue,
}

impl IssuerRecord {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, change: ChangeValue) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            change,
        }
    }

    pub fn from_json(fields: &Map<String, Value>) -> Self {
        Self::new(
            text_field(fields.get("name"), DEFAULT_NAME),
            text_field(fields.get("symbol"), DEFAULT_SYMBOL),
            ChangeValue::from_json(fields.get("change")),
        )
    }

    pub fn normalized_change(&self) -> Normalized {
        self.change.normalize()
    }
}

impl ChangeValue {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => ChangeValue::Number(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(ChangeValue::Number)
                .unwrap_or(ChangeValue::Unreadable),
            Some(Value::String(s)) => ChangeValue::Text(s.clone()),
            Some(_) => ChangeValue::Unreadable,
        }
    }

    /// Numbers pass through. Text has every `%` removed and every `,` turned into `.`
    /// before parsing; anything that still fails to parse is skipped.
    pub fn normalize(&self) -> Normalized {
        match self {
            ChangeValue::Number(n) => Normalized::Value(*n),
            ChangeValue::Text(raw) => {
                let cleaned = raw.replace('%', "").replace(',', ".");
                match cleaned.trim().parse::<f64>() {
                    Ok(v) => Normalized::Value(v),
                    Err(_) => Normalized::Skipped,
                }
            }
            ChangeValue::Unreadable => Normalized::Skipped,
        }
    }
}

// Strings are taken as-is; other scalars keep their JSON text.
fn text_field(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
