//! JSON contract parsing for generator output.
//!
//! Generators usually answer with "almost JSON": the object is there, but it
//! may be wrapped in prose or a markdown fence. Parsing is two-tiered:
//!
//! 1. a strict parse of the whole text;
//! 2. a parse of the slice between the first `{` and the last `}`.
//!
//! Nothing beyond that is attempted (no bracket balancing, no quote repair).
//! A successfully parsed object is then deserialized into a typed
//! [`Contract`] and validated, so shape problems surface as typed errors
//! instead of flowing through as loose maps.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Raw text could not be turned into a JSON object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no JSON object found in generator output: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised at the contract boundary.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The text did not contain a JSON object.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The object does not have the fields/types the contract requires.
    #[error("{contract} has an unexpected shape: {source}")]
    Shape {
        contract: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The object deserialized but breaks a contract rule.
    #[error("{contract} violates its contract: {reason}")]
    Invalid {
        contract: &'static str,
        reason: String,
    },
}

/// A typed shape that generator output must satisfy.
pub trait Contract: DeserializeOwned {
    /// Human-readable contract name used in error messages.
    const NAME: &'static str;

    /// Checks the rules serde cannot express.
    fn validate(&self) -> std::result::Result<(), String>;
}

/// Extracts a JSON object from free-form text.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => value,
        Err(strict_err) => {
            let sliced = object_slice(raw).ok_or_else(|| {
                ParseError::new(format!("strict parse failed ({strict_err}) and no braces found"))
            })?;
            serde_json::from_str::<Value>(sliced)
                .map_err(|e| ParseError::new(format!("sliced parse failed: {e}")))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::new(format!(
            "expected an object, found {}",
            value_kind(&other)
        ))),
    }
}

/// Parses raw generator text into a validated contract.
pub fn parse_contract<T: Contract>(raw: &str) -> Result<T, ContractError> {
    let object = parse_object(raw)?;
    let parsed: T =
        serde_json::from_value(Value::Object(object)).map_err(|source| ContractError::Shape {
            contract: T::NAME,
            source,
        })?;
    parsed.validate().map_err(|reason| ContractError::Invalid {
        contract: T::NAME,
        reason,
    })?;
    Ok(parsed)
}

fn object_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
