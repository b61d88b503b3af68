//! Error types for the shared crate
//!
//! Backend error bodies and vocabulary parse failures.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A string that is not part of a closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Validation failure reported by the backend
///
/// The backend answers a rejected request with one of:
/// ```json
/// {"detail": "Permission denied"}
/// {"non_field_errors": ["Feedback already submitted"]}
/// {"email": ["A user with this email already exists."], "password": "Passwords do not match."}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub detail: Option<String>,
    pub non_field: Vec<String>,
    pub fields: BTreeMap<String, Vec<String>>,
    /// Body text when it was not a recognizable error object
    pub raw: Option<String>,
}

const NON_FIELD_KEY: &str = "non_field_errors";

impl ValidationErrors {
    /// Single message, as raised locally before any request is made.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            non_field: vec![message.into()],
            ..Default::default()
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.fields.insert(field.into(), vec![message.into()]);
        errors
    }

    /// Parse a response body. Never fails: unknown shapes keep the raw text.
    pub fn from_body(body: &str) -> Self {
        let mut errors = Self::default();
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    let messages = messages_of(&value);
                    if key == "detail" {
                        errors.detail = messages.into_iter().next();
                    } else if key == NON_FIELD_KEY {
                        errors.non_field.extend(messages);
                    } else if !messages.is_empty() {
                        errors.fields.insert(key, messages);
                    }
                }
            }
            Ok(Value::Array(items)) => {
                errors.non_field = items.iter().flat_map(messages_of).collect();
            }
            Ok(Value::String(text)) => errors.non_field.push(text),
            _ => {}
        }
        if errors.is_empty() {
            let trimmed = body.trim();
            if !trimmed.is_empty() {
                errors.raw = Some(trimmed.to_string());
            }
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_none() && self.non_field.is_empty() && self.fields.is_empty()
    }

    /// Detail, then the first non-field error, then the first field error.
    pub fn first_message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or_else(|| self.non_field.first().map(String::as_str))
            .or_else(|| {
                self.fields
                    .values()
                    .find_map(|messages| messages.first().map(String::as_str))
            })
            .or(self.raw.as_deref())
    }

    /// First message of the first listed field that has one.
    pub fn first_for(&self, fields: &[&str]) -> Option<&str> {
        fields.iter().find_map(|field| {
            self.fields
                .get(*field)
                .and_then(|messages| messages.first())
                .map(String::as_str)
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message().unwrap_or("Please check your inputs."))
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        Value::Object(map) => map.values().flat_map(messages_of).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
