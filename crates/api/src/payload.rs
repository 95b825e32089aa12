//! Field-level parsing of JSON request bodies.
//!
//! Handlers accept raw `serde_json::Value` bodies and pull typed fields out
//! through [`Payload`], which records every problem against its field name
//! instead of failing on the first one. The collected messages surface as a
//! 400 with a `fields` map.

use chrono::NaiveDate;
use listings_core::error::{CoreError, FieldErrors};
use listings_core::types::DbId;
use serde_json::{Map, Value};
use validator::ValidationErrors;

use crate::error::AppError;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const DATE_FORMAT: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Message for a primary key of the wrong JSON type.
pub fn incorrect_pk_type(value: &Value) -> String {
    format!(
        "Incorrect type. Expected pk value, received {}.",
        json_type_name(value)
    )
}

/// Message for a primary key that does not resolve to a row.
pub fn missing_pk(id: DbId) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// `YYYY-M[M]-D[D]` with plain ASCII digits. chrono alone would also take a
/// signed or five-digit year.
fn has_date_shape(s: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = s.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
        }
        _ => false,
    }
}

/// A JSON object body being read field by field.
#[derive(Debug)]
pub struct Payload<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Payload<'a> {
    /// Start reading `body`, which must be a JSON object.
    pub fn from_value(body: &'a Value) -> Result<Self, AppError> {
        match body {
            Value::Object(object) => Ok(Self {
                object,
                errors: FieldErrors::new(),
            }),
            other => Err(AppError::BadRequest(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(other)
            ))),
        }
    }

    /// The raw value of a required, non-null field.
    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            None => {
                self.errors.add(field, REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// A required `YYYY-MM-DD` date.
    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let value = self.required(field)?;
        let parsed = value
            .as_str()
            .map(str::trim)
            .filter(|s| has_date_shape(s))
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        if parsed.is_none() {
            self.errors.add(field, DATE_FORMAT);
        }
        parsed
    }

    /// A required text field, trimmed. Numbers are accepted as their string form.
    pub fn text(&mut self, field: &str) -> Option<String> {
        match self.required(field)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.errors.add(field, NOT_A_STRING);
                None
            }
        }
    }

    /// A required primary key: a JSON integer or a string holding one.
    ///
    /// Only the shape is checked; whether the row exists is up to the caller.
    pub fn pk(&mut self, field: &str) -> Option<DbId> {
        let value = self.required(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(field, incorrect_pk_type(value));
        }
        parsed
    }

    /// Record an error found outside this reader, e.g. an unresolved reference.
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Fold in `validator` results for fields that have no error yet.
    pub fn absorb(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else { return };
        for (field, field_errors) in errors.field_errors() {
            if !self.errors.get(&field).is_empty() {
                continue;
            }
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                self.errors.add(field.to_string(), message);
            }
        }
    }

    /// `Ok(())` if every field read cleanly.
    pub fn finish(self) -> Result<(), CoreError> {
        self.errors.into_result()
    }
}
