//! Request validation: JSON bodies, path ids, and seed list query strings.
//!
//! Every failure is an [`Error::Validation`] naming the offending field with its
//! wire (camelCase) name, so clients can highlight it.

use crate::{
    core::seed::{SeedQuery, SeedSort},
    entities::SeedCategory,
    errors::{Error, Result},
};
use axum::{Json, extract::rejection::JsonRejection};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Parses a numeric path id.
pub fn parse_id(id: &str) -> Result<i32> {
    id.trim()
        .parse()
        .map_err(|_| Error::invalid_field("id", format!("Invalid id '{id}'")))
}

/// A JSON object request body, read field by field.
#[derive(Debug, Default)]
pub struct JsonBody(Map<String, Value>);

impl JsonBody {
    /// Accepts the outcome of axum's `Json` extractor. Malformed JSON and
    /// non-object bodies are validation failures.
    pub fn from_extracted(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Self> {
        let Json(value) = body.map_err(|rejection| Error::Validation {
            message: rejection.body_text(),
            field: None,
        })?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(Error::Validation {
                message: "Request body must be a JSON object".to_string(),
                field: None,
            }),
        }
    }

    /// The value of `field`, treating JSON `null` as absent.
    fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    pub fn required_string(&self, field: &str) -> Result<String> {
        self.optional_string(field)?
            .ok_or_else(|| Error::invalid_field(field, format!("{field} is required")))
    }

    pub fn optional_string(&self, field: &str) -> Result<Option<String>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::invalid_field(field, format!("{field} must be a string"))),
        }
    }

    pub fn required_i32(&self, field: &str) -> Result<i32> {
        self.optional_i32(field)?
            .ok_or_else(|| Error::invalid_field(field, format!("{field} is required")))
    }

    /// Reads an integer. Fractional numbers and numeric strings are rejected.
    pub fn optional_i32(&self, field: &str) -> Result<Option<i32>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| Error::invalid_field(field, format!("{field} must be an integer"))),
        }
    }

    pub fn optional_bool(&self, field: &str) -> Result<Option<bool>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(Error::invalid_field(field, format!("{field} must be a boolean"))),
        }
    }

    /// Reads a list of strings. A string holding a JSON-encoded array is accepted too,
    /// since form clients submit list fields that way.
    pub fn string_list(&self, field: &str) -> Result<Vec<String>> {
        let invalid = || Error::invalid_field(field, format!("{field} must be a list of strings"));
        let value = match self.get(field) {
            None => return Ok(Vec::new()),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(Vec::new()),
            Some(Value::String(s)) => serde_json::from_str::<Value>(s).map_err(|_| invalid())?,
            Some(value) => value.clone(),
        };
        serde_json::from_value(value).map_err(|_| invalid())
    }

    pub fn optional_category(&self, field: &str) -> Result<Option<SeedCategory>> {
        self.optional_string(field)?
            .map(|value| parse_category(field, &value))
            .transpose()
    }
}

fn parse_category(field: &str, value: &str) -> Result<SeedCategory> {
    SeedCategory::parse(value)
        .ok_or_else(|| Error::invalid_field(field, format!("Unknown category '{value}'")))
}

/// Builds a [`SeedQuery`] from the list endpoint's query string.
///
/// Empty parameters are ignored; unparsable ones are rejected.
pub fn parse_seed_query(params: &HashMap<String, String>) -> Result<SeedQuery> {
    let param = |name: &str| {
        params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    let category = param("category")
        .map(|v| parse_category("category", v))
        .transpose()?;

    let difficulty = param("difficulty")
        .map(|v| {
            v.parse::<i32>().map_err(|_| {
                Error::invalid_field("difficulty", format!("Invalid difficulty '{v}'"))
            })
        })
        .transpose()?;

    let sort_by = param("sortBy")
        .map(|v| {
            SeedSort::parse(v)
                .ok_or_else(|| Error::invalid_field("sortBy", format!("Unknown sort order '{v}'")))
        })
        .transpose()?
        .unwrap_or_default();

    let featured = match param("featured") {
        None => false,
        Some(v) if v.eq_ignore_ascii_case("true") => true,
        Some(v) if v.eq_ignore_ascii_case("false") => false,
        Some(v) => {
            return Err(Error::invalid_field(
                "featured",
                format!("Invalid featured flag '{v}'"),
            ));
        }
    };

    Ok(SeedQuery {
        search: param("search").map(str::to_string),
        category,
        difficulty,
        sort_by,
        featured,
    })
}
