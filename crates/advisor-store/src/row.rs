//! Result rows returned by a graph store

use crate::error::StoreError;
use serde_json::{Map, Value};

/// One result record: output alias → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Row(Map::new())
    }

    /// Zip a column header with one data row.
    pub fn from_columns(columns: &[String], values: Vec<Value>) -> Self {
        Row(columns.iter().cloned().zip(values).collect())
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// A required scalar. Numbers are accepted and rendered as text.
    pub fn str(&self, column: &str) -> Result<String, StoreError> {
        self.opt_str(column)?
            .ok_or_else(|| malformed(column, "is missing"))
    }

    /// An optional scalar; `null` and absent both map to `None`.
    pub fn opt_str(&self, column: &str) -> Result<Option<String>, StoreError> {
        match self.0.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| malformed(column, "is not a string")),
        }
    }

    /// A list of scalars, e.g. the output of `collect(c.course_id)`.
    pub fn strings(&self, column: &str) -> Result<Vec<String>, StoreError> {
        match self.0.get(column) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| scalar_text(item).ok_or_else(|| malformed(column, "holds a non-string item")))
                .collect(),
            None | Some(Value::Null) => Err(malformed(column, "is missing")),
            Some(_) => Err(malformed(column, "is not a list")),
        }
    }

    /// A list of lists, e.g. `collect(courses)` over grouped collections.
    pub fn string_lists(&self, column: &str) -> Result<Vec<Vec<String>>, StoreError> {
        match self.0.get(column) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Array(inner) => inner
                        .iter()
                        .map(|v| scalar_text(v).ok_or_else(|| malformed(column, "holds a non-string item")))
                        .collect(),
                    _ => Err(malformed(column, "holds a non-list item")),
                })
                .collect(),
            None | Some(Value::Null) => Err(malformed(column, "is missing")),
            Some(_) => Err(malformed(column, "is not a list")),
        }
    }

    /// A unit count as stored, whole or fractional; `null` maps to `None`.
    pub fn units(&self, column: &str) -> Result<Option<f64>, StoreError> {
        match self.0.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| malformed(column, "is not a finite number")),
            Some(_) => Err(malformed(column, "is not a number")),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn malformed(column: &str, reason: &str) -> StoreError {
    StoreError::MalformedRow {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}
