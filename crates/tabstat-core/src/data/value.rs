//! Scalar cell values
//!
//! A [`Value`] is what a loader hands over for one cell: a number, a piece
//! of text, or nothing at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing cell
    #[default]
    Null,
    /// Numeric cell
    Number(f64),
    /// Text cell (categorical labels, dates, or numbers not yet parsed)
    Text(String),
}

impl Value {
    /// Whether the cell counts as missing (null or blank text)
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(_) => false,
            Value::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric reading of the cell, parsing text when needed
    ///
    /// Returns `None` for missing cells and for text that is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Number(v) => Some(*v),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
        }
    }

    /// Text content, if this is a text cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Label used when counting frequencies; missing cells map to `sentinel`
    pub fn label(&self, sentinel: &str) -> String {
        if self.is_missing() {
            return sentinel.to_string();
        }
        match self {
            Value::Number(v) => format_number(*v),
            Value::Text(s) => s.clone(),
            Value::Null => sentinel.to_string(),
        }
    }
}

// Integral floats print without a trailing ".0" so that `3.0` and "3"
// land in the same frequency bucket.
fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(v) => write!(f, "{}", format_number(*v)),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
