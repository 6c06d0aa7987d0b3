//! Column schema inference
//!
//! Every column of a [`Table`] is classified as numerical, date/time or
//! categorical, and summarised accordingly. Inference never fails: a
//! column that is neither numerical nor date/time is categorical.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::*;

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Numerical,
    Categorical,
    DateTime,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Numerical => write!(f, "Numerical"),
            DataType::Categorical => write!(f, "Categorical"),
            DataType::DateTime => write!(f, "DateTime"),
        }
    }
}

/// Observed range of a numerical column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

/// Summary of a numerical column (over non-missing cells)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberSchema {
    pub key: String,
    pub index: usize,
    pub row_count: usize,
    pub range: NumberRange,
    pub mean: f64,
}

/// Summary of a categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSchema {
    pub key: String,
    pub index: usize,
    pub row_count: usize,
    pub frequencies: FrequencyTable,
}

/// Bounds of a date/time column
///
/// `min_unix` only considers positive timestamps and `max_unix` only
/// timestamps strictly before the reference instant. A bound is `None`
/// when no timestamp survives its filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeRange {
    pub min_unix: Option<i64>,
    pub max_unix: Option<i64>,
    pub min_date_time: Option<String>,
    pub max_date_time: Option<String>,
}

/// Summary of a date/time column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeSchema {
    pub key: String,
    pub index: usize,
    pub row_count: usize,
    pub range: DateTimeRange,
    pub frequencies: FrequencyTable,
}

/// Inferred schema of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ColumnSchema {
    #[serde(rename = "Numerical")]
    Number(NumberSchema),
    Categorical(CategoricalSchema),
    DateTime(DateTimeSchema),
}

impl ColumnSchema {
    pub fn key(&self) -> &str {
        match self {
            ColumnSchema::Number(s) => &s.key,
            ColumnSchema::Categorical(s) => &s.key,
            ColumnSchema::DateTime(s) => &s.key,
        }
    }

    /// Position of the column in the source table
    pub fn index(&self) -> usize {
        match self {
            ColumnSchema::Number(s) => s.index,
            ColumnSchema::Categorical(s) => s.index,
            ColumnSchema::DateTime(s) => s.index,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ColumnSchema::Number(s) => s.row_count,
            ColumnSchema::Categorical(s) => s.row_count,
            ColumnSchema::DateTime(s) => s.row_count,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnSchema::Number(_) => DataType::Numerical,
            ColumnSchema::Categorical(_) => DataType::Categorical,
            ColumnSchema::DateTime(_) => DataType::DateTime,
        }
    }

    pub fn as_number(&self) -> Option<&NumberSchema> {
        match self {
            ColumnSchema::Number(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSchema> {
        match self {
            ColumnSchema::Categorical(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTimeSchema> {
        match self {
            ColumnSchema::DateTime(s) => Some(s),
            _ => None,
        }
    }

    /// Frequency table, for categorical and date/time columns
    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        match self {
            ColumnSchema::Number(_) => None,
            ColumnSchema::Categorical(s) => Some(&s.frequencies),
            ColumnSchema::DateTime(s) => Some(&s.frequencies),
        }
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} rows",
            self.key(),
            self.data_type(),
            self.row_count()
        )?;
        match self {
            ColumnSchema::Number(s) => write!(
                f,
                ", min {}, max {}, mean {:.4}",
                s.range.min, s.range.max, s.mean
            ),
            ColumnSchema::Categorical(s) => write!(f, ", {} distinct", s.frequencies.len()),
            ColumnSchema::DateTime(s) => write!(
                f,
                ", {} .. {}",
                s.range.min_date_time.as_deref().unwrap_or("?"),
                s.range.max_date_time.as_deref().unwrap_or("?")
            ),
        }
    }
}

/// Settings for schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Label counted for missing cells
    pub missing_sentinel: String,
    /// strftime-style layout of the date/time bounds
    pub datetime_format: String,
    /// Instant after which timestamps are discarded from `max_unix`;
    /// `None` means the moment inference runs
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            missing_sentinel: MISSING_SENTINEL.to_string(),
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            reference_time: None,
        }
    }
}

impl InferenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.missing_sentinel = sentinel.into();
        self
    }

    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    pub fn reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    fn now_millis(&self) -> i64 {
        self.reference_time
            .unwrap_or_else(Utc::now)
            .timestamp_millis()
    }
}

/// Infer the schema of every column with default settings
pub fn infer_schema(table: &Table) -> Vec<ColumnSchema> {
    infer_schema_with(table, &InferenceConfig::default())
}

/// Infer the schema of every column, in table order
pub fn infer_schema_with(table: &Table, config: &InferenceConfig) -> Vec<ColumnSchema> {
    let now = config.now_millis();
    table
        .iter()
        .enumerate()
        .map(|(index, (key, cells))| classify(key, index, cells, table.nrows(), config, now))
        .collect()
}

/// Infer the schema of a single column
pub fn infer_column(
    key: &str,
    index: usize,
    cells: &[Value],
    config: &InferenceConfig,
) -> ColumnSchema {
    classify(key, index, cells, cells.len(), config, config.now_millis())
}

fn classify(
    key: &str,
    index: usize,
    cells: &[Value],
    row_count: usize,
    config: &InferenceConfig,
    now: i64,
) -> ColumnSchema {
    if let Some((range, mean)) = numeric_summary(cells) {
        return ColumnSchema::Number(NumberSchema {
            key: key.to_string(),
            index,
            row_count,
            range,
            mean,
        });
    }

    if let Some(timestamps) = timestamps(cells) {
        return ColumnSchema::DateTime(DateTimeSchema {
            key: key.to_string(),
            index,
            row_count,
            range: datetime_range(&timestamps, now, &config.datetime_format),
            frequencies: frequencies(cells, &config.missing_sentinel),
        });
    }

    ColumnSchema::Categorical(CategoricalSchema {
        key: key.to_string(),
        index,
        row_count,
        frequencies: frequencies(cells, &config.missing_sentinel),
    })
}

// Range and mean over non-missing cells, or `None` if the column is not
// numerical (any unparseable cell, no values at all, or a NaN mean).
fn numeric_summary(cells: &[Value]) -> Option<(NumberRange, f64)> {
    let mut values = Vec::with_capacity(cells.len());
    for cell in cells.iter().filter(|c| !c.is_missing()) {
        values.push(cell.as_f64()?);
    }

    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.is_nan() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // summation rounding can land the mean a hair outside [min, max]
    Some((NumberRange { min, max }, mean.clamp(min, max)))
}

fn timestamps(cells: &[Value]) -> Option<Vec<i64>> {
    if cells.is_empty() {
        return None;
    }
    cells.iter().map(parse_timestamp_millis).collect()
}

fn datetime_range(timestamps: &[i64], now: i64, format: &str) -> DateTimeRange {
    let min_unix = timestamps.iter().copied().filter(|&t| t > 0).min();
    let max_unix = timestamps.iter().copied().filter(|&t| t < now).max();

    DateTimeRange {
        min_unix,
        max_unix,
        min_date_time: min_unix.and_then(|t| format_timestamp(t, format)),
        max_date_time: max_unix.and_then(|t| format_timestamp(t, format)),
    }
}

fn frequencies(cells: &[Value], sentinel: &str) -> FrequencyTable {
    cells.iter().map(|cell| cell.label(sentinel)).collect()
}
