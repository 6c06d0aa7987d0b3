//! Row filters over a table
//!
//! Filters are typed by the kind of column they target. A row survives
//! when every filter accepts it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::*;

/// Comparison operator of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
        }
    }

    fn compare<T: PartialOrd>(&self, lhs: T, rhs: T) -> bool {
        match self {
            Operator::Equal => lhs == rhs,
            Operator::NotEqual => lhs != rhs,
            Operator::GreaterThan => lhs > rhs,
            Operator::GreaterThanOrEqual => lhs >= rhs,
            Operator::LessThan => lhs < rhs,
            Operator::LessThanOrEqual => lhs <= rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" | "==" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            other => Err(DataError::InvalidParameter(format!(
                "unknown operator '{}'",
                other
            ))),
        }
    }
}

/// A predicate on one column, typed by the column's kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Filter {
    Categorical {
        key: String,
        operator: Operator,
        value: String,
    },
    #[serde(rename = "Numerical")]
    Number {
        key: String,
        operator: Operator,
        value: f64,
    },
    DateTime {
        key: String,
        operator: Operator,
        value: String,
    },
}

impl Filter {
    /// Key of the column this filter targets
    pub fn key(&self) -> &str {
        match self {
            Filter::Categorical { key, .. }
            | Filter::Number { key, .. }
            | Filter::DateTime { key, .. } => key,
        }
    }

    /// Whether `cell`, taken from a column of kind `data_type`, passes
    ///
    /// Categorical columns support `=`/`!=`, date/time columns `>=`/`<=`,
    /// numerical columns every operator. Any other combination rejects.
    pub fn accepts(&self, data_type: DataType, cell: &Value) -> bool {
        match (data_type, self) {
            (DataType::Categorical, Filter::Categorical { operator, value, .. }) => {
                let label = cell.label(MISSING_SENTINEL);
                match operator {
                    Operator::Equal | Operator::NotEqual => {
                        operator.compare(label.as_str(), value.as_str())
                    }
                    _ => false,
                }
            }
            (DataType::Numerical, Filter::Number { operator, value, .. }) => cell
                .as_f64()
                .is_some_and(|v| operator.compare(v, *value)),
            (DataType::DateTime, Filter::DateTime { operator, value, .. }) => {
                if !matches!(
                    operator,
                    Operator::GreaterThanOrEqual | Operator::LessThanOrEqual
                ) {
                    return false;
                }
                let lhs = parse_timestamp_millis(cell);
                let rhs = parse_datetime(value).map(|dt| dt.timestamp_millis());
                match (lhs, rhs) {
                    (Some(lhs), Some(rhs)) => operator.compare(lhs, rhs),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Categorical {
                key,
                operator,
                value,
            }
            | Filter::DateTime {
                key,
                operator,
                value,
            } => write!(f, "{} {} {}", key, operator, value),
            Filter::Number {
                key,
                operator,
                value,
            } => write!(f, "{} {} {}", key, operator, value),
        }
    }
}

/// Keep the rows of `table` that pass every filter
///
/// Columns are resolved through `schema` by key; a filter naming an
/// unknown key rejects every row. If no row survives, the table is
/// returned unchanged.
pub fn filter_table(table: &Table, filters: &[Filter], schema: &[ColumnSchema]) -> Table {
    if filters.is_empty() {
        return table.clone();
    }

    let resolved: Vec<_> = filters
        .iter()
        .map(|filter| {
            schema
                .iter()
                .find(|s| s.key() == filter.key())
                .and_then(|s| table.column(s.index()).map(|cells| (s.data_type(), cells)))
        })
        .collect();

    let mask: Vec<bool> = (0..table.nrows())
        .map(|row| {
            filters.iter().zip(&resolved).all(|(filter, column)| match column {
                Some((data_type, cells)) => filter.accepts(*data_type, &cells[row]),
                None => false,
            })
        })
        .collect();

    if !mask.iter().any(|keep| *keep) {
        return table.clone();
    }

    table.retain_rows(&mask)
}
