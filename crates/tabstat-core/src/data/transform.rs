//! Axis transforms applied to numerical values before plotting or fitting

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DataError, Result};

/// Elementwise transform of a numerical axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    #[default]
    #[serde(rename = "none")]
    Identity,
    #[serde(rename = "log10(x)")]
    Log10,
    #[serde(rename = "ln(x)")]
    Ln,
}

impl Transform {
    /// All transforms, in menu order
    pub const ALL: [Transform; 3] = [Transform::Identity, Transform::Log10, Transform::Ln];

    pub fn label(&self) -> &'static str {
        match self {
            Transform::Identity => "none",
            Transform::Log10 => "log10(x)",
            Transform::Ln => "ln(x)",
        }
    }

    /// Apply to one value; logs of non-positive values follow IEEE rules
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Log10 => x.log10(),
            Transform::Ln => x.ln(),
        }
    }

    pub fn apply_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.apply(x)).collect()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Transform {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Transform::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| DataError::InvalidParameter(format!("unknown transform '{}'", s)))
    }
}

/// Subtract `mean` from every value
pub fn center(values: &[f64], mean: f64) -> Vec<f64> {
    values.iter().map(|&x| x - mean).collect()
}
