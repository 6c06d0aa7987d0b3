//! Linear regression models
//!
//! Ordinary least squares solved through the normal equations
//! `β = (XᵗX)⁻¹Xᵗy`. Inference uses the normal approximation: intervals
//! are `β ± z·SE` with a fixed critical value per confidence level, and
//! p-values come from the standard normal CDF.

pub mod ols;
pub mod result;

#[cfg(test)]
mod tests;

// Re-exports
pub use ols::LinearRegression;
pub use result::RegressionResult;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base::{ModelError, Result};
use tabstat_core::linalg::{Matrix, Vector};

/// Two-sided confidence level for coefficient intervals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum ConfidenceLevel {
    P90,
    #[default]
    P95,
    P99,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [Self::P90, Self::P95, Self::P99];

    /// Coverage probability, e.g. `0.95`
    pub fn value(self) -> f64 {
        match self {
            Self::P90 => 0.90,
            Self::P95 => 0.95,
            Self::P99 => 0.99,
        }
    }

    /// Two-sided standard normal critical value
    pub fn z_critical(self) -> f64 {
        match self {
            Self::P90 => 1.645,
            Self::P95 => 1.96,
            Self::P99 => 2.576,
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = ModelError;

    fn try_from(level: f64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| (l.value() - level).abs() < 1e-9)
            .ok_or_else(|| ModelError::InvalidConfig {
                message: format!("unsupported confidence level {level}; expected 0.90, 0.95 or 0.99"),
            })
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.value() * 100.0)
    }
}

/// Linear model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    /// Whether to include intercept
    pub intercept: bool,
    /// Confidence level for intervals
    pub confidence_level: ConfidenceLevel,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            intercept: true,
            confidence_level: ConfidenceLevel::P95,
        }
    }
}

/// Fit OLS on a features×samples matrix `x` and response `y`
///
/// Shorthand for configuring a [`LinearRegression`] by hand.
pub fn linear_regression(
    x: &Matrix,
    y: &Vector,
    confidence_level: ConfidenceLevel,
    add_intercept: bool,
) -> Result<RegressionResult> {
    LinearRegression::new()
        .config(LinearConfig {
            intercept: add_intercept,
            confidence_level,
        })
        .fit(x, y)
}
