//! Coefficient definition

use serde::{Deserialize, Serialize};
use std::fmt;

/// One estimated coefficient with its inference statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Coefficient name
    pub name: String,
    /// Coefficient estimate
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// Estimate divided by its standard error
    pub z_score: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Lower bound of confidence interval
    pub ci_lower: f64,
    /// Upper bound of confidence interval
    pub ci_upper: f64,
    /// Is this the intercept?
    pub is_intercept: bool,
}

impl Coefficient {
    /// Whether the coefficient is significant at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Whether the confidence interval contains `value`
    pub fn interval_contains(&self, value: f64) -> bool {
        self.ci_lower <= value && value <= self.ci_upper
    }

    /// R-style significance code for the p-value
    pub fn significance_stars(&self) -> &'static str {
        match self.p_value {
            p if p < 0.001 => "***",
            p if p < 0.01 => "**",
            p if p < 0.05 => "*",
            p if p < 0.1 => ".",
            _ => "",
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<14} {:>12.6} {:>12.6} {:>9.3} {:>10.4} {:>12.6} {:>12.6} {}",
            self.name,
            self.estimate,
            self.std_error,
            self.z_score,
            self.p_value,
            self.ci_lower,
            self.ci_upper,
            self.significance_stars()
        )
    }
}
