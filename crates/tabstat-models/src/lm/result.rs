//! Linear regression result structure
//!
//! This module defines the result structure for linear regression models,
//! containing all the information from fitting a linear model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base::{Coefficient, ModelError, Result};
use crate::lm::ConfidenceLevel;
use crate::lm::ols::design_matrix;
use tabstat_core::linalg::{Matrix, Vector};

/// OLS linear regression result
///
/// Every per-coefficient sequence is aligned by coefficient index, with
/// the intercept first when one was fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Coefficients (β)
    pub coefficients: Vector,
    /// Standard errors of coefficients
    pub standard_errors: Vector,
    /// `(lower, upper)` confidence interval per coefficient
    pub confidence_intervals: Vec<(f64, f64)>,
    /// z-scores for coefficients
    pub z_scores: Vector,
    /// Two-sided p-values for coefficients
    pub p_values: Vector,
    /// Coefficient of determination
    pub r_squared: f64,
    /// R² adjusted for the number of coefficients
    pub adj_r_squared: f64,
    /// Fitted values (ŷ)
    pub fitted_values: Vector,
    /// Residuals (y - ŷ)
    pub residuals: Vector,
    /// Residual variance σ² = SSE / (n - p)
    pub sigma_squared: f64,
    /// Residual degrees of freedom
    pub df_residual: usize,
    /// Coefficient names
    pub variable_names: Vec<String>,
    /// Has intercept
    pub has_intercept: bool,
    /// Level the intervals were computed at
    pub confidence_level: ConfidenceLevel,
}

impl RegressionResult {
    /// Get the number of observations
    pub fn n_obs(&self) -> usize {
        self.fitted_values.len()
    }

    /// Get the number of coefficients (including intercept)
    pub fn n_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    /// Number of features, excluding the intercept
    pub fn n_features(&self) -> usize {
        self.n_coefficients() - usize::from(self.has_intercept)
    }

    /// Intercept estimate, if one was fitted
    pub fn intercept(&self) -> Option<f64> {
        self.has_intercept.then(|| self.coefficients[0])
    }

    /// Residual sum of squares
    pub fn sse(&self) -> f64 {
        self.residuals.mapv(|r| r * r).sum()
    }

    /// Get predictions for new data
    ///
    /// `x_new` is features×samples, like the matrix the model was fit on.
    pub fn predict(&self, x_new: &Matrix) -> Result<Vector> {
        if x_new.nrows() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: x_new.nrows(),
            });
        }
        Ok(design_matrix(x_new, self.has_intercept).dot(&self.coefficients))
    }

    /// Convert coefficients to Coefficient structs
    pub fn to_coefficients(&self) -> Vec<Coefficient> {
        self.coefficients
            .iter()
            .zip(self.standard_errors.iter())
            .zip(self.z_scores.iter())
            .zip(self.p_values.iter())
            .zip(self.confidence_intervals.iter())
            .enumerate()
            .map(|(i, ((((&estimate, &std_error), &z_score), &p_value), &(lower, upper)))| {
                let name = self
                    .variable_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("x{}", i + 1));

                Coefficient {
                    name,
                    estimate,
                    std_error,
                    z_score,
                    p_value,
                    ci_lower: lower,
                    ci_upper: upper,
                    is_intercept: self.has_intercept && i == 0,
                }
            })
            .collect()
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Linear Regression Results")?;
        writeln!(f, "========================")?;
        writeln!(f, "Observations: {}", self.n_obs())?;
        writeln!(f, "Coefficients: {}", self.n_coefficients())?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<14} {:>12} {:>12} {:>9} {:>10} {:>12} {:>12}",
            "",
            "Estimate",
            "Std. Error",
            "z value",
            "Pr(>|z|)",
            format!("{} lower", self.confidence_level),
            "upper"
        )?;
        for coefficient in self.to_coefficients() {
            writeln!(f, "{coefficient}")?;
        }
        writeln!(f, "---")?;
        writeln!(f, "Signif. codes:  0 '***' 0.001 '**' 0.01 '*' 0.05 '.' 0.1 ' ' 1")?;
        writeln!(f)?;

        writeln!(
            f,
            "Residual variance:  {:.4} on {} degrees of freedom",
            self.sigma_squared, self.df_residual
        )?;
        writeln!(f, "R-squared:          {:.4}", self.r_squared)?;
        writeln!(f, "Adjusted R-squared: {:.4}", self.adj_r_squared)?;

        Ok(())
    }
}
