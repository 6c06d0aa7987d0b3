//! Ordinary Least Squares (OLS) linear regression
//!
//! This module implements the standard linear regression model
//! using the ordinary least squares estimator.

use ndarray::s;

use crate::base::{ModelError, Result};
use crate::lm::{ConfidenceLevel, LinearConfig, RegressionResult};
use tabstat_core::data::{ColumnSchema, DataError, DataType, Table};
use tabstat_core::distributions::normal_cdf;
use tabstat_core::linalg::{
    Matrix, Vector, flatten, inverse, multiply, transpose, vector_to_matrix,
};

/// Name given to the intercept coefficient
pub const INTERCEPT_NAME: &str = "(Intercept)";

// ==================== Linear Regression Model ====================

/// OLS linear regression model
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    /// Configuration
    config: LinearConfig,
    /// Names of the feature rows, in order
    feature_names: Option<Vec<String>>,
}

impl LinearRegression {
    /// Create a new linear regression model with an intercept and 95%
    /// intervals
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn config(mut self, config: LinearConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the confidence level used for coefficient intervals
    pub fn confidence_level(mut self, level: ConfidenceLevel) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Disable intercept
    pub fn no_intercept(mut self) -> Self {
        self.config.intercept = false;
        self
    }

    /// Name the features; defaults to `x1..xp`
    pub fn feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Fit the OLS model
    ///
    /// `x` holds one row per feature and one column per sample; `y` holds
    /// one response per sample.
    pub fn fit(&self, x: &Matrix, y: &Vector) -> Result<RegressionResult> {
        let (n_features, n) = x.dim();
        if y.len() != n {
            return Err(ModelError::DimensionMismatch {
                expected: n,
                actual: y.len(),
            });
        }

        let variable_names = self.variable_names(n_features)?;
        let design = design_matrix(x, self.config.intercept);
        let p = design.ncols();

        if p == 0 {
            return Err(ModelError::InvalidConfig {
                message: "model has no features and no intercept".to_string(),
            });
        }
        if n <= p {
            return Err(ModelError::InsufficientData {
                n_samples: n,
                n_predictors: p,
            });
        }

        // β = (XᵗX)⁻¹ Xᵗy
        let design_t = transpose(&design);
        let xtx_inv = inverse(&multiply(&design_t, &design)?)?;
        let xty = multiply(&design_t, &vector_to_matrix(y))?;
        let coefficients = flatten(&multiply(&xtx_inv, &xty)?);

        // Calculate fitted values and residuals
        let fitted_values = flatten(&multiply(&design, &vector_to_matrix(&coefficients))?);
        let residuals = y - &fitted_values;

        let sse = residuals.mapv(|r| r * r).sum();
        let df_residual = n - p;
        let sigma_squared = sse / df_residual as f64;

        let standard_errors: Vector = xtx_inv.diag().mapv(|v| (v * sigma_squared).sqrt());

        let (z_scores, p_values, confidence_intervals) = inference(
            &coefficients,
            &standard_errors,
            self.config.confidence_level,
        );

        let (r_squared, adj_r_squared) = goodness_of_fit(y, sse, p, self.config.intercept);

        Ok(RegressionResult {
            coefficients,
            standard_errors,
            confidence_intervals,
            z_scores,
            p_values,
            r_squared,
            adj_r_squared,
            fitted_values,
            residuals,
            sigma_squared,
            df_residual,
            variable_names,
            has_intercept: self.config.intercept,
            confidence_level: self.config.confidence_level,
        })
    }

    /// Fit on columns of a table
    ///
    /// Every selected column must have been inferred as Numerical. Rows
    /// with a missing cell in any selected column are left out of the fit.
    /// Feature names default to the column keys.
    pub fn fit_table(
        &self,
        table: &Table,
        schema: &[ColumnSchema],
        features: &[usize],
        target: usize,
    ) -> Result<RegressionResult> {
        for &index in features.iter().chain(std::iter::once(&target)) {
            let column = schema.get(index).ok_or(DataError::IndexOutOfBounds {
                index,
                len: schema.len(),
            })?;
            if column.data_type() != DataType::Numerical {
                return Err(DataError::InvalidParameter(format!(
                    "column '{}' is {}, expected Numerical",
                    column.key(),
                    column.data_type()
                ))
                .into());
            }
        }

        let x = table.numeric_matrix(features)?;
        let y = table.numeric_column(target)?;

        let complete: Vec<usize> = (0..y.len())
            .filter(|&i| !y[i].is_nan() && x.column(i).iter().all(|v| !v.is_nan()))
            .collect();
        let x = x.select(ndarray::Axis(1), &complete);
        let y = y.select(ndarray::Axis(0), &complete);

        let model = match &self.feature_names {
            Some(_) => self.clone(),
            None => self
                .clone()
                .feature_names(features.iter().map(|&i| schema[i].key().to_string())),
        };
        model.fit(&x, &y)
    }

    fn variable_names(&self, n_features: usize) -> Result<Vec<String>> {
        let features = match &self.feature_names {
            Some(names) if names.len() != n_features => {
                return Err(ModelError::InvalidConfig {
                    message: format!(
                        "{} feature names given for {} features",
                        names.len(),
                        n_features
                    ),
                });
            }
            Some(names) => names.clone(),
            None => (1..=n_features).map(|i| format!("x{i}")).collect(),
        };

        let mut names = Vec::with_capacity(n_features + 1);
        if self.config.intercept {
            names.push(INTERCEPT_NAME.to_string());
        }
        names.extend(features);
        Ok(names)
    }
}

/// Samples×coefficients design matrix, with a leading column of ones when
/// an intercept is fitted
pub(crate) fn design_matrix(x: &Matrix, intercept: bool) -> Matrix {
    let (n_features, n) = x.dim();
    let offset = usize::from(intercept);

    let mut design = Matrix::ones((n, n_features + offset));
    design.slice_mut(s![.., offset..]).assign(&transpose(x));
    design
}

/// z-scores, normal p-values and `β ± z·SE` intervals
fn inference(
    coefficients: &Vector,
    standard_errors: &Vector,
    level: ConfidenceLevel,
) -> (Vector, Vector, Vec<(f64, f64)>) {
    let z_critical = level.z_critical();

    let z_scores: Vector = coefficients
        .iter()
        .zip(standard_errors.iter())
        .map(|(&coef, &se)| coef / se)
        .collect();

    let p_values = z_scores.mapv(|z| 2.0 * (1.0 - normal_cdf(z.abs())));

    let confidence_intervals = coefficients
        .iter()
        .zip(standard_errors.iter())
        .map(|(&coef, &se)| (coef - z_critical * se, coef + z_critical * se))
        .collect();

    (z_scores, p_values, confidence_intervals)
}

/// R² against the mean of `y`, and its degrees-of-freedom adjustment
fn goodness_of_fit(y: &Vector, sse: f64, p: usize, intercept: bool) -> (f64, f64) {
    let n = y.len() as f64;
    let y_mean = y.sum() / n;
    let sst: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    let r_squared = 1.0 - sse / sst;
    let df_total = if intercept { n - 1.0 } else { n };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * df_total / (n - p as f64);

    (r_squared, adj_r_squared)
}
