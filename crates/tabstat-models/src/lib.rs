//! Statistical models for tabstat
//!
//! - [`lm`]: ordinary least squares via the normal equations, with
//!   standard errors, confidence intervals, z-scores and p-values
//! - [`corr`]: pairwise Pearson correlation of numeric columns
//!
//! Both consume the tables and schemas produced by `tabstat-core`.

pub mod base;
pub mod corr;
pub mod error;
pub mod lm;

pub use base::{Coefficient, Result};
pub use corr::{Correlation, calculate_correlations};
pub use error::ModelError;
pub use lm::{ConfidenceLevel, LinearConfig, LinearRegression, RegressionResult, linear_regression};
