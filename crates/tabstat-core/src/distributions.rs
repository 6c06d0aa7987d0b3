//! Special functions and cumulative distributions
//!
//! Closed-form approximations used to turn test statistics into
//! probabilities: the Lanczos log-gamma, the beta function, the
//! regularized incomplete beta, and the normal and Student-t CDFs.

mod beta;
mod gamma;
mod normal;
mod student_t;


pub use beta::{beta_function, regularized_incomplete_beta};
pub use gamma::log_gamma;
pub use normal::normal_cdf;
pub use student_t::t_distribution_cdf;

/// Parameter outside the mathematical domain of a function
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Log-gamma is only defined for positive arguments, got {0}")]
    NonPositiveArgument(f64),

    #[error("Beta function parameters must be positive, got a = {a}, b = {b}")]
    NonPositiveShape { a: f64, b: f64 },

    #[error("x must lie in [0, 1], got {0}")]
    OutsideUnitInterval(f64),

    #[error("Degrees of freedom must be positive, got {0}")]
    NonPositiveDegreesOfFreedom(f64),
}

/// Result type for distribution functions
pub type Result<T> = std::result::Result<T, DistributionError>;
