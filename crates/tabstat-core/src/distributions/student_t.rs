//! Student-t CDF

use super::*;

/// `P(T ≤ t)` for a Student-t variable with `df` degrees of freedom
///
/// `I_{df/(df+t²)}(df/2, 1/2)` is the two-sided tail mass beyond `|t|`;
/// half of it is assigned to the tail on the side of `t`.
pub fn t_distribution_cdf(t: f64, df: f64) -> Result<f64> {
    if df.is_nan() || df <= 0.0 {
        return Err(DistributionError::NonPositiveDegreesOfFreedom(df));
    }

    let x = df / (df + t * t);
    let tail = 0.5 * regularized_incomplete_beta(x, df / 2.0, 0.5)?;

    Ok(if t >= 0.0 { 1.0 - tail } else { tail })
}
