//! Beta function and regularized incomplete beta

use super::*;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-8;
const TINY: f64 = 1e-30;

/// `B(a, b) = Γ(a)Γ(b) / Γ(a + b)`, evaluated in log space
pub fn beta_function(a: f64, b: f64) -> Result<f64> {
    Ok(log_beta(a, b)?.exp())
}

/// Regularized incomplete beta `I_x(a, b)`
///
/// Evaluated with the modified Lentz continued fraction. For
/// `x > (a + 1) / (a + b + 2)` the fraction converges slowly, so the
/// symmetric form `1 − I_{1−x}(b, a)` is used instead.
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&x) {
        return Err(DistributionError::OutsideUnitInterval(x));
    }
    let ln_beta = log_beta(a, b)?;

    if x == 0.0 {
        return Ok(0.0);
    }
    if x == 1.0 {
        return Ok(1.0);
    }

    let front = (a * x.ln() + b * (1.0 - x).ln() - ln_beta).exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        Ok(front * continued_fraction(x, a, b) / a)
    } else {
        Ok(1.0 - front * continued_fraction(1.0 - x, b, a) / b)
    }
}

fn log_beta(a: f64, b: f64) -> Result<f64> {
    if a.is_nan() || b.is_nan() || a <= 0.0 || b <= 0.0 {
        return Err(DistributionError::NonPositiveShape { a, b });
    }
    Ok(log_gamma(a)? + log_gamma(b)? - log_gamma(a + b)?)
}

fn nonzero(v: f64) -> f64 {
    if v.abs() < TINY { TINY } else { v }
}

fn continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / nonzero(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        // even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / nonzero(1.0 + aa * d);
        c = nonzero(1.0 + aa / c);
        h *= d * c;

        // odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / nonzero(1.0 + aa * d);
        c = nonzero(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < TOLERANCE {
            break;
        }
    }

    h
}
