//! Standard normal CDF

const P: f64 = 0.231_641_9;
const DENSITY_SCALE: f64 = 0.398_942_3;
const A: [f64; 5] = [0.319_381_5, -0.356_563_8, 1.781_478, -1.821_256, 1.330_274];

/// Standard normal CDF `Φ(z)`
///
/// Abramowitz & Stegun 26.2.17; absolute error below `7.5e-8`.
pub fn normal_cdf(z: f64) -> f64 {
    let t = 1.0 / (1.0 + P * z.abs());
    let density = DENSITY_SCALE * (-z * z / 2.0).exp();
    let poly = A.iter().rev().fold(0.0, |acc, &a| a + t * acc);
    let tail = density * t * poly;

    if z > 0.0 { 1.0 - tail } else { tail }
}
