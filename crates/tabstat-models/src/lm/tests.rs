//! Tests for linear regression models

use approx::assert_abs_diff_eq;
use ndarray::{Array1, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

use crate::base::ModelError;
use crate::lm::{ConfidenceLevel, LinearConfig, LinearRegression, RegressionResult, linear_regression};
use tabstat_core::data::{DataError, Table, Value, infer_schema};
use tabstat_core::distributions::normal_cdf;
use tabstat_core::linalg::{Matrix, Vector};

// ==================== Test Fixtures ====================

/// y = 2x, no noise
fn proportional_data() -> (Matrix, Vector) {
    (array![[1.0, 2.0, 3.0, 4.0, 5.0]], array![2.0, 4.0, 6.0, 8.0, 10.0])
}

/// y = 1 + 2x1 + 3x2, no noise
fn multiple_regression_data() -> (Matrix, Vector) {
    let x = array![[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2.0, 1.0, 4.0, 3.0, 6.0, 5.0]];
    let y = x.row(0).mapv(|v| 2.0 * v) + x.row(1).mapv(|v| 3.0 * v) + 1.0;
    (x, y)
}

/// A small noisy sample where every standard error is positive
fn noisy_line() -> (Matrix, Vector) {
    (array![[1.2, 2.4, 3.3, 4.2, 5.2]], array![2.1, 3.9, 6.2, 8.1, 9.8])
}

/// y = 1 + 2x1 + 3x2 + N(0, 0.1²)
fn noisy_data(seed: u64) -> (Matrix, Vector) {
    let n = 100;
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = rand_distr::Normal::new(0.0, 0.1).unwrap();

    let x1: Vector = (0..n).map(|i| i as f64 * 0.1).collect();
    let x2: Vector = (0..n).map(|i| (i as f64).sin()).collect();
    let y: Vector = x1
        .iter()
        .zip(x2.iter())
        .map(|(a, b)| 1.0 + 2.0 * a + 3.0 * b + noise.sample(&mut rng))
        .collect();

    let mut x = Matrix::zeros((2, n));
    x.row_mut(0).assign(&x1);
    x.row_mut(1).assign(&x2);
    (x, y)
}

fn interval_widths(result: &RegressionResult) -> Vec<f64> {
    result
        .confidence_intervals
        .iter()
        .map(|(lower, upper)| upper - lower)
        .collect()
}

// ==================== Basic Tests ====================

#[test]
fn test_linear_regression_basic_fit() {
    let (x, y) = proportional_data();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    assert_eq!(result.n_coefficients(), 2);
    assert_eq!(result.n_obs(), 5);
    assert_abs_diff_eq!(result.coefficients[0], 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-10);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-10);

    for (fitted, observed) in result.fitted_values.iter().zip(y.iter()) {
        assert_abs_diff_eq!(*fitted, *observed, epsilon = 1e-10);
    }
    assert!(result.residuals.iter().all(|r| r.abs() < 1e-10));
}

#[test]
fn test_multiple_regression() {
    let (x, y) = multiple_regression_data();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    assert_eq!(result.n_coefficients(), 3);
    assert_abs_diff_eq!(result.coefficients[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.coefficients[2], 3.0, epsilon = 1e-9);
    assert_eq!(result.df_residual, 3);
}

#[test]
fn test_no_intercept() {
    let (x, y) = proportional_data();
    let result = LinearRegression::new().no_intercept().fit(&x, &y).unwrap();

    assert!(!result.has_intercept);
    assert_eq!(result.n_coefficients(), 1);
    assert_eq!(result.intercept(), None);
    assert_abs_diff_eq!(result.coefficients[0], 2.0, epsilon = 1e-12);
    assert_eq!(result.variable_names, vec!["x1".to_string()]);
}

#[test]
fn test_negative_relationship() {
    let x = array![[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]];
    let y = x.row(0).mapv(|v| -3.0 - 0.5 * v);
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    assert_abs_diff_eq!(result.intercept().unwrap(), -3.0, epsilon = 1e-10);
    assert_abs_diff_eq!(result.coefficients[1], -0.5, epsilon = 1e-10);
}

#[test]
fn test_many_features() {
    let (n_features, n) = (10, 50);
    let mut rng = StdRng::seed_from_u64(2024);
    let x = Matrix::from_shape_fn((n_features, n), |_| rng.random_range(-5.0..5.0));
    let beta: Vector = (1..=n_features + 1).map(|v| v as f64).collect();

    let y: Vector = (0..n)
        .map(|j| beta[0] + (0..n_features).map(|i| beta[i + 1] * x[[i, j]]).sum::<f64>())
        .collect();

    let result = LinearRegression::new().fit(&x, &y).unwrap();

    assert_eq!(result.n_coefficients(), 11);
    for (estimate, expected) in result.coefficients.iter().zip(beta.iter()) {
        assert_abs_diff_eq!(*estimate, *expected, epsilon = 1e-6);
    }
}

#[test]
fn test_noisy_data() {
    let (x, y) = noisy_data(7);
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    assert_abs_diff_eq!(result.coefficients[0], 1.0, epsilon = 0.1);
    assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(result.coefficients[2], 3.0, epsilon = 0.05);
    assert!(result.r_squared > 0.99);
    assert!(result.adj_r_squared <= result.r_squared);
    assert!(result.sigma_squared > 0.0 && result.sigma_squared < 0.02);
    assert_eq!(result.df_residual, 97);

    // residuals are orthogonal to the intercept column
    assert_abs_diff_eq!(result.residuals.sum(), 0.0, epsilon = 1e-8);

    let coefficients = result.to_coefficients();
    assert!(coefficients.iter().skip(1).all(|c| c.is_significant(0.001)));
    assert_eq!(coefficients[1].significance_stars(), "***");
}

// ==================== Inference Tests ====================

#[test]
fn test_inference_statistics() {
    let (x, y) = noisy_line();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    let sse: f64 = result.residuals.iter().map(|r| r * r).sum();
    assert_abs_diff_eq!(result.sigma_squared, sse / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.sse(), sse, epsilon = 1e-12);

    for i in 0..result.n_coefficients() {
        let se = result.standard_errors[i];
        let coef = result.coefficients[i];
        assert!(se > 0.0);
        assert_abs_diff_eq!(result.z_scores[i], coef / se, epsilon = 1e-12);
        assert_abs_diff_eq!(
            result.p_values[i],
            2.0 * (1.0 - normal_cdf(result.z_scores[i].abs())),
            epsilon = 1e-12
        );
        assert!((0.0..=1.0).contains(&result.p_values[i]));

        let (lower, upper) = result.confidence_intervals[i];
        assert_abs_diff_eq!(lower, coef - 1.96 * se, epsilon = 1e-12);
        assert_abs_diff_eq!(upper, coef + 1.96 * se, epsilon = 1e-12);
    }
}

#[test]
fn test_confidence_intervals_widen_with_level() {
    let (x, y) = noisy_line();

    let widths: Vec<Vec<f64>> = ConfidenceLevel::ALL
        .iter()
        .map(|&level| {
            let result = LinearRegression::new().confidence_level(level).fit(&x, &y).unwrap();
            assert_eq!(result.confidence_level, level);
            interval_widths(&result)
        })
        .collect();

    for i in 0..2 {
        assert!(widths[0][i] < widths[1][i]);
        assert!(widths[1][i] < widths[2][i]);
    }
}

#[test]
fn test_confidence_level_does_not_change_estimates() {
    let (x, y) = noisy_line();
    let p90 = linear_regression(&x, &y, ConfidenceLevel::P90, true).unwrap();
    let p99 = linear_regression(&x, &y, ConfidenceLevel::P99, true).unwrap();

    assert_eq!(p90.coefficients, p99.coefficients);
    assert_eq!(p90.standard_errors, p99.standard_errors);
    assert_eq!(p90.p_values, p99.p_values);
}

#[test]
fn test_perfect_fit_has_zero_p_values() {
    let (x, y) = proportional_data();
    let result = LinearRegression::new().no_intercept().fit(&x, &y).unwrap();
    assert!(result.p_values[0] < 1e-12);
}

// ==================== Error Tests ====================

#[test]
fn test_collinear_features_are_singular() {
    let x = array![[1.0, 2.0, 3.0, 4.0, 5.0], [2.0, 4.0, 6.0, 8.0, 10.0]];
    let y = array![1.0, 3.0, 2.0, 5.0, 4.0];

    let err = LinearRegression::new().fit(&x, &y).unwrap_err();
    assert!(matches!(err, ModelError::SingularMatrix));
    assert_eq!(err.to_string(), "matrix inversion failed");
}

#[test]
fn test_insufficient_data() {
    let x = array![[1.0, 2.0], [3.0, 5.0]];
    let y = array![1.0, 2.0];

    let err = LinearRegression::new().fit(&x, &y).unwrap_err();
    assert!(matches!(
        err,
        ModelError::InsufficientData {
            n_samples: 2,
            n_predictors: 3
        }
    ));
}

#[test]
fn test_dimension_mismatch() {
    let (x, _) = proportional_data();
    let y = array![1.0, 2.0, 3.0];

    let err = LinearRegression::new().fit(&x, &y).unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { expected: 5, actual: 3 }));
}

#[test]
fn test_empty_model_is_rejected() {
    let x = Matrix::zeros((0, 4));
    let y = array![1.0, 2.0, 3.0, 4.0];

    let err = LinearRegression::new().no_intercept().fit(&x, &y).unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig { .. }));

    // intercept-only model estimates the mean
    let result = LinearRegression::new().fit(&x, &y).unwrap();
    assert_abs_diff_eq!(result.coefficients[0], 2.5, epsilon = 1e-12);
}

#[test]
fn test_feature_name_count_must_match() {
    let (x, y) = multiple_regression_data();
    let err = LinearRegression::new()
        .feature_names(["only_one"])
        .fit(&x, &y)
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig { .. }));
}

// ==================== Configuration Tests ====================

#[test]
fn test_confidence_level_conversion() {
    assert_eq!(ConfidenceLevel::try_from(0.90).unwrap(), ConfidenceLevel::P90);
    assert_eq!(ConfidenceLevel::try_from(0.95).unwrap(), ConfidenceLevel::P95);
    assert_eq!(ConfidenceLevel::try_from(0.99).unwrap(), ConfidenceLevel::P99);
    assert!(matches!(
        ConfidenceLevel::try_from(0.80),
        Err(ModelError::InvalidConfig { .. })
    ));

    assert_eq!(ConfidenceLevel::default(), ConfidenceLevel::P95);
    assert_eq!(ConfidenceLevel::P90.z_critical(), 1.645);
    assert_eq!(ConfidenceLevel::P95.z_critical(), 1.96);
    assert_eq!(ConfidenceLevel::P99.z_critical(), 2.576);
    assert_eq!(ConfidenceLevel::P99.to_string(), "99%");
}

#[test]
fn test_config_serialization() {
    let config = LinearConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"intercept":true,"confidence_level":0.95}"#);

    let parsed: LinearConfig =
        serde_json::from_str(r#"{"intercept":false,"confidence_level":0.99}"#).unwrap();
    assert!(!parsed.intercept);
    assert_eq!(parsed.confidence_level, ConfidenceLevel::P99);

    assert!(serde_json::from_str::<LinearConfig>(r#"{"intercept":true,"confidence_level":0.5}"#).is_err());
}

#[test]
fn test_builder_and_function_agree() {
    let (x, y) = noisy_line();
    let from_builder = LinearRegression::new()
        .config(LinearConfig {
            intercept: true,
            confidence_level: ConfidenceLevel::P99,
        })
        .fit(&x, &y)
        .unwrap();
    let from_function = linear_regression(&x, &y, ConfidenceLevel::P99, true).unwrap();
    assert_eq!(from_builder, from_function);
}

// ==================== Result Tests ====================

#[test]
fn test_predict() {
    let (x, y) = multiple_regression_data();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    let in_sample = result.predict(&x).unwrap();
    for (a, b) in in_sample.iter().zip(result.fitted_values.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
    }

    let new = array![[10.0], [-1.0]];
    assert_abs_diff_eq!(result.predict(&new).unwrap()[0], 1.0 + 20.0 - 3.0, epsilon = 1e-8);

    assert!(matches!(
        result.predict(&array![[1.0, 2.0]]),
        Err(ModelError::DimensionMismatch { expected: 2, actual: 1 })
    ));
}

#[test]
fn test_to_coefficients() {
    let (x, y) = multiple_regression_data();
    let result = LinearRegression::new()
        .feature_names(["height", "weight"])
        .fit(&x, &y)
        .unwrap();

    let coefficients = result.to_coefficients();
    let names: Vec<&str> = coefficients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["(Intercept)", "height", "weight"]);
    assert!(coefficients[0].is_intercept);
    assert!(!coefficients[1].is_intercept);
    assert_abs_diff_eq!(coefficients[2].estimate, 3.0, epsilon = 1e-9);
    assert_eq!(coefficients[1].ci_lower, result.confidence_intervals[1].0);
}

#[test]
fn test_sse_and_coefficient_intervals() {
    let (x, y) = noisy_line();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    let sse: f64 = result.residuals.iter().map(|r| r * r).sum();
    assert_abs_diff_eq!(result.sse(), sse, epsilon = 1e-12);
    assert_abs_diff_eq!(
        result.sse(),
        result.sigma_squared * result.df_residual as f64,
        epsilon = 1e-12
    );

    for coefficient in result.to_coefficients() {
        assert!(coefficient.interval_contains(coefficient.estimate));
        assert!(coefficient.interval_contains(coefficient.ci_lower));
        assert!(coefficient.interval_contains(coefficient.ci_upper));
        assert!(!coefficient.interval_contains(coefficient.ci_upper + 1.0));
        assert!(!coefficient.interval_contains(coefficient.ci_lower - 1.0));
    }
}

#[test]
fn test_default_variable_names() {
    let (x, y) = multiple_regression_data();
    let result = LinearRegression::new().fit(&x, &y).unwrap();
    assert_eq!(result.variable_names, vec!["(Intercept)", "x1", "x2"]);
}

#[test]
fn test_display_summary() {
    let (x, y) = noisy_line();
    let result = LinearRegression::new().fit(&x, &y).unwrap();
    let summary = result.to_string();

    assert!(summary.contains("Linear Regression Results"));
    assert!(summary.contains("(Intercept)"));
    assert!(summary.contains("x1"));
    assert!(summary.contains("95% lower"));
    assert!(summary.contains("R-squared"));
    assert!(summary.contains("on 3 degrees of freedom"));
}

#[test]
fn test_result_serialization() {
    let (x, y) = noisy_line();
    let result = LinearRegression::new().fit(&x, &y).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["confidence_level"], 0.95);
    assert_eq!(json["confidence_intervals"].as_array().unwrap().len(), 2);
    assert_eq!(json["variable_names"][0], "(Intercept)");
}

// ==================== Table Tests ====================

fn survey_table() -> Table {
    Table::from_columns(vec![
        (
            "age",
            vec![
                Value::from(21),
                Value::from(34),
                Value::from(45),
                Value::from(29),
                Value::from(52),
                Value::from(38),
            ],
        ),
        (
            "income",
            vec![
                Value::from(2100.0),
                Value::from(3400.0),
                Value::Null,
                Value::from(2950.0),
                Value::from(5150.0),
                Value::from(3790.0),
            ],
        ),
        (
            "gender",
            vec![
                Value::from("Male"),
                Value::from("Female"),
                Value::from("Female"),
                Value::from("Male"),
                Value::from("Female"),
                Value::from("Male"),
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_fit_table_drops_incomplete_rows() {
    let table = survey_table();
    let schema = infer_schema(&table);

    let result = LinearRegression::new()
        .fit_table(&table, &schema, &[0], 1)
        .unwrap();

    assert_eq!(result.n_obs(), 5);
    assert_eq!(result.variable_names, vec!["(Intercept)", "age"]);
    assert!(result.coefficients[1] > 0.0);
    assert!(result.coefficients.iter().all(|c| c.is_finite()));
}

#[test]
fn test_fit_table_rejects_non_numeric_columns() {
    let table = survey_table();
    let schema = infer_schema(&table);

    let err = LinearRegression::new()
        .fit_table(&table, &schema, &[2], 1)
        .unwrap_err();
    assert!(matches!(err, ModelError::Data(DataError::InvalidParameter(_))));

    let err = LinearRegression::new()
        .fit_table(&table, &schema, &[0], 7)
        .unwrap_err();
    assert!(matches!(err, ModelError::Data(DataError::IndexOutOfBounds { .. })));
}

#[test]
fn test_fit_table_matches_matrix_fit() {
    let table = survey_table();
    let schema = infer_schema(&table);
    let from_table = LinearRegression::new()
        .fit_table(&table, &schema, &[0], 1)
        .unwrap();

    let x = array![[21.0, 34.0, 29.0, 52.0, 38.0]];
    let y: Array1<f64> = array![2100.0, 3400.0, 2950.0, 5150.0, 3790.0];
    let from_matrix = LinearRegression::new().feature_names(["age"]).fit(&x, &y).unwrap();

    assert_eq!(from_table, from_matrix);
}

// ==================== Property-Based Tests ====================

#[cfg(feature = "proptest")]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exact_lines_are_recovered(
            intercept in -100.0f64..100.0,
            slope in -10.0f64..10.0,
            n in 3usize..30
        ) {
            let x = Matrix::from_shape_fn((1, n), |(_, j)| j as f64);
            let y = x.row(0).mapv(|v| intercept + slope * v);

            let result = LinearRegression::new().fit(&x, &y).unwrap();
            prop_assert!((result.coefficients[0] - intercept).abs() < 1e-6);
            prop_assert!((result.coefficients[1] - slope).abs() < 1e-6);
        }

        #[test]
        fn intervals_contain_their_estimates(seed in 0u64..1000) {
            let (x, y) = noisy_data(seed);
            let result = LinearRegression::new().fit(&x, &y).unwrap();
            for (coef, (lower, upper)) in result.coefficients.iter().zip(&result.confidence_intervals) {
                prop_assert!(lower <= coef && coef <= upper);
            }
        }
    }
}
