//! Baseline (background) curve generation
//!
//! Produces the slow-varying background underlying the sharper peak
//! features. Output is clamped to be non-negative for every family.

use super::config::{BaselineParams, BaselineType};

/// Evaluate the configured baseline family over `x`.
///
/// Returns one value per sample, element-wise clamped at zero.
pub fn generate_baseline(x: &[f64], baseline_type: BaselineType, params: &BaselineParams) -> Vec<f64> {
    let raw: Vec<f64> = match baseline_type {
        BaselineType::Polynomial => x
            .iter()
            .map(|&xi| {
                params
                    .polynomial_coeffs
                    .iter()
                    .enumerate()
                    .map(|(power, coeff)| coeff * xi.powi(power as i32))
                    .sum()
            })
            .collect(),
        BaselineType::Exponential => x
            .iter()
            .map(|&xi| params.exp_amplitude * (-params.exp_decay * xi).exp())
            .collect(),
        BaselineType::Sinusoidal => x
            .iter()
            .map(|&xi| {
                params.sin_amplitude
                    * (2.0 * std::f64::consts::PI * params.sin_frequency * xi + params.sin_phase)
                        .sin()
            })
            .collect(),
        BaselineType::Flat => vec![0.0; x.len()],
    };

    raw.into_iter().map(|v| v.max(0.0)).collect()
}
