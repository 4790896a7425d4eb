//! Spectrum synthesis pipeline
//!
//! Composes the baseline, peak, noise and artifact models into one (x, y)
//! trace plus a structured breakdown of every intermediate curve. The
//! pipeline order is fixed: later stages depend additively on earlier ones.

use rand::Rng;

use super::artifact_injection::add_spikes;
use super::baseline::generate_baseline;
use super::config::GeneratorConfig;
use super::noise_models::add_noise;
use super::peaks::{generate_peaks, PeakInfo};

/// Intermediate curves retained for diagnostics, all `num_points` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentBreakdown {
    /// Non-negative background curve.
    pub baseline: Vec<f64>,
    /// Sum of all rendered peak curves.
    pub peaks: Vec<f64>,
    /// Per-peak metadata in generation order.
    pub peak_info: Vec<PeakInfo>,
    /// `baseline + peaks`, before any perturbation.
    pub y_clean: Vec<f64>,
    /// Clean signal after noise, before spike artifacts.
    pub y_noisy: Vec<f64>,
}

/// A complete synthesis result. Immutable once returned; owned by the
/// caller that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Strictly increasing sample positions, `x_min..=x_max` inclusive.
    pub x: Vec<f64>,
    /// Final signal: clean + noise + artifacts.
    pub y: Vec<f64>,
    pub components: ComponentBreakdown,
}

impl Spectrum {
    /// Index of the sample nearest to `target` on the x-axis.
    pub fn nearest_index(&self, target: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, &xi) in self.x.iter().enumerate() {
            let distance = (xi - target).abs();
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        best
    }
}

/// Evenly spaced x-axis with both endpoints included.
pub fn generate_x_axis(config: &GeneratorConfig) -> Vec<f64> {
    let n = config.num_points;
    let step = config.span() / (n - 1) as f64;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                // exact endpoint, no accumulated rounding
                config.x_max
            } else {
                config.x_min + step * i as f64
            }
        })
        .collect()
}

/// Synthesize one spectrum from a configuration snapshot.
///
/// Deterministic for a fixed `rng` seed; otherwise each call is an
/// independent stochastic draw. The config must have passed
/// [`GeneratorConfig::validate`].
pub fn synthesize<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Spectrum {
    let x = generate_x_axis(config);
    let baseline = generate_baseline(&x, config.baseline_type, &config.baseline_params);
    let (peaks, peak_info) = generate_peaks(&x, config, rng);

    let y_clean: Vec<f64> = baseline.iter().zip(&peaks).map(|(b, p)| b + p).collect();
    let y_noisy = add_noise(&y_clean, config.noise_level, config.noise_type, rng);
    let y = add_spikes(&y_noisy, config, rng);

    Spectrum {
        x,
        y,
        components: ComponentBreakdown {
            baseline,
            peaks,
            peak_info,
            y_clean,
            y_noisy,
        },
    }
}
