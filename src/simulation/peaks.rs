//! Peak line-shape generation
//!
//! Three shape families share a common contract: `curve(position) == height`
//! exactly at the configured center, independent of width. The Voigt shape
//! is a fixed 50/50 Gaussian/Lorentzian mixture evaluated with identical
//! parameters for both terms, a cheap stand-in for the true convolution.

use rand::Rng;
use serde::Serialize;

use super::config::{GeneratorConfig, PeakType};

/// Gaussian/Lorentzian mixing weight of the Voigt approximation.
const VOIGT_MIXING: f64 = 0.5;

/// Metadata for one rendered peak, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakInfo {
    #[serde(rename = "type")]
    pub peak_type: PeakType,
    pub position: f64,
    pub height: f64,
    pub width: f64,
}

/// `height * exp(-0.5 * ((x - position) / width)^2)`, width acting as sigma.
pub fn gaussian_peak(x: &[f64], position: f64, height: f64, width: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| {
            let z = (xi - position) / width;
            height * (-0.5 * z * z).exp()
        })
        .collect()
}

/// `height * width^2 / ((x - position)^2 + width^2)`.
pub fn lorentzian_peak(x: &[f64], position: f64, height: f64, width: f64) -> Vec<f64> {
    let w2 = width * width;
    x.iter()
        .map(|&xi| {
            let d = xi - position;
            height * w2 / (d * d + w2)
        })
        .collect()
}

/// Pseudo-Voigt: linear mixture of Gaussian and Lorentzian terms.
pub fn voigt_peak(x: &[f64], position: f64, height: f64, width: f64) -> Vec<f64> {
    let gaussian = gaussian_peak(x, position, height, width);
    let lorentzian = lorentzian_peak(x, position, height, width);
    gaussian
        .into_iter()
        .zip(lorentzian)
        .map(|(g, l)| VOIGT_MIXING * g + (1.0 - VOIGT_MIXING) * l)
        .collect()
}

fn peak_curve(peak_type: PeakType, x: &[f64], position: f64, height: f64, width: f64) -> Vec<f64> {
    match peak_type {
        PeakType::Gaussian => gaussian_peak(x, position, height, width),
        PeakType::Lorentzian => lorentzian_peak(x, position, height, width),
        PeakType::Voigt => voigt_peak(x, position, height, width),
    }
}

/// Generate the summed peak curve and the per-peak metadata records.
///
/// Positions, heights and widths come from the config when given
/// explicitly; otherwise they are drawn uniformly from the configured
/// ranges (positions keep a 10%-of-span margin from either domain edge).
/// Explicit positions override `num_peaks`; the rendered count is the
/// minimum length across the three parameter arrays. Peak types are
/// assigned by cycling `peak_types` over the peak index.
pub fn generate_peaks<R: Rng>(
    x: &[f64],
    config: &GeneratorConfig,
    rng: &mut R,
) -> (Vec<f64>, Vec<PeakInfo>) {
    let positions: Vec<f64> = match &config.peak_positions {
        Some(explicit) => explicit.clone(),
        None => {
            let margin = 0.1 * config.span();
            let lo = config.x_min + margin;
            let hi = config.x_max - margin;
            (0..config.num_peaks).map(|_| rng.gen_range(lo..hi)).collect()
        }
    };
    let drawn = positions.len();

    let heights: Vec<f64> = match &config.peak_heights {
        Some(explicit) => explicit.clone(),
        None => (0..drawn)
            .map(|_| rng.gen_range(config.min_peak_height..=config.max_peak_height))
            .collect(),
    };
    let widths: Vec<f64> = match &config.peak_widths {
        Some(explicit) => explicit.clone(),
        None => (0..drawn)
            .map(|_| rng.gen_range(config.min_peak_width..=config.max_peak_width))
            .collect(),
    };

    // Mismatched explicit arrays truncate to the common minimum length.
    let count = positions.len().min(heights.len()).min(widths.len());

    let mut peaks = vec![0.0; x.len()];
    let mut peak_info = Vec::with_capacity(count);

    for i in 0..count {
        let peak_type = config.peak_types[i % config.peak_types.len()];
        let curve = peak_curve(peak_type, x, positions[i], heights[i], widths[i]);
        for (total, value) in peaks.iter_mut().zip(&curve) {
            *total += value;
        }
        peak_info.push(PeakInfo {
            peak_type,
            position: positions[i],
            height: heights[i],
            width: widths[i],
        });
    }

    (peaks, peak_info)
}
