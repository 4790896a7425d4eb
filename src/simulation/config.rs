//! Generator configuration structures
//!
//! [`GeneratorConfig`] is the full parameter set for one generator instance.
//! Every field has a default matching the reference parameter table, so any
//! subset can be given in a TOML file and the rest is filled in. The
//! baseline, peak and noise families are closed enums: an unrecognized type
//! string is a parse error at the config boundary instead of a silent
//! runtime substitution. [`BaselineType::Flat`] keeps the zero-baseline
//! fallback semantics as an explicit, nameable variant.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Functional family of the background curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineType {
    /// Identically-zero background.
    #[default]
    Flat,
    /// `sum(coeffs[i] * x^i)` over [`BaselineParams::polynomial_coeffs`].
    Polynomial,
    /// `amplitude * exp(-decay * x)`.
    Exponential,
    /// `amplitude * sin(2 pi * frequency * x + phase)`.
    Sinusoidal,
}

/// Line-shape family of a single peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakType {
    #[default]
    Gaussian,
    Lorentzian,
    /// Linear Gaussian/Lorentzian mixture, not a true convolution.
    Voigt,
}

/// Stochastic noise family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseType {
    /// Additive white noise with standard deviation `noise_level`.
    #[default]
    Gaussian,
    /// Shot-noise approximation whose variance scales with intensity.
    Poisson,
}

impl fmt::Display for BaselineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BaselineType::Flat => "flat",
            BaselineType::Polynomial => "polynomial",
            BaselineType::Exponential => "exponential",
            BaselineType::Sinusoidal => "sinusoidal",
        })
    }
}

impl fmt::Display for PeakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PeakType::Gaussian => "gaussian",
            PeakType::Lorentzian => "lorentzian",
            PeakType::Voigt => "voigt",
        })
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoiseType::Gaussian => "gaussian",
            NoiseType::Poisson => "poisson",
        })
    }
}

/// Variant-specific baseline parameters.
///
/// Kept as one flat bag rather than per-variant payloads so a config file
/// can carry parameters for every family and switch `baseline_type` without
/// losing them, which is exactly what the parameter variator relies on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BaselineParams {
    /// Polynomial coefficients, index = power of x.
    pub polynomial_coeffs: Vec<f64>,
    pub exp_amplitude: f64,
    pub exp_decay: f64,
    pub sin_amplitude: f64,
    pub sin_frequency: f64,
    pub sin_phase: f64,
}

impl Default for BaselineParams {
    fn default() -> Self {
        Self {
            polynomial_coeffs: vec![0.05, -0.01, 0.001],
            exp_amplitude: 0.1,
            exp_decay: 0.5,
            sin_amplitude: 0.05,
            sin_frequency: 0.5,
            sin_phase: 0.0,
        }
    }
}

/// Full parameter set for one generator instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // X-axis domain
    pub x_min: f64,
    pub x_max: f64,
    pub num_points: usize,

    // Baseline
    pub baseline_type: BaselineType,
    pub baseline_params: BaselineParams,

    // Peaks
    pub num_peaks: usize,
    /// Cycled by peak index when shorter than the peak count.
    pub peak_types: Vec<PeakType>,
    /// Explicit positions override `num_peaks`; the rendered count becomes
    /// the minimum length across positions/heights/widths.
    pub peak_positions: Option<Vec<f64>>,
    pub peak_heights: Option<Vec<f64>>,
    pub peak_widths: Option<Vec<f64>>,
    pub min_peak_height: f64,
    pub max_peak_height: f64,
    pub min_peak_width: f64,
    pub max_peak_width: f64,

    // Noise
    /// Zero disables noise entirely.
    pub noise_level: f64,
    pub noise_type: NoiseType,

    // Artifacts
    pub add_spikes: bool,
    pub spike_probability: f64,
    pub max_spike_height: f64,

    // Output
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 10.0,
            num_points: 1000,
            baseline_type: BaselineType::Polynomial,
            baseline_params: BaselineParams::default(),
            num_peaks: 5,
            peak_types: vec![PeakType::Gaussian],
            peak_positions: None,
            peak_heights: None,
            peak_widths: None,
            min_peak_height: 0.2,
            max_peak_height: 1.0,
            min_peak_width: 0.05,
            max_peak_width: 0.2,
            noise_level: 0.01,
            noise_type: NoiseType::Gaussian,
            add_spikes: false,
            spike_probability: 0.005,
            max_spike_height: 0.5,
            output_dir: PathBuf::from("simulated_data"),
            file_prefix: "sim-spec".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Fail-fast validation of the parameter set.
    ///
    /// Degenerate domains (inverted x-range, fewer than two samples) and
    /// negative magnitude bounds would otherwise produce silently broken
    /// output, so they are rejected here before any synthesis runs.
    pub fn validate(&self) -> SimResult<()> {
        if self.x_min >= self.x_max || self.x_min.is_nan() || self.x_max.is_nan() {
            return Err(SimError::invalid_config(format!(
                "x_min ({}) must be below x_max ({})",
                self.x_min, self.x_max
            )));
        }
        if self.num_points < 2 {
            return Err(SimError::invalid_config(format!(
                "num_points must be at least 2, got {}",
                self.num_points
            )));
        }
        if self.peak_types.is_empty() {
            return Err(SimError::invalid_config("peak_types must not be empty"));
        }
        if self.min_peak_height < 0.0 || self.min_peak_height > self.max_peak_height {
            return Err(SimError::invalid_config(format!(
                "peak height range [{}, {}] must be non-negative and ordered",
                self.min_peak_height, self.max_peak_height
            )));
        }
        if self.min_peak_width <= 0.0 || self.min_peak_width > self.max_peak_width {
            return Err(SimError::invalid_config(format!(
                "peak width range [{}, {}] must be positive and ordered",
                self.min_peak_width, self.max_peak_width
            )));
        }
        if let Some(widths) = &self.peak_widths {
            if widths.iter().any(|&w| w <= 0.0) {
                return Err(SimError::invalid_config(
                    "explicit peak widths must be positive",
                ));
            }
        }
        if self.noise_level < 0.0 || self.noise_level.is_nan() {
            return Err(SimError::invalid_config(format!(
                "noise_level must be non-negative, got {}",
                self.noise_level
            )));
        }
        if !(0.0..=1.0).contains(&self.spike_probability) {
            return Err(SimError::invalid_config(format!(
                "spike_probability must lie in [0, 1], got {}",
                self.spike_probability
            )));
        }
        if self.max_spike_height < 0.0 {
            return Err(SimError::invalid_config(format!(
                "max_spike_height must be non-negative, got {}",
                self.max_spike_height
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    ///
    /// Omitted keys take their defaults, so a file only needs to name the
    /// parameters it changes.
    pub fn from_toml_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw).map_err(|err| SimError::ConfigFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Width of the x-domain.
    pub fn span(&self) -> f64 {
        self.x_max - self.x_min
    }
}
