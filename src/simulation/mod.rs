//! Spectral simulation core
//!
//! Pure numerical models composed by the synthesizer: baseline families,
//! peak line shapes, noise models and spike artifacts, plus the parameter
//! variator that drives batch diversity. All randomness flows through an
//! explicit `rand::Rng` argument; nothing in here touches ambient state or
//! the filesystem.

pub mod artifact_injection;
pub mod baseline;
pub mod config;
pub mod noise_models;
pub mod peaks;
pub mod synthesizer;
pub mod variator;

pub use artifact_injection::add_spikes;
pub use baseline::generate_baseline;
pub use config::{BaselineParams, BaselineType, GeneratorConfig, NoiseType, PeakType};
pub use noise_models::add_noise;
pub use peaks::{generate_peaks, PeakInfo};
pub use synthesizer::{synthesize, ComponentBreakdown, Spectrum};
pub use variator::{config_walk, vary};
