//! spectral-sim: synthetic spectral and chromatographic test data
//!
//! A parametric simulator that produces realistic 1-D signal traces
//! (baseline + peaks + noise + artifacts), persists them with provenance
//! and renders inspection plots and a summary report. Typical use is
//! generating diverse-but-related datasets for exercising peak-detection
//! and baseline-correction code.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use spectral_sim::{DatasetOptions, GeneratorConfig, SpectralGenerator};
//!
//! fn main() -> Result<(), spectral_sim::SimError> {
//!     let config = GeneratorConfig::default();
//!     let mut generator = SpectralGenerator::with_seed(config, 42)?;
//!
//!     // One spectrum, in memory
//!     let spectrum = generator.generate();
//!     assert_eq!(spectrum.x.len(), spectrum.y.len());
//!
//!     // A varied batch with tables, plots and a PDF report on disk
//!     let items = generator.generate_dataset(&DatasetOptions::default())?;
//!     println!("generated {} spectra", items.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod dataset;
pub mod error;
pub mod output;
pub mod simulation;

pub use dataset::{DatasetItem, DatasetOptions, SpectralGenerator};
pub use error::{SimError, SimResult};
pub use output::plot::PlotOptions;
pub use simulation::config::{BaselineParams, BaselineType, GeneratorConfig, NoiseType, PeakType};
pub use simulation::peaks::PeakInfo;
pub use simulation::synthesizer::{synthesize, ComponentBreakdown, Spectrum};
