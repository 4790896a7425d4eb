//! Persistence and rendering of generated spectra
//!
//! CSV tables, PNG inspection plots and the batch PDF report. Everything
//! in here sits at the I/O boundary: failures propagate as [`crate::SimError`]
//! and are never retried.

pub mod export;
pub mod plot;
pub mod report;

pub use export::{save_spectrum, write_components, write_peak_info, write_signal};
pub use plot::{plot_spectrum, PlotOptions};
pub use report::generate_report;
