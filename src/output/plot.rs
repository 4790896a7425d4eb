//! Inspection plots for generated spectra
//!
//! Renders one PNG per spectrum with the `plotters` bitmap backend:
//! the final trace, the baseline and clean curves, and a marker at each
//! rendered peak apex.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulation::synthesizer::Spectrum;

/// Rendering options; the defaults mirror the reference figures.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: Option<String>,
    /// Draw the baseline and clean curves alongside the final trace.
    pub show_components: bool,
    /// Mark each peak apex (baseline + height at the peak position).
    pub show_peaks: bool,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_components: true,
            show_peaks: true,
            size: (1000, 600),
        }
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Render(err.to_string())
}

/// Y-axis bounds over every curve that may appear in the figure, padded.
fn value_range(spectrum: &Spectrum, options: &PlotOptions) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;

    let mut scan = |values: &[f64]| {
        for &v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    };
    scan(&spectrum.y);
    if options.show_components {
        scan(&spectrum.components.baseline);
        scan(&spectrum.components.y_clean);
    }
    if options.show_peaks {
        for peak in &spectrum.components.peak_info {
            let idx = spectrum.nearest_index(peak.position);
            hi = hi.max(spectrum.components.baseline[idx] + peak.height);
        }
    }

    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span, hi + 0.05 * span)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/// Render a spectrum to a PNG file.
pub fn plot_spectrum(path: &Path, spectrum: &Spectrum, options: &PlotOptions) -> SimResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let x_lo = spectrum.x[0];
    let x_hi = spectrum.x[spectrum.x.len() - 1];
    let (y_lo, y_hi) = value_range(spectrum, options);

    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let title = options.title.as_deref().unwrap_or("Simulated Spectrum");
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .light_line_style(&WHITE.mix(0.7))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            spectrum.x.iter().copied().zip(spectrum.y.iter().copied()),
            &BLUE,
        ))
        .map_err(render_err)?
        .label("Spectrum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &BLUE));

    if options.show_components {
        chart
            .draw_series(LineSeries::new(
                spectrum
                    .x
                    .iter()
                    .copied()
                    .zip(spectrum.components.baseline.iter().copied()),
                &RED,
            ))
            .map_err(render_err)?
            .label("Baseline")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &RED));

        chart
            .draw_series(LineSeries::new(
                spectrum
                    .x
                    .iter()
                    .copied()
                    .zip(spectrum.components.y_clean.iter().copied()),
                &GREEN,
            ))
            .map_err(render_err)?
            .label("Clean Spectrum")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &GREEN));
    }

    if options.show_peaks && !spectrum.components.peak_info.is_empty() {
        let apexes: Vec<(f64, f64)> = spectrum
            .components
            .peak_info
            .iter()
            .map(|peak| {
                let idx = spectrum.nearest_index(peak.position);
                (peak.position, spectrum.components.baseline[idx] + peak.height)
            })
            .collect();
        chart
            .draw_series(
                apexes
                    .into_iter()
                    .map(|point| Circle::new(point, 4, RED.filled())),
            )
            .map_err(render_err)?
            .label("Peak apex")
            .legend(|(x, y)| Circle::new((x + 9, y), 4, RED.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    debug!(path = %path.display(), "plot rendered");
    Ok(())
}
