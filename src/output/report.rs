//! PDF summary report
//!
//! Assembles all saved plot images of a batch into one multi-page PDF,
//! preceded by a summary of the generating configuration. Requesting a
//! report with zero images is a non-fatal condition: it is logged and the
//! report step is skipped without producing a file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate::GenericImageView;
use printpdf::{image_crate, BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use tracing::{info, warn};

use crate::error::{SimError, SimResult};
use crate::simulation::config::GeneratorConfig;

// A4 portrait
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const IMAGE_WIDTH_MM: f64 = 180.0;

fn report_err<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Report(err.to_string())
}

/// Assemble `<root>/report.pdf` from the given plot images, in order.
///
/// Returns `Ok(None)` without writing anything when `images` is empty.
pub fn generate_report(
    root: &Path,
    images: &[PathBuf],
    config: &GeneratorConfig,
) -> SimResult<Option<PathBuf>> {
    if images.is_empty() {
        warn!("no plot images available, skipping report");
        return Ok(None);
    }

    let pdf_path = root.join("report.pdf");
    let (doc, summary_page, summary_layer) = PdfDocument::new(
        "Spectral Data Simulation Report",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "summary",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(report_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(report_err)?;

    let summary = doc.get_page(summary_page).get_layer(summary_layer);
    summary.use_text(
        "Spectral Data Simulation Report",
        20.0,
        Mm(20.0),
        Mm(270.0),
        &bold,
    );
    summary.use_text("Simulation Parameters", 14.0, Mm(20.0), Mm(255.0), &bold);

    let peak_types = config
        .peak_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let parameter_lines = [
        format!("X Range: {} to {}", config.x_min, config.x_max),
        format!("Number of Points: {}", config.num_points),
        format!("Baseline Type: {}", config.baseline_type),
        format!("Number of Peaks: {}", config.num_peaks),
        format!("Peak Types: {peak_types}"),
        format!("Noise Level: {}", config.noise_level),
    ];
    let mut text_y = 246.0;
    for line in &parameter_lines {
        summary.use_text(line.as_str(), 11.0, Mm(25.0), Mm(text_y), &regular);
        text_y -= 7.0;
    }

    for (index, image_path) in images.iter().enumerate() {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "spectrum");
        let layer = doc.get_page(page).get_layer(layer);

        let dynamic = image_crate::open(image_path).map_err(report_err)?;
        let (px_width, px_height) = dynamic.dimensions();
        // scale so the image fills a fixed frame width
        let dpi = px_width as f64 * 25.4 / IMAGE_WIDTH_MM;
        let image_height_mm = px_height as f64 * 25.4 / dpi;

        let image = Image::from_dynamic_image(&dynamic);
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(((PAGE_WIDTH_MM - IMAGE_WIDTH_MM) / 2.0) as f32)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - 30.0 - image_height_mm) as f32)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );

        let file_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let caption = format!("Spectrum {}: {}", index + 1, file_name);
        layer.use_text(
            caption,
            10.0,
            Mm(20.0),
            Mm((PAGE_HEIGHT_MM - 38.0 - image_height_mm) as f32),
            &regular,
        );
    }

    let file = File::create(&pdf_path)?;
    doc.save(&mut BufWriter::new(file)).map_err(report_err)?;
    info!(path = %pdf_path.display(), pages = images.len() + 1, "pdf report written");
    Ok(Some(pdf_path))
}
