//! CSV persistence for spectra
//!
//! Three tables per spectrum: the signal table (`x,y`), an optional
//! component table (`*_components` suffix) with every intermediate curve,
//! and an optional peak metadata table (`*_peak_info` suffix) under the
//! `peak_info/` directory. Directories are created lazily and
//! idempotently; write failures propagate and already-written files stay
//! on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SimResult;
use crate::simulation::peaks::PeakInfo;
use crate::simulation::synthesizer::Spectrum;

/// Write the two-column signal table with an `x,y` header.
pub fn write_signal(path: &Path, x: &[f64], y: &[f64]) -> SimResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["x", "y"])?;
    for (xi, yi) in x.iter().zip(y) {
        writer.write_record([xi.to_string(), yi.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the component table: every intermediate curve, row-aligned with
/// the signal table.
pub fn write_components(path: &Path, spectrum: &Spectrum) -> SimResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["x", "y", "baseline", "peaks", "y_clean", "y_noisy"])?;
    let parts = &spectrum.components;
    for i in 0..spectrum.x.len() {
        writer.write_record([
            spectrum.x[i].to_string(),
            spectrum.y[i].to_string(),
            parts.baseline[i].to_string(),
            parts.peaks[i].to_string(),
            parts.y_clean[i].to_string(),
            parts.y_noisy[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one row per rendered peak, in generation order.
pub fn write_peak_info(path: &Path, peak_info: &[PeakInfo]) -> SimResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["type", "position", "height", "width"])?;
    for peak in peak_info {
        writer.write_record([
            peak.peak_type.to_string(),
            peak.position.to_string(),
            peak.height.to_string(),
            peak.width.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Persist a spectrum under `root`, returning the signal-table path.
///
/// Without an explicit `filename` the name is `{prefix}-{YYYYMMDDHHMMSS}`;
/// a missing `.csv` extension is appended either way. With
/// `include_components` the component and peak-metadata tables are written
/// alongside.
pub fn save_spectrum(
    root: &Path,
    prefix: &str,
    filename: Option<&str>,
    spectrum: &Spectrum,
    include_components: bool,
) -> SimResult<PathBuf> {
    let name = match filename {
        Some(given) => given.to_string(),
        None => {
            let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
            format!("{prefix}-{timestamp}")
        }
    };
    let name = if name.ends_with(".csv") {
        name
    } else {
        format!("{name}.csv")
    };
    let stem = name.trim_end_matches(".csv").to_string();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir)?;
    let signal_path = data_dir.join(&name);
    write_signal(&signal_path, &spectrum.x, &spectrum.y)?;

    if include_components {
        write_components(&data_dir.join(format!("{stem}_components.csv")), spectrum)?;

        let peak_info_dir = root.join("peak_info");
        fs::create_dir_all(&peak_info_dir)?;
        write_peak_info(
            &peak_info_dir.join(format!("{stem}_peak_info.csv")),
            &spectrum.components.peak_info,
        )?;
    }

    debug!(path = %signal_path.display(), "spectrum tables written");
    Ok(signal_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::GeneratorConfig;
    use crate::simulation::synthesizer::synthesize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_spectrum() -> Spectrum {
        let config = GeneratorConfig {
            num_points: 50,
            ..Default::default()
        };
        synthesize(&config, &mut StdRng::seed_from_u64(31))
    }

    #[test]
    fn signal_table_has_header_and_one_row_per_sample() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spectrum = sample_spectrum();
        let path = dir.path().join("signal.csv");
        write_signal(&path, &spectrum.x, &spectrum.y).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y");
        assert_eq!(lines.len(), 1 + spectrum.x.len());
    }

    #[test]
    fn component_table_has_all_six_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spectrum = sample_spectrum();
        let path = dir.path().join("components.csv");
        write_components(&path, &spectrum).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y,baseline,peaks,y_clean,y_noisy");
        assert_eq!(lines.len(), 1 + spectrum.x.len());
    }

    #[test]
    fn peak_table_lists_peaks_in_generation_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spectrum = sample_spectrum();
        let path = dir.path().join("peaks.csv");
        write_peak_info(&path, &spectrum.components.peak_info).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "type,position,height,width");
        assert_eq!(lines.len(), 1 + spectrum.components.peak_info.len());
        let first = &spectrum.components.peak_info[0];
        assert!(lines[1].starts_with(&first.peak_type.to_string()));
    }

    #[test]
    fn save_spectrum_lays_out_the_directory_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spectrum = sample_spectrum();
        let signal = save_spectrum(dir.path(), "sim-spec", Some("sim-spec-01.csv"), &spectrum, true)
            .expect("save");

        assert_eq!(signal, dir.path().join("data").join("sim-spec-01.csv"));
        assert!(signal.exists());
        assert!(dir.path().join("data/sim-spec-01_components.csv").exists());
        assert!(dir.path().join("peak_info/sim-spec-01_peak_info.csv").exists());
    }

    #[test]
    fn save_without_name_uses_timestamped_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spectrum = sample_spectrum();
        let signal = save_spectrum(dir.path(), "adhoc", None, &spectrum, false).expect("save");

        let name = signal.file_name().expect("name").to_string_lossy().into_owned();
        assert!(name.starts_with("adhoc-"));
        assert!(name.ends_with(".csv"));
        // prefix-YYYYMMDDHHMMSS.csv
        assert_eq!(name.len(), "adhoc-".len() + 14 + ".csv".len());
        assert!(!dir.path().join("peak_info").exists());
    }
}
