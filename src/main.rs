//! Batch dataset generation from a TOML config file.
//!
//! Usage: `spectral-sim [config.toml]`
//!
//! Without an argument the built-in defaults are used. Set
//! `SPECTRAL_SIM_SEED` to a u64 for a reproducible run.

use std::env;

use spectral_sim::{DatasetOptions, GeneratorConfig, SpectralGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let config = match env::args().nth(1) {
        Some(path) => GeneratorConfig::from_toml_file(&path)?,
        None => GeneratorConfig::default(),
    };

    let seed = env::var("SPECTRAL_SIM_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut generator = match seed {
        Some(seed) => SpectralGenerator::with_seed(config, seed)?,
        None => SpectralGenerator::new(config)?,
    };

    let options = DatasetOptions {
        n_spectra: 10,
        ..Default::default()
    };
    println!("Generating {} simulated spectra...", options.n_spectra);
    let items = generator.generate_dataset(&options)?;

    let root = &generator.config().output_dir;
    println!("Dataset generation complete. {} spectra generated.", items.len());
    println!("Output directories:");
    println!("- Data files: {}", root.join("data").display());
    println!("- Peak information: {}", root.join("peak_info").display());
    println!("- Plot images: {}", root.join("images").display());
    println!("- PDF report: {}", root.join("report.pdf").display());

    Ok(())
}
