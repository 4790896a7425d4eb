//! Batch dataset generation and orchestration
//!
//! [`SpectralGenerator`] owns the configuration and the random source. A
//! batch run folds the parameter variator into per-member configuration
//! snapshots first, then synthesizes, persists and plots each member, and
//! finally assembles the PDF report. Because the snapshots are computed
//! serially up front, the per-member work is free of shared mutable state
//! and can run on the rayon pool with a derived seed per index.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use crate::error::SimResult;
use crate::output::export::save_spectrum;
use crate::output::plot::{plot_spectrum, PlotOptions};
use crate::output::report::generate_report;
use crate::simulation::config::GeneratorConfig;
use crate::simulation::synthesizer::{synthesize, Spectrum};
use crate::simulation::variator::config_walk;

/// Flags controlling one batch run.
#[derive(Debug, Clone)]
pub struct DatasetOptions {
    pub n_spectra: usize,
    /// Jitter the configuration between members (random walk).
    pub vary: bool,
    /// Persist signal, component and peak-metadata tables.
    pub save: bool,
    /// Render a PNG per member; images are written only when `save` is
    /// also set.
    pub plot: bool,
    /// Run per-member synthesis and persistence on the rayon pool.
    pub parallel: bool,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            n_spectra: 5,
            vary: true,
            save: true,
            plot: true,
            parallel: false,
        }
    }
}

/// One generated batch member.
#[derive(Debug, Clone)]
pub struct DatasetItem {
    /// The configuration snapshot this member was synthesized from.
    pub config: GeneratorConfig,
    pub spectrum: Spectrum,
    /// Signal-table path, when persistence was requested.
    pub data_path: Option<PathBuf>,
    /// Plot-image path, when plotting and persistence were requested.
    pub plot_path: Option<PathBuf>,
}

/// Stateful generator: a configuration plus an explicit seeded random
/// source. The config is the only mutable state, changed by
/// [`SpectralGenerator::update_params`] and by batch variation.
pub struct SpectralGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    seed: u64,
}

impl SpectralGenerator {
    /// Entropy-seeded generator; the drawn seed stays available for
    /// per-index derivation in parallel runs.
    pub fn new(config: GeneratorConfig) -> SimResult<Self> {
        let seed = StdRng::from_entropy().gen();
        Self::with_seed(config, seed)
    }

    /// Deterministic generator: the same seed and config reproduce every
    /// spectrum of a run exactly.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mutate the held configuration; the result is re-validated.
    pub fn update_params(&mut self, update: impl FnOnce(&mut GeneratorConfig)) -> SimResult<()> {
        update(&mut self.config);
        self.config.validate()
    }

    /// Synthesize a single spectrum from the current configuration.
    pub fn generate(&mut self) -> Spectrum {
        synthesize(&self.config, &mut self.rng)
    }

    /// Generate a batch of spectra with optional variation, persistence
    /// and plotting.
    ///
    /// All members are returned in memory regardless of the persistence
    /// flags; callers needing memory bounds must page this themselves.
    /// After a varied batch the generator keeps the final snapshot, so a
    /// following batch continues the walk.
    pub fn generate_dataset(&mut self, options: &DatasetOptions) -> SimResult<Vec<DatasetItem>> {
        let configs = if options.vary {
            config_walk(&self.config, options.n_spectra, &mut self.rng)
        } else {
            vec![self.config.clone(); options.n_spectra]
        };
        if options.vary {
            if let Some(last) = configs.last() {
                self.config = last.clone();
            }
        }

        if options.save {
            ensure_output_dirs(&self.config.output_dir, options.plot)?;
        }

        let items: SimResult<Vec<DatasetItem>> = if options.parallel {
            let base_seed = self.seed;
            configs
                .par_iter()
                .enumerate()
                .map(|(index, config)| {
                    // one derived stream per member keeps parallel output
                    // independent of scheduling
                    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64 + 1));
                    produce_item(config, index, &mut rng, options)
                })
                .collect()
        } else {
            configs
                .iter()
                .enumerate()
                .map(|(index, config)| produce_item(config, index, &mut self.rng, options))
                .collect()
        };
        let items = items?;

        // report assembly joins after every image write has completed
        if options.save && options.plot {
            let images: Vec<PathBuf> = items
                .iter()
                .filter_map(|item| item.plot_path.clone())
                .collect();
            generate_report(&self.config.output_dir, &images, &self.config)?;
        }

        Ok(items)
    }
}

/// Idempotent creation of the output directory tree.
fn ensure_output_dirs(root: &Path, with_images: bool) -> SimResult<()> {
    fs::create_dir_all(root.join("data"))?;
    fs::create_dir_all(root.join("peak_info"))?;
    if with_images {
        fs::create_dir_all(root.join("images"))?;
    }
    Ok(())
}

fn produce_item(
    config: &GeneratorConfig,
    index: usize,
    rng: &mut StdRng,
    options: &DatasetOptions,
) -> SimResult<DatasetItem> {
    let spectrum = synthesize(config, rng);
    let stem = format!("{}-{:02}", config.file_prefix, index + 1);

    let mut data_path = None;
    let mut plot_path = None;

    if options.save {
        let path = save_spectrum(
            &config.output_dir,
            &config.file_prefix,
            Some(&format!("{stem}.csv")),
            &spectrum,
            true,
        )?;
        data_path = Some(path);
    }

    if options.save && options.plot {
        let path = config.output_dir.join("images").join(format!("{stem}.png"));
        let plot_options = PlotOptions {
            title: Some(format!("Simulated Spectrum {}", index + 1)),
            ..Default::default()
        };
        plot_spectrum(&path, &spectrum, &plot_options)?;
        plot_path = Some(path);
    }

    info!(
        index,
        peaks = spectrum.components.peak_info.len(),
        saved = options.save,
        "spectrum generated"
    );

    Ok(DatasetItem {
        config: config.clone(),
        spectrum,
        data_path,
        plot_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::BaselineType;

    fn in_memory_options(n: usize) -> DatasetOptions {
        DatasetOptions {
            n_spectra: n,
            vary: true,
            save: false,
            plot: false,
            parallel: false,
        }
    }

    #[test]
    fn new_rejects_invalid_configs() {
        let config = GeneratorConfig {
            num_points: 1,
            ..Default::default()
        };
        assert!(SpectralGenerator::new(config).is_err());
    }

    #[test]
    fn update_params_revalidates() {
        let mut generator =
            SpectralGenerator::with_seed(GeneratorConfig::default(), 1).expect("valid");
        let result = generator.update_params(|config| config.x_max = -5.0);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_generators_reproduce_spectra() {
        let config = GeneratorConfig::default();
        let mut a = SpectralGenerator::with_seed(config.clone(), 42).expect("valid");
        let mut b = SpectralGenerator::with_seed(config, 42).expect("valid");
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn dataset_yields_requested_count_without_persistence() {
        let mut generator =
            SpectralGenerator::with_seed(GeneratorConfig::default(), 7).expect("valid");
        let items = generator
            .generate_dataset(&in_memory_options(3))
            .expect("generate");
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.data_path.is_none()));
        assert!(items.iter().all(|item| item.plot_path.is_none()));
    }

    #[test]
    fn varied_members_carry_distinct_snapshots() {
        let mut generator =
            SpectralGenerator::with_seed(GeneratorConfig::default(), 7).expect("valid");
        let items = generator
            .generate_dataset(&in_memory_options(3))
            .expect("generate");
        // first snapshot is the initial config; the variator ran n-1 times
        assert_eq!(items[0].config, GeneratorConfig::default());
        assert_ne!(items[0].config.noise_level, items[1].config.noise_level);
        assert_ne!(items[1].config.noise_level, items[2].config.noise_level);
        // the generator carries the walk forward
        assert_eq!(generator.config(), &items[2].config);
    }

    #[test]
    fn unvaried_members_share_the_config() {
        let mut generator =
            SpectralGenerator::with_seed(GeneratorConfig::default(), 7).expect("valid");
        let options = DatasetOptions {
            vary: false,
            ..in_memory_options(4)
        };
        let items = generator.generate_dataset(&options).expect("generate");
        assert_eq!(items.len(), 4);
        for item in &items {
            assert_eq!(&item.config, generator.config());
        }
    }

    #[test]
    fn parallel_and_serial_walks_agree_structurally() {
        let config = GeneratorConfig {
            baseline_type: BaselineType::Exponential,
            ..Default::default()
        };
        let mut serial = SpectralGenerator::with_seed(config.clone(), 11).expect("valid");
        let mut parallel = SpectralGenerator::with_seed(config, 11).expect("valid");

        let serial_items = serial
            .generate_dataset(&in_memory_options(4))
            .expect("serial");
        let parallel_items = parallel
            .generate_dataset(&DatasetOptions {
                parallel: true,
                ..in_memory_options(4)
            })
            .expect("parallel");

        assert_eq!(serial_items.len(), parallel_items.len());
        // the snapshot walk is seeded identically in both modes
        for (a, b) in serial_items.iter().zip(&parallel_items) {
            assert_eq!(a.config, b.config);
        }
    }
}
