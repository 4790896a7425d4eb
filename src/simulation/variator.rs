//! Parameter variation between dataset members
//!
//! [`vary`] applies bounded jitter to a configuration and returns the next
//! snapshot; folding it over an initial config yields the random walk of
//! configurations a batch runs on. Snapshots are immutable, which makes the
//! walk testable without running any synthesis.

use rand::Rng;

use super::config::{BaselineType, GeneratorConfig, NoiseType, PeakType};

/// Produce the next configuration of the random walk.
///
/// Jitter is multiplicative for magnitudes (factors near 1) and additive
/// for the sinusoidal phase; the peak count shifts by at most two and never
/// drops below one; the peak type set is redrawn as 1-3 samples with
/// repetition; the noise family switches with probability 0.3 and spike
/// injection toggles with probability 0.2.
pub fn vary<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> GeneratorConfig {
    let mut next = config.clone();

    match next.baseline_type {
        BaselineType::Polynomial => {
            for coeff in &mut next.baseline_params.polynomial_coeffs {
                *coeff *= rng.gen_range(0.8..1.2);
            }
        }
        BaselineType::Exponential => {
            next.baseline_params.exp_amplitude *= rng.gen_range(0.8..1.2);
            next.baseline_params.exp_decay *= rng.gen_range(0.9..1.1);
        }
        BaselineType::Sinusoidal => {
            next.baseline_params.sin_amplitude *= rng.gen_range(0.8..1.2);
            next.baseline_params.sin_frequency *= rng.gen_range(0.9..1.1);
            next.baseline_params.sin_phase += rng.gen_range(-0.2..0.2);
        }
        BaselineType::Flat => {}
    }

    let shift = rng.gen_range(-2i64..=2);
    next.num_peaks = (next.num_peaks as i64 + shift).max(1) as usize;

    let type_count = rng.gen_range(1..=3);
    next.peak_types = (0..type_count)
        .map(|_| match rng.gen_range(0..3) {
            0 => PeakType::Gaussian,
            1 => PeakType::Lorentzian,
            _ => PeakType::Voigt,
        })
        .collect();

    next.noise_level *= rng.gen_range(0.8..1.2);

    if rng.gen::<f64>() < 0.3 {
        next.noise_type = if rng.gen::<bool>() {
            NoiseType::Gaussian
        } else {
            NoiseType::Poisson
        };
    }

    if rng.gen::<f64>() < 0.2 {
        next.add_spikes = !next.add_spikes;
    }

    next
}

/// Fold [`vary`] into the `n` configuration snapshots of a batch.
///
/// Index 0 is the initial config untouched; each later snapshot jitters its
/// predecessor, so the result is a random walk rather than independent
/// samples.
pub fn config_walk<R: Rng>(initial: &GeneratorConfig, n: usize, rng: &mut R) -> Vec<GeneratorConfig> {
    let mut walk = Vec::with_capacity(n);
    if n == 0 {
        return walk;
    }
    let mut current = initial.clone();
    walk.push(current.clone());
    for _ in 1..n {
        current = vary(&current, rng);
        walk.push(current.clone());
    }
    walk
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn peak_count_never_drops_below_one() {
        let config = GeneratorConfig {
            num_peaks: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let next = vary(&config, &mut rng);
            assert!(next.num_peaks >= 1);
            assert!(next.num_peaks <= 3);
        }
    }

    #[test]
    fn redrawn_type_set_has_one_to_three_members() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..100 {
            let next = vary(&config, &mut rng);
            assert!((1..=3).contains(&next.peak_types.len()));
        }
    }

    #[test]
    fn noise_level_jitter_stays_bounded() {
        let config = GeneratorConfig {
            noise_level: 0.05,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let next = vary(&config, &mut rng);
            assert!(next.noise_level >= 0.05 * 0.8);
            assert!(next.noise_level <= 0.05 * 1.2);
        }
    }

    #[test]
    fn polynomial_coefficients_scale_within_bounds() {
        let config = GeneratorConfig {
            baseline_type: BaselineType::Polynomial,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(24);
        let next = vary(&config, &mut rng);
        let before = &config.baseline_params.polynomial_coeffs;
        let after = &next.baseline_params.polynomial_coeffs;
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after) {
            let factor = a / b;
            assert!((0.8..1.2).contains(&factor), "factor {factor} out of range");
        }
    }

    #[test]
    fn flat_baseline_params_are_untouched() {
        let config = GeneratorConfig {
            baseline_type: BaselineType::Flat,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(25);
        let next = vary(&config, &mut rng);
        assert_eq!(next.baseline_params, config.baseline_params);
    }

    #[test]
    fn domain_and_output_settings_never_vary() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(26);
        let next = vary(&config, &mut rng);
        assert_eq!(next.x_min, config.x_min);
        assert_eq!(next.x_max, config.x_max);
        assert_eq!(next.num_points, config.num_points);
        assert_eq!(next.output_dir, config.output_dir);
        assert_eq!(next.file_prefix, config.file_prefix);
    }

    #[test]
    fn walk_starts_at_the_initial_config() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(27);
        let walk = config_walk(&config, 4, &mut rng);
        assert_eq!(walk.len(), 4);
        assert_eq!(walk[0], config);
        // the jitter always touches noise_level, so consecutive members differ
        for pair in walk.windows(2) {
            assert_ne!(pair[0].noise_level, pair[1].noise_level);
        }
    }

    #[test]
    fn empty_walk_is_empty() {
        let mut rng = StdRng::seed_from_u64(28);
        assert!(config_walk(&GeneratorConfig::default(), 0, &mut rng).is_empty());
    }

    #[test]
    fn seeded_walk_is_reproducible() {
        let config = GeneratorConfig::default();
        let a = config_walk(&config, 6, &mut StdRng::seed_from_u64(42));
        let b = config_walk(&config, 6, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
