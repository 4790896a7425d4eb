//! Stochastic noise models for the synthesized signal
//!
//! Both models are pure given an explicit random source. A noise level of
//! zero (or below) disables noise and the input is returned unchanged.

use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal};

use super::config::NoiseType;

/// Perturb `y` with the configured noise family at the given level.
pub fn add_noise<R: Rng>(y: &[f64], level: f64, noise_type: NoiseType, rng: &mut R) -> Vec<f64> {
    if level <= 0.0 {
        return y.to_vec();
    }

    match noise_type {
        NoiseType::Gaussian => y
            .iter()
            .map(|&yi| {
                let z: f64 = rng.sample(StandardNormal);
                yi + level * z
            })
            .collect(),
        NoiseType::Poisson => y
            .iter()
            .map(|&yi| {
                // Shot-noise approximation: quantize the (non-negative)
                // signal into counts of size `level` and replace the sample
                // with the rescaled Poisson draw, so variance tracks
                // intensity.
                let lambda = yi.max(0.0) / level;
                if lambda > 0.0 {
                    Poisson::new(lambda)
                        .map(|dist| dist.sample(rng) * level)
                        .unwrap_or(yi)
                } else {
                    0.0
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_level_is_a_no_op() {
        let y = vec![0.5, 1.0, 2.5];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(add_noise(&y, 0.0, NoiseType::Gaussian, &mut rng), y);
        assert_eq!(add_noise(&y, -0.1, NoiseType::Poisson, &mut rng), y);
    }

    #[test]
    fn gaussian_noise_perturbs_every_sample_slightly() {
        let y = vec![1.0; 500];
        let mut rng = StdRng::seed_from_u64(2);
        let noisy = add_noise(&y, 0.05, NoiseType::Gaussian, &mut rng);
        assert_eq!(noisy.len(), y.len());
        assert!(noisy.iter().zip(&y).any(|(a, b)| a != b));
        // sample mean stays near the clean value at this level
        let mean: f64 = noisy.iter().sum::<f64>() / noisy.len() as f64;
        assert!((mean - 1.0).abs() < 0.02, "mean drifted to {mean}");
    }

    #[test]
    fn poisson_noise_of_zero_signal_is_zero() {
        let y = vec![0.0, -0.3, 0.0];
        let mut rng = StdRng::seed_from_u64(3);
        let noisy = add_noise(&y, 0.1, NoiseType::Poisson, &mut rng);
        assert_eq!(noisy, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn poisson_noise_is_quantized_to_the_level() {
        let y = vec![2.0; 64];
        let level = 0.25;
        let mut rng = StdRng::seed_from_u64(4);
        let noisy = add_noise(&y, level, NoiseType::Poisson, &mut rng);
        for value in noisy {
            let counts = value / level;
            assert!((counts - counts.round()).abs() < 1e-9, "not a count multiple: {value}");
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn seeded_noise_is_deterministic() {
        let y: Vec<f64> = (0..100).map(|i| 0.5 + i as f64 * 0.01).collect();
        let a = add_noise(&y, 0.05, NoiseType::Gaussian, &mut StdRng::seed_from_u64(42));
        let b = add_noise(&y, 0.05, NoiseType::Gaussian, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
