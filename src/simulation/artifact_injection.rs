//! Spike artifact injection
//!
//! Spikes are short, sparse, strictly-positive outliers placed i.i.d. per
//! sample, never clustered. Injection is a no-op when disabled in the
//! config.

use rand::Rng;

use super::config::GeneratorConfig;

/// Add sparse spike artifacts to `y` per the artifact configuration.
///
/// Each sample independently receives a spike with probability
/// `spike_probability`; spike heights are uniform in `[0, max_spike_height]`.
/// The mask draw and the height draw both happen for every sample, so the
/// random stream position does not depend on which samples were hit.
pub fn add_spikes<R: Rng>(y: &[f64], config: &GeneratorConfig, rng: &mut R) -> Vec<f64> {
    if !config.add_spikes {
        return y.to_vec();
    }

    y.iter()
        .map(|&yi| {
            let hit = rng.gen::<f64>() < config.spike_probability;
            let height = rng.gen_range(0.0..=config.max_spike_height);
            if hit {
                yi + height
            } else {
                yi
            }
        })
        .collect()
}
