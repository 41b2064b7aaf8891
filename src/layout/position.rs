//! Grid placement with jitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::LayoutConfig;
use crate::graph::Position;

// Keeps `2 * amplitude` and the sampler's scale finite.
const MAX_AMPLITUDE: f64 = f64::MAX / 4.0;

/// Source of small random offsets applied to grid coordinates.
///
/// Jitter only moves final coordinates. It never feeds back into depth or
/// column assignment.
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
    amplitude: f64,
}

impl Jitter {
    /// Jitter uniformly drawn from `[-amplitude, +amplitude]`.
    ///
    /// A seed makes the sequence reproducible; without one the generator is
    /// seeded from the thread RNG. A non-finite or negative amplitude
    /// disables jitter, and huge amplitudes are clamped.
    pub fn new(amplitude: f64, seed: Option<u64>) -> Self {
        let amplitude = if amplitude.is_finite() {
            amplitude.clamp(0.0, MAX_AMPLITUDE)
        } else {
            tracing::warn!(amplitude, "non-finite jitter amplitude, jitter disabled");
            0.0
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng, amplitude }
    }

    /// Jitter that always returns zero.
    pub fn none() -> Self {
        Self::new(0.0, Some(0))
    }

    /// Next offset.
    pub fn offset(&mut self) -> f64 {
        if self.amplitude > 0.0 {
            self.rng.random_range(-self.amplitude..=self.amplitude)
        } else {
            0.0
        }
    }
}

/// Map `(depth, column)` pairs onto the layout grid.
pub fn synthesize_positions(
    depths: &[usize],
    columns: &[usize],
    config: &LayoutConfig,
) -> Vec<Position> {
    let mut jitter = Jitter::new(config.jitter, config.seed);
    depths
        .iter()
        .zip(columns)
        .map(|(&depth, &column)| {
            let x = column as f64 * config.cell_width + jitter.offset();
            let y = depth as f64 * config.cell_height + jitter.offset();
            Position::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_exact_grid_without_jitter() {
        let config = LayoutConfig::new().with_jitter(0.0);
        let positions = synthesize_positions(&[0, 1, 1], &[0, 0, 1], &config);
        assert_relative_eq!(positions[0].x, 0.0);
        assert_relative_eq!(positions[0].y, 0.0);
        assert_relative_eq!(positions[1].y, 200.0);
        assert_relative_eq!(positions[2].x, 300.0);
        assert_relative_eq!(positions[2].y, 200.0);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let config = LayoutConfig::new().with_seed(7);
        let depths = vec![3; 500];
        let columns: Vec<usize> = (0..500).map(|i| i % 4).collect();
        for (pos, column) in synthesize_positions(&depths, &columns, &config).iter().zip(&columns) {
            assert!((pos.x - *column as f64 * 300.0).abs() <= 25.0);
            assert!((pos.y - 600.0).abs() <= 25.0);
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let config = LayoutConfig::new().with_seed(42);
        let a = synthesize_positions(&[0, 1, 2], &[0, 0, 0], &config);
        let b = synthesize_positions(&[0, 1, 2], &[0, 0, 0], &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_cell_size() {
        let config = LayoutConfig::new()
            .with_cell_size(100.0, 50.0)
            .with_jitter(0.0);
        let positions = synthesize_positions(&[2], &[3], &config);
        assert_relative_eq!(positions[0].x, 300.0);
        assert_relative_eq!(positions[0].y, 100.0);
    }

    #[test]
    fn test_non_finite_amplitude_disables_jitter() {
        for amplitude in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -5.0] {
            let mut jitter = Jitter::new(amplitude, Some(3));
            assert_relative_eq!(jitter.offset(), 0.0);
        }
    }

    #[test]
    fn test_huge_amplitude_is_clamped() {
        let mut jitter = Jitter::new(f64::MAX, Some(3));
        for _ in 0..100 {
            assert!(jitter.offset().is_finite());
        }
    }

    #[test]
    fn test_no_jitter_source() {
        let mut jitter = Jitter::none();
        assert_relative_eq!(jitter.offset(), 0.0);
    }
}
