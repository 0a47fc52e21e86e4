//! Weighted ball generation behind an injectable random source.

use orbdrop_core::Rank;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapter from any `rand` generator.
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

pub type SeededSource = RngSource<StdRng>;

impl SeededSource {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// Replays a fixed list of values, wrapping around at the end.
pub struct ScriptedSource {
    values: Vec<f64>,
    index: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Values consumed so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Cumulative-threshold draw over ranks `1..=weights.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    thresholds: Vec<f64>,
}

impl Spawner {
    /// Weights are relative; they are normalised so thresholds end at 1.0.
    /// Callers validate weights through [`EngineConfig`](crate::EngineConfig).
    pub fn new(weights: &[f64]) -> Self {
        let total: f64 = weights.iter().sum();
        let mut acc = 0.0;
        let thresholds = weights
            .iter()
            .map(|w| {
                acc += w;
                acc / total
            })
            .collect();
        Self { thresholds }
    }

    pub fn ranks(&self) -> usize {
        self.thresholds.len()
    }

    /// Rank for a uniform sample `u`.
    pub fn rank_for(&self, u: f64) -> Rank {
        let idx = self
            .thresholds
            .iter()
            .position(|&t| u < t)
            .unwrap_or(self.thresholds.len().saturating_sub(1));
        (idx + 1) as Rank
    }

    pub fn draw(&self, source: &mut dyn RandomSource) -> Rank {
        self.rank_for(source.next_unit())
    }

    /// Probability of each rank, index 0 is rank 1.
    pub fn probabilities(&self) -> Vec<f64> {
        let mut prev = 0.0;
        self.thresholds
            .iter()
            .map(|&t| {
                let p = t - prev;
                prev = t;
                p
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Spawner {
        Spawner::new(&[0.70, 0.25, 0.05])
    }

    #[test]
    fn test_thresholds_match_classic_odds() {
        let s = classic();
        assert_eq!(s.rank_for(0.0), 1);
        assert_eq!(s.rank_for(0.69), 1);
        assert_eq!(s.rank_for(0.70), 2);
        assert_eq!(s.rank_for(0.94), 2);
        assert_eq!(s.rank_for(0.96), 3);
        assert_eq!(s.rank_for(0.999), 3);
    }

    #[test]
    fn test_relative_weights_normalised() {
        let s = Spawner::new(&[7.0, 2.5, 0.5]);
        assert_eq!(s.rank_for(0.5), 1);
        assert_eq!(s.rank_for(0.8), 2);
        assert_eq!(s.rank_for(0.97), 3);
    }

    #[test]
    fn test_probabilities() {
        let p = classic().probabilities();
        assert!((p[0] - 0.70).abs() < 1e-9);
        assert!((p[1] - 0.25).abs() < 1e-9);
        assert!((p[2] - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_scripted_source_wraps() {
        let mut src = ScriptedSource::new(vec![0.1, 0.9]);
        assert_eq!(src.next_unit(), 0.1);
        assert_eq!(src.next_unit(), 0.9);
        assert_eq!(src.next_unit(), 0.1);
        assert_eq!(src.draws(), 3);
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut a = SeededSource::seeded(7);
        let mut b = SeededSource::seeded(7);
        for _ in 0..32 {
            let x = a.next_unit();
            assert_eq!(x, b.next_unit());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_distribution_over_many_draws() {
        let spawner = classic();
        let mut src = SeededSource::seeded(42);
        let n = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let rank = spawner.draw(&mut src);
            counts[(rank - 1) as usize] += 1;
        }
        let freq: Vec<f64> = counts.iter().map(|&c| c as f64 / n as f64).collect();
        assert!((freq[0] - 0.70).abs() < 0.01, "rank 1: {}", freq[0]);
        assert!((freq[1] - 0.25).abs() < 0.01, "rank 2: {}", freq[1]);
        assert!((freq[2] - 0.05).abs() < 0.01, "rank 3: {}", freq[2]);
    }
}
