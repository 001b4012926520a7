//! Seeded randomness and weighted categorical draws

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Session RNG
pub type GameRng = Pcg32;

/// Create the RNG for a session seed
pub fn rng_from_seed(seed: u64) -> GameRng {
    Pcg32::seed_from_u64(seed)
}

/// A discrete distribution over a small set of variants
///
/// Variants with a non-positive weight are dropped at construction, so a
/// table that exists always has at least one drawable entry.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    /// (cumulative weight, variant), ascending
    entries: Vec<(f32, T)>,
    total: f32,
    /// Returned for rolls that land past the last boundary
    last: T,
}

impl<T: Copy> WeightedTable<T> {
    /// Build from (weight, variant) pairs. Returns None if no weight is positive.
    pub fn new(pairs: impl IntoIterator<Item = (f32, T)>) -> Option<Self> {
        let mut total = 0.0;
        let mut entries = Vec::new();
        for (weight, variant) in pairs {
            if weight > 0.0 && weight.is_finite() {
                total += weight;
                entries.push((total, variant));
            }
        }
        let last = entries.last()?.1;
        Some(Self {
            entries,
            total,
            last,
        })
    }

    /// A table that always yields `variant`
    pub fn single(variant: T) -> Self {
        Self {
            entries: vec![(1.0, variant)],
            total: 1.0,
            last: variant,
        }
    }

    /// Map a uniform roll in [0, 1) onto a variant
    ///
    /// Rolls outside the range are clamped, so the result is always a variant.
    pub fn pick(&self, roll: f32) -> T {
        let target = roll.clamp(0.0, 1.0) * self.total;
        self.entries
            .iter()
            .find(|(cumulative, _)| target < *cumulative)
            .map_or(self.last, |(_, variant)| *variant)
    }

    /// Draw a variant from the given random source
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.pick(rng.random::<f32>())
    }

    /// Probability of each variant, in insertion order
    pub fn probabilities(&self) -> Vec<(T, f32)> {
        let mut prev = 0.0;
        self.entries
            .iter()
            .map(|&(cumulative, variant)| {
                let p = (cumulative - prev) / self.total;
                prev = cumulative;
                (variant, p)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fruit {
        Apple,
        Pear,
        Plum,
    }

    fn table() -> WeightedTable<Fruit> {
        WeightedTable::new([(0.6, Fruit::Apple), (0.3, Fruit::Pear), (0.1, Fruit::Plum)]).unwrap()
    }

    #[test]
    fn test_pick_boundaries() {
        let t = table();
        assert_eq!(t.pick(0.0), Fruit::Apple);
        assert_eq!(t.pick(0.59), Fruit::Apple);
        assert_eq!(t.pick(0.61), Fruit::Pear);
        assert_eq!(t.pick(0.89), Fruit::Pear);
        assert_eq!(t.pick(0.95), Fruit::Plum);
        // Out-of-range rolls still yield a variant
        assert_eq!(t.pick(1.0), Fruit::Plum);
        assert_eq!(t.pick(-3.0), Fruit::Apple);
    }

    #[test]
    fn test_zero_weights_are_skipped() {
        let t = WeightedTable::new([(0.0, Fruit::Apple), (2.0, Fruit::Pear)]).unwrap();
        assert_eq!(t.pick(0.0), Fruit::Pear);
        assert_eq!(t.probabilities(), vec![(Fruit::Pear, 1.0)]);
    }

    #[test]
    fn test_single_always_yields_variant() {
        let t = WeightedTable::single(Fruit::Plum);
        assert_eq!(t.pick(0.0), Fruit::Plum);
        assert_eq!(t.pick(0.999), Fruit::Plum);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(WeightedTable::<Fruit>::new([]).is_none());
        assert!(WeightedTable::new([(0.0, Fruit::Apple), (-1.0, Fruit::Pear)]).is_none());
    }

    #[test]
    fn test_sample_frequencies() {
        let t = table();
        let mut rng = rng_from_seed(42);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match t.sample(&mut rng) {
                Fruit::Apple => counts[0] += 1,
                Fruit::Pear => counts[1] += 1,
                Fruit::Plum => counts[2] += 1,
            }
        }
        assert!((5_500..6_500).contains(&counts[0]), "apple {}", counts[0]);
        assert!((2_500..3_500).contains(&counts[1]), "pear {}", counts[1]);
        assert!((600..1_400).contains(&counts[2]), "plum {}", counts[2]);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let t = table();
        let mut a = rng_from_seed(7);
        let mut b = rng_from_seed(7);
        for _ in 0..100 {
            assert_eq!(t.sample(&mut a), t.sample(&mut b));
        }
    }
}
