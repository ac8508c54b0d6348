//! Random number generators.
//!
//! Path generation never reaches for a process-wide generator. Every
//! simulator takes a [`NormalVariateSource`], so callers choose between a
//! seeded Mersenne Twister, an entropy-seeded `rand` generator, or a fixed
//! sequence of draws.

use hmc_core::Real;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A source of independent standard-normal deviates.
pub trait NormalVariateSource {
    /// Draw the next standard-normal deviate.
    fn next_standard_normal(&mut self) -> Real;
}

impl<S: NormalVariateSource + ?Sized> NormalVariateSource for &mut S {
    #[inline]
    fn next_standard_normal(&mut self) -> Real {
        (**self).next_standard_normal()
    }
}

impl<S: NormalVariateSource + ?Sized> NormalVariateSource for Box<S> {
    #[inline]
    fn next_standard_normal(&mut self) -> Real {
        (**self).next_standard_normal()
    }
}

// ─── Mersenne Twister ─────────────────────────────────────────────────────────

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits give every representable double in [0, 1) equal weight
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a Mersenne Twister and transforms its output through the inverse
/// CDF of the standard normal distribution. Fully determined by its seed.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // exact 0 would map to -∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

impl NormalVariateSource for InverseCumulativeNormalRng {
    #[inline]
    fn next_standard_normal(&mut self) -> Real {
        self.next_real()
    }
}

// ─── rand-backed source ───────────────────────────────────────────────────────

/// Standard-normal deviates drawn from any `rand` generator through
/// `rand_distr::StandardNormal`.
pub struct PseudoRandomNormalRng<R = StdRng> {
    rng: R,
}

impl PseudoRandomNormalRng<StdRng> {
    /// An unseeded generator initialised from operating-system entropy.
    ///
    /// Two instances produce different streams; use [`seeded`](Self::seeded)
    /// when results must be reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> PseudoRandomNormalRng<R> {
    /// Wrap an existing `rand` generator.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NormalVariateSource for PseudoRandomNormalRng<R> {
    #[inline]
    fn next_standard_normal(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}

// ─── Fixed sequence ───────────────────────────────────────────────────────────

/// Replays a fixed sequence of deviates, wrapping around at the end.
///
/// An empty sequence yields `0.0` forever, i.e. a noiseless simulation.
#[derive(Debug, Clone)]
pub struct FixedSequenceRng {
    values: Vec<Real>,
    position: usize,
}

impl FixedSequenceRng {
    /// Create a source replaying `values`.
    pub fn new(values: impl Into<Vec<Real>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// Rewind to the first value.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl NormalVariateSource for FixedSequenceRng {
    fn next_standard_normal(&mut self) -> Real {
        if self.values.is_empty() {
            return 0.0;
        }
        let z = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        z
    }
}

// ─── Stream seeding ───────────────────────────────────────────────────────────

/// Derive the seed of the `index`-th independent stream from a base seed.
///
/// Applies the SplitMix64 finaliser so that neighbouring indices (and
/// neighbouring base seeds) give unrelated Mersenne Twister states.
pub fn stream_seed(base: u64, index: usize) -> u64 {
    let mut z = base.wrapping_add(
        (index as u64)
            .wrapping_add(1)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15),
    );
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mean_and_variance(src: &mut impl NormalVariateSource, n: usize) -> (Real, Real) {
        let samples: Vec<Real> = (0..n).map(|_| src.next_standard_normal()).collect();
        let mean = samples.iter().sum::<Real>() / n as Real;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<Real>() / (n as Real - 1.0);
        (mean, var)
    }

    #[test]
    fn mt_range() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..1_000 {
            let x = rng.next_real();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn icn_rng_is_standard_normal() {
        let mut rng = InverseCumulativeNormalRng::new(42);
        let (mean, var) = sample_mean_and_variance(&mut rng, 20_000);
        assert!(mean.abs() < 0.05, "mean {mean} out of expected range");
        assert!((var - 1.0).abs() < 0.05, "variance {var} out of expected range");
    }

    #[test]
    fn icn_rng_same_seed_same_stream() {
        let mut a = InverseCumulativeNormalRng::new(7);
        let mut b = InverseCumulativeNormalRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_real(), b.next_real());
        }
    }

    #[test]
    fn pseudo_random_seeded_is_reproducible() {
        let mut a = PseudoRandomNormalRng::seeded(99);
        let mut b = PseudoRandomNormalRng::seeded(99);
        for _ in 0..100 {
            assert_eq!(a.next_standard_normal(), b.next_standard_normal());
        }
        let (mean, var) = sample_mean_and_variance(&mut a, 20_000);
        assert!(mean.abs() < 0.05);
        assert!((var - 1.0).abs() < 0.05);
    }

    #[test]
    fn fixed_sequence_wraps() {
        let mut rng = FixedSequenceRng::new(vec![0.5, -1.0]);
        let drawn: Vec<Real> = (0..5).map(|_| rng.next_standard_normal()).collect();
        assert_eq!(drawn, vec![0.5, -1.0, 0.5, -1.0, 0.5]);
        rng.reset();
        assert_eq!(rng.next_standard_normal(), 0.5);
    }

    #[test]
    fn empty_fixed_sequence_is_silent() {
        let mut rng = FixedSequenceRng::new(Vec::new());
        assert_eq!(rng.next_standard_normal(), 0.0);
        assert_eq!(rng.next_standard_normal(), 0.0);
    }

    #[test]
    fn source_by_mutable_reference() {
        fn draw_two(mut src: impl NormalVariateSource) -> (Real, Real) {
            (src.next_standard_normal(), src.next_standard_normal())
        }
        let mut rng = FixedSequenceRng::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(draw_two(&mut rng), (1.0, 2.0));
        // the borrowed source advanced
        assert_eq!(rng.next_standard_normal(), 3.0);
    }

    #[test]
    fn stream_seeds_are_distinct() {
        let seeds: Vec<u64> = (0..1_000).map(|i| stream_seed(42, i)).collect();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), seeds.len());
        assert_ne!(stream_seed(42, 1), stream_seed(43, 0));
    }
}
