//! Heston path simulation.

use super::path_grid::PathGrid;
use hmc_core::{errors::Result, Real, Size, Time};
use hmc_instruments::ExerciseStyle;
use hmc_math::random_numbers::{stream_seed, InverseCumulativeNormalRng, NormalVariateSource};
use hmc_processes::{HestonProcess, HestonState, SimulationParameters};
use rayon::prelude::*;

/// Simulates `N` independent Heston paths over `M` equal time steps.
///
/// Every path starts at `(S0, v0)` and is advanced with
/// [`HestonProcess::evolve`]. Each step of each path consumes two
/// independent standard normals `(Z1, Z2)` from the supplied
/// [`NormalVariateSource`].
#[derive(Debug, Clone)]
pub struct PathSimulator {
    process: HestonProcess,
    dt: Time,
    paths: Size,
    steps: Size,
}

impl PathSimulator {
    /// Create a simulator for the given parameters.
    ///
    /// Fails with `InvalidParameters` when
    /// [`SimulationParameters::validate`] does.
    pub fn new(params: &SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            process: params.process(),
            dt: params.dt(),
            paths: params.paths,
            steps: params.steps,
        })
    }

    /// The simulated process.
    pub fn process(&self) -> &HestonProcess {
        &self.process
    }

    /// Step size `Δt = T / M`.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Number of paths `N`.
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of time steps `M`.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Generate the full grid of prices and variances.
    ///
    /// Draws are consumed time-major: for `t = 1..=M`, for `i = 0..N`,
    /// first `Z1` then `Z2`. The same source state therefore always yields
    /// the same grid, element for element.
    ///
    /// The exercise style is accepted so the call mirrors the pricing entry
    /// point, but the discretization is identical for every style; the style
    /// only matters once payoffs are discounted.
    pub fn generate_paths<R>(&self, _exercise: ExerciseStyle, rng: &mut R) -> PathGrid
    where
        R: NormalVariateSource + ?Sized,
    {
        let x0 = self.process.initial_state();

        let mut prices = Vec::with_capacity(self.steps + 1);
        let mut variances = Vec::with_capacity(self.steps + 1);
        prices.push(vec![x0.price; self.paths]);
        variances.push(vec![x0.variance; self.paths]);

        for t in 1..=self.steps {
            let mut s_t = Vec::with_capacity(self.paths);
            let mut v_t = Vec::with_capacity(self.paths);
            for (&price, &variance) in prices[t - 1].iter().zip(&variances[t - 1]) {
                let next = self.step(HestonState { price, variance }, rng);
                s_t.push(next.price);
                v_t.push(next.variance);
            }
            prices.push(s_t);
            variances.push(v_t);
        }

        PathGrid::from_snapshots(prices, variances)
    }

    /// Simulate to maturity keeping only the current snapshot in memory.
    ///
    /// Consumes draws in exactly the order of
    /// [`generate_paths`](Self::generate_paths), so for the same source
    /// state the result equals its
    /// [`terminal_prices`](PathGrid::terminal_prices) bit for bit.
    pub fn simulate_terminal<R>(&self, rng: &mut R) -> Vec<Real>
    where
        R: NormalVariateSource + ?Sized,
    {
        let mut states = vec![self.process.initial_state(); self.paths];
        for _ in 0..self.steps {
            for state in states.iter_mut() {
                *state = self.step(*state, rng);
            }
        }
        states.into_iter().map(|x| x.price).collect()
    }

    /// Simulate terminal prices in parallel.
    ///
    /// Path `i` owns an [`InverseCumulativeNormalRng`] seeded with
    /// [`stream_seed(seed, i)`](stream_seed) and draws all of its steps from
    /// it. The output depends only on `seed`, not on the number of worker
    /// threads, but it does not match the single-stream draw order of
    /// [`generate_paths`](Self::generate_paths).
    pub fn simulate_terminal_parallel(&self, seed: u64) -> Vec<Real> {
        (0..self.paths)
            .into_par_iter()
            .map(|i| {
                let mut rng = InverseCumulativeNormalRng::new(stream_seed(seed, i));
                let mut x = self.process.initial_state();
                for _ in 0..self.steps {
                    x = self.step(x, &mut rng);
                }
                x.price
            })
            .collect()
    }

    #[inline]
    fn step<R>(&self, x: HestonState, rng: &mut R) -> HestonState
    where
        R: NormalVariateSource + ?Sized,
    {
        let z1 = rng.next_standard_normal();
        let z2 = rng.next_standard_normal();
        self.process.evolve(x, self.dt, z1, z2)
    }
}
