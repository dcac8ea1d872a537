//! Core contracts for derivative-free weight calibration.
//!
//! This crate defines the [`Candidate`] abstraction shared by every search
//! strategy in `evotune-search`, together with the weight-vector types and
//! operations the strategies are built from:
//!
//! - [`candidate`]: the [`Candidate`] trait, per-index [`WeightBound`]s, and
//!   the [`Evaluation`] returned by a fitness oracle
//! - [`weights`]: sampling, crossover, resampling, and neighbor generation
//!   over bounded weight vectors
//! - [`record`]: per-iteration diagnostic snapshots for external reporting
//! - [`target`]: a reference evaluation context (quadratic distance to a
//!   fixed target point) used for testing and benchmarking strategies
//!
//! A candidate associates one weight vector with one read-only evaluation
//! context. The strategies never inspect what the weights mean; they only
//! call [`Candidate::evaluate`] and compare the scalar scores it returns.
//! Candidates are value-like: cached bests are always full clones, never
//! references into a structure that is later mutated in place.
//!
//! All stochastic operations take an explicit random number generator, so
//! runs are reproducible given a seeded generator such as `rand_pcg::Pcg64`.

pub use self::{
    candidate::{Candidate, ChoiceRank, Evaluation, WeightBound},
    record::IterationRecord,
    weights::ResampleSpan,
};

pub mod candidate;
pub mod record;
pub mod target;
pub mod weights;

/// Configuration errors reported by strategy constructors.
///
/// These fail fast at construction time, before any fitness evaluation
/// occurs.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// A genetic population needs at least two members to select parents.
    #[display("population size must be at least 2 (got {got})")]
    PopulationTooSmall {
        /// The rejected population size.
        got: usize,
    },
    /// A particle swarm needs at least one particle.
    #[display("swarm must contain at least one particle")]
    EmptySwarm,
    /// Annealing cannot start from a zero or negative temperature.
    #[display("initial temperature must be positive (got {got})")]
    NonPositiveTemperature {
        /// The rejected temperature.
        got: f64,
    },
    /// The geometric cooling ratio must lie strictly between 0 and 1.
    #[display("cooling rate must be in (0, 1) (got {got})")]
    InvalidCoolingRate {
        /// The rejected cooling rate.
        got: f64,
    },
}
