//! Derivative-free search strategies for calibrating scoring weights.
//!
//! This crate implements three interchangeable strategies that tune a
//! bounded weight vector so the decisions of a pluggable scoring function
//! track a trusted reference signal. All three drive the same
//! [`Candidate`](evotune_core::Candidate) contract and never inspect what
//! the weights mean; they only compare the scalar fitness the candidate
//! reports.
//!
//! # Strategies
//!
//! - [`genetic::GeneticAlgorithm`] - population-based evolutionary search:
//!   elitist selection, uniform gene-wise crossover, and full-resample
//!   mutation, generation by generation.
//! - [`swarm::ParticleSwarm`] - particle-swarm search: velocity-biased
//!   movement toward per-particle and swarm-wide bests, with an explicit
//!   global-best visibility policy.
//! - [`annealing::SimulatedAnnealing`] - single-candidate local search with
//!   Metropolis acceptance and a geometric cooling schedule.
//!
//! # Shared surface
//!
//! Each strategy is constructed from a prototype candidate (already bound
//! to its evaluation context), a parameter struct, and a random number
//! generator; construction validates the configuration and fails fast
//! before any fitness evaluation. The run method takes an iteration
//! budget and an optional target fitness, returns the best candidate found,
//! and appends one [`IterationRecord`](evotune_core::IterationRecord) per
//! iteration to a history the caller can read for reporting. The history
//! never feeds back into the strategies' decisions.
//!
//! Execution is single-threaded and synchronous: fitness evaluations happen
//! strictly sequentially within a generation or sweep, so results are
//! reproducible given a seeded generator.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use evotune_core::{
//!     Candidate as _, WeightBound,
//!     target::{TargetDistanceCandidate, TargetDistanceContext},
//! };
//! use evotune_search::genetic::{GeneticAlgorithm, GeneticParams};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//!
//! let context = Arc::new(TargetDistanceContext::new(
//!     vec![7.0, 3.0],
//!     vec![WeightBound::new(0.0, 10.0), WeightBound::new(0.0, 10.0)],
//! ));
//! let mut rng = Pcg64::seed_from_u64(42);
//! let prototype = TargetDistanceCandidate::random(context, &mut rng);
//!
//! let mut ga = GeneticAlgorithm::new(prototype, GeneticParams::default(), rng).unwrap();
//! let best = ga.evolve(50, None);
//! assert!(best.evaluate().score > ga.history().first().unwrap().best_fitness - 1e-9);
//! ```

pub mod annealing;
pub mod genetic;
pub mod swarm;
