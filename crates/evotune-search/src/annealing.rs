//! Simulated annealing over a single candidate weight vector.
//!
//! The annealer explores local neighbors of one current candidate and
//! probabilistically accepts fitness-decreasing moves, cooling a geometric
//! temperature schedule until it reaches an effective zero
//! ([`TEMPERATURE_FLOOR`]). Each inner step:
//!
//! 1. samples a neighbor, drawing each weight uniformly within a window of
//!    `±1%` of its bound range around the current value, clamped to bounds
//! 2. evaluates the neighbor and records it as the best-ever if it strictly
//!    improves on that, independent of acceptance
//! 3. accepts the neighbor with probability
//!    [`acceptance_probability`]`(current, neighbor, temperature)`,
//!    otherwise reverts to the pre-step weights
//!
//! The run returns the best-ever observed candidate, not the final current
//! one: acceptance of worse moves is an exploration device and must not
//! leak into the returned optimum. The history records the (possibly
//! reverted) current state after every step.

use evotune_core::{Candidate, ConfigError, Evaluation, IterationRecord, weights};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The temperature below which a run is considered converged.
pub const TEMPERATURE_FLOOR: f64 = 1e-100;

/// Fraction of each index's bound range used as the neighbor window.
pub const NEIGHBOR_FRACTION: f64 = 0.01;

/// Configuration for [`SimulatedAnnealing`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingParams {
    /// Starting temperature. Must be positive.
    pub initial_temperature: f64,
    /// Geometric cooling ratio applied after each batch of inner
    /// iterations. Must lie strictly between 0 and 1.
    pub cooling_rate: f64,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            cooling_rate: 0.95,
        }
    }
}

/// Metropolis acceptance probability for a candidate move.
///
/// Exactly `1` when the neighbor is at least as fit as the current
/// solution; otherwise `exp((neighbor - current) / temperature)`, which
/// strictly decreases as the temperature falls for a fixed fitness gap.
#[must_use]
pub fn acceptance_probability(current: f64, neighbor: f64, temperature: f64) -> f64 {
    if neighbor > current {
        1.0
    } else {
        ((neighbor - current) / temperature).exp()
    }
}

/// Single-candidate annealing search.
#[derive(Debug)]
pub struct SimulatedAnnealing<C: Candidate, R: Rng> {
    params: AnnealingParams,
    current: C,
    current_evaluation: Evaluation<C::Choice>,
    temperature: f64,
    best: C,
    best_fitness: f64,
    history: Vec<IterationRecord<C::Choice>>,
    rng: R,
}

impl<C: Candidate, R: Rng> SimulatedAnnealing<C, R> {
    /// Creates an annealer from a randomly initialized candidate.
    ///
    /// The initial fitness is evaluated once at construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveTemperature`] if
    /// `params.initial_temperature` is not a positive number, and
    /// [`ConfigError::InvalidCoolingRate`] if `params.cooling_rate` is
    /// outside `(0, 1)`.
    pub fn new(prototype: C, params: AnnealingParams, mut rng: R) -> Result<Self, ConfigError> {
        if params.initial_temperature.is_nan() || params.initial_temperature <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature {
                got: params.initial_temperature,
            });
        }
        if params.cooling_rate.is_nan() || params.cooling_rate <= 0.0 || params.cooling_rate >= 1.0
        {
            return Err(ConfigError::InvalidCoolingRate {
                got: params.cooling_rate,
            });
        }
        let mut current = prototype.clone();
        current.set_weights(weights::sample_uniform(prototype.weight_bounds(), &mut rng));
        let current_evaluation = current.evaluate();
        let best = current.clone();
        let best_fitness = current_evaluation.score;
        Ok(Self {
            temperature: params.initial_temperature,
            params,
            current,
            current_evaluation,
            best,
            best_fitness,
            history: vec![],
            rng,
        })
    }

    /// Anneals to convergence and returns the best-ever observed candidate.
    ///
    /// Runs `iterations_per_temperature` inner steps per temperature level,
    /// cooling geometrically until [`TEMPERATURE_FLOOR`] is passed, or stops
    /// early once the best-ever fitness reaches `target_fitness` (checked
    /// before every inner step). One [`IterationRecord`] of the current
    /// state is appended per inner step.
    pub fn anneal(&mut self, iterations_per_temperature: usize, target_fitness: Option<f64>) -> C {
        'cooling: while self.temperature >= TEMPERATURE_FLOOR {
            for _ in 0..iterations_per_temperature {
                if target_fitness.is_some_and(|target| self.best_fitness >= target) {
                    break 'cooling;
                }
                self.step();
            }
            self.temperature *= self.params.cooling_rate;
        }
        self.best.clone()
    }

    /// Returns the current temperature.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Returns the best-ever observed fitness.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Returns the per-step diagnostic history.
    #[must_use]
    pub fn history(&self) -> &[IterationRecord<C::Choice>] {
        &self.history
    }

    fn step(&mut self) {
        let previous_weights = self.current.weights().to_vec();
        let neighbor_weights = weights::neighbor(
            &previous_weights,
            self.current.weight_bounds(),
            NEIGHBOR_FRACTION,
            &mut self.rng,
        );
        self.current.set_weights(neighbor_weights);
        let neighbor_evaluation = self.current.evaluate();

        // Best-ever tracking is independent of acceptance below.
        if neighbor_evaluation.score > self.best_fitness {
            self.best = self.current.clone();
            self.best_fitness = neighbor_evaluation.score;
        }

        let probability = acceptance_probability(
            self.current_evaluation.score,
            neighbor_evaluation.score,
            self.temperature,
        );
        let draw: f64 = self.rng.random_range(0.0..=1.0);
        if draw <= probability {
            self.current_evaluation = neighbor_evaluation;
        } else {
            self.current.set_weights(previous_weights);
        }

        let rank = self
            .current_evaluation
            .choice
            .as_ref()
            .map(|choice| self.current.rank_choice(choice));
        self.history
            .push(IterationRecord::from_evaluation(&self.current_evaluation, rank));
    }
}
