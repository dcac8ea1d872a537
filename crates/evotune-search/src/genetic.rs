//! Genetic algorithm over candidate weight vectors.
//!
//! The algorithm maintains a fixed-size population of candidates sharing
//! one evaluation context and rebuilds it wholesale each generation:
//!
//! 1. **Evaluate** - every candidate's fitness is computed sequentially
//! 2. **Sort** - the population is stable-sorted by fitness, descending
//! 3. **Elitism** - the top half survives unchanged and acts as the parent
//!    pool
//! 4. **Reproduction** - children are produced by uniform gene-wise
//!    crossover between two distinct parents drawn uniformly at random
//!    (population sizes 2 and 3 leave a single-member parent pool, so
//!    their children are self-crossovers of the best individual)
//! 5. **Mutation** - each fresh child is mutated with probability
//!    `mutation_rate` by fully resampling a random index subset
//!    (see [`ResampleSpan`])
//!
//! Evolution stops after the generation budget, or early as soon as the
//! generation's best fitness reaches the optional target. With a zero
//! mutation rate the per-generation best fitness is non-decreasing, since
//! elites are carried over unchanged.
//!
//! Population statistics ([`GeneticAlgorithm::fitness_stats`],
//! [`GeneticAlgorithm::weight_stats`]) summarize convergence and diversity
//! for external reporting.

use evotune_core::{Candidate, ConfigError, Evaluation, IterationRecord, ResampleSpan, weights};
use evotune_stats::DescriptiveStats;
use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

/// Configuration for [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    /// Number of candidates per generation. Must be at least 2.
    ///
    /// The parent pool is the top `population_size / 2` individuals, so
    /// sizes 2 and 3 degenerate to a single parent whose children are
    /// self-crossovers; crossover only mixes genes from size 4 upward.
    pub population_size: usize,
    /// Probability that a freshly produced child is mutated, in `[0, 1]`.
    pub mutation_rate: f64,
    /// How many weight indices a mutation resamples.
    pub resample_span: ResampleSpan,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 20,
            mutation_rate: 0.3,
            resample_span: ResampleSpan::default(),
        }
    }
}

/// A single candidate plus its most recent evaluation.
#[derive(Debug, Clone)]
pub struct Individual<C: Candidate> {
    candidate: C,
    evaluation: Evaluation<C::Choice>,
}

impl<C: Candidate> Individual<C> {
    /// Wraps a candidate that has not been evaluated yet.
    fn unevaluated(candidate: C) -> Self {
        Self {
            candidate,
            evaluation: Evaluation {
                score: f64::MIN,
                choice: None,
                raw_score: 0.0,
            },
        }
    }

    /// Returns the wrapped candidate.
    #[must_use]
    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    /// Returns the fitness from the most recent evaluation.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.evaluation.score
    }
}

/// Population-based evolutionary search.
///
/// Constructed from a prototype candidate whose context every population
/// member shares; each member starts from an independent uniform sample
/// within the weight bounds.
#[derive(Debug)]
pub struct GeneticAlgorithm<C: Candidate, R: Rng> {
    params: GeneticParams,
    population: Vec<Individual<C>>,
    history: Vec<IterationRecord<C::Choice>>,
    rng: R,
}

impl<C: Candidate, R: Rng> GeneticAlgorithm<C, R> {
    /// Creates an algorithm with a randomly initialized population.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PopulationTooSmall`] if
    /// `params.population_size < 2`.
    ///
    /// # Panics
    ///
    /// Panics if `params.mutation_rate` is outside `[0, 1]`.
    pub fn new(prototype: C, params: GeneticParams, mut rng: R) -> Result<Self, ConfigError> {
        if params.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                got: params.population_size,
            });
        }
        assert!(
            (0.0..=1.0).contains(&params.mutation_rate),
            "mutation rate must be in [0, 1]"
        );
        let population = (0..params.population_size)
            .map(|_| {
                let mut candidate = prototype.clone();
                candidate.set_weights(weights::sample_uniform(prototype.weight_bounds(), &mut rng));
                Individual::unevaluated(candidate)
            })
            .collect();
        Ok(Self {
            params,
            population,
            history: vec![],
            rng,
        })
    }

    /// Evolves the population and returns the best candidate of the final
    /// (or early-terminating) generation.
    ///
    /// Runs for `generations` generations, or stops early as soon as the
    /// best fitness of an evaluated generation reaches `target_fitness`.
    /// One [`IterationRecord`] is appended per evaluated generation. When
    /// the call returns, the held population is the final generation,
    /// fully evaluated and sorted best-first, so [`population`],
    /// [`fitness_stats`], and [`weight_stats`] describe exactly what the
    /// returned candidate was selected from.
    ///
    /// [`population`]: GeneticAlgorithm::population
    /// [`fitness_stats`]: GeneticAlgorithm::fitness_stats
    /// [`weight_stats`]: GeneticAlgorithm::weight_stats
    pub fn evolve(&mut self, generations: usize, target_fitness: Option<f64>) -> C {
        self.evaluate_and_sort();
        for generation in 0..generations {
            if generation > 0 {
                self.reproduce();
                self.evaluate_and_sort();
            }
            let best_fitness = self.record_generation();
            if target_fitness.is_some_and(|target| best_fitness >= target) {
                break;
            }
        }
        self.population[0].candidate.clone()
    }

    /// Returns the current population, best-first after an evaluation.
    #[must_use]
    pub fn population(&self) -> &[Individual<C>] {
        &self.population
    }

    /// Returns the per-generation diagnostic history.
    #[must_use]
    pub fn history(&self) -> &[IterationRecord<C::Choice>] {
        &self.history
    }

    /// Computes fitness statistics across the population.
    #[must_use]
    pub fn fitness_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.population.iter().map(Individual::fitness)).unwrap()
    }

    /// Computes per-index weight statistics across the population, a
    /// diversity measure for convergence reporting.
    #[must_use]
    pub fn weight_stats(&self) -> Vec<DescriptiveStats> {
        let dimension = self.population[0].candidate.weights().len();
        (0..dimension)
            .map(|i| {
                let values = self.population.iter().map(|ind| ind.candidate.weights()[i]);
                DescriptiveStats::new(values).unwrap()
            })
            .collect()
    }

    fn evaluate_and_sort(&mut self) {
        for individual in &mut self.population {
            individual.evaluation = individual.candidate.evaluate();
        }
        // Stable sort keeps the pre-sort order among equal scores.
        self.population
            .sort_by(|a, b| b.evaluation.score.total_cmp(&a.evaluation.score));
    }

    fn record_generation(&mut self) -> f64 {
        let best = &self.population[0];
        let rank = best
            .evaluation
            .choice
            .as_ref()
            .map(|choice| best.candidate.rank_choice(choice));
        self.history
            .push(IterationRecord::from_evaluation(&best.evaluation, rank));
        best.evaluation.score
    }

    fn reproduce(&mut self) {
        let parent_count = self.params.population_size / 2;
        let mut next: Vec<Individual<C>> = self.population[..parent_count].to_vec();
        while next.len() < self.params.population_size {
            let parents = &self.population[..parent_count];
            // Two distinct parents per child, except for the degenerate
            // single-parent pool of population sizes 2 and 3.
            let pair: Vec<&Individual<C>> = parents.choose_multiple(&mut self.rng, 2).collect();
            let (p1, p2) = (pair[0], pair.get(1).copied().unwrap_or(pair[0]));
            let mut child = p1.candidate.crossover(&p2.candidate, &mut self.rng);
            if self.rng.random_bool(self.params.mutation_rate) {
                let mut child_weights = child.weights().to_vec();
                let bounds = child.weight_bounds().to_vec();
                weights::resample(
                    &mut child_weights,
                    &bounds,
                    self.params.resample_span,
                    &mut self.rng,
                );
                child.set_weights(child_weights);
            }
            next.push(Individual::unevaluated(child));
        }
        self.population = next;
    }
}
