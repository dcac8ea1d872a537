//! The candidate contract consumed by every search strategy.
//!
//! A [`Candidate`] couples one bounded weight vector with one read-only
//! evaluation context supplied by the embedding domain (a game position, a
//! scoring benchmark, ...). The search strategies in `evotune-search` drive
//! the contract without ever interpreting the weights: they sample and move
//! weight vectors through [`Candidate::set_weights`], score them through
//! [`Candidate::evaluate`], and compare the resulting scalar fitness.
//!
//! # Contract requirements
//!
//! - `evaluate` must be deterministic given the weights and the context.
//!   Higher scores are better.
//! - Every weight handed to `set_weights` by the strategies respects the
//!   per-index bounds reported by `weight_bounds`; implementations may rely
//!   on this.
//! - A context with zero available alternatives is degenerate but valid:
//!   `evaluate` must return a defined sentinel [`Evaluation`] (no choice,
//!   a well-ordered score such as `f64::NEG_INFINITY`) rather than panic.
//! - Cloning must produce an independent weight vector. Strategies cache
//!   personal/global bests as clones and assume no aliasing.

use std::fmt::Debug;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Inclusive bounds for one weight index.
///
/// Bounds are fixed metadata of the evaluation-context type, not of any
/// individual weight vector. A zero-width bound (`lower == upper`) is legal;
/// sampling within it degenerates to the fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBound {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

impl WeightBound {
    /// Creates a bound pair.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(lower <= upper, "invalid bound: {lower} > {upper}");
        Self { lower, upper }
    }

    /// Returns the width of the bounded range.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Clamps a value into this bound.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// Result of one fitness evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<M> {
    /// Scalar fitness; higher is better.
    pub score: f64,
    /// The representative choice made under the current weights, or `None`
    /// when the context offers no alternatives.
    pub choice: Option<M>,
    /// The domain's internal raw score for the chosen alternative.
    /// Diagnostic only; never compared by the strategies.
    pub raw_score: f64,
}

/// Diagnostic rank of a choice among all alternatives in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRank {
    /// 1-based rank of the choice (1 = best).
    pub rank: usize,
    /// Total number of alternatives in the context.
    pub alternatives: usize,
}

/// A weight vector bound to a fixed evaluation context.
///
/// Implementations are value-like: cloning yields an independent candidate
/// sharing the same read-only context. See the module docs for the full
/// contract.
pub trait Candidate: Clone {
    /// The domain's representative-choice type (a move, a pick, ...).
    type Choice: Clone + Debug;

    /// Returns a snapshot of the current weight vector.
    fn weights(&self) -> &[f64];

    /// Replaces the weight vector wholesale.
    ///
    /// Callers guarantee that `weights` has the contract dimension and that
    /// every element respects the matching index's bounds.
    fn set_weights(&mut self, weights: Vec<f64>);

    /// Returns the fixed per-index bounds of the context type.
    fn weight_bounds(&self) -> &[WeightBound];

    /// Returns the fixed human-readable label for each weight index.
    fn weight_labels(&self) -> &[String];

    /// Scores the current weight vector against the context.
    fn evaluate(&self) -> Evaluation<Self::Choice>;

    /// Ranks a choice among all alternatives in the context.
    ///
    /// Diagnostic only; the strategies record ranks in their iteration
    /// history but never feed them back into control flow.
    fn rank_choice(&self, choice: &Self::Choice) -> ChoiceRank;

    /// Produces a child candidate by uniform gene-wise crossover.
    ///
    /// For each weight index the child's value is drawn uniformly from the
    /// two parents' values at that index (never a blend). The child shares
    /// this candidate's context.
    fn crossover<R>(&self, other: &Self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let child_weights = weights::uniform_cross(self.weights(), other.weights(), rng);
        let mut child = self.clone();
        child.set_weights(child_weights);
        child
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::target::{TargetDistanceCandidate, TargetDistanceContext};

    fn bowl() -> TargetDistanceCandidate {
        let context = TargetDistanceContext::new(
            vec![7.0, 3.0],
            vec![WeightBound::new(0.0, 10.0), WeightBound::new(0.0, 10.0)],
        );
        TargetDistanceCandidate::with_weights(context.into(), vec![1.0, 2.0])
    }

    #[test]
    fn test_bound_width_and_clamp() {
        let bound = WeightBound::new(-2.0, 4.0);
        assert_eq!(bound.width(), 6.0);
        assert_eq!(bound.clamp(5.0), 4.0);
        assert_eq!(bound.clamp(-3.0), -2.0);
        assert_eq!(bound.clamp(0.5), 0.5);
    }

    #[test]
    #[should_panic(expected = "invalid bound")]
    fn test_bound_rejects_inverted_range() {
        let _ = WeightBound::new(1.0, 0.0);
    }

    #[test]
    fn test_crossover_takes_genes_from_either_parent() {
        let mut rng = Pcg64::seed_from_u64(7);
        let parent_a = bowl();
        let mut parent_b = parent_a.clone();
        parent_b.set_weights(vec![9.0, 8.0]);

        for _ in 0..50 {
            let child = parent_a.crossover(&parent_b, &mut rng);
            for (i, value) in child.weights().iter().enumerate() {
                assert!(
                    *value == parent_a.weights()[i] || *value == parent_b.weights()[i],
                    "gene {i} is {value}, found in neither parent"
                );
            }
        }
    }

    #[test]
    fn test_crossover_preserves_context() {
        let mut rng = Pcg64::seed_from_u64(11);
        let parent_a = bowl();
        let mut parent_b = parent_a.clone();
        parent_b.set_weights(vec![0.0, 10.0]);

        let child = parent_a.crossover(&parent_b, &mut rng);
        assert_eq!(child.weight_bounds(), parent_a.weight_bounds());
        assert_eq!(child.weight_labels(), parent_a.weight_labels());
    }

    #[test]
    fn test_choice_rank_serialization() {
        let rank = ChoiceRank {
            rank: 2,
            alternatives: 5,
        };
        let json = serde_json::to_string(&rank).unwrap();
        assert_eq!(json, r#"{"rank":2,"alternatives":5}"#);
        let back: ChoiceRank = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rank);
    }
}
