//! A reference evaluation context with a known optimum.
//!
//! [`TargetDistanceContext`] scores a weight vector by its negated squared
//! Euclidean distance to a fixed target point, so the global maximum is `0`
//! exactly at the target. It exists to exercise the search strategies end
//! to end against a fitness landscape whose answer is known, both in this
//! workspace's tests and as a smoke benchmark for new strategy variants.
//!
//! The "representative choice" of this context is the index of the weight
//! farthest from its target coordinate (the coordinate a tuner would adjust
//! next); [`Candidate::rank_choice`] ranks indices by their absolute error.

use std::sync::Arc;

use rand::Rng;

use crate::{
    candidate::{Candidate, ChoiceRank, Evaluation, WeightBound},
    weights,
};

/// A fixed target point with per-index bounds and labels.
///
/// Shared read-only by every candidate derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDistanceContext {
    target: Vec<f64>,
    bounds: Vec<WeightBound>,
    labels: Vec<String>,
}

impl TargetDistanceContext {
    /// Creates a context for the given target point and bounds.
    ///
    /// Labels default to `w0`, `w1`, ...
    ///
    /// # Panics
    ///
    /// Panics if `target` and `bounds` have different lengths.
    #[must_use]
    pub fn new(target: Vec<f64>, bounds: Vec<WeightBound>) -> Self {
        assert_eq!(target.len(), bounds.len());
        let labels = (0..target.len()).map(|i| format!("w{i}")).collect();
        Self {
            target,
            bounds,
            labels,
        }
    }

    /// Returns the target point.
    #[must_use]
    pub fn target(&self) -> &[f64] {
        &self.target
    }
}

/// A weight vector scored against a shared [`TargetDistanceContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDistanceCandidate {
    context: Arc<TargetDistanceContext>,
    weights: Vec<f64>,
}

impl TargetDistanceCandidate {
    /// Creates a candidate with uniformly sampled weights.
    #[must_use]
    pub fn random<R>(context: Arc<TargetDistanceContext>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let weights = weights::sample_uniform(&context.bounds, rng);
        Self { context, weights }
    }

    /// Creates a candidate with explicit weights.
    ///
    /// # Panics
    ///
    /// Panics if `weights` does not match the context dimension.
    #[must_use]
    pub fn with_weights(context: Arc<TargetDistanceContext>, weights: Vec<f64>) -> Self {
        assert_eq!(weights.len(), context.bounds.len());
        Self { context, weights }
    }

    /// Absolute distance of index `i` from its target coordinate.
    fn error(&self, i: usize) -> f64 {
        (self.weights[i] - self.context.target[i]).abs()
    }
}

impl Candidate for TargetDistanceCandidate {
    type Choice = usize;

    fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn set_weights(&mut self, weights: Vec<f64>) {
        assert_eq!(weights.len(), self.context.bounds.len());
        self.weights = weights;
    }

    fn weight_bounds(&self) -> &[WeightBound] {
        &self.context.bounds
    }

    fn weight_labels(&self) -> &[String] {
        &self.context.labels
    }

    fn evaluate(&self) -> Evaluation<usize> {
        // Zero-dimensional contexts have no alternatives: defined sentinel,
        // never a panic.
        if self.weights.is_empty() {
            return Evaluation {
                score: f64::NEG_INFINITY,
                choice: None,
                raw_score: 0.0,
            };
        }
        let squared_distance: f64 = self
            .weights
            .iter()
            .zip(&self.context.target)
            .map(|(w, t)| (w - t).powi(2))
            .sum();
        let choice =
            (0..self.weights.len()).max_by(|&a, &b| self.error(a).total_cmp(&self.error(b)));
        Evaluation {
            score: -squared_distance,
            choice,
            raw_score: squared_distance,
        }
    }

    fn rank_choice(&self, choice: &usize) -> ChoiceRank {
        let chosen_error = self.error(*choice);
        let rank = 1 + (0..self.weights.len())
            .filter(|&i| self.error(i) > chosen_error)
            .count();
        ChoiceRank {
            rank,
            alternatives: self.weights.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn context() -> Arc<TargetDistanceContext> {
        Arc::new(TargetDistanceContext::new(
            vec![7.0, 3.0],
            vec![WeightBound::new(0.0, 10.0), WeightBound::new(0.0, 10.0)],
        ))
    }

    #[test]
    fn test_score_is_zero_at_target() {
        let candidate = TargetDistanceCandidate::with_weights(context(), vec![7.0, 3.0]);
        let evaluation = candidate.evaluate();
        assert_eq!(evaluation.score, 0.0);
        assert_eq!(evaluation.raw_score, 0.0);
    }

    #[test]
    fn test_score_is_negated_squared_distance() {
        let candidate = TargetDistanceCandidate::with_weights(context(), vec![4.0, 7.0]);
        let evaluation = candidate.evaluate();
        assert_eq!(evaluation.score, -25.0);
        assert_eq!(evaluation.raw_score, 25.0);
    }

    #[test]
    fn test_choice_is_farthest_index() {
        let candidate = TargetDistanceCandidate::with_weights(context(), vec![6.0, 8.0]);
        let evaluation = candidate.evaluate();
        // |6-7| = 1 on index 0, |8-3| = 5 on index 1.
        assert_eq!(evaluation.choice, Some(1));
        let rank = candidate.rank_choice(&1);
        assert_eq!(rank.rank, 1);
        assert_eq!(rank.alternatives, 2);
        assert_eq!(candidate.rank_choice(&0).rank, 2);
    }

    #[test]
    fn test_random_candidate_within_bounds() {
        let mut rng = Pcg64::seed_from_u64(9);
        let context = context();
        for _ in 0..20 {
            let candidate = TargetDistanceCandidate::random(Arc::clone(&context), &mut rng);
            for (w, b) in candidate.weights().iter().zip(candidate.weight_bounds()) {
                assert!(*w >= b.lower && *w <= b.upper);
            }
        }
    }

    #[test]
    fn test_zero_dimensional_context_is_sentinel() {
        let context = Arc::new(TargetDistanceContext::new(vec![], vec![]));
        let candidate = TargetDistanceCandidate::with_weights(context, vec![]);
        let evaluation = candidate.evaluate();
        assert_eq!(evaluation.score, f64::NEG_INFINITY);
        assert_eq!(evaluation.choice, None);
    }

    #[test]
    fn test_labels_are_indexed() {
        let candidate = TargetDistanceCandidate::with_weights(context(), vec![0.0, 0.0]);
        assert_eq!(candidate.weight_labels().to_vec(), vec!["w0", "w1"]);
    }
}
