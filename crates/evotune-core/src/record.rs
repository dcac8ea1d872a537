//! Per-iteration diagnostic snapshots.

use serde::{Deserialize, Serialize};

use crate::candidate::{ChoiceRank, Evaluation};

/// Diagnostic snapshot appended once per generation / sweep / annealing
/// step.
///
/// The history built from these records is write-only from the strategies'
/// perspective: it exists for external reporting (convergence plots, logs)
/// and never feeds back into the strategies' control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord<M> {
    /// Scalar fitness of the recorded candidate.
    pub best_fitness: f64,
    /// The representative choice made under the recorded weights, if the
    /// context offered any alternatives.
    pub best_choice: Option<M>,
    /// The domain's internal raw score for the recorded choice.
    pub raw_score: f64,
    /// Rank of the recorded choice among all alternatives, when a choice
    /// exists.
    pub choice_rank: Option<ChoiceRank>,
}

impl<M: Clone> IterationRecord<M> {
    /// Builds a record from an evaluation and an optional choice rank.
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation<M>, choice_rank: Option<ChoiceRank>) -> Self {
        Self {
            best_fitness: evaluation.score,
            best_choice: evaluation.choice.clone(),
            raw_score: evaluation.raw_score,
            choice_rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_evaluation_copies_fields() {
        let evaluation = Evaluation {
            score: -4.5,
            choice: Some(2_usize),
            raw_score: 4.5,
        };
        let rank = ChoiceRank {
            rank: 1,
            alternatives: 3,
        };
        let record = IterationRecord::from_evaluation(&evaluation, Some(rank));
        assert_eq!(record.best_fitness, -4.5);
        assert_eq!(record.best_choice, Some(2));
        assert_eq!(record.raw_score, 4.5);
        assert_eq!(record.choice_rank, Some(rank));
    }

    #[test]
    fn test_record_serialization() {
        let record = IterationRecord {
            best_fitness: -1.0,
            best_choice: Some("e2e4".to_owned()),
            raw_score: 0.25,
            choice_rank: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: IterationRecord<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
