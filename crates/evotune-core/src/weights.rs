//! Weight vector operations shared by the search strategies.
//!
//! These free functions implement the stochastic moves every strategy makes
//! over bounded weight vectors:
//!
//! - [`sample_uniform`]: independent uniform initialization within bounds
//! - [`uniform_cross`]: uniform gene-wise crossover (genetic algorithm)
//! - [`resample`]: full resample of a random index subset (mutation)
//! - [`neighbor`]: a bounded local perturbation window (annealing)
//! - [`clamp`]: elementwise projection back into bounds (swarm movement)
//!
//! Every function takes an explicit random number generator and upholds the
//! bounds invariant: the produced values always lie within each index's
//! inclusive bound pair, including the degenerate zero-width case where
//! sampling collapses to the fixed value.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::candidate::WeightBound;

/// How many weight indices a mutation resamples.
///
/// The subset size is an explicit policy knob rather than a hard-coded
/// count; [`ResampleSpan::count`] converts the policy into a concrete
/// number of indices for a given vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleSpan {
    /// Resample exactly one index.
    Single,
    /// Resample exactly `n` indices (capped at the vector length).
    Fixed(usize),
    /// Resample one third of the indices, rounded down, at least one.
    #[default]
    ThirdOfLength,
}

impl ResampleSpan {
    /// Returns the number of indices to resample for a vector of `len`
    /// weights. Always at most `len`, and zero only when `len` is zero.
    #[must_use]
    pub fn count(self, len: usize) -> usize {
        let wanted = match self {
            Self::Single => 1,
            Self::Fixed(n) => n,
            Self::ThirdOfLength => (len / 3).max(1),
        };
        wanted.min(len)
    }
}

/// Draws one value uniformly within a bound, degenerating to the fixed
/// value for zero-width bounds.
fn sample_bound<R>(bound: &WeightBound, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    if bound.width() > 0.0 {
        rng.random_range(bound.lower..=bound.upper)
    } else {
        bound.lower
    }
}

/// Samples a fresh weight vector, each index uniform within its bound.
pub fn sample_uniform<R>(bounds: &[WeightBound], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    bounds.iter().map(|b| sample_bound(b, rng)).collect()
}

/// Performs uniform gene-wise crossover between two parent vectors.
///
/// Each child value is one parent's value at that index, chosen by a fair
/// coin; values are never blended.
///
/// # Panics
///
/// Panics if the parent vectors have different lengths.
pub fn uniform_cross<R>(p1: &[f64], p2: &[f64], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    (0..p1.len())
        .map(|i| if rng.random_bool(0.5) { p1[i] } else { p2[i] })
        .collect()
}

/// Resamples a random subset of indices uniformly within their bounds.
///
/// The subset size follows `span`; selected indices receive a fresh uniform
/// draw (a full resample, not a perturbation), unselected indices are left
/// untouched.
///
/// # Panics
///
/// Panics if `weights` and `bounds` have different lengths.
pub fn resample<R>(weights: &mut [f64], bounds: &[WeightBound], span: ResampleSpan, rng: &mut R)
where
    R: Rng + ?Sized,
{
    assert_eq!(weights.len(), bounds.len());
    if weights.is_empty() {
        return;
    }
    let count = span.count(weights.len());
    for i in rand::seq::index::sample(rng, weights.len(), count) {
        weights[i] = sample_bound(&bounds[i], rng);
    }
}

/// Samples a neighbor of `weights` within a per-index window.
///
/// Each index is drawn uniformly from a window of `± fraction * width`
/// around its current value, intersected with the index's bounds. A
/// zero-width bound yields the fixed value unchanged.
///
/// # Panics
///
/// Panics if `weights` and `bounds` have different lengths.
pub fn neighbor<R>(weights: &[f64], bounds: &[WeightBound], fraction: f64, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    assert_eq!(weights.len(), bounds.len());
    (0..weights.len())
        .map(|i| {
            let bound = &bounds[i];
            let window = fraction * bound.width();
            let lower = (weights[i] - window).max(bound.lower);
            let upper = (weights[i] + window).min(bound.upper);
            if upper > lower {
                rng.random_range(lower..=upper)
            } else {
                lower
            }
        })
        .collect()
}

/// Clamps every element into its index's bound.
///
/// # Panics
///
/// Panics if `weights` and `bounds` have different lengths.
pub fn clamp(weights: &mut [f64], bounds: &[WeightBound]) {
    assert_eq!(weights.len(), bounds.len());
    for (w, bound) in weights.iter_mut().zip(bounds) {
        *w = bound.clamp(*w);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn bounds() -> Vec<WeightBound> {
        vec![
            WeightBound::new(0.0, 10.0),
            WeightBound::new(-5.0, 5.0),
            WeightBound::new(100.0, 1000.0),
        ]
    }

    #[test]
    fn test_sample_uniform_respects_bounds() {
        let mut rng = Pcg64::seed_from_u64(1);
        let bounds = bounds();
        for _ in 0..100 {
            let weights = sample_uniform(&bounds, &mut rng);
            assert_eq!(weights.len(), bounds.len());
            for (w, b) in weights.iter().zip(&bounds) {
                assert!(*w >= b.lower && *w <= b.upper);
            }
        }
    }

    #[test]
    fn test_sample_uniform_zero_width_bound() {
        let mut rng = Pcg64::seed_from_u64(2);
        let bounds = vec![WeightBound::new(3.0, 3.0)];
        assert_eq!(sample_uniform(&bounds, &mut rng), vec![3.0]);
    }

    #[test]
    fn test_resample_span_counts() {
        assert_eq!(ResampleSpan::Single.count(9), 1);
        assert_eq!(ResampleSpan::Fixed(3).count(9), 3);
        assert_eq!(ResampleSpan::Fixed(30).count(9), 9);
        assert_eq!(ResampleSpan::ThirdOfLength.count(9), 3);
        assert_eq!(ResampleSpan::ThirdOfLength.count(2), 1);
        assert_eq!(ResampleSpan::ThirdOfLength.count(0), 0);
    }

    #[test]
    fn test_resample_changes_only_subset_and_stays_in_bounds() {
        let mut rng = Pcg64::seed_from_u64(3);
        let bounds = bounds();
        for _ in 0..50 {
            let original = sample_uniform(&bounds, &mut rng);
            let mut mutated = original.clone();
            resample(&mut mutated, &bounds, ResampleSpan::Single, &mut rng);

            let changed = original
                .iter()
                .zip(&mutated)
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1, "Single span resampled {changed} indices");
            for (w, b) in mutated.iter().zip(&bounds) {
                assert!(*w >= b.lower && *w <= b.upper);
            }
        }
    }

    #[test]
    fn test_neighbor_stays_within_window_and_bounds() {
        let mut rng = Pcg64::seed_from_u64(4);
        let bounds = bounds();
        let weights = vec![0.0, 5.0, 550.0];
        for _ in 0..100 {
            let next = neighbor(&weights, &bounds, 0.01, &mut rng);
            for i in 0..weights.len() {
                let window = 0.01 * bounds[i].width();
                assert!((next[i] - weights[i]).abs() <= window + 1e-12);
                assert!(next[i] >= bounds[i].lower && next[i] <= bounds[i].upper);
            }
        }
    }

    #[test]
    fn test_neighbor_zero_width_bound_is_fixed() {
        let mut rng = Pcg64::seed_from_u64(5);
        let bounds = vec![WeightBound::new(2.0, 2.0)];
        assert_eq!(neighbor(&[2.0], &bounds, 0.01, &mut rng), vec![2.0]);
    }

    #[test]
    fn test_clamp_projects_into_bounds() {
        let bounds = bounds();
        let mut weights = vec![-1.0, 6.0, 500.0];
        clamp(&mut weights, &bounds);
        assert_eq!(weights, vec![0.0, 5.0, 500.0]);
    }
}
