//! Particle swarm optimization over candidate weight vectors.
//!
//! Each particle is a candidate plus a velocity vector and a deep-copied
//! personal best; the swarm tracks one deep-copied global best. Per sweep,
//! every particle moves by
//!
//! ```text
//! velocity' = inertia * velocity
//!           + cognitive * (personal_best - weights)
//!           + social * (global_best - weights)
//! ```
//!
//! with every velocity component clamped to `[-momentum_limit,
//! +momentum_limit]` and the resulting position clamped back into the
//! weight bounds. A particle whose new fitness beats its personal best
//! replaces it, and a particle that beats the global best replaces it
//! immediately.
//!
//! # Global-best visibility
//!
//! Particles are updated sequentially within a sweep. Under the default
//! [`BestVisibility::Eager`] policy a particle's velocity update reads the
//! global best as of that moment, including improvements made by particles
//! earlier in the same sweep. [`BestVisibility::SweepStart`] instead
//! snapshots the guide weights once per sweep, which makes the sweep's
//! movement independent of particle order. Under both policies the stored
//! global best advances as soon as any particle improves on it, so early
//! termination and the returned candidate always reflect the true best.

use evotune_core::{Candidate, ConfigError, IterationRecord, weights};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// When particles observe improvements to the global best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BestVisibility {
    /// Velocity updates read the live global best, including improvements
    /// made earlier in the same sweep.
    #[default]
    Eager,
    /// Velocity updates read the global best as of the start of the sweep.
    SweepStart,
}

/// Configuration for [`ParticleSwarm`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwarmParams {
    /// Number of particles in the swarm. Must be at least 1.
    pub particle_count: usize,
    /// Inertia coefficient, the weight of the previous velocity.
    pub inertia: f64,
    /// Cognitive coefficient, the pull toward the personal best.
    pub cognitive: f64,
    /// Social coefficient, the pull toward the global best.
    pub social: f64,
    /// Elementwise velocity clamp.
    pub momentum_limit: f64,
    /// Global-best visibility policy within a sweep.
    pub visibility: BestVisibility,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            particle_count: 10,
            inertia: 0.6,
            cognitive: 0.15,
            social: 0.075,
            momentum_limit: 4.0,
            visibility: BestVisibility::default(),
        }
    }
}

/// One particle: a candidate, its velocity, and its personal best.
#[derive(Debug, Clone)]
pub struct Particle<C: Candidate> {
    candidate: C,
    velocity: Vec<f64>,
    best: C,
    best_fitness: f64,
}

impl<C: Candidate> Particle<C> {
    /// Returns the particle's current candidate.
    #[must_use]
    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    /// Returns the particle's current velocity.
    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Returns the fitness of the particle's personal best.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }
}

/// Swarm-based search tracking personal and global bests.
///
/// Randomness is used only to sample the initial particle positions; the
/// movement rule itself is deterministic, so the generator is borrowed at
/// construction rather than owned.
#[derive(Debug)]
pub struct ParticleSwarm<C: Candidate> {
    params: SwarmParams,
    particles: Vec<Particle<C>>,
    global_best: C,
    global_best_fitness: f64,
    history: Vec<IterationRecord<C::Choice>>,
}

impl<C: Candidate> ParticleSwarm<C> {
    /// Creates a swarm of randomly initialized particles.
    ///
    /// Every particle starts with a uniform weight sample, a zero velocity,
    /// and itself as its personal best; the global best is the fittest of
    /// the initial personal bests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySwarm`] if `params.particle_count` is
    /// zero.
    pub fn new<R>(prototype: C, params: SwarmParams, rng: &mut R) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        if params.particle_count < 1 {
            return Err(ConfigError::EmptySwarm);
        }
        let dimension = prototype.weight_bounds().len();
        let particles: Vec<Particle<C>> = (0..params.particle_count)
            .map(|_| {
                let mut candidate = prototype.clone();
                candidate.set_weights(weights::sample_uniform(prototype.weight_bounds(), rng));
                let fitness = candidate.evaluate().score;
                Particle {
                    best: candidate.clone(),
                    best_fitness: fitness,
                    velocity: vec![0.0; dimension],
                    candidate,
                }
            })
            .collect();
        let seed_best = particles
            .iter()
            .max_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
            .unwrap();
        let global_best = seed_best.best.clone();
        let global_best_fitness = seed_best.best_fitness;
        Ok(Self {
            params,
            particles,
            global_best,
            global_best_fitness,
            history: vec![],
        })
    }

    /// Runs up to `iterations` sweeps and returns the global best.
    ///
    /// Stops early once the global best's fitness reaches `target_fitness`
    /// (checked before each sweep). One [`IterationRecord`] is appended per
    /// completed sweep.
    pub fn iterate(&mut self, iterations: usize, target_fitness: Option<f64>) -> C {
        for _ in 0..iterations {
            if target_fitness.is_some_and(|target| self.global_best_fitness >= target) {
                break;
            }
            let guide = match self.params.visibility {
                BestVisibility::Eager => None,
                BestVisibility::SweepStart => Some(self.global_best.weights().to_vec()),
            };
            for index in 0..self.particles.len() {
                self.step_particle(index, guide.as_deref());
            }
            self.record_sweep();
        }
        self.global_best.clone()
    }

    /// Returns the swarm's particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle<C>] {
        &self.particles
    }

    /// Returns the fitness of the global best.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.global_best_fitness
    }

    /// Returns the per-sweep diagnostic history.
    #[must_use]
    pub fn history(&self) -> &[IterationRecord<C::Choice>] {
        &self.history
    }

    fn step_particle(&mut self, index: usize, guide: Option<&[f64]>) {
        // The eager guide borrows the live global best; no copy per step.
        let guide_weights: &[f64] = match guide {
            Some(snapshot) => snapshot,
            None => self.global_best.weights(),
        };

        let particle = &self.particles[index];
        let current = particle.candidate.weights();
        let personal = particle.best.weights();
        let mut velocity = Vec::with_capacity(current.len());
        let mut next = Vec::with_capacity(current.len());
        for d in 0..current.len() {
            let v = (self.params.inertia * particle.velocity[d]
                + self.params.cognitive * (personal[d] - current[d])
                + self.params.social * (guide_weights[d] - current[d]))
                .clamp(-self.params.momentum_limit, self.params.momentum_limit);
            velocity.push(v);
            next.push(current[d] + v);
        }
        weights::clamp(&mut next, particle.candidate.weight_bounds());

        let particle = &mut self.particles[index];
        particle.candidate.set_weights(next);
        particle.velocity = velocity;

        let fitness = self.particles[index].candidate.evaluate().score;
        if fitness > self.particles[index].best_fitness {
            let snapshot = self.particles[index].candidate.clone();
            let particle = &mut self.particles[index];
            particle.best = snapshot;
            particle.best_fitness = fitness;
        }
        if fitness > self.global_best_fitness {
            self.global_best = self.particles[index].candidate.clone();
            self.global_best_fitness = fitness;
        }
    }

    fn record_sweep(&mut self) {
        let evaluation = self.global_best.evaluate();
        let rank = evaluation
            .choice
            .as_ref()
            .map(|choice| self.global_best.rank_choice(choice));
        self.history
            .push(IterationRecord::from_evaluation(&evaluation, rank));
    }
}
