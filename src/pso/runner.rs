//! PSO execution loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use rayon::prelude::*;

use super::config::PsoContext;
use super::types::{Particle, SwarmState};
use crate::error::ConfigError;
use crate::monitoring::{StateChangeHandler, StateChangeListener};

/// Callback receiving [`SwarmState`] events on the listener thread.
pub type SwarmHandler = StateChangeHandler<SwarmState>;

/// One swarm slot: the particle plus its personal-best bookkeeping.
///
/// Exclusively owned by one worker during a round; only the global best is
/// shared.
struct SwarmMember<P: Particle> {
    particle: P,
    personal_best: P,
    personal_best_fitness: f64,
}

/// Executes the Particle Swarm search.
///
/// Construction evaluates every particle once and seeds the personal and
/// global bests; [`optimize`](Self::optimize) then runs up to
/// `max_iterations` rounds, updating all particles in parallel. Workers
/// read the current global best without exclusion while computing their
/// social pull (iteration-stale guidance is tolerated, as standard PSO
/// does); only the global-best compare-and-update is serialized, and an
/// atomic fitness watermark keeps the common no-improvement case lock-free.
pub struct ParticleSwarm<P, F>
where
    P: Particle,
    F: Fn(&P) -> f64 + Sync,
{
    ctx: PsoContext,
    fitness: F,
    swarm: Vec<SwarmMember<P>>,
    global_best: RwLock<P>,
    /// Bit pattern of the global best fitness; monotone non-increasing,
    /// written only under the `global_best` write lock.
    global_best_fitness: AtomicU64,
    listener: StateChangeListener<SwarmState>,
}

impl<P, F> ParticleSwarm<P, F>
where
    P: Particle,
    F: Fn(&P) -> f64 + Sync,
{
    /// Builds an engine without progress reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySwarm`] when `initial_swarm` is empty.
    pub fn new(ctx: PsoContext, fitness: F, initial_swarm: Vec<P>) -> Result<Self, ConfigError> {
        Self::with_handler(ctx, fitness, initial_swarm, None)
    }

    /// Builds an engine that reports progress to `handler`.
    ///
    /// Every particle is evaluated once: its personal best is seeded with
    /// its initial position, and the global best is the fittest particle
    /// of this pass (ties broken by first seen).
    pub fn with_handler(
        ctx: PsoContext,
        fitness: F,
        initial_swarm: Vec<P>,
        handler: Option<SwarmHandler>,
    ) -> Result<Self, ConfigError> {
        if initial_swarm.is_empty() {
            return Err(ConfigError::EmptySwarm);
        }

        let listener = StateChangeListener::spawn(handler);
        listener.post(SwarmState {
            iteration: 0,
            global_best_fitness: f64::INFINITY,
            last_global_best_fitness: f64::INFINITY,
            message: format!("initialize swarm with {} particles", initial_swarm.len()),
        });

        let mut global_best = initial_swarm[0].clone();
        let mut global_best_fitness = f64::INFINITY;

        let swarm = initial_swarm
            .into_iter()
            .map(|particle| {
                let fit = fitness(&particle);
                if fit < global_best_fitness {
                    global_best_fitness = fit;
                    global_best = particle.clone();
                }
                SwarmMember {
                    personal_best: particle.clone(),
                    personal_best_fitness: fit,
                    particle,
                }
            })
            .collect();

        Ok(Self {
            ctx,
            fitness,
            swarm,
            global_best: RwLock::new(global_best),
            global_best_fitness: AtomicU64::new(global_best_fitness.to_bits()),
            listener,
        })
    }

    /// Runs the swarm to completion or early stop.
    ///
    /// Intended to be called once per engine. Returns only after the
    /// listener thread has drained every posted event and exited; a panic
    /// in the handler is re-raised here.
    pub fn optimize(&mut self) {
        self.listener.post(SwarmState {
            iteration: 0,
            global_best_fitness: self.global_best_fitness(),
            last_global_best_fitness: self.global_best_fitness(),
            message: format!(
                "initialized swarm with global best fitness {:.5}",
                self.global_best_fitness()
            ),
        });

        let mut persistence_count = 0u32;

        for iteration in 0..self.ctx.max_iterations() {
            let last = self.global_best_fitness();

            self.advance_round(iteration);

            let current = self.global_best_fitness();
            if current < last {
                let improvement = current / last - 1.0;
                self.listener.post(SwarmState {
                    iteration,
                    global_best_fitness: current,
                    last_global_best_fitness: last,
                    message: format!("improvement: {:.6}%", 100.0 * improvement),
                });
            }

            if let Some(threshold) = self.ctx.variation_threshold() {
                let variation = (current - last).abs();
                if variation < threshold {
                    persistence_count += 1;
                    if persistence_count >= self.ctx.variation_persistence() {
                        self.listener.post(SwarmState {
                            iteration,
                            global_best_fitness: current,
                            last_global_best_fitness: last,
                            message: "early stop due to variation threshold".into(),
                        });
                        break;
                    }
                } else {
                    // The stall must be consecutive to count.
                    persistence_count = 0;
                }
            }
        }

        self.listener.finish();
        self.listener.join();
    }

    /// One synchronized round: every particle advances in parallel.
    fn advance_round(&mut self, iteration: u32) {
        let ctx = &self.ctx;
        let fitness = &self.fitness;
        let global_best = &self.global_best;
        let watermark = &self.global_best_fitness;
        let listener = &self.listener;

        self.swarm.par_iter_mut().for_each(|member| {
            let mut rng = rand::rng();

            // Velocity: inertia plus cognitive and social pulls. The social
            // guide is read shared; it may change mid-round under a
            // concurrent write, which standard PSO tolerates.
            let cognitive =
                member
                    .particle
                    .component(&member.personal_best, ctx.cognitive_weight(), &mut rng);
            let social = {
                let guide = global_best.read().unwrap();
                member
                    .particle
                    .component(&guide, ctx.social_weight(), &mut rng)
            };

            let velocity: Vec<f64> = member
                .particle
                .velocity()
                .iter()
                .zip(cognitive.iter().zip(&social))
                .map(|(v, (c, s))| ctx.inertia_weight() * v + c + s)
                .collect();

            member.particle.set_velocity(velocity);
            member.particle.update_position();

            let fit = fitness(&member.particle);
            if fit < member.personal_best_fitness {
                member.personal_best.assign(&member.particle);
                member.personal_best_fitness = fit;

                // Watermark pre-check: no lock unless this is a real
                // improvement over the last published global best.
                if fit < f64::from_bits(watermark.load(Ordering::Acquire)) {
                    let mut best = global_best.write().unwrap();

                    // Re-check under the lock; another worker may have won.
                    let previous = f64::from_bits(watermark.load(Ordering::Acquire));
                    if fit < previous {
                        watermark.store(fit.to_bits(), Ordering::Release);
                        best.assign(&member.particle);

                        listener.post(SwarmState {
                            iteration,
                            global_best_fitness: fit,
                            last_global_best_fitness: previous,
                            message: "global best updated".into(),
                        });
                    }
                }
            }
        });
    }

    /// A copy of the best particle found so far.
    pub fn global_best(&self) -> P {
        self.global_best.read().unwrap().clone()
    }

    /// The fitness of the best particle found so far.
    pub fn global_best_fitness(&self) -> f64 {
        f64::from_bits(self.global_best_fitness.load(Ordering::Acquire))
    }
}
