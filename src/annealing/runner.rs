//! SA execution loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AnnealingContext;
use super::types::{AnnealingFunction, AnnealingState};
use crate::monitoring::{StateChangeHandler, StateChangeListener};

/// Boltzmann constant scaling the Metropolis acceptance probability.
///
/// A fixed physical-simulation scale factor, not a tunable.
pub const BOLTZMANN_CONSTANT: f64 = 8.6173432e-5;

/// Callback receiving [`AnnealingState`] events on the listener thread.
pub type AnnealingHandler = StateChangeHandler<AnnealingState>;

/// Executes the Simulated Annealing search.
///
/// The run walks a geometric temperature ladder from the context's initial
/// temperature down to its final temperature, performing `steps` candidate
/// trials per rung under the Metropolis acceptance criterion, and stops at
/// the temperature floor, the wall-clock deadline, or a sustained variation
/// stall — whichever comes first.
pub struct SimulatedAnnealing;

impl SimulatedAnnealing {
    /// Runs the search without progress reporting.
    pub fn optimize<F: AnnealingFunction>(ctx: &AnnealingContext, function: &F) -> F {
        Self::optimize_with_handler(ctx, function, None)
    }

    /// Runs the search, reporting progress to `handler`.
    ///
    /// Returns the best candidate found. If the seed candidate is invalid,
    /// the run terminates immediately with a diagnostic event and returns a
    /// copy of the input — a defined non-fatal outcome, not an error.
    ///
    /// The listener thread is joined before this returns, so every posted
    /// event has been handled by then and no background thread survives the
    /// call. A panic in `handler` is re-raised here.
    pub fn optimize_with_handler<F: AnnealingFunction>(
        ctx: &AnnealingContext,
        function: &F,
        handler: Option<AnnealingHandler>,
    ) -> F {
        let mut listener = StateChangeListener::spawn(handler);

        listener.post(AnnealingState::diagnostic(
            0.0,
            format!("start cooling process with context: {ctx:?}"),
        ));

        if !function.is_valid() {
            listener.post(AnnealingState::diagnostic(
                0.0,
                "the candidate sent to the cooling process is invalid".into(),
            ));
            listener.finish();
            listener.join();
            return function.clone();
        }

        let mut rng = match ctx.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut process = CoolingProcess::start(ctx, function);

        listener.post(AnnealingState::diagnostic(
            process.best_value,
            format!("start with value: {}", process.best.compute()),
        ));

        let sign = ctx.problem_type().sign();
        let mut temperature = ctx.initial_temperature();
        while !process.early_stop
            && Instant::now() < process.end_time
            && temperature > ctx.final_temperature()
        {
            // The reference energy is refreshed from the incumbent once per
            // rung; acceptances roll it forward within the rung.
            process.initial_energy = sign * process.best.compute();

            process.anneal_at(temperature, &mut rng, &listener);

            temperature *= 1.0 - ctx.cooling_rate();
        }

        if !process.best.is_valid() {
            listener.post(AnnealingState::diagnostic(
                process.best_value,
                "the solution found by the cooling process is invalid".into(),
            ));
        }

        listener.post(AnnealingState::diagnostic(
            process.best_value,
            format!("finish with value: {}", process.best.compute()),
        ));

        listener.finish();
        listener.join();

        process.best
    }
}

/// Mutable state of one cooling run.
struct CoolingProcess<'a, F: AnnealingFunction> {
    ctx: &'a AnnealingContext,
    best: F,
    current: F,
    best_value: f64,
    initial_energy: f64,
    persistence_count: u32,
    end_time: Instant,
    early_stop: bool,
}

impl<'a, F: AnnealingFunction> CoolingProcess<'a, F> {
    fn start(ctx: &'a AnnealingContext, function: &F) -> Self {
        let best = function.clone();
        let current = function.clone();
        let best_value = ctx.problem_type().sign() * best.compute();

        Self {
            ctx,
            best,
            current,
            best_value,
            initial_energy: 0.0,
            persistence_count: 0,
            end_time: Instant::now() + ctx.deadline(),
            early_stop: false,
        }
    }

    /// Runs the per-rung trial loop at one temperature.
    fn anneal_at<R: Rng>(
        &mut self,
        temperature: f64,
        rng: &mut R,
        listener: &StateChangeListener<AnnealingState>,
    ) {
        let sign = self.ctx.problem_type().sign();

        for current_step in (1..=self.ctx.steps()).rev() {
            if self.early_stop {
                break;
            }

            self.current.reconfigure(rng);

            // An invalid candidate skips the trial but still consumes its
            // step, so a degenerate neighborhood cannot stall the rung.
            if !self.current.is_valid() {
                continue;
            }

            let final_energy = sign * self.current.compute();
            let delta = final_energy - self.initial_energy;
            let probability = (-delta / (BOLTZMANN_CONSTANT * temperature)).exp();

            // Metropolis acceptance criterion.
            if delta <= 0.0 || rng.random_range(0.0..1.0) < probability {
                if final_energy < self.best_value {
                    listener.post(AnnealingState {
                        temperature,
                        initial_energy: self.initial_energy,
                        final_energy,
                        delta,
                        probability,
                        best_value: self.best_value,
                        current_step,
                        accepted: true,
                        message: "accepted configuration".into(),
                    });

                    self.best_value = final_energy;
                    self.best.assign(&self.current);
                }

                // The next trial compares against the latest accepted state,
                // not the rung-start state.
                self.initial_energy = final_energy;
            }

            self.check_early_stop(temperature, current_step, final_energy, delta, probability, listener);
        }
    }

    /// Evaluated once per valid trial, regardless of acceptance.
    fn check_early_stop(
        &mut self,
        temperature: f64,
        current_step: u32,
        final_energy: f64,
        delta: f64,
        probability: f64,
        listener: &StateChangeListener<AnnealingState>,
    ) {
        if let Some(threshold) = self.ctx.variation_threshold() {
            let variation = (final_energy - self.best_value).abs();

            if variation < threshold {
                self.persistence_count += 1;

                if self.persistence_count >= self.ctx.variation_persistence() {
                    self.early_stop = true;
                    listener.post(AnnealingState {
                        temperature,
                        initial_energy: self.initial_energy,
                        final_energy,
                        delta,
                        probability,
                        best_value: self.best_value,
                        current_step,
                        accepted: false,
                        message: "early stop due to variation threshold".into(),
                    });
                }
            } else {
                // The stall must be consecutive; variation is stochastic and
                // may bounce around the threshold before stabilizing.
                self.persistence_count = 0;
            }
        }

        if Instant::now() >= self.end_time {
            self.early_stop = true;
            listener.post(AnnealingState {
                temperature,
                initial_energy: self.initial_energy,
                final_energy,
                delta,
                probability,
                best_value: self.best_value,
                current_step,
                accepted: false,
                message: "early stop due to time limit".into(),
            });
        }
    }
}
