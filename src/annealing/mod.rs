//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening configurations with a probability
//! proportional to `exp(-delta / (kB * T))`, allowing the search to escape
//! local optima while the temperature ladder cools geometrically.
//!
//! The engine drives a caller-supplied [`AnnealingFunction`] and reports
//! progress through the asynchronous listener in [`crate::monitoring`].
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::AnnealingContext;
pub use runner::{AnnealingHandler, SimulatedAnnealing, BOLTZMANN_CONSTANT};
pub use types::{AnnealingFunction, AnnealingState};
