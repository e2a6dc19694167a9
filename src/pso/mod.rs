//! Particle Swarm Optimization (PSO).
//!
//! A population-based metaheuristic: a swarm of candidate positions is
//! pulled toward each particle's personal best and the swarm's global best,
//! with per-dimension stochastic scaling. The per-particle round update
//! runs in parallel; only the global-best write is serialized, behind a
//! lock scoped to the compare-and-update.
//!
//! The engine minimizes the fitness function. Callers wanting maximization
//! negate their fitness.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;
mod types;

pub use config::PsoContext;
pub use runner::{ParticleSwarm, SwarmHandler};
pub use types::{Particle, SwarmState};
