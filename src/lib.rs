//! Stochastic metaheuristic optimization.
//!
//! Provides two stochastic search engines over user-supplied objective
//! abstractions:
//!
//! - **Simulated Annealing (SA)**: Single-solution trajectory optimization
//!   that simulates a cooling process — Metropolis acceptance, geometric
//!   cooling ladder, wall-clock deadline, and variation-based early stop.
//! - **Particle Swarm Optimization (PSO)**: Population-based optimization
//!   with a parallel per-particle round update and a shared global best
//!   under contention.
//!
//! Both engines publish immutable progress events to an asynchronous
//! [`monitoring::StateChangeListener`], so a slow caller-supplied handler
//! never stalls the search loop. Events are delivered in posting order and
//! fully drained before an engine's public call returns.
//!
//! # Architecture
//!
//! The crate is a pure library surface: the caller constructs a validated
//! run context ([`annealing::AnnealingContext`] or [`pso::PsoContext`]) and
//! an objective implementing the matching capability trait
//! ([`annealing::AnnealingFunction`] or [`pso::Particle`]), then runs the
//! engine. Objective implementations, numeric utilities, CLI, and
//! persistence all live in consumer crates.

pub mod annealing;
pub mod error;
pub mod monitoring;
pub mod problem;
pub mod pso;
