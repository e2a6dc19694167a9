//! Criterion benchmarks for the SA and PSO engines.
//!
//! Uses the sphere function to measure pure engine overhead independent of
//! any domain.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use stochastic_search::annealing::{AnnealingContext, AnnealingFunction, SimulatedAnnealing};
use stochastic_search::problem::ProblemType;
use stochastic_search::pso::{Particle, ParticleSwarm, PsoContext};

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

#[derive(Clone)]
struct SphereCandidate {
    x: Vec<f64>,
}

impl SphereCandidate {
    fn new(dim: usize) -> Self {
        let mut rng = rand::rng();
        Self {
            x: (0..dim).map(|_| rng.random_range(-10.0..10.0)).collect(),
        }
    }
}

impl AnnealingFunction for SphereCandidate {
    fn compute(&self) -> f64 {
        self.x.iter().map(|v| v * v).sum()
    }

    fn reconfigure<R: Rng>(&mut self, rng: &mut R) {
        let idx = rng.random_range(0..self.x.len());
        self.x[idx] = (self.x[idx] + rng.random_range(-1.0..1.0)).clamp(-10.0, 10.0);
    }

    fn assign(&mut self, other: &Self) {
        self.x.clone_from(&other.x);
    }

    fn is_valid(&self) -> bool {
        self.x.iter().all(|v| (-10.0..=10.0).contains(v))
    }
}

#[derive(Clone)]
struct SphereParticle {
    position: Vec<f64>,
    velocity: Vec<f64>,
}

impl SphereParticle {
    fn new(dim: usize) -> Self {
        let mut rng = rand::rng();
        Self {
            position: (0..dim).map(|_| rng.random_range(-5.0..5.0)).collect(),
            velocity: (0..dim).map(|_| rng.random_range(-0.05..0.05)).collect(),
        }
    }
}

impl Particle for SphereParticle {
    fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec<f64>) {
        self.velocity = velocity;
    }

    fn update_position(&mut self) {
        for (p, v) in self.position.iter_mut().zip(&self.velocity) {
            *p += *v;
        }
    }

    fn assign(&mut self, other: &Self) {
        self.position.clone_from(&other.position);
        self.velocity.clone_from(&other.velocity);
    }

    fn component<R: Rng>(&self, guide: &Self, weight: f64, rng: &mut R) -> Vec<f64> {
        self.position
            .iter()
            .zip(&guide.position)
            .map(|(x, g)| weight * rng.random_range(0.0..1.0) * (g - x))
            .collect()
    }
}

fn sphere_fitness(particle: &SphereParticle) -> f64 {
    particle.position.iter().map(|x| x * x).sum()
}

fn bench_simulated_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_sphere");
    for dim in [2usize, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let ctx = AnnealingContext::new(
                100.0,
                0.1,
                0.05,
                500,
                Duration::from_secs(10),
                ProblemType::Minimize,
            )
            .unwrap()
            .seeded(42);

            b.iter(|| {
                let best = SimulatedAnnealing::optimize(&ctx, &SphereCandidate::new(dim));
                black_box(best.compute())
            });
        });
    }
    group.finish();
}

fn bench_particle_swarm(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso_sphere");
    for particles in [16usize, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(particles),
            &particles,
            |b, &particles| {
                b.iter(|| {
                    let ctx = PsoContext::new(100, 0.729, 1.49445, 1.49445).unwrap();
                    let swarm = (0..particles).map(|_| SphereParticle::new(4)).collect();
                    let mut pso = ParticleSwarm::new(ctx, sphere_fitness, swarm).unwrap();
                    pso.optimize();
                    black_box(pso.global_best_fitness())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_simulated_annealing, bench_particle_swarm);
criterion_main!(benches);
