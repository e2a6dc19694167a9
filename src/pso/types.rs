//! Particle capability contract and PSO progress events.

use rand::Rng;

/// A swarm member's search state: a position and a velocity of matching
/// dimension.
///
/// The engine owns personal-best bookkeeping; an implementation only
/// exposes its kinematics. `assign` is typed over `Self`, so cross-type
/// assignment is ruled out at compile time, and deep copies come from the
/// `Clone` supertrait.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use stochastic_search::pso::Particle;
///
/// #[derive(Clone)]
/// struct Point {
///     position: Vec<f64>,
///     velocity: Vec<f64>,
/// }
///
/// impl Particle for Point {
///     fn velocity(&self) -> &[f64] {
///         &self.velocity
///     }
///
///     fn set_velocity(&mut self, velocity: Vec<f64>) {
///         self.velocity = velocity;
///     }
///
///     fn update_position(&mut self) {
///         for (p, v) in self.position.iter_mut().zip(&self.velocity) {
///             *p += *v;
///         }
///     }
///
///     fn assign(&mut self, other: &Self) {
///         self.position.clone_from(&other.position);
///         self.velocity.clone_from(&other.velocity);
///     }
///
///     fn component<R: Rng>(&self, guide: &Self, weight: f64, rng: &mut R) -> Vec<f64> {
///         self.position
///             .iter()
///             .zip(&guide.position)
///             .map(|(x, g)| weight * rng.random_range(0.0..1.0) * (g - x))
///             .collect()
///     }
/// }
/// ```
pub trait Particle: Clone + Send + Sync {
    /// The current velocity, one entry per dimension.
    fn velocity(&self) -> &[f64];

    /// Replaces the velocity. `velocity` has the particle's dimension.
    fn set_velocity(&mut self, velocity: Vec<f64>);

    /// Advances the position by the current velocity.
    fn update_position(&mut self);

    /// Overwrites this particle's state with `other`'s.
    fn assign(&mut self, other: &Self);

    /// The weighted stochastic pull of this particle toward `guide`:
    /// `weight * r_i * (guide_i - self_i)` per dimension, with an
    /// independent uniform draw `r_i` in `[0, 1)` for each.
    fn component<R: Rng>(&self, guide: &Self, weight: f64, rng: &mut R) -> Vec<f64>;
}

/// One immutable snapshot of swarm progress, posted to the listener.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmState {
    pub iteration: u32,
    pub global_best_fitness: f64,
    pub last_global_best_fitness: f64,
    pub message: String,
}
