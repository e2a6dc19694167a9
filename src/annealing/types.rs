//! Objective capability contract and SA progress events.

use rand::Rng;

/// A solution candidate for Simulated Annealing.
///
/// An implementation owns the state representing one point in the search
/// domain and exposes the operations the engine needs: evaluate the
/// objective, mutate to a neighboring candidate, report domain validity,
/// and overwrite its state from another instance of the same type. Deep
/// copies come from the `Clone` supertrait, and `assign` is typed over
/// `Self`, so cross-type assignment is ruled out at compile time.
///
/// The engine always minimizes the value returned by
/// [`compute`](Self::compute); a maximization problem is folded in through
/// [`crate::problem::ProblemType::Maximize`].
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use stochastic_search::annealing::AnnealingFunction;
///
/// #[derive(Clone)]
/// struct Sine {
///     x: f64,
/// }
///
/// impl AnnealingFunction for Sine {
///     fn compute(&self) -> f64 {
///         self.x.sin()
///     }
///
///     fn reconfigure<R: Rng>(&mut self, rng: &mut R) {
///         self.x = rng.random_range(0.0..std::f64::consts::TAU);
///     }
///
///     fn assign(&mut self, other: &Self) {
///         self.x = other.x;
///     }
///
///     fn is_valid(&self) -> bool {
///         (0.0..=std::f64::consts::TAU).contains(&self.x)
///     }
/// }
/// ```
pub trait AnnealingFunction: Clone {
    /// The objective value of the current configuration.
    fn compute(&self) -> f64;

    /// Mutates the configuration to a neighboring point in the domain.
    fn reconfigure<R: Rng>(&mut self, rng: &mut R);

    /// Overwrites this configuration with `other`'s.
    fn assign(&mut self, other: &Self);

    /// Whether the current configuration is a valid domain point.
    fn is_valid(&self) -> bool;
}

/// One immutable snapshot of SA progress, posted to the listener.
///
/// Energies carry the engine's internal minimizing sign; multiply by
/// [`crate::problem::ProblemType::sign`] to recover raw objective values
/// for a maximization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingState {
    pub temperature: f64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub delta: f64,
    pub probability: f64,
    pub best_value: f64,
    /// Remaining trials in the current temperature rung; zero for
    /// bookkeeping events.
    pub current_step: u32,
    pub accepted: bool,
    pub message: String,
}

impl AnnealingState {
    /// A bookkeeping event carrying only the best value and a message.
    pub(crate) fn diagnostic(best_value: f64, message: String) -> Self {
        Self {
            temperature: 0.0,
            initial_energy: 0.0,
            final_energy: 0.0,
            delta: 0.0,
            probability: 0.0,
            best_value,
            current_step: 0,
            accepted: false,
            message,
        }
    }
}
