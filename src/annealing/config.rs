//! SA run configuration.

use std::time::Duration;

use crate::error::ConfigError;
use crate::problem::ProblemType;

/// Immutable parameter bundle for one Simulated Annealing run.
///
/// Construction is the only place these fields are validated; once built,
/// an instance never changes, so sharing it across threads is safe by
/// construction.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stochastic_search::annealing::AnnealingContext;
/// use stochastic_search::problem::ProblemType;
///
/// let ctx = AnnealingContext::new(
///     10_000.0,
///     0.1,
///     0.01,
///     150_000,
///     Duration::from_millis(300),
///     ProblemType::Minimize,
/// )
/// .unwrap();
/// assert_eq!(ctx.steps(), 150_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingContext {
    initial_temperature: f64,
    final_temperature: f64,
    cooling_rate: f64,
    steps: u32,
    deadline: Duration,
    variation_threshold: Option<f64>,
    variation_persistence: u32,
    problem_type: ProblemType,
    seed: Option<u64>,
}

impl AnnealingContext {
    /// Creates a validated context with early stopping disabled.
    ///
    /// The deadline is the wall-clock budget for the whole run; its unit is
    /// whatever the caller encodes in the [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when temperatures are negative or out of
    /// order, the cooling rate falls outside `(0, 0.5]`, `steps` is zero,
    /// or the deadline is zero.
    pub fn new(
        initial_temperature: f64,
        final_temperature: f64,
        cooling_rate: f64,
        steps: u32,
        deadline: Duration,
        problem_type: ProblemType,
    ) -> Result<Self, ConfigError> {
        if initial_temperature < 0.0 || final_temperature < 0.0 {
            return Err(ConfigError::NegativeTemperature {
                initial: initial_temperature,
                final_temperature,
            });
        }
        if initial_temperature < final_temperature {
            return Err(ConfigError::TemperatureOrdering {
                initial: initial_temperature,
                final_temperature,
            });
        }
        if cooling_rate <= 0.0 || cooling_rate > 0.5 {
            return Err(ConfigError::CoolingRateOutOfRange(cooling_rate));
        }
        if steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if deadline.is_zero() {
            return Err(ConfigError::ZeroDeadline);
        }

        Ok(Self {
            initial_temperature,
            final_temperature,
            cooling_rate,
            steps,
            deadline,
            variation_threshold: None,
            variation_persistence: 0,
            problem_type,
            seed: None,
        })
    }

    /// A context with conventional defaults: temperature ladder
    /// `10000 -> 0.1` at rate `0.01`, `150_000` steps per rung, 300 ms
    /// deadline, early stopping disabled.
    pub fn with_defaults(problem_type: ProblemType) -> Self {
        Self::new(
            10_000.0,
            0.1,
            0.01,
            150_000,
            Duration::from_millis(300),
            problem_type,
        )
        .expect("default annealing context is valid")
    }

    /// Enables stall-based early stopping.
    ///
    /// The run stops once the variation against the best value stays below
    /// `threshold` for `persistence` consecutive trials.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `threshold` is negative or
    /// `persistence` is zero.
    pub fn early_stop(mut self, threshold: f64, persistence: u32) -> Result<Self, ConfigError> {
        if threshold < 0.0 {
            return Err(ConfigError::NegativeVariationThreshold(threshold));
        }
        if persistence == 0 {
            return Err(ConfigError::ZeroPersistence);
        }

        self.variation_threshold = Some(threshold);
        self.variation_persistence = persistence;
        Ok(self)
    }

    /// Fixes the RNG seed for a reproducible run.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    pub fn final_temperature(&self) -> f64 {
        self.final_temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// `None` means early stopping is disabled.
    pub fn variation_threshold(&self) -> Option<f64> {
        self.variation_threshold
    }

    pub fn variation_persistence(&self) -> u32 {
        self.variation_persistence
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
