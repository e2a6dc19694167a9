//! PSO run configuration.

use crate::error::ConfigError;

/// Immutable parameter bundle for one Particle Swarm run.
///
/// Validated exclusively at construction; never mutated afterwards, so
/// concurrent reads from particle workers are safe by construction.
///
/// # Examples
///
/// ```
/// use stochastic_search::pso::PsoContext;
///
/// let ctx = PsoContext::new(1000, 0.729, 1.49445, 1.49445).unwrap();
/// assert_eq!(ctx.max_iterations(), 1000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoContext {
    max_iterations: u32,
    inertia_weight: f64,
    cognitive_weight: f64,
    social_weight: f64,
    variation_threshold: Option<f64>,
    variation_persistence: u32,
}

impl PsoContext {
    /// Creates a validated context with early stopping disabled.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `max_iterations` is zero or any
    /// weight is negative.
    pub fn new(
        max_iterations: u32,
        inertia_weight: f64,
        cognitive_weight: f64,
        social_weight: f64,
    ) -> Result<Self, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if inertia_weight < 0.0 || cognitive_weight < 0.0 || social_weight < 0.0 {
            return Err(ConfigError::NegativeWeight {
                inertia: inertia_weight,
                cognitive: cognitive_weight,
                social: social_weight,
            });
        }

        Ok(Self {
            max_iterations,
            inertia_weight,
            cognitive_weight,
            social_weight,
            variation_threshold: None,
            variation_persistence: 0,
        })
    }

    /// Enables stall-based early stopping.
    ///
    /// The run stops once the round-over-round improvement of the global
    /// best stays below `threshold` for `persistence` consecutive rounds.
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

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn inertia_weight(&self) -> f64 {
        self.inertia_weight
    }

    pub fn cognitive_weight(&self) -> f64 {
        self.cognitive_weight
    }

    pub fn social_weight(&self) -> f64 {
        self.social_weight
    }

    /// `None` means early stopping is disabled.
    pub fn variation_threshold(&self) -> Option<f64> {
        self.variation_threshold
    }

    pub fn variation_persistence(&self) -> u32 {
        self.variation_persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_context_reads_back_unchanged() {
        let ctx = PsoContext::new(1000, 0.729, 1.49445, 1.49445).unwrap();
        assert_eq!(ctx.max_iterations(), 1000);
        assert_eq!(ctx.inertia_weight(), 0.729);
        assert_eq!(ctx.cognitive_weight(), 1.49445);
        assert_eq!(ctx.social_weight(), 1.49445);
        assert_eq!(ctx.variation_threshold(), None);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            PsoContext::new(0, 0.729, 1.49445, 1.49445),
            Err(ConfigError::ZeroIterations)
        ));
    }

    #[test]
    fn test_negative_weights_rejected() {
        for (w, c, s) in [(-0.1, 1.0, 1.0), (1.0, -0.1, 1.0), (1.0, 1.0, -0.1)] {
            assert!(matches!(
                PsoContext::new(100, w, c, s),
                Err(ConfigError::NegativeWeight { .. })
            ));
        }
    }

    #[test]
    fn test_zero_weights_allowed() {
        assert!(PsoContext::new(100, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_early_stop_validation() {
        let ctx = PsoContext::new(100, 0.729, 1.49445, 1.49445).unwrap();
        assert!(matches!(
            ctx.clone().early_stop(-1e-3, 5),
            Err(ConfigError::NegativeVariationThreshold(_))
        ));
        assert!(matches!(
            ctx.clone().early_stop(1e-3, 0),
            Err(ConfigError::ZeroPersistence)
        ));

        let ctx = ctx.early_stop(1e-3, 5).unwrap();
        assert_eq!(ctx.variation_threshold(), Some(1e-3));
        assert_eq!(ctx.variation_persistence(), 5);
    }

    proptest! {
        #[test]
        fn prop_non_negative_weights_construct(
            iterations in 1u32..100_000,
            inertia in 0.0..10.0f64,
            cognitive in 0.0..10.0f64,
            social in 0.0..10.0f64,
        ) {
            let ctx = PsoContext::new(iterations, inertia, cognitive, social).unwrap();
            prop_assert_eq!(ctx.max_iterations(), iterations);
            prop_assert_eq!(ctx.inertia_weight(), inertia);
        }
    }
}
