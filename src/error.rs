//! Construction-time configuration errors.
//!
//! Every variant corresponds to a malformed run-context field or an
//! unusable engine input, and is raised synchronously before any worker
//! thread is spawned. Run-time degeneracies (an invalid seed candidate, an
//! invalid post-reconfigure candidate) are defined non-fatal outcomes and
//! never surface through this type.

use thiserror::Error;

/// Validation failure while constructing a run context or an engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("temperatures must be non-negative, got initial {initial} and final {final_temperature}")]
    NegativeTemperature {
        initial: f64,
        final_temperature: f64,
    },

    #[error("initial temperature {initial} must be greater than or equal to final temperature {final_temperature}")]
    TemperatureOrdering {
        initial: f64,
        final_temperature: f64,
    },

    #[error("cooling rate must be in (0, 0.5], got {0}")]
    CoolingRateOutOfRange(f64),

    #[error("steps per temperature must be positive")]
    ZeroSteps,

    #[error("deadline must be a positive duration")]
    ZeroDeadline,

    #[error("variation threshold must be non-negative, got {0}")]
    NegativeVariationThreshold(f64),

    #[error("variation persistence must be positive")]
    ZeroPersistence,

    #[error("max iterations must be positive")]
    ZeroIterations,

    #[error("weights must be non-negative, got inertia {inertia}, cognitive {cognitive}, social {social}")]
    NegativeWeight {
        inertia: f64,
        cognitive: f64,
        social: f64,
    },

    #[error("swarm must contain at least one particle")]
    EmptySwarm,
}
