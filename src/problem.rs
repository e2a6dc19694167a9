//! Optimization direction shared by both engines.

/// Whether a run searches for a minimum or a maximum of the objective.
///
/// Both engines minimize internally; [`ProblemType::sign`] is the factor
/// that folds a maximization problem into that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemType {
    Minimize,
    Maximize,
}

impl ProblemType {
    /// Factor applied to raw objective values so the engine always minimizes.
    pub fn sign(self) -> f64 {
        match self {
            ProblemType::Minimize => 1.0,
            ProblemType::Maximize => -1.0,
        }
    }
}
