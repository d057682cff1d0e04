use crate::error::FitError;
pub use crate::fit::cobyla::CobylaMinimizer;
pub use crate::fit::mcmc::McmcMinimizer;

use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Best point found by a minimizer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MinimizeResult {
    pub x: Vec<f64>,
    pub value: f64,
    /// `false` if the minimizer stopped before reaching its convergence criterion
    pub success: bool,
}

impl MinimizeResult {
    /// The only point of a zero-dimensional space
    pub(super) fn empty<F>(objective: F) -> Self
    where
        F: Fn(&[f64]) -> f64,
    {
        Self {
            x: vec![],
            value: objective(&[]),
            success: true,
        }
    }
}

/// `x0` and both bounds must have the same length
pub(super) fn check_dimensions(x0: &[f64], bounds: (&[f64], &[f64])) -> Result<(), FitError> {
    let (lower, upper) = bounds;
    for actual in [x0.len(), upper.len()] {
        if actual != lower.len() {
            return Err(FitError::DimensionMismatch {
                expected: lower.len(),
                actual,
            });
        }
    }
    Ok(())
}

/// Black-box minimizer of a scalar function of a flat vector inside a box
#[enum_dispatch]
pub trait MinimizerTrait: Clone + Debug + Serialize + DeserializeOwned {
    /// Minimize `objective` starting from `x0`
    ///
    /// `objective` may return `+inf`, such points must never be reported as the optimum
    /// unless nothing better was found. An empty `x0` is returned as is, evaluated once. An
    /// `Err` means the back-end failed and produced no usable point.
    fn minimize<F>(
        &self,
        objective: F,
        x0: &[f64],
        bounds: (&[f64], &[f64]),
    ) -> Result<MinimizeResult, FitError>
    where
        F: Clone + Fn(&[f64]) -> f64;
}

/// Minimization algorithm used by [VidaProblem::fit](crate::fit::VidaProblem::fit)
#[enum_dispatch(MinimizerTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Minimizer {
    Cobyla(CobylaMinimizer),
    Mcmc(McmcMinimizer),
}

impl Minimizer {
    pub fn cobyla() -> Self {
        CobylaMinimizer::default().into()
    }

    pub fn mcmc() -> Self {
        McmcMinimizer::default().into()
    }
}

impl Default for Minimizer {
    fn default() -> Self {
        Self::cobyla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_json() {
        let minimizer: Minimizer =
            McmcMinimizer::new(64, 3, Some(CobylaMinimizer::new(100, 0.25, 1e-8, None).into()))
                .into();
        let json = serde_json::to_string(&minimizer).unwrap();
        let minimizer_serde: Minimizer = serde_json::from_str(&json).unwrap();
        assert_eq!(minimizer, minimizer_serde);
    }

    #[test]
    fn default_is_cobyla() {
        assert!(matches!(Minimizer::default(), Minimizer::Cobyla(_)));
    }
}
