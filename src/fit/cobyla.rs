use crate::error::FitError;
use crate::fit::minimizer::{MinimizeResult, Minimizer, MinimizerTrait, check_dimensions};

use cobyla::{FailStatus, Func, RhoBeg, StopTols, SuccessStatus, minimize};
use ordered_float::NotNan;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Powell's COBYLA minimizer of the divergence objective
///
/// A derivative-free local method. Box bounds of the coordinate space are passed to the
/// back-end directly, so the `+inf` penalty of the objective is not hit. The first step size
/// `rhobeg` is measured in coordinates: the unit hypercube spans 1, the flat space spans
/// `2 * FLAT_BOUND`.
///
/// A fit which runs out of evaluations or is stopped by rounding errors is not an error, its
/// result has `success == false`. With `fine_tuning_algorithm`, the point found here is handed to
/// another minimizer as its start point.
///
/// See M.J.D. Powell (1994), "A direct search optimization method that models the objective and
/// constraint functions by linear interpolation".
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename = "Cobyla")]
pub struct CobylaMinimizer {
    /// Objective evaluation limit
    pub niterations: u32,
    pub rhobeg: NotNan<f64>,
    /// Stop when an iteration improves the divergence by less than this fraction
    pub ftol_rel: NotNan<f64>,
    pub fine_tuning_algorithm: Option<Box<Minimizer>>,
}

impl CobylaMinimizer {
    /// Panics if `niterations` is zero, `rhobeg` is not positive and finite or `ftol_rel` is
    /// negative or not finite
    pub fn new(
        niterations: u32,
        rhobeg: f64,
        ftol_rel: f64,
        fine_tuning_algorithm: Option<Minimizer>,
    ) -> Self {
        assert!(niterations > 0, "niterations must be positive");
        assert!(
            rhobeg > 0.0 && rhobeg.is_finite(),
            "rhobeg must be positive and finite"
        );
        assert!(
            ftol_rel >= 0.0 && ftol_rel.is_finite(),
            "ftol_rel must be non-negative and finite"
        );
        Self {
            niterations,
            rhobeg: NotNan::new(rhobeg).expect("rhobeg is checked above"),
            ftol_rel: NotNan::new(ftol_rel).expect("ftol_rel is checked above"),
            fine_tuning_algorithm: fine_tuning_algorithm.map(Box::new),
        }
    }

    #[inline]
    pub fn default_niterations() -> u32 {
        1000
    }

    #[inline]
    pub fn default_rhobeg() -> f64 {
        0.1
    }

    #[inline]
    pub fn default_ftol_rel() -> f64 {
        1e-6
    }

    #[inline]
    pub fn default_fine_tuning_algorithm() -> Option<Minimizer> {
        None
    }
}

impl Default for CobylaMinimizer {
    fn default() -> Self {
        Self::new(
            Self::default_niterations(),
            Self::default_rhobeg(),
            Self::default_ftol_rel(),
            Self::default_fine_tuning_algorithm(),
        )
    }
}

impl MinimizerTrait for CobylaMinimizer {
    fn minimize<F>(
        &self,
        objective: F,
        x0: &[f64],
        bounds: (&[f64], &[f64]),
    ) -> Result<MinimizeResult, FitError>
    where
        F: Clone + Fn(&[f64]) -> f64,
    {
        check_dimensions(x0, bounds)?;
        // COBYLA has nothing to iterate over
        if x0.is_empty() {
            return Ok(MinimizeResult::empty(objective));
        }

        let func = {
            let objective = objective.clone();
            move |x: &[f64], _user_data: &mut ()| -> f64 { objective(x) }
        };

        let cobyla_bounds: Vec<(f64, f64)> = bounds
            .0
            .iter()
            .zip(bounds.1.iter())
            .map(|(&lower, &upper)| (lower, upper))
            .collect();

        // Box bounds only
        let constraints: Vec<&dyn Func<()>> = vec![];

        let stop_tol = StopTols {
            ftol_rel: self.ftol_rel.into(),
            ..StopTols::default()
        };

        let result = minimize(
            func,
            x0,
            &cobyla_bounds,
            &constraints,
            (),
            self.niterations as usize,
            RhoBeg::All(self.rhobeg.into()),
            Some(stop_tol),
        );

        let cobyla_result = match result {
            Ok((status, x, value)) => MinimizeResult {
                x,
                value,
                success: matches!(
                    status,
                    SuccessStatus::Success
                        | SuccessStatus::FtolReached
                        | SuccessStatus::XtolReached
                ),
            },
            // Rounding errors prevent further progress, the point is still the best one seen
            Err((FailStatus::RoundoffLimited, x, value)) => MinimizeResult {
                x,
                value,
                success: false,
            },
            Err((status, _x, _value)) => {
                return Err(FitError::Minimizer(format!("COBYLA failed: {status:?}")));
            }
        };

        match &self.fine_tuning_algorithm {
            Some(fine_tuning_algorithm) => {
                fine_tuning_algorithm.minimize(objective, &cobyla_result.x, bounds)
            }
            None => Ok(cobyla_result),
        }
    }
}
