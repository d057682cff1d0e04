use crate::error::FitError;
use crate::fit::minimizer::{MinimizeResult, Minimizer, MinimizerTrait, check_dimensions};

use emcee::{EnsembleSampler, Guess, Prob};
use rand::prelude::*;
use rand_distr::StandardNormal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MCMC sampler minimizer
///
/// Samples `ln p = -objective` with the affine-invariant ensemble sampler of
/// [Goodman & Weare (2010)](https://doi.org/10.2140/camcos.2010.5.65) as implemented in
/// [`emcee`](https://crates.io/crates/emcee), four walkers per dimension. The walkers start
/// around the given point and the best visited point is returned. Points outside the box
/// bounds have zero probability.
///
/// Optionally, if `fine_tuning_algorithm` is `Some`, the best MCMC point is used as the start
/// point of the next minimizer and its result is returned.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename = "Mcmc")]
pub struct McmcMinimizer {
    pub niterations: u32,
    pub seed: u64,
    pub fine_tuning_algorithm: Option<Box<Minimizer>>,
}

impl McmcMinimizer {
    pub fn new(niterations: u32, seed: u64, fine_tuning_algorithm: Option<Minimizer>) -> Self {
        assert!(niterations > 0, "niterations must be positive");
        Self {
            niterations,
            seed,
            fine_tuning_algorithm: fine_tuning_algorithm.map(|x| x.into()),
        }
    }

    #[inline]
    pub fn default_niterations() -> u32 {
        128
    }

    #[inline]
    pub fn default_seed() -> u64 {
        0
    }

    #[inline]
    pub fn default_fine_tuning_algorithm() -> Option<Minimizer> {
        None
    }
}

impl Default for McmcMinimizer {
    fn default() -> Self {
        Self::new(
            Self::default_niterations(),
            Self::default_seed(),
            Self::default_fine_tuning_algorithm(),
        )
    }
}

/// Relative size of the initial walker cloud
const INITIAL_SPREAD: f64 = 0.05;

struct EmceeModel<'a, F> {
    objective: F,
    lower: &'a [f64],
    upper: &'a [f64],
}

impl<F> Prob for EmceeModel<'_, F>
where
    F: Fn(&[f64]) -> f64,
{
    fn lnlike(&self, params: &Guess) -> f32 {
        let x = guess_to_vec(params);
        -(self.objective)(&x) as f32
    }

    fn lnprior(&self, params: &Guess) -> f32 {
        let inside = params
            .values
            .iter()
            .zip(self.lower)
            .zip(self.upper)
            .all(|((&x, &lower), &upper)| lower <= x as f64 && x as f64 <= upper);
        if inside { 0.0 } else { f32::NEG_INFINITY }
    }
}

fn guess_to_vec(guess: &Guess) -> Vec<f64> {
    guess.values.iter().map(|&x| x as f64).collect()
}

impl MinimizerTrait for McmcMinimizer {
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
        if x0.is_empty() {
            return Ok(MinimizeResult::empty(objective));
        }

        let ndim = x0.len();
        let nwalkers = 4 * ndim;
        let (lower, upper) = bounds;

        let model = EmceeModel {
            objective: objective.clone(),
            lower,
            upper,
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let initial_guesses: Vec<_> = (0..nwalkers)
            .map(|i| {
                let values: Vec<f32> = x0
                    .iter()
                    .zip(lower)
                    .zip(upper)
                    .map(|((&x, &lower), &upper)| {
                        if i == 0 {
                            return x as f32;
                        }
                        let width = upper - lower;
                        let spread = if width.is_finite() {
                            INITIAL_SPREAD * width
                        } else {
                            INITIAL_SPREAD
                        };
                        let eps: f64 = rng.sample(StandardNormal);
                        (x + spread * eps).clamp(lower, upper) as f32
                    })
                    .collect();
                Guess::new(&values)
            })
            .collect();

        let mut sampler = EnsembleSampler::new(nwalkers, ndim, &model)
            .map_err(|err| FitError::Minimizer(format!("cannot create MCMC sampler: {err}")))?;
        sampler.seed(&[self.seed as usize]);

        let mut best: Option<(f32, Vec<f64>)> = None;
        sampler
            .sample(&initial_guesses, self.niterations as usize, |step| {
                for (guess, &lnprob) in step.pos.iter().zip(step.lnprob.iter()) {
                    if best
                        .as_ref()
                        .is_none_or(|(best_lnprob, _)| lnprob > *best_lnprob)
                    {
                        best = Some((lnprob, guess_to_vec(guess)));
                    }
                }
            })
            .map_err(|err| FitError::Minimizer(format!("MCMC sampling failed: {err}")))?;

        // ln p is single precision, compare the candidate with the start point exactly
        let start = MinimizeResult {
            x: x0.to_vec(),
            value: objective(x0),
            success: true,
        };
        let mcmc_result = match best {
            Some((_, x)) => {
                let value = objective(&x);
                if value <= start.value || start.value.is_nan() {
                    MinimizeResult {
                        x,
                        value,
                        success: true,
                    }
                } else {
                    start
                }
            }
            None => start,
        };
        let mcmc_result = MinimizeResult {
            success: mcmc_result.value.is_finite(),
            ..mcmc_result
        };

        match &self.fine_tuning_algorithm {
            Some(fine_tuning_algorithm) => {
                fine_tuning_algorithm.minimize(objective, &mcmc_result.x, bounds)
            }
            None => Ok(mcmc_result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::CobylaMinimizer;

    use approx::assert_abs_diff_eq;

    fn objective(x: &[f64]) -> f64 {
        100.0 * ((x[0] - 0.3).powi(2) + (x[1] - 0.7).powi(2))
    }

    #[test]
    fn finds_minimum() {
        let minimizer = McmcMinimizer::new(200, 0, None);
        let result = minimizer
            .minimize(objective, &[0.5, 0.5], (&[0.0, 0.0], &[1.0, 1.0]))
            .unwrap();
        assert!(result.success);
        assert_abs_diff_eq!(&result.x[..], &[0.3, 0.7][..], epsilon = 0.05);
        assert!(result.value <= objective(&[0.5, 0.5]));
    }

    #[test]
    fn stays_in_bounds() {
        let minimizer = McmcMinimizer::new(100, 1, None);
        // unconstrained minimum is outside the box
        let objective = |x: &[f64]| 100.0 * (x[0] - 2.0).powi(2);
        let result = minimizer
            .minimize(objective, &[0.8], (&[0.0], &[1.0]))
            .unwrap();
        assert!((0.0..=1.0).contains(&result.x[0]));
        assert!(result.x[0] > 0.9);
    }

    #[test]
    fn fine_tuning() {
        let fine = CobylaMinimizer::new(2000, 0.01, 1e-12, None);
        let minimizer = McmcMinimizer::new(32, 0, Some(fine.into()));
        let result = minimizer
            .minimize(objective, &[0.5, 0.5], (&[0.0, 0.0], &[1.0, 1.0]))
            .unwrap();
        assert_abs_diff_eq!(&result.x[..], &[0.3, 0.7][..], epsilon = 1e-4);
    }

    #[test]
    fn seeded() {
        let minimizer = McmcMinimizer::new(16, 42, None);
        let bounds: (&[f64], &[f64]) = (&[0.0, 0.0], &[1.0, 1.0]);
        let a = minimizer.minimize(objective, &[0.5, 0.5], bounds).unwrap();
        let b = minimizer.minimize(objective, &[0.5, 0.5], bounds).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_space() {
        let result = McmcMinimizer::default()
            .minimize(|_: &[f64]| 2.5, &[], (&[], &[]))
            .unwrap();
        assert!(result.x.is_empty());
        assert_eq!(result.value, 2.5);
        assert!(result.success);
    }

    #[test]
    fn nan_objective_fails() {
        let minimizer = McmcMinimizer::new(16, 0, None);
        let result = minimizer.minimize(|_: &[f64]| f64::NAN, &[0.5], (&[0.0], &[1.0]));
        match result {
            Err(FitError::Minimizer(message)) => {
                assert!(message.contains("NaN"), "{message}");
                assert!(!message.contains('\n'), "{message}");
            }
            _ => panic!("expected minimizer error, got {result:?}"),
        }
    }
}
