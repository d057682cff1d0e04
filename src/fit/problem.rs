use crate::divergence::DivergenceTrait;
use crate::error::FitError;
use crate::fit::init::initial_point;
use crate::fit::minimizer::MinimizerTrait;
use crate::fit::objective::Objective;
use crate::fit::params::Params;
use crate::fit::prior::JointPrior;
use crate::fit::space::{SpaceTransform, SpaceTransformTrait};
use crate::templates::Template;

use log::{debug, trace, warn};
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Family of templates indexed by named parameters
///
/// Implemented for every `Fn(&Params) -> Template`.
pub trait TemplateFamily {
    fn template(&self, params: &Params) -> Template;
}

impl<F> TemplateFamily for F
where
    F: Fn(&Params) -> Template,
{
    fn template(&self, params: &Params) -> Template {
        self(params)
    }
}

/// Options of a single fit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FitOptions {
    /// Start point in parameter space, a random one is drawn if `None`
    ///
    /// It must have the shape of the bounds and lie within them, otherwise the fit fails with
    /// [FitError::ParamsMismatch] or [FitError::OutOfBounds].
    pub init_params: Option<Params>,
    /// Minimize in the unit hypercube if `true`, in the unconstrained space otherwise
    pub unit_cube: bool,
}

impl FitOptions {
    pub fn new(init_params: Option<Params>, unit_cube: bool) -> Self {
        Self {
            init_params,
            unit_cube,
        }
    }

    #[inline]
    pub fn default_init_params() -> Option<Params> {
        None
    }

    #[inline]
    pub fn default_unit_cube() -> bool {
        true
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::new(Self::default_init_params(), Self::default_unit_cube())
    }
}

/// Outcome of a fit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FitResult {
    /// Optimum in parameter space
    pub params: Params,
    /// Template built from `params`
    pub template: Template,
    /// Divergence of `template`
    pub value: f64,
    /// `false` if the minimizer stopped before reaching its convergence criterion
    pub success: bool,
}

/// Template fitting problem: find parameters within bounds minimizing the divergence
///
/// Bounds are validated on construction, a problem is immutable afterwards and can be fitted
/// any number of times, including concurrently.
#[derive(Clone, Debug)]
pub struct VidaProblem<D, F> {
    divergence: D,
    family: F,
    lower: Params,
    upper: Params,
    prior: JointPrior,
}

impl<D, F> VidaProblem<D, F>
where
    D: DivergenceTrait,
    F: TemplateFamily,
{
    /// Fails if `lower` and `upper` have different shapes or contain invalid bounds, see
    /// [JointPrior::distributionize]
    pub fn new(divergence: D, family: F, lower: Params, upper: Params) -> Result<Self, FitError> {
        let prior = JointPrior::distributionize(&lower, &upper)?;
        Ok(Self {
            divergence,
            family,
            lower,
            upper,
            prior,
        })
    }

    pub fn divergence(&self) -> &D {
        &self.divergence
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn lower_bounds(&self) -> &Params {
        &self.lower
    }

    pub fn upper_bounds(&self) -> &Params {
        &self.upper
    }

    pub fn prior(&self) -> &JointPrior {
        &self.prior
    }

    /// Number of scalar parameters
    pub fn dimension(&self) -> usize {
        self.prior.dimension()
    }

    pub fn space_transform(&self, unit_cube: bool) -> SpaceTransform {
        SpaceTransform::new(self.prior.clone(), unit_cube)
    }

    pub fn objective<'a>(&'a self, transform: &'a SpaceTransform) -> Objective<'a, D, F> {
        Objective::new(&self.divergence, &self.family, transform)
    }

    /// Minimize the divergence over the parameter space
    ///
    /// `rng` is used for the start point only, and is not touched if `options.init_params` is
    /// given. A minimizer which stops without converging still gives a result, with
    /// [FitResult::success] set to `false`.
    pub fn fit<M, R>(
        &self,
        minimizer: &M,
        rng: &mut R,
        options: &FitOptions,
    ) -> Result<FitResult, FitError>
    where
        M: MinimizerTrait,
        R: Rng,
    {
        let transform = self.space_transform(options.unit_cube);
        let objective = self.objective(&transform);
        let x0 = initial_point(rng, &transform, options.init_params.as_ref())?;
        debug!(
            "starting fit in {} space of dimension {} from {:?}",
            if transform.is_unit_cube() {
                "unit hypercube"
            } else {
                "flat"
            },
            transform.dimension(),
            x0
        );

        let result = minimizer.minimize(|x: &[f64]| objective.evaluate(x), &x0, objective.bounds())?;
        if !result.success {
            warn!(
                "minimizer stopped without convergence, divergence is {}",
                result.value
            );
        }

        let params = transform.transform(&result.x)?;
        let template = self.family.template(&params);
        debug!(
            "fit finished with divergence {} (success: {}) at {:?}",
            result.value, result.success, params
        );
        Ok(FitResult {
            params,
            template,
            value: result.value,
            success: result.success,
        })
    }

    /// Run `nstarts` independent fits in parallel from random start points
    ///
    /// Restart `i` draws its start point from [StdRng] seeded with `seed + i`. The result with
    /// the lowest divergence is returned, if every restart fails the error of the first one is.
    pub fn fit_restarts<M>(
        &self,
        minimizer: &M,
        nstarts: usize,
        seed: u64,
        unit_cube: bool,
    ) -> Result<FitResult, FitError>
    where
        M: MinimizerTrait + Sync,
        D: Sync,
        F: Sync,
    {
        assert!(nstarts > 0, "nstarts must be positive");
        let options = FitOptions::new(None, unit_cube);
        let results: Vec<_> = (0..nstarts)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let result = self.fit(minimizer, &mut rng, &options);
                trace!("restart {i}: {result:?}");
                result
            })
            .collect();

        let mut best: Option<FitResult> = None;
        let mut first_error = None;
        for result in results {
            match result {
                Ok(result) => {
                    if best
                        .as_ref()
                        .is_none_or(|b| result.value.total_cmp(&b.value).is_lt())
                    {
                        best = Some(result);
                    }
                }
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match (best, first_error) {
            (Some(best), _) => Ok(best),
            (None, Some(err)) => Err(err),
            (None, None) => unreachable!("nstarts is positive"),
        }
    }
}

/// Fit a template family to the image of the problem's divergence, see [VidaProblem::fit]
pub fn vida<D, F, M, R>(
    problem: &VidaProblem<D, F>,
    minimizer: &M,
    rng: &mut R,
    options: &FitOptions,
) -> Result<FitResult, FitError>
where
    D: DivergenceTrait,
    F: TemplateFamily,
    M: MinimizerTrait,
    R: Rng,
{
    problem.fit(minimizer, rng, options)
}
