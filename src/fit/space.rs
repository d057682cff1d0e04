use crate::error::FitError;
use crate::fit::params::Params;
use crate::fit::prior::{JointPrior, UniformPrior};

use enum_dispatch::enum_dispatch;
use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt::Debug;

/// Box bound of every coordinate of [FlatTransform]
pub const FLAT_BOUND: f64 = 20.0;

/// Bijection between a named parameter space and flat coordinates seen by a minimizer
///
/// Implementations define the one-dimensional map of a single uniform parameter, the joint map
/// applies it to every scalar of the [JointPrior] in its flattening order.
#[enum_dispatch]
pub trait SpaceTransformTrait: Clone + Debug {
    fn prior(&self) -> &JointPrior;

    /// Coordinate to parameter value
    fn forward_1d(&self, prior: &UniformPrior, y: f64) -> f64;

    /// Parameter value to coordinate
    fn inverse_1d(&self, prior: &UniformPrior, x: f64) -> f64;

    /// Box bounds of a single coordinate
    fn coordinate_bounds(&self) -> (f64, f64);

    /// Random coordinate from the natural distribution of the space
    fn sample_1d<R: Rng>(&self, rng: &mut R) -> f64;

    fn dimension(&self) -> usize {
        self.prior().dimension()
    }

    /// Flat coordinates to named parameters
    fn transform(&self, y: &[f64]) -> Result<Params, FitError> {
        let mismatch = || FitError::DimensionMismatch {
            expected: self.dimension(),
            actual: y.len(),
        };
        if y.len() != self.dimension() {
            return Err(mismatch());
        }
        let mut values = y;
        self.prior()
            .take_params(&mut values, &|prior: &UniformPrior, value: f64| {
                self.forward_1d(prior, value)
            })
            .ok_or_else(mismatch)
    }

    /// Named parameters to flat coordinates
    fn inverse(&self, params: &Params) -> Result<Vec<f64>, FitError> {
        let mut y = Vec::with_capacity(self.dimension());
        self.prior()
            .collect_coords(params, "", &mut y, &|prior: &UniformPrior, x: f64| {
                self.inverse_1d(prior, x)
            })?;
        Ok(y)
    }

    /// Lower and upper box bounds of the flat coordinates
    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        let (lower, upper) = self.coordinate_bounds();
        let dimension = self.dimension();
        (vec![lower; dimension], vec![upper; dimension])
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dimension()).map(|_| self.sample_1d(rng)).collect()
    }
}

/// Map to the unit hypercube, every coordinate is the CDF of its parameter
#[derive(Clone, Debug, PartialEq)]
pub struct HypercubeTransform {
    prior: JointPrior,
}

impl HypercubeTransform {
    pub fn new(prior: JointPrior) -> Self {
        Self { prior }
    }
}

impl SpaceTransformTrait for HypercubeTransform {
    fn prior(&self) -> &JointPrior {
        &self.prior
    }

    fn forward_1d(&self, prior: &UniformPrior, y: f64) -> f64 {
        prior.quantile(y)
    }

    fn inverse_1d(&self, prior: &UniformPrior, x: f64) -> f64 {
        prior.cdf(x)
    }

    fn coordinate_bounds(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn sample_1d<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random()
    }
}

/// Map to unconstrained coordinates, every coordinate is the logit of its parameter's CDF
///
/// Bound values of parameters map to infinite logits, they are clipped to
/// `[-FLAT_BOUND, FLAT_BOUND]` so that a point on the boundary of the parameter space is still
/// a valid start point.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTransform {
    prior: JointPrior,
}

impl FlatTransform {
    pub fn new(prior: JointPrior) -> Self {
        Self { prior }
    }
}

impl SpaceTransformTrait for FlatTransform {
    fn prior(&self) -> &JointPrior {
        &self.prior
    }

    fn forward_1d(&self, prior: &UniformPrior, y: f64) -> f64 {
        prior.quantile(logistic(y))
    }

    fn inverse_1d(&self, prior: &UniformPrior, x: f64) -> f64 {
        logit(prior.cdf(x)).clamp(-FLAT_BOUND, FLAT_BOUND)
    }

    fn coordinate_bounds(&self) -> (f64, f64) {
        (-FLAT_BOUND, FLAT_BOUND)
    }

    fn sample_1d<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.sample(StandardNormal)
    }
}

fn logistic(y: f64) -> f64 {
    1.0 / (1.0 + f64::exp(-y))
}

fn logit(u: f64) -> f64 {
    f64::ln(u) - f64::ln_1p(-u)
}

/// Coordinate system the minimizer works in
#[enum_dispatch(SpaceTransformTrait)]
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceTransform {
    Hypercube(HypercubeTransform),
    Flat(FlatTransform),
}

impl SpaceTransform {
    /// Unit hypercube if `unit_cube` is `true`, unconstrained space otherwise
    pub fn new(prior: JointPrior, unit_cube: bool) -> Self {
        if unit_cube {
            HypercubeTransform::new(prior).into()
        } else {
            FlatTransform::new(prior).into()
        }
    }

    pub fn is_unit_cube(&self) -> bool {
        matches!(self, Self::Hypercube(_))
    }
}
