//! Template fitting by divergence minimization
//!
//! # Overview
//!
//! A [VidaProblem] couples a divergence bound to an image, a family of templates
//! `f(params) -> Template` and lower/upper bounds of the parameters. Fitting finds the
//! parameters within the bounds that minimize the divergence of the template they produce.
//!
//! # Parameter Spaces
//!
//! ## 1. Named Parameters
//!
//! [Params] as the template family sees them: scalars, tuples, records of named fields, or
//! arrays. The bounds have the same shape, and [JointPrior::distributionize] turns them into a
//! joint distribution which is uniform for every scalar parameter.
//!
//! ## 2. Minimizer Coordinates
//!
//! A flat vector of [JointPrior::dimension] values. [SpaceTransform] is the bijection between
//! the two spaces and has two modes:
//!
//! ```text
//! Hypercube: y = CDF(x),        y ∈ [0, 1]
//! Flat:      y = logit(CDF(x)), y ∈ [-20, 20]
//! ```
//!
//! Random start points follow the geometry of the space: uniform in the hypercube and standard
//! normal in the flat space.
//!
//! # Fitting Workflow
//!
//! 1. Build the space transform and the [Objective], which returns `+inf` outside the box
//!    bounds of the minimizer coordinates and `divergence(f(transform(y)))` inside.
//! 2. Get the start point with [initial_point]: inverse-transform the given `init_params`, or
//!    draw a random one.
//! 3. Run the selected [Minimizer].
//! 4. Transform the optimum back to named parameters and build the fitted template.
//!
//! Minimizer back-ends are derivative-free:
//! - [CobylaMinimizer]: bounded local minimizer, the default.
//! - [McmcMinimizer]: ensemble MCMC sampler returning the best visited point, optionally
//!   refined by another minimizer.

mod bounds;

pub mod cobyla;
pub use cobyla::CobylaMinimizer;

pub mod init;
pub use init::initial_point;

pub mod mcmc;
pub use mcmc::McmcMinimizer;

pub mod minimizer;
pub use minimizer::{MinimizeResult, Minimizer, MinimizerTrait};

pub mod objective;
pub use objective::Objective;

pub mod params;
pub use params::Params;

pub mod prior;
pub use prior::{JointPrior, UniformPrior};

pub mod problem;
pub use problem::{FitOptions, FitResult, TemplateFamily, VidaProblem, vida};

pub mod space;
pub use space::{
    FLAT_BOUND, FlatTransform, HypercubeTransform, SpaceTransform, SpaceTransformTrait,
};
