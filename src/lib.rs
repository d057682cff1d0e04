#![doc = include_str!("../README.md")]


pub mod divergence;
pub use divergence::{
    Bhattacharyya, Divergence, DivergenceTrait, KullbackLeibler, LeastSquares, Renyi,
};

mod error;
pub use error::{FitError, ImageError};

pub mod fit;
pub use fit::{
    CobylaMinimizer, FitOptions, FitResult, McmcMinimizer, MinimizeResult, Minimizer,
    MinimizerTrait, Params, SpaceTransform, SpaceTransformTrait, TemplateFamily, VidaProblem,
    vida,
};

pub mod image;
pub use image::{Grid, IntensityMap};

pub mod prelude;

pub mod templates;
pub use templates::*;

pub use ndarray;
