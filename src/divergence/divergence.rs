pub(super) use crate::error::ImageError;
pub(super) use crate::image::IntensityMap;
pub(super) use crate::templates::TemplateTrait;

pub(super) use std::fmt::Debug;

use crate::divergence::{Bhattacharyya, KullbackLeibler, LeastSquares, Renyi};

use enum_dispatch::enum_dispatch;

/// Distance between a template and the image the divergence is bound to
///
/// Lower values mean a better match. Implementations are pure: the template is evaluated at
/// the pixel centres of the bound image, and nothing is allocated or mutated.
#[enum_dispatch]
pub trait DivergenceTrait: Clone + Debug + Send + Sync {
    fn divergence<T: TemplateTrait>(&self, template: &T) -> f64;
}

/// Divergence bound to a target image
#[enum_dispatch(DivergenceTrait)]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Divergence {
    Bhattacharyya,
    KullbackLeibler,
    Renyi,
    LeastSquares,
}

impl Divergence {
    pub fn bhattacharyya(image: &IntensityMap) -> Result<Self, ImageError> {
        Ok(Bhattacharyya::new(image)?.into())
    }

    pub fn kullback_leibler(image: &IntensityMap) -> Result<Self, ImageError> {
        Ok(KullbackLeibler::new(image)?.into())
    }

    pub fn renyi(image: &IntensityMap, alpha: f64) -> Result<Self, ImageError> {
        Ok(Renyi::new(image, alpha)?.into())
    }

    pub fn least_squares(image: &IntensityMap) -> Self {
        LeastSquares::new(image).into()
    }
}

/// Template flux and a per-pixel accumulator, evaluated in a single pass over the image
///
/// Returns `None` if the template flux is not positive and finite.
pub(super) fn accumulate<T, F>(image: &IntensityMap, template: &T, mut f: F) -> Option<f64>
where
    T: TemplateTrait,
    F: FnMut(f64, f64),
{
    let mut flux = 0.0;
    for (x, y, p) in image.pixels() {
        let q = template.intensity_point(x, y);
        flux += q;
        f(p, q);
    }
    (flux.is_finite() && flux > 0.0).then_some(flux)
}
