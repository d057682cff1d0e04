//! Analytic intensity templates
//!
//! Every template is defined in a local frame: centred at the origin with a unit characteristic
//! size. Place it on the image with [Template::modify] or the `modified` constructors of the
//! variants. Length-scale shape parameters are not rescaled by [Stretch] automatically, the
//! `modified` constructors pre-divide them by the stretch factor.

pub use template::{Template, TemplateTrait};

pub mod constant;
pub use constant::Constant;

pub mod gauss_disk;
pub use gauss_disk::GaussDisk;

pub mod gaussian;
pub use gaussian::Gaussian;

pub mod gaussian_ring;
pub use gaussian_ring::GaussianRing;

pub mod log_spiral;
pub use log_spiral::LogSpiral;

pub mod modified;
pub use modified::ModifiedTemplate;

pub mod modifier;
pub use modifier::{Modifier, ModifierTrait, Rotate, Shift, Stretch};

pub mod template;

/// Position angle of the point `(x, y)`, zero along +y and growing towards -x
#[inline]
pub fn position_angle(x: f64, y: f64) -> f64 {
    f64::atan2(-x, y)
}
