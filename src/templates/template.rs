pub(super) use crate::templates::modifier::{Modifier, Rotate, Shift, Stretch};

use enum_dispatch::enum_dispatch;
pub(super) use macro_const::macro_const;
pub(super) use schemars::JsonSchema;
pub(super) use serde::{Deserialize, Serialize};
pub(super) use std::fmt::Debug;

/// Closed-form intensity of an image feature
///
/// Implementors are defined in a local, origin-centred and unit-scaled frame, use
/// [Template::modify] to place them on the sky.
#[enum_dispatch]
pub trait TemplateTrait: Clone + Debug {
    /// Non-negative intensity at the point `(x, y)`
    fn intensity_point(&self, x: f64, y: f64) -> f64;

    /// Radius beyond which the intensity is negligible
    fn radial_extent(&self) -> f64;
}

/// All templates are available as variants of this enum
///
/// Consider to import [TemplateTrait] as well
#[enum_dispatch(TemplateTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum Template {
    Constant(super::constant::Constant),
    Gaussian(super::gaussian::Gaussian),
    GaussianRing(super::gaussian_ring::GaussianRing),
    GaussDisk(super::gauss_disk::GaussDisk),
    LogSpiral(super::log_spiral::LogSpiral),
    Modified(super::modified::ModifiedTemplate),
}

impl Template {
    /// Wrap the template with geometric modifiers
    ///
    /// Modifiers are given in the order they are applied to the image, e.g.
    /// `[Stretch, Rotate, Shift]` scales the template first and moves it last. Modifying an
    /// already modified template appends to its modifier list.
    pub fn modify<I>(self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        super::modified::ModifiedTemplate::new(self, modifiers).into()
    }

    /// Stretch the template by the isotropic scale `scale`
    pub fn stretched(self, scale: f64) -> Self {
        self.modify([Stretch::new(scale).into()])
    }

    /// Rotate the template by `angle` radians, see [crate::templates::position_angle]
    pub fn rotated(self, angle: f64) -> Self {
        self.modify([Rotate::new(angle).into()])
    }

    /// Shift the template centre to `(dx, dy)`
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        self.modify([Shift::new(dx, dy).into()])
    }
}
