use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geometric coordinate change of a template
#[enum_dispatch]
pub trait ModifierTrait {
    /// Move a point of the template frame into the image frame
    fn apply(&self, x: f64, y: f64) -> (f64, f64);

    /// Move a point of the image frame back into the template frame
    fn apply_inverse(&self, x: f64, y: f64) -> (f64, f64);

    /// Radial extent of the modified template given the extent of the underlying one
    fn transform_extent(&self, extent: f64) -> f64;
}

#[enum_dispatch(ModifierTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum Modifier {
    Stretch(Stretch),
    Rotate(Rotate),
    Shift(Shift),
}

/// Scale the template by `sx` along x and `sy` along y
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Stretch {
    pub sx: f64,
    pub sy: f64,
}

impl Stretch {
    pub fn new(scale: f64) -> Self {
        Self::anisotropic(scale, scale)
    }

    pub fn anisotropic(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }
}

impl ModifierTrait for Stretch {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx, y * self.sy)
    }

    #[inline]
    fn apply_inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.sx, y / self.sy)
    }

    fn transform_extent(&self, extent: f64) -> f64 {
        extent * f64::max(self.sx.abs(), self.sy.abs())
    }
}

/// Rotate the template by `angle` radians, from +y towards -x
///
/// Sine and cosine are cached, so only the angle is serialized.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(into = "RotateParameters", from = "RotateParameters")]
pub struct Rotate {
    angle: f64,
    sin: f64,
    cos: f64,
}

impl Rotate {
    pub fn new(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { angle, sin, cos }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl ModifierTrait for Rotate {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.cos * x - self.sin * y, self.sin * x + self.cos * y)
    }

    #[inline]
    fn apply_inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (self.cos * x + self.sin * y, -self.sin * x + self.cos * y)
    }

    fn transform_extent(&self, extent: f64) -> f64 {
        extent
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "Rotate")]
struct RotateParameters {
    angle: f64,
}

impl From<Rotate> for RotateParameters {
    fn from(r: Rotate) -> Self {
        Self { angle: r.angle }
    }
}

impl From<RotateParameters> for Rotate {
    fn from(p: RotateParameters) -> Self {
        Self::new(p.angle)
    }
}

/// Move the template centre to `(dx, dy)`
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Shift {
    pub dx: f64,
    pub dy: f64,
}

impl Shift {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl ModifierTrait for Shift {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.dx, y + self.dy)
    }

    #[inline]
    fn apply_inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.dx, y - self.dy)
    }

    fn transform_extent(&self, extent: f64) -> f64 {
        extent + self.dx.hypot(self.dy)
    }
}
