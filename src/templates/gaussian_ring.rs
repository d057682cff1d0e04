use crate::templates::template::*;

macro_const! {
    const DOC: &str = r#"
Infinitely thin ring of unit radius convolved with a Gaussian

$$
I(r) = \exp\left(-\frac{(r - 1)^2}{2\sigma^2}\right).
$$

- Shape parameters: **1**
- Radial extent: $1 + 3\sigma$
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GaussianRing {
    pub sigma: f64,
}

impl GaussianRing {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    /// Ring of radius `r0` and thickness `sigma` centred at `(x0, y0)`
    pub fn modified(r0: f64, sigma: f64, x0: f64, y0: f64) -> Template {
        Template::from(Self::new(sigma / r0))
            .modify([Stretch::new(r0).into(), Shift::new(x0, y0).into()])
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for GaussianRing {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl TemplateTrait for GaussianRing {
    #[inline]
    fn intensity_point(&self, x: f64, y: f64) -> f64 {
        let dr = x.hypot(y) - 1.0;
        f64::exp(-0.5 * dr * dr / (self.sigma * self.sigma))
    }

    fn radial_extent(&self) -> f64 {
        1.0 + 3.0 * self.sigma
    }
}
