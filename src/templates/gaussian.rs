use crate::templates::template::*;

macro_const! {
    const DOC: &str = r#"
Symmetric Gaussian of unit width

$$
I(r) = \exp\left(-\frac{r^2}{2}\right).
$$

- Shape parameters: **0**
- Radial extent: **4**
"#;
}

#[doc = DOC!()]
#[derive(Clone, Default, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Gaussian {}

impl Gaussian {
    pub fn new() -> Self {
        Self {}
    }

    /// Gaussian of width `sigma` centred at `(x0, y0)`
    pub fn modified(sigma: f64, x0: f64, y0: f64) -> Template {
        Template::from(Self::new()).modify([Stretch::new(sigma).into(), Shift::new(x0, y0).into()])
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl TemplateTrait for Gaussian {
    #[inline]
    fn intensity_point(&self, x: f64, y: f64) -> f64 {
        f64::exp(-0.5 * (x * x + y * y))
    }

    fn radial_extent(&self) -> f64 {
        4.0
    }
}
