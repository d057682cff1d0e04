use crate::templates::template::*;

macro_const! {
    const DOC: &str = r#"
Flat-top disk with a Gaussian edge

$$
I(r) = \begin{cases}
1, & r < 1,\\
\exp\left(-\frac{(r - 1)^2}{2\alpha^2}\right), & r \ge 1,
\end{cases}
$$
where $\alpha$ is the edge width in units of the disk radius.

- Shape parameters: **1**
- Radial extent: $1 + 3\alpha$
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GaussDisk {
    pub alpha: f64,
}

impl GaussDisk {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Disk of radius `r0` and edge width `sigma` centred at `(x0, y0)`
    pub fn modified(r0: f64, sigma: f64, x0: f64, y0: f64) -> Template {
        Template::from(Self::new(sigma / r0))
            .modify([Stretch::new(r0).into(), Shift::new(x0, y0).into()])
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for GaussDisk {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl TemplateTrait for GaussDisk {
    #[inline]
    fn intensity_point(&self, x: f64, y: f64) -> f64 {
        let r = x.hypot(y);
        if r < 1.0 {
            1.0
        } else {
            let dr = r - 1.0;
            f64::exp(-0.5 * dr * dr / (self.alpha * self.alpha))
        }
    }

    fn radial_extent(&self) -> f64 {
        1.0 + 3.0 * self.alpha
    }
}
