use crate::templates::template::*;

macro_const! {
    const DOC: &str = r#"
Constant background

$$
I(x, y) = \frac{1}{s^2}
$$
everywhere in the plane. Absorbs the residual diffuse flux of composite fits.

- Shape parameters: **1**
- Radial extent: **1**
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Constant {
    pub scale: f64,
}

impl Constant {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TemplateTrait for Constant {
    #[inline]
    fn intensity_point(&self, _x: f64, _y: f64) -> f64 {
        (self.scale * self.scale).recip()
    }

    fn radial_extent(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use rand::prelude::*;

    check_template!(Constant);

    #[test]
    fn same_everywhere() {
        let mut rng = StdRng::seed_from_u64(0);
        for &scale in &[0.1, 0.5, 1.0, 3.0] {
            let template = Constant::new(scale);
            let desired = 1.0 / (scale * scale);
            for _ in 0..100 {
                let x = rng.random_range(-100.0..100.0);
                let y = rng.random_range(-100.0..100.0);
                assert_eq!(template.intensity_point(x, y), desired);
            }
        }
    }
}
