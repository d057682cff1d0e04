use crate::divergence::divergence::*;

/// Mean squared difference between raw image and template intensities
///
/// Unlike the other divergences this one is not normalized, so it constrains the template
/// flux as well as its shape.
#[derive(Clone, Debug, PartialEq)]
pub struct LeastSquares {
    image: IntensityMap,
}

impl LeastSquares {
    pub fn new(image: &IntensityMap) -> Self {
        Self {
            image: image.clone(),
        }
    }
}

impl DivergenceTrait for LeastSquares {
    fn divergence<T: TemplateTrait>(&self, template: &T) -> f64 {
        let n = self.image.grid().len();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .image
            .pixels()
            .map(|(x, y, p)| (template.intensity_point(x, y) - p).powi(2))
            .sum();
        sum / n as f64
    }
}
