use crate::divergence::divergence::*;

/// Bhattacharyya distance between normalized image and normalized template
///
/// $D = -\ln \sum_i \sqrt{p_i q_i}$, zero for identical maps and insensitive to the template
/// flux.
#[derive(Clone, Debug, PartialEq)]
pub struct Bhattacharyya {
    image: IntensityMap,
}

impl Bhattacharyya {
    pub fn new(image: &IntensityMap) -> Result<Self, ImageError> {
        Ok(Self {
            image: image.normalized()?,
        })
    }
}

impl DivergenceTrait for Bhattacharyya {
    fn divergence<T: TemplateTrait>(&self, template: &T) -> f64 {
        let mut overlap = 0.0;
        match accumulate(&self.image, template, |p, q| overlap += f64::sqrt(p * q)) {
            Some(flux) => -f64::ln(overlap / flux.sqrt()),
            None => f64::INFINITY,
        }
    }
}
