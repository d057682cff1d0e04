use crate::divergence::divergence::*;

/// Rényi divergence of order `alpha` between normalized image and normalized template
///
/// $D_\alpha = \frac{1}{\alpha - 1} \ln \sum_i p_i^\alpha q_i^{1 - \alpha}$, `alpha` must be
/// positive and not equal to unity. `alpha = 1/2` gives twice the Bhattacharyya distance, the
/// limit `alpha -> 1` is the Kullback-Leibler divergence.
#[derive(Clone, Debug, PartialEq)]
pub struct Renyi {
    image: IntensityMap,
    alpha: f64,
}

impl Renyi {
    pub fn new(image: &IntensityMap, alpha: f64) -> Result<Self, ImageError> {
        assert!(alpha > 0.0, "alpha must be positive");
        assert!(alpha.is_finite(), "alpha must be finite");
        assert_ne!(alpha, 1.0, "alpha must not be unity");
        Ok(Self {
            image: image.normalized()?,
            alpha,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl DivergenceTrait for Renyi {
    fn divergence<T: TemplateTrait>(&self, template: &T) -> f64 {
        let alpha = self.alpha;
        let mut sum = 0.0;
        let flux = accumulate(&self.image, template, |p, q| {
            if p > 0.0 {
                sum += p.powf(alpha) * q.powf(1.0 - alpha);
            }
        });
        match flux {
            Some(flux) => sum.ln() / (alpha - 1.0) + flux.ln(),
            None => f64::INFINITY,
        }
    }
}
