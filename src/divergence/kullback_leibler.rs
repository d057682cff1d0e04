use crate::divergence::divergence::*;

/// Kullback-Leibler divergence of the normalized template from the normalized image
///
/// $D = \sum_i p_i \ln(p_i / q_i)$. Template pixels are floored at [f64::MIN_POSITIVE], so a
/// template which is dark where the image is not gets a large but finite value.
#[derive(Clone, Debug, PartialEq)]
pub struct KullbackLeibler {
    image: IntensityMap,
    // sum of p ln p
    neg_entropy: f64,
}

impl KullbackLeibler {
    pub fn new(image: &IntensityMap) -> Result<Self, ImageError> {
        let image = image.normalized()?;
        let neg_entropy = image
            .data()
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.ln())
            .sum();
        Ok(Self { image, neg_entropy })
    }
}

impl DivergenceTrait for KullbackLeibler {
    fn divergence<T: TemplateTrait>(&self, template: &T) -> f64 {
        let mut cross = 0.0;
        let flux = accumulate(&self.image, template, |p, q| {
            if p > 0.0 {
                cross += p * f64::ln(q.max(f64::MIN_POSITIVE));
            }
        });
        match flux {
            Some(flux) => self.neg_entropy - cross + flux.ln(),
            None => f64::INFINITY,
        }
    }
}
