use crate::divergence::DivergenceTrait;
use crate::fit::bounds::within_bounds;
use crate::fit::problem::TemplateFamily;
use crate::fit::space::{SpaceTransform, SpaceTransformTrait};

/// Scalar cost of a flat coordinate vector: the divergence of the template built from it
///
/// A vector outside the box bounds of the coordinate space costs `+inf`, so minimizers without
/// native bound support still see a well-defined penalty.
#[derive(Clone, Debug)]
pub struct Objective<'a, D, F> {
    divergence: &'a D,
    family: &'a F,
    transform: &'a SpaceTransform,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl<'a, D, F> Objective<'a, D, F>
where
    D: DivergenceTrait,
    F: TemplateFamily,
{
    pub fn new(divergence: &'a D, family: &'a F, transform: &'a SpaceTransform) -> Self {
        let (lower, upper) = transform.bounds();
        Self {
            divergence,
            family,
            transform,
            lower,
            upper,
        }
    }

    pub fn bounds(&self) -> (&[f64], &[f64]) {
        (&self.lower, &self.upper)
    }

    pub fn transform(&self) -> &SpaceTransform {
        self.transform
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        if x.len() != self.lower.len() || !within_bounds(x, &self.lower, &self.upper) {
            return f64::INFINITY;
        }
        match self.transform.transform(x) {
            Ok(params) => {
                let template = self.family.template(&params);
                self.divergence.divergence(&template)
            }
            Err(_) => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn problem() -> VidaProblem<LeastSquares, impl Fn(&Params) -> Template> {
        VidaProblem::new(
            LeastSquares::new(&flat_image(1.0, 8, 1.0)),
            |p: &Params| -> Template { Constant::new(p["scale"].as_scalar().unwrap()).into() },
            Params::record([("scale", 0.1)]),
            Params::record([("scale", 10.0)]),
        )
        .unwrap()
    }

    #[test]
    fn outside_is_infinite() {
        let problem = problem();
        for unit_cube in [true, false] {
            let transform = problem.space_transform(unit_cube);
            let objective = problem.objective(&transform);
            let (lower, upper) = objective.bounds();
            let (lower, upper) = (lower[0], upper[0]);
            assert_eq!(objective.evaluate(&[lower - 1e-9]), f64::INFINITY);
            assert_eq!(objective.evaluate(&[upper + 1e-9]), f64::INFINITY);
            assert_eq!(objective.evaluate(&[f64::NAN]), f64::INFINITY);
            assert!(objective.evaluate(&[lower]).is_finite());
            assert!(objective.evaluate(&[upper]).is_finite());
        }
    }

    #[test]
    fn wrong_length_is_infinite() {
        let problem = problem();
        let transform = problem.space_transform(true);
        let objective = problem.objective(&transform);
        assert_eq!(objective.evaluate(&[]), f64::INFINITY);
        assert_eq!(objective.evaluate(&[0.5, 0.5]), f64::INFINITY);
    }

    #[test]
    fn composes_transform_family_divergence() {
        let problem = problem();
        let transform = problem.space_transform(true);
        let objective = problem.objective(&transform);
        // scale = 0.1 + 9.9 * u
        let u = 0.9 / 9.9;
        assert_abs_diff_eq!(objective.evaluate(&[u]), 0.0, epsilon = 1e-20);
        // scale = 0.5, intensity 4
        let u = 0.4 / 9.9;
        assert_relative_eq!(objective.evaluate(&[u]), 9.0, max_relative = 1e-12);
    }
}
