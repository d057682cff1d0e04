use crate::error::FitError;
use crate::fit::params::Params;
use crate::fit::space::{SpaceTransform, SpaceTransformTrait};

use rand::Rng;

/// Start vector in the coordinates of `transform`
///
/// A given `init_params` point is inverse-transformed and the random generator is not
/// touched. Otherwise the vector is drawn from the natural distribution of the space: uniform
/// in the unit hypercube, standard normal in the flat space.
pub fn initial_point<R: Rng>(
    rng: &mut R,
    transform: &SpaceTransform,
    init_params: Option<&Params>,
) -> Result<Vec<f64>, FitError> {
    match init_params {
        Some(params) => transform.inverse(params),
        None => Ok(transform.sample(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn transform(unit_cube: bool) -> SpaceTransform {
        let prior = JointPrior::distributionize(
            &Params::tuple([0.01, -1.0]),
            &Params::tuple([1.0, 1.0]),
        )
        .unwrap();
        SpaceTransform::new(prior, unit_cube)
    }

    #[test]
    fn init_params_ignore_rng() {
        let init = Params::tuple([0.3, 0.5]);
        for unit_cube in [true, false] {
            let transform = transform(unit_cube);
            let x1 = initial_point(&mut StdRng::seed_from_u64(0), &transform, Some(&init)).unwrap();
            let x2 = initial_point(&mut StdRng::seed_from_u64(1), &transform, Some(&init)).unwrap();
            assert_eq!(x1, x2);
            assert_eq!(x1, transform.inverse(&init).unwrap());
        }
    }

    #[test]
    fn random_start_depends_on_rng() {
        let transform = transform(true);
        let x1 = initial_point(&mut StdRng::seed_from_u64(0), &transform, None).unwrap();
        let x2 = initial_point(&mut StdRng::seed_from_u64(1), &transform, None).unwrap();
        assert_ne!(x1, x2);
        let x3 = initial_point(&mut StdRng::seed_from_u64(0), &transform, None).unwrap();
        assert_eq!(x1, x3);
    }

    #[test]
    fn bad_init_params() {
        let transform = transform(true);
        let init = Params::tuple([0.3]);
        assert!(matches!(
            initial_point(&mut StdRng::seed_from_u64(0), &transform, Some(&init)),
            Err(FitError::ParamsMismatch { .. })
        ));
    }
}
