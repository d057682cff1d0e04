//! Divergences scoring how well a template matches an image

#[allow(clippy::module_inception)]
mod divergence;
pub use divergence::{Divergence, DivergenceTrait};

mod bhattacharyya;
pub use bhattacharyya::Bhattacharyya;

mod kullback_leibler;
pub use kullback_leibler::KullbackLeibler;

mod least_squares;
pub use least_squares::LeastSquares;

mod renyi;
pub use renyi::Renyi;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn enum_dispatch_matches_variant() {
        let image = synthetic_image(Gaussian::modified(0.6, 0.2, 0.0), 24, 2.0);
        let template = Gaussian::modified(0.5, 0.0, 0.0);
        let pairs = [
            (
                Divergence::bhattacharyya(&image).unwrap(),
                Bhattacharyya::new(&image).unwrap().divergence(&template),
            ),
            (
                Divergence::kullback_leibler(&image).unwrap(),
                KullbackLeibler::new(&image).unwrap().divergence(&template),
            ),
            (
                Divergence::renyi(&image, 2.0).unwrap(),
                Renyi::new(&image, 2.0).unwrap().divergence(&template),
            ),
            (
                Divergence::least_squares(&image),
                LeastSquares::new(&image).divergence(&template),
            ),
        ];
        for (divergence, expected) in pairs {
            assert_eq!(divergence.divergence(&template), expected);
        }
    }

    #[test]
    fn empty_image_is_rejected() {
        let image = flat_image(0.0, 4, 1.0);
        assert!(Divergence::bhattacharyya(&image).is_err());
        assert!(Divergence::kullback_leibler(&image).is_err());
    }
}
