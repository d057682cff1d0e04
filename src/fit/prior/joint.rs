use crate::error::{FitError, display_path};
use crate::fit::params::Params;
use crate::fit::prior::uniform::UniformPrior;

use itertools::Itertools;
use ndarray::{ArrayD, IxDyn};

/// Joint bounded distribution over a named parameter space
///
/// It has the same shape as the bounds it was built from, every scalar parameter is
/// independent and uniformly distributed between its bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum JointPrior {
    Uniform(UniformPrior),
    Tuple(Vec<JointPrior>),
    Record(Vec<(String, JointPrior)>),
    /// Array bounds give a product of uniform distributions over the flattened array
    Product {
        components: Vec<UniformPrior>,
        shape: Vec<usize>,
    },
}

impl JointPrior {
    /// Build the distribution from same-shaped lower and upper bounds
    ///
    /// Fails with [FitError::ShapeMismatch] if the shapes differ: a scalar paired with a tuple,
    /// tuples of different lengths, records with different key sets or arrays of different
    /// shapes. Every scalar bound must be finite and not larger than its upper counterpart.
    pub fn distributionize(lower: &Params, upper: &Params) -> Result<Self, FitError> {
        Self::from_bounds(lower, upper, "")
    }

    fn from_bounds(lower: &Params, upper: &Params, path: &str) -> Result<Self, FitError> {
        match (lower, upper) {
            (Params::Scalar(lower), Params::Scalar(upper)) => {
                Ok(Self::Uniform(uniform(*lower, *upper, display_path(path))?))
            }
            (Params::Tuple(lower_items), Params::Tuple(upper_items))
                if lower_items.len() == upper_items.len() =>
            {
                let items = lower_items
                    .iter()
                    .zip(upper_items)
                    .enumerate()
                    .map(|(i, (lower, upper))| {
                        Self::from_bounds(lower, upper, &format!("{path}.{i}"))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Self::Tuple(items))
            }
            (Params::Record(lower_fields), Params::Record(_))
                if same_keys(lower_fields, upper) =>
            {
                let fields = lower_fields
                    .iter()
                    .map(|(key, lower)| -> Result<_, FitError> {
                        let upper = &upper[key.as_str()];
                        let prior = Self::from_bounds(lower, upper, &format!("{path}.{key}"))?;
                        Ok((key.clone(), prior))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Self::Record(fields))
            }
            (Params::Array(lower_array), Params::Array(upper_array))
                if lower_array.shape() == upper_array.shape() =>
            {
                let components = lower_array
                    .iter()
                    .zip(upper_array.iter())
                    .enumerate()
                    .map(|(i, (&lower, &upper))| uniform(lower, upper, format!("{path}[{i}]")))
                    .collect::<Result<_, _>>()?;
                Ok(Self::Product {
                    components,
                    shape: lower_array.shape().to_vec(),
                })
            }
            _ => Err(FitError::shape_mismatch(
                path,
                lower.describe(),
                upper.describe(),
            )),
        }
    }

    /// Number of scalar parameters
    pub fn dimension(&self) -> usize {
        match self {
            Self::Uniform(_) => 1,
            Self::Tuple(items) => items.iter().map(Self::dimension).sum(),
            Self::Record(fields) => fields.iter().map(|(_, prior)| prior.dimension()).sum(),
            Self::Product { components, .. } => components.len(),
        }
    }

    /// Shape description in the same format as [Params::describe]
    pub fn describe(&self) -> String {
        match self {
            Self::Uniform(_) => "scalar".into(),
            Self::Tuple(items) => format!("tuple of {}", items.len()),
            Self::Record(fields) => {
                format!("record {{{}}}", fields.iter().map(|(k, _)| k).join(", "))
            }
            Self::Product { shape, .. } => format!("array {shape:?}"),
        }
    }

    /// Build a parameter point consuming flat coordinates from the front of `values`
    ///
    /// `f` maps a coordinate to the parameter value. `None` if `values` is too short.
    pub(crate) fn take_params<F>(&self, values: &mut &[f64], f: &F) -> Option<Params>
    where
        F: Fn(&UniformPrior, f64) -> f64,
    {
        match self {
            Self::Uniform(prior) => {
                let current = *values;
                let (&value, rest) = current.split_first()?;
                *values = rest;
                Some(Params::Scalar(f(prior, value)))
            }
            Self::Tuple(items) => items
                .iter()
                .map(|item| item.take_params(values, f))
                .collect::<Option<_>>()
                .map(Params::Tuple),
            Self::Record(fields) => fields
                .iter()
                .map(|(key, prior)| Some((key.clone(), prior.take_params(values, f)?)))
                .collect::<Option<_>>()
                .map(Params::Record),
            Self::Product { components, shape } => {
                let current = *values;
                let (head, rest) = current.split_at_checked(components.len())?;
                *values = rest;
                let flat = components
                    .iter()
                    .zip(head)
                    .map(|(prior, &value)| f(prior, value))
                    .collect();
                ArrayD::from_shape_vec(IxDyn(shape), flat)
                    .ok()
                    .map(Params::Array)
            }
        }
    }

    /// Flatten a parameter point into `out`, mapping every value with `f`
    ///
    /// Fails with [FitError::OutOfBounds] if a value is outside of its interval.
    pub(crate) fn collect_coords<F>(
        &self,
        params: &Params,
        path: &str,
        out: &mut Vec<f64>,
        f: &F,
    ) -> Result<(), FitError>
    where
        F: Fn(&UniformPrior, f64) -> f64,
    {
        match (self, params) {
            (Self::Uniform(prior), Params::Scalar(x)) => {
                check_contains(prior, *x, display_path(path))?;
                out.push(f(prior, *x));
            }
            (Self::Tuple(priors), Params::Tuple(items)) if priors.len() == items.len() => {
                for (i, (prior, item)) in priors.iter().zip(items).enumerate() {
                    prior.collect_coords(item, &format!("{path}.{i}"), out, f)?;
                }
            }
            (Self::Record(fields), Params::Record(values)) if fields.len() == values.len() => {
                for (key, prior) in fields {
                    let value = params.get(key).ok_or_else(|| {
                        FitError::params_mismatch(path, self.describe(), params.describe())
                    })?;
                    prior.collect_coords(value, &format!("{path}.{key}"), out, f)?;
                }
            }
            (Self::Product { components, shape }, Params::Array(array))
                if array.shape() == shape.as_slice() =>
            {
                for (i, (prior, &x)) in components.iter().zip(array.iter()).enumerate() {
                    check_contains(prior, x, format!("{path}[{i}]"))?;
                    out.push(f(prior, x));
                }
            }
            _ => {
                return Err(FitError::params_mismatch(
                    path,
                    self.describe(),
                    params.describe(),
                ));
            }
        }
        Ok(())
    }
}

fn uniform(lower: f64, upper: f64, path: String) -> Result<UniformPrior, FitError> {
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(FitError::NonFiniteBound { path });
    }
    if lower > upper {
        return Err(FitError::InvertedBounds { path, lower, upper });
    }
    Ok(UniformPrior::new(lower, upper))
}

fn check_contains(prior: &UniformPrior, value: f64, path: String) -> Result<(), FitError> {
    if prior.contains(value) {
        Ok(())
    } else {
        Err(FitError::OutOfBounds {
            path,
            value,
            lower: prior.lower(),
            upper: prior.upper(),
        })
    }
}

/// Both records have unique keys and the same key set
fn same_keys(lower_fields: &[(String, Params)], upper: &Params) -> bool {
    match upper {
        Params::Record(upper_fields) => {
            lower_fields.len() == upper_fields.len()
                && lower_fields.iter().map(|(key, _)| key).all_unique()
                && upper_fields.iter().map(|(key, _)| key).all_unique()
                && lower_fields.iter().all(|(key, _)| upper.get(key).is_some())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn bounds() -> (Params, Params) {
        let lower = Params::record([
            ("scale", Params::from(0.1)),
            ("shift", Params::tuple([-1.0, -2.0])),
            ("weights", Params::from(array![0.0, 0.0, 0.0])),
        ]);
        let upper = Params::record([
            ("shift", Params::tuple([1.0, 2.0])),
            ("weights", Params::from(array![1.0, 2.0, 3.0])),
            ("scale", Params::from(10.0)),
        ]);
        (lower, upper)
    }

    #[test]
    fn shape_follows_bounds() {
        let (lower, upper) = bounds();
        let prior = JointPrior::distributionize(&lower, &upper).unwrap();
        assert_eq!(prior.dimension(), 6);
        assert_eq!(prior.dimension(), lower.dimension());
        assert_eq!(prior.describe(), "record {scale, shift, weights}");
        match &prior {
            JointPrior::Record(fields) => {
                assert_eq!(fields[0].1, JointPrior::Uniform(UniformPrior::new(0.1, 10.0)));
                assert_eq!(fields[1].1.describe(), "tuple of 2");
                assert_eq!(fields[2].1.describe(), "array [3]");
            }
            _ => panic!("expected record, got {prior:?}"),
        }
    }

    #[test]
    fn scalar_vs_tuple() {
        let err = JointPrior::distributionize(&Params::from(0.0), &Params::tuple([1.0])).unwrap_err();
        assert_eq!(
            err,
            FitError::ShapeMismatch {
                path: ".".into(),
                lower: "scalar".into(),
                upper: "tuple of 1".into(),
            }
        );
    }

    #[test]
    fn tuple_lengths() {
        let lower = Params::tuple([0.0, 0.0]);
        let upper = Params::tuple([1.0, 1.0, 1.0]);
        assert!(matches!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn record_keys() {
        let lower = Params::record([("a", 0.0), ("b", 0.0)]);
        let upper = Params::record([("a", 1.0), ("c", 1.0)]);
        assert!(matches!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn duplicate_record_keys() {
        let lower = Params::record([("a", 0.0), ("a", 0.0)]);
        let upper = Params::record([("a", 1.0), ("b", 1.0)]);
        assert_eq!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::ShapeMismatch {
                path: ".".into(),
                lower: "record {a, a}".into(),
                upper: "record {a, b}".into(),
            })
        );
        assert!(JointPrior::distributionize(&upper, &lower).is_err());
        assert!(JointPrior::distributionize(&lower, &lower).is_err());
    }

    #[test]
    fn nested_path() {
        let lower = Params::record([("disk", Params::tuple([0.0, 0.0]))]);
        let upper = Params::record([("disk", Params::tuple([Params::from(1.0), Params::tuple([1.0])]))]);
        let err = JointPrior::distributionize(&lower, &upper).unwrap_err();
        assert_eq!(
            err,
            FitError::ShapeMismatch {
                path: ".disk.1".into(),
                lower: "scalar".into(),
                upper: "tuple of 1".into(),
            }
        );
    }

    #[test]
    fn array_shapes() {
        let lower = Params::from(array![0.0, 0.0]);
        let upper = Params::from(array![[1.0, 1.0]].into_dyn());
        assert!(matches!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn inverted_bounds() {
        let lower = Params::record([("a", 2.0)]);
        let upper = Params::record([("a", 1.0)]);
        assert_eq!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::InvertedBounds {
                path: ".a".into(),
                lower: 2.0,
                upper: 1.0,
            })
        );
    }

    #[test]
    fn infinite_bound() {
        let lower = Params::from(array![0.0, f64::NEG_INFINITY]);
        let upper = Params::from(array![1.0, 1.0]);
        assert_eq!(
            JointPrior::distributionize(&lower, &upper),
            Err(FitError::NonFiniteBound { path: "[1]".into() })
        );
    }

    #[test]
    fn take_and_collect() {
        let (lower, upper) = bounds();
        let prior = JointPrior::distributionize(&lower, &upper).unwrap();
        let identity = |_: &UniformPrior, x: f64| x;

        let coords = [1.0, 0.5, -1.5, 0.25, 1.5, 2.5];
        let mut values = &coords[..];
        let params = prior.take_params(&mut values, &identity).unwrap();
        assert!(values.is_empty());
        assert_eq!(params["shift"][1].as_scalar(), Some(-1.5));
        assert_eq!(params["weights"].as_array().unwrap()[&[2][..]], 2.5);

        let mut out = vec![];
        prior.collect_coords(&params, "", &mut out, &identity).unwrap();
        assert_eq!(out, coords);

        let mut short = &coords[..5];
        assert_eq!(prior.take_params(&mut short, &identity), None);
    }

    #[test]
    fn collect_mismatch() {
        let (lower, upper) = bounds();
        let prior = JointPrior::distributionize(&lower, &upper).unwrap();
        let params = Params::record([
            ("scale", Params::from(1.0)),
            ("shift", Params::from(0.0)),
            ("weights", Params::from(array![0.5, 0.5, 0.5])),
        ]);
        let err = prior
            .collect_coords(&params, "", &mut vec![], &|_: &UniformPrior, x: f64| x)
            .unwrap_err();
        assert_eq!(
            err,
            FitError::ParamsMismatch {
                path: ".shift".into(),
                expected: "tuple of 2".into(),
                actual: "scalar".into(),
            }
        );
    }

    #[test]
    fn collect_out_of_bounds() {
        let (lower, upper) = bounds();
        let prior = JointPrior::distributionize(&lower, &upper).unwrap();
        let identity = |_: &UniformPrior, x: f64| x;
        let params = |scale: f64, weight: f64| {
            Params::record([
                ("scale", Params::from(scale)),
                ("shift", Params::tuple([0.0, 0.0])),
                ("weights", Params::from(array![0.5, weight, 0.5])),
            ])
        };

        let err = prior
            .collect_coords(&params(20.0, 0.5), "", &mut vec![], &identity)
            .unwrap_err();
        assert_eq!(
            err,
            FitError::OutOfBounds {
                path: ".scale".into(),
                value: 20.0,
                lower: 0.1,
                upper: 10.0,
            }
        );

        let err = prior
            .collect_coords(&params(1.0, -0.5), "", &mut vec![], &identity)
            .unwrap_err();
        assert!(matches!(err, FitError::OutOfBounds { path, .. } if path == ".weights[1]"));

        let err = prior
            .collect_coords(&params(f64::NAN, 0.5), "", &mut vec![], &identity)
            .unwrap_err();
        assert!(matches!(err, FitError::OutOfBounds { .. }));

        // bounds themselves are inside
        prior
            .collect_coords(&params(10.0, 2.0), "", &mut vec![], &identity)
            .unwrap();
    }
}
