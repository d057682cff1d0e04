use itertools::Itertools;
use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Named parameter point, or a pair of bounds when used as the lower/upper limits of a problem
///
/// Bounds and points share the same shape: a scalar, a fixed-size tuple, a record of named
/// fields, or an n-dimensional array. Record fields are matched by name, so two records with
/// the same keys in different order describe the same space.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Params {
    Scalar(f64),
    Tuple(Vec<Params>),
    Record(Vec<(String, Params)>),
    Array(ArrayD<f64>),
}

impl Params {
    pub fn record<K, P, I>(fields: I) -> Self
    where
        K: Into<String>,
        P: Into<Params>,
        I: IntoIterator<Item = (K, P)>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn tuple<P, I>(items: I) -> Self
    where
        P: Into<Params>,
        I: IntoIterator<Item = P>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Field of a record, `None` for other shapes and for missing keys
    pub fn get(&self, key: &str) -> Option<&Params> {
        match self {
            Self::Record(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Params]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Number of scalar values in the flattened point
    pub fn dimension(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Tuple(items) => items.iter().map(Self::dimension).sum(),
            Self::Record(fields) => fields.iter().map(|(_, v)| v.dimension()).sum(),
            Self::Array(a) => a.len(),
        }
    }

    /// Short description of the shape, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(_) => "scalar".into(),
            Self::Tuple(items) => format!("tuple of {}", items.len()),
            Self::Record(fields) => {
                format!("record {{{}}}", fields.iter().map(|(k, _)| k).join(", "))
            }
            Self::Array(a) => format!("array {:?}", a.shape()),
        }
    }
}

impl From<f64> for Params {
    fn from(x: f64) -> Self {
        Self::Scalar(x)
    }
}

impl From<ArrayD<f64>> for Params {
    fn from(a: ArrayD<f64>) -> Self {
        Self::Array(a)
    }
}

impl From<Array1<f64>> for Params {
    fn from(a: Array1<f64>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl Index<&str> for Params {
    type Output = Params;

    fn index(&self, key: &str) -> &Params {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no field `{key}` in {}", self.describe()),
        }
    }
}

impl Index<usize> for Params {
    type Output = Params;

    fn index(&self, index: usize) -> &Params {
        match self {
            Self::Tuple(items) => &items[index],
            _ => panic!("{} cannot be indexed by position", self.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{IxDyn, array};

    fn disk() -> Params {
        Params::record([
            ("r0", Params::from(1.5)),
            ("shift", Params::tuple([0.25, -0.5])),
            ("coeffs", Params::from(array![1.0, 2.0, 3.0])),
        ])
    }

    #[test]
    fn access() {
        let p = disk();
        assert_eq!(p["r0"].as_scalar(), Some(1.5));
        assert_eq!(p["shift"][1].as_scalar(), Some(-0.5));
        assert_eq!(p["coeffs"].as_array().unwrap().shape(), &[3]);
        assert_eq!(p.get("missing"), None);
        assert_eq!(p["r0"].get("r0"), None);
    }

    #[test]
    fn dimension() {
        assert_eq!(disk().dimension(), 6);
        assert_eq!(Params::from(ArrayD::<f64>::zeros(IxDyn(&[2, 3]))).dimension(), 6);
    }

    #[test]
    fn describe() {
        assert_eq!(disk().describe(), "record {r0, shift, coeffs}");
        assert_eq!(disk()["shift"].describe(), "tuple of 2");
        assert_eq!(disk()["coeffs"].describe(), "array [3]");
    }

    #[test]
    #[should_panic]
    fn missing_key_panics() {
        let _ = &disk()["r1"];
    }

    #[test]
    fn serde_json() {
        let p = disk();
        let p_serde: Params = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(p, p_serde);
    }
}
