/// Error returned from problem construction, space transforms and [crate::VidaProblem::fit]
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum FitError {
    #[error("lower and upper bounds have different shapes at `{path}`: {lower} vs {upper}")]
    ShapeMismatch {
        path: String,
        lower: String,
        upper: String,
    },

    #[error("lower bound {lower} is larger than upper bound {upper} at `{path}`")]
    InvertedBounds { path: String, lower: f64, upper: f64 },

    #[error("bound at `{path}` is not finite")]
    NonFiniteBound { path: String },

    #[error("parameters don't match the bounds at `{path}`: expected {expected}, got {actual}")]
    ParamsMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("parameter value {value} at `{path}` is outside of its bounds [{lower}, {upper}]")]
    OutOfBounds {
        path: String,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("vector has {actual} components, but the parameter space has dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("minimizer failed: {0}")]
    Minimizer(String),
}

/// Error returned from [crate::IntensityMap] and divergence constructors
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ImageError {
    #[error("image data has shape {actual:?}, but the grid has shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("image flux {0} is not positive and finite, the image cannot be normalized")]
    NonPositiveFlux(f64),
}

impl FitError {
    pub(crate) fn shape_mismatch(path: &str, lower: String, upper: String) -> Self {
        Self::ShapeMismatch {
            path: display_path(path),
            lower,
            upper,
        }
    }

    pub(crate) fn params_mismatch(path: &str, expected: String, actual: String) -> Self {
        Self::ParamsMismatch {
            path: display_path(path),
            expected,
            actual,
        }
    }
}

/// Root of a parameter tree is reported as "."
pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        ".".into()
    } else {
        path.into()
    }
}
