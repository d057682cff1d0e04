/// Uniform distribution of a single parameter on a closed interval
///
/// Degenerate intervals with `lower == upper` are allowed, such a parameter is fixed: its CDF
/// is 1/2 everywhere and every quantile is the fixed value.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformPrior {
    lower: f64,
    upper: f64,
}

impl UniformPrior {
    /// Bounds are validated by [JointPrior::distributionize](crate::fit::JointPrior::distributionize)
    pub(crate) fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// `false` for NaN
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Values outside of the interval are clamped
    pub fn cdf(&self, x: f64) -> f64 {
        let width = self.width();
        if width == 0.0 {
            return 0.5;
        }
        ((x - self.lower) / width).clamp(0.0, 1.0)
    }

    pub fn quantile(&self, u: f64) -> f64 {
        let x = self.lower + u.clamp(0.0, 1.0) * self.width();
        // rounding may overshoot the upper bound
        x.min(self.upper)
    }
}
