/// `true` if every coordinate is within its closed interval, NaN coordinates are outside
pub(super) fn within_bounds(x: &[f64], lower: &[f64], upper: &[f64]) -> bool {
    for ((&x, &lower), &upper) in x.iter().zip(lower).zip(upper) {
        if !(lower <= x && x <= upper) {
            return false;
        }
    }
    true
}
