/// Evaluates the polynomial of degree `n − 1` passing through every control
/// value, the x coordinate of `values[j]` being `j`:
///
/// `L(x) = Σ_j y_j · Π_{i≠j} (x − i) / (j − i)`
///
/// The whole sequence defines one global polynomial, so `x` is an absolute
/// position (segment index plus local parameter). Cost is O(n²) per call and
/// long sequences oscillate between the knots (Runge phenomenon).
/// Returns `0.0` for an empty slice.
pub fn lagrange(values: &[f64], x: f64) -> f64 {
    let n = values.len();
    let mut result = 0.0;
    for (j, y) in values.iter().enumerate() {
        let mut basis = 1.0;
        for i in 0..n {
            if i == j {
                continue;
            }
            basis *= (x - i as f64) / (j as f64 - i as f64);
        }
        result += y * basis;
    }
    result
}
