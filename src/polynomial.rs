/// Polynomial on a single segment, `coefficients[i]` multiplies `t^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// Cubic on `t ∈ [0, 1]` with `f(0) = y0`, `f(1) = y1`, `f'(0) = k0`, `f'(1) = k1`.
    pub fn hermite(y0: f64, y1: f64, k0: f64, k1: f64) -> Self {
        let c = k0;
        let d = y0;
        let b = 3.0 * (y1 - y0 - k0) + k0 - k1;
        let a = (y1 - y0 - k0) - b;
        Polynomial { coefficients: vec![d, c, b, a] }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation, `t·(t·(a·t + b) + c) + d` for a cubic.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * t + coefficient)
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, coefficient)| power as f64 * coefficient)
            .collect();
        Polynomial { coefficients }
    }
}
