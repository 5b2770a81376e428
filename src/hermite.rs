//! Cubic Hermite kernels with tangents estimated from neighbouring control
//! values.
//!
//! Segment `i` of a sequence is described by the four values
//! `(y0, y1, y2, y3)`: `y1` and `y2` are its endpoints, `y0` and `y3` the
//! neighbours used for tangent estimation. Past either end of the sequence the
//! missing neighbour is reflected through the edge value, see [reflect].

use crate::polynomial::Polynomial;

/// Synthetic neighbour past the end of a sequence: `2·edge − adjacent`,
/// clamped to `[0, 1]`.
pub fn reflect(edge: f64, adjacent: f64) -> f64 {
    (2.0 * edge - adjacent).clamp(0.0, 1.0)
}

/// The four values around segment `index`. Requires `index + 1 < values.len()`.
pub fn neighbours(values: &[f64], index: usize) -> (f64, f64, f64, f64) {
    let n = values.len();
    let y1 = values[index];
    let y2 = values[index + 1];
    let y0 = if index > 0 {
        values[index - 1]
    } else {
        reflect(values[0], values[1])
    };
    let y3 = if index + 2 < n {
        values[index + 2]
    } else {
        reflect(values[n - 1], values[n - 2])
    };
    (y0, y1, y2, y3)
}

/// Half the central difference at every control point, using reflected
/// neighbours at both ends.
pub fn secant_tangents(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| {
            let previous = if i > 0 { values[i - 1] } else { reflect(values[0], values[1]) };
            let next = if i + 1 < n {
                values[i + 1]
            } else {
                reflect(values[n - 1], values[n - 2])
            };
            (next - previous) / 2.0
        })
        .collect()
}

pub fn cubic_hermite(y0: f64, y1: f64, y2: f64, y3: f64, t: f64) -> f64 {
    cubic_segment(y0, y1, y2, y3).evaluate(t)
}

/// Like [cubic_hermite], but a tangent is zero at a local extremum and
/// otherwise limited to three times the smaller adjacent secant, which keeps
/// the cubic inside `[min(y1, y2), max(y1, y2)]`. Tangents depend only on a
/// point and its two neighbours, so adjacent segments meet with equal slope.
pub fn monotone_cubic_hermite(y0: f64, y1: f64, y2: f64, y3: f64, t: f64) -> f64 {
    monotone_cubic_segment(y0, y1, y2, y3).evaluate(t)
}

pub(crate) fn cubic_segment(y0: f64, y1: f64, y2: f64, y3: f64) -> Polynomial {
    let k1 = (y2 - y0) / 2.0;
    let k2 = (y3 - y1) / 2.0;
    Polynomial::hermite(y1, y2, k1, k2)
}

pub(crate) fn monotone_cubic_segment(y0: f64, y1: f64, y2: f64, y3: f64) -> Polynomial {
    let k1 = monotone_tangent((y2 - y0) / 2.0, y1 - y0, y2 - y1);
    let k2 = monotone_tangent((y3 - y1) / 2.0, y2 - y1, y3 - y2);
    Polynomial::hermite(y1, y2, k1, k2)
}

/// Secant tangent `k` at a control point whose incoming and outgoing secants
/// are `left` and `right`. Zero at a local extremum or next to a flat
/// segment, otherwise at most `3·min(|left|, |right|)` (Fritsch–Carlson).
fn monotone_tangent(k: f64, left: f64, right: f64) -> f64 {
    if left * right <= 0.0 {
        return 0.0;
    }
    let limit = 3.0 * left.abs().min(right.abs());
    if right > 0.0 {
        k.max(0.0).min(limit)
    } else {
        k.min(0.0).max(-limit)
    }
}
