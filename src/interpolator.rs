use crate::{
    error::{InterpolationError, Result},
    hermite::{cubic_hermite, monotone_cubic_hermite, neighbours},
    kernel::{cosine, linear, nearest, KernelKind},
    lagrange::lagrange,
    sequence::ControlSequence,
    smoothest::{SmoothestCubic, SolverConfig},
};

const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Number of points [Interpolator::sample] produces, `None` when it does not fit in `usize`.
fn sample_count(segments: usize, samples_per_segment: usize) -> Option<usize> {
    segments.checked_mul(samples_per_segment)?.checked_add(1)
}

/// Evaluates any [KernelKind] over a [ControlSequence].
///
/// Only the smoothest-cubic kernel keeps state: the interpolator owns its
/// [SmoothestCubic] solver, whose tangents are cached per sequence object.
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    smoothest: SmoothestCubic,
}

impl Interpolator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Interpolator { smoothest: SmoothestCubic::with_config(config) }
    }

    pub fn solver(&self) -> &SmoothestCubic {
        &self.smoothest
    }

    pub fn solver_mut(&mut self) -> &mut SmoothestCubic {
        &mut self.smoothest
    }

    /// Value of segment `index` at local parameter `t ∈ [0, 1]`. `t` is not clamped.
    /// # Example
    /// ```
    /// use piecewise_interpolation::{ControlSequence, Interpolator, KernelKind};
    ///
    /// let sequence = ControlSequence::new(vec![0.0, 1.0, 0.0]).unwrap();
    /// let mut interpolator = Interpolator::new();
    ///
    /// assert_eq!(1.0, interpolator.evaluate(KernelKind::Nearest, &sequence, 0, 0.6).unwrap());
    /// assert_eq!(0.5, interpolator.evaluate(KernelKind::Linear, &sequence, 0, 0.5).unwrap());
    /// ```
    /// # Errors
    /// Error is returned when the sequence has fewer than two points or `index` is not a segment.
    /// ```
    /// use piecewise_interpolation::{ControlSequence, Interpolator, KernelKind};
    ///
    /// let sequence = ControlSequence::new(vec![0.0, 1.0]).unwrap();
    /// let mut interpolator = Interpolator::new();
    ///
    /// assert!(interpolator.evaluate(KernelKind::Cosine, &sequence, 1, 0.5).is_err());
    /// ```
    pub fn evaluate(
        &mut self,
        kind: KernelKind,
        sequence: &ControlSequence,
        index: usize,
        t: f64,
    ) -> Result<f64> {
        kind.check_segment(sequence.len(), index)?;
        let values = sequence.values();

        let value = match kind {
            KernelKind::Nearest => nearest(values[index], values[index + 1], t),
            KernelKind::Linear => linear(values[index], values[index + 1], t),
            KernelKind::Cosine => cosine(values[index], values[index + 1], t),
            KernelKind::CubicHermite => {
                let (y0, y1, y2, y3) = neighbours(values, index);
                cubic_hermite(y0, y1, y2, y3, t)
            }
            KernelKind::MonotoneCubicHermite => {
                let (y0, y1, y2, y3) = neighbours(values, index);
                monotone_cubic_hermite(y0, y1, y2, y3, t)
            }
            KernelKind::Lagrange => lagrange(values, index as f64 + t),
            KernelKind::SmoothestCubic => self.smoothest.evaluate(sequence, index, t)?,
        };
        Ok(value)
    }

    /// Value at absolute position `x ∈ [0, n − 1]`, the x coordinate of a
    /// control value being its index.
    pub fn interpolate(&mut self, kind: KernelKind, sequence: &ControlSequence, x: f64) -> Result<f64> {
        kind.check_segment(sequence.len(), 0)?;
        if !Self::is_in_range(sequence, x) {
            return Err(InterpolationError::PositionOutOfRange { x, max: sequence.segment_count() as f64 });
        }
        let (index, t) = Self::find_segment(sequence, x);
        self.evaluate(kind, sequence, index, t)
    }

    /// Values at every position of `x_vector`. Nothing is evaluated when any position is out of range.
    pub fn batch_interpolate(
        &mut self,
        kind: KernelKind,
        sequence: &ControlSequence,
        x_vector: &[f64],
    ) -> Result<Vec<f64>> {
        kind.check_segment(sequence.len(), 0)?;
        if let Some(x) = x_vector.iter().find(|x| !Self::is_in_range(sequence, **x)) {
            return Err(InterpolationError::PositionOutOfRange { x: *x, max: sequence.segment_count() as f64 });
        }

        let mut results = Vec::with_capacity(x_vector.len());
        for x in x_vector {
            let (index, t) = Self::find_segment(sequence, *x);
            results.push(self.evaluate(kind, sequence, index, t)?);
        }
        Ok(results)
    }

    /// Evenly spaced `(x, y)` points over the whole sequence, `samples_per_segment`
    /// steps per segment plus the final control point.
    pub fn sample(
        &mut self,
        kind: KernelKind,
        sequence: &ControlSequence,
        samples_per_segment: usize,
    ) -> Result<Vec<(f64, f64)>> {
        kind.check_segment(sequence.len(), 0)?;
        let samples_per_segment = samples_per_segment.max(1);
        let segments = sequence.segment_count();

        let capacity = sample_count(segments, samples_per_segment).unwrap_or(0);
        let mut points = Vec::with_capacity(capacity.min(MAX_PREALLOCATED_SAMPLES));
        for index in 0..segments {
            for step in 0..samples_per_segment {
                let t = step as f64 / samples_per_segment as f64;
                points.push((index as f64 + t, self.evaluate(kind, sequence, index, t)?));
            }
        }
        points.push((segments as f64, self.evaluate(kind, sequence, segments - 1, 1.0)?));
        Ok(points)
    }

    fn is_in_range(sequence: &ControlSequence, x: f64) -> bool {
        0.0 <= x && x <= sequence.segment_count() as f64
    }

    /// Segment index and local parameter of `x`. The last control point maps
    /// to the end of the last segment.
    fn find_segment(sequence: &ControlSequence, x: f64) -> (usize, f64) {
        let last = sequence.segment_count() - 1;
        let index = (x.floor() as usize).min(last);
        (index, x - index as f64)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        hermite::{cubic_segment, monotone_cubic_segment},
        polynomial::Polynomial,
    };

    fn peak() -> ControlSequence {
        ControlSequence::new(vec![0.0, 1.0, 0.0]).unwrap()
    }

    #[test]
    fn end_to_end_elementary_kernels() {
        let eps = 1e-12;
        let sequence = peak();
        let mut interpolator = Interpolator::new();

        assert_eq!(1.0, interpolator.evaluate(KernelKind::Nearest, &sequence, 0, 0.6).unwrap());
        assert_approx_eq!(0.5, interpolator.evaluate(KernelKind::Linear, &sequence, 0, 0.5).unwrap(), eps);
        assert_approx_eq!(0.5, interpolator.evaluate(KernelKind::Cosine, &sequence, 1, 0.5).unwrap(), eps);
    }

    #[test]
    fn every_kernel_interpolates_control_values() {
        let eps = 1e-12;
        let mut rng = StdRng::seed_from_u64(17);
        let mut interpolator = Interpolator::new();

        for _ in 0..100 {
            let n = rng.gen_range(2..8);
            let sequence = ControlSequence::new((0..n).map(|_| rng.gen::<f64>()).collect()).unwrap();
            for kind in KernelKind::ALL {
                for i in 0..sequence.segment_count() {
                    let start = interpolator.evaluate(kind, &sequence, i, 0.0).unwrap();
                    let end = interpolator.evaluate(kind, &sequence, i, 1.0).unwrap();
                    assert_approx_eq!(sequence.values()[i], start, eps);
                    assert_approx_eq!(sequence.values()[i + 1], end, eps);
                }
            }
        }
    }

    #[test]
    fn monotone_kernel_never_overshoots() {
        let eps = 1e-12;
        let mut rng = StdRng::seed_from_u64(23);
        let mut interpolator = Interpolator::new();

        for _ in 0..200 {
            let n = rng.gen_range(2..8);
            let sequence = ControlSequence::new((0..n).map(|_| rng.gen::<f64>()).collect()).unwrap();
            for i in 0..sequence.segment_count() {
                let low = sequence.values()[i].min(sequence.values()[i + 1]);
                let high = sequence.values()[i].max(sequence.values()[i + 1]);
                for step in 0..=40 {
                    let t = step as f64 / 40.0;
                    let value = interpolator
                        .evaluate(KernelKind::MonotoneCubicHermite, &sequence, i, t)
                        .unwrap();
                    assert!(value >= low - eps && value <= high + eps);
                }
            }
        }
    }

    #[test]
    fn hermite_kernels_are_continuously_differentiable() {
        let eps = 1e-9;
        let mut rng = StdRng::seed_from_u64(31);
        let mut interpolator = Interpolator::new();

        for _ in 0..200 {
            let n = rng.gen_range(3..9);
            let sequence = ControlSequence::new((0..n).map(|_| rng.gen::<f64>()).collect()).unwrap();
            let values = sequence.values();
            let tangents = interpolator.solver_mut().tangents(&sequence).unwrap().to_vec();

            let segments: Vec<[Polynomial; 3]> = (0..sequence.segment_count())
                .map(|i| {
                    let (y0, y1, y2, y3) = neighbours(values, i);
                    [
                        cubic_segment(y0, y1, y2, y3).derivative(),
                        monotone_cubic_segment(y0, y1, y2, y3).derivative(),
                        Polynomial::hermite(y1, y2, tangents[i], tangents[i + 1]).derivative(),
                    ]
                })
                .collect();

            for pair in segments.windows(2) {
                for (left, right) in pair[0].iter().zip(pair[1].iter()) {
                    assert_approx_eq!(left.evaluate(1.0), right.evaluate(0.0), eps);
                }
            }
        }
    }

    #[test]
    fn monotone_kernel_has_no_kink_at_a_peak() {
        let eps = 1e-6;
        let h = 1e-7;
        let sequence = ControlSequence::new(vec![0.0, 1.0, 0.9]).unwrap();
        let mut interpolator = Interpolator::new();
        let kind = KernelKind::MonotoneCubicHermite;

        let at_knot = interpolator.evaluate(kind, &sequence, 1, 0.0).unwrap();
        let before = interpolator.evaluate(kind, &sequence, 0, 1.0 - h).unwrap();
        let after = interpolator.evaluate(kind, &sequence, 1, h).unwrap();

        assert_approx_eq!(0.0, (at_knot - before) / h, eps);
        assert_approx_eq!(0.0, (after - at_knot) / h, eps);
    }

    #[test]
    fn lagrange_of_two_points_is_linear() {
        let sequence = ControlSequence::new(vec![0.0, 1.0]).unwrap();
        let mut interpolator = Interpolator::new();

        for step in 0..=10 {
            let t = step as f64 / 10.0;
            assert_eq!(t, interpolator.evaluate(KernelKind::Lagrange, &sequence, 0, t).unwrap());
        }
    }

    #[test]
    fn lagrange_uses_absolute_position() {
        let eps = 1e-12;
        let sequence = ControlSequence::new(vec![0.0, 0.25, 1.0]).unwrap();
        let mut interpolator = Interpolator::new();

        // parabola x^2 / 4, second segment at t = 0.5 is x = 1.5
        let value = interpolator.evaluate(KernelKind::Lagrange, &sequence, 1, 0.5).unwrap();
        assert_approx_eq!(0.5625, value, eps);
    }

    #[test]
    fn cubic_kernels_use_reflected_boundaries() {
        let eps = 1e-12;
        let sequence = ControlSequence::new(vec![0.2, 0.4, 0.8]).unwrap();
        let mut interpolator = Interpolator::new();

        let value = interpolator.evaluate(KernelKind::CubicHermite, &sequence, 0, 0.5).unwrap();
        assert_approx_eq!(cubic_hermite(0.0, 0.2, 0.4, 0.8, 0.5), value, eps);

        let value = interpolator.evaluate(KernelKind::CubicHermite, &sequence, 1, 0.5).unwrap();
        assert_approx_eq!(cubic_hermite(0.2, 0.4, 0.8, 1.0, 0.5), value, eps);
    }

    #[test]
    fn errors_are_reported() {
        let mut interpolator = Interpolator::new();
        let single = ControlSequence::new(vec![0.5]).unwrap();
        let sequence = peak();

        for kind in KernelKind::ALL {
            assert_eq!(
                Err(InterpolationError::InvalidSequence { kernel: kind, required: 2, actual: 1 }),
                interpolator.evaluate(kind, &single, 0, 0.5)
            );
            assert_eq!(
                Err(InterpolationError::IndexOutOfRange { index: 2, segments: 2 }),
                interpolator.evaluate(kind, &sequence, 2, 0.5)
            );
        }
    }

    #[test]
    fn smoothest_cubic_cache_through_interpolator() {
        let mut interpolator = Interpolator::new();
        let sequence = peak();
        let other = peak();

        interpolator.evaluate(KernelKind::SmoothestCubic, &sequence, 0, 0.2).unwrap();
        interpolator.evaluate(KernelKind::SmoothestCubic, &sequence, 1, 0.8).unwrap();
        assert_eq!(1, interpolator.solver().stats().tangent_computations);

        interpolator.evaluate(KernelKind::SmoothestCubic, &other, 1, 0.8).unwrap();
        assert_eq!(2, interpolator.solver().stats().tangent_computations);

        interpolator.solver_mut().invalidate();
        assert_eq!(None, interpolator.solver().bound());
    }

    #[test]
    fn stateless_kernels_leave_the_solver_alone() {
        let mut interpolator = Interpolator::new();
        let sequence = peak();

        for kind in KernelKind::ALL.iter().filter(|k| **k != KernelKind::SmoothestCubic) {
            interpolator.evaluate(*kind, &sequence, 0, 0.5).unwrap();
        }
        assert_eq!(0, interpolator.solver().stats().tangent_computations);
    }

    #[test]
    fn with_config_reaches_the_solver() {
        let config = SolverConfig { iterations: 4, early_exit: false, tolerance: 1e-6 };
        let mut interpolator = Interpolator::with_config(config);
        interpolator.evaluate(KernelKind::SmoothestCubic, &peak(), 0, 0.5).unwrap();

        assert_eq!(&config, interpolator.solver().config());
        assert_eq!(4, interpolator.solver().stats().last_search_checks);
    }

    #[test]
    fn interpolate_at_absolute_positions() {
        let eps = 1e-12;
        let sequence = ControlSequence::new(vec![0.0, 1.0, 0.5]).unwrap();
        let mut interpolator = Interpolator::new();

        assert_approx_eq!(0.0, interpolator.interpolate(KernelKind::Linear, &sequence, 0.0).unwrap(), eps);
        assert_approx_eq!(0.25, interpolator.interpolate(KernelKind::Linear, &sequence, 0.25).unwrap(), eps);
        assert_approx_eq!(1.0, interpolator.interpolate(KernelKind::Linear, &sequence, 1.0).unwrap(), eps);
        assert_approx_eq!(0.75, interpolator.interpolate(KernelKind::Linear, &sequence, 1.5).unwrap(), eps);
        assert_approx_eq!(0.5, interpolator.interpolate(KernelKind::Linear, &sequence, 2.0).unwrap(), eps);

        assert_eq!(
            Err(InterpolationError::PositionOutOfRange { x: 2.5, max: 2.0 }),
            interpolator.interpolate(KernelKind::Linear, &sequence, 2.5)
        );
        assert!(interpolator.interpolate(KernelKind::Linear, &sequence, -0.1).is_err());
        assert!(interpolator.interpolate(KernelKind::Linear, &sequence, f64::NAN).is_err());
    }

    #[test]
    fn batch_interpolate() {
        let eps = 1e-12;
        let sequence = ControlSequence::new(vec![0.0, 1.0, 0.5]).unwrap();
        let mut interpolator = Interpolator::new();

        let x_vector = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let result = interpolator.batch_interpolate(KernelKind::Linear, &sequence, &x_vector).unwrap();
        let expected = [0.0, 0.5, 1.0, 0.75, 0.5];

        assert_eq!(x_vector.len(), result.len());
        for i in 0..x_vector.len() {
            assert_approx_eq!(expected[i], result[i], eps);
        }

        let x_vector = vec![0.0, 0.5, 3.0];
        assert!(interpolator.batch_interpolate(KernelKind::SmoothestCubic, &sequence, &x_vector).is_err());
        assert_eq!(0, interpolator.solver().stats().tangent_computations);
    }

    #[test]
    fn sample_covers_every_segment() {
        let sequence = peak();
        let mut interpolator = Interpolator::new();
        let points = interpolator.sample(KernelKind::Cosine, &sequence, 4).unwrap();

        assert_eq!(9, points.len());
        assert_eq!((0.0, 0.0), points[0]);
        assert_eq!((1.0, 1.0), points[4]);
        assert_eq!((2.0, 0.0), points[8]);
        assert!(points.windows(2).all(|w| w[0].0 < w[1].0));

        let points = interpolator.sample(KernelKind::Linear, &sequence, 0).unwrap();
        assert_eq!(3, points.len());
    }

    #[test]
    fn sample_count_does_not_overflow() {
        assert_eq!(Some(9), sample_count(2, 4));
        assert_eq!(Some(1), sample_count(0, usize::MAX));
        assert_eq!(None, sample_count(2, usize::MAX));
        assert_eq!(None, sample_count(1, usize::MAX));
    }
}
