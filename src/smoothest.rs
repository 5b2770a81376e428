//! Smoothest cubic Hermite spline through a control sequence.
//!
//! Among all cubic Hermite splines interpolating the sequence, the solver
//! looks for one whose largest `|f''|` over every segment is minimal. The
//! bound `D` is found by bisection over `[0, upper]`, where `upper` is the
//! curvature of the spline with all tangents set to zero. Each check asks
//! whether tangents exist that keep every segment within `D`.
//!
//! On a unit segment the second derivative of the Hermite cubic with endpoint
//! values `v_i`, `v_{i+1}` and tangents `k_i`, `k_{i+1}` is linear in `t`, so
//! with `y = 6·(v_{i+1} − v_i)` the segment is within `D` iff
//!
//! ```text
//! |y − 4·k_i − 2·k_{i+1}| ≤ D      (t = 0)
//! |−y + 2·k_i + 4·k_{i+1}| ≤ D     (t = 1)
//! ```
//!
//! Feasibility propagates an admissible interval for each tangent from the
//! last knot to the first. Tangents are then chosen front to back inside
//! those intervals, as close as possible to the plain secant tangents.
//!
//! Tangents are cached against the [SequenceId] of the last sequence seen.

use log::{debug, trace, warn};
use nalgebra::{Matrix2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{InfeasibleBound, Result},
    hermite::secant_tangents,
    kernel::KernelKind,
    polynomial::Polynomial,
    sequence::{ControlSequence, SequenceId},
};

/// Tuning of the bound search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Number of bisection steps per cache miss.
    pub iterations: usize,
    /// Accept the first feasible midpoint instead of narrowing further.
    pub early_exit: bool,
    /// Relative slack when testing the linear constraints.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig { iterations: 10, early_exit: true, tolerance: 1e-9 }
    }
}

/// Counters exposed for observing the cache and the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Number of times tangents were (re)computed.
    pub tangent_computations: usize,
    /// Feasibility checks over the solver lifetime.
    pub feasibility_checks: usize,
    /// Feasibility checks made by the most recent search.
    pub last_search_checks: usize,
}

#[derive(Debug, Clone)]
struct TangentCache {
    key: SequenceId,
    tangents: Vec<f64>,
    bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TangentRange {
    low: f64,
    high: f64,
}

impl TangentRange {
    const UNBOUNDED: TangentRange = TangentRange { low: f64::NEG_INFINITY, high: f64::INFINITY };

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.low).min(self.high)
    }
}

/// Half-plane `a·k_i + b·k_{i+1} ≤ c`.
#[derive(Debug, Clone, Copy)]
struct Constraint {
    a: f64,
    b: f64,
    c: f64,
}

impl Constraint {
    fn holds(&self, point: &Vector2<f64>, tolerance: f64) -> bool {
        self.a * point.x + self.b * point.y <= self.c + tolerance * (1.0 + self.c.abs())
    }

    fn intersection(&self, other: &Constraint) -> Option<Vector2<f64>> {
        Matrix2::new(self.a, self.b, other.a, other.b)
            .try_inverse()
            .map(|inverse| inverse * Vector2::new(self.c, other.c))
    }
}

fn segment_constraints(delta: f64, bound: f64) -> [Constraint; 4] {
    let y = 6.0 * delta;
    [
        Constraint { a: -4.0, b: -2.0, c: bound - y },
        Constraint { a: 4.0, b: 2.0, c: bound + y },
        Constraint { a: 2.0, b: 4.0, c: bound + y },
        Constraint { a: -2.0, b: -4.0, c: bound - y },
    ]
}

/// Range of `k_i` for which some `k_{i+1}` inside `next` keeps the segment
/// within `bound`. The feasible region is a convex polygon, so the range is
/// spanned by its vertices.
fn project(delta: f64, bound: f64, next: TangentRange, tolerance: f64) -> Option<TangentRange> {
    let mut constraints = segment_constraints(delta, bound).to_vec();
    if next.high.is_finite() {
        constraints.push(Constraint { a: 0.0, b: 1.0, c: next.high });
    }
    if next.low.is_finite() {
        constraints.push(Constraint { a: 0.0, b: -1.0, c: -next.low });
    }

    let mut range = TangentRange { low: f64::INFINITY, high: f64::NEG_INFINITY };
    for (i, first) in constraints.iter().enumerate() {
        for second in &constraints[i + 1..] {
            let Some(vertex) = first.intersection(second) else {
                continue;
            };
            if constraints.iter().all(|c| c.holds(&vertex, tolerance)) {
                range.low = range.low.min(vertex.x);
                range.high = range.high.max(vertex.x);
            }
        }
    }

    (range.low <= range.high).then_some(range)
}

/// Smoothest-cubic kernel with its tangent cache.
#[derive(Debug, Clone, Default)]
pub struct SmoothestCubic {
    config: SolverConfig,
    stats: SolverStats,
    cache: Option<TangentCache>,
}

impl SmoothestCubic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        SmoothestCubic { config, ..Self::default() }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Bound used for the cached tangents, if any.
    pub fn bound(&self) -> Option<f64> {
        self.cache.as_ref().map(|cache| cache.bound)
    }

    /// Drops the cached tangents; the next evaluation recomputes them.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Value of segment `index` at local parameter `t`.
    /// # Example
    /// ```
    /// use piecewise_interpolation::{ControlSequence, SmoothestCubic};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let sequence = ControlSequence::new(vec![0.0, 1.0, 0.0]).unwrap();
    /// let mut solver = SmoothestCubic::new();
    ///
    /// assert_approx_eq!(1.0, solver.evaluate(&sequence, 0, 1.0).unwrap(), 1e-12);
    /// assert_eq!(1, solver.stats().tangent_computations);
    /// ```
    pub fn evaluate(&mut self, sequence: &ControlSequence, index: usize, t: f64) -> Result<f64> {
        KernelKind::SmoothestCubic.check_segment(sequence.len(), index)?;
        let values = sequence.values();
        let tangents = self.tangents(sequence)?;
        Ok(Polynomial::hermite(values[index], values[index + 1], tangents[index], tangents[index + 1])
            .evaluate(t))
    }

    /// Tangent at every control point, recomputed only when `sequence` is a
    /// different object than on the previous call.
    pub fn tangents(&mut self, sequence: &ControlSequence) -> Result<&[f64]> {
        KernelKind::SmoothestCubic.check_segment(sequence.len(), 0)?;

        let cache = match self.cache.take() {
            Some(cache) if cache.key == sequence.id() => cache,
            _ => self.compute(sequence),
        };
        Ok(&self.cache.insert(cache).tangents)
    }

    fn compute(&mut self, sequence: &ControlSequence) -> TangentCache {
        let values = sequence.values();
        debug!("computing smoothest cubic tangents for {:?} ({} points)", sequence.id(), values.len());
        self.stats.tangent_computations += 1;

        let outcome = self.search_bound(values).and_then(|bound| {
            self.tangents_for_derivative(values, bound).map(|tangents| (tangents, bound))
        });

        let (tangents, bound) = match outcome {
            Ok(found) => found,
            Err(error) => {
                warn!("{}, falling back to zero tangents", error);
                (Self::fallback_tangents(values), Self::maximum_second_derivative(values))
            }
        };
        TangentCache { key: sequence.id(), tangents, bound }
    }

    /// Bisects `[0, upper]` for the smallest bound the sequence admits.
    /// Makes at most `config.iterations` feasibility checks. With
    /// `config.early_exit` the first feasible midpoint is returned.
    pub(crate) fn search_bound(&mut self, values: &[f64]) -> std::result::Result<f64, InfeasibleBound> {
        self.stats.last_search_checks = 0;
        if values.len() < 2 {
            return Err(InfeasibleBound { bound: 0.0 });
        }

        let upper = Self::maximum_second_derivative(values);
        if upper <= 0.0 {
            return Ok(0.0);
        }

        let mut low = 0.0;
        let mut high = upper;
        let mut best = None;
        for _ in 0..self.config.iterations {
            let middle = (low + high) / 2.0;
            self.stats.feasibility_checks += 1;
            self.stats.last_search_checks += 1;

            let feasible = self.can_have_derivative(values, middle);
            trace!("bound {} feasible: {}", middle, feasible);
            if feasible {
                best = Some(middle);
                if self.config.early_exit {
                    break;
                }
                high = middle;
            } else {
                low = middle;
            }
        }

        debug!(
            "bound search: upper {}, result {:?} after {} checks",
            upper, best, self.stats.last_search_checks
        );
        best.ok_or(InfeasibleBound { bound: low })
    }

    /// Largest `|f''|` of the spline with all tangents zero, `max 6·|v_{i+1} − v_i|`.
    pub fn maximum_second_derivative(values: &[f64]) -> f64 {
        values
            .windows(2)
            .map(|w| {
                let curvature = Polynomial::hermite(w[0], w[1], 0.0, 0.0).derivative().derivative();
                curvature.evaluate(0.0).abs().max(curvature.evaluate(1.0).abs())
            })
            .fold(0.0, f64::max)
    }

    /// Whether tangents exist keeping `|f''| ≤ bound` on every segment.
    pub fn can_have_derivative(&self, values: &[f64], bound: f64) -> bool {
        self.admissible_ranges(values, bound).is_some()
    }

    fn admissible_ranges(&self, values: &[f64], bound: f64) -> Option<Vec<TangentRange>> {
        if values.len() < 2 || bound.is_nan() || bound < 0.0 {
            return None;
        }
        let n = values.len();
        let mut ranges = vec![TangentRange::UNBOUNDED; n];
        for i in (0..n - 1).rev() {
            ranges[i] = project(values[i + 1] - values[i], bound, ranges[i + 1], self.config.tolerance)?;
        }
        Some(ranges)
    }

    /// One tangent per control point keeping every segment within `bound`,
    /// each as close as the constraints allow to its secant tangent.
    pub(crate) fn tangents_for_derivative(
        &self,
        values: &[f64],
        bound: f64,
    ) -> std::result::Result<Vec<f64>, InfeasibleBound> {
        let ranges = self.admissible_ranges(values, bound).ok_or(InfeasibleBound { bound })?;
        let preferred = secant_tangents(values);
        let tolerance = self.config.tolerance;

        let mut tangents = Vec::with_capacity(values.len());
        tangents.push(ranges[0].clamp(preferred[0]));
        for i in 0..values.len() - 1 {
            let k = tangents[i];
            let y = 6.0 * (values[i + 1] - values[i]);
            let range = TangentRange {
                low: ranges[i + 1].low.max((y - 4.0 * k - bound) / 2.0).max((y - 2.0 * k - bound) / 4.0),
                high: ranges[i + 1].high.min((y - 4.0 * k + bound) / 2.0).min((y - 2.0 * k + bound) / 4.0),
            };

            let next = if range.low <= range.high {
                range.clamp(preferred[i + 1])
            } else if range.low - range.high <= tolerance * (1.0 + range.low.abs() + range.high.abs()) {
                (range.low + range.high) / 2.0
            } else {
                return Err(InfeasibleBound { bound });
            };
            tangents.push(next);
        }
        Ok(tangents)
    }

    /// Zero tangent at every point. Realizes exactly the upper bound of the search.
    pub fn fallback_tangents(values: &[f64]) -> Vec<f64> {
        vec![0.0; values.len()]
    }
}
