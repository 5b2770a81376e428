use std::{f64::consts::PI, fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InterpolationError, Result};

/// Interpolation kernels available through [crate::Interpolator].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KernelKind {
    Nearest,
    Linear,
    Cosine,
    CubicHermite,
    MonotoneCubicHermite,
    Lagrange,
    SmoothestCubic,
}

impl KernelKind {
    pub const ALL: [KernelKind; 7] = [
        KernelKind::Nearest,
        KernelKind::Linear,
        KernelKind::Cosine,
        KernelKind::CubicHermite,
        KernelKind::MonotoneCubicHermite,
        KernelKind::Lagrange,
        KernelKind::SmoothestCubic,
    ];

    /// Human readable name, as shown next to a plotted curve.
    pub fn name(&self) -> &'static str {
        match self {
            KernelKind::Nearest => "Nearest",
            KernelKind::Linear => "Linear",
            KernelKind::Cosine => "Cosine",
            KernelKind::CubicHermite => "Simple Secant Cubic",
            KernelKind::MonotoneCubicHermite => "Simple Secant Monotone Cubic",
            KernelKind::Lagrange => "Lagrange Polynomial",
            KernelKind::SmoothestCubic => "Smoothest Cubic",
        }
    }

    /// Minimal number of control points the kernel accepts. Every kernel needs
    /// a full segment; a single point is rejected rather than guessed.
    pub fn min_points(&self) -> usize {
        2
    }

    /// Checks that a sequence of `len` points is long enough for this kernel
    /// and that `index` addresses one of its segments.
    pub(crate) fn check_segment(&self, len: usize, index: usize) -> Result<()> {
        if len < self.min_points() {
            return Err(InterpolationError::InvalidSequence {
                kernel: *self,
                required: self.min_points(),
                actual: len,
            });
        }
        if index >= len - 1 {
            return Err(InterpolationError::IndexOutOfRange { index, segments: len - 1 });
        }
        Ok(())
    }
}

impl Display for KernelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KernelKind {
    type Err = InterpolationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "nearest" => Ok(KernelKind::Nearest),
            "linear" => Ok(KernelKind::Linear),
            "cosine" => Ok(KernelKind::Cosine),
            "cubic" | "cubichermite" | "simplesecantcubic" => Ok(KernelKind::CubicHermite),
            "monotonecubic" | "monotonecubichermite" | "simplesecantmonotonecubic" => {
                Ok(KernelKind::MonotoneCubicHermite)
            }
            "lagrange" | "lagrangepolynomial" => Ok(KernelKind::Lagrange),
            "smoothest" | "smoothestcubic" => Ok(KernelKind::SmoothestCubic),
            _ => Err(InterpolationError::UnknownKernel(s.to_string())),
        }
    }
}

/// Step kernel, ties at `t = 0.5` resolve to `y0`.
pub fn nearest(y0: f64, y1: f64, t: f64) -> f64 {
    if t > 0.5 {
        y1
    } else {
        y0
    }
}

pub fn linear(y0: f64, y1: f64, t: f64) -> f64 {
    y0 * (1.0 - t) + y1 * t
}

/// Linear interpolation with the parameter eased by `(1 - cos(πt)) / 2`,
/// giving zero slope at both control points.
pub fn cosine(y0: f64, y1: f64, t: f64) -> f64 {
    linear(y0, y1, (1.0 - (PI * t).cos()) / 2.0)
}
