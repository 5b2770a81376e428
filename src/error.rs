use thiserror::Error;

use crate::kernel::KernelKind;

/// Errors reported by the interpolation kernels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// Sequence is too short for the requested kernel.
    #[error("{kernel} interpolation needs at least {required} control points, got {actual}")]
    InvalidSequence {
        kernel: KernelKind,
        required: usize,
        actual: usize,
    },

    /// Segment index does not address a segment of the sequence.
    #[error("segment index {index} is out of range for {segments} segment(s)")]
    IndexOutOfRange { index: usize, segments: usize },

    /// Control value is not a finite number in `[0, 1]`.
    #[error("control value {value} at index {index} is outside [0, 1]")]
    ValueOutOfRange { index: usize, value: f64 },

    /// Absolute position lies outside `[0, n - 1]`.
    #[error("position {x} is outside [0, {max}]")]
    PositionOutOfRange { x: f64, max: f64 },

    #[error("unknown interpolation kernel '{0}'")]
    UnknownKernel(String),
}

pub type Result<T> = std::result::Result<T, InterpolationError>;

/// Raised inside the smoothest-cubic solver when no tangent assignment
/// satisfies the requested second-derivative bound. Never leaves the crate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("no tangent assignment keeps |f''| <= {bound}")]
pub(crate) struct InfeasibleBound {
    pub(crate) bound: f64,
}
