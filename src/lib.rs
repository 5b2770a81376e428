//! Piecewise interpolation kernels over a sequence of control values in `[0, 1]`.
//! The x coordinate of every control value is its index, so segment `i` spans
//! `[i, i + 1]` and is addressed by a local parameter `t ∈ [0, 1]`.
//!
//! Available kernels are listed by [KernelKind]: nearest, linear, cosine eased,
//! cubic Hermite with secant tangents, its monotone variant, the global Lagrange
//! polynomial and the smoothest cubic spline, whose tangents minimize the largest
//! second derivative and are cached per sequence.
//!
//! # Example
//! ```
//! use piecewise_interpolation::{ControlSequence, Interpolator, KernelKind};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let sequence = ControlSequence::new(vec![0.0, 1.0, 0.0]).unwrap();
//! let mut interpolator = Interpolator::new();
//!
//! assert_approx_eq!(0.5, interpolator.evaluate(KernelKind::Cosine, &sequence, 1, 0.5).unwrap(), 1e-12);
//! for kind in KernelKind::ALL {
//!     assert_approx_eq!(1.0, interpolator.evaluate(kind, &sequence, 0, 1.0).unwrap(), 1e-12);
//! }
//! ```

mod error;
mod hermite;
mod interpolator;
mod kernel;
mod lagrange;
mod polynomial;
mod sequence;
mod smoothest;

pub use error::{InterpolationError, Result};
pub use hermite::{cubic_hermite, monotone_cubic_hermite};
pub use interpolator::Interpolator;
pub use kernel::{cosine, linear, nearest, KernelKind};
pub use lagrange::lagrange;
pub use polynomial::Polynomial;
pub use sequence::{ControlSequence, SequenceId};
pub use smoothest::{SmoothestCubic, SolverConfig, SolverStats};
