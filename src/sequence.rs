use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{InterpolationError, Result};

static NEXT_SEQUENCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [ControlSequence] object. Two sequences holding equal values
/// still have different identities; mutating a sequence gives it a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

impl SequenceId {
    fn next() -> Self {
        SequenceId(NEXT_SEQUENCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered control values, each a finite number in `[0, 1]`, through which
/// the interpolation kernels pass. The x coordinate of a value is its index.
#[derive(Debug)]
pub struct ControlSequence {
    values: Vec<f64>,
    id: SequenceId,
}

impl ControlSequence {
    /// Creates a sequence from values that are already normalized.
    /// # Example
    /// ```
    /// use piecewise_interpolation::ControlSequence;
    ///
    /// let sequence = ControlSequence::new(vec![0.0, 0.5, 1.0]);
    /// assert!(sequence.is_ok());
    /// ```
    /// # Errors
    /// Error is returned for the first value which is not finite or lies outside `[0, 1]`.
    /// ```
    /// use piecewise_interpolation::ControlSequence;
    ///
    /// let sequence = ControlSequence::new(vec![0.0, 1.5]);
    /// assert!(sequence.is_err());
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(InterpolationError::ValueOutOfRange { index, value: *value });
        }
        Ok(ControlSequence { values, id: SequenceId::next() })
    }

    /// Creates a sequence clamping every value into `[0, 1]`. Non-finite values are still rejected.
    /// # Example
    /// ```
    /// use piecewise_interpolation::ControlSequence;
    ///
    /// let sequence = ControlSequence::from_clamped(vec![-0.5, 0.25, 3.0]).unwrap();
    /// assert_eq!(&[0.0, 0.25, 1.0], sequence.values());
    /// ```
    pub fn from_clamped(values: Vec<f64>) -> Result<Self> {
        if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InterpolationError::ValueOutOfRange { index, value: *value });
        }
        let values = values.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(ControlSequence { values, id: SequenceId::next() })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of segments between consecutive control points.
    pub fn segment_count(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Replaces the value at `index`. The sequence receives a new identity.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(InterpolationError::ValueOutOfRange { index, value });
        }
        if index >= self.values.len() {
            return Err(InterpolationError::IndexOutOfRange {
                index,
                segments: self.segment_count(),
            });
        }
        self.values[index] = value;
        self.id = SequenceId::next();
        Ok(())
    }

    /// Appends a value. The sequence receives a new identity.
    pub fn push(&mut self, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(InterpolationError::ValueOutOfRange { index: self.values.len(), value });
        }
        self.values.push(value);
        self.id = SequenceId::next();
        Ok(())
    }
}

impl Clone for ControlSequence {
    fn clone(&self) -> Self {
        ControlSequence { values: self.values.clone(), id: SequenceId::next() }
    }
}

impl PartialEq for ControlSequence {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}
