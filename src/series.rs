//! Validated `(x, y)` data series.

use crate::error::{Error, Result};

/// Ordered, immutable sequence of `(x, y)` points.
///
/// Invariants checked at construction: both arrays have the same length,
/// there is at least one point, and every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DataSeries {
    /// Build a series from parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`], [`Error::EmptyData`] or
    /// [`Error::NonFiniteData`] if the invariants do not hold.
    ///
    /// # Example
    ///
    /// ```
    /// use livegraph::series::DataSeries;
    ///
    /// let series = DataSeries::new(vec![1.0, 2.0], vec![1.0, 4.0]).unwrap();
    /// assert_eq!(series.len(), 2);
    /// assert!(DataSeries::new(vec![1.0], vec![]).is_err());
    /// ```
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.is_empty() {
            return Err(Error::EmptyData);
        }
        if let Some(index) = x.iter().zip(&y).position(|(a, b)| !a.is_finite() || !b.is_finite()) {
            return Err(Error::NonFiniteData { index });
        }

        Ok(Self { x, y })
    }

    /// Build a series from slices.
    ///
    /// # Errors
    ///
    /// See [`DataSeries::new`].
    pub fn from_slices(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::new(x.to_vec(), y.to_vec())
    }

    /// X values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_series() {
        let series = DataSeries::from_slices(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        let points: Vec<_> = series.points().collect();
        assert_eq!(points[2], (3.0, 9.0));
    }

    #[test]
    fn test_length_mismatch() {
        let err = DataSeries::from_slices(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::DataLengthMismatch { x_len: 3, y_len: 2 }));
    }

    #[test]
    fn test_empty() {
        let err = DataSeries::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyData));
    }

    #[test]
    fn test_non_finite() {
        let err = DataSeries::from_slices(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteData { index: 1 }));
        let err = DataSeries::from_slices(&[1.0], &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteData { index: 0 }));
    }
}
