//! Curve evaluators and least-squares polynomial fitting.
//!
//! The renderer only needs a [`CurveEvaluator`]: something that can be
//! evaluated at any `x` and printed as an equation. [`PolynomialFit`] is the
//! evaluator the solver builds from a data series.
//!
//! # References
//!
//! - Golub, G. H., & Van Loan, C. F. (2013). *Matrix Computations*, 4th ed.
//!   Chapter 5 (least squares via QR and SVD).

use crate::error::{Error, Result};
use crate::series::DataSeries;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// A real-valued function of one variable with a printable equation.
///
/// The equation label is the [`fmt::Display`] output.
pub trait CurveEvaluator: fmt::Display + Send + Sync {
    /// Evaluate the curve at `x`. The domain is unrestricted.
    fn predict(&self, x: f64) -> f64;
}

impl<T: CurveEvaluator + ?Sized> CurveEvaluator for &T {
    fn predict(&self, x: f64) -> f64 {
        (**self).predict(x)
    }
}

impl<T: CurveEvaluator + ?Sized> CurveEvaluator for std::sync::Arc<T> {
    fn predict(&self, x: f64) -> f64 {
        (**self).predict(x)
    }
}

/// Named polynomial degrees.
pub struct LineType;

impl LineType {
    /// Degree 0.
    pub const CONSTANT: usize = 0;
    /// Degree 1.
    pub const LINEAR: usize = 1;
    /// Degree 2.
    pub const QUADRATIC: usize = 2;
    /// Degree 3.
    pub const CUBIC: usize = 3;
    /// Degree 4.
    pub const QUARTIC: usize = 4;
    /// Degree 5.
    pub const QUINTIC: usize = 5;
}

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = LineType::QUINTIC;

/// Polynomial `c0 + c1 x + c2 x^2 + ...` fitted by ordinary least squares.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// Coefficients, lowest power first.
    coefficients: Vec<f64>,
    /// Variable name used in the printed equation.
    variable: String,
}

impl PolynomialFit {
    /// Build a polynomial from known coefficients (lowest power first).
    ///
    /// An empty coefficient list is the zero polynomial.
    #[must_use]
    pub fn from_coefficients(coefficients: Vec<f64>) -> Self {
        Self { coefficients, variable: "x".to_string() }
    }

    /// Fit a polynomial of `degree` to `series`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDegree`] if the degree exceeds [`MAX_DEGREE`]
    /// or is not below the number of points, and [`Error::Fit`] if the
    /// system cannot be solved.
    pub fn fit(series: &DataSeries, degree: usize) -> Result<Self> {
        let points = series.len();
        if degree > MAX_DEGREE || (degree > 0 && degree >= points) {
            return Err(Error::InvalidDegree { degree, points });
        }

        let n_coeffs = degree + 1;
        let xs = series.x();
        let design = DMatrix::from_fn(points, n_coeffs, |row, col| xs[row].powi(col as i32));
        let rhs = DVector::from_column_slice(series.y());

        let xtx = design.transpose() * &design;
        let xty = design.transpose() * &rhs;

        let solution = match xtx.clone().qr().solve(&xty) {
            Some(solution) => solution,
            None => xtx
                .svd(true, true)
                .solve(&xty, f64::EPSILON * 100.0)
                .map_err(|e| Error::Fit(e.to_string()))?,
        };

        let coefficients: Vec<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::Fit("least-squares solution is not finite".to_string()));
        }

        log::debug!("fitted degree {degree} polynomial to {points} points: {coefficients:?}");
        Ok(Self::from_coefficients(coefficients))
    }

    /// Use a different variable name in the printed equation.
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Coefficients, lowest power first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the polynomial (number of coefficients minus one).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

impl CurveEvaluator for PolynomialFit {
    fn predict(&self, x: f64) -> f64 {
        // Horner's method
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Format a coefficient magnitude with at most 4 decimals, trailing zeros trimmed.
fn format_magnitude(value: f64) -> String {
    let text = format!("{:.4}", value.abs());
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

impl fmt::Display for PolynomialFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y =")?;
        let mut wrote_term = false;

        for (power, &c) in self.coefficients.iter().enumerate().rev() {
            let magnitude = format_magnitude(c);
            if magnitude == "0" {
                continue;
            }

            let sign = if c < 0.0 { "-" } else { "+" };
            if wrote_term {
                write!(f, " {sign} ")?;
            } else if c < 0.0 {
                write!(f, " -")?;
            } else {
                write!(f, " ")?;
            }

            let var = &self.variable;
            match power {
                0 => write!(f, "{magnitude}")?,
                1 if magnitude == "1" => write!(f, "{var}")?,
                1 => write!(f, "{magnitude}{var}")?,
                _ if magnitude == "1" => write!(f, "{var}^{power}")?,
                _ => write!(f, "{magnitude}{var}^{power}")?,
            }
            wrote_term = true;
        }

        if !wrote_term {
            write!(f, " 0")?;
        }
        Ok(())
    }
}
