//! Polynomial interpolation solver with an optional live graph.
//!
//! The solver fits a polynomial to a data series once, then evaluates it on
//! demand. Results can be clamped to output bounds. When a graph is attached,
//! every evaluation is published as the graph's tracked point.

use crate::curve::{CurveEvaluator, PolynomialFit};
use crate::error::{Error, Result, Warning};
use crate::graph::{create_graph, GraphInstance};
use crate::output::{SourceInfo, VideoServer};
use crate::series::DataSeries;
use crate::style::GraphStyle;

/// Closed interval solver outputs are clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputBounds {
    min: f64,
    max: f64,
}

impl OutputBounds {
    /// Create bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless `min <= max` (NaN fails).
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `value` into the bounds. NaN passes through.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Evaluates a fitted polynomial and feeds its live graph.
#[derive(Debug)]
pub struct InterpolationSolver {
    series: DataSeries,
    fit: PolynomialFit,
    bounds: Option<OutputBounds>,
    graph: Option<GraphInstance>,
}

impl InterpolationSolver {
    /// Fit a polynomial of `degree` to `series`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDegree`] or [`Error::Fit`] if the fit fails.
    ///
    /// # Example
    ///
    /// ```
    /// use livegraph::series::DataSeries;
    /// use livegraph::solver::{InterpolationSolver, OutputBounds};
    ///
    /// let series = DataSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 4.0, 10.0, 15.0, 23.0]).unwrap();
    /// let bounds = OutputBounds::new(3.0, 20.0).unwrap();
    /// let solver = InterpolationSolver::new(series, 2, Some(bounds)).unwrap();
    ///
    /// assert_eq!(solver.solve(6.0), 20.0);
    /// assert_eq!(solver.solve(0.0), 3.0);
    /// ```
    pub fn new(series: DataSeries, degree: usize, bounds: Option<OutputBounds>) -> Result<Self> {
        let fit = PolynomialFit::fit(&series, degree)?;
        Ok(Self { series, fit, bounds, graph: None })
    }

    /// The fitted polynomial.
    #[must_use]
    pub const fn fit(&self) -> &PolynomialFit {
        &self.fit
    }

    /// Output bounds, if any.
    #[must_use]
    pub const fn bounds(&self) -> Option<OutputBounds> {
        self.bounds
    }

    /// The data series the fit was built from.
    #[must_use]
    pub const fn series(&self) -> &DataSeries {
        &self.series
    }

    /// Evaluate at `x`, clamp to the bounds, and publish to the graph.
    pub fn solve(&self, x: f64) -> f64 {
        let raw = self.fit.predict(x);
        let y = self.bounds.map_or(raw, |b| b.clamp(raw));

        if let Some(graph) = &self.graph {
            graph.update_tracked(x, y);
        }
        y
    }

    /// Create and start the live graph of this solver.
    ///
    /// Only the first call does anything; later calls report
    /// [`Warning::AlreadyStarted`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `style` is invalid, or
    /// [`Error::WorkerSpawn`] if the overlay worker cannot start.
    pub fn init_graph(
        &mut self,
        title: &str,
        style: GraphStyle,
        server: &dyn VideoServer,
    ) -> Result<Option<Warning>> {
        if let Some(graph) = &self.graph {
            let warning = Warning::AlreadyStarted { title: graph.title().to_string() };
            warning.emit();
            return Ok(Some(warning));
        }

        let mut graph = create_graph(title, style, self.series.clone(), &self.fit, server)?;
        graph.start()?;
        self.graph = Some(graph);
        Ok(None)
    }

    /// The attached graph, if [`init_graph`](Self::init_graph) succeeded.
    #[must_use]
    pub const fn graph(&self) -> Option<&GraphInstance> {
        self.graph.as_ref()
    }

    /// Video source of the attached graph.
    ///
    /// Reports [`Warning::UnstartedAccess`] and returns `None` if graphing
    /// never started. No graph exists yet in that case, so the warning
    /// carries no title.
    #[must_use]
    pub fn video_source(&self) -> Option<&SourceInfo> {
        match &self.graph {
            Some(graph) => graph.video_source(),
            None => {
                self.unstarted_warning().emit();
                None
            }
        }
    }

    fn unstarted_warning(&self) -> Warning {
        Warning::UnstartedAccess { title: self.graph.as_ref().map(|g| g.title().to_string()) }
    }

    /// Stop the attached graph, if any.
    pub fn stop_graph(&mut self) {
        if let Some(graph) = &mut self.graph {
            graph.stop();
        }
    }
}
