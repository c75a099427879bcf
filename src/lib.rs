//! # Livegraph
//!
//! Live curve-fit graphs streamed as video frames.
//!
//! A data series and a fitted curve are rendered once into a static
//! background raster: padded axes, grid, tick labels, scatter points, the
//! curve polyline and its equation. A background worker then streams that
//! canvas to a video sink at a fixed frame rate, overlaying a vertical marker
//! and value label at the most recently evaluated point.
//!
//! ## Quick Start
//!
//! ```rust
//! use livegraph::prelude::*;
//!
//! let series = DataSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 4.0, 10.0, 15.0, 23.0])?;
//! let bounds = OutputBounds::new(3.0, 20.0)?;
//! let mut solver = InterpolationSolver::new(series, LineType::QUADRATIC, Some(bounds))?;
//!
//! let (server, frames) = ChannelServer::new();
//! solver.init_graph("quadratic", GraphStyle::from_theme(GraphTheme::Dark), &server)?;
//!
//! let y = solver.solve(6.0);
//! assert_eq!(y, 20.0);
//!
//! let frame = frames.recv()?;
//! assert_eq!((frame.width, frame.height), (320, 240));
//! solver.stop_graph();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Graph creation is logged at `info`, worker start and stop at `debug`,
//! per-frame redraws at `trace`, and non-fatal misuse at `warn`.
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Golub, G. H., & Van Loan, C. F. (2013). *Matrix Computations*, 4th ed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGB colors.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Padded axis ranges and data-to-pixel mapping.
pub mod scale;

/// Graph styles, themes and YAML style files.
pub mod style;

// ============================================================================
// Data Modules
// ============================================================================

/// Validated data series.
pub mod series;

/// Curve evaluators and polynomial fitting.
pub mod curve;

/// Interpolation solver owning a live graph.
pub mod solver;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization and text.
pub mod render;

/// Background composition and the live overlay.
pub mod graph;

/// Video sinks and PNG snapshots.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error and warning types.
pub mod error;

pub use error::{Error, Result, Warning};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use livegraph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::curve::{CurveEvaluator, LineType, PolynomialFit};
    pub use crate::error::{Error, Result, Warning};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::graph::{create_graph, CanvasLayout, GraphInstance, OverlayState};
    pub use crate::output::{ChannelServer, Frame, NullServer, PngEncoder, VideoServer, VideoSink};
    pub use crate::scale::{AxisRange, CoordinateMapper};
    pub use crate::series::DataSeries;
    pub use crate::solver::{InterpolationSolver, OutputBounds};
    pub use crate::style::{GraphStyle, GraphTheme, PointMarker};
}
